//! Theming for the gallery.
//!
//! Two layers make up the look of every component:
//! - design tokens ([`Theme`]): sizes, radii, text scale and a neutral palette, loaded
//!   from JSON and installed once per app;
//! - customization settings ([`ThemeSettings`]): fonts, button shape and brand colors,
//!   owned by a [`ThemeStore`] entity and handed to components explicitly.

mod schema;
pub use schema::*;

mod deserializers;

mod ext;
pub use ext::*;

mod kinds;
pub use kinds::*;

mod color;
pub use color::*;

mod settings;
pub use settings::*;

mod store;
pub use store::*;
