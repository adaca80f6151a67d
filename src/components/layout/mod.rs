//! Containers that arrange fields.

mod columns;
pub use columns::*;

mod fieldset;
pub use fieldset::*;

mod panel;
pub use panel::*;

mod tabs;
pub use tabs::*;
