mod button;
pub use button::*;

mod checkbox;
pub use checkbox::*;

mod icon;
pub use icon::*;

mod radio;
pub use radio::*;

mod text_input;
pub use text_input::*;

pub mod fields;

pub mod layout;
