//! The app shell and its pages.

use std::rc::Rc;

use gpui::{App, ClickEvent, Window};

mod app;
pub use app::*;

mod customization;
pub use customization::*;

mod footer;
pub use footer::*;

mod gallery;
pub use gallery::*;

mod sample_form;
pub use sample_form::*;

pub(crate) type ClickHandler = Rc<dyn Fn(&ClickEvent, &mut Window, &mut App) + 'static>;
