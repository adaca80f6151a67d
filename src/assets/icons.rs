#![allow(missing_docs)] // Derive macros generate undocumented methods.

use enum_assoc::Assoc;
use gpui::SharedString;

/// Icons the components draw, mapped to their embedded SVG paths.
#[derive(Assoc, Debug, Clone, Copy, PartialEq, Eq)]
#[func(pub fn path(&self) -> SharedString)]
pub enum IconKind {
    #[assoc(path = "icons/check.svg".into())]
    Check,
    #[assoc(path = "icons/chevron-down.svg".into())]
    ChevronDown,
    #[assoc(path = "icons/chevron-left.svg".into())]
    ChevronLeft,
    #[assoc(path = "icons/chevron-right.svg".into())]
    ChevronRight,
    #[assoc(path = "icons/calendar.svg".into())]
    Calendar,
    #[assoc(path = "icons/x.svg".into())]
    Close,
    #[assoc(path = "icons/plus.svg".into())]
    Plus,
    #[assoc(path = "icons/minus.svg".into())]
    Minus,
    #[assoc(path = "icons/trash.svg".into())]
    Trash,
    #[assoc(path = "icons/settings.svg".into())]
    Settings,
    #[assoc(path = "icons/file-text.svg".into())]
    FileText,
    #[assoc(path = "icons/arrow-left.svg".into())]
    ArrowLeft,
    #[assoc(path = "icons/upload.svg".into())]
    Upload,
    #[assoc(path = "icons/eye.svg".into())]
    Eye,
    #[assoc(path = "icons/eye-off.svg".into())]
    EyeOff,
}

impl IconKind {
    pub const ALL: [IconKind; 15] = [
        IconKind::Check,
        IconKind::ChevronDown,
        IconKind::ChevronLeft,
        IconKind::ChevronRight,
        IconKind::Calendar,
        IconKind::Close,
        IconKind::Plus,
        IconKind::Minus,
        IconKind::Trash,
        IconKind::Settings,
        IconKind::FileText,
        IconKind::ArrowLeft,
        IconKind::Upload,
        IconKind::Eye,
        IconKind::EyeOff,
    ];
}

impl From<IconKind> for SharedString {
    fn from(icon: IconKind) -> Self {
        icon.path()
    }
}
