mod assets;
pub use assets::*;

mod icons;
pub use icons::*;

cfg_if::cfg_if!(
    if #[cfg(feature = "assets")] {
        mod formsflow_assets;
        pub use formsflow_assets::*;
    }
);
