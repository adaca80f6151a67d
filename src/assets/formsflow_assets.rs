use std::borrow::Cow;

use gpui::{Result, SharedString};
use rust_embed::RustEmbed;

use crate::assets::AssetProvider;

/// Icons bundled with the crate.
#[derive(RustEmbed)]
#[folder = "assets/"]
#[include = "icons/**/*.svg"]
#[exclude = "*.DS_Store"]
pub struct FormsflowAssets;

impl AssetProvider for FormsflowAssets {
    fn get(&self, path: &str) -> Option<Cow<'static, [u8]>> {
        <Self as RustEmbed>::get(path).map(|f| f.data)
    }

    fn list(&self, path: &str) -> Result<Vec<SharedString>> {
        Ok(Self::iter()
            .filter_map(|p| p.starts_with(path).then(|| p.into()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IconKind;

    #[test]
    fn every_icon_is_embedded() {
        for icon in IconKind::ALL {
            let path = icon.path();
            assert!(
                FormsflowAssets.get(&path).is_some(),
                "missing embedded icon {path}"
            );
        }
    }

    #[test]
    fn lists_by_prefix() {
        let icons = FormsflowAssets.list("icons/").expect("listing never fails");
        assert_eq!(icons.len(), IconKind::ALL.len());
        assert!(FormsflowAssets.list("fonts/").expect("listing").is_empty());
    }
}
