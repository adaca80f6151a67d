use std::borrow::Cow;

use anyhow::anyhow;
use gpui::{AssetSource, Result, SharedString};
use smallvec::SmallVec;

/// An embedded bundle of files, e.g. a `RustEmbed` folder.
pub trait AssetProvider: Send + Sync {
    fn get(&self, path: &str) -> Option<Cow<'static, [u8]>>;
    fn list(&self, path: &str) -> Result<Vec<SharedString>>;
}

/// Asset source stacking several providers. Earlier providers win on conflicts,
/// so an app can shadow a bundled icon by listing its own bundle first.
pub struct Assets<const N: usize> {
    providers: SmallVec<[Box<dyn AssetProvider>; N]>,
}

impl<const N: usize> Assets<N> {
    pub fn new(providers: [Box<dyn AssetProvider>; N]) -> Assets<N> {
        Self {
            providers: SmallVec::from(providers),
        }
    }
}

/// Builds an [`Assets`] source from providers: `assets![FormsflowAssets, MyAssets]`.
#[macro_export]
macro_rules! assets {
    ( $( $item:expr ),* $(,)? ) => {
        $crate::Assets::new([
            $( Box::new($item) ),*
        ])
    };
}

impl<const N: usize> AssetSource for Assets<N> {
    fn load(&self, path: &str) -> Result<Option<Cow<'static, [u8]>>> {
        if path.is_empty() {
            return Ok(None);
        }

        self.providers
            .iter()
            .find_map(|provider| provider.get(path))
            .map(Some)
            .ok_or_else(|| anyhow!("could not find asset at path \"{path}\""))
    }

    fn list(&self, path: &str) -> Result<Vec<SharedString>> {
        let mut listed = Vec::new();
        for provider in &self.providers {
            listed.extend(provider.list(path)?);
        }
        listed.sort();
        listed.dedup();
        Ok(listed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(&'static [(&'static str, &'static [u8])]);

    impl AssetProvider for Fixed {
        fn get(&self, path: &str) -> Option<Cow<'static, [u8]>> {
            self.0
                .iter()
                .find(|(name, _)| *name == path)
                .map(|(_, data)| Cow::Borrowed(*data))
        }

        fn list(&self, path: &str) -> Result<Vec<SharedString>> {
            Ok(self
                .0
                .iter()
                .filter(|(name, _)| name.starts_with(path))
                .map(|(name, _)| SharedString::new_static(name))
                .collect())
        }
    }

    #[test]
    fn first_provider_wins() {
        let assets = assets![
            Fixed(&[("icons/check.svg", b"mine")]),
            Fixed(&[("icons/check.svg", b"bundled"), ("icons/x.svg", b"x")]),
        ];

        let check = assets.load("icons/check.svg").unwrap().unwrap();
        assert_eq!(check.as_ref(), b"mine");
        assert!(assets.load("icons/x.svg").unwrap().is_some());
    }

    #[test]
    fn missing_and_empty_paths() {
        let assets = assets![Fixed(&[])];
        assert!(assets.load("").unwrap().is_none());
        assert!(assets.load("icons/nope.svg").is_err());
    }

    #[test]
    fn listing_merges_providers() {
        let assets = assets![
            Fixed(&[("icons/check.svg", b"")]),
            Fixed(&[("icons/check.svg", b""), ("icons/x.svg", b"")]),
        ];
        let listed = assets.list("icons/").unwrap();
        assert_eq!(listed.len(), 2);
    }
}
