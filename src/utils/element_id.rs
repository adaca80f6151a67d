use gpui::{ElementId, SharedString};

pub trait ElementIdExt {
    /// Derives a child id, e.g. `id.with_suffix("state:hover")` for keyed state.
    fn with_suffix(&self, suffix: impl Into<SharedString>) -> ElementId;

    /// Derives the id of the `ix`th repeated child, e.g. one option of a radio group.
    fn with_index(&self, suffix: &str, ix: usize) -> ElementId {
        self.with_suffix(format!("{suffix}:{ix}"))
    }
}

impl ElementIdExt for ElementId {
    fn with_suffix(&self, suffix: impl Into<SharedString>) -> ElementId {
        ElementId::NamedChild(Box::new(self.clone()), suffix.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_ids_are_distinct() {
        let base = ElementId::from("email");
        assert_ne!(base.with_suffix("state:hover"), base.with_suffix("state:focus"));
        assert_eq!(base.with_index("option", 2), base.with_suffix("option:2"));
        assert_ne!(base.with_index("option", 1), base.with_index("option", 2));
    }
}
