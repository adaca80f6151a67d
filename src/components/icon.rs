use gpui::{
    Hsla, IntoElement, Length, Radians, RenderOnce, SharedString, SizeRefinement, Styled,
    Transformation, prelude::FluentBuilder, px, svg,
};

use crate::theme::ThemeExt;

/// An embedded SVG icon, tinted with the current text color unless told otherwise.
#[derive(IntoElement)]
pub struct Icon {
    path: SharedString,
    pub(crate) size: SizeRefinement<Length>,
    rotate: Radians,
    color: Option<Hsla>,
    flex_none: bool,
}

impl Icon {
    /// Creates an icon from an asset path or an [`IconKind`](crate::IconKind).
    pub fn new(path: impl Into<SharedString>) -> Self {
        Self {
            path: path.into(),
            size: SizeRefinement::default(),
            rotate: Radians(0.),
            color: None,
            flex_none: true,
        }
    }

    /// Sets uniform width and height for the icon.
    pub fn size(mut self, size: impl Into<Length>) -> Self {
        let size = size.into();
        self.size = SizeRefinement {
            width: Some(size),
            height: Some(size),
        };
        self
    }

    pub fn color(mut self, color: impl Into<Hsla>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn rotate(mut self, rotate: impl Into<Radians>) -> Self {
        self.rotate = rotate.into();
        self
    }

    /// Lets the icon shrink with its row instead of keeping its size.
    pub fn shrinkable(mut self) -> Self {
        self.flex_none = false;
        self
    }
}

impl RenderOnce for Icon {
    fn render(self, _window: &mut gpui::Window, cx: &mut gpui::App) -> impl IntoElement {
        let primary_text_color = cx.get_theme().colors.text.primary;
        let width = self.size.width.unwrap_or(px(16.).into());
        let height = self.size.height.unwrap_or(px(16.).into());

        svg()
            .path(self.path)
            .text_color(primary_text_color)
            .w(width)
            .min_w(width)
            .h(height)
            .min_h(height)
            .when(self.flex_none, |this| this.flex_none())
            .with_transformation(Transformation::rotate(self.rotate))
            .when_some(self.color, |this, color| this.text_color(color))
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use super::*;
    use crate::{IconKind, theme::Theme};
    use gpui::{AppContext, ParentElement, TestAppContext, VisualTestContext, hsla};

    #[gpui::test]
    fn builder_sets_fields(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            let icon = Icon::new(IconKind::Calendar)
                .size(px(20.))
                .color(hsla(0.5, 0.5, 0.5, 1.0))
                .rotate(Radians(std::f32::consts::PI));

            assert_eq!(icon.path, SharedString::from("icons/calendar.svg"));
            assert!(icon.size.width.is_some() && icon.size.height.is_some());
            assert!(icon.color.is_some());
            assert_eq!(icon.rotate.0, std::f32::consts::PI);
        });
    }

    #[gpui::test]
    fn renders_in_window(cx: &mut TestAppContext) {
        let window = cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);
            cx.open_window(Default::default(), |_window, cx| cx.new(|_cx| IconTestView))
                .unwrap()
        });

        let _cx = VisualTestContext::from_window(window.into(), cx);
    }

    struct IconTestView;

    impl gpui::Render for IconTestView {
        fn render(
            &mut self,
            _window: &mut gpui::Window,
            _cx: &mut gpui::Context<Self>,
        ) -> impl IntoElement {
            gpui::div()
                .size_full()
                .child(Icon::new(IconKind::Check).size(px(24.)))
        }
    }
}
