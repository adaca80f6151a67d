use std::{fmt::Write as _, rc::Rc};

use gpui::{
    App, Bounds, CursorStyle, ElementId, Hsla, InteractiveElement, IntoElement, MouseButton,
    ParentElement, PathBuilder, Pixels, Point, RenderOnce, SharedString,
    StatefulInteractiveElement, Styled, Window, canvas, div, point, prelude::FluentBuilder, px,
    rgb,
};
use gpui_squircle::{SquircleStyled, squircle};
use thiserror::Error;

use super::{Field, FieldProps, LabeledField, ValueChangeHandler};
use crate::{
    ElementIdExt,
    components::{Button, ButtonSize, ButtonVariant},
    theme::{ThemeExt, ThemeSettings},
};

/// Logical canvas size; strokes are stored in these units whatever the pad's displayed size.
pub const CANVAS_WIDTH: f32 = 400.;
pub const CANVAS_HEIGHT: f32 = 150.;
pub const PEN_WIDTH: f32 = 2.;
pub const PEN_COLOR: u32 = 0x000000;

const DATA_URL_PREFIX: &str = "data:image/svg+xml,";

#[derive(Debug, Error)]
pub enum SignatureError {
    #[error("failed to build stroke path: {0}")]
    Path(String),
    #[error("failed to write svg: {0}")]
    Format(#[from] std::fmt::Error),
}

/// Strokes of a signature and whether the pen is down.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignatureState {
    strokes: Vec<Vec<Point<f32>>>,
    drawing: bool,
}

impl SignatureState {
    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn strokes(&self) -> &[Vec<Point<f32>>] {
        &self.strokes
    }

    /// Pen down at `at`, in canvas units. Starts a new stroke.
    pub fn press(&mut self, at: Point<f32>) {
        self.drawing = true;
        self.strokes.push(vec![clamp_to_canvas(at)]);
    }

    /// Extends the current stroke. Ignored while the pen is up.
    pub fn drag(&mut self, to: Point<f32>) {
        if !self.drawing {
            return;
        }
        if let Some(stroke) = self.strokes.last_mut() {
            stroke.push(clamp_to_canvas(to));
        }
    }

    /// Pen up. Returns true when a stroke was in progress.
    pub fn release(&mut self) -> bool {
        std::mem::replace(&mut self.drawing, false)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// The strokes as a standalone SVG document. A stroke of one point draws a dot.
    pub fn to_svg(&self) -> Result<String, SignatureError> {
        let mut svg = String::new();
        svg.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg""#);
        write!(svg, r#" width="{CANVAS_WIDTH}" height="{CANVAS_HEIGHT}""#)?;
        write!(svg, r#" viewBox="0 0 {CANVAS_WIDTH} {CANVAS_HEIGHT}">"#)?;
        for stroke in &self.strokes {
            let Some((first, rest)) = stroke.split_first() else {
                continue;
            };
            write!(svg, r#"<path d="M{:.1} {:.1}"#, first.x, first.y)?;
            if rest.is_empty() {
                write!(svg, " L{:.1} {:.1}", first.x, first.y)?;
            }
            for p in rest {
                write!(svg, " L{:.1} {:.1}", p.x, p.y)?;
            }
            write!(
                svg,
                r##"" fill="none" stroke="#{PEN_COLOR:06X}" stroke-width="{PEN_WIDTH}""##
            )?;
            svg.push_str(r#" stroke-linecap="round" stroke-linejoin="round"/>"#);
        }
        svg.push_str("</svg>");
        Ok(svg)
    }

    /// The value reported for this signature: empty when nothing was drawn,
    /// otherwise a percent-encoded SVG data URL.
    pub fn to_data_url(&self) -> Result<String, SignatureError> {
        if self.is_empty() {
            return Ok(String::new());
        }
        let svg = self.to_svg()?;
        Ok(format!("{DATA_URL_PREFIX}{}", urlencoding::encode(&svg)))
    }
}

fn clamp_to_canvas(p: Point<f32>) -> Point<f32> {
    point(p.x.clamp(0., CANVAS_WIDTH), p.y.clamp(0., CANVAS_HEIGHT))
}

/// Maps a window position onto the logical canvas drawn in `bounds`.
pub fn to_canvas_units(position: Point<Pixels>, bounds: Bounds<Pixels>) -> Point<f32> {
    let width = (bounds.size.width.to_f64() as f32).max(1.);
    let height = (bounds.size.height.to_f64() as f32).max(1.);
    point(
        (position.x - bounds.origin.x).to_f64() as f32 * CANVAS_WIDTH / width,
        (position.y - bounds.origin.y).to_f64() as f32 * CANVAS_HEIGHT / height,
    )
}

fn stroke_path(
    stroke: &[Point<f32>],
    bounds: Bounds<Pixels>,
) -> Result<gpui::Path<Pixels>, SignatureError> {
    let scale_x = bounds.size.width.to_f64() as f32 / CANVAS_WIDTH;
    let scale_y = bounds.size.height.to_f64() as f32 / CANVAS_HEIGHT;
    let to_window =
        |p: &Point<f32>| bounds.origin + point(px(p.x * scale_x), px(p.y * scale_y));

    let mut builder = PathBuilder::stroke(px(PEN_WIDTH * scale_x.max(scale_y)));
    let Some((first, rest)) = stroke.split_first() else {
        return Err(SignatureError::Path("empty stroke".into()));
    };
    builder.move_to(to_window(first));
    if rest.is_empty() {
        // Nudge so a single press still draws a visible dot.
        builder.line_to(to_window(first) + point(px(0.5), px(0.5)));
    }
    for p in rest {
        builder.line_to(to_window(p));
    }
    builder
        .build()
        .map_err(|err| SignatureError::Path(err.to_string()))
}

struct SignaturePad {
    signature: SignatureState,
    bounds: Bounds<Pixels>,
}

/// Signature capture pad. Reports an SVG data URL when a stroke ends and an
/// empty string when cleared.
#[derive(IntoElement)]
pub struct SignatureField {
    id: ElementId,
    settings: ThemeSettings,
    props: FieldProps,
    on_change: Option<ValueChangeHandler<SharedString>>,
}

impl SignatureField {
    pub fn new(id: impl Into<ElementId>, settings: ThemeSettings) -> Self {
        Self {
            id: id.into(),
            settings,
            props: FieldProps::default(),
            on_change: None,
        }
    }

    pub fn on_change(
        mut self,
        on_change: impl Fn(&SharedString, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_change = Some(Rc::new(on_change));
        self
    }
}

impl LabeledField for SignatureField {
    fn props_mut(&mut self) -> &mut FieldProps {
        &mut self.props
    }
}

fn report(
    signature: &SignatureState,
    on_change: Option<&ValueChangeHandler<SharedString>>,
    window: &mut Window,
    cx: &mut App,
) {
    let Some(on_change) = on_change else {
        return;
    };
    match signature.to_data_url() {
        Ok(url) => on_change(&SharedString::from(url), window, cx),
        Err(err) => log::warn!("could not serialize signature: {err}"),
    }
}

impl RenderOnce for SignatureField {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let pad = window.use_keyed_state(self.id.with_suffix("state:pad"), cx, |_window, _cx| {
            SignaturePad {
                signature: SignatureState::default(),
                bounds: Bounds::default(),
            }
        });
        let strokes = pad.read(cx).signature.strokes().to_vec();

        let theme = cx.get_theme();
        let background_color = theme.colors.surface.primary;
        let border_color = theme.colors.border.input;
        let hint_color = theme.colors.text.secondary;
        let caption_size = theme.layout.text.default_font.sizes.caption;
        let corner_radius = theme.layout.corner_radii.md;
        let disabled = self.props.disabled;

        let finish = {
            let pad = pad.clone();
            let on_change = self.on_change.clone();
            move |window: &mut Window, cx: &mut App| {
                let finished = pad.update(cx, |pad, cx| {
                    let finished = pad.signature.release();
                    cx.notify();
                    finished
                });
                if finished {
                    let signature = pad.read(cx).signature.clone();
                    report(&signature, on_change.as_ref(), window, cx);
                }
            }
        };
        let finish = Rc::new(finish);
        let finish_on_up = finish.clone();
        let finish_on_up_out = finish.clone();
        let finish_on_leave = finish;

        let surface = div()
            .id(self.id.with_suffix("pad"))
            .relative()
            .w_full()
            .h(px(CANVAS_HEIGHT))
            .cursor(if disabled {
                CursorStyle::OperationNotAllowed
            } else {
                CursorStyle::Crosshair
            })
            .child(
                squircle()
                    .absolute_expand()
                    .rounded(corner_radius)
                    .bg(background_color)
                    .border(px(1.))
                    .border_inside()
                    .border_color(border_color),
            )
            .child(
                canvas(
                    {
                        let pad = pad.clone();
                        move |bounds, _window, cx| {
                            pad.update(cx, |pad, _cx| pad.bounds = bounds);
                            bounds
                        }
                    },
                    move |_, bounds, window, _cx| {
                        for stroke in &strokes {
                            match stroke_path(stroke, bounds) {
                                Ok(path) => window.paint_path(path, Hsla::from(rgb(PEN_COLOR))),
                                Err(err) => log::warn!("skipping signature stroke: {err}"),
                            }
                        }
                    },
                )
                .absolute()
                .size_full(),
            )
            .when(!disabled, |this| {
                let press_pad = pad.clone();
                let move_pad = pad.clone();
                this.on_mouse_down(MouseButton::Left, move |event, window, cx| {
                    window.prevent_default();
                    press_pad.update(cx, |pad, cx| {
                        let at = to_canvas_units(event.position, pad.bounds);
                        pad.signature.press(at);
                        cx.notify();
                    });
                })
                .on_mouse_move(move |event, _window, cx| {
                    move_pad.update(cx, |pad, cx| {
                        if !pad.signature.is_drawing() {
                            return;
                        }
                        let at = to_canvas_units(event.position, pad.bounds);
                        pad.signature.drag(at);
                        cx.notify();
                    });
                })
                .on_mouse_up(MouseButton::Left, move |_, window, cx| {
                    finish_on_up(window, cx)
                })
                .on_mouse_up_out(MouseButton::Left, move |_, window, cx| {
                    finish_on_up_out(window, cx)
                })
                .on_hover(move |hovered, window, cx| {
                    if !*hovered {
                        finish_on_leave(window, cx);
                    }
                })
            });

        let footer = div()
            .flex()
            .items_center()
            .justify_between()
            .child(
                div()
                    .text_size(caption_size)
                    .text_color(hint_color)
                    .child("Sign above"),
            )
            .child(
                Button::new(self.id.with_suffix("clear"), self.settings)
                    .label("Clear")
                    .variant(ButtonVariant::Outline)
                    .size(ButtonSize::Sm)
                    .disabled(disabled)
                    .on_click({
                        let pad = pad.clone();
                        let on_change = self.on_change.clone();
                        move |_, window, cx| {
                            pad.update(cx, |pad, cx| {
                                pad.signature.clear();
                                cx.notify();
                            });
                            let signature = pad.read(cx).signature.clone();
                            report(&signature, on_change.as_ref(), window, cx);
                        }
                    }),
            );

        Field::new(self.settings, self.props)
            .child(surface)
            .child(footer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_without_movement_still_draws() {
        let mut signature = SignatureState::default();
        signature.press(point(10., 20.));
        assert!(signature.release());

        let url = signature.to_data_url().expect("serializes");
        assert!(url.starts_with(DATA_URL_PREFIX));
        let svg = signature.to_svg().expect("serializes");
        assert!(svg.contains("M10.0 20.0 L10.0 20.0"));
    }

    #[test]
    fn clear_reports_empty_value() {
        let mut signature = SignatureState::default();
        signature.press(point(1., 1.));
        signature.drag(point(50., 60.));
        signature.release();
        signature.clear();
        assert!(signature.is_empty());
        assert_eq!(signature.to_data_url().expect("serializes"), "");
    }

    #[test]
    fn moves_are_ignored_while_the_pen_is_up() {
        let mut signature = SignatureState::default();
        signature.drag(point(5., 5.));
        assert!(signature.is_empty());
        assert!(!signature.release());

        signature.press(point(0., 0.));
        signature.drag(point(500., -10.));
        signature.release();
        signature.drag(point(30., 30.));
        assert_eq!(signature.strokes(), [vec![point(0., 0.), point(CANVAS_WIDTH, 0.)]]);
    }

    #[test]
    fn scales_display_positions_to_canvas_units() {
        let bounds = Bounds::new(point(px(100.), px(50.)), gpui::size(px(800.), px(300.)));
        let at = to_canvas_units(point(px(500.), px(200.)), bounds);
        assert_eq!(at, point(200., 75.));
    }

    #[test]
    fn svg_uses_the_pen() {
        let mut signature = SignatureState::default();
        signature.press(point(0., 0.));
        signature.drag(point(4., 4.));
        let svg = signature.to_svg().expect("serializes");
        assert!(svg.contains(r##"stroke="#000000""##));
        assert!(svg.contains(r#"stroke-width="2""#));
        assert!(svg.contains(r#"viewBox="0 0 400 150""#));
    }
}

#[cfg(all(test, feature = "test-support"))]
mod gpui_tests {
    use super::*;
    use crate::theme::{Theme, ThemeExt};
    use gpui::{TestAppContext, VisualTestContext};

    struct SignatureView {
        last: Option<SharedString>,
    }

    impl gpui::Render for SignatureView {
        fn render(
            &mut self,
            _window: &mut Window,
            cx: &mut gpui::Context<Self>,
        ) -> impl IntoElement {
            div().size_full().child(
                SignatureField::new("signature", ThemeSettings::DEFAULT)
                    .label("Signature")
                    .on_change(cx.listener(|this, value: &SharedString, _window, cx| {
                        this.last = Some(value.clone());
                        cx.notify();
                    })),
            )
        }
    }

    #[gpui::test]
    fn pad_renders_with_pointer_handlers(cx: &mut TestAppContext) {
        cx.update(|cx| cx.set_theme(Theme::DEFAULT));
        let window = cx.add_window(|_window, _cx| SignatureView { last: None });
        let view = window.root(cx).expect("window root");
        let mut cx = VisualTestContext::from_window(window.into(), cx);
        cx.run_until_parked();

        view.read_with(&cx, |view, _| assert!(view.last.is_none()));
    }
}
