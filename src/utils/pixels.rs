use gpui::{AbsoluteLength, DefiniteLength, Pixels, Window, px};

pub trait PixelsExt {
    /// Top and bottom padding that makes a single text line reach this height.
    fn padding_needed_for_height(
        &self,
        window: &Window,
        text_size: AbsoluteLength,
        line_height: DefiniteLength,
    ) -> Pixels;
}

impl PixelsExt for Pixels {
    fn padding_needed_for_height(
        &self,
        window: &Window,
        text_size: AbsoluteLength,
        line_height: DefiniteLength,
    ) -> Pixels {
        let line_height = line_height_in_pixels(window, text_size, line_height);
        let height = self.to_f64() as f32;
        let line_height = line_height.to_f64() as f32;
        px(((height - line_height) / 2.).max(0.))
    }
}

/// Resolves a token line height against a token text size.
pub fn line_height_in_pixels(
    window: &Window,
    text_size: AbsoluteLength,
    line_height: DefiniteLength,
) -> Pixels {
    let text_size = text_size.to_pixels(window.rem_size());

    match line_height {
        DefiniteLength::Absolute(line_height) => line_height.to_pixels(window.rem_size()),
        DefiniteLength::Fraction(frac) => text_size * frac,
    }
}
