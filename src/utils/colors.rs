use gpui::{Hsla, Rgba};

/// Creates an RGBA color from a hex value and alpha component.
pub fn rgb_a(hex: u32, a: f32) -> Rgba {
    let [_, r, g, b] = hex.to_be_bytes().map(|b| (b as f32) / 255.0);
    Rgba { r, g, b, a }
}

pub trait RgbaExt {
    /// Returns the same color with `alpha` as its alpha channel.
    fn alpha(self, alpha: f32) -> Self;

    /// Straight-alpha mix of `self` over `other`, `amount` being the share of `other`.
    fn mix(self, other: Rgba, amount: f32) -> Self;
}

impl RgbaExt for Rgba {
    fn alpha(mut self, alpha: f32) -> Self {
        self.a = alpha;
        self
    }

    fn mix(self, other: Rgba, amount: f32) -> Self {
        let amount = amount.clamp(0., 1.);
        let channel = |a: f32, b: f32| a + (b - a) * amount;
        Rgba {
            r: channel(self.r, other.r),
            g: channel(self.g, other.g),
            b: channel(self.b, other.b),
            a: channel(self.a, other.a),
        }
    }
}

impl RgbaExt for Hsla {
    fn alpha(mut self, alpha: f32) -> Self {
        self.a = alpha;
        self
    }

    fn mix(self, other: Rgba, amount: f32) -> Self {
        Rgba::from(self).mix(other, amount).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_a_splits_channels() {
        let color = rgb_a(0xFF8000, 0.5);
        assert_eq!(color.r, 1.);
        assert!((color.g - 128. / 255.).abs() < f32::EPSILON);
        assert_eq!(color.b, 0.);
        assert_eq!(color.a, 0.5);
    }

    #[test]
    fn mix_moves_towards_other() {
        let black = rgb_a(0x000000, 1.);
        let white = rgb_a(0xFFFFFF, 1.);
        assert_eq!(black.mix(white, 0.), black);
        assert_eq!(black.mix(white, 1.), white);
        assert!((black.mix(white, 0.25).r - 0.25).abs() < 1e-6);
        assert_eq!(black.mix(white, 4.), white, "amount is clamped");
    }
}
