#![forbid(unsafe_code)]

//! Straight-alpha RGBA colors and source-over compositing.

/// An 8-bit-per-channel color with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    /// System red.
    pub const RED: Rgba = Rgba::rgb(255, 59, 48);
    /// System gray.
    pub const GRAY: Rgba = Rgba::rgb(142, 142, 147);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Same color with alpha multiplied by `factor` (clamped to [0, 1]).
    #[must_use]
    pub fn with_opacity(self, factor: f32) -> Self {
        let factor = if factor.is_finite() {
            factor.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            a: (f32::from(self.a) * factor).round() as u8,
            ..self
        }
    }

    /// Channel-wise interpolation between `self` (t = 0) and `other` (t = 1).
    #[must_use]
    pub fn lerp(self, other: Rgba, t: f32) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (f32::from(a) + (f32::from(b) - f32::from(a)) * t).round() as u8;
        Rgba::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }

    /// Composite `self` over `dst` (Porter-Duff source-over).
    #[must_use]
    pub fn over(self, dst: Rgba) -> Rgba {
        if self.a == 255 {
            return self;
        }
        if self.a == 0 {
            return dst;
        }
        let sa = f32::from(self.a) / 255.0;
        let da = f32::from(dst.a) / 255.0;
        let out_a = sa + da * (1.0 - sa);
        if out_a <= 0.0 {
            return Rgba::TRANSPARENT;
        }
        let channel = |s: u8, d: u8| {
            let c = (f32::from(s) * sa + f32::from(d) * da * (1.0 - sa)) / out_a;
            c.round().clamp(0.0, 255.0) as u8
        };
        Rgba::new(
            channel(self.r, dst.r),
            channel(self.g, dst.g),
            channel(self.b, dst.b),
            (out_a * 255.0).round() as u8,
        )
    }

    /// Perceived luminance in [0, 1] (Rec. 709 weights).
    #[must_use]
    pub fn luminance(self) -> f32 {
        (0.2126 * f32::from(self.r) + 0.7152 * f32::from(self.g) + 0.0722 * f32::from(self.b))
            / 255.0
    }
}

/// A two-stop vertical gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gradient {
    pub top: Rgba,
    pub bottom: Rgba,
}

impl Gradient {
    /// The subtle top-light gradient derived from a single color.
    #[must_use]
    pub fn from_color(color: Rgba) -> Self {
        Self {
            top: color.lerp(Rgba::WHITE, 0.12),
            bottom: color,
        }
    }

    /// Color at vertical position `t` in [0, 1].
    #[inline]
    #[must_use]
    pub fn at(&self, t: f32) -> Rgba {
        self.top.lerp(self.bottom, t)
    }
}
