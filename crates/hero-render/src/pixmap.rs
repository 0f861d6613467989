#![forbid(unsafe_code)]

//! Scale-aware RGBA bitmaps.
//!
//! A [`Pixmap`] stores `width × height` device pixels together with the
//! scale factor it was rendered at, so its logical size (in points) is
//! `width / scale × height / scale`.
//!
//! # Invariants
//!
//! 1. `data.len() == width * height`.
//! 2. `scale` is finite and positive.
//! 3. Out-of-bounds reads return `None`; out-of-bounds writes are ignored.

use hero_core::geometry::Size;

use crate::color::Rgba;

/// Largest accepted side length in device pixels.
pub const MAX_DIMENSION: u32 = 16_384;

/// An owned RGBA bitmap.
#[derive(Clone, PartialEq)]
pub struct Pixmap {
    width: u32,
    height: u32,
    scale: f64,
    data: Vec<Rgba>,
}

impl std::fmt::Debug for Pixmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pixmap")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("scale", &self.scale)
            .finish_non_exhaustive()
    }
}

impl Pixmap {
    /// Create a transparent pixmap.
    ///
    /// Returns `None` for a zero or oversized dimension, or an invalid scale.
    #[must_use]
    pub fn new(width: u32, height: u32, scale: f64) -> Option<Self> {
        if width == 0
            || height == 0
            || width > MAX_DIMENSION
            || height > MAX_DIMENSION
            || !(scale.is_finite() && scale > 0.0)
        {
            return None;
        }
        Some(Self {
            width,
            height,
            scale,
            data: vec![Rgba::TRANSPARENT; width as usize * height as usize],
        })
    }

    /// Create a pixmap covering `size` points at `scale`.
    #[must_use]
    pub fn for_size(size: Size, scale: f64) -> Option<Self> {
        let (w, h) = size.to_pixels(scale);
        Self::new(w, h, scale)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Device pixels per logical point.
    #[inline]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Size in logical points.
    #[inline]
    pub fn logical_size(&self) -> Size {
        Size::new(
            f64::from(self.width) / self.scale,
            f64::from(self.height) / self.scale,
        )
    }

    /// Raw pixel rows, top to bottom.
    #[inline]
    pub fn pixels(&self) -> &[Rgba] {
        &self.data
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    /// Read a pixel.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<Rgba> {
        self.index(x, y).map(|i| self.data[i])
    }

    /// Overwrite a pixel.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, color: Rgba) {
        if let Some(i) = self.index(x, y) {
            self.data[i] = color;
        }
    }

    /// Composite `color` over a pixel.
    #[inline]
    pub fn blend(&mut self, x: u32, y: u32, color: Rgba) {
        if let Some(i) = self.index(x, y) {
            self.data[i] = color.over(self.data[i]);
        }
    }

    /// Overwrite every pixel.
    pub fn fill(&mut self, color: Rgba) {
        self.data.fill(color);
    }

    /// Nearest-neighbour sample at normalized coordinates `(u, v)` in [0, 1].
    pub fn sample(&self, u: f64, v: f64) -> Rgba {
        let x = (u.clamp(0.0, 1.0) * f64::from(self.width)).floor() as u32;
        let y = (v.clamp(0.0, 1.0) * f64::from(self.height)).floor() as u32;
        self.get(x.min(self.width - 1), y.min(self.height - 1))
            .unwrap_or(Rgba::TRANSPARENT)
    }

    /// Separable box blur with a radius of `radius` device pixels.
    ///
    /// Works on premultiplied values so transparent neighbours do not darken
    /// edges. A radius below half a pixel is a no-op.
    pub fn blur(&mut self, radius: f64) {
        if !radius.is_finite() || radius < 0.5 {
            return;
        }
        let r = radius.round() as usize;
        let (w, h) = (self.width as usize, self.height as usize);
        let mut buf: Vec<[f32; 4]> = self.data.iter().map(|c| premultiply(*c)).collect();
        let mut scratch = vec![[0.0f32; 4]; buf.len()];

        for y in 0..h {
            box_pass(&buf[y * w..(y + 1) * w], &mut scratch[y * w..(y + 1) * w], r);
        }
        for x in 0..w {
            let column: Vec<[f32; 4]> = (0..h).map(|y| scratch[y * w + x]).collect();
            let mut out = vec![[0.0f32; 4]; h];
            box_pass(&column, &mut out, r);
            for (y, px) in out.into_iter().enumerate() {
                buf[y * w + x] = px;
            }
        }

        for (dst, px) in self.data.iter_mut().zip(buf) {
            *dst = unpremultiply(px);
        }
    }
}

fn premultiply(c: Rgba) -> [f32; 4] {
    let a = f32::from(c.a) / 255.0;
    [
        f32::from(c.r) * a,
        f32::from(c.g) * a,
        f32::from(c.b) * a,
        f32::from(c.a),
    ]
}

fn unpremultiply(px: [f32; 4]) -> Rgba {
    let a = px[3].clamp(0.0, 255.0);
    if a < 0.5 {
        return Rgba::TRANSPARENT;
    }
    let k = 255.0 / a;
    let ch = |v: f32| (v * k).round().clamp(0.0, 255.0) as u8;
    Rgba::new(ch(px[0]), ch(px[1]), ch(px[2]), a.round() as u8)
}

/// One-dimensional running-sum box filter with edge clamping.
fn box_pass(src: &[[f32; 4]], dst: &mut [[f32; 4]], r: usize) {
    let n = src.len();
    if n == 0 {
        return;
    }
    let window = (2 * r + 1) as f32;
    let at = |i: isize| src[i.clamp(0, n as isize - 1) as usize];
    let mut sum = [0.0f32; 4];
    for i in -(r as isize)..=(r as isize) {
        let px = at(i);
        for c in 0..4 {
            sum[c] += px[c];
        }
    }
    for i in 0..n {
        for c in 0..4 {
            dst[i][c] = sum[c] / window;
        }
        let add = at(i as isize + r as isize + 1);
        let sub = at(i as isize - r as isize);
        for c in 0..4 {
            sum[c] += add[c] - sub[c];
        }
    }
}
