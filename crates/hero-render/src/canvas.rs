#![forbid(unsafe_code)]

//! Immediate-mode painting onto a [`Pixmap`] in logical points.
//!
//! A [`Canvas`] maps logical coordinates to device pixels through the
//! target's scale factor and keeps a save/restore stack of translation,
//! opacity, and rounded-rectangle clips. Coverage is sampled once at each
//! pixel centre.
//!
//! # Invariants
//!
//! - Every draw call honours all active clips; nothing is written outside
//!   their intersection.
//! - Opacity multiplies; `save()`/`restore()` bracket changes to it.
//! - `restore()` without a matching `save()` is a no-op.

use hero_core::geometry::{Point, Rect, Size};

use crate::color::{Gradient, Rgba};
use crate::font;
use crate::pixmap::Pixmap;

/// A rectangle with uniformly rounded corners.
///
/// The radius is clamped to half the shorter side when testing coverage, so
/// an oversized radius produces a capsule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundedRect {
    pub rect: Rect,
    pub radius: f64,
}

impl RoundedRect {
    #[inline]
    pub const fn new(rect: Rect, radius: f64) -> Self {
        Self { rect, radius }
    }

    /// Fully rounded ends.
    #[inline]
    pub fn capsule(rect: Rect) -> Self {
        Self::new(rect, rect.width.min(rect.height) / 2.0)
    }

    /// Radius actually applied.
    #[inline]
    pub fn effective_radius(&self) -> f64 {
        self.radius
            .max(0.0)
            .min(self.rect.width.min(self.rect.height).max(0.0) / 2.0)
    }

    /// Whether `p` lies inside the shape.
    pub fn contains(&self, p: Point) -> bool {
        if !self.rect.contains(p) {
            return false;
        }
        let r = self.effective_radius();
        if r <= 0.0 {
            return true;
        }
        let half_w = self.rect.width / 2.0;
        let half_h = self.rect.height / 2.0;
        let dx = ((p.x - self.rect.mid_x()).abs() - (half_w - r)).max(0.0);
        let dy = ((p.y - self.rect.mid_y()).abs() - (half_h - r)).max(0.0);
        dx * dx + dy * dy <= r * r
    }

    #[inline]
    fn translate(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.rect.translate(dx, dy), self.radius)
    }
}

#[derive(Debug, Clone)]
struct CanvasState {
    offset: Point,
    opacity: f32,
    /// Clips in device-logical coordinates (offset already applied).
    clips: Vec<RoundedRect>,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self {
            offset: Point::default(),
            opacity: 1.0,
            clips: Vec::new(),
        }
    }
}

/// Painter over a borrowed pixmap.
#[derive(Debug)]
pub struct Canvas<'a> {
    target: &'a mut Pixmap,
    state: CanvasState,
    stack: Vec<CanvasState>,
}

impl<'a> Canvas<'a> {
    /// Wrap `target`.
    pub fn new(target: &'a mut Pixmap) -> Self {
        Self {
            target,
            state: CanvasState::default(),
            stack: Vec::new(),
        }
    }

    /// Device pixels per point.
    #[inline]
    pub fn scale(&self) -> f64 {
        self.target.scale()
    }

    /// Logical size of the target.
    #[inline]
    pub fn size(&self) -> Size {
        self.target.logical_size()
    }

    /// Current accumulated opacity.
    #[inline]
    pub fn opacity(&self) -> f32 {
        self.state.opacity
    }

    /// Push the current state.
    pub fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    /// Pop to the last saved state.
    pub fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    /// Move the origin by `(dx, dy)`.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.state.offset.x += dx;
        self.state.offset.y += dy;
    }

    /// Multiply the current opacity by `factor`.
    pub fn multiply_opacity(&mut self, factor: f32) {
        let factor = if factor.is_finite() {
            factor.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.state.opacity *= factor;
    }

    /// Intersect the clip with `shape`.
    pub fn clip(&mut self, shape: RoundedRect) {
        let device = shape.translate(self.state.offset.x, self.state.offset.y);
        self.state.clips.push(device);
    }

    /// Overwrite the whole target, ignoring clips and opacity.
    pub fn clear(&mut self, color: Rgba) {
        self.target.fill(color);
    }

    /// Visit every pixel whose centre lies in `area` (local coordinates)
    /// and inside all clips, blending the color `shader` returns for the
    /// local point.
    fn shade(&mut self, area: Rect, mut shader: impl FnMut(Point) -> Option<Rgba>) {
        if area.is_empty() || self.state.opacity <= 0.0 {
            return;
        }
        let scale = self.target.scale();
        let off = self.state.offset;
        let (tw, th) = (self.target.width(), self.target.height());

        let px0 = ((area.x + off.x) * scale).floor().max(0.0);
        let py0 = ((area.y + off.y) * scale).floor().max(0.0);
        let px1 = ((area.right() + off.x) * scale).ceil().min(f64::from(tw));
        let py1 = ((area.bottom() + off.y) * scale).ceil().min(f64::from(th));
        if px0 >= px1 || py0 >= py1 {
            return;
        }

        let opacity = self.state.opacity;
        for py in py0 as u32..py1 as u32 {
            for px in px0 as u32..px1 as u32 {
                let device = Point::new(
                    (f64::from(px) + 0.5) / scale,
                    (f64::from(py) + 0.5) / scale,
                );
                if !self.state.clips.iter().all(|c| c.contains(device)) {
                    continue;
                }
                let local = Point::new(device.x - off.x, device.y - off.y);
                if !area.contains(local) {
                    continue;
                }
                if let Some(color) = shader(local) {
                    self.target.blend(px, py, color.with_opacity(opacity));
                }
            }
        }
    }

    /// Fill an axis-aligned rectangle.
    pub fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.shade(rect, |_| Some(color));
    }

    /// Fill a rounded rectangle with a solid color.
    pub fn fill_rounded_rect(&mut self, shape: RoundedRect, color: Rgba) {
        self.shade(shape.rect, |p| shape.contains(p).then_some(color));
    }

    /// Fill a rounded rectangle with a vertical gradient.
    pub fn fill_rounded_gradient(&mut self, shape: RoundedRect, gradient: Gradient) {
        let top = shape.rect.y;
        let height = shape.rect.height.max(f64::EPSILON);
        self.shade(shape.rect, |p| {
            shape
                .contains(p)
                .then(|| gradient.at(((p.y - top) / height) as f32))
        });
    }

    /// Stroke a circle outline of `width` centred on its radius.
    pub fn stroke_circle(&mut self, center: Point, radius: f64, width: f64, color: Rgba) {
        let outer = radius + width / 2.0;
        let inner = (radius - width / 2.0).max(0.0);
        let bounds = Rect::new(center.x - outer, center.y - outer, outer * 2.0, outer * 2.0);
        self.shade(bounds, |p| {
            let d = ((p.x - center.x).powi(2) + (p.y - center.y).powi(2)).sqrt();
            (d >= inner && d <= outer).then_some(color)
        });
    }

    /// Draw single-line text with its top-left corner at `origin`.
    pub fn fill_text(&mut self, text: &str, origin: Point, size: f64, color: Rgba) {
        let (glyphs, _) = font::layout(text);
        let u = font::unit(size);
        for placed in glyphs {
            for (row, bits) in placed.rows.iter().enumerate() {
                for col in 0..font::GLYPH_COLUMNS {
                    if bits & (0b100 >> col) == 0 {
                        continue;
                    }
                    let x = origin.x + f64::from(placed.column + col) * u;
                    let y = origin.y + row as f64 * u;
                    self.fill_rect(Rect::new(x, y, u, u), color);
                }
            }
        }
    }

    /// Draw single-line text centred in `bounds`.
    pub fn fill_text_centered(&mut self, text: &str, bounds: Rect, size: f64, color: Rgba) {
        let (w, h) = font::measure(text, size);
        let origin = Point::new(bounds.mid_x() - w / 2.0, bounds.mid_y() - h / 2.0);
        self.fill_text(text, origin, size, color);
    }

    /// Draw `pixmap` stretched over `dest` with an extra opacity factor.
    pub fn draw_pixmap(&mut self, pixmap: &Pixmap, dest: Rect, opacity: f32) {
        if dest.is_empty() {
            return;
        }
        self.save();
        self.multiply_opacity(opacity);
        self.shade(dest, |p| {
            let u = (p.x - dest.x) / dest.width;
            let v = (p.y - dest.y) / dest.height;
            Some(pixmap.sample(u, v))
        });
        self.restore();
    }

    /// Paint into an offscreen layer covering `bounds`, blur it by `blur`
    /// points, and composite it back with `opacity` under the current clips.
    ///
    /// The closure receives a canvas whose coordinates match this one.
    pub fn draw_layer(
        &mut self,
        bounds: Rect,
        opacity: f32,
        blur: f64,
        paint: impl FnOnce(&mut Canvas<'_>),
    ) {
        if opacity.is_nan() || opacity <= 0.0 || self.state.opacity <= 0.0 {
            return;
        }
        let scale = self.scale();
        let Some(mut layer) = Pixmap::for_size(bounds.size(), scale) else {
            return;
        };
        {
            let mut inner = Canvas::new(&mut layer);
            inner.translate(-bounds.x, -bounds.y);
            paint(&mut inner);
        }
        layer.blur(blur * scale);
        let size = layer.logical_size();
        self.draw_pixmap(&layer, Rect::new(bounds.x, bounds.y, size.width, size.height), opacity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixmap(w: u32, h: u32, scale: f64) -> Pixmap {
        Pixmap::new(w, h, scale).expect("pixmap")
    }

    #[test]
    fn rounded_rect_corners_excluded() {
        let shape = RoundedRect::new(Rect::new(0.0, 0.0, 100.0, 50.0), 20.0);
        assert!(!shape.contains(Point::new(1.0, 1.0)));
        assert!(shape.contains(Point::new(50.0, 25.0)));
        assert!(shape.contains(Point::new(20.0, 1.0)));
    }

    #[test]
    fn oversized_radius_becomes_capsule() {
        let shape = RoundedRect::new(Rect::new(0.0, 0.0, 100.0, 50.0), 500.0);
        assert_eq!(shape.effective_radius(), 25.0);
        assert_eq!(RoundedRect::capsule(shape.rect).effective_radius(), 25.0);
    }

    #[test]
    fn fill_rect_respects_scale() {
        let mut pm = pixmap(20, 20, 2.0);
        {
            let mut canvas = Canvas::new(&mut pm);
            canvas.fill_rect(Rect::new(0.0, 0.0, 5.0, 5.0), Rgba::RED);
        }
        assert_eq!(pm.get(9, 9), Some(Rgba::RED));
        assert_eq!(pm.get(10, 10), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn clip_limits_fill() {
        let mut pm = pixmap(10, 10, 1.0);
        {
            let mut canvas = Canvas::new(&mut pm);
            canvas.clip(RoundedRect::new(Rect::new(0.0, 0.0, 5.0, 10.0), 0.0));
            canvas.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Rgba::WHITE);
        }
        assert_eq!(pm.get(4, 5), Some(Rgba::WHITE));
        assert_eq!(pm.get(5, 5), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn save_restore_scopes_clip_and_opacity() {
        let mut pm = pixmap(10, 1, 1.0);
        {
            let mut canvas = Canvas::new(&mut pm);
            canvas.save();
            canvas.multiply_opacity(0.5);
            canvas.clip(RoundedRect::new(Rect::new(0.0, 0.0, 2.0, 1.0), 0.0));
            canvas.restore();
            canvas.restore();
            assert_eq!(canvas.opacity(), 1.0);
            canvas.fill_rect(Rect::new(0.0, 0.0, 10.0, 1.0), Rgba::WHITE);
        }
        assert!(pm.pixels().iter().all(|c| *c == Rgba::WHITE));
    }

    #[test]
    fn translate_moves_drawing() {
        let mut pm = pixmap(10, 10, 1.0);
        {
            let mut canvas = Canvas::new(&mut pm);
            canvas.translate(5.0, 5.0);
            canvas.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Rgba::RED);
        }
        assert_eq!(pm.get(5, 5), Some(Rgba::RED));
        assert_eq!(pm.get(0, 0), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn draw_pixmap_stretches_source() {
        let mut src = pixmap(1, 1, 1.0);
        src.set(0, 0, Rgba::RED);
        let mut pm = pixmap(8, 8, 1.0);
        {
            let mut canvas = Canvas::new(&mut pm);
            canvas.draw_pixmap(&src, Rect::new(2.0, 2.0, 4.0, 4.0), 1.0);
        }
        assert_eq!(pm.get(2, 2), Some(Rgba::RED));
        assert_eq!(pm.get(5, 5), Some(Rgba::RED));
        assert_eq!(pm.get(6, 6), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn zero_opacity_draws_nothing() {
        let mut pm = pixmap(4, 4, 1.0);
        {
            let mut canvas = Canvas::new(&mut pm);
            canvas.multiply_opacity(0.0);
            canvas.fill_rect(Rect::new(0.0, 0.0, 4.0, 4.0), Rgba::RED);
        }
        assert!(pm.pixels().iter().all(|c| *c == Rgba::TRANSPARENT));
    }

    #[test]
    fn layer_composites_with_opacity() {
        let mut pm = pixmap(8, 8, 1.0);
        {
            let mut canvas = Canvas::new(&mut pm);
            canvas.clear(Rgba::WHITE);
            canvas.draw_layer(Rect::new(0.0, 0.0, 8.0, 8.0), 0.5, 0.0, |layer| {
                layer.fill_rect(Rect::new(0.0, 0.0, 8.0, 8.0), Rgba::BLACK);
            });
        }
        let px = pm.get(3, 3).expect("pixel");
        assert!((i32::from(px.r) - 127).abs() <= 1, "got {px:?}");
    }

    #[test]
    fn text_draws_ink_inside_bounds() {
        let mut pm = pixmap(40, 20, 1.0);
        let bounds = Rect::new(0.0, 0.0, 40.0, 20.0);
        {
            let mut canvas = Canvas::new(&mut pm);
            canvas.fill_text_centered("HI", bounds, 14.0, Rgba::WHITE);
        }
        let ink = pm.pixels().iter().filter(|c| c.a > 0).count();
        assert!(ink > 0);
    }
}
