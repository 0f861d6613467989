#![forbid(unsafe_code)]

//! Offscreen rasterization of views.

use hero_core::geometry::{Rect, Size};

use crate::canvas::Canvas;
use crate::pixmap::Pixmap;

/// Something that can paint itself into a rectangle.
pub trait Paint {
    /// Paint into `bounds` (logical points, canvas coordinates).
    fn paint(&self, canvas: &mut Canvas<'_>, bounds: Rect);
}

impl<P: Paint + ?Sized> Paint for &P {
    fn paint(&self, canvas: &mut Canvas<'_>, bounds: Rect) {
        (**self).paint(canvas, bounds);
    }
}

/// Render `view` alone into a new pixmap of `size` points at `scale`.
///
/// The view paints at the origin. Returns `None` when `size` has no area
/// or the scale is invalid.
#[must_use]
pub fn rasterize(view: &dyn Paint, size: Size, scale: f64) -> Option<Pixmap> {
    let Some(mut pixmap) = Pixmap::for_size(size, scale) else {
        tracing::debug!(
            message = "raster.skip",
            width = size.width,
            height = size.height,
            scale
        );
        return None;
    };
    {
        let mut canvas = Canvas::new(&mut pixmap);
        view.paint(&mut canvas, Rect::from_size(size));
    }
    tracing::trace!(
        message = "raster.done",
        px_width = pixmap.width(),
        px_height = pixmap.height()
    );
    Some(pixmap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;

    struct Solid(Rgba);

    impl Paint for Solid {
        fn paint(&self, canvas: &mut Canvas<'_>, bounds: Rect) {
            canvas.fill_rect(bounds, self.0);
        }
    }

    #[test]
    fn rasterize_uses_ceil_pixel_size() {
        let pm = rasterize(&Solid(Rgba::RED), Size::new(10.5, 3.0), 2.0).expect("pixmap");
        assert_eq!((pm.width(), pm.height()), (21, 6));
        assert!(pm.pixels().iter().all(|c| *c == Rgba::RED));
    }

    #[test]
    fn zero_area_yields_none() {
        assert!(rasterize(&Solid(Rgba::RED), Size::new(0.0, 50.0), 2.0).is_none());
        assert!(rasterize(&Solid(Rgba::RED), Size::new(10.0, 10.0), 0.0).is_none());
    }
}
