#![forbid(unsafe_code)]

//! The "Delete account?" pill that starts the transition.

use hero_core::geometry::Rect;
use hero_render::{Canvas, Gradient, Paint, Rgba, RoundedRect, rasterize};

use super::state::{TransitionSnapshot, TransitionState};

/// Label size in points.
const LABEL_SIZE: f64 = 17.0;

/// The trigger pill.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerElement {
    label: String,
    corner_radius: f64,
    fill: Rgba,
}

impl TriggerElement {
    /// Pill with the given label and corner radius.
    #[must_use]
    pub fn new(label: impl Into<String>, corner_radius: f64) -> Self {
        Self {
            label: label.into(),
            corner_radius,
            fill: Rgba::RED,
        }
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    pub fn corner_radius(&self) -> f64 {
        self.corner_radius
    }

    /// Record the trigger's global rectangle. Idempotent.
    pub fn measure(&self, rect: Rect, state: &mut TransitionState) {
        if state.set_source_geometry(rect) {
            tracing::trace!(
                message = "hero.measure",
                x = rect.x,
                y = rect.y,
                width = rect.width,
                height = rect.height
            );
        }
    }

    /// Snapshot the pill and mount the overlay.
    ///
    /// Returns `false` without touching `state` while the overlay is already
    /// mounted. A zero-area geometry mounts with no snapshot.
    pub fn activate(&self, state: &mut TransitionState, scale: f64) -> bool {
        if state.overlay_visible() {
            tracing::debug!(message = "hero.activate", ignored = true, reason = "overlay_visible");
            return false;
        }
        let geometry = state.source_geometry();
        let snapshot = rasterize(self, geometry.size(), scale).map(TransitionSnapshot::new);
        tracing::debug!(
            message = "hero.activate",
            ignored = false,
            snapshot = snapshot.is_some(),
            width = geometry.width,
            height = geometry.height,
            scale
        );
        state.mount(snapshot);
        true
    }
}

impl Default for TriggerElement {
    fn default() -> Self {
        Self::new("Delete account?", 30.0)
    }
}

impl Paint for TriggerElement {
    fn paint(&self, canvas: &mut Canvas<'_>, bounds: Rect) {
        let shape = RoundedRect::new(bounds, self.corner_radius);
        canvas.save();
        canvas.clip(shape);
        canvas.fill_rounded_gradient(shape, Gradient::from_color(self.fill));
        canvas.fill_text_centered(&self.label, bounds, LABEL_SIZE, Rgba::WHITE);
        canvas.restore();
    }
}
