#![forbid(unsafe_code)]

//! Shared transition state.
//!
//! # Invariants
//!
//! - `snapshot` is set together with `overlay_visible = true` and cleared
//!   together with `overlay_visible = false`. A zero-area activation mounts
//!   the overlay with no snapshot.
//! - Only the trigger's layout pass writes `source_geometry`.
//! - Only activation and the controller's continuations write the flags;
//!   the writers are crate-private.

use std::sync::Arc;

use hero_core::geometry::{Rect, Size};
use hero_render::Pixmap;

/// Global rectangle of the trigger, in logical points.
pub type TransitionGeometry = Rect;

/// Immutable rasterized image of the trigger.
///
/// Cloning shares the pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionSnapshot(Arc<Pixmap>);

impl TransitionSnapshot {
    #[must_use]
    pub fn new(pixmap: Pixmap) -> Self {
        Self(Arc::new(pixmap))
    }

    #[inline]
    pub fn pixmap(&self) -> &Pixmap {
        &self.0
    }

    /// Size in logical points.
    #[inline]
    pub fn logical_size(&self) -> Size {
        self.0.logical_size()
    }
}

/// State shared between the trigger, the controller, and the overlay.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransitionState {
    source_geometry: TransitionGeometry,
    snapshot: Option<TransitionSnapshot>,
    source_hidden: bool,
    morphed: bool,
    overlay_visible: bool,
}

impl TransitionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last measured trigger geometry.
    #[inline]
    pub fn source_geometry(&self) -> TransitionGeometry {
        self.source_geometry
    }

    #[inline]
    pub fn snapshot(&self) -> Option<&TransitionSnapshot> {
        self.snapshot.as_ref()
    }

    /// Whether the sheet's own content has taken over from the snapshot.
    #[inline]
    pub fn source_hidden(&self) -> bool {
        self.source_hidden
    }

    /// Whether the forward morph has completed.
    #[inline]
    pub fn morphed(&self) -> bool {
        self.morphed
    }

    /// Whether the overlay is mounted.
    #[inline]
    pub fn overlay_visible(&self) -> bool {
        self.overlay_visible
    }

    /// True when every flag is back at its initial value.
    ///
    /// Geometry is not part of the lifecycle and is ignored.
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.snapshot.is_none() && !self.source_hidden && !self.morphed && !self.overlay_visible
    }

    /// Returns whether the geometry changed.
    pub(crate) fn set_source_geometry(&mut self, geometry: TransitionGeometry) -> bool {
        let changed = self.source_geometry != geometry;
        self.source_geometry = geometry;
        changed
    }

    /// Unanimated mount.
    pub(crate) fn mount(&mut self, snapshot: Option<TransitionSnapshot>) {
        self.snapshot = snapshot;
        self.overlay_visible = true;
        self.morphed = false;
        self.source_hidden = false;
    }

    /// Unanimated cleanup after the reverse morph.
    pub(crate) fn unmount(&mut self) {
        self.snapshot = None;
        self.overlay_visible = false;
        self.morphed = false;
    }

    pub(crate) fn set_morphed(&mut self, morphed: bool) {
        self.morphed = morphed;
    }

    pub(crate) fn set_source_hidden(&mut self, hidden: bool) {
        self.source_hidden = hidden;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_at_rest() {
        let state = TransitionState::new();
        assert!(state.is_at_rest());
        assert_eq!(state.source_geometry(), Rect::ZERO);
    }

    #[test]
    fn mount_and_unmount_pair_snapshot_with_overlay() {
        let mut state = TransitionState::new();
        let pixmap = Pixmap::new(4, 2, 2.0).expect("pixmap");
        state.mount(Some(TransitionSnapshot::new(pixmap)));
        assert!(state.overlay_visible());
        assert_eq!(state.snapshot().map(|s| s.logical_size()), Some(Size::new(2.0, 1.0)));

        state.set_morphed(true);
        state.unmount();
        assert!(!state.overlay_visible());
        assert!(state.snapshot().is_none());
        assert!(!state.morphed());
    }

    #[test]
    fn geometry_change_detection() {
        let mut state = TransitionState::new();
        let rect = Rect::new(1.0, 2.0, 3.0, 4.0);
        assert!(state.set_source_geometry(rect));
        assert!(!state.set_source_geometry(rect));
    }
}
