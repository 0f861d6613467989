#![forbid(unsafe_code)]

//! Embeddable hero confirmation dialog.
//!
//! [`HeroConfirmationDialog`] owns the trigger, the sheet, the shared
//! [`TransitionState`], and the [`TransitionController`]. The host calls
//! [`layout`](HeroConfirmationDialog::layout) when its size changes,
//! forwards taps, ticks once per frame, and renders into its own surface.
//!
//! ```ignore
//! let mut dialog = HeroConfirmationDialog::new()
//!     .scale(2.0)
//!     .on_dismiss(|confirmed| println!("confirmed: {confirmed}"));
//! dialog.layout(Size::new(390.0, 844.0));
//! dialog.tap(dialog.trigger_frame().center());
//! loop {
//!     dialog.tick(Duration::from_millis(16));
//!     dialog.render(&mut pixmap);
//! }
//! ```

use std::fmt;
use std::time::Duration;

use hero_core::animation::{MotionDriver, TweenDriver};
use hero_core::geometry::{Point, Rect, Size};
use hero_render::{Canvas, Paint, Pixmap, Rgba, RoundedRect};

use super::controller::{
    DismissOutcome, TransitionController, TransitionPhase, TransitionTiming, TransitionTrack,
};
use super::morph::{MorphInputs, MorphVisuals, expanded_frame};
use super::sheet::{ConfirmationSheet, SheetLayout};
use super::state::TransitionState;
use super::trigger::TriggerElement;
use crate::config::HeroDialogConfig;

/// What a tap did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapResult {
    Ignored,
    Activated,
    Dismissed { user_confirmed: bool },
}

type DismissCallback = Box<dyn FnMut(bool)>;

/// The trigger pill plus its hero-transition overlay.
pub struct HeroConfirmationDialog<D = TweenDriver<TransitionTrack>> {
    config: HeroDialogConfig,
    trigger: TriggerElement,
    sheet: ConfirmationSheet,
    state: TransitionState,
    controller: TransitionController<D>,
    container: Size,
    scale: f64,
    on_dismiss: DismissCallback,
}

impl<D> fmt::Debug for HeroConfirmationDialog<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeroConfirmationDialog")
            .field("state", &self.state)
            .field("container", &self.container)
            .field("scale", &self.scale)
            .finish_non_exhaustive()
    }
}

impl HeroConfirmationDialog<TweenDriver<TransitionTrack>> {
    /// Dialog with the stock configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(HeroDialogConfig::default())
    }

    #[must_use]
    pub fn with_config(config: HeroDialogConfig) -> Self {
        Self::with_driver(config, TweenDriver::new())
    }
}

impl Default for HeroConfirmationDialog<TweenDriver<TransitionTrack>> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: MotionDriver<TransitionTrack>> HeroConfirmationDialog<D> {
    /// Dialog running its animations on `driver`.
    pub fn with_driver(config: HeroDialogConfig, driver: D) -> Self {
        Self {
            trigger: TriggerElement::new("Delete account?", config.radii.source),
            sheet: ConfirmationSheet::default()
                .metrics(config.layout.sheet_padding, config.layout.button_spacing),
            state: TransitionState::new(),
            controller: TransitionController::with_driver(driver, TransitionTiming::from(&config)),
            container: Size::default(),
            scale: 1.0,
            on_dismiss: Box::new(|user_confirmed| {
                tracing::debug!(message = "hero.on_dismiss", user_confirmed);
            }),
            config,
        }
    }

    /// Set the display scale used for the trigger snapshot.
    #[must_use]
    pub fn scale(mut self, scale: f64) -> Self {
        self.set_scale(scale);
        self
    }

    /// Install the dismissal callback. It receives `true` for Delete and
    /// `false` for Cancel.
    #[must_use]
    pub fn on_dismiss(mut self, callback: impl FnMut(bool) + 'static) -> Self {
        self.on_dismiss = Box::new(callback);
        self
    }

    pub fn set_scale(&mut self, scale: f64) {
        if scale.is_finite() && scale > 0.0 {
            self.scale = scale;
        }
    }

    #[inline]
    pub fn config(&self) -> &HeroDialogConfig {
        &self.config
    }

    #[inline]
    pub fn state(&self) -> &TransitionState {
        &self.state
    }

    #[inline]
    pub fn phase(&self) -> TransitionPhase {
        self.controller.phase()
    }

    #[inline]
    pub fn controller(&self) -> &TransitionController<D> {
        &self.controller
    }

    #[inline]
    pub fn controller_mut(&mut self) -> &mut TransitionController<D> {
        &mut self.controller
    }

    #[inline]
    pub fn container(&self) -> Size {
        self.container
    }

    /// Where the trigger sits in the current container.
    #[must_use]
    pub fn trigger_frame(&self) -> Rect {
        let padding = self.config.layout.trigger_padding;
        let height = self.config.layout.trigger_height;
        Rect::new(
            padding,
            (self.container.height - height) / 2.0,
            (self.container.width - 2.0 * padding).max(0.0),
            height,
        )
    }

    /// Lay out for a new container size and re-measure the trigger.
    pub fn layout(&mut self, container: Size) {
        self.container = container;
        let frame = self.trigger_frame();
        self.trigger.measure(frame, &mut self.state);
    }

    /// Snapshot the trigger, mount the overlay, and start the morph.
    pub fn activate(&mut self) -> bool {
        if !self.trigger.activate(&mut self.state, self.scale) {
            return false;
        }
        self.controller.start(&self.state)
    }

    /// Start dismissing with the given outcome.
    pub fn dismiss(&mut self, user_confirmed: bool) -> bool {
        self.controller.dismiss(&self.state, user_confirmed)
    }

    /// Route a tap at `point` (container coordinates).
    pub fn tap(&mut self, point: Point) -> TapResult {
        if self.state.overlay_visible() {
            if !self.controller.accepts_input() {
                return TapResult::Ignored;
            }
            let Some(action) = self.sheet_layout().hit_test(point) else {
                return TapResult::Ignored;
            };
            let user_confirmed = action.user_confirmed();
            return if self.dismiss(user_confirmed) {
                TapResult::Dismissed { user_confirmed }
            } else {
                TapResult::Ignored
            };
        }

        let shape = RoundedRect::new(self.trigger_frame(), self.config.radii.source);
        if shape.contains(point) && self.activate() {
            TapResult::Activated
        } else {
            TapResult::Ignored
        }
    }

    /// Advance animations by `dt`; invokes the callback when a dismissal
    /// completes.
    pub fn tick(&mut self, dt: Duration) -> Option<DismissOutcome> {
        let outcome = self.controller.tick(&mut self.state, dt)?;
        tracing::info!(message = "hero.outcome", user_confirmed = outcome.user_confirmed);
        (self.on_dismiss)(outcome.user_confirmed);
        Some(outcome)
    }

    fn sheet_height(&self) -> f64 {
        let width = (self.container.width - 2.0 * self.config.layout.sheet_inset).max(0.0);
        self.sheet.intrinsic_height(width)
    }

    /// Resolved overlay visuals for the current frame.
    #[must_use]
    pub fn visuals(&self) -> MorphVisuals {
        let inputs = MorphInputs {
            morph: self.controller.morph_progress(),
            cross_fade: self.controller.cross_fade_progress(),
            source: self.state.source_geometry(),
            container: self.container,
            sheet_height: self.sheet_height(),
        };
        MorphVisuals::compute(&inputs, &self.config)
    }

    /// Rectangle the sheet content is laid out in.
    ///
    /// The content keeps its expanded size and travels with the centre of
    /// the morph frame; the clip reveals the part inside the frame.
    #[must_use]
    pub fn content_frame(&self, visuals: &MorphVisuals) -> Rect {
        let expanded = expanded_frame(self.container, self.sheet_height(), &self.config);
        Rect::from_center(visuals.frame.center(), expanded.size())
    }

    /// Current sheet layout, for hit testing.
    #[must_use]
    pub fn sheet_layout(&self) -> SheetLayout {
        let visuals = self.visuals();
        self.sheet.layout(self.content_frame(&visuals))
    }

    /// Paint the trigger or the overlay into `target`.
    pub fn render(&self, target: &mut Pixmap) {
        let phase = self.controller.phase();
        let _span = tracing::debug_span!("hero.render", phase = phase.as_str()).entered();
        let mut canvas = Canvas::new(target);

        if !self.state.overlay_visible() {
            self.trigger.paint(&mut canvas, self.trigger_frame());
            return;
        }

        let visuals = self.visuals();
        canvas.fill_rect(
            Rect::from_size(self.container),
            Rgba::BLACK.with_opacity(visuals.scrim_opacity),
        );

        canvas.save();
        canvas.clip(visuals.clip.place(visuals.frame));

        if let Some(snapshot) = self.state.snapshot() {
            canvas.draw_layer(
                visuals.frame,
                visuals.stand_in_opacity,
                visuals.stand_in_blur,
                |layer| layer.draw_pixmap(snapshot.pixmap(), visuals.frame, 1.0),
            );
        }

        let content = self.content_frame(&visuals);
        canvas.draw_layer(
            content,
            visuals.content_opacity,
            visuals.content_blur,
            |layer| self.sheet.paint(layer, content),
        );
        canvas.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    const FRAME: Duration = Duration::from_millis(16);

    fn dialog() -> HeroConfirmationDialog {
        let mut dialog = HeroConfirmationDialog::new();
        dialog.layout(Size::new(400.0, 800.0));
        dialog
    }

    fn settle(dialog: &mut HeroConfirmationDialog) {
        for _ in 0..200 {
            dialog.tick(FRAME);
        }
    }

    #[test]
    fn trigger_is_centred_with_padding() {
        let dialog = dialog();
        assert_eq!(dialog.trigger_frame(), Rect::new(16.0, 375.0, 368.0, 50.0));
        assert_eq!(dialog.state().source_geometry(), dialog.trigger_frame());
    }

    #[test]
    fn tap_on_trigger_activates_and_buttons_dismiss() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut dialog = dialog().on_dismiss(move |c| sink.borrow_mut().push(c));

        assert_eq!(dialog.tap(Point::new(1.0, 1.0)), TapResult::Ignored);
        let centre = dialog.trigger_frame().center();
        assert_eq!(dialog.tap(centre), TapResult::Activated);
        assert_eq!(dialog.tap(centre), TapResult::Ignored, "overlay absorbs taps");
        settle(&mut dialog);

        let confirm = dialog.sheet_layout().confirm.center();
        assert_eq!(
            dialog.tap(confirm),
            TapResult::Dismissed {
                user_confirmed: true
            }
        );
        assert_eq!(dialog.tap(confirm), TapResult::Ignored);
        settle(&mut dialog);

        assert_eq!(*seen.borrow(), vec![true]);
        assert!(dialog.state().is_at_rest());
    }

    #[test]
    fn render_hides_trigger_while_overlay_mounted() {
        let mut dialog = dialog();
        let mut idle = Pixmap::new(400, 800, 1.0).expect("pixmap");
        dialog.render(&mut idle);
        let centre = dialog.trigger_frame().center();
        let (cx, cy) = (centre.x as u32, centre.y as u32);
        assert!(idle.get(20, cy).expect("pixel").r > 200);

        dialog.activate();
        settle(&mut dialog);
        let mut open = Pixmap::new(400, 800, 1.0).expect("pixmap");
        dialog.render(&mut open);
        let scrim = open.get(cx, 10).expect("pixel");
        assert_eq!(scrim.r, 0);
        assert!((i32::from(scrim.a) - 102).abs() <= 1, "scrim {scrim:?}");
        let sheet = dialog.visuals().frame;
        let inside = open
            .get(sheet.mid_x() as u32, (sheet.y + 30.0) as u32)
            .expect("pixel");
        assert_eq!(inside.a, 255);
    }

    #[test]
    fn visuals_track_phase() {
        let mut dialog = dialog();
        let collapsed = dialog.visuals();
        assert_eq!(collapsed.frame, dialog.trigger_frame());
        dialog.activate();
        settle(&mut dialog);
        let expanded = dialog.visuals();
        assert_eq!(expanded.clip.radius(), 45.0);
        assert!((expanded.frame.bottom() - 790.0).abs() < 1e-9);
    }
}
