#![forbid(unsafe_code)]

//! Phase machine driving the hero transition.
//!
//! Two tracks run on one [`MotionDriver`]:
//!
//! - [`TransitionTrack::Morph`]: 0 = on the trigger, 1 = expanded sheet.
//! - [`TransitionTrack::CrossFade`]: hand-off from the snapshot to the
//!   sheet's own content, started after a short delay.
//!
//! State machine: Collapsed → Expanding → Expanded → Collapsing → Collapsed.
//! Dismissing while Expanding skips straight to Collapsing and retargets the
//! morph from wherever it is.
//!
//! # Invariants
//!
//! - Cleanup runs only when the reverse morph's "removed" completion fires.
//!   A restore cross-fade still in flight at that point is settled at 0 in
//!   the same tick, so the state is at rest when the outcome is reported.
//! - Every forward transition starts with both tracks at 0.
//! - A dismiss outcome is returned exactly once, from the tick that ran the
//!   cleanup.
//! - Completions of superseded animations are ignored.
//!
//! # Failure Modes
//!
//! - `start` without a mounted overlay, or outside Collapsed, is a no-op.
//! - `dismiss` while Collapsing or Collapsed is a no-op.

use std::time::Duration;

use hero_core::animation::{AnimationId, CompletionCriterion, Curve, Motion, MotionDriver, TweenDriver};

use super::state::TransitionState;
use crate::config::HeroDialogConfig;

// ============================================================================
// Types
// ============================================================================

/// Property tracks animated by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionTrack {
    Morph,
    CrossFade,
}

/// Lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPhase {
    #[default]
    Collapsed,
    Expanding,
    Expanded,
    Collapsing,
}

impl TransitionPhase {
    /// Whether the overlay should be drawn.
    #[inline]
    pub fn is_visible(self) -> bool {
        !matches!(self, Self::Collapsed)
    }

    /// Whether the morph is in flight.
    #[inline]
    pub fn is_animating(self) -> bool {
        matches!(self, Self::Expanding | Self::Collapsing)
    }

    /// Stable name for logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Collapsed => "collapsed",
            Self::Expanding => "expanding",
            Self::Expanded => "expanded",
            Self::Collapsing => "collapsing",
        }
    }
}

/// Result of a completed dismissal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DismissOutcome {
    pub user_confirmed: bool,
}

/// Curve and delays used by the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionTiming {
    pub curve: Curve,
    pub hide_source_delay: Duration,
    pub restore_delay: Duration,
}

impl Default for TransitionTiming {
    fn default() -> Self {
        Self::from(&HeroDialogConfig::default())
    }
}

impl From<&HeroDialogConfig> for TransitionTiming {
    fn from(config: &HeroDialogConfig) -> Self {
        Self {
            curve: config.curve(),
            hide_source_delay: config.hide_source_delay(),
            restore_delay: config.restore_delay(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingFade {
    id: AnimationId,
    hidden: bool,
}

// ============================================================================
// TransitionController
// ============================================================================

/// Drives the morph and cross-fade and writes their results into
/// [`TransitionState`].
#[derive(Debug, Clone)]
pub struct TransitionController<D = TweenDriver<TransitionTrack>> {
    driver: D,
    timing: TransitionTiming,
    phase: TransitionPhase,
    morph_anim: Option<AnimationId>,
    fade_anim: Option<PendingFade>,
    pending_outcome: Option<bool>,
}

impl TransitionController<TweenDriver<TransitionTrack>> {
    /// Controller on the default driver.
    #[must_use]
    pub fn new(timing: TransitionTiming) -> Self {
        Self::with_driver(TweenDriver::new(), timing)
    }
}

impl Default for TransitionController<TweenDriver<TransitionTrack>> {
    fn default() -> Self {
        Self::new(TransitionTiming::default())
    }
}

impl<D: MotionDriver<TransitionTrack>> TransitionController<D> {
    /// Controller on a caller-supplied driver.
    pub fn with_driver(driver: D, timing: TransitionTiming) -> Self {
        Self {
            driver,
            timing,
            phase: TransitionPhase::Collapsed,
            morph_anim: None,
            fade_anim: None,
            pending_outcome: None,
        }
    }

    #[inline]
    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    #[inline]
    pub fn timing(&self) -> &TransitionTiming {
        &self.timing
    }

    #[inline]
    pub fn driver(&self) -> &D {
        &self.driver
    }

    #[inline]
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Current morph track value (may overshoot [0, 1] on a bouncy curve).
    #[inline]
    pub fn morph_progress(&self) -> f64 {
        self.driver.value(TransitionTrack::Morph)
    }

    /// Current cross-fade track value.
    #[inline]
    pub fn cross_fade_progress(&self) -> f64 {
        self.driver.value(TransitionTrack::CrossFade)
    }

    /// Whether the sheet's buttons respond to taps.
    #[inline]
    pub fn accepts_input(&self) -> bool {
        matches!(
            self.phase,
            TransitionPhase::Expanding | TransitionPhase::Expanded
        )
    }

    /// Begin the forward transition on a freshly mounted overlay.
    pub fn start(&mut self, state: &TransitionState) -> bool {
        if self.phase != TransitionPhase::Collapsed || !state.overlay_visible() {
            tracing::debug!(
                message = "hero.start",
                ignored = true,
                phase = self.phase.as_str(),
                overlay_visible = state.overlay_visible()
            );
            return false;
        }

        let curve = self.timing.curve;
        self.driver.set_immediate(TransitionTrack::Morph, 0.0);
        self.driver.set_immediate(TransitionTrack::CrossFade, 0.0);
        let morph = self
            .driver
            .animate(TransitionTrack::Morph, 1.0, Motion::new(curve));
        let fade = self.driver.animate(
            TransitionTrack::CrossFade,
            1.0,
            Motion::new(curve).delay(self.timing.hide_source_delay),
        );
        self.morph_anim = Some(morph);
        self.fade_anim = Some(PendingFade {
            id: fade,
            hidden: true,
        });
        self.pending_outcome = None;
        self.phase = TransitionPhase::Expanding;

        tracing::debug!(message = "hero.start", ignored = false, %morph, %fade);
        true
    }

    /// Begin the reverse transition, remembering `user_confirmed` for the
    /// outcome.
    pub fn dismiss(&mut self, state: &TransitionState, user_confirmed: bool) -> bool {
        if !self.accepts_input() || !state.overlay_visible() {
            tracing::debug!(
                message = "hero.dismiss",
                ignored = true,
                phase = self.phase.as_str(),
                user_confirmed
            );
            return false;
        }

        let curve = self.timing.curve;
        let morph = self.driver.animate(
            TransitionTrack::Morph,
            0.0,
            Motion::new(curve).completion(CompletionCriterion::Removed),
        );
        let fade = self.driver.animate(
            TransitionTrack::CrossFade,
            0.0,
            Motion::new(curve).delay(self.timing.restore_delay),
        );
        let from = self.phase;
        self.morph_anim = Some(morph);
        self.fade_anim = Some(PendingFade {
            id: fade,
            hidden: false,
        });
        self.pending_outcome = Some(user_confirmed);
        self.phase = TransitionPhase::Collapsing;

        tracing::debug!(
            message = "hero.dismiss",
            ignored = false,
            from = from.as_str(),
            user_confirmed,
            %morph,
            %fade
        );
        true
    }

    /// Advance both tracks by `dt` and run completion continuations.
    ///
    /// Returns the outcome on the tick that unmounted the overlay.
    pub fn tick(&mut self, state: &mut TransitionState, dt: Duration) -> Option<DismissOutcome> {
        let mut outcome = None;
        for id in self.driver.tick(dt) {
            if self.morph_anim == Some(id) {
                self.morph_anim = None;
                outcome = outcome.or(self.on_morph_complete(state));
            } else if let Some(fade) = self.fade_anim
                && fade.id == id
            {
                self.fade_anim = None;
                state.set_source_hidden(fade.hidden);
                tracing::trace!(message = "hero.cross_fade", source_hidden = fade.hidden);
            }
        }
        outcome
    }

    fn on_morph_complete(&mut self, state: &mut TransitionState) -> Option<DismissOutcome> {
        match self.phase {
            TransitionPhase::Expanding => {
                state.set_morphed(true);
                self.phase = TransitionPhase::Expanded;
                tracing::debug!(message = "hero.expanded");
                None
            }
            TransitionPhase::Collapsing => {
                state.unmount();
                if let Some(fade) = self.fade_anim.take() {
                    self.driver.set_immediate(TransitionTrack::CrossFade, 0.0);
                    state.set_source_hidden(fade.hidden);
                    tracing::trace!(
                        message = "hero.cross_fade",
                        source_hidden = fade.hidden,
                        settled_at_cleanup = true
                    );
                }
                self.phase = TransitionPhase::Collapsed;
                let user_confirmed = self.pending_outcome.take()?;
                tracing::debug!(message = "hero.cleanup", user_confirmed);
                Some(DismissOutcome { user_confirmed })
            }
            TransitionPhase::Collapsed | TransitionPhase::Expanded => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hero_core::geometry::Rect;

    use crate::hero::trigger::TriggerElement;

    const FRAME: Duration = Duration::from_millis(16);

    fn mounted() -> TransitionState {
        let mut state = TransitionState::new();
        let trigger = TriggerElement::default();
        trigger.measure(Rect::new(100.0, 700.0, 200.0, 50.0), &mut state);
        assert!(trigger.activate(&mut state, 1.0));
        state
    }

    fn run(
        controller: &mut TransitionController,
        state: &mut TransitionState,
        frames: usize,
    ) -> Vec<DismissOutcome> {
        (0..frames)
            .filter_map(|_| controller.tick(state, FRAME))
            .collect()
    }

    #[test]
    fn phase_predicates() {
        assert!(!TransitionPhase::Collapsed.is_visible());
        assert!(TransitionPhase::Expanded.is_visible());
        assert!(TransitionPhase::Expanding.is_animating());
        assert!(!TransitionPhase::Expanded.is_animating());
    }

    #[test]
    fn start_requires_mounted_overlay() {
        let mut controller = TransitionController::default();
        assert!(!controller.start(&TransitionState::new()));
        assert_eq!(controller.phase(), TransitionPhase::Collapsed);
    }

    #[test]
    fn forward_transition_settles_expanded() {
        let mut controller = TransitionController::default();
        let mut state = mounted();
        assert!(controller.start(&state));
        assert_eq!(controller.phase(), TransitionPhase::Expanding);
        assert!(controller.accepts_input());

        assert!(run(&mut controller, &mut state, 120).is_empty());
        assert_eq!(controller.phase(), TransitionPhase::Expanded);
        assert!(state.morphed());
        assert!(state.source_hidden());
        assert_eq!(controller.morph_progress(), 1.0);
    }

    #[test]
    fn dismiss_reports_outcome_once() {
        let mut controller = TransitionController::default();
        let mut state = mounted();
        controller.start(&state);
        run(&mut controller, &mut state, 120);

        assert!(controller.dismiss(&state, true));
        assert!(!controller.dismiss(&state, false), "second dismiss ignored");
        assert!(!controller.accepts_input());

        let outcomes = run(&mut controller, &mut state, 200);
        assert_eq!(outcomes, vec![DismissOutcome { user_confirmed: true }]);
        assert_eq!(controller.phase(), TransitionPhase::Collapsed);
        assert!(state.is_at_rest());
    }

    #[test]
    fn dismiss_while_expanding_retargets() {
        let mut controller = TransitionController::default();
        let mut state = mounted();
        controller.start(&state);
        run(&mut controller, &mut state, 5);
        let mid = controller.morph_progress();
        assert!(mid > 0.0 && mid < 1.0);

        assert!(controller.dismiss(&state, false));
        assert_eq!(controller.morph_progress(), mid);
        let outcomes = run(&mut controller, &mut state, 200);
        assert_eq!(outcomes, vec![DismissOutcome { user_confirmed: false }]);
        assert!(!state.morphed(), "forward completion was superseded");
        assert!(state.is_at_rest());
    }

    #[test]
    fn dismiss_before_start_is_ignored() {
        let mut controller = TransitionController::default();
        let state = mounted();
        assert!(!controller.dismiss(&state, true));
    }
}
