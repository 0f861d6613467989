#![forbid(unsafe_code)]

//! Animation primitives and the property animation driver.
//!
//! # Building blocks
//!
//! - [`Animation`]: anything that advances with `tick(dt)` and produces a
//!   normalized value.
//! - [`Tween`]: fixed-duration progress with an easing curve.
//! - [`Delayed`]: holds another animation at its start for a fixed delay.
//! - [`spring::Spring`]: damped harmonic oscillator.
//! - [`driver::TweenDriver`]: runs one animation per property track and
//!   reports completions.
//!
//! # Invariants
//!
//! 1. `value()` of every primitive is in [0.0, 1.0].
//! 2. `tick(Duration::ZERO)` never changes a value, except that it completes
//!    a zero-duration [`Tween`].
//! 3. `reset()` returns an animation to its initial state.

pub mod driver;
pub mod spring;

use std::time::Duration;

pub use driver::{
    AnimationId, CompletionCriterion, Curve, Motion, MotionDriver, TweenDriver,
};
pub use spring::Spring;

/// A time-driven animation.
pub trait Animation {
    /// Advance the animation by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has finished.
    fn is_complete(&self) -> bool;

    /// Current normalized value in [0.0, 1.0].
    fn value(&self) -> f32;

    /// Return to the initial state.
    fn reset(&mut self);

    /// Time consumed past completion by the last tick.
    fn overshoot(&self) -> Duration {
        Duration::ZERO
    }
}

/// Easing curve mapping linear progress in [0, 1] to eased progress.
pub type EasingFn = fn(f32) -> f32;

/// Identity curve.
pub fn linear(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

/// Quadratic ease-in.
pub fn ease_in(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t
}

/// Quadratic ease-out.
pub fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Quadratic ease-in-out.
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        let inv = -2.0 * t + 2.0;
        1.0 - inv * inv / 2.0
    }
}

// ---------------------------------------------------------------------------
// Tween
// ---------------------------------------------------------------------------

/// Fixed-duration progress from 0.0 to 1.0 shaped by an easing curve.
///
/// A zero duration is treated as already elapsed on the first tick.
#[derive(Debug, Clone, Copy)]
pub struct Tween {
    elapsed: Duration,
    duration: Duration,
    easing: EasingFn,
    overshoot: Duration,
    complete: bool,
}

impl Tween {
    /// Create a linear tween lasting `duration`.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            duration,
            easing: linear,
            overshoot: Duration::ZERO,
            complete: false,
        }
    }

    /// Set the easing curve (builder pattern).
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Total duration.
    #[inline]
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Time elapsed so far (capped at the duration).
    #[inline]
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Linear progress before easing.
    #[must_use]
    pub fn raw_progress(&self) -> f32 {
        if self.duration.is_zero() {
            return if self.complete { 1.0 } else { 0.0 };
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0) as f32
    }
}

impl Animation for Tween {
    fn tick(&mut self, dt: Duration) {
        // Any tick, even a zero one, finishes an instant tween.
        let next = self.elapsed.saturating_add(dt);
        if next >= self.duration {
            self.overshoot = next - self.duration;
            self.elapsed = self.duration;
            self.complete = true;
        } else {
            self.elapsed = next;
        }
    }

    fn is_complete(&self) -> bool {
        self.complete
    }

    fn value(&self) -> f32 {
        (self.easing)(self.raw_progress())
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
        self.overshoot = Duration::ZERO;
        self.complete = false;
    }

    fn overshoot(&self) -> Duration {
        self.overshoot
    }
}

// ---------------------------------------------------------------------------
// Delayed
// ---------------------------------------------------------------------------

/// Holds `inner` at its initial value until `delay` has elapsed.
#[derive(Debug, Clone)]
pub struct Delayed<A> {
    delay: Duration,
    waited: Duration,
    inner: A,
}

/// Wrap `animation` so it starts after `delay`.
#[must_use]
pub fn delay<A: Animation>(delay: Duration, animation: A) -> Delayed<A> {
    Delayed {
        delay,
        waited: Duration::ZERO,
        inner: animation,
    }
}

impl<A> Delayed<A> {
    /// Whether the delay has fully elapsed.
    #[inline]
    #[must_use]
    pub fn has_started(&self) -> bool {
        self.waited >= self.delay
    }

    /// Borrow the wrapped animation.
    #[inline]
    pub fn inner(&self) -> &A {
        &self.inner
    }
}

impl<A: Animation> Animation for Delayed<A> {
    fn tick(&mut self, dt: Duration) {
        let remaining = self.delay.saturating_sub(self.waited);
        if dt < remaining {
            self.waited += dt;
            return;
        }
        self.waited = self.delay;
        // A zero carry still reaches the inner animation so instant tweens
        // complete on the tick where the delay ends.
        self.inner.tick(dt - remaining);
    }

    fn is_complete(&self) -> bool {
        self.has_started() && self.inner.is_complete()
    }

    fn value(&self) -> f32 {
        self.inner.value()
    }

    fn reset(&mut self) {
        self.waited = Duration::ZERO;
        self.inner.reset();
    }

    fn overshoot(&self) -> Duration {
        self.inner.overshoot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_100: Duration = Duration::from_millis(100);

    #[test]
    fn tween_progresses_linearly() {
        let mut tween = Tween::new(MS_100);
        assert_eq!(tween.value(), 0.0);
        tween.tick(Duration::from_millis(50));
        assert!((tween.value() - 0.5).abs() < 1e-6);
        assert!(!tween.is_complete());
        tween.tick(Duration::from_millis(70));
        assert!(tween.is_complete());
        assert_eq!(tween.value(), 1.0);
        assert_eq!(tween.overshoot(), Duration::from_millis(20));
    }

    #[test]
    fn tween_easing_applied() {
        let mut tween = Tween::new(MS_100).easing(ease_in);
        tween.tick(Duration::from_millis(50));
        assert!((tween.value() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn zero_duration_tween_completes_on_first_tick() {
        let mut tween = Tween::new(Duration::ZERO);
        assert!(!tween.is_complete());
        assert_eq!(tween.value(), 0.0);
        tween.tick(Duration::ZERO);
        assert!(tween.is_complete());
        assert_eq!(tween.value(), 1.0);
    }

    #[test]
    fn tween_reset() {
        let mut tween = Tween::new(MS_100);
        tween.tick(Duration::from_millis(200));
        tween.reset();
        assert!(!tween.is_complete());
        assert_eq!(tween.value(), 0.0);
    }

    #[test]
    fn delayed_holds_then_runs() {
        let mut anim = delay(Duration::from_millis(80), Tween::new(MS_100));
        anim.tick(Duration::from_millis(50));
        assert!(!anim.has_started());
        assert_eq!(anim.value(), 0.0);

        // 30ms finishes the delay; 20ms carries into the tween.
        anim.tick(Duration::from_millis(50));
        assert!(anim.has_started());
        assert!((anim.value() - 0.2).abs() < 1e-6);

        anim.tick(MS_100);
        assert!(anim.is_complete());
    }

    #[test]
    fn delayed_zero_duration_completes_when_delay_ends() {
        let mut anim = delay(Duration::from_millis(10), Tween::new(Duration::ZERO));
        anim.tick(Duration::from_millis(10));
        assert!(anim.is_complete());
    }

    #[test]
    fn easing_endpoints() {
        for easing in [linear, ease_in, ease_out, ease_in_out] {
            assert!(easing(0.0).abs() < 1e-6);
            assert!((easing(1.0) - 1.0).abs() < 1e-6);
            assert!((easing(2.0) - 1.0).abs() < 1e-6);
        }
    }
}
