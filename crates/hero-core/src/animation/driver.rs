#![forbid(unsafe_code)]

//! Property animation driver.
//!
//! A driver owns one numeric value per *track* (a property key chosen by the
//! caller) and runs at most one animation per track. Every animation request
//! is a descriptor of target value, [`Curve`], delay, and
//! [`CompletionCriterion`]; the driver advances all active animations on
//! `tick()` and returns the ids whose completion fired during that tick.
//!
//! The returned ids are the completion signal: a caller keeps the id it got
//! from [`MotionDriver::animate`] and runs its continuation when the id comes
//! back. Writes that must not animate go through
//! [`MotionDriver::set_immediate`], which bypasses the driver's timing
//! entirely.
//!
//! # Invariants
//!
//! 1. Each id is reported at most once.
//! 2. Starting a new animation on a track supersedes the old one; the
//!    superseded id is never reported. The new animation starts from the
//!    track's current value (and a running spring's velocity).
//! 3. `set_immediate` cancels the track's animation without reporting it.
//! 4. With [`CompletionCriterion::Removed`], an id is reported only on the
//!    tick where the animation settles and is removed from the track.

use std::fmt;
use std::time::Duration;

use super::spring::Spring;
use super::{Animation, Delayed, EasingFn, Tween, delay};

/// Handle for one animation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationId(u64);

impl AnimationId {
    /// Wrap a raw id. Drivers hand these out; each must be unique per
    /// driver.
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw numeric value (for logging).
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for AnimationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "anim#{}", self.0)
    }
}

/// When an animation's completion is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompletionCriterion {
    /// As soon as the curve's nominal duration (plus delay) has elapsed.
    /// A spring may still be settling when this fires.
    #[default]
    LogicallyComplete,
    /// Only once the value has settled and the animation is removed.
    Removed,
}

/// Timing curve of one animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Curve {
    /// Fixed duration with an easing function.
    Tween { duration: Duration, easing: EasingFn },
    /// Interpolating spring with a perceptual duration and bounce.
    Spring { duration: Duration, bounce: f64 },
}

impl Curve {
    /// Critically damped spring settling in roughly `duration`.
    #[must_use]
    pub const fn interpolating_spring(duration: Duration) -> Self {
        Self::Spring {
            duration,
            bounce: 0.0,
        }
    }

    /// Nominal duration.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        match *self {
            Self::Tween { duration, .. } | Self::Spring { duration, .. } => duration,
        }
    }
}

/// An animation request: curve, start delay, and completion criterion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub curve: Curve,
    pub delay: Duration,
    pub criterion: CompletionCriterion,
}

impl Motion {
    /// Start immediately with logical completion.
    #[must_use]
    pub const fn new(curve: Curve) -> Self {
        Self {
            curve,
            delay: Duration::ZERO,
            criterion: CompletionCriterion::LogicallyComplete,
        }
    }

    /// Set the start delay (builder pattern).
    #[must_use]
    pub const fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Set the completion criterion (builder pattern).
    #[must_use]
    pub const fn completion(mut self, criterion: CompletionCriterion) -> Self {
        self.criterion = criterion;
        self
    }
}

/// Scheduler for per-track property animations.
///
/// Implemented by [`TweenDriver`]; tests substitute drivers with manual
/// settle control.
pub trait MotionDriver<K> {
    /// Animate `track` from its current value to `target`.
    fn animate(&mut self, track: K, target: f64, motion: Motion) -> AnimationId;

    /// Write `value` to `track` without animation, cancelling any running
    /// animation on it.
    fn set_immediate(&mut self, track: K, value: f64);

    /// Current value of `track` (0.0 for a track never written).
    fn value(&self, track: K) -> f64;

    /// Whether `track` has a running animation.
    fn is_animating(&self, track: K) -> bool;

    /// Advance all animations by `dt` and return the ids that completed.
    fn tick(&mut self, dt: Duration) -> Vec<AnimationId>;
}

// ---------------------------------------------------------------------------
// TweenDriver
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum Interpolator {
    Tween(Tween),
    Spring(Spring),
}

impl Animation for Interpolator {
    fn tick(&mut self, dt: Duration) {
        match self {
            Self::Tween(t) => t.tick(dt),
            Self::Spring(s) => s.tick(dt),
        }
    }

    fn is_complete(&self) -> bool {
        match self {
            Self::Tween(t) => t.is_complete(),
            Self::Spring(s) => s.is_complete(),
        }
    }

    fn value(&self) -> f32 {
        match self {
            Self::Tween(t) => t.value(),
            Self::Spring(s) => s.value(),
        }
    }

    fn reset(&mut self) {
        match self {
            Self::Tween(t) => t.reset(),
            Self::Spring(s) => s.reset(),
        }
    }
}

#[derive(Debug, Clone)]
struct ActiveMotion {
    /// `None` once the completion has been reported.
    id: Option<AnimationId>,
    from: f64,
    to: f64,
    elapsed: Duration,
    logical_end: Duration,
    criterion: CompletionCriterion,
    interpolator: Delayed<Interpolator>,
}

impl ActiveMotion {
    fn current(&self) -> f64 {
        match self.interpolator.inner() {
            Interpolator::Tween(t) => self.from + (self.to - self.from) * f64::from(t.value()),
            Interpolator::Spring(s) => s.position(),
        }
    }

    fn velocity(&self) -> f64 {
        match self.interpolator.inner() {
            Interpolator::Spring(s) if self.interpolator.has_started() => s.velocity(),
            _ => 0.0,
        }
    }

    fn is_settled(&self) -> bool {
        self.interpolator.is_complete()
    }

    fn completion_due(&self) -> bool {
        match self.criterion {
            CompletionCriterion::LogicallyComplete => {
                self.elapsed >= self.logical_end || self.is_settled()
            }
            CompletionCriterion::Removed => self.is_settled(),
        }
    }
}

#[derive(Debug, Clone)]
struct TrackSlot<K> {
    key: K,
    value: f64,
    active: Option<ActiveMotion>,
}

/// Default [`MotionDriver`]: tweens and springs advanced by wall-clock `dt`.
#[derive(Debug, Clone)]
pub struct TweenDriver<K> {
    tracks: Vec<TrackSlot<K>>,
    next_id: u64,
}

impl<K> Default for TweenDriver<K> {
    fn default() -> Self {
        Self {
            tracks: Vec::new(),
            next_id: 1,
        }
    }
}

impl<K: Copy + PartialEq> TweenDriver<K> {
    /// Create a driver with no tracks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tracks with a running animation.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.tracks.iter().filter(|t| t.active.is_some()).count()
    }

    fn slot(&self, key: K) -> Option<&TrackSlot<K>> {
        self.tracks.iter().find(|t| t.key == key)
    }

    fn slot_mut(&mut self, key: K) -> &mut TrackSlot<K> {
        let index = match self.tracks.iter().position(|t| t.key == key) {
            Some(index) => index,
            None => {
                self.tracks.push(TrackSlot {
                    key,
                    value: 0.0,
                    active: None,
                });
                self.tracks.len() - 1
            }
        };
        &mut self.tracks[index]
    }
}

impl<K: Copy + PartialEq> MotionDriver<K> for TweenDriver<K> {
    fn animate(&mut self, track: K, target: f64, motion: Motion) -> AnimationId {
        let id = AnimationId(self.next_id);
        self.next_id += 1;

        let slot = self.slot_mut(track);
        let (from, velocity) = match slot.active.take() {
            Some(previous) => (previous.current(), previous.velocity()),
            None => (slot.value, 0.0),
        };
        slot.value = from;

        let interpolator = match motion.curve {
            Curve::Tween { duration, easing } => {
                Interpolator::Tween(Tween::new(duration).easing(easing))
            }
            Curve::Spring { duration, bounce } => Interpolator::Spring(
                Spring::interpolating(from, target, duration, bounce).with_velocity(velocity),
            ),
        };

        slot.active = Some(ActiveMotion {
            id: Some(id),
            from,
            to: target,
            elapsed: Duration::ZERO,
            logical_end: motion.delay.saturating_add(motion.curve.duration()),
            criterion: motion.criterion,
            interpolator: delay(motion.delay, interpolator),
        });
        id
    }

    fn set_immediate(&mut self, track: K, value: f64) {
        let slot = self.slot_mut(track);
        slot.active = None;
        slot.value = value;
    }

    fn value(&self, track: K) -> f64 {
        self.slot(track).map_or(0.0, |slot| match &slot.active {
            Some(active) => active.current(),
            None => slot.value,
        })
    }

    fn is_animating(&self, track: K) -> bool {
        self.slot(track).is_some_and(|slot| slot.active.is_some())
    }

    fn tick(&mut self, dt: Duration) -> Vec<AnimationId> {
        let mut completed = Vec::new();
        for slot in &mut self.tracks {
            let Some(active) = slot.active.as_mut() else {
                continue;
            };
            active.interpolator.tick(dt);
            active.elapsed = active.elapsed.saturating_add(dt);
            slot.value = active.current();

            if active.completion_due()
                && let Some(id) = active.id.take()
            {
                completed.push(id);
            }
            if active.is_settled() {
                slot.value = active.to;
                slot.active = None;
            }
        }
        completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Track {
        A,
        B,
    }

    const MS_16: Duration = Duration::from_millis(16);
    const MS_100: Duration = Duration::from_millis(100);
    const MS_300: Duration = Duration::from_millis(300);

    fn linear_tween(duration: Duration) -> Curve {
        Curve::Tween {
            duration,
            easing: crate::animation::linear,
        }
    }

    #[test]
    fn unknown_track_reads_zero() {
        let driver: TweenDriver<Track> = TweenDriver::new();
        assert_eq!(driver.value(Track::A), 0.0);
        assert!(!driver.is_animating(Track::A));
    }

    #[test]
    fn tween_track_interpolates_and_reports_once() {
        let mut driver = TweenDriver::new();
        let id = driver.animate(Track::A, 10.0, Motion::new(linear_tween(MS_100)));

        assert!(driver.tick(Duration::from_millis(50)).is_empty());
        assert!((driver.value(Track::A) - 5.0).abs() < 1e-6);

        assert_eq!(driver.tick(Duration::from_millis(60)), vec![id]);
        assert_eq!(driver.value(Track::A), 10.0);
        assert!(!driver.is_animating(Track::A));
        assert!(driver.tick(MS_100).is_empty());
    }

    #[test]
    fn delay_holds_value() {
        let mut driver = TweenDriver::new();
        driver.animate(
            Track::A,
            1.0,
            Motion::new(linear_tween(MS_100)).delay(Duration::from_millis(80)),
        );
        driver.tick(Duration::from_millis(80));
        assert_eq!(driver.value(Track::A), 0.0);
        driver.tick(Duration::from_millis(50));
        assert!((driver.value(Track::A) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn set_immediate_cancels_without_completion() {
        let mut driver = TweenDriver::new();
        driver.animate(Track::A, 1.0, Motion::new(linear_tween(MS_100)));
        driver.tick(Duration::from_millis(10));
        driver.set_immediate(Track::A, 0.0);
        assert!(!driver.is_animating(Track::A));
        assert!(driver.tick(Duration::from_secs(1)).is_empty());
        assert_eq!(driver.value(Track::A), 0.0);
    }

    #[test]
    fn logical_completion_fires_before_spring_settles() {
        let mut driver = TweenDriver::new();
        let id = driver.animate(
            Track::A,
            1.0,
            Motion::new(Curve::interpolating_spring(MS_300)),
        );
        let mut fired_at = None;
        for frame in 1..=120 {
            if driver.tick(MS_16).contains(&id) {
                fired_at = Some(frame);
                break;
            }
        }
        let frame = fired_at.expect("logical completion fired");
        assert_eq!(frame, 19, "300ms / 16ms rounds up to frame 19");
        assert!(driver.is_animating(Track::A), "spring still settling");
    }

    #[test]
    fn removed_completion_waits_for_rest() {
        let mut driver = TweenDriver::new();
        driver.set_immediate(Track::A, 1.0);
        let id = driver.animate(
            Track::A,
            0.0,
            Motion::new(Curve::interpolating_spring(MS_300))
                .completion(CompletionCriterion::Removed),
        );
        let mut fired = false;
        for _ in 0..120 {
            let done = driver.tick(MS_16);
            if done.contains(&id) {
                assert!(!driver.is_animating(Track::A));
                assert_eq!(driver.value(Track::A), 0.0);
                fired = true;
                break;
            }
            assert!(driver.is_animating(Track::A));
        }
        assert!(fired);
    }

    #[test]
    fn retarget_supersedes_previous_id() {
        let mut driver = TweenDriver::new();
        let first = driver.animate(
            Track::A,
            1.0,
            Motion::new(Curve::interpolating_spring(MS_300)),
        );
        driver.tick(Duration::from_millis(100));
        let mid = driver.value(Track::A);
        assert!(mid > 0.0 && mid < 1.0);

        let second = driver.animate(
            Track::A,
            0.0,
            Motion::new(Curve::interpolating_spring(MS_300)),
        );
        assert!((driver.value(Track::A) - mid).abs() < 1e-9);

        let mut seen = Vec::new();
        for _ in 0..200 {
            seen.extend(driver.tick(MS_16));
        }
        assert!(!seen.contains(&first));
        assert_eq!(seen, vec![second]);
        assert_eq!(driver.value(Track::A), 0.0);
    }

    #[test]
    fn tracks_run_independently() {
        let mut driver = TweenDriver::new();
        let a = driver.animate(Track::A, 1.0, Motion::new(linear_tween(MS_100)));
        let b = driver.animate(
            Track::B,
            1.0,
            Motion::new(linear_tween(MS_100)).delay(Duration::from_millis(50)),
        );
        assert_eq!(driver.tick(MS_100), vec![a]);
        assert!((driver.value(Track::B) - 0.5).abs() < 1e-6);
        assert_eq!(driver.tick(Duration::from_millis(50)), vec![b]);
        assert_eq!(driver.active_count(), 0);
    }

    #[test]
    fn zero_duration_tween_completes_on_next_tick() {
        let mut driver = TweenDriver::new();
        let id = driver.animate(Track::A, 3.0, Motion::new(linear_tween(Duration::ZERO)));
        assert_eq!(driver.tick(Duration::ZERO), vec![id]);
        assert_eq!(driver.value(Track::A), 3.0);
    }
}
