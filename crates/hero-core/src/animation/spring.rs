#![forbid(unsafe_code)]

//! Damped harmonic oscillator (spring) animation.
//!
//! Drives the hero morph. Based on the classical damped spring equation:
//!
//!   F = -stiffness × (position - target) - damping × velocity
//!
//! # Parameters
//!
//! - **stiffness** (k): restoring force strength.
//! - **damping** (c): velocity drag. `c = 2√k` is critical damping.
//! - **duration**: the perceptual duration of an interpolating spring. The
//!   spring counts as *logically* complete once this much time has passed,
//!   even if it has not come to rest yet.
//!
//! An interpolating spring of duration `d` and bounce `b` uses
//! `k = (2π / d)²` and `c = 4π(1 − b) / d`; `b = 0` is critically damped.
//!
//! # Invariants
//!
//! 1. `value()` returns the position clamped to [0.0, 1.0]; `position()` is raw.
//! 2. A spring at rest does not move until `set_target()` or `reset()`.
//! 3. Stiffness is clamped to a positive minimum, damping to non-negative.
//!
//! # Failure Modes
//!
//! - Large dt: subdivided into 4ms steps for stability.
//! - Zero damping: oscillates forever; `is_complete()` never becomes true.

use std::f64::consts::PI;
use std::time::Duration;

use super::Animation;

/// Maximum dt per integration step (4ms).
const MAX_STEP_SECS: f64 = 0.004;

/// Position delta below which the spring may come to rest.
const DEFAULT_REST_THRESHOLD: f64 = 0.001;

/// Velocity below which (with the position threshold) the spring rests.
const DEFAULT_VELOCITY_THRESHOLD: f64 = 0.01;

/// Minimum stiffness to prevent degenerate springs.
const MIN_STIFFNESS: f64 = 0.1;

/// A damped harmonic oscillator producing physically-based motion.
///
/// ```ignore
/// use std::time::Duration;
/// use hero_core::animation::spring::Spring;
///
/// let mut spring = Spring::interpolating(0.0, 1.0, Duration::from_millis(300), 0.0);
/// for _ in 0..60 {
///     spring.tick(Duration::from_millis(16));
/// }
/// assert!((spring.position() - 1.0).abs() < 0.01);
/// ```
#[derive(Debug, Clone)]
pub struct Spring {
    position: f64,
    velocity: f64,
    target: f64,
    initial: f64,
    stiffness: f64,
    damping: f64,
    rest_threshold: f64,
    velocity_threshold: f64,
    at_rest: bool,
}

impl Spring {
    /// Create a spring starting at `initial` and targeting `target`.
    ///
    /// Default parameters: stiffness = 170.0, damping = 26.0.
    #[must_use]
    pub fn new(initial: f64, target: f64) -> Self {
        Self {
            position: initial,
            velocity: 0.0,
            target,
            initial,
            stiffness: 170.0,
            damping: 26.0,
            rest_threshold: DEFAULT_REST_THRESHOLD,
            velocity_threshold: DEFAULT_VELOCITY_THRESHOLD,
            at_rest: false,
        }
    }

    /// Create a spring that settles in roughly `duration` with the given
    /// `bounce` in [0.0, 1.0).
    #[must_use]
    pub fn interpolating(initial: f64, target: f64, duration: Duration, bounce: f64) -> Self {
        let (stiffness, damping) = interpolating_coefficients(duration, bounce);
        Self::new(initial, target)
            .with_stiffness(stiffness)
            .with_damping(damping)
    }

    /// Set stiffness (builder pattern). Clamped to minimum 0.1.
    #[must_use]
    pub fn with_stiffness(mut self, k: f64) -> Self {
        self.stiffness = k.max(MIN_STIFFNESS);
        self
    }

    /// Set damping (builder pattern). Clamped to minimum 0.0.
    #[must_use]
    pub fn with_damping(mut self, c: f64) -> Self {
        self.damping = c.max(0.0);
        self
    }

    /// Set the starting velocity (builder pattern).
    ///
    /// Used when a running animation is retargeted so the new spring keeps
    /// the old one's momentum.
    #[must_use]
    pub fn with_velocity(mut self, velocity: f64) -> Self {
        self.velocity = velocity;
        self
    }

    /// Current position (unclamped).
    #[inline]
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Current velocity.
    #[inline]
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Current target.
    #[inline]
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    #[inline]
    #[must_use]
    pub fn stiffness(&self) -> f64 {
        self.stiffness
    }

    #[inline]
    #[must_use]
    pub fn damping(&self) -> f64 {
        self.damping
    }

    /// Change the target. Wakes the spring if it was at rest.
    pub fn set_target(&mut self, target: f64) {
        if (self.target - target).abs() > self.rest_threshold {
            self.target = target;
            self.at_rest = false;
        }
    }

    /// Whether the spring has settled at the target.
    #[inline]
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    /// Semi-implicit Euler step of `dt` seconds.
    fn step(&mut self, dt: f64) {
        let displacement = self.position - self.target;
        let acceleration = -self.stiffness * displacement - self.damping * self.velocity;
        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
    }

    /// Advance the spring by `dt`, subdividing for stability.
    pub fn advance(&mut self, dt: Duration) {
        if self.at_rest {
            return;
        }
        let mut remaining = dt.as_secs_f64();
        if remaining <= 0.0 {
            return;
        }
        while remaining > 0.0 {
            let step_dt = remaining.min(MAX_STEP_SECS);
            self.step(step_dt);
            remaining -= step_dt;
        }

        if (self.position - self.target).abs() < self.rest_threshold
            && self.velocity.abs() < self.velocity_threshold
        {
            self.position = self.target;
            self.velocity = 0.0;
            self.at_rest = true;
        }
    }
}

/// Stiffness and damping for an interpolating spring.
///
/// A zero duration is clamped to 1ms.
#[must_use]
pub fn interpolating_coefficients(duration: Duration, bounce: f64) -> (f64, f64) {
    let secs = duration.as_secs_f64().max(0.001);
    let bounce = bounce.clamp(0.0, 0.99);
    let omega = 2.0 * PI / secs;
    (omega * omega, 4.0 * PI * (1.0 - bounce) / secs)
}

impl Animation for Spring {
    fn tick(&mut self, dt: Duration) {
        self.advance(dt);
    }

    fn is_complete(&self) -> bool {
        self.at_rest
    }

    fn value(&self) -> f32 {
        (self.position as f32).clamp(0.0, 1.0)
    }

    fn reset(&mut self) {
        self.position = self.initial;
        self.velocity = 0.0;
        self.at_rest = false;
    }
}
