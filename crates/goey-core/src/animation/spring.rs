#![forbid(unsafe_code)]

//! Damped harmonic oscillator.
//!
//! `F = -stiffness * (position - target) - damping * velocity`, divided by
//! `mass`, integrated with semi-implicit Euler in steps of at most 4ms.
//!
//! A spring can be configured from raw physical constants or from a
//! perceptual `(duration, bounce)` pair. The latter maps the duration to the
//! undamped period and the bounce to `1 - damping ratio`:
//!
//! ```text
//! omega  = 2 * PI / duration
//! k      = omega^2 * mass
//! zeta   = clamp(1 - bounce, 0.05, 1)
//! c      = 2 * zeta * sqrt(k * mass)
//! ```
//!
//! [`position`](Spring::position) and [`Animation::value`] both report the
//! raw, unclamped position so overshoot reaches the caller.

use std::time::Duration;

use super::Animation;

/// Largest integration step. Bigger deltas are subdivided.
const MAX_STEP_SECS: f64 = 0.004;

const DEFAULT_REST_THRESHOLD: f64 = 0.001;
const DEFAULT_VELOCITY_THRESHOLD: f64 = 0.01;

const MIN_STIFFNESS: f64 = 0.1;
const MIN_MASS: f64 = 0.01;
const MIN_DURATION_SECS: f64 = 0.01;

/// A damped spring moving from an initial position toward a target.
///
/// ```
/// use std::time::Duration;
/// use goey_core::animation::Spring;
///
/// let mut spring = Spring::new(0.0, 1.0).with_stiffness(300.0).with_damping(15.0);
/// for _ in 0..120 {
///     spring.advance(Duration::from_millis(16));
/// }
/// assert!(spring.is_at_rest());
/// assert_eq!(spring.position(), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Spring {
    position: f64,
    velocity: f64,
    target: f64,
    initial: f64,
    stiffness: f64,
    damping: f64,
    mass: f64,
    rest_threshold: f64,
    velocity_threshold: f64,
    at_rest: bool,
}

impl Spring {
    /// Spring with stiffness 100, damping 10 and unit mass.
    #[must_use]
    pub fn new(initial: f64, target: f64) -> Self {
        Self {
            position: initial,
            velocity: 0.0,
            target,
            initial,
            stiffness: 100.0,
            damping: 10.0,
            mass: 1.0,
            rest_threshold: DEFAULT_REST_THRESHOLD,
            velocity_threshold: DEFAULT_VELOCITY_THRESHOLD,
            at_rest: initial == target,
        }
    }

    /// Spring whose undamped period is `duration` and whose damping ratio is
    /// `1 - bounce`.
    #[must_use]
    pub fn from_duration(initial: f64, target: f64, duration: Duration, bounce: f64) -> Self {
        let (stiffness, damping) = duration_bounce_constants(duration, bounce, 1.0);
        Self::new(initial, target)
            .with_stiffness(stiffness)
            .with_damping(damping)
    }

    #[must_use]
    pub fn with_stiffness(mut self, k: f64) -> Self {
        self.stiffness = k.max(MIN_STIFFNESS);
        self
    }

    #[must_use]
    pub fn with_damping(mut self, c: f64) -> Self {
        self.damping = c.max(0.0);
        self
    }

    #[must_use]
    pub fn with_mass(mut self, m: f64) -> Self {
        self.mass = m.max(MIN_MASS);
        self
    }

    #[must_use]
    pub fn with_rest_threshold(mut self, threshold: f64) -> Self {
        self.rest_threshold = threshold.abs();
        self
    }

    #[must_use]
    pub fn with_velocity_threshold(mut self, threshold: f64) -> Self {
        self.velocity_threshold = threshold.abs();
        self
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    #[inline]
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

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

    #[inline]
    #[must_use]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// `c / (2 * sqrt(k * m))`. Below 1 the spring overshoots.
    #[must_use]
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    #[inline]
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    /// Change the target. Wakes the spring if it was at rest.
    pub fn set_target(&mut self, target: f64) {
        if (self.target - target).abs() > self.rest_threshold {
            self.target = target;
            self.at_rest = false;
        }
    }

    /// Snap to the target and stop.
    pub fn settle(&mut self) {
        self.position = self.target;
        self.velocity = 0.0;
        self.at_rest = true;
    }

    fn step(&mut self, dt: f64) {
        let displacement = self.position - self.target;
        let force = -self.stiffness * displacement - self.damping * self.velocity;
        self.velocity += force / self.mass * dt;
        self.position += self.velocity * dt;
    }

    /// Advance by `dt`, subdividing into small steps.
    pub fn advance(&mut self, dt: Duration) {
        if self.at_rest {
            return;
        }
        let mut remaining = dt.as_secs_f64();
        while remaining > 0.0 {
            let step_dt = remaining.min(MAX_STEP_SECS);
            self.step(step_dt);
            remaining -= step_dt;
        }

        if (self.position - self.target).abs() < self.rest_threshold
            && self.velocity.abs() < self.velocity_threshold
        {
            self.settle();
        }
    }
}

/// Stiffness and damping for a `(duration, bounce)` spring of the given mass.
#[must_use]
pub fn duration_bounce_constants(duration: Duration, bounce: f64, mass: f64) -> (f64, f64) {
    let secs = duration.as_secs_f64().max(MIN_DURATION_SECS);
    let mass = mass.max(MIN_MASS);
    let omega = std::f64::consts::TAU / secs;
    let stiffness = omega * omega * mass;
    let zeta = (1.0 - bounce).clamp(0.05, 1.0);
    let damping = 2.0 * zeta * (stiffness * mass).sqrt();
    (stiffness, damping)
}

impl Animation for Spring {
    fn tick(&mut self, dt: Duration) {
        self.advance(dt);
    }

    fn is_complete(&self) -> bool {
        self.at_rest
    }

    fn value(&self) -> f64 {
        self.position
    }

    fn reset(&mut self) {
        self.position = self.initial;
        self.velocity = 0.0;
        self.at_rest = self.initial == self.target;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_16: Duration = Duration::from_millis(16);

    fn simulate(spring: &mut Spring, frames: usize) {
        for _ in 0..frames {
            spring.tick(MS_16);
        }
    }

    #[test]
    fn spring_reaches_target() {
        let mut spring = Spring::new(0.0, 100.0)
            .with_stiffness(170.0)
            .with_damping(26.0);
        simulate(&mut spring, 200);
        assert_eq!(spring.position(), 100.0);
        assert!(spring.is_complete());
    }

    #[test]
    fn spring_at_target_starts_at_rest() {
        let spring = Spring::new(1.0, 1.0);
        assert!(spring.is_at_rest());
    }

    #[test]
    fn underdamped_spring_overshoots_and_value_reports_it() {
        let mut spring = Spring::new(0.0, 1.0)
            .with_stiffness(350.0)
            .with_damping(12.0)
            .with_mass(0.7);
        assert!(spring.damping_ratio() < 1.0);
        let mut peak = 0.0_f64;
        for _ in 0..200 {
            spring.tick(MS_16);
            peak = peak.max(spring.value());
        }
        assert!(peak > 1.05, "peak {peak}");
        assert!(spring.is_complete());
    }

    #[test]
    fn heavier_mass_settles_slower() {
        let mut light = Spring::new(0.0, 1.0).with_stiffness(300.0).with_damping(15.0);
        let mut heavy = light.clone().with_mass(3.0);
        light.tick(Duration::from_millis(50));
        heavy.tick(Duration::from_millis(50));
        assert!(light.position() > heavy.position());
    }

    #[test]
    fn duration_bounce_zero_is_critically_damped() {
        let (k, c) = duration_bounce_constants(Duration::from_millis(600), 0.0, 1.0);
        let spring = Spring::new(0.0, 1.0).with_stiffness(k).with_damping(c);
        assert!((spring.damping_ratio() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn duration_bounce_maps_bounce_to_damping_ratio() {
        let spring = Spring::from_duration(0.0, 1.0, Duration::from_millis(900), 0.2);
        assert!((spring.damping_ratio() - 0.8).abs() < 1e-9);
        let expected_k = (std::f64::consts::TAU / 0.9).powi(2);
        assert!((spring.stiffness() - expected_k).abs() < 1e-9);
    }

    #[test]
    fn bounce_of_one_still_settles() {
        let mut spring = Spring::from_duration(0.0, 1.0, Duration::from_millis(300), 1.0);
        simulate(&mut spring, 2000);
        assert!(spring.is_at_rest());
    }

    #[test]
    fn longer_duration_is_slower() {
        let mut fast = Spring::from_duration(0.0, 1.0, Duration::from_millis(300), 0.2);
        let mut slow = Spring::from_duration(0.0, 1.0, Duration::from_millis(900), 0.2);
        fast.tick(Duration::from_millis(100));
        slow.tick(Duration::from_millis(100));
        assert!(fast.position() > slow.position());
    }

    #[test]
    fn large_dt_is_stable() {
        let mut spring = Spring::new(0.0, 1.0).with_stiffness(400.0).with_damping(20.0);
        spring.tick(Duration::from_secs(5));
        assert!(spring.position().is_finite());
        assert!(spring.is_at_rest());
    }

    #[test]
    fn reset_returns_to_initial() {
        let mut spring = Spring::new(1.0, 0.0);
        simulate(&mut spring, 10);
        spring.reset();
        assert_eq!(spring.position(), 1.0);
        assert_eq!(spring.velocity(), 0.0);
        assert!(!spring.is_at_rest());
    }

    #[test]
    fn settle_snaps() {
        let mut spring = Spring::new(0.0, 5.0);
        spring.settle();
        assert_eq!(spring.position(), 5.0);
        assert!(spring.is_complete());
    }
}
