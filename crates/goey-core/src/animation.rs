#![forbid(unsafe_code)]

//! Time-stepped animation primitives.
//!
//! Animations never read the wall clock. Callers advance them with an explicit
//! [`Duration`] and read the value back, so a host stepping 16ms frames and a
//! test stepping the same frames observe identical motion.
//!
//! Values are `f64` because they drive sub-pixel geometry: a spring that
//! overshoots its target reports the overshoot instead of clamping it away.

pub mod spring;
pub mod tween;

use std::time::Duration;

pub use spring::Spring;
pub use tween::{Transition, Tween, TweenStep};

// ---------------------------------------------------------------------------
// Easing functions
// ---------------------------------------------------------------------------

/// Easing function signature: maps `t` in [0, 1] to output in [0, 1].
pub type EasingFn = fn(f64) -> f64;

/// Identity easing (constant velocity).
#[inline]
pub fn linear(t: f64) -> f64 {
    t.clamp(0.0, 1.0)
}

/// Quadratic ease-in.
#[inline]
pub fn ease_in(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t
}

/// Quadratic ease-out.
#[inline]
pub fn ease_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Quadratic ease-in-out.
#[inline]
pub fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Cubic ease-out.
#[inline]
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

// ---------------------------------------------------------------------------
// Cubic bezier timing curves
// ---------------------------------------------------------------------------

/// A CSS `cubic-bezier(x1, y1, x2, y2)` timing curve.
///
/// The curve runs from (0, 0) to (1, 1). `x1` and `x2` are clamped into
/// [0, 1] so the curve stays a function of time; `y` values may leave that
/// range to express anticipation or overshoot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

impl CubicBezier {
    /// The standard deceleration curve `cubic-bezier(0.4, 0, 0.2, 1)` used
    /// for collapses that must finish on schedule.
    pub const STANDARD: Self = Self {
        x1: 0.4,
        y1: 0.0,
        x2: 0.2,
        y2: 1.0,
    };

    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            x1: x1.clamp(0.0, 1.0),
            y1,
            x2: x2.clamp(0.0, 1.0),
            y2,
        }
    }

    /// Control points as `(x1, y1, x2, y2)`.
    pub fn control_points(&self) -> (f64, f64, f64, f64) {
        (self.x1, self.y1, self.x2, self.y2)
    }

    fn coefficients(p1: f64, p2: f64) -> (f64, f64, f64) {
        let c = 3.0 * p1;
        let b = 3.0 * (p2 - p1) - c;
        let a = 1.0 - c - b;
        (a, b, c)
    }

    fn sample(p1: f64, p2: f64, s: f64) -> f64 {
        let (a, b, c) = Self::coefficients(p1, p2);
        ((a * s + b) * s + c) * s
    }

    fn slope(p1: f64, p2: f64, s: f64) -> f64 {
        let (a, b, c) = Self::coefficients(p1, p2);
        (3.0 * a * s + 2.0 * b) * s + c
    }

    /// Curve parameter whose x equals `x`. Newton first, bisection when the
    /// slope flattens out.
    fn solve_parameter(&self, x: f64) -> f64 {
        const EPSILON: f64 = 1e-7;

        let mut s = x;
        for _ in 0..8 {
            let err = Self::sample(self.x1, self.x2, s) - x;
            if err.abs() < EPSILON {
                return s;
            }
            let d = Self::slope(self.x1, self.x2, s);
            if d.abs() < 1e-6 {
                break;
            }
            s -= err / d;
        }

        let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
        s = x;
        while lo < hi {
            let sx = Self::sample(self.x1, self.x2, s);
            if (sx - x).abs() < EPSILON {
                return s;
            }
            if x > sx {
                lo = s;
            } else {
                hi = s;
            }
            let next = (lo + hi) / 2.0;
            if (next - s).abs() < EPSILON {
                return next;
            }
            s = next;
        }
        s
    }

    /// Eased output for linear progress `t` in [0, 1].
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 || t == 1.0 {
            return t;
        }
        Self::sample(self.y1, self.y2, self.solve_parameter(t))
    }
}

impl Default for CubicBezier {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Named easing curve for time-based tweens.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    EaseOutCubic,
    Bezier(CubicBezier),
    /// `cubic-bezier(0.4, 0, 0.2, 1)`.
    #[default]
    Standard,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Self::Linear => linear(t),
            Self::EaseIn => ease_in(t),
            Self::EaseOut => ease_out(t),
            Self::EaseInOut => ease_in_out(t),
            Self::EaseOutCubic => ease_out_cubic(t),
            Self::Bezier(curve) => curve.apply(t),
            Self::Standard => CubicBezier::STANDARD.apply(t),
        }
    }
}

// ---------------------------------------------------------------------------
// Animation trait
// ---------------------------------------------------------------------------

/// A time-stepped animation.
pub trait Animation {
    /// Advance the animation by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has reached its end.
    fn is_complete(&self) -> bool;

    /// Current output value. Physical animations may report values outside
    /// their nominal range while they overshoot.
    fn value(&self) -> f64;

    /// Reset the animation to its initial state.
    fn reset(&mut self);

    /// Time elapsed past completion. Returns [`Duration::ZERO`] for
    /// animations that do not track it.
    fn overshoot(&self) -> Duration {
        Duration::ZERO
    }
}

// ---------------------------------------------------------------------------
// Eased
// ---------------------------------------------------------------------------

/// Progress from 0.0 to 1.0 over a fixed duration, shaped by an [`Easing`].
///
/// Elapsed time is accumulated as a [`Duration`] so long runs do not drift and
/// overshoot past the end is exact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Eased {
    elapsed: Duration,
    duration: Duration,
    easing: Easing,
}

impl Eased {
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self {
            elapsed: Duration::ZERO,
            duration: if duration.is_zero() {
                Duration::from_nanos(1)
            } else {
                duration
            },
            easing,
        }
    }

    /// Linear progress before easing, in [0.0, 1.0].
    pub fn raw_progress(&self) -> f64 {
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Jump to the end.
    pub fn finish(&mut self) {
        self.elapsed = self.elapsed.max(self.duration);
    }
}

impl Animation for Eased {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f64 {
        self.easing.apply(self.raw_progress())
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    fn overshoot(&self) -> Duration {
        self.elapsed.saturating_sub(self.duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_16: Duration = Duration::from_millis(16);

    #[test]
    fn easing_endpoints() {
        let curves = [
            Easing::Linear,
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::EaseInOut,
            Easing::EaseOutCubic,
            Easing::Standard,
            Easing::Bezier(CubicBezier::new(0.25, 0.1, 0.25, 1.0)),
        ];
        for curve in curves {
            assert!(curve.apply(0.0).abs() < 1e-9, "{curve:?} at 0");
            assert!((curve.apply(1.0) - 1.0).abs() < 1e-9, "{curve:?} at 1");
        }
    }

    #[test]
    fn linear_bezier_is_identity() {
        let curve = CubicBezier::new(0.0, 0.0, 1.0, 1.0);
        for i in 0..=20 {
            let t = i as f64 / 20.0;
            assert!((curve.apply(t) - t).abs() < 1e-5, "t={t}");
        }
    }

    #[test]
    fn standard_curve_is_monotonic_and_front_loaded_late() {
        let mut prev = 0.0;
        for i in 1..=100 {
            let v = CubicBezier::STANDARD.apply(i as f64 / 100.0);
            assert!(v >= prev - 1e-9);
            prev = v;
        }
        // Slow start: a tenth of the time covers well under a tenth of the distance.
        assert!(CubicBezier::STANDARD.apply(0.1) < 0.1);
        // Fast middle, soft landing.
        assert!(CubicBezier::STANDARD.apply(0.5) > 0.7);
    }

    #[test]
    fn bezier_clamps_x_controls() {
        let curve = CubicBezier::new(-1.0, 0.0, 2.0, 1.0);
        assert_eq!(curve.control_points(), (0.0, 0.0, 1.0, 1.0));
    }

    #[test]
    fn eased_completes_with_overshoot() {
        let mut anim = Eased::new(Duration::from_millis(100), Easing::Linear);
        for _ in 0..6 {
            anim.tick(MS_16);
        }
        assert!(!anim.is_complete());
        anim.tick(MS_16);
        assert!(anim.is_complete());
        assert_eq!(anim.overshoot(), Duration::from_millis(12));
        assert!((anim.value() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn eased_zero_duration_completes_on_first_tick() {
        let mut anim = Eased::new(Duration::ZERO, Easing::Standard);
        anim.tick(Duration::from_nanos(1));
        assert!(anim.is_complete());
    }

    #[test]
    fn eased_reset_and_finish() {
        let mut anim = Eased::new(Duration::from_millis(50), Easing::EaseOut);
        anim.finish();
        assert!(anim.is_complete());
        anim.reset();
        assert!(!anim.is_complete());
        assert_eq!(anim.value(), 0.0);
    }
}
