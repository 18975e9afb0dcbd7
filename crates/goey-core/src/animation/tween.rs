#![forbid(unsafe_code)]

//! Scalar tweens: one value moving from `from` to `to` under a [`Transition`].
//!
//! A tween has no callbacks. Its owner ticks it, reads [`TweenStep::done`],
//! and reacts exactly once by dropping the tween. Stopping a tween early is
//! the same as dropping it.

use std::time::Duration;

use super::spring::{Spring, duration_bounce_constants};
use super::{Animation, Eased, Easing};

/// How a [`Tween`] travels between its endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    /// Physical spring with explicit constants.
    Spring {
        stiffness: f64,
        damping: f64,
        mass: f64,
    },
    /// Spring described by its period and bounce (see [`Spring::from_duration`]).
    SpringDuration { duration: Duration, bounce: f64 },
    /// Fixed-length curve.
    Eased { duration: Duration, easing: Easing },
}

impl Transition {
    pub fn spring(stiffness: f64, damping: f64, mass: f64) -> Self {
        Self::Spring {
            stiffness,
            damping,
            mass,
        }
    }

    pub fn spring_duration(duration: Duration, bounce: f64) -> Self {
        Self::SpringDuration { duration, bounce }
    }

    pub fn eased(duration: Duration, easing: Easing) -> Self {
        Self::Eased { duration, easing }
    }

    /// Whether the transition can overshoot its target.
    pub fn is_spring(&self) -> bool {
        !matches!(self, Self::Eased { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Driver {
    Spring(Spring),
    Eased(Eased),
}

/// Result of one [`Tween::tick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenStep {
    pub value: f64,
    /// True from the tick on which the tween reached `to`.
    pub done: bool,
}

/// A scalar moving from `from` to `to`.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    from: f64,
    to: f64,
    transition: Transition,
    driver: Driver,
}

impl Tween {
    pub fn new(from: f64, to: f64, transition: Transition) -> Self {
        let driver = match transition {
            Transition::Spring {
                stiffness,
                damping,
                mass,
            } => Driver::Spring(
                Spring::new(from, to)
                    .with_stiffness(stiffness)
                    .with_damping(damping)
                    .with_mass(mass),
            ),
            Transition::SpringDuration { duration, bounce } => {
                let (stiffness, damping) = duration_bounce_constants(duration, bounce, 1.0);
                Driver::Spring(
                    Spring::new(from, to)
                        .with_stiffness(stiffness)
                        .with_damping(damping),
                )
            }
            Transition::Eased { duration, easing } => Driver::Eased(Eased::new(duration, easing)),
        };
        Self {
            from,
            to,
            transition,
            driver,
        }
    }

    pub fn from(&self) -> f64 {
        self.from
    }

    pub fn to(&self) -> f64 {
        self.to
    }

    pub fn transition(&self) -> Transition {
        self.transition
    }

    pub fn value(&self) -> f64 {
        match &self.driver {
            Driver::Spring(spring) => spring.position(),
            Driver::Eased(eased) => self.from + (self.to - self.from) * eased.value(),
        }
    }

    pub fn is_done(&self) -> bool {
        match &self.driver {
            Driver::Spring(spring) => spring.is_complete(),
            Driver::Eased(eased) => eased.is_complete(),
        }
    }

    fn step(&self) -> TweenStep {
        let done = self.is_done();
        TweenStep {
            value: if done { self.to } else { self.value() },
            done,
        }
    }

    pub fn tick(&mut self, dt: Duration) -> TweenStep {
        match &mut self.driver {
            Driver::Spring(spring) => spring.tick(dt),
            Driver::Eased(eased) => eased.tick(dt),
        }
        self.step()
    }

    /// Jump to `to`.
    pub fn finish(&mut self) -> TweenStep {
        match &mut self.driver {
            Driver::Spring(spring) => spring.settle(),
            Driver::Eased(eased) => eased.finish(),
        }
        self.step()
    }
}
