#![forbid(unsafe_code)]

//! Cosmetic overlays layered over the morph: squishes, the header press and
//! the error shake.
//!
//! None of these touch the morph progress. They only produce transforms for
//! the wrapper and header, and all of them are disabled under reduced motion.

use std::f64::consts::{PI, TAU};
use std::fmt::Write as _;
use std::time::Duration;

use goey_core::animation::{Transition, Tween};
use goey_core::clock::Timer;

/// Landing and collapse squishes closer together than this are dropped.
pub const SQUISH_DEBOUNCE: Duration = Duration::from_millis(300);

pub const SHAKE_DURATION: Duration = Duration::from_millis(500);
pub const SHAKE_AMPLITUDE: f64 = 6.0;
const SHAKE_CYCLES: f64 = 4.0;

/// Header scale reduction at full press.
const HEADER_SCALE: f64 = 0.05;
/// Header downward push in pixels at full press.
const HEADER_PUSH: f64 = 1.0;

// ---------------------------------------------------------------------------
// Transforms
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Origin {
    #[default]
    Center,
    CenterBottom,
}

impl Origin {
    pub fn to_css(self) -> &'static str {
        match self {
            Self::Center => "center center",
            Self::CenterBottom => "center bottom",
        }
    }
}

/// Transform applied to the toast wrapper.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub scale_x: f64,
    pub scale_y: f64,
    pub translate_x: f64,
    pub origin: Origin,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        scale_x: 1.0,
        scale_y: 1.0,
        translate_x: 0.0,
        origin: Origin::Center,
    };

    pub fn is_identity(&self) -> bool {
        self.scale_x == 1.0 && self.scale_y == 1.0 && self.translate_x == 0.0
    }

    /// CSS `transform` value. Mirrored wrappers keep their `scaleX(-1)`
    /// flip ahead of the overlay.
    pub fn to_css(&self, mirrored: bool) -> String {
        let mut out = String::new();
        if mirrored {
            out.push_str("scaleX(-1)");
        }
        if self.translate_x != 0.0 {
            push_part(&mut out, format_args!("translateX({:.3}px)", self.translate_x));
        }
        if self.scale_x != 1.0 || self.scale_y != 1.0 {
            push_part(
                &mut out,
                format_args!("scaleX({:.4}) scaleY({:.4})", self.scale_x, self.scale_y),
            );
        }
        out
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

fn push_part(out: &mut String, part: std::fmt::Arguments<'_>) {
    if !out.is_empty() {
        out.push(' ');
    }
    let _ = out.write_fmt(part);
}

/// Transform applied to the header row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaderTransform {
    pub scale: f64,
    pub translate_y: f64,
}

impl HeaderTransform {
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        translate_y: 0.0,
    };

    fn pressed(v: f64) -> Self {
        Self {
            scale: 1.0 - HEADER_SCALE * v,
            translate_y: HEADER_PUSH * v,
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    pub fn to_css(&self) -> String {
        if self.is_identity() {
            return String::new();
        }
        format!("scale({:.4}) translateY({:.3}px)", self.scale, self.translate_y)
    }
}

impl Default for HeaderTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// ---------------------------------------------------------------------------
// Squish
// ---------------------------------------------------------------------------

/// Squish variants. Each is a spring from 0 to 1 mapped onto a scale pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SquishKind {
    /// Soft landing: half-sine vertical compression with horizontal
    /// compensation, anchored at the bottom edge.
    Landing,
    /// Gentler landing played as a collapse begins.
    Collapse,
    /// One full sine cycle trading height for width, around the centre.
    Blob,
}

impl SquishKind {
    fn transition(self) -> Transition {
        match self {
            Self::Landing => Transition::spring(350.0, 12.0, 0.7),
            Self::Collapse => Transition::spring(300.0, 14.0, 0.7),
            Self::Blob => Transition::spring(300.0, 10.0, 0.8),
        }
    }

    fn debounced(self) -> bool {
        !matches!(self, Self::Blob)
    }

    fn transform(self, v: f64) -> Transform {
        match self {
            Self::Landing | Self::Collapse => {
                let (sy, sx) = if self == Self::Landing {
                    (0.12, 0.06)
                } else {
                    (0.08, 0.04)
                };
                let squeeze = (v * PI).sin();
                Transform {
                    scale_x: 1.0 + sx * squeeze,
                    scale_y: 1.0 - sy * squeeze,
                    translate_x: 0.0,
                    origin: Origin::CenterBottom,
                }
            }
            Self::Blob => {
                let s = (v * TAU).sin();
                Transform {
                    scale_x: 1.0 + 0.04 * s,
                    scale_y: 1.0 - 0.04 * s,
                    translate_x: 0.0,
                    origin: Origin::Center,
                }
            }
        }
    }
}

/// Horizontal offset of the error shake at linear progress `p`.
pub fn shake_offset(p: f64) -> f64 {
    let p = p.clamp(0.0, 1.0);
    SHAKE_AMPLITUDE * (1.0 - p).powi(2) * (p * TAU * SHAKE_CYCLES).sin()
}

// ---------------------------------------------------------------------------
// Cosmetics
// ---------------------------------------------------------------------------

/// Why an overlay did not start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suppressed {
    ReducedMotion,
    SpringDisabled,
    Debounced,
}

#[derive(Debug, Clone)]
struct Squish {
    kind: SquishKind,
    tween: Tween,
}

/// Overlay state for one toast.
#[derive(Debug, Clone)]
pub struct Cosmetics {
    now: Duration,
    reduced_motion: bool,
    spring: bool,
    squish: Option<Squish>,
    last_landing: Option<Duration>,
    mount_squish: Timer,
    header: Option<Tween>,
    header_value: f64,
    header_engaged: bool,
    shake: Option<Duration>,
}

impl Cosmetics {
    pub fn new(spring: bool) -> Self {
        Self {
            now: Duration::ZERO,
            reduced_motion: false,
            spring,
            squish: None,
            last_landing: None,
            mount_squish: Timer::idle(),
            header: None,
            header_value: 0.0,
            header_engaged: false,
            shake: None,
        }
    }

    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.reduced_motion = reduced;
        if reduced {
            self.cancel_all();
        }
    }

    /// Stop every overlay and drop anything scheduled.
    pub fn cancel_all(&mut self) {
        self.squish = None;
        self.mount_squish.cancel();
        self.header = None;
        self.header_value = 0.0;
        self.shake = None;
    }

    pub fn is_animating(&self) -> bool {
        self.squish.is_some()
            || self.header.is_some()
            || self.shake.is_some()
            || self.mount_squish.is_pending()
    }

    pub fn active_squish(&self) -> Option<SquishKind> {
        self.squish.as_ref().map(|s| s.kind)
    }

    pub fn is_shaking(&self) -> bool {
        self.shake.is_some()
    }

    /// Play a landing squish `delay` from now.
    pub fn schedule_landing(&mut self, delay: Duration) {
        if self.reduced_motion {
            return;
        }
        self.mount_squish.schedule(self.now, delay);
    }

    /// Why a squish of `kind` would not start now.
    pub fn squish_gate(&self, kind: SquishKind) -> Option<Suppressed> {
        if self.reduced_motion {
            Some(Suppressed::ReducedMotion)
        } else if !self.spring {
            Some(Suppressed::SpringDisabled)
        } else if kind.debounced()
            && self
                .last_landing
                .is_some_and(|at| self.now.saturating_sub(at) < SQUISH_DEBOUNCE)
        {
            Some(Suppressed::Debounced)
        } else {
            None
        }
    }

    /// Start a squish, replacing any squish in progress. A suppressed squish
    /// leaves the current one running.
    pub fn squish(&mut self, kind: SquishKind) {
        if let Some(reason) = self.squish_gate(kind) {
            goey_core::trace!(?kind, ?reason, "squish suppressed");
            return;
        }

        if kind.debounced() {
            self.last_landing = Some(self.now);
        }
        self.squish = Some(Squish {
            kind,
            tween: Tween::new(0.0, 1.0, kind.transition()),
        });
    }

    /// Press the header down as the body appears.
    pub fn engage_header(&mut self) {
        if self.reduced_motion {
            return;
        }
        self.header_engaged = true;
        self.header = Some(Tween::new(
            self.header_value,
            1.0,
            Transition::spring(300.0, 15.0, 0.8),
        ));
    }

    /// Let the header spring back. Only the first call after an engage runs.
    pub fn release_header(&mut self) {
        if self.reduced_motion || !std::mem::take(&mut self.header_engaged) {
            return;
        }
        self.header = Some(Tween::new(
            self.header_value,
            0.0,
            Transition::spring(400.0, 20.0, 0.6),
        ));
    }

    /// Start the error shake. Restarts a shake in progress; does nothing
    /// under reduced motion.
    pub fn shake(&mut self) {
        if self.reduced_motion {
            goey_core::trace!("shake suppressed under reduced motion");
            return;
        }
        self.shake = Some(Duration::ZERO);
    }

    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);

        let squish_done = self
            .squish
            .as_mut()
            .is_some_and(|squish| squish.tween.tick(dt).done);
        if squish_done {
            self.squish = None;
        }

        if let Some(header) = self.header.as_mut() {
            let step = header.tick(dt);
            self.header_value = step.value;
            if step.done {
                self.header = None;
            }
        }

        if let Some(elapsed) = self.shake.as_mut() {
            *elapsed = elapsed.saturating_add(dt);
            if *elapsed >= SHAKE_DURATION {
                self.shake = None;
            }
        }

        if self.mount_squish.fire(self.now).is_some() {
            self.squish(SquishKind::Landing);
        }
    }

    /// Combined wrapper transform for this frame.
    pub fn wrapper_transform(&self) -> Transform {
        let mut transform = self
            .squish
            .as_ref()
            .map_or(Transform::IDENTITY, |s| s.kind.transform(s.tween.value()));
        if let Some(elapsed) = self.shake {
            let p = elapsed.as_secs_f64() / SHAKE_DURATION.as_secs_f64();
            transform.translate_x = shake_offset(p);
        }
        transform
    }

    pub fn header_transform(&self) -> HeaderTransform {
        if self.header_value == 0.0 {
            HeaderTransform::IDENTITY
        } else {
            HeaderTransform::pressed(self.header_value)
        }
    }
}

impl Default for Cosmetics {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn run(c: &mut Cosmetics, frames: usize) {
        for _ in 0..frames {
            c.advance(FRAME);
        }
    }

    #[test]
    fn landing_squish_compresses_then_returns() {
        let mut c = Cosmetics::default();
        c.squish(SquishKind::Landing);
        assert_eq!(c.active_squish(), Some(SquishKind::Landing));
        run(&mut c, 3);
        let t = c.wrapper_transform();
        assert!(t.scale_y < 1.0);
        assert!(t.scale_x > 1.0);
        assert_eq!(t.origin, Origin::CenterBottom);
        run(&mut c, 300);
        assert!(c.wrapper_transform().is_identity());
        assert_eq!(c.active_squish(), None);
    }

    #[test]
    fn squishes_are_debounced() {
        let mut c = Cosmetics::default();
        c.squish(SquishKind::Landing);
        run(&mut c, 5);
        assert_eq!(c.squish_gate(SquishKind::Collapse), Some(Suppressed::Debounced));
        c.squish(SquishKind::Collapse);
        assert_eq!(c.active_squish(), Some(SquishKind::Landing));
        // The settle pulse is not debounced.
        assert_eq!(c.squish_gate(SquishKind::Blob), None);
        c.squish(SquishKind::Blob);
        assert_eq!(c.active_squish(), Some(SquishKind::Blob));
        run(&mut c, 20);
        assert_eq!(c.squish_gate(SquishKind::Collapse), None);
    }

    #[test]
    fn spring_off_and_reduced_motion_suppress_squish() {
        let mut c = Cosmetics::new(false);
        assert_eq!(c.squish_gate(SquishKind::Blob), Some(Suppressed::SpringDisabled));
        c.squish(SquishKind::Blob);
        assert_eq!(c.active_squish(), None);
        let mut c = Cosmetics::default();
        c.set_reduced_motion(true);
        assert_eq!(c.squish_gate(SquishKind::Landing), Some(Suppressed::ReducedMotion));
    }

    #[test]
    fn mount_squish_fires_after_delay() {
        let mut c = Cosmetics::default();
        c.schedule_landing(Duration::from_millis(350));
        run(&mut c, 21);
        assert_eq!(c.active_squish(), None);
        run(&mut c, 1);
        assert_eq!(c.active_squish(), Some(SquishKind::Landing));
    }

    #[test]
    fn header_releases_once() {
        let mut c = Cosmetics::default();
        c.engage_header();
        run(&mut c, 60);
        let pressed = c.header_transform();
        assert!(pressed.scale < 1.0 && pressed.translate_y > 0.0);

        c.release_header();
        run(&mut c, 60);
        assert!(c.header_transform().is_identity());
        assert!(!c.is_animating());

        // A second release has nothing to undo.
        c.release_header();
        assert!(!c.is_animating());
    }

    #[test]
    fn shake_decays_and_ignores_spring_setting() {
        let mut c = Cosmetics::new(false);
        c.shake();
        assert!(c.is_shaking());
        run(&mut c, 2);
        assert!(c.wrapper_transform().translate_x != 0.0);
        run(&mut c, 40);
        assert!(!c.is_shaking());
        assert_eq!(c.wrapper_transform().translate_x, 0.0);
    }

    #[test]
    fn shake_profile_starts_and_ends_at_rest() {
        assert_eq!(shake_offset(0.0), 0.0);
        assert!(shake_offset(1.0).abs() < 1e-12);
        let peak = (0..100)
            .map(|i| shake_offset(i as f64 / 100.0).abs())
            .fold(0.0, f64::max);
        assert!(peak <= SHAKE_AMPLITUDE);
    }

    #[test]
    fn reduced_motion_cancels_everything() {
        let mut c = Cosmetics::default();
        c.squish(SquishKind::Landing);
        c.shake();
        c.engage_header();
        c.schedule_landing(Duration::from_millis(100));
        c.set_reduced_motion(true);
        assert!(!c.is_animating());
        assert!(c.wrapper_transform().is_identity());
        c.shake();
        assert!(!c.is_shaking());
    }

    #[test]
    fn css_output() {
        assert_eq!(Transform::IDENTITY.to_css(false), "");
        assert_eq!(Transform::IDENTITY.to_css(true), "scaleX(-1)");
        let t = Transform {
            scale_x: 1.02,
            scale_y: 0.95,
            translate_x: -3.0,
            origin: Origin::Center,
        };
        assert_eq!(
            t.to_css(true),
            "scaleX(-1) translateX(-3.000px) scaleX(1.0200) scaleY(0.9500)"
        );
        assert_eq!(HeaderTransform::IDENTITY.to_css(), "");
    }
}
