#![forbid(unsafe_code)]

//! Pill/blob morph state machine.
//!
//! [`MorphController`] owns the morph progress `t` (0 = pill, 1 = blob), the
//! latest measured target [`Dimensions`] and the animated dimensions the
//! outline is currently drawn at. It runs at most one morph channel
//! (expand or collapse) and one pill-resize channel; starting a channel drops
//! whatever held it before.
//!
//! ```text
//!            content appears (+expand delay)
//!  Compact ──────────────────────────────────▶ Expanding
//!     ▲                                            │ t reaches 1
//!     │ t reaches 0                                ▼
//!  Collapsing ◀──────── content removed ────── Expanded
//!  PreDismissCollapsing ◀─ display ends soon ──────┘
//! ```
//!
//! The controller is driven by the owning toast once per frame:
//!
//! 1. [`set_expanded_content`](MorphController::set_expanded_content)
//! 2. [`begin_frame`](MorphController::begin_frame)
//! 3. [`reconcile`](MorphController::reconcile) when a measurement landed
//! 4. [`flush`](MorphController::flush)
//!
//! and reports what happened through [`drain_events`](MorphController::drain_events).

use std::time::Duration;

use goey_core::animation::{Easing, Transition, Tween, TweenStep};
use goey_core::clock::Timer;
use goey_core::geometry::Dimensions;
use goey_render::{Flush, compute_constraints};

use crate::toast::ResolvedTimings;

/// Spring period of the compact pill-resize channel.
pub const PILL_RESIZE_DURATION: Duration = Duration::from_millis(600);

/// Collapse length used under reduced motion when scheduling the pre-dismiss.
pub const REDUCED_COLLAPSE: Duration = Duration::from_millis(10);

pub const DEFAULT_BOUNCE: f64 = 0.2;

/// Per-toast morph settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MorphConfig {
    pub timings: ResolvedTimings,
    /// Springs for morph, collapse and pill resize. Off uses the standard
    /// cubic-bezier curve for the same durations.
    pub spring: bool,
    pub bounce: f64,
}

impl Default for MorphConfig {
    fn default() -> Self {
        Self {
            timings: ResolvedTimings::default(),
            spring: true,
            bounce: DEFAULT_BOUNCE,
        }
    }
}

impl MorphConfig {
    #[must_use]
    pub fn timings(mut self, timings: ResolvedTimings) -> Self {
        self.timings = timings;
        self
    }

    #[must_use]
    pub fn spring(mut self, spring: bool) -> Self {
        self.spring = spring;
        self
    }

    #[must_use]
    pub fn bounce(mut self, bounce: f64) -> Self {
        self.bounce = bounce;
        self
    }
}

/// Geometric state of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MorphState {
    Compact,
    Expanding,
    Expanded,
    Collapsing,
    PreDismissCollapsing,
}

/// Milestones reported by [`MorphController::drain_events`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MorphEvent {
    /// The first usable measurement arrived.
    FirstMeasured,
    /// Body content became visible.
    BodyShown,
    ExpandStarted,
    /// `t` reached 1 and the outline snapped to the target.
    ExpandSettled,
    CollapseStarted { pre_dismiss: bool },
    /// A collapse animation reached `t = 0`.
    Collapsed { pre_dismiss: bool },
    /// Body content was hidden.
    BodyHidden,
    /// The settled body changed height.
    HeightChanged,
    /// The display duration of an expanded toast elapsed.
    DismissRequested,
}

#[derive(Debug, Clone, Copy)]
enum Advance {
    By(Duration),
    Finish,
}

impl Advance {
    fn apply(self, tween: &mut Tween) -> TweenStep {
        match self {
            Self::By(dt) => tween.tick(dt),
            Self::Finish => tween.finish(),
        }
    }
}

#[derive(Debug, Clone)]
enum MorphAnim {
    /// `t` runs from `from_t` to 1 while the dimensions travel from `start`
    /// toward the latest target.
    Expand {
        tween: Tween,
        start: Dimensions,
        from_t: f64,
    },
    /// `t` runs down to 0 while the dimensions travel from `saved` to `compact`.
    Collapse {
        tween: Tween,
        saved: Dimensions,
        compact: Dimensions,
        pre_dismiss: bool,
    },
}

#[derive(Debug, Clone)]
struct PillResize {
    tween: Tween,
    from: Dimensions,
    to: Dimensions,
}

/// See the [module docs](self).
#[derive(Debug, Clone)]
pub struct MorphController {
    config: MorphConfig,
    reduced_motion: bool,
    now: Duration,

    t: f64,
    target: Dimensions,
    animated: Dimensions,
    expanded_snapshot: Option<Dimensions>,

    expanded: bool,
    show_body: bool,
    dismissing: bool,
    overridden: bool,
    /// Held while a collapse owns the animated dimensions.
    collapse_lock: bool,

    morph: Option<MorphAnim>,
    pill_resize: Option<PillResize>,
    start_pending: bool,

    expand_timer: Timer,
    pre_dismiss_timer: Timer,
    dismiss_timer: Timer,

    events: Vec<MorphEvent>,
}

impl MorphController {
    pub fn new(config: MorphConfig) -> Self {
        Self {
            config,
            reduced_motion: false,
            now: Duration::ZERO,
            t: 0.0,
            target: Dimensions::ZERO,
            animated: Dimensions::ZERO,
            expanded_snapshot: None,
            expanded: false,
            show_body: false,
            dismissing: false,
            overridden: false,
            collapse_lock: false,
            morph: None,
            pill_resize: None,
            start_pending: false,
            expand_timer: Timer::idle(),
            pre_dismiss_timer: Timer::idle(),
            dismiss_timer: Timer::idle(),
            events: Vec::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn config(&self) -> &MorphConfig {
        &self.config
    }

    /// Raw morph progress. Springs may carry it slightly past [0, 1].
    pub fn t(&self) -> f64 {
        self.t
    }

    pub fn target(&self) -> Dimensions {
        self.target
    }

    pub fn animated(&self) -> Dimensions {
        self.animated
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn show_body(&self) -> bool {
        self.show_body
    }

    /// The pre-dismiss collapse has started. Terminal for the toast.
    pub fn is_dismissing(&self) -> bool {
        self.dismissing
    }

    pub fn is_locked(&self) -> bool {
        self.collapse_lock
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    pub fn pill_resize_active(&self) -> bool {
        self.pill_resize.is_some()
    }

    pub fn state(&self) -> MorphState {
        match &self.morph {
            Some(MorphAnim::Expand { .. }) => MorphState::Expanding,
            Some(MorphAnim::Collapse {
                pre_dismiss: true, ..
            }) => MorphState::PreDismissCollapsing,
            Some(MorphAnim::Collapse { .. }) => MorphState::Collapsing,
            None if self.show_body && self.t >= 1.0 => MorphState::Expanded,
            None if self.show_body => MorphState::Expanding,
            None => MorphState::Compact,
        }
    }

    /// Whether anything is still moving or scheduled.
    pub fn is_animating(&self) -> bool {
        self.morph.is_some() || self.pill_resize.is_some() || self.start_pending
    }

    pub fn drain_events(&mut self) -> Vec<MorphEvent> {
        std::mem::take(&mut self.events)
    }

    // -----------------------------------------------------------------------
    // Inputs
    // -----------------------------------------------------------------------

    /// Report whether the toast has a description or an action.
    ///
    /// A rising edge schedules the body after the expand delay. A falling
    /// edge collapses toward a pill `compact_pill_width` wide, the width the
    /// current header needs.
    pub fn set_expanded_content(&mut self, has_content: bool, compact_pill_width: Option<f64>) {
        let expanded = has_content && !self.dismissing;
        if expanded == self.expanded {
            return;
        }
        self.expanded = expanded;

        if expanded {
            let delay = if self.reduced_motion {
                Duration::ZERO
            } else {
                self.config.timings.expand_delay
            };
            self.expand_timer.schedule(self.now, delay);
            goey_core::debug!(delay_ms = delay.as_millis() as u64, "expand scheduled");
        } else {
            self.expand_timer.cancel();
            self.start_collapse(compact_pill_width, false);
        }
    }

    /// Freeze the animated dimensions ahead of an action-success override.
    ///
    /// The override replaces the content, so the collapse that follows must
    /// start from what is on screen now rather than from a fresh measurement.
    pub fn hold_for_override(&mut self) {
        self.overridden = true;
        self.pre_dismiss_timer.cancel();
        if self.animated.is_measured() {
            self.expanded_snapshot = Some(self.animated);
        }
        self.collapse_lock = true;
    }

    /// Apply a live reduced-motion change. Turning it on finishes every
    /// channel in place and fires a pending expand on the next frame.
    pub fn set_reduced_motion(&mut self, reduced: bool) {
        if reduced == self.reduced_motion {
            return;
        }
        self.reduced_motion = reduced;
        if !reduced {
            return;
        }
        if self.start_pending {
            self.start_pending = false;
            self.snap_expanded();
        }
        self.advance_morph(Advance::Finish);
        self.advance_pill_resize(Advance::Finish);
        if self.expand_timer.is_pending() {
            self.expand_timer.schedule(self.now, Duration::ZERO);
        }
    }

    // -----------------------------------------------------------------------
    // Frame
    // -----------------------------------------------------------------------

    /// Advance time by `dt`: tick channels, then fire due work.
    pub fn begin_frame(&mut self, dt: Duration, compact_pill_width: Option<f64>) {
        self.now = self.now.saturating_add(dt);

        self.advance_morph(Advance::By(dt));
        self.advance_pill_resize(Advance::By(dt));

        if std::mem::take(&mut self.start_pending) {
            self.start_expand();
        }

        if let Some(late) = self.expand_timer.fire(self.now) {
            self.enter_body(late);
        }

        if let Some(late) = self.pre_dismiss_timer.fire(self.now) {
            self.begin_pre_dismiss(compact_pill_width, late);
        }

        if self.dismiss_timer.fire(self.now).is_some() {
            goey_core::debug!("display duration elapsed");
            self.events.push(MorphEvent::DismissRequested);
        }
    }

    /// Fold a fresh measurement into the animation.
    ///
    /// Unusable measurements are ignored. While a collapse holds the lock
    /// only the target is recorded.
    pub fn reconcile(&mut self, measured: Dimensions) {
        if !measured.is_measured() {
            return;
        }
        let previous = std::mem::replace(&mut self.target, measured);
        if self.collapse_lock {
            return;
        }

        if !self.animated.is_measured() {
            self.animated = measured;
            self.events.push(MorphEvent::FirstMeasured);
            return;
        }

        // Mid-morph: the expand channel reads the new target next tick.
        if self.t > 0.0 && self.t < 1.0 {
            self.animated = measured;
            return;
        }

        if self.show_body {
            if (self.animated.body_height - measured.body_height).abs()
                >= goey_core::geometry::DIMENSION_EPSILON
            {
                self.events.push(MorphEvent::HeightChanged);
            }
            self.animated = measured;
            return;
        }

        if previous.approx_eq(&measured)
            && (self.pill_resize.is_some() || self.animated.approx_eq(&measured))
        {
            return;
        }

        if self.reduced_motion {
            self.pill_resize = None;
            self.animated = measured;
            return;
        }

        let transition = self.spring_transition(PILL_RESIZE_DURATION);
        self.pill_resize = Some(PillResize {
            tween: Tween::new(0.0, 1.0, transition),
            from: self.animated,
            to: measured,
        });
    }

    /// Outline and clamps for the current frame, `None` until measured.
    pub fn flush(&self, right_anchored: bool) -> Option<Flush> {
        compute_constraints(&self.animated, &self.target, self.t, right_anchored)
    }

    // -----------------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------------

    fn spring_transition(&self, duration: Duration) -> Transition {
        if self.config.spring {
            Transition::spring_duration(duration, self.config.bounce)
        } else {
            Transition::eased(duration, Easing::Standard)
        }
    }

    fn effective_expand_delay(&self) -> Duration {
        if self.reduced_motion {
            Duration::ZERO
        } else {
            self.config.timings.expand_delay
        }
    }

    fn effective_collapse(&self) -> Duration {
        if self.reduced_motion {
            REDUCED_COLLAPSE
        } else {
            self.config.timings.collapse_duration
        }
    }

    /// The expand delay elapsed `late` ago.
    fn enter_body(&mut self, late: Duration) {
        let resuming = matches!(
            self.morph,
            Some(MorphAnim::Collapse {
                pre_dismiss: false,
                ..
            })
        );
        if resuming {
            // Content came back mid-collapse: expand again from here.
            self.morph = None;
            self.collapse_lock = false;
            self.expanded_snapshot = None;
        }

        if !self.show_body || resuming {
            self.show_body = true;
            self.events.push(MorphEvent::BodyShown);
            goey_core::debug!(resuming, "body shown");
            self.schedule_display_end(late);
        }

        if self.reduced_motion {
            self.snap_expanded();
        } else {
            self.start_pending = true;
        }
    }

    /// Arm the pre-dismiss collapse and the dismissal request relative to
    /// the moment the body was due, so frame lateness does not accumulate.
    fn schedule_display_end(&mut self, late: Duration) {
        let shown_at = self.now.saturating_sub(late);
        let timings = &self.config.timings;
        let elapsed = self.effective_expand_delay();
        let remaining = timings.display_duration.saturating_sub(elapsed);
        self.dismiss_timer.schedule(shown_at, remaining);

        if self.overridden || self.dismissing {
            return;
        }
        match remaining.checked_sub(self.effective_collapse()) {
            Some(delay) if !delay.is_zero() => {
                self.pre_dismiss_timer.schedule(shown_at, delay);
            }
            _ => {
                goey_core::debug!("display too short for a pre-dismiss collapse");
                self.pre_dismiss_timer.cancel();
            }
        }
    }

    fn snap_expanded(&mut self) {
        self.pill_resize = None;
        self.morph = None;
        self.t = 1.0;
        self.animated = self.target;
        self.events.push(MorphEvent::ExpandSettled);
    }

    fn start_expand(&mut self) {
        self.pill_resize = None;
        let from_t = self.t.clamp(0.0, 1.0);
        if from_t >= 1.0 {
            self.morph = None;
            self.settle_expanded();
            return;
        }
        let transition = self.spring_transition(self.config.timings.expand_duration);
        self.morph = Some(MorphAnim::Expand {
            tween: Tween::new(from_t, 1.0, transition),
            start: self.animated,
            from_t,
        });
        self.events.push(MorphEvent::ExpandStarted);
        goey_core::debug!(from_t, "expand started");
    }

    fn settle_expanded(&mut self) {
        self.t = 1.0;
        self.animated = self.target;
        self.events.push(MorphEvent::ExpandSettled);
        goey_core::debug!("expand settled");
    }

    fn begin_pre_dismiss(&mut self, compact_pill_width: Option<f64>, late: Duration) {
        if !self.show_body || self.overridden || self.dismissing {
            return;
        }
        goey_core::debug!("pre-dismiss collapse");
        if self.animated.is_measured() {
            self.expanded_snapshot = Some(self.animated);
        }
        self.collapse_lock = true;
        self.dismissing = true;
        self.expanded = false;
        self.expand_timer.cancel();
        self.start_collapse(compact_pill_width, true);
        if !late.is_zero() {
            self.advance_morph(Advance::By(late));
        }
    }

    fn start_collapse(&mut self, compact_pill_width: Option<f64>, pre_dismiss: bool) {
        self.morph = None;
        self.pill_resize = None;
        self.start_pending = false;
        if !pre_dismiss {
            self.pre_dismiss_timer.cancel();
        }

        if self.t <= 0.0 {
            self.t = 0.0;
            self.collapse_lock = false;
            self.expanded_snapshot = None;
            self.hide_body();
            return;
        }

        let pill_width = compact_pill_width.unwrap_or(self.animated.pill_width);
        let compact = Dimensions::pill(pill_width);

        if self.reduced_motion {
            self.t = 0.0;
            self.collapse_lock = false;
            self.expanded_snapshot = None;
            self.animated = compact;
            self.hide_body();
            return;
        }

        let saved = self
            .expanded_snapshot
            .take()
            .filter(Dimensions::is_measured)
            .unwrap_or(self.animated);
        let duration = self.config.timings.collapse_duration;
        let transition = if pre_dismiss {
            Transition::eased(duration, Easing::Standard)
        } else {
            self.spring_transition(duration)
        };

        self.collapse_lock = true;
        self.t = self.t.min(1.0);
        self.morph = Some(MorphAnim::Collapse {
            tween: Tween::new(self.t, 0.0, transition),
            saved,
            compact,
            pre_dismiss,
        });
        self.events.push(MorphEvent::CollapseStarted { pre_dismiss });
        goey_core::debug!(from_t = self.t, pre_dismiss, "collapse started");
    }

    fn hide_body(&mut self) {
        if std::mem::replace(&mut self.show_body, false) {
            self.events.push(MorphEvent::BodyHidden);
        }
    }

    fn advance_morph(&mut self, advance: Advance) {
        let Some(anim) = self.morph.as_mut() else {
            return;
        };
        match anim {
            MorphAnim::Expand {
                tween,
                start,
                from_t,
            } => {
                let step = advance.apply(tween);
                let (start, from_t) = (*start, *from_t);
                if step.done {
                    self.morph = None;
                    self.settle_expanded();
                    return;
                }
                self.t = step.value;
                let span = 1.0 - from_t;
                let p = if span > 0.0 {
                    (step.value - from_t) / span
                } else {
                    1.0
                };
                self.animated = start.lerp(&self.target, p);
            }
            MorphAnim::Collapse {
                tween,
                saved,
                compact,
                pre_dismiss,
            } => {
                let step = advance.apply(tween);
                let (saved, compact, pre_dismiss) = (*saved, *compact, *pre_dismiss);
                if step.done {
                    self.morph = None;
                    self.t = 0.0;
                    self.collapse_lock = false;
                    self.animated = compact;
                    self.events.push(MorphEvent::Collapsed { pre_dismiss });
                    self.hide_body();
                    goey_core::debug!(pre_dismiss, "collapsed");
                    return;
                }
                self.t = step.value;
                self.animated = compact.lerp(&saved, step.value);
            }
        }
    }

    fn advance_pill_resize(&mut self, advance: Advance) {
        let Some(resize) = self.pill_resize.as_mut() else {
            return;
        };
        let step = advance.apply(&mut resize.tween);
        let (from, to) = (resize.from, resize.to);
        if step.done {
            self.pill_resize = None;
            self.animated = to;
        } else {
            self.animated = from.lerp(&to, step.value);
        }
    }
}

impl Default for MorphController {
    fn default() -> Self {
        Self::new(MorphConfig::default())
    }
}
