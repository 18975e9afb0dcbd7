#![forbid(unsafe_code)]

//! Frame timing.
//!
//! Everything in goey runs on a caller-owned timeline: a host measures real
//! frame deltas with [`FrameClock`], tests feed fixed deltas directly, and
//! both schedule work with [`Timer`] deadlines on that timeline.

use std::time::Duration;

use web_time::Instant;

/// Frame deltas above this are clamped, so a host resuming from a long
/// suspension does not jump every animation to its end in one frame.
pub const MAX_FRAME_DELTA: Duration = Duration::from_millis(250);

/// Measures wall-clock deltas between frames.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Delta since the previous call. The first call returns zero.
    pub fn tick(&mut self) -> Duration {
        let now = Instant::now();
        let dt = self
            .last
            .map_or(Duration::ZERO, |last| now.saturating_duration_since(last));
        self.last = Some(now);
        dt.min(MAX_FRAME_DELTA)
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// A cancellable one-shot deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Timer {
    deadline: Option<Duration>,
}

impl Timer {
    pub const fn idle() -> Self {
        Self { deadline: None }
    }

    /// Arm the timer to fire `delay` after `now`. Re-arming replaces the old deadline.
    pub fn schedule(&mut self, now: Duration, delay: Duration) {
        self.deadline = Some(now.saturating_add(delay));
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Disarm and return how late the timer is if it is due at `now`.
    pub fn fire(&mut self, now: Duration) -> Option<Duration> {
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }
        self.deadline = None;
        Some(now - deadline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_fires_once_with_lateness() {
        let mut timer = Timer::idle();
        timer.schedule(Duration::from_millis(100), Duration::from_millis(330));
        assert_eq!(timer.fire(Duration::from_millis(420)), None);
        assert_eq!(
            timer.fire(Duration::from_millis(436)),
            Some(Duration::from_millis(6))
        );
        assert!(!timer.is_pending());
        assert_eq!(timer.fire(Duration::from_millis(500)), None);
    }

    #[test]
    fn timer_zero_delay_fires_immediately() {
        let mut timer = Timer::idle();
        timer.schedule(Duration::from_millis(5), Duration::ZERO);
        assert_eq!(timer.fire(Duration::from_millis(5)), Some(Duration::ZERO));
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut timer = Timer::default();
        timer.schedule(Duration::ZERO, Duration::from_millis(10));
        timer.cancel();
        assert_eq!(timer.fire(Duration::from_secs(1)), None);
    }

    #[test]
    fn reschedule_replaces_deadline() {
        let mut timer = Timer::idle();
        timer.schedule(Duration::ZERO, Duration::from_millis(10));
        timer.schedule(Duration::ZERO, Duration::from_millis(50));
        assert_eq!(timer.deadline(), Some(Duration::from_millis(50)));
    }

    #[test]
    fn frame_clock_first_tick_is_zero_and_deltas_are_capped() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(), Duration::ZERO);
        assert!(clock.tick() <= MAX_FRAME_DELTA);
    }
}
