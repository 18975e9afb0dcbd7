//! Integration tests for the animation module.

use goey_core::animation::*;
use proptest::prelude::*;
use std::time::Duration;

const MS_16: Duration = Duration::from_millis(16);

#[test]
fn eased_duration_tracking() {
    let mut eased = Eased::new(Duration::from_secs(1), Easing::Standard);
    for _ in 0..1000 {
        eased.tick(Duration::from_millis(1));
    }
    assert!(eased.is_complete(), "1000x1ms should complete a 1s curve");
}

#[test]
fn frame_size_does_not_change_spring_trajectory_much() {
    let transition = Transition::spring_duration(Duration::from_millis(900), 0.2);
    let mut coarse = Tween::new(0.0, 1.0, transition);
    let mut fine = Tween::new(0.0, 1.0, transition);
    for _ in 0..10 {
        coarse.tick(Duration::from_millis(32));
        fine.tick(MS_16);
        fine.tick(MS_16);
    }
    assert!((coarse.value() - fine.value()).abs() < 1e-3);
}

#[test]
fn tween_done_is_sticky() {
    let mut tween = Tween::new(
        0.0,
        1.0,
        Transition::eased(Duration::from_millis(32), Easing::Linear),
    );
    tween.tick(MS_16);
    assert!(tween.tick(MS_16).done);
    let after = tween.tick(MS_16);
    assert!(after.done);
    assert_eq!(after.value, 1.0);
}

#[test]
fn collapse_curve_reaches_zero_on_schedule() {
    let mut tween = Tween::new(
        1.0,
        0.0,
        Transition::eased(Duration::from_millis(900), Easing::Standard),
    );
    let mut frames = 0;
    loop {
        frames += 1;
        if tween.tick(MS_16).done {
            break;
        }
    }
    assert_eq!(frames, 57);
    assert_eq!(tween.value(), 0.0);
}

proptest! {
    #[test]
    fn easing_stays_in_unit_range(t in 0.0f64..=1.0) {
        for easing in [
            Easing::Linear,
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::EaseInOut,
            Easing::EaseOutCubic,
            Easing::Standard,
        ] {
            let v = easing.apply(t);
            prop_assert!((-1e-9..=1.0 + 1e-9).contains(&v), "{easing:?}({t}) = {v}");
        }
    }

    #[test]
    fn bezier_is_monotonic_for_monotonic_controls(
        x1 in 0.0f64..=1.0,
        y1 in 0.0f64..=1.0,
        x2 in 0.0f64..=1.0,
        y2 in 0.0f64..=1.0,
        a in 0.0f64..=1.0,
        b in 0.0f64..=1.0,
    ) {
        let curve = CubicBezier::new(x1, y1, x2, y2);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assume!(hi - lo > 1e-3);
        prop_assert!(curve.apply(lo) <= curve.apply(hi) + 1e-3);
    }

    #[test]
    fn springs_settle_exactly_on_target(
        from in -500.0f64..500.0,
        to in -500.0f64..500.0,
        duration_ms in 200u64..1500,
        bounce in 0.0f64..0.6,
    ) {
        let mut tween = Tween::new(
            from,
            to,
            Transition::spring_duration(Duration::from_millis(duration_ms), bounce),
        );
        let mut settled = false;
        for _ in 0..5000 {
            if tween.tick(MS_16).done {
                settled = true;
                break;
            }
        }
        prop_assert!(settled);
        prop_assert_eq!(tween.value(), to);
    }
}
