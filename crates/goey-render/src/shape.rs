#![forbid(unsafe_code)]

//! The morphing toast outline.
//!
//! At `t = 0` the outline is a stadium pill `PILL_HEIGHT` tall. As `t` grows
//! the right side of the pill extends down and out into a rounded body,
//! joined to the pill by a concave quadratic neck:
//!
//! ```text
//!  ╭──────────╮
//!  │   pill   │╮ <- neck
//!  │          ╰──────────╮
//!  │         body        │
//!  ╰─────────────────────╯
//! ```
//!
//! Branching uses `t` clamped to [0, 1]; widths and heights are interpolated
//! with the raw `t` so a spring overshoot stretches the body past its target.

use goey_core::geometry::PILL_HEIGHT;

use crate::path::Path;

/// The interpolated body must reach at least this far below the pill before
/// the blob outline is used.
pub const MIN_BODY_GROWTH: f64 = 8.0;

/// Neck curve depth at `t = 1`.
pub const NECK_CURVE: f64 = 14.0;

/// Largest body corner radius.
pub const MAX_BODY_RADIUS: f64 = 16.0;

/// Body corner radius as a fraction of the body's growth below the pill.
pub const BODY_RADIUS_FACTOR: f64 = 0.45;

/// Which outline [`morph_path`] produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Pill,
    Blob,
}

impl ShapeKind {
    /// Outline chosen for the target body height at progress `t`.
    pub fn classify(body_height: f64, t: f64) -> Self {
        let t = clamp_progress(t);
        let growth = (body_height - PILL_HEIGHT) * t;
        if t <= 0.0 || growth < MIN_BODY_GROWTH {
            Self::Pill
        } else {
            Self::Blob
        }
    }
}

fn clamp_progress(t: f64) -> f64 {
    if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) }
}

/// Stadium pill of the given width. Narrow pills get elliptical caps so the
/// outline never folds back on itself.
pub fn pill_path(pill_width: f64) -> Path {
    let pill_width = pill_width.max(0.0);
    let ry = PILL_HEIGHT / 2.0;
    let rx = ry.min(pill_width / 2.0);

    Path::new()
        .move_to(0.0, ry)
        .arc_to(rx, ry, rx, 0.0)
        .horizontal_to(pill_width - rx)
        .arc_to(rx, ry, pill_width, ry)
        .arc_to(rx, ry, pill_width - rx, PILL_HEIGHT)
        .horizontal_to(rx)
        .arc_to(rx, ry, 0.0, ry)
        .close()
}

/// Outline for the given measurements at morph progress `t`.
///
/// `pill_width` is capped at `body_width`. Degenerate inputs produce a
/// degenerate but well-formed closed path.
pub fn morph_path(pill_width: f64, body_width: f64, body_height: f64, t: f64) -> Path {
    let pill_w = pill_width.min(body_width).max(0.0);
    match ShapeKind::classify(body_height, t) {
        ShapeKind::Pill => pill_path(pill_w),
        ShapeKind::Blob => blob_path(pill_w, body_width, body_height, t),
    }
}

fn blob_path(pill_w: f64, body_width: f64, body_height: f64, t: f64) -> Path {
    let t_clamped = clamp_progress(t);
    let t = if t.is_finite() { t } else { t_clamped };

    let ry = PILL_HEIGHT / 2.0;
    let rx = ry.min(pill_w / 2.0);

    let body_w = (pill_w + (body_width - pill_w) * t).max(pill_w);
    let body_h = (PILL_HEIGHT + (body_height - PILL_HEIGHT) * t).max(PILL_HEIGHT);

    let curve = NECK_CURVE * t_clamped;
    let corner = MAX_BODY_RADIUS
        .min((body_h - PILL_HEIGHT) * BODY_RADIUS_FACTOR)
        .min(body_w / 2.0)
        .max(0.0);
    let body_top = PILL_HEIGHT - curve;
    let neck_end = (pill_w + curve).min(body_w - corner);

    Path::new()
        .move_to(0.0, ry)
        .arc_to(rx, ry, rx, 0.0)
        .horizontal_to(pill_w - rx)
        .arc_to(rx, ry, pill_w, ry)
        .line_to(pill_w, body_top)
        .quad_to(pill_w, PILL_HEIGHT, neck_end, PILL_HEIGHT)
        .horizontal_to(body_w - corner)
        .arc_to(corner, corner, body_w, PILL_HEIGHT + corner)
        .line_to(body_w, body_h - corner)
        .arc_to(corner, corner, body_w - corner, body_h)
        .horizontal_to(corner)
        .arc_to(corner, corner, 0.0, body_h - corner)
        .close()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathCommand;

    fn bounds(path: &Path) -> (f64, f64) {
        let b = path.bounds().expect("non-empty path");
        (b.width(), b.height())
    }

    #[test]
    fn zero_progress_is_a_pill() {
        let path = morph_path(120.0, 320.0, 110.0, 0.0);
        assert_eq!(path, pill_path(120.0));
        assert_eq!(bounds(&path), (120.0, PILL_HEIGHT));
    }

    #[test]
    fn pill_svg_matches_stadium_outline() {
        assert_eq!(
            pill_path(100.0).to_string(),
            "M 0,17 A 17,17 0 0 1 17,0 H 83 A 17,17 0 0 1 100,17 \
             A 17,17 0 0 1 83,34 H 17 A 17,17 0 0 1 0,17 Z"
        );
    }

    #[test]
    fn shallow_body_stays_a_pill() {
        let path = morph_path(120.0, 320.0, PILL_HEIGHT + 7.9, 1.0);
        assert_eq!(ShapeKind::classify(PILL_HEIGHT + 7.9, 1.0), ShapeKind::Pill);
        assert_eq!(bounds(&path), (120.0, PILL_HEIGHT));
    }

    #[test]
    fn early_progress_stays_a_pill_until_the_body_clears_it() {
        // 76 px of growth at t = 0.05 is 3.8 px below the pill.
        assert_eq!(morph_path(120.0, 320.0, 110.0, 0.05), pill_path(120.0));
        assert_eq!(ShapeKind::classify(110.0, 0.05), ShapeKind::Pill);
        // 76 * 0.11 = 8.36 px clears the threshold.
        assert_eq!(ShapeKind::classify(110.0, 0.11), ShapeKind::Blob);
        assert!(bounds(&morph_path(120.0, 320.0, 110.0, 0.11)).1 > PILL_HEIGHT + MIN_BODY_GROWTH);
    }

    #[test]
    fn full_progress_matches_body() {
        let path = morph_path(120.0, 320.0, 110.0, 1.0);
        let (w, h) = bounds(&path);
        assert!((w - 320.0).abs() < 1e-9);
        assert!((h - 110.0).abs() < 1e-9);
    }

    #[test]
    fn pill_wider_than_body_is_capped() {
        let path = morph_path(400.0, 300.0, 34.0, 0.0);
        assert_eq!(bounds(&path).0, 300.0);
    }

    #[test]
    fn blob_has_neck_curve_and_closes() {
        let path = morph_path(120.0, 320.0, 110.0, 0.5);
        let commands = path.commands();
        assert_eq!(commands.len(), 13);
        assert!(matches!(commands[0], PathCommand::MoveTo(_)));
        assert!(
            commands
                .iter()
                .any(|c| matches!(c, PathCommand::Quad { .. }))
        );
        assert!(path.is_closed());
    }

    #[test]
    fn overshoot_stretches_past_target() {
        let (w, h) = bounds(&morph_path(120.0, 320.0, 110.0, 1.1));
        assert!(w > 320.0);
        assert!(h > 110.0);
    }

    #[test]
    fn neck_never_passes_the_body_corner() {
        // Body barely wider than the pill: the neck end is pinned to the corner.
        let path = morph_path(200.0, 205.0, 120.0, 1.0);
        let quad_end = path.commands().iter().find_map(|c| match c {
            PathCommand::Quad { to, .. } => Some(to.x),
            _ => None,
        });
        let corner = MAX_BODY_RADIUS.min(205.0 / 2.0);
        assert_eq!(quad_end, Some(205.0 - corner));
    }

    #[test]
    fn nan_progress_is_compact() {
        assert_eq!(ShapeKind::classify(200.0, f64::NAN), ShapeKind::Pill);
    }

    #[test]
    fn narrow_pill_uses_elliptical_caps() {
        let path = pill_path(20.0);
        assert_eq!(bounds(&path), (20.0, PILL_HEIGHT));
    }
}
