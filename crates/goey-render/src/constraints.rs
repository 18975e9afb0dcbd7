#![forbid(unsafe_code)]

//! Layout constraints applied alongside the outline each frame.
//!
//! While the outline is smaller than the content, the wrapper is clamped to
//! the outline's current footprint and the overflow is clipped, so content
//! never paints outside the shape.

use goey_core::geometry::{Dimensions, PILL_HEIGHT};

use crate::path::Path;
use crate::shape::morph_path;

/// Which layout regime a morph progress value falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MorphBranch {
    /// `t <= 0`: clamped to the pill.
    Compact,
    /// `0 < t < 1`: clamped to the interpolated footprint.
    Morphing,
    /// `t >= 1`: unconstrained.
    Expanded,
}

impl MorphBranch {
    pub fn of(t: f64) -> Self {
        if t.is_nan() || t <= 0.0 {
            Self::Compact
        } else if t >= 1.0 {
            Self::Expanded
        } else {
            Self::Morphing
        }
    }
}

/// Horizontal clip insets in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClipInset {
    pub left: f64,
    pub right: f64,
}

impl ClipInset {
    /// CSS `clip-path` value, e.g. `inset(0 12px 0 0)`.
    pub fn to_css(&self) -> String {
        format!("inset(0 {}px 0 {}px)", px(self.right), px(self.left))
    }
}

fn px(v: f64) -> String {
    let rounded = (v * 100.0).round() / 100.0;
    if rounded == rounded.trunc() {
        format!("{}", rounded as i64)
    } else {
        format!("{rounded}")
    }
}

/// Inline layout clamps for the wrapper and content boxes. The default value
/// imposes nothing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutConstraints {
    pub wrapper_width: Option<f64>,
    pub content_width: Option<f64>,
    pub max_height: Option<f64>,
    pub clip: Option<ClipInset>,
    pub overflow_hidden: bool,
}

impl LayoutConstraints {
    pub const NONE: Self = Self {
        wrapper_width: None,
        content_width: None,
        max_height: None,
        clip: None,
        overflow_hidden: false,
    };

    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }
}

/// Everything one frame writes to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Flush {
    pub path: Path,
    pub constraints: LayoutConstraints,
    pub branch: MorphBranch,
}

/// Outline and clamps for the current frame.
///
/// `animated` supplies the outline's dimensions, `target` the content's full
/// expanded size. Returns `None` until every animated dimension is positive.
/// Right-anchored toasts expand leftward, so their clip sits on the left.
pub fn compute_constraints(
    animated: &Dimensions,
    target: &Dimensions,
    t: f64,
    right_anchored: bool,
) -> Option<Flush> {
    if !animated.is_measured() {
        return None;
    }

    let path = morph_path(
        animated.pill_width,
        animated.body_width,
        animated.body_height,
        t,
    );
    let pill_w = animated.effective_pill_width();
    let branch = MorphBranch::of(t);

    let constraints = match branch {
        MorphBranch::Expanded => LayoutConstraints::NONE,
        MorphBranch::Morphing => {
            let current_w = pill_w + (animated.body_width - pill_w) * t;
            let current_h = PILL_HEIGHT + (target.body_height - PILL_HEIGHT) * t;
            let hidden = (target.body_width - current_w).max(0.0);
            let clip = if right_anchored {
                ClipInset {
                    left: hidden,
                    right: 0.0,
                }
            } else {
                ClipInset {
                    left: 0.0,
                    right: hidden,
                }
            };
            LayoutConstraints {
                wrapper_width: Some(current_w),
                content_width: Some(target.body_width),
                max_height: Some(current_h),
                clip: Some(clip),
                overflow_hidden: true,
            }
        }
        MorphBranch::Compact => LayoutConstraints {
            wrapper_width: Some(pill_w),
            content_width: None,
            max_height: Some(PILL_HEIGHT),
            clip: None,
            overflow_hidden: true,
        },
    };

    Some(Flush {
        path,
        constraints,
        branch,
    })
}
