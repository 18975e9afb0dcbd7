#![forbid(unsafe_code)]

//! Sub-pixel geometric primitives.
//!
//! All coordinates are `f64` pixels in a y-down space with the origin at the
//! top-left of the toast shape.

/// Height of the compact pill. The pill's end caps have radius `PILL_HEIGHT / 2`.
pub const PILL_HEIGHT: f64 = 34.0;

/// Two dimension sets closer than this on every axis are treated as equal.
pub const DIMENSION_EPSILON: f64 = 0.5;

/// A point in shape space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn lerp(self, to: Point, t: f64) -> Point {
        Point::new(self.x + (to.x - self.x) * t, self.y + (to.y - self.y) * t)
    }

    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Width and height of a laid-out box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Degenerate box containing only `p`.
    pub const fn at(p: Point) -> Self {
        Self {
            min_x: p.x,
            min_y: p.y,
            max_x: p.x,
            max_y: p.y,
        }
    }

    /// Smallest box containing every point, or `None` for an empty iterator.
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut bounds = Self::at(first);
        for p in points {
            bounds.include(p);
        }
        Some(bounds)
    }

    pub fn include(&mut self, p: Point) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// The three measurements that drive the morph.
///
/// `pill_width` is the compact header pill, `body_width` and `body_height`
/// the fully expanded content box. A set is usable only once all three are
/// positive.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Dimensions {
    pub pill_width: f64,
    pub body_width: f64,
    pub body_height: f64,
}

impl Dimensions {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    #[inline]
    pub const fn new(pill_width: f64, body_width: f64, body_height: f64) -> Self {
        Self {
            pill_width,
            body_width,
            body_height,
        }
    }

    /// Compact pill of the given width: the body collapses onto the pill.
    #[inline]
    pub const fn pill(pill_width: f64) -> Self {
        Self::new(pill_width, pill_width, PILL_HEIGHT)
    }

    /// All three measurements are positive.
    #[inline]
    pub fn is_measured(&self) -> bool {
        self.pill_width > 0.0 && self.body_width > 0.0 && self.body_height > 0.0
    }

    /// The pill never renders wider than the body.
    #[inline]
    pub fn effective_pill_width(&self) -> f64 {
        self.pill_width.min(self.body_width)
    }

    /// Component-wise interpolation. `t` is not clamped.
    pub fn lerp(&self, to: &Dimensions, t: f64) -> Dimensions {
        Dimensions::new(
            self.pill_width + (to.pill_width - self.pill_width) * t,
            self.body_width + (to.body_width - self.body_width) * t,
            self.body_height + (to.body_height - self.body_height) * t,
        )
    }

    pub fn approx_eq(&self, other: &Dimensions) -> bool {
        (self.pill_width - other.pill_width).abs() < DIMENSION_EPSILON
            && (self.body_width - other.body_width).abs() < DIMENSION_EPSILON
            && (self.body_height - other.body_height).abs() < DIMENSION_EPSILON
    }
}
