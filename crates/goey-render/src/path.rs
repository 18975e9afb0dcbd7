#![forbid(unsafe_code)]

//! A minimal SVG path model.
//!
//! Only the commands the toast outline needs are modelled: absolute move,
//! line, horizontal line, elliptical arc, quadratic curve and close. Arcs are
//! axis-aligned (no x-axis rotation).

use std::f64::consts::{FRAC_PI_2, TAU};
use std::fmt;

use goey_core::geometry::{Bounds, Point};
use smallvec::SmallVec;

/// One absolute path command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    /// Horizontal line to the given x.
    HorizontalTo(f64),
    Arc {
        radius_x: f64,
        radius_y: f64,
        large_arc: bool,
        /// Positive-angle direction, which is clockwise on a y-down screen.
        sweep: bool,
        to: Point,
    },
    Quad {
        control: Point,
        to: Point,
    },
    Close,
}

/// An ordered list of path commands.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    commands: SmallVec<[PathCommand; 16]>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::MoveTo(Point::new(x, y)));
        self
    }

    pub fn line_to(mut self, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::LineTo(Point::new(x, y)));
        self
    }

    pub fn horizontal_to(mut self, x: f64) -> Self {
        self.commands.push(PathCommand::HorizontalTo(x));
        self
    }

    /// Small clockwise arc, the only kind the outline uses.
    pub fn arc_to(mut self, radius_x: f64, radius_y: f64, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::Arc {
            radius_x,
            radius_y,
            large_arc: false,
            sweep: true,
            to: Point::new(x, y),
        });
        self
    }

    pub fn quad_to(mut self, cx: f64, cy: f64, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::Quad {
            control: Point::new(cx, cy),
            to: Point::new(x, y),
        });
        self
    }

    pub fn close(mut self) -> Self {
        self.commands.push(PathCommand::Close);
        self
    }

    /// Ends with `Z`.
    pub fn is_closed(&self) -> bool {
        matches!(self.commands.last(), Some(PathCommand::Close))
    }

    /// Tight axis-aligned bounds including curve extrema.
    pub fn bounds(&self) -> Option<Bounds> {
        let mut bounds: Option<Bounds> = None;
        let mut include = |p: Point| bounds.get_or_insert(Bounds::at(p)).include(p);

        self.walk(|from, command| match *command {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => include(p),
            PathCommand::HorizontalTo(x) => include(Point::new(x, from.y)),
            PathCommand::Quad { control, to } => {
                include(to);
                for s in quad_extrema(from, control, to) {
                    include(quad_point(from, control, to, s));
                }
            }
            PathCommand::Arc {
                radius_x,
                radius_y,
                large_arc,
                sweep,
                to,
            } => {
                include(to);
                let arc =
                    CenterArc::from_endpoints(from, to, radius_x, radius_y, large_arc, sweep);
                if let Some(arc) = arc {
                    for angle in arc.axis_crossings() {
                        include(arc.point_at(angle));
                    }
                }
            }
            PathCommand::Close => {}
        });
        bounds
    }

    /// Approximate each subpath as a polygon, splitting every curve into
    /// `segments` straight pieces. Consecutive duplicate points are dropped.
    pub fn flatten(&self, segments: usize) -> Vec<Vec<Point>> {
        let segments = segments.max(1);
        fn push(polygons: &mut [Vec<Point>], p: Point) {
            if let Some(poly) = polygons.last_mut() {
                if poly.last().is_none_or(|last| last.distance(p) > 1e-9) {
                    poly.push(p);
                }
            }
        }

        let mut polygons: Vec<Vec<Point>> = Vec::new();

        self.walk(|from, command| match *command {
            PathCommand::MoveTo(p) => polygons.push(vec![p]),
            PathCommand::LineTo(p) => push(&mut polygons, p),
            PathCommand::HorizontalTo(x) => push(&mut polygons, Point::new(x, from.y)),
            PathCommand::Quad { control, to } => {
                for i in 1..=segments {
                    let s = i as f64 / segments as f64;
                    push(&mut polygons, quad_point(from, control, to, s));
                }
            }
            PathCommand::Arc {
                radius_x,
                radius_y,
                large_arc,
                sweep,
                to,
            } => match CenterArc::from_endpoints(from, to, radius_x, radius_y, large_arc, sweep) {
                Some(arc) => {
                    for i in 1..segments {
                        let angle = arc.start + arc.sweep * i as f64 / segments as f64;
                        push(&mut polygons, arc.point_at(angle));
                    }
                    push(&mut polygons, to);
                }
                None => push(&mut polygons, to),
            },
            PathCommand::Close => {}
        });

        for poly in &mut polygons {
            let closes_on_start = poly.len() > 1 && poly[0].distance(poly[poly.len() - 1]) < 1e-9;
            if closes_on_start {
                poly.pop();
            }
        }
        polygons
    }

    /// Visit each drawing command with the current point before it.
    fn walk(&self, mut visit: impl FnMut(Point, &PathCommand)) {
        let mut current = Point::default();
        let mut start = Point::default();
        for command in &self.commands {
            visit(current, command);
            current = match *command {
                PathCommand::MoveTo(p) => {
                    start = p;
                    p
                }
                PathCommand::LineTo(p) => p,
                PathCommand::HorizontalTo(x) => Point::new(x, current.y),
                PathCommand::Arc { to, .. } | PathCommand::Quad { to, .. } => to,
                PathCommand::Close => start,
            };
        }
    }
}

// ---------------------------------------------------------------------------
// SVG serialization
// ---------------------------------------------------------------------------

/// Shortest decimal form with at most three fractional digits.
struct Num(f64);

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = (self.0 * 1000.0).round() / 1000.0;
        // Avoid "-0".
        let rounded = if rounded == 0.0 { 0.0 } else { rounded };
        let text = format!("{rounded:.3}");
        let text = text.trim_end_matches('0').trim_end_matches('.');
        f.write_str(text)
    }
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::MoveTo(p) => write!(f, "M {},{}", Num(p.x), Num(p.y)),
            Self::LineTo(p) => write!(f, "L {},{}", Num(p.x), Num(p.y)),
            Self::HorizontalTo(x) => write!(f, "H {}", Num(x)),
            Self::Arc {
                radius_x,
                radius_y,
                large_arc,
                sweep,
                to,
            } => write!(
                f,
                "A {},{} 0 {} {} {},{}",
                Num(radius_x),
                Num(radius_y),
                u8::from(large_arc),
                u8::from(sweep),
                Num(to.x),
                Num(to.y)
            ),
            Self::Quad { control, to } => write!(
                f,
                "Q {},{} {},{}",
                Num(control.x),
                Num(control.y),
                Num(to.x),
                Num(to.y)
            ),
            Self::Close => f.write_str("Z"),
        }
    }
}

/// Renders as SVG path data, e.g. `M 0,17 A 17,17 0 0 1 17,0 ... Z`.
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, command) in self.commands.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{command}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Curve helpers
// ---------------------------------------------------------------------------

fn quad_point(p0: Point, p1: Point, p2: Point, s: f64) -> Point {
    let u = 1.0 - s;
    Point::new(
        u * u * p0.x + 2.0 * u * s * p1.x + s * s * p2.x,
        u * u * p0.y + 2.0 * u * s * p1.y + s * s * p2.y,
    )
}

/// Interior parameters where the quadratic's x or y derivative vanishes.
fn quad_extrema(p0: Point, p1: Point, p2: Point) -> impl Iterator<Item = f64> {
    let axis = |a: f64, b: f64, c: f64| {
        let denom = a - 2.0 * b + c;
        if denom.abs() < 1e-12 {
            return None;
        }
        let s = (a - b) / denom;
        (s > 0.0 && s < 1.0).then_some(s)
    };
    [axis(p0.x, p1.x, p2.x), axis(p0.y, p1.y, p2.y)]
        .into_iter()
        .flatten()
}

/// Center parameterization of an axis-aligned elliptical arc.
#[derive(Debug, Clone, Copy)]
struct CenterArc {
    center: Point,
    radius_x: f64,
    radius_y: f64,
    start: f64,
    sweep: f64,
}

impl CenterArc {
    /// Endpoint-to-center conversion. `None` when the arc degenerates to a
    /// straight line (zero radius or coincident endpoints).
    fn from_endpoints(
        from: Point,
        to: Point,
        radius_x: f64,
        radius_y: f64,
        large_arc: bool,
        sweep: bool,
    ) -> Option<Self> {
        let (mut rx, mut ry) = (radius_x.abs(), radius_y.abs());
        if rx < 1e-9 || ry < 1e-9 || from.distance(to) < 1e-9 {
            return None;
        }
        let hx = (from.x - to.x) / 2.0;
        let hy = (from.y - to.y) / 2.0;

        let lambda = (hx * hx) / (rx * rx) + (hy * hy) / (ry * ry);
        if lambda > 1.0 {
            let scale = lambda.sqrt();
            rx *= scale;
            ry *= scale;
        }

        let num = rx * rx * ry * ry - rx * rx * hy * hy - ry * ry * hx * hx;
        let den = rx * rx * hy * hy + ry * ry * hx * hx;
        let sign = if large_arc != sweep { 1.0 } else { -1.0 };
        let coef = sign * (num / den).max(0.0).sqrt();
        let cxp = coef * rx * hy / ry;
        let cyp = -coef * ry * hx / rx;

        let center = Point::new(cxp + (from.x + to.x) / 2.0, cyp + (from.y + to.y) / 2.0);
        let start = ((hy - cyp) / ry).atan2((hx - cxp) / rx);
        let end = ((-hy - cyp) / ry).atan2((-hx - cxp) / rx);
        let mut delta = end - start;
        if sweep && delta < 0.0 {
            delta += TAU;
        } else if !sweep && delta > 0.0 {
            delta -= TAU;
        }

        Some(Self {
            center,
            radius_x: rx,
            radius_y: ry,
            start,
            sweep: delta,
        })
    }

    fn point_at(&self, angle: f64) -> Point {
        Point::new(
            self.center.x + self.radius_x * angle.cos(),
            self.center.y + self.radius_y * angle.sin(),
        )
    }

    /// Multiples of a quarter turn strictly inside the swept range.
    fn axis_crossings(&self) -> impl Iterator<Item = f64> {
        let (lo, hi) = if self.sweep >= 0.0 {
            (self.start, self.start + self.sweep)
        } else {
            (self.start + self.sweep, self.start)
        };
        let first = (lo / FRAC_PI_2).floor() as i64 + 1;
        (first..)
            .map(|k| k as f64 * FRAC_PI_2)
            .take_while(move |angle| *angle < hi - 1e-12)
            .take(8)
    }
}
