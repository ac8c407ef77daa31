//! Geometric primitives, like points and segment intersections.

use arrayvec::ArrayVec;
use kurbo::Vec2;

use crate::num::CheapOrderedFloat;

/// A two-dimensional point.
///
/// Points are sorted by `x` and then by `y`, for the convenience of our sweep-line
/// algorithm (which moves in increasing `x`).
///
/// Equality is exact. Nothing in this crate compares points up to a tolerance,
/// so if you need nearby points to be identified you should round them before
/// handing them over.
#[derive(Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point {
    /// Horizontal component.
    ///
    /// Although it isn't important for functionality, the documentation and method naming
    /// assumes that larger values are to the right.
    pub x: f64,
    /// Vertical coordinate.
    ///
    /// Although it isn't important for functionality, the documentation and method naming
    /// assumes that larger values are up, so that counter-clockwise is the positive
    /// orientation.
    pub y: f64,
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (
            CheapOrderedFloat::from(self.x),
            CheapOrderedFloat::from(self.y),
        )
            .cmp(&(
                CheapOrderedFloat::from(other.x),
                CheapOrderedFloat::from(other.y),
            ))
    }
}

impl PartialOrd for Point {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Eq for Point {}

impl std::fmt::Debug for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:?}, {:?})", self.x, self.y)
    }
}

impl Point {
    /// Create a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Returns `self + t * v`.
    pub fn offset(&self, t: f64, v: Vec2) -> Self {
        Point {
            x: self.x + t * v.x,
            y: self.y + t * v.y,
        }
    }

    /// Converts to a `kurbo` point.
    pub fn to_kurbo(self) -> kurbo::Point {
        kurbo::Point::new(self.x, self.y)
    }

    /// Are both coordinates finite?
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl std::ops::Sub for Point {
    type Output = Vec2;

    fn sub(self, rhs: Point) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<kurbo::Point> for Point {
    fn from(p: kurbo::Point) -> Self {
        Self { x: p.x, y: p.y }
    }
}

/// Twice the signed area of the triangle `p0, p1, p2`.
///
/// This is positive if the points turn counter-clockwise (i.e. `p2` is to the
/// left of the line from `p0` to `p1`), negative if they turn clockwise, and
/// zero if they're collinear.
pub fn signed_area(p0: Point, p1: Point, p2: Point) -> f64 {
    (p0.x - p2.x) * (p1.y - p2.y) - (p1.x - p2.x) * (p0.y - p2.y)
}

/// Finds the intersection between the segments `a1 -- a2` and `b1 -- b2`.
///
/// Returns no points if they don't meet, one point if they cross or touch,
/// and two points (the endpoints of the common part) if they are collinear
/// and overlap along a segment of positive length.
///
/// There are no tolerances here: the classification is only as good as the
/// input coordinates. When the intersection is an endpoint of either segment,
/// we return that endpoint exactly instead of an interpolated approximation.
///
/// `a1` and `a2` must be distinct.
pub fn intersect_segments(a1: Point, a2: Point, b1: Point, b2: Point) -> ArrayVec<Point, 2> {
    let mut ret = ArrayVec::new();

    let va = a2 - a1;
    let vb = b2 - b1;
    // Difference between the two supporting points.
    let e = b1 - a1;
    let kross = va.cross(vb);

    if kross != 0.0 {
        let s = e.cross(vb) / kross;
        if !(0.0..=1.0).contains(&s) {
            return ret;
        }
        let t = e.cross(va) / kross;
        if !(0.0..=1.0).contains(&t) {
            return ret;
        }

        let p = if t == 0.0 {
            b1
        } else if t == 1.0 {
            b2
        } else if s == 0.0 {
            a1
        } else if s == 1.0 {
            a2
        } else {
            a1.offset(s, va)
        };
        ret.push(p);
        return ret;
    }

    // Parallel. If the segment between the supporting points isn't parallel
    // too, they're on different lines.
    if e.cross(va) != 0.0 {
        return ret;
    }

    // Collinear: parametrize `b` along `a`.
    let sqr_len_a = va.dot(va);
    let sa = va.dot(e) / sqr_len_a;
    let sb = va.dot(b2 - a1) / sqr_len_a;
    let (smin, bmin, smax, bmax) = if sa <= sb {
        (sa, b1, sb, b2)
    } else {
        (sb, b2, sa, b1)
    };

    if smin > 1.0 || smax < 0.0 {
        return ret;
    }

    // The overlap's ends are endpoints of the inputs, so return those rather
    // than interpolating.
    if smin == 1.0 {
        ret.push(a2);
    } else if smax == 0.0 {
        ret.push(a1);
    } else {
        ret.push(if smin > 0.0 { bmin } else { a1 });
        ret.push(if smax < 1.0 { bmax } else { a2 });
    }
    ret
}
