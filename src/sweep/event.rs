//! Sweep events, and the two orders that drive the sweep.
//!
//! Every input edge becomes two events, one for each endpoint. The "left"
//! (or start) event is the one that the sweep line meets first; while the
//! sweep line is between the two endpoints, the left event sits in the sweep
//! line's status structure and stands for the whole edge.

use std::cmp::Ordering;

use crate::{
    geom::{signed_area, Point},
    num::CheapOrderedFloat,
};

typed_vec!(
    /// The arena that owns all of the events of one sweep.
    EventVec,
    /// A handle to an event in the sweep's arena.
    ///
    /// Handles are handed out in creation order, and that order is what breaks
    /// ties between events that are otherwise indistinguishable.
    EventIdx,
    "ev"
);

/// Which of the two inputs an edge came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub enum PolygonType {
    /// The first input.
    Subject,
    /// The second input.
    Clipping,
}

/// How an edge contributes, once we know that it overlaps an edge of the
/// other polygon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub enum EdgeType {
    /// The usual case: no overlap.
    Normal,
    /// One of a pair of overlapping edges; its twin speaks for both.
    NonContributing,
    /// One of a pair of overlapping edges, where both polygons are on the
    /// same side.
    SameTransition,
    /// One of a pair of overlapping edges, where the polygons are on
    /// opposite sides.
    DifferentTransition,
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct SweepEvent {
    pub point: Point,
    /// Is `point` the left endpoint of the edge?
    pub is_start: bool,
    /// The event at the other end of the edge. This changes when the edge
    /// gets subdivided.
    pub other: EventIdx,
    pub polygon: PolygonType,
    pub edge_type: EdgeType,

    // The remaining fields are only meaningful for left events.
    /// Does this edge take a vertical ray coming from below from outside its
    /// own polygon to inside?
    pub in_out: bool,
    /// Like `in_out`, but for the closest edge of the other polygon below this one.
    pub other_in_out: bool,
    /// The closest edge below this one that's in the result.
    pub prev_in_result: Option<EventIdx>,
    pub in_result: bool,
    /// Like `in_out`, but for the output contour this edge ends up in.
    pub result_in_out: bool,
    /// During reconstruction, the position of the partner event in the
    /// sorted list of result events.
    pub position_in_result: usize,
    /// The output contour containing this edge.
    pub contour_id: Option<usize>,
}

impl SweepEvent {
    pub fn new(point: Point, is_start: bool, other: EventIdx, polygon: PolygonType) -> Self {
        SweepEvent {
            point,
            is_start,
            other,
            polygon,
            edge_type: EdgeType::Normal,
            in_out: false,
            other_in_out: true,
            prev_in_result: None,
            in_result: false,
            result_in_out: false,
            position_in_result: 0,
            contour_id: None,
        }
    }
}

impl EventVec<SweepEvent> {
    /// Adds the two events for the edge from `p0` to `p1`, returning the
    /// left one.
    ///
    /// Returns `None` (and adds nothing) if the edge has zero length.
    pub fn push_segment(&mut self, p0: Point, p1: Point, polygon: PolygonType) -> Option<EventIdx> {
        if p0 == p1 {
            return None;
        }
        let (left, right) = if p0 < p1 { (p0, p1) } else { (p1, p0) };
        let placeholder = EventIdx(self.len() + 1);
        let l = self.push(SweepEvent::new(left, true, placeholder, polygon));
        let r = self.push(SweepEvent::new(right, false, l, polygon));
        debug_assert_eq!(placeholder, r);
        Some(l)
    }

    /// The point at the other end of `e`'s edge.
    pub fn other_point(&self, e: EventIdx) -> Point {
        self[self[e].other].point
    }

    /// The left and right endpoints of `e`'s edge.
    pub fn endpoints(&self, e: EventIdx) -> [Point; 2] {
        if self[e].is_start {
            [self[e].point, self.other_point(e)]
        } else {
            [self.other_point(e), self[e].point]
        }
    }

    /// Is `e`'s edge strictly below `p`?
    pub fn below(&self, e: EventIdx, p: Point) -> bool {
        let [left, right] = self.endpoints(e);
        signed_area(left, right, p) > 0.0
    }

    /// Is `e`'s edge above (or through) `p`?
    pub fn above(&self, e: EventIdx, p: Point) -> bool {
        !self.below(e, p)
    }

    pub fn is_vertical(&self, e: EventIdx) -> bool {
        self[e].point.x == self.other_point(e).x
    }

    /// The order in which events leave the queue.
    ///
    /// Events are processed from left to right and then from bottom to top.
    /// At a single point, right events come before left events, and among
    /// events of the same kind the lower edge comes first.
    pub fn cmp_events(&self, e1: EventIdx, e2: EventIdx) -> Ordering {
        if e1 == e2 {
            return Ordering::Equal;
        }
        let (ev1, ev2) = (&self[e1], &self[e2]);

        let x1 = CheapOrderedFloat::from(ev1.point.x);
        let x2 = CheapOrderedFloat::from(ev2.point.x);
        let y1 = CheapOrderedFloat::from(ev1.point.y);
        let y2 = CheapOrderedFloat::from(ev2.point.y);
        match x1.cmp(&x2).then(y1.cmp(&y2)) {
            Ordering::Equal => {}
            ord => return ord,
        }

        if ev1.is_start != ev2.is_start {
            return if ev1.is_start {
                Ordering::Greater
            } else {
                Ordering::Less
            };
        }

        let other2 = self.other_point(e2);
        if signed_area(ev1.point, self.other_point(e1), other2) != 0.0 {
            return if self.above(e1, other2) {
                Ordering::Greater
            } else {
                Ordering::Less
            };
        }

        // Collinear, and starting at the same point.
        ev1.polygon.cmp(&ev2.polygon).then(e1.cmp(&e2))
    }

    /// The order of two active edges (given by their left events) on the
    /// sweep line, from bottom to top.
    pub fn cmp_status(&self, le1: EventIdx, le2: EventIdx) -> Ordering {
        if le1 == le2 {
            return Ordering::Equal;
        }
        let [p1, q1] = [self[le1].point, self.other_point(le1)];
        let [p2, q2] = [self[le2].point, self.other_point(le2)];

        let lower_if = |cond: bool| {
            if cond {
                Ordering::Less
            } else {
                Ordering::Greater
            }
        };

        if signed_area(p1, q1, p2) != 0.0 || signed_area(p1, q1, q2) != 0.0 {
            // Not collinear.
            if p1 == p2 {
                // Same left endpoint: use the right endpoints.
                return lower_if(self.below(le1, q2));
            }
            if p1.x == p2.x {
                return lower_if(p1.y < p2.y);
            }
            // Compare at the left endpoint of whichever edge started later. If
            // that endpoint is on the other edge, the two meet there and the
            // later edge's right endpoint says which way it leaves.
            if self.cmp_events(le1, le2) == Ordering::Greater {
                if signed_area(p2, q2, p1) == 0.0 {
                    return lower_if(signed_area(p2, q2, q1) < 0.0);
                }
                return lower_if(self.above(le2, p1));
            }
            if signed_area(p1, q1, p2) == 0.0 {
                return lower_if(signed_area(p1, q1, q2) > 0.0);
            }
            return lower_if(self.below(le1, p2));
        }

        if self[le1].polygon != self[le2].polygon {
            return lower_if(self[le1].polygon == PolygonType::Subject);
        }

        if p1 == p2 {
            le1.cmp(&le2)
        } else {
            self.cmp_events(le1, le2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn push_segment() {
        let mut events = EventVec::default();
        let l = events.push_segment(p(1.0, 1.0), p(0.0, 0.0), PolygonType::Subject).unwrap();
        let r = events[l].other;
        assert!(events[l].is_start);
        assert!(!events[r].is_start);
        assert_eq!(events[r].other, l);
        assert_eq!(events[l].point, p(0.0, 0.0));
        assert_eq!(events.endpoints(r), [p(0.0, 0.0), p(1.0, 1.0)]);

        assert!(events
            .push_segment(p(1.0, 1.0), p(1.0, 1.0), PolygonType::Subject)
            .is_none());
        assert_eq!(events.len(), 2);

        // Vertical edges start at the bottom.
        let l = events.push_segment(p(3.0, 5.0), p(3.0, 1.0), PolygonType::Clipping).unwrap();
        assert_eq!(events[l].point, p(3.0, 1.0));
        assert!(events.is_vertical(l));
    }

    #[test]
    fn event_order() {
        let mut events = EventVec::default();
        let a = events.push_segment(p(0.0, 0.0), p(2.0, 0.0), PolygonType::Subject).unwrap();
        let b = events.push_segment(p(0.0, 0.0), p(2.0, 2.0), PolygonType::Subject).unwrap();
        let c = events.push_segment(p(-1.0, 0.0), p(0.0, 0.0), PolygonType::Subject).unwrap();
        let d = events.push_segment(p(0.0, 0.0), p(1.0, 0.0), PolygonType::Clipping).unwrap();

        // Left to right.
        assert_eq!(events.cmp_events(c, a), Ordering::Less);
        // Right events before left events.
        assert_eq!(events.cmp_events(events[c].other, a), Ordering::Less);
        assert_eq!(events.cmp_events(a, events[c].other), Ordering::Greater);
        // Lower edge first.
        assert_eq!(events.cmp_events(a, b), Ordering::Less);
        assert_eq!(events.cmp_events(b, a), Ordering::Greater);
        // Collinear: subject first.
        assert_eq!(events.cmp_events(a, d), Ordering::Less);
        assert_eq!(events.cmp_events(d, a), Ordering::Greater);
        assert_eq!(events.cmp_events(a, a), Ordering::Equal);
    }

    #[test]
    fn status_order() {
        let mut events = EventVec::default();
        let low = events.push_segment(p(0.0, 0.0), p(4.0, 0.0), PolygonType::Subject).unwrap();
        let high = events.push_segment(p(1.0, 1.0), p(4.0, 2.0), PolygonType::Subject).unwrap();
        let fan = events.push_segment(p(0.0, 0.0), p(4.0, 4.0), PolygonType::Clipping).unwrap();
        let vert = events.push_segment(p(0.0, -1.0), p(0.0, 3.0), PolygonType::Clipping).unwrap();
        let overlap = events.push_segment(p(1.0, 0.0), p(2.0, 0.0), PolygonType::Clipping).unwrap();

        assert_eq!(events.cmp_status(low, high), Ordering::Less);
        assert_eq!(events.cmp_status(high, low), Ordering::Greater);
        assert_eq!(events.cmp_status(low, fan), Ordering::Less);
        assert_eq!(events.cmp_status(fan, low), Ordering::Greater);
        assert_eq!(events.cmp_status(vert, low), Ordering::Less);
        assert_eq!(events.cmp_status(low, overlap), Ordering::Less);
        assert_eq!(events.cmp_status(overlap, low), Ordering::Greater);
        assert_eq!(events.cmp_status(high, high), Ordering::Equal);
    }

    #[test]
    fn status_order_starting_on_an_edge() {
        let mut events = EventVec::default();
        // (-2, -3) is on this edge, two thirds of the way along.
        let edge = events.push_segment(p(-8.0, -5.0), p(1.0, -2.0), PolygonType::Subject).unwrap();
        let up = events.push_segment(p(-2.0, -3.0), p(5.0, 1.0), PolygonType::Clipping).unwrap();
        let down = events.push_segment(p(-2.0, -3.0), p(0.0, -6.0), PolygonType::Clipping).unwrap();
        let vert = events.push_segment(p(-2.0, -3.0), p(-2.0, 0.0), PolygonType::Clipping).unwrap();

        assert_eq!(events.cmp_status(up, edge), Ordering::Greater);
        assert_eq!(events.cmp_status(edge, up), Ordering::Less);
        assert_eq!(events.cmp_status(down, edge), Ordering::Less);
        assert_eq!(events.cmp_status(edge, down), Ordering::Greater);
        assert_eq!(events.cmp_status(vert, edge), Ordering::Greater);
        assert_eq!(events.cmp_status(edge, vert), Ordering::Less);
    }
}
