//! The main sweep: event processing, field computation and subdivision.

use arrayvec::ArrayVec;
use kurbo::Rect;

use crate::{
    chunked::ChunkedVec,
    contour::ContourPolygon,
    geom::{intersect_segments, Point},
    BinaryOp, Error,
};

use super::{
    connect::connect_edges,
    event::{EdgeType, EventIdx, EventVec, PolygonType, SweepEvent},
    queue::EventQueue,
    status::{OrderedSet, Status},
};

/// The default status structure.
pub type DefaultStatus = ChunkedVec<EventIdx, 32>;

/// What [`BooleanOp::possible_intersection`] did to a pair of neighboring edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Intersection {
    /// They don't meet, or they only share an endpoint.
    None,
    /// They crossed, and were subdivided at the crossing point.
    Point,
    /// They overlap and share their left endpoint. One of them became
    /// non-contributing, which changes the fields of its neighbors.
    SharedLeft,
    /// They overlap, and were subdivided so that the overlap is carved out.
    Overlap,
}

/// A single boolean operation between two polygons.
///
/// This holds all of the state of one sweep. You'll usually want the
/// [`boolean_op`](crate::boolean_op) function instead, but this lets you
/// choose the status structure:
///
/// ```
/// use polyclip_sweep::{sweep::BooleanOp, BinaryOp, ContourPolygon};
///
/// let a = ContourPolygon::from_simple([(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]);
/// let b = ContourPolygon::from_simple([(1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0)]);
/// let union = BooleanOp::new(&a, &b, BinaryOp::Union)
///     .with_status::<Vec<_>>()
///     .run()
///     .unwrap();
/// assert_eq!(union.area(), 7.0);
/// ```
#[derive(Debug)]
pub struct BooleanOp<'a, S = DefaultStatus> {
    subject: &'a ContourPolygon,
    clipping: &'a ContourPolygon,
    op: BinaryOp,
    events: EventVec<SweepEvent>,
    queue: EventQueue,
    status: Status<S>,
    // Every event we've taken from the queue, in order.
    result_events: Vec<EventIdx>,
}

impl<'a> BooleanOp<'a> {
    /// Prepares to compute `op` between `subject` and `clipping`.
    pub fn new(subject: &'a ContourPolygon, clipping: &'a ContourPolygon, op: BinaryOp) -> Self {
        // Two events per edge, before subdivision.
        let capacity = 2 * (subject.vertex_count() + clipping.vertex_count());
        BooleanOp {
            subject,
            clipping,
            op,
            events: EventVec::with_capacity(capacity),
            queue: EventQueue::with_capacity(capacity),
            status: Status::default(),
            result_events: Vec::new(),
        }
    }
}

impl<'a, S: OrderedSet<EventIdx>> BooleanOp<'a, S> {
    /// Switches to a different status structure.
    pub fn with_status<T: OrderedSet<EventIdx>>(self) -> BooleanOp<'a, T> {
        BooleanOp {
            subject: self.subject,
            clipping: self.clipping,
            op: self.op,
            events: self.events,
            queue: self.queue,
            status: Status::default(),
            result_events: self.result_events,
        }
    }

    /// Runs the sweep, and returns the result.
    ///
    /// Fails if any input coordinate is NaN or infinite, or if two edges of
    /// the same input overlap one another.
    pub fn run(mut self) -> Result<ContourPolygon, Error> {
        check_finite(self.subject)?;
        check_finite(self.clipping)?;

        let (subject_bbox, clipping_bbox) =
            match (self.subject.bounding_box(), self.clipping.bounding_box()) {
                (Some(s), Some(c)) if overlaps(&s, &c) => (s, c),
                _ => return Ok(self.trivial_result()),
            };

        self.create_events();
        tracing::debug!(
            op = ?self.op,
            events = self.events.len(),
            "starting sweep"
        );

        let right_bound = subject_bbox.x1.min(clipping_bbox.x1);
        while let Some(e) = self.queue.pop(&self.events) {
            self.result_events.push(e);

            let x = self.events[e].point.x;
            let past_the_end = match self.op {
                BinaryOp::Intersection => x > right_bound,
                BinaryOp::Difference => x > subject_bbox.x1,
                BinaryOp::Union | BinaryOp::Xor => false,
            };
            if past_the_end {
                tracing::debug!(x, remaining = self.queue.len(), "nothing more to find");
                self.queue.clear();
                break;
            }

            tracing::trace!(?e, event = ?self.events[e], "processing");
            if self.events[e].is_start {
                self.handle_left(e)?;
            } else {
                self.handle_right(e)?;
            }

            #[cfg(feature = "slow-asserts")]
            self.check_invariants();
        }

        tracing::debug!(
            events = self.events.len(),
            processed = self.result_events.len(),
            "sweep finished"
        );
        Ok(connect_edges(&mut self.events, &self.result_events))
    }

    /// The result when one of the inputs is empty, or when they're too far
    /// apart to interact.
    fn trivial_result(&self) -> ContourPolygon {
        let either_empty = self.subject.is_empty() || self.clipping.is_empty();
        tracing::debug!(op = ?self.op, either_empty, "trivial result");

        match self.op {
            BinaryOp::Intersection => ContourPolygon::new(),
            BinaryOp::Difference => self.subject.clone(),
            BinaryOp::Union | BinaryOp::Xor => {
                let mut ret = self.subject.clone();
                ret.join(self.clipping);
                ret
            }
        }
    }

    fn create_events(&mut self) {
        let inputs = [
            (self.subject, PolygonType::Subject),
            (self.clipping, PolygonType::Clipping),
        ];
        for (poly, polygon_type) in inputs {
            for contour in &poly.contours {
                for (p0, p1) in contour.segments() {
                    if let Some(l) = self.events.push_segment(p0, p1, polygon_type) {
                        self.queue.push(&self.events, l);
                        self.queue.push(&self.events, self.events[l].other);
                    }
                }
            }
        }
    }

    fn handle_left(&mut self, e: EventIdx) -> Result<(), Error> {
        let pos = self.status.insert(&self.events, e);
        let prev = self.status.prev(pos);
        let next = self.status.next(pos);

        self.compute_fields(e, prev);

        if let Some(next) = next {
            if self.possible_intersection(e, next)? == Intersection::SharedLeft {
                self.compute_fields(e, prev);
                self.compute_fields(next, Some(e));
            }
        }

        if let Some(prev) = prev {
            if self.possible_intersection(prev, e)? == Intersection::SharedLeft {
                let prev_prev = self.status.prev(pos - 1);
                self.compute_fields(prev, prev_prev);
                self.compute_fields(e, Some(prev));
            }
        }
        Ok(())
    }

    fn handle_right(&mut self, e: EventIdx) -> Result<(), Error> {
        let left = self.events[e].other;
        let Some(pos) = self.status.position(&self.events, left) else {
            debug_assert!(false, "{left:?} is missing from the status");
            tracing::warn!(?left, "ending an edge that never started");
            return Ok(());
        };
        let prev = self.status.prev(pos);
        let next = self.status.next(pos);
        self.status.remove(pos);

        if let (Some(prev), Some(next)) = (prev, next) {
            self.possible_intersection(prev, next)?;
        }
        Ok(())
    }

    /// Fills in `in_out`, `other_in_out`, `prev_in_result` and `in_result`
    /// for the left event `e`, whose neighbor below on the sweep line is `prev`.
    fn compute_fields(&mut self, e: EventIdx, prev: Option<EventIdx>) {
        let polygon = self.events[e].polygon;
        let (in_out, other_in_out, prev_in_result) = match prev {
            None => (false, true, None),
            Some(prev) => {
                let p = &self.events[prev];
                let (in_out, other_in_out) = if p.polygon == polygon {
                    (!p.in_out, p.other_in_out)
                } else {
                    let vertical = self.events.is_vertical(prev);
                    (!p.other_in_out, if vertical { !p.in_out } else { p.in_out })
                };
                let prev_in_result = if self.in_result(prev) && !self.events.is_vertical(prev) {
                    Some(prev)
                } else {
                    p.prev_in_result
                };
                (in_out, other_in_out, prev_in_result)
            }
        };

        let ev = &mut self.events[e];
        ev.in_out = in_out;
        ev.other_in_out = other_in_out;
        ev.prev_in_result = prev_in_result;
        self.events[e].in_result = self.in_result(e);
    }

    /// Does the edge of the left event `e` belong in the output?
    fn in_result(&self, e: EventIdx) -> bool {
        let ev = &self.events[e];
        match ev.edge_type {
            EdgeType::Normal => match self.op {
                BinaryOp::Intersection => !ev.other_in_out,
                BinaryOp::Union => ev.other_in_out,
                BinaryOp::Difference => match ev.polygon {
                    PolygonType::Subject => ev.other_in_out,
                    PolygonType::Clipping => !ev.other_in_out,
                },
                BinaryOp::Xor => true,
            },
            EdgeType::SameTransition => {
                matches!(self.op, BinaryOp::Intersection | BinaryOp::Union)
            }
            EdgeType::DifferentTransition => self.op == BinaryOp::Difference,
            EdgeType::NonContributing => false,
        }
    }

    /// Checks whether the edges of the left events `e1` and `e2` (with `e1`
    /// just below `e2` on the sweep line) meet, and if so subdivides them so
    /// that they only meet at endpoints.
    fn possible_intersection(
        &mut self,
        e1: EventIdx,
        e2: EventIdx,
    ) -> Result<Intersection, Error> {
        let [a1, a2] = self.events.endpoints(e1);
        let [b1, b2] = self.events.endpoints(e2);
        let pts = intersect_segments(a1, a2, b1, b2);

        match pts.as_slice() {
            [] => return Ok(Intersection::None),
            [_] if a1 == b1 || a2 == b2 => return Ok(Intersection::None),
            &[p] => {
                if p != a1 && p != a2 {
                    self.divide_segment(e1, p);
                }
                if p != b1 && p != b2 {
                    self.divide_segment(e2, p);
                }
                return Ok(Intersection::Point);
            }
            _ => {}
        }

        let polygon = self.events[e1].polygon;
        if polygon == self.events[e2].polygon {
            return Err(Error::OverlappingEdges {
                polygon,
                first: [a1, a2],
                second: [b1, b2],
            });
        }

        // The edges overlap. Collect the endpoints in sweep order, skipping
        // the ones that coincide.
        let mut sorted = ArrayVec::<EventIdx, 4>::new();
        let left_equal = a1 == b1;
        let right_equal = a2 == b2;
        let ordered = |events: &EventVec<SweepEvent>, x: EventIdx, y: EventIdx| {
            if events.cmp_events(x, y).is_gt() {
                [y, x]
            } else {
                [x, y]
            }
        };
        if !left_equal {
            sorted.extend(ordered(&self.events, e1, e2));
        }
        if !right_equal {
            let (r1, r2) = (self.events[e1].other, self.events[e2].other);
            sorted.extend(ordered(&self.events, r1, r2));
        }

        if left_equal {
            // The upper edge of the two speaks for both.
            let same = self.events[e1].in_out == self.events[e2].in_out;
            self.events[e2].edge_type = EdgeType::NonContributing;
            self.events[e1].edge_type = if same {
                EdgeType::SameTransition
            } else {
                EdgeType::DifferentTransition
            };
            if !right_equal {
                // Cut the longer one where the shorter one ends.
                let longer = self.events[sorted[1]].other;
                let at = self.events[sorted[0]].point;
                self.divide_segment(longer, at);
            }
            return Ok(Intersection::SharedLeft);
        }

        let second = self.events[sorted[1]].point;
        if right_equal {
            self.divide_segment(sorted[0], second);
            return Ok(Intersection::Overlap);
        }

        let third = self.events[sorted[2]].point;
        if sorted[0] != self.events[sorted[3]].other {
            // Partial overlap.
            self.divide_segment(sorted[0], second);
            self.divide_segment(sorted[1], third);
        } else {
            // One contains the other.
            self.divide_segment(sorted[0], second);
            let outer_tail = self.events[sorted[3]].other;
            self.divide_segment(outer_tail, third);
        }
        Ok(Intersection::Overlap)
    }

    /// Splits the edge of the left event `e` in two at `p`.
    fn divide_segment(&mut self, e: EventIdx, p: Point) {
        let other = self.events[e].other;
        let polygon = self.events[e].polygon;

        // The right end of the first half, and the left end of the second.
        let r = self.events.push(SweepEvent::new(p, false, e, polygon));
        let l = self.events.push(SweepEvent::new(p, true, other, polygon));

        // Rounding can put `p` past the original right endpoint, in which
        // case the second half is backwards.
        if self.events.cmp_events(l, other).is_gt() {
            self.events[other].is_start = true;
            self.events[l].is_start = false;
        }

        self.events[other].other = l;
        self.events[e].other = r;
        tracing::trace!(?e, ?p, ?l, ?r, "subdivided");

        self.queue.push(&self.events, l);
        self.queue.push(&self.events, r);
    }

    #[cfg(feature = "slow-asserts")]
    fn check_invariants(&self) {
        for (idx, ev) in self.events.iter() {
            assert_eq!(self.events[ev.other].other, idx, "broken partner link at {idx:?}");
        }
        self.status.check_invariants(&self.events);
    }
}

fn check_finite(poly: &ContourPolygon) -> Result<(), Error> {
    for p in poly.points() {
        if p.x.is_nan() || p.y.is_nan() {
            return Err(Error::NaN);
        }
        if !p.is_finite() {
            return Err(Error::Infinity);
        }
    }
    Ok(())
}

// Closed rectangles: boxes that only touch still count, so that edges they
// share get merged.
fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn square(x0: f64, y0: f64, size: f64) -> ContourPolygon {
        ContourPolygon::from_simple([
            (x0, y0),
            (x0 + size, y0),
            (x0 + size, y0 + size),
            (x0, y0 + size),
        ])
    }

    #[test]
    fn trivial_results() {
        let a = square(0.0, 0.0, 1.0);
        let b = square(5.0, 5.0, 1.0);
        let empty = ContourPolygon::new();

        let run = |x, y, op| BooleanOp::new(x, y, op).run().unwrap();
        assert_eq!(run(&a, &b, BinaryOp::Intersection), empty);
        assert_eq!(run(&a, &b, BinaryOp::Difference), a);
        assert_eq!(run(&a, &b, BinaryOp::Union).contour_count(), 2);
        assert_eq!(run(&a, &b, BinaryOp::Xor).area(), 2.0);
        assert_eq!(run(&empty, &b, BinaryOp::Union), b);
        assert_eq!(run(&a, &empty, BinaryOp::Xor), a);
        assert_eq!(run(&empty, &b, BinaryOp::Difference), empty);
    }

    #[test]
    fn bad_input() {
        let a = square(0.0, 0.0, 1.0);
        let nan = ContourPolygon::from_simple([(0.0, 0.0), (f64::NAN, 1.0), (1.0, 1.0)]);
        let inf = ContourPolygon::from_simple([(0.0, 0.0), (f64::INFINITY, 1.0), (1.0, 1.0)]);
        assert_matches!(
            BooleanOp::new(&a, &nan, BinaryOp::Union).run(),
            Err(Error::NaN)
        );
        assert_matches!(
            BooleanOp::new(&inf, &a, BinaryOp::Union).run(),
            Err(Error::Infinity)
        );
    }

    #[test]
    fn self_overlap() {
        // The second contour runs along the bottom edge of the first.
        let mut a = square(0.0, 0.0, 4.0);
        a.join(&square(1.0, 0.0, 1.0));
        let b = square(2.0, -1.0, 4.0);
        assert_matches!(
            BooleanOp::new(&a, &b, BinaryOp::Union).run(),
            Err(Error::OverlappingEdges {
                polygon: PolygonType::Subject,
                ..
            })
        );
    }

    #[test]
    fn status_choice_agrees() {
        let a = square(0.0, 0.0, 4.0);
        let b = ContourPolygon::from_simple([(2.0, -1.0), (5.0, 2.0), (2.0, 5.0), (-1.0, 2.0)]);
        for op in [
            BinaryOp::Union,
            BinaryOp::Intersection,
            BinaryOp::Difference,
            BinaryOp::Xor,
        ] {
            let chunked = BooleanOp::new(&a, &b, op).run().unwrap();
            let vec = BooleanOp::new(&a, &b, op)
                .with_status::<Vec<_>>()
                .run()
                .unwrap();
            assert_eq!(chunked, vec);
        }
    }
}
