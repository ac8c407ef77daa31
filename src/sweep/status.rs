//! The sweep-line status: the edges currently crossing the sweep line,
//! ordered from bottom to top.

use std::cmp::Ordering;

use crate::chunked::ChunkedVec;

use super::event::{EventIdx, EventVec, SweepEvent};

/// A sequence that's kept sorted by somebody else.
///
/// The sweep-line status is ordered by a comparison that needs to look at
/// the event arena, so it can't be expressed as an `Ord` impl on the
/// elements. Instead, the status structure finds positions with
/// [`OrderedSet::partition_point`] and then inserts and removes by position.
///
/// We provide implementations for [`Vec`] (simple, and fast for small
/// inputs) and for [`ChunkedVec`] (which doesn't degrade as badly when
/// there are many edges crossing the sweep line at once).
pub trait OrderedSet<T>: Default {
    /// The number of elements.
    fn len(&self) -> usize;

    /// Are we empty?
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The element at `index`, if there is one.
    fn get(&self, index: usize) -> Option<&T>;

    /// Inserts `value` at `index`, shifting everything after it.
    fn insert(&mut self, index: usize, value: T);

    /// Removes the element at `index`, shifting everything after it.
    fn remove(&mut self, index: usize) -> T;

    /// The index of the first element for which `pred` returns false,
    /// assuming that `pred` is true on a prefix and false on the rest.
    fn partition_point<P: FnMut(&T) -> bool>(&self, pred: P) -> usize;
}

impl<T> OrderedSet<T> for Vec<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    fn insert(&mut self, index: usize, value: T) {
        Vec::insert(self, index, value)
    }

    fn remove(&mut self, index: usize) -> T {
        Vec::remove(self, index)
    }

    fn partition_point<P: FnMut(&T) -> bool>(&self, pred: P) -> usize {
        self.as_slice().partition_point(pred)
    }
}

impl<T, const B: usize> OrderedSet<T> for ChunkedVec<T, B> {
    fn len(&self) -> usize {
        ChunkedVec::len(self)
    }

    fn get(&self, index: usize) -> Option<&T> {
        ChunkedVec::get(self, index)
    }

    fn insert(&mut self, index: usize, value: T) {
        ChunkedVec::insert(self, index, value)
    }

    fn remove(&mut self, index: usize) -> T {
        ChunkedVec::remove(self, index)
    }

    fn partition_point<P: FnMut(&T) -> bool>(&self, pred: P) -> usize {
        ChunkedVec::partition_point(self, pred)
    }
}

/// The left events of the active edges, ordered by [`EventVec::cmp_status`].
#[derive(Clone, Debug, Default)]
pub struct Status<S> {
    set: S,
}

impl<S: OrderedSet<EventIdx>> Status<S> {
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.set.len()
    }

    /// Inserts a left event, returning its position.
    pub fn insert(&mut self, events: &EventVec<SweepEvent>, e: EventIdx) -> usize {
        let pos = self
            .set
            .partition_point(|&x| events.cmp_status(x, e) == Ordering::Less);
        self.set.insert(pos, e);
        pos
    }

    /// Finds the position of a left event that's already in here.
    ///
    /// Usually a binary search finds it, but floating-point trouble can make
    /// the order slightly inconsistent; in that case we fall back to a linear
    /// scan.
    pub fn position(&self, events: &EventVec<SweepEvent>, e: EventIdx) -> Option<usize> {
        let pos = self
            .set
            .partition_point(|&x| events.cmp_status(x, e) == Ordering::Less);
        if self.set.get(pos) == Some(&e) {
            return Some(pos);
        }
        (0..self.set.len()).find(|&i| self.set.get(i) == Some(&e))
    }

    pub fn get(&self, pos: usize) -> Option<EventIdx> {
        self.set.get(pos).copied()
    }

    /// The edge just below the one at `pos`.
    pub fn prev(&self, pos: usize) -> Option<EventIdx> {
        pos.checked_sub(1).and_then(|p| self.get(p))
    }

    /// The edge just above the one at `pos`.
    pub fn next(&self, pos: usize) -> Option<EventIdx> {
        self.get(pos + 1)
    }

    pub fn remove(&mut self, pos: usize) -> EventIdx {
        self.set.remove(pos)
    }

    /// Checks that the status is sorted.
    ///
    /// This is quadratic-ish and only useful for debugging.
    #[cfg(any(test, feature = "slow-asserts"))]
    pub fn check_invariants(&self, events: &EventVec<SweepEvent>) {
        for i in 1..self.set.len() {
            if let (Some(a), Some(b)) = (self.get(i - 1), self.get(i)) {
                assert!(events[a].is_start, "{a:?} is a right event");
                assert_eq!(
                    events.cmp_status(a, b),
                    Ordering::Less,
                    "status out of order at {i}: {a:?} {b:?}"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{sweep::PolygonType, Point};

    fn stack<S: OrderedSet<EventIdx>>() {
        let mut events = EventVec::default();
        let mut status = Status::<S>::default();

        // Horizontal edges at heights 0, 1, ..., 9, inserted out of order.
        let mut lefts = Vec::new();
        for y in [5, 2, 8, 0, 9, 1, 7, 3, 6, 4] {
            let y = f64::from(y);
            let l = events
                .push_segment(Point::new(0.0, y), Point::new(1.0, y), PolygonType::Subject)
                .unwrap();
            status.insert(&events, l);
            lefts.push((y, l));
        }
        status.check_invariants(&events);
        assert_eq!(status.len(), 10);

        lefts.sort_by(|a, b| a.0.total_cmp(&b.0));
        for (i, &(_, l)) in lefts.iter().enumerate() {
            assert_eq!(status.position(&events, l), Some(i));
        }
        assert_eq!(status.prev(0), None);
        assert_eq!(status.next(9), None);
        assert_eq!(status.next(3), Some(lefts[4].1));

        let removed = status.remove(5);
        assert_eq!(removed, lefts[5].1);
        assert_eq!(status.position(&events, removed), None);
        assert_eq!(status.prev(5), Some(lefts[4].1));
        status.check_invariants(&events);
    }

    #[test]
    fn vec_status() {
        stack::<Vec<EventIdx>>();
    }

    #[test]
    fn chunked_status() {
        stack::<ChunkedVec<EventIdx, 4>>();
    }
}
