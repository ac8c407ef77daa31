//! The event queue.

use super::event::{EventIdx, EventVec, SweepEvent};

/// A min-heap of events, ordered by [`EventVec::cmp_events`].
///
/// The order depends on the events' partners, which live in the arena, so
/// the heap can't just use `Ord` on its elements and every operation takes
/// the arena as an argument.
#[derive(Clone, Debug, Default)]
pub struct EventQueue {
    heap: Vec<EventIdx>,
}

impl EventQueue {
    pub fn with_capacity(cap: usize) -> Self {
        EventQueue {
            heap: Vec::with_capacity(cap),
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Throws away all the remaining events.
    pub fn clear(&mut self) {
        self.heap.clear();
    }

    fn less(events: &EventVec<SweepEvent>, a: EventIdx, b: EventIdx) -> bool {
        events.cmp_events(a, b).is_lt()
    }

    pub fn push(&mut self, events: &EventVec<SweepEvent>, e: EventIdx) {
        self.heap.push(e);
        let mut idx = self.heap.len() - 1;
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if !Self::less(events, self.heap[idx], self.heap[parent]) {
                break;
            }
            self.heap.swap(idx, parent);
            idx = parent;
        }
    }

    /// Removes and returns the first event.
    pub fn pop(&mut self, events: &EventVec<SweepEvent>) -> Option<EventIdx> {
        if self.heap.is_empty() {
            return None;
        }
        let ret = self.heap.swap_remove(0);

        let len = self.heap.len();
        let mut idx = 0;
        loop {
            let left = 2 * idx + 1;
            let right = left + 1;
            let mut smallest = idx;
            if left < len && Self::less(events, self.heap[left], self.heap[smallest]) {
                smallest = left;
            }
            if right < len && Self::less(events, self.heap[right], self.heap[smallest]) {
                smallest = right;
            }
            if smallest == idx {
                break;
            }
            self.heap.swap(idx, smallest);
            idx = smallest;
        }
        Some(ret)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::{sweep::PolygonType, Point};

    proptest! {
        #[test]
        fn pops_in_order(
            segs in proptest::collection::vec(((-10i32..10, -10i32..10), (-10i32..10, -10i32..10)), 1..30)
        ) {
            let mut events = EventVec::default();
            let mut queue = EventQueue::default();
            for ((x0, y0), (x1, y1)) in segs {
                let p0 = Point::new(x0.into(), y0.into());
                let p1 = Point::new(x1.into(), y1.into());
                if let Some(l) = events.push_segment(p0, p1, PolygonType::Subject) {
                    queue.push(&events, l);
                    queue.push(&events, events[l].other);
                }
            }
            prop_assert_eq!(queue.len(), events.len());

            let mut prev = None;
            while let Some(e) = queue.pop(&events) {
                if let Some(prev) = prev {
                    // Points come out in sweep order.
                    prop_assert!(events[prev].point <= events[e].point);
                }
                prev = Some(e);
            }
            prop_assert!(queue.is_empty());
        }
    }
}
