//! Turning the edges that made it into the result back into contours.

use std::f64::consts::TAU;

use crate::contour::{Contour, ContourIdx, ContourPolygon};

use super::event::{EventIdx, EventVec, SweepEvent};

/// Sorts by the event order, using only swaps of neighbors.
///
/// After all the subdivisions, `log` is almost sorted: only events on
/// overlapping edges can be out of place. Insertion sort is fast on that,
/// and (unlike `sort_by`) it doesn't care if rounding made the comparison
/// inconsistent.
fn sort_events(events: &EventVec<SweepEvent>, log: &mut [EventIdx]) {
    for i in 1..log.len() {
        let mut j = i;
        while j > 0 && events.cmp_events(log[j - 1], log[j]).is_gt() {
            log.swap(j - 1, j);
            j -= 1;
        }
    }
}

/// Assembles the edges that are in the result into nested, consistently
/// oriented contours.
///
/// `log` holds the processed events in the order that they left the queue.
pub(crate) fn connect_edges(events: &mut EventVec<SweepEvent>, log: &[EventIdx]) -> ContourPolygon {
    let mut result_events: Vec<EventIdx> = log
        .iter()
        .copied()
        .filter(|&e| {
            let ev = &events[e];
            if ev.is_start {
                ev.in_result
            } else {
                events[ev.other].in_result
            }
        })
        .collect();
    sort_events(events, &mut result_events);

    // Point each event at its partner's position.
    for (i, &e) in result_events.iter().enumerate() {
        events[e].position_in_result = i;
    }
    for &e in &result_events {
        if !events[e].is_start {
            let other = events[e].other;
            let tmp = events[e].position_in_result;
            events[e].position_in_result = events[other].position_in_result;
            events[other].position_in_result = tmp;
        }
    }

    let n = result_events.len();
    let mut processed = vec![false; n];
    let mut ret = ContourPolygon::new();
    // The nesting depth of each contour, and the contour it's a hole of.
    let mut depth: Vec<usize> = Vec::new();
    let mut parent: Vec<Option<ContourIdx>> = Vec::new();

    for i in 0..n {
        if processed[i] {
            continue;
        }

        let contour_id = ContourIdx(ret.contour_count());
        let mut contour = Contour::default();
        let mut contour_depth = 0;
        let mut contour_parent = None;

        // The first event of a contour is its leftmost (and then lowest)
        // vertex, so the closest result edge below it tells us whether we're
        // inside some other contour.
        let lower = events[result_events[i]]
            .prev_in_result
            .and_then(|lower| Some((lower, ContourIdx(events[lower].contour_id?))))
            .filter(|(_, lower_id)| lower_id.0 < depth.len());
        if let Some((lower, lower_id)) = lower {
            if !events[lower].result_in_out {
                // We're just above the bottom of the lower contour, so inside it.
                contour_parent = Some(lower_id);
                contour_depth = depth[lower_id.0] + 1;
            } else if !ret[lower_id].external {
                // We're just above the top of a hole, so we're inside whatever
                // that hole is inside.
                contour_parent = parent[lower_id.0];
                contour_depth = depth[lower_id.0];
            }
        }
        if let Some(p) = contour_parent {
            ret[p].holes.push(contour_id);
            contour.external = false;
        }

        let initial = events[result_events[i]].point;
        let mut pos = i;
        loop {
            processed[pos] = true;
            let e = result_events[pos];
            contour.points.push(events[e].point);

            // Record the contour on the left event of the edge, along with
            // which way we walked it.
            let left = if events[e].is_start {
                events[e].result_in_out = false;
                e
            } else {
                let other = events[e].other;
                events[other].result_in_out = true;
                other
            };
            events[left].contour_id = Some(contour_id.0);

            pos = events[e].position_in_result;
            processed[pos] = true;
            let here = events[result_events[pos]].point;
            if here == initial {
                break;
            }

            match next_pos(events, &result_events, &processed, pos) {
                Some(next) => pos = next,
                None => {
                    debug_assert!(false, "contour {contour_id:?} got stuck at {here:?}");
                    tracing::warn!(?contour_id, ?here, "failed to close a contour");
                    break;
                }
            }
        }

        if contour_depth % 2 == 1 {
            contour.reverse();
        }
        tracing::trace!(?contour_id, depth = contour_depth, len = contour.points.len(), "contour");
        ret.push(contour);
        depth.push(contour_depth);
        parent.push(contour_parent);
    }

    ret
}

/// Picks the edge to leave by, after arriving at a vertex through the event at `pos`.
///
/// The candidates are the unprocessed events at the same point. We take the
/// first one clockwise from the edge we came in on, which keeps whatever was
/// on our left still on our left. Where two contours touch at a vertex, this
/// is what keeps them apart (and each of them consistently oriented).
fn next_pos(
    events: &EventVec<SweepEvent>,
    result_events: &[EventIdx],
    processed: &[bool],
    pos: usize,
) -> Option<usize> {
    let p = events[result_events[pos]].point;
    let at_p = |&i: &usize| events[result_events[i]].point == p;
    let back = (events.other_point(result_events[pos]) - p).atan2();
    let clockwise_turn = |i: usize| {
        let out = (events.other_point(result_events[i]) - p).atan2();
        let turn = (back - out).rem_euclid(TAU);
        if turn == 0.0 {
            TAU
        } else {
            turn
        }
    };

    let forward = (pos + 1..result_events.len()).take_while(at_p);
    let backward = (0..pos).rev().take_while(at_p);
    forward
        .chain(backward)
        .filter(|&i| !processed[i])
        .min_by(|&i, &j| clockwise_turn(i).total_cmp(&clockwise_turn(j)))
}
