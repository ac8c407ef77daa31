//! Utilities for generating examples, benchmarks, and test cases.

use crate::{Contour, ContourPolygon, Point};

/// Generate a bunch of squares, arranged in a grid.
///
/// The bottom-left of the first square is at (x0, y0). Each square has size
/// `size x size`, and the distance between squares (both horizontally and
/// vertically) is `offset`.
///
/// If `slant` is non-zero, generates parallelograms instead of squares: the
/// right-hand side of each square gets translated up by `slant`.
fn squares((x0, y0): (f64, f64), size: f64, offset: f64, slant: f64, count: usize) -> ContourPolygon {
    let mut ret = ContourPolygon::new();
    for i in 0..count {
        let x = x0 + i as f64 * offset;
        for j in 0..count {
            let y = y0 + j as f64 * offset;
            ret.push(Contour::new([
                Point::new(x, y),
                Point::new(x + size, y + slant),
                Point::new(x + size, y + size + slant),
                Point::new(x, y + size),
            ]));
        }
    }
    ret
}

/// Generate an `n` by `n` checkerboard-like pattern with overlapping squares.
/// For `n = 3`, it looks like:
///
/// ```text
/// +----+ +----+ +----+
/// |    | |    | |    |
/// |  +-+-+-++-+-+-+  |
/// +--+-+ +-++-+ +-+--+
/// +--+-+ +-++-+ +-+--+
/// |  +-+-+-++-+-+-+  |
/// |  +-+-+-++-+-+-+  |
/// +--+-+ +-++-+ +-+--+
/// +--+-+ +-++-+ +-+--+
/// |  +-+-+-++-+-+-+  |
/// |    | |    | |    |
/// +----+ +----+ +----+
/// ```
///
/// We return the pattern in two parts: the outer collection of `n x n`
/// non-overlapping squares, and the inner collection of `(n - 1) x (n - 1)`
/// non-overlapping squares.
pub fn checkerboard(n: usize) -> (ContourPolygon, ContourPolygon) {
    (
        squares((0.0, 0.0), 30.0, 40.0, 0.0, n),
        squares((20.0, 20.0), 30.0, 40.0, 0.0, n.saturating_sub(1)),
    )
}

/// Like `checkerboard`, but with no exactly-horizontal lines.
///
/// Horizontal lines get special treatment in the event order, so their
/// presence or absence can affect performance.
pub fn slanted_checkerboard(n: usize) -> (ContourPolygon, ContourPolygon) {
    (
        squares((0.0, 0.0), 30.0, 40.0, 1.0, n),
        squares((20.0, 20.0), 30.0, 40.0, 1.0, n.saturating_sub(1)),
    )
}

/// The "evens" are a bunch of long, skinny parallelograms going from bottom-left
/// to top-right. The "odds" go from bottom-right to top-left, so that every
/// even crosses every odd.
pub fn slanties(n: usize) -> (ContourPolygon, ContourPolygon) {
    let h = 20.0 * n as f64;

    let mut even = ContourPolygon::new();
    let mut odd = ContourPolygon::new();
    for i in 0..n {
        let x_off = 20.0 * i as f64;
        even.push(Contour::new([
            Point::new(x_off, 0.0),
            Point::new(x_off + 10.0, 0.0),
            Point::new(x_off + h + 10.0, h),
            Point::new(x_off + h, h),
        ]));

        odd.push(Contour::new([
            Point::new(x_off + h, 0.0),
            Point::new(x_off + h + 10.0, 0.0),
            Point::new(x_off + 10.0, h),
            Point::new(x_off, h),
        ]));
    }

    (even, odd)
}

/// `n` concentric squares, alternating between outer boundaries and holes.
///
/// The squares have side lengths `4n, 4n - 4, ..., 4` and share a common
/// center, so this is a "target" with `n` nesting levels.
pub fn nested_squares(n: usize) -> ContourPolygon {
    let mut ret = ContourPolygon::new();
    let mut parent = None;
    for level in 0..n {
        let lo = 2.0 * level as f64;
        let hi = 4.0 * n as f64 - lo;
        let mut contour = Contour::new([(lo, lo), (hi, lo), (hi, hi), (lo, hi)]);
        if level % 2 == 1 {
            contour.reverse();
        }
        contour.external = level == 0;
        let idx = ret.push(contour);
        if let Some(parent) = parent {
            ret[parent].holes.push(idx);
        }
        parent = Some(idx);
    }
    ret
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkerboard_shape() {
        let (outer, inner) = checkerboard(3);
        assert_eq!(outer.contour_count(), 9);
        assert_eq!(inner.contour_count(), 4);
        assert_eq!(outer.area(), 9.0 * 900.0);
        assert!(outer.contours.iter().all(Contour::is_counter_clockwise));
    }

    #[test]
    fn nested() {
        let target = nested_squares(3);
        assert_eq!(target.contour_count(), 3);
        // 12x12, minus 8x8, plus 4x4.
        assert_eq!(target.area(), 144.0 - 64.0 + 16.0);
        assert_eq!(target.grouped().len(), 1);
    }
}
