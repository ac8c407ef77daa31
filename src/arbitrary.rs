//! Utilities for fuzz and/or property testing using `arbitrary`.

use arbitrary::Unstructured;

use crate::{Contour, ContourPolygon, Point};

/// Generate an arbitrary float in some range.
pub fn float_in_range(
    start: f64,
    end: f64,
    u: &mut Unstructured<'_>,
) -> Result<f64, arbitrary::Error> {
    let num: u32 = u.arbitrary()?;
    let t = num as f64 / u32::MAX as f64;
    Ok((1.0 - t) * start + t * end)
}

/// Generate a float in some range, but give it a chance to be close to another float.
fn another_float_in_range(
    orig: f64,
    start: f64,
    end: f64,
    u: &mut Unstructured<'_>,
) -> Result<f64, arbitrary::Error> {
    let close: bool = u.arbitrary()?;
    if close {
        let ulps: i32 = u.int_in_range(-32..=32)?;
        let scale = 1.0f64 + ulps as f64 * f64::EPSILON;
        Ok((orig * scale).clamp(start, end))
    } else {
        float_in_range(start, end, u)
    }
}

/// Generate an arbitrary point, with coordinates of moderate size.
pub fn point(u: &mut Unstructured<'_>) -> Result<Point, arbitrary::Error> {
    Ok(Point::new(
        float_in_range(-1e3, 1e3, u)?,
        float_in_range(-1e3, 1e3, u)?,
    ))
}

/// Generate a point with integer coordinates in `[-size, size]`.
pub fn grid_point(size: i32, u: &mut Unstructured<'_>) -> Result<Point, arbitrary::Error> {
    let x = u.int_in_range(-size..=size)?;
    let y = u.int_in_range(-size..=size)?;
    Ok(Point::new(x.into(), y.into()))
}

/// Generate an axis-aligned rectangle of positive area, with integer
/// coordinates in `[-size, size]`.
pub fn rectangle(size: i32, u: &mut Unstructured<'_>) -> Result<ContourPolygon, arbitrary::Error> {
    let size = size.max(1);
    let x0 = u.int_in_range(-size..=size - 1)?;
    let y0 = u.int_in_range(-size..=size - 1)?;
    let x1 = u.int_in_range(x0 + 1..=size)?;
    let y1 = u.int_in_range(y0 + 1..=size)?;
    let (x0, y0, x1, y1) = (f64::from(x0), f64::from(y0), f64::from(x1), f64::from(y1));
    Ok(ContourPolygon::from_simple([
        (x0, y0),
        (x1, y0),
        (x1, y1),
        (x0, y1),
    ]))
}

/// Generate a simple polygon that's star-shaped around some center.
///
/// The angles between consecutive vertices (as seen from the center) are
/// all less than a half-turn, so the result is always simple. The radii
/// have a chance of being almost equal, which makes for nearly-collinear
/// edges.
pub fn star(u: &mut Unstructured<'_>) -> Result<ContourPolygon, arbitrary::Error> {
    let center = point(u)?;
    let n: usize = u.int_in_range(3..=16)?;

    let mut weights = Vec::with_capacity(n);
    for _ in 0..n {
        weights.push(float_in_range(1.0, 2.0, u)?);
    }
    let total: f64 = weights.iter().sum();

    let mut points = Vec::with_capacity(n);
    let mut angle = 0.0f64;
    let mut radius = float_in_range(1.0, 100.0, u)?;
    for w in weights {
        let (sin, cos) = angle.sin_cos();
        points.push(Point::new(center.x + radius * cos, center.y + radius * sin));
        angle += w / total * std::f64::consts::TAU;
        radius = another_float_in_range(radius, 1.0, 100.0, u)?;
    }
    Ok(ContourPolygon::from_simple(points))
}

/// Generate a polygon with a single hole: an axis-aligned rectangle with a
/// smaller rectangle cut out of its interior.
pub fn rectangle_with_hole(
    size: i32,
    u: &mut Unstructured<'_>,
) -> Result<ContourPolygon, arbitrary::Error> {
    let size = size.max(2);
    let x0 = u.int_in_range(-size..=size - 3)?;
    let y0 = u.int_in_range(-size..=size - 3)?;
    let x1 = u.int_in_range(x0 + 3..=size)?;
    let y1 = u.int_in_range(y0 + 3..=size)?;
    let hx0 = u.int_in_range(x0 + 1..=x1 - 2)?;
    let hy0 = u.int_in_range(y0 + 1..=y1 - 2)?;
    let hx1 = u.int_in_range(hx0 + 1..=x1 - 1)?;
    let hy1 = u.int_in_range(hy0 + 1..=y1 - 1)?;

    let rect = |x0: i32, y0: i32, x1: i32, y1: i32| {
        let (x0, y0, x1, y1) = (f64::from(x0), f64::from(y0), f64::from(x1), f64::from(y1));
        [(x0, y0), (x1, y0), (x1, y1), (x0, y1)]
    };
    Ok(ContourPolygon::with_holes(
        rect(x0, y0, x1, y1),
        [rect(hx0, hy0, hx1, hy1)],
    ))
}

/// Generate some kind of valid polygon.
pub fn polygon(u: &mut Unstructured<'_>) -> Result<ContourPolygon, arbitrary::Error> {
    match u.int_in_range(0..=3)? {
        0 => rectangle(16, u),
        1 => rectangle_with_hole(16, u),
        2 => star(u),
        _ => {
            // A few disjoint rectangles, side by side.
            let count: i32 = u.int_in_range(1..=4)?;
            let mut ret = ContourPolygon::new();
            for i in 0..count {
                let x = f64::from(i) * 10.0;
                let h: i32 = u.int_in_range(1..=8)?;
                let h = f64::from(h);
                ret.push(Contour::new([(x, 0.0), (x + 8.0, 0.0), (x + 8.0, h), (x, h)]));
            }
            Ok(ret)
        }
    }
}
