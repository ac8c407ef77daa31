#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

#[macro_use]
mod typed_vec;

#[cfg(any(test, feature = "arbitrary"))]
pub mod arbitrary;
mod contour;
mod geom;
pub mod num;
pub mod sweep;

#[cfg(feature = "generators")]
pub mod generators;

// pub so that we can use it in fuzz tests, but it's really private
#[doc(hidden)]
pub mod chunked;

pub use contour::{Contour, ContourIdx, ContourPolygon};
pub use geom::{intersect_segments, signed_area, Point};
pub use sweep::{BooleanOp, PolygonType};

/// Binary operations between sets.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
pub enum BinaryOp {
    /// A point is in the intersection of two sets if it is in both.
    Intersection,
    /// A point is in the union of two sets if it is in either one.
    Union,
    /// A point is in the difference of two sets if it is in the first but not the second.
    Difference,
    /// A point is in the exclusive-or of two sets if it is in one or the other, but not both.
    Xor,
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// The input was faulty.
pub enum Error {
    /// At least one of the inputs was infinite.
    Infinity,
    /// At least one of the inputs was not a number.
    NaN,
    /// Two edges of the same input overlap along a segment.
    ///
    /// Each input is supposed to be a valid polygon, whose edges only meet
    /// at vertices. We don't try to repair inputs that aren't.
    OverlappingEdges {
        /// The input that the edges belong to.
        polygon: PolygonType,
        /// The endpoints of one edge (or of the part of it that's left after
        /// subdivision).
        first: [Point; 2],
        /// The endpoints of the other edge.
        second: [Point; 2],
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Infinity => write!(f, "one of the inputs was infinite"),
            Error::NaN => write!(f, "one of the inputs had a NaN"),
            Error::OverlappingEdges {
                polygon,
                first,
                second,
            } => write!(
                f,
                "edges of the {polygon:?} polygon overlap ({:?} -- {:?} and {:?} -- {:?})",
                first[0], first[1], second[0], second[1]
            ),
        }
    }
}

impl std::error::Error for Error {}

/// Computes a boolean operation between two polygons.
///
/// The result is a polygon whose outer contours (and islands inside holes)
/// wind counter-clockwise, and whose holes wind clockwise.
///
/// ```
/// use polyclip_sweep::{boolean_op, BinaryOp, ContourPolygon};
///
/// let a = ContourPolygon::from_simple([(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]);
/// let b = ContourPolygon::from_simple([(2.0, 2.0), (6.0, 2.0), (6.0, 6.0), (2.0, 6.0)]);
///
/// assert_eq!(boolean_op(&a, &b, BinaryOp::Intersection).unwrap().area(), 4.0);
/// assert_eq!(boolean_op(&a, &b, BinaryOp::Union).unwrap().area(), 28.0);
/// ```
pub fn boolean_op(
    subject: &ContourPolygon,
    clipping: &ContourPolygon,
    op: BinaryOp,
) -> Result<ContourPolygon, Error> {
    BooleanOp::new(subject, clipping, op).run()
}

/// Computes the union of many polygons, one pair at a time.
pub fn union_all<'a>(
    polygons: impl IntoIterator<Item = &'a ContourPolygon>,
) -> Result<ContourPolygon, Error> {
    let mut acc = ContourPolygon::new();
    for poly in polygons {
        acc = boolean_op(&acc, poly, BinaryOp::Union)?;
    }
    Ok(acc)
}

#[cfg(test)]
mod tests {
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
    fn two_squares() {
        let a = square(0.0, 0.0, 1.0);
        let b = square(-0.5, -0.5, 1.0);
        let output = boolean_op(&a, &b, BinaryOp::Intersection).unwrap();

        insta::assert_snapshot!(output.tikz().trim_end(), @r"\draw (0.00, 0.00) -- (0.50, 0.00) -- (0.50, 0.50) -- (0.00, 0.50) -- cycle;");
    }

    #[test]
    fn union_of_a_row() {
        let squares: Vec<_> = (0..5).map(|i| square(f64::from(i) * 2.0, 0.0, 3.0)).collect();
        let union = union_all(&squares).unwrap();
        assert_eq!(union.contour_count(), 1);
        assert_eq!(union.area(), 33.0);
    }

    #[test]
    fn error_messages() {
        let err = Error::OverlappingEdges {
            polygon: PolygonType::Clipping,
            first: [Point::new(0.0, 0.0), Point::new(1.0, 0.0)],
            second: [Point::new(0.5, 0.0), Point::new(2.0, 0.0)],
        };
        insta::assert_snapshot!(err.to_string(), @"edges of the Clipping polygon overlap ((0.0, 0.0) -- (1.0, 0.0) and (0.5, 0.0) -- (2.0, 0.0))");
    }
}
