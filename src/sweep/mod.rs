//! The sweep-line implementation.
//!
//! The main entry point is [`BooleanOp`], which sweeps a vertical line from
//! left to right across both inputs. Whenever two edges become neighbors on
//! the sweep line we check whether they intersect, and if they do we split
//! them so that by the time the sweep is done no two edges cross. Along the
//! way, every edge learns whether it's inside the other polygon, which (with
//! the operation) decides whether it's part of the result. Finally, the
//! surviving edges get stitched back together into contours.
//!
//! This is the algorithm of Martínez, Rueda and Feito, "A simple algorithm
//! for Boolean operations on polygons" (2013).

mod connect;
mod engine;
mod event;
mod queue;
mod status;

pub use engine::{BooleanOp, DefaultStatus};
pub use event::{EventIdx, PolygonType};
pub use status::OrderedSet;
