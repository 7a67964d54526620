pub mod outcome;
pub mod polygon;

pub use outcome::{PlacementOutcome, PlacementStats, RejectReason};
pub use polygon::{
    Point, Polygon, PolygonSet, empty_polygon, is_convex, is_empty, non_empty, vertex_count,
};
