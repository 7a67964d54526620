//! Geometry primitives consumed by the generator.
//!
//! The generator only needs four operations: normalize, convex hull,
//! intersection and minimum distance. [`GeometryKernel`] names them so the
//! placement logic does not depend on a particular geometry library;
//! [`GeoKernel`] implements them on top of the `geo` crate.

use geo::orient::{Direction, Orient};
use geo::{ConvexHull, Distance, Euclidean, Intersects};

use crate::domain::{Polygon, empty_polygon, is_empty};

pub trait GeometryKernel {
    /// Close the exterior ring and orient it clockwise
    fn normalize(&self, polygon: Polygon) -> Polygon;

    /// Smallest convex polygon enclosing every vertex of `polygon`
    fn convex_hull(&self, polygon: &Polygon) -> Polygon;

    /// True when the polygons share any point (boundary or interior)
    fn intersects(&self, a: &Polygon, b: &Polygon) -> bool;

    /// Minimum boundary-to-boundary distance, zero when they intersect
    fn distance(&self, a: &Polygon, b: &Polygon) -> f64;
}

/// [`GeometryKernel`] backed by `geo`
#[derive(Debug, Default, Clone, Copy)]
pub struct GeoKernel;

impl GeometryKernel for GeoKernel {
    fn normalize(&self, polygon: Polygon) -> Polygon {
        if is_empty(&polygon) {
            return polygon;
        }
        // Polygon::new closes the ring; Reversed puts the exterior clockwise.
        let (exterior, interiors) = polygon.into_inner();
        Polygon::new(exterior, interiors).orient(Direction::Reversed)
    }

    fn convex_hull(&self, polygon: &Polygon) -> Polygon {
        if is_empty(polygon) {
            return empty_polygon();
        }
        polygon.convex_hull()
    }

    fn intersects(&self, a: &Polygon, b: &Polygon) -> bool {
        a.intersects(b)
    }

    fn distance(&self, a: &Polygon, b: &Polygon) -> f64 {
        Euclidean::distance(a, b)
    }
}
