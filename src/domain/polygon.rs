use geo::{Coord, LineString};

/// A vertex in domain coordinates
pub type Point = Coord<f64>;

/// A grain outline: a closed, clockwise exterior ring with no holes.
///
/// An outline with zero vertices means "no shape produced". It is never a
/// zero-area grain: renderers, exporters and the acceptance test skip it.
pub type Polygon = geo::Polygon<f64>;

/// Accepted grains in acceptance order
pub type PolygonSet = Vec<Polygon>;

/// Create the empty outline
pub fn empty_polygon() -> Polygon {
    Polygon::new(LineString::new(Vec::new()), Vec::new())
}

pub fn is_empty(polygon: &Polygon) -> bool {
    polygon.exterior().0.is_empty()
}

/// Iterate over the polygons that actually carry a shape
pub fn non_empty(polygons: &[Polygon]) -> impl Iterator<Item = &Polygon> {
    polygons.iter().filter(|p| !is_empty(p))
}

/// Number of distinct vertices; the repeated closing point is not counted
pub fn vertex_count(polygon: &Polygon) -> usize {
    let ring = &polygon.exterior().0;
    match ring.len() {
        n if n > 1 && ring.first() == ring.last() => n - 1,
        n => n,
    }
}

/// Check that every turn along the ring bends the same way.
///
/// Collinear runs (zero cross product) are tolerated, so degenerate
/// outlines (a point or a segment) count as convex.
pub fn is_convex(polygon: &Polygon) -> bool {
    let ring = &polygon.exterior().0;
    let n = vertex_count(polygon);
    if n < 3 {
        return true;
    }

    let mut sign = 0.0_f64;
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        let c = ring[(i + 2) % n];
        let cross = (b.x - a.x) * (c.y - b.y) - (b.y - a.y) * (c.x - b.x);
        if cross.abs() < 1e-12 {
            continue;
        }
        if sign == 0.0 {
            sign = cross.signum();
        } else if cross.signum() != sign {
            return false;
        }
    }
    true
}
