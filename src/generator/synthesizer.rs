//! Single-grain construction: random point cloud reduced to its convex hull.

use geo::LineString;

use crate::domain::{Point, Polygon, empty_polygon};
use crate::geometry::GeometryKernel;
use crate::random::UniformSource;

/// Draw a random convex grain inside the rectangle `rect_min`-`rect_max`.
///
/// Samples `min_points + floor(u * (max_points - min_points))` points, each
/// coordinate at `u * (rect_max - rect_min) * spread + rect_min` with x drawn
/// before y, and returns their normalized convex hull. A `spread` below 1
/// keeps the cloud in the lower-left part of the rectangle.
///
/// The result may have fewer vertices than sampled points, may collapse to a
/// segment or a point for degenerate rectangles, and is empty when no points
/// are drawn.
pub fn synthesize<K, S>(
    kernel: &K,
    source: &mut S,
    rect_min: Point,
    rect_max: Point,
    min_points: usize,
    max_points: usize,
    spread: f64,
) -> Polygon
where
    K: GeometryKernel,
    S: UniformSource + ?Sized,
{
    let range = max_points.saturating_sub(min_points);
    let count = min_points + (source.next_uniform() * range as f64) as usize;
    if count == 0 {
        return empty_polygon();
    }

    let extent = rect_max - rect_min;
    let cloud: Vec<Point> = (0..count)
        .map(|_| {
            let x = source.next_uniform() * extent.x * spread + rect_min.x;
            let y = source.next_uniform() * extent.y * spread + rect_min.y;
            Point { x, y }
        })
        .collect();

    let raw = kernel.normalize(Polygon::new(LineString::new(cloud), Vec::new()));
    kernel.normalize(kernel.convex_hull(&raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{is_convex, is_empty, vertex_count};
    use crate::generator::testing::ScriptedSource;
    use crate::geometry::GeoKernel;
    use crate::random::Sampler;
    use geo::coord;

    #[test]
    fn test_hull_drops_interior_point() {
        // count draw, then five (x, y) pairs; the last one is interior
        let mut source = ScriptedSource::new(vec![
            0.5, 0.1, 0.1, 0.9, 0.1, 0.9, 0.9, 0.1, 0.9, 0.5, 0.5,
        ]);
        let polygon = synthesize(
            &GeoKernel,
            &mut source,
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 10.0, y: 10.0 },
            4,
            6,
            1.0,
        );

        assert_eq!(source.drawn(), 11);
        assert_eq!(vertex_count(&polygon), 4);
        assert!(is_convex(&polygon));
        let ring = &polygon.exterior().0;
        assert_eq!(ring.first(), ring.last());
    }

    #[test]
    fn test_points_stay_inside_rectangle() {
        let mut sampler = Sampler::seeded(11);
        let min = coord! { x: 20.0, y: 30.0 };
        let max = coord! { x: 25.0, y: 32.0 };

        for _ in 0..200 {
            let polygon = synthesize(&GeoKernel, &mut sampler, min, max, 5, 12, 1.0);
            assert!(vertex_count(&polygon) <= 12);
            assert!(is_convex(&polygon));
            for c in &polygon.exterior().0 {
                assert!((min.x..=max.x).contains(&c.x));
                assert!((min.y..=max.y).contains(&c.y));
            }
        }
    }

    #[test]
    fn test_spread_shrinks_cloud() {
        let mut sampler = Sampler::seeded(5);
        let min = coord! { x: 0.0, y: 0.0 };
        let max = coord! { x: 10.0, y: 10.0 };

        for _ in 0..50 {
            let polygon = synthesize(&GeoKernel, &mut sampler, min, max, 4, 8, 0.5);
            for c in &polygon.exterior().0 {
                assert!(c.x <= 5.0 && c.y <= 5.0);
            }
        }
    }

    #[test]
    fn test_zero_points_gives_empty() {
        let mut source = ScriptedSource::new(vec![0.7]);
        let polygon = synthesize(
            &GeoKernel,
            &mut source,
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 1.0, y: 1.0 },
            0,
            0,
            1.0,
        );
        assert!(is_empty(&polygon));
        assert_eq!(source.drawn(), 1);
    }

    #[test]
    fn test_degenerate_rectangle_collapses() {
        let mut sampler = Sampler::seeded(3);
        let polygon = synthesize(
            &GeoKernel,
            &mut sampler,
            coord! { x: 10.0, y: 0.0 },
            coord! { x: 10.0, y: 5.0 },
            4,
            8,
            1.0,
        );

        assert!(vertex_count(&polygon) <= 2);
        assert!(polygon.exterior().0.iter().all(|c| c.x == 10.0));
    }
}
