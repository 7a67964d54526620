//! Acceptance test: a candidate grain may join the structure only if it is
//! disjoint from every accepted grain and at least `min_distance` away.
//!
//! [`AcceptedSet`] adds a uniform grid over bounding boxes so that only
//! nearby grains reach the exact test. Grains the grid skips are provably
//! farther than `min_distance`, so the outcome always equals the linear scan
//! in [`check`].

use std::collections::HashMap;

use crate::domain::{Polygon, PolygonSet, RejectReason, is_empty};
use crate::geometry::{Bounds, GeometryKernel};

/// Exact test against `existing` grains, in the order given.
///
/// Returns the first conflict found. Empty grains on either side are never
/// measured: an empty candidate is rejected outright, empty existing grains
/// are skipped.
pub fn first_conflict<'a, K, I>(
    kernel: &K,
    existing: I,
    candidate: &Polygon,
    min_distance: f64,
) -> Option<RejectReason>
where
    K: GeometryKernel,
    I: IntoIterator<Item = (usize, &'a Polygon)>,
{
    if is_empty(candidate) {
        return Some(RejectReason::Empty);
    }

    for (index, polygon) in existing {
        if is_empty(polygon) {
            continue;
        }
        if kernel.intersects(polygon, candidate) {
            return Some(RejectReason::Intersects { index });
        }
        let distance = kernel.distance(polygon, candidate);
        if distance < min_distance {
            return Some(RejectReason::TooClose { index, distance });
        }
    }
    None
}

/// Linear acceptance test over every accepted grain in insertion order
pub fn check<K: GeometryKernel>(
    kernel: &K,
    existing: &[Polygon],
    candidate: &Polygon,
    min_distance: f64,
) -> Result<(), RejectReason> {
    match first_conflict(kernel, existing.iter().enumerate(), candidate, min_distance) {
        Some(reason) => Err(reason),
        None => Ok(()),
    }
}

pub fn accepts<K: GeometryKernel>(
    kernel: &K,
    existing: &[Polygon],
    candidate: &Polygon,
    min_distance: f64,
) -> bool {
    check(kernel, existing, candidate, min_distance).is_ok()
}

type Cell = (i64, i64);

/// Accepted grains plus a bounding-box grid for neighbour lookup
#[derive(Debug, Clone)]
pub struct AcceptedSet {
    polygons: Vec<Polygon>,
    bounds: Vec<Option<Bounds>>,
    cell_size: f64,
    grid: HashMap<Cell, Vec<usize>>,
}

impl AcceptedSet {
    /// `cell_size` should be on the order of a typical grain; non-positive
    /// or non-finite values fall back to 1.
    pub fn new(cell_size: f64) -> Self {
        let cell_size = if cell_size.is_finite() && cell_size > 0.0 {
            cell_size
        } else {
            1.0
        };
        Self {
            polygons: Vec::new(),
            bounds: Vec::new(),
            cell_size,
            grid: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    pub fn into_polygons(self) -> PolygonSet {
        self.polygons
    }

    /// Same result as [`check`] over [`Self::polygons`]
    pub fn check<K: GeometryKernel>(
        &self,
        kernel: &K,
        candidate: &Polygon,
        min_distance: f64,
    ) -> Result<(), RejectReason> {
        let Some(bounds) = Bounds::from_polygon(candidate) else {
            return Err(RejectReason::Empty);
        };

        let nearby = self.nearby(&bounds, min_distance);
        let nearby = nearby
            .into_iter()
            .filter(|&i| {
                self.bounds[i]
                    .as_ref()
                    .is_some_and(|b| b.gap(&bounds) <= min_distance)
            })
            .map(|i| (i, &self.polygons[i]));

        match first_conflict(kernel, nearby, candidate, min_distance) {
            Some(reason) => Err(reason),
            None => Ok(()),
        }
    }

    /// Append a grain; its index is its acceptance order
    pub fn insert(&mut self, polygon: Polygon) {
        let index = self.polygons.len();
        let bounds = Bounds::from_polygon(&polygon);
        if let Some(b) = &bounds {
            let (lo, hi) = self.cell_range(b);
            for cx in lo.0..=hi.0 {
                for cy in lo.1..=hi.1 {
                    self.grid.entry((cx, cy)).or_default().push(index);
                }
            }
        }
        self.polygons.push(polygon);
        self.bounds.push(bounds);
    }

    /// Indices of grains whose cells overlap `bounds` grown by `margin`,
    /// ascending and without duplicates
    fn nearby(&self, bounds: &Bounds, margin: f64) -> Vec<usize> {
        let (lo, hi) = self.cell_range(&bounds.expanded(margin));
        // Huge margins saturate the cell coordinates at the i64 limits.
        let span = (u128::from(lo.0.abs_diff(hi.0)) + 1)
            .saturating_mul(u128::from(lo.1.abs_diff(hi.1)) + 1);

        if span > self.grid.len() as u128 {
            return (0..self.polygons.len()).collect();
        }

        let mut indices: Vec<usize> = Vec::new();
        for cx in lo.0..=hi.0 {
            for cy in lo.1..=hi.1 {
                if let Some(bucket) = self.grid.get(&(cx, cy)) {
                    indices.extend_from_slice(bucket);
                }
            }
        }
        indices.sort_unstable();
        indices.dedup();
        indices
    }

    fn cell_range(&self, bounds: &Bounds) -> (Cell, Cell) {
        let cell = |v: f64| (v / self.cell_size).floor() as i64;
        (
            (cell(bounds.min_x), cell(bounds.min_y)),
            (cell(bounds.max_x), cell(bounds.max_y)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::empty_polygon;
    use crate::generator::synthesize;
    use crate::geometry::GeoKernel;
    use crate::random::{Sampler, UniformSource};
    use geo::{coord, polygon};

    fn square(x: f64, y: f64, side: f64) -> Polygon {
        polygon![
            (x: x, y: y),
            (x: x, y: y + side),
            (x: x + side, y: y + side),
            (x: x + side, y: y),
        ]
    }

    #[test]
    fn test_accepts_into_empty_set() {
        assert!(accepts(&GeoKernel, &[], &square(0.0, 0.0, 1.0), 5.0));
    }

    #[test]
    fn test_rejects_overlap() {
        let existing = vec![square(10.0, 10.0, 5.0), square(0.0, 0.0, 2.0)];
        let result = check(&GeoKernel, &existing, &square(1.0, 1.0, 2.0), 0.0);
        assert_eq!(result, Err(RejectReason::Intersects { index: 1 }));
    }

    #[test]
    fn test_rejects_touching() {
        let existing = vec![square(0.0, 0.0, 2.0)];
        assert!(!accepts(&GeoKernel, &existing, &square(2.0, 0.0, 2.0), 0.0));
    }

    #[test]
    fn test_rejects_too_close() {
        let existing = vec![square(0.0, 0.0, 2.0)];
        let result = check(&GeoKernel, &existing, &square(3.0, 0.0, 2.0), 1.5);
        match result {
            Err(RejectReason::TooClose { index, distance }) => {
                assert_eq!(index, 0);
                assert!((distance - 1.0).abs() < 1e-12);
            }
            other => panic!("expected TooClose, got {:?}", other),
        }
    }

    #[test]
    fn test_distance_exactly_min_is_accepted() {
        let existing = vec![square(0.0, 0.0, 2.0)];
        assert!(accepts(&GeoKernel, &existing, &square(3.0, 0.0, 2.0), 1.0));
    }

    #[test]
    fn test_reports_first_conflict_in_insertion_order() {
        let existing = vec![square(0.0, 0.0, 2.0), square(2.5, 0.0, 2.0)];
        let result = check(&GeoKernel, &existing, &square(1.0, 0.0, 2.0), 0.0);
        assert_eq!(result, Err(RejectReason::Intersects { index: 0 }));
    }

    #[test]
    fn test_empty_candidate_rejected() {
        let existing = vec![square(0.0, 0.0, 2.0)];
        assert_eq!(
            check(&GeoKernel, &existing, &empty_polygon(), 0.0),
            Err(RejectReason::Empty)
        );
        let mut set = AcceptedSet::new(10.0);
        set.insert(square(0.0, 0.0, 2.0));
        assert_eq!(
            set.check(&GeoKernel, &empty_polygon(), 0.0),
            Err(RejectReason::Empty)
        );
    }

    #[test]
    fn test_empty_existing_skipped() {
        let existing = vec![empty_polygon(), square(10.0, 10.0, 1.0)];
        assert!(accepts(&GeoKernel, &existing, &square(0.0, 0.0, 1.0), 1.0));

        let mut set = AcceptedSet::new(5.0);
        set.insert(empty_polygon());
        assert!(set.check(&GeoKernel, &square(0.0, 0.0, 1.0), 1.0).is_ok());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_grid_finds_neighbours_across_cells() {
        let mut set = AcceptedSet::new(1.0);
        set.insert(square(0.0, 0.0, 0.5));
        set.insert(square(7.0, 7.0, 0.5));

        // gap of 2.5 crosses several cells
        let result = set.check(&GeoKernel, &square(3.0, 0.0, 0.5), 3.0);
        assert!(matches!(result, Err(RejectReason::TooClose { index: 0, .. })));
        assert!(set.check(&GeoKernel, &square(3.0, 0.0, 0.5), 2.0).is_ok());
    }

    #[test]
    fn test_grid_handles_touching_on_cell_boundary() {
        let mut set = AcceptedSet::new(10.0);
        set.insert(square(0.0, 0.0, 10.0));
        let result = set.check(&GeoKernel, &square(10.0, 0.0, 5.0), 0.0);
        assert_eq!(result, Err(RejectReason::Intersects { index: 0 }));
    }

    #[test]
    fn test_invalid_cell_size_falls_back() {
        let mut set = AcceptedSet::new(0.0);
        set.insert(square(0.0, 0.0, 1.0));
        assert!(set.check(&GeoKernel, &square(0.5, 0.5, 1.0), 0.0).is_err());
    }

    #[test]
    fn test_grid_matches_linear_scan() {
        let mut sampler = Sampler::seeded(2024);
        let min_distance = 1.5;
        let mut set = AcceptedSet::new(12.0);
        let mut compared = 0;

        for _ in 0..400 {
            let x = sampler.next_uniform() * 100.0;
            let y = sampler.next_uniform() * 100.0;
            let size = 2.0 + sampler.next_uniform() * 15.0;
            let candidate = synthesize(
                &GeoKernel,
                &mut sampler,
                coord! { x: x, y: y },
                coord! { x: x + size, y: y + size },
                4,
                9,
                1.0,
            );

            let linear = check(&GeoKernel, set.polygons(), &candidate, min_distance);
            let indexed = set.check(&GeoKernel, &candidate, min_distance);
            assert_eq!(linear, indexed);
            compared += 1;

            if indexed.is_ok() {
                set.insert(candidate);
            }
        }

        assert_eq!(compared, 400);
        assert!(set.len() > 1);
    }

    #[test]
    fn test_wide_margin_scans_every_grain() {
        let mut set = AcceptedSet::new(1.0);
        set.insert(square(0.0, 0.0, 0.5));
        set.insert(square(50.0, 50.0, 0.5));
        set.insert(square(90.0, 0.0, 0.5));

        // margin covers far more cells than the grid holds
        let candidate = square(20.0, 20.0, 0.5);
        let expected = check(&GeoKernel, set.polygons(), &candidate, 60.0);
        assert!(matches!(expected, Err(RejectReason::TooClose { index: 0, .. })));
        assert_eq!(set.check(&GeoKernel, &candidate, 60.0), expected);
    }

    #[test]
    fn test_huge_margin_saturates_cells() {
        let mut set = AcceptedSet::new(1.0);
        set.insert(square(0.0, 0.0, 1.0));
        set.insert(square(10.0, 10.0, 1.0));

        let result = set.check(&GeoKernel, &square(5.0, 5.0, 1.0), 1e21);
        assert!(matches!(result, Err(RejectReason::TooClose { index: 0, .. })));
        assert!(set.check(&GeoKernel, &square(5.0, 5.0, 1.0), f64::MAX).is_err());
    }
}
