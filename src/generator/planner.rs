use tracing::debug;

use super::acceptance::AcceptedSet;
use super::synthesizer::synthesize;
use crate::config::{GenerationConfig, SizeFactorMode};
use crate::domain::{PlacementOutcome, Point};
use crate::geometry::GeometryKernel;
use crate::random::UniformSource;

/// Target rectangle and size factor for one placement attempt
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub index: usize,
    pub size_factor: f64,
    pub min: Point,
    pub max: Point,
}

/// Derives where and how large each grain should be, then decides whether
/// the synthesized grain joins the structure.
#[derive(Debug, Clone)]
pub struct PlacementPlanner {
    width: f64,
    height: f64,
    cell_width: f64,
    cell_height: f64,
    count: usize,
    min_points: usize,
    max_points: usize,
    min_distance: f64,
    mode: SizeFactorMode,
}

impl PlacementPlanner {
    pub fn new(config: &GenerationConfig) -> Self {
        let (cell_width, cell_height) = config.cell_size();
        Self {
            width: config.width,
            height: config.height,
            cell_width,
            cell_height,
            count: config.num_polygons,
            min_points: config.min_points,
            max_points: config.max_points,
            min_distance: config.min_distance,
            mode: config.size_factor_mode,
        }
    }

    /// Linear decay from 1 for the first grain towards 0 for the last
    pub fn size_factor(&self, index: usize) -> f64 {
        if self.count == 0 {
            return 1.0;
        }
        1.0 - index as f64 / self.count as f64
    }

    /// Draw the placement rectangle for grain `index`.
    ///
    /// The origin is uniform over the whole domain; the grid only sizes the
    /// rectangle, which is clamped to the domain edge.
    pub fn plan<S: UniformSource + ?Sized>(&self, index: usize, source: &mut S) -> Placement {
        let size_factor = self.size_factor(index);

        let start_x = source.next_uniform() * self.width;
        let start_y = source.next_uniform() * self.height;

        let end_x = (start_x + self.cell_width * size_factor).min(self.width);
        let end_y = (start_y + self.cell_height * size_factor).min(self.height);

        Placement {
            index,
            size_factor,
            min: Point {
                x: start_x,
                y: start_y,
            },
            max: Point { x: end_x, y: end_y },
        }
    }

    /// Fraction of the placement rectangle the point cloud may cover
    pub fn point_spread(&self, placement: &Placement) -> f64 {
        match self.mode {
            SizeFactorMode::Rectangle => 1.0,
            SizeFactorMode::Compound => placement.size_factor,
        }
    }

    /// Plan, synthesize and test grain `index` against the accepted grains
    pub fn attempt<K, S>(
        &self,
        index: usize,
        kernel: &K,
        source: &mut S,
        accepted: &AcceptedSet,
    ) -> PlacementOutcome
    where
        K: GeometryKernel,
        S: UniformSource + ?Sized,
    {
        let placement = self.plan(index, source);
        let candidate = synthesize(
            kernel,
            source,
            placement.min,
            placement.max,
            self.min_points,
            self.max_points,
            self.point_spread(&placement),
        );

        match accepted.check(kernel, &candidate, self.min_distance) {
            Ok(()) => PlacementOutcome::Accepted(candidate),
            Err(reason) => {
                debug!(index, %reason, "placement rejected");
                PlacementOutcome::Rejected(reason)
            }
        }
    }
}
