use tracing::{debug, info};

use super::acceptance::AcceptedSet;
use super::planner::PlacementPlanner;
use crate::config::{ConfigError, GenerationConfig};
use crate::domain::{PlacementOutcome, PlacementStats, PolygonSet};
use crate::geometry::{GeoKernel, GeometryKernel};
use crate::random::UniformSource;

/// Accepted grains of one run together with the placement tally
#[derive(Debug, Clone)]
pub struct Generation {
    pub polygons: PolygonSet,
    pub stats: PlacementStats,
}

/// Drives the placement loop over a validated configuration
#[derive(Debug, Clone)]
pub struct StructureGenerator<K = GeoKernel> {
    config: GenerationConfig,
    kernel: K,
}

impl StructureGenerator<GeoKernel> {
    pub fn new(config: GenerationConfig) -> Result<Self, ConfigError> {
        Self::with_kernel(config, GeoKernel)
    }
}

impl<K: GeometryKernel> StructureGenerator<K> {
    pub fn with_kernel(config: GenerationConfig, kernel: K) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, kernel })
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn generate<S: UniformSource + ?Sized>(&self, source: &mut S) -> Generation {
        self.generate_with(source, |_, _| {})
    }

    /// Run exactly `num_polygons` placement attempts, reporting each outcome
    /// to `on_step` before it is applied.
    ///
    /// Rejected grains are dropped; nothing is retried.
    pub fn generate_with<S, F>(&self, source: &mut S, mut on_step: F) -> Generation
    where
        S: UniformSource + ?Sized,
        F: FnMut(usize, &PlacementOutcome),
    {
        let planner = PlacementPlanner::new(&self.config);
        let (cell_width, cell_height) = self.config.cell_size();
        let mut accepted = AcceptedSet::new(cell_width.max(cell_height));
        let mut stats = PlacementStats::default();

        if self.config.extra_iterations > 0 {
            debug!(
                extra_iterations = self.config.extra_iterations,
                "extra iterations configured but rejected placements are not retried"
            );
        }

        for index in 0..self.config.num_polygons {
            let outcome = planner.attempt(index, &self.kernel, source, &accepted);
            on_step(index, &outcome);
            stats.record(&outcome);
            if let PlacementOutcome::Accepted(polygon) = outcome {
                accepted.insert(polygon);
            }
        }

        info!(
            requested = stats.requested,
            accepted = stats.accepted,
            rejected = stats.rejected(),
            "generation finished"
        );

        Generation {
            polygons: accepted.into_polygons(),
            stats,
        }
    }
}
