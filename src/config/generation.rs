use serde::Deserialize;
use thiserror::Error;

/// Where the per-iteration size factor shrinks a grain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SizeFactorMode {
    /// Shrink only the placement rectangle; points spread over all of it
    #[default]
    Rectangle,
    /// Shrink the rectangle and the point spread inside it (legacy output)
    Compound,
}

/// Errors raised when a generation configuration is unusable
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidDimension { name: &'static str, value: f64 },

    #[error("grid {name} must be at least 1")]
    EmptyGrid { name: &'static str },

    #[error("min_points ({min}) must not exceed max_points ({max})")]
    PointRange { min: usize, max: usize },
}

/// Parameters of one generation run
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    /// Domain width
    pub width: f64,
    /// Domain height
    pub height: f64,
    /// Number of placement attempts (upper bound on accepted grains)
    pub num_polygons: usize,
    /// Minimum number of sampled points per grain
    pub min_points: usize,
    /// Maximum number of sampled points per grain
    pub max_points: usize,
    /// Grid rows; only used to derive the nominal cell height
    pub rows: usize,
    /// Grid columns; only used to derive the nominal cell width
    pub cols: usize,
    /// Minimum boundary distance between accepted grains
    pub min_distance: f64,
    /// Retry budget carried for compatibility; placements are never retried
    pub extra_iterations: usize,
    pub size_factor_mode: SizeFactorMode,
}

pub mod defaults {
    pub const WIDTH: f64 = 500.0;
    pub const HEIGHT: f64 = 400.0;
    pub const NUM_POLYGONS: usize = 6000;
    pub const MIN_POINTS: usize = 8;
    pub const MAX_POINTS: usize = 15;
    pub const ROWS: usize = 7;
    pub const COLS: usize = 7;
    pub const MIN_DISTANCE: f64 = 2.0;
    pub const EXTRA_ITERATIONS: usize = 3;
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            width: defaults::WIDTH,
            height: defaults::HEIGHT,
            num_polygons: defaults::NUM_POLYGONS,
            min_points: defaults::MIN_POINTS,
            max_points: defaults::MAX_POINTS,
            rows: defaults::ROWS,
            cols: defaults::COLS,
            min_distance: defaults::MIN_DISTANCE,
            extra_iterations: defaults::EXTRA_ITERATIONS,
            size_factor_mode: SizeFactorMode::default(),
        }
    }
}

impl GenerationConfig {
    /// Check that the parameters describe a usable run
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("width", self.width),
            ("height", self.height),
            ("min_distance", self.min_distance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidDimension { name, value });
            }
        }
        if self.rows == 0 {
            return Err(ConfigError::EmptyGrid { name: "rows" });
        }
        if self.cols == 0 {
            return Err(ConfigError::EmptyGrid { name: "cols" });
        }
        if self.min_points > self.max_points {
            return Err(ConfigError::PointRange {
                min: self.min_points,
                max: self.max_points,
            });
        }
        Ok(())
    }

    /// Nominal (width, height) of one grid cell
    pub fn cell_size(&self) -> (f64, f64) {
        (self.width / self.cols as f64, self.height / self.rows as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(GenerationConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_cell_size() {
        let config = GenerationConfig {
            width: 100.0,
            height: 60.0,
            rows: 3,
            cols: 4,
            ..Default::default()
        };
        assert_eq!(config.cell_size(), (25.0, 20.0));
    }

    #[test]
    fn test_rejects_negative_width() {
        let config = GenerationConfig {
            width: -1.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidDimension {
                name: "width",
                value: -1.0
            })
        );
    }

    #[test]
    fn test_rejects_nan_min_distance() {
        let config = GenerationConfig {
            min_distance: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDimension {
                name: "min_distance",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_empty_grid() {
        let config = GenerationConfig {
            rows: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyGrid { name: "rows" })
        );
    }

    #[test]
    fn test_rejects_inverted_point_range() {
        let config = GenerationConfig {
            min_points: 10,
            max_points: 4,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "min_points (10) must not exceed max_points (4)"
        );
    }

    #[test]
    fn test_zero_sized_domain_is_valid() {
        let config = GenerationConfig {
            width: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
