use serde::Deserialize;
use std::path::PathBuf;

pub mod generation;

pub use generation::{ConfigError, GenerationConfig, SizeFactorMode, defaults};

const CONFIG_NAME: &str = "cementgen";

fn default_width() -> f64 {
    defaults::WIDTH
}
fn default_height() -> f64 {
    defaults::HEIGHT
}
fn default_polygons() -> usize {
    defaults::NUM_POLYGONS
}
fn default_min_points() -> usize {
    defaults::MIN_POINTS
}
fn default_max_points() -> usize {
    defaults::MAX_POINTS
}
fn default_rows() -> usize {
    defaults::ROWS
}
fn default_cols() -> usize {
    defaults::COLS
}
fn default_min_distance() -> f64 {
    defaults::MIN_DISTANCE
}
fn default_extra_iterations() -> usize {
    defaults::EXTRA_ITERATIONS
}
fn default_output() -> PathBuf {
    PathBuf::from("./exit/cement_structure.svg")
}
fn default_preview_scale() -> f64 {
    1.0
}
fn default_verbose() -> bool {
    false
}

/// Settings read from a TOML file; every key is optional
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct FileConfig {
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    #[serde(default = "default_polygons")]
    pub polygons: usize,
    #[serde(default = "default_min_points")]
    pub min_points: usize,
    #[serde(default = "default_max_points")]
    pub max_points: usize,
    #[serde(default = "default_rows")]
    pub rows: usize,
    #[serde(default = "default_cols")]
    pub cols: usize,
    #[serde(default = "default_min_distance")]
    pub min_distance: f64,
    #[serde(default = "default_extra_iterations")]
    pub extra_iterations: usize,
    #[serde(default)]
    pub size_factor_mode: SizeFactorMode,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default)]
    pub preview: Option<PathBuf>,
    #[serde(default = "default_preview_scale")]
    pub preview_scale: f64,
    #[serde(default = "default_verbose")]
    pub verbose: bool,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            polygons: default_polygons(),
            min_points: default_min_points(),
            max_points: default_max_points(),
            rows: default_rows(),
            cols: default_cols(),
            min_distance: default_min_distance(),
            extra_iterations: default_extra_iterations(),
            size_factor_mode: SizeFactorMode::default(),
            seed: None,
            output: default_output(),
            preview: None,
            preview_scale: default_preview_scale(),
            verbose: default_verbose(),
        }
    }
}

impl FileConfig {
    /// Search the usual locations and load the first config file that parses
    pub fn load() -> Option<Self> {
        let config_paths = get_config_paths();

        for path in config_paths {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => return Some(config),
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "failed to parse config file");
                    }
                }
            }
        }
        None
    }

    /// Generation parameters described by this file
    pub fn generation(&self) -> GenerationConfig {
        GenerationConfig {
            width: self.width,
            height: self.height,
            num_polygons: self.polygons,
            min_points: self.min_points,
            max_points: self.max_points,
            rows: self.rows,
            cols: self.cols,
            min_distance: self.min_distance,
            extra_iterations: self.extra_iterations,
            size_factor_mode: self.size_factor_mode,
        }
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from(format!("{CONFIG_NAME}.toml")));
    paths.push(PathBuf::from(format!(".{CONFIG_NAME}.toml")));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join(CONFIG_NAME).join("config.toml"));
        paths.push(config_dir.join(format!("{CONFIG_NAME}.toml")));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(format!(".{CONFIG_NAME}.toml")));
    }

    paths
}
