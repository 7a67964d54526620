use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use cementgen::config::{FileConfig, GenerationConfig, SizeFactorMode};
use cementgen::domain::{non_empty, vertex_count};
use cementgen::export::{render_preview, write_preview, write_svg};
use cementgen::generator::StructureGenerator;
use cementgen::geometry::Scaler;
use cementgen::random::Sampler;

/// Generate a synthetic 2D cement microstructure of non-overlapping convex grains
///
/// Examples:
///   # Default 500x400 domain with 6000 placement attempts
///   cementgen
///
///   # Small reproducible run with a PNG preview
///   cementgen -n 300 --width 200 --height 150 --seed 42 --preview preview.png
///
///   # Use a config file
///   cementgen --config my-structure.toml
#[derive(Parser, Debug)]
#[command(name = "cementgen")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches cementgen.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Domain width
    #[arg(long)]
    width: Option<f64>,

    /// Domain height
    #[arg(long)]
    height: Option<f64>,

    /// Number of grains to attempt
    #[arg(short = 'n', long)]
    polygons: Option<usize>,

    /// Minimum number of sampled points per grain
    #[arg(long)]
    min_points: Option<usize>,

    /// Maximum number of sampled points per grain
    #[arg(long)]
    max_points: Option<usize>,

    /// Grid rows used to size grains
    #[arg(long)]
    rows: Option<usize>,

    /// Grid columns used to size grains
    #[arg(long)]
    cols: Option<usize>,

    /// Minimum distance between grain boundaries
    #[arg(long)]
    min_distance: Option<f64>,

    /// Retry budget (accepted for compatibility; rejected grains are not retried)
    #[arg(long)]
    extra_iterations: Option<usize>,

    /// Where the size factor applies: rectangle (default) or compound
    #[arg(long, value_enum)]
    size_mode: Option<SizeFactorMode>,

    /// Seed for a reproducible structure (defaults to system entropy)
    #[arg(long)]
    seed: Option<u64>,

    /// Output SVG file path
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Also write a PNG preview to this path
    #[arg(long)]
    preview: Option<PathBuf>,

    /// Preview pixels per domain unit
    #[arg(long)]
    preview_scale: Option<f64>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

impl Args {
    /// Apply flags on top of the file settings
    fn merge(&self, file: &FileConfig) -> (GenerationConfig, FileConfig) {
        let mut settings = file.clone();
        if let Some(v) = self.width {
            settings.width = v;
        }
        if let Some(v) = self.height {
            settings.height = v;
        }
        if let Some(v) = self.polygons {
            settings.polygons = v;
        }
        if let Some(v) = self.min_points {
            settings.min_points = v;
        }
        if let Some(v) = self.max_points {
            settings.max_points = v;
        }
        if let Some(v) = self.rows {
            settings.rows = v;
        }
        if let Some(v) = self.cols {
            settings.cols = v;
        }
        if let Some(v) = self.min_distance {
            settings.min_distance = v;
        }
        if let Some(v) = self.extra_iterations {
            settings.extra_iterations = v;
        }
        if let Some(v) = self.size_mode {
            settings.size_factor_mode = v;
        }
        if self.seed.is_some() {
            settings.seed = self.seed;
        }
        if let Some(ref v) = self.output {
            settings.output = v.clone();
        }
        if self.preview.is_some() {
            settings.preview = self.preview.clone();
        }
        if let Some(v) = self.preview_scale {
            settings.preview_scale = v;
        }
        settings.verbose |= self.verbose;

        (settings.generation(), settings)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    let total_start = Instant::now();

    let file_config: FileConfig = if let Some(ref config_path) = args.config {
        if config_path.exists() {
            let contents = std::fs::read_to_string(config_path)
                .context(format!("Failed to read config file: {:?}", config_path))?;
            toml::from_str(&contents).context("Failed to parse config file")?
        } else {
            bail!("Config file not found: {:?}", config_path);
        }
    } else {
        FileConfig::load().unwrap_or_default()
    };

    let (config, settings) = args.merge(&file_config);

    if !(settings.preview_scale.is_finite() && settings.preview_scale > 0.0) {
        bail!(
            "--preview-scale must be a positive number, got {}",
            settings.preview_scale
        );
    }

    let generator = StructureGenerator::new(config).context("Invalid generation parameters")?;
    let config = generator.config();
    let scaler = Scaler::new(settings.preview_scale);
    if settings.preview.is_some() {
        scaler.canvas_size(config.width, config.height)?;
    }

    println!("cementgen - Cement Microstructure Generator");
    println!("==========================================");
    println!();

    if settings.verbose {
        println!("Configuration:");
        println!("  Domain: {} x {}", config.width, config.height);
        println!("  Grains requested: {}", config.num_polygons);
        println!(
            "  Points per grain: {}-{}",
            config.min_points, config.max_points
        );
        println!("  Grid: {} rows x {} cols", config.rows, config.cols);
        println!("  Min distance: {}", config.min_distance);
        println!("  Extra iterations: {} (unused)", config.extra_iterations);
        println!("  Size factor mode: {:?}", config.size_factor_mode);
        match settings.seed {
            Some(seed) => println!("  Seed: {}", seed),
            None => println!("  Seed: system entropy"),
        }
        println!("  Output: {}", settings.output.display());
        if let Some(ref preview) = settings.preview {
            println!("  Preview: {}", preview.display());
        }
        println!();
    }

    let mut sampler = match settings.seed {
        Some(seed) => Sampler::seeded(seed),
        None => Sampler::from_entropy(),
    };

    let progress = create_progress(config.num_polygons as u64);
    let start = Instant::now();
    let mut accepted = 0usize;
    let generation = generator.generate_with(&mut sampler, |_, outcome| {
        if outcome.is_accepted() {
            accepted += 1;
            progress.set_message(format!("{} accepted", accepted));
        }
        progress.inc(1);
    });
    progress.finish_with_message(format!(
        "{} [{:.1}s]",
        generation.stats.summary(),
        start.elapsed().as_secs_f32()
    ));

    if settings.verbose {
        let vertices: usize = non_empty(&generation.polygons).map(vertex_count).sum();
        let shapes = non_empty(&generation.polygons).count();
        if shapes > 0 {
            println!(
                "  Mean vertices per grain: {:.2}",
                vertices as f64 / shapes as f64
            );
        }
    }

    let spinner = create_spinner("Writing SVG file...");
    ensure_parent_dir(&settings.output)?;
    write_svg(
        &settings.output,
        &generation.polygons,
        config.width,
        config.height,
    )
    .context("Failed to write SVG file")?;
    spinner.finish_with_message(format!("Wrote {}", settings.output.display()));

    if let Some(ref preview_path) = settings.preview {
        let spinner = create_spinner("Rendering preview...");
        let image = render_preview(
            &generation.polygons,
            config.width,
            config.height,
            &scaler,
            &mut sampler,
        )?;
        ensure_parent_dir(preview_path)?;
        write_preview(preview_path, &image)?;
        spinner.finish_with_message(format!(
            "Wrote {} ({}x{} px)",
            preview_path.display(),
            image.width(),
            image.height()
        ));
    }

    println!();
    println!(
        "Done! Total time: {:.1}s",
        total_start.elapsed().as_secs_f32()
    );

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    Ok(())
}

fn progress_style(template: &str) -> ProgressStyle {
    ProgressStyle::with_template(template)
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
}

fn create_progress(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(progress_style(
        "{spinner:.green} Placing grains [{bar:30}] {pos}/{len} {msg}",
    ));
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(progress_style("{spinner:.green} {msg}"));
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
