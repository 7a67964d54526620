use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::{Polygon, non_empty};

/// Render the grains as an SVG document of `width` x `height` units.
///
/// Each non-empty grain becomes one unfilled `<polygon>` with a black
/// 1-unit stroke; its points list the closed exterior ring. Coordinates use
/// the shortest decimal form that parses back to the same `f64`.
pub fn render_svg(polygons: &[Polygon], width: f64, height: f64) -> String {
    let mut svg = String::new();
    svg.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>\n");
    let _ = writeln!(
        svg,
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">",
        width, height
    );

    for polygon in non_empty(polygons) {
        let points: Vec<String> = polygon
            .exterior()
            .0
            .iter()
            .map(|c| format!("{},{}", c.x, c.y))
            .collect();
        let _ = writeln!(
            svg,
            "  <polygon points=\"{}\" fill=\"none\" stroke=\"black\" stroke-width=\"1\" />",
            points.join(" ")
        );
    }

    svg.push_str("</svg>\n");
    svg
}

/// Write the grains to an SVG file
///
/// # Arguments
/// * `path` - Output file path
/// * `polygons` - Grains to write; empty ones are skipped
/// * `width`, `height` - Canvas size of the document
pub fn write_svg(path: &Path, polygons: &[Polygon], width: f64, height: f64) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create SVG file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    writer
        .write_all(render_svg(polygons, width, height).as_bytes())
        .with_context(|| format!("Failed to write SVG file: {}", path.display()))?;
    writer.flush()?;

    Ok(())
}
