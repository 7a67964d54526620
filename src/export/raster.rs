//! Raster preview of a generated structure.
//!
//! Each grain's closed edge loop is drawn one pixel wide in its own random
//! color on a white canvas, then saved as PNG.

use anyhow::{Context, Result};
use image::{ImageFormat, Rgb, RgbImage};
use std::path::Path;

use crate::domain::{Polygon, non_empty};
use crate::geometry::Scaler;
use crate::random::UniformSource;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

/// Draw the grains on a canvas covering `width` x `height` domain units.
///
/// Colors are drawn from `source`, three draws per non-empty grain. Fails
/// before drawing anything when the canvas would be too large.
pub fn render_preview<S: UniformSource + ?Sized>(
    polygons: &[Polygon],
    width: f64,
    height: f64,
    scaler: &Scaler,
    source: &mut S,
) -> Result<RgbImage> {
    let (canvas_width, canvas_height) = scaler.canvas_size(width, height)?;
    let mut image = RgbImage::from_pixel(canvas_width, canvas_height, BACKGROUND);

    for polygon in non_empty(polygons) {
        let color = random_color(source);
        let pixels: Vec<(i64, i64)> = polygon
            .exterior()
            .0
            .iter()
            .map(|c| {
                let (x, y) = scaler.scale(c.x, c.y);
                (x.round() as i64, y.round() as i64)
            })
            .collect();

        for i in 0..pixels.len() {
            let from = pixels[i];
            let to = pixels[(i + 1) % pixels.len()];
            draw_line(&mut image, from, to, color);
        }
    }

    Ok(image)
}

/// Save a rendered preview as PNG
pub fn write_preview(path: &Path, image: &RgbImage) -> Result<()> {
    image
        .save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("Failed to write preview image: {}", path.display()))
}

fn random_color<S: UniformSource + ?Sized>(source: &mut S) -> Rgb<u8> {
    let mut channel = || (source.next_uniform() * 255.0) as u8;
    Rgb([channel(), channel(), channel()])
}

/// Bresenham line; pixels outside the canvas are clipped
fn draw_line(image: &mut RgbImage, from: (i64, i64), to: (i64, i64), color: Rgb<u8>) {
    let (mut x, mut y) = from;
    let dx = (to.0 - x).abs();
    let dy = -(to.1 - y).abs();
    let step_x = if x < to.0 { 1 } else { -1 };
    let step_y = if y < to.1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if x >= 0 && y >= 0 && x < image.width() as i64 && y < image.height() as i64 {
            image.put_pixel(x as u32, y as u32, color);
        }
        if x == to.0 && y == to.1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += step_x;
        }
        if e2 <= dx {
            err += dx;
            y += step_y;
        }
    }
}
