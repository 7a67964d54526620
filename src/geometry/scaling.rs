use anyhow::{Result, bail};
use geo::BoundingRect;

use crate::domain::Polygon;

/// Largest preview canvas, in pixels, that [`Scaler::canvas_size`] allows
pub const MAX_CANVAS_PIXELS: u64 = 1 << 26;

/// Axis-aligned bounding box in domain coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Bounds of a polygon's exterior ring, `None` for an empty polygon
    pub fn from_polygon(polygon: &Polygon) -> Option<Self> {
        polygon.bounding_rect().map(|rect| Self {
            min_x: rect.min().x,
            max_x: rect.max().x,
            min_y: rect.min().y,
            max_y: rect.max().y,
        })
    }

    /// Grow every side by `margin`
    pub fn expanded(&self, margin: f64) -> Self {
        Self {
            min_x: self.min_x - margin,
            max_x: self.max_x + margin,
            min_y: self.min_y - margin,
            max_y: self.max_y + margin,
        }
    }

    /// Euclidean distance between the two boxes, zero when they overlap or touch.
    ///
    /// This is a lower bound on the distance between anything inside them.
    pub fn gap(&self, other: &Bounds) -> f64 {
        let dx = (other.min_x - self.max_x).max(self.min_x - other.max_x).max(0.0);
        let dy = (other.min_y - self.max_y).max(self.min_y - other.max_y).max(0.0);
        dx.hypot(dy)
    }
}

/// Maps domain coordinates onto a pixel canvas
#[derive(Debug, Clone)]
pub struct Scaler {
    /// Pixels per domain unit
    scale: f64,
}

impl Scaler {
    pub fn new(scale: f64) -> Self {
        Self { scale }
    }

    /// Scale a point from domain units to pixels
    pub fn scale(&self, x: f64, y: f64) -> (f64, f64) {
        (x * self.scale, y * self.scale)
    }

    /// Canvas size in whole pixels for a domain of the given size, at least 1x1.
    ///
    /// Fails when the canvas would exceed [`MAX_CANVAS_PIXELS`].
    pub fn canvas_size(&self, width: f64, height: f64) -> Result<(u32, u32)> {
        let to_pixels = |v: f64| (v * self.scale).round().clamp(1.0, u32::MAX as f64) as u32;
        let (w, h) = (to_pixels(width), to_pixels(height));
        if u64::from(w) * u64::from(h) > MAX_CANVAS_PIXELS {
            bail!(
                "Preview canvas of {}x{} px exceeds the {} pixel limit; lower --preview-scale",
                w,
                h,
                MAX_CANVAS_PIXELS
            );
        }
        Ok((w, h))
    }
}
