pub mod raster;
pub mod svg;

pub use raster::{render_preview, write_preview};
pub use svg::{render_svg, write_svg};
