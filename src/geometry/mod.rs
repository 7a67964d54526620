pub mod kernel;
pub mod scaling;

pub use kernel::{GeoKernel, GeometryKernel};
pub use scaling::{Bounds, Scaler};
