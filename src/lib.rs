//! cementgen - Generate synthetic 2D cement microstructures of non-overlapping convex grains

pub mod config;
pub mod domain;
pub mod export;
pub mod generator;
pub mod geometry;
pub mod random;
