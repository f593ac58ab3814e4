//! Noise generation module for terrain synthesis.
//!
//! Wraps the `noise` crate's seeded Perlin gradient noise in a layered
//! sampler that is built once and shared read-only.

mod fractal;

pub use fractal::{NoiseConfig, NoiseSource};
