//! Terrain generation module.
//!
//! Provides the heightfield abstraction, the fractal terrain that implements
//! it, and a cheap top-down noise preview.

mod heightfield;
mod preview;

pub use heightfield::{FractalTerrain, HeightField, TerrainConfig};
pub use preview::{render_preview, PreviewConfig};
