//! Raymarching renderer.
//!
//! Finds terrain intersections along camera rays, shades them with a
//! single directional light and distance fog, and assembles the image.

mod march;
mod renderer;
mod shade;

pub use march::{MarchConfig, Raymarcher, SampleWindow};
pub use renderer::{render_heightfield, RenderError, Renderer};
pub use shade::{clamp_channel, Shader, ShadingConfig};
