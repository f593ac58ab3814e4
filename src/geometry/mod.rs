//! Vector math and the pinhole camera.
//!
//! Provides the world-space vector type, rays, and the camera model that
//! maps image pixels onto primary rays.

mod camera;
mod vector;

pub use camera::{Camera, CameraError, ImagePlane};
pub use vector::{point_to_point, rescale, Ray, Vec3};
