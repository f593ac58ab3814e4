//! Pinhole camera without an explicit world-up input.
//!
//! The vertical basis vector is found geometrically: drop a vertical line from
//! the eye until it meets the plane through the look-at point perpendicular to
//! the view direction, and take the direction from the look-at point to that
//! foot. The horizontal basis vector is `forward x vertical`.

use thiserror::Error;

use super::vector::{point_to_point, Ray, Vec3};

/// Smallest eye-to-target distance accepted.
const MIN_VIEW_DISTANCE: f64 = 1e-9;

/// Smallest `|cos|` between the view direction and straight down.
const MIN_DOWN_COSINE: f64 = 1e-6;

/// Errors raised while building a camera.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CameraError {
    #[error("Degenerate camera: {0}")]
    Degenerate(String),
}

/// Immutable camera basis for one render.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye position, origin of every primary ray.
    pub position: Vec3,
    /// Point at the centre of the image plane.
    pub look_at: Vec3,
    /// Unit view direction.
    pub forward: Vec3,
    /// Unit vertical-ish basis vector (image rows advance along it).
    pub v: Vec3,
    /// Unit horizontal-ish basis vector (image columns advance along it).
    pub u: Vec3,
    /// Field of view in degrees.
    pub fov_deg: f64,
    /// Distance from `position` to `look_at`.
    pub distance: f64,
}

impl Camera {
    /// Builds the camera basis.
    ///
    /// # Arguments
    /// * `position` - Eye position
    /// * `look_at` - Point at the centre of the image
    /// * `fov_deg` - Horizontal field of view in degrees
    ///
    /// # Returns
    /// The camera, or `CameraError::Degenerate` when the eye sits on the
    /// look-at point or the view direction is horizontal
    pub fn new(position: Vec3, look_at: Vec3, fov_deg: f64) -> Result<Self, CameraError> {
        let n = point_to_point(position, look_at);
        let d = n.length();
        if !d.is_finite() || d < MIN_VIEW_DISTANCE {
            return Err(CameraError::Degenerate(format!(
                "eye {position} coincides with look-at {look_at}"
            )));
        }
        let n = n / d;

        let cos1 = n.dot(Vec3::NEG_Y);
        if cos1.abs() < MIN_DOWN_COSINE {
            return Err(CameraError::Degenerate(format!(
                "view direction {n} is horizontal (cos to down = {cos1:e})"
            )));
        }

        let h = d / cos1;
        let p2 = Vec3::new(position.x, position.y - h, position.z);
        let v = point_to_point(look_at, p2).normalize();
        let u = n.cross(v);

        log::debug!("camera basis: forward={n} v={v} u={u}");

        Ok(Self {
            position,
            look_at,
            forward: n,
            v,
            u,
            fov_deg,
            distance: d,
        })
    }

    /// Lays out an image plane of `width x height` pixels through `look_at`.
    pub fn image_plane(&self, width: u32, height: u32) -> ImagePlane {
        let xres = width as f64;
        let yres = height as f64;
        let x = 2.0 * self.distance * (self.fov_deg.to_radians() / 2.0).tan();
        let y = x * (yres / xres);
        ImagePlane {
            dx: x / xres,
            dy: y / yres,
            mx: xres / 2.0,
            my: yres / 2.0,
        }
    }

    /// Primary ray through the centre of pixel `(i, j)`.
    ///
    /// `i` advances along `u` and `j` along `v`.
    pub fn ray_for_pixel(&self, plane: &ImagePlane, i: u32, j: u32) -> Ray {
        let offset_u = self.u * ((i as f64 + 0.5 - plane.mx) * plane.dx);
        let offset_v = self.v * ((j as f64 + 0.5 - plane.my) * plane.dy);
        let pixel_center = self.look_at + (offset_u + offset_v);
        Ray::through(self.position, pixel_center)
    }
}

/// Pixel spacing and centre of the virtual image plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImagePlane {
    pub dx: f64,
    pub dy: f64,
    pub mx: f64,
    pub my: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_camera() -> Camera {
        Camera::new(Vec3::new(0.0, 4.0, 0.0), Vec3::new(6.0, 2.0, 6.0), 90.0).unwrap()
    }

    #[test]
    fn test_basis_is_orthonormal() {
        let cam = reference_camera();
        assert!((cam.u.length() - 1.0).abs() < 1e-9);
        assert!((cam.v.length() - 1.0).abs() < 1e-9);
        assert!(cam.u.dot(cam.v).abs() < 1e-9);
        assert!(cam.u.dot(cam.forward).abs() < 1e-9);
        assert!(cam.v.dot(cam.forward).abs() < 1e-9);
    }

    #[test]
    fn test_u_is_horizontal() {
        let cam = reference_camera();
        assert!(cam.u.y.abs() < 1e-9);
    }

    #[test]
    fn test_eye_equal_to_look_at_is_degenerate() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        let err = Camera::new(p, p, 90.0).unwrap_err();
        assert!(matches!(err, CameraError::Degenerate(_)));
    }

    #[test]
    fn test_horizontal_view_is_degenerate() {
        let result = Camera::new(Vec3::new(0.0, 2.0, 0.0), Vec3::new(5.0, 2.0, 5.0), 60.0);
        assert!(matches!(result, Err(CameraError::Degenerate(_))));
    }

    #[test]
    fn test_upward_view_still_has_orthonormal_basis() {
        let cam = Camera::new(Vec3::ZERO, Vec3::new(1.0, 3.0, 2.0), 60.0).unwrap();
        assert!((cam.u.length() - 1.0).abs() < 1e-9);
        assert!((cam.v.length() - 1.0).abs() < 1e-9);
        assert!(cam.u.dot(cam.v).abs() < 1e-9);
    }

    #[test]
    fn test_image_plane_extents() {
        let cam = reference_camera();
        let plane = cam.image_plane(200, 100);
        // fov 90 => half-width equals the view distance
        let width = 2.0 * cam.distance;
        assert!((plane.dx * 200.0 - width).abs() < 1e-9);
        assert!((plane.dy * 100.0 - width / 2.0).abs() < 1e-9);
        assert!((plane.dx - plane.dy).abs() < 1e-12);
        assert_eq!(plane.mx, 100.0);
        assert_eq!(plane.my, 50.0);
    }

    #[test]
    fn test_center_ray_points_at_look_at() {
        let cam = reference_camera();
        // Odd resolution puts a pixel centre exactly on the look-at point.
        let plane = cam.image_plane(5, 5);
        let ray = cam.ray_for_pixel(&plane, 2, 2);
        assert!((ray.direction - cam.forward).length() < 1e-12);
        assert!((ray.direction.length() - 1.0).abs() < 1e-12);
    }
}
