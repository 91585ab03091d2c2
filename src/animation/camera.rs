use nalgebra::{Isometry3, Matrix4, Perspective3, Translation3};
use serde::{Deserialize, Serialize};

use crate::math::{Point3, UnitQuaternion, Vector3};

use super::CameraPose;

/// Output surface size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Width over height; 1 for a degenerate viewport.
    #[must_use]
    pub fn aspect(&self) -> f64 {
        if self.width == 0 || self.height == 0 {
            1.0
        } else {
            f64::from(self.width) / f64::from(self.height)
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

/// A perspective camera looking down its local `-Z` axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees.
    pub fov: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
    pub position: Point3,
    pub orientation: UnitQuaternion,
}

impl PerspectiveCamera {
    /// The camera carried along the path.
    #[must_use]
    pub fn path(aspect: f64) -> Self {
        Self {
            fov: 84.0,
            aspect,
            near: 0.01,
            far: 1000.0,
            position: Point3::origin(),
            orientation: UnitQuaternion::identity(),
        }
    }

    /// The fixed camera that looks at the whole scene.
    #[must_use]
    pub fn overview(aspect: f64) -> Self {
        Self {
            fov: 50.0,
            aspect,
            near: 0.01,
            far: 10_000.0,
            position: Point3::new(0.0, 50.0, 500.0),
            orientation: UnitQuaternion::identity(),
        }
    }

    /// Moves the camera to `pose`.
    pub fn apply(&mut self, pose: &CameraPose) {
        self.position = pose.position;
        self.orientation = pose.orientation;
    }

    /// World-space viewing direction.
    #[must_use]
    pub fn forward(&self) -> Vector3 {
        self.orientation * -Vector3::z()
    }

    /// World-to-camera transform.
    #[must_use]
    pub fn view(&self) -> Matrix4<f64> {
        Isometry3::from_parts(Translation3::from(self.position.coords), self.orientation)
            .inverse()
            .to_homogeneous()
    }

    #[must_use]
    pub fn projection(&self) -> Matrix4<f64> {
        Perspective3::new(self.aspect, self.fov.to_radians(), self.near, self.far).to_homogeneous()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn viewport_aspect() {
        assert_relative_eq!(Viewport::default().aspect(), 16.0 / 9.0);
        let empty = Viewport {
            width: 0,
            height: 10,
        };
        assert_relative_eq!(empty.aspect(), 1.0);
    }

    #[test]
    fn overview_looks_down_negative_z() {
        let camera = PerspectiveCamera::overview(1.5);
        assert_relative_eq!(camera.forward(), -Vector3::z());
        let eye = camera.view().transform_point(&camera.position);
        assert_relative_eq!(eye, Point3::origin(), epsilon = 1e-9);
    }

    #[test]
    fn path_camera_settings() {
        let camera = PerspectiveCamera::path(2.0);
        assert_relative_eq!(camera.fov, 84.0);
        assert_relative_eq!(camera.far, 1000.0);
        assert_relative_eq!(camera.projection()[(1, 1)], 1.0 / 42.0_f64.to_radians().tan());
    }
}
