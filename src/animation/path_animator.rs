use crate::geometry::Spline;
use crate::math::{Point3, UnitQuaternion, Vector3, TOLERANCE};
use crate::tessellation::TubeMesh;

use super::AnimationState;

/// Default arc-length distance between the camera and its look-ahead target.
pub const DEFAULT_LOOK_AHEAD: f64 = 30.0;

/// Where the path camera sits and how it is oriented at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// Curve parameter the pose was computed at.
    pub t: f64,
    /// Camera position, already multiplied by the scene scale.
    pub position: Point3,
    /// Point the camera looks at.
    pub target: Point3,
    pub tangent: Vector3,
    /// Up reference, `binormal x tangent`.
    pub normal: Vector3,
    pub binormal: Vector3,
    /// Rotation taking camera space (looking down `-Z`) to world space.
    pub orientation: UnitQuaternion,
}

/// Drives the camera parameter along the path and derives camera poses from
/// the tube's retained frames.
#[derive(Debug, Clone)]
pub struct PathAnimator {
    state: AnimationState,
    look_ahead_distance: f64,
}

impl PathAnimator {
    #[must_use]
    pub fn new(loop_period: f64, look_ahead_distance: f64) -> Self {
        Self {
            state: AnimationState::new(loop_period),
            look_ahead_distance,
        }
    }

    #[must_use]
    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    pub fn set_speed_factor(&mut self, speed_factor: f64) {
        self.state.set_speed_factor(speed_factor);
    }

    /// Advances the clock and returns the new `t`.
    pub fn advance(&mut self, dt: f64) -> f64 {
        self.state.advance(dt)
    }

    /// Computes the camera pose at `t`.
    ///
    /// The binormal is interpolated between the two tube samples bracketing
    /// `t`, then re-orthonormalized against the curve's own tangent at `t`.
    /// `scale` is the scene scale applied to the tube.
    #[must_use]
    pub fn pose(
        &self,
        t: f64,
        spline: &Spline,
        tube: &TubeMesh,
        scale: f64,
        look_ahead: bool,
    ) -> CameraPose {
        let tangent = spline.tangent_at(t);
        let binormal = interpolated_binormal(t, tube, &tangent);
        let normal = binormal.cross(&tangent);

        let position = spline.point_at(t) * scale;
        let target = if look_ahead {
            let length = spline.length();
            let offset = if length > TOLERANCE {
                self.look_ahead_distance / length
            } else {
                0.0
            };
            spline.point_at(t + offset) * scale
        } else {
            position + tangent
        };

        CameraPose {
            t,
            position,
            target,
            tangent,
            normal,
            binormal,
            orientation: look_at(&position, &target, &normal, &tangent),
        }
    }
}

fn interpolated_binormal(t: f64, tube: &TubeMesh, tangent: &Vector3) -> Vector3 {
    let orthogonal = |v: Vector3| (v - tangent * tangent.dot(&v)).try_normalize(TOLERANCE);

    let bracket = tube.bracket(t);
    let (Some(a), Some(b)) = (tube.samples.get(bracket.index), tube.samples.get(bracket.next))
    else {
        return any_perpendicular(tangent);
    };

    let blended = a.binormal + (b.binormal - a.binormal) * bracket.fraction;
    orthogonal(blended)
        .or_else(|| orthogonal(a.binormal))
        .unwrap_or_else(|| any_perpendicular(tangent))
}

fn any_perpendicular(v: &Vector3) -> Vector3 {
    v.cross(&Vector3::x())
        .try_normalize(TOLERANCE)
        .or_else(|| v.cross(&Vector3::y()).try_normalize(TOLERANCE))
        .unwrap_or_else(Vector3::z)
}

/// Orientation of a camera at `eye` looking at `target` with `up` as the
/// up reference. Falls back to `forward` when the target coincides with the
/// eye and to an arbitrary up when `up` is parallel to the view direction.
fn look_at(eye: &Point3, target: &Point3, up: &Vector3, forward: &Vector3) -> UnitQuaternion {
    let back = (eye - target)
        .try_normalize(TOLERANCE)
        .or_else(|| (-forward).try_normalize(TOLERANCE))
        .unwrap_or_else(Vector3::z);

    let up = if up.cross(&back).norm() > TOLERANCE {
        *up
    } else {
        any_perpendicular(&back)
    };
    UnitQuaternion::face_towards(&back, &up)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::SplineKind;
    use crate::tessellation::{TessellateTube, TubeParams};
    use approx::assert_relative_eq;

    fn rig(kind: SplineKind, closed: bool) -> (Spline, TubeMesh) {
        let spline = kind.build();
        let tube = TessellateTube::new(
            &spline,
            TubeParams {
                extrusion_segments: 100,
                radius_segments: 8,
                radius: 2.0,
                closed,
            },
        )
        .execute()
        .unwrap();
        (spline, tube)
    }

    fn assert_pose_eq(a: &CameraPose, b: &CameraPose) {
        assert_relative_eq!(a.position, b.position, epsilon = 1e-6);
        assert_relative_eq!(a.target, b.target, epsilon = 1e-6);
        assert_relative_eq!(a.normal, b.normal, epsilon = 1e-6);
        assert!(a.orientation.angle_to(&b.orientation) < 1e-6);
    }

    #[test]
    fn frame_is_orthonormal() {
        let (spline, tube) = rig(SplineKind::TorusKnot, true);
        let animator = PathAnimator::new(20.0, DEFAULT_LOOK_AHEAD);
        for i in 0..100 {
            let t = f64::from(i) / 100.0 + 0.003;
            let pose = animator.pose(t, &spline, &tube, 4.0, false);
            assert_relative_eq!(pose.binormal.norm(), 1.0, epsilon = 1e-9);
            assert_relative_eq!(pose.normal.norm(), 1.0, epsilon = 1e-9);
            assert!(pose.binormal.dot(&pose.tangent).abs() < 1e-9);
            assert!(pose.normal.dot(&pose.tangent).abs() < 1e-9);
        }
    }

    #[test]
    fn camera_looks_along_tangent_with_normal_up() {
        let (spline, tube) = rig(SplineKind::GrannyKnot, true);
        let animator = PathAnimator::new(20.0, DEFAULT_LOOK_AHEAD);
        let pose = animator.pose(0.37, &spline, &tube, 4.0, false);

        let forward = pose.orientation * -Vector3::z();
        let up = pose.orientation * Vector3::y();
        assert_relative_eq!(forward, pose.tangent, epsilon = 1e-9);
        assert_relative_eq!(up, pose.normal, epsilon = 1e-9);
        assert_relative_eq!(pose.target, pose.position + pose.tangent, epsilon = 1e-9);
    }

    #[test]
    fn position_is_scaled() {
        let (spline, tube) = rig(SplineKind::TorusKnot, true);
        let animator = PathAnimator::new(20.0, DEFAULT_LOOK_AHEAD);
        let pose = animator.pose(0.2, &spline, &tube, 6.0, true);
        assert_relative_eq!(pose.position, spline.point_at(0.2) * 6.0, epsilon = 1e-9);
    }

    #[test]
    fn look_ahead_wraps_on_closed_curves() {
        let (spline, tube) = rig(SplineKind::TrefoilKnot, true);
        let animator = PathAnimator::new(20.0, DEFAULT_LOOK_AHEAD);
        let t = 0.999;
        let pose = animator.pose(t, &spline, &tube, 2.0, true);
        let expected = spline.point_at(t + DEFAULT_LOOK_AHEAD / spline.length() - 1.0) * 2.0;
        assert_relative_eq!(pose.target, expected, epsilon = 1e-9);
    }

    #[test]
    fn look_ahead_clamps_on_open_curves() {
        let (spline, tube) = rig(SplineKind::HelixCurve, false);
        let animator = PathAnimator::new(20.0, DEFAULT_LOOK_AHEAD);
        let pose = animator.pose(0.999, &spline, &tube, 2.0, true);
        assert_relative_eq!(pose.target, spline.point_at(1.0) * 2.0, epsilon = 1e-9);

        // At the very end the target collapses onto the eye; orientation
        // must still be finite.
        let end = animator.pose(1.0, &spline, &tube, 2.0, true);
        assert!(end.orientation.coords.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn periodic_for_both_policies() {
        let (spline, tube) = rig(SplineKind::VivianiCurve, true);
        for look_ahead in [false, true] {
            let mut animator = PathAnimator::new(20.0, DEFAULT_LOOK_AHEAD);
            let start = animator.pose(animator.state().t(), &spline, &tube, 4.0, look_ahead);
            animator.advance(7.3);
            let mid = animator.pose(animator.state().t(), &spline, &tube, 4.0, look_ahead);
            animator.advance(20.0);
            let again = animator.pose(animator.state().t(), &spline, &tube, 4.0, look_ahead);
            assert_pose_eq(&mid, &again);

            let wrapped = animator.pose(1.0, &spline, &tube, 4.0, look_ahead);
            assert_pose_eq(&start, &wrapped);
        }
    }
}
