/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Unit quaternion used for camera orientation.
pub type UnitQuaternion = nalgebra::UnitQuaternion<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Linear interpolation between `a` and `b`.
#[must_use]
pub fn lerp(a: f64, b: f64, alpha: f64) -> f64 {
    a + (b - a) * alpha
}

/// Maps `value` linearly from `[in_min, in_max]` onto `[out_min, out_max]`.
///
/// The output range may be reversed (`out_min > out_max`) for inverted maps.
#[must_use]
pub fn map_linear(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    out_min + (value - in_min) * (out_max - out_min) / (in_max - in_min)
}

/// Rotates `v` about the unit `axis` by `angle` radians (Rodrigues).
#[must_use]
pub fn rotate_about(v: &Vector3, axis: &Vector3, angle: f64) -> Vector3 {
    let (sin_a, cos_a) = angle.sin_cos();
    v * cos_a + axis.cross(v) * sin_a + axis * axis.dot(v) * (1.0 - cos_a)
}

/// Angle in radians between two vectors, robust to rounding past ±1.
#[must_use]
pub fn angle_between(a: &Vector3, b: &Vector3) -> f64 {
    let denom = a.norm() * b.norm();
    if denom < TOLERANCE {
        return 0.0;
    }
    (a.dot(b) / denom).clamp(-1.0, 1.0).acos()
}
