//! Moving frames sampled along a spline.
//!
//! Frames are propagated by parallel transport (the minimal rotation taking
//! one tangent onto the next), so the normal never flips. Closed tubes get
//! the residual twist at the seam spread evenly over all samples.

use crate::geometry::Spline;
use crate::math::{angle_between, rotate_about, Point3, Vector3, TOLERANCE};

/// One sample of the moving frame.
///
/// `(tangent, normal, binormal)` is orthonormal and right-handed:
/// `binormal = tangent x normal`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSample {
    /// Curve point at `t`.
    pub position: Point3,
    /// Unit tangent.
    pub tangent: Vector3,
    /// Unit normal.
    pub normal: Vector3,
    /// Unit binormal.
    pub binormal: Vector3,
    /// Arc-length parameter of the sample.
    pub t: f64,
}

/// Samples `segments + 1` frames at `t = i / segments` (only `segments`
/// when `closed`, the last one being the first one again).
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn moving_frames(spline: &Spline, segments: usize, closed: bool) -> Vec<FrameSample> {
    let segments = segments.max(1);
    let mut samples: Vec<FrameSample> = Vec::with_capacity(segments + 1);

    for i in 0..=segments {
        let t = i as f64 / segments as f64;
        let position = spline.point_at(t);
        let tangent = spline.tangent_at(t);

        let normal = match samples.last() {
            None => initial_normal(&tangent),
            Some(prev) => transport(prev, &tangent),
        };
        samples.push(FrameSample {
            position,
            tangent,
            normal,
            binormal: tangent.cross(&normal),
            t,
        });
    }

    if closed {
        close_seam(&mut samples, segments);
        samples.truncate(segments);
    }
    samples
}

/// Seeds the normal from the axis along which the tangent is smallest.
fn initial_normal(tangent: &Vector3) -> Vector3 {
    let (x, y, z) = (tangent.x.abs(), tangent.y.abs(), tangent.z.abs());
    let axis = if x <= y && x <= z {
        Vector3::x()
    } else if y <= z {
        Vector3::y()
    } else {
        Vector3::z()
    };
    let side = tangent
        .cross(&axis)
        .try_normalize(TOLERANCE)
        .unwrap_or_else(Vector3::y);
    tangent.cross(&side)
}

/// Carries the previous normal onto the plane orthogonal to `tangent`.
fn transport(prev: &FrameSample, tangent: &Vector3) -> Vector3 {
    let mut normal = prev.normal;
    if let Some(axis) = prev.tangent.cross(tangent).try_normalize(TOLERANCE) {
        normal = rotate_about(&normal, &axis, angle_between(&prev.tangent, tangent));
    }
    orthogonalize(&normal, tangent).unwrap_or(prev.normal)
}

/// Gram-Schmidt step of `normal` against `tangent`.
fn orthogonalize(normal: &Vector3, tangent: &Vector3) -> Option<Vector3> {
    (normal - tangent * tangent.dot(normal)).try_normalize(TOLERANCE)
}

/// Spreads the seam mismatch between the first normal and the transported
/// last normal linearly over the samples.
#[allow(clippy::cast_precision_loss)]
fn close_seam(samples: &mut [FrameSample], segments: usize) {
    let first = samples[0];
    let last = samples[segments];

    let mut theta = angle_between(&first.normal, &last.normal) / segments as f64;
    if first.tangent.dot(&first.normal.cross(&last.normal)) > 0.0 {
        theta = -theta;
    }

    for (i, sample) in samples.iter_mut().enumerate().skip(1) {
        let rotated = rotate_about(&sample.normal, &sample.tangent, theta * i as f64);
        sample.normal = orthogonalize(&rotated, &sample.tangent).unwrap_or(rotated);
        sample.binormal = sample.tangent.cross(&sample.normal);
    }
}
