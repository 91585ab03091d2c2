use std::f64::consts::TAU;

use tracing::info;

use crate::error::{Result, TessellationError};
use crate::geometry::Spline;
use crate::math::{Point2, Point3};

use super::frames::moving_frames;
use super::{TriangleMesh, TubeMesh, TubeParams};

const MIN_EXTRUSION_SEGMENTS: usize = 2;
const MIN_RADIUS_SEGMENTS: usize = 3;

/// Sweeps a polygonal ring along a spline into a tube.
pub struct TessellateTube<'a> {
    spline: &'a Spline,
    params: TubeParams,
}

impl<'a> TessellateTube<'a> {
    /// Creates a new `TessellateTube` operation.
    #[must_use]
    pub fn new(spline: &'a Spline, params: TubeParams) -> Self {
        Self { spline, params }
    }

    /// Executes the tessellation.
    ///
    /// A closed tube has `extrusion_segments` rings, the last one joined back
    /// to ring 0; an open tube has `extrusion_segments + 1`. Each ring holds
    /// `radius_segments` vertices and no vertex is duplicated at either seam.
    ///
    /// # Errors
    ///
    /// Returns [`TessellationError`] if a segment count is below its minimum
    /// or the radius is not a positive finite number.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn execute(&self) -> Result<TubeMesh> {
        let TubeParams {
            extrusion_segments,
            radius_segments,
            radius,
            closed,
        } = self.params;

        if extrusion_segments < MIN_EXTRUSION_SEGMENTS {
            return Err(TessellationError::TooFewExtrusionSegments {
                min: MIN_EXTRUSION_SEGMENTS,
                actual: extrusion_segments,
            }
            .into());
        }
        if radius_segments < MIN_RADIUS_SEGMENTS {
            return Err(TessellationError::TooFewRadiusSegments {
                min: MIN_RADIUS_SEGMENTS,
                actual: radius_segments,
            }
            .into());
        }
        if radius <= 0.0 || !radius.is_finite() {
            return Err(TessellationError::InvalidRadius(radius).into());
        }

        let samples = moving_frames(self.spline, extrusion_segments, closed);
        let rings = samples.len();

        let mut mesh = TriangleMesh {
            vertices: Vec::with_capacity(rings * radius_segments),
            normals: Vec::with_capacity(rings * radius_segments),
            uvs: Vec::with_capacity(rings * radius_segments),
            indices: Vec::with_capacity(2 * extrusion_segments * radius_segments),
        };

        for (ring, sample) in samples.iter().enumerate() {
            let u = ring as f64 / extrusion_segments as f64;
            for j in 0..radius_segments {
                let v = j as f64 / radius_segments as f64;
                let (sin, cos) = (v * TAU).sin_cos();
                let direction = sample.normal * -cos + sample.binormal * sin;
                mesh.vertices
                    .push(Point3::from(sample.position.coords + direction * radius));
                mesh.normals.push(direction);
                mesh.uvs.push(Point2::new(u, v));
            }
        }

        for ring in 0..extrusion_segments {
            let next_ring = (ring + 1) % rings;
            for j in 0..radius_segments {
                let next_j = (j + 1) % radius_segments;
                let a = (ring * radius_segments + j) as u32;
                let b = (next_ring * radius_segments + j) as u32;
                let c = (next_ring * radius_segments + next_j) as u32;
                let d = (ring * radius_segments + next_j) as u32;
                mesh.indices.push([a, b, d]);
                mesh.indices.push([b, c, d]);
            }
        }

        info!(
            rings,
            vertices = mesh.vertices.len(),
            triangles = mesh.indices.len(),
            closed,
            "tube tessellated"
        );

        Ok(TubeMesh {
            params: self.params,
            samples,
            mesh,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::TubeflightError;
    use crate::geometry::SplineKind;
    use approx::assert_relative_eq;

    fn params(extrusion_segments: usize, radius_segments: usize, closed: bool) -> TubeParams {
        TubeParams {
            extrusion_segments,
            radius_segments,
            radius: 1.0,
            closed,
        }
    }

    #[test]
    fn closed_sample_spline_8x6() {
        let spline = SplineKind::SampleClosedSpline.build();
        let tube = TessellateTube::new(&spline, params(8, 6, true))
            .execute()
            .unwrap();
        assert_eq!(tube.ring_count(), 8);
        assert_eq!(tube.vertex_count(), 48);
        assert_eq!(tube.triangle_count(), 96);

        // The last strip joins ring 7 to ring 0.
        let last_strip = &tube.mesh.indices[84..];
        for tri in last_strip {
            for &index in tri {
                let ring = index as usize / 6;
                assert!(ring == 7 || ring == 0, "unexpected ring {ring}");
            }
        }
        assert!(tube.mesh.indices.iter().flatten().all(|&i| i < 48));
    }

    #[test]
    fn open_tube_has_extra_ring() {
        let spline = SplineKind::HelixCurve.build();
        let tube = TessellateTube::new(&spline, params(10, 4, false))
            .execute()
            .unwrap();
        assert_eq!(tube.ring_count(), 11);
        assert_eq!(tube.vertex_count(), 44);
        assert_eq!(tube.triangle_count(), 80);
        let max = tube.mesh.indices.iter().flatten().max().copied().unwrap();
        assert_eq!(max, 43);
    }

    #[test]
    fn vertices_sit_at_radius() {
        let spline = SplineKind::TorusKnot.build();
        let tube = TessellateTube::new(
            &spline,
            TubeParams {
                radius: 2.5,
                ..params(40, 8, true)
            },
        )
        .execute()
        .unwrap();
        for (ring, sample) in tube.samples.iter().enumerate() {
            for j in 0..8 {
                let k = ring * 8 + j;
                let offset = tube.mesh.vertices[k] - sample.position;
                assert_relative_eq!(offset.norm(), 2.5, epsilon = 1e-9);
                assert!(offset.dot(&sample.tangent).abs() < 1e-9);
                assert_relative_eq!(tube.mesh.normals[k], offset / 2.5, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn rebuild_is_deterministic() {
        let spline = SplineKind::GrannyKnot.build();
        let a = TessellateTube::new(&spline, TubeParams::default())
            .execute()
            .unwrap();
        let b = TessellateTube::new(&spline, TubeParams::default())
            .execute()
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_invalid_params() {
        let spline = SplineKind::TorusKnot.build();
        let err = TessellateTube::new(&spline, params(1, 6, true))
            .execute()
            .unwrap_err();
        assert!(matches!(
            err,
            TubeflightError::Tessellation(TessellationError::TooFewExtrusionSegments {
                min: 2,
                actual: 1
            })
        ));

        let err = TessellateTube::new(&spline, params(8, 2, true))
            .execute()
            .unwrap_err();
        assert!(matches!(
            err,
            TubeflightError::Tessellation(TessellationError::TooFewRadiusSegments { .. })
        ));

        for radius in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let bad = TubeParams {
                radius,
                ..params(8, 6, true)
            };
            let err = TessellateTube::new(&spline, bad).execute().unwrap_err();
            assert!(matches!(
                err,
                TubeflightError::Tessellation(TessellationError::InvalidRadius(_))
            ));
        }
    }

    #[test]
    fn bracket_closed_wraps() {
        let spline = SplineKind::SampleClosedSpline.build();
        let tube = TessellateTube::new(&spline, params(8, 6, true))
            .execute()
            .unwrap();
        let b = tube.bracket(0.95);
        assert_eq!((b.index, b.next), (7, 0));
        assert_relative_eq!(b.fraction, 0.6, epsilon = 1e-9);
    }

    #[test]
    fn bracket_open_stays_inside() {
        let spline = SplineKind::HelixCurve.build();
        let tube = TessellateTube::new(&spline, params(10, 4, false))
            .execute()
            .unwrap();
        let b = tube.bracket(0.999_999);
        assert_eq!((b.index, b.next), (9, 10));
        let end = tube.bracket(1.0);
        assert_eq!((end.index, end.next), (9, 10));
        assert_relative_eq!(end.fraction, 1.0);
        let mid = tube.bracket(0.25);
        assert_eq!((mid.index, mid.next), (2, 3));
        assert_relative_eq!(mid.fraction, 0.5, epsilon = 1e-9);
    }
}
