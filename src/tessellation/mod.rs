mod frames;
mod tessellate_tube;

pub use frames::{moving_frames, FrameSample};
pub use tessellate_tube::TessellateTube;

use crate::math::{Point2, Point3, Vector3};

/// Parameters controlling tube discretization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TubeParams {
    /// Number of segments along the curve.
    pub extrusion_segments: usize,
    /// Number of vertices around each ring.
    pub radius_segments: usize,
    /// Tube radius.
    pub radius: f64,
    /// Whether the last ring connects back to the first.
    pub closed: bool,
}

impl Default for TubeParams {
    fn default() -> Self {
        Self {
            extrusion_segments: 500,
            radius_segments: 20,
            radius: 2.0,
            closed: true,
        }
    }
}

/// A triangle mesh approximation of a surface.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Vertex normals.
    pub normals: Vec<Vector3>,
    /// UV coordinates.
    pub uvs: Vec<Point2>,
    /// Triangle indices (each triple defines a triangle).
    pub indices: Vec<[u32; 3]>,
}

/// A tessellated tube together with the frames it was swept along.
#[derive(Debug, Clone, PartialEq)]
pub struct TubeMesh {
    /// Parameters the mesh was built with.
    pub params: TubeParams,
    /// One frame per ring.
    pub samples: Vec<FrameSample>,
    /// The triangulated surface.
    pub mesh: TriangleMesh,
}

/// The pair of samples surrounding a curve parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    pub index: usize,
    pub next: usize,
    /// Fractional position between `index` and `next`, in `[0, 1]`.
    pub fraction: f64,
}

impl TubeMesh {
    /// Number of rings (and frame samples).
    #[must_use]
    pub fn ring_count(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.mesh.vertices.len()
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.mesh.indices.len()
    }

    /// Finds the samples on either side of `t`.
    ///
    /// Closed meshes treat the `n` samples as `n` intervals that wrap back to
    /// sample 0. Open meshes span `n - 1` intervals from first to last.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn bracket(&self, t: f64) -> Bracket {
        let n = self.samples.len();
        if n < 2 {
            return Bracket {
                index: 0,
                next: 0,
                fraction: 0.0,
            };
        }

        if self.params.closed {
            let x = t.rem_euclid(1.0) * n as f64;
            let floor = x.floor();
            let index = (floor as usize) % n;
            Bracket {
                index,
                next: (index + 1) % n,
                fraction: x - floor,
            }
        } else {
            let x = t.clamp(0.0, 1.0) * (n - 1) as f64;
            let index = (x.floor() as usize).min(n - 2);
            Bracket {
                index,
                next: index + 1,
                fraction: (x - index as f64).clamp(0.0, 1.0),
            }
        }
    }
}
