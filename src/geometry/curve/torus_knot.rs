use std::f64::consts::TAU;

use crate::math::Point3;

use super::Curve;

/// A `(p, q)` torus knot wound around a torus of major radius 2 and minor radius 1.
///
/// `P(s) = scale * ((2 + cos(q s)) cos(p s), (2 + cos(q s)) sin(p s), sin(q s))`
/// with `s = 2 pi t`. The trefoil is the `(2, 3)` knot.
#[derive(Debug, Clone, Copy)]
pub struct TorusKnot {
    p: f64,
    q: f64,
    scale: f64,
}

impl TorusKnot {
    /// Creates a new torus knot with winding numbers `p`, `q`.
    #[must_use]
    pub fn new(p: u32, q: u32, scale: f64) -> Self {
        Self {
            p: f64::from(p),
            q: f64::from(q),
            scale,
        }
    }
}

impl Curve for TorusKnot {
    fn evaluate(&self, t: f64) -> Point3 {
        let s = t * TAU;
        let ring = 2.0 + (self.q * s).cos();
        Point3::new(
            ring * (self.p * s).cos(),
            ring * (self.p * s).sin(),
            (self.q * s).sin(),
        ) * self.scale
    }

    fn is_closed(&self) -> bool {
        true
    }
}
