use std::f64::consts::TAU;

use crate::math::Point3;

use super::Curve;

/// Viviani's curve: the intersection of a sphere with a cylinder tangent to
/// its axis.
///
/// The full figure-eight needs an angular span of `4 pi`, so the raw
/// parameter `t` is mapped onto `s = 4 pi t`:
///
/// `P(s) = (a (1 + cos s), a sin s, 2 a sin(s / 2))` with `a = scale / 2`.
#[derive(Debug, Clone, Copy)]
pub struct VivianiCurve {
    scale: f64,
}

impl VivianiCurve {
    #[must_use]
    pub fn new(scale: f64) -> Self {
        Self { scale }
    }
}

impl Curve for VivianiCurve {
    fn evaluate(&self, t: f64) -> Point3 {
        let s = t * 2.0 * TAU;
        let a = self.scale * 0.5;
        Point3::new(a * (1.0 + s.cos()), a * s.sin(), 2.0 * a * (s * 0.5).sin())
    }

    fn is_closed(&self) -> bool {
        true
    }
}
