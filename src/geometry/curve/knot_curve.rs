use std::f64::consts::TAU;

use crate::math::Point3;

use super::Curve;

const INNER: f64 = 10.0;
const OUTER: f64 = 50.0;

/// A looping knot swept around the X axis.
#[derive(Debug, Clone, Copy, Default)]
pub struct KnotCurve;

impl Curve for KnotCurve {
    fn evaluate(&self, t: f64) -> Point3 {
        let s = t * TAU;
        let sweep = INNER + OUTER * s.cos();
        Point3::new(OUTER * s.sin(), s.cos() * sweep, s.sin() * sweep)
    }

    fn is_closed(&self) -> bool {
        true
    }
}
