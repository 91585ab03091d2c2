use std::f64::consts::TAU;

use crate::math::Point3;

use super::Curve;

/// The granny knot: a trigonometric composite of two trefoils, scaled by 20.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrannyKnot;

impl Curve for GrannyKnot {
    fn evaluate(&self, t: f64) -> Point3 {
        let s = t * TAU;
        let x = -0.22 * s.cos() - 1.28 * s.sin() - 0.44 * (3.0 * s).cos()
            - 0.78 * (3.0 * s).sin();
        let y = -0.1 * (2.0 * s).cos() - 0.27 * (2.0 * s).sin()
            + 0.38 * (4.0 * s).cos()
            + 0.46 * (4.0 * s).sin();
        let z = 0.7 * (3.0 * s).cos() - 0.4 * (3.0 * s).sin();
        Point3::new(x, y, z) * 20.0
    }

    fn is_closed(&self) -> bool {
        true
    }
}
