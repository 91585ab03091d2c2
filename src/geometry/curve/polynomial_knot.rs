use crate::math::{lerp, Point3};

use super::Curve;

/// Polynomial trefoil, an open curve sampled over `s in [-2, 2]`.
#[derive(Debug, Clone, Copy)]
pub struct TrefoilPolynomialKnot {
    scale: f64,
}

impl TrefoilPolynomialKnot {
    #[must_use]
    pub fn new(scale: f64) -> Self {
        Self { scale }
    }
}

impl Curve for TrefoilPolynomialKnot {
    fn evaluate(&self, t: f64) -> Point3 {
        let s = lerp(-2.0, 2.0, t);
        let s2 = s * s;
        Point3::new(
            s * s2 - 3.0 * s,
            s2 * s2 - 4.0 * s2,
            0.2 * s2 * s2 * s - 2.0 * s,
        ) * self.scale
    }

    fn is_closed(&self) -> bool {
        false
    }
}

/// Polynomial figure-eight knot, an open curve sampled over `s in [-4, 4]`.
#[derive(Debug, Clone, Copy)]
pub struct FigureEightPolynomialKnot {
    scale: f64,
}

impl FigureEightPolynomialKnot {
    #[must_use]
    pub fn new(scale: f64) -> Self {
        Self { scale }
    }
}

impl Curve for FigureEightPolynomialKnot {
    fn evaluate(&self, t: f64) -> Point3 {
        let s = lerp(-4.0, 4.0, t);
        let s2 = s * s;
        Point3::new(
            0.4 * s * (s2 - 7.0) * (s2 - 10.0),
            s2 * s2 - 13.0 * s2,
            0.1 * s * (s2 - 4.0) * (s2 - 9.0) * (s2 - 12.0),
        ) * self.scale
    }

    fn is_closed(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trefoil_start_and_middle() {
        let k = TrefoilPolynomialKnot::new(14.0);
        assert!((k.evaluate(0.0) - Point3::new(-28.0, 0.0, -33.6)).norm() < 1e-9);
        assert!(k.evaluate(0.5).coords.norm() < 1e-12);
    }

    #[test]
    fn figure_eight_passes_origin() {
        let k = FigureEightPolynomialKnot::new(1.0);
        assert!(k.evaluate(0.5).coords.norm() < 1e-12);
        assert!(!k.is_closed());
    }
}
