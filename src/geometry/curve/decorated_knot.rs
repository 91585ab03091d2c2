use std::f64::consts::TAU;

use crate::math::Point3;

use super::Curve;

/// Shape variants of the decorated torus knot family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoration {
    FourA,
    FourB,
    FiveA,
    FiveC,
}

/// A torus knot whose radial distance is modulated by higher harmonics.
#[derive(Debug, Clone, Copy)]
pub struct DecoratedTorusKnot {
    decoration: Decoration,
    scale: f64,
}

impl DecoratedTorusKnot {
    #[must_use]
    pub fn new(decoration: Decoration, scale: f64) -> Self {
        Self { decoration, scale }
    }

    /// Returns `(winding, radial modulation, height)` at angle `fi`.
    fn terms(&self, fi: f64) -> (f64, f64, f64) {
        match self.decoration {
            Decoration::FourA => (
                2.0,
                1.0 + 0.6 * ((5.0 * fi).cos() + 0.75 * (10.0 * fi).cos()),
                0.35 * (5.0 * fi).sin(),
            ),
            Decoration::FourB => (
                2.0,
                1.0 + 0.45 * (3.0 * fi).cos() + 0.4 * (9.0 * fi).cos(),
                0.2 * (9.0 * fi).sin(),
            ),
            Decoration::FiveA => (
                3.0,
                1.0 + 0.3 * (5.0 * fi).cos() + 0.5 * (10.0 * fi).cos(),
                0.2 * (20.0 * fi).sin(),
            ),
            Decoration::FiveC => (
                4.0,
                1.0 + 0.5 * ((5.0 * fi).cos() + 0.4 * (20.0 * fi).cos()),
                0.35 * (15.0 * fi).sin(),
            ),
        }
    }
}

impl Curve for DecoratedTorusKnot {
    fn evaluate(&self, t: f64) -> Point3 {
        let fi = t * TAU;
        let (winding, radial, height) = self.terms(fi);
        Point3::new(
            (winding * fi).cos() * radial,
            (winding * fi).sin() * radial,
            height,
        ) * self.scale
    }

    fn is_closed(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Decoration; 4] = [
        Decoration::FourA,
        Decoration::FourB,
        Decoration::FiveA,
        Decoration::FiveC,
    ];

    #[test]
    fn four_a_start_point() {
        let knot = DecoratedTorusKnot::new(Decoration::FourA, 40.0);
        let p = knot.evaluate(0.0);
        assert!((p - Point3::new(82.0, 0.0, 0.0)).norm() < 1e-9);
    }

    #[test]
    fn every_variant_is_periodic() {
        for decoration in ALL {
            let knot = DecoratedTorusKnot::new(decoration, 40.0);
            assert!((knot.evaluate(0.0) - knot.evaluate(1.0)).norm() < 1e-9);
        }
    }

    #[test]
    fn radial_term_never_collapses() {
        for decoration in ALL {
            let knot = DecoratedTorusKnot::new(decoration, 1.0);
            for i in 0..2000 {
                let (_, radial, _) = knot.terms(f64::from(i) / 2000.0 * TAU);
                assert!(radial > 0.0);
            }
        }
    }
}
