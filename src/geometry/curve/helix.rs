use std::f64::consts::TAU;

use crate::math::Point3;

use super::Curve;

/// An open circular helix rising along +Z.
#[derive(Debug, Clone, Copy)]
pub struct Helix {
    radius: f64,
    height: f64,
    turns: f64,
}

impl Helix {
    /// Creates a helix of `turns` revolutions climbing `height` units.
    #[must_use]
    pub fn new(radius: f64, height: f64, turns: f64) -> Self {
        Self {
            radius,
            height,
            turns,
        }
    }
}

impl Curve for Helix {
    fn evaluate(&self, t: f64) -> Point3 {
        let angle = TAU * self.turns * t;
        Point3::new(
            angle.cos() * self.radius,
            angle.sin() * self.radius,
            self.height * t,
        )
    }

    fn is_closed(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints() {
        let h = Helix::new(30.0, 150.0, 5.0);
        assert!((h.evaluate(0.0) - Point3::new(30.0, 0.0, 0.0)).norm() < 1e-9);
        assert!((h.evaluate(1.0) - Point3::new(30.0, 0.0, 150.0)).norm() < 1e-9);
        assert!(!h.is_closed());
    }
}
