use super::curve::Curve;

/// Cumulative chord-length table over a curve's raw parameter.
///
/// Entry `i` holds the polyline length from `evaluate(0)` to
/// `evaluate(i / divisions)`. Used to convert an arc-length fraction `u`
/// back into the raw parameter `t`.
#[derive(Debug, Clone)]
pub struct ArcLengthTable {
    lengths: Vec<f64>,
}

impl ArcLengthTable {
    /// Samples `curve` at `divisions + 1` raw parameters. A zero division
    /// count is treated as one.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn new(curve: &dyn Curve, divisions: usize) -> Self {
        let divisions = divisions.max(1);
        let mut lengths = Vec::with_capacity(divisions + 1);
        let mut last = curve.evaluate(0.0);
        let mut sum = 0.0;
        lengths.push(sum);
        for i in 1..=divisions {
            let current = curve.evaluate(i as f64 / divisions as f64);
            sum += (current - last).norm();
            lengths.push(sum);
            last = current;
        }
        Self { lengths }
    }

    /// Total approximated length.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.lengths.last().copied().unwrap_or(0.0)
    }

    /// Number of divisions the table was built with.
    #[must_use]
    pub fn divisions(&self) -> usize {
        self.lengths.len() - 1
    }

    /// Maps an arc-length fraction `u` in `[0, 1]` to the raw parameter.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn raw_parameter(&self, u: f64) -> f64 {
        let total = self.total();
        if total <= 0.0 {
            return u;
        }
        let divisions = self.divisions();
        let target = u.clamp(0.0, 1.0) * total;

        // Last entry not exceeding the target.
        let i = self
            .lengths
            .partition_point(|&l| l <= target)
            .saturating_sub(1)
            .min(divisions - 1);

        let before = self.lengths[i];
        let segment = self.lengths[i + 1] - before;
        let fraction = if segment > 0.0 {
            ((target - before) / segment).clamp(0.0, 1.0)
        } else {
            0.0
        };
        (i as f64 + fraction) / divisions as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::curve::Helix;
    use crate::math::Point3;
    use approx::assert_relative_eq;

    /// Straight segment whose speed grows with `t`.
    #[derive(Debug)]
    struct Quadratic;

    impl Curve for Quadratic {
        fn evaluate(&self, t: f64) -> Point3 {
            Point3::new(10.0 * t * t, 0.0, 0.0)
        }

        fn is_closed(&self) -> bool {
            false
        }
    }

    #[test]
    fn quadratic_inverse() {
        let table = ArcLengthTable::new(&Quadratic, 200);
        assert_relative_eq!(table.total(), 10.0, epsilon = 1e-9);
        // Half the distance is reached at t = sqrt(0.5).
        assert_relative_eq!(table.raw_parameter(0.5), 0.5_f64.sqrt(), epsilon = 1e-4);
        assert_relative_eq!(table.raw_parameter(0.0), 0.0);
        assert_relative_eq!(table.raw_parameter(1.0), 1.0);
    }

    #[test]
    fn constant_speed_is_identity() {
        let table = ArcLengthTable::new(&Helix::new(30.0, 150.0, 5.0), 200);
        for i in 0..=10 {
            let u = f64::from(i) / 10.0;
            assert_relative_eq!(table.raw_parameter(u), u, epsilon = 1e-9);
        }
    }

    #[test]
    fn zero_divisions_fall_back_to_one() {
        let table = ArcLengthTable::new(&Quadratic, 0);
        assert_eq!(table.divisions(), 1);
    }
}
