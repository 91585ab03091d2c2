use std::fmt;

use crate::math::{Point3, Vector3};

use super::arc_length::ArcLengthTable;
use super::curve::Curve;

/// Raw-parameter step used for finite-difference tangents.
const TANGENT_DELTA: f64 = 1e-4;

/// A curve wrapped with its arc-length table.
///
/// All queries take the arc-length-uniform parameter `u`: equal steps in `u`
/// cover equal distances along the curve. `u` wraps modulo 1 on closed
/// curves and clamps to `[0, 1]` on open ones.
pub struct Spline {
    curve: Box<dyn Curve>,
    lengths: ArcLengthTable,
}

impl Spline {
    /// Wraps `curve`, sampling its arc length with `divisions` chords.
    #[must_use]
    pub fn new(curve: Box<dyn Curve>, divisions: usize) -> Self {
        let lengths = ArcLengthTable::new(curve.as_ref(), divisions);
        Self { curve, lengths }
    }

    /// Whether the curve closes on itself.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.curve.is_closed()
    }

    /// Cached arc length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.lengths.total()
    }

    /// Folds `u` into the legal domain.
    #[must_use]
    pub fn normalize(&self, u: f64) -> f64 {
        if self.is_closed() {
            u.rem_euclid(1.0)
        } else {
            u.clamp(0.0, 1.0)
        }
    }

    /// Point at arc-length fraction `u`.
    #[must_use]
    pub fn point_at(&self, u: f64) -> Point3 {
        let t = self.lengths.raw_parameter(self.normalize(u));
        self.curve.evaluate(t)
    }

    /// Unit tangent at arc-length fraction `u`.
    ///
    /// Central difference in the raw parameter. Closed curves difference
    /// across the seam so both sides agree at `u = 0`.
    #[must_use]
    pub fn tangent_at(&self, u: f64) -> Vector3 {
        let t = self.lengths.raw_parameter(self.normalize(u));
        let (t1, t2) = if self.is_closed() {
            (
                (t - TANGENT_DELTA).rem_euclid(1.0),
                (t + TANGENT_DELTA).rem_euclid(1.0),
            )
        } else {
            (
                (t - TANGENT_DELTA).max(0.0),
                (t + TANGENT_DELTA).min(1.0),
            )
        };
        let delta = self.curve.evaluate(t2) - self.curve.evaluate(t1);
        delta
            .try_normalize(crate::math::TOLERANCE)
            .unwrap_or_else(Vector3::z)
    }
}

impl fmt::Debug for Spline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Spline")
            .field("curve", &self.curve)
            .field("closed", &self.is_closed())
            .field("length", &self.length())
            .finish()
    }
}
