use crate::math::{Point3, Vector3};

use super::Curve;

/// Knot spacing used when interpolating a Catmull-Rom spline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CatmullRomMode {
    /// Knot spacing by the square root of the chord length.
    Centripetal,
    /// Knot spacing by chord length.
    Chordal,
    /// Uniform knot spacing with the given tangent tension.
    Uniform { tension: f64 },
}

/// An interpolating cubic spline through a sequence of control points.
///
/// Open splines extrapolate a phantom point past each end so the curve
/// starts and ends exactly on the first and last control points. Closed
/// splines wrap the control polygon.
#[derive(Debug, Clone)]
pub struct CatmullRom {
    points: Vec<Point3>,
    closed: bool,
    mode: CatmullRomMode,
}

impl CatmullRom {
    /// Creates a new spline. Fewer than two points yield a degenerate curve
    /// that evaluates to its only point (or the origin).
    #[must_use]
    pub fn new(points: Vec<Point3>, closed: bool, mode: CatmullRomMode) -> Self {
        Self {
            points,
            closed,
            mode,
        }
    }

    /// Returns the control points.
    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Returns the four points surrounding segment `i`.
    fn neighbourhood(&self, i: usize) -> [Point3; 4] {
        let pts = &self.points;
        let l = pts.len();
        let p0 = if self.closed || i > 0 {
            pts[(i + l - 1) % l]
        } else {
            pts[0] + (pts[0] - pts[1])
        };
        let p1 = pts[i % l];
        let p2 = pts[(i + 1) % l];
        let p3 = if self.closed || i + 2 < l {
            pts[(i + 2) % l]
        } else {
            pts[l - 1] + (pts[l - 1] - pts[l - 2])
        };
        [p0, p1, p2, p3]
    }
}

impl Curve for CatmullRom {
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    fn evaluate(&self, t: f64) -> Point3 {
        let l = self.points.len();
        match l {
            0 => return Point3::origin(),
            1 => return self.points[0],
            _ => {}
        }

        let span = if self.closed { l } else { l - 1 };
        let t = if self.closed { t } else { t.clamp(0.0, 1.0) };
        let p = span as f64 * t;
        let mut segment = p.floor();
        let mut weight = p - segment;

        if self.closed {
            segment = segment.rem_euclid(l as f64);
        } else if segment >= (l - 1) as f64 {
            segment = (l - 2) as f64;
            weight = 1.0;
        }

        let [p0, p1, p2, p3] = self.neighbourhood(segment as usize);

        let (m1, m2) = match self.mode {
            CatmullRomMode::Uniform { tension } => ((p2 - p0) * tension, (p3 - p1) * tension),
            CatmullRomMode::Centripetal => nonuniform_tangents(p0, p1, p2, p3, 0.25),
            CatmullRomMode::Chordal => nonuniform_tangents(p0, p1, p2, p3, 0.5),
        };

        hermite(p1, p2, m1, m2, weight)
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

/// Segment tangents for non-uniform knot spacing, expressed in the
/// segment's unit parameter.
fn nonuniform_tangents(
    p0: Point3,
    p1: Point3,
    p2: Point3,
    p3: Point3,
    power: f64,
) -> (Vector3, Vector3) {
    let mut dt0 = (p1 - p0).norm_squared().powf(power);
    let mut dt1 = (p2 - p1).norm_squared().powf(power);
    let mut dt2 = (p3 - p2).norm_squared().powf(power);

    // Coincident points would divide by zero.
    if dt1 < 1e-4 {
        dt1 = 1.0;
    }
    if dt0 < 1e-4 {
        dt0 = dt1;
    }
    if dt2 < 1e-4 {
        dt2 = dt1;
    }

    let m1 = ((p1 - p0) / dt0 - (p2 - p0) / (dt0 + dt1) + (p2 - p1) / dt1) * dt1;
    let m2 = ((p2 - p1) / dt1 - (p3 - p1) / (dt1 + dt2) + (p3 - p2) / dt2) * dt1;
    (m1, m2)
}

/// Cubic Hermite interpolation between `a` and `b` with end tangents `ma`, `mb`.
fn hermite(a: Point3, b: Point3, ma: Vector3, mb: Vector3, w: f64) -> Point3 {
    let c0 = a.coords;
    let c1 = ma;
    let c2 = a.coords * -3.0 + b.coords * 3.0 - ma * 2.0 - mb;
    let c3 = a.coords * 2.0 - b.coords * 2.0 + ma + mb;
    Point3::from(c0 + c1 * w + c2 * (w * w) + c3 * (w * w * w))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Point3> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(10.0, 0.0, 0.0),
            Point3::new(10.0, 10.0, 0.0),
            Point3::new(0.0, 10.0, 0.0),
        ]
    }

    #[test]
    fn closed_uniform_interpolates_control_points() {
        let spline = CatmullRom::new(square(), true, CatmullRomMode::Uniform { tension: 0.5 });
        for (i, p) in square().iter().enumerate() {
            let q = spline.evaluate(i as f64 / 4.0);
            assert!((q - p).norm() < 1e-9, "control point {i}");
        }
    }

    #[test]
    fn closed_wraps_at_one() {
        let spline = CatmullRom::new(square(), true, CatmullRomMode::Uniform { tension: 0.5 });
        assert!((spline.evaluate(1.0) - spline.evaluate(0.0)).norm() < 1e-9);
        assert!(spline.is_closed());
    }

    #[test]
    fn open_centripetal_hits_both_ends() {
        let spline = CatmullRom::new(square(), false, CatmullRomMode::Centripetal);
        assert!((spline.evaluate(0.0) - square()[0]).norm() < 1e-9);
        assert!((spline.evaluate(1.0) - square()[3]).norm() < 1e-9);
        let mid = spline.evaluate(1.0 / 3.0);
        assert!((mid - square()[1]).norm() < 1e-9);
    }

    #[test]
    fn open_chordal_clamps_parameter() {
        let spline = CatmullRom::new(square(), false, CatmullRomMode::Chordal);
        assert!((spline.evaluate(1.5) - square()[3]).norm() < 1e-9);
        assert!((spline.evaluate(-0.5) - square()[0]).norm() < 1e-9);
    }

    #[test]
    fn degenerate_inputs() {
        let empty = CatmullRom::new(Vec::new(), false, CatmullRomMode::Centripetal);
        assert_eq!(empty.evaluate(0.3), Point3::origin());
        let single = CatmullRom::new(vec![Point3::new(1.0, 2.0, 3.0)], true, CatmullRomMode::Chordal);
        assert_eq!(single.evaluate(0.7), Point3::new(1.0, 2.0, 3.0));
    }
}
