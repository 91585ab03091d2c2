use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParameterError;
use crate::math::Point3;

use super::curve::{
    CatmullRom, CatmullRomMode, Curve, DecoratedTorusKnot, Decoration, FigureEightPolynomialKnot,
    GrannyKnot, Helix, KnotCurve, TorusKnot, TrefoilPolynomialKnot, VivianiCurve,
};
use super::spline::Spline;

/// Default chord count of the arc-length table.
pub const DEFAULT_ARC_DIVISIONS: usize = 200;

/// The fixed catalog of named curves the rig can fly through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SplineKind {
    GrannyKnot,
    VivianiCurve,
    KnotCurve,
    HelixCurve,
    TrefoilKnot,
    #[default]
    TorusKnot,
    CinquefoilKnot,
    TrefoilPolynomialKnot,
    FigureEightPolynomialKnot,
    DecoratedTorusKnot4a,
    DecoratedTorusKnot4b,
    DecoratedTorusKnot5a,
    DecoratedTorusKnot5c,
    PipeSpline,
    SampleClosedSpline,
}

impl SplineKind {
    /// Every catalog entry, in panel order.
    pub const ALL: [SplineKind; 15] = [
        Self::GrannyKnot,
        Self::VivianiCurve,
        Self::KnotCurve,
        Self::HelixCurve,
        Self::TrefoilKnot,
        Self::TorusKnot,
        Self::CinquefoilKnot,
        Self::TrefoilPolynomialKnot,
        Self::FigureEightPolynomialKnot,
        Self::DecoratedTorusKnot4a,
        Self::DecoratedTorusKnot4b,
        Self::DecoratedTorusKnot5a,
        Self::DecoratedTorusKnot5c,
        Self::PipeSpline,
        Self::SampleClosedSpline,
    ];

    /// Catalog name as shown in the panel.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::GrannyKnot => "GrannyKnot",
            Self::VivianiCurve => "VivianiCurve",
            Self::KnotCurve => "KnotCurve",
            Self::HelixCurve => "HelixCurve",
            Self::TrefoilKnot => "TrefoilKnot",
            Self::TorusKnot => "TorusKnot",
            Self::CinquefoilKnot => "CinquefoilKnot",
            Self::TrefoilPolynomialKnot => "TrefoilPolynomialKnot",
            Self::FigureEightPolynomialKnot => "FigureEightPolynomialKnot",
            Self::DecoratedTorusKnot4a => "DecoratedTorusKnot4a",
            Self::DecoratedTorusKnot4b => "DecoratedTorusKnot4b",
            Self::DecoratedTorusKnot5a => "DecoratedTorusKnot5a",
            Self::DecoratedTorusKnot5c => "DecoratedTorusKnot5c",
            Self::PipeSpline => "PipeSpline",
            Self::SampleClosedSpline => "SampleClosedSpline",
        }
    }

    /// Builds the spline with the default arc-length resolution.
    #[must_use]
    pub fn build(self) -> Spline {
        self.build_with(DEFAULT_ARC_DIVISIONS)
    }

    /// Builds the spline with `divisions` arc-length chords.
    #[must_use]
    pub fn build_with(self, divisions: usize) -> Spline {
        Spline::new(self.curve(), divisions)
    }

    fn curve(self) -> Box<dyn Curve> {
        match self {
            Self::GrannyKnot => Box::new(GrannyKnot),
            Self::VivianiCurve => Box::new(VivianiCurve::new(70.0)),
            Self::KnotCurve => Box::new(KnotCurve),
            Self::HelixCurve => Box::new(Helix::new(30.0, 150.0, 5.0)),
            Self::TrefoilKnot => Box::new(TorusKnot::new(2, 3, 10.0)),
            Self::TorusKnot => Box::new(TorusKnot::new(3, 4, 20.0)),
            Self::CinquefoilKnot => Box::new(TorusKnot::new(2, 5, 20.0)),
            Self::TrefoilPolynomialKnot => Box::new(TrefoilPolynomialKnot::new(14.0)),
            Self::FigureEightPolynomialKnot => Box::new(FigureEightPolynomialKnot::new(1.0)),
            Self::DecoratedTorusKnot4a => {
                Box::new(DecoratedTorusKnot::new(Decoration::FourA, 40.0))
            }
            Self::DecoratedTorusKnot4b => {
                Box::new(DecoratedTorusKnot::new(Decoration::FourB, 40.0))
            }
            Self::DecoratedTorusKnot5a => {
                Box::new(DecoratedTorusKnot::new(Decoration::FiveA, 40.0))
            }
            Self::DecoratedTorusKnot5c => {
                Box::new(DecoratedTorusKnot::new(Decoration::FiveC, 40.0))
            }
            Self::PipeSpline => Box::new(CatmullRom::new(
                pipe_points(),
                false,
                CatmullRomMode::Centripetal,
            )),
            Self::SampleClosedSpline => Box::new(CatmullRom::new(
                vec![
                    Point3::new(0.0, -40.0, -40.0),
                    Point3::new(0.0, 40.0, -40.0),
                    Point3::new(0.0, 140.0, -40.0),
                    Point3::new(0.0, 40.0, 40.0),
                    Point3::new(0.0, -40.0, 40.0),
                ],
                true,
                CatmullRomMode::Uniform { tension: 0.5 },
            )),
        }
    }
}

fn pipe_points() -> Vec<Point3> {
    [
        (0.0, 10.0, -10.0),
        (10.0, 0.0, -10.0),
        (20.0, 0.0, 0.0),
        (30.0, 0.0, 10.0),
        (30.0, 0.0, 20.0),
        (20.0, 0.0, 30.0),
        (10.0, 0.0, 30.0),
        (0.0, 0.0, 30.0),
        (-10.0, 10.0, 30.0),
        (-10.0, 20.0, 30.0),
        (0.0, 30.0, 30.0),
        (10.0, 30.0, 30.0),
        (20.0, 30.0, 15.0),
        (10.0, 30.0, 10.0),
        (0.0, 30.0, 10.0),
        (-10.0, 20.0, 10.0),
        (-10.0, 10.0, 10.0),
        (0.0, 0.0, 10.0),
        (10.0, -10.0, 10.0),
        (20.0, -15.0, 10.0),
        (30.0, -15.0, 10.0),
        (40.0, -15.0, 10.0),
        (50.0, -15.0, 10.0),
        (60.0, 0.0, 10.0),
        (70.0, 0.0, 0.0),
        (80.0, 0.0, 0.0),
        (90.0, 0.0, 0.0),
        (100.0, 0.0, 0.0),
    ]
    .into_iter()
    .map(|(x, y, z)| Point3::new(x, y, z))
    .collect()
}

impl fmt::Display for SplineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SplineKind {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| ParameterError::UnknownSpline(s.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn samples() -> impl Iterator<Item = f64> {
        (0..=400).map(|i| f64::from(i) / 400.0)
    }

    #[test]
    fn names_round_trip() {
        for kind in SplineKind::ALL {
            assert_eq!(kind.name().parse::<SplineKind>().unwrap(), kind);
        }
        assert!("HeartCurve".parse::<SplineKind>().is_err());
    }

    #[test]
    fn every_tangent_is_unit() {
        for kind in SplineKind::ALL {
            let spline = kind.build();
            for u in samples() {
                let tangent = spline.tangent_at(u);
                assert!(
                    (tangent.norm() - 1.0).abs() < 1e-9,
                    "{kind} at {u}: {tangent:?}"
                );
            }
        }
    }

    #[test]
    fn closed_curves_meet_at_seam() {
        for kind in SplineKind::ALL {
            let spline = kind.build();
            if !spline.is_closed() {
                continue;
            }
            let gap = (spline.point_at(0.0) - spline.point_at(1.0 - 1e-9)).norm();
            assert!(gap < 1e-3, "{kind} seam gap {gap}");
            let turn = (spline.tangent_at(0.0) - spline.tangent_at(1.0 - 1e-9)).norm();
            assert!(turn < 1e-2, "{kind} seam tangent jump {turn}");
        }
    }

    #[test]
    fn open_entries() {
        let open: Vec<_> = SplineKind::ALL
            .into_iter()
            .filter(|kind| !kind.build().is_closed())
            .collect();
        assert_eq!(
            open,
            vec![
                SplineKind::HelixCurve,
                SplineKind::TrefoilPolynomialKnot,
                SplineKind::FigureEightPolynomialKnot,
                SplineKind::PipeSpline,
            ]
        );
    }

    #[test]
    fn default_is_torus_knot() {
        assert_eq!(SplineKind::default(), SplineKind::TorusKnot);
        assert!(SplineKind::default().build().length() > 0.0);
    }

    #[test]
    fn pipe_spline_endpoints() {
        let spline = SplineKind::PipeSpline.build();
        assert!((spline.point_at(0.0) - Point3::new(0.0, 10.0, -10.0)).norm() < 1e-9);
        assert!((spline.point_at(1.0) - Point3::new(100.0, 0.0, 0.0)).norm() < 1e-9);
    }
}
