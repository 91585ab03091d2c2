mod catmull_rom;
mod decorated_knot;
mod granny_knot;
mod helix;
mod knot_curve;
mod polynomial_knot;
mod torus_knot;
mod viviani;

pub use catmull_rom::{CatmullRom, CatmullRomMode};
pub use decorated_knot::{DecoratedTorusKnot, Decoration};
pub use granny_knot::GrannyKnot;
pub use helix::Helix;
pub use knot_curve::KnotCurve;
pub use polynomial_knot::{FigureEightPolynomialKnot, TrefoilPolynomialKnot};
pub use torus_knot::TorusKnot;
pub use viviani::VivianiCurve;

use crate::math::Point3;

/// Trait for parametric curves in 3D space.
///
/// Curves are evaluated over the raw parameter range `[0, 1]`. The raw
/// parameter is not arc-length uniform; [`Spline`](super::Spline) wraps a
/// curve with an arc-length table to provide uniform queries.
pub trait Curve: std::fmt::Debug + Send + Sync {
    /// Evaluates the curve at raw parameter `t`, returning the 3D point.
    fn evaluate(&self, t: f64) -> Point3;

    /// Returns whether `evaluate(0)` and `evaluate(1)` meet with matching tangents.
    fn is_closed(&self) -> bool;
}
