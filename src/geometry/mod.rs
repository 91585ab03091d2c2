mod arc_length;
pub mod catalog;
pub mod curve;
mod spline;

pub use arc_length::ArcLengthTable;
pub use catalog::SplineKind;
pub use curve::{CatmullRom, CatmullRomMode, Curve};
pub use spline::Spline;
