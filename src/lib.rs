pub mod animation;
pub mod config;
pub mod error;
pub mod geometry;
pub mod input;
pub mod math;
pub mod params;
pub mod rig;
pub mod tessellation;

pub use config::RigConfig;
pub use error::{Result, TubeflightError};
pub use rig::{RenderSurface, Rig, SceneView};
