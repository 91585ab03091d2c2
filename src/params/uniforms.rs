use crate::math::{Vector2, Vector3};

use super::{ParamId, ParameterSurface};

/// Values handed to the tube's grid shader.
///
/// The grid divides the tube's uv space: `resolution.x` controls the
/// spacing of rings along the tube and `resolution.y` the number of lines
/// around it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadingUniforms {
    /// Seconds since the rig started.
    pub time: f64,
    pub base_pos: Vector3,
    pub line_width: Vector2,
    pub resolution: Vector2,
    pub face_color: [f64; 3],
    pub face_alpha: f64,
    pub line_color: [f64; 3],
    pub background: [f64; 3],
    pub transparent: bool,
}

impl ShadingUniforms {
    /// Reads the shading parameters from `surface`.
    #[must_use]
    pub fn from_surface(surface: &ParameterSurface) -> Self {
        let mut uniforms = Self {
            time: 0.0,
            base_pos: Vector3::zeros(),
            line_width: Vector2::zeros(),
            resolution: Vector2::zeros(),
            face_color: [0.0; 3],
            face_alpha: 0.0,
            line_color: [0.0; 3],
            background: [0.0; 3],
            transparent: false,
        };
        uniforms.refresh(surface);
        uniforms
    }

    /// Re-reads the shading parameters, keeping `time` and `base_pos`.
    pub fn refresh(&mut self, surface: &ParameterSurface) {
        self.line_width = Vector2::new(surface.number(ParamId::GridLineWidth), 0.0);
        self.resolution = Vector2::new(
            surface.number(ParamId::GridResolutionX),
            surface.number(ParamId::GridResolutionY),
        );
        self.face_color = surface.color(ParamId::FaceColor).to_unit();
        self.face_alpha = surface.number(ParamId::FaceAlpha);
        self.line_color = surface.color(ParamId::LineColor).to_unit();
        self.background = surface.color(ParamId::BackgroundColor).to_unit();
        self.transparent = surface.toggle(ParamId::Transparent);
    }
}
