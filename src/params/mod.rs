//! Live-tunable parameters shared by the control panel and MIDI input.

mod surface;
mod uniforms;

pub use surface::{Applied, ParameterSurface};
pub use uniforms::ShadingUniforms;

use std::fmt;
use std::str::FromStr;

use crate::error::ParameterError;
use crate::geometry::SplineKind;

/// Every parameter the rig exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamId {
    Spline,
    ExtrusionSegments,
    RadiusSegments,
    Radius,
    Closed,
    Scale,
    GridResolutionX,
    GridResolutionY,
    GridLineWidth,
    FaceColor,
    FaceAlpha,
    BackgroundColor,
    LineColor,
    Transparent,
    AnimationView,
    LookAhead,
    CameraHelper,
    SpeedFactor,
}

impl ParamId {
    pub const ALL: [ParamId; 18] = [
        Self::Spline,
        Self::ExtrusionSegments,
        Self::RadiusSegments,
        Self::Radius,
        Self::Closed,
        Self::Scale,
        Self::GridResolutionX,
        Self::GridResolutionY,
        Self::GridLineWidth,
        Self::FaceColor,
        Self::FaceAlpha,
        Self::BackgroundColor,
        Self::LineColor,
        Self::Transparent,
        Self::AnimationView,
        Self::LookAhead,
        Self::CameraHelper,
        Self::SpeedFactor,
    ];

    /// Declared spec of this parameter.
    #[must_use]
    pub fn spec(self) -> &'static ParamSpec {
        &SPECS[self as usize]
    }

    /// Identifier used by the panel and in logs.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.spec().name
    }

    /// Effect class of a write to this parameter.
    #[must_use]
    pub fn class(self) -> ParamClass {
        match self {
            Self::Spline
            | Self::ExtrusionSegments
            | Self::RadiusSegments
            | Self::Radius
            | Self::Closed => ParamClass::Geometry,
            Self::Scale => ParamClass::Transform,
            Self::GridResolutionX
            | Self::GridResolutionY
            | Self::GridLineWidth
            | Self::FaceColor
            | Self::FaceAlpha
            | Self::BackgroundColor
            | Self::LineColor
            | Self::Transparent => ParamClass::Shading,
            Self::AnimationView | Self::LookAhead | Self::CameraHelper | Self::SpeedFactor => {
                ParamClass::Camera
            }
        }
    }
}

impl fmt::Display for ParamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ParamId {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.name() == s)
            .ok_or_else(|| ParameterError::UnknownParameter(s.to_string()))
    }
}

/// What a write to a parameter affects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamClass {
    /// Requires rebuilding the tube mesh.
    Geometry,
    /// Mesh transform and camera scale.
    Transform,
    /// Shading uniforms only.
    Shading,
    /// Camera selection, look policy and animation speed.
    Camera,
}

/// Panel folder a parameter is shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Folder {
    Geometry,
    Camera,
    Custom,
}

/// Value type and legal range of a parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamKind {
    /// A number clamped to `[min, max]` and, with a step, snapped to
    /// `min + k * step`.
    Numeric { min: f64, max: f64, step: Option<f64> },
    Toggle,
    Color,
    Choice,
}

impl ParamKind {
    fn label(self) -> &'static str {
        match self {
            Self::Numeric { .. } => "number",
            Self::Toggle => "toggle",
            Self::Color => "color",
            Self::Choice => "spline",
        }
    }
}

/// An 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels scaled to `[0, 1]`.
    #[must_use]
    pub fn to_unit(self) -> [f64; 3] {
        [
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        ]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A parameter value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    Number(f64),
    Toggle(bool),
    Color(Color),
    Spline(SplineKind),
}

impl ParamValue {
    fn label(self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Toggle(_) => "toggle",
            Self::Color(_) => "color",
            Self::Spline(_) => "spline",
        }
    }
}

/// Declared properties of one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    pub id: ParamId,
    pub name: &'static str,
    pub label: &'static str,
    pub folder: Folder,
    pub kind: ParamKind,
    pub default: ParamValue,
}

const fn numeric(min: f64, max: f64, step: Option<f64>) -> ParamKind {
    ParamKind::Numeric { min, max, step }
}

// Indexed by `ParamId as usize`.
static SPECS: [ParamSpec; 18] = [
    ParamSpec {
        id: ParamId::Spline,
        name: "spline",
        label: "Spline",
        folder: Folder::Geometry,
        kind: ParamKind::Choice,
        default: ParamValue::Spline(SplineKind::TorusKnot),
    },
    ParamSpec {
        id: ParamId::ExtrusionSegments,
        name: "extrusionSegments",
        label: "Extrusion segments",
        folder: Folder::Geometry,
        kind: numeric(50.0, 500.0, Some(50.0)),
        default: ParamValue::Number(500.0),
    },
    ParamSpec {
        id: ParamId::RadiusSegments,
        name: "radiusSegments",
        label: "Radius segments",
        folder: Folder::Geometry,
        kind: numeric(3.0, 20.0, Some(1.0)),
        default: ParamValue::Number(20.0),
    },
    ParamSpec {
        id: ParamId::Radius,
        name: "radius",
        label: "Radius",
        folder: Folder::Geometry,
        kind: numeric(0.5, 13.0, Some(0.05)),
        default: ParamValue::Number(2.0),
    },
    ParamSpec {
        id: ParamId::Closed,
        name: "closed",
        label: "Closed",
        folder: Folder::Geometry,
        kind: ParamKind::Toggle,
        default: ParamValue::Toggle(true),
    },
    ParamSpec {
        id: ParamId::Scale,
        name: "scale",
        label: "Scale",
        folder: Folder::Geometry,
        kind: numeric(2.0, 10.0, Some(2.0)),
        default: ParamValue::Number(4.0),
    },
    ParamSpec {
        id: ParamId::GridResolutionX,
        name: "gridResolutionX",
        label: "Grid resolution X",
        folder: Folder::Custom,
        kind: numeric(0.0, 2.5, None),
        default: ParamValue::Number(0.25),
    },
    ParamSpec {
        id: ParamId::GridResolutionY,
        name: "gridResolutionY",
        label: "Grid resolution Y",
        folder: Folder::Custom,
        kind: numeric(0.0, 500.0, None),
        default: ParamValue::Number(0.0),
    },
    ParamSpec {
        id: ParamId::GridLineWidth,
        name: "gridLineWidth",
        label: "Grid line width",
        folder: Folder::Custom,
        kind: numeric(0.1, 50.0, None),
        default: ParamValue::Number(5.0),
    },
    ParamSpec {
        id: ParamId::FaceColor,
        name: "faceColor",
        label: "Tunnel face color",
        folder: Folder::Custom,
        kind: ParamKind::Color,
        default: ParamValue::Color(Color::BLACK),
    },
    ParamSpec {
        id: ParamId::FaceAlpha,
        name: "faceAlpha",
        label: "Tunnel face alpha",
        folder: Folder::Custom,
        kind: numeric(0.0, 1.0, None),
        default: ParamValue::Number(0.7),
    },
    ParamSpec {
        id: ParamId::BackgroundColor,
        name: "backgroundColor",
        label: "Background color",
        folder: Folder::Custom,
        kind: ParamKind::Color,
        default: ParamValue::Color(Color::rgb(200, 10, 30)),
    },
    ParamSpec {
        id: ParamId::LineColor,
        name: "lineColor",
        label: "Line color",
        folder: Folder::Custom,
        kind: ParamKind::Color,
        default: ParamValue::Color(Color::WHITE),
    },
    ParamSpec {
        id: ParamId::Transparent,
        name: "transparent",
        label: "Transparent",
        folder: Folder::Custom,
        kind: ParamKind::Toggle,
        default: ParamValue::Toggle(true),
    },
    ParamSpec {
        id: ParamId::AnimationView,
        name: "animationView",
        label: "Animation view",
        folder: Folder::Camera,
        kind: ParamKind::Toggle,
        default: ParamValue::Toggle(true),
    },
    ParamSpec {
        id: ParamId::LookAhead,
        name: "lookAhead",
        label: "Look ahead",
        folder: Folder::Camera,
        kind: ParamKind::Toggle,
        default: ParamValue::Toggle(false),
    },
    ParamSpec {
        id: ParamId::CameraHelper,
        name: "cameraHelper",
        label: "Camera helper",
        folder: Folder::Camera,
        kind: ParamKind::Toggle,
        default: ParamValue::Toggle(false),
    },
    ParamSpec {
        id: ParamId::SpeedFactor,
        name: "speedFactor",
        label: "Speed",
        folder: Folder::Custom,
        kind: numeric(0.0, 1.0, Some(0.05)),
        default: ParamValue::Number(1.0),
    },
];

/// Fits a value to its declared kind: snaps and clamps numbers, rejects a
/// value of the wrong kind.
pub(crate) fn conform(spec: &ParamSpec, value: ParamValue) -> Result<ParamValue, ParameterError> {
    match (spec.kind, value) {
        (ParamKind::Numeric { min, max, step }, ParamValue::Number(v)) => {
            if !v.is_finite() {
                return Err(ParameterError::NonFinite { id: spec.name });
            }
            let snapped = match step {
                Some(step) if step > 0.0 => min + ((v - min) / step).round() * step,
                _ => v,
            };
            Ok(ParamValue::Number(snapped.clamp(min, max)))
        }
        (ParamKind::Toggle, ParamValue::Toggle(_))
        | (ParamKind::Color, ParamValue::Color(_))
        | (ParamKind::Choice, ParamValue::Spline(_)) => Ok(value),
        (kind, value) => Err(ParameterError::KindMismatch {
            id: spec.name,
            expected: kind.label(),
            actual: value.label(),
        }),
    }
}
