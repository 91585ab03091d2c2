use std::fmt;
use std::str::FromStr;

use crate::error::MappingError;
use crate::math::map_linear;
use crate::params::{ParamId, ParamKind, ParamValue};

/// Highest MIDI data byte.
pub const MAX_VELOCITY: u8 = 127;

/// Parameter mutations a MIDI control can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlAction {
    Radius,
    GridResolutionX,
    GridResolutionY,
    Scale,
}

/// A write destined for the parameter surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamWrite {
    pub id: ParamId,
    pub value: ParamValue,
}

impl ControlAction {
    pub const ALL: [ControlAction; 4] = [
        Self::Radius,
        Self::GridResolutionX,
        Self::GridResolutionY,
        Self::Scale,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Radius => "radius",
            Self::GridResolutionX => "gridResolutionX",
            Self::GridResolutionY => "gridResolutionY",
            Self::Scale => "scale",
        }
    }

    /// The parameter this action writes.
    #[must_use]
    pub fn target(self) -> ParamId {
        match self {
            Self::Radius => ParamId::Radius,
            Self::GridResolutionX => ParamId::GridResolutionX,
            Self::GridResolutionY => ParamId::GridResolutionY,
            Self::Scale => ParamId::Scale,
        }
    }

    /// Whether a full turn of the knob lowers the value unless the mapping
    /// says otherwise.
    #[must_use]
    pub fn inverted_by_default(self) -> bool {
        matches!(self, Self::GridResolutionX)
    }

    /// Maps `velocity` (0..=127) linearly onto the target's declared range.
    #[must_use]
    pub fn write(self, velocity: u8, invert: bool) -> ParamWrite {
        let id = self.target();
        let (min, max) = match id.spec().kind {
            ParamKind::Numeric { min, max, .. } => (min, max),
            _ => (0.0, 1.0),
        };
        let (from, to) = if invert { (max, min) } else { (min, max) };
        let velocity = f64::from(velocity.min(MAX_VELOCITY));
        ParamWrite {
            id,
            value: ParamValue::Number(map_linear(
                velocity,
                0.0,
                f64::from(MAX_VELOCITY),
                from,
                to,
            )),
        }
    }
}

impl fmt::Display for ControlAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ControlAction {
    type Err = MappingError;

    /// Accepts the action names plus the `gridResolutionXY.x` / `.y` spelling
    /// used by older mapping files.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gridResolutionXY.x" => Ok(Self::GridResolutionX),
            "gridResolutionXY.y" => Ok(Self::GridResolutionY),
            _ => Self::ALL
                .into_iter()
                .find(|action| action.name() == s)
                .ok_or_else(|| MappingError::UnknownAction(s.to_string())),
        }
    }
}
