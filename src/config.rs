use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::animation::{Viewport, DEFAULT_LOOK_AHEAD, DEFAULT_LOOP_PERIOD};
use crate::error::ConfigError;
use crate::geometry::catalog::DEFAULT_ARC_DIVISIONS;
use crate::geometry::SplineKind;

/// Startup settings of the rig.
///
/// Every field is optional in the file; missing ones take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RigConfig {
    /// Device mapping document. No path means MIDI input is off.
    pub mapping_path: Option<PathBuf>,
    /// Exact name of the MIDI input to open.
    pub preferred_device: String,
    /// Seconds per loop along the path at speed factor 1.
    pub loop_period_secs: f64,
    /// Arc-length distance to the look-ahead target.
    pub look_ahead_distance: f64,
    /// Chords sampled per curve for arc-length queries.
    pub arc_length_divisions: usize,
    pub viewport: Viewport,
    pub initial_spline: SplineKind,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            mapping_path: Some(PathBuf::from("device_mapping.json")),
            preferred_device: "MPK mini 3".to_string(),
            loop_period_secs: DEFAULT_LOOP_PERIOD,
            look_ahead_distance: DEFAULT_LOOK_AHEAD,
            arc_length_divisions: DEFAULT_ARC_DIVISIONS,
            viewport: Viewport::default(),
            initial_spline: SplineKind::default(),
        }
    }
}

impl RigConfig {
    /// Parses a JSON config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown fields.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads the config at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read and
    /// [`ConfigError::Parse`] if it is malformed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_object_is_default() {
        assert_eq!(RigConfig::from_json("{}").unwrap(), RigConfig::default());
    }

    #[test]
    fn partial_override() {
        let config = RigConfig::from_json(
            r#"{ "initial_spline": "PipeSpline", "viewport": { "width": 800, "height": 600 } }"#,
        )
        .unwrap();
        assert_eq!(config.initial_spline, SplineKind::PipeSpline);
        assert_eq!(config.viewport.width, 800);
        assert_eq!(config.preferred_device, "MPK mini 3");
    }

    #[test]
    fn unknown_field_is_rejected() {
        assert!(matches!(
            RigConfig::from_json(r#"{ "loop_time": 3 }"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{ "loop_period_secs": 12.5, "mapping_path": null }"#)
            .unwrap();
        let config = RigConfig::load(file.path()).unwrap();
        assert!((config.loop_period_secs - 12.5).abs() < f64::EPSILON);
        assert!(config.mapping_path.is_none());
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            RigConfig::load(dir.path().join("rig.json")),
            Err(ConfigError::Read { .. })
        ));
    }
}
