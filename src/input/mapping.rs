use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::MappingError;

use super::action::ControlAction;

/// On-disk device mapping document.
///
/// ```json
/// { "devices": { "MPK mini 3": { "controls": { "70": { "target": "scale" } } } } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceMapping {
    #[serde(default)]
    pub devices: BTreeMap<String, DeviceControls>,
}

/// Controls of one device, keyed by MIDI control number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceControls {
    #[serde(default)]
    pub controls: BTreeMap<String, ControlEntry>,
}

/// Binding of one control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlEntry {
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invert: Option<bool>,
}

impl DeviceMapping {
    /// Parses a mapping document.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::Parse`] for malformed JSON.
    pub fn from_json(text: &str) -> Result<Self, MappingError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads and parses the mapping at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::Read`] if the file cannot be read and
    /// [`MappingError::Parse`] if it is malformed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MappingError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| MappingError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }
}

/// A validated control binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub action: ControlAction,
    pub invert: bool,
}

/// Validated `device -> control key -> route` table.
///
/// Entries with an unknown action or a non-numeric key are left out and kept
/// as issues; the remaining controls route normally.
#[derive(Debug, Default)]
pub struct RoutingTable {
    routes: HashMap<String, HashMap<u8, Route>>,
    issues: Vec<MappingError>,
}

impl RoutingTable {
    #[must_use]
    pub fn from_mapping(mapping: &DeviceMapping) -> Self {
        let mut table = Self::default();
        for (device, controls) in &mapping.devices {
            let routes = table.routes.entry(device.clone()).or_default();
            for (key, entry) in &controls.controls {
                let Ok(number) = key.trim().parse::<u8>() else {
                    let issue = MappingError::InvalidControlKey(key.clone());
                    warn!(%device, %issue, "skipping control");
                    table.issues.push(issue);
                    continue;
                };
                match entry.target.parse::<ControlAction>() {
                    Ok(action) => {
                        routes.insert(
                            number,
                            Route {
                                action,
                                invert: entry.invert.unwrap_or(action.inverted_by_default()),
                            },
                        );
                    }
                    Err(issue) => {
                        warn!(%device, key = number, %issue, "skipping control");
                        table.issues.push(issue);
                    }
                }
            }
        }
        table
    }

    #[must_use]
    pub fn lookup(&self, device: &str, key: u8) -> Option<Route> {
        self.routes.get(device)?.get(&key).copied()
    }

    /// Problems found while validating the mapping.
    #[must_use]
    pub fn issues(&self) -> &[MappingError] {
        &self.issues
    }

    /// Whether any route is declared for `device`.
    #[must_use]
    pub fn has_device(&self, device: &str) -> bool {
        self.routes.get(device).is_some_and(|r| !r.is_empty())
    }

    /// Total number of valid routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.values().map(HashMap::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
