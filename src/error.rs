use thiserror::Error;

/// Top-level error type for the tube rig.
#[derive(Debug, Error)]
pub enum TubeflightError {
    #[error(transparent)]
    Tessellation(#[from] TessellationError),

    #[error(transparent)]
    Parameter(#[from] ParameterError),

    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error(transparent)]
    Midi(#[from] MidiError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors related to tube tessellation.
#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("extrusion segments must be at least {min}, got {actual}")]
    TooFewExtrusionSegments { min: usize, actual: usize },

    #[error("radius segments must be at least {min}, got {actual}")]
    TooFewRadiusSegments { min: usize, actual: usize },

    #[error("invalid tube radius: {0}")]
    InvalidRadius(f64),
}

/// Errors raised when writing into the parameter surface.
#[derive(Debug, Error)]
pub enum ParameterError {
    #[error("parameter `{id}` expects a {expected} value, got {actual}")]
    KindMismatch {
        id: &'static str,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("parameter `{id}` received a non-finite value")]
    NonFinite { id: &'static str },

    #[error("unknown spline `{0}`")]
    UnknownSpline(String),

    #[error("unknown parameter `{0}`")]
    UnknownParameter(String),
}

/// Errors related to the device mapping document.
#[derive(Debug, Error)]
pub enum MappingError {
    #[error("failed to read device mapping {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed device mapping: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unknown control action `{0}`")]
    UnknownAction(String),

    #[error("control key `{0}` is not a MIDI key number")]
    InvalidControlKey(String),
}

/// Errors related to MIDI device acquisition.
#[derive(Debug, Error)]
pub enum MidiError {
    #[error("no MIDI input named `{0}`")]
    DeviceNotFound(String),

    #[error("MIDI backend failure: {0}")]
    Backend(String),

    #[error("device acquisition ended without a result")]
    AcquisitionAborted,
}

/// Errors related to loading the rig configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Convenience type alias for results using [`TubeflightError`].
pub type Result<T> = std::result::Result<T, TubeflightError>;
