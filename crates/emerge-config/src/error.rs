//! Configuration error types.

use std::path::PathBuf;

/// Errors that can occur when loading, saving, or parsing configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read a config file from disk.
    #[error("failed to read config: {0}")]
    ReadError(#[source] std::io::Error),

    /// Failed to write a config file to disk.
    #[error("failed to write config: {0}")]
    WriteError(#[source] std::io::Error),

    /// Failed to parse JSON content.
    #[error("failed to parse JSON config: {0}")]
    JsonParseError(#[source] serde_json::Error),

    /// Failed to parse RON content.
    #[error("failed to parse RON config: {0}")]
    RonParseError(#[source] ron::error::SpannedError),

    /// Failed to serialize config to RON.
    #[error("failed to serialize config: {0}")]
    SerializeError(#[source] ron::Error),

    /// The file extension does not name a known document format.
    #[error("unsupported config format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// The same part identifier appears twice at the top level.
    #[error("duplicate part identifier: {0}")]
    DuplicatePart(String),

    /// A part's placement failed numeric validation.
    #[error("invalid placement of part {part}: {source}")]
    InvalidPart {
        /// Part identifier.
        part: String,
        /// What was wrong with it.
        #[source]
        source: ValidationError,
    },

    /// A part's deformation entry failed numeric validation.
    #[error("invalid deformation #{index} of part {part}: {source}")]
    InvalidDeformation {
        /// Part identifier.
        part: String,
        /// Position of the entry in the part's deformation list.
        index: usize,
        /// What was wrong with it.
        #[source]
        source: ValidationError,
    },

    /// A settings section failed numeric validation.
    #[error("invalid settings: {0}")]
    InvalidSettings(#[from] ValidationError),
}

/// Invalid numeric parameters. These are never clamped.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// The lower bound of a random range must be strictly positive.
    #[error("random range lower bound must be > 0, got {0}")]
    NonPositiveRangeMin(f64),

    /// A range whose lower bound exceeds its upper bound.
    #[error("range is inverted: min {min} > max {max}")]
    InvertedRange {
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },

    /// NaN or infinity where a finite number is required.
    #[error("{0} must be finite")]
    NonFiniteValue(&'static str),

    /// A scale with a zero component flattens geometry irreversibly.
    #[error("{0} scale has a zero component")]
    ZeroScaleAxis(&'static str),

    /// Terrain needs at least one noise octave.
    #[error("octaves must be >= 1")]
    ZeroOctaves,

    /// Terrain needs at least one grid subdivision.
    #[error("subdivisions must be >= 1")]
    ZeroSubdivisions,

    /// Terrain extent must be strictly positive.
    #[error("extent must be > 0, got {0}")]
    NonPositiveExtent(f64),

    /// A cloud field parameter is out of range.
    #[error("invalid cloud field: {0}")]
    InvalidCloudField(&'static str),
}

/// A named entry that the caller asked for does not exist.
///
/// Always recoverable: callers skip the entry and keep going.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotFoundError {
    /// No configuration for this part identifier.
    #[error("no configuration for part {0}")]
    Part(String),
}
