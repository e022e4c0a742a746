//! # Settings Error Types
//!
//! All errors that can occur while loading, saving or changing settings.
//! The smoother itself never fails.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur in the settings layer.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The settings file could not be read or written.
    #[error("settings file {}: {source}", .path.display())]
    Io {
        /// File that was accessed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid TOML or has wrongly typed values.
    #[error("invalid settings file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Settings could not be written as TOML.
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Ping outside the accepted range.
    #[error("ping must be between {min} and {max} ms, got {value}")]
    PingOutOfRange {
        /// Rejected value.
        value: i64,
        /// Lowest accepted value.
        min: u32,
        /// Highest accepted value.
        max: u32,
    },

    /// Ping text is not a whole number.
    #[error("ping must be a whole number of milliseconds, got {0:?}")]
    InvalidPingText(String),

    /// A color component is not finite or outside `0..=1`.
    #[error("{field} has a component outside 0..=1")]
    InvalidColor {
        /// Settings key of the color.
        field: &'static str,
    },

    /// The overlay owning the settings channel is gone.
    #[error("settings channel closed")]
    ChannelClosed,
}

/// Result type for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;
