//! # Overlay Settings
//!
//! User-facing configuration of the hitbox marker, persisted as TOML.
//!
//! ```toml
//! visible = true
//! smoothing = true
//! ping_ms = 100
//! toggle_key = "Alt+H"
//!
//! [color]
//! r = 1.0
//! g = 1.0
//! b = 1.0
//!
//! [outline_color]
//! r = 0.0
//! g = 0.0
//! b = 0.0
//! ```
//!
//! Missing keys take their defaults. Every loaded file is validated; the
//! smoother accepts whatever it is given, so range checks live here.

use std::path::Path;

use hitbox_shared::{Color, DEFAULT_PING_MS, PING_MAX_MS, PING_MIN_MS};
use serde::{Deserialize, Serialize};

use crate::error::{SettingsError, SettingsResult};

/// Settings of the hitbox overlay.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HitboxSettings {
    /// Marker stroke color.
    pub color: Color,
    /// Marker outline color.
    pub outline_color: Color,
    /// Whether the marker is shown.
    pub visible: bool,
    /// Interpolate between samples (adds one compensation frame of delay).
    pub smoothing: bool,
    /// Assumed latency to the server, in milliseconds.
    pub ping_ms: u32,
    /// Key binding that toggles visibility, in the host's notation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toggle_key: Option<String>,
}

impl Default for HitboxSettings {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            outline_color: Color::BLACK,
            visible: true,
            smoothing: true,
            ping_ms: DEFAULT_PING_MS,
            toggle_key: None,
        }
    }
}

impl HitboxSettings {
    /// Parses and validates settings from TOML text.
    ///
    /// # Errors
    /// Returns [`SettingsError::Parse`] for malformed TOML, or a validation
    /// error for out-of-range values.
    pub fn from_toml_str(text: &str) -> SettingsResult<Self> {
        let settings: Self = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serializes the settings as TOML.
    ///
    /// # Errors
    /// Returns [`SettingsError::Serialize`] if serialization fails.
    pub fn to_toml_string(&self) -> SettingsResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Loads settings from a TOML file.
    ///
    /// # Errors
    /// Returns [`SettingsError::Io`] if the file cannot be read, or any error
    /// of [`Self::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> SettingsResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml_str(&text)?;
        tracing::debug!("loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Loads settings, falling back to defaults when the file is missing or invalid.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(settings) => settings,
            Err(err) => {
                tracing::warn!("using default settings: {}", err);
                Self::default()
            }
        }
    }

    /// Writes settings to a TOML file.
    ///
    /// # Errors
    /// Returns [`SettingsError::Io`] if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> SettingsResult<()> {
        let path = path.as_ref();
        let text = self.to_toml_string()?;
        std::fs::write(path, text).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Checks every value against its accepted range.
    ///
    /// # Errors
    /// Returns the first violation found.
    pub fn validate(&self) -> SettingsResult<()> {
        check_ping(i64::from(self.ping_ms))?;
        check_color("color", self.color)?;
        check_color("outline_color", self.outline_color)?;
        Ok(())
    }
}

/// Parses the ping text box next to the slider.
///
/// Surrounding whitespace is ignored.
///
/// # Errors
/// Returns [`SettingsError::InvalidPingText`] for non-numeric input and
/// [`SettingsError::PingOutOfRange`] for numbers outside the slider range.
pub fn parse_ping(text: &str) -> SettingsResult<u32> {
    let trimmed = text.trim();
    let value: i64 = trimmed
        .parse()
        .map_err(|_| SettingsError::InvalidPingText(trimmed.to_owned()))?;
    check_ping(value)
}

pub(crate) fn check_ping(value: i64) -> SettingsResult<u32> {
    let out_of_range = SettingsError::PingOutOfRange {
        value,
        min: PING_MIN_MS,
        max: PING_MAX_MS,
    };
    match u32::try_from(value) {
        Ok(ms) if (PING_MIN_MS..=PING_MAX_MS).contains(&ms) => Ok(ms),
        _ => Err(out_of_range),
    }
}

fn check_color(field: &'static str, color: Color) -> SettingsResult<()> {
    if color.to_array().iter().all(|c| (0.0..=1.0).contains(c)) {
        Ok(())
    } else {
        Err(SettingsError::InvalidColor { field })
    }
}
