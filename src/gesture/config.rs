//! Drag recognizer configuration
//!
//! Configuration can be built in code or loaded from RON/JSON files.
//!
//! ```ron
//! (
//!     min_drag_distance_cm: 0.5,
//!     minimum_number_of_touches: 1,
//!     maximum_number_of_touches: 2,
//!     screen_dpi: Some(326.0),
//! )
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::input::ScreenDensity;

/// Settings for a [`DragRecognizer`](super::DragRecognizer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// Travel in centimeters before a touch counts as a drag
    pub min_drag_distance_cm: f32,
    /// Fewest simultaneous touches the drag accepts
    pub minimum_number_of_touches: usize,
    /// Most simultaneous touches the drag accepts
    pub maximum_number_of_touches: usize,
    /// Screen DPI, if known
    pub screen_dpi: Option<f32>,
}

impl DragConfig {
    /// Default drag threshold in centimeters.
    pub const DEFAULT_MIN_DRAG_DISTANCE_CM: f32 = 0.5;

    /// Set the drag threshold.
    #[must_use]
    pub fn with_min_drag_distance_cm(mut self, cm: f32) -> Self {
        self.min_drag_distance_cm = cm;
        self
    }

    /// Set the accepted touch count range.
    #[must_use]
    pub fn with_touch_range(mut self, minimum: usize, maximum: usize) -> Self {
        self.minimum_number_of_touches = minimum;
        self.maximum_number_of_touches = maximum;
        self
    }

    /// Set the screen DPI.
    #[must_use]
    pub fn with_screen_dpi(mut self, dpi: f32) -> Self {
        self.screen_dpi = Some(dpi);
        self
    }

    /// Screen density derived from `screen_dpi`, or the fallback density.
    #[must_use]
    pub fn screen_density(&self) -> ScreenDensity {
        self.screen_dpi
            .map_or_else(ScreenDensity::default, ScreenDensity::from_dpi)
    }

    /// Check that the configuration describes a usable recognizer.
    ///
    /// # Errors
    ///
    /// Returns an error if the threshold is negative or not finite, or if the
    /// touch range is empty or starts at zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.min_drag_distance_cm.is_finite() || self.min_drag_distance_cm < 0.0 {
            return Err(ConfigError::InvalidDistance(self.min_drag_distance_cm));
        }
        validate_touch_range(
            self.minimum_number_of_touches,
            self.maximum_number_of_touches,
        )
    }

    /// Parse a configuration from a RON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not valid RON for this type or the
    /// result fails [`Self::validate`].
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: DragConfig =
            ron::from_str(source).map_err(|e| ConfigError::DeserializeError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a RON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, deserialization fails or
    /// the configuration is invalid.
    pub fn load_ron(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
        Self::from_ron_str(&content)
    }

    /// Load a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, deserialization fails or
    /// the configuration is invalid.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
        let config: DragConfig = serde_json::from_str(&content)
            .map_err(|e| ConfigError::DeserializeError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save the configuration to a RON file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the file cannot be written.
    pub fn save_ron(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let ron_string = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;
        fs::write(path, ron_string).map_err(|e| ConfigError::IoError(e.to_string()))?;
        Ok(())
    }
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            min_drag_distance_cm: Self::DEFAULT_MIN_DRAG_DISTANCE_CM,
            minimum_number_of_touches: 1,
            maximum_number_of_touches: 1,
            screen_dpi: None,
        }
    }
}

pub(crate) fn validate_touch_range(minimum: usize, maximum: usize) -> Result<(), ConfigError> {
    if minimum == 0 || minimum > maximum {
        return Err(ConfigError::InvalidTouchRange { minimum, maximum });
    }
    Ok(())
}

/// Errors that can occur while building or loading a recognizer configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// IO error
    IoError(String),
    /// Serialization error
    SerializeError(String),
    /// Deserialization error
    DeserializeError(String),
    /// Touch range is empty or starts at zero
    InvalidTouchRange {
        /// Requested minimum
        minimum: usize,
        /// Requested maximum
        maximum: usize,
    },
    /// Drag threshold is negative or not finite
    InvalidDistance(f32),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IoError(e) => write!(f, "IO error: {e}"),
            Self::SerializeError(e) => write!(f, "Serialization error: {e}"),
            Self::DeserializeError(e) => write!(f, "Deserialization error: {e}"),
            Self::InvalidTouchRange { minimum, maximum } => write!(
                f,
                "Invalid touch range: minimum {minimum}, maximum {maximum}"
            ),
            Self::InvalidDistance(cm) => write!(f, "Invalid drag distance: {cm} cm"),
        }
    }
}

impl std::error::Error for ConfigError {}
