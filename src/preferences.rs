//! Spacing and sizing preferences read by every layout pass

use crate::constants;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading or saving preferences
#[derive(Error, Debug)]
pub enum PreferencesError {
    #[error("failed to access preferences file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse preferences: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type PreferencesResult<T> = Result<T, PreferencesError>;

/// Numeric layout constants for canvas nodes.
///
/// Nothing caches these values: ports and layout read them fresh each time,
/// so changing a field takes effect on the next call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Height of each port band
    pub port_height: f32,
    /// Port width is the node width minus this amount
    pub port_width_trim: f32,
    /// Uniform padding around the content
    pub content_padding: f32,
    /// Extra padding added on the left and right only
    pub content_extra_padding_x: f32,
    /// Size of the square header icon
    pub icon_size: f32,
    pub header_font_size: f32,
    pub body_font_size: f32,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            port_height: constants::port::HEIGHT,
            port_width_trim: constants::port::WIDTH_TRIM,
            content_padding: constants::content::PADDING,
            content_extra_padding_x: constants::content::EXTRA_PADDING_X,
            icon_size: constants::content::ICON_SIZE,
            header_font_size: constants::font::HEADER_SIZE,
            body_font_size: constants::font::BODY_SIZE,
        }
    }
}

impl Preferences {
    /// Location of the preferences file in the user's config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| {
            dir.join(constants::config::APP_DIR)
                .join(constants::config::PREFERENCES_FILE)
        })
    }

    /// Load preferences from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> PreferencesResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| PreferencesError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let preferences: Preferences = serde_json::from_str(&content)?;
        log::debug!("Loaded preferences from {}", path.display());
        Ok(preferences)
    }

    /// Load from the default location, falling back to defaults on any failure
    pub fn load_or_default() -> Self {
        let Some(path) = Self::default_path() else {
            log::warn!("No config directory available, using default preferences");
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load(&path) {
            Ok(preferences) => preferences,
            Err(e) => {
                log::warn!("{}, using default preferences", e);
                Self::default()
            }
        }
    }

    /// Write preferences as pretty JSON, creating parent directories as needed
    pub fn save(&self, path: &Path) -> PreferencesResult<()> {
        let io_error = |source| PreferencesError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(io_error)?;
        Ok(())
    }

    /// Copy with every field clamped to a finite, non-negative value
    pub fn sanitized(&self) -> Self {
        fn clamp(value: f32) -> f32 {
            if value.is_finite() {
                value.max(0.0)
            } else {
                0.0
            }
        }
        Self {
            port_height: clamp(self.port_height),
            port_width_trim: clamp(self.port_width_trim),
            content_padding: clamp(self.content_padding),
            content_extra_padding_x: clamp(self.content_extra_padding_x),
            icon_size: clamp(self.icon_size),
            header_font_size: clamp(self.header_font_size),
            body_font_size: clamp(self.body_font_size),
        }
    }
}
