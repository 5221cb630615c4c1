//! Persisted tool settings

use std::path::{Path, PathBuf};

use escpr_patch::PrintMode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ToolError;

/// Tool settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    /// Print mode used by `patch` unless overridden
    #[serde(default)]
    pub print_mode: PrintMode,
}

impl Settings {
    /// Get the XDG config directory for escpr2
    /// Uses $XDG_CONFIG_HOME/escpr2 on Linux/macOS, falls back to ~/.config/escpr2
    fn config_dir() -> Option<PathBuf> {
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_config);
            if path.is_absolute() {
                return Some(path.join("escpr2"));
            }
        }

        dirs::home_dir().map(|h| h.join(".config").join("escpr2"))
    }

    /// Default settings file path
    pub fn default_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.json"))
    }

    /// Explicit path if given, otherwise the default one
    pub fn resolve_path(explicit: Option<PathBuf>) -> Result<PathBuf, ToolError> {
        explicit
            .or_else(Self::default_path)
            .ok_or(ToolError::NoSettingsPath)
    }

    /// Load settings from a file
    ///
    /// A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ToolError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No settings at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ToolError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        serde_json::from_str(&contents).map_err(|source| ToolError::MalformedSettings {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save settings to a file, creating its directory
    pub fn save(&self, path: &Path) -> Result<(), ToolError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ToolError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| ToolError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}
