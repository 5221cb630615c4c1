//! Error types for the command-line tool

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced to the user by `escpr2`
#[derive(Debug, Error)]
pub enum ToolError {
    /// Input file could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Output file could not be written
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Settings file exists but is not valid JSON for [`crate::settings::Settings`]
    #[error("malformed settings in {}: {source}", .path.display())]
    MalformedSettings {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// No explicit settings path and no home directory
    #[error("could not determine settings path")]
    NoSettingsPath,

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Protocol error
    #[error("protocol error: {0}")]
    Protocol(#[from] escpr_protocol::ProtocolError),

    /// Patch error
    #[error("patch error: {0}")]
    Patch(#[from] escpr_patch::PatchError),
}
