//! Error types for scanning operations.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during scanning.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A qualifying image file had unreadable dimensions.
    #[error("Cannot read image dimensions of {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// A directory was reached a second time through links.
    #[error("Directory cycle detected at {path}")]
    Cycle { path: PathBuf },

    /// Operation was interrupted.
    #[error("Operation interrupted")]
    Interrupted,

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Root path is not a directory.
    #[error("Root path is not a directory: {path}")]
    NotADirectory { path: PathBuf },
}

impl ScanError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }

    /// Create a decode error for an image file.
    pub fn decode(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Decode {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Get the serialisable kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::PermissionDenied { .. } | Self::NotFound { .. } | Self::Io { .. } => {
                ErrorKind::Io
            }
            Self::Decode { .. } => ErrorKind::Decode,
            Self::Cycle { .. } => ErrorKind::Cycle,
            Self::Interrupted => ErrorKind::Interrupted,
            Self::InvalidConfig { .. } => ErrorKind::InvalidConfig,
            Self::NotADirectory { .. } => ErrorKind::NotADirectory,
        }
    }
}

/// Coarse error classification, stable across renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Root exists but is not a directory.
    NotADirectory,
    /// Listing or opening a path failed.
    Io,
    /// Image header could not be read.
    Decode,
    /// Directory cycle through links.
    Cycle,
    /// Cancelled by the caller.
    Interrupted,
    /// Rejected configuration.
    InvalidConfig,
}

/// Kind of scan warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// Image dimensions could not be read; counted as zero.
    DecodeSkipped,
    /// Symbolic link was not followed.
    SymlinkSkipped,
}

/// Non-fatal warning encountered during scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanWarning {
    /// Path where the warning occurred.
    pub path: PathBuf,
    /// Human-readable message.
    pub message: String,
    /// Kind of warning.
    pub kind: WarningKind,
}

impl ScanWarning {
    /// Create a new scan warning.
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>, kind: WarningKind) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            kind,
        }
    }

    /// Create a warning for an image skipped under the skip policy.
    pub fn decode_skipped(path: impl Into<PathBuf>, reason: &str) -> Self {
        let path = path.into();
        Self {
            message: format!("Skipped unreadable image {}: {reason}", path.display()),
            path,
            kind: WarningKind::DecodeSkipped,
        }
    }

    /// Create a warning for a symlink left untraversed.
    pub fn symlink_skipped(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            message: format!("Symlink not followed: {}", path.display()),
            path,
            kind: WarningKind::SymlinkSkipped,
        }
    }
}
