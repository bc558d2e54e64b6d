//! Error types for bmt operations.
//!
//! This module defines [`BmtError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Process failures are split three ways: the program could not be started
//!   ([`BmtError::Launch`]), it ran and exited non-zero
//!   ([`BmtError::CommandFailed`]), or it outlived its timeout
//!   ([`BmtError::Timeout`])
//! - Use `anyhow::Error` (via `BmtError::Other`) for unexpected errors
//! - All errors should provide actionable messages for users

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for bmt operations.
#[derive(Debug, Error)]
pub enum BmtError {
    /// The external program could not be started.
    #[error("Failed to launch '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The external program exited with a non-zero status.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// The external program ran past its timeout and was killed.
    #[error("Command timed out after {seconds}s: {command}")]
    Timeout { command: String, seconds: u64 },

    /// A setting the command depends on has not been set.
    #[error("'{setting}' is not set. Run 'bmt set {setting} <value>' first.")]
    NotConfigured { setting: String },

    /// Failed to parse the settings file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid settings or arguments.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// A post with the same file name already exists.
    #[error("Post already exists: {path}")]
    PostExists { path: PathBuf },

    /// The user backed out of an interactive flow.
    #[error("Cancelled")]
    Cancelled,

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BmtError {
    /// Captured standard error of a failed command, if any.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            Self::CommandFailed { stderr, .. } if !stderr.trim().is_empty() => Some(stderr),
            _ => None,
        }
    }
}

/// Result type alias for bmt operations.
pub type Result<T> = std::result::Result<T, BmtError>;
