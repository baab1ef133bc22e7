//! Unified error types for the appctl workspace.
//!
//! The API crate defines its own `ApiError` for transport and status
//! failures; everything local to the machine is reported through
//! [`AppctlError`].

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum AppctlError {
    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A configuration value is missing or invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// A required resource was not found.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Type of the missing resource.
        kind: &'static str,
        /// Identifier of the missing resource.
        id: String,
    },

    /// The command was invoked with missing or malformed arguments.
    #[error("Usage: {usage}\n{message}")]
    Usage {
        /// Usage line for the command.
        usage: String,
        /// What was wrong with the invocation.
        message: String,
    },

    /// A `git` invocation exited unsuccessfully.
    #[error("git {args} failed: {stderr}")]
    Git {
        /// Arguments passed to git.
        args: String,
        /// Captured standard error.
        stderr: String,
    },

    /// Serialization or deserialization failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}

impl AppctlError {
    /// Builds a usage error for `usage` with an explanatory `message`.
    pub fn usage(usage: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Usage {
            usage: usage.into(),
            message: message.into(),
        }
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, AppctlError>;
