use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for release-bump operations
#[derive(Error, Debug)]
pub enum ReleaseBumpError {
    #[error("Invalid version format: '{input}' ({reason}) - expected MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]")]
    InvalidVersionFormat { input: String, reason: String },

    #[error("Cannot access file '{}': {error}", .path.display())]
    FileAccess { path: PathBuf, error: std::io::Error },

    #[error("Pattern '{pattern}' not found in '{}'", .path.display())]
    PatternNotFound { pattern: String, path: PathBuf },

    #[error("Missing required argument: {0}")]
    MissingArguments(String),

    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("Version {0} cannot be incremented any further")]
    VersionOverflow(String),

    #[error("Pipeline output variable '{0}' is not set")]
    OutputUnavailable(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience type alias for Results in release-bump
pub type Result<T> = std::result::Result<T, ReleaseBumpError>;

impl ReleaseBumpError {
    /// Create a version format error for the given input
    pub fn invalid_version(input: impl Into<String>, reason: impl Into<String>) -> Self {
        ReleaseBumpError::InvalidVersionFormat {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Create a file access error for the given path
    pub fn file_access(path: impl Into<PathBuf>, error: std::io::Error) -> Self {
        ReleaseBumpError::FileAccess {
            path: path.into(),
            error,
        }
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseBumpError::Config(msg.into())
    }

    /// Create a pattern error with context
    pub fn pattern(msg: impl Into<String>) -> Self {
        ReleaseBumpError::InvalidPattern(msg.into())
    }
}
