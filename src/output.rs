//! Build-pipeline output variables (`NAME=value` lines appended to a file).

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ReleaseBumpError, Result};

/// Destination for pipeline output variables.
///
/// The target path is resolved once by the caller (typically from an
/// environment variable such as `GITHUB_OUTPUT`) and passed in explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputChannel {
    env_var: String,
    path: Option<PathBuf>,
}

impl OutputChannel {
    pub fn new(env_var: impl Into<String>, path: Option<PathBuf>) -> Self {
        OutputChannel {
            env_var: env_var.into(),
            path,
        }
    }

    /// Resolve the output path from the named environment variable.
    ///
    /// An unset or empty variable yields a channel with no path.
    pub fn from_env(env_var: &str) -> Self {
        let path = std::env::var_os(env_var)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        OutputChannel::new(env_var, path)
    }

    pub fn env_var(&self) -> &str {
        &self.env_var
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Append `name=value` as a single line.
    ///
    /// # Errors
    /// * `OutputUnavailable` - no output path is configured
    /// * `FileAccess` - the output file cannot be opened or written
    /// * `Config` - name or value would break the line format
    pub fn emit(&self, name: &str, value: &str) -> Result<()> {
        let path = self
            .path
            .as_deref()
            .ok_or_else(|| ReleaseBumpError::OutputUnavailable(self.env_var.clone()))?;

        if name.is_empty() || name.contains('=') || name.contains('\n') {
            return Err(ReleaseBumpError::config(format!(
                "Invalid output variable name '{}'",
                name
            )));
        }
        if value.contains('\n') {
            return Err(ReleaseBumpError::config(format!(
                "Output value for '{}' must be a single line",
                name
            )));
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| ReleaseBumpError::file_access(path, e))?;
        writeln!(file, "{}={}", name, value).map_err(|e| ReleaseBumpError::file_access(path, e))?;

        debug!(path = %path.display(), name, value, "emitted pipeline output");
        Ok(())
    }
}
