//! Format-preserving, in-place text substitution.
//!
//! Edits are split in two phases: [`stage`] reads a file and computes its new
//! content in memory, [`StagedEdit::commit`] writes it back. Nothing touches
//! the disk until commit, and commit rewrites the file in place at the same
//! path, following symlinks and keeping the inode, owner and permissions.
//! Bytes outside the matched regions are copied through unchanged; content is
//! handled as raw bytes and need not be UTF-8.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use regex::bytes::{NoExpand, Regex};
use tracing::{debug, info};

use crate::error::{ReleaseBumpError, Result};

/// Canonical semantic-version regex (semver.org grammar, unanchored).
///
/// Identifier alternatives are ordered so alphanumeric identifiers win over
/// bare numeric prefixes (e.g., `-0abc` matches as a whole).
pub const SEMVER_PATTERN: &str = concat!(
    r"(?:0|[1-9]\d*)\.(?:0|[1-9]\d*)\.(?:0|[1-9]\d*)",
    r"(?:-(?:\d*[a-zA-Z-][0-9a-zA-Z-]*|0|[1-9]\d*)(?:\.(?:\d*[a-zA-Z-][0-9a-zA-Z-]*|0|[1-9]\d*))*)?",
    r"(?:\+[0-9a-zA-Z-]+(?:\.[0-9a-zA-Z-]+)*)?",
);

/// What to search for in a file
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Regular expression, matched anywhere in the content
    Regex(Regex),
    /// Exact substring, matched anywhere (including inside identifiers)
    Literal(String),
}

impl Pattern {
    /// Compile a regular expression pattern
    pub fn regex(pattern: &str) -> Result<Self> {
        Regex::new(pattern)
            .map(Pattern::Regex)
            .map_err(|e| ReleaseBumpError::pattern(format!("'{}': {}", pattern, e)))
    }

    /// Build a literal pattern; empty literals are rejected
    pub fn literal(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if text.is_empty() {
            return Err(ReleaseBumpError::pattern("literal pattern must not be empty"));
        }
        Ok(Pattern::Literal(text))
    }

    /// The canonical semantic-version pattern
    pub fn semver() -> Self {
        match Regex::new(SEMVER_PATTERN) {
            Ok(re) => Pattern::Regex(re),
            Err(e) => unreachable!("SEMVER_PATTERN must compile: {}", e),
        }
    }

    fn matcher(&self) -> Result<Regex> {
        match self {
            Pattern::Regex(re) => Ok(re.clone()),
            Pattern::Literal(text) => Regex::new(&regex::escape(text))
                .map_err(|e| ReleaseBumpError::pattern(format!("'{}': {}", text, e))),
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Regex(re) => write!(f, "{}", re.as_str()),
            Pattern::Literal(text) => write!(f, "{}", text),
        }
    }
}

/// How many matches to replace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    FirstMatch,
    AllMatches,
}

/// A single substitution to perform on one file
#[derive(Debug, Clone)]
pub struct FileEditRequest {
    pub path: PathBuf,
    pub pattern: Pattern,
    pub replacement: String,
    pub scope: Scope,
}

impl FileEditRequest {
    pub fn new(
        path: impl Into<PathBuf>,
        pattern: Pattern,
        replacement: impl Into<String>,
        scope: Scope,
    ) -> Self {
        FileEditRequest {
            path: path.into(),
            pattern,
            replacement: replacement.into(),
            scope,
        }
    }
}

/// A file edit computed in memory but not yet written
#[derive(Debug)]
pub struct StagedEdit {
    path: PathBuf,
    pattern: String,
    original: Vec<u8>,
    updated: Vec<u8>,
    replacements: usize,
    first_match: Option<String>,
}

impl StagedEdit {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of matches that will be replaced
    pub fn replacements(&self) -> usize {
        self.replacements
    }

    /// Text of the first replaced match (lossy UTF-8), if any
    pub fn first_match(&self) -> Option<&str> {
        self.first_match.as_deref()
    }

    /// Whether committing would change the file on disk
    pub fn is_changed(&self) -> bool {
        self.original != self.updated
    }

    /// New file content
    pub fn updated(&self) -> &[u8] {
        &self.updated
    }

    /// Fail with `PatternNotFound` unless at least one match was replaced
    pub fn require_match(self) -> Result<Self> {
        if self.replacements == 0 {
            return Err(ReleaseBumpError::PatternNotFound {
                pattern: self.pattern,
                path: self.path,
            });
        }
        Ok(self)
    }

    /// Write the new content back to the same path.
    ///
    /// Returns `Ok(false)` without touching the file when nothing changed.
    pub fn commit(self) -> Result<bool> {
        if !self.is_changed() {
            debug!(path = %self.path.display(), "content unchanged, skipping write");
            return Ok(false);
        }

        let access = |e: io::Error| ReleaseBumpError::file_access(&self.path, e);

        let mut file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&self.path)
            .map_err(access)?;
        file.write_all(&self.updated).map_err(access)?;
        file.sync_all().map_err(access)?;

        info!(
            path = %self.path.display(),
            replacements = self.replacements,
            "file updated"
        );
        Ok(true)
    }
}

/// Read a file and compute the substituted content without writing.
///
/// # Errors
/// * `FileAccess` - the file is missing, not a regular file, read-only or unreadable
/// * `InvalidPattern` - a literal pattern could not be compiled
pub fn stage(request: &FileEditRequest) -> Result<StagedEdit> {
    let path = &request.path;
    let access = |e: io::Error| ReleaseBumpError::file_access(path, e);

    let metadata = fs::metadata(path).map_err(access)?;
    if !metadata.is_file() {
        return Err(access(io::Error::new(
            io::ErrorKind::InvalidInput,
            "not a regular file",
        )));
    }
    if metadata.permissions().readonly() {
        return Err(access(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "file is read-only",
        )));
    }
    OpenOptions::new().write(true).open(path).map_err(access)?;

    let original = fs::read(path).map_err(access)?;
    let matcher = request.pattern.matcher()?;

    let first_match = matcher
        .find(&original)
        .map(|m| String::from_utf8_lossy(m.as_bytes()).into_owned());

    let (limit, replacements) = match request.scope {
        Scope::FirstMatch => (1, usize::from(first_match.is_some())),
        Scope::AllMatches => (0, matcher.find_iter(&original).count()),
    };

    let updated = matcher
        .replacen(&original, limit, NoExpand(request.replacement.as_bytes()))
        .into_owned();

    debug!(
        path = %path.display(),
        pattern = %request.pattern,
        replacements,
        "staged edit"
    );

    Ok(StagedEdit {
        path: path.clone(),
        pattern: request.pattern.to_string(),
        original,
        updated,
        replacements,
        first_match,
    })
}

/// Substitute `pattern` with `replacement` in the file at `path`.
///
/// Returns the number of replacements made. Zero matches is not an error and
/// leaves the file untouched.
pub fn apply_first_or_all(
    path: impl Into<PathBuf>,
    pattern: Pattern,
    replacement: &str,
    scope: Scope,
) -> Result<usize> {
    let staged = stage(&FileEditRequest::new(path, pattern, replacement, scope))?;
    let replacements = staged.replacements();
    staged.commit()?;
    Ok(replacements)
}
