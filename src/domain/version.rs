use std::fmt;
use std::str::FromStr;

use crate::error::{ReleaseBumpError, Result};

/// Semantic version representation
///
/// Wraps [`semver::Version`] so that parsing always goes through the canonical
/// `MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]` grammar and failures surface as
/// [`ReleaseBumpError::InvalidVersionFormat`]. Values are immutable; bumping
/// returns a new version.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SemanticVersion(semver::Version);

impl SemanticVersion {
    /// Create a new release version without prerelease or build metadata
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        SemanticVersion(semver::Version::new(major, minor, patch))
    }

    /// Parse a version string (e.g., "1.2.3-beta.1+build5")
    ///
    /// No prefix stripping or trimming is done: "v1.2.3" and " 1.2.3" are
    /// both rejected.
    pub fn parse(input: &str) -> Result<Self> {
        semver::Version::parse(input)
            .map(SemanticVersion)
            .map_err(|e| ReleaseBumpError::invalid_version(input, e.to_string()))
    }

    pub fn major(&self) -> u64 {
        self.0.major
    }

    pub fn minor(&self) -> u64 {
        self.0.minor
    }

    pub fn patch(&self) -> u64 {
        self.0.patch
    }

    /// Prerelease identifiers, if any (e.g., "beta.1")
    pub fn prerelease(&self) -> Option<&str> {
        if self.0.pre.is_empty() {
            None
        } else {
            Some(self.0.pre.as_str())
        }
    }

    /// Build metadata, if any (e.g., "build5")
    pub fn build_metadata(&self) -> Option<&str> {
        if self.0.build.is_empty() {
            None
        } else {
            Some(self.0.build.as_str())
        }
    }

    /// Apply a bump, producing the next version.
    ///
    /// Increments reset every lower-precedence component and drop prerelease
    /// and build metadata. A literal bump yields the literal unchanged.
    pub fn bump(&self, kind: &BumpKind) -> Result<Self> {
        let overflow = || ReleaseBumpError::VersionOverflow(self.to_string());

        let next = match kind {
            BumpKind::Major => {
                semver::Version::new(self.major().checked_add(1).ok_or_else(overflow)?, 0, 0)
            }
            BumpKind::Minor => semver::Version::new(
                self.major(),
                self.minor().checked_add(1).ok_or_else(overflow)?,
                0,
            ),
            BumpKind::Patch => semver::Version::new(
                self.major(),
                self.minor(),
                self.patch().checked_add(1).ok_or_else(overflow)?,
            ),
            BumpKind::Literal(version) => return Ok(version.clone()),
        };

        Ok(SemanticVersion(next))
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SemanticVersion {
    type Err = ReleaseBumpError;

    fn from_str(s: &str) -> Result<Self> {
        SemanticVersion::parse(s)
    }
}

/// Requested kind of version change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BumpKind {
    Patch,
    Minor,
    Major,
    /// Force an explicit version instead of incrementing
    Literal(SemanticVersion),
}

impl BumpKind {
    /// Whether this bump increments a component rather than forcing a literal
    pub fn is_increment(&self) -> bool {
        !matches!(self, BumpKind::Literal(_))
    }
}

impl FromStr for BumpKind {
    type Err = ReleaseBumpError;

    /// Parse "patch", "minor" or "major" (case-insensitive), otherwise the
    /// input must be a valid semantic version.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "patch" => Ok(BumpKind::Patch),
            "minor" => Ok(BumpKind::Minor),
            "major" => Ok(BumpKind::Major),
            _ => SemanticVersion::parse(s).map(BumpKind::Literal),
        }
    }
}

impl fmt::Display for BumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BumpKind::Patch => write!(f, "patch"),
            BumpKind::Minor => write!(f, "minor"),
            BumpKind::Major => write!(f, "major"),
            BumpKind::Literal(version) => write!(f, "{}", version),
        }
    }
}
