//! Version resolution: current version + requested bump -> next version.

use tracing::debug;

use crate::domain::{BumpKind, SemanticVersion};
use crate::error::Result;

/// Resolves the version that a release should carry.
///
/// Parses `current` with the canonical semantic-version grammar and applies
/// `bump` to it:
/// - **Major**: major += 1, minor = 0, patch = 0
/// - **Minor**: minor += 1, patch = 0
/// - **Patch**: patch += 1
/// - **Literal**: the literal version, unchanged
///
/// Increments always drop prerelease and build metadata.
///
/// # Errors
/// * `InvalidVersionFormat` - `current` is not a semantic version
/// * `VersionOverflow` - the incremented component does not fit in a `u64`
///
/// # Example
/// ```
/// use release_bump::domain::BumpKind;
/// use release_bump::version::resolve;
///
/// assert_eq!(resolve("1.2.3", &BumpKind::Major).unwrap().to_string(), "2.0.0");
/// assert_eq!(resolve("1.2.3-beta.1+build5", &BumpKind::Patch).unwrap().to_string(), "1.2.4");
/// assert!(resolve("1.2", &BumpKind::Patch).is_err());
/// ```
pub fn resolve(current: &str, bump: &BumpKind) -> Result<SemanticVersion> {
    let current = SemanticVersion::parse(current)?;
    let next = current.bump(bump)?;
    debug!(%current, %bump, %next, "resolved release version");
    Ok(next)
}

/// Same as [`resolve`], but parses the requested release from a string
/// ("patch", "minor", "major" or an explicit version).
///
/// The current version is validated first, so a malformed `current` is
/// reported even when the release is a valid literal.
pub fn resolve_str(current: &str, release: &str) -> Result<SemanticVersion> {
    SemanticVersion::parse(current)?;
    let bump: BumpKind = release.parse()?;
    resolve(current, &bump)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReleaseBumpError;

    #[test]
    fn test_resolve_increments() {
        assert_eq!(resolve("1.2.3", &BumpKind::Major).unwrap().to_string(), "2.0.0");
        assert_eq!(resolve("1.2.3", &BumpKind::Minor).unwrap().to_string(), "1.3.0");
        assert_eq!(resolve("1.2.3", &BumpKind::Patch).unwrap().to_string(), "1.2.4");
    }

    #[test]
    fn test_resolve_literal_ignores_current_components() {
        let literal = BumpKind::Literal(SemanticVersion::new(0, 9, 0));
        assert_eq!(resolve("3.1.4", &literal).unwrap().to_string(), "0.9.0");
    }

    #[test]
    fn test_resolve_invalid_current_with_valid_literal() {
        let err = resolve_str("1.2", "9.9.9").unwrap_err();
        assert!(matches!(
            err,
            ReleaseBumpError::InvalidVersionFormat { ref input, .. } if input == "1.2"
        ));
    }

    #[test]
    fn test_resolve_str_invalid_literal() {
        let err = resolve_str("1.2.3", "not-a-version").unwrap_err();
        assert!(matches!(
            err,
            ReleaseBumpError::InvalidVersionFormat { ref input, .. } if input == "not-a-version"
        ));
    }
}
