use crate::domain::version::SemanticVersion;
use crate::error::{ReleaseBumpError, Result};

const PLACEHOLDER: &str = "{version}";

/// Tag naming pattern (e.g., "v{version}", "release-{version}")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPattern {
    pattern: String,
}

impl TagPattern {
    /// Create a tag pattern, requiring exactly one `{version}` placeholder
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        if pattern.matches(PLACEHOLDER).count() != 1 {
            return Err(ReleaseBumpError::config(format!(
                "Invalid tag pattern '{}': should have exactly one {{version}} placeholder",
                pattern
            )));
        }
        Ok(TagPattern { pattern })
    }

    /// Format a version according to pattern
    /// Example: pattern="v{version}", version="1.2.3" -> "v1.2.3"
    pub fn format(&self, version: &SemanticVersion) -> String {
        self.pattern.replace(PLACEHOLDER, &version.to_string())
    }
}

impl Default for TagPattern {
    fn default() -> Self {
        TagPattern {
            pattern: "v{version}".to_string(),
        }
    }
}
