use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::TagPattern;
use crate::error::{ReleaseBumpError, Result};

const LOCAL_CONFIG_FILE: &str = "./releasebump.toml";
const USER_CONFIG_FILE: &str = ".releasebump.toml";

/// Represents the complete configuration for release-bump.
///
/// Contains target file locations, pipeline output settings and the tag pattern.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub files: FilesConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub tag: TagConfig,
}

fn default_assets_dir() -> String {
    "src/main/assets".to_string()
}

fn default_metadata_file() -> String {
    "version.txt".to_string()
}

fn default_project_file() -> String {
    "gradle.properties".to_string()
}

/// Locations of the files that carry the version.
///
/// The module metadata file lives at `<module>/<assets_dir>/<metadata_file>`;
/// the project file is relative to the project root.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FilesConfig {
    #[serde(default = "default_assets_dir")]
    pub assets_dir: String,

    #[serde(default = "default_metadata_file")]
    pub metadata_file: String,

    #[serde(default = "default_project_file")]
    pub project_file: String,
}

impl Default for FilesConfig {
    fn default() -> Self {
        FilesConfig {
            assets_dir: default_assets_dir(),
            metadata_file: default_metadata_file(),
            project_file: default_project_file(),
        }
    }
}

impl FilesConfig {
    /// Path of a module's version metadata file under `root`
    pub fn metadata_path(&self, root: &Path, module: &str) -> PathBuf {
        root.join(module)
            .join(&self.assets_dir)
            .join(&self.metadata_file)
    }

    /// Path of the shared project file under `root`
    pub fn project_path(&self, root: &Path) -> PathBuf {
        root.join(&self.project_file)
    }
}

fn default_env_var() -> String {
    "GITHUB_OUTPUT".to_string()
}

fn default_output_name() -> String {
    "version_tag".to_string()
}

/// Pipeline output settings.
///
/// When `required` is false, an unset output variable is reported as a
/// warning and the run still succeeds.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct OutputConfig {
    #[serde(default = "default_env_var")]
    pub env_var: String,

    #[serde(default = "default_output_name")]
    pub name: String,

    #[serde(default)]
    pub required: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            env_var: default_env_var(),
            name: default_output_name(),
            required: false,
        }
    }
}

fn default_tag_pattern() -> String {
    "v{version}".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TagConfig {
    #[serde(default = "default_tag_pattern")]
    pub pattern: String,
}

impl Default for TagConfig {
    fn default() -> Self {
        TagConfig {
            pattern: default_tag_pattern(),
        }
    }
}

impl Config {
    /// Parsed tag pattern
    pub fn tag_pattern(&self) -> Result<TagPattern> {
        TagPattern::new(self.tag.pattern.clone())
    }

    /// Check fields that serde cannot validate on its own
    pub fn validate(&self) -> Result<()> {
        self.tag_pattern()?;

        if self.files.metadata_file.trim().is_empty() {
            return Err(ReleaseBumpError::config("files.metadata_file must not be empty"));
        }
        if self.files.project_file.trim().is_empty() {
            return Err(ReleaseBumpError::config("files.project_file must not be empty"));
        }
        if self.output.env_var.trim().is_empty() {
            return Err(ReleaseBumpError::config("output.env_var must not be empty"));
        }
        Ok(())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `releasebump.toml` in current directory
/// 3. `.releasebump.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read, parsed or validated
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let path = if let Some(path) = config_path {
        PathBuf::from(path)
    } else if Path::new(LOCAL_CONFIG_FILE).exists() {
        PathBuf::from(LOCAL_CONFIG_FILE)
    } else if let Some(config_dir) = dirs::config_dir() {
        let user_path = config_dir.join(USER_CONFIG_FILE);
        if user_path.exists() {
            user_path
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    load_config_file(&path)
}

/// Loads and validates configuration from an explicit file
pub fn load_config_file(path: &Path) -> Result<Config> {
    let config_str = fs::read_to_string(path).map_err(|e| {
        ReleaseBumpError::config(format!("Cannot read '{}': {}", path.display(), e))
    })?;

    let config: Config = toml::from_str(&config_str).map_err(|e| {
        ReleaseBumpError::config(format!("Cannot parse '{}': {}", path.display(), e))
    })?;

    config.validate()?;
    tracing::debug!(path = %path.display(), "loaded configuration");
    Ok(config)
}
