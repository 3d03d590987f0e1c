use std::fmt;
use std::path::PathBuf;

/// Non-fatal conditions met while releasing.
/// These do not abort the run but should be reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum ReleaseWarning {
    /// The project file does not contain the version being replaced
    VersionNotInFile { version: String, path: PathBuf },
    /// An explicit release version does not move the version forward
    VersionNotIncreased { current: String, release: String },
    /// The pipeline output variable is not set, so nothing was emitted
    OutputChannelUnavailable { env_var: String },
}

impl fmt::Display for ReleaseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseWarning::VersionNotInFile { version, path } => {
                write!(
                    f,
                    "Version '{}' not found in '{}', file left unchanged",
                    version,
                    path.display()
                )
            }
            ReleaseWarning::VersionNotIncreased { current, release } => {
                write!(
                    f,
                    "Release version {} is not greater than current version {}",
                    release, current
                )
            }
            ReleaseWarning::OutputChannelUnavailable { env_var } => {
                write!(
                    f,
                    "${} is not set, skipping pipeline output",
                    env_var
                )
            }
        }
    }
}
