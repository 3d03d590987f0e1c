use std::path::PathBuf;

use release_bump::ui;
use release_bump::warning::ReleaseWarning;

// ============================================================================
// ReleaseWarning Display Tests
// ============================================================================

#[test]
fn test_warning_version_not_in_file_display() {
    let warning = ReleaseWarning::VersionNotInFile {
        version: "1.2.3".to_string(),
        path: PathBuf::from("gradle.properties"),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("'1.2.3'"),
        "Message should contain the version, got: {}",
        display_msg
    );
    assert!(
        display_msg.contains("gradle.properties"),
        "Message should contain the path, got: {}",
        display_msg
    );
}

#[test]
fn test_warning_version_not_increased_display() {
    let warning = ReleaseWarning::VersionNotIncreased {
        current: "2.0.0".to_string(),
        release: "1.9.9".to_string(),
    };

    assert_eq!(
        warning.to_string(),
        "Release version 1.9.9 is not greater than current version 2.0.0"
    );
}

#[test]
fn test_warning_output_unavailable_display() {
    let warning = ReleaseWarning::OutputChannelUnavailable {
        env_var: "GITHUB_OUTPUT".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("$GITHUB_OUTPUT"),
        "Message should name the variable, got: {}",
        display_msg
    );
}

#[test]
fn test_display_warning_does_not_panic() {
    // Visual verification test - output is printed to stderr
    ui::display_warning(&ReleaseWarning::OutputChannelUnavailable {
        env_var: "GITHUB_OUTPUT".to_string(),
    });
}
