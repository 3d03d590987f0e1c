// tests/cli_orchestration_test.rs
use std::fs;
use std::path::{Path, PathBuf};

use release_bump::cli::orchestration::{
    run_bump_workflow, run_set_workflow, BumpWorkflowArgs, FileChange, SetWorkflowArgs,
};
use release_bump::config::Config;
use release_bump::domain::SemanticVersion;
use release_bump::output::OutputChannel;
use release_bump::warning::ReleaseWarning;
use release_bump::ReleaseBumpError;
use tempfile::TempDir;

const PROJECT_FILE: &str = "sdkVersion=1.2.3\nkotlin=1.9.0\npublish=video-sdk-1.2.3\n";

/// Lays out `<root>/video-sdk/src/main/assets/version.txt` and `<root>/gradle.properties`.
fn setup_project(metadata: &str, project: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let assets = dir.path().join("video-sdk/src/main/assets");
    fs::create_dir_all(&assets).unwrap();
    fs::write(assets.join("version.txt"), metadata).unwrap();
    fs::write(dir.path().join("gradle.properties"), project).unwrap();
    dir
}

fn metadata_path(root: &Path) -> PathBuf {
    root.join("video-sdk/src/main/assets/version.txt")
}

fn bump_args(root: &Path, current: &str, release: &str) -> BumpWorkflowArgs {
    BumpWorkflowArgs {
        module: "video-sdk".to_string(),
        current_version: current.to_string(),
        release_version: release.to_string(),
        root: root.to_path_buf(),
        dry_run: false,
        require_output: false,
    }
}

fn set_args(root: &Path, new_version: &str) -> SetWorkflowArgs {
    SetWorkflowArgs {
        module: "video-sdk".to_string(),
        new_version: new_version.to_string(),
        root: root.to_path_buf(),
        dry_run: false,
        require_output: false,
    }
}

fn output_channel(dir: &TempDir) -> (OutputChannel, PathBuf) {
    let path = dir.path().join("pipeline-output");
    (OutputChannel::new("GITHUB_OUTPUT", Some(path.clone())), path)
}

#[test]
fn test_bump_patch_updates_both_files_and_emits_tag() {
    let project = setup_project("1.2.3\n", PROJECT_FILE);
    let (output, output_path) = output_channel(&project);

    let result = run_bump_workflow(
        &bump_args(project.path(), "1.2.3", "patch"),
        &Config::default(),
        &output,
    )
    .unwrap();

    assert_eq!(result.version, SemanticVersion::new(1, 2, 4));
    assert_eq!(result.previous_version.as_deref(), Some("1.2.3"));
    assert_eq!(result.tag, "v1.2.4");
    assert!(result.output_written);
    assert!(result.warnings.is_empty());
    assert_eq!(
        result.files,
        vec![
            FileChange {
                path: metadata_path(project.path()),
                replacements: 1,
            },
            FileChange {
                path: project.path().join("gradle.properties"),
                replacements: 2,
            },
        ]
    );

    assert_eq!(fs::read_to_string(metadata_path(project.path())).unwrap(), "1.2.4\n");
    assert_eq!(
        fs::read_to_string(project.path().join("gradle.properties")).unwrap(),
        "sdkVersion=1.2.4\nkotlin=1.9.0\npublish=video-sdk-1.2.4\n"
    );
    assert_eq!(
        fs::read_to_string(output_path).unwrap(),
        "version_tag=v1.2.4\n"
    );
}

#[test]
fn test_bump_with_literal_release() {
    let project = setup_project("1.2.3", PROJECT_FILE);
    let (output, _) = output_channel(&project);

    let result = run_bump_workflow(
        &bump_args(project.path(), "1.2.3", "2.0.0-rc.1"),
        &Config::default(),
        &output,
    )
    .unwrap();

    assert_eq!(result.tag, "v2.0.0-rc.1");
    assert_eq!(fs::read_to_string(metadata_path(project.path())).unwrap(), "2.0.0-rc.1");
}

#[test]
fn test_bump_malformed_current_writes_nothing() {
    let project = setup_project("1.2.3\n", PROJECT_FILE);
    let (output, output_path) = output_channel(&project);

    let err = run_bump_workflow(
        &bump_args(project.path(), "1.2", "patch"),
        &Config::default(),
        &output,
    )
    .unwrap_err();

    assert!(matches!(err, ReleaseBumpError::InvalidVersionFormat { .. }));
    assert_eq!(fs::read_to_string(metadata_path(project.path())).unwrap(), "1.2.3\n");
    assert_eq!(
        fs::read_to_string(project.path().join("gradle.properties")).unwrap(),
        PROJECT_FILE
    );
    assert!(!output_path.exists());
}

#[test]
fn test_bump_invalid_literal_writes_nothing() {
    let project = setup_project("1.2.3\n", PROJECT_FILE);
    let (output, _) = output_channel(&project);

    let err = run_bump_workflow(
        &bump_args(project.path(), "1.2.3", "not-a-version"),
        &Config::default(),
        &output,
    )
    .unwrap_err();

    assert!(matches!(err, ReleaseBumpError::InvalidVersionFormat { .. }));
    assert_eq!(fs::read_to_string(metadata_path(project.path())).unwrap(), "1.2.3\n");
}

#[test]
fn test_bump_current_missing_from_metadata_leaves_project_untouched() {
    let project = setup_project("1.0.0\n", PROJECT_FILE);
    let (output, output_path) = output_channel(&project);

    let err = run_bump_workflow(
        &bump_args(project.path(), "1.2.3", "minor"),
        &Config::default(),
        &output,
    )
    .unwrap_err();

    assert!(matches!(err, ReleaseBumpError::PatternNotFound { .. }));
    assert_eq!(
        fs::read_to_string(project.path().join("gradle.properties")).unwrap(),
        PROJECT_FILE
    );
    assert!(!output_path.exists());
}

#[test]
fn test_bump_missing_project_file_leaves_metadata_untouched() {
    let project = setup_project("1.2.3\n", PROJECT_FILE);
    fs::remove_file(project.path().join("gradle.properties")).unwrap();
    let (output, _) = output_channel(&project);

    let err = run_bump_workflow(
        &bump_args(project.path(), "1.2.3", "major"),
        &Config::default(),
        &output,
    )
    .unwrap_err();

    assert!(matches!(err, ReleaseBumpError::FileAccess { .. }));
    assert_eq!(fs::read_to_string(metadata_path(project.path())).unwrap(), "1.2.3\n");
}

#[test]
fn test_bump_warns_when_project_file_lacks_version() {
    let project = setup_project("1.2.3\n", "kotlin=1.9.0\n");
    let (output, _) = output_channel(&project);

    let result = run_bump_workflow(
        &bump_args(project.path(), "1.2.3", "patch"),
        &Config::default(),
        &output,
    )
    .unwrap();

    assert_eq!(result.files.len(), 1);
    assert_eq!(
        result.warnings,
        vec![ReleaseWarning::VersionNotInFile {
            version: "1.2.3".to_string(),
            path: project.path().join("gradle.properties"),
        }]
    );
    assert_eq!(
        fs::read_to_string(project.path().join("gradle.properties")).unwrap(),
        "kotlin=1.9.0\n"
    );
}

#[test]
fn test_bump_warns_on_downgrade() {
    let project = setup_project("1.2.3\n", PROJECT_FILE);
    let (output, _) = output_channel(&project);

    let result = run_bump_workflow(
        &bump_args(project.path(), "1.2.3", "1.0.0"),
        &Config::default(),
        &output,
    )
    .unwrap();

    assert!(result.warnings.contains(&ReleaseWarning::VersionNotIncreased {
        current: "1.2.3".to_string(),
        release: "1.0.0".to_string(),
    }));
}

#[test]
fn test_bump_to_same_version_lists_no_file_changes() {
    let project = setup_project("1.2.3\n", PROJECT_FILE);
    let (output, output_path) = output_channel(&project);

    let result = run_bump_workflow(
        &bump_args(project.path(), "1.2.3", "1.2.3"),
        &Config::default(),
        &output,
    )
    .unwrap();

    assert!(result.files.is_empty());
    assert!(result.warnings.contains(&ReleaseWarning::VersionNotIncreased {
        current: "1.2.3".to_string(),
        release: "1.2.3".to_string(),
    }));
    assert_eq!(fs::read_to_string(metadata_path(project.path())).unwrap(), "1.2.3\n");
    assert_eq!(
        fs::read_to_string(project.path().join("gradle.properties")).unwrap(),
        PROJECT_FILE
    );
    assert_eq!(fs::read_to_string(output_path).unwrap(), "version_tag=v1.2.3\n");
}

#[test]
fn test_bump_blank_argument_is_missing() {
    let project = setup_project("1.2.3\n", PROJECT_FILE);
    let (output, _) = output_channel(&project);
    let mut args = bump_args(project.path(), "1.2.3", "patch");
    args.module = String::new();

    let err = run_bump_workflow(&args, &Config::default(), &output).unwrap_err();

    assert!(matches!(err, ReleaseBumpError::MissingArguments(ref name) if name == "module"));
}

#[test]
fn test_dry_run_writes_nothing() {
    let project = setup_project("1.2.3\n", PROJECT_FILE);
    let (output, output_path) = output_channel(&project);
    let mut args = bump_args(project.path(), "1.2.3", "minor");
    args.dry_run = true;

    let result = run_bump_workflow(&args, &Config::default(), &output).unwrap();

    assert!(result.dry_run);
    assert_eq!(result.tag, "v1.3.0");
    assert_eq!(result.files.len(), 2);
    assert!(!result.output_written);
    assert_eq!(fs::read_to_string(metadata_path(project.path())).unwrap(), "1.2.3\n");
    assert_eq!(
        fs::read_to_string(project.path().join("gradle.properties")).unwrap(),
        PROJECT_FILE
    );
    assert!(!output_path.exists());
}

#[test]
fn test_unset_output_is_best_effort_by_default() {
    let project = setup_project("1.2.3\n", PROJECT_FILE);
    let output = OutputChannel::new("GITHUB_OUTPUT", None);

    let result = run_bump_workflow(
        &bump_args(project.path(), "1.2.3", "patch"),
        &Config::default(),
        &output,
    )
    .unwrap();

    assert!(!result.output_written);
    assert_eq!(
        result.warnings,
        vec![ReleaseWarning::OutputChannelUnavailable {
            env_var: "GITHUB_OUTPUT".to_string(),
        }]
    );
    assert_eq!(fs::read_to_string(metadata_path(project.path())).unwrap(), "1.2.4\n");
}

#[test]
fn test_required_output_fails_before_writing() {
    let project = setup_project("1.2.3\n", PROJECT_FILE);
    let output = OutputChannel::new("GITHUB_OUTPUT", None);
    let mut config = Config::default();
    config.output.required = true;

    let err = run_bump_workflow(
        &bump_args(project.path(), "1.2.3", "patch"),
        &config,
        &output,
    )
    .unwrap_err();

    assert!(matches!(err, ReleaseBumpError::OutputUnavailable(_)));
    assert_eq!(fs::read_to_string(metadata_path(project.path())).unwrap(), "1.2.3\n");
}

#[test]
fn test_custom_tag_pattern_and_output_name() {
    let project = setup_project("1.2.3\n", PROJECT_FILE);
    let (output, output_path) = output_channel(&project);
    let mut config = Config::default();
    config.tag.pattern = "video-sdk/{version}".to_string();
    config.output.name = "release_tag".to_string();

    let result = run_bump_workflow(
        &bump_args(project.path(), "1.2.3", "major"),
        &config,
        &output,
    )
    .unwrap();

    assert_eq!(result.tag, "video-sdk/2.0.0");
    assert_eq!(
        fs::read_to_string(output_path).unwrap(),
        "release_tag=video-sdk/2.0.0\n"
    );
}

#[test]
fn test_set_replaces_first_version_in_metadata() {
    let project = setup_project("version: 4.0.1 (stable)\nbuilt with 1.9.0\n", PROJECT_FILE);
    let (output, output_path) = output_channel(&project);

    let result = run_set_workflow(
        &set_args(project.path(), "4.1.0"),
        &Config::default(),
        &output,
    )
    .unwrap();

    assert_eq!(result.previous_version.as_deref(), Some("4.0.1"));
    assert_eq!(result.tag, "v4.1.0");
    assert!(result.warnings.is_empty());
    assert_eq!(
        fs::read_to_string(metadata_path(project.path())).unwrap(),
        "version: 4.1.0 (stable)\nbuilt with 1.9.0\n"
    );
    // The project file is not part of a direct set
    assert_eq!(
        fs::read_to_string(project.path().join("gradle.properties")).unwrap(),
        PROJECT_FILE
    );
    assert_eq!(fs::read_to_string(output_path).unwrap(), "version_tag=v4.1.0\n");
}

#[test]
fn test_set_invalid_version() {
    let project = setup_project("1.2.3\n", PROJECT_FILE);
    let (output, _) = output_channel(&project);

    let err = run_set_workflow(
        &set_args(project.path(), "v4.1.0"),
        &Config::default(),
        &output,
    )
    .unwrap_err();

    assert!(matches!(err, ReleaseBumpError::InvalidVersionFormat { .. }));
    assert_eq!(fs::read_to_string(metadata_path(project.path())).unwrap(), "1.2.3\n");
}

#[test]
fn test_set_without_version_in_metadata() {
    let project = setup_project("unversioned\n", PROJECT_FILE);
    let (output, _) = output_channel(&project);

    let err = run_set_workflow(
        &set_args(project.path(), "1.0.0"),
        &Config::default(),
        &output,
    )
    .unwrap_err();

    assert!(matches!(err, ReleaseBumpError::PatternNotFound { .. }));
}

#[test]
fn test_set_missing_module() {
    let project = setup_project("1.2.3\n", PROJECT_FILE);
    let (output, _) = output_channel(&project);
    let mut args = set_args(project.path(), "1.3.0");
    args.module = "video-glasses-sdk".to_string();

    let err = run_set_workflow(&args, &Config::default(), &output).unwrap_err();

    assert!(matches!(err, ReleaseBumpError::FileAccess { .. }));
}
