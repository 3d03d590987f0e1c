//! Release workflow orchestration
//!
//! Each workflow resolves the release version, stages every file edit in
//! memory, and only then writes. A bad version, a missing or read-only file,
//! or a missing match therefore aborts before any file is touched. There is
//! no rollback if a write itself fails part-way through.
//!
//! Workflows never print; they report through [`WorkflowResult`] and
//! `tracing`, leaving presentation to the caller.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::config::Config;
use crate::domain::{BumpKind, SemanticVersion};
use crate::error::{ReleaseBumpError, Result};
use crate::output::OutputChannel;
use crate::patcher::{stage, FileEditRequest, Pattern, Scope, StagedEdit};
use crate::version::resolve;
use crate::warning::ReleaseWarning;

/// Arguments for the bump workflow
///
/// Mirrors the CLI arguments but in a format suitable for orchestration logic.
/// This decoupling allows the workflow to be called programmatically
/// without depending on clap.
#[derive(Debug, Clone, PartialEq)]
pub struct BumpWorkflowArgs {
    /// Module whose metadata file carries the version
    pub module: String,

    /// Version currently present in the files
    pub current_version: String,

    /// "patch", "minor", "major" or an explicit version
    pub release_version: String,

    /// Project root that module and project paths are relative to
    pub root: PathBuf,

    /// Compute and report, but write nothing
    pub dry_run: bool,

    /// Fail when the pipeline output cannot be written
    pub require_output: bool,
}

/// Arguments for the direct-set workflow
#[derive(Debug, Clone, PartialEq)]
pub struct SetWorkflowArgs {
    pub module: String,
    pub new_version: String,
    pub root: PathBuf,
    pub dry_run: bool,
    pub require_output: bool,
}

/// One file that was (or, in a dry run, would be) rewritten
#[derive(Debug, Clone, PartialEq)]
pub struct FileChange {
    pub path: PathBuf,
    pub replacements: usize,
}

/// Result of a successful workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// Version found or given before the release, when known
    pub previous_version: Option<String>,

    /// The released version
    pub version: SemanticVersion,

    /// The version formatted with the tag pattern
    pub tag: String,

    /// Files whose content changes
    pub files: Vec<FileChange>,

    /// Whether the tag was written to the pipeline output
    pub output_written: bool,

    pub dry_run: bool,

    /// Non-fatal conditions to report
    pub warnings: Vec<ReleaseWarning>,
}

/// Bump workflow
///
/// 1. Validate arguments and resolve the release version
/// 2. Stage literal replacements of the current version in the module
///    metadata file (match required) and in the project file
/// 3. Write the staged files
/// 4. Emit the tag to the pipeline output
///
/// # Arguments
///
/// * `args` - Workflow arguments (module, versions, root, flags)
/// * `config` - Release configuration
/// * `output` - Pipeline output destination
///
/// # Returns
///
/// Result containing the released version info or error
pub fn run_bump_workflow(
    args: &BumpWorkflowArgs,
    config: &Config,
    output: &OutputChannel,
) -> Result<WorkflowResult> {
    let module = require_argument(&args.module, "module")?;
    let current = require_argument(&args.current_version, "current_version")?;
    let release = require_argument(&args.release_version, "release_version")?;

    let tag_pattern = config.tag_pattern()?;
    let current_version = SemanticVersion::parse(current)?;
    let bump: BumpKind = release.parse()?;
    let version = resolve(current, &bump)?;
    info!(%current_version, %bump, %version, module, "resolved release version");

    let mut warnings = Vec::new();
    if !bump.is_increment() && version <= current_version {
        warnings.push(ReleaseWarning::VersionNotIncreased {
            current: current_version.to_string(),
            release: version.to_string(),
        });
    }

    check_output_available(args.require_output, config, output, args.dry_run)?;

    let new_text = version.to_string();
    let metadata = stage(&FileEditRequest::new(
        config.files.metadata_path(&args.root, module),
        Pattern::literal(current)?,
        new_text.as_str(),
        Scope::AllMatches,
    ))?
    .require_match()?;

    let project = stage(&FileEditRequest::new(
        config.files.project_path(&args.root),
        Pattern::literal(current)?,
        new_text.as_str(),
        Scope::AllMatches,
    ))?;
    if project.replacements() == 0 {
        warnings.push(ReleaseWarning::VersionNotInFile {
            version: current.to_string(),
            path: project.path().to_path_buf(),
        });
    }

    let files = commit_all(vec![metadata, project], args.dry_run)?;
    let tag = tag_pattern.format(&version);
    let output_written = emit_tag(
        &tag,
        config,
        output,
        args.require_output,
        args.dry_run,
        &mut warnings,
    )?;

    Ok(WorkflowResult {
        previous_version: Some(current_version.to_string()),
        version,
        tag,
        files,
        output_written,
        dry_run: args.dry_run,
        warnings,
    })
}

/// Direct-set workflow
///
/// Replaces the first semantic version found in the module metadata file
/// with `new_version` and emits the tag. The replaced text is reported as the
/// previous version.
pub fn run_set_workflow(
    args: &SetWorkflowArgs,
    config: &Config,
    output: &OutputChannel,
) -> Result<WorkflowResult> {
    let module = require_argument(&args.module, "module")?;
    let new_version = require_argument(&args.new_version, "new_version")?;

    let tag_pattern = config.tag_pattern()?;
    let version = SemanticVersion::parse(new_version)?;
    info!(%version, module, "setting release version");

    check_output_available(args.require_output, config, output, args.dry_run)?;

    let metadata = stage(&FileEditRequest::new(
        config.files.metadata_path(&args.root, module),
        Pattern::semver(),
        version.to_string(),
        Scope::FirstMatch,
    ))?
    .require_match()?;
    let previous_version = metadata.first_match().map(str::to_string);

    let mut warnings = Vec::new();
    if let Some(previous) = previous_version
        .as_deref()
        .and_then(|p| SemanticVersion::parse(p).ok())
    {
        if version <= previous {
            warnings.push(ReleaseWarning::VersionNotIncreased {
                current: previous.to_string(),
                release: version.to_string(),
            });
        }
    }

    let files = commit_all(vec![metadata], args.dry_run)?;
    let tag = tag_pattern.format(&version);
    let output_written = emit_tag(
        &tag,
        config,
        output,
        args.require_output,
        args.dry_run,
        &mut warnings,
    )?;

    Ok(WorkflowResult {
        previous_version,
        version,
        tag,
        files,
        output_written,
        dry_run: args.dry_run,
        warnings,
    })
}

/// Reject blank values, e.g. from an unset pipeline variable expanded to "".
fn require_argument<'a>(value: &'a str, name: &str) -> Result<&'a str> {
    if value.trim().is_empty() {
        return Err(ReleaseBumpError::MissingArguments(name.to_string()));
    }
    Ok(value)
}

fn output_required(config: &Config, require_output: bool) -> bool {
    require_output || config.output.required
}

/// Fail before any write when mandatory output has nowhere to go.
fn check_output_available(
    require_output: bool,
    config: &Config,
    output: &OutputChannel,
    dry_run: bool,
) -> Result<()> {
    if !dry_run && output_required(config, require_output) && output.path().is_none() {
        return Err(ReleaseBumpError::OutputUnavailable(
            output.env_var().to_string(),
        ));
    }
    Ok(())
}

fn commit_all(staged: Vec<StagedEdit>, dry_run: bool) -> Result<Vec<FileChange>> {
    let mut files = Vec::new();
    for edit in staged {
        if !edit.is_changed() {
            continue;
        }
        files.push(FileChange {
            path: edit.path().to_path_buf(),
            replacements: edit.replacements(),
        });
        if !dry_run {
            edit.commit()?;
        }
    }
    Ok(files)
}

fn emit_tag(
    tag: &str,
    config: &Config,
    output: &OutputChannel,
    require_output: bool,
    dry_run: bool,
    warnings: &mut Vec<ReleaseWarning>,
) -> Result<bool> {
    if dry_run {
        return Ok(false);
    }

    match output.emit(&config.output.name, tag) {
        Ok(()) => Ok(true),
        Err(ReleaseBumpError::OutputUnavailable(env_var))
            if !output_required(config, require_output) =>
        {
            warn!(env_var = %env_var, "pipeline output not set, tag not emitted");
            warnings.push(ReleaseWarning::OutputChannelUnavailable { env_var });
            Ok(false)
        }
        Err(e) => Err(e),
    }
}
