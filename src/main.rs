use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use release_bump::cli::orchestration::{
    run_bump_workflow, run_set_workflow, BumpWorkflowArgs, SetWorkflowArgs, WorkflowResult,
};
use release_bump::config;
use release_bump::logging;
use release_bump::output::OutputChannel;
use release_bump::ui;

#[derive(clap::Parser)]
#[command(
    name = "release-bump",
    about = "Bump a module's semantic version across project files and emit the release tag",
    version
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(
        long,
        global = true,
        default_value = ".",
        help = "Project root containing the modules"
    )]
    root: PathBuf,

    #[arg(
        long,
        global = true,
        help = "Preview what would happen without making changes"
    )]
    dry_run: bool,

    #[arg(
        long,
        global = true,
        help = "Fail if the pipeline output variable cannot be written"
    )]
    require_output: bool,

    #[arg(short, long, global = true, help = "Enable debug logging")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replace the current version with its successor (or an explicit version)
    Bump {
        /// Module directory containing the version metadata file
        module: String,
        /// Version currently present in the files
        current_version: String,
        /// "patch", "minor", "major" or an explicit version
        release_version: String,
    },
    /// Set the module's version directly, whatever it currently is
    Set {
        /// Module directory containing the version metadata file
        module: String,
        /// Version to set
        new_version: String,
    },
}

fn main() {
    let args = Args::parse();
    logging::init(args.verbose);

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = config::load_config(args.config.as_deref()).context("Error loading config")?;

    // Read once here so the workflows never consult the environment.
    let output = OutputChannel::from_env(&config.output.env_var);

    let result = match args.command {
        Command::Bump {
            module,
            current_version,
            release_version,
        } => {
            ui::display_status(&format!(
                "Bumping '{}' from {} ({})",
                module, current_version, release_version
            ));
            let workflow_args = BumpWorkflowArgs {
                module,
                current_version,
                release_version,
                root: args.root,
                dry_run: args.dry_run,
                require_output: args.require_output,
            };
            run_bump_workflow(&workflow_args, &config, &output).context("Bump failed")?
        }
        Command::Set {
            module,
            new_version,
        } => {
            ui::display_status(&format!("Setting '{}' to {}", module, new_version));
            let workflow_args = SetWorkflowArgs {
                module,
                new_version,
                root: args.root,
                dry_run: args.dry_run,
                require_output: args.require_output,
            };
            run_set_workflow(&workflow_args, &config, &output).context("Set failed")?
        }
    };

    report(&result, &config.output.name);
    Ok(())
}

fn report(result: &WorkflowResult, output_name: &str) {
    let new_version = result.version.to_string();
    ui::display_version_change(result.previous_version.as_deref(), &new_version);

    println!();
    for file in &result.files {
        ui::display_file_update(&file.path, file.replacements, result.dry_run);
    }

    for warning in &result.warnings {
        ui::display_warning(warning);
    }

    if result.dry_run {
        ui::display_status(&format!(
            "Dry run: no files written, would emit {}={}",
            output_name, result.tag
        ));
        return;
    }

    if result.output_written {
        ui::display_success(&format!("Emitted {}={}", output_name, result.tag));
    }
    ui::display_success(&format!("Released {}", result.tag));
}
