//! Pure formatting functions for UI output.
//!
//! Status lines go to stdout, warnings and errors to stderr. Styling is
//! dropped automatically when the stream is not a terminal.

use std::path::Path;

use console::style;

use crate::warning::ReleaseWarning;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a non-fatal warning to the user.
pub fn display_warning(warning: &ReleaseWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Display the version change (or the version being set when the previous
/// one is unknown).
///
/// # Arguments
/// * `old_version` - Previous version, if known
/// * `new_version` - The version being released
pub fn display_version_change(old_version: Option<&str>, new_version: &str) {
    match old_version {
        Some(old) => {
            println!("\n{}", style("Version Change:").bold());
            println!("  From: {}", style(old).red());
            println!("  To:   {}", style(new_version).green());
        }
        None => {
            println!("\n{}", style("Version:").bold());
            println!("  New version: {}", style(new_version).green());
        }
    }
}

/// Display one updated (or to-be-updated) file.
///
/// # Arguments
/// * `path` - File that carries the version
/// * `replacements` - Number of occurrences replaced
/// * `dry_run` - Whether the change was only computed
pub fn display_file_update(path: &Path, replacements: usize, dry_run: bool) {
    let verb = if dry_run { "Would update" } else { "Updated" };
    let noun = if replacements == 1 { "occurrence" } else { "occurrences" };
    println!(
        "  {} {} ({} {})",
        verb,
        style(path.display()).cyan(),
        replacements,
        noun
    );
}
