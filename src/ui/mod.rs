//! User interface module - progress and result reporting.

pub mod formatter;

pub use formatter::{
    display_error, display_file_update, display_status, display_success, display_version_change,
    display_warning,
};
