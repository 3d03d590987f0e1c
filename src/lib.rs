pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod output;
pub mod patcher;
pub mod ui;
pub mod version;
pub mod warning;

pub use error::{ReleaseBumpError, Result};
