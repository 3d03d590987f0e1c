//! Command-line workflows, independent of argument parsing.

pub mod orchestration;
