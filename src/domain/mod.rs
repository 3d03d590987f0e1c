//! Domain logic - pure version rules independent of file operations

pub mod tag;
pub mod version;

pub use tag::TagPattern;
pub use version::{BumpKind, SemanticVersion};
