//! Domain logic - pure version rules independent of git operations

pub mod branch;
pub mod tag;
pub mod version;

pub use branch::{Branch, BranchKind};
pub use tag::TagSet;
pub use version::{Version, VersionBump};
