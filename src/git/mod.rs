//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the two questions
//! release-version asks of a repository: which version tags exist, and which
//! tag a branch grew out of.
//!
//! # Overview
//!
//! The primary abstraction is the [TagSource] trait. The concrete
//! implementations include:
//!
//! - [repository::Git2Repository]: in-process implementation using the `git2` crate
//! - [command::GitCli]: shells out to the `git` executable
//! - [mock::MockRepository]: in-memory implementation for testing
//!
//! # Usage
//!
//! Resolution code depends on the [TagSource] trait rather than a concrete
//! backend so it can be exercised without a real repository.
//!
//! ```rust
//! # use release_version::git::TagSource;
//! # fn example<R: TagSource>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
//! let tags = repo.list_tags()?;
//! let base = repo.find_base_tag("main", "hotfix/login")?;
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod mock;
pub mod repository;

pub use command::GitCli;
pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::config::GitBackend;
use crate::error::Result;
use std::path::Path;

/// Glob used to pre-filter release tags
pub const VERSION_TAG_GLOB: &str = "v*";

/// Read-only tag queries against a repository
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. Implementations map backend
/// failures to [crate::error::ReleaseVersionError::Git] or
/// [crate::error::ReleaseVersionError::ExternalCommand].
pub trait TagSource {
    /// List tag names that look like release tags
    ///
    /// Names are returned raw; callers parse and order them. Implementations
    /// may pre-filter with [VERSION_TAG_GLOB].
    fn list_tags(&self) -> Result<Vec<String>>;

    /// Find the nearest release tag reachable from the merge-base of two branches
    ///
    /// # Arguments
    /// * `trunk` - Name of the trunk branch (e.g., "main")
    /// * `branch` - Name of the branch that diverged from trunk
    ///
    /// # Returns
    /// * `Ok(Some(tag))` - Tag on or behind the merge-base commit
    /// * `Ok(None)` - No release tag is reachable from the merge-base
    /// * `Err` - If either branch cannot be resolved or the backend fails
    fn find_base_tag(&self, trunk: &str, branch: &str) -> Result<Option<String>>;
}

impl<T: TagSource + ?Sized> TagSource for Box<T> {
    fn list_tags(&self) -> Result<Vec<String>> {
        (**self).list_tags()
    }

    fn find_base_tag(&self, trunk: &str, branch: &str) -> Result<Option<String>> {
        (**self).find_base_tag(trunk, branch)
    }
}

/// Open the repository at `path` with the selected backend
pub fn open(backend: GitBackend, path: &Path) -> Result<Box<dyn TagSource>> {
    match backend {
        GitBackend::Libgit2 => Ok(Box::new(Git2Repository::open(path)?)),
        GitBackend::Cli => Ok(Box::new(GitCli::new(path))),
    }
}
