//! Main workflow orchestration logic
//!
//! The linear *read -> resolve -> increment* sequence behind the binary.
//! Environment lookups stay in `main.rs`; everything here takes explicit
//! inputs so it can run against a mock repository.

use crate::config::Config;
use crate::domain::{Branch, Version};
use crate::error::{ReleaseVersionError, Result};
use crate::git::TagSource;
use crate::resolver::{increment_version, VersionResolver};

/// Arguments for the release workflow
///
/// Mirrors the CLI Args but in a format suitable for orchestration logic.
/// This decoupling allows the workflow to be called programmatically
/// without depending on clap.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorkflowArgs {
    /// Branch the build runs for, as read from `BRANCH_NAME` or `--branch`
    pub branch: Option<String>,
}

/// Result of a successful release workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// The classified branch name
    pub branch: String,

    /// Latest released version relevant to the branch
    pub current: Version,

    /// Version the new build should carry
    pub new_version: Version,
}

/// Reject absent or blank branch names
pub fn require_branch_name(branch: Option<&str>) -> Result<&str> {
    match branch.map(str::trim) {
        Some(name) if !name.is_empty() => Ok(name),
        _ => Err(ReleaseVersionError::MissingBranchName),
    }
}

/// Main release workflow
///
/// Orchestrates the version computation:
/// 1. Validate and classify the branch name
/// 2. Resolve the current version from the repository's tags
/// 3. Increment it according to the branch kind
///
/// Nothing is published here; the caller emits the result only on success.
pub fn run_release_workflow<R: TagSource + ?Sized>(
    args: &WorkflowArgs,
    config: &Config,
    repo: &R,
) -> Result<WorkflowResult> {
    let raw = require_branch_name(args.branch.as_deref())?;
    let branch = Branch::classify(raw, &config.branches)?;
    tracing::info!(branch = %branch.name, trunk = branch.is_trunk(), "computing next version");

    let resolver = VersionResolver::new(repo, config.branches.clone(), config.resolver.clone());
    let current = resolver.resolve_current_version(&branch)?;
    tracing::info!(branch = %branch.name, current = %current, "resolved current version");

    let new_version = increment_version(current, &branch)?;
    tracing::info!(branch = %branch.name, new_version = %new_version, "computed new version");

    Ok(WorkflowResult {
        branch: branch.name,
        current,
        new_version,
    })
}
