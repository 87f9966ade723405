//! Version resolution: which release a branch is on, and which comes next

use crate::boundary::BoundaryWarning;
use crate::config::{BaseStrategy, BranchConfig, ResolverConfig};
use crate::domain::branch::expected_shape;
use crate::domain::{Branch, BranchKind, TagSet, Version, VersionBump};
use crate::error::{ReleaseVersionError, Result};
use crate::git::TagSource;

/// Resolves current versions from a repository's tags
pub struct VersionResolver<'a, R: TagSource + ?Sized> {
    repo: &'a R,
    branches: BranchConfig,
    config: ResolverConfig,
}

impl<'a, R: TagSource + ?Sized> VersionResolver<'a, R> {
    /// Create a new version resolver
    pub fn new(repo: &'a R, branches: BranchConfig, config: ResolverConfig) -> Self {
        VersionResolver {
            repo,
            branches,
            config,
        }
    }

    /// Load the repository's release tags, logging any that are skipped
    pub fn tag_set(&self) -> Result<TagSet> {
        let names = self.repo.list_tags()?;
        let (tags, warnings) = TagSet::from_names(&names);
        for warning in &warnings {
            warning.log();
        }
        tracing::debug!(tag_count = tags.len(), "loaded release tags");
        Ok(tags)
    }

    /// Determine the latest released version relevant to `branch`
    ///
    /// Trunk resolves to the highest tag overall. Hotfix branches resolve to
    /// the highest tag in their base version's major.minor line, or to the
    /// base version itself when that line has no tags.
    pub fn resolve_current_version(&self, branch: &Branch) -> Result<Version> {
        let tags = self.tag_set()?;

        match &branch.kind {
            BranchKind::Trunk => Ok(tags.latest().unwrap_or_else(|| {
                let initial = self.config.initial_version;
                BoundaryWarning::NoTagsFound { initial }.log();
                initial
            })),
            BranchKind::Hotfix { named_base } => {
                let base = self.base_version(branch, *named_base)?;
                tracing::info!(
                    branch = %branch.name,
                    base = %base,
                    strategy = self.config.base_strategy.as_str(),
                    "determined hotfix base version"
                );

                Ok(tags.latest_in_line(&base).unwrap_or_else(|| {
                    BoundaryWarning::EmptyReleaseLine { base }.log();
                    base
                }))
            }
        }
    }

    fn base_version(&self, branch: &Branch, named_base: Option<Version>) -> Result<Version> {
        match self.config.base_strategy {
            BaseStrategy::Name => named_base.ok_or_else(|| {
                ReleaseVersionError::invalid_branch(
                    branch.name.clone(),
                    expected_shape(&self.branches),
                )
            }),
            BaseStrategy::History => {
                let not_found = || ReleaseVersionError::BaseVersionNotFound {
                    branch: branch.name.clone(),
                    trunk: self.branches.trunk.clone(),
                };

                let tag = self
                    .repo
                    .find_base_tag(&self.branches.trunk, &branch.name)?
                    .ok_or_else(not_found)?;

                Version::parse(&tag).map_err(|_| not_found())
            }
        }
    }
}

/// Compute the version that follows `current` on `branch`
///
/// Trunk bumps minor and resets patch; hotfix branches bump patch only.
/// A component already at `u32::MAX` is reported as a version error.
pub fn increment_version(current: Version, branch: &Branch) -> Result<Version> {
    let bump = match branch.kind {
        BranchKind::Trunk => VersionBump::Minor,
        BranchKind::Hotfix { .. } => VersionBump::Patch,
    };
    current.bump(bump)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockRepository;

    fn branch(name: &str) -> Branch {
        Branch::classify(name, &BranchConfig::default()).unwrap()
    }

    fn resolve(repo: &MockRepository, name: &str, strategy: BaseStrategy) -> Result<Version> {
        let config = ResolverConfig {
            base_strategy: strategy,
            ..ResolverConfig::default()
        };
        VersionResolver::new(repo, BranchConfig::default(), config)
            .resolve_current_version(&branch(name))
    }

    #[test]
    fn test_trunk_uses_highest_tag() {
        let repo = MockRepository::with_tags(["v1.3.1", "v1.4.0", "v1.3.2"]);
        assert_eq!(
            resolve(&repo, "main", BaseStrategy::Name).unwrap(),
            Version::new(1, 4, 0)
        );
    }

    #[test]
    fn test_trunk_without_tags_uses_initial_version() {
        let repo = MockRepository::new();
        assert_eq!(
            resolve(&repo, "main", BaseStrategy::Name).unwrap(),
            Version::new(1, 0, 0)
        );
    }

    #[test]
    fn test_trunk_respects_configured_initial_version() {
        let repo = MockRepository::with_tags(["nightly"]);
        let config = ResolverConfig {
            initial_version: Version::new(0, 1, 0),
            ..ResolverConfig::default()
        };
        let resolver = VersionResolver::new(&repo, BranchConfig::default(), config);
        assert_eq!(
            resolver.resolve_current_version(&branch("main")).unwrap(),
            Version::new(0, 1, 0)
        );
    }

    #[test]
    fn test_hotfix_name_strategy_picks_line_maximum() {
        let repo = MockRepository::with_tags(["v1.3.0", "v1.3.1", "v1.2.9"]);
        assert_eq!(
            resolve(&repo, "hotfix/v1.3.0", BaseStrategy::Name).unwrap(),
            Version::new(1, 3, 1)
        );
    }

    #[test]
    fn test_hotfix_empty_line_returns_base() {
        let repo = MockRepository::with_tags(["v1.4.0", "v1.2.9"]);
        assert_eq!(
            resolve(&repo, "hotfix/v1.3.0", BaseStrategy::Name).unwrap(),
            Version::new(1, 3, 0)
        );
    }

    #[test]
    fn test_hotfix_line_is_not_a_string_prefix() {
        let repo = MockRepository::with_tags(["v1.10.5", "v1.1.3"]);
        assert_eq!(
            resolve(&repo, "hotfix/v1.1.0", BaseStrategy::Name).unwrap(),
            Version::new(1, 1, 3)
        );
    }

    #[test]
    fn test_hotfix_name_strategy_requires_version_in_name() {
        let repo = MockRepository::with_tags(["v1.3.0"]);
        let err = resolve(&repo, "hotfix/login-crash", BaseStrategy::Name).unwrap_err();
        assert!(matches!(err, ReleaseVersionError::InvalidBranchFormat { .. }));
    }

    #[test]
    fn test_hotfix_name_strategy_rejects_suffixed_version() {
        let repo = MockRepository::with_tags(["v1.3.0"]);
        let err = resolve(&repo, "hotfix/v1.3.0-login", BaseStrategy::Name).unwrap_err();
        assert!(matches!(err, ReleaseVersionError::InvalidBranchFormat { .. }));
    }

    #[test]
    fn test_hotfix_history_strategy_uses_base_tag() {
        let mut repo = MockRepository::with_tags(["v1.4.0", "v1.3.0", "v1.3.1"]);
        repo.set_base_tag("hotfix/login-crash", "v1.3.0");
        assert_eq!(
            resolve(&repo, "hotfix/login-crash", BaseStrategy::History).unwrap(),
            Version::new(1, 3, 1)
        );
    }

    #[test]
    fn test_hotfix_history_strategy_ignores_name() {
        let mut repo = MockRepository::with_tags(["v2.0.0", "v1.3.0"]);
        repo.set_base_tag("hotfix/v9.9.9", "v1.3.0");
        assert_eq!(
            resolve(&repo, "hotfix/v9.9.9", BaseStrategy::History).unwrap(),
            Version::new(1, 3, 0)
        );
    }

    #[test]
    fn test_hotfix_history_strategy_without_base_tag() {
        let repo = MockRepository::with_tags(["v1.3.0"]);
        let err = resolve(&repo, "hotfix/login-crash", BaseStrategy::History).unwrap_err();
        assert!(matches!(err, ReleaseVersionError::BaseVersionNotFound { .. }));
    }

    #[test]
    fn test_tag_listing_failure_propagates() {
        let mut repo = MockRepository::with_tags(["v1.3.0"]);
        repo.fail_with("fatal: not a git repository");
        let err = resolve(&repo, "main", BaseStrategy::Name).unwrap_err();
        assert!(matches!(err, ReleaseVersionError::ExternalCommand(_)));
    }

    #[test]
    fn test_increment_trunk() {
        assert_eq!(
            increment_version(Version::new(2, 4, 9), &branch("main")).unwrap(),
            Version::new(2, 5, 0)
        );
    }

    #[test]
    fn test_increment_hotfix() {
        assert_eq!(
            increment_version(Version::new(1, 3, 0), &branch("hotfix/v1.3.0")).unwrap(),
            Version::new(1, 3, 1)
        );
    }
}
