use crate::config::BranchConfig;
use crate::domain::Version;
use crate::error::{ReleaseVersionError, Result};

/// What kind of release a branch produces
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchKind {
    /// The trunk branch (`main` by default)
    Trunk,
    /// A hotfix branch; `named_base` is set when the name encodes `vX.Y.Z`
    Hotfix { named_base: Option<Version> },
}

/// A classified branch name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    pub name: String,
    pub kind: BranchKind,
}

impl Branch {
    /// Classify a branch name against the configured trunk and hotfix prefix.
    ///
    /// A leading `refs/heads/` is ignored. Names that are neither trunk nor
    /// hotfix are rejected.
    pub fn classify(raw: &str, config: &BranchConfig) -> Result<Self> {
        let name = raw.trim();
        let name = name.strip_prefix("refs/heads/").unwrap_or(name);

        if name == config.trunk {
            return Ok(Branch {
                name: name.to_string(),
                kind: BranchKind::Trunk,
            });
        }

        if let Some(rest) = name.strip_prefix(config.hotfix_prefix.as_str()) {
            return Ok(Branch {
                name: name.to_string(),
                kind: BranchKind::Hotfix {
                    named_base: Version::parse(rest).ok(),
                },
            });
        }

        Err(ReleaseVersionError::invalid_branch(
            name,
            expected_shape(config),
        ))
    }

    /// Check if this is the trunk branch
    pub fn is_trunk(&self) -> bool {
        self.kind == BranchKind::Trunk
    }
}

/// Human-readable description of accepted branch names
pub fn expected_shape(config: &BranchConfig) -> String {
    format!(
        "'{}' or '{}v{{major}}.{{minor}}.{{patch}}'",
        config.trunk, config.hotfix_prefix
    )
}
