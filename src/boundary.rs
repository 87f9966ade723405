use crate::domain::Version;
use std::fmt;

/// Warnings that occur when resolving versions near repository boundaries.
/// These are non-fatal issues that should be reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// Tag exists but is not a `vX.Y.Z` release tag
    UnparsableTag { tag: String, reason: String },
    /// Repository has no release tags yet
    NoTagsFound { initial: Version },
    /// Hotfix base has no tags in its major.minor line
    EmptyReleaseLine { base: Version },
}

impl BoundaryWarning {
    /// Emit this warning on the log stream
    pub fn log(&self) {
        tracing::warn!("{}", self);
    }
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::UnparsableTag { tag, reason } => {
                write!(f, "Ignoring tag '{}': {}", tag, reason)
            }
            BoundaryWarning::NoTagsFound { initial } => {
                write!(f, "No release tags found, starting from {}", initial)
            }
            BoundaryWarning::EmptyReleaseLine { base } => {
                write!(
                    f,
                    "No tags in the {}.{}.x line, using base version {}",
                    base.major, base.minor, base
                )
            }
        }
    }
}
