use thiserror::Error;

/// Unified error type for release-version operations
#[derive(Error, Debug)]
pub enum ReleaseVersionError {
    #[error("Branch name is missing: set BRANCH_NAME or pass --branch")]
    MissingBranchName,

    #[error("Invalid branch format: '{branch}' (expected {expected})")]
    InvalidBranchFormat { branch: String, expected: String },

    #[error("No version tag reachable from the merge-base of '{trunk}' and '{branch}'")]
    BaseVersionNotFound { branch: String, trunk: String },

    #[error("External command failed: {0}")]
    ExternalCommand(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in release-version
pub type Result<T> = std::result::Result<T, ReleaseVersionError>;

impl ReleaseVersionError {
    /// Create an invalid branch error naming the expected shape
    pub fn invalid_branch(branch: impl Into<String>, expected: impl Into<String>) -> Self {
        ReleaseVersionError::InvalidBranchFormat {
            branch: branch.into(),
            expected: expected.into(),
        }
    }

    /// Create an external command error with context
    pub fn external(msg: impl Into<String>) -> Self {
        ReleaseVersionError::ExternalCommand(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseVersionError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ReleaseVersionError::Version(msg.into())
    }
}
