use crate::error::{ReleaseVersionError, Result};
use crate::git::TagSource;
use std::collections::HashMap;

/// Mock repository for testing without actual git operations
#[derive(Debug, Default)]
pub struct MockRepository {
    tags: Vec<String>,
    base_tags: HashMap<String, String>,
    fail_with: Option<String>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock repository holding the given tags
    pub fn with_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MockRepository {
            tags: tags.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Add a tag
    pub fn add_tag(&mut self, name: impl Into<String>) {
        self.tags.push(name.into());
    }

    /// Set the tag reported as reachable from `branch`'s merge-base
    pub fn set_base_tag(&mut self, branch: impl Into<String>, tag: impl Into<String>) {
        self.base_tags.insert(branch.into(), tag.into());
    }

    /// Make every query fail with an external command error
    pub fn fail_with(&mut self, msg: impl Into<String>) {
        self.fail_with = Some(msg.into());
    }

    fn check(&self) -> Result<()> {
        match &self.fail_with {
            Some(msg) => Err(ReleaseVersionError::external(msg.clone())),
            None => Ok(()),
        }
    }
}

impl TagSource for MockRepository {
    fn list_tags(&self) -> Result<Vec<String>> {
        self.check()?;
        Ok(self.tags.clone())
    }

    fn find_base_tag(&self, _trunk: &str, branch: &str) -> Result<Option<String>> {
        self.check()?;
        Ok(self.base_tags.get(branch).cloned())
    }
}
