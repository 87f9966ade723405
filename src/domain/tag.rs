use crate::boundary::BoundaryWarning;
use crate::domain::Version;

/// Version tags present in a repository, highest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    versions: Vec<Version>,
}

impl TagSet {
    /// Build a tag set from raw tag names.
    ///
    /// Names that are not `vX.Y.Z` are skipped and reported back as warnings.
    pub fn from_names<I, S>(names: I) -> (Self, Vec<BoundaryWarning>)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut versions = Vec::new();
        let mut warnings = Vec::new();

        for name in names {
            let name = name.as_ref();
            match Version::parse(name) {
                Ok(v) => versions.push(v),
                Err(e) => warnings.push(BoundaryWarning::UnparsableTag {
                    tag: name.to_string(),
                    reason: e.to_string(),
                }),
            }
        }

        (Self::from_versions(versions), warnings)
    }

    /// Build a tag set from already parsed versions
    pub fn from_versions(mut versions: Vec<Version>) -> Self {
        versions.sort_unstable_by(|a, b| b.cmp(a));
        versions.dedup();
        TagSet { versions }
    }

    /// Highest version overall
    pub fn latest(&self) -> Option<Version> {
        self.versions.first().copied()
    }

    /// Highest version sharing `base`'s major.minor
    pub fn latest_in_line(&self, base: &Version) -> Option<Version> {
        self.versions.iter().find(|v| base.same_line(v)).copied()
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Versions in descending order
    pub fn iter(&self) -> impl Iterator<Item = &Version> {
        self.versions.iter()
    }
}
