use crate::domain::Version;
use crate::error::{ReleaseVersionError, Result};
use crate::git::{TagSource, VERSION_TAG_GLOB};
use git2::{Oid, Repository as Git2Repo, Sort};
use std::collections::HashMap;
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Resolve a branch to its tip commit, falling back to the `origin` remote
    ///
    /// CI checkouts often only carry remote-tracking refs for branches other
    /// than the one being built.
    fn branch_tip(&self, name: &str) -> Result<Oid> {
        let candidates = [name.to_string(), format!("origin/{}", name)];

        for spec in &candidates {
            if let Ok(object) = self.repo.revparse_single(spec) {
                let commit = object.peel_to_commit()?;
                return Ok(commit.id());
            }
        }

        Err(ReleaseVersionError::Git(git2::Error::from_str(&format!(
            "Cannot resolve branch '{}' (tried {})",
            name,
            candidates.join(", ")
        ))))
    }

    /// Map each tagged commit to the release tags pointing at it
    fn release_tags_by_commit(&self) -> Result<HashMap<Oid, Vec<(Version, String)>>> {
        let mut by_commit: HashMap<Oid, Vec<(Version, String)>> = HashMap::new();

        for name in self.list_tags()? {
            let Ok(version) = Version::parse(&name) else {
                continue;
            };
            // Tags pointing at trees or blobs have no place in history
            let commit = match self
                .repo
                .find_reference(&format!("refs/tags/{}", name))
                .and_then(|r| r.peel_to_commit())
            {
                Ok(commit) => commit,
                Err(e) => {
                    tracing::debug!(tag = %name, error = %e, "skipping tag without commit");
                    continue;
                }
            };
            by_commit
                .entry(commit.id())
                .or_default()
                .push((version, name));
        }

        Ok(by_commit)
    }
}

impl TagSource for Git2Repository {
    fn list_tags(&self) -> Result<Vec<String>> {
        let tags = self.repo.tag_names(Some(VERSION_TAG_GLOB))?;

        Ok(tags.iter().flatten().map(|s| s.to_string()).collect())
    }

    fn find_base_tag(&self, trunk: &str, branch: &str) -> Result<Option<String>> {
        let trunk_oid = self.branch_tip(trunk)?;
        let branch_oid = self.branch_tip(branch)?;

        let merge_base = match self.repo.merge_base(trunk_oid, branch_oid) {
            Ok(oid) => oid,
            Err(e) if e.code() == git2::ErrorCode::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        tracing::debug!(%merge_base, trunk, branch, "found merge-base");

        let tagged = self.release_tags_by_commit()?;
        if tagged.is_empty() {
            return Ok(None);
        }

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(merge_base)?;

        for oid in revwalk {
            let oid = oid?;
            if let Some(tags) = tagged.get(&oid) {
                let nearest = tags
                    .iter()
                    .max_by_key(|(version, _)| *version)
                    .map(|(_, name)| name.clone());
                return Ok(nearest);
            }
        }

        Ok(None)
    }
}
