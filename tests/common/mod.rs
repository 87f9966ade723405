//! Scratch repositories for integration tests
#![allow(dead_code)]

use git2::{Commit, Oid, Repository, RepositoryInitOptions, Signature};
use tempfile::TempDir;

pub struct TestRepo {
    pub dir: TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Empty repository whose HEAD points at `main`
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Could not create temp dir");
        let mut opts = RepositoryInitOptions::new();
        opts.initial_head("main");
        let repo = Repository::init_opts(dir.path(), &opts).expect("Could not init git repo");

        {
            let mut config = repo.config().expect("Could not get config");
            config
                .set_str("user.name", "Test User")
                .expect("Could not set user.name");
            config
                .set_str("user.email", "test@example.com")
                .expect("Could not set user.email");
        }

        TestRepo { dir, repo }
    }

    /// Commit on `branch`, whose current tip must be `parent`
    pub fn commit_on(&self, branch: &str, parent: Option<Oid>, message: &str) -> Oid {
        let blob = self.repo.blob(message.as_bytes()).expect("Could not write blob");
        let mut builder = self.repo.treebuilder(None).expect("Could not get treebuilder");
        builder
            .insert("CHANGELOG.md", blob, 0o100644)
            .expect("Could not insert blob");
        let tree_id = builder.write().expect("Could not write tree");
        let tree = self.repo.find_tree(tree_id).expect("Could not find tree");

        let sig = Signature::now("Test User", "test@example.com").expect("Could not get sig");
        let parents: Vec<Commit> = parent
            .map(|oid| self.repo.find_commit(oid).expect("Could not find parent"))
            .into_iter()
            .collect();
        let parent_refs: Vec<&Commit> = parents.iter().collect();

        self.repo
            .commit(
                Some(&format!("refs/heads/{}", branch)),
                &sig,
                &sig,
                message,
                &tree,
                &parent_refs,
            )
            .expect("Could not create commit")
    }

    pub fn tag(&self, name: &str, oid: Oid) {
        let object = self.repo.find_object(oid, None).unwrap();
        self.repo
            .tag_lightweight(name, &object, false)
            .expect("Could not create tag");
    }

    pub fn annotated_tag(&self, name: &str, oid: Oid) {
        let object = self.repo.find_object(oid, None).unwrap();
        let sig = Signature::now("Test User", "test@example.com").unwrap();
        self.repo
            .tag(name, &object, &sig, &format!("Release {}", name), false)
            .expect("Could not create annotated tag");
    }

    /// Leave `branch` only as `refs/remotes/origin/<branch>`, like a shallow CI checkout
    pub fn move_to_remote(&self, branch: &str) {
        let local = format!("refs/heads/{}", branch);
        let oid = self.repo.refname_to_id(&local).expect("Branch should exist");
        self.repo
            .set_head_detached(oid)
            .expect("Could not detach HEAD");
        self.repo
            .reference(
                &format!("refs/remotes/origin/{}", branch),
                oid,
                true,
                "fetch",
            )
            .expect("Could not create remote-tracking ref");
        let mut reference = self.repo.find_reference(&local).unwrap();
        reference.delete().expect("Could not delete local branch");
    }

    /// Commit where `branch` forked from `trunk`
    pub fn merge_base(&self, trunk: &str, branch: &str) -> Oid {
        let a = self.repo.refname_to_id(&format!("refs/heads/{}", trunk)).unwrap();
        let b = self.repo.refname_to_id(&format!("refs/heads/{}", branch)).unwrap();
        self.repo.merge_base(a, b).expect("Could not find merge-base")
    }

    /// main: v1.2.0 -> v1.3.0 -> (fork) -> v1.4.0, hotfix/login forked with a v1.3.1 fix
    pub fn with_hotfix_history() -> Self {
        let t = TestRepo::new();
        let c1 = t.commit_on("main", None, "feat: initial release");
        t.tag("v1.2.0", c1);
        let c2 = t.commit_on("main", Some(c1), "feat: search");
        t.annotated_tag("v1.3.0", c2);
        let c3 = t.commit_on("main", Some(c2), "docs: readme");
        let c4 = t.commit_on("main", Some(c3), "feat: export");
        t.tag("v1.4.0", c4);

        let h1 = t.commit_on("hotfix/login", Some(c3), "fix: login crash");
        t.tag("v1.3.1", h1);
        t
    }
}

/// Whether a `git` executable is available for CLI backend tests
pub fn git_available() -> bool {
    std::process::Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}
