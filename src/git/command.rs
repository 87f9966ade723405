use crate::domain::Version;
use crate::error::{ReleaseVersionError, Result};
use crate::git::{TagSource, VERSION_TAG_GLOB};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// `git describe` stderr fragments meaning "nothing to describe with"
const NO_TAG_MARKERS: [&str; 2] = ["No names found", "No tags can describe"];

/// Narrower than [VERSION_TAG_GLOB]; still admits e.g. `v1.2.3.4`, so matches are re-parsed
const RELEASE_TAG_GLOB: &str = "v[0-9]*.[0-9]*.[0-9]*";

/// Tag queries answered by the `git` executable
pub struct GitCli {
    dir: PathBuf,
    program: String,
}

impl GitCli {
    /// Run git against the repository containing `dir`
    pub fn new(dir: impl AsRef<Path>) -> Self {
        GitCli {
            dir: dir.as_ref().to_path_buf(),
            program: "git".to_string(),
        }
    }

    /// Use a different git executable
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    fn output(&self, args: &[&str]) -> Result<Output> {
        tracing::debug!(program = %self.program, ?args, "running git");

        Command::new(&self.program)
            .arg("-C")
            .arg(&self.dir)
            .args(args)
            .output()
            .map_err(|e| {
                ReleaseVersionError::external(format!(
                    "Failed to execute {} {}: {}",
                    self.program,
                    args.join(" "),
                    e
                ))
            })
    }

    /// Resolve a branch to its tip commit, falling back to the `origin` remote
    fn branch_tip(&self, name: &str) -> Result<String> {
        let candidates = [name.to_string(), format!("origin/{}", name)];

        for candidate in &candidates {
            let rev = format!("{}^{{commit}}", candidate);
            let output = self.output(&["rev-parse", "--verify", "--quiet", rev.as_str()])?;
            if output.status.success() {
                return Ok(String::from_utf8_lossy(&output.stdout).trim().to_string());
            }
        }

        Err(ReleaseVersionError::external(format!(
            "Cannot resolve branch '{}' (tried {})",
            name,
            candidates.join(", ")
        )))
    }

    /// Run git and return stdout, failing on a non-zero exit
    fn run(&self, args: &[&str]) -> Result<String> {
        let output = self.output(args)?;

        if !output.status.success() {
            return Err(command_failure(&self.program, args, &output));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

fn command_failure(program: &str, args: &[&str], output: &Output) -> ReleaseVersionError {
    ReleaseVersionError::external(format!(
        "{} {} failed with exit code {}\nStdout: {}\nStderr: {}",
        program,
        args.join(" "),
        output.status.code().unwrap_or(-1),
        String::from_utf8_lossy(&output.stdout).trim(),
        String::from_utf8_lossy(&output.stderr).trim()
    ))
}

impl TagSource for GitCli {
    fn list_tags(&self) -> Result<Vec<String>> {
        let stdout = self.run(&["tag", "--list", VERSION_TAG_GLOB, "--sort=-v:refname"])?;

        Ok(stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    fn find_base_tag(&self, trunk: &str, branch: &str) -> Result<Option<String>> {
        let trunk_sha = self.branch_tip(trunk)?;
        let branch_sha = self.branch_tip(branch)?;

        let merge_base = self.run(&["merge-base", trunk_sha.as_str(), branch_sha.as_str()])?;
        let merge_base = merge_base.trim();
        tracing::debug!(merge_base, trunk, branch, "found merge-base");

        // describe only knows globs; walk past any match that is not a release tag
        let mut rejected: Vec<String> = Vec::new();
        loop {
            let mut args = vec![
                "describe",
                "--tags",
                "--abbrev=0",
                "--match",
                RELEASE_TAG_GLOB,
                "--exclude",
                "*-*",
            ];
            for tag in &rejected {
                args.push("--exclude");
                args.push(tag.as_str());
            }
            args.push(merge_base);

            let output = self.output(&args)?;

            if !output.status.success() {
                let stderr = String::from_utf8_lossy(&output.stderr);
                if NO_TAG_MARKERS.iter().any(|marker| stderr.contains(marker)) {
                    return Ok(None);
                }
                return Err(command_failure(&self.program, &args, &output));
            }

            let tag = String::from_utf8_lossy(&output.stdout).trim().to_string();
            if tag.is_empty() {
                return Ok(None);
            }
            if Version::parse(&tag).is_ok() {
                return Ok(Some(tag));
            }
            tracing::debug!(tag = %tag, "skipping non-release tag");
            rejected.push(tag);
        }
    }
}
