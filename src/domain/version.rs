use crate::error::{ReleaseVersionError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

fn tag_regex() -> &'static Regex {
    static TAG_RE: OnceLock<Regex> = OnceLock::new();
    TAG_RE.get_or_init(|| {
        Regex::new(r"^v(\d+)\.(\d+)\.(\d+)$").expect("version tag regex is valid")
    })
}

/// Release version, always rendered as a `v`-prefixed tag (e.g. `v1.3.0`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    /// Create a new version
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Parse version from a tag string (e.g., "v1.2.3" -> Version(1,2,3))
    ///
    /// Only the exact `v{major}.{minor}.{patch}` shape is accepted: no uppercase
    /// prefix, no pre-release or build suffix.
    pub fn parse(tag: &str) -> Result<Self> {
        let captures = tag_regex().captures(tag).ok_or_else(|| {
            ReleaseVersionError::version(format!(
                "Invalid version format: '{}' - expected vX.Y.Z",
                tag
            ))
        })?;

        let component = |idx: usize, name: &str| -> Result<u32> {
            captures[idx].parse::<u32>().map_err(|_| {
                ReleaseVersionError::version(format!(
                    "Invalid {} version in '{}': {}",
                    name, tag, &captures[idx]
                ))
            })
        };

        Ok(Version {
            major: component(1, "major")?,
            minor: component(2, "minor")?,
            patch: component(3, "patch")?,
        })
    }

    /// Bump version according to bump type
    ///
    /// Fails instead of wrapping when the bumped component would overflow `u32`.
    pub fn bump(&self, bump_type: VersionBump) -> Result<Self> {
        let overflow = |name: &str| {
            ReleaseVersionError::version(format!("Cannot bump {} of {}: overflow", name, self))
        };

        match bump_type {
            VersionBump::Minor => Ok(Version {
                major: self.major,
                minor: self.minor.checked_add(1).ok_or_else(|| overflow("minor"))?,
                patch: 0,
            }),
            VersionBump::Patch => Ok(Version {
                major: self.major,
                minor: self.minor,
                patch: self.patch.checked_add(1).ok_or_else(|| overflow("patch"))?,
            }),
        }
    }

    /// Whether `other` belongs to the same `major.minor` release line
    pub fn same_line(&self, other: &Version) -> bool {
        self.major == other.major && self.minor == other.minor
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = ReleaseVersionError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

impl TryFrom<String> for Version {
    type Error = ReleaseVersionError;

    fn try_from(s: String) -> Result<Self> {
        Version::parse(&s)
    }
}

impl From<Version> for String {
    fn from(v: Version) -> Self {
        v.to_string()
    }
}

/// Version bump type decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionBump {
    /// Trunk releases: next minor, patch reset
    Minor,
    /// Hotfix releases: next patch
    Patch,
}
