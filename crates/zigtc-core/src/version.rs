use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid version '{input}': {reason}")]
pub struct VersionParseError {
    input: String,
    reason: String,
}

impl VersionParseError {
    fn new(input: &str, reason: impl Into<String>) -> Self {
        Self {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Build number and commit of a pre-release toolchain build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevBuild {
    pub build: u64,
    pub commit: String,
}

/// A toolchain release identity.
///
/// Two grammars are accepted: `MAJOR.MINOR.PATCH` for tagged releases and
/// `MAJOR.MINOR.PATCH-dev.BUILD+COMMIT` for dev builds. A dev build sorts
/// below the release sharing its numeric triple.
///
/// Equality, ordering and hashing ignore the commit, so two dev builds that
/// differ only in commit are the same version.
#[derive(Debug, Clone)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub dev: Option<DevBuild>,
}

impl Version {
    pub fn release(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            dev: None,
        }
    }

    pub fn dev(major: u64, minor: u64, patch: u64, build: u64, commit: impl Into<String>) -> Self {
        Self {
            major,
            minor,
            patch,
            dev: Some(DevBuild {
                build,
                commit: commit.into(),
            }),
        }
    }

    pub fn parse(input: &str) -> Result<Self, VersionParseError> {
        let parsed = semver::Version::parse(input.trim())
            .map_err(|err| VersionParseError::new(input, err.to_string()))?;

        let mut version = Self::release(parsed.major, parsed.minor, parsed.patch);
        match (parsed.pre.is_empty(), parsed.build.is_empty()) {
            (true, true) => Ok(version),
            (true, false) => Err(VersionParseError::new(
                input,
                "build metadata is only allowed on dev builds",
            )),
            (false, true) => Err(VersionParseError::new(
                input,
                "dev build is missing its '+COMMIT' segment",
            )),
            (false, false) => {
                version.dev = Some(parse_dev_build(
                    input,
                    parsed.pre.as_str(),
                    parsed.build.as_str(),
                )?);
                Ok(version)
            }
        }
    }

    pub fn is_dev(&self) -> bool {
        self.dev.is_some()
    }

    pub fn build_number(&self) -> Option<u64> {
        self.dev.as_ref().map(|dev| dev.build)
    }

    pub fn commit(&self) -> Option<&str> {
        self.dev.as_ref().map(|dev| dev.commit.as_str())
    }

    /// Full upstream tag, including the commit of dev builds.
    pub fn tag(&self) -> String {
        match &self.dev {
            Some(dev) => format!(
                "{}.{}.{}-dev.{}+{}",
                self.major, self.minor, self.patch, dev.build, dev.commit
            ),
            None => format!("{}.{}.{}", self.major, self.minor, self.patch),
        }
    }

    fn triple(&self) -> (u64, u64, u64) {
        (self.major, self.minor, self.patch)
    }
}

fn parse_dev_build(input: &str, pre: &str, build: &str) -> Result<DevBuild, VersionParseError> {
    let mut identifiers = pre.split('.');
    let (Some(_tag), Some(number), None) =
        (identifiers.next(), identifiers.next(), identifiers.next())
    else {
        return Err(VersionParseError::new(
            input,
            format!("expected a '<tag>.<build>' pre-release, found '{pre}'"),
        ));
    };

    let build_number = number.parse::<u64>().map_err(|_| {
        VersionParseError::new(input, format!("build number '{number}' is not numeric"))
    })?;

    if build.contains('.') {
        return Err(VersionParseError::new(
            input,
            format!("commit '{build}' must be a single identifier"),
        ));
    }

    Ok(DevBuild {
        build: build_number,
        commit: build.to_string(),
    })
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.triple() == other.triple() && self.build_number() == other.build_number()
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.triple().hash(state);
        self.build_number().hash(state);
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.triple()
            .cmp(&other.triple())
            .then_with(|| match (&self.dev, &other.dev) {
                (None, None) => Ordering::Equal,
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (Some(ours), Some(theirs)) => ours.build.cmp(&theirs.build),
            })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(dev) = &self.dev {
            write!(f, "-dev-{}", dev.build)?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// What the user asked for on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSelector {
    Master,
    Exact(Version),
}

impl FromStr for VersionSelector {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim() == "master" {
            return Ok(Self::Master);
        }
        Version::parse(s).map(Self::Exact)
    }
}

impl fmt::Display for VersionSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Master => f.write_str("master"),
            Self::Exact(version) => version.fmt(f),
        }
    }
}
