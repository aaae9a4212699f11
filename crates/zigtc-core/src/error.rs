use thiserror::Error;

use crate::version::{Version, VersionParseError};

/// How a failure is surfaced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Bad argument or a version this machine does not know about.
    Input,
    /// Broken environment or upstream data; nothing is retried.
    Fatal,
}

impl ErrorClass {
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Input => 1,
            Self::Fatal => 2,
        }
    }
}

#[derive(Debug, Error)]
pub enum ToolchainError {
    #[error(transparent)]
    InvalidSelector(#[from] VersionParseError),

    #[error("version {version} was not found in the release index or the local cache")]
    UnknownVersion { version: Version },

    #[error("no master build is available for this host")]
    MasterNotFound,

    #[error("version {version} is not in the release index and cannot be downloaded")]
    NotIndexed { version: Version },

    #[error("release index entry '{key}' has an unparseable version")]
    MalformedIndex {
        key: String,
        #[source]
        source: VersionParseError,
    },

    #[error("cached archive '{name}' has an unparseable version")]
    MalformedArchiveName {
        name: String,
        #[source]
        source: VersionParseError,
    },

    #[error("active install '{name}' has an unparseable version")]
    MalformedCurrent {
        name: String,
        #[source]
        source: VersionParseError,
    },

    #[error("active install '{name}' does not match any known version")]
    UnknownCurrent { name: String },

    #[error("active install '{name}' has no cached archive for version {version}")]
    CurrentNotDownloaded { name: String, version: Version },

    #[error("unsupported host platform: {os}/{arch}")]
    UnsupportedHost { os: String, arch: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ToolchainError {
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::InvalidSelector(_) | Self::UnknownVersion { .. } | Self::MasterNotFound => {
                ErrorClass::Input
            }
            Self::NotIndexed { .. }
            | Self::MalformedIndex { .. }
            | Self::MalformedArchiveName { .. }
            | Self::MalformedCurrent { .. }
            | Self::UnknownCurrent { .. }
            | Self::CurrentNotDownloaded { .. }
            | Self::UnsupportedHost { .. }
            | Self::Other(_) => ErrorClass::Fatal,
        }
    }
}
