use std::fmt;

use crate::archive::ArchiveType;
use crate::version::Version;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostOs {
    Linux,
    Macos,
    Windows,
}

impl HostOs {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::Macos => "macos",
            Self::Windows => "windows",
        }
    }

    /// Maps a `std::env::consts::OS` value.
    pub fn from_std(os: &str) -> Option<Self> {
        match os {
            "linux" => Some(Self::Linux),
            "macos" => Some(Self::Macos),
            "windows" => Some(Self::Windows),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostArch {
    X86_64,
    Aarch64,
    X86,
}

impl HostArch {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::X86_64 => "x86_64",
            Self::Aarch64 => "aarch64",
            Self::X86 => "x86",
        }
    }

    /// Maps a `std::env::consts::ARCH` value.
    pub fn from_std(arch: &str) -> Option<Self> {
        match arch {
            "x86_64" => Some(Self::X86_64),
            "aarch64" => Some(Self::Aarch64),
            "x86" => Some(Self::X86),
            _ => None,
        }
    }
}

/// The OS/architecture pair releases are selected for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HostTarget {
    pub os: HostOs,
    pub arch: HostArch,
}

impl HostTarget {
    pub fn new(os: HostOs, arch: HostArch) -> Self {
        Self { os, arch }
    }

    pub fn detect() -> Option<Self> {
        Self::from_std(std::env::consts::OS, std::env::consts::ARCH)
    }

    pub fn from_std(os: &str, arch: &str) -> Option<Self> {
        Some(Self::new(HostOs::from_std(os)?, HostArch::from_std(arch)?))
    }

    /// Key of this host's download descriptor in the release index, e.g. `x86_64-linux`.
    pub fn index_key(self) -> String {
        format!("{}-{}", self.arch.as_str(), self.os.as_str())
    }

    /// Leading segments shared by archive and extracted directory names.
    pub fn release_prefix(self) -> String {
        format!("zig-{}-{}", self.os.as_str(), self.arch.as_str())
    }

    /// Name of the directory an archive of `version` extracts into.
    pub fn release_dir_name(self, version: &Version) -> String {
        format!("{}-{}", self.release_prefix(), version.tag())
    }

    /// Archive format upstream publishes for this OS.
    pub fn archive_type(self) -> ArchiveType {
        match self.os {
            HostOs::Windows => ArchiveType::Zip,
            HostOs::Linux | HostOs::Macos => ArchiveType::TarXz,
        }
    }

    pub fn binary_name(self) -> &'static str {
        match self.os {
            HostOs::Windows => "zig.exe",
            HostOs::Linux | HostOs::Macos => "zig",
        }
    }
}

impl fmt::Display for HostTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.index_key())
    }
}
