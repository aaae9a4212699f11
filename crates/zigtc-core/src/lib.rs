mod archive;
mod error;
mod host;
mod item;
mod version;

pub use archive::ArchiveType;
pub use error::{ErrorClass, ToolchainError};
pub use host::{HostArch, HostOs, HostTarget};
pub use item::{ItemState, ReleaseItem};
pub use version::{DevBuild, Version, VersionParseError, VersionSelector};
