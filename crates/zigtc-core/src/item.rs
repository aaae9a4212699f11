use std::path::PathBuf;

use crate::version::Version;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemState {
    NotDownloaded,
    Downloaded,
    Active,
}

/// One release known to this machine, merged from the remote index, the
/// archive cache and the active install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseItem {
    pub version: Version,
    pub indexed: bool,
    pub downloaded: bool,
    pub current: bool,
    pub master: bool,
    pub local_archive_path: PathBuf,
    pub remote_archive_url: Option<String>,
}

impl ReleaseItem {
    pub fn from_index(
        version: Version,
        remote_archive_url: String,
        local_archive_path: PathBuf,
        master: bool,
    ) -> Self {
        Self {
            version,
            indexed: true,
            downloaded: false,
            current: false,
            master,
            local_archive_path,
            remote_archive_url: Some(remote_archive_url),
        }
    }

    pub fn from_archive(version: Version, local_archive_path: PathBuf) -> Self {
        Self {
            version,
            indexed: false,
            downloaded: true,
            current: false,
            master: false,
            local_archive_path,
            remote_archive_url: None,
        }
    }

    pub fn state(&self) -> ItemState {
        if self.current {
            ItemState::Active
        } else if self.downloaded {
            ItemState::Downloaded
        } else {
            ItemState::NotDownloaded
        }
    }
}
