use std::path::{Path, PathBuf};

use anyhow::anyhow;
use log::info;
use zigtc_core::{ArchiveType, HostTarget, ReleaseItem, ToolchainError, Version, VersionSelector};
use zigtc_inventory::Inventory;

use crate::exposure::replace_link;
use crate::layout::ToolchainLayout;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    AlreadyDownloaded { version: Version, path: PathBuf },
    Downloaded { version: Version, path: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivateOutcome {
    AlreadyActive {
        version: Version,
    },
    Activated {
        version: Version,
        install_dir: PathBuf,
        link: PathBuf,
    },
}

/// Fetches the archive of `item` unless it is already cached.
///
/// `fetch` receives the remote URL and the path the archive must end up at.
pub fn ensure_downloaded<Fetch>(
    item: &mut ReleaseItem,
    fetch: Fetch,
) -> Result<DownloadOutcome, ToolchainError>
where
    Fetch: FnOnce(&str, &Path) -> anyhow::Result<()>,
{
    if item.downloaded {
        return Ok(DownloadOutcome::AlreadyDownloaded {
            version: item.version.clone(),
            path: item.local_archive_path.clone(),
        });
    }

    let Some(url) = item.remote_archive_url.as_deref().filter(|_| item.indexed) else {
        return Err(ToolchainError::NotIndexed {
            version: item.version.clone(),
        });
    };

    info!("downloading {} from {url}", item.version);
    fetch(url, &item.local_archive_path)?;
    item.downloaded = true;

    Ok(DownloadOutcome::Downloaded {
        version: item.version.clone(),
        path: item.local_archive_path.clone(),
    })
}

/// Makes `version` the active toolchain: download, clear the current
/// directory, extract, then repoint the link.
///
/// Clearing happens before extraction, so a failed extraction leaves no
/// active install behind.
pub fn activate<Fetch, Extract>(
    layout: &ToolchainLayout,
    host: HostTarget,
    inventory: &mut Inventory,
    version: &Version,
    fetch: Fetch,
    extract: Extract,
) -> Result<ActivateOutcome, ToolchainError>
where
    Fetch: FnOnce(&str, &Path) -> anyhow::Result<()>,
    Extract: FnOnce(&Path, &Path) -> anyhow::Result<()>,
{
    let item = inventory
        .get_mut(version)
        .ok_or_else(|| ToolchainError::UnknownVersion {
            version: version.clone(),
        })?;

    if item.current {
        return Ok(ActivateOutcome::AlreadyActive {
            version: item.version.clone(),
        });
    }

    ensure_downloaded(item, fetch)?;
    let version = item.version.clone();
    let archive_path = item.local_archive_path.clone();

    layout.reset_current_dir()?;
    info!("extracting {}", archive_path.display());
    extract(&archive_path, &layout.current_dir())?;

    let candidates = install_dir_candidates(layout, host, &version, &archive_path);
    let Some(install_dir) = candidates
        .iter()
        .find(|dir| dir.join(host.binary_name()).exists())
        .cloned()
    else {
        return Err(anyhow!(
            "extracted archive {} did not produce {}",
            archive_path.display(),
            candidates[0].join(host.binary_name()).display()
        )
        .into());
    };
    let entry_point = install_dir.join(host.binary_name());

    replace_link(&entry_point, layout.link_path())?;
    info!(
        "linked {} -> {}",
        layout.link_path().display(),
        entry_point.display()
    );
    inventory.mark_current(&version);

    Ok(ActivateOutcome::Activated {
        version,
        install_dir,
        link: layout.link_path().to_path_buf(),
    })
}

/// Where an extracted archive may have landed: `zig-<os>-<arch>-<version>`
/// first, then the archive's own stem (newer releases put the arch first).
fn install_dir_candidates(
    layout: &ToolchainLayout,
    host: HostTarget,
    version: &Version,
    archive_path: &Path,
) -> Vec<PathBuf> {
    let mut candidates = vec![layout.release_dir(host, version)];
    let stem = archive_path
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(ArchiveType::split_file_name)
        .map(|(stem, _)| stem);
    if let Some(stem) = stem {
        let dir = layout.current_dir().join(stem);
        if !candidates.contains(&dir) {
            candidates.push(dir);
        }
    }
    candidates
}

/// `download VERSION` / `download master`.
///
/// Only catalog releases can be downloaded; an archive that exists solely in
/// the local cache is rejected even though it is already on disk.
pub fn download_selected<Fetch>(
    inventory: &mut Inventory,
    selector: &VersionSelector,
    fetch: Fetch,
) -> Result<DownloadOutcome, ToolchainError>
where
    Fetch: FnOnce(&str, &Path) -> anyhow::Result<()>,
{
    let version = inventory.resolve(selector)?;
    let item = inventory
        .get_mut(&version)
        .ok_or(ToolchainError::UnknownVersion {
            version: version.clone(),
        })?;
    if !item.indexed {
        return Err(ToolchainError::NotIndexed { version });
    }
    ensure_downloaded(item, fetch)
}

/// `activate VERSION` / `activate master`.
pub fn activate_selected<Fetch, Extract>(
    layout: &ToolchainLayout,
    host: HostTarget,
    inventory: &mut Inventory,
    selector: &VersionSelector,
    fetch: Fetch,
    extract: Extract,
) -> Result<ActivateOutcome, ToolchainError>
where
    Fetch: FnOnce(&str, &Path) -> anyhow::Result<()>,
    Extract: FnOnce(&Path, &Path) -> anyhow::Result<()>,
{
    let version = inventory.resolve(selector)?;
    activate(layout, host, inventory, &version, fetch, extract)
}
