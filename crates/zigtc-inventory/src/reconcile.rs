use std::path::{Path, PathBuf};

use log::{debug, info};
use zigtc_core::{ArchiveType, HostTarget, ReleaseItem, ToolchainError, Version};
use zigtc_registry::ReleaseIndex;

use crate::inventory::Inventory;

/// A name read from the active-install directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntryInfo {
    pub name: String,
    pub is_dir: bool,
}

/// Everything reconciliation reads, gathered up front so the fold itself does no I/O.
#[derive(Debug, Clone)]
pub struct Observations<'a> {
    pub host: HostTarget,
    pub index: &'a ReleaseIndex,
    pub archive_dir: PathBuf,
    pub archive_names: Vec<String>,
    pub current_entries: Vec<DirEntryInfo>,
}

/// Folds the remote index, then the archive cache, then the active install
/// into one inventory sorted newest first.
///
/// An earlier source keeps the fields it set; a later source matching the same
/// version only fills in the fields it owns.
pub fn reconcile(observations: &Observations<'_>) -> Result<Inventory, ToolchainError> {
    let mut inventory = Inventory::default();
    fold_remote_index(
        &mut inventory,
        observations.host,
        observations.index,
        &observations.archive_dir,
    )?;
    fold_archive_names(
        &mut inventory,
        &observations.archive_dir,
        &observations.archive_names,
    )?;
    fold_current_entries(&mut inventory, &observations.current_entries)?;
    inventory.sort_descending();
    Ok(inventory)
}

fn fold_remote_index(
    inventory: &mut Inventory,
    host: HostTarget,
    index: &ReleaseIndex,
    archive_dir: &Path,
) -> Result<(), ToolchainError> {
    for (key, entry) in index.entries() {
        let Some(download) = entry.download_for(host) else {
            debug!("index entry '{key}' has no download for {host}");
            continue;
        };

        let (tag, master) = match entry.explicit_version() {
            Some(version) => (version, true),
            None => (key, false),
        };
        let version = Version::parse(tag).map_err(|source| ToolchainError::MalformedIndex {
            key: key.to_string(),
            source,
        })?;

        if let Some(existing) = inventory.get_mut(&version) {
            debug!("index entry '{key}' repeats version {version}");
            existing.master |= master;
            continue;
        }

        let file_name = match (
            archive_file_name(&download.tarball),
            ArchiveType::infer_from_url(&download.tarball),
        ) {
            (Some(name), Some(_)) => name.to_string(),
            _ => format!(
                "{}{}",
                host.release_dir_name(&version),
                host.archive_type().file_suffix()
            ),
        };
        let local_archive_path = archive_dir.join(file_name);
        inventory.insert(ReleaseItem::from_index(
            version,
            download.tarball,
            local_archive_path,
            master,
        ));
    }
    Ok(())
}

fn fold_archive_names(
    inventory: &mut Inventory,
    archive_dir: &Path,
    archive_names: &[String],
) -> Result<(), ToolchainError> {
    let mut names: Vec<&str> = archive_names.iter().map(String::as_str).collect();
    names.sort_unstable();

    for name in names {
        let Some((stem, _)) = ArchiveType::split_file_name(name) else {
            continue;
        };
        let Some(tag) = release_tag(stem) else {
            debug!("skipping unrecognized archive '{name}'");
            continue;
        };
        let version =
            Version::parse(tag).map_err(|source| ToolchainError::MalformedArchiveName {
                name: name.to_string(),
                source,
            })?;

        let path = archive_dir.join(name);
        match inventory.get_mut(&version) {
            Some(item) => {
                item.downloaded = true;
                item.local_archive_path = path;
            }
            None => {
                debug!("archive '{name}' is not in the release index");
                inventory.insert(ReleaseItem::from_archive(version, path));
            }
        }
    }
    Ok(())
}

fn fold_current_entries(
    inventory: &mut Inventory,
    entries: &[DirEntryInfo],
) -> Result<(), ToolchainError> {
    let Some(entry) = entries
        .iter()
        .filter(|entry| entry.is_dir && entry.name.starts_with("zig"))
        .min_by(|a, b| a.name.cmp(&b.name))
    else {
        return Ok(());
    };

    let name = entry.name.clone();
    let version = Version::parse(release_tag(&name).unwrap_or_default())
        .map_err(|source| ToolchainError::MalformedCurrent {
            name: name.clone(),
            source,
        })?;

    let Some(item) = inventory.get_mut(&version) else {
        return Err(ToolchainError::UnknownCurrent { name });
    };
    if !item.downloaded {
        return Err(ToolchainError::CurrentNotDownloaded { name, version });
    }

    info!("active install is {version}");
    item.current = true;
    Ok(())
}

/// The version part of `zig-<os>-<arch>-<version>`; `zig-<arch>-<os>-<version>`
/// splits the same way.
fn release_tag(name: &str) -> Option<&str> {
    let mut segments = name.splitn(4, '-');
    match (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) {
        (Some("zig"), Some(_os), Some(_arch), Some(tag)) if !tag.is_empty() => Some(tag),
        _ => None,
    }
}

/// Final path segment of an archive URL, without query or fragment.
pub fn archive_file_name(url: &str) -> Option<&str> {
    let without_fragment = url.split('#').next().unwrap_or(url);
    let without_query = without_fragment
        .split('?')
        .next()
        .unwrap_or(without_fragment);
    without_query
        .rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
}
