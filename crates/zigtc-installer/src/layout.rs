use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use zigtc_core::{HostTarget, Version};
use zigtc_inventory::{DirEntryInfo, Observations};
use zigtc_registry::ReleaseIndex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainLayout {
    home: PathBuf,
    link_path: PathBuf,
}

impl ToolchainLayout {
    pub fn new(home: impl Into<PathBuf>, link_path: impl Into<PathBuf>) -> Self {
        Self {
            home: home.into(),
            link_path: link_path.into(),
        }
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn archive_dir(&self) -> PathBuf {
        self.home.join("tarballs")
    }

    pub fn current_dir(&self) -> PathBuf {
        self.home.join("current")
    }

    /// Where the config file lives for `home`, before a layout can be built.
    pub fn config_path_for(home: &Path) -> PathBuf {
        home.join("config.toml")
    }

    /// The well-known entry point callers put on their `PATH`.
    pub fn link_path(&self) -> &Path {
        &self.link_path
    }

    pub fn release_dir(&self, host: HostTarget, version: &Version) -> PathBuf {
        self.current_dir().join(host.release_dir_name(version))
    }

    pub fn ensure_base_dirs(&self) -> Result<()> {
        for dir in [self.archive_dir(), self.current_dir()] {
            fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
        }
        Ok(())
    }

    /// Removes whatever is installed and leaves an empty current directory.
    pub fn reset_current_dir(&self) -> Result<()> {
        let dir = self.current_dir();
        if dir.exists() {
            fs::remove_dir_all(&dir)
                .with_context(|| format!("failed to clear {}", dir.display()))?;
        }
        fs::create_dir_all(&dir).with_context(|| format!("failed to create {}", dir.display()))
    }

    pub fn list_archive_names(&self) -> Result<Vec<String>> {
        Ok(read_entries(&self.archive_dir())?
            .into_iter()
            .map(|entry| entry.name)
            .collect())
    }

    pub fn list_current_entries(&self) -> Result<Vec<DirEntryInfo>> {
        read_entries(&self.current_dir())
    }

    /// Reads both local directories for reconciliation against `index`.
    pub fn observe<'a>(
        &self,
        host: HostTarget,
        index: &'a ReleaseIndex,
    ) -> Result<Observations<'a>> {
        Ok(Observations {
            host,
            index,
            archive_dir: self.archive_dir(),
            archive_names: self.list_archive_names()?,
            current_entries: self.list_current_entries()?,
        })
    }
}

fn read_entries(dir: &Path) -> Result<Vec<DirEntryInfo>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("failed to read {}", dir.display()))? {
        let entry = entry.with_context(|| format!("failed to read entry in {}", dir.display()))?;
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        let is_dir = entry
            .file_type()
            .with_context(|| format!("failed to stat {}", entry.path().display()))?
            .is_dir();
        entries.push(DirEntryInfo { name, is_dir });
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}
