use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Points `link_path` at `entry_point`, replacing whatever was there before,
/// including a dangling link.
pub fn replace_link(entry_point: &Path, link_path: &Path) -> Result<()> {
    if let Some(parent) = link_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create link dir: {}", parent.display()))?;
    }

    if fs::symlink_metadata(link_path).is_ok() {
        fs::remove_file(link_path).with_context(|| {
            format!("failed to replace existing link: {}", link_path.display())
        })?;
    }

    create_link_entry(entry_point, link_path)
}

fn create_link_entry(source_path: &Path, destination: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(source_path, destination).with_context(|| {
            format!(
                "failed to create symlink {} -> {}",
                destination.display(),
                source_path.display()
            )
        })
    }

    #[cfg(windows)]
    {
        let shim = format!("@echo off\r\n\"{}\" %*\r\n", source_path.display());
        fs::write(destination, shim.as_bytes())
            .with_context(|| format!("failed to write shim: {}", destination.display()))
    }
}
