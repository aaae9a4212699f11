use anyhow::{bail, Context, Result};
use log::debug;
use reqwest::blocking::Client;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadProgress {
    pub downloaded: u64,
    pub total: Option<u64>,
}

/// Streams `url` into `destination`, going through a `.part` file so an
/// interrupted transfer never looks like a cached archive.
pub fn download_archive<OnProgress>(
    client: &Client,
    url: &str,
    destination: &Path,
    mut on_progress: OnProgress,
) -> Result<u64>
where
    OnProgress: FnMut(DownloadProgress),
{
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create archive dir: {}", parent.display()))?;
    }

    let part_path = part_path_for(destination);
    let written = match stream_to_file(client, url, &part_path, &mut on_progress) {
        Ok(written) => written,
        Err(err) => {
            let _ = fs::remove_file(&part_path);
            return Err(err);
        }
    };

    if destination.exists() {
        fs::remove_file(destination).with_context(|| {
            format!("failed to replace cached archive: {}", destination.display())
        })?;
    }
    fs::rename(&part_path, destination).with_context(|| {
        format!(
            "failed to move downloaded archive into cache: {}",
            destination.display()
        )
    })?;

    debug!("downloaded {written} bytes to {}", destination.display());
    Ok(written)
}

pub(crate) fn part_path_for(destination: &Path) -> PathBuf {
    destination.with_file_name(format!(
        "{}.part",
        destination
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("archive")
    ))
}

fn stream_to_file<OnProgress>(
    client: &Client,
    url: &str,
    path: &Path,
    on_progress: &mut OnProgress,
) -> Result<u64>
where
    OnProgress: FnMut(DownloadProgress),
{
    let mut response = client
        .get(url)
        .send()
        .with_context(|| format!("failed to request archive: {url}"))?;
    let status = response.status();
    if !status.is_success() {
        bail!("archive download failed: {url} ({status})");
    }

    let total = response.content_length();
    let mut file =
        fs::File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut buffer = vec![0_u8; 64 * 1024];
    let mut downloaded = 0_u64;
    on_progress(DownloadProgress { downloaded, total });

    loop {
        let read = response
            .read(&mut buffer)
            .with_context(|| format!("failed reading archive body: {url}"))?;
        if read == 0 {
            break;
        }
        file.write_all(&buffer[..read])
            .with_context(|| format!("failed to write {}", path.display()))?;
        downloaded += read as u64;
        on_progress(DownloadProgress { downloaded, total });
    }

    file.flush()
        .with_context(|| format!("failed to flush {}", path.display()))?;
    Ok(downloaded)
}
