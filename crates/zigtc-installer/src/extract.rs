use anyhow::{anyhow, Context, Result};
use log::debug;
use std::ffi::OsString;
use std::path::Path;
use std::process::Command;
use zigtc_core::ArchiveType;

/// Unpacks `archive_path` into `destination` with the platform's archive tools.
pub fn extract_archive(archive_path: &Path, destination: &Path) -> Result<()> {
    let archive_type = archive_path
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(ArchiveType::split_file_name)
        .map(|(_, archive_type)| archive_type)
        .ok_or_else(|| {
            anyhow!(
                "cannot tell the archive type of {}; expected .tar.xz or .zip",
                archive_path.display()
            )
        })?;

    debug!(
        "extracting {} ({}) into {}",
        archive_path.display(),
        archive_type.as_str(),
        destination.display()
    );
    match archive_type {
        ArchiveType::TarXz => extract_tar(archive_path, destination),
        ArchiveType::Zip => extract_zip(archive_path, destination),
    }
}

fn extract_tar(archive_path: &Path, dst: &Path) -> Result<()> {
    run_command(
        Command::new("tar")
            .arg("-xf")
            .arg(archive_path)
            .arg("-C")
            .arg(dst),
        "failed to extract tar archive",
    )
}

fn extract_zip(archive_path: &Path, dst: &Path) -> Result<()> {
    if cfg!(windows) {
        let mut command = Command::new("powershell");
        command.arg("-NoProfile").arg("-Command").arg(format!(
            "Expand-Archive -LiteralPath '{}' -DestinationPath '{}' -Force",
            escape_ps_single_quote(archive_path),
            escape_ps_single_quote(dst)
        ));
        if run_command(
            &mut command,
            "failed to extract zip archive with powershell",
        )
        .is_ok()
        {
            return Ok(());
        }
    }

    run_command(
        Command::new("unzip").arg("-q").arg(archive_path).arg("-d").arg(dst),
        "failed to extract zip archive with unzip",
    )
}

pub(crate) fn run_command(command: &mut Command, context_message: &str) -> Result<()> {
    let output = command
        .output()
        .with_context(|| format!("{context_message}: command failed to start"))?;
    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    Err(anyhow!(
        "{context_message}: status={} stdout='{}' stderr='{}'",
        output.status,
        stdout.trim(),
        stderr.trim()
    ))
}

fn escape_ps_single_quote(path: &Path) -> String {
    let mut os = OsString::new();
    os.push(path.as_os_str());
    os.to_string_lossy().replace('\'', "''")
}
