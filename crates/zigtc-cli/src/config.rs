use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use log::debug;
use serde::Deserialize;
use zigtc_core::{HostOs, HostTarget, ToolchainError};
use zigtc_installer::ToolchainLayout;
use zigtc_registry::DEFAULT_INDEX_URL;

pub(crate) const HOME_ENV: &str = "ZIG_TOOLCHAIN_HOME";
pub(crate) const INDEX_URL_ENV: &str = "ZIG_TOOLCHAIN_INDEX_URL";

/// Optional `<home>/config.toml`.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub(crate) struct ConfigFile {
    pub index_url: Option<String>,
    pub bin_dir: Option<PathBuf>,
}

impl ConfigFile {
    pub(crate) fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("failed to parse zig-toolchain config")
    }

    fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("invalid config: {}", path.display()))
    }
}

/// Everything a command needs to know about the machine it runs on.
#[derive(Debug, Clone)]
pub(crate) struct ToolchainConfig {
    pub host: HostTarget,
    pub layout: ToolchainLayout,
    pub index_url: String,
}

impl ToolchainConfig {
    pub(crate) fn from_env() -> Result<Self, ToolchainError> {
        let host = HostTarget::detect().ok_or_else(|| ToolchainError::UnsupportedHost {
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
        })?;
        Ok(Self::resolve(host, |key| std::env::var(key).ok())?)
    }

    pub(crate) fn resolve<Lookup>(host: HostTarget, lookup: Lookup) -> Result<Self>
    where
        Lookup: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let home = match var(HOME_ENV) {
            Some(home) => PathBuf::from(home),
            None => default_home(host, &var)?,
        };
        let file = ConfigFile::load(&ToolchainLayout::config_path_for(&home))?;

        let bin_dir = match file.bin_dir {
            Some(bin_dir) => bin_dir,
            None => default_bin_dir(host, &home, &var)?,
        };
        let layout = ToolchainLayout::new(&home, bin_dir.join(link_file_name(host)));
        let index_url = var(INDEX_URL_ENV)
            .or(file.index_url)
            .unwrap_or_else(|| DEFAULT_INDEX_URL.to_string());

        debug!(
            "host={host} home={} link={} index={index_url}",
            layout.home().display(),
            layout.link_path().display()
        );
        Ok(Self {
            host,
            layout,
            index_url,
        })
    }
}

fn default_home<Var>(host: HostTarget, var: &Var) -> Result<PathBuf>
where
    Var: Fn(&str) -> Option<String>,
{
    if host.os == HostOs::Windows {
        let app_data = var("LOCALAPPDATA")
            .ok_or_else(|| anyhow!("LOCALAPPDATA is not set; cannot resolve toolchain home"))?;
        return Ok(PathBuf::from(app_data).join("zig-toolchain"));
    }

    let home =
        var("HOME").ok_or_else(|| anyhow!("HOME is not set; cannot resolve toolchain home"))?;
    Ok(PathBuf::from(home).join(".zig-toolchain"))
}

fn default_bin_dir<Var>(host: HostTarget, toolchain_home: &Path, var: &Var) -> Result<PathBuf>
where
    Var: Fn(&str) -> Option<String>,
{
    if host.os == HostOs::Windows {
        return Ok(toolchain_home.join("bin"));
    }

    let home =
        var("HOME").ok_or_else(|| anyhow!("HOME is not set; cannot resolve link directory"))?;
    Ok(PathBuf::from(home).join(".local").join("bin"))
}

fn link_file_name(host: HostTarget) -> &'static str {
    match host.os {
        HostOs::Windows => "zig.cmd",
        HostOs::Linux | HostOs::Macos => "zig",
    }
}
