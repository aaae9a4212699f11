use std::collections::BTreeMap;

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Deserializer};
use zigtc_core::HostTarget;

/// The upstream `index.json`, keyed by release number or channel name.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ReleaseIndex {
    entries: BTreeMap<String, IndexEntry>,
}

impl ReleaseIndex {
    pub fn from_json_str(input: &str) -> Result<Self> {
        serde_json::from_str(input).context("failed to parse release index")
    }

    /// Entries in key order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &IndexEntry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    pub(crate) fn get(&self, key: &str) -> Option<&IndexEntry> {
        self.entries.get(key)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct IndexEntry {
    #[serde(default)]
    pub version: Option<String>,
    /// Everything else: per-target descriptors plus release metadata such
    /// as `date` and `docs`.
    #[serde(flatten)]
    pub targets: BTreeMap<String, serde_json::Value>,
}

impl IndexEntry {
    /// The `version` field when the entry carries a non-empty one.
    pub fn explicit_version(&self) -> Option<&str> {
        self.version
            .as_deref()
            .map(str::trim)
            .filter(|version| !version.is_empty())
    }

    pub fn download_for(&self, host: HostTarget) -> Option<TargetDownload> {
        let key = host.index_key();
        let raw = self.targets.get(&key)?;
        match serde_json::from_value::<TargetDownload>(raw.clone()) {
            Ok(download) => Some(download),
            Err(err) => {
                debug!("ignoring malformed '{key}' download descriptor: {err}");
                None
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TargetDownload {
    pub tarball: String,
    #[serde(default)]
    pub shasum: Option<String>,
    #[serde(default, deserialize_with = "deserialize_size")]
    pub size: Option<u64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SizeRepr {
    Number(u64),
    Text(String),
}

fn deserialize_size<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<SizeRepr>::deserialize(deserializer)? {
        None => Ok(None),
        Some(SizeRepr::Number(size)) => Ok(Some(size)),
        Some(SizeRepr::Text(text)) => text
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
