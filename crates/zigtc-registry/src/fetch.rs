use anyhow::{bail, Context, Result};
use log::debug;
use reqwest::blocking::Client;

use crate::index::ReleaseIndex;

pub const DEFAULT_INDEX_URL: &str = "https://ziglang.org/download/index.json";

const USER_AGENT: &str = concat!("zig-toolchain/", env!("CARGO_PKG_VERSION"));

pub fn http_client() -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .context("failed to build HTTP client")
}

pub fn fetch_index(client: &Client, url: &str) -> Result<ReleaseIndex> {
    debug!("fetching release index from {url}");
    let response = client
        .get(url)
        .send()
        .with_context(|| format!("failed to request release index: {url}"))?;

    let status = response.status();
    if !status.is_success() {
        bail!("release index request failed: {url} ({status})");
    }

    let body = response
        .text()
        .with_context(|| format!("failed to read release index body: {url}"))?;
    let index = ReleaseIndex::from_json_str(&body)
        .with_context(|| format!("invalid release index from {url}"))?;
    debug!("release index has {} entries", index.len());
    Ok(index)
}
