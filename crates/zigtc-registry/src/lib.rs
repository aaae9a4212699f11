mod fetch;
mod index;

pub use fetch::{fetch_index, http_client, DEFAULT_INDEX_URL};
pub use index::{IndexEntry, ReleaseIndex, TargetDownload};

#[cfg(test)]
mod tests;
