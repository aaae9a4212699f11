mod activation;
mod download;
mod exposure;
mod extract;
mod layout;

pub use activation::{
    activate, activate_selected, download_selected, ensure_downloaded, ActivateOutcome,
    DownloadOutcome,
};
pub use download::{download_archive, DownloadProgress};
pub use exposure::replace_link;
pub use extract::extract_archive;
pub use layout::ToolchainLayout;
