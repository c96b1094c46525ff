//! Package download and extraction

pub mod downloader;
pub mod extractor;

pub use downloader::{crx_download_url, DownloadResponse, Downloader, HttpDownloader};

use crate::error::{ExtensionError, Result};
use std::path::Path;
use tracing::debug;

/// Download the package of `extension_id` and extract it into `destination`.
///
/// One attempt only. A failed extraction may leave `destination` partially
/// populated.
pub fn fetch_and_unpack(
    downloader: &dyn Downloader,
    extension_id: &str,
    destination: &Path,
    chrome_version: &str,
) -> Result<()> {
    let url = crx_download_url(extension_id, chrome_version);
    let response = downloader.get(&url)?;

    if response.status != 200 {
        debug!(status = response.status, %url, "update service refused download");
        return Err(ExtensionError::Fetch(format!(
            "download failed for {extension_id}"
        )));
    }

    debug!(bytes = response.body.len(), destination = %destination.display(), "unpacking package");
    extractor::unpack(&response.body, destination)
}
