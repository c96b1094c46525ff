//! HTTP access to the Chrome update service

use crate::config::Settings;
use crate::error::{ExtensionError, Result};
use reqwest::blocking::Client;

const UPDATE_SERVICE_URL: &str = "https://clients2.google.com/service/update2/crx";

/// Status and body of a finished GET request.
#[derive(Debug, Clone)]
pub struct DownloadResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Blocking HTTP GET capability used by the fetcher.
pub trait Downloader: Send + Sync {
    fn get(&self, url: &str) -> Result<DownloadResponse>;
}

/// Download URL for a CRX2/CRX3 package of `extension_id`.
pub fn crx_download_url(extension_id: &str, chrome_version: &str) -> String {
    format!(
        "{UPDATE_SERVICE_URL}?response=redirect&prodversion={chrome_version}\
         &x=id%3D{extension_id}%26installsource%3Dondemand%26uc&acceptformat=crx2,crx3"
    )
}

/// [`Downloader`] backed by a blocking `reqwest` client.
///
/// Must not be called from inside an async runtime.
pub struct HttpDownloader {
    client: Client,
}

impl HttpDownloader {
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = Client::builder()
            .user_agent(settings.user_agent.clone())
            .timeout(settings.http_timeout)
            .build()
            .map_err(|e| ExtensionError::Fetch(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl Downloader for HttpDownloader {
    fn get(&self, url: &str) -> Result<DownloadResponse> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| ExtensionError::Fetch(format!("request to {url} failed: {e}")))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .map_err(|e| ExtensionError::Fetch(format!("failed to read response body: {e}")))?;

        Ok(DownloadResponse {
            status,
            body: body.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crx_download_url() {
        let url = crx_download_url("cjpalhdlnbpafiamejdnhcphjbkeiagm", "120.0.0.0");
        assert_eq!(
            url,
            "https://clients2.google.com/service/update2/crx?response=redirect&prodversion=120.0.0.0\
             &x=id%3Dcjpalhdlnbpafiamejdnhcphjbkeiagm%26installsource%3Dondemand%26uc&acceptformat=crx2,crx3"
        );
    }
}
