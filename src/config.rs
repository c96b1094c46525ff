//! Loader settings

use std::path::PathBuf;
use std::time::Duration;

/// Chrome version advertised to the update service.
pub const DEFAULT_CHROME_VERSION: &str = "120.0.0.0";

pub const DEFAULT_EXTENSIONS_DIR: &str = "extensions";

pub const DEFAULT_MARKER_FILE: &str = "package_storage.json";

#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory the extensions directory is resolved against.
    /// `None` means the working directory at build time.
    pub base_dir: Option<PathBuf>,
    pub extensions_dir: PathBuf,
    pub chrome_version: String,
    /// Marker file name, resolved inside `extensions_dir`.
    pub marker_file: PathBuf,
    /// `None` disables the request timeout.
    pub http_timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_dir: None,
            extensions_dir: PathBuf::from(DEFAULT_EXTENSIONS_DIR),
            chrome_version: DEFAULT_CHROME_VERSION.to_string(),
            marker_file: PathBuf::from(DEFAULT_MARKER_FILE),
            http_timeout: None,
            user_agent: concat!("crxload/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Settings {
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    pub fn with_extensions_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.extensions_dir = dir.into();
        self
    }

    pub fn with_chrome_version(mut self, version: impl Into<String>) -> Self {
        self.chrome_version = version.into();
        self
    }

    pub fn with_marker_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.marker_file = file.into();
        self
    }

    pub fn with_http_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.http_timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
