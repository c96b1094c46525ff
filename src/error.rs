//! Error types for extension loading

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtensionError {
    /// Neither an explicit id/name pair nor a link produced a usable identity.
    #[error("cannot construct extension: {0}")]
    Construction(String),

    #[error("cannot parse store link: {0}")]
    IdentityParse(String),

    #[error("fetch failed: {0}")]
    Fetch(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("transform failed: {0}")]
    Transform(String),

    #[error("invalid manifest.json: {0}")]
    Manifest(String),

    #[error("marker store {} is unreadable: {message}", path.display())]
    MarkerStore { path: PathBuf, message: String },
}

impl ExtensionError {
    pub(crate) fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ExtensionError>;
