//! Text file handle for files inside an unpacked extension

use crate::error::{ExtensionError, Result};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionFile {
    path: PathBuf,
}

impl ExtensionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole file as UTF-8 text.
    pub fn read(&self) -> Result<String> {
        fs::read_to_string(&self.path).map_err(|e| ExtensionError::io(&self.path, e))
    }

    /// Replace the file contents, creating the file if needed.
    /// The parent directory must already exist.
    pub fn write(&self, contents: &str) -> Result<()> {
        fs::write(&self.path, contents).map_err(|e| ExtensionError::io(&self.path, e))
    }

    /// Read, transform and write back.
    ///
    /// Returning `None` from `transform` aborts with
    /// [`ExtensionError::Transform`] and leaves the file untouched; an empty
    /// string is a valid result. Not atomic against other writers.
    pub fn update_with<F>(&self, transform: F) -> Result<()>
    where
        F: FnOnce(String) -> Option<String>,
    {
        let contents = self.read()?;
        let updated = transform(contents).ok_or_else(|| {
            ExtensionError::Transform(format!(
                "no content returned for {}",
                self.path.display()
            ))
        })?;
        self.write(&updated)
    }
}
