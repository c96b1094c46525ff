//! Listing files of an unpacked extension

use super::Extension;
use crate::error::Result;
use crate::models::{ExtensionFile, Manifest};
use crate::parser::manifest::parse_manifest_from_file;
use crate::utils::resolve_from;
use walkdir::WalkDir;

impl Extension {
    /// All files below the extension directory whose name ends with
    /// `suffix`, sorted by path. Dot-prefixed files and directories are
    /// skipped. Empty when nothing is unpacked yet.
    pub fn files(&self, suffix: &str) -> Vec<ExtensionFile> {
        let mut paths: Vec<_> = WalkDir::new(self.absolute_path())
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'))
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| e.file_name().to_string_lossy().ends_with(suffix))
            .map(|e| e.into_path())
            .collect();
        paths.sort();

        paths.into_iter().map(ExtensionFile::new).collect()
    }

    pub fn js_files(&self) -> Vec<ExtensionFile> {
        self.files(".js")
    }

    pub fn json_files(&self) -> Vec<ExtensionFile> {
        self.files(".json")
    }

    pub fn html_files(&self) -> Vec<ExtensionFile> {
        self.files(".html")
    }

    pub fn css_files(&self) -> Vec<ExtensionFile> {
        self.files(".css")
    }

    /// Handle for `relative` inside the extension directory, e.g.
    /// `"js/background.js"` or `"/manifest.json"`. The file need not exist.
    pub fn file(&self, relative: &str) -> ExtensionFile {
        let relative = relative.trim().trim_start_matches(['/', '\\']);
        ExtensionFile::new(resolve_from(self.absolute_path(), relative, 0))
    }

    /// Parsed `manifest.json` of the unpacked extension.
    pub fn manifest(&self) -> Result<Manifest> {
        parse_manifest_from_file(self.absolute_path().join("manifest.json"))
    }
}
