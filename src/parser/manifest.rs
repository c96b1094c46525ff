//! Manifest parsing functionality

use crate::error::{ExtensionError, Result};
use crate::models::Manifest;
use std::path::Path;

/// Parse manifest.json from bytes
pub fn parse_manifest(content: &[u8]) -> Result<Manifest> {
    let content_str = std::str::from_utf8(content)
        .map_err(|e| ExtensionError::Manifest(format!("invalid UTF-8: {e}")))?;

    // Chrome tolerates comments in manifest.json
    json5::from_str(content_str)
        .map_err(|e| ExtensionError::Manifest(e.to_string()))
}

/// Parse manifest.json from file path
pub fn parse_manifest_from_file(path: impl AsRef<Path>) -> Result<Manifest> {
    let path = path.as_ref();
    let content = std::fs::read(path).map_err(|e| ExtensionError::io(path, e))?;
    parse_manifest(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_manifest() {
        let json = br#"{
            "manifest_version": 3,
            "name": "Test Extension",
            "version": "1.0.0"
        }"#;

        let manifest = parse_manifest(json).unwrap();
        assert_eq!(manifest.manifest_version, 3);
        assert_eq!(manifest.name, "Test Extension");
        assert_eq!(manifest.version, "1.0.0");
        assert!(!manifest.is_localized_name());
    }

    #[test]
    fn test_parse_with_comments() {
        let json = br#"{
            // This is a comment
            "manifest_version": 2,
            "name": "__MSG_appName__", // inline comment
            /* Block comment */
            "version": "1.0.0",
            "permissions": ["storage", {"fileSystem": ["write"]}]
        }"#;

        let manifest = parse_manifest(json).unwrap();
        assert_eq!(manifest.manifest_version, 2);
        assert!(manifest.is_localized_name());
        assert_eq!(manifest.permissions.len(), 2);
    }

    #[test]
    fn test_parse_garbage_fails() {
        assert!(parse_manifest(b"not a manifest").is_err());
    }
}
