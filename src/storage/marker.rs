//! Persisted record of which configuration was last unpacked where

use crate::error::{ExtensionError, Result};
use crate::models::ExtensionConfig;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Extension id → configuration recorded for one destination directory.
pub type MarkerRecords = Map<String, Value>;

pub trait MarkerStore: Send + Sync {
    /// Records for `dir`, empty when nothing was stored yet.
    fn records(&self, dir: &Path) -> Result<MarkerRecords>;

    /// Replace the records for `dir`.
    fn save_records(&self, dir: &Path, records: MarkerRecords) -> Result<()>;

    fn stored_config(&self, dir: &Path, extension_id: &str) -> Result<Option<Value>> {
        Ok(self.records(dir)?.remove(extension_id))
    }

    /// Store `config` for `extension_id`, keeping other ids recorded for `dir`.
    fn record(&self, dir: &Path, extension_id: &str, config: &ExtensionConfig) -> Result<()> {
        let mut records = self.records(dir)?;
        records.insert(extension_id.to_string(), Value::Object(config.clone()));
        self.save_records(dir, records)
    }
}

/// [`MarkerStore`] kept in one JSON file, keyed by directory path.
#[derive(Debug, Clone)]
pub struct JsonMarkerStore {
    path: PathBuf,
}

impl JsonMarkerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, MarkerRecords>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| ExtensionError::io(&self.path, e))?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content).map_err(|e| ExtensionError::MarkerStore {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    fn save(&self, document: &BTreeMap<String, MarkerRecords>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| ExtensionError::io(parent, e))?;
        }

        let content = serde_json::to_string_pretty(document).map_err(|e| ExtensionError::MarkerStore {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        fs::write(&self.path, content).map_err(|e| ExtensionError::io(&self.path, e))
    }
}

fn dir_key(dir: &Path) -> String {
    dir.to_string_lossy().into_owned()
}

impl MarkerStore for JsonMarkerStore {
    fn records(&self, dir: &Path) -> Result<MarkerRecords> {
        Ok(self.load()?.remove(&dir_key(dir)).unwrap_or_default())
    }

    fn save_records(&self, dir: &Path, records: MarkerRecords) -> Result<()> {
        let mut document = self.load()?;
        document.insert(dir_key(dir), records);
        self.save(&document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::TempDir;

    fn config(value: Value) -> ExtensionConfig {
        match value {
            Value::Object(map) => map,
            _ => panic!("config must be an object"),
        }
    }

    #[test]
    fn test_missing_file_has_no_records() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonMarkerStore::new(temp_dir.path().join("markers.json"));

        assert!(store.records(Path::new("/x/extensions/a")).unwrap().is_empty());
        assert_eq!(store.stored_config(Path::new("/x/extensions/a"), "id").unwrap(), None);
    }

    #[test]
    fn test_record_merges_ids_and_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonMarkerStore::new(temp_dir.path().join("nested").join("markers.json"));
        let dir_a = Path::new("/x/extensions/a");
        let dir_b = Path::new("/x/extensions/b");

        store.record(dir_a, "first", &config(json!({"key": 1}))).unwrap();
        store.record(dir_a, "second", &config(json!({}))).unwrap();
        store.record(dir_b, "first", &config(json!({"key": 2}))).unwrap();
        store.record(dir_a, "first", &config(json!({"key": 3}))).unwrap();

        let on_disk: Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(
            on_disk,
            json!({
                "/x/extensions/a": {"first": {"key": 3}, "second": {}},
                "/x/extensions/b": {"first": {"key": 2}},
            })
        );
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("markers.json");
        fs::write(&path, "{ not json").unwrap();

        let store = JsonMarkerStore::new(path);
        assert!(matches!(
            store.records(Path::new("/a")),
            Err(ExtensionError::MarkerStore { .. })
        ));
    }
}
