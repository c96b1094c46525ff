//! Manifest data of an unpacked extension

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub manifest_version: u8,
    pub name: String,
    pub version: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub permissions: Vec<serde_json::Value>,

    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Manifest {
    /// Locale placeholder names such as `__MSG_appName__` are left as-is.
    pub fn is_localized_name(&self) -> bool {
        self.name.starts_with("__MSG_") && self.name.ends_with("__")
    }
}
