//! Extension identity and caller configuration

use crate::error::{ExtensionError, Result};
use crate::parser::{is_extension_id, parse_store_url};

/// Caller supplied options, stored verbatim in the marker store.
///
/// Backed by `serde_json::Map` without `preserve_order`, so equality
/// ignores key order while arrays stay order-sensitive.
pub type ExtensionConfig = serde_json::Map<String, serde_json::Value>;

/// Identity of a store extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionRef {
    id: String,
    name: String,
    source_link: Option<String>,
}

impl ExtensionRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        let id = id.into();
        let name = name.into();

        if id.is_empty() {
            return Err(ExtensionError::Construction("extension id is required".to_string()));
        }
        if !is_extension_id(&id) {
            return Err(ExtensionError::Construction(format!(
                "extension id {id:?} is not 32 lowercase letters"
            )));
        }
        if name.is_empty() {
            return Err(ExtensionError::Construction("extension name is required".to_string()));
        }
        if name == "." || name == ".." || name.contains(['/', '\\']) {
            return Err(ExtensionError::Construction(format!(
                "extension name {name:?} is not a valid directory name"
            )));
        }

        Ok(Self {
            id,
            name,
            source_link: None,
        })
    }

    /// Derive the identity from a store link.
    pub fn from_link(link: impl Into<String>) -> Result<Self> {
        let link = link.into();
        let (name, id) = parse_store_url(&link)?;

        let mut reference = Self::new(id, name)?;
        reference.source_link = Some(link);
        Ok(reference)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source_link(&self) -> Option<&str> {
        self.source_link.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "cjpalhdlnbpafiamejdnhcphjbkeiagm";

    #[test]
    fn test_new_requires_id_and_name() {
        assert!(matches!(
            ExtensionRef::new("", "ublock"),
            Err(ExtensionError::Construction(_))
        ));
        assert!(matches!(
            ExtensionRef::new(ID, ""),
            Err(ExtensionError::Construction(_))
        ));
        assert!(matches!(
            ExtensionRef::new("not-an-id", "ublock"),
            Err(ExtensionError::Construction(_))
        ));
    }

    #[test]
    fn test_new_rejects_escaping_names() {
        for name in ["..", ".", "a/b", "a\\b"] {
            assert!(ExtensionRef::new(ID, name).is_err(), "{name} accepted");
        }
    }

    #[test]
    fn test_from_link_keeps_link() {
        let link = format!("https://chromewebstore.google.com/detail/ublock-origin/{ID}");
        let reference = ExtensionRef::from_link(link.clone()).unwrap();
        assert_eq!(reference.id(), ID);
        assert_eq!(reference.name(), "ublock-origin");
        assert_eq!(reference.source_link(), Some(link.as_str()));
    }

    #[test]
    fn test_from_link_without_id_is_parse_error() {
        assert!(matches!(
            ExtensionRef::from_link("https://chromewebstore.google.com/detail/ublock-origin"),
            Err(ExtensionError::IdentityParse(_))
        ));
    }
}
