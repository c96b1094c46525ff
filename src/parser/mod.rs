//! Parsing modules for store links and extension manifests

pub mod store_url;
pub mod manifest;

pub use store_url::{parse_store_url, parse_store_path, is_extension_id};
pub use manifest::parse_manifest;
