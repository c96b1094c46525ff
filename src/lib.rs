//! Chrome Web Store extension loader
//!
//! Downloads an extension package by its store id, unpacks it under
//! `extensions/<name>/`, exposes its files for patching, and produces the
//! `--load-extension=` argument for an automated Chrome session. A marker
//! file remembers which configuration was last unpacked so repeated runs
//! only download when something changed.

pub mod config;
pub mod error;
pub mod models;
pub mod parser;
pub mod packager;
pub mod storage;
pub mod loader;
pub mod utils;

pub use config::Settings;
pub use error::{ExtensionError, Result};
pub use loader::{Extension, ExtensionBuilder, UpdateHook};
pub use models::{ExtensionConfig, ExtensionFile, ExtensionRef, Manifest};
pub use parser::parse_store_url;
pub use utils::resolve;

/// Load the extension behind a store link with default settings and
/// return its `--load-extension=` argument.
pub fn load_from_link(link: &str) -> Result<String> {
    Extension::from_link(link)?.load(true)
}
