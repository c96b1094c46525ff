//! Construction of [`Extension`] controllers

use super::{Extension, UpdateHook};
use crate::config::Settings;
use crate::error::{ExtensionError, Result};
use crate::models::{ExtensionConfig, ExtensionRef};
use crate::packager::{Downloader, HttpDownloader};
use crate::storage::{JsonMarkerStore, MarkerStore};
use crate::utils::resolve_from;
use serde_json::Value;
use std::env;
use std::sync::Arc;

/// Builds an [`Extension`] from a store link or an explicit id and name.
///
/// A link takes precedence over an explicit id/name pair.
#[derive(Default)]
pub struct ExtensionBuilder {
    link: Option<String>,
    id: Option<String>,
    name: Option<String>,
    config: ExtensionConfig,
    force_update: bool,
    settings: Settings,
    downloader: Option<Arc<dyn Downloader>>,
    marker_store: Option<Arc<dyn MarkerStore>>,
    on_update: Option<UpdateHook>,
}

impl ExtensionBuilder {
    pub fn link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: ExtensionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.config.insert(key.into(), value.into());
        self
    }

    pub fn force_update(mut self, force: bool) -> Self {
        self.force_update = force;
        self
    }

    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn downloader(mut self, downloader: Arc<dyn Downloader>) -> Self {
        self.downloader = Some(downloader);
        self
    }

    pub fn marker_store(mut self, store: Arc<dyn MarkerStore>) -> Self {
        self.marker_store = Some(store);
        self
    }

    /// Callback run after each download, before the marker is written.
    /// Typical use is patching the unpacked files with configuration values.
    pub fn on_update<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Extension, &ExtensionConfig) -> Result<()> + Send + Sync + 'static,
    {
        self.on_update = Some(Arc::new(hook));
        self
    }

    pub fn build(self) -> Result<Extension> {
        let reference = match self.link {
            Some(link) => ExtensionRef::from_link(link)?,
            None => ExtensionRef::new(
                self.id.unwrap_or_default(),
                self.name.unwrap_or_default(),
            )?,
        };

        let base_dir = match &self.settings.base_dir {
            Some(dir) => dir.clone(),
            None => env::current_dir().map_err(|e| ExtensionError::io(".", e))?,
        };

        let relative_path = self.settings.extensions_dir.join(reference.name());
        let extensions_root =
            resolve_from(&base_dir, &self.settings.extensions_dir.to_string_lossy(), 0);
        let absolute_path = resolve_from(&base_dir, &relative_path.to_string_lossy(), 0);

        let downloader = match self.downloader {
            Some(downloader) => downloader,
            None => Arc::new(HttpDownloader::new(&self.settings)?),
        };
        let marker_store = match self.marker_store {
            Some(store) => store,
            None => Arc::new(JsonMarkerStore::new(
                extensions_root.join(&self.settings.marker_file),
            )),
        };

        Ok(Extension {
            reference,
            config: self.config,
            force_update: self.force_update,
            settings: self.settings,
            extensions_root,
            relative_path,
            absolute_path,
            downloader,
            marker_store,
            on_update: self.on_update,
        })
    }
}
