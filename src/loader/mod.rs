//! Extension controller: decides when to re-download, unpacks, and hands
//! the result to a browser launcher.
//!
//! All controllers in the process share one lock around the
//! check-download-record sequence, so two extensions never download at the
//! same time and marker reads and writes cannot interleave.

pub mod builder;
pub mod files;

pub use builder::ExtensionBuilder;

use crate::config::Settings;
use crate::error::{ExtensionError, Result};
use crate::models::{ExtensionConfig, ExtensionRef};
use crate::packager::{self, Downloader};
use crate::storage::MarkerStore;
use parking_lot::Mutex;
use serde_json::Value;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

static LOAD_LOCK: Mutex<()> = parking_lot::const_mutex(());

/// Runs after every (re)download with the desired configuration.
pub type UpdateHook = Arc<dyn Fn(&Extension, &ExtensionConfig) -> Result<()> + Send + Sync>;

pub struct Extension {
    reference: ExtensionRef,
    config: ExtensionConfig,
    force_update: bool,
    settings: Settings,
    extensions_root: PathBuf,
    relative_path: PathBuf,
    absolute_path: PathBuf,
    downloader: Arc<dyn Downloader>,
    marker_store: Arc<dyn MarkerStore>,
    on_update: Option<UpdateHook>,
}

impl fmt::Debug for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extension")
            .field("reference", &self.reference)
            .field("config", &self.config)
            .field("force_update", &self.force_update)
            .field("absolute_path", &self.absolute_path)
            .field("has_update_hook", &self.on_update.is_some())
            .finish_non_exhaustive()
    }
}

impl Extension {
    pub fn builder() -> ExtensionBuilder {
        ExtensionBuilder::default()
    }

    /// Controller for a store link with default settings.
    pub fn from_link(link: impl Into<String>) -> Result<Self> {
        Self::builder().link(link).build()
    }

    /// Controller for an explicit id and name with default settings.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        Self::builder().id(id).name(name).build()
    }

    pub fn id(&self) -> &str {
        self.reference.id()
    }

    pub fn name(&self) -> &str {
        self.reference.name()
    }

    pub fn reference(&self) -> &ExtensionRef {
        &self.reference
    }

    pub fn config(&self) -> &ExtensionConfig {
        &self.config
    }

    /// Configuration value stored under `key`.
    pub fn option(&self, key: &str) -> Option<&Value> {
        self.config.get(key)
    }

    pub fn force_update(&self) -> bool {
        self.force_update
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// `extensions/<name>`, relative to the base directory.
    pub fn relative_path(&self) -> &Path {
        &self.relative_path
    }

    pub fn absolute_path(&self) -> &Path {
        &self.absolute_path
    }

    pub fn exists(&self) -> bool {
        self.absolute_path.exists()
    }

    /// Make sure the unpacked extension matches the desired configuration
    /// and return `--load-extension=<path>`, or the bare path when
    /// `with_command_line_option` is false.
    pub fn load(&self, with_command_line_option: bool) -> Result<String> {
        {
            let _guard = LOAD_LOCK.lock();

            if self.needs_update()? {
                self.download()?;
                self.run_update_hook()?;
                self.marker_store
                    .record(&self.absolute_path, self.id(), &self.config)?;
                debug!(id = self.id(), path = %self.absolute_path.display(), "recorded marker");
            }
        }

        let path = self.absolute_path.display().to_string();
        if with_command_line_option {
            Ok(format!("--load-extension={path}"))
        } else {
            Ok(path)
        }
    }

    /// Whether the next [`load`](Self::load) would download.
    pub fn needs_update(&self) -> Result<bool> {
        if !self.exists() {
            debug!(name = self.name(), "not unpacked yet");
            return Ok(true);
        }

        let stored = self
            .marker_store
            .stored_config(&self.absolute_path, self.id())?;
        let changed = match stored {
            Some(Value::Object(stored)) => stored != self.config,
            _ => true,
        };
        if changed {
            debug!(name = self.name(), "configuration differs from marker");
        }

        Ok(changed || self.force_update)
    }

    fn download(&self) -> Result<()> {
        info!("Downloading {} extension ...", self.name());

        fs::create_dir_all(&self.extensions_root)
            .map_err(|e| ExtensionError::io(&self.extensions_root, e))?;

        packager::fetch_and_unpack(
            self.downloader.as_ref(),
            self.id(),
            &self.absolute_path,
            &self.settings.chrome_version,
        )
    }

    fn run_update_hook(&self) -> Result<()> {
        let Some(hook) = &self.on_update else {
            return Ok(());
        };

        hook(self, &self.config).map_err(|e| {
            warn!(name = self.name(), error = %e, "update hook failed");
            e
        })
    }
}
