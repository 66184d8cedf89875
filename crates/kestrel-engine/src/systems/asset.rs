use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use serde::de::DeserializeOwned;

use crate::config::ConfigManager;
use crate::registry::Handle;

use super::{FileSystem, Subsystem};

/// Resolves asset URLs against the asset folder and loads TOML assets.
///
/// Asset URLs are paths relative to the asset folder, e.g.
/// `"worlds/sandbox.toml"`.
#[derive(Debug)]
pub struct AssetManager {
    files: Handle<FileSystem>,
    asset_folder: PathBuf,
}

impl AssetManager {
    pub fn new(config: &Handle<ConfigManager>, files: Handle<FileSystem>) -> Result<Self> {
        let asset_folder = config
            .with(|c| c.asset_folder().to_path_buf())
            .ok_or_else(|| anyhow!("config subsystem is gone"))?;

        if !asset_folder.is_dir() {
            log::warn!("asset folder {} does not exist", asset_folder.display());
        }

        Ok(Self {
            files,
            asset_folder,
        })
    }

    pub fn resolve(&self, url: &str) -> PathBuf {
        self.asset_folder.join(url)
    }

    pub fn exists(&self, url: &str) -> bool {
        self.files
            .with(|fs| fs.exists(self.resolve(url)))
            .unwrap_or(false)
    }

    pub fn load_text(&self, url: &str) -> Result<String> {
        self.files
            .with(|fs| fs.read_to_string(self.resolve(url)))
            .ok_or_else(|| anyhow!("file system is gone"))?
    }

    /// Loads and deserializes a TOML asset.
    pub fn load_toml<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let text = self.load_text(url)?;
        toml::from_str(&text).with_context(|| format!("malformed asset {url}"))
    }
}

impl Subsystem for AssetManager {
    fn name(&self) -> &'static str {
        "asset"
    }
}
