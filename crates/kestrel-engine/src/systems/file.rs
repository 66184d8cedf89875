use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, ensure};

use crate::config::ConfigManager;
use crate::registry::Handle;

use super::Subsystem;

/// File access rooted at the engine root folder.
#[derive(Debug)]
pub struct FileSystem {
    root: PathBuf,
}

impl FileSystem {
    pub fn new(config: &Handle<ConfigManager>) -> Result<Self> {
        let root = config
            .with(|c| c.root_folder().to_path_buf())
            .ok_or_else(|| anyhow!("config subsystem is gone"))?;
        ensure!(root.is_dir(), "engine root {} is not a directory", root.display());

        log::debug!("file system rooted at {}", root.display());
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Joins `path` onto the root. Absolute paths are returned unchanged.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }

    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        self.resolve(path).exists()
    }

    pub fn read_to_string(&self, path: impl AsRef<Path>) -> Result<String> {
        let full = self.resolve(path);
        std::fs::read_to_string(&full).with_context(|| format!("failed to read {}", full.display()))
    }
}

impl Subsystem for FileSystem {
    fn name(&self) -> &'static str {
        "file"
    }
}
