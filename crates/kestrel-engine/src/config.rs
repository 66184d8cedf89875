//! Engine configuration.
//!
//! The config file is TOML. Every section is optional; missing keys fall back
//! to [`Default`]. Relative folders are resolved against the directory that
//! contains the config file.
//!
//! ```toml
//! [engine]
//! root = "."
//! asset_folder = "assets"
//! default_world = "worlds/sandbox.toml"
//!
//! [window]
//! title = "Kestrel"
//! width = 1280
//! height = 720
//!
//! [log]
//! filter = "info,kestrel_engine=debug"
//!
//! [physics]
//! debug_render = false
//!
//! [editor]
//! tick_component_types = ["spin"]
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{EngineError, Result};
use crate::systems::Subsystem;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub engine: EngineSection,
    pub window: WindowSection,
    pub log: LogSection,
    pub physics: PhysicsSection,
    pub editor: EditorSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineSection {
    /// Engine root folder, relative to the config file.
    pub root: PathBuf,
    /// Asset folder, relative to `root`.
    pub asset_folder: PathBuf,
    /// Asset URL of the world loaded at startup. Empty = start with no world.
    pub default_world: String,
}

impl Default for EngineSection {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            asset_folder: PathBuf::from("assets"),
            default_world: String::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowSection {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowSection {
    fn default() -> Self {
        Self {
            title: "Kestrel".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LogSection {
    /// `env_logger` filter string. `None` defers to `RUST_LOG`.
    pub filter: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PhysicsSection {
    /// Draw physics debug shapes each frame. The physics collaborator must
    /// also report `debug_render_enabled`.
    pub debug_render: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EditorSection {
    /// Component type names ticked while an editor drives the loop.
    pub tick_component_types: Vec<String>,
}

impl EngineConfig {
    /// Parses a config from TOML text. `origin` is only used in error messages.
    pub fn from_toml_str(text: &str, origin: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| EngineError::Config {
            path: origin.to_string(),
            source: Box::new(e),
        })
    }
}

/// Config subsystem: owns the parsed config and the resolved folders.
///
/// First subsystem in the startup order; every other subsystem reads its
/// settings from here.
#[derive(Debug)]
pub struct ConfigManager {
    source: PathBuf,
    config: EngineConfig,
    root_folder: PathBuf,
    asset_folder: PathBuf,
}

impl ConfigManager {
    /// Loads and parses the config file at `source`.
    pub fn load(source: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(source).map_err(|e| EngineError::Config {
            path: source.display().to_string(),
            source: Box::new(e),
        })?;
        let config = EngineConfig::from_toml_str(&text, &source.display().to_string())?;
        Ok(Self::from_config(source, config))
    }

    /// Wraps an already parsed config as if it had been read from `source`.
    pub fn from_config(source: &Path, config: EngineConfig) -> Self {
        let config_dir = source.parent().unwrap_or_else(|| Path::new("."));
        let root_folder = config_dir.join(&config.engine.root);
        let asset_folder = root_folder.join(&config.engine.asset_folder);

        Self {
            source: source.to_path_buf(),
            config,
            root_folder,
            asset_folder,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn root_folder(&self) -> &Path {
        &self.root_folder
    }

    pub fn asset_folder(&self) -> &Path {
        &self.asset_folder
    }
}

impl Subsystem for ConfigManager {
    fn name(&self) -> &'static str {
        "config"
    }
}
