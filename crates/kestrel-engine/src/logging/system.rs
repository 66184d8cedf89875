use anyhow::{Result, anyhow};

use crate::config::ConfigManager;
use crate::registry::Handle;
use crate::systems::Subsystem;

use super::init_logging;

/// Log subsystem.
///
/// Starts right after config so every later subsystem logs through an
/// initialized backend. The backend is process-global and outlives this
/// subsystem; shutdown only flushes.
#[derive(Debug)]
pub struct LogSystem {
    filter: Option<String>,
}

impl LogSystem {
    pub fn start(config: &Handle<ConfigManager>) -> Result<Self> {
        let filter = config
            .with(|c| c.config().log.filter.clone())
            .ok_or_else(|| anyhow!("config subsystem is gone"))?;

        let installed = init_logging(filter.as_deref());
        if !installed {
            log::debug!("logger already initialized; keeping existing backend");
        }

        log::info!("log system started");
        Ok(Self { filter })
    }

    /// Filter requested by the config, if any.
    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }
}

impl Subsystem for LogSystem {
    fn name(&self) -> &'static str {
        "log"
    }

    fn shutdown(&mut self) {
        log::info!("log system shutdown");
        log::logger().flush();
    }
}
