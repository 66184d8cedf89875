//! Engine error types.

use thiserror::Error;

use crate::registry::SubsystemId;

/// Errors surfaced by engine startup and configuration.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A subsystem failed to construct. Startup was aborted and everything
    /// built before it has already been torn down.
    #[error("failed to start {system} subsystem")]
    Startup {
        system: SubsystemId,
        #[source]
        source: anyhow::Error,
    },

    /// `start_systems` was called while subsystems were still running.
    #[error("subsystems already running; shut them down before starting again")]
    AlreadyStarted,

    /// The config file could not be read or parsed.
    #[error("invalid config {path}")]
    Config {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

impl EngineError {
    pub fn startup(system: SubsystemId, source: impl Into<anyhow::Error>) -> Self {
        Self::Startup {
            system,
            source: source.into(),
        }
    }
}
