//! Kestrel engine crate.
//!
//! Owns the frame loop, the subsystem registry and the default subsystems
//! used by higher layers (studio, tools).

pub mod config;
pub mod core;
pub mod error;
pub mod input;
pub mod logging;
pub mod meta;
pub mod registry;
pub mod swap;
pub mod systems;
pub mod time;
pub mod window;

#[cfg(test)]
mod testing;

pub use crate::core::{Engine, FrameHooks, FrameInfo, FrameLoop};
pub use crate::error::{EngineError, Result};
pub use crate::registry::{SubsystemFactory, SubsystemRegistry};
