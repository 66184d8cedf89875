//! Core engine-facing contracts.
//!
//! [`Engine`] is what a binary or an embedding editor owns. It starts the
//! registry, drives the [`FrameLoop`] and tears everything down again.
//! Higher layers observe frames through [`FrameHooks`] instead of reaching
//! into loop internals.

mod engine;
mod frame_loop;
mod hooks;

pub use engine::Engine;
pub use frame_loop::{FrameLoop, LoopState};
pub use hooks::{FrameHooks, FrameInfo};
