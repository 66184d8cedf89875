//! Desktop window backend.
//!
//! Owns the `winit` EventLoop and Window and exposes them through the
//! `WindowSystem` contract. Events are pumped once per frame instead of
//! handing control to `winit`'s own loop, so the engine keeps ownership of
//! frame pacing.

mod winit_window;

pub use winit_window::WinitWindow;
