//! Input types.
//!
//! Platform-agnostic: window backends translate their native events into
//! `InputEvent`s, and the input subsystem folds them into `InputState`.

mod frame;
mod state;
mod types;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{InputEvent, Key, KeyState, MouseButton};
