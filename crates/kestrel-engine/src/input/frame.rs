use std::collections::HashSet;

use super::types::{Key, MouseButton};

/// Transitions observed during one input tick.
///
/// `InputState` holds what is currently down; `InputFrame` holds what changed.
#[derive(Debug, Default)]
pub struct InputFrame {
    pub keys_pressed: HashSet<Key>,
    pub keys_released: HashSet<Key>,
    pub buttons_pressed: HashSet<MouseButton>,
    pub buttons_released: HashSet<MouseButton>,
    /// Pointer movement in logical pixels.
    pub pointer_delta: (f32, f32),
    pub wheel: (f32, f32),
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();
        self.pointer_delta = (0.0, 0.0);
        self.wheel = (0.0, 0.0);
    }
}
