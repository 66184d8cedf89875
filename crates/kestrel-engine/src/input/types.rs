/// Keyboard key identifier.
///
/// Covers the keys the engine binds by default. Backends map anything else
/// to `Key::Unknown`, carrying a platform code when they have one.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Tab,
    Space,
    Backspace,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    Shift,
    Control,
    Alt,

    W,
    A,
    S,
    D,
    Q,
    E,

    F1,
    F2,
    F3,
    F4,

    Unknown(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

/// Input event produced by a window backend.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key { key: Key, state: KeyState, repeat: bool },

    /// Pointer position in logical pixels.
    PointerMoved { x: f32, y: f32 },
    PointerButton { button: MouseButton, state: KeyState },
    /// Pointer left the window surface.
    PointerLeft,

    /// Wheel delta in lines; positive is away from the user.
    Wheel { x: f32, y: f32 },

    Focused(bool),
}
