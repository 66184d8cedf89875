use crate::input::{InputFrame, InputState};
use crate::registry::Handle;

use super::{InputSystem, Subsystem, WindowSystem};

/// Default input subsystem.
///
/// Each tick takes the events the window collected during the previous
/// frame's event poll and folds them into `state`/`frame`. Input gathered in
/// frame N is therefore observed by logic in frame N + 1.
pub struct StateInput {
    window: Handle<dyn WindowSystem>,
    state: InputState,
    frame: InputFrame,
}

impl StateInput {
    pub fn new(window: Handle<dyn WindowSystem>) -> Self {
        Self {
            window,
            state: InputState::default(),
            frame: InputFrame::default(),
        }
    }

    pub fn state(&self) -> &InputState {
        &self.state
    }

    /// Transitions seen by the most recent tick.
    pub fn frame(&self) -> &InputFrame {
        &self.frame
    }
}

impl Subsystem for StateInput {
    fn name(&self) -> &'static str {
        "input"
    }
}

impl InputSystem for StateInput {
    fn tick(&mut self) {
        self.frame.clear();

        let events = self
            .window
            .with_mut(|w| w.take_input_events())
            .unwrap_or_default();

        for ev in &events {
            self.state.apply_event(&mut self.frame, ev);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{InputEvent, Key, KeyState};
    use crate::registry::{Shared, share};
    use crate::systems::HeadlessWindow;

    #[test]
    fn consumes_events_queued_on_the_window() {
        let window = share(HeadlessWindow::new(640, 480));
        let dyn_window: Shared<dyn WindowSystem> = window.clone();
        let mut input = StateInput::new(Handle::from_shared(&dyn_window));

        window.borrow_mut().push_input(InputEvent::Key {
            key: Key::Space,
            state: KeyState::Pressed,
            repeat: false,
        });

        // Not delivered before the window polls.
        input.tick();
        assert!(!input.state().key_down(Key::Space));

        window.borrow_mut().poll_events();
        input.tick();
        assert!(input.state().key_down(Key::Space));
        assert!(input.frame().keys_pressed.contains(&Key::Space));

        input.tick();
        assert!(input.state().key_down(Key::Space));
        assert!(input.frame().keys_pressed.is_empty());
    }

    #[test]
    fn missing_window_is_ignored() {
        let window: Shared<dyn WindowSystem> = share(HeadlessWindow::new(1, 1));
        let mut input = StateInput::new(Handle::from_shared(&window));
        drop(window);
        input.tick();
        assert!(input.state().keys_down.is_empty());
    }
}
