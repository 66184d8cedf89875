use std::time::Duration;

use anyhow::{Context, Result, anyhow};

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowId};

use crate::config::WindowSection;
use crate::input::{InputEvent, Key, KeyState, MouseButton};
use crate::systems::{Subsystem, WindowSystem};

/// Pixel-precise wheel deltas are converted to lines with this ratio.
const PIXELS_PER_LINE: f32 = 20.0;

/// Pumps used to wait for the platform to hand us a window.
const OPEN_ATTEMPTS: usize = 16;

/// `WindowSystem` backed by a `winit` window.
pub struct WinitWindow {
    event_loop: EventLoop<()>,
    handler: Handler,
}

struct Handler {
    title: String,
    initial_size: LogicalSize<f64>,

    window: Option<Window>,
    create_error: Option<String>,
    close_requested: bool,
    events: Vec<InputEvent>,
}

impl WinitWindow {
    /// Creates the event loop and waits for the window to exist.
    pub fn open(config: &WindowSection) -> Result<Self> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;

        let mut this = Self {
            event_loop,
            handler: Handler {
                title: config.title.clone(),
                initial_size: LogicalSize::new(config.width as f64, config.height as f64),
                window: None,
                create_error: None,
                close_requested: false,
                events: Vec::new(),
            },
        };

        // Windows may only be created once the platform resumes the app.
        for _ in 0..OPEN_ATTEMPTS {
            this.pump(Some(Duration::from_millis(10)));
            if this.handler.window.is_some() {
                break;
            }
            if let Some(err) = this.handler.create_error.take() {
                return Err(anyhow!("failed to create window: {err}"));
            }
        }

        let window = this
            .handler
            .window
            .as_ref()
            .ok_or_else(|| anyhow!("platform never resumed the application"))?;
        log::info!("window opened ({:?})", window.inner_size());

        Ok(this)
    }

    fn pump(&mut self, timeout: Option<Duration>) {
        if let PumpStatus::Exit(code) = self.event_loop.pump_app_events(timeout, &mut self.handler) {
            log::debug!("winit event loop exited with code {code}");
            self.handler.close_requested = true;
        }
    }
}

impl Subsystem for WinitWindow {
    fn name(&self) -> &'static str {
        "window"
    }

    fn shutdown(&mut self) {
        self.handler.window = None;
    }
}

impl WindowSystem for WinitWindow {
    fn should_close(&self) -> bool {
        self.handler.close_requested
    }

    fn poll_events(&mut self) {
        self.pump(Some(Duration::ZERO));
    }

    fn set_title(&mut self, title: &str) {
        if self.handler.title == title {
            return;
        }
        self.handler.title.clear();
        self.handler.title.push_str(title);

        if let Some(window) = &self.handler.window {
            window.set_title(title);
        }
    }

    fn size(&self) -> (u32, u32) {
        self.handler
            .window
            .as_ref()
            .map(|w| {
                let size = w.inner_size();
                (size.width, size.height)
            })
            .unwrap_or((0, 0))
    }

    fn take_input_events(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.handler.events)
    }
}

impl ApplicationHandler for Handler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(self.initial_size);

        match event_loop.create_window(attrs) {
            Ok(window) => self.window = Some(window),
            Err(e) => self.create_error = Some(e.to_string()),
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let WindowEvent::CloseRequested = event {
            self.close_requested = true;
            return;
        }

        if let Some(window) = &self.window {
            if let Some(ev) = translate(window, &event) {
                self.events.push(ev);
            }
        }
    }
}

fn translate(window: &Window, event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::Focused(f) => Some(InputEvent::Focused(*f)),

        WindowEvent::CursorLeft { .. } => Some(InputEvent::PointerLeft),

        WindowEvent::CursorMoved { position, .. } => {
            let (x, y) = to_logical(window, *position);
            Some(InputEvent::PointerMoved { x, y })
        }

        WindowEvent::MouseInput { state, button, .. } => Some(InputEvent::PointerButton {
            button: map_mouse_button(*button),
            state: map_state(*state),
        }),

        WindowEvent::MouseWheel { delta, .. } => {
            let (x, y) = match delta {
                MouseScrollDelta::LineDelta(x, y) => (*x, *y),
                MouseScrollDelta::PixelDelta(p) => {
                    let (x, y) = to_logical(window, *p);
                    (x / PIXELS_PER_LINE, y / PIXELS_PER_LINE)
                }
            };
            Some(InputEvent::Wheel { x, y })
        }

        WindowEvent::KeyboardInput { event, .. } => Some(InputEvent::Key {
            key: map_key(event.physical_key),
            state: map_state(event.state),
            repeat: event.repeat,
        }),

        _ => None,
    }
}

fn to_logical(window: &Window, pos: PhysicalPosition<f64>) -> (f32, f32) {
    let logical = pos.to_logical::<f64>(window.scale_factor());
    (logical.x as f32, logical.y as f32)
}

fn map_state(state: ElementState) -> KeyState {
    match state {
        ElementState::Pressed => KeyState::Pressed,
        ElementState::Released => KeyState::Released,
    }
}

fn map_mouse_button(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Other(3),
        WinitMouseButton::Forward => MouseButton::Other(4),
        WinitMouseButton::Other(v) => MouseButton::Other(v),
    }
}

fn map_key(pk: PhysicalKey) -> Key {
    let PhysicalKey::Code(code) = pk else {
        return Key::Unknown(0);
    };

    match code {
        KeyCode::Escape => Key::Escape,
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::Space => Key::Space,
        KeyCode::Backspace => Key::Backspace,

        KeyCode::ArrowUp => Key::ArrowUp,
        KeyCode::ArrowDown => Key::ArrowDown,
        KeyCode::ArrowLeft => Key::ArrowLeft,
        KeyCode::ArrowRight => Key::ArrowRight,

        KeyCode::ShiftLeft | KeyCode::ShiftRight => Key::Shift,
        KeyCode::ControlLeft | KeyCode::ControlRight => Key::Control,
        KeyCode::AltLeft | KeyCode::AltRight => Key::Alt,

        KeyCode::KeyW => Key::W,
        KeyCode::KeyA => Key::A,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyD => Key::D,
        KeyCode::KeyQ => Key::Q,
        KeyCode::KeyE => Key::E,

        KeyCode::F1 => Key::F1,
        KeyCode::F2 => Key::F2,
        KeyCode::F3 => Key::F3,
        KeyCode::F4 => Key::F4,

        other => {
            log::trace!("unmapped key {other:?}");
            Key::Unknown(0)
        }
    }
}
