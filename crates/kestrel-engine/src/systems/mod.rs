//! Subsystem contracts and the default implementations.
//!
//! The frame loop only talks to subsystems through the traits below. The
//! registry owns the instances; everything else reaches them through
//! [`Handle`](crate::registry::Handle)s.

mod asset;
mod factory;
mod file;
mod headless_window;
mod input;
mod render;
mod tick_scope;
pub mod world;

pub use asset::AssetManager;
pub use factory::DefaultFactory;
pub use file::FileSystem;
pub use headless_window::HeadlessWindow;
pub use input::StateInput;
pub use render::HeadlessRenderer;
pub use tick_scope::TickScope;
pub use world::SceneWorld;

pub use crate::config::ConfigManager;
pub use crate::logging::LogSystem;

use crate::input::InputEvent;

/// Lifecycle surface shared by every subsystem.
pub trait Subsystem {
    /// Short stable name used in logs.
    fn name(&self) -> &'static str;

    /// Called by the registry right before the instance is dropped.
    ///
    /// Every subsystem this one depends on is still alive at this point.
    fn shutdown(&mut self) {}
}

/// Window backend contract.
pub trait WindowSystem: Subsystem {
    /// Whether the user (or the platform) asked to close the window.
    fn should_close(&self) -> bool;

    /// Pumps pending platform events. Must return promptly.
    fn poll_events(&mut self);

    fn set_title(&mut self, title: &str);

    /// Drawable size in physical pixels.
    fn size(&self) -> (u32, u32);

    /// Hands over the input events collected by the last `poll_events`.
    fn take_input_events(&mut self) -> Vec<InputEvent> {
        Vec::new()
    }
}

/// Render backend contract.
pub trait RenderSystem: Subsystem {
    /// Renders one frame from the data published by the last swap.
    fn tick(&mut self, dt: f32);

    /// Publishes the logic side of the hand-off buffer to the render side.
    ///
    /// Called exactly once per frame, between the logic tick and `tick`.
    fn swap_logic_render_data(&mut self);
}

/// World/logic contract.
pub trait WorldManager: Subsystem {
    /// Advances the active world. Only components allowed by `scope` tick.
    fn tick(&mut self, dt: f32, scope: &TickScope);
}

/// Input contract.
pub trait InputSystem: Subsystem {
    /// Consumes events gathered since the previous tick.
    fn tick(&mut self);
}

/// Optional physics collaborator, used by the loop only for debug drawing.
pub trait PhysicsManager: Subsystem {
    fn render_physics_world(&mut self, dt: f32);

    fn debug_render_enabled(&self) -> bool {
        true
    }
}
