use crate::registry::SubsystemRegistry;
use crate::systems::TickScope;
use crate::time::{DeltaClock, FpsEstimator};

use super::hooks::{FrameHooks, FrameInfo};

/// Loop state; `Stopped` until `run` starts and again once the window closes.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum LoopState {
    Running,
    #[default]
    Stopped,
}

/// Drives one tick per iteration over the registry's subsystems.
///
/// Within a frame the order is fixed: logic tick, one hand-off swap, render
/// tick, then physics debug drawing, event polling, title update and the
/// close check. `tick_one_frame` is public so an embedding editor can own
/// the loop; it must then be called once per logical frame.
pub struct FrameLoop {
    clock: DeltaClock,
    fps: FpsEstimator,
    state: LoopState,
    hooks: Vec<Box<dyn FrameHooks>>,
    tick_scope: TickScope,
    title: String,
    frame_index: u64,
    physics_debug: bool,
}

impl FrameLoop {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            clock: DeltaClock::new(),
            fps: FpsEstimator::new(),
            state: LoopState::Stopped,
            hooks: Vec::new(),
            tick_scope: TickScope::Game,
            title: title.into(),
            frame_index: 0,
            physics_debug: false,
        }
    }

    /// Ticks frames until the window asks to close.
    ///
    /// # Panics
    /// When the registry has no window subsystem.
    pub fn run(&mut self, registry: &SubsystemRegistry) {
        assert!(
            registry.window().is_some(),
            "FrameLoop::run requires a window subsystem"
        );

        let already_closed = registry
            .window()
            .and_then(|w| w.with(|w| w.should_close()))
            .unwrap_or(true);
        if already_closed {
            log::info!("window closed before the first frame");
            self.state = LoopState::Stopped;
            return;
        }

        log::info!("frame loop running");
        self.state = LoopState::Running;
        self.clock.reset();

        while self.state == LoopState::Running {
            let dt = self.clock.sample();
            self.tick_one_frame(registry, dt);
        }

        log::info!("frame loop stopped after {} frames", self.frame_index);
    }

    /// Ticks exactly one frame with `dt` seconds. Returns `false` once the
    /// window asked to close (or is gone).
    pub fn tick_one_frame(&mut self, registry: &SubsystemRegistry, dt: f32) -> bool {
        let info = FrameInfo {
            dt,
            fps: self.fps.fps(),
            frame_index: self.frame_index,
        };
        for hook in &mut self.hooks {
            hook.before_logic(&info, registry);
        }

        if let Some(world) = registry.world() {
            world.with_mut(|w| w.tick(dt, &self.tick_scope));
        }
        if let Some(input) = registry.input() {
            input.with_mut(|i| i.tick());
        }

        self.fps.update(dt);

        if let Some(render) = registry.render() {
            render.with_mut(|r| {
                r.swap_logic_render_data();
                r.tick(dt);
            });
        }

        let info = FrameInfo {
            fps: self.fps.fps(),
            ..info
        };
        for hook in &mut self.hooks {
            hook.after_render(&info, registry);
        }

        if let Some(physics) = registry.physics().filter(|_| self.physics_debug) {
            physics.with_mut(|p| {
                if p.debug_render_enabled() {
                    p.render_physics_world(dt);
                }
            });
        }

        let title = format!("{} - {} FPS", self.title, self.fps.fps());
        let close = registry
            .window()
            .and_then(|window| {
                window.with_mut(|w| {
                    w.poll_events();
                    w.set_title(&title);
                    w.should_close()
                })
            })
            .unwrap_or(true);

        self.frame_index += 1;
        log::trace!("frame {} dt={dt:.4}s fps={}", self.frame_index, self.fps.fps());

        if close {
            self.state = LoopState::Stopped;
        }
        !close
    }

    /// Smoothed frames per second.
    pub fn fps(&self) -> u32 {
        self.fps.fps()
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Number of frames ticked so far.
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    pub fn tick_scope(&self) -> &TickScope {
        &self.tick_scope
    }

    pub fn set_tick_scope(&mut self, scope: TickScope) {
        self.tick_scope = scope;
    }

    /// Hooks run in registration order.
    pub fn add_hook(&mut self, hook: impl FrameHooks + 'static) {
        self.hooks.push(Box::new(hook));
    }

    /// Whether physics debug drawing is requested (`[physics] debug_render`).
    /// The physics collaborator must also report it as enabled.
    pub fn physics_debug(&self) -> bool {
        self.physics_debug
    }

    pub fn set_physics_debug(&mut self, enabled: bool) {
        self.physics_debug = enabled;
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Base window title; the FPS suffix is appended every frame.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new("Kestrel")
    }
}
