use std::path::Path;

use crate::error::{EngineError, Result};
use crate::meta::TypeRegistry;
use crate::registry::{SubsystemFactory, SubsystemRegistry};
use crate::systems::TickScope;

use super::frame_loop::FrameLoop;

/// Top-level engine object owned by the binary or an embedding editor.
pub struct Engine {
    registry: SubsystemRegistry,
    types: TypeRegistry,
    frame_loop: FrameLoop,
}

impl Engine {
    pub fn new() -> Self {
        Self {
            registry: SubsystemRegistry::new(),
            types: TypeRegistry::new(),
            frame_loop: FrameLoop::default(),
        }
    }

    /// Registers component metadata, then starts every subsystem.
    ///
    /// On failure the metadata is unregistered again and nothing keeps
    /// running.
    pub fn start(
        &mut self,
        config_source: impl AsRef<Path>,
        factory: &mut dyn SubsystemFactory,
    ) -> Result<()> {
        if self.registry.is_running() {
            return Err(EngineError::AlreadyStarted);
        }

        self.types.register_builtin();

        if let Err(err) = self
            .registry
            .start_systems(config_source.as_ref(), factory, &self.types)
        {
            self.types.unregister_all();
            return Err(err);
        }

        if let Some((title, physics_debug)) = self.registry.config().and_then(|c| {
            c.with(|c| (c.config().window.title.clone(), c.config().physics.debug_render))
        }) {
            self.frame_loop.set_title(title);
            self.frame_loop.set_physics_debug(physics_debug);
        }

        log::info!("engine start");
        Ok(())
    }

    /// Ticks only the component types listed under `[editor]` in the config.
    pub fn enter_editor_mode(&mut self) {
        let allowed = self
            .registry
            .config()
            .and_then(|c| c.with(|c| c.config().editor.tick_component_types.clone()))
            .unwrap_or_default();

        log::info!("editor mode: ticking {allowed:?}");
        self.frame_loop.set_tick_scope(TickScope::editor(allowed));
    }

    /// Stops every subsystem in reverse order, then drops component metadata.
    pub fn shutdown(&mut self) {
        log::info!("engine shutdown");
        self.registry.shutdown_systems();
        self.types.unregister_all();
    }

    /// Blocks until the window asks to close.
    ///
    /// # Panics
    /// When the engine was not started (there is no window).
    pub fn run(&mut self) {
        self.frame_loop.run(&self.registry);
    }

    /// Ticks a single frame for externally driven loops.
    pub fn tick_one_frame(&mut self, dt: f32) -> bool {
        self.frame_loop.tick_one_frame(&self.registry, dt)
    }

    pub fn fps(&self) -> u32 {
        self.frame_loop.fps()
    }

    pub fn registry(&self) -> &SubsystemRegistry {
        &self.registry
    }

    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    pub fn frame_loop(&self) -> &FrameLoop {
        &self.frame_loop
    }

    pub fn frame_loop_mut(&mut self) -> &mut FrameLoop {
        &mut self.frame_loop
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::SubsystemId;
    use crate::testing::{RecordingFactory, write_config};

    #[test]
    fn start_registers_types_and_sets_title() {
        let cfg = write_config("[window]\ntitle = \"Sandbox\"\n");
        let mut engine = Engine::new();
        engine.start(&cfg.path, &mut RecordingFactory::default()).unwrap();

        assert!(engine.types().contains("spin"));
        assert_eq!(engine.frame_loop().title(), "Sandbox");
        assert!(engine.registry().is_running());

        engine.shutdown();
        assert!(engine.types().is_empty());
        assert!(!engine.registry().is_running());
    }

    #[test]
    fn failed_start_leaves_no_metadata() {
        let cfg = write_config("");
        let mut engine = Engine::new();
        let mut factory = RecordingFactory::default().failing_at(SubsystemId::Render);

        assert!(engine.start(&cfg.path, &mut factory).is_err());
        assert!(engine.types().is_empty());
        assert!(!engine.registry().is_running());
    }

    #[test]
    fn second_start_keeps_metadata() {
        let cfg = write_config("");
        let mut engine = Engine::new();
        engine.start(&cfg.path, &mut RecordingFactory::default()).unwrap();

        let err = engine
            .start(&cfg.path, &mut RecordingFactory::default())
            .unwrap_err();
        assert!(matches!(err, EngineError::AlreadyStarted));
        assert!(engine.types().contains("oscillate"));
    }

    #[test]
    fn restarts_after_shutdown() {
        let cfg = write_config("[window]\ntitle = \"Again\"\n");
        let mut engine = Engine::new();
        engine.start(&cfg.path, &mut RecordingFactory::default()).unwrap();
        engine.shutdown();

        engine.start(&cfg.path, &mut RecordingFactory::default()).unwrap();
        assert!(engine.registry().is_running());
        assert!(engine.types().contains("spin"));
        assert_eq!(engine.frame_loop().title(), "Again");
    }

    #[test]
    fn retries_after_missing_config() {
        let cfg = write_config("");
        let mut engine = Engine::new();

        let missing = cfg.dir.path().join("absent.toml");
        let err = engine
            .start(&missing, &mut RecordingFactory::default())
            .unwrap_err();
        assert!(matches!(err, EngineError::Startup { system: SubsystemId::Config, .. }));

        engine.start(&cfg.path, &mut RecordingFactory::default()).unwrap();
        assert!(engine.registry().is_running());
    }

    fn physics_debug_frames(config: &str) -> usize {
        let cfg = write_config(config);
        let mut factory = RecordingFactory::default().with_physics(true);
        let journal = factory.journal.clone();

        let mut engine = Engine::new();
        engine.start(&cfg.path, &mut factory).unwrap();
        engine.tick_one_frame(0.016);
        engine.tick_one_frame(0.016);

        journal.borrow().iter().filter(|e| *e == "physics.debug").count()
    }

    #[test]
    fn physics_debug_follows_config() {
        assert_eq!(physics_debug_frames("[physics]\ndebug_render = true\n"), 2);
        assert_eq!(physics_debug_frames("[physics]\ndebug_render = false\n"), 0);
        assert_eq!(physics_debug_frames(""), 0);
    }

    #[test]
    fn editor_mode_uses_configured_types() {
        let cfg = write_config("[editor]\ntick_component_types = [\"spin\"]\n");
        let mut engine = Engine::new();
        engine.start(&cfg.path, &mut RecordingFactory::default()).unwrap();

        engine.enter_editor_mode();
        let scope = engine.frame_loop().tick_scope();
        assert!(scope.allows("spin"));
        assert!(!scope.allows("oscillate"));
    }

    #[test]
    fn external_driver_ticks_frames() {
        let cfg = write_config("");
        let mut engine = Engine::new();
        engine
            .start(&cfg.path, &mut RecordingFactory::default().close_after(2))
            .unwrap();

        assert!(engine.tick_one_frame(0.02));
        assert!(!engine.tick_one_frame(0.02));
        assert!((49..=50).contains(&engine.fps()));
    }
}
