//! Subsystem registry.
//!
//! The registry is the single owner of every long-lived subsystem. It builds
//! them in [`SubsystemId::STARTUP_ORDER`], tears them down in exactly the
//! reverse order and is the only place where lifecycle state changes.
//! Everything else holds [`Handle`]s.

mod factory;
mod handle;
mod id;

pub use factory::{RenderDeps, SubsystemFactory, WorldDeps};
pub use handle::{Handle, Shared, share};
pub use id::{LifecycleState, SubsystemId};

use std::path::Path;
use std::rc::Rc;

use crate::config::ConfigManager;
use crate::error::{EngineError, Result};
use crate::logging::LogSystem;
use crate::meta::TypeRegistry;
use crate::swap::{LogicRenderData, LogicWriter, RenderReader, SwapBuffer};
use crate::systems::{
    AssetManager, FileSystem, InputSystem, PhysicsManager, RenderSystem, Subsystem, WindowSystem,
    WorldManager,
};

#[derive(Default)]
pub struct SubsystemRegistry {
    states: [LifecycleState; SubsystemId::COUNT],
    /// Running subsystems, in construction order.
    stack: Vec<SubsystemId>,
    constructed: Vec<SubsystemId>,
    destroyed: Vec<SubsystemId>,

    config: Option<Shared<ConfigManager>>,
    log: Option<Shared<LogSystem>>,
    file: Option<Shared<FileSystem>>,
    asset: Option<Shared<AssetManager>>,
    physics: Option<Shared<dyn PhysicsManager>>,
    world: Option<Shared<dyn WorldManager>>,
    window: Option<Shared<dyn WindowSystem>>,
    input: Option<Shared<dyn InputSystem>>,
    particles: Option<Shared<dyn Subsystem>>,
    render: Option<Shared<dyn RenderSystem>>,
    debug_draw: Option<Shared<dyn Subsystem>>,

    scene: Option<Shared<SwapBuffer<LogicRenderData>>>,
}

impl SubsystemRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds every subsystem in startup order.
    ///
    /// On failure, whatever was already built is torn down in reverse order
    /// before the error is returned; the registry never stays half-started.
    ///
    /// Precondition: nothing is running. Calling it again without an
    /// intervening [`shutdown_systems`](Self::shutdown_systems) returns
    /// [`EngineError::AlreadyStarted`] and leaves the subsystems untouched.
    /// After a shutdown or a failed start the registry can be started again.
    pub fn start_systems(
        &mut self,
        config_source: &Path,
        factory: &mut dyn SubsystemFactory,
        types: &TypeRegistry,
    ) -> Result<()> {
        if self.is_running() {
            log::warn!("start_systems called while running; ignoring");
            return Err(EngineError::AlreadyStarted);
        }

        // A restart records a fresh lifecycle.
        self.states = Default::default();
        self.constructed.clear();
        self.destroyed.clear();

        match self.start_all(config_source, factory, types) {
            Ok(()) => {
                log::info!("{} subsystems running", self.stack.len());
                Ok(())
            }
            Err(err) => {
                log::error!("startup aborted: {err:#}");
                self.shutdown_systems();
                Err(err)
            }
        }
    }

    fn start_all(
        &mut self,
        config_source: &Path,
        factory: &mut dyn SubsystemFactory,
        types: &TypeRegistry,
    ) -> Result<()> {
        let config = self.build(SubsystemId::Config, || {
            Ok(share(ConfigManager::load(config_source)?))
        })?;
        self.config = Some(config.clone());
        let config = Handle::from_shared(&config);

        let log = self.build(SubsystemId::Log, || Ok(share(LogSystem::start(&config)?)))?;
        self.log = Some(log);

        let file = self.build(SubsystemId::File, || Ok(share(FileSystem::new(&config)?)))?;
        self.file = Some(file.clone());
        let file = Handle::from_shared(&file);

        let asset = self.build(SubsystemId::Asset, || {
            Ok(share(AssetManager::new(&config, file)?))
        })?;
        self.asset = Some(asset.clone());
        let asset = Handle::from_shared(&asset);

        self.physics = self.build_optional(SubsystemId::Physics, || factory.physics(config.clone()))?;
        let physics = self.physics.as_ref().map(Handle::from_shared);

        let scene = share(SwapBuffer::<LogicRenderData>::new());
        self.scene = Some(scene.clone());

        let world = self.build(SubsystemId::World, || {
            factory.world(WorldDeps {
                config: config.clone(),
                assets: asset.clone(),
                physics,
                scene: LogicWriter::new(Handle::from_shared(&scene)),
                types,
            })
        })?;
        self.world = Some(world);

        let window = self.build(SubsystemId::Window, || factory.window(config.clone()))?;
        self.window = Some(window.clone());
        let window = Handle::from_shared(&window);

        let input = self.build(SubsystemId::Input, || factory.input(window.clone()))?;
        self.input = Some(input);

        self.particles =
            self.build_optional(SubsystemId::Particles, || factory.particles(asset.clone()))?;

        let render = self.build(SubsystemId::Render, || {
            factory.render(RenderDeps {
                config: config.clone(),
                window: window.clone(),
                assets: asset.clone(),
                scene: RenderReader::new(Handle::from_shared(&scene)),
            })
        })?;
        self.render = Some(render.clone());
        let render = Handle::from_shared(&render);

        self.debug_draw =
            self.build_optional(SubsystemId::DebugDraw, || factory.debug_draw(render))?;

        Ok(())
    }

    fn build<T: ?Sized>(
        &mut self,
        id: SubsystemId,
        ctor: impl FnOnce() -> anyhow::Result<Shared<T>>,
    ) -> Result<Shared<T>> {
        self.assert_dependencies_running(id);
        log::debug!("starting {id}");

        let instance = ctor().map_err(|source| EngineError::startup(id, source))?;
        self.mark_running(id);
        Ok(instance)
    }

    fn build_optional<T: ?Sized>(
        &mut self,
        id: SubsystemId,
        ctor: impl FnOnce() -> anyhow::Result<Option<Shared<T>>>,
    ) -> Result<Option<Shared<T>>> {
        debug_assert!(id.is_optional());
        self.assert_dependencies_running(id);

        let instance = ctor().map_err(|source| EngineError::startup(id, source))?;
        match instance {
            Some(_) => {
                log::debug!("starting {id}");
                self.mark_running(id);
            }
            None => log::debug!("{id} not provided; skipping"),
        }
        Ok(instance)
    }

    fn assert_dependencies_running(&self, id: SubsystemId) {
        for dep in id.dependencies() {
            assert_eq!(
                self.state(*dep),
                LifecycleState::Running,
                "{id} constructed before its dependency {dep}"
            );
        }
    }

    fn mark_running(&mut self, id: SubsystemId) {
        self.states[id.index()] = LifecycleState::Running;
        self.stack.push(id);
        self.constructed.push(id);
    }

    /// Destroys running subsystems in reverse construction order.
    ///
    /// No-op when nothing is running: before `start_systems`, after a
    /// previous shutdown, or after a startup that failed on its first step.
    pub fn shutdown_systems(&mut self) {
        if self.stack.is_empty() {
            self.scene = None;
            return;
        }

        log::info!("shutting down {} subsystems", self.stack.len());

        while let Some(id) = self.stack.pop() {
            log::debug!("stopping {id}");
            match id {
                SubsystemId::Config => teardown(&mut self.config),
                SubsystemId::Log => teardown(&mut self.log),
                SubsystemId::File => teardown(&mut self.file),
                SubsystemId::Asset => teardown(&mut self.asset),
                SubsystemId::Physics => teardown(&mut self.physics),
                SubsystemId::World => teardown(&mut self.world),
                SubsystemId::Window => teardown(&mut self.window),
                SubsystemId::Input => teardown(&mut self.input),
                SubsystemId::Particles => teardown(&mut self.particles),
                SubsystemId::Render => teardown(&mut self.render),
                SubsystemId::DebugDraw => teardown(&mut self.debug_draw),
            }
            self.states[id.index()] = LifecycleState::ShutDown;
            self.destroyed.push(id);
        }

        self.scene = None;
    }

    pub fn state(&self, id: SubsystemId) -> LifecycleState {
        self.states[id.index()]
    }

    /// Whether any subsystem is currently running.
    pub fn is_running(&self) -> bool {
        !self.stack.is_empty()
    }

    /// Subsystems in the order they were built by the latest start.
    pub fn construction_order(&self) -> &[SubsystemId] {
        &self.constructed
    }

    /// Subsystems in the order they were destroyed since the latest start.
    pub fn shutdown_order(&self) -> &[SubsystemId] {
        &self.destroyed
    }

    pub fn config(&self) -> Option<Handle<ConfigManager>> {
        self.config.as_ref().map(Handle::from_shared)
    }

    pub fn file_system(&self) -> Option<Handle<FileSystem>> {
        self.file.as_ref().map(Handle::from_shared)
    }

    pub fn assets(&self) -> Option<Handle<AssetManager>> {
        self.asset.as_ref().map(Handle::from_shared)
    }

    pub fn physics(&self) -> Option<Handle<dyn PhysicsManager>> {
        self.physics.as_ref().map(Handle::from_shared)
    }

    pub fn world(&self) -> Option<Handle<dyn WorldManager>> {
        self.world.as_ref().map(Handle::from_shared)
    }

    pub fn window(&self) -> Option<Handle<dyn WindowSystem>> {
        self.window.as_ref().map(Handle::from_shared)
    }

    pub fn input(&self) -> Option<Handle<dyn InputSystem>> {
        self.input.as_ref().map(Handle::from_shared)
    }

    pub fn particles(&self) -> Option<Handle<dyn Subsystem>> {
        self.particles.as_ref().map(Handle::from_shared)
    }

    pub fn render(&self) -> Option<Handle<dyn RenderSystem>> {
        self.render.as_ref().map(Handle::from_shared)
    }

    pub fn debug_draw(&self) -> Option<Handle<dyn Subsystem>> {
        self.debug_draw.as_ref().map(Handle::from_shared)
    }

    /// Number of logic → render swaps performed so far. Zero when not started.
    pub fn swap_generation(&self) -> u64 {
        self.scene
            .as_ref()
            .map_or(0, |scene| scene.borrow().generation())
    }
}

impl Drop for SubsystemRegistry {
    fn drop(&mut self) {
        self.shutdown_systems();
    }
}

fn teardown<T: Subsystem + ?Sized>(slot: &mut Option<Shared<T>>) {
    let Some(instance) = slot.take() else {
        return;
    };

    match instance.try_borrow_mut() {
        Ok(mut subsystem) => subsystem.shutdown(),
        Err(_) => log::warn!("subsystem borrowed during shutdown; skipping shutdown hook"),
    }

    if Rc::strong_count(&instance) > 1 {
        if let Ok(subsystem) = instance.try_borrow() {
            log::warn!("{} is still referenced elsewhere after shutdown", subsystem.name());
        }
    }
}
