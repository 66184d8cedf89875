use anyhow::Result;

use crate::config::ConfigManager;
use crate::meta::TypeRegistry;
use crate::swap::{LogicWriter, RenderReader};
use crate::systems::{
    AssetManager, InputSystem, PhysicsManager, RenderSystem, Subsystem, WindowSystem,
    WorldManager,
};

use super::{Handle, Shared};

/// Handles given to the world constructor.
pub struct WorldDeps<'a> {
    pub config: Handle<ConfigManager>,
    pub assets: Handle<AssetManager>,
    /// Present only when the factory provided a physics collaborator.
    pub physics: Option<Handle<dyn PhysicsManager>>,
    /// Producer end of the logic → render hand-off.
    pub scene: LogicWriter,
    pub types: &'a TypeRegistry,
}

/// Handles given to the render constructor.
pub struct RenderDeps {
    pub config: Handle<ConfigManager>,
    pub window: Handle<dyn WindowSystem>,
    pub assets: Handle<AssetManager>,
    /// Consumer end of the logic → render hand-off.
    pub scene: RenderReader,
}

/// Constructors for the pluggable subsystems.
///
/// Config, log, file and asset subsystems are built by the registry itself;
/// everything the frame loop talks to comes from here. Each method receives
/// only the subsystems it depends on, all of them already running.
///
/// Optional collaborators default to absent.
pub trait SubsystemFactory {
    fn physics(&mut self, config: Handle<ConfigManager>) -> Result<Option<Shared<dyn PhysicsManager>>> {
        let _ = config;
        Ok(None)
    }

    fn world(&mut self, deps: WorldDeps<'_>) -> Result<Shared<dyn WorldManager>>;

    fn window(&mut self, config: Handle<ConfigManager>) -> Result<Shared<dyn WindowSystem>>;

    fn input(&mut self, window: Handle<dyn WindowSystem>) -> Result<Shared<dyn InputSystem>>;

    fn particles(&mut self, assets: Handle<AssetManager>) -> Result<Option<Shared<dyn Subsystem>>> {
        let _ = assets;
        Ok(None)
    }

    fn render(&mut self, deps: RenderDeps) -> Result<Shared<dyn RenderSystem>>;

    fn debug_draw(&mut self, render: Handle<dyn RenderSystem>) -> Result<Option<Shared<dyn Subsystem>>> {
        let _ = render;
        Ok(None)
    }
}
