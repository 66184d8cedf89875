//! Recording subsystems shared by unit tests.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Result, bail};

use crate::config::ConfigManager;
use crate::registry::{
    Handle, RenderDeps, Shared, SubsystemFactory, SubsystemId, WorldDeps, share,
};
use crate::systems::{
    AssetManager, InputSystem, PhysicsManager, RenderSystem, Subsystem, TickScope, WindowSystem,
    WorldManager,
};

pub(crate) type Journal = Rc<RefCell<Vec<String>>>;

pub(crate) struct TestConfig {
    pub dir: tempfile::TempDir,
    pub path: PathBuf,
}

/// Writes `kestrel.toml` with `body` into a fresh temporary directory.
pub(crate) fn write_config(body: &str) -> TestConfig {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kestrel.toml");
    std::fs::write(&path, body).unwrap();
    TestConfig { dir, path }
}

struct Recorder {
    journal: Journal,
    name: &'static str,
}

impl Recorder {
    fn log(&self, entry: impl Into<String>) {
        self.journal.borrow_mut().push(entry.into());
    }
}

impl Subsystem for Recorder {
    fn name(&self) -> &'static str {
        self.name
    }

    fn shutdown(&mut self) {
        self.log(format!("shutdown:{}", self.name));
    }
}

macro_rules! recording_subsystem {
    ($ty:ident) => {
        struct $ty(Recorder);

        impl Subsystem for $ty {
            fn name(&self) -> &'static str {
                self.0.name()
            }

            fn shutdown(&mut self) {
                self.0.shutdown();
            }
        }
    };
}

recording_subsystem!(RecWorld);
recording_subsystem!(RecInput);
recording_subsystem!(RecRender);
recording_subsystem!(RecPhysics);

impl WorldManager for RecWorld {
    fn tick(&mut self, _dt: f32, scope: &TickScope) {
        let mode = if scope.is_editor() { "editor" } else { "game" };
        self.0.log(format!("world.tick:{mode}"));
    }
}

impl InputSystem for RecInput {
    fn tick(&mut self) {
        self.0.log("input.tick");
    }
}

impl RenderSystem for RecRender {
    fn tick(&mut self, _dt: f32) {
        self.0.log("render.tick");
    }

    fn swap_logic_render_data(&mut self) {
        self.0.log("render.swap");
    }
}

struct RecPhysicsDebug {
    inner: RecPhysics,
    debug: bool,
}

impl Subsystem for RecPhysicsDebug {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn shutdown(&mut self) {
        self.inner.shutdown();
    }
}

impl PhysicsManager for RecPhysicsDebug {
    fn render_physics_world(&mut self, _dt: f32) {
        self.inner.0.log("physics.debug");
    }

    fn debug_render_enabled(&self) -> bool {
        self.debug
    }
}

struct RecWindow {
    rec: Recorder,
    close_after: Option<u64>,
    polls: u64,
}

impl Subsystem for RecWindow {
    fn name(&self) -> &'static str {
        self.rec.name()
    }

    fn shutdown(&mut self) {
        self.rec.shutdown();
    }
}

impl WindowSystem for RecWindow {
    fn should_close(&self) -> bool {
        self.rec.log("window.should_close");
        self.close_after.is_some_and(|n| self.polls >= n)
    }

    fn poll_events(&mut self) {
        self.polls += 1;
        self.rec.log("window.poll");
    }

    fn set_title(&mut self, title: &str) {
        self.rec.log(format!("window.title:{title}"));
    }

    fn size(&self) -> (u32, u32) {
        (1, 1)
    }
}

/// Factory whose subsystems append their calls to a shared journal.
#[derive(Default)]
pub(crate) struct RecordingFactory {
    pub journal: Journal,
    pub fail_at: Option<SubsystemId>,
    /// `Some(debug_enabled)` provides a physics collaborator.
    pub physics: Option<bool>,
    pub particles: bool,
    pub debug_draw: bool,
    pub close_after: Option<u64>,
}

impl RecordingFactory {
    pub fn with_physics(mut self, debug_enabled: bool) -> Self {
        self.physics = Some(debug_enabled);
        self
    }

    pub fn with_optional_extras(mut self) -> Self {
        self.particles = true;
        self.debug_draw = true;
        self
    }

    pub fn failing_at(mut self, id: SubsystemId) -> Self {
        self.fail_at = Some(id);
        self
    }

    pub fn close_after(mut self, polls: u64) -> Self {
        self.close_after = Some(polls);
        self
    }

    fn recorder(&self, id: SubsystemId) -> Result<Recorder> {
        self.journal.borrow_mut().push(format!("start:{id}"));
        if self.fail_at == Some(id) {
            bail!("{id} refused to start");
        }
        Ok(Recorder {
            journal: self.journal.clone(),
            name: id.name(),
        })
    }
}

impl SubsystemFactory for RecordingFactory {
    fn physics(
        &mut self,
        _config: Handle<ConfigManager>,
    ) -> Result<Option<Shared<dyn PhysicsManager>>> {
        let Some(debug) = self.physics else {
            return Ok(None);
        };
        let inner = RecPhysics(self.recorder(SubsystemId::Physics)?);
        Ok(Some(share(RecPhysicsDebug { inner, debug })))
    }

    fn world(&mut self, _deps: WorldDeps<'_>) -> Result<Shared<dyn WorldManager>> {
        Ok(share(RecWorld(self.recorder(SubsystemId::World)?)))
    }

    fn window(&mut self, _config: Handle<ConfigManager>) -> Result<Shared<dyn WindowSystem>> {
        Ok(share(RecWindow {
            rec: self.recorder(SubsystemId::Window)?,
            close_after: self.close_after,
            polls: 0,
        }))
    }

    fn input(&mut self, _window: Handle<dyn WindowSystem>) -> Result<Shared<dyn InputSystem>> {
        Ok(share(RecInput(self.recorder(SubsystemId::Input)?)))
    }

    fn particles(&mut self, _assets: Handle<AssetManager>) -> Result<Option<Shared<dyn Subsystem>>> {
        if !self.particles {
            return Ok(None);
        }
        Ok(Some(share(self.recorder(SubsystemId::Particles)?)))
    }

    fn render(&mut self, _deps: RenderDeps) -> Result<Shared<dyn RenderSystem>> {
        Ok(share(RecRender(self.recorder(SubsystemId::Render)?)))
    }

    fn debug_draw(
        &mut self,
        _render: Handle<dyn RenderSystem>,
    ) -> Result<Option<Shared<dyn Subsystem>>> {
        if !self.debug_draw {
            return Ok(None);
        }
        Ok(Some(share(self.recorder(SubsystemId::DebugDraw)?)))
    }
}
