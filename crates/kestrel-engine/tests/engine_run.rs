use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;

use kestrel_engine::config::ConfigManager;
use kestrel_engine::registry::{Handle, RenderDeps, Shared, SubsystemId, WorldDeps, share};
use kestrel_engine::systems::{
    HeadlessRenderer, HeadlessWindow, InputSystem, RenderSystem, SceneWorld, StateInput,
    WindowSystem, WorldManager,
};
use kestrel_engine::{Engine, EngineError, SubsystemFactory};

const WORLD: &str = r#"
name = "harness"

[[objects]]
name = "top"
mesh = "cube"

[[objects.components]]
type = "spin"
speed = 2.0
"#;

/// Default subsystems, with handles kept so the test can inspect them.
struct Harness {
    close_after: u64,
    world: Option<Handle<SceneWorld>>,
    window: Option<Handle<HeadlessWindow>>,
    renderer: Option<Handle<HeadlessRenderer>>,
}

impl Harness {
    fn new(close_after: u64) -> Self {
        Self {
            close_after,
            world: None,
            window: None,
            renderer: None,
        }
    }
}

impl SubsystemFactory for Harness {
    fn world(&mut self, deps: WorldDeps<'_>) -> Result<Shared<dyn WorldManager>> {
        let world = share(SceneWorld::new(deps)?);
        self.world = Some(Handle::from_shared(&world));
        Ok(world)
    }

    fn window(&mut self, _config: Handle<ConfigManager>) -> Result<Shared<dyn WindowSystem>> {
        let window = share(HeadlessWindow::new(640, 360).close_after(self.close_after));
        self.window = Some(Handle::from_shared(&window));
        Ok(window)
    }

    fn input(&mut self, window: Handle<dyn WindowSystem>) -> Result<Shared<dyn InputSystem>> {
        Ok(share(StateInput::new(window)))
    }

    fn render(&mut self, deps: RenderDeps) -> Result<Shared<dyn RenderSystem>> {
        let renderer = share(HeadlessRenderer::new(deps));
        self.renderer = Some(Handle::from_shared(&renderer));
        Ok(renderer)
    }
}

fn project(dir: &Path, extra: &str) -> PathBuf {
    fs::create_dir_all(dir.join("assets/worlds")).unwrap();
    fs::write(dir.join("assets/worlds/harness.toml"), WORLD).unwrap();

    let config = dir.join("kestrel.toml");
    fs::write(
        &config,
        format!(
            "[engine]\ndefault_world = \"worlds/harness.toml\"\n\n[window]\ntitle = \"Harness\"\n\n{extra}"
        ),
    )
    .unwrap();
    config
}

#[test]
fn run_stops_when_the_window_closes() {
    let dir = tempfile::tempdir().unwrap();
    let config = project(dir.path(), "");

    let mut harness = Harness::new(5);
    let mut engine = Engine::new();
    engine.start(&config, &mut harness).unwrap();
    engine.run();

    assert_eq!(engine.frame_loop().frame_index(), 5);
    assert_eq!(engine.registry().swap_generation(), 5);
    assert!(engine.fps() > 0);

    let world = harness.world.clone().unwrap();
    let renderer = harness.renderer.clone().unwrap();

    let id = world.with(|w| w.find("top")).flatten().unwrap();
    let logic_yaw = world.with(|w| w.transform(id)).flatten().unwrap().yaw;
    let render_yaw = renderer
        .with(|r| r.object(id).map(|o| o.transform.yaw))
        .flatten()
        .unwrap();

    assert!(logic_yaw > 0.0);
    assert_eq!(logic_yaw, render_yaw);
    assert_eq!(renderer.with(|r| r.frames_rendered()), Some(5));
    assert_eq!(renderer.with(|r| r.last_logic_frame()), Some(5));
    assert_eq!(renderer.with(|r| r.viewport()), Some((640, 360)));

    engine.shutdown();
    assert!(!renderer.is_alive());
    assert!(!world.is_alive());
}

#[test]
fn title_carries_the_frame_rate() {
    let dir = tempfile::tempdir().unwrap();
    let config = project(dir.path(), "");

    let mut harness = Harness::new(10);
    let mut engine = Engine::new();
    engine.start(&config, &mut harness).unwrap();

    assert!(engine.tick_one_frame(0.5));

    let window = harness.window.clone().unwrap();
    assert_eq!(
        window.with(|w| w.title().to_string()).as_deref(),
        Some("Harness - 2 FPS")
    );
}

#[test]
fn editor_mode_freezes_unlisted_components() {
    let dir = tempfile::tempdir().unwrap();
    let config = project(dir.path(), "[editor]\ntick_component_types = [\"oscillate\"]\n");

    let mut harness = Harness::new(3);
    let mut engine = Engine::new();
    engine.start(&config, &mut harness).unwrap();
    engine.enter_editor_mode();
    engine.run();

    let world = harness.world.clone().unwrap();
    let id = world.with(|w| w.find("top")).flatten().unwrap();
    assert_eq!(world.with(|w| w.transform(id)).flatten().unwrap().yaw, 0.0);
    assert_eq!(world.with(|w| w.frame()), Some(3));
}

#[test]
fn missing_world_aborts_startup() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("kestrel.toml");
    fs::write(&config, "[engine]\ndefault_world = \"worlds/nowhere.toml\"\n").unwrap();

    let mut engine = Engine::new();
    let err = engine.start(&config, &mut Harness::new(1)).unwrap_err();

    assert!(matches!(err, EngineError::Startup { system: SubsystemId::World, .. }));
    assert!(!engine.registry().is_running());
    assert!(engine.types().is_empty());
}
