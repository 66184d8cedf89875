use anyhow::{Result, anyhow};

use crate::config::ConfigManager;
use crate::registry::{Handle, RenderDeps, Shared, SubsystemFactory, WorldDeps, share};
use crate::window::WinitWindow;

use super::{
    HeadlessRenderer, HeadlessWindow, InputSystem, RenderSystem, SceneWorld, StateInput,
    WindowSystem, WorldManager,
};

/// Which window backend the default factory builds.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum WindowBackend {
    Desktop,
    Headless { close_after: Option<u64> },
}

/// Builds the engine's default subsystems.
///
/// Physics, particles and debug draw are left absent.
#[derive(Debug)]
pub struct DefaultFactory {
    backend: WindowBackend,
}

impl DefaultFactory {
    /// Desktop window through `winit`.
    pub fn desktop() -> Self {
        Self {
            backend: WindowBackend::Desktop,
        }
    }

    /// No platform window. `close_after` stops the loop after that many frames.
    pub fn headless(close_after: Option<u64>) -> Self {
        Self {
            backend: WindowBackend::Headless { close_after },
        }
    }
}

impl SubsystemFactory for DefaultFactory {
    fn world(&mut self, deps: WorldDeps<'_>) -> Result<Shared<dyn WorldManager>> {
        Ok(share(SceneWorld::new(deps)?))
    }

    fn window(&mut self, config: Handle<ConfigManager>) -> Result<Shared<dyn WindowSystem>> {
        let window = config
            .with(|c| c.config().window.clone())
            .ok_or_else(|| anyhow!("config subsystem is gone"))?;

        match self.backend {
            WindowBackend::Desktop => Ok(share(WinitWindow::open(&window)?)),
            WindowBackend::Headless { close_after } => {
                let mut headless = HeadlessWindow::new(window.width, window.height);
                if let Some(frames) = close_after {
                    headless = headless.close_after(frames);
                }
                Ok(share(headless))
            }
        }
    }

    fn input(&mut self, window: Handle<dyn WindowSystem>) -> Result<Shared<dyn InputSystem>> {
        Ok(share(StateInput::new(window)))
    }

    fn render(&mut self, deps: RenderDeps) -> Result<Shared<dyn RenderSystem>> {
        Ok(share(HeadlessRenderer::new(deps)))
    }
}
