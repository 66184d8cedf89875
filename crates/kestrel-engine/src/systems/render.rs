use std::collections::BTreeMap;

use crate::registry::{Handle, RenderDeps};
use crate::swap::{ObjectId, RenderObject, RenderReader};

use super::{RenderSystem, Subsystem, WindowSystem};

/// Render system without a GPU backend.
///
/// Keeps a render-side mirror of the scene built only from published
/// hand-off data, tracks the viewport from the window and counts frames.
/// A real backend would submit draw work where `tick` walks the mirror.
pub struct HeadlessRenderer {
    window: Handle<dyn WindowSystem>,
    scene: RenderReader,
    objects: BTreeMap<ObjectId, RenderObject>,
    viewport: (u32, u32),
    frames_rendered: u64,
    last_logic_frame: u64,
    swaps: u64,
}

impl HeadlessRenderer {
    pub fn new(deps: RenderDeps) -> Self {
        let viewport = deps.window.with(|w| w.size()).unwrap_or((0, 0));
        log::info!("headless renderer started ({}x{})", viewport.0, viewport.1);

        Self {
            window: deps.window,
            scene: deps.scene,
            objects: BTreeMap::new(),
            viewport,
            frames_rendered: 0,
            last_logic_frame: 0,
            swaps: 0,
        }
    }

    pub fn object(&self, id: ObjectId) -> Option<&RenderObject> {
        self.objects.get(&id)
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Logic frame whose data was applied most recently.
    pub fn last_logic_frame(&self) -> u64 {
        self.last_logic_frame
    }

    pub fn swaps(&self) -> u64 {
        self.swaps
    }
}

impl Subsystem for HeadlessRenderer {
    fn name(&self) -> &'static str {
        "render"
    }

    fn shutdown(&mut self) {
        log::debug!("renderer drew {} frames", self.frames_rendered);
        self.objects.clear();
    }
}

impl RenderSystem for HeadlessRenderer {
    fn swap_logic_render_data(&mut self) {
        if self.scene.swap().is_some() {
            self.swaps += 1;
        }
    }

    fn tick(&mut self, _dt: f32) {
        if let Some(size) = self.window.with(|w| w.size()) {
            self.viewport = size;
        }

        let objects = &mut self.objects;
        let applied = self.scene.read(|data| {
            for id in &data.removals {
                objects.remove(id);
            }
            for obj in &data.upserts {
                objects.insert(obj.id, obj.clone());
            }
            data.frame
        });

        if let Some(frame) = applied.filter(|f| *f != 0) {
            debug_assert!(frame >= self.last_logic_frame, "render data went backwards");
            self.last_logic_frame = frame;
        }

        self.frames_rendered += 1;
        log::trace!(
            "frame {} rendered {} objects",
            self.frames_rendered,
            self.objects.len()
        );
    }
}
