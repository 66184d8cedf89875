use crate::registry::SubsystemRegistry;

/// Per-frame values handed to [`FrameHooks`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameInfo {
    /// Seconds since the previous frame.
    pub dt: f32,
    /// Smoothed FPS as of this call.
    pub fps: u32,
    /// Zero-based index of the frame being ticked.
    pub frame_index: u64,
}

/// Hook points around a frame, implemented by higher layers.
pub trait FrameHooks {
    /// Called before the logical tick.
    fn before_logic(&mut self, info: &FrameInfo, registry: &SubsystemRegistry) {
        let _ = (info, registry);
    }

    /// Called right after the renderer tick, before window housekeeping.
    fn after_render(&mut self, info: &FrameInfo, registry: &SubsystemRegistry) {
        let _ = (info, registry);
    }
}
