use serde::Deserialize;

use super::SwapPayload;

/// Stable identity of a world object across frames.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u64);

/// Placement of an object in world space.
#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Transform {
    pub position: [f32; 3],
    /// Rotation around the up axis, in radians.
    pub yaw: f32,
    pub scale: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            yaw: 0.0,
            scale: 1.0,
        }
    }
}

/// Everything the renderer needs to know about one object.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderObject {
    pub id: ObjectId,
    pub mesh: String,
    pub transform: Transform,
}

/// What one logic tick publishes to the renderer.
///
/// Only changes are carried: objects created or moved this frame, and
/// objects that went away.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogicRenderData {
    /// Logic frame that produced this data.
    pub frame: u64,
    pub upserts: Vec<RenderObject>,
    pub removals: Vec<ObjectId>,
}

impl LogicRenderData {
    pub fn is_empty(&self) -> bool {
        self.upserts.is_empty() && self.removals.is_empty()
    }
}

impl SwapPayload for LogicRenderData {
    fn reset(&mut self) {
        self.frame = 0;
        self.upserts.clear();
        self.removals.clear();
    }
}
