//! Default world manager.
//!
//! A world is a flat list of objects, each with a transform, a mesh name and
//! a list of components. Objects are loaded from a TOML world asset:
//!
//! ```toml
//! name = "sandbox"
//!
//! [[objects]]
//! name = "cube"
//! mesh = "meshes/cube.obj"
//! transform = { position = [0.0, 1.0, 0.0] }
//!
//! [[objects.components]]
//! type = "spin"
//! speed = 1.5
//! ```

mod components;

pub use components::{Oscillate, Spin, register_builtin_components};

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

use crate::meta::{Component, TypeRegistry};
use crate::registry::WorldDeps;
use crate::swap::{LogicWriter, ObjectId, RenderObject, Transform};

use super::{Subsystem, TickScope, WorldManager};

/// World asset layout.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WorldDef {
    pub name: String,
    pub objects: Vec<ObjectDef>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ObjectDef {
    pub name: String,
    pub mesh: String,
    pub transform: Transform,
    pub components: Vec<ComponentDef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ComponentDef {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub params: toml::Table,
}

struct WorldObject {
    id: ObjectId,
    name: String,
    mesh: String,
    transform: Transform,
    components: Vec<Box<dyn Component>>,
    dirty: bool,
}

impl WorldObject {
    fn render_object(&self) -> RenderObject {
        RenderObject {
            id: self.id,
            mesh: self.mesh.clone(),
            transform: self.transform,
        }
    }
}

/// World manager publishing changed objects to the renderer each tick.
pub struct SceneWorld {
    name: String,
    objects: Vec<WorldObject>,
    removed: Vec<ObjectId>,
    scene: LogicWriter,
    next_id: u64,
    frame: u64,
}

impl SceneWorld {
    /// Builds the world and loads the configured default world asset, if any.
    pub fn new(deps: WorldDeps<'_>) -> Result<Self> {
        let url = deps
            .config
            .with(|c| c.config().engine.default_world.clone())
            .ok_or_else(|| anyhow!("config subsystem is gone"))?;

        let def = if url.is_empty() {
            log::info!("no default world configured; starting empty");
            WorldDef::default()
        } else {
            deps.assets
                .with(|a| a.load_toml::<WorldDef>(&url))
                .ok_or_else(|| anyhow!("asset subsystem is gone"))?
                .with_context(|| format!("failed to load world {url}"))?
        };

        Self::from_def(def, deps.types, deps.scene)
    }

    /// Instantiates every object of `def`.
    pub fn from_def(def: WorldDef, types: &TypeRegistry, scene: LogicWriter) -> Result<Self> {
        let mut world = Self {
            name: def.name,
            objects: Vec::with_capacity(def.objects.len()),
            removed: Vec::new(),
            scene,
            next_id: 1,
            frame: 0,
        };

        for obj in def.objects {
            let components = obj
                .components
                .iter()
                .map(|c| {
                    types
                        .create(&c.kind, &toml::Value::Table(c.params.clone()))
                        .with_context(|| format!("object `{}`", obj.name))
                })
                .collect::<Result<Vec<_>>>()?;
            world.spawn(obj.name, obj.mesh, obj.transform, components);
        }

        log::info!("world `{}` loaded with {} objects", world.name, world.objects.len());
        Ok(world)
    }

    /// Adds an object. It is published to the renderer on the next tick.
    pub fn spawn(
        &mut self,
        name: impl Into<String>,
        mesh: impl Into<String>,
        transform: Transform,
        components: Vec<Box<dyn Component>>,
    ) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;

        self.objects.push(WorldObject {
            id,
            name: name.into(),
            mesh: mesh.into(),
            transform,
            components,
            dirty: true,
        });
        id
    }

    /// Removes an object. The removal is published on the next tick.
    pub fn despawn(&mut self, id: ObjectId) -> bool {
        let Some(pos) = self.objects.iter().position(|o| o.id == id) else {
            return false;
        };
        self.objects.remove(pos);
        self.removed.push(id);
        true
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn find(&self, name: &str) -> Option<ObjectId> {
        self.objects.iter().find(|o| o.name == name).map(|o| o.id)
    }

    pub fn transform(&self, id: ObjectId) -> Option<Transform> {
        self.objects.iter().find(|o| o.id == id).map(|o| o.transform)
    }

    /// Frames ticked so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    fn publish(&mut self) {
        let frame = self.frame;
        let objects = &mut self.objects;
        let removed = &mut self.removed;

        let published = self.scene.write(|data| {
            data.frame = frame;
            for obj in objects.iter_mut().filter(|o| o.dirty) {
                data.upserts.push(obj.render_object());
                obj.dirty = false;
            }
            data.removals.append(removed);
        });

        if published.is_none() {
            log::trace!("render hand-off buffer gone; frame {frame} not published");
        }
    }
}

impl Subsystem for SceneWorld {
    fn name(&self) -> &'static str {
        "world"
    }

    fn shutdown(&mut self) {
        log::debug!("unloading world `{}`", self.name);
        self.objects.clear();
    }
}

impl WorldManager for SceneWorld {
    fn tick(&mut self, dt: f32, scope: &TickScope) {
        self.frame += 1;

        for obj in &mut self.objects {
            for component in &mut obj.components {
                if scope.allows(component.type_name()) && component.tick(dt, &mut obj.transform) {
                    obj.dirty = true;
                }
            }
        }

        self.publish();
    }
}
