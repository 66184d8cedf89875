//! Component type metadata.
//!
//! Maps component type names (as written in world files and in editor tick
//! allow-lists) to constructors. The engine registers the built-in types
//! before any subsystem starts and clears the table after the last one is
//! gone.

use std::collections::BTreeMap;
use std::fmt;

use anyhow::{Result, anyhow};

use crate::swap::Transform;

/// Per-object behavior ticked by the world.
pub trait Component {
    /// Registered type name, e.g. `"spin"`.
    fn type_name(&self) -> &'static str;

    /// Advances the component. Returns `true` if `transform` changed.
    fn tick(&mut self, dt: f32, transform: &mut Transform) -> bool;
}

/// Builds a component from its parameter table in a world file.
pub type ComponentCtor = fn(&toml::Value) -> Result<Box<dyn Component>>;

#[derive(Default)]
pub struct TypeRegistry {
    ctors: BTreeMap<&'static str, ComponentCtor>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `ctor` under `name`. Returns `false` if the name was taken
    /// (the previous constructor is replaced).
    pub fn register(&mut self, name: &'static str, ctor: ComponentCtor) -> bool {
        self.ctors.insert(name, ctor).is_none()
    }

    /// Registers every component type shipped with the engine.
    pub fn register_builtin(&mut self) {
        crate::systems::world::register_builtin_components(self);
        log::debug!("registered {} component types", self.ctors.len());
    }

    pub fn unregister_all(&mut self) {
        self.ctors.clear();
    }

    pub fn contains(&self, name: &str) -> bool {
        self.ctors.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.ctors.is_empty()
    }

    pub fn type_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.ctors.keys().copied()
    }

    /// Instantiates the component registered as `name`.
    pub fn create(&self, name: &str, params: &toml::Value) -> Result<Box<dyn Component>> {
        let ctor = self
            .ctors
            .get(name)
            .ok_or_else(|| anyhow!("unknown component type `{name}`"))?;
        ctor(params)
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.ctors.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Nop;

    impl Component for Nop {
        fn type_name(&self) -> &'static str {
            "nop"
        }

        fn tick(&mut self, _dt: f32, _transform: &mut Transform) -> bool {
            false
        }
    }

    fn nop(_: &toml::Value) -> Result<Box<dyn Component>> {
        Ok(Box::new(Nop))
    }

    fn empty() -> toml::Value {
        toml::Value::Table(Default::default())
    }

    #[test]
    fn register_and_create() {
        let mut types = TypeRegistry::new();
        assert!(types.register("nop", nop));
        assert!(!types.register("nop", nop));
        assert!(types.contains("nop"));

        let c = types.create("nop", &empty()).unwrap();
        assert_eq!(c.type_name(), "nop");
    }

    #[test]
    fn unknown_type_is_an_error() {
        let types = TypeRegistry::new();
        let err = types.create("ghost", &empty()).err().unwrap();
        assert!(err.to_string().contains("ghost"));
    }

    #[test]
    fn builtin_registration_round_trip() {
        let mut types = TypeRegistry::new();
        types.register_builtin();
        assert!(types.contains("spin"));
        assert!(types.contains("oscillate"));

        types.unregister_all();
        assert!(types.is_empty());
    }
}
