use std::f32::consts::TAU;

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

use crate::meta::{Component, TypeRegistry};
use crate::swap::Transform;

/// Registers the engine's built-in component types.
pub fn register_builtin_components(types: &mut TypeRegistry) {
    types.register(Spin::TYPE_NAME, Spin::create);
    types.register(Oscillate::TYPE_NAME, Oscillate::create);
}

/// Rotates the object around the up axis at a constant rate.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Spin {
    /// Radians per second.
    pub speed: f32,
}

impl Default for Spin {
    fn default() -> Self {
        Self { speed: 1.0 }
    }
}

impl Spin {
    pub const TYPE_NAME: &'static str = "spin";

    fn create(params: &toml::Value) -> Result<Box<dyn Component>> {
        let spin: Spin = params.clone().try_into().context("invalid spin parameters")?;
        Ok(Box::new(spin))
    }
}

impl Component for Spin {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn tick(&mut self, dt: f32, transform: &mut Transform) -> bool {
        if self.speed == 0.0 {
            return false;
        }
        transform.yaw = (transform.yaw + self.speed * dt).rem_euclid(TAU);
        true
    }
}

/// Moves the object back and forth along one axis around its start position.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Oscillate {
    /// 0 = x, 1 = y, 2 = z.
    pub axis: usize,
    pub amplitude: f32,
    /// Cycles per second.
    pub frequency: f32,

    #[serde(skip)]
    elapsed: f32,
    #[serde(skip)]
    origin: Option<f32>,
}

impl Default for Oscillate {
    fn default() -> Self {
        Self {
            axis: 1,
            amplitude: 1.0,
            frequency: 1.0,
            elapsed: 0.0,
            origin: None,
        }
    }
}

impl Oscillate {
    pub const TYPE_NAME: &'static str = "oscillate";

    fn create(params: &toml::Value) -> Result<Box<dyn Component>> {
        let osc: Oscillate = params
            .clone()
            .try_into()
            .context("invalid oscillate parameters")?;
        ensure!(osc.axis < 3, "oscillate axis must be 0, 1 or 2, got {}", osc.axis);
        Ok(Box::new(osc))
    }
}

impl Component for Oscillate {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn tick(&mut self, dt: f32, transform: &mut Transform) -> bool {
        let origin = *self.origin.get_or_insert(transform.position[self.axis]);
        self.elapsed += dt;

        let offset = self.amplitude * (TAU * self.frequency * self.elapsed).sin();
        transform.position[self.axis] = origin + offset;
        true
    }
}
