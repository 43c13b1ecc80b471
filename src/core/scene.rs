// Copyright @yucwang 2026

use crate::core::model::ModelInstance;
use crate::emitters::spherical::SphericalLight;
use crate::sensors::pinhole::Camera;

/// Parsed scene file. Built once by the loader and read-only afterwards,
/// so it can be shared between renderer threads by reference.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneDescription {
    camera: Camera,
    models: Vec<ModelInstance>,
    spherical_lights: Vec<SphericalLight>,
}

impl SceneDescription {
    pub fn new(camera: Camera, models: Vec<ModelInstance>, spherical_lights: Vec<SphericalLight>) -> Self {
        Self { camera, models, spherical_lights }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Models in declaration order.
    pub fn models(&self) -> &[ModelInstance] {
        &self.models
    }

    pub fn spherical_lights(&self) -> &[SphericalLight] {
        &self.spherical_lights
    }

    /// All lights packed back to back, eight floats each.
    pub fn light_buffer(&self) -> Vec<f32> {
        self.spherical_lights.iter()
            .flat_map(|light| light.gpu_layout())
            .collect()
    }
}
