// Copyright @yucwang 2026

use crate::core::directive::{assign, collect_missing, Directive, DirectiveErrorKind};
use crate::core::field_scanner::FieldScanner;
use crate::math::constants::{Float, Vector3f, Vector4f};

/// Spherical area light. `center_and_radius.w` is the radius and
/// `emittance.w` is always zero padding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalLight {
    pub center_and_radius: Vector4f,
    pub emittance: Vector4f,
}

impl SphericalLight {
    pub fn new(center: Vector3f, radius: Float, emittance: Vector3f) -> Self {
        Self {
            center_and_radius: center.push(radius),
            emittance: emittance.push(0.0),
        }
    }

    pub fn center(&self) -> Vector3f {
        self.center_and_radius.xyz()
    }

    pub fn radius(&self) -> Float {
        self.center_and_radius.w
    }

    pub fn emittance_rgb(&self) -> Vector3f {
        self.emittance.xyz()
    }

    /// Eight floats per light: center, radius, emittance, padding.
    pub fn gpu_layout(&self) -> [f32; 8] {
        let c = &self.center_and_radius;
        let e = &self.emittance;
        [c.x, c.y, c.z, c.w, e.x, e.y, e.z, e.w]
    }
}

#[derive(Debug, Clone, Copy)]
enum LightField {
    Center,
    Radius,
    Emittance,
}

const LIGHT_FIELDS: &[(&str, LightField)] = &[
    ("center", LightField::Center),
    ("radius", LightField::Radius),
    ("emittance", LightField::Emittance),
];

/// Parses the sub-fields of a `SphericalLight` line starting at `offset`.
pub fn parse_spherical_light(line: &str, offset: usize) -> Result<SphericalLight, DirectiveErrorKind> {
    let d = Directive::SphericalLight;
    let mut center = None;
    let mut radius = None;
    let mut emittance = None;

    let mut scanner = FieldScanner::new(line, offset);
    while let Some((keyword, field)) = scanner.next_field(LIGHT_FIELDS) {
        match field {
            LightField::Center => assign(&mut center, scanner.vector3(keyword)?, d, keyword),
            LightField::Radius => assign(&mut radius, scanner.scalar(keyword)?, d, keyword),
            LightField::Emittance => assign(&mut emittance, scanner.vector3(keyword)?, d, keyword),
        }
    }

    match (center, radius, emittance) {
        (Some(center), Some(radius), Some(emittance)) => Ok(SphericalLight::new(center, radius, emittance)),
        _ => Err(DirectiveErrorKind::MissingFields(collect_missing(&[
            ("center", center.is_some()),
            ("radius", radius.is_some()),
            ("emittance", emittance.is_some()),
        ]))),
    }
}
