// Copyright @yucwang 2023

use crate::math::constants::{ Float, Vector3f };
use crate::math::ray::Ray3f;

/// Closest-hit record of a primary ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    pub t: Float,
    pub p: Vector3f,
    pub geo_normal: Vector3f,
}

pub trait Shape: Send + Sync {
    /// Nearest intersection inside `[ray.min_t, ray.max_t]`, if any.
    fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceHit>;
}
