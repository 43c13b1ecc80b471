// Copyright @yucwang 2026

use crate::core::shape::{ Shape, SurfaceHit };
use crate::emitters::spherical::SphericalLight;
use crate::math::constants::{ Float, Vector3f };
use crate::math::ray::Ray3f;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Vector3f,
    radius: Float,
}

impl Sphere {
    pub fn new(center: Vector3f, radius: Float) -> Self {
        Self { center, radius }
    }

    pub fn from_light(light: &SphericalLight) -> Self {
        Self::new(light.center(), light.radius())
    }
}

impl Shape for Sphere {
    fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceHit> {
        // Ray directions are unit length, so the quadratic's `a` is 1.
        let oc = ray.origin() - self.center;
        let half_b = oc.dot(&ray.dir());
        let c = oc.norm_squared() - self.radius * self.radius;
        let discriminant = half_b * half_b - c;
        if discriminant < 0.0 {
            return None;
        }

        let root = discriminant.sqrt();
        let near = -half_b - root;
        let far = -half_b + root;
        let t = if near >= ray.min_t && near <= ray.max_t {
            near
        } else if far >= ray.min_t && far <= ray.max_t {
            far
        } else {
            return None;
        };

        let p = ray.at(t);
        Some(SurfaceHit { t, p, geo_normal: (p - self.center) / self.radius })
    }
}
