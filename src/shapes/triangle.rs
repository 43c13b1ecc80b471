// Copyright @yucwang 2023

use crate::core::shape::{ Shape, SurfaceHit };
use crate::math::constants::{ EPSILON, Vector3f };
use crate::math::ray::Ray3f;
use crate::math::transform::Transform;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    p0: Vector3f,
    p1: Vector3f,
    p2: Vector3f
}

impl Shape for Triangle {
    // Moller-Trumbore; both faces are hit.
    fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceHit> {
        let edge0 = self.p1 - self.p0;
        let edge1 = self.p2 - self.p0;
        let p_vec = ray.dir().cross(&edge1);
        let det = edge0.dot(&p_vec);
        if det.abs() < EPSILON * EPSILON {
            return None;
        }

        let inv_det = 1.0 / det;
        let t_vec = ray.origin() - self.p0;
        let u = t_vec.dot(&p_vec) * inv_det;
        if u < 0.0 || u > 1.0 {
            return None;
        }

        let q_vec = t_vec.cross(&edge0);
        let v = ray.dir().dot(&q_vec) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = edge1.dot(&q_vec) * inv_det;
        if t < ray.min_t || t > ray.max_t {
            return None;
        }

        Some(SurfaceHit { t, p: ray.at(t), geo_normal: self.geometric_normal() })
    }
}

impl Triangle {
    pub fn new(new_p0: Vector3f, new_p1: Vector3f, new_p2: Vector3f) -> Self {
        Triangle {
            p0: new_p0,
            p1: new_p1,
            p2: new_p2,
        }
    }

    pub fn geometric_normal(&self) -> Vector3f {
        let edge0 = self.p1 - self.p0;
        let edge1 = self.p2 - self.p0;
        edge0.cross(&edge1).normalize()
    }

    pub fn vertices(&self) -> (Vector3f, Vector3f, Vector3f) {
        (self.p0, self.p1, self.p2)
    }

    pub fn apply_transform_matrix(&mut self, transform: &Transform) {
        self.p0 = transform.apply_point(self.p0);
        self.p1 = transform.apply_point(self.p1);
        self.p2 = transform.apply_point(self.p2);
    }
}
