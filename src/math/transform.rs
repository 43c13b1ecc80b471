// Copyright 2020 @TwoCookingMice

use nalgebra::{ Rotation3, Vector3 };

use super::constants::{ deg_to_rad, Float, Matrix4f, Vector3f };

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    matrix: Matrix4f,
    inv_matrix: Matrix4f
}

impl Transform {
    pub fn new(matrix: Matrix4f) -> Self {
        Self { matrix: matrix,
               inv_matrix: matrix.try_inverse().unwrap_or(Matrix4f::identity())}
    }

    pub fn matrix(&self) -> &Matrix4f {
        &self.matrix
    }

    pub fn apply_point(&self, p: Vector3f) -> Vector3f {
        let h = self.matrix * p.push(1.0);
        if h.w != 0.0 && h.w != 1.0 {
            h.xyz() / h.w
        } else {
            h.xyz()
        }
    }

    pub fn apply_vector(&self, v: Vector3f) -> Vector3f {
        (self.matrix * v.push(0.0)).xyz()
    }

    // Normals go through the inverse transpose so they stay perpendicular
    // to transformed tangents.
    pub fn apply_normal(&self, n: Vector3f) -> Vector3f {
        (self.inv_matrix.transpose() * n.push(0.0)).xyz()
    }
}

/// Translation matrix moving the origin to `offset`.
pub fn translation_matrix(offset: &Vector3f) -> Matrix4f {
    Matrix4f::new_translation(offset)
}

/// Rotation built from Euler angles in degrees, composed as
/// `Rx * Ry * Rz`.
pub fn rotation_matrix_xyz(degrees: &Vector3f) -> Matrix4f {
    let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), deg_to_rad(degrees.x));
    let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), deg_to_rad(degrees.y));
    let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), deg_to_rad(degrees.z));

    (rx * ry * rz).to_homogeneous()
}

pub fn scaling_matrix(factors: &Vector3f) -> Matrix4f {
    Matrix4f::new_nonuniform_scaling(factors)
}

/// Rotation of `v` by `angle` radians about `axis`.
pub fn rotate_about(v: &Vector3f, axis: &Vector3f, angle: Float) -> Vector3f {
    let axis = nalgebra::Unit::new_normalize(*axis);
    Rotation3::from_axis_angle(&axis, angle) * *v
}
