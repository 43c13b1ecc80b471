/* Copyright 2020 @Yuchen Wong */

use nalgebra as na;

pub type Float = f32;

pub type Vector2f = na::Vector2<Float>;
pub type Vector3f = na::Vector3<Float>;
pub type Vector4f = na::Vector4<Float>;
pub type Matrix4f = na::Matrix4<Float>;

pub const EPSILON: Float = 1e-4;
pub const PI: Float = std::f32::consts::PI;

/// World up axis used to build camera frames.
pub fn world_up() -> Vector3f {
    Vector3f::new(0.0, 1.0, 0.0)
}

pub fn deg_to_rad(degrees: Float) -> Float {
    degrees * PI / 180.0
}
