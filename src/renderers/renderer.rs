// Copyright @yucwang 2021

use crate::core::scene::SceneDescription;
use crate::math::bitmap::Bitmap;
use crate::renderers::preview::MeshInstance;

pub trait Renderer {
    fn render(&self, scene: &SceneDescription, meshes: &[MeshInstance]) -> Bitmap;
}
