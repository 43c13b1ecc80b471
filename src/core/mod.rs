// Copyright @yucwang 2021

pub mod directive;
pub mod field_scanner;
pub mod material;
pub mod model;
pub mod rng;
pub mod scene;
pub mod scene_loader;
pub mod settings;
pub mod shape;
