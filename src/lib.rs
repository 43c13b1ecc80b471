// Copyright @yucwang 2021

pub mod core;
pub mod emitters;
pub mod io;
pub mod math;
pub mod renderers;
pub mod sensors;
pub mod shapes;
