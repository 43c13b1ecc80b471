// Copyright @yucwang 2021

pub mod preview;
pub mod renderer;
