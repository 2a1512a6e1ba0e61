pub mod graph;
pub mod navigator;
pub mod render;
pub mod template;
