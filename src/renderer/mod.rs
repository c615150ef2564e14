//! WebGPU rendering module
//!
//! Shapes are built on the CPU in logical screen pixels and drawn as one
//! triangle list. Text lives in the DOM overlay, not here.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use shapes::build_scene;
pub use vertex::Vertex;
