//! Rendering module
//!
//! The match is drawn as flat-colored triangles: `DisplayList` turns scene
//! entities into vertices, `RenderState` uploads and draws them with WebGPU.

pub mod display_list;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use display_list::DisplayList;
pub use pipeline::RenderState;
pub use vertex::Vertex;
