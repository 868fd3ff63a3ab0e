//! Rendering data
//!
//! Produces draw commands and GPU-ready vertices from a game state. Nothing
//! here touches a device; the front end uploads what `tessellate` returns.

pub mod background;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use scene::{CIRCLE_SEGMENTS, DrawCmd, as_bytes, scene, tessellate};
pub use vertex::{Vertex, colors};
