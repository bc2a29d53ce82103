//! wgpu render backend for the vista exercises.
//!
//! Draws one of three scenes: a vertex-colored triangle, a quad blending two
//! textures, or a grid of textured cubes seen through the camera.
//!
//! # Invariants
//! - The renderer only reads a captured `RenderView`; it never mutates input
//!   or camera state.
//! - Wireframe falls back to filled when the device cannot draw lines.

mod gpu;
mod scene;
mod shaders;
mod texture;

pub use gpu::{CLEAR_COLOR, SceneRenderer};
pub use scene::{CUBE_POSITIONS, Mesh, Scene, Vertex};
pub use texture::{TextureError, Wrap, checkerboard, load_image, load_or_checkerboard};
