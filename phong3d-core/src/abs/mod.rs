//! This module contains the GPU-backed render objects: shader programs, textures, meshes and
//! the materials pushed into programs.

pub mod material;
pub mod mesh;
pub mod shader;
pub mod texture;

pub use material::*;
pub use mesh::*;
pub use shader::*;
pub use texture::*;
