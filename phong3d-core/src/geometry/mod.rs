//! CPU-side geometry: the vertex layout shared with the shaders and the built-in shapes.

use std::mem::{offset_of, size_of};

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

use crate::gpu::VertexAttrib;

pub mod primitive;

pub use primitive::{Primitive, Shape};

/// One interleaved vertex.
///
/// The field order is part of the contract with the shaders: attribute 0 is the position,
/// 1 the colour, 2 the texture coordinate and 3 the normal.
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Vertex {
    pub position: Vec3,
    pub colour: Vec3,
    pub texcoord: Vec2,
    pub normal: Vec3,
}

impl Vertex {
    pub const fn new(position: Vec3, colour: Vec3, texcoord: Vec2, normal: Vec3) -> Self {
        Self {
            position,
            colour,
            texcoord,
            normal,
        }
    }

    pub const STRIDE: i32 = size_of::<Vertex>() as i32;

    pub const ATTRIBUTES: [VertexAttrib; 4] = [
        VertexAttrib {
            index: 0,
            components: 3,
            offset: offset_of!(Vertex, position) as i32,
        },
        VertexAttrib {
            index: 1,
            components: 3,
            offset: offset_of!(Vertex, colour) as i32,
        },
        VertexAttrib {
            index: 2,
            components: 2,
            offset: offset_of!(Vertex, texcoord) as i32,
        },
        VertexAttrib {
            index: 3,
            components: 3,
            offset: offset_of!(Vertex, normal) as i32,
        },
    ];
}
