//! Mesh management module.
//!
//! This module defines the [`Mesh`] struct: geometry uploaded once to the GPU plus the
//! transform used to place it in the world.

use std::sync::Arc;

use glam::{Mat4, Vec3};

use super::ShaderProgram;
use crate::{
    error::{Error, Result},
    geometry::{Primitive, Shape, Vertex},
    gpu::{BufferTarget, DrawCall, Gpu},
    transform::Transform,
};

/// Where a mesh gets its vertices from.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Shape(Shape),
    Raw {
        vertices: Vec<Vertex>,
        indices: Vec<u32>,
    },
}

impl From<Shape> for Geometry {
    fn from(shape: Shape) -> Self {
        Geometry::Shape(shape)
    }
}

impl From<Primitive> for Geometry {
    fn from(primitive: Primitive) -> Self {
        Geometry::Raw {
            vertices: primitive.vertices,
            indices: primitive.indices,
        }
    }
}

impl Geometry {
    fn into_primitive(self) -> Result<Primitive> {
        match self {
            Geometry::Shape(shape) => Ok(Primitive::generate(shape)),
            Geometry::Raw { vertices, indices } => Primitive::from_raw(vertices, indices),
        }
    }
}

/// Represents a mesh stored on the GPU side.
///
/// The buffers are written once at construction and released on drop.
pub struct Mesh<G: Gpu> {
    gl: Arc<G>,
    vao: G::VertexArrayHandle,
    vbo: G::BufferHandle,
    ebo: Option<G::BufferHandle>,
    vertex_count: usize,
    index_count: usize,
    transform: Transform,
}

impl<G: Gpu> Mesh<G> {
    /// Uploads `geometry` and binds the four vertex attributes.
    pub fn new(gl: &Arc<G>, transform: Transform, geometry: impl Into<Geometry>) -> Result<Self> {
        let primitive = geometry.into().into_primitive()?;

        let vao = gl.alloc_vertex_array().map_err(Error::GpuResource)?;
        gl.bind_vertex_array(Some(vao));
        let buffers = Self::upload(gl, &primitive);
        gl.bind_vertex_array(None);

        let (vbo, ebo) = match buffers {
            Ok(buffers) => buffers,
            Err(err) => {
                gl.release_vertex_array(vao);
                return Err(err);
            }
        };

        Ok(Self {
            gl: Arc::clone(gl),
            vao,
            vbo,
            ebo,
            vertex_count: primitive.vertices.len(),
            index_count: primitive.indices.len(),
            transform,
        })
    }

    fn upload(gl: &G, primitive: &Primitive) -> Result<(G::BufferHandle, Option<G::BufferHandle>)> {
        let vbo = gl
            .alloc_buffer(
                BufferTarget::Vertices,
                bytemuck::cast_slice(&primitive.vertices),
            )
            .map_err(Error::GpuResource)?;

        // Only indexed shapes get an element buffer.
        let ebo = if primitive.is_indexed() {
            match gl.alloc_buffer(BufferTarget::Indices, bytemuck::cast_slice(&primitive.indices)) {
                Ok(ebo) => Some(ebo),
                Err(err) => {
                    gl.release_buffer(vbo);
                    return Err(Error::GpuResource(err));
                }
            }
        } else {
            None
        };

        for attrib in Vertex::ATTRIBUTES {
            gl.enable_attrib(attrib, Vertex::STRIDE);
        }

        Ok((vbo, ebo))
    }

    /// Draws the mesh with `program`.
    ///
    /// Uploads `model_matrix`, binds the vertex array, makes the program current, draws, then
    /// clears both bindings again.
    pub fn render(&self, program: &ShaderProgram<G>) {
        program.set_uniform("model_matrix", self.model_matrix());

        self.gl.bind_vertex_array(Some(self.vao));
        program.use_program();

        let call = if self.ebo.is_some() {
            DrawCall::Elements {
                count: self.index_count as i32,
            }
        } else {
            DrawCall::Arrays {
                count: self.vertex_count as i32,
            }
        };
        self.gl.draw(call);

        program.unuse();
        self.gl.bind_vertex_array(None);
    }

    /// Recomputed from the transform on every call.
    pub fn model_matrix(&self) -> Mat4 {
        self.transform.model_matrix()
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.transform.position = position;
    }

    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.transform.rotation = rotation;
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.transform.scale = scale;
    }

    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    pub fn rotation(&self) -> Vec3 {
        self.transform.rotation
    }

    pub fn scale(&self) -> Vec3 {
        self.transform.scale
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    // Zero for meshes drawn without an index buffer.
    pub fn index_count(&self) -> usize {
        self.index_count
    }
}

impl<G: Gpu> Drop for Mesh<G> {
    fn drop(&mut self) {
        self.gl.release_buffer(self.vbo);
        if let Some(ebo) = self.ebo {
            self.gl.release_buffer(ebo);
        }
        self.gl.release_vertex_array(self.vao);
    }
}
