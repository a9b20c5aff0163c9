//! The GPU capability used by every render object.
//!
//! Render objects never touch OpenGL directly. They hold an `Arc<G>` where `G: Gpu` and go
//! through the narrow set of operations below, which keeps the implicit "current program",
//! "current vertex array" and "active texture unit" state in one place. [`glow::Context`]
//! implements the trait for real rendering, and tests substitute a recording fake.

use std::fmt;

use glam::{Mat3, Mat4, Vec2, Vec3, Vec4};

mod native;

#[cfg(test)]
pub(crate) mod recording;

/// A programmable pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Geometry,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Geometry => "geometry",
            ShaderStage::Fragment => "fragment",
        })
    }
}

/// Buffer binding targets used for geometry uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferTarget {
    Vertices,
    Indices,
}

/// A float vertex attribute inside an interleaved vertex buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttrib {
    pub index: u32,
    pub components: i32,
    pub offset: i32,
}

/// A draw call over the currently bound vertex array, always as a triangle list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawCall {
    /// Non-indexed draw of `count` vertices.
    Arrays { count: i32 },
    /// Indexed draw of `count` `u32` indices.
    Elements { count: i32 },
}

/// Decoded RGBA8 pixels ready for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// A value that can be written to a named uniform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Int(i32),
    Float(f32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat3 { value: Mat3, transpose: bool },
    Mat4 { value: Mat4, transpose: bool },
}

/// Represents a type that can be uploaded as a uniform variable.
pub trait Uniform {
    fn to_uniform(&self) -> UniformValue;
}

impl Uniform for bool {
    fn to_uniform(&self) -> UniformValue {
        UniformValue::Int(*self as i32)
    }
}

impl Uniform for i32 {
    fn to_uniform(&self) -> UniformValue {
        UniformValue::Int(*self)
    }
}

impl Uniform for f32 {
    fn to_uniform(&self) -> UniformValue {
        UniformValue::Float(*self)
    }
}

impl Uniform for Vec2 {
    fn to_uniform(&self) -> UniformValue {
        UniformValue::Vec2(*self)
    }
}

impl Uniform for Vec3 {
    fn to_uniform(&self) -> UniformValue {
        UniformValue::Vec3(*self)
    }
}

impl Uniform for Vec4 {
    fn to_uniform(&self) -> UniformValue {
        UniformValue::Vec4(*self)
    }
}

impl Uniform for Mat3 {
    fn to_uniform(&self) -> UniformValue {
        UniformValue::Mat3 {
            value: *self,
            transpose: false,
        }
    }
}

impl Uniform for Mat4 {
    fn to_uniform(&self) -> UniformValue {
        UniformValue::Mat4 {
            value: *self,
            transpose: false,
        }
    }
}

/// Uploads the wrapped matrix with the transpose flag set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transposed<M>(pub M);

impl Uniform for Transposed<Mat3> {
    fn to_uniform(&self) -> UniformValue {
        UniformValue::Mat3 {
            value: self.0,
            transpose: true,
        }
    }
}

impl Uniform for Transposed<Mat4> {
    fn to_uniform(&self) -> UniformValue {
        UniformValue::Mat4 {
            value: self.0,
            transpose: true,
        }
    }
}

impl<T: Uniform> Uniform for &T {
    fn to_uniform(&self) -> UniformValue {
        (*self).to_uniform()
    }
}

/// The operations the renderer needs from a GPU context.
///
/// Every call happens on the thread that owns the context. Allocation methods report failures
/// as strings, which callers wrap into [`crate::Error`].
pub trait Gpu {
    type ShaderHandle: Copy + fmt::Debug;
    type ProgramHandle: Copy + fmt::Debug + PartialEq;
    type BufferHandle: Copy + fmt::Debug;
    type VertexArrayHandle: Copy + fmt::Debug;
    type TextureHandle: Copy + fmt::Debug + PartialEq;

    /// Compiles one stage. On failure the partial shader is released and the info log returned.
    fn compile_stage(&self, stage: ShaderStage, source: &str) -> Result<Self::ShaderHandle, String>;

    fn release_stage(&self, shader: Self::ShaderHandle);

    /// Links the stages in the given order. On failure the program is released and the info
    /// log returned.
    fn link_stages(&self, shaders: &[Self::ShaderHandle]) -> Result<Self::ProgramHandle, String>;

    fn release_program(&self, program: Self::ProgramHandle);

    /// Makes `program` current, or clears the current program with `None`.
    fn bind_program(&self, program: Option<Self::ProgramHandle>);

    /// Looks up `name` on the current program and writes `value`. Unknown names are ignored.
    fn write_uniform(&self, program: Self::ProgramHandle, name: &str, value: UniformValue);

    fn alloc_vertex_array(&self) -> Result<Self::VertexArrayHandle, String>;

    fn bind_vertex_array(&self, vao: Option<Self::VertexArrayHandle>);

    fn release_vertex_array(&self, vao: Self::VertexArrayHandle);

    /// Creates a buffer, binds it to `target` and uploads `data` once. The buffer stays bound
    /// so the current vertex array captures it.
    fn alloc_buffer(&self, target: BufferTarget, data: &[u8]) -> Result<Self::BufferHandle, String>;

    fn release_buffer(&self, buffer: Self::BufferHandle);

    /// Describes and enables one float attribute of the bound vertex buffer.
    fn enable_attrib(&self, attrib: VertexAttrib, stride: i32);

    fn draw(&self, call: DrawCall);

    /// Creates a 2D texture with repeat wrapping and linear mipmap filtering, uploads
    /// `image` and generates mipmaps. The texture is left unbound.
    fn alloc_texture(&self, image: &TextureImage) -> Result<Self::TextureHandle, String>;

    /// Activates texture unit `unit` and binds `texture` (or nothing) to it.
    fn bind_texture(&self, unit: u32, texture: Option<Self::TextureHandle>);

    fn release_texture(&self, texture: Self::TextureHandle);

    /// Enables depth testing, back-face culling with counter-clockwise fronts and alpha
    /// blending.
    fn configure_pipeline(&self);

    fn set_viewport(&self, width: i32, height: i32);

    /// Clears colour, depth and stencil.
    fn clear_frame(&self, colour: Vec4);
}
