//! A fake [`Gpu`] that records every call, for tests.

use std::cell::{Cell, RefCell};

use glam::Vec4;

use super::{BufferTarget, DrawCall, Gpu, ShaderStage, TextureImage, UniformValue, VertexAttrib};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    CompileStage(ShaderStage, u32),
    ReleaseStage(u32),
    LinkStages(Vec<u32>, u32),
    ReleaseProgram(u32),
    BindProgram(Option<u32>),
    WriteUniform { program: u32, name: String, value: UniformValue },
    AllocVertexArray(u32),
    BindVertexArray(Option<u32>),
    ReleaseVertexArray(u32),
    AllocBuffer { target: BufferTarget, id: u32, len: usize },
    ReleaseBuffer(u32),
    EnableAttrib(VertexAttrib, i32),
    Draw(DrawCall),
    AllocTexture { id: u32, width: u32, height: u32 },
    BindTexture(u32, Option<u32>),
    ReleaseTexture(u32),
    ConfigurePipeline,
    Viewport(i32, i32),
    Clear(Vec4),
}

/// Hands out sequential ids starting at 1 and logs calls in order.
#[derive(Default)]
pub(crate) struct RecordingGpu {
    calls: RefCell<Vec<Call>>,
    next_id: Cell<u32>,
    pub fail_compile: Cell<Option<ShaderStage>>,
    pub fail_link: Cell<bool>,
    pub fail_buffers: Cell<bool>,
}

impl RecordingGpu {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn draws(&self) -> Vec<DrawCall> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::Draw(draw) => Some(*draw),
                _ => None,
            })
            .collect()
    }

    /// The last value written to `name`, on any program.
    pub fn last_uniform(&self, name: &str) -> Option<UniformValue> {
        self.calls.borrow().iter().rev().find_map(|call| match call {
            Call::WriteUniform { name: n, value, .. } if n == name => Some(*value),
            _ => None,
        })
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn next(&self) -> u32 {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        id
    }
}

impl Gpu for RecordingGpu {
    type ShaderHandle = u32;
    type ProgramHandle = u32;
    type BufferHandle = u32;
    type VertexArrayHandle = u32;
    type TextureHandle = u32;

    fn compile_stage(&self, stage: ShaderStage, _source: &str) -> Result<u32, String> {
        if self.fail_compile.get() == Some(stage) {
            return Err(format!("0:1(1): error: syntax error in {stage} stage"));
        }
        let id = self.next();
        self.record(Call::CompileStage(stage, id));
        Ok(id)
    }

    fn release_stage(&self, shader: u32) {
        self.record(Call::ReleaseStage(shader));
    }

    fn link_stages(&self, shaders: &[u32]) -> Result<u32, String> {
        if self.fail_link.get() {
            return Err("error: unresolved varying `v_normal`".to_string());
        }
        let id = self.next();
        self.record(Call::LinkStages(shaders.to_vec(), id));
        Ok(id)
    }

    fn release_program(&self, program: u32) {
        self.record(Call::ReleaseProgram(program));
    }

    fn bind_program(&self, program: Option<u32>) {
        self.record(Call::BindProgram(program));
    }

    fn write_uniform(&self, program: u32, name: &str, value: UniformValue) {
        self.record(Call::WriteUniform {
            program,
            name: name.to_string(),
            value,
        });
    }

    fn alloc_vertex_array(&self) -> Result<u32, String> {
        let id = self.next();
        self.record(Call::AllocVertexArray(id));
        Ok(id)
    }

    fn bind_vertex_array(&self, vao: Option<u32>) {
        self.record(Call::BindVertexArray(vao));
    }

    fn release_vertex_array(&self, vao: u32) {
        self.record(Call::ReleaseVertexArray(vao));
    }

    fn alloc_buffer(&self, target: BufferTarget, data: &[u8]) -> Result<u32, String> {
        if self.fail_buffers.get() {
            return Err("out of memory".to_string());
        }
        let id = self.next();
        self.record(Call::AllocBuffer {
            target,
            id,
            len: data.len(),
        });
        Ok(id)
    }

    fn release_buffer(&self, buffer: u32) {
        self.record(Call::ReleaseBuffer(buffer));
    }

    fn enable_attrib(&self, attrib: VertexAttrib, stride: i32) {
        self.record(Call::EnableAttrib(attrib, stride));
    }

    fn draw(&self, call: DrawCall) {
        self.record(Call::Draw(call));
    }

    fn alloc_texture(&self, image: &TextureImage) -> Result<u32, String> {
        let id = self.next();
        self.record(Call::AllocTexture {
            id,
            width: image.width,
            height: image.height,
        });
        Ok(id)
    }

    fn bind_texture(&self, unit: u32, texture: Option<u32>) {
        self.record(Call::BindTexture(unit, texture));
    }

    fn release_texture(&self, texture: u32) {
        self.record(Call::ReleaseTexture(texture));
    }

    fn configure_pipeline(&self) {
        self.record(Call::ConfigurePipeline);
    }

    fn set_viewport(&self, width: i32, height: i32) {
        self.record(Call::Viewport(width, height));
    }

    fn clear_frame(&self, colour: Vec4) {
        self.record(Call::Clear(colour));
    }
}
