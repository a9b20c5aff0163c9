//! [`Gpu`] over a real OpenGL 3.3+ context through `glow`.

use glam::Vec4;
use glow::HasContext;

use super::{BufferTarget, DrawCall, Gpu, ShaderStage, TextureImage, UniformValue, VertexAttrib};

fn stage_enum(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Geometry => glow::GEOMETRY_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
    }
}

fn target_enum(target: BufferTarget) -> u32 {
    match target {
        BufferTarget::Vertices => glow::ARRAY_BUFFER,
        BufferTarget::Indices => glow::ELEMENT_ARRAY_BUFFER,
    }
}

impl Gpu for glow::Context {
    type ShaderHandle = glow::Shader;
    type ProgramHandle = glow::Program;
    type BufferHandle = glow::Buffer;
    type VertexArrayHandle = glow::VertexArray;
    type TextureHandle = glow::Texture;

    fn compile_stage(&self, stage: ShaderStage, source: &str) -> Result<glow::Shader, String> {
        unsafe {
            let shader = self.create_shader(stage_enum(stage))?;
            self.shader_source(shader, source);
            self.compile_shader(shader);

            if !self.get_shader_compile_status(shader) {
                let log = self.get_shader_info_log(shader);
                self.delete_shader(shader);
                return Err(log);
            }

            Ok(shader)
        }
    }

    fn release_stage(&self, shader: glow::Shader) {
        unsafe {
            self.delete_shader(shader);
        }
    }

    fn link_stages(&self, shaders: &[glow::Shader]) -> Result<glow::Program, String> {
        unsafe {
            let program = self.create_program()?;

            for shader in shaders {
                self.attach_shader(program, *shader);
            }

            self.link_program(program);

            for shader in shaders {
                self.detach_shader(program, *shader);
            }

            if !self.get_program_link_status(program) {
                let log = self.get_program_info_log(program);
                self.delete_program(program);
                return Err(log);
            }

            self.use_program(None);
            Ok(program)
        }
    }

    fn release_program(&self, program: glow::Program) {
        unsafe {
            self.delete_program(program);
        }
    }

    fn bind_program(&self, program: Option<glow::Program>) {
        unsafe {
            self.use_program(program);
        }
    }

    fn write_uniform(&self, program: glow::Program, name: &str, value: UniformValue) {
        unsafe {
            let Some(location) = self.get_uniform_location(program, name) else {
                return;
            };
            let location = Some(&location);
            match value {
                UniformValue::Int(v) => self.uniform_1_i32(location, v),
                UniformValue::Float(v) => self.uniform_1_f32(location, v),
                UniformValue::Vec2(v) => self.uniform_2_f32(location, v.x, v.y),
                UniformValue::Vec3(v) => self.uniform_3_f32(location, v.x, v.y, v.z),
                UniformValue::Vec4(v) => self.uniform_4_f32(location, v.x, v.y, v.z, v.w),
                UniformValue::Mat3 { value, transpose } => {
                    self.uniform_matrix_3_f32_slice(location, transpose, value.as_ref())
                }
                UniformValue::Mat4 { value, transpose } => {
                    self.uniform_matrix_4_f32_slice(location, transpose, value.as_ref())
                }
            }
        }
    }

    fn alloc_vertex_array(&self) -> Result<glow::VertexArray, String> {
        unsafe { self.create_vertex_array() }
    }

    fn bind_vertex_array(&self, vao: Option<glow::VertexArray>) {
        unsafe {
            HasContext::bind_vertex_array(self, vao);
        }
    }

    fn release_vertex_array(&self, vao: glow::VertexArray) {
        unsafe {
            self.delete_vertex_array(vao);
        }
    }

    fn alloc_buffer(&self, target: BufferTarget, data: &[u8]) -> Result<glow::Buffer, String> {
        unsafe {
            let buffer = self.create_buffer()?;
            self.bind_buffer(target_enum(target), Some(buffer));
            self.buffer_data_u8_slice(target_enum(target), data, glow::STATIC_DRAW);
            Ok(buffer)
        }
    }

    fn release_buffer(&self, buffer: glow::Buffer) {
        unsafe {
            self.delete_buffer(buffer);
        }
    }

    fn enable_attrib(&self, attrib: VertexAttrib, stride: i32) {
        unsafe {
            self.vertex_attrib_pointer_f32(
                attrib.index,
                attrib.components,
                glow::FLOAT,
                false,
                stride,
                attrib.offset,
            );
            self.enable_vertex_attrib_array(attrib.index);
        }
    }

    fn draw(&self, call: DrawCall) {
        unsafe {
            match call {
                DrawCall::Arrays { count } => self.draw_arrays(glow::TRIANGLES, 0, count),
                DrawCall::Elements { count } => {
                    self.draw_elements(glow::TRIANGLES, count, glow::UNSIGNED_INT, 0)
                }
            }
        }
    }

    fn alloc_texture(&self, image: &TextureImage) -> Result<glow::Texture, String> {
        unsafe {
            let texture = self.create_texture()?;
            HasContext::bind_texture(self, glow::TEXTURE_2D, Some(texture));
            self.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::REPEAT as i32);
            self.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::REPEAT as i32);
            self.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                glow::LINEAR_MIPMAP_LINEAR as i32,
            );
            self.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                glow::LINEAR as i32,
            );
            self.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA as i32,
                image.width as i32,
                image.height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(image.pixels.as_slice())),
            );
            self.generate_mipmap(glow::TEXTURE_2D);
            HasContext::bind_texture(self, glow::TEXTURE_2D, None);

            Ok(texture)
        }
    }

    fn bind_texture(&self, unit: u32, texture: Option<glow::Texture>) {
        unsafe {
            self.active_texture(glow::TEXTURE0 + unit);
            HasContext::bind_texture(self, glow::TEXTURE_2D, texture);
        }
    }

    fn release_texture(&self, texture: glow::Texture) {
        unsafe {
            self.delete_texture(texture);
        }
    }

    fn configure_pipeline(&self) {
        unsafe {
            self.enable(glow::DEPTH_TEST);
            self.enable(glow::CULL_FACE);
            self.cull_face(glow::BACK);
            self.front_face(glow::CCW);
            self.enable(glow::BLEND);
            self.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
            self.polygon_mode(glow::FRONT_AND_BACK, glow::FILL);
        }
    }

    fn set_viewport(&self, width: i32, height: i32) {
        unsafe {
            self.viewport(0, 0, width, height);
        }
    }

    fn clear_frame(&self, colour: Vec4) {
        unsafe {
            self.clear_color(colour.x, colour.y, colour.z, colour.w);
            self.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT | glow::STENCIL_BUFFER_BIT);
        }
    }
}
