use glam::Vec3;

use super::ShaderProgram;
use crate::gpu::Gpu;

/// Phong colours plus the texture units the shader samples for diffuse and specular maps.
///
/// A plain value; it owns no GPU resources.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    ambient: Vec3,
    diffuse: Vec3,
    specular: Vec3,
    diffuse_tex: i32,
    specular_tex: i32,
}

impl Material {
    pub fn new(ambient: Vec3, diffuse: Vec3, specular: Vec3, diffuse_tex: i32, specular_tex: i32) -> Self {
        Self {
            ambient,
            diffuse,
            specular,
            diffuse_tex,
            specular_tex,
        }
    }

    /// Writes the five `material.*` uniforms. Programs without a `material` block ignore them.
    pub fn send_to_shader<G: Gpu>(&self, program: &ShaderProgram<G>) {
        program.set_uniform("material.ambient", self.ambient);
        program.set_uniform("material.diffuse", self.diffuse);
        program.set_uniform("material.specular", self.specular);
        program.set_uniform("material.diffuse_tex", self.diffuse_tex);
        program.set_uniform("material.specular_tex", self.specular_tex);
    }

    pub fn ambient(&self) -> Vec3 {
        self.ambient
    }

    pub fn diffuse(&self) -> Vec3 {
        self.diffuse
    }

    pub fn specular(&self) -> Vec3 {
        self.specular
    }

    pub fn diffuse_tex(&self) -> i32 {
        self.diffuse_tex
    }

    pub fn specular_tex(&self) -> i32 {
        self.specular_tex
    }
}
