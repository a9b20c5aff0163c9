//! OpenGL Shaders
//!
//! This module defines the [`Shader`] and [`ShaderProgram`] structs for managing shader
//! stages and linked programs. Uniforms are written by name through the [`Uniform`] trait.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{
    error::{Error, Result},
    gpu::{Gpu, ShaderStage, Uniform},
};

/// Represents an individual compiled shader stage.
pub struct Shader<G: Gpu> {
    gl: Arc<G>,
    id: G::ShaderHandle,
}

impl<G: Gpu> Shader<G> {
    /// Compiles a new shader stage from the given source code.
    pub fn new(gl: &Arc<G>, stage: ShaderStage, source: &str) -> Result<Self> {
        let id = gl
            .compile_stage(stage, source)
            .map_err(|log| Error::Compile { stage, log })?;

        Ok(Self {
            gl: Arc::clone(gl),
            id,
        })
    }

    /// Reads `path` and compiles it as `stage`.
    pub fn from_file(gl: &Arc<G>, stage: ShaderStage, path: &Path) -> Result<Self> {
        let source = load_source(path)?;
        Self::new(gl, stage, &source).inspect_err(|_| {
            log::error!("could not compile {stage} shader {}", path.display());
        })
    }
}

impl<G: Gpu> Drop for Shader<G> {
    fn drop(&mut self) {
        self.gl.release_stage(self.id);
    }
}

/// Reads a shader source file line by line, terminating every line with `\n`.
pub fn load_source(path: &Path) -> Result<String> {
    let text = std::fs::read_to_string(path).map_err(|e| Error::ResourceLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    Ok(text.lines().fold(String::with_capacity(text.len() + 1), |mut src, line| {
        src.push_str(line);
        src.push('\n');
        src
    }))
}

/// Paths of the source files making up one program.
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderFiles {
    pub vertex: PathBuf,
    pub geometry: Option<PathBuf>,
    pub fragment: PathBuf,
}

impl ShaderFiles {
    pub fn new(vertex: impl Into<PathBuf>, fragment: impl Into<PathBuf>) -> Self {
        Self {
            vertex: vertex.into(),
            geometry: None,
            fragment: fragment.into(),
        }
    }

    pub fn with_geometry(mut self, geometry: impl Into<PathBuf>) -> Self {
        self.geometry = Some(geometry.into());
        self
    }

    /// Stages in link order: vertex, geometry, fragment.
    fn stages(&self) -> Vec<(ShaderStage, &Path)> {
        let mut stages = vec![(ShaderStage::Vertex, self.vertex.as_path())];
        if let Some(geometry) = &self.geometry {
            stages.push((ShaderStage::Geometry, geometry.as_path()));
        }
        stages.push((ShaderStage::Fragment, self.fragment.as_path()));
        stages
    }
}

/// Represents a linked shader program.
///
/// A program only exists once every stage compiled and the link succeeded, so anything
/// holding one can draw with it.
pub struct ShaderProgram<G: Gpu> {
    gl: Arc<G>,
    id: G::ProgramHandle,
}

impl<G: Gpu> ShaderProgram<G> {
    /// Links a new shader program from the given shaders.
    pub fn new(gl: &Arc<G>, shaders: &[&Shader<G>]) -> Result<Self> {
        let ids: Vec<G::ShaderHandle> = shaders.iter().map(|shader| shader.id).collect();
        let id = gl.link_stages(&ids).map_err(|log| Error::Link { log })?;

        Ok(Self {
            gl: Arc::clone(gl),
            id,
        })
    }

    /// Loads, compiles and links the given files. The stage objects are released once linked.
    pub fn from_files(gl: &Arc<G>, files: &ShaderFiles) -> Result<Self> {
        let shaders = files
            .stages()
            .into_iter()
            .map(|(stage, path)| Shader::from_file(gl, stage, path))
            .collect::<Result<Vec<_>>>()?;
        let refs: Vec<&Shader<G>> = shaders.iter().collect();

        let program = Self::new(gl, &refs).inspect_err(|_| {
            log::error!(
                "could not link program from {}",
                files.vertex.display()
            );
        })?;
        log::debug!("linked shader program {:?}", program.id);
        Ok(program)
    }

    /// Makes this the current program.
    pub fn use_program(&self) {
        self.gl.bind_program(Some(self.id));
    }

    /// Clears the current program.
    pub fn unuse(&self) {
        self.gl.bind_program(None);
    }

    /// Sets a uniform variable in the shader program.
    ///
    /// The program is made current for the write and cleared afterwards, so callers cannot
    /// rely on it staying current. Names the program does not declare are ignored.
    pub fn set_uniform<T: Uniform>(&self, name: &str, value: T) {
        self.use_program();
        self.gl.write_uniform(self.id, name, value.to_uniform());
        self.unuse();
    }

    pub fn handle(&self) -> G::ProgramHandle {
        self.id
    }
}

impl<G: Gpu> Drop for ShaderProgram<G> {
    fn drop(&mut self) {
        self.gl.release_program(self.id);
    }
}
