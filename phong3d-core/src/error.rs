//! Error types shared by every part of the renderer.

use std::path::PathBuf;

use crate::gpu::ShaderStage;

/// Everything that can go wrong while building or driving a scene.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A file (shader source, image) could not be read or decoded.
    #[error("failed to load `{}`: {reason}", path.display())]
    ResourceLoad { path: PathBuf, reason: String },

    /// A single shader stage was rejected by the compiler.
    #[error("{stage} shader failed to compile: {log}")]
    Compile { stage: ShaderStage, log: String },

    /// The compiled stages could not be linked into a program.
    #[error("shader program failed to link: {log}")]
    Link { log: String },

    /// Window, context or function loader creation failed.
    #[error("initialization failed: {0}")]
    Init(String),

    /// The GPU refused to allocate a buffer, vertex array or texture.
    #[error("gpu resource allocation failed: {0}")]
    GpuResource(String),

    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("unsupported shape `{0}`")]
    UnsupportedShape(String),

    #[error("no {kind} named `{name}` in the scene")]
    NotFound { kind: &'static str, name: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    /// A frame operation was attempted before `start` or after shutdown.
    #[error("the scene is not running")]
    NotRunning,
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn not_found(kind: &'static str, name: &str) -> Self {
        Error::NotFound {
            kind,
            name: name.to_string(),
        }
    }
}
