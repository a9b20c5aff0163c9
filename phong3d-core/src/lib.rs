//! The core of the phong3d renderer. This crate contains everything needed to describe and
//! draw a lit, textured scene: geometry, GPU-backed render objects, the camera and the
//! frame loop driven by the client.
//!
//! Nothing here opens a window. GPU work goes through the [`gpu::Gpu`] trait, which
//! [`glow::Context`] implements.

pub mod abs;
pub mod camera;
pub mod config;
pub mod error;
pub mod geometry;
pub mod gpu;
pub mod input;
pub mod scene;
pub mod transform;

#[cfg(test)]
mod testutil;

pub use error::{Error, Result};
pub use scene::{Scene, SceneObject, ScenePhase};
