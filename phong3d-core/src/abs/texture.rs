//! Structs and functions for handling textures.
//!
//! The module provides the [`Texture`] struct which is a CPU representation of a GPU texture
//! bound to one texture unit for its whole life.

use std::{path::Path, sync::Arc};

use image::{DynamicImage, GenericImageView};

use crate::{
    error::{Error, Result},
    gpu::{Gpu, TextureImage},
};

/// Magenta and black, so a missing image is obvious on screen.
const PLACEHOLDER_PIXELS: [u8; 16] = [
    255, 0, 255, 255, 0, 0, 0, 255, //
    0, 0, 0, 255, 255, 0, 255, 255,
];

/// The binding target of a texture. Only 2D images are used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureTarget {
    Texture2D,
}

/// Converts a decoded image into tightly packed RGBA8 rows.
pub fn rgba_image(image: &DynamicImage) -> TextureImage {
    let (width, height) = image.dimensions();
    TextureImage {
        width,
        height,
        pixels: image.to_rgba8().into_raw(),
    }
}

/// Decodes the image file at `path`.
pub fn decode_file(path: &Path) -> Result<TextureImage> {
    let image = image::open(path).map_err(|e| Error::ResourceLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(rgba_image(&image))
}

pub fn placeholder_image() -> TextureImage {
    TextureImage {
        width: 2,
        height: 2,
        pixels: PLACEHOLDER_PIXELS.to_vec(),
    }
}

/// Represents a texture stored on the GPU side.
pub struct Texture<G: Gpu> {
    gl: Arc<G>,
    id: G::TextureHandle,
    width: u32,
    height: u32,
    unit: u32,
    placeholder: bool,
}

impl<G: Gpu> Texture<G> {
    /// Uploads `image` and assigns the texture to `unit`.
    pub fn new(gl: &Arc<G>, image: &TextureImage, unit: u32) -> Result<Self> {
        let id = gl.alloc_texture(image).map_err(Error::GpuResource)?;

        Ok(Self {
            gl: Arc::clone(gl),
            id,
            width: image.width,
            height: image.height,
            unit,
            placeholder: false,
        })
    }

    /// Decodes and uploads the image at `path`.
    pub fn load(gl: &Arc<G>, path: &Path, unit: u32) -> Result<Self> {
        let image = decode_file(path)?;
        let texture = Self::new(gl, &image, unit)?;
        log::debug!(
            "loaded texture {} ({}x{}) on unit {unit}",
            path.display(),
            texture.width,
            texture.height
        );
        Ok(texture)
    }

    /// Like [`Texture::load`], but an unreadable image becomes the placeholder.
    ///
    /// GPU allocation failures are still returned.
    pub fn load_or_placeholder(gl: &Arc<G>, path: &Path, unit: u32) -> Result<Self> {
        match decode_file(path) {
            Ok(image) => Self::new(gl, &image, unit),
            Err(err) => {
                log::warn!("{err}; using placeholder texture");
                Self::placeholder(gl, unit)
            }
        }
    }

    pub fn placeholder(gl: &Arc<G>, unit: u32) -> Result<Self> {
        let mut texture = Self::new(gl, &placeholder_image(), unit)?;
        texture.placeholder = true;
        Ok(texture)
    }

    /// Binds the texture to its texture unit.
    pub fn bind(&self) {
        self.gl.bind_texture(self.unit, Some(self.id));
    }

    /// Clears the binding of this texture's unit.
    pub fn unbind(&self) {
        self.gl.bind_texture(self.unit, None);
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn unit(&self) -> u32 {
        self.unit
    }

    pub fn target(&self) -> TextureTarget {
        TextureTarget::Texture2D
    }

    /// Whether the requested image failed to load and the placeholder stands in for it.
    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }

    pub fn handle(&self) -> G::TextureHandle {
        self.id
    }
}

impl<G: Gpu> Drop for Texture<G> {
    fn drop(&mut self) {
        self.gl.release_texture(self.id);
    }
}
