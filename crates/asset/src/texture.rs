//! Texture decoding and the parallel batch loader for material textures.

use std::path::Path;

use anyhow::{Context, ensure};
use rayon::prelude::*;

use crate::material::Materials;

/// Texture data in CPU-friendly format before GPU upload.
#[derive(Clone, Debug, Default)]
pub struct TextureData {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
}

/// Supported texture formats.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum TextureFormat {
    #[default]
    Rgba8,
}

impl TextureData {
    /// Create a new texture with given dimensions and RGBA8 format.
    pub fn new_rgba8(width: u32, height: u32, data: Vec<u8>) -> anyhow::Result<Self> {
        let expected = byte_len(width, height, 4);
        ensure!(
            expected == Some(data.len()),
            "Data size {} doesn't match RGBA8 format for {}x{}",
            data.len(),
            width,
            height
        );
        Ok(Self {
            data,
            width,
            height,
            format: TextureFormat::Rgba8,
        })
    }

    /// 0x0 image standing in for a texture that failed to decode.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Decode any format the image codec understands, converted to RGBA8.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        log::debug!("Loading texture from {:?}", path);

        let img = image::open(path).with_context(|| format!("Failed to open image {:?}", path))?;

        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        let data = rgba.into_raw();

        log::debug!("Loaded texture {}x{} with {} bytes", width, height, data.len());

        Self::new_rgba8(width, height, data).with_context(|| format!("Bad image {:?}", path))
    }

    /// Get the number of bytes per pixel for the format.
    pub fn bytes_per_pixel(&self) -> u32 {
        match self.format {
            TextureFormat::Rgba8 => 4,
        }
    }

    /// Check if the texture data is valid. Placeholders are not.
    pub fn is_valid(&self) -> bool {
        let expected_size = byte_len(self.width, self.height, self.bytes_per_pixel());
        expected_size == Some(self.data.len()) && self.width > 0 && self.height > 0
    }
}

/// Size in bytes of a `width` x `height` image, `None` if it overflows.
fn byte_len(width: u32, height: u32, bytes_per_pixel: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(bytes_per_pixel as usize)
}

/// Decode every texture referenced by `materials`, in parallel.
///
/// The result is indexed by texture id. A texture that fails to decode is
/// logged and replaced by [`TextureData::empty`]; it never stops the others.
pub fn load_textures(materials: &Materials) -> Vec<TextureData> {
    let paths = materials.texture_paths();
    if paths.is_empty() {
        return Vec::new();
    }

    log::info!("Loading {} textures", paths.len());
    let images: Vec<TextureData> = paths
        .par_iter()
        .map(|path| {
            TextureData::load(path).unwrap_or_else(|err| {
                log::warn!("{err:#}");
                TextureData::empty()
            })
        })
        .collect();

    let failed = images.iter().filter(|img| !img.is_valid()).count();
    if failed > 0 {
        log::warn!("{} of {} textures failed to load", failed, images.len());
    }
    images
}
