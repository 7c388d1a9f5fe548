//! Image decoding for texture upload

use crate::assets::{AssetError, AssetSource};

/// Decoded image ready for GPU upload
#[derive(Debug, Clone)]
pub struct ImageData {
    /// Raw RGBA pixel data, rows top to bottom
    pub data: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl ImageData {
    /// Decode an encoded image (PNG or any other format `image` detects) into RGBA8
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| AssetError::InvalidData(format!("Failed to decode image: {e}")))?;

        let rgba_img = img.to_rgba8();
        let (width, height) = rgba_img.dimensions();
        if width == 0 || height == 0 {
            return Err(AssetError::InvalidData("image has zero size".to_string()));
        }

        log::debug!("Decoded image {}x{}", width, height);

        Ok(Self {
            data: rgba_img.into_raw(),
            width,
            height,
        })
    }

    /// Fetch `name.png` from `assets` and decode it
    pub fn load_png(assets: &dyn AssetSource, name: &str) -> Result<Self, AssetError> {
        let bytes = assets.load(name, "png")?;
        Self::from_bytes(&bytes)
    }

    /// Create a solid color image
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        let pixel_count = (width * height) as usize;
        Self {
            data: color.repeat(pixel_count),
            width,
            height,
        }
    }

    /// Encode as PNG
    pub fn to_png(&self) -> Result<Vec<u8>, AssetError> {
        let buffer = image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| AssetError::InvalidData("pixel data does not match dimensions".to_string()))?;

        let mut out = std::io::Cursor::new(Vec::new());
        buffer
            .write_to(&mut out, image::ImageFormat::Png)
            .map_err(|e| AssetError::LoadFailed(format!("Failed to encode PNG: {e}")))?;
        Ok(out.into_inner())
    }

    /// Size of the pixel data in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}
