//! Texture loading and per-entity texture sets

use crate::assets::{AssetSource, ImageData};
use crate::backend::{GpuContext, TextureHandle};
use crate::render::{RenderError, RenderResult};

/// Fetch `name.png`, decode it and upload it as an RGBA8 texture
pub fn load_texture(gpu: &mut dyn GpuContext, assets: &dyn AssetSource, name: &str) -> RenderResult<TextureHandle> {
    let image = ImageData::load_png(assets, name).map_err(|source| RenderError::ResourceLoad {
        name: name.to_string(),
        source,
    })?;

    let texture = gpu.create_texture()?;
    gpu.bind_texture_2d(Some(texture));
    gpu.upload_texture_rgba(image.width, image.height, &image.data);
    gpu.bind_texture_2d(None);

    log::debug!("Uploaded texture '{}' ({}x{})", name, image.width, image.height);
    Ok(texture)
}

/// Ordered texture slots with one selected for drawing
///
/// A slot is empty when its asset failed to load; indices of the other slots
/// are unaffected.
#[derive(Debug, Default)]
pub struct TextureSet {
    slots: Vec<Option<TextureHandle>>,
    current: usize,
}

impl TextureSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every named texture into its own slot, in order
    ///
    /// Failures are logged and leave the slot empty.
    pub fn load(gpu: &mut dyn GpuContext, assets: &dyn AssetSource, names: &[&str]) -> Self {
        let slots = names
            .iter()
            .map(|name| match load_texture(gpu, assets, name) {
                Ok(texture) => Some(texture),
                Err(e) => {
                    log::error!("Texture '{}' unavailable: {}", name, e);
                    None
                }
            })
            .collect();
        Self { slots, current: 0 }
    }

    /// Append a slot
    pub fn push(&mut self, texture: Option<TextureHandle>) {
        self.slots.push(texture);
    }

    /// Number of slots, loaded or not
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the set has no slots
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Select slot `index`; out-of-range indices are ignored
    pub fn select(&mut self, index: usize) {
        if index < self.slots.len() {
            self.current = index;
        }
    }

    /// Index of the selected slot
    pub const fn current_index(&self) -> usize {
        self.current
    }

    /// Texture in the selected slot, if it loaded
    pub fn current(&self) -> Option<TextureHandle> {
        self.slots.get(self.current).copied().flatten()
    }

    /// Number of slots holding a texture
    pub fn loaded_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Delete every loaded texture and empty the slots
    pub fn release(&mut self, gpu: &mut dyn GpuContext) {
        for texture in self.slots.iter_mut().filter_map(Option::take) {
            gpu.delete_texture(texture);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::MemoryAssets;
    use crate::backend::{FailurePlan, HeadlessGpu};

    fn png() -> Vec<u8> {
        ImageData::solid_color(2, 2, [255, 255, 255, 255]).to_png().unwrap()
    }

    #[test]
    fn test_missing_asset_leaves_empty_slot() {
        let mut gpu = HeadlessGpu::new();
        let assets = MemoryAssets::new().with("play", "png", png());

        let mut set = TextureSet::load(&mut gpu, &assets, &["play", "pause"]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.loaded_count(), 1);
        assert!(set.current().is_some());

        set.select(1);
        assert_eq!(set.current_index(), 1);
        assert!(set.current().is_none());

        set.release(&mut gpu);
        assert_eq!(gpu.live_object_count(), 0);
    }

    #[test]
    fn test_select_out_of_range_is_ignored() {
        let mut set = TextureSet::new();
        set.push(None);
        set.push(None);
        set.select(1);
        set.select(2);
        set.select(usize::MAX);
        assert_eq!(set.current_index(), 1);
    }

    #[test]
    fn test_release_twice_deletes_once() {
        let mut gpu = HeadlessGpu::new();
        let assets = MemoryAssets::new().with("earth", "png", png());
        let mut set = TextureSet::load(&mut gpu, &assets, &["earth"]);

        set.release(&mut gpu);
        set.release(&mut gpu);
        assert_eq!(gpu.invalid_delete_count(), 0);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_texture_creation_failure_is_reported() {
        let mut gpu = HeadlessGpu::with_failures(FailurePlan {
            texture: true,
            ..FailurePlan::default()
        });
        let assets = MemoryAssets::new().with("moon", "png", png());
        assert!(load_texture(&mut gpu, &assets, "moon").is_err());
    }

    #[test]
    fn test_undecodable_asset_is_resource_load_error() {
        let mut gpu = HeadlessGpu::new();
        let assets = MemoryAssets::new().with("moon", "png", b"garbage".to_vec());
        let err = load_texture(&mut gpu, &assets, "moon").unwrap_err();
        assert!(matches!(err, RenderError::ResourceLoad { ref name, .. } if name == "moon"));
        assert_eq!(gpu.live_object_count(), 0);
    }
}
