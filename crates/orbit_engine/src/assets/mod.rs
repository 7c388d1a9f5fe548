//! Asset lookup
//!
//! Entities ask for textures by logical name and kind (`"stars"`, `"png"`);
//! an [`AssetSource`] resolves that pair to raw bytes. Absence is an error for
//! the asking entity only.

pub mod image_loader;

pub use image_loader::ImageData;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// Asset not found
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// Failed to load asset
    #[error("Failed to load asset: {0}")]
    LoadFailed(String),

    /// Invalid asset data
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Unsupported asset format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// IO error during asset loading
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Source of named asset bytes
pub trait AssetSource {
    /// Fetch the bytes of asset `name` with extension `kind`
    fn load(&self, name: &str, kind: &str) -> Result<Vec<u8>, AssetError>;
}

/// Assets stored as `<root>/<name>.<kind>` files
#[derive(Debug, Clone)]
pub struct DirectoryAssets {
    root: PathBuf,
}

impl DirectoryAssets {
    /// Serve files from `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory assets are read from
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_of(&self, name: &str, kind: &str) -> PathBuf {
        self.root.join(format!("{name}.{kind}"))
    }
}

impl AssetSource for DirectoryAssets {
    fn load(&self, name: &str, kind: &str) -> Result<Vec<u8>, AssetError> {
        let path = self.path_of(name, kind);
        if !path.is_file() {
            return Err(AssetError::NotFound(path.display().to_string()));
        }
        log::debug!("Reading asset {:?}", path);
        Ok(std::fs::read(&path)?)
    }
}

/// Assets held in memory, keyed by `name.kind`
#[derive(Debug, Clone, Default)]
pub struct MemoryAssets {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryAssets {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an asset
    pub fn insert(&mut self, name: &str, kind: &str, bytes: Vec<u8>) {
        self.entries.insert(format!("{name}.{kind}"), bytes);
    }

    /// Builder-style [`MemoryAssets::insert`]
    #[must_use]
    pub fn with(mut self, name: &str, kind: &str, bytes: Vec<u8>) -> Self {
        self.insert(name, kind, bytes);
        self
    }

    /// Remove an asset, returning whether it was present
    pub fn remove(&mut self, name: &str, kind: &str) -> bool {
        self.entries.remove(&format!("{name}.{kind}")).is_some()
    }

    /// Number of stored assets
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl AssetSource for MemoryAssets {
    fn load(&self, name: &str, kind: &str) -> Result<Vec<u8>, AssetError> {
        let key = format!("{name}.{kind}");
        self.entries
            .get(&key)
            .cloned()
            .ok_or(AssetError::NotFound(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_assets_lookup() {
        let assets = MemoryAssets::new().with("earth", "png", vec![1, 2, 3]);
        assert_eq!(assets.load("earth", "png").unwrap(), vec![1, 2, 3]);
        assert!(matches!(assets.load("earth", "jpg"), Err(AssetError::NotFound(_))));
        assert!(matches!(assets.load("moon", "png"), Err(AssetError::NotFound(_))));
    }

    #[test]
    fn test_memory_assets_remove() {
        let mut assets = MemoryAssets::new().with("moon", "png", vec![0]);
        assert!(assets.remove("moon", "png"));
        assert!(!assets.remove("moon", "png"));
        assert!(assets.is_empty());
    }

    #[test]
    fn test_directory_assets_reads_files() {
        let root = std::env::temp_dir().join(format!("orbit_assets_{}", std::process::id()));
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(root.join("stars.png"), b"not really a png").unwrap();

        let assets = DirectoryAssets::new(&root);
        assert_eq!(assets.load("stars", "png").unwrap(), b"not really a png");
        assert!(matches!(assets.load("earth", "png"), Err(AssetError::NotFound(_))));

        std::fs::remove_dir_all(&root).unwrap();
    }
}
