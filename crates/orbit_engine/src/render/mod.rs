//! # Render Module
//!
//! Textured-quad rendering shared by every entity in the scene: vertex layout,
//! the single shader program, texture sets and the [`Drawable`] core that ties
//! them together.

pub mod quad;
pub mod shader;
pub mod texture;
pub mod vertex;

pub use quad::{Drawable, Quad};
pub use shader::ShaderProgram;
pub use texture::{load_texture, TextureSet};
pub use vertex::{Vertex, VertexAttribute};

use thiserror::Error;

use crate::assets::AssetError;
use crate::backend::ShaderStage;

/// Rendering errors
///
/// Every variant is recovered at entity setup: the error is logged and the
/// affected resource stays absent, so the rest of the scene keeps drawing.
#[derive(Error, Debug)]
pub enum RenderError {
    /// A texture asset could not be fetched or decoded
    #[error("Failed to load resource '{name}': {source}")]
    ResourceLoad {
        /// Logical asset name
        name: String,
        /// Underlying asset failure
        source: AssetError,
    },

    /// A shader stage failed to compile
    ///
    /// Carries the compiler info log, which may be empty on some drivers.
    #[error("Failed to compile {stage} shader: {log}")]
    ShaderCompile {
        /// Stage that failed
        stage: ShaderStage,
        /// Compiler info log
        log: String,
    },

    /// The program failed to link; carries the linker info log
    #[error("Failed to link shader program: {0}")]
    ShaderLink(String),

    /// A vertex buffer could not be created
    #[error("Failed to create vertex buffer: {0}")]
    BufferCreation(String),

    /// A GPU object other than a buffer could not be created
    #[error("Resource creation failed: {0}")]
    ResourceCreationFailed(String),
}

/// Result type for rendering operations
pub type RenderResult<T> = Result<T, RenderError>;
