//! # Backend Module
//!
//! The [`GpuContext`] trait the scene renders through, and its implementations:
//!
//! - **`GlesContext`**: OpenGL ES 2.0 via `glow`
//! - **`HeadlessGpu`**: driverless recorder for tests and simulation runs

pub mod gpu;
pub mod gles;
pub mod headless;

pub use gpu::{
    BackendResult, BufferHandle, ClearFlags, GpuContext, Primitive, ProgramHandle, ShaderHandle,
    ShaderStage, TextureHandle, UniformLocation,
};
pub use gles::GlesContext;
pub use headless::{DrawCall, FailurePlan, HeadlessGpu};
