//! # GPU Context Abstraction
//!
//! The immediate-mode calls the scene issues, expressed as a trait so the core
//! can run against a real OpenGL ES 2.0 context ([`super::GlesContext`]) or a
//! recording stand-in ([`super::HeadlessGpu`]).
//!
//! Calls mirror their GL counterparts one to one. Object creation returns a
//! non-zero handle or an error; GL's zero "null" name never escapes this seam,
//! absence is an `Option` on the caller's side.

use std::num::NonZeroU32;

use bitflags::bitflags;

use crate::input::touch::Viewport;
use crate::render::RenderError;

/// Result type for backend operations
pub type BackendResult<T> = Result<T, RenderError>;

/// Handle to a vertex buffer object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferHandle(pub NonZeroU32);

/// Handle to a 2D texture object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub NonZeroU32);

/// Handle to a shader object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderHandle(pub NonZeroU32);

/// Handle to a linked program object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramHandle(pub NonZeroU32);

/// Location of a uniform inside a program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniformLocation(pub u32);

/// Shader pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex shader
    Vertex,
    /// Fragment shader
    Fragment,
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Vertex => write!(f, "vertex"),
            Self::Fragment => write!(f, "fragment"),
        }
    }
}

/// Primitive assembly mode for `draw_arrays`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    /// Independent triangles, three vertices each
    Triangles,
    /// Fan around the first vertex
    TriangleFan,
}

bitflags! {
    /// Buffers cleared by [`GpuContext::clear`]
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ClearFlags: u32 {
        /// Color buffer
        const COLOR = 0b01;
        /// Depth buffer
        const DEPTH = 0b10;
    }
}

/// Immediate-mode GPU calls used by the scene
///
/// All calls are synchronous and assume a single current context.
pub trait GpuContext {
    // --- shaders and programs ---

    /// `glCreateShader`
    fn create_shader(&mut self, stage: ShaderStage) -> BackendResult<ShaderHandle>;

    /// `glShaderSource` followed by `glCompileShader`
    fn compile_shader(&mut self, shader: ShaderHandle, source: &str);

    /// `GL_COMPILE_STATUS` of a shader
    fn shader_compile_status(&self, shader: ShaderHandle) -> bool;

    /// Compiler info log of a shader
    fn shader_info_log(&self, shader: ShaderHandle) -> String;

    /// `glDeleteShader`
    fn delete_shader(&mut self, shader: ShaderHandle);

    /// `glCreateProgram`
    fn create_program(&mut self) -> BackendResult<ProgramHandle>;

    /// `glAttachShader`
    fn attach_shader(&mut self, program: ProgramHandle, shader: ShaderHandle);

    /// `glDetachShader`
    fn detach_shader(&mut self, program: ProgramHandle, shader: ShaderHandle);

    /// `glBindAttribLocation`; must precede linking
    fn bind_attrib_location(&mut self, program: ProgramHandle, index: u32, name: &str);

    /// `glLinkProgram`
    fn link_program(&mut self, program: ProgramHandle);

    /// `GL_LINK_STATUS` of a program
    fn program_link_status(&self, program: ProgramHandle) -> bool;

    /// Linker info log of a program
    fn program_info_log(&self, program: ProgramHandle) -> String;

    /// `glDeleteProgram`
    fn delete_program(&mut self, program: ProgramHandle);

    /// `glGetUniformLocation`; `None` when the uniform is absent or optimized out
    fn uniform_location(&self, program: ProgramHandle, name: &str) -> Option<UniformLocation>;

    /// `glUseProgram`
    fn use_program(&mut self, program: Option<ProgramHandle>);

    /// `glUniform1i`
    fn uniform_1_i32(&mut self, location: Option<UniformLocation>, value: i32);

    /// `glUniformMatrix4fv` with a column-major matrix
    fn uniform_matrix_4(&mut self, location: Option<UniformLocation>, matrix: &[f32; 16]);

    // --- vertex buffers ---

    /// `glGenBuffers`
    fn create_buffer(&mut self) -> BackendResult<BufferHandle>;

    /// `glBindBuffer(GL_ARRAY_BUFFER, ..)`
    fn bind_array_buffer(&mut self, buffer: Option<BufferHandle>);

    /// `glBufferData(GL_ARRAY_BUFFER, .., GL_STATIC_DRAW)` into the bound buffer
    fn array_buffer_data(&mut self, data: &[u8]);

    /// `glDeleteBuffers`
    fn delete_buffer(&mut self, buffer: BufferHandle);

    /// `glEnableVertexAttribArray`
    fn enable_vertex_attrib_array(&mut self, index: u32);

    /// `glVertexAttribPointer` for non-normalized floats in the bound buffer
    fn vertex_attrib_pointer_f32(&mut self, index: u32, components: i32, stride: i32, offset: i32);

    // --- textures ---

    /// `glGenTextures`
    fn create_texture(&mut self) -> BackendResult<TextureHandle>;

    /// `glActiveTexture(GL_TEXTURE0 + unit)`
    fn active_texture(&mut self, unit: u32);

    /// `glBindTexture(GL_TEXTURE_2D, ..)`
    fn bind_texture_2d(&mut self, texture: Option<TextureHandle>);

    /// Upload tightly packed RGBA8 pixels to the bound texture with linear
    /// filtering and clamp-to-edge wrapping
    fn upload_texture_rgba(&mut self, width: u32, height: u32, pixels: &[u8]);

    /// `glDeleteTextures`
    fn delete_texture(&mut self, texture: TextureHandle);

    // --- frame state ---

    /// `glDrawArrays`
    fn draw_arrays(&mut self, primitive: Primitive, first: i32, count: i32);

    /// `glViewport`
    fn set_viewport(&mut self, viewport: Viewport);

    /// `glClearColor`
    fn clear_color(&mut self, rgba: [f32; 4]);

    /// `glClear`
    fn clear(&mut self, flags: ClearFlags);

    /// Enable `GL_BLEND` with `SRC_ALPHA, ONE_MINUS_SRC_ALPHA`
    fn enable_alpha_blending(&mut self);
}
