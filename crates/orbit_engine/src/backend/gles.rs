//! OpenGL ES 2.0 backend built on `glow`
//!
//! Every method is a thin wrapper over one GL entry point. The context must be
//! current on the calling thread for the lifetime of this value.
#![allow(unsafe_code)]

use glow::HasContext;

use super::gpu::{
    BackendResult, BufferHandle, ClearFlags, GpuContext, Primitive, ProgramHandle, ShaderHandle,
    ShaderStage, TextureHandle, UniformLocation,
};
use crate::input::touch::Viewport;
use crate::render::RenderError;

/// OpenGL ES 2.0 implementation of [`GpuContext`]
pub struct GlesContext {
    gl: glow::Context,
}

impl GlesContext {
    /// Wrap an already-loaded `glow` context
    pub fn new(gl: glow::Context) -> Self {
        log::info!("GL ES context ready");
        Self { gl }
    }

    /// Borrow the underlying `glow` context
    pub const fn gl(&self) -> &glow::Context {
        &self.gl
    }
}

fn gl_size(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

const fn shader(handle: ShaderHandle) -> glow::NativeShader {
    glow::NativeShader(handle.0)
}

const fn program(handle: ProgramHandle) -> glow::NativeProgram {
    glow::NativeProgram(handle.0)
}

const fn buffer(handle: BufferHandle) -> glow::NativeBuffer {
    glow::NativeBuffer(handle.0)
}

const fn texture(handle: TextureHandle) -> glow::NativeTexture {
    glow::NativeTexture(handle.0)
}

impl GpuContext for GlesContext {
    fn create_shader(&mut self, stage: ShaderStage) -> BackendResult<ShaderHandle> {
        let kind = match stage {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        };
        unsafe { self.gl.create_shader(kind) }
            .map(|s| ShaderHandle(s.0))
            .map_err(|e| RenderError::ResourceCreationFailed(format!("{stage} shader: {e}")))
    }

    fn compile_shader(&mut self, handle: ShaderHandle, source: &str) {
        unsafe {
            self.gl.shader_source(shader(handle), source);
            self.gl.compile_shader(shader(handle));
        }
    }

    fn shader_compile_status(&self, handle: ShaderHandle) -> bool {
        unsafe { self.gl.get_shader_compile_status(shader(handle)) }
    }

    fn shader_info_log(&self, handle: ShaderHandle) -> String {
        unsafe { self.gl.get_shader_info_log(shader(handle)) }
    }

    fn delete_shader(&mut self, handle: ShaderHandle) {
        unsafe { self.gl.delete_shader(shader(handle)) }
    }

    fn create_program(&mut self) -> BackendResult<ProgramHandle> {
        unsafe { self.gl.create_program() }
            .map(|p| ProgramHandle(p.0))
            .map_err(|e| RenderError::ResourceCreationFailed(format!("program: {e}")))
    }

    fn attach_shader(&mut self, prog: ProgramHandle, handle: ShaderHandle) {
        unsafe { self.gl.attach_shader(program(prog), shader(handle)) }
    }

    fn detach_shader(&mut self, prog: ProgramHandle, handle: ShaderHandle) {
        unsafe { self.gl.detach_shader(program(prog), shader(handle)) }
    }

    fn bind_attrib_location(&mut self, prog: ProgramHandle, index: u32, name: &str) {
        unsafe { self.gl.bind_attrib_location(program(prog), index, name) }
    }

    fn link_program(&mut self, prog: ProgramHandle) {
        unsafe { self.gl.link_program(program(prog)) }
    }

    fn program_link_status(&self, prog: ProgramHandle) -> bool {
        unsafe { self.gl.get_program_link_status(program(prog)) }
    }

    fn program_info_log(&self, prog: ProgramHandle) -> String {
        unsafe { self.gl.get_program_info_log(program(prog)) }
    }

    fn delete_program(&mut self, prog: ProgramHandle) {
        unsafe { self.gl.delete_program(program(prog)) }
    }

    fn uniform_location(&self, prog: ProgramHandle, name: &str) -> Option<UniformLocation> {
        unsafe { self.gl.get_uniform_location(program(prog), name) }.map(|l| UniformLocation(l.0))
    }

    fn use_program(&mut self, prog: Option<ProgramHandle>) {
        unsafe { self.gl.use_program(prog.map(program)) }
    }

    fn uniform_1_i32(&mut self, location: Option<UniformLocation>, value: i32) {
        let location = location.map(|l| glow::NativeUniformLocation(l.0));
        unsafe { self.gl.uniform_1_i32(location.as_ref(), value) }
    }

    fn uniform_matrix_4(&mut self, location: Option<UniformLocation>, matrix: &[f32; 16]) {
        let location = location.map(|l| glow::NativeUniformLocation(l.0));
        unsafe { self.gl.uniform_matrix_4_f32_slice(location.as_ref(), false, matrix) }
    }

    fn create_buffer(&mut self) -> BackendResult<BufferHandle> {
        unsafe { self.gl.create_buffer() }
            .map(|b| BufferHandle(b.0))
            .map_err(RenderError::BufferCreation)
    }

    fn bind_array_buffer(&mut self, handle: Option<BufferHandle>) {
        unsafe { self.gl.bind_buffer(glow::ARRAY_BUFFER, handle.map(buffer)) }
    }

    fn array_buffer_data(&mut self, data: &[u8]) {
        unsafe { self.gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, data, glow::STATIC_DRAW) }
    }

    fn delete_buffer(&mut self, handle: BufferHandle) {
        unsafe { self.gl.delete_buffer(buffer(handle)) }
    }

    fn enable_vertex_attrib_array(&mut self, index: u32) {
        unsafe { self.gl.enable_vertex_attrib_array(index) }
    }

    fn vertex_attrib_pointer_f32(&mut self, index: u32, components: i32, stride: i32, offset: i32) {
        unsafe {
            self.gl
                .vertex_attrib_pointer_f32(index, components, glow::FLOAT, false, stride, offset);
        }
    }

    fn create_texture(&mut self) -> BackendResult<TextureHandle> {
        unsafe { self.gl.create_texture() }
            .map(|t| TextureHandle(t.0))
            .map_err(|e| RenderError::ResourceCreationFailed(format!("texture: {e}")))
    }

    fn active_texture(&mut self, unit: u32) {
        unsafe { self.gl.active_texture(glow::TEXTURE0 + unit) }
    }

    fn bind_texture_2d(&mut self, handle: Option<TextureHandle>) {
        unsafe { self.gl.bind_texture(glow::TEXTURE_2D, handle.map(texture)) }
    }

    #[allow(clippy::cast_possible_wrap)]
    fn upload_texture_rgba(&mut self, width: u32, height: u32, pixels: &[u8]) {
        unsafe {
            self.gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA as i32,
                gl_size(width),
                gl_size(height),
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                Some(pixels),
            );
            // ES 2.0 only samples non-power-of-two textures with these settings
            self.gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, glow::LINEAR as i32);
            self.gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);
            self.gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::CLAMP_TO_EDGE as i32);
            self.gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::CLAMP_TO_EDGE as i32);
        }
    }

    fn delete_texture(&mut self, handle: TextureHandle) {
        unsafe { self.gl.delete_texture(texture(handle)) }
    }

    fn draw_arrays(&mut self, primitive: Primitive, first: i32, count: i32) {
        let mode = match primitive {
            Primitive::Triangles => glow::TRIANGLES,
            Primitive::TriangleFan => glow::TRIANGLE_FAN,
        };
        unsafe { self.gl.draw_arrays(mode, first, count) }
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        unsafe {
            self.gl
                .viewport(viewport.x, viewport.y, viewport.width, viewport.height);
        }
    }

    fn clear_color(&mut self, rgba: [f32; 4]) {
        unsafe { self.gl.clear_color(rgba[0], rgba[1], rgba[2], rgba[3]) }
    }

    fn clear(&mut self, flags: ClearFlags) {
        let mut mask = 0;
        if flags.contains(ClearFlags::COLOR) {
            mask |= glow::COLOR_BUFFER_BIT;
        }
        if flags.contains(ClearFlags::DEPTH) {
            mask |= glow::DEPTH_BUFFER_BIT;
        }
        unsafe { self.gl.clear(mask) }
    }

    fn enable_alpha_blending(&mut self) {
        unsafe {
            self.gl.enable(glow::BLEND);
            self.gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
        }
    }
}
