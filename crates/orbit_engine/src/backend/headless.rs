//! Headless GPU context
//!
//! Implements [`GpuContext`] without a driver: object creation hands out
//! sequential names, state changes are tracked, and every draw is recorded with
//! the state bound at the time. Failures can be injected per object kind to
//! exercise the error paths of setup code.

use std::collections::HashSet;
use std::num::NonZeroU32;

use super::gpu::{
    BackendResult, BufferHandle, ClearFlags, GpuContext, Primitive, ProgramHandle, ShaderHandle,
    ShaderStage, TextureHandle, UniformLocation,
};
use crate::input::touch::Viewport;
use crate::render::RenderError;

/// One recorded `draw_arrays` call and the state it saw
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    /// Assembly mode
    pub primitive: Primitive,
    /// Vertex count
    pub count: i32,
    /// Program in use
    pub program: Option<ProgramHandle>,
    /// Array buffer bound
    pub buffer: Option<BufferHandle>,
    /// Texture bound to unit 0
    pub texture: Option<TextureHandle>,
    /// Last matrix uploaded with `uniform_matrix_4`
    pub mvp: Option<[f32; 16]>,
}

/// Failures to inject into object creation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FailurePlan {
    /// Shader stage whose compilation reports failure
    pub compile: Option<ShaderStage>,
    /// Linking reports failure
    pub link: bool,
    /// `create_buffer` returns an error
    pub buffer: bool,
    /// `create_texture` returns an error
    pub texture: bool,
}

#[derive(Debug, Default)]
struct LiveObjects {
    shaders: HashSet<u32>,
    programs: HashSet<u32>,
    buffers: HashSet<u32>,
    textures: HashSet<u32>,
}

/// Recording implementation of [`GpuContext`]
#[derive(Debug, Default)]
pub struct HeadlessGpu {
    next_name: u32,
    live: LiveObjects,
    shader_stages: Vec<(u32, ShaderStage)>,
    failures: FailurePlan,

    bound_program: Option<ProgramHandle>,
    bound_buffer: Option<BufferHandle>,
    bound_texture: Option<TextureHandle>,
    last_matrix: Option<[f32; 16]>,

    draws: Vec<DrawCall>,
    uploaded_bytes: usize,
    invalid_deletes: usize,
    viewport: Option<Viewport>,
    clears: usize,
    blending: bool,
}

impl HeadlessGpu {
    /// Create a context where every call succeeds
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context that fails according to `plan`
    pub fn with_failures(plan: FailurePlan) -> Self {
        Self {
            failures: plan,
            ..Self::default()
        }
    }

    /// Replace the failure plan
    pub fn set_failures(&mut self, plan: FailurePlan) {
        self.failures = plan;
    }

    fn allocate(&mut self) -> NonZeroU32 {
        self.next_name += 1;
        NonZeroU32::new(self.next_name).unwrap_or(NonZeroU32::MIN)
    }

    fn release(set: &mut HashSet<u32>, name: NonZeroU32, invalid: &mut usize, kind: &str) {
        if !set.remove(&name.get()) {
            log::warn!("Headless GPU: delete of unknown {kind} {name}");
            *invalid += 1;
        }
    }

    /// Draw calls recorded since creation or the last [`HeadlessGpu::take_draws`]
    pub fn draws(&self) -> &[DrawCall] {
        &self.draws
    }

    /// Drain the recorded draw calls
    pub fn take_draws(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.draws)
    }

    /// Number of GPU objects created and not yet deleted
    pub fn live_object_count(&self) -> usize {
        self.live.shaders.len() + self.live.programs.len() + self.live.buffers.len() + self.live.textures.len()
    }

    /// Number of live textures
    pub fn live_texture_count(&self) -> usize {
        self.live.textures.len()
    }

    /// Number of live programs
    pub fn live_program_count(&self) -> usize {
        self.live.programs.len()
    }

    /// Number of live shader objects
    pub fn live_shader_count(&self) -> usize {
        self.live.shaders.len()
    }

    /// Number of live buffers
    pub fn live_buffer_count(&self) -> usize {
        self.live.buffers.len()
    }

    /// Deletes of names that were never created or already deleted
    pub const fn invalid_delete_count(&self) -> usize {
        self.invalid_deletes
    }

    /// Total bytes uploaded through `array_buffer_data` and texture uploads
    pub const fn uploaded_bytes(&self) -> usize {
        self.uploaded_bytes
    }

    /// Last viewport set
    pub const fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// Number of `clear` calls
    pub const fn clear_count(&self) -> usize {
        self.clears
    }

    /// Whether alpha blending was enabled
    pub const fn blending_enabled(&self) -> bool {
        self.blending
    }
}

impl GpuContext for HeadlessGpu {
    fn create_shader(&mut self, stage: ShaderStage) -> BackendResult<ShaderHandle> {
        let name = self.allocate();
        self.live.shaders.insert(name.get());
        self.shader_stages.push((name.get(), stage));
        Ok(ShaderHandle(name))
    }

    fn compile_shader(&mut self, _shader: ShaderHandle, _source: &str) {}

    fn shader_compile_status(&self, shader: ShaderHandle) -> bool {
        let stage = self
            .shader_stages
            .iter()
            .find(|(name, _)| *name == shader.0.get())
            .map(|(_, stage)| *stage);
        stage.is_none() || stage != self.failures.compile
    }

    fn shader_info_log(&self, shader: ShaderHandle) -> String {
        if self.shader_compile_status(shader) {
            String::new()
        } else {
            "ERROR: 0:1: injected compile failure".to_string()
        }
    }

    fn delete_shader(&mut self, shader: ShaderHandle) {
        Self::release(&mut self.live.shaders, shader.0, &mut self.invalid_deletes, "shader");
    }

    fn create_program(&mut self) -> BackendResult<ProgramHandle> {
        let name = self.allocate();
        self.live.programs.insert(name.get());
        Ok(ProgramHandle(name))
    }

    fn attach_shader(&mut self, _program: ProgramHandle, _shader: ShaderHandle) {}

    fn detach_shader(&mut self, _program: ProgramHandle, _shader: ShaderHandle) {}

    fn bind_attrib_location(&mut self, _program: ProgramHandle, _index: u32, _name: &str) {}

    fn link_program(&mut self, _program: ProgramHandle) {}

    fn program_link_status(&self, _program: ProgramHandle) -> bool {
        !self.failures.link
    }

    fn program_info_log(&self, _program: ProgramHandle) -> String {
        if self.failures.link {
            "error: injected link failure".to_string()
        } else {
            String::new()
        }
    }

    fn delete_program(&mut self, program: ProgramHandle) {
        if self.bound_program == Some(program) {
            self.bound_program = None;
        }
        Self::release(&mut self.live.programs, program.0, &mut self.invalid_deletes, "program");
    }

    fn uniform_location(&self, program: ProgramHandle, name: &str) -> Option<UniformLocation> {
        if !self.live.programs.contains(&program.0.get()) {
            return None;
        }
        match name {
            "uMVPMatrix" => Some(UniformLocation(0)),
            "sTexture" => Some(UniformLocation(1)),
            _ => None,
        }
    }

    fn use_program(&mut self, program: Option<ProgramHandle>) {
        self.bound_program = program;
    }

    fn uniform_1_i32(&mut self, _location: Option<UniformLocation>, _value: i32) {}

    fn uniform_matrix_4(&mut self, location: Option<UniformLocation>, matrix: &[f32; 16]) {
        if location.is_some() {
            self.last_matrix = Some(*matrix);
        }
    }

    fn create_buffer(&mut self) -> BackendResult<BufferHandle> {
        if self.failures.buffer {
            return Err(RenderError::BufferCreation("injected buffer failure".to_string()));
        }
        let name = self.allocate();
        self.live.buffers.insert(name.get());
        Ok(BufferHandle(name))
    }

    fn bind_array_buffer(&mut self, buffer: Option<BufferHandle>) {
        self.bound_buffer = buffer;
    }

    fn array_buffer_data(&mut self, data: &[u8]) {
        self.uploaded_bytes += data.len();
    }

    fn delete_buffer(&mut self, buffer: BufferHandle) {
        if self.bound_buffer == Some(buffer) {
            self.bound_buffer = None;
        }
        Self::release(&mut self.live.buffers, buffer.0, &mut self.invalid_deletes, "buffer");
    }

    fn enable_vertex_attrib_array(&mut self, _index: u32) {}

    fn vertex_attrib_pointer_f32(&mut self, _index: u32, _components: i32, _stride: i32, _offset: i32) {}

    fn create_texture(&mut self) -> BackendResult<TextureHandle> {
        if self.failures.texture {
            return Err(RenderError::ResourceCreationFailed("injected texture failure".to_string()));
        }
        let name = self.allocate();
        self.live.textures.insert(name.get());
        Ok(TextureHandle(name))
    }

    fn active_texture(&mut self, _unit: u32) {}

    fn bind_texture_2d(&mut self, texture: Option<TextureHandle>) {
        self.bound_texture = texture;
    }

    fn upload_texture_rgba(&mut self, _width: u32, _height: u32, pixels: &[u8]) {
        self.uploaded_bytes += pixels.len();
    }

    fn delete_texture(&mut self, texture: TextureHandle) {
        if self.bound_texture == Some(texture) {
            self.bound_texture = None;
        }
        Self::release(&mut self.live.textures, texture.0, &mut self.invalid_deletes, "texture");
    }

    fn draw_arrays(&mut self, primitive: Primitive, _first: i32, count: i32) {
        self.draws.push(DrawCall {
            primitive,
            count,
            program: self.bound_program,
            buffer: self.bound_buffer,
            texture: self.bound_texture,
            mvp: self.last_matrix,
        });
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
    }

    fn clear_color(&mut self, _rgba: [f32; 4]) {}

    fn clear(&mut self, _flags: ClearFlags) {
        self.clears += 1;
    }

    fn enable_alpha_blending(&mut self) {
        self.blending = true;
    }
}
