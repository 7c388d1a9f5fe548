//! # Textured Quad
//!
//! [`Quad`] is the core every scene entity composes: a vertex buffer, the
//! shared shader program and a [`TextureSet`]. Entities add their own
//! transform handling and implement [`Drawable`] on top of it.
//!
//! Setup failures never abort: each missing piece is logged and left absent,
//! and drawing an incomplete quad is a no-op.

use crate::assets::AssetSource;
use crate::backend::{BufferHandle, GpuContext, Primitive};
use crate::foundation::math::{Mat4, Mat4Ext};
use crate::render::shader::ShaderProgram;
use crate::render::texture::TextureSet;
use crate::render::vertex::Vertex;
use crate::render::RenderResult;

/// Something the scene can set up, draw and release
pub trait Drawable {
    /// Create GPU resources; failures are logged and leave the entity undrawable
    fn setup(&mut self, gpu: &mut dyn GpuContext, assets: &dyn AssetSource);

    /// Draw with the given projection-view matrix
    fn draw(&self, gpu: &mut dyn GpuContext, projection_view: &Mat4);

    /// Delete every GPU resource held; calling it again does nothing
    fn release(&mut self, gpu: &mut dyn GpuContext);

    /// Whether setup produced everything a draw needs
    fn is_ready(&self) -> bool;
}

/// Vertex buffer, program and textures of one entity
#[derive(Debug)]
pub struct Quad {
    label: &'static str,
    vertices: Vec<Vertex>,
    texture_names: Vec<&'static str>,
    buffer: Option<BufferHandle>,
    program: Option<ShaderProgram>,
    textures: TextureSet,
}

/// Assembly mode for a vertex count: four corners fan, anything else is a list
pub const fn primitive_for(vertex_count: usize) -> Primitive {
    if vertex_count == 4 {
        Primitive::TriangleFan
    } else {
        Primitive::Triangles
    }
}

fn upload_vertices(gpu: &mut dyn GpuContext, vertices: &[Vertex]) -> RenderResult<BufferHandle> {
    let buffer = gpu.create_buffer()?;
    gpu.bind_array_buffer(Some(buffer));
    gpu.array_buffer_data(bytemuck::cast_slice(vertices));
    gpu.bind_array_buffer(None);
    Ok(buffer)
}

impl Quad {
    /// Describe a quad; nothing touches the GPU until [`Quad::setup`]
    pub fn new(label: &'static str, vertices: Vec<Vertex>, texture_names: &[&'static str]) -> Self {
        Self {
            label,
            vertices,
            texture_names: texture_names.to_vec(),
            buffer: None,
            program: None,
            textures: TextureSet::new(),
        }
    }

    /// Name used in log messages
    pub const fn label(&self) -> &'static str {
        self.label
    }

    /// Model-space vertices
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Texture slots
    pub const fn textures(&self) -> &TextureSet {
        &self.textures
    }

    /// Mutable texture slots
    pub fn textures_mut(&mut self) -> &mut TextureSet {
        &mut self.textures
    }

    /// Build the program, upload the vertices and load the textures
    pub fn setup(&mut self, gpu: &mut dyn GpuContext, assets: &dyn AssetSource) {
        if self.holds_gpu_resources() {
            log::warn!("{}: setup called twice, releasing previous resources", self.label);
            self.release(gpu);
        }

        match ShaderProgram::build(gpu) {
            Ok(program) => self.program = Some(program),
            Err(e) => log::error!("{}: {}", self.label, e),
        }

        match upload_vertices(gpu, &self.vertices) {
            Ok(buffer) => self.buffer = Some(buffer),
            Err(e) => log::error!("{}: {}", self.label, e),
        }

        self.textures = TextureSet::load(gpu, assets, &self.texture_names);

        log::debug!(
            "{}: setup complete ({} vertices, {}/{} textures)",
            self.label,
            self.vertices.len(),
            self.textures.loaded_count(),
            self.texture_names.len()
        );
    }

    /// Whether buffer, program and current texture are all present
    pub fn is_ready(&self) -> bool {
        self.buffer.is_some() && self.program.is_some() && self.textures.current().is_some()
    }

    /// Whether any GPU handle is still held
    pub fn holds_gpu_resources(&self) -> bool {
        self.buffer.is_some() || self.program.is_some() || self.textures.loaded_count() > 0
    }

    /// Draw with a complete model-view-projection matrix
    pub fn draw(&self, gpu: &mut dyn GpuContext, mvp: &Mat4) {
        let (Some(buffer), Some(program), Some(texture)) =
            (self.buffer, self.program.as_ref(), self.textures.current())
        else {
            log::trace!("{}: incomplete, skipping draw", self.label);
            return;
        };

        gpu.bind_array_buffer(Some(buffer));
        for attribute in Vertex::ATTRIBUTES {
            gpu.enable_vertex_attrib_array(attribute.location);
            gpu.vertex_attrib_pointer_f32(attribute.location, attribute.components, Vertex::STRIDE, attribute.offset);
        }

        gpu.use_program(Some(program.handle()));

        gpu.active_texture(0);
        gpu.bind_texture_2d(Some(texture));
        gpu.uniform_1_i32(program.sampler_location(), 0);
        gpu.uniform_matrix_4(program.mvp_location(), &mvp.to_column_array());

        let count = i32::try_from(self.vertices.len()).unwrap_or(i32::MAX);
        gpu.draw_arrays(primitive_for(self.vertices.len()), 0, count);
    }

    /// Delete textures, buffer and program if present
    pub fn release(&mut self, gpu: &mut dyn GpuContext) {
        self.textures.release(gpu);
        if let Some(buffer) = self.buffer.take() {
            gpu.delete_buffer(buffer);
        }
        if let Some(program) = self.program.take() {
            program.release(gpu);
        }
    }
}

impl Drop for Quad {
    fn drop(&mut self) {
        if self.holds_gpu_resources() {
            log::warn!("{}: dropped while still holding GPU resources", self.label);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{ImageData, MemoryAssets};
    use crate::backend::{FailurePlan, HeadlessGpu};
    use crate::render::vertex::{square_fan, square_triangles};

    fn assets() -> MemoryAssets {
        let png = ImageData::solid_color(2, 2, [0, 0, 255, 255]).to_png().unwrap();
        MemoryAssets::new().with("earth", "png", png)
    }

    #[test]
    fn test_setup_draw_release() {
        let mut gpu = HeadlessGpu::new();
        let mut quad = Quad::new("earth", square_fan(0.3), &["earth"]);
        quad.setup(&mut gpu, &assets());
        assert!(quad.is_ready());

        let mvp = Mat4::translation(0.5, 0.0, 0.0);
        quad.draw(&mut gpu, &mvp);
        let draws = gpu.take_draws();
        assert_eq!(draws.len(), 1);
        assert_eq!(draws[0].primitive, Primitive::TriangleFan);
        assert_eq!(draws[0].count, 4);
        assert_eq!(draws[0].texture, quad.textures().current());
        assert_eq!(draws[0].mvp, Some(mvp.to_column_array()));

        quad.release(&mut gpu);
        quad.release(&mut gpu);
        assert!(!quad.holds_gpu_resources());
        assert_eq!(gpu.live_object_count(), 0);
        assert_eq!(gpu.invalid_delete_count(), 0);
    }

    #[test]
    fn test_six_vertices_draw_as_triangles() {
        let mut gpu = HeadlessGpu::new();
        let mut quad = Quad::new("earth", square_triangles(1.0), &["earth"]);
        quad.setup(&mut gpu, &assets());
        quad.draw(&mut gpu, &Mat4::identity());
        assert_eq!(gpu.draws()[0].primitive, Primitive::Triangles);
        assert_eq!(gpu.draws()[0].count, 6);
        quad.release(&mut gpu);
    }

    #[test]
    fn test_missing_texture_skips_draw() {
        let mut gpu = HeadlessGpu::new();
        let mut quad = Quad::new("moon", square_fan(0.1), &["moon"]);
        quad.setup(&mut gpu, &assets());
        assert!(!quad.is_ready());

        quad.draw(&mut gpu, &Mat4::identity());
        assert!(gpu.draws().is_empty());
        quad.release(&mut gpu);
        assert_eq!(gpu.live_object_count(), 0);
    }

    #[test]
    fn test_buffer_failure_keeps_other_resources() {
        let mut gpu = HeadlessGpu::with_failures(FailurePlan {
            buffer: true,
            ..FailurePlan::default()
        });
        let mut quad = Quad::new("earth", square_fan(0.3), &["earth"]);
        quad.setup(&mut gpu, &assets());
        assert!(!quad.is_ready());
        assert!(quad.holds_gpu_resources());

        quad.draw(&mut gpu, &Mat4::identity());
        assert!(gpu.draws().is_empty());
        quad.release(&mut gpu);
        assert_eq!(gpu.live_object_count(), 0);
    }

    #[test]
    fn test_second_setup_does_not_leak() {
        let mut gpu = HeadlessGpu::new();
        let mut quad = Quad::new("earth", square_fan(0.3), &["earth"]);
        quad.setup(&mut gpu, &assets());
        let live = gpu.live_object_count();
        quad.setup(&mut gpu, &assets());
        assert_eq!(gpu.live_object_count(), live);
        quad.release(&mut gpu);
    }

    #[test]
    fn test_primitive_for_count() {
        assert_eq!(primitive_for(4), Primitive::TriangleFan);
        assert_eq!(primitive_for(6), Primitive::Triangles);
    }
}
