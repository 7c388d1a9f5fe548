//! Untransformed background entities

use crate::assets::AssetSource;
use crate::backend::GpuContext;
use crate::foundation::math::Mat4;
use crate::render::{Drawable, Quad, Vertex};

/// Quad drawn directly with the projection-view matrix
#[derive(Debug)]
pub struct StaticQuad {
    quad: Quad,
}

impl StaticQuad {
    /// Describe a single-texture quad
    pub fn new(label: &'static str, vertices: Vec<Vertex>, texture: &'static str) -> Self {
        Self {
            quad: Quad::new(label, vertices, &[texture]),
        }
    }

    /// Shared quad core
    pub const fn quad(&self) -> &Quad {
        &self.quad
    }
}

impl Drawable for StaticQuad {
    fn setup(&mut self, gpu: &mut dyn GpuContext, assets: &dyn AssetSource) {
        self.quad.setup(gpu, assets);
    }

    fn draw(&self, gpu: &mut dyn GpuContext, projection_view: &Mat4) {
        self.quad.draw(gpu, projection_view);
    }

    fn release(&mut self, gpu: &mut dyn GpuContext) {
        self.quad.release(gpu);
    }

    fn is_ready(&self) -> bool {
        self.quad.is_ready()
    }
}
