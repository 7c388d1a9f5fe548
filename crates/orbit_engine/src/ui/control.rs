//! Hit-testable control
//!
//! A textured quad at a fixed translation. Its world-space bound is taken
//! from the translated quad corners 0 and 2 once, during setup.

use crate::assets::AssetSource;
use crate::backend::GpuContext;
use crate::foundation::math::{Mat4, Mat4Ext, Point3};
use crate::input::hit_test::{screen_to_world, AxisAlignedBound};
use crate::input::touch::Viewport;
use crate::render::{Drawable, Quad, Vertex};

/// What a control does when tapped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlAction {
    /// Step the moving body to its next speed level
    CycleSpeed,
    /// Start or stop the animation
    TogglePlay,
    /// Reverse the moving body's direction
    ReverseDirection,
}

/// Textured button with a world-space hit bound
#[derive(Debug)]
pub struct Control {
    quad: Quad,
    translation: Mat4,
    bound: AxisAlignedBound,
    action: ControlAction,
}

impl Control {
    /// Describe a control translated to `(x, y)`
    pub fn new(
        label: &'static str,
        vertices: Vec<Vertex>,
        texture_names: &[&'static str],
        (x, y): (f32, f32),
        action: ControlAction,
    ) -> Self {
        Self {
            quad: Quad::new(label, vertices, texture_names),
            translation: Mat4::translation(x, y, 0.0),
            bound: AxisAlignedBound::default(),
            action,
        }
    }

    /// Action dispatched on a hit
    pub const fn action(&self) -> ControlAction {
        self.action
    }

    /// World-space bound computed at setup
    pub const fn bound(&self) -> AxisAlignedBound {
        self.bound
    }

    /// Fixed model translation
    pub const fn translation(&self) -> &Mat4 {
        &self.translation
    }

    /// Shared quad core
    pub const fn quad(&self) -> &Quad {
        &self.quad
    }

    /// Select the texture drawn; out-of-range indices are ignored
    pub fn set_current_image(&mut self, index: usize) {
        self.quad.textures_mut().select(index);
    }

    /// Index of the texture drawn
    pub const fn current_image(&self) -> usize {
        self.quad.textures().current_index()
    }

    fn compute_bound(&self) -> Option<AxisAlignedBound> {
        let vertices = self.quad.vertices();
        let (first, opposite) = (vertices.first()?, vertices.get(2)?);
        let to_world = |v: &Vertex| {
            self.translation
                .transform_point(&Point3::from(v.position))
                .coords
        };
        Some(AxisAlignedBound::from_corners(to_world(first), to_world(opposite)))
    }

    /// Whether a framebuffer pixel (origin top-left) falls on this control
    ///
    /// The touch is unprojected with an identity model-view; an unprojection
    /// failure counts as a miss.
    pub fn hit_test(&self, screen_x: f32, screen_y: f32, projection: &Mat4, viewport: &Viewport) -> bool {
        match screen_to_world(screen_x, screen_y, projection, viewport) {
            Ok(world) => self.bound.contains(world.x, world.y),
            Err(e) => {
                log::debug!("{}: touch not resolvable ({}), treating as miss", self.quad.label(), e);
                false
            }
        }
    }

    /// Draw at `projection_view x translation x scale(s, s, 1)`
    pub fn draw_scaled(&self, gpu: &mut dyn GpuContext, projection_view: &Mat4, scale: f32) {
        let mvp = projection_view * self.translation * Mat4::scaling(scale, scale, 1.0);
        self.quad.draw(gpu, &mvp);
    }
}

impl Drawable for Control {
    fn setup(&mut self, gpu: &mut dyn GpuContext, assets: &dyn AssetSource) {
        self.quad.setup(gpu, assets);
        match self.compute_bound() {
            Some(bound) => self.bound = bound,
            None => log::warn!("{}: fewer than three vertices, control cannot be hit", self.quad.label()),
        }
    }

    fn draw(&self, gpu: &mut dyn GpuContext, projection_view: &Mat4) {
        self.draw_scaled(gpu, projection_view, 1.0);
    }

    fn release(&mut self, gpu: &mut dyn GpuContext) {
        self.quad.release(gpu);
    }

    fn is_ready(&self) -> bool {
        self.quad.is_ready()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::MemoryAssets;
    use crate::backend::HeadlessGpu;
    use crate::foundation::math::project;
    use crate::render::vertex::{square_fan, square_triangles};
    use approx::assert_relative_eq;

    const VIEWPORT: Viewport = Viewport::new(0, 0, 750, 1334);

    fn projection() -> Mat4 {
        let aspect = VIEWPORT.aspect();
        Mat4::orthographic(-aspect, aspect, -1.0, 1.0, 3.0, 7.0)
    }

    fn set_up(vertices: Vec<Vertex>, at: (f32, f32)) -> (Control, HeadlessGpu) {
        let mut gpu = HeadlessGpu::new();
        let mut control = Control::new("button", vertices, &["a", "b"], at, ControlAction::TogglePlay);
        control.setup(&mut gpu, &MemoryAssets::new());
        (control, gpu)
    }

    fn to_screen(x: f32, y: f32) -> (f32, f32) {
        let window = project(
            crate::foundation::math::Vec3::new(x, y, 0.0),
            &Mat4::identity(),
            &projection(),
            &VIEWPORT,
        );
        (window.x, VIEWPORT.height as f32 - window.y)
    }

    #[test]
    fn test_bound_uses_translated_diagonal() {
        let (mut control, mut gpu) = set_up(square_fan(0.07), (0.0, -0.85));
        let bound = control.bound();
        assert_relative_eq!(bound.left, -0.07, epsilon = 1e-6);
        assert_relative_eq!(bound.top, -0.78, epsilon = 1e-6);
        assert_relative_eq!(bound.right, 0.07, epsilon = 1e-6);
        assert_relative_eq!(bound.bottom, -0.92, epsilon = 1e-6);
        control.release(&mut gpu);
    }

    #[test]
    fn test_hit_at_center_and_miss_outside() {
        for vertices in [square_fan(0.07), square_triangles(0.07)] {
            let (mut control, mut gpu) = set_up(vertices, (0.3, -0.85));
            let (sx, sy) = to_screen(0.3, -0.85);
            assert!(control.hit_test(sx, sy, &projection(), &VIEWPORT));

            let (sx, sy) = to_screen(0.3, 0.0);
            assert!(!control.hit_test(sx, sy, &projection(), &VIEWPORT));
            let (sx, sy) = to_screen(-0.3, -0.85);
            assert!(!control.hit_test(sx, sy, &projection(), &VIEWPORT));
            control.release(&mut gpu);
        }
    }

    #[test]
    fn test_unresolvable_touch_is_a_miss() {
        let (mut control, mut gpu) = set_up(square_fan(0.07), (0.0, 0.0));
        assert!(!control.hit_test(0.0, 0.0, &Mat4::zeros(), &VIEWPORT));
        assert!(!control.hit_test(0.0, 0.0, &projection(), &Viewport::default()));
        control.release(&mut gpu);
    }

    #[test]
    fn test_set_current_image_ignores_out_of_range() {
        let (mut control, mut gpu) = set_up(square_fan(0.07), (0.0, 0.0));
        control.set_current_image(1);
        control.set_current_image(2);
        assert_eq!(control.current_image(), 1);
        control.release(&mut gpu);
    }

    #[test]
    fn test_draw_composes_translation_and_scale() {
        let mut gpu = HeadlessGpu::new();
        let png = crate::assets::ImageData::solid_color(1, 1, [1, 2, 3, 4]).to_png().unwrap();
        let assets = MemoryAssets::new().with("a", "png", png);
        let mut control = Control::new("button", square_fan(0.07), &["a"], (0.5, -0.5), ControlAction::CycleSpeed);
        control.setup(&mut gpu, &assets);

        control.draw_scaled(&mut gpu, &Mat4::identity(), 2.0);
        let expected = Mat4::translation(0.5, -0.5, 0.0) * Mat4::scaling(2.0, 2.0, 1.0);
        assert_eq!(gpu.draws()[0].mvp, Some(expected.to_column_array()));
        control.release(&mut gpu);
    }
}
