//! # Moving Body
//!
//! A quad that travels diagonally inside a square and bounces off its edges.
//!
//! Both direction components flip together on a bounce, so the body stays on
//! one diagonal. Each bounce also flips the z-order, which decides whether the
//! body is drawn in front of or behind the earth.

use crate::assets::AssetSource;
use crate::backend::GpuContext;
use crate::core::config::MotionConfig;
use crate::foundation::math::{Mat4, Mat4Ext};
use crate::render::{Drawable, Quad, Vertex};

/// Discrete speed setting, a multiple of the configured minimum speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SpeedLevel {
    /// 1x
    #[default]
    Slow,
    /// 2x
    Medium,
    /// 3x
    Fast,
}

impl SpeedLevel {
    /// Level after this one, wrapping from `Fast` to `Slow`
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Slow => Self::Medium,
            Self::Medium => Self::Fast,
            Self::Fast => Self::Slow,
        }
    }

    /// 0, 1 or 2
    pub const fn index(self) -> usize {
        match self {
            Self::Slow => 0,
            Self::Medium => 1,
            Self::Fast => 2,
        }
    }

    /// Factor applied to the minimum speed
    pub const fn multiplier(self) -> f32 {
        match self {
            Self::Slow => 1.0,
            Self::Medium => 2.0,
            Self::Fast => 3.0,
        }
    }
}

/// Kinematic state of the moving body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovingBodyState {
    /// Position x
    pub x: f32,
    /// Position y
    pub y: f32,
    /// Direction x, always 1 or -1
    pub direction_x: i32,
    /// Direction y, always 1 or -1
    pub direction_y: i32,
    /// Speed setting
    pub speed: SpeedLevel,
    /// Positive when drawn in front of the earth
    pub z_order: i32,
    /// Whether `update` moves the body
    pub is_animating: bool,
    /// Number of bounces so far
    pub bounces: u32,
    motion: MotionConfig,
}

impl MovingBodyState {
    /// Starting state: configured position, heading (1, -1), slowest speed,
    /// in front, not animating
    pub const fn new(motion: MotionConfig) -> Self {
        Self {
            x: motion.start_x,
            y: motion.start_y,
            direction_x: 1,
            direction_y: -1,
            speed: SpeedLevel::Slow,
            z_order: 1,
            is_animating: false,
            bounces: 0,
            motion,
        }
    }

    /// Current speed in world units per second
    pub fn speed_value(&self) -> f32 {
        self.motion.min_speed * self.speed.multiplier()
    }

    /// Whether the position lies inside the bound on both axes
    pub fn in_bound(&self) -> bool {
        let bound = self.motion.bound;
        (-bound..=bound).contains(&self.x) && (-bound..=bound).contains(&self.y)
    }

    /// Advance by `dt` seconds if animating
    ///
    /// Leaving the bound on either axis flips both direction components and
    /// the z-order, then clamps both coordinates back onto the bound.
    pub fn update(&mut self, dt: f32) {
        if !self.is_animating {
            return;
        }

        let speed = self.speed_value();
        self.x += self.direction_x as f32 * speed * dt;
        self.y += self.direction_y as f32 * speed * dt;

        if !self.in_bound() {
            let bound = self.motion.bound;
            self.direction_x = -self.direction_x;
            self.direction_y = -self.direction_y;
            self.z_order = -self.z_order;
            self.x = self.x.clamp(-bound, bound);
            self.y = self.y.clamp(-bound, bound);
            self.bounces += 1;
        }
    }

    /// Reverse both direction components while in bound
    pub fn change_direction(&mut self) {
        if self.in_bound() {
            self.direction_x = -self.direction_x;
            self.direction_y = -self.direction_y;
        }
    }

    /// Step to the next speed level while in bound
    pub fn change_speed(&mut self) {
        if self.in_bound() {
            self.speed = self.speed.next();
        }
    }
}

/// Quad driven by a [`MovingBodyState`]
#[derive(Debug)]
pub struct MovingBody {
    quad: Quad,
    state: MovingBodyState,
}

impl MovingBody {
    /// Describe the body; state starts per [`MovingBodyState::new`]
    pub fn new(label: &'static str, vertices: Vec<Vertex>, texture: &'static str, motion: MotionConfig) -> Self {
        Self {
            quad: Quad::new(label, vertices, &[texture]),
            state: MovingBodyState::new(motion),
        }
    }

    /// Kinematic state
    pub const fn state(&self) -> &MovingBodyState {
        &self.state
    }

    /// Shared quad core
    pub const fn quad(&self) -> &Quad {
        &self.quad
    }

    /// Advance by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        let before = self.state.z_order;
        self.state.update(dt);
        if self.state.z_order != before {
            log::trace!("{} bounced at ({:.3}, {:.3})", self.quad.label(), self.state.x, self.state.y);
        }
    }

    /// Reverse direction while in bound
    pub fn change_direction(&mut self) {
        self.state.change_direction();
    }

    /// Step the speed level while in bound
    pub fn change_speed(&mut self) {
        self.state.change_speed();
    }

    /// Current speed level index (0, 1, 2)
    pub const fn speed_level(&self) -> usize {
        self.state.speed.index()
    }

    /// Current speed in world units per second
    pub fn speed(&self) -> f32 {
        self.state.speed_value()
    }

    /// Z-order sign
    pub const fn z_order(&self) -> i32 {
        self.state.z_order
    }

    /// Whether the body is moving
    pub const fn is_animating(&self) -> bool {
        self.state.is_animating
    }

    /// Flip the animating flag and return the new value
    pub fn toggle_animating(&mut self) -> bool {
        self.state.is_animating = !self.state.is_animating;
        self.state.is_animating
    }

    /// Translation to the current position
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::translation(self.state.x, self.state.y, 0.0)
    }
}

impl Drawable for MovingBody {
    fn setup(&mut self, gpu: &mut dyn GpuContext, assets: &dyn AssetSource) {
        self.quad.setup(gpu, assets);
    }

    fn draw(&self, gpu: &mut dyn GpuContext, projection_view: &Mat4) {
        self.quad.draw(gpu, &(projection_view * self.model_matrix()));
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
    use approx::assert_abs_diff_eq;

    fn animating() -> MovingBodyState {
        let mut state = MovingBodyState::new(MotionConfig::default());
        state.is_animating = true;
        state
    }

    #[test]
    fn test_initial_state() {
        let state = MovingBodyState::new(MotionConfig::default());
        assert_eq!((state.x, state.y), (0.4, -0.4));
        assert_eq!((state.direction_x, state.direction_y), (1, -1));
        assert_eq!(state.speed_value(), 0.20);
        assert_eq!(state.z_order, 1);
        assert!(!state.is_animating);
    }

    #[test]
    fn test_update_when_paused_changes_nothing() {
        let mut state = MovingBodyState::new(MotionConfig::default());
        let before = state;
        state.update(1.0);
        state.update(0.016);
        assert_eq!(state, before);
    }

    #[test]
    fn test_crossing_bound_clamps_and_flips() {
        let mut state = animating();
        state.x = 0.39;
        state.y = -0.39;
        state.update(0.1);

        assert_eq!(state.x, 0.4);
        assert_eq!(state.y, -0.4);
        assert_eq!((state.direction_x, state.direction_y), (-1, 1));
        assert_eq!(state.z_order, -1);
        assert_eq!(state.bounces, 1);
    }

    #[test]
    fn test_inside_bound_moves_diagonally() {
        let mut state = animating();
        state.direction_x = -1;
        state.direction_y = 1;
        state.update(0.5);
        assert_abs_diff_eq!(state.x, 0.3, epsilon = 1e-6);
        assert_abs_diff_eq!(state.y, -0.3, epsilon = 1e-6);
        assert_eq!(state.z_order, 1);
    }

    #[test]
    fn test_large_steps_flip_z_order_once_per_bounce() {
        let mut state = animating();
        for step in 1..=40 {
            let bounces = state.bounces;
            let z_order = state.z_order;
            state.update(1.0);
            assert!(state.in_bound(), "left bound at step {step}");
            assert!(state.bounces - bounces <= 1);
            if state.bounces > bounces {
                assert_eq!(state.z_order, -z_order);
            } else {
                assert_eq!(state.z_order, z_order);
            }
        }
        // first step overshoots the start corner immediately
        assert!(state.bounces >= 5);
    }

    #[test]
    fn test_change_speed_cycles() {
        let mut state = MovingBodyState::new(MotionConfig::default());
        let mut seen = Vec::new();
        for _ in 0..4 {
            state.change_speed();
            seen.push(state.speed_value());
        }
        assert_abs_diff_eq!(seen[0], 0.40, epsilon = 1e-6);
        assert_abs_diff_eq!(seen[1], 0.60, epsilon = 1e-6);
        assert_abs_diff_eq!(seen[2], 0.20, epsilon = 1e-6);
        assert_abs_diff_eq!(seen[3], 0.40, epsilon = 1e-6);
    }

    #[test]
    fn test_guard_blocks_changes_out_of_bound() {
        let mut state = MovingBodyState::new(MotionConfig::default());
        state.x = 0.5;
        state.change_speed();
        state.change_direction();
        assert_eq!(state.speed, SpeedLevel::Slow);
        assert_eq!((state.direction_x, state.direction_y), (1, -1));
    }

    #[test]
    fn test_change_direction_at_origin() {
        let mut state = MovingBodyState::new(MotionConfig::default());
        state.x = 0.0;
        state.y = 0.0;
        state.change_direction();
        assert_eq!((state.direction_x, state.direction_y), (-1, 1));
    }

    #[test]
    fn test_draw_translates_to_position() {
        use crate::assets::{ImageData, MemoryAssets};
        use crate::backend::HeadlessGpu;
        use crate::render::vertex::square_fan;

        let png = ImageData::solid_color(1, 1, [9, 9, 9, 255]).to_png().unwrap();
        let assets = MemoryAssets::new().with("moon", "png", png);
        let mut gpu = HeadlessGpu::new();
        let mut body = MovingBody::new("moon", square_fan(0.1), "moon", MotionConfig::default());
        body.setup(&mut gpu, &assets);
        assert!(body.is_ready());

        body.draw(&mut gpu, &Mat4::identity());
        let expected = Mat4::translation(0.4, -0.4, 0.0).to_column_array();
        assert_eq!(gpu.draws()[0].mvp, Some(expected));
        body.release(&mut gpu);
        assert_eq!(gpu.live_object_count(), 0);
    }

    #[test]
    fn test_speed_level_wraps() {
        assert_eq!(SpeedLevel::Fast.next(), SpeedLevel::Slow);
        assert_eq!(SpeedLevel::Medium.index(), 1);
    }
}
