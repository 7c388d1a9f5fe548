//! # Scene Driver
//!
//! Owns the camera and the fixed entity set, advances the moving body each
//! frame, draws everything in a fixed order and turns touches into control
//! actions.
//!
//! ## Lifecycle
//!
//! ```text
//! new -> setup -> (update, draw, handle_touch)* -> teardown
//! ```
//!
//! `teardown` may be called any number of times; only the first releases GPU
//! resources. A torn-down driver can be set up again.
//!
//! ## Draw order
//!
//! Stars first, then earth and moon in z-order (earth first while the moon's
//! z-order is positive), then the speed, play and direction buttons.

use crate::assets::AssetSource;
use crate::backend::{ClearFlags, GpuContext};
use crate::core::config::{ApplicationConfig, PulseConfig};
use crate::foundation::math::{Mat4, Mat4Ext, Vec3};
use crate::foundation::time::FrameTime;
use crate::input::touch::{TouchEvent, Viewport};
use crate::render::Drawable;
use crate::scene::layout;
use crate::scene::moving_body::MovingBody;
use crate::scene::static_quad::StaticQuad;
use crate::ui::control::{Control, ControlAction};
use crate::ui::pulse::pulse_scale;

const CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
const NEAR_PLANE: f32 = 3.0;
const FAR_PLANE: f32 = 7.0;
const EYE_DISTANCE: f32 = 3.0;

/// Camera matrices, fixed once the driver is created
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Orthographic projection spanning `[-aspect, aspect] x [-1, 1]`
    pub projection: Mat4,
    /// Look-at from `(0, 0, 3)` towards the origin, +Y up
    pub view: Mat4,
    /// `projection x view`
    pub projection_view: Mat4,
    /// Absolute width over height the projection was built for
    pub aspect: f32,
}

impl Camera {
    /// Camera for a view with the given aspect ratio
    pub fn new(aspect: f32) -> Self {
        let projection = Mat4::orthographic(-aspect, aspect, -1.0, 1.0, NEAR_PLANE, FAR_PLANE);
        let view = Mat4::look_at(
            Vec3::new(0.0, 0.0, EYE_DISTANCE),
            Vec3::zeros(),
            Vec3::new(0.0, 1.0, 0.0),
        );
        Self {
            projection,
            view,
            projection_view: projection * view,
            aspect,
        }
    }
}

/// Owner of the scene's entities, camera and per-frame state
#[derive(Debug)]
pub struct SceneDriver {
    camera: Camera,
    viewport: Viewport,
    pulse: PulseConfig,

    stars: StaticQuad,
    earth: StaticQuad,
    moon: MovingBody,
    speed_button: Control,
    play_button: Control,
    direction_button: Control,

    moon_matrix: Mat4,
    button_scale: f32,
    live: bool,
}

impl SceneDriver {
    /// Lay out the scene for `viewport`; no GPU work happens until [`SceneDriver::setup`]
    pub fn new(viewport: Viewport, config: &ApplicationConfig) -> Self {
        let camera = Camera::new(viewport.aspect());
        let moon = layout::moon(config.motion);
        let moon_matrix = camera.projection_view * moon.model_matrix();

        Self {
            camera,
            viewport,
            pulse: config.pulse,
            stars: layout::stars(),
            earth: layout::earth(),
            moon,
            speed_button: layout::speed_button(camera.aspect),
            play_button: layout::play_button(),
            direction_button: layout::direction_button(camera.aspect),
            moon_matrix,
            button_scale: 1.0,
            live: false,
        }
    }

    fn entities_mut(&mut self) -> [&mut dyn Drawable; 6] {
        [
            &mut self.stars,
            &mut self.earth,
            &mut self.moon,
            &mut self.speed_button,
            &mut self.play_button,
            &mut self.direction_button,
        ]
    }

    /// Create GPU resources for every entity
    ///
    /// Entities whose resources fail to load are logged and left undrawn; the
    /// rest of the scene is unaffected.
    pub fn setup(&mut self, gpu: &mut dyn GpuContext, assets: &dyn AssetSource) {
        if self.live {
            log::warn!("Scene already set up, tearing down first");
            self.teardown(gpu);
        }

        log::info!(
            "Setting up scene for {}x{} viewport (aspect {:.3})",
            self.viewport.width,
            self.viewport.height,
            self.camera.aspect
        );

        gpu.set_viewport(self.viewport);
        gpu.clear_color(CLEAR_COLOR);
        gpu.enable_alpha_blending();

        for entity in self.entities_mut() {
            entity.setup(gpu, assets);
        }
        self.live = true;

        let ready = self.ready_count();
        if ready < 6 {
            log::warn!("{} of 6 entities are drawable", ready);
        } else {
            log::info!("Scene ready");
        }
    }

    /// Number of entities with everything a draw needs
    pub fn ready_count(&self) -> usize {
        [
            self.stars.is_ready(),
            self.earth.is_ready(),
            self.moon.is_ready(),
            self.speed_button.is_ready(),
            self.play_button.is_ready(),
            self.direction_button.is_ready(),
        ]
        .iter()
        .filter(|ready| **ready)
        .count()
    }

    /// Track a new framebuffer size for drawing and hit-testing
    ///
    /// The camera keeps the aspect it was created with.
    pub fn resize(&mut self, gpu: &mut dyn GpuContext, viewport: Viewport) {
        log::debug!("Viewport resized to {}x{}", viewport.width, viewport.height);
        self.viewport = viewport;
        gpu.set_viewport(viewport);
    }

    /// Advance the moving body and the button pulse
    pub fn update(&mut self, time: FrameTime) {
        self.moon.update(time.delta);
        self.moon_matrix = self.camera.projection_view * self.moon.model_matrix();
        self.button_scale = pulse_scale(time.since_first_resume, &self.pulse);
    }

    /// Clear and draw the whole scene
    pub fn draw(&self, gpu: &mut dyn GpuContext) {
        if !self.live {
            log::trace!("Scene not set up, skipping frame");
            return;
        }

        gpu.clear(ClearFlags::COLOR | ClearFlags::DEPTH);

        let pv = &self.camera.projection_view;
        self.stars.draw(gpu, pv);
        let moon = self.moon.quad();
        if self.moon.z_order() > 0 {
            self.earth.draw(gpu, pv);
            moon.draw(gpu, &self.moon_matrix);
        } else {
            moon.draw(gpu, &self.moon_matrix);
            self.earth.draw(gpu, pv);
        }

        for control in self.controls() {
            control.draw_scaled(gpu, pv, self.button_scale);
        }
    }

    /// [`SceneDriver::update`] followed by [`SceneDriver::draw`]
    pub fn frame(&mut self, gpu: &mut dyn GpuContext, time: FrameTime) {
        self.update(time);
        self.draw(gpu);
    }

    /// Controls in hit-test and draw order
    pub fn controls(&self) -> [&Control; 3] {
        [&self.speed_button, &self.play_button, &self.direction_button]
    }

    /// Route a touch to the first control it hits and run that control's action
    pub fn handle_touch(&mut self, touch: TouchEvent) -> Option<ControlAction> {
        let (x, y) = touch.to_framebuffer();
        let action = self
            .controls()
            .into_iter()
            .find(|control| control.hit_test(x, y, &self.camera.projection, &self.viewport))
            .map(Control::action)?;

        log::debug!("Touch at ({:.1}, {:.1}) -> {:?}", x, y, action);
        self.apply(action);
        Some(action)
    }

    /// Run a control action as if its button were tapped
    pub fn apply(&mut self, action: ControlAction) {
        match action {
            ControlAction::CycleSpeed => {
                self.moon.change_speed();
                self.speed_button.set_current_image(self.moon.speed_level());
            }
            ControlAction::TogglePlay => {
                let animating = self.moon.toggle_animating();
                self.play_button.set_current_image(usize::from(animating));
                log::info!("Animation {}", if animating { "started" } else { "paused" });
            }
            ControlAction::ReverseDirection => self.moon.change_direction(),
        }
    }

    /// Release every entity's GPU resources; later calls do nothing
    pub fn teardown(&mut self, gpu: &mut dyn GpuContext) {
        if !self.live {
            log::debug!("Scene already torn down");
            return;
        }
        for entity in self.entities_mut() {
            entity.release(gpu);
        }
        self.live = false;
        log::info!("Scene torn down");
    }

    /// Whether the scene holds GPU resources
    pub const fn is_live(&self) -> bool {
        self.live
    }

    /// Camera matrices
    pub const fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Viewport used for drawing and hit-testing
    pub const fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// The moving body
    pub const fn moon(&self) -> &MovingBody {
        &self.moon
    }

    /// `projection_view x translate(moon)` as of the last update
    pub const fn moon_matrix(&self) -> &Mat4 {
        &self.moon_matrix
    }

    /// Button scale as of the last update
    pub const fn button_scale(&self) -> f32 {
        self.button_scale
    }

    /// Speed button
    pub const fn speed_button(&self) -> &Control {
        &self.speed_button
    }

    /// Play/pause button
    pub const fn play_button(&self) -> &Control {
        &self.play_button
    }

    /// Direction button
    pub const fn direction_button(&self) -> &Control {
        &self.direction_button
    }
}
