//! # Orbit Engine
//!
//! A small OpenGL ES 2.0 scene: a starfield, an earth, a moon bouncing along a
//! diagonal in front of and behind it, and three buttons that change the
//! moon's speed, start and stop it, and reverse it.
//!
//! ## Features
//!
//! - **Textured quads**: one shader program, one vertex layout, any number of textures per entity
//! - **Touch hit-testing**: screen points unprojected into world space and tested against control bounds
//! - **Pluggable GPU**: real GL ES through `glow`, or a headless recorder for tests
//! - **Configuration**: TOML or RON, every value optional
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use orbit_engine::prelude::*;
//!
//! let config = ApplicationConfig::default();
//! let mut gpu = HeadlessGpu::new();
//! let assets = DirectoryAssets::new(&config.assets.assets_dir);
//!
//! let mut scene = SceneDriver::new(Viewport::new(0, 0, 750, 1334), &config);
//! scene.setup(&mut gpu, &assets);
//!
//! let mut time = FrameTime::default();
//! for _ in 0..60 {
//!     time = time.step(1.0 / 60.0);
//!     scene.frame(&mut gpu, time);
//! }
//! scene.teardown(&mut gpu);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod assets;
pub mod backend;
pub mod config;
pub mod core;
pub mod foundation;
pub mod input;
pub mod render;
pub mod scene;
pub mod ui;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        assets::{AssetError, AssetSource, DirectoryAssets, ImageData, MemoryAssets},
        backend::{GlesContext, GpuContext, HeadlessGpu},
        core::{ApplicationConfig, Config, ConfigError, ConfigFormat},
        foundation::{
            math::{Mat4, Mat4Ext, Vec3},
            time::{FrameClock, FrameTime},
        },
        input::{TouchEvent, Viewport},
        render::{Drawable, RenderError},
        scene::SceneDriver,
        ui::ControlAction,
    };
}
