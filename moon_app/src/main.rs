//! Orbit demo host
//!
//! Opens a window with an OpenGL ES 2.0 context and runs the scene in it.
//! Mouse clicks stand in for touches. With `--headless` the scene runs against
//! a recording GPU for a fixed number of simulated frames instead.
//!
//! Keys: `Escape` quits, `F` pauses the frame clock, `M` simulates memory
//! pressure (the scene is torn down and rebuilt).

mod window;

use std::path::PathBuf;

use clap::Parser;
use glfw::{Action, Key, MouseButton, WindowEvent};
use orbit_engine::foundation::logging;
use orbit_engine::prelude::*;
use thiserror::Error;

use crate::window::{Window, WindowError};

#[derive(Parser, Debug)]
#[command(name = "moon_app")]
#[command(about = "Earth, moon and stars in OpenGL ES 2.0", long_about = None)]
struct Cli {
    /// Configuration file (.toml or .ron)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory holding the scene's PNG textures
    #[arg(long, value_name = "DIR")]
    assets: Option<PathBuf>,

    /// Run this many simulated frames without opening a window
    #[arg(long, value_name = "FRAMES")]
    headless: Option<u32>,
}

#[derive(Error, Debug)]
enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Window error: {0}")]
    Window(#[from] WindowError),
}

fn load_config(cli: &Cli) -> Result<ApplicationConfig, AppError> {
    let mut config = match &cli.config {
        Some(path) => ApplicationConfig::load_from_file(path)?,
        None => ApplicationConfig::default(),
    };
    if let Some(dir) = &cli.assets {
        config.assets.assets_dir = dir.display().to_string();
    }
    config.validate()?;
    Ok(config)
}

fn open_assets(config: &ApplicationConfig) -> DirectoryAssets {
    let assets = DirectoryAssets::new(&config.assets.assets_dir);
    if !assets.root().is_dir() {
        log::warn!("Asset directory {:?} not found, the scene will be empty", assets.root());
    }
    assets
}

fn run_headless(config: &ApplicationConfig, frames: u32) {
    log::info!("Running {} headless frames", frames);

    let mut gpu = HeadlessGpu::new();
    let assets = open_assets(config);
    let viewport = Viewport::from_size(config.window.width, config.window.height);
    let mut scene = SceneDriver::new(viewport, config);
    scene.setup(&mut gpu, &assets);
    scene.apply(ControlAction::TogglePlay);

    let step = 1.0 / config.engine.target_fps as f32;
    let mut time = FrameTime::default();
    let mut draws = 0;
    for _ in 0..frames {
        time = time.step(step);
        scene.frame(&mut gpu, time);
        draws += gpu.take_draws().len();
    }

    let state = scene.moon().state();
    log::info!(
        "Simulated {:.2}s: {} draws, {} bounces, moon at ({:.3}, {:.3}) with z-order {}",
        time.since_first_resume,
        draws,
        state.bounces,
        state.x,
        state.y,
        state.z_order
    );

    scene.teardown(&mut gpu);
    if gpu.live_object_count() > 0 {
        log::warn!("{} GPU objects outlived teardown", gpu.live_object_count());
    }
}

fn run_windowed(config: &ApplicationConfig) -> Result<(), AppError> {
    let mut window = Window::new(&config.window.title, config.window.width, config.window.height)?;
    let mut gpu = GlesContext::new(window.load_gl());
    let assets = open_assets(config);

    let (width, height) = window.get_framebuffer_size();
    let mut scene = SceneDriver::new(Viewport::from_size(width, height), config);
    scene.setup(&mut gpu, &assets);

    let mut clock = FrameClock::new();

    while !window.should_close() {
        for event in window.poll_events() {
            match event {
                WindowEvent::Key(Key::Escape, _, Action::Press, _) | WindowEvent::Close => {
                    window.set_should_close(true);
                }
                WindowEvent::Key(Key::F, _, Action::Press, _) => {
                    if clock.is_paused() {
                        clock.resume();
                    } else {
                        clock.pause();
                    }
                }
                WindowEvent::Key(Key::M, _, Action::Press, _) => {
                    log::warn!("Simulated memory pressure, rebuilding scene");
                    scene.teardown(&mut gpu);
                    scene.setup(&mut gpu, &assets);
                }
                WindowEvent::Focus(true) => clock.resume(),
                WindowEvent::Focus(false) => clock.pause(),
                WindowEvent::MouseButton(MouseButton::Button1, Action::Press, _) => {
                    let (x, y) = window.cursor_position();
                    scene.handle_touch(TouchEvent::new(x, y, window.content_scale()));
                }
                WindowEvent::FramebufferSize(width, height) => {
                    scene.resize(&mut gpu, Viewport::new(0, 0, width, height));
                }
                _ => {}
            }
        }

        scene.frame(&mut gpu, clock.tick());
        window.swap_buffers();
    }

    log::info!("Window closed after {} frames", clock.frame_count());
    scene.teardown(&mut gpu);
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(&cli);
    logging::init(config.as_ref().map_or("info", |c| c.engine.log_level.as_str()));
    let config = config?;

    log::info!("Starting Orbit");

    match cli.headless {
        Some(frames) => run_headless(&config, frames),
        None => run_windowed(&config)?,
    }

    log::info!("Orbit finished");
    Ok(())
}
