//! GLFW window with an OpenGL ES 2.0 context

use glfw::Context as _;
use thiserror::Error;

/// Window management errors
#[derive(Error, Debug)]
pub enum WindowError {
    /// GLFW could not be initialized
    #[error("GLFW initialization failed: {0}")]
    InitializationFailed(String),

    /// No window with an ES 2.0 context could be created
    #[error("Window creation failed (is OpenGL ES 2.0 available?)")]
    CreationFailed,
}

/// Result type for window operations
pub type WindowResult<T> = Result<T, WindowError>;

/// GLFW window whose ES 2.0 context is current on the creating thread
pub struct Window {
    glfw: glfw::Glfw,
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
}

impl Window {
    /// Create the window, make its context current and enable vsync
    pub fn new(title: &str, width: u32, height: u32) -> WindowResult<Self> {
        let mut glfw = glfw::init(glfw::fail_on_errors)
            .map_err(|e| WindowError::InitializationFailed(format!("{e:?}")))?;

        glfw.window_hint(glfw::WindowHint::ClientApi(glfw::ClientApiHint::OpenGlEs));
        glfw.window_hint(glfw::WindowHint::ContextVersion(2, 0));
        glfw.window_hint(glfw::WindowHint::DepthBits(Some(24)));
        glfw.window_hint(glfw::WindowHint::Resizable(true));

        let (mut window, events) = glfw
            .create_window(width, height, title, glfw::WindowMode::Windowed)
            .ok_or(WindowError::CreationFailed)?;

        window.make_current();
        glfw.set_swap_interval(glfw::SwapInterval::Sync(1));

        window.set_key_polling(true);
        window.set_mouse_button_polling(true);
        window.set_framebuffer_size_polling(true);
        window.set_focus_polling(true);
        window.set_close_polling(true);

        log::info!("Window created ({}x{})", width, height);
        Ok(Self { glfw, window, events })
    }

    /// Load GL entry points through the window's context
    #[allow(unsafe_code)]
    pub fn load_gl(&mut self) -> glow::Context {
        // SAFETY: the context was made current in `new` and stays current on this thread
        unsafe { glow::Context::from_loader_function(|name| self.window.get_proc_address(name) as *const _) }
    }

    pub fn should_close(&self) -> bool {
        self.window.should_close()
    }

    pub fn set_should_close(&mut self, should_close: bool) {
        self.window.set_should_close(should_close);
    }

    pub fn poll_events(&mut self) -> Vec<glfw::WindowEvent> {
        self.glfw.poll_events();
        glfw::flush_messages(&self.events).map(|(_, event)| event).collect()
    }

    pub fn swap_buffers(&mut self) {
        self.window.swap_buffers();
    }

    pub fn get_framebuffer_size(&self) -> (u32, u32) {
        let (width, height) = self.window.get_framebuffer_size();
        (width.max(0) as u32, height.max(0) as u32)
    }

    /// Framebuffer pixels per screen coordinate
    pub fn content_scale(&self) -> f32 {
        let (window_width, _) = self.window.get_size();
        let (framebuffer_width, _) = self.window.get_framebuffer_size();
        if window_width <= 0 {
            return 1.0;
        }
        framebuffer_width as f32 / window_width as f32
    }

    /// Cursor position in screen coordinates, origin top-left
    pub fn cursor_position(&self) -> (f32, f32) {
        let (x, y) = self.window.get_cursor_pos();
        (x as f32, y as f32)
    }
}
