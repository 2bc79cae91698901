//! Process-wide windowing bring-up and window creation.

use std::sync::Arc;

use glfw::Context as _;
use log::info;

use crate::error::SurfaceError;
use crate::sink::ErrorSink;
use crate::surface::Surface;
use crate::texture;

/// Process-wide handle to the windowing library.
///
/// Owns the GLFW instance and the event pump. Created once per process by
/// [`initialize`](Self::initialize); GLFW does not guarantee that a second
/// bring-up behaves, so there is no second call. Dropping the platform
/// (after its surfaces) terminates the library and destroys any remaining
/// windows.
pub struct Platform {
    glfw: glfw::Glfw,
}

impl Platform {
    /// Start the windowing library and register `sink` as the process-wide
    /// receiver for its asynchronous error reports.
    ///
    /// All other operations in this crate are invalid until this succeeds.
    /// Call exactly once per process, from the thread that will run the
    /// rendering loop.
    ///
    /// # Errors
    ///
    /// [`SurfaceError::Init`] if the library cannot start (e.g. no display
    /// connection). Fatal to the process's graphics capability.
    pub fn initialize(sink: Arc<dyn ErrorSink>) -> Result<Self, SurfaceError> {
        let glfw = glfw::init(move |code, description: String| {
            sink.report(code as i32, &description);
        })
        .map_err(|e| SurfaceError::Init(e.to_string()))?;
        info!("windowing library initialized");
        Ok(Self { glfw })
    }

    /// Create a window with an OpenGL 2.1 context and return it as a
    /// [`Surface`] in the [`WindowCreated`](crate::Stage::WindowCreated)
    /// stage.
    ///
    /// On success the new context is current on the calling thread and
    /// vertical sync is enabled (swap interval 1, presentation throttled to
    /// the display refresh). With `visible = false` the window is created
    /// but never shown; every other operation works the same, which is what
    /// makes off-screen use and testing possible.
    ///
    /// # Errors
    ///
    /// [`SurfaceError::InvalidDimensions`] for a zero dimension, or
    /// [`SurfaceError::WindowCreation`] if no compatible window/context can
    /// be created (e.g. the driver offers no OpenGL 2.1). Fatal to the
    /// would-be handle; the caller may retry with different parameters.
    pub fn create_window(
        &mut self,
        width: u32,
        height: u32,
        title: &str,
        visible: bool,
    ) -> Result<Surface, SurfaceError> {
        texture::check_dimensions(width, height)?;

        self.glfw
            .window_hint(glfw::WindowHint::ClientApi(glfw::ClientApiHint::OpenGl));
        self.glfw.window_hint(glfw::WindowHint::ContextVersion(2, 1));
        self.glfw.window_hint(glfw::WindowHint::Visible(visible));

        let (mut window, events) = self
            .glfw
            .create_window(width, height, title, glfw::WindowMode::Windowed)
            .ok_or_else(|| {
                SurfaceError::WindowCreation(format!(
                    "no {width}x{height} window with an OpenGL 2.1 context could be created"
                ))
            })?;

        window.make_current();
        window.set_framebuffer_size_polling(true);
        self.glfw.set_swap_interval(glfw::SwapInterval::Sync(1));

        info!("created {width}x{height} window \"{title}\" (visible: {visible})");
        Ok(Surface::new(window, events))
    }

    /// Pump the event queue, making pending input available on each
    /// surface's [`events`](Surface::events) receiver.
    pub fn poll_events(&mut self) {
        self.glfw.poll_events();
    }
}
