//! The display surface: owns the window/context pair, manages one texture,
//! and renders it as a full-window quad.
//!
//! Every operation makes the surface's context current on the calling thread
//! before issuing graphics calls, so callers never juggle context binding
//! themselves. The price is the single-thread contract described on
//! [`Surface`].

use glfw::Context as _;
use glow::HasContext;
use log::{debug, info};

use crate::error::SurfaceError;
use crate::shaders;
use crate::texture::{self, Texture};

/// GL internal format for RGB8 textures, pre-cast to the `i32` that
/// `tex_image_2d` expects.
#[expect(clippy::cast_possible_wrap)]
const RGB8_INTERNAL_FORMAT: i32 = glow::RGB8 as i32;

/// GL_NEAREST as the `i32` that `tex_parameter_i32` expects. Nearest
/// filtering keeps the display pixel-exact: no mipmaps, no interpolation.
#[expect(clippy::cast_possible_wrap)]
const NEAREST_FILTER: i32 = glow::NEAREST as i32;

/// GL_CLAMP_TO_EDGE as `i32`, for the wrap parameters.
#[expect(clippy::cast_possible_wrap)]
const CLAMP_WRAP: i32 = glow::CLAMP_TO_EDGE as i32;

/// Convert a `u32` to `i32` for GL API calls.
///
/// # Panics
///
/// Panics if `value > i32::MAX`. In practice, this is unreachable for
/// normal window and texture dimensions.
fn gl_size(value: u32) -> i32 {
    i32::try_from(value).expect("dimension exceeds i32::MAX")
}

/// Lifecycle stage of a [`Surface`].
///
/// Stages are strictly ordered; each operation states the minimum stage it
/// requires and fails with [`SurfaceError::NotReady`] below it, before any
/// graphics call is issued. There is no transition backwards short of
/// dropping the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    /// The window and context exist; OpenGL entry points are not resolved
    /// yet. Only [`Surface::init_bindings`] is valid.
    WindowCreated,
    /// Entry points are resolved and the quad pipeline is built. Texture
    /// operations are valid; drawing still needs a viewport.
    BindingsReady,
    /// The viewport has been applied at least once. Steady state:
    /// [`Surface::update_and_draw`] and [`Surface::on_window_resized`]
    /// cycle freely.
    Drawable,
}

/// Gate an operation on the surface having reached `required`.
fn check_stage(actual: Stage, required: Stage) -> Result<(), SurfaceError> {
    if actual >= required {
        Ok(())
    } else {
        Err(SurfaceError::NotReady { required, actual })
    }
}

/// Resolved GL state for one context: the glow handle plus the quad
/// pipeline built at bindings-init time.
struct GlState {
    gl: glow::Context,
    /// Compiled quad shader program.
    program: glow::Program,
    /// `u_texture` sampler location, cached at link time.
    u_texture: glow::UniformLocation,
    /// Static vertex buffer holding [`shaders::QUAD_VERTICES`].
    vbo: glow::Buffer,
}

/// One native window/context pair and the texture pipeline drawing into it.
///
/// Created by [`Platform::create_window`](crate::Platform::create_window) in
/// the [`Stage::WindowCreated`] stage. The underlying context model allows
/// only one thread to hold a context current at a time, so all calls against
/// one surface must come from a single (or externally serialized) thread.
/// Calls block until the driver command is issued, not until the GPU has
/// executed it; no fencing is performed.
pub struct Surface {
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
    stage: Stage,
    gl: Option<GlState>,
}

impl Surface {
    pub(crate) fn new(
        window: glfw::PWindow,
        events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
    ) -> Self {
        Self {
            window,
            events,
            stage: Stage::WindowCreated,
            gl: None,
        }
    }

    /// The lifecycle stage the surface is currently in.
    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    fn state(&self) -> Result<&GlState, SurfaceError> {
        self.gl.as_ref().ok_or(SurfaceError::NotReady {
            required: Stage::BindingsReady,
            actual: self.stage,
        })
    }

    /// Resolve OpenGL entry points for this surface's context and build the
    /// quad pipeline (shader program plus static vertex buffer).
    ///
    /// Must run after window creation and before any viewport, texture, or
    /// draw call. Runs once per context; calling it again after success is a
    /// no-op.
    ///
    /// # Errors
    ///
    /// [`SurfaceError::Bindings`] if the loader cannot resolve required
    /// entry points or the quad program cannot be compiled and linked. The
    /// surface is then stuck in [`Stage::WindowCreated`] and drawing on it
    /// remains invalid.
    pub fn init_bindings(&mut self) -> Result<(), SurfaceError> {
        if self.gl.is_some() {
            return Ok(());
        }
        self.window.make_current();

        // Probe one required GL 2.0 symbol before trusting the loader; a
        // null here is what a GLEW init failure looks like on this side.
        if self.window.get_proc_address("glCreateProgram").is_null() {
            return Err(SurfaceError::Bindings(
                "loader returned null for glCreateProgram; no usable OpenGL 2.x driver".into(),
            ));
        }

        let gl = unsafe {
            glow::Context::from_loader_function(|s| self.window.get_proc_address(s).cast())
        };

        let program = unsafe {
            shaders::compile_program(&gl, shaders::QUAD_VERTEX_SRC, shaders::QUAD_FRAGMENT_SRC)
        }
        .map_err(SurfaceError::Bindings)?;

        let u_texture = unsafe { gl.get_uniform_location(program, "u_texture") }
            .ok_or_else(|| SurfaceError::Bindings("u_texture missing from quad shader".into()))?;

        let vbo = unsafe {
            let vbo = gl.create_buffer().map_err(SurfaceError::Bindings)?;
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(&shaders::QUAD_VERTICES),
                glow::STATIC_DRAW,
            );
            // One attribute, one buffer, for the life of the context. No VAO
            // on a 2.1 context; the array state is set once and left enabled.
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(
                0,
                2,
                glow::FLOAT,
                false,
                // Vertex is 8 bytes — well within i32 range.
                #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
                {
                    std::mem::size_of::<shaders::Vertex>() as i32
                },
                0,
            );
            vbo
        };

        self.gl = Some(GlState {
            gl,
            program,
            u_texture,
            vbo,
        });
        self.stage = Stage::BindingsReady;
        info!("OpenGL bindings resolved, quad pipeline ready");
        Ok(())
    }

    /// Bind the context and set the rendering viewport to
    /// `(0, 0, width, height)`.
    ///
    /// Required before the first draw and after every dimension change;
    /// skipping it distorts the rendered content geometrically. The first
    /// successful call moves the surface to [`Stage::Drawable`].
    ///
    /// # Errors
    ///
    /// [`SurfaceError::NotReady`] before [`Stage::BindingsReady`].
    pub fn set_viewport(&mut self, width: u32, height: u32) -> Result<(), SurfaceError> {
        check_stage(self.stage, Stage::BindingsReady)?;
        self.window.make_current();
        let state = self.state()?;
        unsafe {
            state.gl.viewport(0, 0, gl_size(width), gl_size(height));
        }
        if self.stage == Stage::BindingsReady {
            self.stage = Stage::Drawable;
        }
        Ok(())
    }

    /// Allocate one GPU texture with `pixels` as its initial content.
    ///
    /// The texture uses nearest-neighbor min/mag filtering and tight 1-byte
    /// pack/unpack alignment; the display is pixel-exact by design. The new
    /// texture is left bound as the context's active 2D texture.
    ///
    /// # Errors
    ///
    /// [`SurfaceError::NotReady`] before [`Stage::BindingsReady`],
    /// [`SurfaceError::InvalidDimensions`] / [`SurfaceError::BufferSize`] if
    /// the buffer does not match `width * height * 3` bytes, and
    /// [`SurfaceError::TextureAllocation`] if the driver refuses the object.
    pub fn create_texture(
        &mut self,
        pixels: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Texture, SurfaceError> {
        check_stage(self.stage, Stage::BindingsReady)?;
        texture::check_buffer(pixels, width, height)?;
        self.window.make_current();
        let state = self.state()?;
        let gl = &state.gl;

        let raw = unsafe { gl.create_texture() }.map_err(SurfaceError::TextureAllocation)?;
        unsafe {
            gl.bind_texture(glow::TEXTURE_2D, Some(raw));
            gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            gl.pixel_store_i32(glow::PACK_ALIGNMENT, 1);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, NEAREST_FILTER);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, NEAREST_FILTER);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, CLAMP_WRAP);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, CLAMP_WRAP);
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                RGB8_INTERNAL_FORMAT,
                gl_size(width),
                gl_size(height),
                0,
                glow::RGB,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(pixels)),
            );
        }
        debug!("created {width}x{height} texture");
        Ok(Texture::new(raw, width, height))
    }

    /// Release the GPU storage of one texture.
    ///
    /// The handle is consumed; liveness tracking is the type system's job.
    ///
    /// # Errors
    ///
    /// [`SurfaceError::NotReady`] before [`Stage::BindingsReady`].
    pub fn delete_texture(&mut self, texture: Texture) -> Result<(), SurfaceError> {
        check_stage(self.stage, Stage::BindingsReady)?;
        self.window.make_current();
        let state = self.state()?;
        unsafe {
            state.gl.delete_texture(texture.into_raw());
        }
        Ok(())
    }

    /// Replace the whole content of `texture` and draw it as a full-window
    /// quad.
    ///
    /// The upload goes through a sub-image update, so `width`/`height` must
    /// equal the texture's dimensions — this path never resizes. Drawing
    /// clears the color buffer first and maps pixel `(0, 0)` of the buffer
    /// to the top-left of the window (the origin flip happens in the vertex
    /// shader). The frame is not presented; call [`present`](Self::present)
    /// to make it visible.
    ///
    /// # Errors
    ///
    /// [`SurfaceError::NotReady`] before [`Stage::Drawable`] (no graphics
    /// call is issued in that case),
    /// [`SurfaceError::DimensionMismatch`] if `width`/`height` differ from
    /// the texture's, and [`SurfaceError::BufferSize`] /
    /// [`SurfaceError::InvalidDimensions`] for a malformed buffer.
    pub fn update_and_draw(
        &mut self,
        texture: &Texture,
        pixels: &[u8],
        width: u32,
        height: u32,
    ) -> Result<(), SurfaceError> {
        check_stage(self.stage, Stage::Drawable)?;
        if width != texture.width() || height != texture.height() {
            return Err(SurfaceError::DimensionMismatch {
                texture_width: texture.width(),
                texture_height: texture.height(),
                width,
                height,
            });
        }
        texture::check_buffer(pixels, width, height)?;
        self.window.make_current();
        let state = self.state()?;
        let gl = &state.gl;

        unsafe {
            gl.bind_texture(glow::TEXTURE_2D, Some(texture.raw()));
            gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            gl.tex_sub_image_2d(
                glow::TEXTURE_2D,
                0,
                0,
                0,
                gl_size(width),
                gl_size(height),
                glow::RGB,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(pixels)),
            );

            gl.clear_color(0.0, 0.0, 0.0, 1.0);
            gl.clear(glow::COLOR_BUFFER_BIT);

            gl.use_program(Some(state.program));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(state.vbo));
            gl.active_texture(glow::TEXTURE0);
            gl.uniform_1_i32(Some(&state.u_texture), 0);
            gl.draw_arrays(glow::TRIANGLE_STRIP, 0, 4);
        }
        Ok(())
    }

    /// Change a texture's dimensions by full recreation.
    ///
    /// This is the only supported way to resize: a new texture is created at
    /// the new size with `pixels` as initial content, then the old one is
    /// deleted. Create-before-delete keeps a valid texture alive the whole
    /// time. The returned handle is distinct from the consumed one.
    ///
    /// # Errors
    ///
    /// Everything [`create_texture`](Self::create_texture) can return. If
    /// creating the replacement fails, the old texture handle has already
    /// been consumed and its storage is not reclaimed until the context
    /// goes away.
    pub fn resize_texture(
        &mut self,
        texture: Texture,
        pixels: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Texture, SurfaceError> {
        let replacement = self.create_texture(pixels, width, height)?;
        debug!(
            "resized texture {}x{} -> {width}x{height}",
            texture.width(),
            texture.height()
        );
        self.delete_texture(texture)?;
        Ok(replacement)
    }

    /// React to a window resize by re-binding the context and re-applying
    /// the viewport.
    ///
    /// Touches no texture: if the displayed buffer's dimensions changed as
    /// well, also call [`resize_texture`](Self::resize_texture).
    ///
    /// # Errors
    ///
    /// [`SurfaceError::NotReady`] before [`Stage::BindingsReady`].
    pub fn on_window_resized(&mut self, width: u32, height: u32) -> Result<(), SurfaceError> {
        debug!("window resized to {width}x{height}");
        self.set_viewport(width, height)
    }

    /// Swap the front and back buffers, making the last drawn frame
    /// visible. Throttled to the display refresh (swap interval 1).
    pub fn present(&mut self) {
        self.window.swap_buffers();
    }

    /// Whether a GUI event requested the window to close.
    #[must_use]
    pub fn should_close(&self) -> bool {
        self.window.should_close()
    }

    /// The window's event receiver, for [`glfw::flush_messages`].
    #[must_use]
    pub fn events(&self) -> &glfw::GlfwReceiver<(f64, glfw::WindowEvent)> {
        &self.events
    }

    /// Current framebuffer dimensions in pixels.
    #[must_use]
    pub fn framebuffer_size(&self) -> (i32, i32) {
        self.window.get_framebuffer_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_are_strictly_ordered() {
        assert!(Stage::WindowCreated < Stage::BindingsReady);
        assert!(Stage::BindingsReady < Stage::Drawable);
    }

    #[test]
    fn draw_is_gated_until_drawable() {
        // The gate runs before any graphics call, so it is testable without
        // a context.
        match check_stage(Stage::WindowCreated, Stage::Drawable) {
            Err(SurfaceError::NotReady { required, actual }) => {
                assert_eq!(required, Stage::Drawable);
                assert_eq!(actual, Stage::WindowCreated);
            }
            other => panic!("expected NotReady, got {other:?}"),
        }
        assert!(matches!(
            check_stage(Stage::BindingsReady, Stage::Drawable),
            Err(SurfaceError::NotReady { .. })
        ));
    }

    #[test]
    fn texture_ops_are_valid_from_bindings_ready() {
        assert!(check_stage(Stage::BindingsReady, Stage::BindingsReady).is_ok());
        assert!(check_stage(Stage::Drawable, Stage::BindingsReady).is_ok());
    }

    #[test]
    fn steady_state_accepts_draws() {
        assert!(check_stage(Stage::Drawable, Stage::Drawable).is_ok());
    }

    #[test]
    fn gl_size_passes_ordinary_dimensions() {
        assert_eq!(gl_size(0), 0);
        assert_eq!(gl_size(1920), 1920);
    }

    #[test]
    #[should_panic(expected = "dimension exceeds i32::MAX")]
    fn gl_size_rejects_oversized_dimensions() {
        let _ = gl_size(u32::MAX);
    }
}
