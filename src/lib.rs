//! A minimal display surface using OpenGL via [glow]: one GLFW window, one
//! RGB texture, one full-window quad.
//!
//! This crate provides [`Surface`], which owns a window/context pair,
//! uploads a caller-owned raw pixel buffer into a GPU texture, and draws
//! that texture covering the whole window. It is a display shim, not a
//! rendering engine: exactly one texture, one window, one draw path.
//!
//! # Features
//!
//! - **Pixel-exact display**: nearest-neighbor filtering, tight byte
//!   packing, and a top-left origin matching row-major pixel buffers.
//! - **Explicit lifecycle**: a checked
//!   `WindowCreated → BindingsReady → Drawable` state machine instead of
//!   the undefined behavior the underlying libraries leave you with.
//! - **Safe resize**: changing dimensions recreates the texture,
//!   create-before-delete, so a valid texture exists at all times.
//! - **Injectable error sink**: asynchronous windowing errors go to an
//!   [`ErrorSink`] passed at initialization, not a global callback.
//!
//! # Lifecycle
//!
//! ```no_run
//! # use std::sync::Arc;
//! # use pixel_surface::{LogSink, Platform};
//! # fn run() -> Result<(), pixel_surface::SurfaceError> {
//! let mut platform = Platform::initialize(Arc::new(LogSink))?;
//! let mut surface = platform.create_window(320, 240, "demo", true)?;
//! surface.init_bindings()?;
//! surface.set_viewport(320, 240)?;
//!
//! let pixels = vec![0u8; 320 * 240 * 3];
//! let texture = surface.create_texture(&pixels, 320, 240)?;
//!
//! while !surface.should_close() {
//!     surface.update_and_draw(&texture, &pixels, 320, 240)?;
//!     surface.present();
//!     platform.poll_events();
//! }
//! # Ok(()) }
//! ```
//!
//! # Threading
//!
//! Single-threaded by contract: every operation makes its surface's context
//! current on the calling thread, and the context model allows only one such
//! thread at a time. Run everything from one dedicated rendering thread.
//!
//! [glow]: https://docs.rs/glow

mod error;
mod platform;
mod shaders;
mod sink;
mod surface;
mod texture;

pub use error::SurfaceError;
pub use platform::Platform;
pub use sink::{ErrorSink, LogSink};
pub use surface::{Stage, Surface};
pub use texture::{buffer_len, Texture, BYTES_PER_PIXEL};
