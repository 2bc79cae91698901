//! Error taxonomy for the display surface.
//!
//! Construction-time failures ([`Init`](SurfaceError::Init),
//! [`WindowCreation`](SurfaceError::WindowCreation),
//! [`Bindings`](SurfaceError::Bindings)) are returned synchronously and are
//! fatal for the process or the handle they concern. Asynchronous windowing
//! errors never surface here; they go to the [`ErrorSink`](crate::ErrorSink)
//! registered at initialization.

use thiserror::Error;

use crate::surface::Stage;

/// Errors produced by the display surface.
#[derive(Error, Debug)]
pub enum SurfaceError {
    /// The windowing library failed to start. Fatal to the process's
    /// graphics capability.
    #[error("failed to initialize the windowing library: {0}")]
    Init(String),

    /// The requested window/context could not be created (e.g. no driver
    /// offering an OpenGL 2.1 context). Fatal to that handle.
    #[error("failed to create window: {0}")]
    WindowCreation(String),

    /// OpenGL entry-point resolution (or quad program setup) failed after
    /// context creation. Fatal to that handle; drawing on it is invalid.
    #[error("failed to resolve OpenGL bindings: {0}")]
    Bindings(String),

    /// An operation was invoked before its required lifecycle stage was
    /// reached. No graphics call has been issued.
    #[error("operation requires the {required:?} stage but the surface is in {actual:?}")]
    NotReady {
        /// The minimum stage the operation needs.
        required: Stage,
        /// The stage the surface is actually in.
        actual: Stage,
    },

    /// A width or height of zero was requested.
    #[error("invalid dimensions {width}x{height}: width and height must be at least 1")]
    InvalidDimensions {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },

    /// The pixel buffer's length does not match the stated dimensions.
    #[error("pixel buffer holds {actual} bytes but {width}x{height} RGB needs {expected}")]
    BufferSize {
        /// Stated width in pixels.
        width: u32,
        /// Stated height in pixels.
        height: u32,
        /// Required length in bytes (`width * height * 3`).
        expected: usize,
        /// Actual length of the buffer passed in.
        actual: usize,
    },

    /// An update was attempted with dimensions different from the texture's.
    /// The sub-image upload path never resizes; use
    /// [`resize_texture`](crate::Surface::resize_texture) instead.
    #[error(
        "texture is {texture_width}x{texture_height} but the update is {width}x{height}; \
         resize the texture instead"
    )]
    DimensionMismatch {
        /// The texture's width.
        texture_width: u32,
        /// The texture's height.
        texture_height: u32,
        /// Width stated for the update.
        width: u32,
        /// Height stated for the update.
        height: u32,
    },

    /// The driver refused to allocate a texture object.
    #[error("texture allocation failed: {0}")]
    TextureAllocation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_size_message_names_all_quantities() {
        let err = SurfaceError::BufferSize {
            width: 4,
            height: 4,
            expected: 48,
            actual: 47,
        };
        let text = err.to_string();
        assert!(text.contains("4x4"));
        assert!(text.contains("48"));
        assert!(text.contains("47"));
    }

    #[test]
    fn not_ready_message_names_both_stages() {
        let err = SurfaceError::NotReady {
            required: Stage::Drawable,
            actual: Stage::WindowCreated,
        };
        let text = err.to_string();
        assert!(text.contains("Drawable"));
        assert!(text.contains("WindowCreated"));
    }

    #[test]
    fn dimension_mismatch_points_at_resize() {
        let err = SurfaceError::DimensionMismatch {
            texture_width: 320,
            texture_height: 240,
            width: 640,
            height: 480,
        };
        assert!(err.to_string().contains("resize"));
    }
}
