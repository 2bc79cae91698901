//! The texture handle and the pixel wire format.
//!
//! Pixels are 8-bit RGB, 3 bytes per pixel, row-major from the top-left,
//! with no padding between rows (pack/unpack alignment is 1 byte). A
//! texture's dimensions are fixed for its whole life; changing them means
//! creating a replacement via
//! [`resize_texture`](crate::Surface::resize_texture).

use crate::error::SurfaceError;

/// Bytes per pixel of the wire format (red, green, blue).
pub const BYTES_PER_PIXEL: usize = 3;

/// Required pixel-buffer length in bytes for the given dimensions.
#[must_use]
pub fn buffer_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * BYTES_PER_PIXEL
}

/// Reject zero dimensions before they reach the driver.
pub(crate) fn check_dimensions(width: u32, height: u32) -> Result<(), SurfaceError> {
    if width == 0 || height == 0 {
        return Err(SurfaceError::InvalidDimensions { width, height });
    }
    Ok(())
}

/// Reject a pixel buffer whose length does not match the stated dimensions.
///
/// The wrapped library reads `width * height * 3` bytes unconditionally, so
/// a short buffer is undefined behavior there; here it is an error before
/// any graphics call is issued.
pub(crate) fn check_buffer(pixels: &[u8], width: u32, height: u32) -> Result<(), SurfaceError> {
    check_dimensions(width, height)?;
    let expected = buffer_len(width, height);
    if pixels.len() != expected {
        return Err(SurfaceError::BufferSize {
            width,
            height,
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}

/// Handle to one GPU-resident 2D RGB image, owned by the
/// [`Surface`](crate::Surface) that created it.
///
/// `Texture` is deliberately neither `Clone` nor `Copy`: the GL object
/// behind it is released by value through
/// [`delete_texture`](crate::Surface::delete_texture) or
/// [`resize_texture`](crate::Surface::resize_texture), so a released handle
/// cannot be used again.
#[derive(Debug)]
pub struct Texture {
    raw: glow::Texture,
    width: u32,
    height: u32,
}

impl Texture {
    pub(crate) fn new(raw: glow::Texture, width: u32, height: u32) -> Self {
        Self { raw, width, height }
    }

    pub(crate) fn raw(&self) -> glow::Texture {
        self.raw
    }

    pub(crate) fn into_raw(self) -> glow::Texture {
        self.raw
    }

    /// Width in pixels, as declared at creation.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels, as declared at creation.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_len_is_three_bytes_per_pixel() {
        assert_eq!(buffer_len(1, 1), 3);
        assert_eq!(buffer_len(320, 240), 320 * 240 * 3);
        assert_eq!(buffer_len(1920, 1080), 1920 * 1080 * 3);
    }

    #[test]
    fn buffer_len_does_not_overflow_large_dimensions() {
        // 16k x 16k fits comfortably in usize on 64-bit targets.
        assert_eq!(buffer_len(16_384, 16_384), 16_384 * 16_384 * 3);
    }

    #[test]
    fn zero_width_is_rejected() {
        assert!(matches!(
            check_dimensions(0, 100),
            Err(SurfaceError::InvalidDimensions {
                width: 0,
                height: 100
            })
        ));
    }

    #[test]
    fn zero_height_is_rejected() {
        assert!(matches!(
            check_dimensions(100, 0),
            Err(SurfaceError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn matching_buffer_passes() {
        let pixels = vec![0u8; 4 * 4 * 3];
        assert!(check_buffer(&pixels, 4, 4).is_ok());
    }

    #[test]
    fn short_buffer_is_rejected_with_both_lengths() {
        let pixels = vec![0u8; 4 * 4 * 3 - 1];
        match check_buffer(&pixels, 4, 4) {
            Err(SurfaceError::BufferSize {
                expected, actual, ..
            }) => {
                assert_eq!(expected, 48);
                assert_eq!(actual, 47);
            }
            other => panic!("expected BufferSize, got {other:?}"),
        }
    }

    #[test]
    fn long_buffer_is_rejected_too() {
        // Silently reading a prefix would mask caller bugs.
        let pixels = vec![0u8; 4 * 4 * 3 + 3];
        assert!(matches!(
            check_buffer(&pixels, 4, 4),
            Err(SurfaceError::BufferSize { .. })
        ));
    }

    #[test]
    fn zero_dimensions_rejected_before_length() {
        assert!(matches!(
            check_buffer(&[], 0, 0),
            Err(SurfaceError::InvalidDimensions { .. })
        ));
    }
}
