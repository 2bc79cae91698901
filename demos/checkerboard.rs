//! Full-lifecycle demo: an animated checkerboard in a resizable window.
//!
//! Run with `cargo run --example checkerboard`. Set `RUST_LOG=debug` to see
//! the lifecycle and resize logging.

use std::sync::Arc;

use pixel_surface::{buffer_len, LogSink, Platform};

const CELL: u32 = 16;

/// Fill an RGB buffer with a checkerboard, shifted by `frame` for a slow
/// horizontal scroll.
fn checkerboard(width: u32, height: u32, frame: u64) -> Vec<u8> {
    let mut pixels = vec![0u8; buffer_len(width, height)];
    let shift = u32::try_from(frame / 4 % u64::from(2 * CELL)).unwrap_or(0);
    for y in 0..height {
        for x in 0..width {
            let on = ((x + shift) / CELL + y / CELL) % 2 == 0;
            let offset = (y * width + x) as usize * 3;
            let value = if on { 0xe0 } else { 0x20 };
            pixels[offset] = value;
            pixels[offset + 1] = value;
            pixels[offset + 2] = 0x40;
        }
    }
    pixels
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut platform = Platform::initialize(Arc::new(LogSink))?;
    let mut surface = platform.create_window(640, 480, "checkerboard", true)?;
    surface.init_bindings()?;
    surface.set_viewport(640, 480)?;

    let (mut width, mut height) = (640u32, 480u32);
    let mut texture = surface.create_texture(&checkerboard(width, height, 0), width, height)?;

    let mut frame: u64 = 0;
    while !surface.should_close() {
        frame += 1;
        let pixels = checkerboard(width, height, frame);
        surface.update_and_draw(&texture, &pixels, width, height)?;
        surface.present();

        platform.poll_events();
        let resized = glfw::flush_messages(surface.events())
            .filter_map(|(_, event)| match event {
                glfw::WindowEvent::FramebufferSize(w, h) => Some((w, h)),
                _ => None,
            })
            .last();

        if let Some((w, h)) = resized {
            width = u32::try_from(w).unwrap_or(1).max(1);
            height = u32::try_from(h).unwrap_or(1).max(1);
            surface.on_window_resized(width, height)?;
            texture =
                surface.resize_texture(texture, &checkerboard(width, height, frame), width, height)?;
        }
    }

    Ok(())
}
