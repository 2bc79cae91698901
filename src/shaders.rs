//! GLSL shader sources, the quad geometry, and compilation helpers.
//!
//! The shaders target GLSL 1.20, the version guaranteed by the OpenGL 2.1
//! contexts this crate requests. That also means no layout qualifiers (the
//! attribute location is bound before linking) and no vertex array objects
//! (the one vertex buffer is configured directly on the context).

use bytemuck::{Pod, Zeroable};
use glow::HasContext;

/// A quad corner position in the unit square, ready for the GPU.
#[derive(Copy, Clone, Pod, Zeroable)]
#[repr(C)]
pub struct Vertex {
    /// Position in `[0,1] x [0,1]`, (0,0) = top-left of the window.
    pub position: [f32; 2],
}

/// The full-window quad as a 4-vertex triangle strip.
///
/// Corner order is top-left, top-right, bottom-left, bottom-right; the strip
/// covers the unit square with either winding since face culling is off.
pub const QUAD_VERTICES: [Vertex; 4] = [
    Vertex { position: [0.0, 0.0] },
    Vertex { position: [1.0, 0.0] },
    Vertex { position: [0.0, 1.0] },
    Vertex { position: [1.0, 1.0] },
];

/// Vertex shader for the full-window textured quad.
///
/// Expands the unit square to the whole viewport and negates Y when
/// converting to clip space. The negation is the origin flip: buffer rows
/// run top-down while GL clip space runs bottom-up, so texel row 0 (the
/// first bytes of the pixel buffer) lands at the top of the window.
///
/// Equivalent to an orthographic projection mapping `(0,0)`–`(w-1,h-1)` to
/// the viewport; with a viewport-filling quad the projection collapses to
/// this unit-square transform and no uniform is needed.
pub const QUAD_VERTEX_SRC: &str = r"#version 120

attribute vec2 a_position;

varying vec2 v_uv;

void main() {
    v_uv = a_position;

    // Unit square to clip space, Y negated (origin flip).
    vec2 ndc = a_position * 2.0 - 1.0;
    gl_Position = vec4(ndc.x, -ndc.y, 0.0, 1.0);
}
";

/// Fragment shader for the full-window textured quad.
///
/// Samples the one bound texture and writes it opaque. Filtering behavior
/// (nearest, pixel-exact) is a property of the texture object, not of this
/// shader.
///
/// # Uniforms
///
/// | Name        | Type        | Description        |
/// |-------------|-------------|--------------------|
/// | `u_texture` | `sampler2D` | Bound texture unit |
pub const QUAD_FRAGMENT_SRC: &str = r"#version 120

varying vec2 v_uv;

uniform sampler2D u_texture;

void main() {
    gl_FragColor = vec4(texture2D(u_texture, v_uv).rgb, 1.0);
}
";

/// Compile a shader program from vertex and fragment source strings.
///
/// The `a_position` attribute is bound to location 0 before linking, since
/// GLSL 1.20 has no `layout` qualifiers. The compiled shader objects are
/// detached and deleted after successful linking, so only the program handle
/// needs to be cleaned up by the caller.
///
/// # Safety
///
/// Requires a valid, current OpenGL context.
///
/// # Errors
///
/// Returns a descriptive error string if shader compilation or program
/// linking fails.
pub unsafe fn compile_program(
    gl: &glow::Context,
    vertex_src: &str,
    fragment_src: &str,
) -> Result<glow::Program, String> {
    let program = unsafe { gl.create_program() }?;

    let vs = unsafe { compile_shader(gl, glow::VERTEX_SHADER, vertex_src) }?;
    let fs = unsafe { compile_shader(gl, glow::FRAGMENT_SHADER, fragment_src) }?;

    unsafe {
        gl.attach_shader(program, vs);
        gl.attach_shader(program, fs);
        gl.bind_attrib_location(program, 0, "a_position");
        gl.link_program(program);

        if !gl.get_program_link_status(program) {
            let log = gl.get_program_info_log(program);
            gl.delete_program(program);
            gl.delete_shader(vs);
            gl.delete_shader(fs);
            return Err(format!("Program link error: {log}"));
        }

        // Shaders can be detached and deleted after successful linking.
        gl.detach_shader(program, vs);
        gl.detach_shader(program, fs);
        gl.delete_shader(vs);
        gl.delete_shader(fs);
    }

    Ok(program)
}

/// Compile a single shader stage (vertex or fragment) from source.
///
/// # Safety
///
/// Requires a valid, current OpenGL context.
unsafe fn compile_shader(
    gl: &glow::Context,
    shader_type: u32,
    source: &str,
) -> Result<glow::Shader, String> {
    unsafe {
        let shader = gl.create_shader(shader_type)?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);

        if !gl.get_shader_compile_status(shader) {
            let log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            return Err(format!("Shader compile error: {log}"));
        }

        Ok(shader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_covers_the_unit_square() {
        let xs: Vec<f32> = QUAD_VERTICES.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = QUAD_VERTICES.iter().map(|v| v.position[1]).collect();
        assert!(xs.contains(&0.0) && xs.contains(&1.0));
        assert!(ys.contains(&0.0) && ys.contains(&1.0));
        assert_eq!(QUAD_VERTICES.len(), 4);
    }

    #[test]
    fn quad_first_vertex_is_the_top_left_corner() {
        // The first memory row of the pixel buffer must map to the top of
        // the window; v_uv equals the position, so (0,0) is both the first
        // texel row and (after the Y negation) the top-left of clip space.
        assert_eq!(QUAD_VERTICES[0].position, [0.0, 0.0]);
    }

    #[test]
    fn vertex_is_eight_bytes_for_tight_interleaving() {
        assert_eq!(std::mem::size_of::<Vertex>(), 8);
        let bytes: &[u8] = bytemuck::cast_slice(&QUAD_VERTICES);
        assert_eq!(bytes.len(), 4 * 8);
    }

    #[test]
    fn shader_sources_target_glsl_120() {
        assert!(QUAD_VERTEX_SRC.starts_with("#version 120"));
        assert!(QUAD_FRAGMENT_SRC.starts_with("#version 120"));
    }

    #[test]
    fn vertex_shader_flips_y() {
        assert!(QUAD_VERTEX_SRC.contains("-ndc.y"));
    }

    #[test]
    fn shader_interface_names_match_the_renderer() {
        assert!(QUAD_VERTEX_SRC.contains("attribute vec2 a_position"));
        assert!(QUAD_FRAGMENT_SRC.contains("uniform sampler2D u_texture"));
    }
}
