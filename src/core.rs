use crate::config::Config;
use crate::error::{Error, Result};
use crate::mode::{ModeToggle, PolygonMode};

use glutin::dpi::LogicalSize;
use glutin::event_loop::EventLoop;
use glutin::window::WindowBuilder;
use glutin::{Api, ContextBuilder, GlProfile, GlRequest, PossiblyCurrent, WindowedContext};

use gl::types::*;

use rustic_gl::error::GlError;

use log::{debug, error, info};

use std::ffi::CStr;
use std::mem::size_of_val;
use std::ptr::null;

/// Corners of the quad in clip space, wound top right, bottom right, bottom left, top left.
pub const QUAD_VERTICES: [[f32; 3]; 4] = [
    [0.5, 0.5, 0.0],   // top right
    [0.5, -0.5, 0.0],  // bottom right
    [-0.5, -0.5, 0.0], // bottom left
    [-0.5, 0.5, 0.0],  // top left
];

/// Two triangles sharing the bottom right / top left diagonal.
pub const QUAD_INDICES: [u32; 6] = [
    0, 1, 3, // first triangle
    1, 2, 3, // second triangle
];

pub const VERTEX_SHADER_SOURCE: &str = include_str!("./vertex_shader.glsl");
pub const FRAGMENT_SHADER_SOURCE: &str = include_str!("./fragment_shader.glsl");

type VertexFormat = buffer_layout!([f32; 3]);

/// Create the window and its OpenGL context using glutin, make it current and load the GL
/// function pointers.
pub fn init_glutin_context(
    config: &Config,
    event_loop: &EventLoop<()>,
) -> Result<WindowedContext<PossiblyCurrent>> {
    let (width, height) = config.window_size;
    let window = WindowBuilder::new()
        .with_title(config.window_title.clone())
        .with_inner_size(LogicalSize::new(width, height))
        .with_resizable(config.resizable);

    let (major, minor) = config.gl_version;
    let profile = if config.core_profile {
        GlProfile::Core
    } else {
        GlProfile::Compatibility
    };
    let context = ContextBuilder::new()
        .with_gl(GlRequest::Specific(Api::OpenGl, (major, minor)))
        .with_gl_profile(profile)
        .with_gl_debug_flag(config.debug_context)
        .with_vsync(config.vsync)
        .build_windowed(window, event_loop)?;

    let context = unsafe { context.make_current().map_err(|(_, err)| err)? };
    gl::load_with(|symbol| context.get_proc_address(symbol) as *const _);

    info!(
        "created {}x{} window with OpenGL {}",
        width,
        height,
        gl_version_string().unwrap_or_else(|| "(unknown version)".to_string())
    );

    Ok(context)
}

fn gl_version_string() -> Option<String> {
    unsafe {
        let version = gl::GetString(gl::VERSION);
        if version.is_null() {
            return None;
        }
        Some(CStr::from_ptr(version as *const _).to_string_lossy().into_owned())
    }
}

fn stage_name(kind: GLenum) -> &'static str {
    match kind {
        gl::VERTEX_SHADER => "vertex",
        gl::FRAGMENT_SHADER => "fragment",
        _ => "unknown",
    }
}

/// Compile a single shader stage.
///
/// A failed compilation is logged and yields `None`; the caller carries on without that stage.
pub fn compile_shader(kind: GLenum, source: &str) -> Option<GLuint> {
    match rustic_gl::raw::create_shader(kind, source) {
        Ok(shader) => Some(shader),
        Err(GlError::ShaderCompilation(info)) => {
            error!(
                "{} shader compilation failed: {}",
                stage_name(kind),
                info.as_deref().unwrap_or("no information available")
            );
            None
        }
        Err(err) => {
            error!("an error occurred while compiling {} shader: {}", stage_name(kind), err);
            None
        }
    }
}

/// A linked (or failed-to-link) GPU program. Deleted on drop.
#[derive(Debug)]
pub struct ShaderProgram {
    pub program: GLuint,
}

impl ShaderProgram {
    /// Compile both stages, link them, then release the stages.
    ///
    /// Compile and link failures are logged only. The returned program is then unusable and
    /// draws nothing, but the render loop still runs.
    pub fn build(vertex_source: &str, fragment_source: &str, color: [f32; 4]) -> Result<Self> {
        let shaders = [
            compile_shader(gl::VERTEX_SHADER, vertex_source),
            compile_shader(gl::FRAGMENT_SHADER, fragment_source),
        ];

        let program = match rustic_gl::raw::create_program() {
            Ok(program) => program,
            Err(err) => {
                delete_shaders(&shaders);
                return Err(allocation_failed("shader program")(err));
            }
        };

        unsafe {
            build_program(program, &shaders);
        }
        delete_shaders(&shaders);

        unsafe {
            let location = gl::GetUniformLocation(program, b"u_color\0".as_ptr() as *const _);
            gl::UseProgram(program);
            gl::Uniform4f(location, color[0], color[1], color[2], color[3]);
            gl::UseProgram(0);
        }

        Ok(ShaderProgram { program })
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        debug!("deleting shader program {}", self.program);
        unsafe {
            gl::DeleteProgram(self.program);
        }
    }
}

unsafe fn build_program(program: GLuint, shaders: &[Option<GLuint>]) {
    for shader in shaders.iter() {
        if let &Some(shader) = shader {
            gl::AttachShader(program, shader);
        }
    }
    gl::LinkProgram(program);
    if let Err(err) = rustic_gl::raw::get_link_status(program) {
        error!("shader program linking failed: {}", err);
    }
    for shader in shaders {
        if let &Some(shader) = shader {
            gl::DetachShader(program, shader);
        }
    }
}

/// Turns a failed GL object allocation into an [`Error::Resource`] naming the object.
fn allocation_failed(what: &'static str) -> impl FnOnce(GlError) -> Error {
    move |err| {
        error!("could not create {}: {}", what, err);
        Error::Resource(what)
    }
}

fn delete_shaders(shaders: &[Option<GLuint>]) {
    for shader in shaders.iter().flatten() {
        unsafe {
            gl::DeleteShader(*shader);
        }
    }
}

/// Vertex array plus the vertex and element buffers it records. Immutable once uploaded.
#[derive(Debug)]
pub struct QuadMesh {
    pub vao: GLuint,
    pub vbo: GLuint,
    pub ebo: GLuint,
    pub index_count: GLsizei,
}

impl QuadMesh {
    pub fn upload(vertices: &[[f32; 3]], indices: &[u32]) -> Result<Self> {
        let vao = rustic_gl::raw::create_vao().map_err(allocation_failed("vertex array"))?;
        let mut mesh = QuadMesh {
            vao,
            vbo: 0,
            ebo: 0,
            index_count: indices.len() as _,
        };
        mesh.vbo = rustic_gl::raw::create_buffer().map_err(allocation_failed("vertex buffer"))?;
        mesh.ebo = rustic_gl::raw::create_buffer().map_err(allocation_failed("element buffer"))?;

        unsafe {
            gl::BindVertexArray(mesh.vao);

            gl::BindBuffer(gl::ARRAY_BUFFER, mesh.vbo);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                size_of_val(vertices) as _,
                vertices.as_ptr() as *const _,
                gl::STATIC_DRAW,
            );

            // The element buffer binding is recorded by the bound VAO, so it must stay bound
            // until the VAO is unbound.
            gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, mesh.ebo);
            gl::BufferData(
                gl::ELEMENT_ARRAY_BUFFER,
                size_of_val(indices) as _,
                indices.as_ptr() as *const _,
                gl::STATIC_DRAW,
            );

            VertexFormat::declare(0);

            gl::BindVertexArray(0);
            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
            gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, 0);
        }

        Ok(mesh)
    }
}

impl Drop for QuadMesh {
    fn drop(&mut self) {
        debug!("deleting quad mesh (vao {}, vbo {}, ebo {})", self.vao, self.vbo, self.ebo);
        unsafe {
            // Zero names are silently ignored, which covers a partially built mesh.
            gl::DeleteVertexArrays(1, &self.vao);
            gl::DeleteBuffers(1, &self.vbo);
            gl::DeleteBuffers(1, &self.ebo);
        }
    }
}

/// Create the OpenGL resources needed for drawing the quad.
///
/// The context must be current.
pub fn init_renderer(config: &Config, viewport_width: u32, viewport_height: u32) -> Result<Renderer> {
    let program = ShaderProgram::build(
        VERTEX_SHADER_SOURCE,
        FRAGMENT_SHADER_SOURCE,
        config.quad_color,
    )?;
    let mesh = QuadMesh::upload(&QUAD_VERTICES, &QUAD_INDICES)?;

    Ok(Renderer {
        program,
        mesh,
        toggle: ModeToggle::new(config.alternate_polygon_mode),
        clear_color: config.clear_color,
        vp_width: viewport_width as _,
        vp_height: viewport_height as _,
    })
}

/// Owns the program and mesh and draws one frame at a time.
#[derive(Debug)]
pub struct Renderer {
    pub program: ShaderProgram,
    pub mesh: QuadMesh,
    pub toggle: ModeToggle,
    pub clear_color: [f32; 4],
    pub vp_width: i32,
    pub vp_height: i32,
}

impl Renderer {
    pub fn resize_viewport(&mut self, width: u32, height: u32) {
        self.vp_width = width as _;
        self.vp_height = height as _;
    }

    /// Draw the next frame, flipping between filled and wireframe as configured.
    pub fn redraw(&mut self) -> PolygonMode {
        let mode = self.toggle.next_frame();
        self.render_frame(mode);
        mode
    }

    /// Clear and draw the quad with the given polygon mode. Does not swap.
    pub fn render_frame(&self, mode: PolygonMode) {
        let [r, g, b, a] = self.clear_color;
        unsafe {
            gl::Viewport(0, 0, self.vp_width, self.vp_height);
            gl::ClearColor(r, g, b, a);
            gl::Clear(gl::COLOR_BUFFER_BIT);

            gl::UseProgram(self.program.program);
            gl::BindVertexArray(self.mesh.vao);
            gl::PolygonMode(gl::FRONT_AND_BACK, mode.to_gl_enum());
            gl::DrawElements(gl::TRIANGLES, self.mesh.index_count, gl::UNSIGNED_INT, null());
            gl::BindVertexArray(0);
            gl::UseProgram(0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_stay_within_the_vertex_array() {
        assert_eq!(QUAD_INDICES.len(), 6);
        assert!(QUAD_INDICES.iter().all(|&i| (i as usize) < QUAD_VERTICES.len()));
    }

    #[test]
    fn triangles_share_only_the_diagonal() {
        let first = &QUAD_INDICES[0..3];
        let second = &QUAD_INDICES[3..6];
        let mut shared: Vec<u32> = first.iter().copied().filter(|i| second.contains(i)).collect();
        shared.sort();
        assert_eq!(shared, vec![1, 3]);
        // Every corner is used by at least one triangle.
        assert!((0..4).all(|v| QUAD_INDICES.contains(&v)));
    }

    #[test]
    fn vertices_lie_inside_clip_space() {
        for [x, y, z] in QUAD_VERTICES.iter() {
            assert!(x.abs() < 1.0 && y.abs() < 1.0);
            assert_eq!(*z, 0.0);
        }
    }

    #[test]
    fn vertex_data_is_tightly_packed() {
        assert_eq!(size_of_val(&QUAD_VERTICES), 4 * 3 * std::mem::size_of::<f32>());
        assert_eq!(size_of_val(&QUAD_INDICES), 6 * std::mem::size_of::<u32>());
    }

    #[test]
    fn shader_sources_declare_the_expected_interface() {
        assert!(VERTEX_SHADER_SOURCE.starts_with("#version 330 core"));
        assert!(VERTEX_SHADER_SOURCE.contains("layout (location = 0) in vec3 aPos;"));
        assert!(FRAGMENT_SHADER_SOURCE.starts_with("#version 330 core"));
        assert!(FRAGMENT_SHADER_SOURCE.contains("uniform vec4 u_color;"));
    }

    #[test]
    fn names_shader_stages() {
        assert_eq!(stage_name(gl::VERTEX_SHADER), "vertex");
        assert_eq!(stage_name(gl::FRAGMENT_SHADER), "fragment");
        assert_eq!(stage_name(gl::GEOMETRY_SHADER), "unknown");
        assert_eq!(stage_name(0), "unknown");
    }

    #[test]
    fn allocation_failures_name_the_object() {
        let err = allocation_failed("element buffer")(GlError::ShaderCompilation(None));
        match err {
            Error::Resource(what) => assert_eq!(what, "element buffer"),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
