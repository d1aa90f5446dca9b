/// GlGraphicsDevice - OpenGL implementation of the GraphicsDevice trait
///
/// Thin wrapper over a `glow::Context`. Engine handles carry the raw GL
/// object names; the name 0 is never handed out, so a zero handle is
/// reported and the call skipped.
///
/// The context must be current on the calling thread for the whole lifetime
/// of this device and of every object created through it.

use std::num::NonZeroU32;

use firstlight_engine::firstlight::device::{
    BufferHandle, BufferTarget, BufferUsage, ClearMask, GraphicsDevice, IndexType, PolygonMode,
    PrimitiveTopology, ProgramHandle, ShaderHandle, ShaderStage, VertexArrayHandle,
    VertexAttribute, Viewport,
};
use firstlight_engine::firstlight::Result;
use firstlight_engine::glam::Vec4;
use firstlight_engine::{engine_debug, engine_err, engine_error, engine_warn};
use glow::HasContext;

use crate::gl_format::{
    buffer_format_to_gl, buffer_target_to_gl, buffer_usage_to_gl, clear_mask_to_gl,
    index_type_to_gl, polygon_mode_to_gl, shader_stage_to_gl, topology_to_gl,
};

const SOURCE: &str = "firstlight::gl::Device";

fn native_shader(handle: ShaderHandle) -> Option<glow::NativeShader> {
    NonZeroU32::new(handle.0).map(glow::NativeShader)
}

fn native_program(handle: ProgramHandle) -> Option<glow::NativeProgram> {
    NonZeroU32::new(handle.0).map(glow::NativeProgram)
}

fn native_buffer(handle: BufferHandle) -> Option<glow::NativeBuffer> {
    NonZeroU32::new(handle.0).map(glow::NativeBuffer)
}

fn native_vertex_array(handle: VertexArrayHandle) -> Option<glow::NativeVertexArray> {
    NonZeroU32::new(handle.0).map(glow::NativeVertexArray)
}

fn null_handle(call: &str) {
    engine_error!(SOURCE, "{}: null object name", call);
}

/// Human-readable name of a `glGetError` code
pub(crate) fn gl_error_name(code: u32) -> &'static str {
    match code {
        glow::INVALID_ENUM => "GL_INVALID_ENUM",
        glow::INVALID_VALUE => "GL_INVALID_VALUE",
        glow::INVALID_OPERATION => "GL_INVALID_OPERATION",
        glow::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        glow::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        glow::STACK_UNDERFLOW => "GL_STACK_UNDERFLOW",
        glow::STACK_OVERFLOW => "GL_STACK_OVERFLOW",
        _ => "unknown GL error",
    }
}

/// OpenGL graphics device
pub struct GlGraphicsDevice {
    gl: glow::Context,
    /// Drain `glGetError` after uploads, attribute setup and draws
    check_errors: bool,
}

impl GlGraphicsDevice {
    /// Wrap a loaded context; error checks follow `debug_assertions`
    pub fn new(gl: glow::Context) -> Self {
        Self {
            gl,
            check_errors: cfg!(debug_assertions),
        }
    }

    pub fn with_error_checks(mut self, enabled: bool) -> Self {
        self.check_errors = enabled;
        self
    }

    /// Underlying glow context
    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }

    /// Log every pending GL error raised by `call`
    fn check_error(&self, call: &str) {
        if !self.check_errors {
            return;
        }
        loop {
            let code = unsafe { self.gl.get_error() };
            if code == glow::NO_ERROR {
                break;
            }
            engine_warn!(SOURCE, "{} raised {} (0x{:04X})", call, gl_error_name(code), code);
        }
    }
}

impl GraphicsDevice for GlGraphicsDevice {
    fn description(&self) -> String {
        unsafe {
            format!(
                "OpenGL {} ({}, {})",
                self.gl.get_parameter_string(glow::VERSION),
                self.gl.get_parameter_string(glow::RENDERER),
                self.gl.get_parameter_string(glow::VENDOR)
            )
        }
    }

    fn max_vertex_attribs(&self) -> u32 {
        let count = unsafe { self.gl.get_parameter_i32(glow::MAX_VERTEX_ATTRIBS) };
        count.max(0) as u32
    }

    // ===== SHADER OBJECTS =====

    fn create_shader(&self, stage: ShaderStage) -> Result<ShaderHandle> {
        let shader = unsafe { self.gl.create_shader(shader_stage_to_gl(stage)) }
            .map_err(|e| engine_err!(SOURCE, "Failed to create {} shader: {}", stage.name(), e))?;
        engine_debug!(SOURCE, "Created {} shader {}", stage.name(), shader.0);
        Ok(ShaderHandle(shader.0.get()))
    }

    fn shader_source(&self, shader: ShaderHandle, source: &str) {
        match native_shader(shader) {
            Some(shader) => unsafe { self.gl.shader_source(shader, source) },
            None => null_handle("shader_source"),
        }
    }

    fn compile_shader(&self, shader: ShaderHandle) {
        match native_shader(shader) {
            Some(shader) => unsafe { self.gl.compile_shader(shader) },
            None => null_handle("compile_shader"),
        }
    }

    fn shader_compile_status(&self, shader: ShaderHandle) -> bool {
        native_shader(shader).is_some_and(|shader| unsafe { self.gl.get_shader_compile_status(shader) })
    }

    fn shader_info_log(&self, shader: ShaderHandle) -> String {
        native_shader(shader)
            .map(|shader| unsafe { self.gl.get_shader_info_log(shader) })
            .unwrap_or_default()
    }

    fn delete_shader(&self, shader: ShaderHandle) {
        match native_shader(shader) {
            Some(shader) => unsafe { self.gl.delete_shader(shader) },
            None => null_handle("delete_shader"),
        }
    }

    // ===== PROGRAM OBJECTS =====

    fn create_program(&self) -> Result<ProgramHandle> {
        let program = unsafe { self.gl.create_program() }
            .map_err(|e| engine_err!(SOURCE, "Failed to create program: {}", e))?;
        Ok(ProgramHandle(program.0.get()))
    }

    fn attach_shader(&self, program: ProgramHandle, shader: ShaderHandle) {
        match (native_program(program), native_shader(shader)) {
            (Some(program), Some(shader)) => unsafe { self.gl.attach_shader(program, shader) },
            _ => null_handle("attach_shader"),
        }
    }

    fn detach_shader(&self, program: ProgramHandle, shader: ShaderHandle) {
        match (native_program(program), native_shader(shader)) {
            (Some(program), Some(shader)) => unsafe { self.gl.detach_shader(program, shader) },
            _ => null_handle("detach_shader"),
        }
    }

    fn link_program(&self, program: ProgramHandle) {
        match native_program(program) {
            Some(program) => unsafe { self.gl.link_program(program) },
            None => null_handle("link_program"),
        }
    }

    fn program_link_status(&self, program: ProgramHandle) -> bool {
        native_program(program).is_some_and(|program| unsafe { self.gl.get_program_link_status(program) })
    }

    fn program_info_log(&self, program: ProgramHandle) -> String {
        native_program(program)
            .map(|program| unsafe { self.gl.get_program_info_log(program) })
            .unwrap_or_default()
    }

    fn use_program(&self, program: Option<ProgramHandle>) {
        unsafe { self.gl.use_program(program.and_then(native_program)) }
    }

    fn delete_program(&self, program: ProgramHandle) {
        match native_program(program) {
            Some(program) => unsafe { self.gl.delete_program(program) },
            None => null_handle("delete_program"),
        }
    }

    // ===== VERTEX ARRAYS & BUFFERS =====

    fn create_vertex_array(&self) -> Result<VertexArrayHandle> {
        let vertex_array = unsafe { self.gl.create_vertex_array() }
            .map_err(|e| engine_err!(SOURCE, "Failed to create vertex array: {}", e))?;
        Ok(VertexArrayHandle(vertex_array.0.get()))
    }

    fn bind_vertex_array(&self, vertex_array: Option<VertexArrayHandle>) {
        unsafe { self.gl.bind_vertex_array(vertex_array.and_then(native_vertex_array)) }
    }

    fn delete_vertex_array(&self, vertex_array: VertexArrayHandle) {
        match native_vertex_array(vertex_array) {
            Some(vertex_array) => unsafe { self.gl.delete_vertex_array(vertex_array) },
            None => null_handle("delete_vertex_array"),
        }
    }

    fn create_buffer(&self) -> Result<BufferHandle> {
        let buffer = unsafe { self.gl.create_buffer() }
            .map_err(|e| engine_err!(SOURCE, "Failed to create buffer: {}", e))?;
        Ok(BufferHandle(buffer.0.get()))
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<BufferHandle>) {
        unsafe { self.gl.bind_buffer(buffer_target_to_gl(target), buffer.and_then(native_buffer)) }
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8], usage: BufferUsage) {
        unsafe {
            self.gl
                .buffer_data_u8_slice(buffer_target_to_gl(target), data, buffer_usage_to_gl(usage));
        }
        self.check_error("buffer_data");
    }

    fn delete_buffer(&self, buffer: BufferHandle) {
        match native_buffer(buffer) {
            Some(buffer) => unsafe { self.gl.delete_buffer(buffer) },
            None => null_handle("delete_buffer"),
        }
    }

    fn vertex_attrib_pointer(&self, attribute: &VertexAttribute, stride: u32) {
        let (size, data_type) = buffer_format_to_gl(attribute.format);
        unsafe {
            self.gl.vertex_attrib_pointer_f32(
                attribute.location,
                size,
                data_type,
                attribute.normalized,
                stride as i32,
                attribute.offset as i32,
            );
        }
        self.check_error("vertex_attrib_pointer");
    }

    fn enable_vertex_attrib_array(&self, location: u32) {
        unsafe { self.gl.enable_vertex_attrib_array(location) }
    }

    // ===== FRAME =====

    fn set_viewport(&self, viewport: Viewport) {
        unsafe {
            self.gl.viewport(viewport.x, viewport.y, viewport.width as i32, viewport.height as i32);
        }
    }

    fn set_polygon_mode(&self, mode: PolygonMode) {
        unsafe { self.gl.polygon_mode(glow::FRONT_AND_BACK, polygon_mode_to_gl(mode)) }
    }

    fn set_clear_color(&self, color: Vec4) {
        unsafe { self.gl.clear_color(color.x, color.y, color.z, color.w) }
    }

    fn clear(&self, mask: ClearMask) {
        unsafe { self.gl.clear(clear_mask_to_gl(mask)) }
    }

    fn draw_elements(&self, topology: PrimitiveTopology, count: u32, index_type: IndexType, offset: u32) {
        unsafe {
            self.gl.draw_elements(
                topology_to_gl(topology),
                count as i32,
                index_type_to_gl(index_type),
                offset as i32,
            );
        }
        self.check_error("draw_elements");
    }
}
