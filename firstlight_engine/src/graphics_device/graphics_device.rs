/// GraphicsDevice trait - the low-level device interface
///
/// A thin, typed mirror of the immediate-mode calls the engine needs
/// (shader objects, program objects, buffers, vertex arrays, draw).
/// Implemented by backend devices (e.g. GlGraphicsDevice) and by
/// MockGraphicsDevice for headless tests.
///
/// Devices are single-threaded: a GL context is current on one thread only,
/// so the trait is neither `Send` nor `Sync` and is shared as
/// `Rc<dyn GraphicsDevice>`.

use bitflags::bitflags;
use glam::Vec4;

use crate::error::Result;

// ============================================================================
// Handles
// ============================================================================

/// Device shader object name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderHandle(pub u32);

/// Device program object name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramHandle(pub u32);

/// Device buffer object name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferHandle(pub u32);

/// Device vertex array object name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexArrayHandle(pub u32);

// ============================================================================
// Enums and descriptors
// ============================================================================

/// Shader stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex shader
    Vertex,
    /// Fragment/Pixel shader
    Fragment,
}

impl ShaderStage {
    /// Lowercase stage name used in diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        }
    }
}

/// Buffer binding target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferTarget {
    /// Vertex attribute data (GL_ARRAY_BUFFER)
    Array,
    /// Index data, captured by the bound vertex array (GL_ELEMENT_ARRAY_BUFFER)
    ElementArray,
}

/// Usage hint for buffer uploads
///
/// Affects device memory placement only, never correctness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BufferUsage {
    /// Written once, drawn many times
    #[default]
    StaticDraw,
    /// Rewritten occasionally, drawn many times
    DynamicDraw,
    /// Written once, drawn a few times
    StreamDraw,
}

/// Buffer data format for vertex attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum BufferFormat {
    R32_SFLOAT,          // float (4 bytes)
    R32G32_SFLOAT,       // vec2 (8 bytes)
    R32G32B32_SFLOAT,    // vec3 (12 bytes)
    R32G32B32A32_SFLOAT, // vec4 (16 bytes)
}

impl BufferFormat {
    /// Number of scalar components
    pub fn component_count(&self) -> u32 {
        match self {
            BufferFormat::R32_SFLOAT => 1,
            BufferFormat::R32G32_SFLOAT => 2,
            BufferFormat::R32G32B32_SFLOAT => 3,
            BufferFormat::R32G32B32A32_SFLOAT => 4,
        }
    }

    /// Size in bytes of one element
    pub fn size_bytes(&self) -> u32 {
        self.component_count() * 4
    }
}

/// Index buffer element type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexType {
    /// 16-bit indices (max 65535 vertices)
    U16,
    /// 32-bit indices
    U32,
}

impl IndexType {
    /// Size in bytes of one index element
    pub fn size_bytes(&self) -> u32 {
        match self {
            IndexType::U16 => 2,
            IndexType::U32 => 4,
        }
    }
}

/// Primitive topology for draw calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveTopology {
    /// Triangle list
    TriangleList,
    /// Line list
    LineList,
    /// Point list
    PointList,
}

/// Polygon rasterization mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PolygonMode {
    /// Fill polygons
    #[default]
    Fill,
    /// Draw edges only (wireframe)
    Line,
    /// Draw vertices only
    Point,
}

/// Vertex attribute description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Attribute location in shader (`layout (location = N)`)
    pub location: u32,
    /// Data type and component count
    pub format: BufferFormat,
    /// Whether integer data is normalized to [0, 1] / [-1, 1]
    pub normalized: bool,
    /// Offset in bytes from the start of the vertex
    pub offset: u32,
}

/// Visible drawing rectangle, in framebuffer pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

bitflags! {
    /// Framebuffer planes to clear
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ClearMask: u32 {
        const COLOR = 1 << 0;
        const DEPTH = 1 << 1;
        const STENCIL = 1 << 2;
    }
}

// ============================================================================
// GraphicsDevice trait
// ============================================================================

/// Low-level graphics device
///
/// Every call is synchronous. Object names returned by `create_*` stay valid
/// until the matching `delete_*`; owning wrappers (CompiledShader,
/// LinkedProgram, GeometryBufferSet) issue the deletes from `Drop`.
pub trait GraphicsDevice {
    /// Human-readable backend description (vendor / version)
    fn description(&self) -> String;

    /// Maximum number of vertex attribute slots
    fn max_vertex_attribs(&self) -> u32;

    // ===== SHADER OBJECTS =====

    /// Allocate a shader object of the given stage
    fn create_shader(&self, stage: ShaderStage) -> Result<ShaderHandle>;

    /// Replace the source of a shader object (one string, no includes)
    fn shader_source(&self, shader: ShaderHandle, source: &str);

    /// Compile the shader object (blocking)
    fn compile_shader(&self, shader: ShaderHandle);

    /// Compile status of the last compilation
    fn shader_compile_status(&self, shader: ShaderHandle) -> bool;

    /// Full compiler info log (may be empty)
    fn shader_info_log(&self, shader: ShaderHandle) -> String;

    /// Delete a shader object
    fn delete_shader(&self, shader: ShaderHandle);

    // ===== PROGRAM OBJECTS =====

    /// Allocate a program object
    fn create_program(&self) -> Result<ProgramHandle>;

    /// Attach a shader object to a program
    fn attach_shader(&self, program: ProgramHandle, shader: ShaderHandle);

    /// Detach a shader object from a program
    fn detach_shader(&self, program: ProgramHandle, shader: ShaderHandle);

    /// Link the program (blocking)
    fn link_program(&self, program: ProgramHandle);

    /// Link status of the last link
    fn program_link_status(&self, program: ProgramHandle) -> bool;

    /// Full linker info log (may be empty)
    fn program_info_log(&self, program: ProgramHandle) -> String;

    /// Make a program current (None unbinds)
    fn use_program(&self, program: Option<ProgramHandle>);

    /// Delete a program object
    fn delete_program(&self, program: ProgramHandle);

    // ===== BUFFERS AND VERTEX ARRAYS =====

    /// Allocate a vertex array object
    fn create_vertex_array(&self) -> Result<VertexArrayHandle>;

    /// Bind a vertex array object (None unbinds)
    fn bind_vertex_array(&self, vertex_array: Option<VertexArrayHandle>);

    /// Delete a vertex array object
    fn delete_vertex_array(&self, vertex_array: VertexArrayHandle);

    /// Allocate a buffer object
    fn create_buffer(&self) -> Result<BufferHandle>;

    /// Bind a buffer to a target (None unbinds)
    fn bind_buffer(&self, target: BufferTarget, buffer: Option<BufferHandle>);

    /// Upload the full byte range to the buffer bound at `target`
    fn buffer_data(&self, target: BufferTarget, data: &[u8], usage: BufferUsage);

    /// Delete a buffer object
    fn delete_buffer(&self, buffer: BufferHandle);

    /// Describe an attribute of the currently bound array buffer
    fn vertex_attrib_pointer(&self, attribute: &VertexAttribute, stride: u32);

    /// Enable an attribute slot on the bound vertex array
    fn enable_vertex_attrib_array(&self, location: u32);

    // ===== FRAME =====

    /// Set the visible drawing rectangle
    fn set_viewport(&self, viewport: Viewport);

    /// Set the polygon rasterization mode (front and back faces)
    fn set_polygon_mode(&self, mode: PolygonMode);

    /// Set the color used by `clear`
    fn set_clear_color(&self, color: Vec4);

    /// Clear the selected framebuffer planes
    fn clear(&self, mask: ClearMask);

    /// Draw `count` indices from the element buffer of the bound vertex array
    ///
    /// # Arguments
    ///
    /// * `topology` - Primitive type
    /// * `count` - Number of index elements (not primitives)
    /// * `index_type` - Element type of the index buffer
    /// * `offset` - Byte offset into the index buffer
    fn draw_elements(&self, topology: PrimitiveTopology, count: u32, index_type: IndexType, offset: u32);
}
