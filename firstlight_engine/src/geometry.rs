//! Geometry buffer set.
//!
//! Uploads a flat float vertex array and a u32 index list into device
//! buffers, and records in a vertex array object how the vertex bytes map to
//! shader inputs.
//!
//! # Upload sequence
//!
//! ```text
//! create VAO, VBO, EBO
//! bind VAO                              (must precede every buffer binding)
//! bind VBO → ARRAY          upload vertices.len() * 4 bytes
//! bind EBO → ELEMENT_ARRAY  upload indices.len() * 4 bytes   (captured by VAO)
//! attribute pointers + enable slots     (captured by VAO)
//! unbind ARRAY, unbind VAO
//! ```

use std::fmt;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::graphics_device::{
    BufferFormat, BufferHandle, BufferTarget, BufferUsage, GraphicsDevice, IndexType,
    VertexArrayHandle, VertexAttribute,
};

// ============================================================================
// VERTEX LAYOUT
// ============================================================================

/// How the bytes of one vertex map to shader input attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexLayout {
    /// Stride in bytes between consecutive vertices
    pub stride: u32,
    /// Attributes read from each vertex
    pub attributes: Vec<VertexAttribute>,
}

impl VertexLayout {
    /// Single `vec3` position at slot 0, tightly packed (stride 12, offset 0)
    pub fn position_only() -> Self {
        Self {
            stride: 3 * std::mem::size_of::<f32>() as u32,
            attributes: vec![VertexAttribute {
                location: 0,
                format: BufferFormat::R32G32B32_SFLOAT,
                normalized: false,
                offset: 0,
            }],
        }
    }

    /// Number of whole vertices in a buffer of `byte_len` bytes
    pub fn vertex_count(&self, byte_len: usize) -> usize {
        if self.stride == 0 {
            0
        } else {
            byte_len / self.stride as usize
        }
    }

    /// Check stride and attribute bounds
    pub fn validate(&self) -> Result<()> {
        if self.stride == 0 {
            return Err(invalid("Vertex layout stride must be non-zero".to_string()));
        }
        if self.attributes.is_empty() {
            return Err(invalid("Vertex layout must have at least one attribute".to_string()));
        }
        for attribute in &self.attributes {
            let end = attribute.offset + attribute.format.size_bytes();
            if end > self.stride {
                return Err(invalid(format!(
                    "Attribute at location {} ends at byte {} past the stride of {}",
                    attribute.location, end, self.stride
                )));
            }
        }
        Ok(())
    }
}

impl Default for VertexLayout {
    fn default() -> Self {
        Self::position_only()
    }
}

fn invalid(message: String) -> Error {
    crate::engine_error!("firstlight::Geometry", "{}", message);
    Error::InvalidResource(message)
}

/// Index count as a draw call takes it
fn draw_index_count(len: usize) -> Result<u32> {
    u32::try_from(len)
        .map_err(|_| invalid(format!("{} indices exceed the {} a draw call can address", len, u32::MAX)))
}

/// Check that every index addresses an existing vertex
///
/// # Errors
///
/// `InvalidResource` naming the first offending index and how many are out
/// of range.
pub fn validate_indices(indices: &[u32], vertex_count: usize) -> Result<()> {
    let mut out_of_range = indices.iter().filter(|&&i| i as usize >= vertex_count);
    match out_of_range.next() {
        None => Ok(()),
        Some(first) => Err(Error::InvalidResource(format!(
            "{} index value(s) out of range for {} vertices (first: {})",
            1 + out_of_range.count(),
            vertex_count,
            first
        ))),
    }
}

// ============================================================================
// GEOMETRY BUFFER SET
// ============================================================================

/// Vertex buffer, index buffer and the vertex array describing them
///
/// All three device objects are deleted when this value is dropped.
pub struct GeometryBufferSet {
    device: Rc<dyn GraphicsDevice>,
    vertex_array: VertexArrayHandle,
    vertex_buffer: BufferHandle,
    index_buffer: BufferHandle,
    vertex_buffer_size: usize,
    index_buffer_size: usize,
    vertex_count: usize,
    index_count: u32,
}

impl GeometryBufferSet {
    /// Upload vertices and indices and describe the layout to the device
    ///
    /// Index values are not enforced: out-of-range indices are logged as a
    /// warning and the upload proceeds (see `validate_indices`).
    ///
    /// # Errors
    ///
    /// `InvalidResource` for empty data, an invalid layout or more than
    /// `u32::MAX` indices, or a backend
    /// error if a device object cannot be allocated.
    pub fn upload(
        device: &Rc<dyn GraphicsDevice>,
        vertices: &[f32],
        indices: &[u32],
        layout: &VertexLayout,
        usage: BufferUsage,
    ) -> Result<Self> {
        if vertices.is_empty() {
            return Err(invalid("Geometry must have at least one vertex".to_string()));
        }
        if indices.is_empty() {
            return Err(invalid("Geometry must have at least one index".to_string()));
        }
        layout.validate()?;
        let index_count = draw_index_count(indices.len())?;

        let vertex_bytes: &[u8] = bytemuck::cast_slice(vertices);
        let index_bytes: &[u8] = bytemuck::cast_slice(indices);
        let vertex_count = layout.vertex_count(vertex_bytes.len());

        if vertex_bytes.len() % layout.stride as usize != 0 {
            crate::engine_warn!(
                "firstlight::Geometry",
                "Vertex data ({} bytes) is not a multiple of the stride ({}); trailing bytes are unused",
                vertex_bytes.len(),
                layout.stride
            );
        }
        if let Err(e) = validate_indices(indices, vertex_count) {
            crate::engine_warn!("firstlight::Geometry", "{}", e);
        }

        let vertex_array = device.create_vertex_array()?;
        let vertex_buffer = match device.create_buffer() {
            Ok(buffer) => buffer,
            Err(e) => {
                device.delete_vertex_array(vertex_array);
                return Err(e);
            }
        };
        let index_buffer = match device.create_buffer() {
            Ok(buffer) => buffer,
            Err(e) => {
                device.delete_buffer(vertex_buffer);
                device.delete_vertex_array(vertex_array);
                return Err(e);
            }
        };

        device.bind_vertex_array(Some(vertex_array));

        device.bind_buffer(BufferTarget::Array, Some(vertex_buffer));
        device.buffer_data(BufferTarget::Array, vertex_bytes, usage);

        device.bind_buffer(BufferTarget::ElementArray, Some(index_buffer));
        device.buffer_data(BufferTarget::ElementArray, index_bytes, usage);

        for attribute in &layout.attributes {
            device.vertex_attrib_pointer(attribute, layout.stride);
            device.enable_vertex_attrib_array(attribute.location);
        }

        // The element binding stays recorded in the VAO
        device.bind_buffer(BufferTarget::Array, None);
        device.bind_vertex_array(None);

        crate::engine_debug!(
            "firstlight::Geometry",
            "Uploaded {} vertices ({} bytes) and {} indices ({} bytes)",
            vertex_count,
            vertex_bytes.len(),
            indices.len(),
            index_bytes.len()
        );

        Ok(Self {
            device: device.clone(),
            vertex_array,
            vertex_buffer,
            index_buffer,
            vertex_buffer_size: vertex_bytes.len(),
            index_buffer_size: index_bytes.len(),
            vertex_count,
            index_count,
        })
    }

    pub fn vertex_array(&self) -> VertexArrayHandle {
        self.vertex_array
    }

    pub fn vertex_buffer(&self) -> BufferHandle {
        self.vertex_buffer
    }

    pub fn index_buffer(&self) -> BufferHandle {
        self.index_buffer
    }

    /// Bytes uploaded to the vertex buffer
    pub fn vertex_buffer_size(&self) -> usize {
        self.vertex_buffer_size
    }

    /// Bytes uploaded to the index buffer
    pub fn index_buffer_size(&self) -> usize {
        self.index_buffer_size
    }

    /// Whole vertices addressable through the layout
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Number of index elements (what a draw call consumes)
    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    pub fn index_type(&self) -> IndexType {
        IndexType::U32
    }
}

impl fmt::Debug for GeometryBufferSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeometryBufferSet")
            .field("vertex_array", &self.vertex_array)
            .field("vertex_buffer", &self.vertex_buffer)
            .field("index_buffer", &self.index_buffer)
            .field("vertex_count", &self.vertex_count)
            .field("index_count", &self.index_count)
            .finish()
    }
}

impl Drop for GeometryBufferSet {
    fn drop(&mut self) {
        self.device.delete_vertex_array(self.vertex_array);
        self.device.delete_buffer(self.vertex_buffer);
        self.device.delete_buffer(self.index_buffer);
    }
}

#[cfg(test)]
#[path = "geometry_tests.rs"]
mod tests;
