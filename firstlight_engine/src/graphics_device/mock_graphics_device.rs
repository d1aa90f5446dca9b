/// Mock graphics device (no GPU required)
///
/// Records every call and keeps a small object model (shaders, programs,
/// buffers, vertex arrays) so tests can check what the engine asked the
/// device to do. The shader "compiler" performs a few structural checks on
/// GLSL-like sources and the "linker" checks stage completeness, which is
/// enough to drive success and failure paths without a driver.
///
/// Usage mistakes a real driver reports as GL errors (attribute setup with
/// no vertex array bound, drawing without a linked program, out-of-range
/// indices, ...) are appended to `errors()` instead of panicking.

use std::cell::RefCell;

use glam::Vec4;
use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::graphics_device::{
    BufferHandle, BufferTarget, BufferUsage, ClearMask, GraphicsDevice, IndexType,
    PolygonMode, PrimitiveTopology, ProgramHandle, ShaderHandle, ShaderStage,
    VertexArrayHandle, VertexAttribute, Viewport,
};

/// Default number of attribute slots reported by the mock
pub const MOCK_MAX_VERTEX_ATTRIBS: u32 = 16;

// ============================================================================
// Mock objects
// ============================================================================

/// Mock shader object
#[derive(Debug, Clone)]
pub struct MockShaderObject {
    pub stage: ShaderStage,
    pub source: String,
    pub compiled: bool,
    pub info_log: String,
    /// Deleted while still attached; released on last detach
    pub delete_pending: bool,
}

/// Mock program object
#[derive(Debug, Clone, Default)]
pub struct MockProgramObject {
    pub attached: Vec<ShaderHandle>,
    pub linked: bool,
    pub info_log: String,
    /// Stages that took part in the last successful link
    pub linked_stages: Vec<ShaderStage>,
}

/// Mock buffer object
#[derive(Debug, Clone, Default)]
pub struct MockBufferObject {
    pub data: Vec<u8>,
    pub usage: Option<BufferUsage>,
}

/// Attribute slot state captured by a vertex array
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockAttributeBinding {
    pub attribute: VertexAttribute,
    pub stride: u32,
    pub buffer: BufferHandle,
}

/// Mock vertex array object
#[derive(Debug, Clone, Default)]
pub struct MockVertexArrayObject {
    pub element_buffer: Option<BufferHandle>,
    pub attributes: FxHashMap<u32, MockAttributeBinding>,
    pub enabled: Vec<u32>,
}

/// A recorded draw call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockDrawCall {
    pub program: Option<ProgramHandle>,
    pub vertex_array: Option<VertexArrayHandle>,
    pub topology: PrimitiveTopology,
    pub count: u32,
    pub index_type: IndexType,
    pub offset: u32,
}

// ============================================================================
// Mock state
// ============================================================================

#[derive(Debug)]
struct MockState {
    next_name: u32,
    shaders: FxHashMap<u32, MockShaderObject>,
    programs: FxHashMap<u32, MockProgramObject>,
    buffers: FxHashMap<u32, MockBufferObject>,
    vertex_arrays: FxHashMap<u32, MockVertexArrayObject>,
    current_program: Option<ProgramHandle>,
    bound_vertex_array: Option<VertexArrayHandle>,
    bound_array_buffer: Option<BufferHandle>,
    viewport: Option<Viewport>,
    clear_color: Vec4,
    polygon_mode: PolygonMode,
    clear_count: u32,
    max_vertex_attribs: u32,
    fail_allocations: bool,
    commands: Vec<String>,
    errors: Vec<String>,
    draw_calls: Vec<MockDrawCall>,
}

impl MockState {
    fn new() -> Self {
        Self {
            next_name: 1,
            shaders: FxHashMap::default(),
            programs: FxHashMap::default(),
            buffers: FxHashMap::default(),
            vertex_arrays: FxHashMap::default(),
            current_program: None,
            bound_vertex_array: None,
            bound_array_buffer: None,
            viewport: None,
            clear_color: Vec4::ZERO,
            polygon_mode: PolygonMode::Fill,
            clear_count: 0,
            max_vertex_attribs: MOCK_MAX_VERTEX_ATTRIBS,
            fail_allocations: false,
            commands: Vec::new(),
            errors: Vec::new(),
            draw_calls: Vec::new(),
        }
    }

    /// Allocate a fresh object name (0 is never handed out, as in GL)
    fn allocate(&mut self, what: &str) -> Result<u32> {
        if self.fail_allocations {
            return Err(Error::BackendError(format!("mock: cannot allocate {}", what)));
        }
        let name = self.next_name;
        self.next_name += 1;
        Ok(name)
    }

    fn is_attached_anywhere(&self, shader: ShaderHandle) -> bool {
        self.programs.values().any(|p| p.attached.contains(&shader))
    }

    fn bound_vao_mut(&mut self) -> Option<&mut MockVertexArrayObject> {
        let vao = self.bound_vertex_array?;
        self.vertex_arrays.get_mut(&vao.0)
    }

    /// Number of whole vertices the attribute binding can address
    fn vertex_capacity(&self, binding: &MockAttributeBinding) -> u64 {
        let len = self.buffers.get(&binding.buffer.0).map_or(0, |b| b.data.len() as u64);
        let start = binding.attribute.offset as u64;
        let size = binding.attribute.format.size_bytes() as u64;
        let stride = binding.stride.max(binding.attribute.format.size_bytes()) as u64;
        if len < start + size {
            0
        } else {
            (len - start - size) / stride + 1
        }
    }
}

/// Structural checks standing in for a GLSL front end
fn mock_compile(source: &str) -> std::result::Result<(), String> {
    let first_line = source.lines().map(str::trim).find(|l| !l.is_empty());
    let Some(first_line) = first_line else {
        return Err("0:1(1): error: empty shader source".to_string());
    };
    if !first_line.starts_with("#version") {
        return Err("0:1(1): error: missing #version directive".to_string());
    }

    let mut depth: i64 = 0;
    for (number, line) in source.lines().enumerate() {
        for c in line.chars() {
            match c {
                '{' => depth += 1,
                '}' => depth -= 1,
                _ => {}
            }
            if depth < 0 {
                return Err(format!("{}:1: error: syntax error, unexpected '}}'", number + 1));
            }
        }
    }
    if depth != 0 {
        return Err(format!(
            "{}:1: error: syntax error, unexpected end of file",
            source.lines().count()
        ));
    }

    if !source.contains("void main") {
        return Err("0:0(0): error: entry point `main` not defined".to_string());
    }
    Ok(())
}

// ============================================================================
// MockGraphicsDevice
// ============================================================================

/// Headless device recording calls and simulating object state
#[derive(Debug)]
pub struct MockGraphicsDevice {
    state: RefCell<MockState>,
}

impl Default for MockGraphicsDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGraphicsDevice {
    pub fn new() -> Self {
        Self {
            state: RefCell::new(MockState::new()),
        }
    }

    /// Make every subsequent `create_*` call fail
    pub fn set_fail_allocations(&self, fail: bool) {
        self.state.borrow_mut().fail_allocations = fail;
    }

    /// Override the reported attribute slot count
    pub fn set_max_vertex_attribs(&self, count: u32) {
        self.state.borrow_mut().max_vertex_attribs = count;
    }

    fn record(&self, command: impl Into<String>) {
        self.state.borrow_mut().commands.push(command.into());
    }

    // ===== INSPECTION =====

    /// Names of the recorded calls, in order
    pub fn commands(&self) -> Vec<String> {
        self.state.borrow().commands.clone()
    }

    /// Forget recorded calls (object state is kept)
    pub fn clear_commands(&self) {
        self.state.borrow_mut().commands.clear();
    }

    /// Usage errors a real driver would have raised
    pub fn errors(&self) -> Vec<String> {
        self.state.borrow().errors.clone()
    }

    pub fn draw_calls(&self) -> Vec<MockDrawCall> {
        self.state.borrow().draw_calls.clone()
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.state.borrow().viewport
    }

    pub fn current_clear_color(&self) -> Vec4 {
        self.state.borrow().clear_color
    }

    pub fn polygon_mode(&self) -> PolygonMode {
        self.state.borrow().polygon_mode
    }

    pub fn clear_count(&self) -> u32 {
        self.state.borrow().clear_count
    }

    pub fn current_program(&self) -> Option<ProgramHandle> {
        self.state.borrow().current_program
    }

    pub fn bound_vertex_array(&self) -> Option<VertexArrayHandle> {
        self.state.borrow().bound_vertex_array
    }

    pub fn bound_array_buffer(&self) -> Option<BufferHandle> {
        self.state.borrow().bound_array_buffer
    }

    pub fn shader(&self, shader: ShaderHandle) -> Option<MockShaderObject> {
        self.state.borrow().shaders.get(&shader.0).cloned()
    }

    pub fn program(&self, program: ProgramHandle) -> Option<MockProgramObject> {
        self.state.borrow().programs.get(&program.0).cloned()
    }

    pub fn buffer(&self, buffer: BufferHandle) -> Option<MockBufferObject> {
        self.state.borrow().buffers.get(&buffer.0).cloned()
    }

    pub fn vertex_array(&self, vertex_array: VertexArrayHandle) -> Option<MockVertexArrayObject> {
        self.state.borrow().vertex_arrays.get(&vertex_array.0).cloned()
    }

    /// Shader objects not deleted (pending deletes excluded)
    pub fn live_shader_count(&self) -> usize {
        self.state.borrow().shaders.values().filter(|s| !s.delete_pending).count()
    }

    pub fn live_program_count(&self) -> usize {
        self.state.borrow().programs.len()
    }

    pub fn live_buffer_count(&self) -> usize {
        self.state.borrow().buffers.len()
    }

    pub fn live_vertex_array_count(&self) -> usize {
        self.state.borrow().vertex_arrays.len()
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn description(&self) -> String {
        "FirstLight mock device".to_string()
    }

    fn max_vertex_attribs(&self) -> u32 {
        self.state.borrow().max_vertex_attribs
    }

    // ===== SHADER OBJECTS =====

    fn create_shader(&self, stage: ShaderStage) -> Result<ShaderHandle> {
        self.record(format!("create_shader({})", stage.name()));
        let mut state = self.state.borrow_mut();
        let name = state.allocate("shader")?;
        state.shaders.insert(name, MockShaderObject {
            stage,
            source: String::new(),
            compiled: false,
            info_log: String::new(),
            delete_pending: false,
        });
        Ok(ShaderHandle(name))
    }

    fn shader_source(&self, shader: ShaderHandle, source: &str) {
        self.record("shader_source");
        let mut state = self.state.borrow_mut();
        match state.shaders.get_mut(&shader.0) {
            Some(object) => object.source = source.to_string(),
            None => state.errors.push(format!("shader_source: unknown shader {}", shader.0)),
        }
    }

    fn compile_shader(&self, shader: ShaderHandle) {
        self.record("compile_shader");
        let mut state = self.state.borrow_mut();
        match state.shaders.get_mut(&shader.0) {
            Some(object) => match mock_compile(&object.source) {
                Ok(()) => {
                    object.compiled = true;
                    object.info_log.clear();
                }
                Err(log) => {
                    object.compiled = false;
                    object.info_log = log;
                }
            },
            None => state.errors.push(format!("compile_shader: unknown shader {}", shader.0)),
        }
    }

    fn shader_compile_status(&self, shader: ShaderHandle) -> bool {
        self.state.borrow().shaders.get(&shader.0).is_some_and(|s| s.compiled)
    }

    fn shader_info_log(&self, shader: ShaderHandle) -> String {
        self.state
            .borrow()
            .shaders
            .get(&shader.0)
            .map(|s| s.info_log.clone())
            .unwrap_or_default()
    }

    fn delete_shader(&self, shader: ShaderHandle) {
        self.record("delete_shader");
        let mut state = self.state.borrow_mut();
        if !state.shaders.contains_key(&shader.0) {
            state.errors.push(format!("delete_shader: unknown shader {}", shader.0));
            return;
        }
        if state.is_attached_anywhere(shader) {
            if let Some(object) = state.shaders.get_mut(&shader.0) {
                object.delete_pending = true;
            }
        } else {
            state.shaders.remove(&shader.0);
        }
    }

    // ===== PROGRAM OBJECTS =====

    fn create_program(&self) -> Result<ProgramHandle> {
        self.record("create_program");
        let mut state = self.state.borrow_mut();
        let name = state.allocate("program")?;
        state.programs.insert(name, MockProgramObject::default());
        Ok(ProgramHandle(name))
    }

    fn attach_shader(&self, program: ProgramHandle, shader: ShaderHandle) {
        self.record("attach_shader");
        let mut state = self.state.borrow_mut();
        if !state.shaders.contains_key(&shader.0) {
            state.errors.push(format!("attach_shader: unknown shader {}", shader.0));
            return;
        }
        let already_attached = match state.programs.get(&program.0) {
            Some(object) => object.attached.contains(&shader),
            None => {
                state.errors.push(format!("attach_shader: unknown program {}", program.0));
                return;
            }
        };
        if already_attached {
            state.errors.push(format!("attach_shader: shader {} already attached", shader.0));
        } else if let Some(object) = state.programs.get_mut(&program.0) {
            object.attached.push(shader);
        }
    }

    fn detach_shader(&self, program: ProgramHandle, shader: ShaderHandle) {
        self.record("detach_shader");
        let mut state = self.state.borrow_mut();
        let detached = match state.programs.get_mut(&program.0) {
            Some(object) => {
                let before = object.attached.len();
                object.attached.retain(|s| *s != shader);
                before != object.attached.len()
            }
            None => false,
        };
        if !detached {
            state.errors.push(format!("detach_shader: shader {} not attached to program {}", shader.0, program.0));
            return;
        }
        let pending = state.shaders.get(&shader.0).is_some_and(|s| s.delete_pending);
        if pending && !state.is_attached_anywhere(shader) {
            state.shaders.remove(&shader.0);
        }
    }

    fn link_program(&self, program: ProgramHandle) {
        self.record("link_program");
        let mut state = self.state.borrow_mut();
        let Some(attached) = state.programs.get(&program.0).map(|p| p.attached.clone()) else {
            state.errors.push(format!("link_program: unknown program {}", program.0));
            return;
        };

        let units: Vec<MockShaderObject> = attached
            .iter()
            .filter_map(|s| state.shaders.get(&s.0).cloned())
            .collect();

        let count = |stage: ShaderStage| units.iter().filter(|u| u.stage == stage).count();
        let outcome = if units.is_empty() {
            Err("error: no shaders attached to the program".to_string())
        } else if units.iter().any(|u| !u.compiled) {
            Err("error: linking with uncompiled shader".to_string())
        } else if count(ShaderStage::Vertex) == 0 {
            Err("error: program lacks a vertex shader stage".to_string())
        } else if count(ShaderStage::Fragment) == 0 {
            Err("error: program lacks a fragment shader stage".to_string())
        } else if count(ShaderStage::Vertex) > 1 || count(ShaderStage::Fragment) > 1 {
            Err("error: function `main' is multiply defined".to_string())
        } else {
            Ok(vec![ShaderStage::Vertex, ShaderStage::Fragment])
        };

        if let Some(object) = state.programs.get_mut(&program.0) {
            match outcome {
                Ok(stages) => {
                    object.linked = true;
                    object.info_log.clear();
                    object.linked_stages = stages;
                }
                Err(log) => {
                    object.linked = false;
                    object.info_log = log;
                    object.linked_stages.clear();
                }
            }
        }
    }

    fn program_link_status(&self, program: ProgramHandle) -> bool {
        self.state.borrow().programs.get(&program.0).is_some_and(|p| p.linked)
    }

    fn program_info_log(&self, program: ProgramHandle) -> String {
        self.state
            .borrow()
            .programs
            .get(&program.0)
            .map(|p| p.info_log.clone())
            .unwrap_or_default()
    }

    fn use_program(&self, program: Option<ProgramHandle>) {
        self.record("use_program");
        let mut state = self.state.borrow_mut();
        if let Some(handle) = program {
            if !state.programs.contains_key(&handle.0) {
                state.errors.push(format!("use_program: unknown program {}", handle.0));
                return;
            }
        }
        state.current_program = program;
    }

    fn delete_program(&self, program: ProgramHandle) {
        self.record("delete_program");
        let mut state = self.state.borrow_mut();
        let Some(object) = state.programs.remove(&program.0) else {
            state.errors.push(format!("delete_program: unknown program {}", program.0));
            return;
        };
        if state.current_program == Some(program) {
            state.current_program = None;
        }
        // Deleting a program detaches its shaders
        for shader in object.attached {
            let pending = state.shaders.get(&shader.0).is_some_and(|s| s.delete_pending);
            if pending && !state.is_attached_anywhere(shader) {
                state.shaders.remove(&shader.0);
            }
        }
    }

    // ===== BUFFERS AND VERTEX ARRAYS =====

    fn create_vertex_array(&self) -> Result<VertexArrayHandle> {
        self.record("create_vertex_array");
        let mut state = self.state.borrow_mut();
        let name = state.allocate("vertex array")?;
        state.vertex_arrays.insert(name, MockVertexArrayObject::default());
        Ok(VertexArrayHandle(name))
    }

    fn bind_vertex_array(&self, vertex_array: Option<VertexArrayHandle>) {
        self.record("bind_vertex_array");
        let mut state = self.state.borrow_mut();
        if let Some(handle) = vertex_array {
            if !state.vertex_arrays.contains_key(&handle.0) {
                state.errors.push(format!("bind_vertex_array: unknown vertex array {}", handle.0));
                return;
            }
        }
        state.bound_vertex_array = vertex_array;
    }

    fn delete_vertex_array(&self, vertex_array: VertexArrayHandle) {
        self.record("delete_vertex_array");
        let mut state = self.state.borrow_mut();
        if state.vertex_arrays.remove(&vertex_array.0).is_none() {
            state.errors.push(format!("delete_vertex_array: unknown vertex array {}", vertex_array.0));
        }
        if state.bound_vertex_array == Some(vertex_array) {
            state.bound_vertex_array = None;
        }
    }

    fn create_buffer(&self) -> Result<BufferHandle> {
        self.record("create_buffer");
        let mut state = self.state.borrow_mut();
        let name = state.allocate("buffer")?;
        state.buffers.insert(name, MockBufferObject::default());
        Ok(BufferHandle(name))
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<BufferHandle>) {
        self.record(format!("bind_buffer({:?})", target));
        let mut state = self.state.borrow_mut();
        if let Some(handle) = buffer {
            if !state.buffers.contains_key(&handle.0) {
                state.errors.push(format!("bind_buffer: unknown buffer {}", handle.0));
                return;
            }
        }
        match target {
            BufferTarget::Array => state.bound_array_buffer = buffer,
            BufferTarget::ElementArray => match state.bound_vao_mut() {
                Some(vao) => vao.element_buffer = buffer,
                None => state
                    .errors
                    .push("bind_buffer: element array binding requires a bound vertex array".to_string()),
            },
        }
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8], usage: BufferUsage) {
        self.record(format!("buffer_data({:?})", target));
        let mut state = self.state.borrow_mut();
        let bound = match target {
            BufferTarget::Array => state.bound_array_buffer,
            BufferTarget::ElementArray => state
                .bound_vertex_array
                .and_then(|vao| state.vertex_arrays.get(&vao.0))
                .and_then(|vao| vao.element_buffer),
        };
        match bound.and_then(|b| state.buffers.get_mut(&b.0)) {
            Some(buffer) => {
                buffer.data = data.to_vec();
                buffer.usage = Some(usage);
            }
            None => state.errors.push(format!("buffer_data: no buffer bound to {:?}", target)),
        }
    }

    fn delete_buffer(&self, buffer: BufferHandle) {
        self.record("delete_buffer");
        let mut state = self.state.borrow_mut();
        if state.buffers.remove(&buffer.0).is_none() {
            state.errors.push(format!("delete_buffer: unknown buffer {}", buffer.0));
        }
        if state.bound_array_buffer == Some(buffer) {
            state.bound_array_buffer = None;
        }
        for vao in state.vertex_arrays.values_mut() {
            if vao.element_buffer == Some(buffer) {
                vao.element_buffer = None;
            }
        }
    }

    fn vertex_attrib_pointer(&self, attribute: &VertexAttribute, stride: u32) {
        self.record("vertex_attrib_pointer");
        let mut state = self.state.borrow_mut();
        let max_vertex_attribs = state.max_vertex_attribs;
        if attribute.location >= max_vertex_attribs {
            state.errors.push(format!(
                "vertex_attrib_pointer: location {} exceeds {} slots",
                attribute.location, max_vertex_attribs
            ));
            return;
        }
        let Some(buffer) = state.bound_array_buffer else {
            state.errors.push("vertex_attrib_pointer: no array buffer bound".to_string());
            return;
        };
        match state.bound_vao_mut() {
            Some(vao) => {
                vao.attributes.insert(attribute.location, MockAttributeBinding {
                    attribute: *attribute,
                    stride,
                    buffer,
                });
            }
            None => state
                .errors
                .push("vertex_attrib_pointer: no vertex array bound".to_string()),
        }
    }

    fn enable_vertex_attrib_array(&self, location: u32) {
        self.record("enable_vertex_attrib_array");
        let mut state = self.state.borrow_mut();
        match state.bound_vao_mut() {
            Some(vao) => {
                if !vao.enabled.contains(&location) {
                    vao.enabled.push(location);
                }
            }
            None => state
                .errors
                .push("enable_vertex_attrib_array: no vertex array bound".to_string()),
        }
    }

    // ===== FRAME =====

    fn set_viewport(&self, viewport: Viewport) {
        self.record("set_viewport");
        self.state.borrow_mut().viewport = Some(viewport);
    }

    fn set_polygon_mode(&self, mode: PolygonMode) {
        self.record("set_polygon_mode");
        self.state.borrow_mut().polygon_mode = mode;
    }

    fn set_clear_color(&self, color: Vec4) {
        self.record("set_clear_color");
        self.state.borrow_mut().clear_color = color;
    }

    fn clear(&self, mask: ClearMask) {
        self.record("clear");
        let mut state = self.state.borrow_mut();
        if mask.is_empty() {
            state.errors.push("clear: empty mask".to_string());
        }
        state.clear_count += 1;
    }

    fn draw_elements(&self, topology: PrimitiveTopology, count: u32, index_type: IndexType, offset: u32) {
        self.record("draw_elements");
        let call = {
            let state = self.state.borrow();
            MockDrawCall {
                program: state.current_program,
                vertex_array: state.bound_vertex_array,
                topology,
                count,
                index_type,
                offset,
            }
        };
        let errors = self.validate_draw(&call);
        let mut state = self.state.borrow_mut();
        state.errors.extend(errors);
        state.draw_calls.push(call);
    }
}

impl MockGraphicsDevice {
    /// Checks a draw against current bindings; returns the errors found
    fn validate_draw(&self, call: &MockDrawCall) -> Vec<String> {
        let state = self.state.borrow();
        let mut errors = Vec::new();

        let linked = call
            .program
            .and_then(|p| state.programs.get(&p.0))
            .is_some_and(|p| p.linked);
        if !linked {
            errors.push("draw_elements: no linked program in use".to_string());
        }

        let Some(vao) = call.vertex_array.and_then(|v| state.vertex_arrays.get(&v.0)) else {
            errors.push("draw_elements: no vertex array bound".to_string());
            return errors;
        };
        let Some(indices) = vao.element_buffer.and_then(|b| state.buffers.get(&b.0)) else {
            errors.push("draw_elements: no element buffer bound".to_string());
            return errors;
        };

        let size = call.index_type.size_bytes() as usize;
        let start = call.offset as usize;
        let end = start + call.count as usize * size;
        if end > indices.data.len() {
            errors.push(format!(
                "draw_elements: reads {} bytes past an index buffer of {} bytes",
                end - indices.data.len(),
                indices.data.len()
            ));
            return errors;
        }

        let capacity = vao
            .enabled
            .iter()
            .filter_map(|location| vao.attributes.get(location))
            .map(|binding| state.vertex_capacity(binding))
            .min();
        let Some(capacity) = capacity else {
            return errors;
        };

        for chunk in indices.data[start..end].chunks_exact(size) {
            let index = match call.index_type {
                IndexType::U16 => u16::from_le_bytes([chunk[0], chunk[1]]) as u64,
                IndexType::U32 => u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]) as u64,
            };
            if index >= capacity {
                errors.push(format!(
                    "draw_elements: index {} out of range ({} vertices)",
                    index, capacity
                ));
            }
        }
        errors
    }
}

#[cfg(test)]
#[path = "mock_graphics_device_tests.rs"]
mod tests;
