//! Shader unit builder
//!
//! Compiles one shader stage from source text into a device shader object.
//! Compilation failure is not an `Err`: the returned `CompiledShader`
//! carries the status and a bounded diagnostic, and the caller decides
//! whether to continue (`is_compiled`) or abort (`into_result`).

use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::graphics_device::{GraphicsDevice, ShaderHandle};

pub use crate::graphics_device::ShaderStage;

/// Maximum number of diagnostic bytes kept from a compiler or linker log
pub const INFO_LOG_CAPACITY: usize = 512;

/// Substituted when a device reports failure with an empty log
const EMPTY_LOG_PLACEHOLDER: &str = "no diagnostic provided by the device";

/// Truncate a device info log to `INFO_LOG_CAPACITY` bytes
///
/// Cuts on a char boundary and strips trailing whitespace / NULs drivers
/// tend to append.
pub fn bounded_info_log(log: &str) -> String {
    let trimmed = log.trim_end_matches(|c: char| c == '\0' || c.is_whitespace());
    if trimmed.len() <= INFO_LOG_CAPACITY {
        return trimmed.to_string();
    }
    let mut end = INFO_LOG_CAPACITY;
    while !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    trimmed[..end].to_string()
}

/// Failure diagnostic: bounded, never empty
pub(crate) fn failure_diagnostic(log: &str) -> String {
    let bounded = bounded_info_log(log);
    if bounded.is_empty() {
        EMPTY_LOG_PLACEHOLDER.to_string()
    } else {
        bounded
    }
}

/// Immutable shader source text plus its stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    stage: ShaderStage,
    code: Cow<'static, str>,
}

impl ShaderSource {
    pub fn new(stage: ShaderStage, code: impl Into<Cow<'static, str>>) -> Self {
        Self {
            stage,
            code: code.into(),
        }
    }

    pub fn vertex(code: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ShaderStage::Vertex, code)
    }

    pub fn fragment(code: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ShaderStage::Fragment, code)
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    pub fn code(&self) -> &str {
        &self.code
    }
}

/// A device shader object and the outcome of its compilation
///
/// The device object is deleted when this value is dropped, unless it was
/// handed to `LinkedProgram::link`, which releases it after linking.
pub struct CompiledShader {
    device: Rc<dyn GraphicsDevice>,
    handle: ShaderHandle,
    stage: ShaderStage,
    compiled: bool,
    diagnostic: Option<String>,
}

impl CompiledShader {
    /// Compile a shader stage (blocking)
    ///
    /// # Errors
    ///
    /// Only when the device cannot allocate a shader object. A compilation
    /// failure is reported through `is_compiled()` / `diagnostic()`.
    pub fn compile(device: &Rc<dyn GraphicsDevice>, source: &ShaderSource) -> Result<Self> {
        let handle = device.create_shader(source.stage())?;
        device.shader_source(handle, source.code());
        device.compile_shader(handle);

        let compiled = device.shader_compile_status(handle);
        let diagnostic = if compiled {
            crate::engine_debug!("firstlight::Shader", "{} shader {} compiled", source.stage().name(), handle.0);
            None
        } else {
            let log = failure_diagnostic(&device.shader_info_log(handle));
            crate::engine_error!(
                "firstlight::Shader",
                "{} shader compilation failed:\n{}",
                source.stage().name(),
                log
            );
            Some(log)
        };

        Ok(Self {
            device: device.clone(),
            handle,
            stage: source.stage(),
            compiled,
            diagnostic,
        })
    }

    pub fn handle(&self) -> ShaderHandle {
        self.handle
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    pub fn is_compiled(&self) -> bool {
        self.compiled
    }

    /// Compiler diagnostic, present only when compilation failed
    pub fn diagnostic(&self) -> Option<&str> {
        self.diagnostic.as_deref()
    }

    /// Turn a failed compilation into `Error::ShaderCompileFailed`
    ///
    /// On failure the shader object is released before returning.
    pub fn into_result(self) -> Result<Self> {
        if self.compiled {
            Ok(self)
        } else {
            Err(Error::ShaderCompileFailed {
                stage: self.stage,
                log: self.diagnostic.clone().unwrap_or_default(),
            })
        }
    }
}

impl fmt::Debug for CompiledShader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledShader")
            .field("handle", &self.handle)
            .field("stage", &self.stage)
            .field("compiled", &self.compiled)
            .field("diagnostic", &self.diagnostic)
            .finish()
    }
}

impl Drop for CompiledShader {
    fn drop(&mut self) {
        self.device.delete_shader(self.handle);
    }
}

#[cfg(test)]
#[path = "shader_tests.rs"]
mod tests;
