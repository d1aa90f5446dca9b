//! Program linker
//!
//! Links compiled shader units into one executable program. The units are
//! consumed: they are detached and deleted after the link attempt whatever
//! its outcome, so a `LinkedProgram` never owns shader objects.

use std::fmt;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::graphics_device::{GraphicsDevice, ProgramHandle};
use crate::shader::{failure_diagnostic, CompiledShader, ShaderSource, ShaderStage};

/// Vertex + fragment sources for one program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramSources {
    pub vertex: ShaderSource,
    pub fragment: ShaderSource,
}

/// A device program object and the outcome of its link
///
/// The program object is deleted when this value is dropped.
pub struct LinkedProgram {
    device: Rc<dyn GraphicsDevice>,
    handle: ProgramHandle,
    linked: bool,
    diagnostic: Option<String>,
    stages: Vec<ShaderStage>,
}

impl LinkedProgram {
    /// Link shader units into a program (blocking)
    ///
    /// Every unit is released after the attempt. Link failure is reported
    /// through `is_linked()` / `diagnostic()`.
    ///
    /// # Errors
    ///
    /// Only when the device cannot allocate a program object.
    pub fn link(device: &Rc<dyn GraphicsDevice>, shaders: Vec<CompiledShader>) -> Result<Self> {
        let handle = device.create_program()?;

        for shader in &shaders {
            device.attach_shader(handle, shader.handle());
        }
        device.link_program(handle);
        let linked = device.program_link_status(handle);

        let diagnostic = if linked {
            crate::engine_info!(
                "firstlight::Program",
                "Program {} linked from {} shader unit(s)",
                handle.0,
                shaders.len()
            );
            None
        } else {
            let log = failure_diagnostic(&device.program_info_log(handle));
            crate::engine_error!("firstlight::Program", "Program linking failed:\n{}", log);
            Some(log)
        };

        let stages = shaders.iter().map(|s| s.stage()).collect();

        // Detach, then drop the units (which deletes them)
        for shader in &shaders {
            device.detach_shader(handle, shader.handle());
        }
        drop(shaders);

        Ok(Self {
            device: device.clone(),
            handle,
            linked,
            diagnostic,
            stages,
        })
    }

    pub fn handle(&self) -> ProgramHandle {
        self.handle
    }

    pub fn is_linked(&self) -> bool {
        self.linked
    }

    /// Linker diagnostic, present only when linking failed
    pub fn diagnostic(&self) -> Option<&str> {
        self.diagnostic.as_deref()
    }

    /// Stages of the units that were attached at link time
    pub fn stages(&self) -> &[ShaderStage] {
        &self.stages
    }

    /// Turn a failed link into `Error::ProgramLinkFailed`
    ///
    /// On failure the program object is released before returning.
    pub fn into_result(self) -> Result<Self> {
        if self.linked {
            Ok(self)
        } else {
            Err(Error::ProgramLinkFailed(self.diagnostic.clone().unwrap_or_default()))
        }
    }
}

impl fmt::Debug for LinkedProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkedProgram")
            .field("handle", &self.handle)
            .field("linked", &self.linked)
            .field("diagnostic", &self.diagnostic)
            .field("stages", &self.stages)
            .finish()
    }
}

impl Drop for LinkedProgram {
    fn drop(&mut self) {
        self.device.delete_program(self.handle);
    }
}

/// Compile both stages and link them
///
/// Both stages are compiled before either result is checked, so a run with
/// two broken sources logs both diagnostics. Intermediate shader objects are
/// released on every path.
///
/// # Errors
///
/// `ShaderCompileFailed` for the first stage (vertex, then fragment) that
/// does not compile,
/// `ProgramLinkFailed` if linking fails, or a backend error if an object
/// cannot be allocated.
pub fn build_program(device: &Rc<dyn GraphicsDevice>, sources: &ProgramSources) -> Result<LinkedProgram> {
    let vertex = CompiledShader::compile(device, &sources.vertex)?;
    let fragment = CompiledShader::compile(device, &sources.fragment)?;
    let vertex = vertex.into_result()?;
    let fragment = fragment.into_result()?;
    LinkedProgram::link(device, vec![vertex, fragment])?.into_result()
}

#[cfg(test)]
#[path = "program_tests.rs"]
mod tests;
