/*!
# FirstLight Engine

Core types for a minimal programmable-pipeline renderer: compile two shader
stages, link them, upload one indexed mesh and draw it every frame until the
window closes.

The crate is backend-agnostic. Every device call goes through the
`GraphicsDevice` trait, passed explicitly as `Rc<dyn GraphicsDevice>`.
Backends (the OpenGL one lives in `firstlight_renderer_gl`) implement it, and
`MockGraphicsDevice` records calls for tests.

## Architecture

- **CompiledShader**: one compiled shader stage (shader unit builder)
- **LinkedProgram**: vertex + fragment linked into a program (program linker)
- **GeometryBufferSet**: vertex buffer, index buffer and vertex array
- **FrameDriver**: the render loop, driven through a `WindowHost`

Every device object is released when its owner is dropped.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod config;
pub mod graphics_device;
pub mod shader;
pub mod program;
pub mod geometry;
pub mod window;
pub mod frame;
pub mod sample;

// Main firstlight namespace module
pub mod firstlight {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging hub
    pub use crate::engine::Engine;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{DefaultLogger, LogEntry, LogFacadeLogger, LogSeverity, Logger};
    }

    // Device trait, handles and the mock device
    pub mod device {
        pub use crate::graphics_device::*;
        pub use crate::graphics_device::mock_graphics_device::MockGraphicsDevice;
    }

    // Shader, program and geometry objects
    pub mod resource {
        pub use crate::geometry::{validate_indices, GeometryBufferSet, VertexLayout};
        pub use crate::program::{build_program, LinkedProgram, ProgramSources};
        pub use crate::shader::{bounded_info_log, CompiledShader, ShaderSource, ShaderStage, INFO_LOG_CAPACITY};
    }

    // Render loop
    pub mod frame {
        pub use crate::frame::{FrameDriver, FrameState, FrameStats};
        pub use crate::window::{HostEvent, WindowHost};
    }

    // Configuration
    pub mod config {
        pub use crate::config::{AppConfig, ContextConfig, RenderConfig, WindowConfig};
    }
}

// Re-export math and windowing types used in the public API
pub use glam;
pub use winit::keyboard::KeyCode;
