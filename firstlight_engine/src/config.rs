//! Application configuration
//!
//! Plain structs with defaults matching the sample program: an 800x600
//! window titled "LearnOpenGL", an OpenGL 3.3 core context, a teal clear
//! color and the built-in shaders.

use glam::Vec4;

use crate::graphics_device::PolygonMode;
use crate::program::ProgramSources;
use crate::sample::{FRAGMENT_SHADER_SOURCE, VERTEX_SHADER_SOURCE};
use crate::shader::ShaderSource;

/// Window configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowConfig {
    /// Initial framebuffer width in pixels
    pub width: u32,
    /// Initial framebuffer height in pixels
    pub height: u32,
    /// Window title
    pub title: String,
    /// Whether the user may resize the window
    pub resizable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "LearnOpenGL".to_string(),
            resizable: true,
        }
    }
}

/// Rendering context configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextConfig {
    /// Requested API major version
    pub major: u8,
    /// Requested API minor version
    pub minor: u8,
    /// Core profile (no deprecated fixed-function features)
    pub core_profile: bool,
    /// Wait for vertical blank on swap
    pub vsync: bool,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            major: 3,
            minor: 3,
            core_profile: true,
            vsync: true,
        }
    }
}

/// Per-frame rendering configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// Color the target is cleared to every frame
    pub clear_color: Vec4,
    /// Fill or wireframe rasterization
    pub polygon_mode: PolygonMode,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            clear_color: Vec4::new(0.2, 0.3, 0.3, 1.0),
            polygon_mode: PolygonMode::Fill,
        }
    }
}

impl Default for ProgramSources {
    fn default() -> Self {
        Self {
            vertex: ShaderSource::vertex(VERTEX_SHADER_SOURCE),
            fragment: ShaderSource::fragment(FRAGMENT_SHADER_SOURCE),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub context: ContextConfig,
    pub render: RenderConfig,
    pub shaders: ProgramSources,
}

impl AppConfig {
    /// Switch rasterization to wireframe
    pub fn with_wireframe(mut self, wireframe: bool) -> Self {
        self.render.polygon_mode = if wireframe { PolygonMode::Line } else { PolygonMode::Fill };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_window() {
        let window = WindowConfig::default();
        assert_eq!((window.width, window.height), (800, 600));
        assert_eq!(window.title, "LearnOpenGL");
    }

    #[test]
    fn test_default_context_is_gl33_core() {
        let context = ContextConfig::default();
        assert_eq!((context.major, context.minor), (3, 3));
        assert!(context.core_profile);
    }

    #[test]
    fn test_default_render() {
        let render = RenderConfig::default();
        assert_eq!(render.clear_color, Vec4::new(0.2, 0.3, 0.3, 1.0));
        assert_eq!(render.polygon_mode, PolygonMode::Fill);
    }

    #[test]
    fn test_default_shaders_are_version_tagged() {
        let shaders = ProgramSources::default();
        assert_eq!(shaders.vertex.stage(), crate::shader::ShaderStage::Vertex);
        assert_eq!(shaders.fragment.stage(), crate::shader::ShaderStage::Fragment);
        assert!(shaders.vertex.code().starts_with("#version 330 core"));
        assert!(shaders.fragment.code().starts_with("#version 330 core"));
    }

    #[test]
    fn test_with_wireframe_toggles_polygon_mode() {
        let config = AppConfig::default().with_wireframe(true);
        assert_eq!(config.render.polygon_mode, PolygonMode::Line);

        let config = config.with_wireframe(false);
        assert_eq!(config.render.polygon_mode, PolygonMode::Fill);
    }
}
