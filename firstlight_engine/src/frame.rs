//! Frame driver
//!
//! Runs the per-frame loop: input, clear, draw the indexed geometry with the
//! linked program, present, then process window events.
//!
//! ```text
//!  Idle ──run()──▶ Rendering ──close requested──▶ Closed
//! ```

use std::rc::Rc;

use glam::Vec4;
use winit::keyboard::KeyCode;

use crate::config::RenderConfig;
use crate::error::{Error, Result};
use crate::geometry::GeometryBufferSet;
use crate::graphics_device::{ClearMask, GraphicsDevice, PolygonMode, PrimitiveTopology, Viewport};
use crate::program::LinkedProgram;
use crate::window::{HostEvent, WindowHost};

/// Lifecycle of a `FrameDriver`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameState {
    /// Created, no frame rendered yet
    Idle,
    /// Inside `run`
    Rendering,
    /// The loop ended (close requested or a frame failed)
    Closed,
}

/// Counters accumulated over the driver's lifetime
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Frames presented
    pub frames: u64,
    /// Draw calls submitted
    pub draw_calls: u64,
    /// Index elements submitted
    pub indices: u64,
}

/// Drives the render loop against a `WindowHost`
pub struct FrameDriver {
    device: Rc<dyn GraphicsDevice>,
    clear_color: Vec4,
    polygon_mode: PolygonMode,
    state: FrameState,
    stats: FrameStats,
}

impl FrameDriver {
    pub fn new(device: Rc<dyn GraphicsDevice>, config: &RenderConfig) -> Self {
        Self {
            device,
            clear_color: config.clear_color,
            polygon_mode: config.polygon_mode,
            state: FrameState::Idle,
            stats: FrameStats::default(),
        }
    }

    pub fn state(&self) -> FrameState {
        self.state
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Match the viewport to a new framebuffer size, corner at the origin
    pub fn handle_resize(&self, width: u32, height: u32) {
        crate::engine_trace!("firstlight::Frame", "Framebuffer resized to {}x{}", width, height);
        self.device.set_viewport(Viewport { x: 0, y: 0, width, height });
    }

    /// Escape requests close; every other key is ignored
    pub fn process_input(&self, host: &mut dyn WindowHost) {
        if host.is_key_pressed(KeyCode::Escape) {
            crate::engine_debug!("firstlight::Frame", "Escape pressed, closing");
            host.set_should_close(true);
        }
    }

    /// Clear and draw one frame (without presenting it)
    ///
    /// # Errors
    ///
    /// `InvalidResource` if `program` did not link.
    pub fn draw_frame(&mut self, program: &LinkedProgram, geometry: &GeometryBufferSet) -> Result<()> {
        if !program.is_linked() {
            return Err(Error::InvalidResource(format!(
                "Program {} is not linked and cannot be used for drawing",
                program.handle().0
            )));
        }

        self.device.set_clear_color(self.clear_color);
        self.device.clear(ClearMask::COLOR);

        self.device.use_program(Some(program.handle()));
        self.device.bind_vertex_array(Some(geometry.vertex_array()));
        self.device.draw_elements(
            PrimitiveTopology::TriangleList,
            geometry.index_count(),
            geometry.index_type(),
            0,
        );

        self.stats.draw_calls += 1;
        self.stats.indices += geometry.index_count() as u64;
        Ok(())
    }

    /// Render until the host's close flag is set
    ///
    /// The configured polygon mode and a full-window viewport are applied
    /// before the first frame. The driver ends in `FrameState::Closed`
    /// whether the loop finishes normally or a frame fails.
    pub fn run(
        &mut self,
        host: &mut dyn WindowHost,
        program: &LinkedProgram,
        geometry: &GeometryBufferSet,
    ) -> Result<()> {
        self.state = FrameState::Rendering;
        self.device.set_polygon_mode(self.polygon_mode);
        let (width, height) = host.framebuffer_size();
        self.handle_resize(width, height);

        crate::engine_info!(
            "firstlight::Frame",
            "Render loop started ({}x{}, {:?})",
            width,
            height,
            self.polygon_mode
        );

        let result = self.run_frames(host, program, geometry);
        self.state = FrameState::Closed;

        match &result {
            Ok(()) => crate::engine_info!(
                "firstlight::Frame",
                "Render loop finished after {} frame(s)",
                self.stats.frames
            ),
            Err(e) => crate::engine_error!("firstlight::Frame", "Render loop aborted: {}", e),
        }
        result
    }

    fn run_frames(
        &mut self,
        host: &mut dyn WindowHost,
        program: &LinkedProgram,
        geometry: &GeometryBufferSet,
    ) -> Result<()> {
        while !host.should_close() {
            self.process_input(host);
            self.draw_frame(program, geometry)?;
            host.swap_buffers()?;
            self.stats.frames += 1;

            for event in host.poll_events() {
                match event {
                    HostEvent::FramebufferResized { width, height } => self.handle_resize(width, height),
                    HostEvent::CloseRequested => host.set_should_close(true),
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "frame_tests.rs"]
mod tests;
