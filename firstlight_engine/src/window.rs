/// Window host abstraction
///
/// The frame driver talks to the native window only through `WindowHost`,
/// so the loop can run against a real glutin/winit window or a scripted
/// host in tests.

use winit::keyboard::KeyCode;

use crate::error::Result;

/// Event delivered by `WindowHost::poll_events`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// The drawable area changed size (pixels)
    FramebufferResized { width: u32, height: u32 },
    /// The user asked the window to close
    CloseRequested,
}

/// A window with a current rendering context
pub trait WindowHost {
    /// Whether the close flag is set
    fn should_close(&self) -> bool;

    /// Set or clear the close flag
    fn set_should_close(&mut self, value: bool);

    /// Whether `key` is currently held down
    fn is_key_pressed(&self, key: KeyCode) -> bool;

    /// Process pending window-system events without blocking
    fn poll_events(&mut self) -> Vec<HostEvent>;

    /// Present the back buffer
    fn swap_buffers(&mut self) -> Result<()>;

    /// Current drawable size in pixels
    fn framebuffer_size(&self) -> (u32, u32);
}
