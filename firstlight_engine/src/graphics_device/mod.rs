/// Graphics device module - the device trait, handle types and the mock device

// Module declarations
pub mod graphics_device;

// Mock graphics device for tests and headless tooling (no GPU required)
pub mod mock_graphics_device;

// Re-export everything from graphics_device.rs
pub use graphics_device::*;
