/// Graphics device module - collaborator traits and native handle types

// Module declarations
pub mod graphics_device;
pub mod context;
pub mod texture_binder;
pub mod frame_buffer;

// Re-export everything from graphics_device.rs
pub use graphics_device::*;

// Re-export from other modules
pub use context::*;
pub use texture_binder::*;
pub use frame_buffer::*;

// Mock collaborators for tests (no GPU required)
#[cfg(test)]
pub mod mock_graphics_device;
