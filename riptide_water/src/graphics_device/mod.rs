/// Graphics device module - GPU API traits and resource types

pub mod graphics_device;
pub mod texture;
pub mod frame_buffer;
pub mod command;

pub use graphics_device::*;
pub use texture::*;
pub use frame_buffer::*;
pub use command::*;

// Mock graphics device for tests (no GPU required)
#[cfg(test)]
pub mod mock_graphics_device;

/// Backend object name (GL object name, Vulkan handle, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceId(pub u64);
