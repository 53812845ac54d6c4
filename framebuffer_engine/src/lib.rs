/*!
# Framebuffer Engine

Render-target resource management for a retained-mode rendering engine.

This crate turns logical render target descriptions (size, color
attachments, depth/stencil request) into native framebuffer objects,
one per graphics context, and keeps their attachments in sync as the
descriptions change. The graphics API, the texture manager and the
context lifecycle are reached through traits so that backends
(OpenGL, etc.) and test doubles can be plugged in.

## Architecture

- **GraphicsDevice**: primitive framebuffer calls of the graphics API
- **TextureBinder**: texture upload/bind collaborator
- **GraphicsContext**: context identity and capability queries
- **RenderTarget**: logical, context independent render target
- **TargetManager**: creates, reconciles, binds and releases framebuffers
*/

// Internal modules
pub mod error;
pub mod log;
pub mod graphics_device;
pub mod target;

// Main fbengine namespace module
pub mod fbengine {
    // Error types
    pub use crate::error::{Error, Result};

    // Collaborator traits
    pub use crate::graphics_device::{GraphicsDevice, GraphicsContext, TextureBinder};

    // Logging sub-module (types and logger slot, NOT macros)
    pub mod log {
        pub use crate::log::{
            Logger, LogEntry, LogSeverity, DefaultLogger,
            set_logger, reset_logger,
        };
    }

    // Device sub-module with handles, capabilities and clear flags
    pub mod device {
        pub use crate::graphics_device::*;
    }

    // Render target sub-module
    pub mod target {
        pub use crate::target::*;
    }
}

// Re-export math library at crate root
pub use glam;
