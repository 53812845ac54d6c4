/// GraphicsDevice trait - primitive framebuffer calls of the graphics API

use bitflags::bitflags;
use glam::Vec4;

use crate::error::Result;
use crate::graphics_device::{FramebufferHandle, RenderbufferHandle, NativeTextureId};

bitflags! {
    /// Buffers affected by a clear
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClearFlags: u32 {
        /// Color buffers (every active draw buffer)
        const COLOR = 1 << 0;
        /// Depth buffer
        const DEPTH = 1 << 1;
        /// Stencil buffer
        const STENCIL = 1 << 2;
    }
}

/// Low-level graphics API binding
///
/// This is the only point of contact with the native GPU layer.
/// Calls are assumed correct; errors (out of memory, invalid names)
/// are reported by the implementation and propagated unchanged.
///
/// Implemented by backend-specific devices (e.g., `GlGraphicsDevice`).
pub trait GraphicsDevice: Send + Sync {
    /// Allocate a native framebuffer object for a `width` x `height` target
    fn create_framebuffer(&mut self, width: u32, height: u32) -> Result<FramebufferHandle>;

    /// Delete a native framebuffer object
    fn delete_framebuffer(&mut self, framebuffer: FramebufferHandle) -> Result<()>;

    /// Make a framebuffer the active render target
    ///
    /// `None` routes drawing to the default (back-buffer) surface.
    fn bind_framebuffer(&mut self, framebuffer: Option<FramebufferHandle>) -> Result<()>;

    /// Attach a 2D texture to color slot `slot` of `framebuffer`
    ///
    /// `None` detaches whatever is attached to the slot.
    /// The framebuffer must currently be bound.
    fn attach_color_texture(
        &mut self,
        framebuffer: FramebufferHandle,
        slot: u32,
        texture: Option<NativeTextureId>,
    ) -> Result<()>;

    /// Declare which color slots receive fragment output, in order
    fn set_draw_buffers(&mut self, slots: &[u32]) -> Result<()>;

    /// Clear the bound surface
    ///
    /// # Arguments
    ///
    /// * `color` - RGBA clear color (used when `flags` contains COLOR)
    /// * `depth` - Depth clear value (used when `flags` contains DEPTH)
    /// * `flags` - Buffers to clear
    fn clear(&mut self, color: Vec4, depth: f32, flags: ClearFlags) -> Result<()>;

    /// Allocate combined depth-stencil storage of the given size
    fn create_depth_stencil(&mut self, width: u32, height: u32) -> Result<RenderbufferHandle>;

    /// Attach (or detach with `None`) depth-stencil storage to `framebuffer`
    fn attach_depth_stencil(
        &mut self,
        framebuffer: FramebufferHandle,
        storage: Option<RenderbufferHandle>,
    ) -> Result<()>;

    /// Delete depth-stencil storage
    fn delete_depth_stencil(&mut self, storage: RenderbufferHandle) -> Result<()>;
}
