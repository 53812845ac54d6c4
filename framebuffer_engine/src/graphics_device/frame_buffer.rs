/// Native framebuffer handles
///
/// Opaque identities of GPU-resident framebuffer and depth-stencil storage
/// objects. Handles are only meaningful inside the context that created
/// them and are never compared across contexts.

use std::fmt;

/// Native framebuffer object identity (e.g. a GL framebuffer name)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FramebufferHandle(pub u32);

/// Native depth-stencil storage identity (e.g. a GL renderbuffer name)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderbufferHandle(pub u32);

impl fmt::Display for FramebufferHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fbo#{}", self.0)
    }
}

impl fmt::Display for RenderbufferHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rbo#{}", self.0)
    }
}
