/// Render target: where a pass gets rendered to.
///
/// A logical render target is the application-side, context-independent
/// description of a drawable surface: its size, the ordered list of
/// textures attached as color outputs, and whether depth/stencil storage
/// is wanted. The `TargetManager` realizes it as a native framebuffer in
/// each context it is bound in.
///
/// Every change to the attachments, the depth/stencil request or the size
/// bumps `revision`, which is how the manager notices that a physical
/// framebuffer is stale.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use glam::UVec2;
use crate::error::Result;
use crate::engine_err;
use crate::graphics_device::TextureId;

/// Source of process-unique render target ids
static NEXT_RENDER_TARGET_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a logical render target, unique for the process lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RenderTargetId(pub u64);

impl RenderTargetId {
    fn next() -> Self {
        Self(NEXT_RENDER_TARGET_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for RenderTargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "render_target#{}", self.0)
    }
}

/// Descriptor for creating a render target
#[derive(Debug, Clone, Default)]
pub struct RenderTargetDesc {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Color attachments; index = attachment slot
    pub color_attachments: Vec<TextureId>,
    /// Request depth storage
    pub depth: bool,
    /// Request stencil storage
    pub stencil: bool,
}

impl RenderTargetDesc {
    /// Descriptor of the given size with no attachments
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Append a color attachment
    pub fn with_color(mut self, texture: TextureId) -> Self {
        self.color_attachments.push(texture);
        self
    }

    /// Request depth storage
    pub fn with_depth(mut self) -> Self {
        self.depth = true;
        self
    }

    /// Request stencil storage
    pub fn with_stencil(mut self) -> Self {
        self.stencil = true;
        self
    }
}

#[derive(Debug)]
pub struct RenderTarget {
    id: RenderTargetId,
    width: u32,
    height: u32,
    color_attachments: Vec<TextureId>,
    depth: bool,
    stencil: bool,
    /// Bumped on every observable change; starts at 1
    revision: u64,
}

impl RenderTarget {
    /// Create a render target from a descriptor
    ///
    /// # Errors
    ///
    /// Returns `PreconditionFailed` if width or height is zero.
    pub fn new(desc: RenderTargetDesc) -> Result<Self> {
        check_size(desc.width, desc.height)?;

        Ok(Self {
            id: RenderTargetId::next(),
            width: desc.width,
            height: desc.height,
            color_attachments: desc.color_attachments,
            depth: desc.depth,
            stencil: desc.stencil,
            revision: 1,
        })
    }

    pub fn id(&self) -> RenderTargetId {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> UVec2 {
        UVec2::new(self.width, self.height)
    }

    /// Color attachments in slot order
    pub fn color_attachments(&self) -> &[TextureId] {
        &self.color_attachments
    }

    pub fn depth(&self) -> bool {
        self.depth
    }

    pub fn stencil(&self) -> bool {
        self.stencil
    }

    /// Current revision of the attachment description
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// True when the target would produce a framebuffer with no attachment at all
    pub fn is_empty(&self) -> bool {
        self.color_attachments.is_empty() && !self.depth && !self.stencil
    }

    /// Replace all color attachments
    pub fn set_color_attachments(&mut self, textures: Vec<TextureId>) {
        if self.color_attachments != textures {
            self.color_attachments = textures;
            self.bump_revision();
        }
    }

    /// Append a color attachment in the next free slot
    pub fn add_color_attachment(&mut self, texture: TextureId) {
        self.color_attachments.push(texture);
        self.bump_revision();
    }

    /// Set the texture of color slot `slot`
    ///
    /// `slot` may be equal to the current attachment count, which appends.
    ///
    /// # Errors
    ///
    /// Returns `PreconditionFailed` if `slot` would leave a gap in the slot list.
    pub fn set_color_attachment(&mut self, slot: usize, texture: TextureId) -> Result<()> {
        match slot.cmp(&self.color_attachments.len()) {
            std::cmp::Ordering::Less => {
                if self.color_attachments[slot] != texture {
                    self.color_attachments[slot] = texture;
                    self.bump_revision();
                }
            }
            std::cmp::Ordering::Equal => self.add_color_attachment(texture),
            std::cmp::Ordering::Greater => {
                return Err(engine_err!("fbengine::RenderTarget", PreconditionFailed,
                    "{}: color slot {} out of range ({} attachments)",
                    self.id, slot, self.color_attachments.len()));
            }
        }
        Ok(())
    }

    /// Remove every color attachment
    pub fn clear_color_attachments(&mut self) {
        if !self.color_attachments.is_empty() {
            self.color_attachments.clear();
            self.bump_revision();
        }
    }

    pub fn set_depth(&mut self, depth: bool) {
        if self.depth != depth {
            self.depth = depth;
            self.bump_revision();
        }
    }

    pub fn set_stencil(&mut self, stencil: bool) {
        if self.stencil != stencil {
            self.stencil = stencil;
            self.bump_revision();
        }
    }

    /// Change the target size
    ///
    /// # Errors
    ///
    /// Returns `PreconditionFailed` if width or height is zero.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        check_size(width, height)?;
        if (self.width, self.height) != (width, height) {
            self.width = width;
            self.height = height;
            self.bump_revision();
        }
        Ok(())
    }

    fn bump_revision(&mut self) {
        self.revision += 1;
    }
}

fn check_size(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(engine_err!("fbengine::RenderTarget", PreconditionFailed,
            "render target size must be non-zero, got {}x{}", width, height));
    }
    Ok(())
}

#[cfg(test)]
#[path = "render_target_tests.rs"]
mod tests;
