/// Graphics context identity and capabilities
///
/// A context identity changes whenever the underlying GPU context is
/// replaced (device loss, window recreation). Every native object belongs
/// to exactly one context identity.

use std::fmt;

/// Opaque, comparable identity of a GPU context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContextId(pub u64);

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "context#{}", self.0)
    }
}

/// Render-target related capabilities of a context
///
/// Resolved once per context identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderTargetCapabilities {
    /// Multiple render targets (draw buffers) are supported
    pub multiple_render_targets: bool,
    /// Maximum number of simultaneously bound color attachments (>= 1)
    pub max_color_attachments: u32,
}

impl RenderTargetCapabilities {
    /// Capabilities of a context limited to a single color output
    pub fn single_target() -> Self {
        Self {
            multiple_render_targets: false,
            max_color_attachments: 1,
        }
    }

    /// Capabilities of a context with `max` draw buffers
    pub fn multiple_targets(max: u32) -> Self {
        Self {
            multiple_render_targets: true,
            max_color_attachments: max.max(1),
        }
    }

    /// Number of color attachments actually bound for a target requesting `requested`
    ///
    /// Extra attachments are dropped, never reported as an error.
    pub fn color_attachment_limit(&self, requested: usize) -> usize {
        let limit = if self.multiple_render_targets {
            self.max_color_attachments.max(1) as usize
        } else {
            1
        };
        requested.min(limit)
    }
}

impl Default for RenderTargetCapabilities {
    fn default() -> Self {
        Self::single_target()
    }
}

/// Context lifecycle collaborator
///
/// Supplies the identity of the current context and answers capability
/// queries against it.
pub trait GraphicsContext {
    /// Identity of this context
    fn context_id(&self) -> ContextId;

    /// Query render-target capabilities (draw buffers, attachment limits)
    fn capabilities(&self) -> RenderTargetCapabilities;
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
