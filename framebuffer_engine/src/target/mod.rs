//! Render target management module
//!
//! Provides logical render targets and the manager that realizes them
//! as native framebuffers in a graphics context.

mod render_target;
mod physical_framebuffer;
mod target_manager;

pub use render_target::{RenderTarget, RenderTargetDesc, RenderTargetId};
pub use physical_framebuffer::{PhysicalFramebuffer, FramebufferState};
pub use target_manager::{
    TargetManager, TargetManagerConfig, TargetManagerStats, BoundSurface,
};
