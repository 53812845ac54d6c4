/// Physical framebuffer: one native framebuffer per (render target, context).
///
/// Records what the GPU currently has attached so the `TargetManager`
/// can tell whether a logical render target needs reconciling and can
/// skip attachment calls that would not change anything.

use crate::graphics_device::{FramebufferHandle, RenderbufferHandle, NativeTextureId};

/// Sync state of a physical framebuffer relative to its logical target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramebufferState {
    /// Created, never reconciled
    Created,
    /// Attachments mirror the logical target's current revision
    Synced,
    /// The logical target changed since the last reconciliation
    Stale,
}

#[derive(Debug)]
pub struct PhysicalFramebuffer {
    handle: FramebufferHandle,
    width: u32,
    height: u32,
    /// `None` until the first reconciliation
    last_synced_revision: Option<u64>,
    /// Native texture attached to each color slot
    color_slots: Vec<Option<NativeTextureId>>,
    /// Draw-buffer list last declared to the device (empty = never declared)
    draw_buffers: Vec<u32>,
    depth_stencil: Option<RenderbufferHandle>,
}

impl PhysicalFramebuffer {
    pub(crate) fn new(handle: FramebufferHandle, width: u32, height: u32) -> Self {
        Self {
            handle,
            width,
            height,
            last_synced_revision: None,
            color_slots: Vec::new(),
            draw_buffers: Vec::new(),
            depth_stencil: None,
        }
    }

    /// Native framebuffer handle
    pub fn handle(&self) -> FramebufferHandle {
        self.handle
    }

    /// Size the framebuffer storage was allocated for
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn last_synced_revision(&self) -> Option<u64> {
        self.last_synced_revision
    }

    /// Sync state against the logical target's current revision
    pub fn state(&self, target_revision: u64) -> FramebufferState {
        match self.last_synced_revision {
            None => FramebufferState::Created,
            Some(revision) if revision == target_revision => FramebufferState::Synced,
            Some(_) => FramebufferState::Stale,
        }
    }

    /// Native texture attached to color slot `slot`
    pub fn color_attachment(&self, slot: usize) -> Option<NativeTextureId> {
        self.color_slots.get(slot).copied().flatten()
    }

    /// Native textures of all tracked color slots
    pub fn color_attachments(&self) -> &[Option<NativeTextureId>] {
        &self.color_slots
    }

    /// Draw-buffer list last declared for this framebuffer
    pub fn draw_buffers(&self) -> &[u32] {
        &self.draw_buffers
    }

    pub fn depth_stencil(&self) -> Option<RenderbufferHandle> {
        self.depth_stencil
    }

    pub(crate) fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    pub(crate) fn set_color_attachment(&mut self, slot: usize, texture: Option<NativeTextureId>) {
        if self.color_slots.len() <= slot {
            self.color_slots.resize(slot + 1, None);
        }
        self.color_slots[slot] = texture;
    }

    pub(crate) fn truncate_color_slots(&mut self, count: usize) {
        self.color_slots.truncate(count);
    }

    pub(crate) fn set_draw_buffers(&mut self, slots: Vec<u32>) {
        self.draw_buffers = slots;
    }

    pub(crate) fn set_depth_stencil(&mut self, storage: Option<RenderbufferHandle>) {
        self.depth_stencil = storage;
    }

    pub(crate) fn mark_synced(&mut self, revision: u64) {
        self.last_synced_revision = Some(revision);
    }
}
