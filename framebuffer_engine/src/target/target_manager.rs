/// Central render target manager for one graphics context.
///
/// Realizes logical `RenderTarget`s as native framebuffers. Physical
/// framebuffers are created lazily on first bind, reconciled only when the
/// logical target's revision moved, and purged wholesale when the context
/// is replaced or lost.

use std::collections::hash_map::Entry;
use std::sync::{Arc, Mutex, MutexGuard};
use glam::Vec4;
use rustc_hash::FxHashMap;

use crate::error::Result;
use crate::graphics_device::{
    GraphicsDevice, GraphicsContext, TextureBinder,
    ClearFlags, ContextId, RenderTargetCapabilities,
};
use crate::{engine_debug, engine_err, engine_info, engine_trace};
use super::physical_framebuffer::PhysicalFramebuffer;
use super::render_target::{RenderTarget, RenderTargetId};

/// Target manager configuration
#[derive(Debug, Clone, Copy)]
pub struct TargetManagerConfig {
    /// Texture unit used to make attachment textures current during reconciliation
    pub scratch_texture_unit: u32,
    /// Depth value written by `clear()`
    pub clear_depth: f32,
}

impl Default for TargetManagerConfig {
    fn default() -> Self {
        Self {
            scratch_texture_unit: 0,
            clear_depth: 1.0,
        }
    }
}

/// Surface drawing currently goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundSurface {
    /// Default (back-buffer) surface
    Default,
    /// Physical framebuffer of a logical render target
    Target(RenderTargetId),
}

/// Target manager statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TargetManagerStats {
    /// Native framebuffers created
    pub framebuffers_created: u64,
    /// Native framebuffers deleted (purges after context loss are not counted)
    pub framebuffers_deleted: u64,
    /// Attachment reconciliations performed
    pub reconciliations: u64,
    /// Successful bind calls (including default surface binds)
    pub binds: u64,
}

#[derive(Debug, Clone, Copy)]
struct ActiveContext {
    id: ContextId,
    capabilities: RenderTargetCapabilities,
}

/// Render target resource manager
///
/// Owns every physical framebuffer, keyed by (render target id, context id).
/// Callers never touch physical framebuffers directly.
pub struct TargetManager {
    device: Arc<Mutex<dyn GraphicsDevice>>,
    textures: Arc<Mutex<dyn TextureBinder>>,
    config: TargetManagerConfig,
    context: Option<ActiveContext>,
    framebuffers: FxHashMap<(RenderTargetId, ContextId), PhysicalFramebuffer>,
    bound: Option<BoundSurface>,
    stats: TargetManagerStats,
}

impl TargetManager {
    /// Create a target manager
    ///
    /// # Arguments
    ///
    /// * `device` - Graphics API binding used for every framebuffer call
    /// * `textures` - Texture manager owning the attachment textures
    /// * `config` - Scratch texture unit and clear depth
    pub fn new(
        device: Arc<Mutex<dyn GraphicsDevice>>,
        textures: Arc<Mutex<dyn TextureBinder>>,
        config: TargetManagerConfig,
    ) -> Self {
        Self {
            device,
            textures,
            config,
            context: None,
            framebuffers: FxHashMap::default(),
            bound: None,
            stats: TargetManagerStats::default(),
        }
    }

    // ===== CONTEXT LIFECYCLE =====

    /// Adopt a new or replaced context
    ///
    /// Calling this again with the same context identity does nothing.
    /// A different identity drops every physical framebuffer of the previous
    /// context without issuing native deletes: those names died with it.
    pub fn on_context_ready(&mut self, context: &dyn GraphicsContext) {
        let id = context.context_id();
        if self.context.is_some_and(|active| active.id == id) {
            return;
        }

        let purged = self.purge_except(Some(id));
        if purged > 0 {
            engine_debug!("fbengine::TargetManager",
                "Purged {} framebuffer(s) from a previous context", purged);
        }

        let capabilities = context.capabilities();
        self.context = Some(ActiveContext { id, capabilities });
        self.bound = None;

        engine_info!("fbengine::TargetManager",
            "{} ready (multiple render targets: {}, max color attachments: {})",
            id, capabilities.multiple_render_targets, capabilities.max_color_attachments);
    }

    /// Forget the current context after it was lost
    ///
    /// Every physical framebuffer is dropped. `bind` and `clear` fail until
    /// `on_context_ready` is called with the replacement context.
    pub fn on_context_lost(&mut self) {
        let purged = self.purge_except(None);
        if let Some(active) = self.context.take() {
            engine_info!("fbengine::TargetManager",
                "{} lost, purged {} framebuffer(s)", active.id, purged);
        }
        self.bound = None;
    }

    // ===== BINDING =====

    /// Bind a render target for drawing, or the default surface with `None`
    ///
    /// Creates the physical framebuffer on first use in this context and
    /// reconciles its attachments when the target's revision moved. The
    /// texture bound to color slot 0 is released from its sampler unit so
    /// it is never read and written in the same draw.
    ///
    /// All attachments go through the same scratch texture unit, and only
    /// slot 0 is released. With several color outputs the last attached
    /// texture stays on that unit until something else is bound there.
    ///
    /// # Errors
    ///
    /// - `PreconditionFailed` if no context is ready, or if the target has
    ///   no color attachment and requests neither depth nor stencil
    /// - Any error reported by the device or texture binder
    pub fn bind(&mut self, target: Option<&RenderTarget>) -> Result<()> {
        let context = self.require_context("bind")?;

        let Some(target) = target else {
            lock(&self.device, "GraphicsDevice")?.bind_framebuffer(None)?;
            self.bound = Some(BoundSurface::Default);
            self.stats.binds += 1;
            return Ok(());
        };

        if target.is_empty() {
            return Err(engine_err!("fbengine::TargetManager", PreconditionFailed,
                "{} has no color attachment and requests no depth/stencil", target.id()));
        }

        let mut device = lock(&self.device, "GraphicsDevice")?;

        let physical = match self.framebuffers.entry((target.id(), context.id)) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let physical = Self::create_physical(&mut *device, target, context.id)?;
                self.stats.framebuffers_created += 1;
                entry.insert(physical)
            }
        };

        device.bind_framebuffer(Some(physical.handle()))?;
        self.bound = Some(BoundSurface::Target(target.id()));

        if physical.last_synced_revision() != Some(target.revision()) {
            let mut textures = lock(&self.textures, "TextureBinder")?;
            Self::reconcile(
                &mut *device,
                &mut *textures,
                &self.config,
                &context.capabilities,
                target,
                physical,
            )?;
            physical.mark_synced(target.revision());
            self.stats.reconciliations += 1;
        }

        if let Some(native) = physical.color_attachment(0) {
            lock(&self.textures, "TextureBinder")?.unbind_texture(native);
        }

        self.stats.binds += 1;
        Ok(())
    }

    /// Clear color and depth of the bound surface
    ///
    /// # Errors
    ///
    /// Returns `PreconditionFailed` if nothing has been bound in this context.
    pub fn clear(&mut self, r: f32, g: f32, b: f32, a: f32) -> Result<()> {
        self.clear_with(Vec4::new(r, g, b, a), ClearFlags::COLOR | ClearFlags::DEPTH)
    }

    /// Clear the bound surface with an explicit set of buffers
    pub fn clear_with(&mut self, color: Vec4, flags: ClearFlags) -> Result<()> {
        self.require_context("clear")?;
        if self.bound.is_none() {
            return Err(engine_err!("fbengine::TargetManager", PreconditionFailed,
                "clear called before any surface was bound"));
        }
        lock(&self.device, "GraphicsDevice")?.clear(color, self.config.clear_depth, flags)
    }

    // ===== RELEASE =====

    /// Delete the physical framebuffer of a render target the application released
    ///
    /// If that framebuffer was bound, drawing falls back to the default surface.
    pub fn release_target(&mut self, id: RenderTargetId) -> Result<()> {
        let Some(context) = self.context else {
            return Ok(());
        };

        if let Some(physical) = self.framebuffers.remove(&(id, context.id)) {
            let mut device = lock(&self.device, "GraphicsDevice")?;
            Self::delete_physical(&mut *device, physical)?;
            self.stats.framebuffers_deleted += 1;
            engine_debug!("fbengine::TargetManager", "Released framebuffer of {}", id);
        }

        if self.bound == Some(BoundSurface::Target(id)) {
            self.bound = Some(BoundSurface::Default);
        }
        Ok(())
    }

    /// Delete every physical framebuffer of the current context
    pub fn release_all(&mut self) -> Result<()> {
        let mut device = lock(&self.device, "GraphicsDevice")?;
        for (_, physical) in self.framebuffers.drain() {
            Self::delete_physical(&mut *device, physical)?;
            self.stats.framebuffers_deleted += 1;
        }

        if matches!(self.bound, Some(BoundSurface::Target(_))) {
            self.bound = Some(BoundSurface::Default);
        }
        Ok(())
    }

    // ===== INSPECTION =====

    /// Identity of the current context
    pub fn context_id(&self) -> Option<ContextId> {
        self.context.map(|active| active.id)
    }

    /// Capabilities resolved for the current context
    pub fn capabilities(&self) -> Option<RenderTargetCapabilities> {
        self.context.map(|active| active.capabilities)
    }

    /// Surface drawing currently goes to (`None` until the first bind)
    pub fn bound_surface(&self) -> Option<BoundSurface> {
        self.bound
    }

    /// Physical framebuffer of a render target in the current context
    pub fn physical(&self, id: RenderTargetId) -> Option<&PhysicalFramebuffer> {
        let context = self.context?;
        self.framebuffers.get(&(id, context.id))
    }

    /// Number of physical framebuffers alive
    pub fn physical_count(&self) -> usize {
        self.framebuffers.len()
    }

    pub fn stats(&self) -> TargetManagerStats {
        self.stats
    }

    pub fn config(&self) -> &TargetManagerConfig {
        &self.config
    }

    // ===== INTERNALS =====

    fn require_context(&self, operation: &str) -> Result<ActiveContext> {
        self.context.ok_or_else(|| engine_err!("fbengine::TargetManager", PreconditionFailed,
            "{} called before on_context_ready", operation))
    }

    /// Drop physical framebuffers of every context other than `keep`
    fn purge_except(&mut self, keep: Option<ContextId>) -> usize {
        let before = self.framebuffers.len();
        self.framebuffers.retain(|(_, context), _| Some(*context) == keep);
        before - self.framebuffers.len()
    }

    /// Allocate the native framebuffer for `target` in `context`
    ///
    /// The new framebuffer has never been synced, so the bind that created
    /// it always reconciles.
    fn create_physical(
        device: &mut dyn GraphicsDevice,
        target: &RenderTarget,
        context: ContextId,
    ) -> Result<PhysicalFramebuffer> {
        let handle = device.create_framebuffer(target.width(), target.height())?;

        engine_debug!("fbengine::TargetManager",
            "Created {} for {} ({}x{}) in {}",
            handle, target.id(), target.width(), target.height(), context);

        Ok(PhysicalFramebuffer::new(handle, target.width(), target.height()))
    }

    /// Bring the bound physical framebuffer in line with `target`
    ///
    /// Order: color attachments, draw-buffer list, depth-stencil storage.
    fn reconcile(
        device: &mut dyn GraphicsDevice,
        textures: &mut dyn TextureBinder,
        config: &TargetManagerConfig,
        capabilities: &RenderTargetCapabilities,
        target: &RenderTarget,
        physical: &mut PhysicalFramebuffer,
    ) -> Result<()> {
        let framebuffer = physical.handle();
        let requested = target.color_attachments();
        let attach_count = capabilities.color_attachment_limit(requested.len());

        if attach_count < requested.len() {
            engine_trace!("fbengine::TargetManager",
                "{}: binding {} of {} color attachments",
                target.id(), attach_count, requested.len());
        }

        // Native names are recycled by the driver, so an equal name in a slot
        // does not mean the same texture: every slot is attached again.
        for (slot, &texture) in requested.iter().take(attach_count).enumerate() {
            let native = textures.bind_texture(texture, config.scratch_texture_unit)?;
            device.attach_color_texture(framebuffer, slot as u32, Some(native))?;
            physical.set_color_attachment(slot, Some(native));
        }

        // Slots left over from a previous, longer attachment list
        for slot in attach_count..physical.color_attachments().len() {
            if physical.color_attachment(slot).is_some() {
                device.attach_color_texture(framebuffer, slot as u32, None)?;
            }
        }
        physical.truncate_color_slots(attach_count);

        if capabilities.multiple_render_targets {
            let draw_buffers: Vec<u32> = (0..attach_count as u32).collect();
            if physical.draw_buffers() != draw_buffers.as_slice() {
                device.set_draw_buffers(&draw_buffers)?;
                physical.set_draw_buffers(draw_buffers);
            }
        }

        let wants_depth_stencil = target.depth() || target.stencil();
        let resized = physical.size() != (target.width(), target.height());

        if let Some(storage) = physical.depth_stencil() {
            if !wants_depth_stencil || resized {
                device.attach_depth_stencil(framebuffer, None)?;
                device.delete_depth_stencil(storage)?;
                physical.set_depth_stencil(None);
            }
        }
        physical.set_size(target.width(), target.height());

        if wants_depth_stencil && physical.depth_stencil().is_none() {
            let storage = device.create_depth_stencil(target.width(), target.height())?;
            device.attach_depth_stencil(framebuffer, Some(storage))?;
            physical.set_depth_stencil(Some(storage));
        }

        engine_trace!("fbengine::TargetManager",
            "Reconciled {} at revision {}", target.id(), target.revision());

        Ok(())
    }

    fn delete_physical(device: &mut dyn GraphicsDevice, physical: PhysicalFramebuffer) -> Result<()> {
        if let Some(storage) = physical.depth_stencil() {
            device.delete_depth_stencil(storage)?;
        }
        device.delete_framebuffer(physical.handle())
    }
}

/// Lock a shared collaborator, reporting poisoning as a backend error
fn lock<'a, T: ?Sized>(mutex: &'a Arc<Mutex<T>>, name: &str) -> Result<MutexGuard<'a, T>> {
    mutex.lock().map_err(|_| engine_err!("fbengine::TargetManager", BackendError,
        "{} lock poisoned", name))
}

#[cfg(test)]
#[path = "target_manager_tests.rs"]
mod tests;
