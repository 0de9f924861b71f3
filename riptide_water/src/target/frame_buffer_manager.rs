/// Owner of the named off-screen targets and of the bind/unbind contract.
///
/// At most one target is bound at any time. Binding a target while another
/// one is bound replaces it in a single device call, so there is no instant
/// where two targets are active. `unbind` always returns to the default
/// framebuffer with the window-sized viewport.

use std::sync::Arc;
use rustc_hash::FxHashMap;
use winit::dpi::PhysicalSize;
use crate::error::{Error, Result};
use crate::engine_bail;
use crate::graphics_device::{GraphicsDevice, Texture, Viewport};
use super::render_target::{RenderTarget, DepthMode};

/// Reflection color target (mirrored view, above the water)
pub const REFLECTION: &str = "reflection";
/// Refraction color target (real view, below the water)
pub const REFRACTION: &str = "refraction";
/// Depth texture of the refraction target (sampled, not bindable)
pub const REFRACTION_DEPTH: &str = "refraction_depth";

enum TargetSlot {
    Ready(RenderTarget),
    /// Allocation failed; kept so that `bind` reports it instead of "unknown"
    Unavailable(Error),
}

pub struct FrameBufferManager {
    targets: FxHashMap<String, TargetSlot>,
    /// `<target>_depth` → `<target>` for targets with a depth texture
    depth_aliases: FxHashMap<String, String>,
    bound: Option<String>,
    window_size: PhysicalSize<u32>,
}

impl FrameBufferManager {
    /// Empty manager for a window of the given size
    pub fn new(window_size: PhysicalSize<u32>) -> Self {
        Self {
            targets: FxHashMap::default(),
            depth_aliases: FxHashMap::default(),
            bound: None,
            window_size,
        }
    }

    /// Create a named target.
    ///
    /// A target with `DepthMode::Texture` also registers `<name>_depth` as a
    /// sampled-only alias for its depth texture.
    ///
    /// # Errors
    ///
    /// - `ConfigurationError` if the name is taken or the size is invalid
    /// - `ResourceExhaustion` if allocation fails; the name is then recorded
    ///   as unavailable
    pub fn create_target(
        &mut self,
        device: &mut dyn GraphicsDevice,
        name: &str,
        width: u32,
        height: u32,
        depth_mode: DepthMode,
    ) -> Result<&RenderTarget> {
        if self.targets.contains_key(name) || self.depth_aliases.contains_key(name) {
            engine_bail!(ConfigurationError, "riptide::FrameBufferManager",
                "RenderTarget '{}' already exists", name);
        }

        match RenderTarget::create(device, name, width, height, depth_mode) {
            Ok(target) => {
                if depth_mode == DepthMode::Texture {
                    self.depth_aliases.insert(format!("{}_depth", name), name.to_string());
                }
                self.targets.insert(name.to_string(), TargetSlot::Ready(target));
                match self.targets.get(name) {
                    Some(TargetSlot::Ready(target)) => Ok(target),
                    _ => Err(Error::BackendError(format!("RenderTarget '{}' vanished", name))),
                }
            }
            Err(err) if err.is_resource_exhaustion() => {
                crate::engine_warn!("riptide::FrameBufferManager",
                    "RenderTarget '{}' unavailable: {}", name, err);
                self.targets.insert(name.to_string(), TargetSlot::Unavailable(err.clone()));
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    fn ready(&self, name: &str) -> Result<&RenderTarget> {
        match self.targets.get(name) {
            Some(TargetSlot::Ready(target)) => Ok(target),
            Some(TargetSlot::Unavailable(cause)) => Err(Error::ConfigurationError(format!(
                "RenderTarget '{}' failed to initialize ({})", name, cause))),
            None if self.depth_aliases.contains_key(name) => Err(Error::ConfigurationError(format!(
                "'{}' is a depth texture and cannot be bound as a render target", name))),
            None => Err(Error::ConfigurationError(format!(
                "unknown RenderTarget '{}'", name))),
        }
    }

    // ===== BIND / UNBIND =====

    /// Make the named target the render destination and set the viewport
    /// to its resolution.
    ///
    /// # Errors
    ///
    /// `ConfigurationError` for an unknown name, a depth alias, or a target
    /// that failed to initialize. The previous binding is left untouched.
    /// A device failure after the framebuffer switch falls back to the
    /// default framebuffer before returning.
    pub fn bind(&mut self, device: &mut dyn GraphicsDevice, name: &str) -> Result<()> {
        let target = match self.ready(name) {
            Ok(target) => target,
            Err(err) => {
                crate::engine_error!("riptide::FrameBufferManager", "bind failed: {}", err);
                return Err(err);
            }
        };

        let viewport = Viewport::from_size(target.width(), target.height());
        device.bind_framebuffer(Some(target.framebuffer()?))?;
        if let Err(err) = device.set_viewport(viewport) {
            // Target is bound on the device but unusable: back to default
            if let Err(rollback) = self.unbind(device) {
                crate::engine_error!("riptide::FrameBufferManager",
                    "failed to restore default framebuffer after binding '{}': {}", name, rollback);
            }
            return Err(err);
        }

        if let Some(previous) = self.bound.as_deref() {
            crate::engine_trace!("riptide::FrameBufferManager",
                "'{}' replaces bound target '{}'", name, previous);
        }
        self.bound = Some(name.to_string());
        Ok(())
    }

    /// Return to the default framebuffer with the window-sized viewport.
    ///
    /// Both device calls are attempted and the manager forgets its bound
    /// target even on failure; the first error is returned.
    pub fn unbind(&mut self, device: &mut dyn GraphicsDevice) -> Result<()> {
        self.bound = None;
        let framebuffer = device.bind_framebuffer(None);
        let viewport = device.set_viewport(self.window_viewport());
        framebuffer.and(viewport)
    }

    /// Name of the bound target, `None` when the default framebuffer is active
    pub fn bound_target(&self) -> Option<&str> {
        self.bound.as_deref()
    }

    pub fn is_bound(&self) -> bool {
        self.bound.is_some()
    }

    // ===== WINDOW =====

    /// Track a window resize. Off-screen targets keep their resolution.
    pub fn resize_window(&mut self, size: PhysicalSize<u32>) {
        self.window_size = size;
    }

    pub fn window_size(&self) -> PhysicalSize<u32> {
        self.window_size
    }

    /// Viewport used for the default framebuffer
    pub fn window_viewport(&self) -> Viewport {
        Viewport::from_size(self.window_size.width, self.window_size.height)
    }

    // ===== LOOKUP =====

    /// Sampled texture by name: color of a target, or `<target>_depth`
    pub fn texture(&self, name: &str) -> Result<&Arc<dyn Texture>> {
        if let Some(owner) = self.depth_aliases.get(name) {
            return self.ready(owner)?
                .depth_texture()?
                .ok_or_else(|| Error::ConfigurationError(format!(
                    "RenderTarget '{}' has no depth texture", owner)));
        }
        self.ready(name)?.color_texture()
    }

    /// Get a ready render target by name
    pub fn target(&self, name: &str) -> Option<&RenderTarget> {
        match self.targets.get(name) {
            Some(TargetSlot::Ready(target)) => Some(target),
            _ => None,
        }
    }

    /// True if the target exists and initialized successfully
    pub fn is_available(&self, name: &str) -> bool {
        self.target(name).is_some()
    }

    /// Number of targets, unavailable ones included
    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    pub fn target_names(&self) -> Vec<&str> {
        self.targets.keys().map(|k| k.as_str()).collect()
    }

    // ===== TEARDOWN =====

    /// Unbind if needed and destroy every target exactly once.
    ///
    /// All targets are released even if one fails; the first error is returned.
    pub fn destroy_all(&mut self, device: &mut dyn GraphicsDevice) -> Result<()> {
        let mut first_error = None;

        if self.is_bound() {
            if let Err(err) = self.unbind(device) {
                first_error.get_or_insert(err);
            }
        }

        for (name, slot) in self.targets.drain() {
            if let TargetSlot::Ready(mut target) = slot {
                if let Err(err) = target.destroy(device) {
                    crate::engine_error!("riptide::FrameBufferManager",
                        "failed to destroy '{}': {}", name, err);
                    first_error.get_or_insert(err);
                }
            }
        }
        self.depth_aliases.clear();

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "frame_buffer_manager_tests.rs"]
mod tests;
