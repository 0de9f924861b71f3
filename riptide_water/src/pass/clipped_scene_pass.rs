/// ClippedScenePass - draws the scene once with a world-space clip plane.
///
/// The pass does not own a destination: whatever framebuffer is bound when
/// `run` is called receives the image. The clip plane is enabled only for the
/// duration of the scene draw and is disabled again on every exit path, so
/// later passes never inherit it.

use glam::Vec4;
use crate::camera::RenderView;
use crate::error::Result;
use crate::graphics_device::GraphicsDevice;
use super::{ClipPlane, Scene};

/// One clipped draw of the scene
#[derive(Debug, Clone)]
pub struct ClippedScenePass {
    label: String,
}

impl ClippedScenePass {
    /// `label` is only used in diagnostics
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into() }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Draw `scene` into the bound framebuffer, keeping only geometry on the
    /// positive side of `plane`.
    ///
    /// # Errors
    ///
    /// Returns the scene's draw error, or the device error of the first
    /// failing state change. The clip plane is disabled before returning in
    /// both cases.
    pub fn run(
        &self,
        device: &mut dyn GraphicsDevice,
        view: &RenderView,
        plane: &ClipPlane,
        scene: &dyn Scene,
    ) -> Result<()> {
        device.set_view(view)?;
        device.enable_clip_plane(plane.equation())?;

        let drawn = scene.draw(device, view);
        let disabled = device.disable_clip_plane();

        if let Err(err) = &drawn {
            crate::engine_debug!("riptide::ClippedScenePass",
                "{} pass: scene draw failed: {}", self.label, err);
        }
        drawn.and(disabled)
    }

    /// Same as `run` with a raw `(nx, ny, nz, d)` equation.
    ///
    /// # Errors
    ///
    /// `ConfigurationError` for a degenerate normal, checked before any
    /// device call.
    pub fn run_with_equation(
        &self,
        device: &mut dyn GraphicsDevice,
        view: &RenderView,
        equation: Vec4,
        scene: &dyn Scene,
    ) -> Result<()> {
        let plane = ClipPlane::from_equation(equation)?;
        self.run(device, view, &plane, scene)
    }
}

#[cfg(test)]
#[path = "clipped_scene_pass_tests.rs"]
mod tests;
