/// RenderView - per-pass snapshot of the camera.
///
/// Ephemeral: built for one pass of one frame. The reflection pass gets the
/// mirrored camera's view, the refraction and surface passes the real one.

use glam::{Mat4, Vec3};

/// View and projection used by every draw of one pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderView {
    view: Mat4,
    projection: Mat4,
    eye: Vec3,
}

impl RenderView {
    pub fn new(view: Mat4, projection: Mat4, eye: Vec3) -> Self {
        Self { view, projection, eye }
    }

    /// World → view
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view
    }

    /// View → clip
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection
    }

    /// projection * view
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection * self.view
    }

    /// World-space eye position
    pub fn eye(&self) -> Vec3 {
        self.eye
    }
}

#[cfg(test)]
#[path = "render_view_tests.rs"]
mod tests;
