/// Camera - position + yaw/pitch fly camera.
///
/// The camera is owned and driven by the caller (input handling is not part
/// of this crate). The compositor only reads it and derives the mirrored
/// reflection camera from it every frame.

use glam::{Mat4, Vec3};
use super::render_view::RenderView;

/// Perspective camera described by position and Euler angles (radians).
///
/// Yaw rotates around +Y, measured from +X towards +Z. Pitch is the
/// elevation above the XZ plane, positive looking up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    /// Vertical field of view in radians
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// Camera at `position` with the given orientation and default lens
    /// (45° vertical FOV, near 0.1, far 1000).
    pub fn new(position: Vec3, yaw: f32, pitch: f32) -> Self {
        Self {
            position,
            yaw,
            pitch,
            fov_y: std::f32::consts::FRAC_PI_4,
            near: 0.1,
            far: 1000.0,
        }
    }

    /// Camera at `position` oriented towards `target`.
    ///
    /// `target` must differ from `position`.
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        let dir = (target - position).normalize_or_zero();
        let pitch = dir.y.clamp(-1.0, 1.0).asin();
        let yaw = dir.z.atan2(dir.x);
        Self::new(position, yaw, pitch)
    }

    /// Unit view direction
    pub fn front(&self) -> Vec3 {
        Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
        .normalize()
    }

    /// Right-handed view matrix (world → view)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front(), Vec3::Y)
    }

    /// Right-handed perspective projection for the given aspect ratio
    pub fn projection_matrix(&self, aspect_ratio: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, aspect_ratio, self.near, self.far)
    }

    /// Mirror image of this camera across the horizontal plane `y = height`.
    ///
    /// The height is reflected and the pitch negated; yaw and lens are kept.
    /// Applying it twice with the same height yields the original camera.
    pub fn mirrored(&self, height: f32) -> Self {
        let mut mirrored = *self;
        mirrored.position.y = 2.0 * height - self.position.y;
        mirrored.pitch = -self.pitch;
        mirrored
    }

    /// Signed distance from the camera to the plane `y = height`
    pub fn height_above(&self, height: f32) -> f32 {
        self.position.y - height
    }

    /// Snapshot for one pass
    pub fn render_view(&self, aspect_ratio: f32) -> RenderView {
        RenderView::new(
            self.view_matrix(),
            self.projection_matrix(aspect_ratio),
            self.position,
        )
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
