/// World-space clip plane.
///
/// Plane equation `(nx, ny, nz, d)` with a unit normal. A point `p` is kept
/// when `dot(n, p) + d >= 0` and discarded otherwise. The equation is given
/// in world space: scene vertices are compared after the model transform and
/// before the view transform.

use glam::{Vec3, Vec4};
use crate::error::Result;
use crate::engine_bail;

/// Normals shorter than this are rejected as degenerate
pub const MIN_NORMAL_LENGTH: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipPlane {
    normal: Vec3,
    d: f32,
}

impl ClipPlane {
    /// Plane from a normal and offset; a non-unit normal is rescaled
    /// together with `d` so the kept half-space does not change.
    ///
    /// # Errors
    ///
    /// `ConfigurationError` for a zero, near-zero or non-finite normal, or a
    /// non-finite offset.
    pub fn new(normal: Vec3, d: f32) -> Result<Self> {
        let length = normal.length();
        if !length.is_finite() || !d.is_finite() {
            engine_bail!(ConfigurationError, "riptide::ClipPlane",
                "clip plane ({}, {}, {}, {}) is not finite", normal.x, normal.y, normal.z, d);
        }
        if length < MIN_NORMAL_LENGTH {
            engine_bail!(ConfigurationError, "riptide::ClipPlane",
                "clip plane normal ({}, {}, {}) has near-zero length", normal.x, normal.y, normal.z);
        }
        Ok(Self {
            normal: normal / length,
            d: d / length,
        })
    }

    /// Plane from a raw `(nx, ny, nz, d)` equation
    pub fn from_equation(equation: Vec4) -> Result<Self> {
        Self::new(equation.truncate(), equation.w)
    }

    /// Keeps everything at or above `y = height` (reflection pass)
    pub fn keep_above(height: f32) -> Self {
        Self { normal: Vec3::Y, d: -height }
    }

    /// Keeps everything at or below `y = height` (refraction pass)
    pub fn keep_below(height: f32) -> Self {
        Self { normal: Vec3::NEG_Y, d: height }
    }

    /// Unit normal
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Offset `d`
    pub fn offset(&self) -> f32 {
        self.d
    }

    /// `(nx, ny, nz, d)` as uploaded to the device
    pub fn equation(&self) -> Vec4 {
        self.normal.extend(self.d)
    }

    /// Signed distance of `point` to the plane (positive on the kept side)
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.d
    }

    /// True if `point` survives clipping
    pub fn keeps(&self, point: Vec3) -> bool {
        self.signed_distance(point) >= 0.0
    }

    /// Same plane, opposite kept half-space
    pub fn flipped(&self) -> Self {
        Self { normal: -self.normal, d: -self.d }
    }
}

#[cfg(test)]
#[path = "clip_plane_tests.rs"]
mod tests;
