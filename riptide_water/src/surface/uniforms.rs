/// Per-frame parameters of the water surface shader.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// How the reflection and refraction images are mixed
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceBlend {
    /// Constant reflection weight in [0, 1]
    Fixed(f32),
    /// Reflection weight grows as the view gets closer to grazing.
    /// Refraction weight is `cos(angle to the plane normal) ^ power`.
    Fresnel { power: f32 },
}

impl Default for SurfaceBlend {
    fn default() -> Self {
        SurfaceBlend::Fresnel { power: 0.5 }
    }
}

impl SurfaceBlend {
    /// Reflection weight in [0, 1] for a camera looking along `view_dir`
    pub fn reflectivity(&self, view_dir: Vec3) -> f32 {
        match *self {
            SurfaceBlend::Fixed(mix) => mix.clamp(0.0, 1.0),
            SurfaceBlend::Fresnel { power } => {
                let cos = view_dir.normalize_or_zero().y.abs();
                1.0 - cos.powf(power).clamp(0.0, 1.0)
            }
        }
    }

    /// True if the parameters are usable
    pub fn is_valid(&self) -> bool {
        match *self {
            SurfaceBlend::Fixed(mix) => mix.is_finite() && (0.0..=1.0).contains(&mix),
            SurfaceBlend::Fresnel { power } => power.is_finite() && power > 0.0,
        }
    }
}

/// Uniform block uploaded before the surface draw (64 bytes, std140-compatible)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct WaterUniforms {
    /// xyz = camera position, w = 1
    pub camera_position: [f32; 4],
    /// Color used when the effect is disabled
    pub flat_color: [f32; 4],
    /// Reflection weight of the blend
    pub reflectivity: f32,
    /// Distortion offset in [0, 1)
    pub move_factor: f32,
    pub distortion_strength: f32,
    pub water_height: f32,
    /// Camera near plane (depth linearization)
    pub near: f32,
    /// Camera far plane (depth linearization)
    pub far: f32,
    /// 1 when `flat_color` replaces the two-texture blend
    pub flat: u32,
    /// 1 when the refraction depth texture is bound
    pub sample_depth: u32,
}

impl WaterUniforms {
    /// Raw bytes for `GraphicsDevice::push_constants`
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    pub fn is_flat(&self) -> bool {
        self.flat != 0
    }
}

#[cfg(test)]
#[path = "uniforms_tests.rs"]
mod tests;
