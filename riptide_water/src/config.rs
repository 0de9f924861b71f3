/// Pipeline configuration
///
/// Everything the compositor needs at setup time. Off-screen resolutions are
/// fixed for the lifetime of the compositor; only the window size changes
/// later, through `WaterCompositor::resize`.

use winit::dpi::PhysicalSize;
use crate::error::Result;
use crate::engine_bail;
use crate::graphics_device::ClearValue;
use crate::surface::SurfaceBlend;

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Reflection target resolution (mirrored view, depth not sampled)
    pub reflection_size: PhysicalSize<u32>,
    /// Refraction target resolution (real view, depth sampled)
    pub refraction_size: PhysicalSize<u32>,
    /// Initial window size
    pub window_size: PhysicalSize<u32>,
    /// Clear applied to each off-screen target before its pass
    pub clear_value: ClearValue,
    /// Bind the refraction depth texture during the surface draw
    pub sample_refraction_depth: bool,
    pub blend: SurfaceBlend,
    /// Distortion move factor advance per second
    pub distortion_speed: f32,
    /// Maximum UV offset of the distortion
    pub distortion_strength: f32,
    /// Surface color used while the off-screen targets are unavailable
    pub flat_color: [f32; 4],
    pub reflection_slot: u32,
    pub refraction_slot: u32,
    pub depth_slot: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            reflection_size: PhysicalSize::new(320, 180),
            refraction_size: PhysicalSize::new(1280, 720),
            window_size: PhysicalSize::new(1280, 720),
            clear_value: ClearValue::default(),
            sample_refraction_depth: true,
            blend: SurfaceBlend::default(),
            distortion_speed: 0.03,
            distortion_strength: 0.02,
            flat_color: [0.0, 0.3, 0.5, 1.0],
            reflection_slot: 0,
            refraction_slot: 1,
            depth_slot: 2,
        }
    }
}

impl PipelineConfig {
    /// Check every field.
    ///
    /// # Errors
    ///
    /// `ConfigurationError` naming the first invalid field.
    pub fn validate(&self) -> Result<()> {
        for (field, size) in [
            ("reflection_size", self.reflection_size),
            ("refraction_size", self.refraction_size),
            ("window_size", self.window_size),
        ] {
            if size.width == 0 || size.height == 0 {
                engine_bail!(ConfigurationError, "riptide::PipelineConfig",
                    "{} must be non-zero, got {}x{}", field, size.width, size.height);
            }
        }

        if !self.blend.is_valid() {
            engine_bail!(ConfigurationError, "riptide::PipelineConfig",
                "invalid blend {:?}", self.blend);
        }
        if !self.distortion_speed.is_finite() {
            engine_bail!(ConfigurationError, "riptide::PipelineConfig",
                "distortion_speed must be finite");
        }
        if !self.distortion_strength.is_finite() || self.distortion_strength < 0.0 {
            engine_bail!(ConfigurationError, "riptide::PipelineConfig",
                "distortion_strength must be a non-negative number, got {}", self.distortion_strength);
        }
        if self.flat_color.iter().any(|c| !(0.0..=1.0).contains(c)) {
            engine_bail!(ConfigurationError, "riptide::PipelineConfig",
                "flat_color components must be in [0, 1], got {:?}", self.flat_color);
        }

        let depth_clash = self.sample_refraction_depth
            && (self.depth_slot == self.reflection_slot || self.depth_slot == self.refraction_slot);
        if self.reflection_slot == self.refraction_slot || depth_clash {
            engine_bail!(ConfigurationError, "riptide::PipelineConfig",
                "sampler slots must be distinct (reflection {}, refraction {}, depth {})",
                self.reflection_slot, self.refraction_slot, self.depth_slot);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
