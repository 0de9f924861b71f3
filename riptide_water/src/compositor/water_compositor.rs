/// WaterCompositor - per-frame orchestration of the planar water effect.
///
/// Every frame runs the same fixed cycle:
///
/// ```text
/// Idle -> ReflectionPass -> RefractionPass -> SurfaceDraw -> Idle
/// ```
///
/// - ReflectionPass: mirrored camera into `reflection`, keeps `y >= h`
/// - RefractionPass: real camera into `refraction`, keeps `y <= h`
/// - SurfaceDraw: default framebuffer, both images sampled by the material
///
/// A failed off-screen pass unbinds its target, skips the surface draw and
/// is reported once per run of consecutive failures. The next frame retries
/// the whole cycle. When the targets could not be allocated at setup the
/// compositor keeps running and draws the surface with a flat color.

use winit::dpi::PhysicalSize;
use crate::camera::{Camera, RenderView};
use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::{engine_bail, engine_err};
use crate::graphics_device::{GraphicsDevice, ClearFlags, ClearValue};
use crate::pass::{ClipPlane, ClippedScenePass, Scene};
use crate::surface::{
    SurfaceMaterial, WaterUniforms, REFLECTION_SAMPLER, REFRACTION_SAMPLER, DEPTH_SAMPLER,
};
use crate::target::{
    FrameBufferManager, DepthMode, REFLECTION, REFRACTION, REFRACTION_DEPTH,
};

/// Stage of the frame cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositorState {
    Idle,
    ReflectionPass,
    RefractionPass,
    SurfaceDraw,
}

/// What a call to `render_frame` produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Both passes ran and the blended surface was drawn
    Composited,
    /// Effect disabled; the surface was drawn with the flat color
    FlatFallback,
    /// An off-screen pass failed; nothing was drawn on the surface
    Skipped,
}

pub struct WaterCompositor {
    config: PipelineConfig,
    targets: FrameBufferManager,
    material: Box<dyn SurfaceMaterial>,
    reflection_pass: ClippedScenePass,
    refraction_pass: ClippedScenePass,
    state: CompositorState,
    effect_enabled: bool,
    destroyed: bool,
    frame_index: u64,
    move_factor: f32,
    /// Consecutive frames where a pass or the surface draw failed
    failure_streak: u64,
    /// Failures not logged because a streak was already reported
    suppressed_failures: u64,
}

impl WaterCompositor {
    /// Validate `config`, wire the material samplers and allocate both
    /// off-screen targets.
    ///
    /// # Errors
    ///
    /// `ConfigurationError` for an invalid configuration or material setup.
    /// Allocation failure is not an error: the compositor is returned with
    /// the effect disabled.
    pub fn new(
        device: &mut dyn GraphicsDevice,
        config: PipelineConfig,
        mut material: Box<dyn SurfaceMaterial>,
    ) -> Result<Self> {
        config.validate()?;

        material.set_sampler_slot(REFLECTION_SAMPLER, config.reflection_slot)?;
        material.set_sampler_slot(REFRACTION_SAMPLER, config.refraction_slot)?;
        if config.sample_refraction_depth {
            material.set_sampler_slot(DEPTH_SAMPLER, config.depth_slot)?;
        }

        let mut targets = FrameBufferManager::new(config.window_size);
        let effect_enabled = match Self::create_targets(device, &mut targets, &config) {
            Ok(()) => true,
            Err(err) if err.is_resource_exhaustion() => {
                if let Err(cleanup) = targets.destroy_all(device) {
                    crate::engine_error!("riptide::WaterCompositor",
                        "cleanup after failed allocation: {}", cleanup);
                }
                crate::engine_warn!("riptide::WaterCompositor",
                    "water effect disabled, drawing flat surface: {}", err);
                false
            }
            Err(err) => {
                if let Err(cleanup) = targets.destroy_all(device) {
                    crate::engine_error!("riptide::WaterCompositor",
                        "cleanup after failed setup: {}", cleanup);
                }
                return Err(err);
            }
        };

        crate::engine_info!("riptide::WaterCompositor",
            "water compositor ready (reflection {}x{}, refraction {}x{}, effect {})",
            config.reflection_size.width, config.reflection_size.height,
            config.refraction_size.width, config.refraction_size.height,
            if effect_enabled { "on" } else { "off" });

        Ok(Self {
            config,
            targets,
            material,
            reflection_pass: ClippedScenePass::new(REFLECTION),
            refraction_pass: ClippedScenePass::new(REFRACTION),
            state: CompositorState::Idle,
            effect_enabled,
            destroyed: false,
            frame_index: 0,
            move_factor: 0.0,
            failure_streak: 0,
            suppressed_failures: 0,
        })
    }

    fn create_targets(
        device: &mut dyn GraphicsDevice,
        targets: &mut FrameBufferManager,
        config: &PipelineConfig,
    ) -> Result<()> {
        let reflection = config.reflection_size;
        let refraction = config.refraction_size;
        targets.create_target(device, REFLECTION,
            reflection.width, reflection.height, DepthMode::Renderbuffer)?;
        targets.create_target(device, REFRACTION,
            refraction.width, refraction.height, DepthMode::Texture)?;
        Ok(())
    }

    // ===== FRAME =====

    /// Run one full frame cycle for a water plane at `water_height`.
    ///
    /// # Errors
    ///
    /// - `ConfigurationError` if the previous frame did not return to `Idle`
    /// - `InvalidResource` after `destroy`
    /// - the device error if the surface draw itself fails; the water
    ///   samplers are unbound first and only the first failure of a streak
    ///   is logged
    ///
    /// Off-screen pass failures are not errors: they yield
    /// `FrameOutcome::Skipped`.
    pub fn render_frame(
        &mut self,
        device: &mut dyn GraphicsDevice,
        camera: &Camera,
        scene: &dyn Scene,
        water_height: f32,
    ) -> Result<FrameOutcome> {
        if self.destroyed {
            engine_bail!(InvalidResource, "riptide::WaterCompositor",
                "render_frame called after destroy");
        }
        if self.state != CompositorState::Idle {
            engine_bail!(ConfigurationError, "riptide::WaterCompositor",
                "render_frame entered in state {:?}; frames must not overlap", self.state);
        }

        self.frame_index += 1;
        let result = self.run_cycle(device, camera, scene, water_height);
        self.state = CompositorState::Idle;
        result
    }

    fn run_cycle(
        &mut self,
        device: &mut dyn GraphicsDevice,
        camera: &Camera,
        scene: &dyn Scene,
        water_height: f32,
    ) -> Result<FrameOutcome> {
        if !self.effect_enabled {
            self.finish_surface(device, camera, water_height, true)?;
            return Ok(FrameOutcome::FlatFallback);
        }

        let aspect = self.targets.window_viewport().aspect_ratio();
        let clear = self.config.clear_value;

        self.state = CompositorState::ReflectionPass;
        let mirrored = camera.mirrored(water_height).render_view(aspect);
        if let Err(err) = run_offscreen(device, &mut self.targets, &self.reflection_pass,
            &mirrored, &ClipPlane::keep_above(water_height), scene, clear)
        {
            self.record_failure(CompositorState::ReflectionPass, &err);
            return Ok(FrameOutcome::Skipped);
        }

        self.state = CompositorState::RefractionPass;
        let real = camera.render_view(aspect);
        if let Err(err) = run_offscreen(device, &mut self.targets, &self.refraction_pass,
            &real, &ClipPlane::keep_below(water_height), scene, clear)
        {
            self.record_failure(CompositorState::RefractionPass, &err);
            return Ok(FrameOutcome::Skipped);
        }

        self.finish_surface(device, camera, water_height, false)?;
        Ok(FrameOutcome::Composited)
    }

    /// Surface draw plus streak bookkeeping
    fn finish_surface(
        &mut self,
        device: &mut dyn GraphicsDevice,
        camera: &Camera,
        water_height: f32,
        flat: bool,
    ) -> Result<()> {
        self.state = CompositorState::SurfaceDraw;
        if let Err(err) = self.draw_surface(device, camera, water_height, flat) {
            if !flat {
                self.unbind_samplers(device);
            }
            self.record_failure(CompositorState::SurfaceDraw, &err);
            return Err(err);
        }

        if self.failure_streak > 0 {
            crate::engine_info!("riptide::WaterCompositor",
                "water rendering recovered after {} failed frame(s)", self.failure_streak);
            self.failure_streak = 0;
        }
        Ok(())
    }

    fn record_failure(&mut self, stage: CompositorState, err: &Error) {
        if self.failure_streak == 0 {
            crate::engine_warn!("riptide::WaterCompositor",
                "frame {}: {:?} failed, water surface skipped: {}", self.frame_index, stage, err);
        } else {
            self.suppressed_failures += 1;
        }
        self.failure_streak += 1;
    }

    /// Clear the slots the surface draw may have bound
    fn unbind_samplers(&self, device: &mut dyn GraphicsDevice) {
        let mut slots = vec![self.config.reflection_slot, self.config.refraction_slot];
        if self.config.sample_refraction_depth {
            slots.push(self.config.depth_slot);
        }
        for slot in slots {
            if let Err(err) = device.bind_texture(slot, None) {
                crate::engine_error!("riptide::WaterCompositor",
                    "failed to unbind sampler slot {}: {}", slot, err);
            }
        }
    }

    fn draw_surface(
        &mut self,
        device: &mut dyn GraphicsDevice,
        camera: &Camera,
        water_height: f32,
        flat: bool,
    ) -> Result<()> {
        // Default framebuffer with the window viewport
        self.targets.unbind(device)?;
        let aspect = self.targets.window_viewport().aspect_ratio();
        device.set_view(&camera.render_view(aspect))?;

        let sample_depth = !flat && self.config.sample_refraction_depth;
        if !flat {
            device.bind_texture(self.config.reflection_slot, Some(self.targets.texture(REFLECTION)?))?;
            device.bind_texture(self.config.refraction_slot, Some(self.targets.texture(REFRACTION)?))?;
            if sample_depth {
                device.bind_texture(self.config.depth_slot,
                    Some(self.targets.texture(REFRACTION_DEPTH)?))?;
            }
        }

        let uniforms = WaterUniforms {
            camera_position: camera.position.extend(1.0).to_array(),
            flat_color: self.config.flat_color,
            reflectivity: self.config.blend.reflectivity(camera.front()),
            move_factor: self.move_factor,
            distortion_strength: self.config.distortion_strength,
            water_height,
            near: camera.near,
            far: camera.far,
            flat: flat as u32,
            sample_depth: sample_depth as u32,
        };
        self.material.draw(device, &uniforms)
    }

    // ===== ANIMATION / WINDOW =====

    /// Advance the distortion animation by `dt` seconds
    pub fn advance(&mut self, dt: f32) {
        if dt.is_finite() {
            self.move_factor = (self.move_factor + self.config.distortion_speed * dt).rem_euclid(1.0);
        }
    }

    /// Track a window resize. Off-screen resolutions are unchanged.
    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        self.targets.resize_window(size);
    }

    /// Recover from a frame that was interrupted before returning to `Idle`
    /// (for example by a panicking scene): restore the default framebuffer,
    /// drop the clip plane and go back to `Idle`.
    pub fn abort_frame(&mut self, device: &mut dyn GraphicsDevice) -> Result<()> {
        if self.state == CompositorState::Idle {
            return Ok(());
        }
        crate::engine_warn!("riptide::WaterCompositor",
            "aborting frame {} in state {:?}", self.frame_index, self.state);
        self.state = CompositorState::Idle;
        let disabled = device.disable_clip_plane();
        self.targets.unbind(device).and(disabled)
    }

    /// Release both off-screen targets.
    ///
    /// # Errors
    ///
    /// `InvalidResource` if already destroyed; otherwise the first device
    /// error (every target is still released).
    pub fn destroy(&mut self, device: &mut dyn GraphicsDevice) -> Result<()> {
        if self.destroyed {
            return Err(engine_err!(InvalidResource, "riptide::WaterCompositor",
                "water compositor already destroyed"));
        }
        self.destroyed = true;
        self.targets.destroy_all(device)
    }

    // ===== QUERIES =====

    pub fn state(&self) -> CompositorState {
        self.state
    }

    /// Number of frames started
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// False when the targets could not be allocated (flat fallback)
    pub fn effect_enabled(&self) -> bool {
        self.effect_enabled
    }

    /// Consecutive frames where a pass or the surface draw failed
    pub fn failure_streak(&self) -> u64 {
        self.failure_streak
    }

    /// Failures counted but not logged
    pub fn suppressed_failures(&self) -> u64 {
        self.suppressed_failures
    }

    /// Current distortion offset in [0, 1)
    pub fn move_factor(&self) -> f32 {
        self.move_factor
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn targets(&self) -> &FrameBufferManager {
        &self.targets
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

/// Bind `target`'s framebuffer, clear it, run `pass` and unbind. The target
/// is unbound on every path.
fn run_offscreen(
    device: &mut dyn GraphicsDevice,
    targets: &mut FrameBufferManager,
    pass: &ClippedScenePass,
    view: &RenderView,
    plane: &ClipPlane,
    scene: &dyn Scene,
    clear: ClearValue,
) -> Result<()> {
    let drawn = match targets.bind(device, pass.label()) {
        Ok(()) => device.clear(ClearFlags::COLOR | ClearFlags::DEPTH, clear)
            .and_then(|()| pass.run(device, view, plane, scene)),
        Err(err) => Err(err),
    };
    let unbound = targets.unbind(device);
    drawn.and(unbound)
}

#[cfg(test)]
#[path = "water_compositor_tests.rs"]
mod tests;
