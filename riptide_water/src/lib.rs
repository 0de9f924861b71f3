/*!
# Riptide Water

Planar water reflection / refraction on top of a bind-to-edit GPU API.

Each frame the scene is drawn three times: once from a camera mirrored
across the water plane into a small reflection target, once from the real
camera into a refraction target, and once more as a water surface that
blends the two images on the default framebuffer.

## Architecture

- **GraphicsDevice**: GPU API trait (textures, framebuffers, clip plane, draws)
- **RenderTarget**: off-screen framebuffer with a color and a depth attachment
- **FrameBufferManager**: named targets, single bound target, window viewport
- **ClippedScenePass**: one scene draw restricted by a world-space clip plane
- **WaterCompositor**: per-frame state machine driving the three passes
- **SurfaceMaterial**: water shader inputs (sampler slots, uniform block)

Backends implement `GraphicsDevice`; scenes implement `Scene`.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod config;
pub mod graphics_device;
pub mod camera;
pub mod target;
pub mod pass;
pub mod surface;
pub mod compositor;

// Main riptide namespace module
pub mod riptide {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging entry point
    pub use crate::engine::Engine;

    // Pipeline entry points
    pub use crate::config::PipelineConfig;
    pub use crate::compositor::{WaterCompositor, CompositorState, FrameOutcome};

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // GPU API sub-module
    pub mod device {
        pub use crate::graphics_device::*;
    }

    // Camera sub-module
    pub mod camera {
        pub use crate::camera::*;
    }

    // Off-screen targets sub-module
    pub mod target {
        pub use crate::target::*;
    }

    // Clipped passes sub-module
    pub mod pass {
        pub use crate::pass::*;
    }

    // Water surface sub-module
    pub mod surface {
        pub use crate::surface::*;
    }
}

// Re-export math library at crate root
pub use glam;
