//! Off-screen render target module
//!
//! A render target is a fixed-size color + depth surface that a pass renders
//! into and the water surface later samples. The frame buffer manager owns
//! the named targets and enforces the single-bound-target contract.

mod render_target;
mod frame_buffer_manager;

pub use render_target::{RenderTarget, DepthMode};
pub use frame_buffer_manager::{FrameBufferManager, REFLECTION, REFRACTION, REFRACTION_DEPTH};
