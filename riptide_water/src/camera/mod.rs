//! Camera module - fly camera and per-pass render view.
//!
//! Cameras are owned and driven by the caller; the pipeline never stores
//! one across frames.

mod camera;
mod render_view;

pub use camera::Camera;
pub use render_view::RenderView;
