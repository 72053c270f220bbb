//! Rendering module
//!
//! The scene is drawn through the `Surface` trait so the same code paints a
//! browser canvas or records draw calls for tests and headless runs.

pub mod draw_list;
pub mod scene;
pub mod surface;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use draw_list::{DrawCmd, DrawList};
pub use scene::render;
pub use surface::{
    Color, Font, FontFamily, LinearGradient, Paint, Stroke, Surface, TextAlign, TextStyle,
};
