//! Presentation seam.
//!
//! The renderer runs last in every frame, after all mutation, and only
//! reads. Frozen frames are rendered too.

use crate::world::World;

/// Read-only view of one finished frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    /// Frame number, starting at 1
    pub frame: u64,
    /// Simulation clock
    pub elapsed: f64,
    /// Whether the world was frozen this frame
    pub frozen: bool,
    /// Camera zoom
    pub zoom: f32,
    /// World state after this frame's updates
    pub world: &'a World,
}

/// Consumer of finished frames.
pub trait FrameRenderer {
    /// Draws one frame.
    fn render(&mut self, view: &FrameView<'_>);
}

/// Renderer that draws nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl FrameRenderer for NullRenderer {
    fn render(&mut self, _view: &FrameView<'_>) {}
}
