use serde::{Deserialize, Serialize};

use crate::geometry::{Rect, Vec2};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
        }
    }
}

/// Camera position is the world point shown at the centre of the viewport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Camera2D {
    pub position: Vec2,
}

/// Per-viewport context handed to visibility queries and render hand-off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewContext {
    pub camera: Camera2D,
    pub viewport: Viewport,
}

impl ViewContext {
    pub fn new(camera: Camera2D, viewport: Viewport) -> Self {
        Self { camera, viewport }
    }

    /// World position of the top-left screen pixel.
    pub fn render_offset(&self) -> Vec2 {
        Vec2 {
            x: self.camera.position.x - self.viewport.width as f64 * 0.5,
            y: self.camera.position.y - self.viewport.height as f64 * 0.5,
        }
    }

    /// Screen rectangle scaled by `scale` around the camera.
    pub fn scaled_bounds(&self, scale: f64) -> Rect {
        Rect::centered_on(
            self.camera.position,
            self.viewport.width as f64 * scale,
            self.viewport.height as f64 * scale,
        )
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        world_to_screen(world, self.render_offset())
    }
}

pub fn world_to_screen(world: Vec2, render_offset: Vec2) -> Vec2 {
    world - render_offset
}
