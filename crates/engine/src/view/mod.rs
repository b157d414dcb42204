mod transform;

pub use transform::{world_to_screen, Camera2D, ViewContext, Viewport};
