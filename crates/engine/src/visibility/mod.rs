mod caster;
mod config;
mod occluders;
mod polygon;

pub use caster::{LitRay, VisibilityEngine};
pub use config::{LightCone, VisibilityConfig};
pub use occluders::OccluderSet;
pub use polygon::VisibilityPolygon;
