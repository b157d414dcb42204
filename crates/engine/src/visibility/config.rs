use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

use crate::geometry::GeometryError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisibilityConfig {
    /// Angular offset of the two extra rays cast beside every occluder corner.
    pub corner_epsilon: f64,
    /// Consecutive rays further apart than this get the observer inserted
    /// between them. `2π` never triggers and yields a full-circle light.
    pub field_of_view_gap: f64,
    /// Corners are only considered inside the viewport scaled by this factor.
    pub prefilter_scale: f64,
    pub prefilter_enabled: bool,
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self {
            corner_epsilon: 1e-5,
            field_of_view_gap: TAU,
            prefilter_scale: 3.0,
            prefilter_enabled: true,
        }
    }
}

/// Flashlight cone centred on `facing` and `spread` radians wide.
///
/// The spread is strictly between 0 and π, so the unlit wedge behind the
/// observer is always wider than the cone itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightCone {
    facing: f64,
    spread: f64,
}

impl LightCone {
    pub fn new(facing: f64, spread: f64) -> Result<Self, GeometryError> {
        if !facing.is_finite() {
            return Err(GeometryError::NonFinite);
        }
        if !(spread.is_finite() && spread > 0.0 && spread < PI) {
            return Err(GeometryError::InvalidConeSpread { spread });
        }
        Ok(Self { facing, spread })
    }

    /// Same cone turned to face `facing`. Non-finite angles keep the old facing.
    pub fn with_facing(self, facing: f64) -> Self {
        if facing.is_finite() {
            Self { facing, ..self }
        } else {
            self
        }
    }

    pub fn facing(&self) -> f64 {
        self.facing
    }

    pub fn spread(&self) -> f64 {
        self.spread
    }

    pub fn edge_angles(&self) -> (f64, f64) {
        let half = self.spread * 0.5;
        (self.facing + half, self.facing - half)
    }
}
