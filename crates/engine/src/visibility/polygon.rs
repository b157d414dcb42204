use crate::geometry::Vec2;

use super::caster::LitRay;

/// Star-shaped region lit from an observer, ordered by ray angle.
///
/// Holds either no points or at least three; anything smaller cannot be
/// filled and is dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisibilityPolygon {
    points: Vec<Vec2>,
    render_offset: Vec2,
}

impl VisibilityPolygon {
    pub fn empty(render_offset: Vec2) -> Self {
        Self {
            points: Vec::new(),
            render_offset,
        }
    }

    pub(crate) fn assemble(
        observer: Vec2,
        rays: &[LitRay],
        gap: f64,
        close_wedge: bool,
        render_offset: Vec2,
    ) -> Self {
        let mut points = Vec::with_capacity(rays.len() + 2);
        let mut inserted_observer = false;
        let mut previous_angle: Option<f64> = None;

        for lit in rays {
            if let Some(previous) = previous_angle {
                if (lit.ray.angle - previous).abs() > gap {
                    points.push(observer);
                    inserted_observer = true;
                }
            }
            points.push(lit.hit.point);
            previous_angle = Some(lit.ray.angle);
        }

        if close_wedge {
            if let Some(first) = rays.first() {
                if inserted_observer {
                    points.push(first.hit.point);
                } else {
                    points.push(observer);
                }
            }
        }

        if points.len() < 3 {
            points.clear();
        }

        Self {
            points,
            render_offset,
        }
    }

    pub fn world_points(&self) -> &[Vec2] {
        &self.points
    }

    /// Points translated into screen space, ready for a fill call.
    pub fn screen_points(&self) -> Vec<Vec2> {
        self.points
            .iter()
            .map(|point| *point - self.render_offset)
            .collect()
    }

    pub fn render_offset(&self) -> Vec2 {
        self.render_offset
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_drawable(&self) -> bool {
        self.points.len() >= 3
    }
}
