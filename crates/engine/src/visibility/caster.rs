use std::f64::consts::TAU;

use tracing::{debug, trace};

use crate::geometry::{normalize_angle, Intersection, Ray, Vec2};
use crate::view::ViewContext;

use super::{LightCone, OccluderSet, VisibilityConfig, VisibilityPolygon};

/// A cast ray together with its closest occluder hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LitRay {
    pub ray: Ray,
    pub hit: Intersection,
}

#[derive(Debug, Clone, Default)]
pub struct VisibilityEngine {
    config: VisibilityConfig,
}

impl VisibilityEngine {
    pub fn new(config: VisibilityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &VisibilityConfig {
        &self.config
    }

    /// Builds the lit polygon around `observer`. Without a cone the light is
    /// a full circle limited only by `field_of_view_gap`.
    pub fn compute(
        &self,
        observer: Vec2,
        occluders: &OccluderSet,
        view: &ViewContext,
        cone: Option<LightCone>,
    ) -> VisibilityPolygon {
        let rays = self.cast_rays(observer, occluders, view, cone);
        let gap = cone.map_or(self.config.field_of_view_gap, |cone| cone.spread());
        let polygon =
            VisibilityPolygon::assemble(observer, &rays, gap, cone.is_some(), view.render_offset());
        if !polygon.is_drawable() {
            trace!(
                x = observer.x,
                y = observer.y,
                ray_count = rays.len(),
                "visibility_polygon_degenerate"
            );
        }
        polygon
    }

    /// Casts one ray per candidate angle and keeps those bounded by an
    /// occluder, sorted by ascending angle.
    pub fn cast_rays(
        &self,
        observer: Vec2,
        occluders: &OccluderSet,
        view: &ViewContext,
        cone: Option<LightCone>,
    ) -> Vec<LitRay> {
        let angles = self.candidate_angles(observer, occluders, view, cone);
        let mut rays = Vec::with_capacity(angles.len());
        let mut unbounded = 0usize;

        for angle in angles {
            let ray = Ray::new(observer, angle);
            match ray.closest_intersection(occluders.segments()) {
                Some(hit) => rays.push(LitRay { ray, hit }),
                None => unbounded += 1,
            }
        }

        if unbounded > 0 {
            debug!(
                x = observer.x,
                y = observer.y,
                unbounded,
                "rays_without_occluder_discarded"
            );
        }

        rays.sort_by(|a, b| a.ray.angle.total_cmp(&b.ray.angle));
        rays
    }

    fn candidate_angles(
        &self,
        observer: Vec2,
        occluders: &OccluderSet,
        view: &ViewContext,
        cone: Option<LightCone>,
    ) -> Vec<f64> {
        let corners: Vec<Vec2> = if self.config.prefilter_enabled {
            let bounds = view.scaled_bounds(self.config.prefilter_scale);
            occluders.vertices_within(&bounds).collect()
        } else {
            occluders.vertices().to_vec()
        };

        let mut angles = Vec::new();
        match cone {
            None => {
                for corner in corners {
                    self.push_corner_angles(&mut angles, observer, corner);
                }
            }
            Some(cone) => {
                let (left, right) = cone.edge_angles();
                angles.push(normalize_angle(left));
                angles.push(normalize_angle(right));

                for corner in corners
                    .into_iter()
                    .filter(|corner| inside_cone(&cone, observer.angle_to(*corner)))
                {
                    self.push_corner_angles(&mut angles, observer, corner);
                }
            }
        }
        angles
    }

    fn push_corner_angles(&self, angles: &mut Vec<f64>, observer: Vec2, corner: Vec2) {
        let angle = observer.angle_to(corner);
        let epsilon = self.config.corner_epsilon;
        angles.push(angle - epsilon);
        angles.push(angle);
        angles.push(angle + epsilon);
    }
}

/// Whether `angle` lies within half the spread of the facing, either side.
fn inside_cone(cone: &LightCone, angle: f64) -> bool {
    let half = cone.spread() * 0.5;
    let offset = normalize_angle(angle - cone.facing());
    offset <= half || offset >= TAU - half
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_3, FRAC_PI_4, FRAC_PI_8, PI};

    use super::*;
    use crate::geometry::{Rect, Segment};
    use crate::view::{Camera2D, Viewport};

    fn view_centered_on(position: Vec2) -> ViewContext {
        ViewContext::new(Camera2D { position }, Viewport::default())
    }

    fn nearest_corner(point: Vec2, corners: &[Vec2; 4]) -> (usize, f64) {
        corners
            .iter()
            .enumerate()
            .map(|(index, corner)| (index, corner.distance(point)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .expect("four corners")
    }

    #[test]
    fn closed_room_from_center_traces_its_corners_in_angle_order() {
        let room = Rect::new(0.0, 0.0, 200.0, 100.0);
        let occluders = OccluderSet::from_rects(&[room]);
        let observer = room.center();
        let engine = VisibilityEngine::default();

        let polygon = engine.compute(observer, &occluders, &view_centered_on(observer), None);
        assert!(polygon.is_drawable());

        let [top_left, top_right, bottom_right, bottom_left] = room.corners();
        let corners = [bottom_right, bottom_left, top_left, top_right];
        let mut visited = Vec::new();
        for point in polygon.world_points() {
            let (index, distance) = nearest_corner(*point, &corners);
            assert!(distance < 0.01, "point {point:?} is not near a corner");
            if visited.last() != Some(&index) {
                visited.push(index);
            }
        }
        assert_eq!(visited, vec![0, 1, 2, 3]);
    }

    #[test]
    fn polygon_never_has_one_or_two_points() {
        let engine = VisibilityEngine::default();
        let observer = Vec2::ZERO;
        let view = view_centered_on(observer);
        let layouts = [
            OccluderSet::new(),
            OccluderSet::from_segments([Segment::new(Vec2::new(10.0, -5.0), Vec2::new(10.0, 5.0))]),
            OccluderSet::from_segments([
                Segment::new(Vec2::new(10.0, -5.0), Vec2::new(10.0, 5.0)),
                Segment::new(Vec2::new(-3.0, 8.0), Vec2::new(4.0, 9.0)),
            ]),
            OccluderSet::from_rects(&[Rect::new(-50.0, -50.0, 100.0, 100.0)]),
        ];
        for occluders in &layouts {
            let polygon = engine.compute(observer, occluders, &view, None);
            assert!(polygon.is_empty() || polygon.len() >= 3, "len {}", polygon.len());
        }
    }

    #[test]
    fn rays_are_sorted_and_hit_the_nearest_wall() {
        let outer = Rect::new(-100.0, -100.0, 200.0, 200.0);
        let pillar = Rect::new(20.0, -10.0, 20.0, 20.0);
        let occluders = OccluderSet::from_rects(&[outer, pillar]);
        let engine = VisibilityEngine::default();
        let rays = engine.cast_rays(Vec2::ZERO, &occluders, &view_centered_on(Vec2::ZERO), None);

        assert!(!rays.is_empty());
        for pair in rays.windows(2) {
            assert!(pair[0].ray.angle <= pair[1].ray.angle);
        }
        let straight_east = Ray::new(Vec2::ZERO, 0.0)
            .closest_intersection(occluders.segments())
            .expect("east hit");
        assert!((straight_east.point.x - 20.0).abs() < 1e-9);
    }

    #[test]
    fn prefilter_drops_corners_far_off_screen() {
        let near = Rect::new(-100.0, -100.0, 200.0, 200.0);
        let far = Rect::new(50_000.0, 50_000.0, 10.0, 10.0);
        let occluders = OccluderSet::from_rects(&[near, far]);
        let view = ViewContext::new(
            Camera2D {
                position: Vec2::ZERO,
            },
            Viewport {
                width: 400,
                height: 400,
            },
        );

        let filtered = VisibilityEngine::default().cast_rays(Vec2::ZERO, &occluders, &view, None);
        let unfiltered = VisibilityEngine::new(VisibilityConfig {
            prefilter_enabled: false,
            ..VisibilityConfig::default()
        })
        .cast_rays(Vec2::ZERO, &occluders, &view, None);

        assert!(filtered.len() <= 12);
        assert!(unfiltered.len() > filtered.len());
    }

    #[test]
    fn cone_across_zero_angle_wraps_through_observer() {
        let room = Rect::new(0.0, 0.0, 400.0, 400.0);
        let occluders = OccluderSet::from_rects(&[room]);
        let observer = room.center();
        let cone = LightCone::new(0.0, FRAC_PI_4).expect("cone");

        let polygon = VisibilityEngine::default().compute(
            observer,
            &occluders,
            &view_centered_on(observer),
            Some(cone),
        );
        let points = polygon.world_points();
        assert_eq!(points.len(), 4);
        assert_eq!(points[1], observer);
        assert_eq!(points[0], points[3]);
        let upper = 200.0 + 200.0 * FRAC_PI_8.tan();
        assert!((points[0].x - 400.0).abs() < 1e-9);
        assert!((points[0].y - upper).abs() < 1e-6);
    }

    #[test]
    fn cone_only_lights_points_in_front_of_the_observer() {
        let room = Rect::new(0.0, 0.0, 400.0, 400.0);
        let pillar = Rect::new(180.0, 300.0, 40.0, 40.0);
        let occluders = OccluderSet::from_rects(&[room, pillar]);
        let observer = room.center();
        let cone = LightCone::new(PI / 2.0, FRAC_PI_3).expect("cone");

        let polygon = VisibilityEngine::default().compute(
            observer,
            &occluders,
            &view_centered_on(observer),
            Some(cone),
        );
        assert!(polygon.is_drawable());
        assert!(polygon.world_points().contains(&observer));
        for point in polygon.world_points() {
            assert!(point.y >= observer.y - 1e-9, "point {point:?} is behind");
        }
        assert!(polygon
            .world_points()
            .iter()
            .any(|point| (point.y - 300.0).abs() < 1e-6));
    }

    #[test]
    fn wide_cone_lights_the_corners_it_faces() {
        let room = Rect::new(0.0, 0.0, 400.0, 400.0);
        let occluders = OccluderSet::from_rects(&[room]);
        let observer = room.center();
        let cone = LightCone::new(0.0, 0.9 * PI).expect("cone");

        let polygon = VisibilityEngine::default().compute(
            observer,
            &occluders,
            &view_centered_on(observer),
            Some(cone),
        );
        let points = polygon.world_points();
        assert!(polygon.is_drawable());
        assert!(points.contains(&observer));
        for point in points {
            assert!(point.x >= observer.x - 1e-9, "point {point:?} is behind");
        }
        for corner in [Vec2::new(400.0, 0.0), Vec2::new(400.0, 400.0)] {
            assert!(
                points.iter().any(|point| point.distance(corner) < 0.01),
                "corner {corner:?} is dark"
            );
        }
    }

    #[test]
    fn cone_window_wraps_around_zero() {
        let cone = LightCone::new(0.1, FRAC_PI_4).expect("cone");
        assert!(inside_cone(&cone, 0.0));
        assert!(inside_cone(&cone, TAU - 0.2));
        assert!(!inside_cone(&cone, TAU - 0.4));
        assert!(!inside_cone(&cone, PI));
    }
}
