use survive_engine::Vec2;

/// Waypoints handed out by the planner plus the index of the next one to reach.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct PathFollower {
    waypoints: Vec<Vec2>,
    next_waypoint_index: usize,
}

impl PathFollower {
    pub(crate) fn new(waypoints: Vec<Vec2>) -> Self {
        Self {
            waypoints,
            next_waypoint_index: 0,
        }
    }

    pub(crate) fn current_waypoint(&self) -> Option<Vec2> {
        self.waypoints.get(self.next_waypoint_index).copied()
    }

    pub(crate) fn advance_waypoint(&mut self) {
        if self.next_waypoint_index < self.waypoints.len() {
            self.next_waypoint_index = self.next_waypoint_index.saturating_add(1);
        }
    }

    pub(crate) fn is_complete(&self) -> bool {
        self.next_waypoint_index >= self.waypoints.len()
    }

    /// Moves `position` along the path by at most `max_step`, skipping any
    /// waypoints already within `arrival_threshold`.
    pub(crate) fn step(&mut self, position: Vec2, max_step: f64, arrival_threshold: f64) -> Vec2 {
        while let Some(waypoint) = self.current_waypoint() {
            if position.distance(waypoint) > arrival_threshold {
                break;
            }
            self.advance_waypoint();
        }
        if self.is_complete() {
            return position;
        }
        let Some(waypoint) = self.current_waypoint() else {
            return position;
        };
        let (next, arrived) = step_toward(position, waypoint, max_step, arrival_threshold);
        if arrived {
            self.advance_waypoint();
        }
        next
    }
}

/// Moves from `current` towards `target` by at most `max_step`. Returns the
/// new position and whether `target` was reached.
pub(crate) fn step_toward(
    current: Vec2,
    target: Vec2,
    max_step: f64,
    arrival_threshold: f64,
) -> (Vec2, bool) {
    let delta = target - current;
    let distance_sq = delta.length_squared();
    if distance_sq <= arrival_threshold * arrival_threshold {
        return (target, true);
    }

    let distance = distance_sq.sqrt();
    if max_step >= distance {
        return (target, true);
    }

    (current + delta * (max_step / distance), false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_toward_snaps_inside_threshold_or_reach() {
        let origin = Vec2::ZERO;
        assert_eq!(
            step_toward(origin, Vec2::new(0.5, 0.0), 0.1, 1.0),
            (Vec2::new(0.5, 0.0), true)
        );
        assert_eq!(
            step_toward(origin, Vec2::new(3.0, 4.0), 5.0, 0.1),
            (Vec2::new(3.0, 4.0), true)
        );
        let (next, arrived) = step_toward(origin, Vec2::new(3.0, 4.0), 2.5, 0.1);
        assert!(!arrived);
        assert!((next.x - 1.5).abs() < 1e-12);
        assert!((next.y - 2.0).abs() < 1e-12);
    }

    #[test]
    fn follower_walks_waypoints_in_order() {
        let mut follower = PathFollower::new(vec![
            Vec2::ZERO,
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
        ]);
        let mut position = Vec2::ZERO;

        position = follower.step(position, 5.0, 0.5);
        assert_eq!(position, Vec2::new(5.0, 0.0));
        assert_eq!(follower.current_waypoint(), Some(Vec2::new(10.0, 0.0)));

        position = follower.step(position, 5.0, 0.5);
        assert_eq!(position, Vec2::new(10.0, 0.0));
        assert_eq!(follower.current_waypoint(), Some(Vec2::new(10.0, 10.0)));

        position = follower.step(position, 20.0, 0.5);
        assert_eq!(position, Vec2::new(10.0, 10.0));
        assert!(follower.is_complete());
        assert_eq!(follower.step(position, 5.0, 0.5), position);
    }

    #[test]
    fn advancing_past_the_end_is_a_no_op() {
        let mut follower = PathFollower::new(vec![Vec2::ZERO]);
        follower.advance_waypoint();
        follower.advance_waypoint();
        assert!(follower.is_complete());
        assert_eq!(follower.current_waypoint(), None);
        assert!(PathFollower::default().is_complete());
    }
}
