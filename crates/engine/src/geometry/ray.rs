use super::{normalize_angle, Segment, Vec2};

/// Half-line from `origin` in direction `angle` (radians, `[0, 2π)`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec2,
    pub angle: f64,
}

/// Hit point of a ray against a segment. `distance` is the ray parameter T1;
/// with a unit direction it equals the euclidean distance from the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub point: Vec2,
    pub distance: f64,
}

impl Ray {
    pub fn new(origin: Vec2, angle: f64) -> Self {
        Self {
            origin,
            angle: normalize_angle(angle),
        }
    }

    pub fn direction(&self) -> Vec2 {
        Vec2::from_angle(self.angle)
    }

    pub fn intersect(&self, segment: &Segment) -> Option<Intersection> {
        ray_intersect(self, segment)
    }

    /// Nearest hit among `segments`; the first one wins ties.
    pub fn closest_intersection<'a, I>(&self, segments: I) -> Option<Intersection>
    where
        I: IntoIterator<Item = &'a Segment>,
    {
        let mut closest: Option<Intersection> = None;
        for segment in segments {
            let Some(hit) = ray_intersect(self, segment) else {
                continue;
            };
            match closest {
                Some(best) if hit.distance >= best.distance => {}
                _ => closest = Some(hit),
            }
        }
        closest
    }
}

/// Parametric ray/segment intersection.
///
/// Parallel and collinear configurations report no hit. A hit requires the
/// ray parameter `T1 >= 0` and the segment parameter `T2` within `[0, 1]`.
/// Coordinates are kept in floating point.
pub fn ray_intersect(ray: &Ray, segment: &Segment) -> Option<Intersection> {
    let direction = ray.direction();
    let segment_delta = segment.delta();

    let ray_length = direction.length();
    let segment_length = segment_delta.length();
    if ray_length == 0.0 || segment_length == 0.0 {
        return None;
    }
    if direction.x / ray_length == segment_delta.x / segment_length
        && direction.y / ray_length == segment_delta.y / segment_length
    {
        return None;
    }

    let determinant = segment_delta.x * direction.y - segment_delta.y * direction.x;
    if determinant == 0.0 {
        return None;
    }

    let origin_to_segment = segment.p1 - ray.origin;
    let t2 = (direction.x * origin_to_segment.y - direction.y * origin_to_segment.x) / determinant;
    let t1 =
        (segment_delta.x * origin_to_segment.y - segment_delta.y * origin_to_segment.x) / determinant;

    if !t1.is_finite() || !t2.is_finite() {
        return None;
    }
    if t1 < 0.0 {
        return None;
    }
    if !(0.0..=1.0).contains(&t2) {
        return None;
    }

    Some(Intersection {
        point: ray.origin + direction * t1,
        distance: t1,
    })
}
