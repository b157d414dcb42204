use std::collections::HashSet;

use crate::geometry::{PointKey, Rect, Segment, Vec2};

/// Static sight blockers: their segments plus every distinct segment endpoint
/// in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct OccluderSet {
    segments: Vec<Segment>,
    vertices: Vec<Vec2>,
    seen: HashSet<PointKey>,
}

impl OccluderSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rects<'a, I>(blocks: I) -> Self
    where
        I: IntoIterator<Item = &'a Rect>,
    {
        let mut set = Self::new();
        for block in blocks {
            set.push_rect(block);
        }
        set
    }

    pub fn from_segments<I>(segments: I) -> Self
    where
        I: IntoIterator<Item = Segment>,
    {
        let mut set = Self::new();
        for segment in segments {
            set.push_segment(segment);
        }
        set
    }

    pub fn push_rect(&mut self, block: &Rect) {
        for segment in block.segments() {
            self.push_segment(segment);
        }
    }

    pub fn push_segment(&mut self, segment: Segment) {
        for point in [segment.p1, segment.p2] {
            if self.seen.insert(point.key()) {
                self.vertices.push(point);
            }
        }
        self.segments.push(segment);
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    pub fn vertices_within<'a>(&'a self, bounds: &'a Rect) -> impl Iterator<Item = Vec2> + 'a {
        self.vertices
            .iter()
            .copied()
            .filter(move |vertex| bounds.contains(*vertex))
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
