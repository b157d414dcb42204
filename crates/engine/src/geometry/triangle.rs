use super::Vec2;

pub type TriangleVertices = [Vec2; 3];

/// Half-plane sign test. A point is inside only when all three edge tests
/// are strictly positive or all strictly negative, so points on an edge or
/// vertex are outside.
pub fn point_in_triangle(point: Vec2, triangle: &TriangleVertices) -> bool {
    let [a, b, c] = *triangle;
    let side_ab = (point.x - b.x) * (a.y - b.y) - (a.x - b.x) * (point.y - b.y);
    let side_bc = (point.x - c.x) * (b.y - c.y) - (b.x - c.x) * (point.y - c.y);
    let side_ca = (point.x - a.x) * (c.y - a.y) - (c.x - a.x) * (point.y - a.y);

    let all_positive = side_ab > 0.0 && side_bc > 0.0 && side_ca > 0.0;
    let all_negative = side_ab < 0.0 && side_bc < 0.0 && side_ca < 0.0;
    all_positive || all_negative
}

pub fn triangle_centroid(triangle: &TriangleVertices) -> Vec2 {
    let [a, b, c] = *triangle;
    Vec2 {
        x: (a.x + b.x + c.x) / 3.0,
        y: (a.y + b.y + c.y) / 3.0,
    }
}
