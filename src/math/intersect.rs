use super::{Point2, TOLERANCE};

/// Intersection of two infinite lines, each given by two points.
///
/// Uses the classic 2x2 determinant form. Returns `None` when the lines are
/// parallel (determinant below tolerance) — callers treat that as "no fold
/// effect" rather than an error.
#[must_use]
pub fn line_line_intersect(a1: &Point2, a2: &Point2, b1: &Point2, b2: &Point2) -> Option<Point2> {
    let denominator = (a1.x - a2.x) * (b1.y - b2.y) - (a1.y - a2.y) * (b1.x - b2.x);
    if denominator.abs() < TOLERANCE {
        return None;
    }

    let det_a = a1.x * a2.y - a1.y * a2.x;
    let det_b = b1.x * b2.y - b1.y * b2.x;
    let x = (det_a * (b1.x - b2.x) - (a1.x - a2.x) * det_b) / denominator;
    let y = (det_a * (b1.y - b2.y) - (a1.y - a2.y) * det_b) / denominator;
    Some(Point2::new(x, y))
}
