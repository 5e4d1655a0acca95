//! Fold-line geometry: the kept and flipped regions of a curled page and the
//! mirror transform that lays the back face down along the fold.

use std::f64::consts::PI;

use crate::math::rect::PageRect;
use crate::math::{polygon::Polygon, Matrix3, Point2, Vector2, TOLERANCE};

/// The fold line, anchored at its intersections with the page's top and
/// bottom boundaries.
///
/// At rest the edge coincides with a physical page edge ([`Edge::trailing`]
/// for the forward direction, [`Edge::leading`] for the backward one). During
/// a drag or settle animation it is re-derived every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub top: Point2,
    pub bottom: Point2,
}

impl Edge {
    #[must_use]
    pub fn new(top: Point2, bottom: Point2) -> Self {
        Self { top, bottom }
    }

    /// Rest edge on the page's left boundary (fully turned position).
    #[must_use]
    pub fn leading(page: &PageRect) -> Self {
        Self::new(page.top_left(), page.bottom_left())
    }

    /// Rest edge on the page's right boundary (untouched position).
    #[must_use]
    pub fn trailing(page: &PageRect) -> Self {
        Self::new(page.top_right(), page.bottom_right())
    }

    /// Horizontal center of the fold line, the basis of the progress scalar.
    #[must_use]
    pub fn center_x(&self) -> f64 {
        (self.top.x + self.bottom.x) * 0.5
    }

    /// Linear interpolation between two edges, `t` in `[0, 1]`.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        Self::new(
            self.top + (other.top - self.top) * t,
            self.bottom + (other.bottom - self.bottom) * t,
        )
    }

    /// Componentwise comparison under the crate tolerance.
    #[must_use]
    pub fn approx_eq(&self, other: &Self) -> bool {
        (self.top - other.top).norm() < TOLERANCE && (self.bottom - other.bottom).norm() < TOLERANCE
    }
}

/// The affine transform that mirrors the flap about the fold: a horizontal
/// mirror composed with a rotation, both about [`FlipTransform::pivot`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlipTransform {
    pub pivot: Point2,
    pub angle: f64,
}

impl FlipTransform {
    /// Homogeneous matrix `T(pivot) · S(-1, 1) · R(angle) · T(-pivot)`.
    ///
    /// The mirror is applied after the rotation, matching a canvas that
    /// pushes scale then rotation about the same pivot.
    #[must_use]
    pub fn matrix(&self) -> Matrix3 {
        let (sin, cos) = self.angle.sin_cos();
        // Linear part of S(-1, 1) · R(angle).
        let (m00, m01) = (-cos, sin);
        let (m10, m11) = (sin, cos);
        let tx = self.pivot.x - (m00 * self.pivot.x + m01 * self.pivot.y);
        let ty = self.pivot.y - (m10 * self.pivot.x + m11 * self.pivot.y);
        Matrix3::new(m00, m01, tx, m10, m11, ty, 0.0, 0.0, 1.0)
    }

    /// Applies the transform to a point.
    #[must_use]
    pub fn apply(&self, p: Point2) -> Point2 {
        let m = self.matrix();
        Point2::new(
            m[(0, 0)] * p.x + m[(0, 1)] * p.y + m[(0, 2)],
            m[(1, 0)] * p.x + m[(1, 1)] * p.y + m[(1, 2)],
        )
    }
}

/// The regions and transform produced by folding a page along an [`Edge`].
#[derive(Debug, Clone)]
pub struct FoldRegions {
    /// Quadrilateral of page content that stays flat, clipped by the fold.
    pub kept: Polygon,
    /// The flap being turned over, always 4 vertices; `None` when the fold
    /// line leaves no flap on the page.
    pub flipped: Option<Polygon>,
    /// Mirror/rotation laying the flap's back face down along the fold.
    pub transform: FlipTransform,
}

impl FoldRegions {
    /// Computes the fold regions for an edge anchored on the page's top and
    /// bottom boundaries.
    ///
    /// The anchors' x coordinates are clamped to be non-negative first: a
    /// fold cannot recede past the page's leading edge, otherwise the page
    /// would look torn out of the book.
    #[must_use]
    pub fn compute(edge: &Edge, page: &PageRect) -> Self {
        let top = Point2::new(edge.top.x.max(0.0), edge.top.y);
        let bottom = Point2::new(edge.bottom.x.max(0.0), edge.bottom.y);

        let kept = Polygon::quad(
            page.top_left(),
            top,
            bottom,
            page.bottom_left(),
        );

        let flipped = flipped_quad(top, bottom, page);

        let line = top - bottom;
        let angle = PI - 2.0 * line.y.atan2(line.x);
        let transform = FlipTransform {
            pivot: bottom,
            angle,
        };

        Self {
            kept,
            flipped,
            transform,
        }
    }
}

/// Builds the always-4-vertex flap polygon.
///
/// Per boundary, either the clamped intersection plus the page corner (fold
/// crosses the boundary inside the page), or the fold line's intersection
/// with the right page edge duplicated as two coincident vertices. The
/// duplication keeps a stable 4-vertex topology while the flap degenerates
/// to a triangle, which would otherwise pop visually when the shadow outline
/// interpolates across the 3/4-vertex switch.
fn flipped_quad(top: Point2, bottom: Point2, page: &PageRect) -> Option<Polygon> {
    let mut vertices: Vec<Point2> = Vec::with_capacity(4);

    let right_side = |out: &mut Vec<Point2>| {
        if let Some(p) = crate::math::intersect::line_line_intersect(
            &top,
            &bottom,
            &page.top_right(),
            &page.bottom_right(),
        ) {
            out.push(p);
            out.push(p);
        }
    };

    if top.x < page.width {
        vertices.push(top);
        vertices.push(Point2::new(page.width, top.y));
    } else {
        right_side(&mut vertices);
    }

    if bottom.x < page.width {
        vertices.push(Point2::new(page.width, bottom.y));
        vertices.push(bottom);
    } else {
        right_side(&mut vertices);
    }

    (vertices.len() == 4).then(|| Polygon::quad(vertices[0], vertices[1], vertices[2], vertices[3]))
}

/// Counter-rotation for vectors configured in page space but consumed inside
/// the mirrored/rotated flap context (the shadow offset).
#[must_use]
pub fn into_flap_space(v: Vector2, mirror_angle: f64) -> Vector2 {
    crate::math::rotate(Vector2::new(-v.x, v.y), 2.0 * PI - mirror_angle)
}
