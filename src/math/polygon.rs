use super::{normalize_or_zero, Point2, Vector2};
use crate::error::{GeometryError, Result};

/// An ordered, cyclic sequence of vertices describing a simple closed shape.
///
/// Insertion order is significant: it fixes the traversal direction of the
/// boundary. Degenerate "zero-area corner" cases are represented by
/// duplicating a vertex rather than dropping it, so that a region keeps a
/// stable vertex count while it degenerates from a quad to a triangle.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point2>,
}

impl Polygon {
    /// Creates a polygon from its vertices.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::TooFewVertices`] for fewer than 3 vertices.
    pub fn new(vertices: Vec<Point2>) -> Result<Self> {
        if vertices.len() < 3 {
            return Err(GeometryError::TooFewVertices(vertices.len()).into());
        }
        Ok(Self { vertices })
    }

    /// Creates a quadrilateral. Coincident vertices are allowed; the fold
    /// computer relies on duplicated vertices to keep a stable topology.
    #[must_use]
    pub fn quad(a: Point2, b: Point2, c: Point2, d: Point2) -> Self {
        Self {
            vertices: vec![a, b, c, d],
        }
    }

    /// The vertices in traversal order.
    #[must_use]
    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }

    /// Number of vertices.
    #[must_use]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Cyclic vertex index: maps any integer (including negative) into
    /// `[0, len)`.
    #[must_use]
    pub fn index(&self, i: isize) -> usize {
        let n = self.vertices.len() as isize;
        (((i % n) + n) % n) as usize
    }

    /// Returns the polygon translated by `offset`.
    #[must_use]
    pub fn translate(&self, offset: Vector2) -> Self {
        Self {
            vertices: self.vertices.iter().map(|v| v + offset).collect(),
        }
    }

    /// Grows the polygon outward by `distance` along per-vertex normals.
    ///
    /// Each edge contributes a unit normal (zero for zero-length edges, never
    /// a division by zero); each vertex normal is the renormalized sum of its
    /// two adjacent edge normals. Used to build a soft shadow halo around the
    /// flip region without a blur-on-arbitrary-polygon primitive.
    #[must_use]
    pub fn offset(&self, distance: f64) -> Self {
        let n = self.vertices.len();

        let edge_normals: Vec<Vector2> = (0..n)
            .map(|i| {
                let edge = self.vertices[self.index(i as isize + 1)] - self.vertices[i];
                normalize_or_zero(Vector2::new(edge.y, -edge.x))
            })
            .collect();

        let vertex_normals: Vec<Vector2> = (0..n)
            .map(|i| {
                normalize_or_zero(edge_normals[self.index(i as isize - 1)] + edge_normals[i])
            })
            .collect();

        Self {
            vertices: self
                .vertices
                .iter()
                .zip(&vertex_normals)
                .map(|(vertex, normal)| vertex + normal * distance)
                .collect(),
        }
    }

    /// Signed area via the shoelace formula.
    ///
    /// Positive for counter-clockwise traversal, negative for clockwise.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        let n = self.vertices.len();
        let mut sum = 0.0;
        for i in 0..n {
            let j = (i + 1) % n;
            sum += self.vertices[i].x * self.vertices[j].y
                - self.vertices[j].x * self.vertices[i].y;
        }
        sum * 0.5
    }
}
