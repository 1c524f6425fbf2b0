//! Generic polygon representation for source meshes.

use nalgebra::{Point3, Vector3};

use crate::Triangle;

/// A planar polygon in 3D space, defined by an ordered list of vertices.
///
/// Source meshes are made of polygons; they are turned into triangles by a
/// [`Triangulator`](crate::Triangulator) before clipping. Vertices should be
/// in counter-clockwise winding order when viewed from the front.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point3<f32>>,
}

impl Polygon {
    /// Creates a new polygon from a list of vertices.
    ///
    /// No validation happens here; polygons with fewer than three vertices
    /// are rejected when they are triangulated.
    pub fn new(vertices: Vec<Point3<f32>>) -> Self {
        Self { vertices }
    }

    /// Returns the vertices of the polygon.
    #[inline]
    pub fn vertices(&self) -> &[Point3<f32>] {
        &self.vertices
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns true if the polygon has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Computes the (unnormalized) normal vector of the polygon.
    ///
    /// Uses Newell's method so that a collinear leading vertex triple does
    /// not produce a zero normal. Its length is twice the polygon area.
    pub fn normal(&self) -> Vector3<f32> {
        let n = self.vertices.len();
        let mut normal = Vector3::zeros();
        for i in 0..n {
            let current = self.vertices[i];
            let next = self.vertices[(i + 1) % n];
            normal.x += (current.y - next.y) * (current.z + next.z);
            normal.y += (current.z - next.z) * (current.x + next.x);
            normal.z += (current.x - next.x) * (current.y + next.y);
        }
        normal
    }

    /// Computes the unit normal vector of the polygon.
    ///
    /// Returns `None` if the polygon is degenerate (zero area).
    pub fn unit_normal(&self) -> Option<Vector3<f32>> {
        let n = self.normal();
        let len = n.norm();
        if len > f32::EPSILON {
            Some(n / len)
        } else {
            None
        }
    }
}

impl From<Triangle> for Polygon {
    fn from(triangle: Triangle) -> Self {
        Self {
            vertices: triangle.vertices().to_vec(),
        }
    }
}

impl From<&Triangle> for Polygon {
    fn from(triangle: &Triangle) -> Self {
        Self {
            vertices: triangle.vertices().to_vec(),
        }
    }
}
