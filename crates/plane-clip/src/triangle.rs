//! Triangle representation and per-vertex classification.

use nalgebra::{Affine3, Point3, Vector3};

use crate::{Plane3D, PlaneSide};

/// A triangle in 3D space, defined by three vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    vertices: [Point3<f32>; 3],
}

impl Triangle {
    /// Creates a new triangle from three points.
    ///
    /// The winding order determines the normal direction via the right-hand rule:
    /// normal = (b - a) × (c - a)
    pub fn new(a: Point3<f32>, b: Point3<f32>, c: Point3<f32>) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    /// Returns the three vertices of the triangle.
    #[inline]
    pub fn vertices(&self) -> &[Point3<f32>; 3] {
        &self.vertices
    }

    /// Computes the (unnormalized) normal vector of the triangle.
    ///
    /// The direction follows the right-hand rule based on vertex winding.
    pub fn normal(&self) -> Vector3<f32> {
        let [a, b, c] = &self.vertices;
        let ab = b - a;
        let ac = c - a;
        ab.cross(&ac)
    }

    /// Computes the unit normal vector of the triangle.
    ///
    /// Returns `None` if the triangle is degenerate (zero area).
    pub fn unit_normal(&self) -> Option<Vector3<f32>> {
        let n = self.normal();
        let len = n.norm();
        if len > f32::EPSILON {
            Some(n / len)
        } else {
            None
        }
    }

    /// Computes the area of the triangle.
    pub fn area(&self) -> f32 {
        self.normal().norm() * 0.5
    }

    /// Computes the centroid (center of mass) of the triangle.
    pub fn centroid(&self) -> Point3<f32> {
        let [a, b, c] = &self.vertices;
        Point3::from((a.coords + b.coords + c.coords) / 3.0)
    }

    /// Returns a copy of this triangle with every vertex mapped by `transform`.
    pub fn transformed(&self, transform: &Affine3<f32>) -> Self {
        Self {
            vertices: self.vertices.map(|v| transform.transform_point(&v)),
        }
    }

    /// Measures and classifies every vertex against a plane.
    pub fn classify(&self, plane: &Plane3D, epsilon: f32) -> ClassifiedTriangle {
        let distances = self.vertices.map(|v| plane.signed_distance(v));
        ClassifiedTriangle {
            vertices: self.vertices,
            distances,
            sides: distances.map(|d| PlaneSide::classify(d, epsilon)),
        }
    }
}

/// A triangle together with the signed distance and side of each vertex.
///
/// The three arrays are parallel: entry `i` of `distances` and `sides`
/// belongs to vertex `i`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifiedTriangle {
    /// Vertex positions, in winding order.
    pub vertices: [Point3<f32>; 3],
    /// Signed distance of each vertex to the plane.
    pub distances: [f32; 3],
    /// Side of the plane each vertex lies on.
    pub sides: [PlaneSide; 3],
}

/// How many vertices of a triangle fall on each side of a plane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SideCounts {
    /// Vertices strictly behind the plane.
    pub negative: usize,
    /// Vertices on the plane.
    pub on_plane: usize,
    /// Vertices strictly in front of the plane.
    pub positive: usize,
}

impl SideCounts {
    /// Counts the sides of a set of classified vertices.
    pub fn of(sides: &[PlaneSide]) -> Self {
        let mut counts = Self::default();
        for side in sides {
            match side {
                PlaneSide::Negative => counts.negative += 1,
                PlaneSide::OnPlane => counts.on_plane += 1,
                PlaneSide::Positive => counts.positive += 1,
            }
        }
        counts
    }

    /// Total number of vertices counted.
    #[inline]
    pub fn total(&self) -> usize {
        self.negative + self.on_plane + self.positive
    }

    /// Returns true if vertices lie strictly on both sides of the plane.
    #[inline]
    pub fn straddles(&self) -> bool {
        self.negative > 0 && self.positive > 0
    }
}

impl ClassifiedTriangle {
    /// Counts the vertices on each side of the plane.
    pub fn counts(&self) -> SideCounts {
        SideCounts::of(&self.sides)
    }

    /// Returns the plain triangle, dropping the classification.
    pub fn triangle(&self) -> Triangle {
        let [a, b, c] = self.vertices;
        Triangle::new(a, b, c)
    }
}
