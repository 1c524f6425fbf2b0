//! Cutting plane representation and vertex classification.

use nalgebra::{Isometry3, Point3, Vector3};

use crate::{ClipError, Polygon, Result};

/// Default epsilon for vertex classification.
/// Zero means an exact sign test: only points with a signed distance of
/// exactly zero are considered on the plane.
pub const DEFAULT_EPSILON: f32 = 0.0;

/// Which side of a plane a point lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaneSide {
    /// Point is behind the plane (opposite side from the normal)
    Negative,
    /// Point lies on the plane (within epsilon tolerance)
    OnPlane,
    /// Point is in front of the plane (same side as the normal)
    Positive,
}

impl PlaneSide {
    /// Classifies a signed distance against a tolerance.
    ///
    /// - `OnPlane` when `|distance| <= epsilon`
    /// - `Positive` when `distance > epsilon`
    /// - `Negative` when `distance < -epsilon`
    ///
    /// A NaN distance compares false both ways and lands on `OnPlane`;
    /// the mesh clipper rejects such vertices before classifying.
    #[inline]
    pub fn classify(distance: f32, epsilon: f32) -> Self {
        if distance > epsilon {
            PlaneSide::Positive
        } else if distance < -epsilon {
            PlaneSide::Negative
        } else {
            PlaneSide::OnPlane
        }
    }

    /// Returns true if both sides are strict and opposite.
    #[inline]
    pub fn opposes(self, other: PlaneSide) -> bool {
        matches!(
            (self, other),
            (PlaneSide::Positive, PlaneSide::Negative) | (PlaneSide::Negative, PlaneSide::Positive)
        )
    }
}

/// A plane in 3D space, represented as `normal · x = offset`.
///
/// The plane keeps the point it was constructed from; `offset` is always
/// derived from `normal` and `point`. Planes are immutable, build a new one
/// to move or rotate the cut.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane3D {
    normal: Vector3<f32>,
    point: Point3<f32>,
    offset: f32,
}

impl Plane3D {
    /// Creates a plane from a (possibly non-unit) normal and a point on it.
    ///
    /// # Errors
    /// Returns [`ClipError::InvalidGeometry`] if the normal has zero length
    /// or is not finite.
    pub fn new(normal: Vector3<f32>, point: Point3<f32>) -> Result<Self> {
        let norm = normal.norm();
        if !norm.is_finite() || norm <= f32::EPSILON {
            return Err(ClipError::InvalidGeometry(format!(
                "plane normal [{}, {}, {}] cannot be normalized",
                normal.x, normal.y, normal.z
            )));
        }
        let unit_normal = normal / norm;
        Ok(Self {
            normal: unit_normal,
            point,
            offset: unit_normal.dot(&point.coords),
        })
    }

    /// Derives a cutting plane from reference geometry placed in the world.
    ///
    /// The normal is the polygon's unit normal rotated into world space and
    /// the plane passes through the translation of `transform`, i.e. the
    /// origin of the reference object.
    pub fn from_reference(polygon: &Polygon, transform: &Isometry3<f32>) -> Result<Self> {
        let local_normal = polygon.unit_normal().ok_or_else(|| {
            ClipError::InvalidGeometry("reference polygon has no normal".into())
        })?;
        let normal = transform.rotation * local_normal;
        let point = Point3::from(transform.translation.vector);
        Self::new(normal, point)
    }

    /// Returns the unit normal vector of the plane.
    #[inline]
    pub fn normal(&self) -> Vector3<f32> {
        self.normal
    }

    /// Returns the point the plane was constructed through.
    #[inline]
    pub fn point(&self) -> Point3<f32> {
        self.point
    }

    /// Returns the signed distance from the origin to the plane along the normal.
    #[inline]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Computes the signed distance from a point to the plane.
    /// - Positive: point is in front (same side as normal)
    /// - Negative: point is behind (opposite side from normal)
    /// - Zero: point is on the plane
    #[inline]
    pub fn signed_distance(&self, point: Point3<f32>) -> f32 {
        self.normal.dot(&point.coords) - self.offset
    }

    /// Classifies which side of the plane a point lies on.
    #[inline]
    pub fn classify_point(&self, point: Point3<f32>, epsilon: f32) -> PlaneSide {
        PlaneSide::classify(self.signed_distance(point), epsilon)
    }

    /// Projects a point onto the plane (finds the closest point on the plane).
    #[inline]
    pub fn project_point(&self, point: Point3<f32>) -> Point3<f32> {
        point - self.normal * self.signed_distance(point)
    }
}

/// The plane `x = 0.33`, used when the host supplies no reference geometry.
impl Default for Plane3D {
    fn default() -> Self {
        let normal = Vector3::x();
        let point = Point3::new(0.33, 1.0, 1.0);
        Self {
            normal,
            point,
            offset: normal.dot(&point.coords),
        }
    }
}
