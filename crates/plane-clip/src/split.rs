//! Triangle splitting against a plane.
//!
//! A triangle whose vertices lie strictly on both sides of the plane is
//! re-triangulated so that every emitted triangle lies on one side of the
//! plane (or on it). The split preserves the winding of the source triangle.

use nalgebra::Point3;

use crate::{ClassifiedTriangle, ClipError, PlaneSide, Result, SideCounts, Triangle};

/// Which re-triangulation applies to a triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitCase {
    /// The triangle does not straddle the plane and is kept as is.
    NoSplit,
    /// One vertex is alone on one side, the other two are on the other side.
    /// Holds the index of the lone vertex.
    TwoVertexSplit {
        /// Index of the vertex whose side differs from both others.
        lone: usize,
    },
    /// One vertex is on the plane, the other two are on opposite sides.
    /// Holds the index of the on-plane vertex.
    OnPlaneSplit {
        /// Index of the vertex lying on the plane.
        apex: usize,
    },
}

impl SplitCase {
    /// Selects the split case from the three vertex sides.
    ///
    /// # Errors
    /// Returns [`ClipError::InvariantViolation`] when the side pattern
    /// selects a split but does not single out the vertex it needs.
    pub fn from_sides(sides: &[PlaneSide; 3]) -> Result<Self> {
        let counts = SideCounts::of(sides);
        if counts.total() != 3 {
            return Err(ClipError::InvariantViolation(format!(
                "side counts {counts:?} do not sum to 3"
            )));
        }

        let two_one = (counts.negative == 1 && counts.positive == 2)
            || (counts.negative == 2 && counts.positive == 1);

        if two_one {
            let lone = (0..3)
                .find(|&i| sides[i] != sides[(i + 1) % 3] && sides[i] != sides[(i + 2) % 3])
                .ok_or_else(|| {
                    ClipError::InvariantViolation(format!("no lone vertex in sides {sides:?}"))
                })?;
            Ok(SplitCase::TwoVertexSplit { lone })
        } else if counts.on_plane == 1 && counts.positive == 1 {
            let apex = (0..3)
                .find(|&i| sides[i] == PlaneSide::OnPlane)
                .ok_or_else(|| {
                    ClipError::InvariantViolation(format!("no on-plane vertex in sides {sides:?}"))
                })?;
            Ok(SplitCase::OnPlaneSplit { apex })
        } else {
            Ok(SplitCase::NoSplit)
        }
    }
}

/// The triangles produced by splitting one source triangle, in emission order.
#[derive(Debug, Clone, PartialEq)]
pub enum Split {
    /// The source triangle, unchanged.
    Whole(Triangle),
    /// Two triangles sharing the on-plane vertex.
    Two([Triangle; 2]),
    /// The lone-vertex cap followed by the two halves of the opposite quad.
    Three([Triangle; 3]),
}

impl Split {
    /// Returns the emitted triangles.
    pub fn triangles(&self) -> &[Triangle] {
        match self {
            Split::Whole(t) => std::slice::from_ref(t),
            Split::Two(ts) => ts,
            Split::Three(ts) => ts,
        }
    }

    /// Number of emitted triangles.
    #[inline]
    pub fn len(&self) -> usize {
        self.triangles().len()
    }

    /// Always false; a split emits at least one triangle.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Finds the point where the edge `a -> b` crosses the plane, given the
/// signed distances of its endpoints.
///
/// The guard is relative: any pair of distances with opposite signs yields a
/// parameter in `[0, 1]`, however small they are.
///
/// # Errors
/// Returns [`ClipError::DegenerateSplit`] when `db - da` is zero or NaN, or
/// when the interpolation parameter is not a finite value in `[0, 1]`.
pub fn edge_intersection(a: Point3<f32>, b: Point3<f32>, da: f32, db: f32) -> Result<Point3<f32>> {
    let denom = db - da;
    if denom == 0.0 || denom.is_nan() {
        return Err(ClipError::DegenerateSplit { from: da, to: db });
    }
    let t = -da / denom;
    if !(0.0..=1.0).contains(&t) {
        return Err(ClipError::DegenerateSplit { from: da, to: db });
    }
    Ok(a + (b - a) * t)
}

/// Splits a classified triangle so that no emitted triangle straddles the plane.
///
/// # Errors
/// Returns [`ClipError::InvariantViolation`] if the sides do not match the
/// selected case, and [`ClipError::DegenerateSplit`] if an edge crossing
/// cannot be interpolated.
pub fn split_triangle(triangle: &ClassifiedTriangle) -> Result<Split> {
    match SplitCase::from_sides(&triangle.sides)? {
        SplitCase::NoSplit => Ok(Split::Whole(triangle.triangle())),
        SplitCase::TwoVertexSplit { lone } => split_two_vertex(triangle, lone),
        SplitCase::OnPlaneSplit { apex } => split_on_plane(triangle, apex),
    }
}

/// Rotates the triangle so that vertex `first` comes first, keeping winding.
fn rotated(
    triangle: &ClassifiedTriangle,
    first: usize,
) -> ([Point3<f32>; 3], [f32; 3], [PlaneSide; 3]) {
    let order = [first, (first + 1) % 3, (first + 2) % 3];
    (
        order.map(|i| triangle.vertices[i]),
        order.map(|i| triangle.distances[i]),
        order.map(|i| triangle.sides[i]),
    )
}

fn split_two_vertex(triangle: &ClassifiedTriangle, lone: usize) -> Result<Split> {
    let ([a, b, c], [da, db, dc], [sa, sb, sc]) = rotated(triangle, lone);

    if sa == PlaneSide::OnPlane || sb != sc || !sa.opposes(sb) {
        return Err(ClipError::InvariantViolation(format!(
            "two-vertex split needs a lone strict vertex, got sides {:?}",
            [sa, sb, sc]
        )));
    }

    let x1 = edge_intersection(a, b, da, db)?;
    let x2 = edge_intersection(a, c, da, dc)?;

    Ok(Split::Three([
        Triangle::new(a, x1, x2),
        Triangle::new(x1, b, c),
        Triangle::new(x1, c, x2),
    ]))
}

fn split_on_plane(triangle: &ClassifiedTriangle, apex: usize) -> Result<Split> {
    let ([a, b, c], [_, db, dc], [sa, sb, sc]) = rotated(triangle, apex);

    if sa != PlaneSide::OnPlane || !sb.opposes(sc) {
        return Err(ClipError::InvariantViolation(format!(
            "on-plane split needs opposite strict neighbours, got sides {:?}",
            [sa, sb, sc]
        )));
    }

    let x = edge_intersection(b, c, db, dc)?;

    Ok(Split::Two([Triangle::new(a, b, x), Triangle::new(a, x, c)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Plane3D;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    use crate::PlaneSide::{Negative as N, OnPlane as O, Positive as P};

    fn make_triangle(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> Triangle {
        Triangle::new(Point3::from(a), Point3::from(b), Point3::from(c))
    }

    fn x_plane() -> Plane3D {
        Plane3D::new(Vector3::x(), Point3::origin()).unwrap()
    }

    fn total_area(split: &Split) -> f32 {
        split.triangles().iter().map(Triangle::area).sum()
    }

    fn assert_no_straddle(split: &Split, plane: &Plane3D) {
        for tri in split.triangles() {
            let counts = tri.classify(plane, 1e-4).counts();
            assert!(!counts.straddles(), "{tri:?} straddles the plane");
        }
    }

    #[test]
    fn case_table() {
        assert_eq!(SplitCase::from_sides(&[P, P, P]).unwrap(), SplitCase::NoSplit);
        assert_eq!(SplitCase::from_sides(&[N, N, N]).unwrap(), SplitCase::NoSplit);
        assert_eq!(SplitCase::from_sides(&[O, O, O]).unwrap(), SplitCase::NoSplit);
        assert_eq!(SplitCase::from_sides(&[O, O, P]).unwrap(), SplitCase::NoSplit);
        assert_eq!(SplitCase::from_sides(&[O, P, P]).unwrap(), SplitCase::NoSplit);
        assert_eq!(SplitCase::from_sides(&[N, O, N]).unwrap(), SplitCase::NoSplit);

        assert_eq!(
            SplitCase::from_sides(&[N, P, P]).unwrap(),
            SplitCase::TwoVertexSplit { lone: 0 }
        );
        assert_eq!(
            SplitCase::from_sides(&[N, P, N]).unwrap(),
            SplitCase::TwoVertexSplit { lone: 1 }
        );
        assert_eq!(
            SplitCase::from_sides(&[P, P, N]).unwrap(),
            SplitCase::TwoVertexSplit { lone: 2 }
        );

        assert_eq!(
            SplitCase::from_sides(&[P, O, N]).unwrap(),
            SplitCase::OnPlaneSplit { apex: 1 }
        );
        assert_eq!(
            SplitCase::from_sides(&[N, P, O]).unwrap(),
            SplitCase::OnPlaneSplit { apex: 2 }
        );
    }

    #[test]
    fn triangle_on_one_side_is_unchanged() {
        let tri = make_triangle([1.0, 0.0, 0.0], [2.0, 1.0, 0.0], [3.0, 0.0, 1.0]);
        let split = split_triangle(&tri.classify(&x_plane(), 0.0)).unwrap();
        assert_eq!(split, Split::Whole(tri));

        let behind = make_triangle([-1.0, 0.0, 0.0], [-2.0, 1.0, 0.0], [-3.0, 0.0, 1.0]);
        let split = split_triangle(&behind.classify(&x_plane(), 0.0)).unwrap();
        assert_eq!(split, Split::Whole(behind));
    }

    #[test]
    fn coplanar_and_edge_touching_triangles_are_unchanged() {
        let coplanar = make_triangle([0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]);
        let split = split_triangle(&coplanar.classify(&x_plane(), 0.0)).unwrap();
        assert_eq!(split, Split::Whole(coplanar));

        let touching = make_triangle([0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]);
        let split = split_triangle(&touching.classify(&x_plane(), 0.0)).unwrap();
        assert_eq!(split, Split::Whole(touching));
    }

    #[test]
    fn lone_negative_vertex_scenario() {
        // A alone behind x = 0, B and C in front
        let tri = make_triangle([-1.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0]);
        let split = split_triangle(&tri.classify(&x_plane(), 0.0)).unwrap();

        let a = Point3::new(-1.0, 0.0, 0.0);
        let b = Point3::new(1.0, 0.0, 0.0);
        let c = Point3::new(1.0, 1.0, 0.0);
        let x1 = Point3::new(0.0, 0.0, 0.0);
        let x2 = Point3::new(0.0, 0.5, 0.0);

        let Split::Three([t0, t1, t2]) = split else {
            panic!("expected three triangles, got {split:?}");
        };
        assert_eq!(t0, Triangle::new(a, x1, x2));
        assert_eq!(t1, Triangle::new(x1, b, c));
        assert_eq!(t2, Triangle::new(x1, c, x2));
    }

    #[test]
    fn on_plane_vertex_scenario() {
        let tri = make_triangle([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [-1.0, 0.0, 0.0]);
        let split = split_triangle(&tri.classify(&x_plane(), 0.0)).unwrap();

        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(1.0, 0.0, 0.0);
        let c = Point3::new(-1.0, 0.0, 0.0);
        let x = Point3::new(0.0, 0.0, 0.0);

        assert_eq!(
            split,
            Split::Two([Triangle::new(a, b, x), Triangle::new(a, x, c)])
        );
    }

    #[test]
    fn on_plane_split_preserves_area() {
        let tri = make_triangle([0.0, 2.0, 0.0], [1.0, 0.0, 0.0], [-3.0, -1.0, 0.0]);
        let split = split_triangle(&tri.classify(&x_plane(), 0.0)).unwrap();

        assert_eq!(split.len(), 2);
        assert_relative_eq!(total_area(&split), tri.area(), epsilon = 1e-5);
        assert_no_straddle(&split, &x_plane());
    }

    #[test]
    fn two_vertex_split_preserves_area_both_directions() {
        let plane = Plane3D::new(Vector3::new(1.0, 2.0, -0.5), Point3::new(0.2, 0.1, 0.0)).unwrap();
        let one_behind = make_triangle([-2.0, -1.0, 0.5], [3.0, 0.0, 1.0], [0.5, 2.0, -1.0]);
        let one_ahead = make_triangle([3.0, 1.0, 0.5], [-2.0, -1.0, 1.0], [-1.0, -2.0, -1.0]);

        for tri in [one_behind, one_ahead] {
            let classified = tri.classify(&plane, 0.0);
            let counts = classified.counts();
            assert_eq!(counts.on_plane, 0);
            assert!(counts.straddles());

            let split = split_triangle(&classified).unwrap();
            assert_eq!(split.len(), 3);
            assert_relative_eq!(total_area(&split), tri.area(), epsilon = 1e-4);
            assert_no_straddle(&split, &plane);
        }
    }

    #[test]
    fn split_keeps_winding() {
        let tri = make_triangle([-1.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0]);
        let normal = tri.unit_normal().unwrap();
        let split = split_triangle(&tri.classify(&x_plane(), 0.0)).unwrap();

        for piece in split.triangles() {
            if let Some(n) = piece.unit_normal() {
                assert!(n.dot(&normal) > 0.99);
            }
        }
    }

    #[test]
    fn mismatched_sides_are_invariant_violations() {
        // Sides claim a two-vertex split but the distances were swapped in.
        let tri = ClassifiedTriangle {
            vertices: [Point3::origin(), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)],
            distances: [-1.0, 1.0, 1.0],
            sides: [N, P, P],
        };
        assert!(split_on_plane(&tri, 0).is_err());
        assert!(matches!(
            split_two_vertex(&tri, 1),
            Err(ClipError::InvariantViolation(_))
        ));
    }

    #[test]
    fn zero_denominator_is_degenerate_split() {
        // Classified with a wide epsilon so both ends carry the same distance.
        let tri = ClassifiedTriangle {
            vertices: [Point3::origin(), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)],
            distances: [0.0, 0.5, 0.5],
            sides: [O, P, N],
        };
        assert_eq!(
            split_triangle(&tri),
            Err(ClipError::DegenerateSplit { from: 0.5, to: 0.5 })
        );
    }

    #[test]
    fn edge_intersection_interpolates_linearly() {
        let x = edge_intersection(
            Point3::new(-1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            -1.0,
            1.0,
        )
        .unwrap();
        assert_eq!(x, Point3::new(0.0, 0.5, 0.0));
    }

    #[test]
    fn tiny_crossing_distances_still_split() {
        // Distances far below f32::EPSILON, but with opposite signs.
        let tri = make_triangle([-2e-8, 0.0, 0.0], [3e-8, 0.0, 0.0], [3e-8, 1.0, 0.0]);
        let classified = tri.classify(&x_plane(), 0.0);
        assert!(classified.counts().straddles());

        let split = split_triangle(&classified).unwrap();

        assert_eq!(split.len(), 3);
        for piece in split.triangles() {
            assert!(piece.vertices().iter().all(|v| v.x.is_finite() && v.y.is_finite()));
        }
        assert_relative_eq!(total_area(&split), tri.area(), max_relative = 1e-3);
    }

    #[test]
    fn same_sign_distances_are_degenerate_split() {
        let result = edge_intersection(Point3::origin(), Point3::new(1.0, 0.0, 0.0), 0.5, 1.0);
        assert_eq!(result, Err(ClipError::DegenerateSplit { from: 0.5, to: 1.0 }));
    }
}
