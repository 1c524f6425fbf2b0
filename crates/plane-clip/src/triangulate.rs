//! Polygon triangulation ahead of clipping.
//!
//! The clipper itself only understands triangles. Source meshes made of
//! quads or larger polygons go through a [`Triangulator`] first.

use crate::{ClipError, Polygon, Result, Triangle};

/// Turns a polygon into triangles covering the same surface.
pub trait Triangulator {
    /// Triangulates one polygon.
    ///
    /// Implementations must keep the polygon's winding in every triangle.
    fn triangulate(&self, polygon: &Polygon) -> Result<Vec<Triangle>>;

    /// Triangulates every polygon, in order.
    fn triangulate_all(&self, polygons: &[Polygon]) -> Result<Vec<Triangle>> {
        let mut triangles = Vec::with_capacity(polygons.len() * 2);
        for polygon in polygons {
            triangles.extend(self.triangulate(polygon)?);
        }
        Ok(triangles)
    }
}

/// Fan triangulation: vertex 0 connects to every other edge.
///
/// Correct for convex polygons, which is what mesh faces normally are.
/// Triangles are passed through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct FanTriangulator;

impl Triangulator for FanTriangulator {
    fn triangulate(&self, polygon: &Polygon) -> Result<Vec<Triangle>> {
        let verts = polygon.vertices();
        if verts.len() < 3 {
            return Err(ClipError::InvalidGeometry(format!(
                "polygon has {} vertices, at least 3 are required",
                verts.len()
            )));
        }

        Ok((1..verts.len() - 1)
            .map(|i| Triangle::new(verts[0], verts[i], verts[i + 1]))
            .collect())
    }
}

/// A triangulator that calls a closure for each polygon.
pub struct FnTriangulator<F>
where
    F: Fn(&Polygon) -> Result<Vec<Triangle>>,
{
    func: F,
}

impl<F> FnTriangulator<F>
where
    F: Fn(&Polygon) -> Result<Vec<Triangle>>,
{
    /// Creates a new triangulator from a closure.
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> Triangulator for FnTriangulator<F>
where
    F: Fn(&Polygon) -> Result<Vec<Triangle>>,
{
    fn triangulate(&self, polygon: &Polygon) -> Result<Vec<Triangle>> {
        (self.func)(polygon)
    }
}
