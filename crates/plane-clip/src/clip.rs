//! Clipping whole meshes against a plane.

use log::{debug, trace};
use nalgebra::Affine3;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::settings::DEGENERATE_AREA;
use crate::{
    split_triangle, ClipError, ClipSettings, Mesh, Plane3D, Result, SourceMesh, Split, Triangle,
    Triangulator,
};

/// Clips triangle lists against a fixed plane.
///
/// Each call produces a fresh [`Mesh`] fragment in which no triangle has
/// vertices strictly on both sides of the plane. The input is never
/// modified.
///
/// ```ignore
/// use plane_clip::{ClipSettings, MeshClipper, Plane3D};
///
/// let clipper = MeshClipper::new(Plane3D::default(), ClipSettings::default())?;
/// let fragment = clipper.clip(&triangles, &world_transform)?;
/// ```
#[derive(Debug, Clone)]
pub struct MeshClipper {
    plane: Plane3D,
    settings: ClipSettings,
}

impl MeshClipper {
    /// Creates a clipper for `plane`.
    ///
    /// # Errors
    /// Returns [`ClipError::InvalidSettings`] if the settings do not validate.
    pub fn new(plane: Plane3D, settings: ClipSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self { plane, settings })
    }

    /// Returns the cutting plane.
    #[inline]
    pub fn plane(&self) -> &Plane3D {
        &self.plane
    }

    /// Returns the clip settings.
    #[inline]
    pub fn settings(&self) -> &ClipSettings {
        &self.settings
    }

    /// Clips local-space triangles placed in the world by `transform`.
    ///
    /// Vertices are moved to world space before they are measured against
    /// the plane, and the output is in world space.
    ///
    /// # Errors
    /// Any failure while splitting a triangle aborts the whole clip and is
    /// returned as [`ClipError::Triangle`] carrying the triangle index.
    pub fn clip(&self, triangles: &[Triangle], transform: &Affine3<f32>) -> Result<Mesh> {
        let splits = self.split_all(triangles, transform)?;

        let mut mesh = Mesh::with_capacity(splits.iter().map(Split::len).sum());
        for split in &splits {
            for triangle in split.triangles() {
                mesh.push_triangle(triangle)?;
            }
        }

        debug_assert!(mesh.face_count() >= triangles.len());
        debug!(
            "clipped {} triangles into {} triangles",
            triangles.len(),
            mesh.face_count()
        );
        Ok(mesh)
    }

    /// Triangulates a source mesh and clips it.
    pub fn clip_source<T>(&self, source: &SourceMesh, triangulator: &T) -> Result<Mesh>
    where
        T: Triangulator + ?Sized,
    {
        let triangles = triangulator.triangulate_all(source.polygons())?;
        debug!(
            "mesh `{}`: {} polygons, {} source triangles",
            source.name(),
            source.polygons().len(),
            triangles.len()
        );
        self.clip(&triangles, source.transform())
    }

    fn split_all(&self, triangles: &[Triangle], transform: &Affine3<f32>) -> Result<Vec<Split>> {
        #[cfg(feature = "parallel")]
        {
            if self.settings.parallel {
                return triangles
                    .par_iter()
                    .enumerate()
                    .map(|(index, triangle)| self.split_one(index, triangle, transform))
                    .collect();
            }
        }

        triangles
            .iter()
            .enumerate()
            .map(|(index, triangle)| self.split_one(index, triangle, transform))
            .collect()
    }

    fn split_one(
        &self,
        index: usize,
        triangle: &Triangle,
        transform: &Affine3<f32>,
    ) -> Result<Split> {
        let world = triangle.transformed(transform);

        if self.settings.reject_degenerate && world.area() <= DEGENERATE_AREA {
            let err = ClipError::InvalidGeometry("triangle has zero area".into());
            return Err(err.at_triangle(index));
        }

        let classified = world.classify(&self.plane, self.settings.epsilon);
        if classified.distances.iter().any(|d| !d.is_finite()) {
            let err = ClipError::InvalidGeometry(format!(
                "non-finite distances to the plane {:?}",
                classified.distances
            ));
            return Err(err.at_triangle(index));
        }
        let split = split_triangle(&classified).map_err(|err| err.at_triangle(index))?;
        if split.len() > 1 {
            trace!(
                "triangle {index} with sides {:?} split into {}",
                classified.sides,
                split.len()
            );
        }
        Ok(split)
    }
}

/// Clips a triangle list against `plane` with the given on-plane tolerance.
///
/// Shorthand for a [`MeshClipper`] with default settings apart from `epsilon`.
pub fn clip(
    triangles: &[Triangle],
    transform: &Affine3<f32>,
    plane: &Plane3D,
    epsilon: f32,
) -> Result<Mesh> {
    MeshClipper::new(plane.clone(), ClipSettings::default().with_epsilon(epsilon))?
        .clip(triangles, transform)
}
