//! Clipping every mesh of a host scene and collecting one result.
//!
//! The host supplies meshes (and optionally reference geometry for the
//! cutting plane) through [`MeshSource`] and receives the merged result
//! through [`MeshSink`]. The library never owns host objects.

use log::{debug, info, warn};
use nalgebra::{Affine3, Isometry3};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{
    merge_into, ClipSettings, Mesh, MeshClipper, Plane3D, Polygon, Result, Triangle, Triangulator,
};

/// A named polygon mesh in local space, placed in the world by a transform.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceMesh {
    name: String,
    polygons: Vec<Polygon>,
    transform: Affine3<f32>,
}

impl SourceMesh {
    /// Creates a source mesh at the world origin.
    pub fn new(name: impl Into<String>, polygons: Vec<Polygon>) -> Self {
        Self {
            name: name.into(),
            polygons,
            transform: Affine3::identity(),
        }
    }

    /// Creates a source mesh from triangles at the world origin.
    pub fn from_triangles(name: impl Into<String>, triangles: Vec<Triangle>) -> Self {
        Self::new(name, triangles.into_iter().map(Polygon::from).collect())
    }

    /// Sets the world transform.
    pub fn with_transform(mut self, transform: Affine3<f32>) -> Self {
        self.transform = transform;
        self
    }

    /// Sets the world transform from a rigid motion.
    pub fn with_isometry(self, isometry: &Isometry3<f32>) -> Self {
        self.with_transform(Affine3::from_matrix_unchecked(isometry.to_homogeneous()))
    }

    /// Returns the mesh name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the polygons in local space.
    #[inline]
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// Returns the local-to-world transform.
    #[inline]
    pub fn transform(&self) -> &Affine3<f32> {
        &self.transform
    }
}

/// Reference geometry the cutting plane is derived from.
///
/// See [`Plane3D::from_reference`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneReference {
    /// A face of the reference object, in its local space.
    pub polygon: Polygon,
    /// Where the reference object sits in the world.
    pub transform: Isometry3<f32>,
}

impl PlaneReference {
    /// Derives the cutting plane.
    pub fn plane(&self) -> Result<Plane3D> {
        Plane3D::from_reference(&self.polygon, &self.transform)
    }
}

/// Supplies the meshes to clip.
pub trait MeshSource {
    /// The meshes to clip, in order.
    fn meshes(&self) -> &[SourceMesh];

    /// Reference geometry for the cutting plane, if the host has any.
    fn plane_reference(&self) -> Option<&PlaneReference> {
        None
    }
}

/// Receives the merged result of a clip.
pub trait MeshSink {
    /// Accepts the merged mesh. Called once, and only on success.
    fn accept(&mut self, mesh: Mesh) -> Result<()>;
}

/// An in-memory [`MeshSource`].
#[derive(Debug, Clone, Default)]
pub struct Scene {
    meshes: Vec<SourceMesh>,
    plane_reference: Option<PlaneReference>,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a mesh to the scene.
    pub fn with_mesh(mut self, mesh: SourceMesh) -> Self {
        self.meshes.push(mesh);
        self
    }

    /// Sets the reference geometry for the cutting plane.
    pub fn with_plane_reference(mut self, reference: PlaneReference) -> Self {
        self.plane_reference = Some(reference);
        self
    }

    /// Adds a mesh to the scene.
    pub fn push(&mut self, mesh: SourceMesh) {
        self.meshes.push(mesh);
    }
}

impl MeshSource for Scene {
    fn meshes(&self) -> &[SourceMesh] {
        &self.meshes
    }

    fn plane_reference(&self) -> Option<&PlaneReference> {
        self.plane_reference.as_ref()
    }
}

/// A [`MeshSink`] that keeps the delivered mesh.
#[derive(Debug, Default)]
pub struct CollectingSink {
    mesh: Option<Mesh>,
}

impl CollectingSink {
    /// Creates a sink that has not received anything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the delivered mesh, if any.
    pub fn mesh(&self) -> Option<&Mesh> {
        self.mesh.as_ref()
    }

    /// Takes the delivered mesh out of the sink.
    pub fn into_mesh(self) -> Option<Mesh> {
        self.mesh
    }
}

impl MeshSink for CollectingSink {
    fn accept(&mut self, mesh: Mesh) -> Result<()> {
        self.mesh = Some(mesh);
        Ok(())
    }
}

/// Face counts for one clipped mesh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshReport {
    /// Name of the source mesh.
    pub name: String,
    /// Faces in the source mesh, before triangulation.
    pub source_faces: usize,
    /// Triangles in the clipped fragment.
    pub result_faces: usize,
}

/// Summary of a scene clip.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipReport {
    /// The plane the scene was clipped against.
    pub plane: Plane3D,
    /// One entry per source mesh, in source order.
    pub meshes: Vec<MeshReport>,
    /// Vertices in the merged result.
    pub vertex_count: usize,
    /// Faces in the merged result.
    pub face_count: usize,
}

/// Resolves the cutting plane of a source: its reference geometry if any,
/// otherwise [`Plane3D::default`].
pub fn resolve_plane<S: MeshSource + ?Sized>(source: &S) -> Result<Plane3D> {
    match source.plane_reference() {
        Some(reference) => reference.plane(),
        None => Ok(Plane3D::default()),
    }
}

/// Clips every mesh of `source`, merges the fragments and hands the result
/// to `sink`.
///
/// Fragments are merged in source order. If any mesh fails, the error is
/// returned as [`ClipError::Mesh`](crate::ClipError::Mesh) naming it, and the
/// sink receives nothing.
pub fn clip_scene<S, K, T>(
    source: &S,
    sink: &mut K,
    settings: &ClipSettings,
    triangulator: &T,
) -> Result<ClipReport>
where
    S: MeshSource + ?Sized,
    K: MeshSink + ?Sized,
    T: Triangulator + Sync + ?Sized,
{
    let plane = resolve_plane(source)?;
    debug!(
        "cutting plane normal = {:?}, point = {:?}, offset = {}",
        plane.normal(),
        plane.point(),
        plane.offset()
    );
    let clipper = MeshClipper::new(plane, *settings)?;

    let meshes = source.meshes();
    if meshes.is_empty() {
        warn!("no source meshes to clip");
    }

    let fragments = clip_fragments(&clipper, meshes, triangulator)?;

    let mut result = Mesh::new();
    let mut reports = Vec::with_capacity(meshes.len());
    for (mesh, fragment) in meshes.iter().zip(&fragments) {
        merge_into(&mut result, fragment)?;
        reports.push(MeshReport {
            name: mesh.name().to_owned(),
            source_faces: mesh.polygons().len(),
            result_faces: fragment.face_count(),
        });
    }

    let report = ClipReport {
        plane: clipper.plane().clone(),
        meshes: reports,
        vertex_count: result.vertex_count(),
        face_count: result.face_count(),
    };
    info!(
        "clipped {} meshes into {} faces",
        report.meshes.len(),
        report.face_count
    );

    sink.accept(result)?;
    Ok(report)
}

fn clip_fragments<T>(
    clipper: &MeshClipper,
    meshes: &[SourceMesh],
    triangulator: &T,
) -> Result<Vec<Mesh>>
where
    T: Triangulator + Sync + ?Sized,
{
    let clip_one = |mesh: &SourceMesh| {
        clipper
            .clip_source(mesh, triangulator)
            .map_err(|err| err.in_mesh(mesh.name()))
    };

    #[cfg(feature = "parallel")]
    {
        if clipper.settings().parallel {
            return meshes.par_iter().map(clip_one).collect();
        }
    }

    meshes.iter().map(clip_one).collect()
}
