#![warn(missing_docs)]

//! Clipping triangle meshes against a plane.
//!
//! Every triangle that has vertices strictly on both sides of the cutting
//! plane is re-triangulated so that each resulting triangle lies on one side
//! of the plane or on it. Triangles that do not straddle the plane are kept
//! as they are.
//!
//! # Example
//!
//! ```ignore
//! use plane_clip::{clip_scene, ClipSettings, CollectingSink, FanTriangulator, Scene, SourceMesh};
//!
//! let scene = Scene::new().with_mesh(SourceMesh::new("Cube", cube_faces));
//! let mut sink = CollectingSink::new();
//! let report = clip_scene(&scene, &mut sink, &ClipSettings::default(), &FanTriangulator)?;
//!
//! println!("result faces: {}", report.face_count);
//! ```

mod clip;
mod error;
mod mesh;
mod plane;
mod polygon;
mod scene;
pub mod settings;
mod split;
mod triangle;
mod triangulate;

pub use clip::{clip, MeshClipper};
pub use error::{ClipError, Result};
pub use mesh::{merge_into, Mesh};
pub use plane::{Plane3D, PlaneSide, DEFAULT_EPSILON};
pub use polygon::Polygon;
pub use scene::{
    clip_scene, resolve_plane, ClipReport, CollectingSink, MeshReport, MeshSink, MeshSource,
    PlaneReference, Scene, SourceMesh,
};
pub use settings::ClipSettings;
pub use split::{edge_intersection, split_triangle, Split, SplitCase};
pub use triangle::{ClassifiedTriangle, SideCounts, Triangle};
pub use triangulate::{FanTriangulator, FnTriangulator, Triangulator};
