//! Error types for plane clipping.

use thiserror::Error;

/// Errors that can occur while clipping meshes against a plane.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClipError {
    /// Geometry that cannot be processed (zero-length plane normal,
    /// polygon with too few vertices, zero-area triangle when rejected).
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Clip settings are out of range.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// The classifier and the splitter disagree about a triangle.
    ///
    /// This indicates a logic defect, never a recoverable input condition.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// The interpolation denominator along an edge is numerically zero.
    #[error("degenerate split between signed distances {from} and {to}")]
    DegenerateSplit {
        /// Signed distance of the edge's start vertex.
        from: f32,
        /// Signed distance of the edge's end vertex.
        to: f32,
    },

    /// A mesh outgrew the `u32` face indices.
    #[error("mesh would hold {vertices} vertices, more than u32 indices can address")]
    MeshTooLarge {
        /// Vertex count the mesh would have reached.
        vertices: usize,
    },

    /// A triangle of the mesh being clipped failed.
    #[error("triangle {index}: {source}")]
    Triangle {
        /// Index of the triangle in the triangulated input.
        index: usize,
        /// What went wrong with it.
        #[source]
        source: Box<ClipError>,
    },

    /// A mesh of the scene being clipped failed.
    #[error("mesh `{name}`: {source}")]
    Mesh {
        /// Name of the source mesh.
        name: String,
        /// What went wrong with it.
        #[source]
        source: Box<ClipError>,
    },
}

impl ClipError {
    /// Wraps this error with the index of the triangle it occurred in.
    pub fn at_triangle(self, index: usize) -> Self {
        ClipError::Triangle {
            index,
            source: Box::new(self),
        }
    }

    /// Wraps this error with the name of the mesh it occurred in.
    pub fn in_mesh(self, name: impl Into<String>) -> Self {
        ClipError::Mesh {
            name: name.into(),
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, skipping triangle and mesh context.
    pub fn root(&self) -> &ClipError {
        match self {
            ClipError::Triangle { source, .. } | ClipError::Mesh { source, .. } => source.root(),
            other => other,
        }
    }

    /// Returns the triangle index recorded in the context chain, if any.
    pub fn triangle_index(&self) -> Option<usize> {
        match self {
            ClipError::Triangle { index, .. } => Some(*index),
            ClipError::Mesh { source, .. } => source.triangle_index(),
            _ => None,
        }
    }
}

/// Result type for clipping operations.
pub type Result<T> = std::result::Result<T, ClipError>;
