//! Output meshes and fragment merging.

use nalgebra::Point3;

use crate::{ClipError, Result, Triangle};

/// An append-only triangle mesh: a vertex arena plus faces indexing into it.
///
/// Every appended triangle gets three fresh vertices; nothing is shared or
/// deduplicated, matching how clipped fragments are assembled. Faces index
/// with `u32`, so a mesh holds at most `u32::MAX` vertices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<Point3<f32>>,
    faces: Vec<[u32; 3]>,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty mesh with room for `triangles` triangles.
    pub fn with_capacity(triangles: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(triangles * 3),
            faces: Vec::with_capacity(triangles),
        }
    }

    /// Returns the vertex arena.
    #[inline]
    pub fn vertices(&self) -> &[Point3<f32>] {
        &self.vertices
    }

    /// Returns the faces, each as three indices into [`vertices`](Self::vertices).
    #[inline]
    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of faces.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Returns true if the mesh has no faces and no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty() && self.vertices.is_empty()
    }

    /// Appends a triangle as three new vertices and one face.
    ///
    /// # Errors
    /// Returns [`ClipError::MeshTooLarge`] if the new vertices would not be
    /// addressable by `u32` indices.
    pub fn push_triangle(&mut self, triangle: &Triangle) -> Result<()> {
        let base = index_base(self.vertices.len(), 3)?;
        self.vertices.extend_from_slice(triangle.vertices());
        self.faces.push([base, base + 1, base + 2]);
        Ok(())
    }

    /// Builds a mesh from a sequence of triangles.
    pub fn from_triangles<I>(triangles: I) -> Result<Self>
    where
        I: IntoIterator<Item = Triangle>,
    {
        let mut mesh = Mesh::new();
        for triangle in triangles {
            mesh.push_triangle(&triangle)?;
        }
        Ok(mesh)
    }

    /// Returns the triangle of face `index`.
    pub fn triangle(&self, index: usize) -> Option<Triangle> {
        let [a, b, c] = *self.faces.get(index)?;
        Some(Triangle::new(
            *self.vertices.get(a as usize)?,
            *self.vertices.get(b as usize)?,
            *self.vertices.get(c as usize)?,
        ))
    }

    /// Iterates over all faces as triangles.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        (0..self.faces.len()).filter_map(move |i| self.triangle(i))
    }

    /// Appends all geometry of `fragment` to this mesh.
    ///
    /// Fragment vertices become new entries and fragment faces are remapped
    /// to them. No deduplication against existing vertices is performed, so
    /// appending the same fragment twice duplicates its geometry.
    ///
    /// # Errors
    /// Returns [`ClipError::MeshTooLarge`] if the merged mesh would not be
    /// addressable by `u32` indices. The mesh is left unchanged.
    pub fn append(&mut self, fragment: &Mesh) -> Result<()> {
        let base = index_base(self.vertices.len(), fragment.vertices.len())?;
        self.vertices.extend_from_slice(&fragment.vertices);
        self.faces
            .extend(fragment.faces.iter().map(|face| face.map(|i| i + base)));
        Ok(())
    }
}

/// Index of the first of `added` vertices appended after `len` existing ones.
fn index_base(len: usize, added: usize) -> Result<u32> {
    let total = len.saturating_add(added);
    match (u32::try_from(len), u32::try_from(total)) {
        (Ok(base), Ok(_)) => Ok(base),
        _ => Err(ClipError::MeshTooLarge { vertices: total }),
    }
}

/// Folds a clipped fragment into an accumulator mesh.
///
/// See [`Mesh::append`].
pub fn merge_into(accumulator: &mut Mesh, fragment: &Mesh) -> Result<()> {
    accumulator.append(fragment)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_triangle(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> Triangle {
        Triangle::new(Point3::from(a), Point3::from(b), Point3::from(c))
    }

    fn fragment(offset: f32, count: usize) -> Mesh {
        Mesh::from_triangles((0..count).map(|i| {
            let z = offset + i as f32;
            make_triangle([0.0, 0.0, z], [1.0, 0.0, z], [0.0, 1.0, z])
        }))
        .unwrap()
    }

    /// Triangles of a mesh as sortable coordinate keys.
    fn geometry(mesh: &Mesh) -> Vec<[u32; 9]> {
        let mut keys: Vec<[u32; 9]> = mesh
            .triangles()
            .map(|t| {
                let [a, b, c] = *t.vertices();
                [a.x, a.y, a.z, b.x, b.y, b.z, c.x, c.y, c.z].map(f32::to_bits)
            })
            .collect();
        keys.sort_unstable();
        keys
    }

    #[test]
    fn push_triangle_creates_fresh_vertices() {
        let mut mesh = Mesh::new();
        let tri = make_triangle([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);

        mesh.push_triangle(&tri).unwrap();
        mesh.push_triangle(&tri).unwrap();

        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.faces(), &[[0, 1, 2], [3, 4, 5]]);
        assert_eq!(mesh.triangle(1), Some(tri));
        assert_eq!(mesh.triangle(2), None);
    }

    #[test]
    fn merge_remaps_face_indices() {
        let mut acc = fragment(0.0, 2);
        let frag = fragment(10.0, 1);

        merge_into(&mut acc, &frag).unwrap();

        assert_eq!(acc.vertex_count(), 9);
        assert_eq!(acc.face_count(), 3);
        assert_eq!(acc.faces()[2], [6, 7, 8]);
        assert_eq!(acc.triangle(2), frag.triangle(0));
    }

    #[test]
    fn merging_empty_fragment_is_noop() {
        let mut acc = fragment(0.0, 3);
        let before = acc.clone();

        merge_into(&mut acc, &Mesh::new()).unwrap();

        assert_eq!(acc, before);
    }

    #[test]
    fn merging_twice_duplicates_geometry() {
        let mut acc = Mesh::new();
        let frag = fragment(0.0, 2);

        merge_into(&mut acc, &frag).unwrap();
        merge_into(&mut acc, &frag).unwrap();

        assert_eq!(acc.face_count(), 4);
        assert_eq!(acc.vertex_count(), 12);
    }

    #[test]
    fn merge_grouping_does_not_change_geometry() {
        let a = fragment(0.0, 2);
        let b = fragment(5.0, 1);
        let c = fragment(9.0, 3);

        // [A, B] then [C]
        let mut ab = Mesh::new();
        merge_into(&mut ab, &a).unwrap();
        merge_into(&mut ab, &b).unwrap();
        let mut left = Mesh::new();
        merge_into(&mut left, &ab).unwrap();
        merge_into(&mut left, &c).unwrap();

        // [A] then [B, C]
        let mut bc = Mesh::new();
        merge_into(&mut bc, &b).unwrap();
        merge_into(&mut bc, &c).unwrap();
        let mut right = Mesh::new();
        merge_into(&mut right, &a).unwrap();
        merge_into(&mut right, &bc).unwrap();

        // [C, A, B]
        let mut shuffled = Mesh::new();
        for frag in [&c, &a, &b] {
            merge_into(&mut shuffled, frag).unwrap();
        }

        assert_eq!(left, right);
        assert_eq!(geometry(&left), geometry(&shuffled));
    }

    #[test]
    fn index_base_stops_at_u32_range() {
        assert_eq!(index_base(0, 3), Ok(0));
        assert_eq!(index_base(6, 3), Ok(6));

        let last = u32::MAX as usize;
        assert_eq!(index_base(last - 3, 3), Ok(u32::MAX - 3));
        assert_eq!(
            index_base(last - 2, 3),
            Err(ClipError::MeshTooLarge { vertices: last + 1 })
        );
        assert!(index_base(usize::MAX, 1).is_err());
    }
}
