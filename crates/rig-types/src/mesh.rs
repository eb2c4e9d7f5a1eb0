//! Skinned mesh container.

use crate::{MeshEdge, ObjectTransform, SkinVertex};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A skinned mesh snapshot handed over by the host.
///
/// Vertices are addressed by their index in `vertices`; edges reference
/// vertices by index. `has_shape_target` and `face_selection_count` carry
/// the host-side context the operations validate against:
/// a shrink-target shape must be registered before any operation runs, and
/// align-to-bone refuses selections that contain faces.
///
/// # Example
///
/// ```
/// use rig_types::{MeshEdge, SkinnedMesh, SkinVertex};
///
/// let mesh = SkinnedMesh::new(
///     vec![
///         SkinVertex::from_coords(0.0, 0.0, 0.0),
///         SkinVertex::from_coords(1.0, 0.0, 0.0),
///     ],
///     vec![MeshEdge::new(0, 1)],
/// );
/// assert_eq!(mesh.vertex_count(), 2);
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SkinnedMesh {
    /// Vertex data, addressed by index.
    pub vertices: Vec<SkinVertex>,

    /// Edge data; endpoints are indices into `vertices`.
    pub edges: Vec<MeshEdge>,

    /// The mesh object's world transform.
    pub transform: ObjectTransform,

    /// Whether a shrink-target shape is registered on the mesh.
    pub has_shape_target: bool,

    /// Number of faces the host reports as selected.
    pub face_selection_count: usize,

    /// Whether the host has X-mirror editing enabled.
    pub mirror_x: bool,
}

impl SkinnedMesh {
    /// Create a mesh with the identity transform and no host context set.
    #[inline]
    #[must_use]
    pub fn new(vertices: Vec<SkinVertex>, edges: Vec<MeshEdge>) -> Self {
        Self {
            vertices,
            edges,
            transform: ObjectTransform::identity(),
            has_shape_target: false,
            face_selection_count: 0,
            mirror_x: false,
        }
    }

    /// Set the world transform (builder style).
    #[must_use]
    pub const fn with_transform(mut self, transform: ObjectTransform) -> Self {
        self.transform = transform;
        self
    }

    /// Mark a shrink-target shape as registered (builder style).
    #[must_use]
    pub const fn with_shape_target(mut self, has_shape_target: bool) -> Self {
        self.has_shape_target = has_shape_target;
        self
    }

    /// Set the selected-face count reported by the host (builder style).
    #[must_use]
    pub const fn with_face_selection_count(mut self, count: usize) -> Self {
        self.face_selection_count = count;
        self
    }

    /// Enable or disable X-mirror extension (builder style).
    #[must_use]
    pub const fn with_mirror_x(mut self, mirror_x: bool) -> Self {
        self.mirror_x = mirror_x;
        self
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges.
    #[inline]
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Indices of vertices flagged as selected, ascending.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    // Truncation: vertex indices are u32, meshes beyond 4B vertices are unsupported by design
    pub fn selected_vertices(&self) -> Vec<u32> {
        self.vertices
            .iter()
            .enumerate()
            .filter(|(_, v)| v.selected)
            .map(|(i, _)| i as u32)
            .collect()
    }

    /// Indices of edges flagged as selected, ascending.
    #[must_use]
    pub fn selected_edges(&self) -> Vec<usize> {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, e)| e.selected)
            .map(|(i, _)| i)
            .collect()
    }
}
