//! Operation output.

use rig_types::SkinnedMesh;

/// Result of a deformation operation.
///
/// Contains the transformed mesh plus metrics describing what moved. The
/// input mesh is never mutated; hosts write `mesh`'s vertex positions back
/// into their own structures.
///
/// # Example
///
/// ```
/// use rig_shrink::{shrink_to_bones, ShrinkParams};
/// use rig_types::{Bone, Point3, Skeleton, SkinnedMesh, SkinVertex};
///
/// let mesh = SkinnedMesh::new(
///     vec![SkinVertex::from_coords(0.0, 0.5, 0.1).with_weight("spine", 1.0)],
///     vec![],
/// )
/// .with_shape_target(true);
/// let skeleton = Skeleton::new(vec![Bone::new(
///     "spine",
///     Point3::origin(),
///     Point3::new(0.0, 1.0, 0.0),
/// )]);
///
/// let output = shrink_to_bones(&mesh, &skeleton, &ShrinkParams::default()).unwrap();
/// assert_eq!(output.vertices_modified, 1);
/// ```
#[derive(Debug, Clone)]
pub struct DeformOutput {
    /// The transformed mesh.
    pub mesh: SkinnedMesh,

    /// Number of vertices that moved.
    pub vertices_modified: usize,

    /// Largest single-vertex displacement, in world units.
    pub max_displacement: f64,
}

impl DeformOutput {
    /// Wrap an untouched mesh.
    #[must_use]
    pub const fn unchanged(mesh: SkinnedMesh) -> Self {
        Self {
            mesh,
            vertices_modified: 0,
            max_displacement: 0.0,
        }
    }

    /// One-line human-readable summary.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} vertices moved, max displacement {:.6}",
            self.vertices_modified, self.max_displacement
        )
    }
}

/// Accumulate displacement metrics over the vertices of `before`/`after`.
///
/// A vertex counts as modified when it moved more than `1e-10` local
/// units.
pub(crate) fn displacement_metrics(before: &SkinnedMesh, after: &SkinnedMesh) -> (usize, f64) {
    let mut modified = 0;
    let mut max_displacement: f64 = 0.0;

    for (orig, moved) in before.vertices.iter().zip(after.vertices.iter()) {
        let disp = (moved.position - orig.position).norm();
        if disp > 1e-10 {
            modified += 1;
            max_displacement = max_displacement.max(disp);
        }
    }

    (modified, max_displacement)
}
