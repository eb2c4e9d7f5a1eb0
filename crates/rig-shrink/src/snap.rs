//! Snap vertex islands onto bone axes.

use tracing::{debug, info};

use crate::bones::{collect_deform_bones, lerp_point};
use crate::error::{ShrinkError, ShrinkResult};
use crate::islands::vertex_islands;
use crate::mirror::mirror_vertices;
use crate::params::{BoneStrategy, SnapParams};
use crate::result::{displacement_metrics, DeformOutput};
use crate::select::{find_bone_by_nearest, find_bone_by_weight};
use rig_types::{SkinnedMesh, Skeleton};

/// Blend applied between a vertex and its axis projection.
const SNAP_BLEND: f64 = 0.95;

/// Snap each selected island onto the axis of its most relevant bone.
///
/// The selection (extended by X-mirror when the mesh has it enabled) is
/// split into islands via the selected edges; each island picks one bone
/// per the strategy and every island vertex moves 95% of the way onto the
/// bone's head-anchored axis line. Islands with no resolvable bone are
/// left as they are.
///
/// # Errors
///
/// Validated before any computation, leaving the input untouched:
///
/// - [`ShrinkError::NoArmature`] - the skeleton has no bones
/// - [`ShrinkError::NoActiveShapeTarget`] - no shrink-target shape is
///   registered on the mesh
/// - [`ShrinkError::NoVisibleDeformBones`] - every bone is hidden or
///   non-deforming
///
/// # Example
///
/// ```
/// use rig_shrink::{snap_to_bone, SnapParams};
/// use rig_types::{Bone, MeshEdge, Point3, Skeleton, SkinnedMesh, SkinVertex};
///
/// let mesh = SkinnedMesh::new(
///     vec![
///         SkinVertex::from_coords(0.4, 0.2, 0.0)
///             .with_weight("spine", 1.0)
///             .with_selected(true),
///         SkinVertex::from_coords(0.4, 0.8, 0.0)
///             .with_weight("spine", 1.0)
///             .with_selected(true),
///     ],
///     vec![MeshEdge::selected(0, 1)],
/// )
/// .with_shape_target(true);
/// let skeleton = Skeleton::new(vec![Bone::new(
///     "spine",
///     Point3::origin(),
///     Point3::new(0.0, 1.0, 0.0),
/// )]);
///
/// let output = snap_to_bone(&mesh, &skeleton, &SnapParams::default()).unwrap();
/// assert_eq!(output.vertices_modified, 2);
/// ```
pub fn snap_to_bone(
    mesh: &SkinnedMesh,
    skeleton: &Skeleton,
    params: &SnapParams,
) -> ShrinkResult<DeformOutput> {
    if skeleton.is_empty() {
        return Err(ShrinkError::NoArmature);
    }
    if !mesh.has_shape_target {
        return Err(ShrinkError::NoActiveShapeTarget);
    }
    let deform_bones = collect_deform_bones(skeleton);
    if deform_bones.is_empty() {
        return Err(ShrinkError::NoVisibleDeformBones);
    }

    let mut selected_vertices = mesh.selected_vertices();
    if mesh.mirror_x {
        selected_vertices.extend(mirror_vertices(mesh, &selected_vertices));
    }
    let selected_edges = mesh.selected_edges();

    let islands = vertex_islands(mesh, &selected_edges, &selected_vertices);
    info!(
        islands = islands.len(),
        strategy = ?params.strategy,
        "Starting snap to bone"
    );

    let mut result = mesh.clone();

    for island in &islands {
        let picked = match params.strategy {
            BoneStrategy::ByWeight => find_bone_by_weight(mesh, island, &deform_bones),
            BoneStrategy::ByNearest => find_bone_by_nearest(mesh, island, &deform_bones),
        };
        let Some(bone_idx) = picked else {
            debug!(size = island.len(), "Island has no resolvable bone, skipping");
            continue;
        };
        let bone = &deform_bones[bone_idx];

        for &vertex_idx in island {
            let Some(vertex) = result.vertices.get_mut(vertex_idx as usize) else {
                continue;
            };
            let world = mesh.transform.to_world(vertex.position);
            let snapped = bone.project(world);
            let new_world = lerp_point(world, snapped, SNAP_BLEND);
            vertex.position = mesh.transform.to_local(new_world);
        }
    }

    let (vertices_modified, max_displacement) = displacement_metrics(mesh, &result);
    info!(modified = vertices_modified, "Snap to bone complete");

    Ok(DeformOutput {
        mesh: result,
        vertices_modified,
        max_displacement,
    })
}
