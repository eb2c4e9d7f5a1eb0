//! Align edge loops onto a plane perpendicular to a bone.

use nalgebra::{Matrix4, Point3, Vector3};
use tracing::{debug, info};

use crate::bones::{collect_deform_bones, DeformBone};
use crate::error::{ShrinkError, ShrinkResult};
use crate::islands::{edge_loops, group_vertices};
use crate::mirror::mirror_edges;
use crate::result::{displacement_metrics, DeformOutput};
use crate::select::find_bone_by_weight;
use rig_types::{ObjectTransform, SkinnedMesh, Skeleton};

/// Flatten each selected edge loop onto a plane perpendicular to its
/// bone's long axis.
///
/// The selected edges (extended by X-mirror when the mesh has it enabled)
/// are grouped into loops; each group picks its bone by weight, then every
/// group vertex has its bone-local Y coordinate (the along-the-bone
/// coordinate) overwritten with the group centroid's, collapsing the loop
/// onto one cross-section plane. Groups with no resolvable bone or a
/// zero-length bone are left as they are.
///
/// # Errors
///
/// Validated before any computation, leaving the input untouched:
///
/// - [`ShrinkError::InvalidSelection`] - the host reports selected faces;
///   this operation accepts pure edge selections only
/// - [`ShrinkError::NoArmature`] - the skeleton has no bones
/// - [`ShrinkError::NoActiveShapeTarget`] - no shrink-target shape is
///   registered on the mesh
/// - [`ShrinkError::NoVisibleDeformBones`] - every bone is hidden or
///   non-deforming
///
/// # Example
///
/// ```
/// use rig_shrink::align_to_bone;
/// use rig_types::{Bone, MeshEdge, Point3, Skeleton, SkinnedMesh, SkinVertex};
///
/// let mesh = SkinnedMesh::new(
///     vec![
///         SkinVertex::from_coords(0.2, 0.1, 0.0).with_weight("spine", 1.0),
///         SkinVertex::from_coords(-0.2, 0.3, 0.0).with_weight("spine", 1.0),
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
/// let output = align_to_bone(&mesh, &skeleton).unwrap();
/// // Both endpoints now share the loop's mean height along the bone
/// let y0 = output.mesh.vertices[0].position.y;
/// let y1 = output.mesh.vertices[1].position.y;
/// assert!((y0 - y1).abs() < 1e-12);
/// ```
pub fn align_to_bone(mesh: &SkinnedMesh, skeleton: &Skeleton) -> ShrinkResult<DeformOutput> {
    if mesh.face_selection_count > 0 {
        return Err(ShrinkError::InvalidSelection);
    }
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

    let mut selected_edges = mesh.selected_edges();
    if mesh.mirror_x {
        selected_edges.extend(mirror_edges(mesh, &selected_edges));
    }

    let groups = edge_loops(mesh, &selected_edges);
    info!(groups = groups.len(), "Starting edge-loop align");

    let mut result = mesh.clone();

    for group in &groups {
        let vertices = group_vertices(mesh, group);
        let Some(bone_idx) = find_bone_by_weight(mesh, &vertices, &deform_bones) else {
            debug!(edges = group.len(), "Loop has no resolvable bone, skipping");
            continue;
        };
        let Some(frame) = bone_frame(&deform_bones[bone_idx]) else {
            debug!(bone = %deform_bones[bone_idx].name, "Zero-length bone, skipping loop");
            continue;
        };

        // World centroid of the loop
        let mut sum = Vector3::zeros();
        for &vertex_idx in &vertices {
            sum += mesh
                .transform
                .to_world(mesh.vertices[vertex_idx as usize].position)
                .coords;
        }
        #[allow(clippy::cast_precision_loss)]
        let center = Point3::from(sum / vertices.len() as f64);
        let center_y = frame.to_local(center).y;

        for &vertex_idx in &vertices {
            let Some(vertex) = result.vertices.get_mut(vertex_idx as usize) else {
                continue;
            };
            let world = mesh.transform.to_world(vertex.position);
            let mut bone_space = frame.to_local(world);
            bone_space.y = center_y;
            vertex.position = mesh.transform.to_local(frame.to_world(bone_space));
        }
    }

    let (vertices_modified, max_displacement) = displacement_metrics(mesh, &result);
    info!(modified = vertices_modified, "Edge-loop align complete");

    Ok(DeformOutput {
        mesh: result,
        vertices_modified,
        max_displacement,
    })
}

/// The bone's local coordinate frame: origin at the head, Y along the
/// axis, X/Z an orthonormal complement.
///
/// Only the Y coordinate is ever rewritten in this frame, so the X/Z
/// choice does not affect the result. Returns `None` for a zero-length
/// bone.
fn bone_frame(bone: &DeformBone) -> Option<ObjectTransform> {
    let len = bone.axis.norm();
    if len <= f64::EPSILON {
        return None;
    }
    let y = bone.axis / len;

    let reference = if y.z.abs() < 0.99 {
        Vector3::z()
    } else {
        Vector3::x()
    };
    let x = reference.cross(&y).normalize();
    let z = x.cross(&y);

    #[rustfmt::skip]
    let matrix = Matrix4::new(
        x.x, y.x, z.x, bone.head.x,
        x.y, y.y, z.y, bone.head.y,
        x.z, y.z, z.z, bone.head.z,
        0.0, 0.0, 0.0, 1.0,
    );
    ObjectTransform::from_matrix(matrix)
}
