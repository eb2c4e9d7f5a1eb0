//! Bone selection for a group of vertices.
//!
//! Snap and align process whole islands or edge loops against a single
//! bone; these pick that bone. Both return an index into the deform-bone
//! slice, or `None` when no bone qualifies — callers treat `None` as a
//! silent skip for the group.

use hashbrown::HashMap;
use rig_types::SkinnedMesh;

use crate::bones::DeformBone;

/// Pick the bone holding the highest vertex-group weight across the group,
/// restricted to active deform bones.
///
/// Ties keep the first-encountered bone (strict `>` on the running
/// maximum). Returns `None` when no group vertex has a positive weight to
/// any deform bone.
///
/// # Example
///
/// ```
/// use rig_shrink::{collect_deform_bones, find_bone_by_weight};
/// use rig_types::{Bone, Point3, Skeleton, SkinnedMesh, SkinVertex};
///
/// let mesh = SkinnedMesh::new(
///     vec![SkinVertex::from_coords(0.0, 0.0, 0.0)
///         .with_weight("a", 0.3)
///         .with_weight("b", 0.7)],
///     vec![],
/// );
/// let skeleton = Skeleton::new(vec![
///     Bone::new("a", Point3::origin(), Point3::new(0.0, 1.0, 0.0)),
///     Bone::new("b", Point3::origin(), Point3::new(1.0, 0.0, 0.0)),
/// ]);
/// let bones = collect_deform_bones(&skeleton);
///
/// let picked = find_bone_by_weight(&mesh, &[0], &bones);
/// assert_eq!(picked.map(|i| bones[i].name.as_str()), Some("b"));
/// ```
#[must_use]
pub fn find_bone_by_weight(
    mesh: &SkinnedMesh,
    group: &[u32],
    deform_bones: &[DeformBone],
) -> Option<usize> {
    let by_name: HashMap<&str, usize> = deform_bones
        .iter()
        .enumerate()
        .map(|(i, b)| (b.name.as_str(), i))
        .collect();

    let mut max_weight = 0.0;
    let mut best = None;

    for &vertex_idx in group {
        let Some(vertex) = mesh.vertices.get(vertex_idx as usize) else {
            continue;
        };
        for weight in &vertex.weights {
            if weight.weight > max_weight {
                if let Some(&bone_idx) = by_name.get(weight.bone.as_str()) {
                    max_weight = weight.weight;
                    best = Some(bone_idx);
                }
            }
        }
    }

    best
}

/// Pick the bone whose head or tail is nearest to any vertex of the group.
///
/// The distance for a (vertex, bone) pair is the smaller of the distances
/// to the bone's head and tail. Ties keep the first-encountered pair
/// (strict `<` on the running minimum). Returns `None` when
/// `deform_bones` is empty.
#[must_use]
pub fn find_bone_by_nearest(
    mesh: &SkinnedMesh,
    group: &[u32],
    deform_bones: &[DeformBone],
) -> Option<usize> {
    let mut min_distance = f64::INFINITY;
    let mut best = None;

    for &vertex_idx in group {
        let Some(vertex) = mesh.vertices.get(vertex_idx as usize) else {
            continue;
        };
        let world = mesh.transform.to_world(vertex.position);
        for (bone_idx, bone) in deform_bones.iter().enumerate() {
            let head_distance = (world - bone.head).norm();
            let tail_distance = (world - bone.tail).norm();
            let distance = head_distance.min(tail_distance);
            if distance < min_distance {
                min_distance = distance;
                best = Some(bone_idx);
            }
        }
    }

    best
}
