//! The shrink engine.
//!
//! Moves every weighted vertex toward a blend of its per-bone snap
//! targets, collapsing the mesh onto the skeleton. The heavy lifting is
//! per-vertex and embarrassingly parallel; large meshes run through rayon.

use nalgebra::{Point3, Vector3};
use rayon::prelude::*;
use rig_types::{ObjectTransform, SkinnedMesh, Skeleton, SkinVertex};
use tracing::{debug, info};

use crate::bones::{collect_deform_bones, lerp_point, DeformBone};
use crate::error::{ShrinkError, ShrinkResult};
use crate::params::{ShrinkMode, ShrinkParams};
use crate::result::{displacement_metrics, DeformOutput};

/// Vertex counts above this run the per-vertex loop in parallel.
const PARALLEL_THRESHOLD: usize = 1000;

/// Snap-mode weights below this snap to the nearer endpoint instead of
/// projecting onto the axis.
const PROJECTION_WEIGHT: f64 = 0.99;

/// Shrink the mesh toward its skeleton.
///
/// For every vertex with a positive weight to at least one active deform
/// bone, computes a per-bone snap target, blends the targets by weight,
/// and moves the vertex toward the blend (95% of the way when
/// `preserve_volume` is set, all the way otherwise). Vertices with no
/// matched weight keep their exact position.
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
/// use rig_shrink::{shrink_to_bones, ShrinkParams};
/// use rig_types::{Bone, Point3, Skeleton, SkinnedMesh, SkinVertex};
///
/// let mesh = SkinnedMesh::new(
///     vec![SkinVertex::from_coords(0.0, 0.5, 0.1).with_weight("spine", 1.0)],
///     vec![],
/// )
/// .with_shape_target(true);
///
/// // A single childless bone: influenced vertices collapse to its head
/// let skeleton = Skeleton::new(vec![Bone::new(
///     "spine",
///     Point3::origin(),
///     Point3::new(0.0, 1.0, 0.0),
/// )]);
///
/// let params = ShrinkParams::default().with_preserve_volume(false);
/// let output = shrink_to_bones(&mesh, &skeleton, &params).unwrap();
/// let p = output.mesh.vertices[0].position;
/// assert!(p.coords.norm() < 1e-12);
/// ```
pub fn shrink_to_bones(
    mesh: &SkinnedMesh,
    skeleton: &Skeleton,
    params: &ShrinkParams,
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

    let start = std::time::Instant::now();
    info!(
        vertices = mesh.vertex_count(),
        bones = deform_bones.len(),
        mode = ?params.mode,
        "Starting skeletal shrink"
    );

    let indices: Vec<usize> = (0..mesh.vertices.len())
        .filter(|&i| !params.selected_only || mesh.vertices[i].selected)
        .collect();

    let mut result = mesh.clone();

    if indices.len() > PARALLEL_THRESHOLD {
        let new_positions: Vec<(usize, Point3<f64>)> = indices
            .par_iter()
            .filter_map(|&i| {
                shrink_vertex(&mesh.vertices[i], &mesh.transform, &deform_bones, params)
                    .map(|p| (i, p))
            })
            .collect();

        for (i, new_pos) in new_positions {
            result.vertices[i].position = new_pos;
        }
    } else {
        for &i in &indices {
            if let Some(new_pos) =
                shrink_vertex(&mesh.vertices[i], &mesh.transform, &deform_bones, params)
            {
                result.vertices[i].position = new_pos;
            }
        }
    }

    let (vertices_modified, max_displacement) = displacement_metrics(mesh, &result);
    debug!(
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Shrink timing"
    );
    info!(modified = vertices_modified, "Skeletal shrink complete");

    Ok(DeformOutput {
        mesh: result,
        vertices_modified,
        max_displacement,
    })
}

/// Compute the new local-space position for one vertex, or `None` when no
/// deform bone holds a positive weight for it.
fn shrink_vertex(
    vertex: &SkinVertex,
    transform: &ObjectTransform,
    deform_bones: &[DeformBone],
    params: &ShrinkParams,
) -> Option<Point3<f64>> {
    let world = transform.to_world(vertex.position);

    let mut total_weighted = Vector3::zeros();
    let mut total_weight = 0.0;

    for bone in deform_bones {
        let Some(weight) = vertex.weight_for(&bone.name) else {
            continue;
        };
        if weight <= 0.0 {
            continue;
        }

        let snapped = snap_target(world, bone, weight, params.mode);
        total_weighted += snapped.coords * weight;
        total_weight += weight;
    }

    if total_weight > 0.0 {
        let target = Point3::from(total_weighted / total_weight);
        let new_world = lerp_point(world, target, params.blend_factor());
        Some(transform.to_local(new_world))
    } else {
        None
    }
}

/// The snap target a single bone proposes for a world-space position.
fn snap_target(
    world: Point3<f64>,
    bone: &DeformBone,
    weight: f64,
    mode: ShrinkMode,
) -> Point3<f64> {
    // Leaf bones have no span to project onto; they collapse to the head
    if !bone.has_children {
        return bone.head;
    }

    let (dist_to_head_sq, dist_to_tail_sq) = bone.endpoint_distances_sq(world);

    match mode {
        ShrinkMode::Snap => {
            if weight < PROJECTION_WEIGHT {
                if dist_to_head_sq < dist_to_tail_sq {
                    bone.head
                } else {
                    bone.tail
                }
            } else {
                bone.project(world)
            }
        }
        ShrinkMode::Interpolate => {
            let projected = bone.project(world);
            if dist_to_head_sq < dist_to_tail_sq {
                lerp_point(bone.head, projected, weight)
            } else {
                lerp_point(bone.tail, projected, weight)
            }
        }
    }
}
