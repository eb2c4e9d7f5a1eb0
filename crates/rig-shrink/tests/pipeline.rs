//! End-to-end property tests for the shrink toolkit.
//!
//! Each module exercises one contract from the outside: the shrink
//! engine's weight semantics, the connectivity partitions, mirror
//! resolution, bone selection, and the full operate-on-a-rig scenarios a
//! host would run.

// Allow test-specific patterns
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use approx::assert_relative_eq;
use rig_shrink::{
    align_to_bone, collect_deform_bones, edge_loops, find_bone_by_weight, mirror_vertices,
    shrink_to_bones, snap_to_bone, vertex_islands, BoneStrategy, ShrinkError, ShrinkMode,
    ShrinkParams, SnapParams,
};
use rig_types::{Bone, MeshEdge, Point3, Skeleton, SkinnedMesh, SkinVertex};

/// One childless bone from the origin up the Y axis.
fn leaf_bone_skeleton() -> Skeleton {
    Skeleton::new(vec![Bone::new(
        "spine",
        Point3::origin(),
        Point3::new(0.0, 1.0, 0.0),
    )])
}

/// The same bone but with a child attached, so the axis spans.
fn spanning_skeleton() -> Skeleton {
    Skeleton::from_parented(vec![
        (
            Bone::new("spine", Point3::origin(), Point3::new(0.0, 1.0, 0.0)),
            None,
        ),
        (
            Bone::new("head", Point3::new(0.0, 1.0, 0.0), Point3::new(0.0, 1.4, 0.0)),
            Some("spine".to_string()),
        ),
    ])
}

mod shrink_engine {
    use super::*;

    #[test]
    fn end_to_end_leaf_collapse() {
        // Single vertex fully weighted to a childless bone: snap mode with
        // full blend lands exactly on the bone head
        let mesh = SkinnedMesh::new(
            vec![SkinVertex::from_coords(0.0, 0.5, 0.1).with_weight("spine", 1.0)],
            vec![],
        )
        .with_shape_target(true);

        let params = ShrinkParams::default().with_preserve_volume(false);
        let output = shrink_to_bones(&mesh, &leaf_bone_skeleton(), &params).unwrap();

        let p = output.mesh.vertices[0].position;
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn volume_preservation_leaves_five_percent() {
        let mesh = SkinnedMesh::new(
            vec![SkinVertex::from_coords(0.0, 0.5, 0.1).with_weight("spine", 1.0)],
            vec![],
        )
        .with_shape_target(true);

        let output =
            shrink_to_bones(&mesh, &leaf_bone_skeleton(), &ShrinkParams::default()).unwrap();

        let p = output.mesh.vertices[0].position;
        assert_relative_eq!(p.y, 0.5 * 0.05, epsilon = 1e-12);
        assert_relative_eq!(p.z, 0.1 * 0.05, epsilon = 1e-12);
    }

    #[test]
    fn unweighted_vertices_identical_across_modes() {
        let mesh = SkinnedMesh::new(
            vec![
                SkinVertex::from_coords(0.0, 0.5, 0.1).with_weight("spine", 1.0),
                SkinVertex::from_coords(3.0, -2.0, 7.0),
                SkinVertex::from_coords(0.25, 0.75, -0.5).with_weight("unbound", 0.8),
            ],
            vec![],
        )
        .with_shape_target(true);

        for mode in [ShrinkMode::Snap, ShrinkMode::Interpolate] {
            let params = ShrinkParams::default().with_mode(mode);
            let output = shrink_to_bones(&mesh, &spanning_skeleton(), &params).unwrap();

            assert_eq!(output.mesh.vertices[1].position, mesh.vertices[1].position);
            assert_eq!(output.mesh.vertices[2].position, mesh.vertices[2].position);
            assert_eq!(output.vertices_modified, 1);
        }
    }

    #[test]
    fn snap_threshold_is_exact() {
        // 0.98 picks an endpoint, 0.99 projects; the weighted average
        // then differs between the two
        let vertex_at = |w: f64| {
            SkinnedMesh::new(
                vec![SkinVertex::from_coords(0.4, 0.3, 0.0).with_weight("spine", w)],
                vec![],
            )
            .with_shape_target(true)
        };
        let params = ShrinkParams::default().with_preserve_volume(false);

        let below = shrink_to_bones(&vertex_at(0.98), &spanning_skeleton(), &params).unwrap();
        // Endpoint snap: target is the head (nearer endpoint)
        assert_relative_eq!(below.mesh.vertices[0].position.y, 0.0, epsilon = 1e-12);

        let at = shrink_to_bones(&vertex_at(0.99), &spanning_skeleton(), &params).unwrap();
        // Projection keeps the height
        assert_relative_eq!(at.mesh.vertices[0].position.y, 0.3, epsilon = 1e-12);
        assert_relative_eq!(at.mesh.vertices[0].position.x, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn interpolate_approaches_projection_with_weight() {
        let vertex_at = |w: f64| {
            SkinnedMesh::new(
                vec![SkinVertex::from_coords(0.4, 0.3, 0.0).with_weight("spine", w)],
                vec![],
            )
            .with_shape_target(true)
        };
        let skeleton = spanning_skeleton();

        // Distance from the target to the full projection shrinks as the
        // weight grows
        let mut previous = f64::INFINITY;
        for w in [0.2, 0.5, 0.8, 0.999] {
            let params = ShrinkParams::default()
                .with_mode(ShrinkMode::Interpolate)
                .with_preserve_volume(false);
            let output = shrink_to_bones(&vertex_at(w), &skeleton, &params).unwrap();
            let p = output.mesh.vertices[0].position;
            let gap = (p - Point3::new(0.0, 0.3, 0.0)).norm();
            assert!(gap < previous, "gap should shrink as weight grows");
            previous = gap;
        }
    }

    #[test]
    fn all_preconditions_fire_before_mutation() {
        let mesh = SkinnedMesh::new(
            vec![SkinVertex::from_coords(0.0, 0.5, 0.0).with_weight("spine", 1.0)],
            vec![],
        );

        // No shape target
        let result = shrink_to_bones(&mesh, &leaf_bone_skeleton(), &ShrinkParams::default());
        assert!(matches!(result, Err(ShrinkError::NoActiveShapeTarget)));

        // No armature
        let mesh = mesh.with_shape_target(true);
        let result = shrink_to_bones(&mesh, &Skeleton::default(), &ShrinkParams::default());
        assert!(matches!(result, Err(ShrinkError::NoArmature)));

        // All bones hidden
        let hidden = Skeleton::new(vec![Bone::new(
            "spine",
            Point3::origin(),
            Point3::new(0.0, 1.0, 0.0),
        )
        .with_hidden(true)]);
        let result = shrink_to_bones(&mesh, &hidden, &ShrinkParams::default());
        assert!(matches!(result, Err(ShrinkError::NoVisibleDeformBones)));
    }
}

mod connectivity {
    use super::*;

    #[test]
    fn islands_partition_shape() {
        // Two disjoint triangles plus one isolated selected vertex
        let vertices: Vec<SkinVertex> = (0..7)
            .map(|i| SkinVertex::from_coords(f64::from(i), 0.0, 0.0).with_selected(true))
            .collect();
        let edges = vec![
            MeshEdge::selected(0, 1),
            MeshEdge::selected(1, 2),
            MeshEdge::selected(2, 0),
            MeshEdge::selected(3, 4),
            MeshEdge::selected(4, 5),
            MeshEdge::selected(5, 3),
        ];
        let mesh = SkinnedMesh::new(vertices, edges);

        let islands = vertex_islands(
            &mesh,
            &mesh.selected_edges(),
            &mesh.selected_vertices(),
        );

        assert_eq!(islands.len(), 3);
        let mut sizes: Vec<usize> = islands.iter().map(Vec::len).collect();
        sizes.sort_unstable();
        assert_eq!(sizes, vec![1, 3, 3]);
    }

    #[test]
    fn edge_loop_partition_shape() {
        // A closed 4-edge loop is one group
        let vertices: Vec<SkinVertex> = (0..4)
            .map(|i| SkinVertex::from_coords(f64::from(i), 0.0, 0.0))
            .collect();
        let edges = vec![
            MeshEdge::selected(0, 1),
            MeshEdge::selected(1, 2),
            MeshEdge::selected(2, 3),
            MeshEdge::selected(3, 0),
        ];
        let mesh = SkinnedMesh::new(vertices, edges);

        let loops = edge_loops(&mesh, &mesh.selected_edges());
        assert_eq!(loops.len(), 1);
        assert_eq!(loops[0].len(), 4);
    }

    #[test]
    fn disconnected_chains_split() {
        let vertices: Vec<SkinVertex> = (0..6)
            .map(|i| SkinVertex::from_coords(f64::from(i), 0.0, 0.0))
            .collect();
        let edges = vec![
            MeshEdge::selected(0, 1),
            MeshEdge::selected(1, 2),
            MeshEdge::selected(3, 4),
            MeshEdge::selected(4, 5),
        ];
        let mesh = SkinnedMesh::new(vertices, edges);

        let loops = edge_loops(&mesh, &mesh.selected_edges());
        assert_eq!(loops.len(), 2);
    }
}

mod symmetry {
    use super::*;

    #[test]
    fn counterpart_resolves() {
        let mesh = SkinnedMesh::new(
            vec![
                SkinVertex::from_coords(1.0, 0.0, 0.0).with_selected(true),
                SkinVertex::from_coords(-1.0, 0.0, 0.0),
            ],
            vec![],
        );

        let mut selection = mesh.selected_vertices();
        selection.extend(mirror_vertices(&mesh, &selection));
        selection.sort_unstable();
        assert_eq!(selection, vec![0, 1]);
    }

    #[test]
    fn out_of_tolerance_is_ignored() {
        let mesh = SkinnedMesh::new(
            vec![
                SkinVertex::from_coords(1.0, 0.0, 0.0).with_selected(true),
                SkinVertex::from_coords(-1.001, 0.0, 0.0),
            ],
            vec![],
        );

        assert!(mirror_vertices(&mesh, &mesh.selected_vertices()).is_empty());
    }
}

mod bone_selection {
    use super::*;

    #[test]
    fn weight_majority_wins() {
        let skeleton = Skeleton::new(vec![
            Bone::new("a", Point3::origin(), Point3::new(0.0, 1.0, 0.0)),
            Bone::new("b", Point3::new(2.0, 0.0, 0.0), Point3::new(2.0, 1.0, 0.0)),
        ]);
        let bones = collect_deform_bones(&skeleton);

        let mesh = SkinnedMesh::new(
            vec![SkinVertex::from_coords(0.0, 0.0, 0.0)
                .with_weight("a", 0.3)
                .with_weight("b", 0.7)],
            vec![],
        );

        let picked = find_bone_by_weight(&mesh, &[0], &bones);
        assert_eq!(picked.map(|i| bones[i].name.as_str()), Some("b"));
    }

    #[test]
    fn empty_deform_list_selects_nothing() {
        let mesh = SkinnedMesh::new(
            vec![SkinVertex::from_coords(0.0, 0.0, 0.0).with_weight("a", 1.0)],
            vec![],
        );
        assert_eq!(find_bone_by_weight(&mesh, &[0], &[]), None);
    }
}

mod host_scenarios {
    use super::*;

    /// A two-segment arm: shoulder-to-elbow and elbow-to-wrist, with a
    /// ring of vertices around each segment.
    fn arm() -> (SkinnedMesh, Skeleton) {
        let skeleton = Skeleton::from_parented(vec![
            (
                Bone::new("upper", Point3::origin(), Point3::new(0.0, 1.0, 0.0)),
                None,
            ),
            (
                Bone::new("fore", Point3::new(0.0, 1.0, 0.0), Point3::new(0.0, 2.0, 0.0)),
                Some("upper".to_string()),
            ),
        ]);

        let mut vertices = Vec::new();
        // Ring around the upper segment
        for (x, z) in [(0.3, 0.0), (0.0, 0.3), (-0.3, 0.0), (0.0, -0.3)] {
            vertices.push(
                SkinVertex::from_coords(x, 0.5, z)
                    .with_weight("upper", 1.0)
                    .with_selected(true),
            );
        }
        // Ring around the forearm
        for (x, z) in [(0.25, 0.0), (0.0, 0.25), (-0.25, 0.0), (0.0, -0.25)] {
            vertices.push(
                SkinVertex::from_coords(x, 1.5, z)
                    .with_weight("fore", 1.0)
                    .with_selected(true),
            );
        }

        let edges = vec![
            MeshEdge::selected(0, 1),
            MeshEdge::selected(1, 2),
            MeshEdge::selected(2, 3),
            MeshEdge::selected(3, 0),
            MeshEdge::selected(4, 5),
            MeshEdge::selected(5, 6),
            MeshEdge::selected(6, 7),
            MeshEdge::selected(7, 4),
        ];

        let mesh = SkinnedMesh::new(vertices, edges).with_shape_target(true);
        (mesh, skeleton)
    }

    #[test]
    fn shrink_pulls_rings_onto_the_chain() {
        let (mesh, skeleton) = arm();

        // "upper" has a child, so full weights project onto its axis;
        // "fore" is a leaf and collapses to its head (the elbow)
        let params = ShrinkParams::default().with_preserve_volume(false);
        let output = shrink_to_bones(&mesh, &skeleton, &params).unwrap();

        for vertex in &output.mesh.vertices[..4] {
            assert_relative_eq!(vertex.position.x, 0.0, epsilon = 1e-12);
            assert_relative_eq!(vertex.position.z, 0.0, epsilon = 1e-12);
            assert_relative_eq!(vertex.position.y, 0.5, epsilon = 1e-12);
        }
        for vertex in &output.mesh.vertices[4..] {
            assert_relative_eq!(vertex.position.y, 1.0, epsilon = 1e-12);
            assert_relative_eq!(vertex.position.x, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn snap_resolves_one_bone_per_ring() {
        let (mesh, skeleton) = arm();

        let params = SnapParams::default().with_strategy(BoneStrategy::ByWeight);
        let output = snap_to_bone(&mesh, &skeleton, &params).unwrap();

        assert_eq!(output.vertices_modified, 8);
        // Each ring moved toward its own bone's axis (x shrinks by 95%)
        assert_relative_eq!(output.mesh.vertices[0].position.x, 0.3 * 0.05, epsilon = 1e-12);
        assert_relative_eq!(output.mesh.vertices[4].position.x, 0.25 * 0.05, epsilon = 1e-12);
    }

    #[test]
    fn align_levels_each_ring() {
        let (mut mesh, skeleton) = arm();
        // Disturb the ring heights
        mesh.vertices[0].position.y = 0.4;
        mesh.vertices[2].position.y = 0.6;

        let output = align_to_bone(&mesh, &skeleton).unwrap();

        // The upper ring now shares a single height: (0.4+0.5+0.6+0.5)/4
        for vertex in &output.mesh.vertices[..4] {
            assert_relative_eq!(vertex.position.y, 0.5, epsilon = 1e-12);
        }
    }

    #[test]
    fn align_rejects_face_selections() {
        let (mesh, skeleton) = arm();
        let mesh = mesh.with_face_selection_count(2);
        assert!(matches!(
            align_to_bone(&mesh, &skeleton),
            Err(ShrinkError::InvalidSelection)
        ));
    }

    #[test]
    fn operations_leave_input_untouched() {
        let (mesh, skeleton) = arm();
        let before: Vec<_> = mesh.vertices.iter().map(|v| v.position).collect();

        let _ = shrink_to_bones(&mesh, &skeleton, &ShrinkParams::default()).unwrap();
        let _ = snap_to_bone(&mesh, &skeleton, &SnapParams::default()).unwrap();
        let _ = align_to_bone(&mesh, &skeleton).unwrap();

        let after: Vec<_> = mesh.vertices.iter().map(|v| v.position).collect();
        assert_eq!(before, after);
    }
}
