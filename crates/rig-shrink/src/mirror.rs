//! X-mirror selection extension.
//!
//! When the host has X-mirror editing enabled, a selection on one side of
//! the mesh implies the matching selection on the other side. The match is
//! spatial: a vertex's counterpart is the nearest mesh vertex to its
//! X-negated position, accepted only within a fixed tolerance. Misses are
//! silent; an asymmetric mesh simply contributes no extensions.
//!
//! Lookups run in mesh-local space, the space the mirror relation is
//! defined in.

use hashbrown::HashMap;
use kiddo::{KdTree, SquaredEuclidean};
use rig_types::SkinnedMesh;

/// Maximum distance between a mirrored coordinate and an actual vertex for
/// the pair to count as symmetric counterparts.
pub const MIRROR_TOLERANCE: f64 = 1e-4;

/// Build a KD-tree over every vertex position in the mesh.
fn build_index(mesh: &SkinnedMesh) -> KdTree<f64, 3> {
    let mut tree: KdTree<f64, 3> = KdTree::new();
    for (i, vertex) in mesh.vertices.iter().enumerate() {
        let p = &vertex.position;
        tree.add(&[p.x, p.y, p.z], i as u64);
    }
    tree
}

/// Nearest vertex to the X-mirror of vertex `index`, within tolerance.
fn mirror_match(mesh: &SkinnedMesh, tree: &KdTree<f64, 3>, index: u32) -> Option<u32> {
    let p = &mesh.vertices.get(index as usize)?.position;
    let query = [-p.x, p.y, p.z];
    let nearest = tree.nearest_one::<SquaredEuclidean>(&query);
    if nearest.distance < MIRROR_TOLERANCE * MIRROR_TOLERANCE {
        #[allow(clippy::cast_possible_truncation)]
        Some(nearest.item as u32)
    } else {
        None
    }
}

/// Find the mirror counterparts of `selection` that are not already in it.
///
/// Returns the vertex indices to append. A selected vertex whose mirrored
/// position matches no vertex within [`MIRROR_TOLERANCE`] contributes
/// nothing.
///
/// # Example
///
/// ```
/// use rig_shrink::mirror_vertices;
/// use rig_types::{SkinnedMesh, SkinVertex};
///
/// let mesh = SkinnedMesh::new(
///     vec![
///         SkinVertex::from_coords(1.0, 0.0, 0.0),
///         SkinVertex::from_coords(-1.0, 0.0, 0.0),
///     ],
///     vec![],
/// );
///
/// assert_eq!(mirror_vertices(&mesh, &[0]), vec![1]);
/// ```
#[must_use]
pub fn mirror_vertices(mesh: &SkinnedMesh, selection: &[u32]) -> Vec<u32> {
    if selection.is_empty() {
        return Vec::new();
    }

    let tree = build_index(mesh);

    let mut in_selection = vec![false; mesh.vertex_count()];
    for &v in selection {
        if let Some(flag) = in_selection.get_mut(v as usize) {
            *flag = true;
        }
    }

    let mut additions = Vec::new();
    for &v in selection {
        let Some(counterpart) = mirror_match(mesh, &tree, v) else {
            continue;
        };
        if let Some(flag) = in_selection.get_mut(counterpart as usize) {
            if !*flag {
                *flag = true;
                additions.push(counterpart);
            }
        }
    }
    additions
}

/// Find the mirror counterparts of the edges in `selection` (indices into
/// `mesh.edges`) that are not already in it.
///
/// An edge is extended only when both endpoints resolve to mirrored
/// vertices within tolerance and the mesh actually contains an edge
/// between the two counterparts.
///
/// # Example
///
/// ```
/// use rig_shrink::mirror_edges;
/// use rig_types::{MeshEdge, SkinnedMesh, SkinVertex};
///
/// let mesh = SkinnedMesh::new(
///     vec![
///         SkinVertex::from_coords(1.0, 0.0, 0.0),
///         SkinVertex::from_coords(1.0, 1.0, 0.0),
///         SkinVertex::from_coords(-1.0, 0.0, 0.0),
///         SkinVertex::from_coords(-1.0, 1.0, 0.0),
///     ],
///     vec![MeshEdge::selected(0, 1), MeshEdge::new(2, 3)],
/// );
///
/// assert_eq!(mirror_edges(&mesh, &[0]), vec![1]);
/// ```
#[must_use]
pub fn mirror_edges(mesh: &SkinnedMesh, selection: &[usize]) -> Vec<usize> {
    if selection.is_empty() {
        return Vec::new();
    }

    let tree = build_index(mesh);

    let mut edge_lookup: HashMap<(u32, u32), usize> = HashMap::new();
    for (i, edge) in mesh.edges.iter().enumerate() {
        edge_lookup.insert(edge.endpoints(), i);
    }

    let mut in_selection = vec![false; mesh.edge_count()];
    for &e in selection {
        if let Some(flag) = in_selection.get_mut(e) {
            *flag = true;
        }
    }

    let mut additions = Vec::new();
    for &e in selection {
        let Some(edge) = mesh.edges.get(e) else {
            continue;
        };
        let (a, b) = edge.endpoints();
        let (Some(ma), Some(mb)) = (mirror_match(mesh, &tree, a), mirror_match(mesh, &tree, b))
        else {
            continue;
        };
        let key = if ma <= mb { (ma, mb) } else { (mb, ma) };
        let Some(&mirrored) = edge_lookup.get(&key) else {
            continue;
        };
        if let Some(flag) = in_selection.get_mut(mirrored) {
            if !*flag {
                *flag = true;
                additions.push(mirrored);
            }
        }
    }
    additions
}
