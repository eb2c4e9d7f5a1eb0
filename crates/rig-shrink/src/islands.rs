//! Connectivity analysis over the selected edge set.
//!
//! Two partitions of the same selection, both plain connected-components
//! computations with an explicit work stack (no recursion, so mesh size
//! never hits a stack limit):
//!
//! - [`vertex_islands`] groups vertices linked by selected edges.
//! - [`edge_loops`] groups selected edges linked by shared vertices.

use hashbrown::HashMap;
use rig_types::SkinnedMesh;

/// Partition `seed_vertices` into islands: maximal sets of vertices
/// connected through the edges listed in `selected_edges` (indices into
/// `mesh.edges`).
///
/// Every seed vertex lands in exactly one island; a seed with no selected
/// incident edge forms a singleton island. Vertices reached through a
/// selected edge are absorbed into the island even when they are not
/// seeds. Islands are emitted in ascending order of their first-visited
/// vertex; member order within an island is traversal order and carries no
/// meaning.
///
/// # Example
///
/// ```
/// use rig_shrink::vertex_islands;
/// use rig_types::{MeshEdge, SkinnedMesh, SkinVertex};
///
/// let mesh = SkinnedMesh::new(
///     vec![
///         SkinVertex::from_coords(0.0, 0.0, 0.0),
///         SkinVertex::from_coords(1.0, 0.0, 0.0),
///         SkinVertex::from_coords(5.0, 0.0, 0.0),
///     ],
///     vec![MeshEdge::selected(0, 1)],
/// );
///
/// let islands = vertex_islands(&mesh, &[0], &[0, 1, 2]);
/// assert_eq!(islands.len(), 2); // {0, 1} and the isolated {2}
/// ```
#[must_use]
pub fn vertex_islands(
    mesh: &SkinnedMesh,
    selected_edges: &[usize],
    seed_vertices: &[u32],
) -> Vec<Vec<u32>> {
    // Adjacency restricted to the selected edge set
    let mut adjacent: HashMap<u32, Vec<u32>> = HashMap::new();
    for &edge_idx in selected_edges {
        let Some(edge) = mesh.edges.get(edge_idx) else {
            continue;
        };
        let (a, b) = edge.endpoints();
        adjacent.entry(a).or_default().push(b);
        adjacent.entry(b).or_default().push(a);
    }

    let mut visited = vec![false; mesh.vertex_count()];
    let mut islands = Vec::new();

    for &seed in seed_vertices {
        if visited.get(seed as usize).copied().unwrap_or(true) {
            continue;
        }

        let mut island = Vec::new();
        let mut stack = vec![seed];
        visited[seed as usize] = true;

        while let Some(vertex) = stack.pop() {
            island.push(vertex);
            let Some(neighbors) = adjacent.get(&vertex) else {
                continue;
            };
            for &other in neighbors {
                if let Some(flag) = visited.get_mut(other as usize) {
                    if !*flag {
                        *flag = true;
                        stack.push(other);
                    }
                }
            }
        }

        islands.push(island);
    }

    islands
}

/// Partition the edges listed in `selected_edges` into loop groups:
/// maximal sets of edges connected transitively through shared vertices.
///
/// Returns groups of indices into `mesh.edges`; every input edge appears
/// in exactly one group.
///
/// # Example
///
/// ```
/// use rig_shrink::edge_loops;
/// use rig_types::{MeshEdge, SkinnedMesh, SkinVertex};
///
/// let verts = (0..6)
///     .map(|i| SkinVertex::from_coords(f64::from(i), 0.0, 0.0))
///     .collect();
/// let mesh = SkinnedMesh::new(
///     verts,
///     vec![
///         MeshEdge::selected(0, 1),
///         MeshEdge::selected(1, 2),
///         MeshEdge::selected(4, 5),
///     ],
/// );
///
/// let loops = edge_loops(&mesh, &[0, 1, 2]);
/// assert_eq!(loops.len(), 2); // {0, 1} chain and the lone {2}
/// ```
#[must_use]
pub fn edge_loops(mesh: &SkinnedMesh, selected_edges: &[usize]) -> Vec<Vec<usize>> {
    // Vertex -> incident selected edges
    let mut incident: HashMap<u32, Vec<usize>> = HashMap::new();
    for &edge_idx in selected_edges {
        let Some(edge) = mesh.edges.get(edge_idx) else {
            continue;
        };
        let (a, b) = edge.endpoints();
        incident.entry(a).or_default().push(edge_idx);
        incident.entry(b).or_default().push(edge_idx);
    }

    let mut visited = vec![false; mesh.edge_count()];
    let mut groups = Vec::new();

    for &seed in selected_edges {
        if visited.get(seed).copied().unwrap_or(true) {
            continue;
        }

        let mut group = Vec::new();
        let mut stack = vec![seed];
        visited[seed] = true;

        while let Some(edge_idx) = stack.pop() {
            group.push(edge_idx);
            let (a, b) = mesh.edges[edge_idx].endpoints();
            for vertex in [a, b] {
                let Some(edges) = incident.get(&vertex) else {
                    continue;
                };
                for &other in edges {
                    if !visited[other] {
                        visited[other] = true;
                        stack.push(other);
                    }
                }
            }
        }

        groups.push(group);
    }

    groups
}

/// The distinct vertices touched by a group of edges, in first-seen order.
#[must_use]
pub fn group_vertices(mesh: &SkinnedMesh, edge_group: &[usize]) -> Vec<u32> {
    let mut seen = vec![false; mesh.vertex_count()];
    let mut vertices = Vec::new();
    for &edge_idx in edge_group {
        let Some(edge) = mesh.edges.get(edge_idx) else {
            continue;
        };
        let (a, b) = edge.endpoints();
        for vertex in [a, b] {
            if let Some(flag) = seen.get_mut(vertex as usize) {
                if !*flag {
                    *flag = true;
                    vertices.push(vertex);
                }
            }
        }
    }
    vertices
}
