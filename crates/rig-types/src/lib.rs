//! Core types for skinned-mesh and skeleton processing.
//!
//! This crate provides the foundational types shared by the rig toolkit:
//!
//! - [`SkinVertex`] - A mesh vertex with per-bone weights and a selection flag
//! - [`MeshEdge`] - An unordered pair of vertex indices
//! - [`SkinnedMesh`] - The mesh snapshot handed over by the host
//! - [`Bone`] / [`Skeleton`] - The bone hierarchy in a single static pose
//! - [`ObjectTransform`] - An affine world transform with cached inverse
//!
//! # Host-agnostic
//!
//! Nothing here touches a scene graph or file format. The host extracts a
//! snapshot (vertex positions, weights, selection flags, bone rest
//! positions, world transforms), the operations in `rig-shrink` transform
//! it, and the host writes the resulting positions back.
//!
//! # Units and spaces
//!
//! All coordinates are `f64`. Vertex positions are mesh-local; bone
//! head/tail positions are armature-local; each carries its own
//! [`ObjectTransform`] into world space.
//!
//! # Example
//!
//! ```
//! use rig_types::{Bone, MeshEdge, Point3, Skeleton, SkinnedMesh, SkinVertex};
//!
//! let mesh = SkinnedMesh::new(
//!     vec![SkinVertex::from_coords(0.0, 0.5, 0.1).with_weight("spine", 1.0)],
//!     vec![],
//! );
//! let skeleton = Skeleton::new(vec![Bone::new(
//!     "spine",
//!     Point3::origin(),
//!     Point3::new(0.0, 1.0, 0.0),
//! )]);
//!
//! assert_eq!(mesh.vertex_count(), 1);
//! assert_eq!(skeleton.bone_count(), 1);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod bone;
mod edge;
mod mesh;
mod skeleton;
mod transform;
mod vertex;

pub use bone::Bone;
pub use edge::MeshEdge;
pub use mesh::SkinnedMesh;
pub use skeleton::Skeleton;
pub use transform::ObjectTransform;
pub use vertex::{BoneWeight, SkinVertex};

// Re-export nalgebra types for convenience
pub use nalgebra::{Matrix4, Point3, Vector3};
