//! Shrink a skinned mesh toward its skeleton, plus snap and align cleanup
//! tools.
//!
//! The main use is generating corrective shape keys: starting from a mesh
//! bound to an armature through vertex groups, [`shrink_to_bones`] pulls
//! every weighted vertex toward a blend of its bones' axes. Two secondary
//! tools clean up selections against single bones: [`snap_to_bone`]
//! projects whole vertex islands onto one bone's axis, and
//! [`align_to_bone`] flattens edge loops onto a plane perpendicular to
//! their bone.
//!
//! Everything operates on plain data snapshots from `rig-types`; the host
//! extracts the snapshot, calls one operation, and writes the returned
//! positions back. Bones are evaluated in a single static pose — this is a
//! one-shot batch transform, not an animation system.
//!
//! # Quick Start
//!
//! ```
//! use rig_shrink::{shrink_to_bones, ShrinkParams};
//! use rig_types::{Bone, Point3, Skeleton, SkinnedMesh, SkinVertex};
//!
//! // One vertex fully weighted to one childless bone
//! let mesh = SkinnedMesh::new(
//!     vec![SkinVertex::from_coords(0.0, 0.5, 0.1).with_weight("spine", 1.0)],
//!     vec![],
//! )
//! .with_shape_target(true);
//! let skeleton = Skeleton::new(vec![Bone::new(
//!     "spine",
//!     Point3::origin(),
//!     Point3::new(0.0, 1.0, 0.0),
//! )]);
//!
//! let params = ShrinkParams::default().with_preserve_volume(false);
//! let output = shrink_to_bones(&mesh, &skeleton, &params).unwrap();
//!
//! // Childless bones collapse their vertices to the head
//! assert!(output.mesh.vertices[0].position.coords.norm() < 1e-12);
//! ```
//!
//! # Blending modes
//!
//! | Mode | Low weight | High weight |
//! |------|-----------|-------------|
//! | [`ShrinkMode::Snap`] | nearer bone endpoint | axis projection (from 0.99) |
//! | [`ShrinkMode::Interpolate`] | toward nearer endpoint | toward axis projection |
//!
//! # Failure model
//!
//! Every entry point checks its preconditions before touching a vertex and
//! returns a [`ShrinkError`] with the input untouched. Per-element dead
//! ends — a vertex with no matched weight, a mirror lookup with no
//! counterpart, an island with no resolvable bone — are silent no-ops for
//! that element only.

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod align;
mod bones;
mod error;
mod islands;
mod mirror;
mod params;
mod result;
mod select;
mod shrink;
mod snap;

pub use align::align_to_bone;
pub use bones::{collect_deform_bones, DeformBone};
pub use error::{ShrinkError, ShrinkResult};
pub use islands::{edge_loops, group_vertices, vertex_islands};
pub use mirror::{mirror_edges, mirror_vertices, MIRROR_TOLERANCE};
pub use params::{BoneStrategy, ShrinkMode, ShrinkParams, SnapParams};
pub use result::DeformOutput;
pub use select::{find_bone_by_nearest, find_bone_by_weight};
pub use shrink::shrink_to_bones;
pub use snap::snap_to_bone;
