//! Error types for skeletal shrink operations.

use thiserror::Error;

/// Result type alias for shrink operations.
pub type ShrinkResult<T> = Result<T, ShrinkError>;

/// Precondition failures.
///
/// Every entry point validates all of its preconditions before touching a
/// single vertex; on failure the input mesh is untouched. Geometric edge
/// cases inside an operation (a vertex with no matched weight, a mirror
/// lookup with no counterpart, an island with no resolvable bone) are
/// silent per-element no-ops, not errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ShrinkError {
    /// The mesh has no associated skeleton (the skeleton has no bones).
    #[error("no armature is associated with the mesh")]
    NoArmature,

    /// No shrink-target shape is registered on the mesh.
    #[error("no shrink-target shape is registered on the mesh")]
    NoActiveShapeTarget,

    /// The skeleton has no bone that is both deform-enabled and unhidden.
    #[error("no visible deform bones in the skeleton")]
    NoVisibleDeformBones,

    /// The selection contains faces; align-to-bone accepts edges only.
    #[error("selection contains faces, select only edges")]
    InvalidSelection,
}
