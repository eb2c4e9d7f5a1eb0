//! Object-to-world transform.

use nalgebra::{Matrix4, Point3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An affine world transform paired with its inverse.
///
/// Operations move vertex positions between local and world space many
/// times; storing the inverse alongside the forward matrix means it is
/// computed exactly once per operation snapshot.
///
/// # Example
///
/// ```
/// use rig_types::ObjectTransform;
/// use nalgebra::{Matrix4, Point3, Vector3};
///
/// let m = Matrix4::new_translation(&Vector3::new(1.0, 0.0, 0.0));
/// let t = ObjectTransform::from_matrix(m).unwrap();
///
/// let world = t.to_world(Point3::origin());
/// assert_eq!(world, Point3::new(1.0, 0.0, 0.0));
/// assert_eq!(t.to_local(world), Point3::origin());
/// ```
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObjectTransform {
    matrix: Matrix4<f64>,
    inverse: Matrix4<f64>,
}

impl Default for ObjectTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl ObjectTransform {
    /// The identity transform (local space equals world space).
    #[must_use]
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
            inverse: Matrix4::identity(),
        }
    }

    /// Build a transform from a 4x4 affine matrix.
    ///
    /// Returns `None` when the matrix is not invertible; a transform
    /// without an inverse cannot round-trip positions and is rejected up
    /// front rather than mid-operation.
    #[must_use]
    pub fn from_matrix(matrix: Matrix4<f64>) -> Option<Self> {
        matrix.try_inverse().map(|inverse| Self { matrix, inverse })
    }

    /// The forward (local-to-world) matrix.
    #[inline]
    #[must_use]
    pub const fn matrix(&self) -> &Matrix4<f64> {
        &self.matrix
    }

    /// The inverse (world-to-local) matrix.
    #[inline]
    #[must_use]
    pub const fn inverse(&self) -> &Matrix4<f64> {
        &self.inverse
    }

    /// Transform a local-space point to world space.
    #[inline]
    #[must_use]
    pub fn to_world(&self, p: Point3<f64>) -> Point3<f64> {
        self.matrix.transform_point(&p)
    }

    /// Transform a world-space point to local space.
    #[inline]
    #[must_use]
    pub fn to_local(&self, p: Point3<f64>) -> Point3<f64> {
        self.inverse.transform_point(&p)
    }
}
