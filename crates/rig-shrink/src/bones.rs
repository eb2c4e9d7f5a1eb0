//! Deform-bone extraction.
//!
//! Operations never look at the raw [`Skeleton`]: they take a snapshot of
//! the bones that actually deform the mesh, with head and tail already in
//! world space and the axis precomputed.

use nalgebra::{Point3, Vector3};
use rig_types::Skeleton;

/// A deform-enabled, visible bone with world-space geometry.
#[derive(Debug, Clone)]
pub struct DeformBone {
    /// Bone name, used to match vertex-group weights.
    pub name: String,

    /// Head position in world space.
    pub head: Point3<f64>,

    /// Tail position in world space.
    pub tail: Point3<f64>,

    /// `tail - head`.
    pub axis: Vector3<f64>,

    /// Whether the bone has child bones. Childless bones collapse
    /// influenced vertices to their head.
    pub has_children: bool,
}

impl DeformBone {
    /// Project a world-space point onto the bone's head-anchored axis
    /// line.
    ///
    /// A zero-length axis (head and tail coincide) collapses the
    /// projection to the head.
    #[must_use]
    pub fn project(&self, point: Point3<f64>) -> Point3<f64> {
        let axis_sq = self.axis.norm_squared();
        if axis_sq <= f64::EPSILON {
            return self.head;
        }
        let to_point = point - self.head;
        self.head + self.axis * (to_point.dot(&self.axis) / axis_sq)
    }

    /// Squared world distances from `point` to the head and to the tail.
    #[must_use]
    pub fn endpoint_distances_sq(&self, point: Point3<f64>) -> (f64, f64) {
        (
            (point - self.head).norm_squared(),
            (point - self.tail).norm_squared(),
        )
    }
}

/// Linear interpolation between two points: `a + (b - a) * t`.
#[inline]
#[must_use]
pub(crate) fn lerp_point(a: Point3<f64>, b: Point3<f64>, t: f64) -> Point3<f64> {
    a + (b - a) * t
}

/// Extract every active deform bone (deform-enabled and unhidden), in
/// skeleton storage order, with the armature world transform applied.
///
/// An empty result is not an error here; entry points map it to
/// [`ShrinkError::NoVisibleDeformBones`](crate::ShrinkError::NoVisibleDeformBones)
/// before mutating anything.
///
/// # Example
///
/// ```
/// use rig_shrink::collect_deform_bones;
/// use rig_types::{Bone, Point3, Skeleton};
///
/// let skeleton = Skeleton::new(vec![
///     Bone::new("spine", Point3::origin(), Point3::new(0.0, 1.0, 0.0)),
///     Bone::new("helper", Point3::origin(), Point3::new(1.0, 0.0, 0.0)).with_use_deform(false),
/// ]);
///
/// let bones = collect_deform_bones(&skeleton);
/// assert_eq!(bones.len(), 1);
/// assert_eq!(bones[0].name, "spine");
/// ```
#[must_use]
pub fn collect_deform_bones(skeleton: &Skeleton) -> Vec<DeformBone> {
    skeleton
        .active_deform_bones()
        .map(|bone| {
            let head = skeleton.transform.to_world(bone.head);
            let tail = skeleton.transform.to_world(bone.tail);
            DeformBone {
                name: bone.name.clone(),
                head,
                tail,
                axis: tail - head,
                has_children: bone.has_children,
            }
        })
        .collect()
}
