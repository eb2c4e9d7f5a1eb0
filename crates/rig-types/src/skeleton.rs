//! Skeleton (armature) type.

use crate::{Bone, ObjectTransform};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A bone hierarchy in a single static rest pose, with its world transform.
///
/// Bones are stored in host order; operations that iterate bones do so in
/// this order, which makes weighted accumulation and tie-breaks
/// deterministic.
///
/// # Example
///
/// ```
/// use rig_types::{Bone, Point3, Skeleton};
///
/// let skeleton = Skeleton::new(vec![
///     Bone::new("spine", Point3::origin(), Point3::new(0.0, 1.0, 0.0)),
/// ]);
/// assert_eq!(skeleton.bone_count(), 1);
/// assert!(skeleton.bone("spine").is_some());
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Skeleton {
    /// Bones in host order.
    pub bones: Vec<Bone>,

    /// The armature's world transform.
    pub transform: ObjectTransform,
}

impl Skeleton {
    /// Create a skeleton with the identity world transform.
    #[inline]
    #[must_use]
    pub fn new(bones: Vec<Bone>) -> Self {
        Self {
            bones,
            transform: ObjectTransform::identity(),
        }
    }

    /// Set the world transform (builder style).
    #[must_use]
    pub const fn with_transform(mut self, transform: ObjectTransform) -> Self {
        self.transform = transform;
        self
    }

    /// Build a skeleton from `(bone, parent_name)` pairs, deriving each
    /// bone's `has_children` flag from the parent links.
    ///
    /// A parent name that matches no bone is ignored.
    ///
    /// # Example
    ///
    /// ```
    /// use rig_types::{Bone, Point3, Skeleton};
    ///
    /// let skeleton = Skeleton::from_parented(vec![
    ///     (
    ///         Bone::new("spine", Point3::origin(), Point3::new(0.0, 1.0, 0.0)),
    ///         None,
    ///     ),
    ///     (
    ///         Bone::new("head", Point3::new(0.0, 1.0, 0.0), Point3::new(0.0, 1.5, 0.0)),
    ///         Some("spine".to_string()),
    ///     ),
    /// ]);
    ///
    /// assert!(skeleton.bone("spine").is_some_and(|b| b.has_children));
    /// assert!(skeleton.bone("head").is_some_and(|b| !b.has_children));
    /// ```
    #[must_use]
    pub fn from_parented(entries: Vec<(Bone, Option<String>)>) -> Self {
        let mut bones: Vec<Bone> = Vec::with_capacity(entries.len());
        let mut parents: Vec<Option<String>> = Vec::with_capacity(entries.len());
        for (bone, parent) in entries {
            bones.push(bone);
            parents.push(parent);
        }

        for parent in parents.into_iter().flatten() {
            if let Some(bone) = bones.iter_mut().find(|b| b.name == parent) {
                bone.has_children = true;
            }
        }

        Self::new(bones)
    }

    /// Number of bones.
    #[inline]
    #[must_use]
    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }

    /// Whether the skeleton has no bones at all.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    /// Look up a bone by name.
    #[must_use]
    pub fn bone(&self, name: &str) -> Option<&Bone> {
        self.bones.iter().find(|b| b.name == name)
    }

    /// Iterate over bones that are deform-enabled and not hidden, in host
    /// order.
    pub fn active_deform_bones(&self) -> impl Iterator<Item = &Bone> {
        self.bones.iter().filter(|b| b.is_active_deform())
    }
}
