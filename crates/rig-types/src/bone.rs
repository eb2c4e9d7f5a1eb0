//! Skeleton bone type.

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A bone in its rest pose.
///
/// Head and tail are in the armature's local space; the owning
/// [`Skeleton`](crate::Skeleton) carries the world transform. `hidden` and
/// `use_deform` come straight from the host skeleton: a bone only
/// participates in deformation when it is deform-enabled and not hidden.
///
/// # Example
///
/// ```
/// use rig_types::{Bone, Point3};
///
/// let bone = Bone::new("spine", Point3::origin(), Point3::new(0.0, 1.0, 0.0));
/// assert!(bone.is_active_deform());
///
/// let hidden = bone.clone().with_hidden(true);
/// assert!(!hidden.is_active_deform());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bone {
    /// Bone name, unique within its skeleton.
    pub name: String,

    /// Head (root end) position in armature-local space.
    pub head: Point3<f64>,

    /// Tail position in armature-local space.
    pub tail: Point3<f64>,

    /// Whether the bone deforms the mesh.
    pub use_deform: bool,

    /// Whether the bone is hidden in the host.
    pub hidden: bool,

    /// Whether the bone has child bones. Leaf bones collapse vertices to
    /// their head rather than projecting onto the axis.
    pub has_children: bool,
}

impl Bone {
    /// Create a deforming, visible, childless bone.
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, head: Point3<f64>, tail: Point3<f64>) -> Self {
        Self {
            name: name.into(),
            head,
            tail,
            use_deform: true,
            hidden: false,
            has_children: false,
        }
    }

    /// Set the deform flag (builder style).
    #[must_use]
    pub const fn with_use_deform(mut self, use_deform: bool) -> Self {
        self.use_deform = use_deform;
        self
    }

    /// Set the hidden flag (builder style).
    #[must_use]
    pub const fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Set the has-children flag (builder style).
    #[must_use]
    pub const fn with_children(mut self, has_children: bool) -> Self {
        self.has_children = has_children;
        self
    }

    /// Whether the bone participates in deformation: deform-enabled and
    /// not hidden.
    #[inline]
    #[must_use]
    pub const fn is_active_deform(&self) -> bool {
        self.use_deform && !self.hidden
    }
}
