//! Skinned vertex types.

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single vertex-group assignment: a bone name and its influence weight.
///
/// Weights are in `[0, 1]` but a vertex's weights are not required to sum
/// to 1. A weight referencing a bone that does not exist in the skeleton
/// is silently unmatched by every operation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoneWeight {
    /// Name of the bone (vertex group) this weight refers to.
    pub bone: String,
    /// Influence weight in `[0, 1]`.
    pub weight: f64,
}

impl BoneWeight {
    /// Create a new bone weight.
    ///
    /// # Example
    ///
    /// ```
    /// use rig_types::BoneWeight;
    ///
    /// let w = BoneWeight::new("upper_arm.L", 0.75);
    /// assert_eq!(w.bone, "upper_arm.L");
    /// ```
    #[inline]
    #[must_use]
    pub fn new(bone: impl Into<String>, weight: f64) -> Self {
        Self {
            bone: bone.into(),
            weight,
        }
    }
}

/// A vertex of a skinned mesh.
///
/// The position is in mesh-local space; world positions are derived by
/// applying the owning mesh's [`ObjectTransform`](crate::ObjectTransform).
/// Weights are stored in insertion order, matching the order of the host's
/// vertex-group list, so "first encountered" tie-breaks are deterministic.
///
/// # Example
///
/// ```
/// use rig_types::{SkinVertex, Point3};
///
/// let v = SkinVertex::from_coords(1.0, 2.0, 3.0)
///     .with_weight("spine", 1.0);
/// assert_eq!(v.weight_for("spine"), Some(1.0));
/// assert_eq!(v.weight_for("head"), None);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SkinVertex {
    /// Position in mesh-local space.
    pub position: Point3<f64>,

    /// Bone-name to weight assignments, in vertex-group order.
    pub weights: Vec<BoneWeight>,

    /// Whether this vertex is part of the current selection.
    pub selected: bool,
}

impl SkinVertex {
    /// Create a vertex with no weights and no selection.
    #[inline]
    #[must_use]
    pub const fn new(position: Point3<f64>) -> Self {
        Self {
            position,
            weights: Vec::new(),
            selected: false,
        }
    }

    /// Create a vertex from raw coordinates.
    ///
    /// # Example
    ///
    /// ```
    /// use rig_types::SkinVertex;
    ///
    /// let v = SkinVertex::from_coords(1.0, 2.0, 3.0);
    /// assert_eq!(v.position.y, 2.0);
    /// assert!(v.weights.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn from_coords(x: f64, y: f64, z: f64) -> Self {
        Self::new(Point3::new(x, y, z))
    }

    /// Add a bone weight (builder style).
    #[must_use]
    pub fn with_weight(mut self, bone: impl Into<String>, weight: f64) -> Self {
        self.weights.push(BoneWeight::new(bone, weight));
        self
    }

    /// Mark the vertex as selected (builder style).
    #[must_use]
    pub const fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Look up the weight for a bone name.
    ///
    /// Weight lists are short (a handful of groups per vertex), so this is
    /// a linear scan.
    #[must_use]
    pub fn weight_for(&self, bone: &str) -> Option<f64> {
        self.weights
            .iter()
            .find(|w| w.bone == bone)
            .map(|w| w.weight)
    }
}

impl From<Point3<f64>> for SkinVertex {
    fn from(position: Point3<f64>) -> Self {
        Self::new(position)
    }
}

impl From<[f64; 3]> for SkinVertex {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::from_coords(x, y, z)
    }
}
