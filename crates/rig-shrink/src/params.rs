//! Operation parameters.

/// How the shrink engine turns a bone influence into a target position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum ShrinkMode {
    /// Coarse snapping: low-confidence weights pick the nearer of head and
    /// tail outright; only near-full weights project onto the bone axis.
    #[default]
    Snap,

    /// Continuous blending: always project onto the axis, then pull the
    /// target toward the nearer endpoint by how low the weight is.
    Interpolate,
}

/// Parameters for [`shrink_to_bones`](crate::shrink_to_bones).
///
/// Defaults follow the host operator: snap mode, volume preservation on,
/// all vertices processed.
///
/// # Example
///
/// ```
/// use rig_shrink::{ShrinkMode, ShrinkParams};
///
/// let params = ShrinkParams::default()
///     .with_mode(ShrinkMode::Interpolate)
///     .with_selected_only(true);
///
/// assert!(params.preserve_volume);
/// assert!(params.selected_only);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ShrinkParams {
    /// The blending policy.
    pub mode: ShrinkMode,

    /// Keep 5% of the original position blended back in, preventing full
    /// collapse onto the skeleton.
    pub preserve_volume: bool,

    /// Process only vertices flagged as selected.
    pub selected_only: bool,
}

impl Default for ShrinkParams {
    fn default() -> Self {
        Self {
            mode: ShrinkMode::Snap,
            preserve_volume: true,
            selected_only: false,
        }
    }
}

impl ShrinkParams {
    /// Create parameters with the defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the blending mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: ShrinkMode) -> Self {
        self.mode = mode;
        self
    }

    /// Enable or disable volume preservation.
    #[must_use]
    pub const fn with_preserve_volume(mut self, preserve_volume: bool) -> Self {
        self.preserve_volume = preserve_volume;
        self
    }

    /// Restrict processing to selected vertices.
    #[must_use]
    pub const fn with_selected_only(mut self, selected_only: bool) -> Self {
        self.selected_only = selected_only;
        self
    }

    /// The blend factor applied between the current position and the
    /// weighted target.
    #[must_use]
    pub const fn blend_factor(&self) -> f64 {
        if self.preserve_volume { 0.95 } else { 1.0 }
    }
}

/// How [`snap_to_bone`](crate::snap_to_bone) picks the bone for an island.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum BoneStrategy {
    /// The bone with the highest vertex-group weight across the island.
    #[default]
    ByWeight,

    /// The bone whose head or tail is spatially nearest to any island
    /// vertex.
    ByNearest,
}

/// Parameters for [`snap_to_bone`](crate::snap_to_bone).
///
/// # Example
///
/// ```
/// use rig_shrink::{BoneStrategy, SnapParams};
///
/// let params = SnapParams::default().with_strategy(BoneStrategy::ByNearest);
/// assert_eq!(params.strategy, BoneStrategy::ByNearest);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SnapParams {
    /// Bone selection strategy.
    pub strategy: BoneStrategy,
}

impl SnapParams {
    /// Create parameters with the defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bone selection strategy.
    #[must_use]
    pub const fn with_strategy(mut self, strategy: BoneStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}
