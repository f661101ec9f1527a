//! Parameters for volume and surface estimation.
//!
//! The defaults reproduce the tuned thresholds of the estimator, which were
//! calibrated for objects measured in meters. Objects built at a very
//! different scale should recalibrate the absolute thresholds
//! (`min_volume_cap`, `hollow_min_volume`, `min_valid_volume`).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Thresholds used when combining several meshes of one family.
///
/// # Example
///
/// ```
/// use mesh_volume::ReconcileParams;
///
/// let params = ReconcileParams::default();
/// assert!((params.min_volume_ratio - 0.25).abs() < 1e-12);
/// assert!((params.secondary_surface_weight - 0.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReconcileParams {
    /// Meshes smaller than this fraction of the largest mesh are noise...
    pub min_volume_ratio: f64,

    /// ...unless the ratio threshold exceeds this absolute volume.
    pub min_volume_cap: f64,

    /// A neighbor is a hollow enclosure only above this mesh volume.
    pub hollow_min_volume: f64,

    /// A neighbor is a hollow enclosure when its box volume exceeds its mesh
    /// volume by this factor.
    pub hollow_bounds_ratio: f64,

    /// Secondary meshes whose box is covered by other boxes beyond this
    /// fraction are rejected.
    pub max_intersected_ratio: f64,

    /// Weight applied to the surface of every accepted mesh but the largest.
    pub secondary_surface_weight: f64,
}

impl Default for ReconcileParams {
    fn default() -> Self {
        Self {
            min_volume_ratio: 0.25,
            min_volume_cap: 0.5,
            hollow_min_volume: 10.0,
            hollow_bounds_ratio: 3.0,
            max_intersected_ratio: 0.75,
            secondary_surface_weight: 0.5,
        }
    }
}

impl ReconcileParams {
    /// Set the hollow-enclosure thresholds.
    #[must_use]
    pub const fn hollow_enclosure(mut self, min_volume: f64, bounds_ratio: f64) -> Self {
        self.hollow_min_volume = min_volume;
        self.hollow_bounds_ratio = bounds_ratio;
        self
    }

    /// Set the maximum covered fraction of a secondary mesh's box.
    #[must_use]
    pub const fn max_intersected_ratio(mut self, ratio: f64) -> Self {
        self.max_intersected_ratio = ratio;
        self
    }
}

/// Plausibility and agreement thresholds for the method selector.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SelectParams {
    /// Mesh-based volumes at or below this value are implausible.
    pub min_valid_volume: f64,

    /// Mesh-based volumes filling this fraction of the bounds or more have
    /// degenerated to the box.
    pub max_bounds_fill: f64,

    /// Relative volume difference under which both families agree.
    pub agreement_tolerance: f64,

    /// Relative volume difference under which a single-shape family is
    /// still preferred.
    pub single_shape_tolerance: f64,
}

impl Default for SelectParams {
    fn default() -> Self {
        Self {
            min_valid_volume: 0.25,
            max_bounds_fill: 0.9,
            agreement_tolerance: 0.2,
            single_shape_tolerance: 0.75,
        }
    }
}

/// Parameters for a full estimation pass.
///
/// # Example
///
/// ```
/// use mesh_volume::EstimateParams;
///
/// let params = EstimateParams::default()
///     .ignore_deformable_meshes(true)
///     .parallel(false);
///
/// assert!(params.ignore_deformable_meshes);
/// assert!(!params.parallel);
/// assert!(!params.log_all);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EstimateParams {
    /// Multi-mesh reconciliation thresholds.
    pub reconcile: ReconcileParams,

    /// Method selection thresholds.
    pub select: SelectParams,

    /// Skip deformable (pose-dependent) renderers instead of baking them.
    pub ignore_deformable_meshes: bool,

    /// Compute per-mesh metrics on the rayon thread pool.
    pub parallel: bool,

    /// Log every mesh sample and every family total at `info` level.
    pub log_all: bool,
}

impl Default for EstimateParams {
    fn default() -> Self {
        Self {
            reconcile: ReconcileParams::default(),
            select: SelectParams::default(),
            ignore_deformable_meshes: false,
            parallel: true,
            log_all: false,
        }
    }
}

impl EstimateParams {
    /// Set whether deformable renderers are ignored.
    #[must_use]
    pub const fn ignore_deformable_meshes(mut self, ignore: bool) -> Self {
        self.ignore_deformable_meshes = ignore;
        self
    }

    /// Set whether per-mesh metrics run in parallel.
    #[must_use]
    pub const fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set diagnostic logging of every sample.
    #[must_use]
    pub const fn log_all(mut self, log_all: bool) -> Self {
        self.log_all = log_all;
        self
    }

    /// Replace the reconciliation thresholds.
    #[must_use]
    pub const fn with_reconcile(mut self, reconcile: ReconcileParams) -> Self {
        self.reconcile = reconcile;
        self
    }

    /// Replace the selection thresholds.
    #[must_use]
    pub const fn with_select(mut self, select: SelectParams) -> Self {
        self.select = select;
        self
    }
}
