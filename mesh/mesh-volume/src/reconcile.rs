//! Combination of several meshes of one geometry family into one estimate.
//!
//! Objects are often assembled from overlapping or nested pieces. The largest
//! piece always counts. Smaller pieces count only when they are big enough
//! to matter and are not mostly buried inside the boxes of the others.
//! Accepted secondary pieces are assumed to share boundary with the dominant
//! one, so only part of their surface is exposed.

use tracing::debug;

use crate::params::ReconcileParams;
use crate::sample::MeshSample;

/// Reconciled figures for one geometry family.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FamilyTotals {
    /// Summed volume of accepted meshes.
    pub volume: f64,
    /// Weighted surface of accepted meshes.
    pub surface: f64,
    /// Number of accepted meshes.
    pub used_count: usize,
}

impl FamilyTotals {
    /// Whether no mesh of the family was accepted.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.used_count == 0
    }
}

/// Why a sample was left out of a family total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Volume below the family's minimum mesh volume.
    TooSmall,
    /// Box mostly covered by the boxes of other samples.
    Enclosed,
}

/// Reconcile one family of samples into totals.
///
/// The input is left untouched; a copy is sorted by descending volume
/// (stable, so equal volumes keep their input order) and every sample is
/// judged against that sorted sequence by [`judge`].
///
/// # Example
///
/// ```
/// use mesh_types::{Aabb, Point3};
/// use mesh_volume::{reconcile, MeshSample, ReconcileParams};
///
/// let hull = MeshSample::new(
///     "hull",
///     8.0,
///     24.0,
///     Aabb::new(Point3::origin(), Point3::new(2.0, 2.0, 2.0)),
/// );
/// let totals = reconcile(&[hull], &ReconcileParams::default());
/// assert_eq!(totals.used_count, 1);
/// assert!((totals.volume - 8.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn reconcile(samples: &[MeshSample], params: &ReconcileParams) -> FamilyTotals {
    let sorted = sorted_by_volume(samples);
    let Some(largest) = sorted.first() else {
        return FamilyTotals::default();
    };
    let min_volume = min_mesh_volume(largest.volume(), params);

    let mut totals = FamilyTotals::default();
    for (index, &sample) in sorted.iter().enumerate() {
        match judge(&sorted, index, min_volume, params) {
            Ok(()) => {
                let weight = if index == 0 {
                    1.0
                } else {
                    params.secondary_surface_weight
                };
                totals.volume += sample.volume();
                totals.surface += sample.surface() * weight;
                totals.used_count += 1;
            }
            Err(reason) => {
                debug!(
                    name = sample.name(),
                    volume = sample.volume(),
                    ?reason,
                    "Rejected mesh sample"
                );
            }
        }
    }
    totals
}

/// Decide whether the sample at `index` of a volume-sorted slice counts.
///
/// # Errors
///
/// Returns the [`Rejection`] reason when the sample is left out.
pub fn judge(
    sorted: &[&MeshSample],
    index: usize,
    min_volume: f64,
    params: &ReconcileParams,
) -> Result<(), Rejection> {
    let Some(&sample) = sorted.get(index) else {
        return Err(Rejection::TooSmall);
    };
    if sample.volume() < min_volume {
        return Err(Rejection::TooSmall);
    }
    if index > 0 && sample.bounds_volume() > 0.0 {
        let covered = intersected_volume(sample, sorted, params) / sample.bounds_volume();
        if covered > params.max_intersected_ratio {
            return Err(Rejection::Enclosed);
        }
    }
    Ok(())
}

/// Smallest volume a mesh needs to count, relative to the largest mesh and
/// capped in absolute terms.
#[must_use]
pub fn min_mesh_volume(largest_volume: f64, params: &ReconcileParams) -> f64 {
    (largest_volume * params.min_volume_ratio).min(params.min_volume_cap)
}

/// Summed overlap of `sample`'s box with the boxes of all other samples.
///
/// Samples equal to `sample` (itself included) and hollow enclosures are
/// skipped.
#[must_use]
pub fn intersected_volume(sample: &MeshSample, others: &[&MeshSample], params: &ReconcileParams) -> f64 {
    others
        .iter()
        .filter(|&&other| other != sample && !is_hollow_enclosure(other, params))
        .map(|other| sample.bounds().intersection_volume(other.bounds()))
        .sum()
}

/// A large mesh whose box is far bigger than its own volume, such as a ring
/// or a shell. Its box says nothing about what it encloses.
#[must_use]
pub fn is_hollow_enclosure(sample: &MeshSample, params: &ReconcileParams) -> bool {
    sample.volume() > params.hollow_min_volume
        && sample.bounds_volume() > params.hollow_bounds_ratio * sample.volume()
}

fn sorted_by_volume(samples: &[MeshSample]) -> Vec<&MeshSample> {
    let mut sorted: Vec<&MeshSample> = samples.iter().collect();
    sorted.sort_by(|a, b| b.volume().total_cmp(&a.volume()));
    sorted
}
