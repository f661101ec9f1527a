//! Surface hidden by attachment points.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Disc area covered by one attachment point, indexed by size category
/// (0.625 m, 1.25 m, 2.5 m, 3.75 m and 5 m discs).
pub const ATTACH_DISC_AREAS: [f64; 5] = [0.3068, 1.2272, 4.9090, 11.045, 19.635];

/// Radius under which an attachment point is considered disabled.
pub const MIN_ENABLED_RADIUS: f32 = 0.1;

/// Fraction of the raw surface that always remains exposed.
pub const MIN_EXPOSED_FRACTION: f64 = 0.5;

/// A disc-shaped location where another object can be joined.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AttachPoint {
    /// Size category, 0 (tiny) to 4 (huge).
    pub size: u8,
    /// Enabled radius; below [`MIN_ENABLED_RADIUS`] the point is disabled.
    pub radius: f32,
}

impl AttachPoint {
    /// Create an attachment point.
    #[must_use]
    pub const fn new(size: u8, radius: f32) -> Self {
        Self { size, radius }
    }

    /// Whether the point is in use.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.radius >= MIN_ENABLED_RADIUS
    }

    /// Covered disc area, or zero when disabled or of unknown size.
    #[must_use]
    pub fn disc_area(&self) -> f64 {
        if !self.is_enabled() {
            return 0.0;
        }
        ATTACH_DISC_AREAS.get(usize::from(self.size)).copied().unwrap_or(0.0)
    }
}

/// Total surface allowance of a set of attachment points.
#[must_use]
pub fn attach_nodes_surface(points: &[AttachPoint]) -> f64 {
    points.iter().map(AttachPoint::disc_area).sum()
}

/// Remove the attachment allowance from a raw surface, never going below
/// half of it.
///
/// ```
/// use mesh_volume::subtract_attach_surface;
///
/// assert!((subtract_attach_surface(10.0, 8.0) - 5.0).abs() < 1e-12);
/// assert!((subtract_attach_surface(10.0, 1.0) - 9.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn subtract_attach_surface(surface: f64, allowance: f64) -> f64 {
    (surface * MIN_EXPOSED_FRACTION).max(surface - allowance)
}
