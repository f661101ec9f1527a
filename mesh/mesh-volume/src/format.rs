//! Display helpers for estimated figures.

use std::fmt;

use crate::report::VolumeSurface;

/// Volume in cubic meters with two decimals, e.g. `"12.35 m³"`.
#[must_use]
pub fn human_readable_volume(volume: f64) -> String {
    format!("{volume:.2} m³")
}

/// Surface in square meters with two decimals, e.g. `"3.10 m²"`.
#[must_use]
pub fn human_readable_surface(surface: f64) -> String {
    format!("{surface:.2} m²")
}

impl fmt::Display for VolumeSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "volume {}, surface {}",
            human_readable_volume(self.volume),
            human_readable_surface(self.surface)
        )
    }
}
