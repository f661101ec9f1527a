//! Stored outcome of an estimation.
//!
//! A report keeps the raw figures of all three methods plus the selected
//! one, so callers can inspect the alternatives. The attachment allowance is
//! stored separately and only subtracted when a surface is read.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::attach::subtract_attach_surface;
use crate::error::{VolumeError, VolumeResult};
use crate::select::Method;

/// A volume and surface pair read from a report.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VolumeSurface {
    /// Volume, never adjusted.
    pub volume: f64,
    /// Surface, possibly reduced by the attachment allowance.
    pub surface: f64,
}

/// Figures from every estimation method and the method chosen among them.
///
/// # Example
///
/// ```
/// use mesh_volume::{Method, VolumeSurfaceReport};
///
/// let report = VolumeSurfaceReport {
///     best_method: Method::Collider,
///     collider_volume: 4.0,
///     collider_surface: 10.0,
///     attach_nodes_surface: 8.0,
///     ..VolumeSurfaceReport::default()
/// };
///
/// let raw = report.get_using_best_method(false).unwrap();
/// let exposed = report.get_using_best_method(true).unwrap();
/// assert!((raw.surface - 10.0).abs() < 1e-12);
/// assert!((exposed.surface - 5.0).abs() < 1e-12);
/// assert!((exposed.volume - 4.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct VolumeSurfaceReport {
    /// Selected method; [`Method::Best`] until computed.
    pub best_method: Method,
    /// Volume of the subtree bounding box.
    pub bounds_volume: f64,
    /// Surface of the subtree bounding box.
    pub bounds_surface: f64,
    /// Reconciled collider volume.
    pub collider_volume: f64,
    /// Reconciled collider surface.
    pub collider_surface: f64,
    /// Reconciled render-mesh volume.
    pub mesh_volume: f64,
    /// Reconciled render-mesh surface.
    pub mesh_surface: f64,
    /// Surface covered by enabled attachment points.
    pub attach_nodes_surface: f64,
}

/// Record keys, in the order they are written.
pub const RECORD_KEYS: [&str; 8] = [
    "bestMethod",
    "boundsVolume",
    "boundsSurface",
    "colliderVolume",
    "colliderSurface",
    "meshVolume",
    "meshSurface",
    "attachNodesSurface",
];

impl VolumeSurfaceReport {
    /// Whether a concrete method has been selected.
    #[must_use]
    pub const fn is_computed(&self) -> bool {
        self.best_method.is_concrete()
    }

    /// Figures of the selected method.
    ///
    /// # Errors
    ///
    /// Returns [`VolumeError::NotComputed`] if no method was selected yet.
    pub fn get_using_best_method(&self, subtract_attach: bool) -> VolumeResult<VolumeSurface> {
        self.get_using_method(self.best_method, subtract_attach)
    }

    /// Figures of `method`, whether or not it was the one selected.
    ///
    /// [`Method::Best`] resolves to the selected method. When
    /// `subtract_attach` is set, the surface (never the volume) is
    /// reduced by the attachment allowance, floored at half its raw value.
    ///
    /// # Errors
    ///
    /// Returns [`VolumeError::NotComputed`] if `method` is `Best` and no
    /// method was selected yet.
    pub fn get_using_method(&self, method: Method, subtract_attach: bool) -> VolumeResult<VolumeSurface> {
        let (volume, surface) = match method {
            Method::Bounds => (self.bounds_volume, self.bounds_surface),
            Method::Collider => (self.collider_volume, self.collider_surface),
            Method::Mesh => (self.mesh_volume, self.mesh_surface),
            Method::Best if self.is_computed() => {
                return self.get_using_method(self.best_method, subtract_attach);
            }
            Method::Best => {
                warn!("Volume/surface report read before being computed");
                return Err(VolumeError::NotComputed);
            }
        };

        let surface = if subtract_attach {
            subtract_attach_surface(surface, self.attach_nodes_surface)
        } else {
            surface
        };
        Ok(VolumeSurface { volume, surface })
    }

    /// Figures of the selected method with the attachment allowance
    /// subtracted.
    ///
    /// # Errors
    ///
    /// Returns [`VolumeError::NotComputed`] if no method was selected yet.
    pub fn volume_and_surface(&self) -> VolumeResult<VolumeSurface> {
        self.get_using_best_method(true)
    }

    /// Figures of `method` with the attachment allowance subtracted.
    ///
    /// # Errors
    ///
    /// Returns [`VolumeError::NotComputed`] if `method` is `Best` and no
    /// method was selected yet.
    pub fn volume_and_surface_using(&self, method: Method) -> VolumeResult<VolumeSurface> {
        self.get_using_method(method, true)
    }

    /// Write the report as `key = value` lines.
    ///
    /// Floats are written in their shortest round-trip form, so
    /// [`Self::from_record`] restores them bit for bit.
    #[must_use]
    pub fn to_record(&self) -> String {
        let method = format!("{} = {}\n", RECORD_KEYS[0], self.best_method);
        let figures = RECORD_KEYS[1..]
            .iter()
            .zip(self.values())
            .map(|(key, value)| format!("{key} = {value}\n"));
        std::iter::once(method).chain(figures).collect()
    }

    /// Read a report written by [`Self::to_record`].
    ///
    /// Missing keys keep their default (0.0, or [`Method::Best`] for the
    /// method, meaning "not computed"). Blank lines, `//` comments and
    /// unknown keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`VolumeError::MalformedRecord`] for a line without `=`, and
    /// [`VolumeError::InvalidValue`] for a value that does not parse.
    pub fn from_record(text: &str) -> VolumeResult<Self> {
        let mut report = Self::default();
        for raw in text.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with("//") {
                continue;
            }
            let (key, value) = line
                .split_once('=')
                .ok_or_else(|| VolumeError::malformed_record(line))?;
            let (key, value) = (key.trim(), value.trim());

            let field = match key {
                "bestMethod" => {
                    report.best_method = value.parse()?;
                    continue;
                }
                "boundsVolume" => &mut report.bounds_volume,
                "boundsSurface" => &mut report.bounds_surface,
                "colliderVolume" => &mut report.collider_volume,
                "colliderSurface" => &mut report.collider_surface,
                "meshVolume" => &mut report.mesh_volume,
                "meshSurface" => &mut report.mesh_surface,
                "attachNodesSurface" => &mut report.attach_nodes_surface,
                _ => continue,
            };
            *field = value
                .parse()
                .map_err(|_| VolumeError::invalid_value(key, value))?;
        }
        Ok(report)
    }

    const fn values(&self) -> [f64; 7] {
        [
            self.bounds_volume,
            self.bounds_surface,
            self.collider_volume,
            self.collider_surface,
            self.mesh_volume,
            self.mesh_surface,
            self.attach_nodes_surface,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn computed() -> VolumeSurfaceReport {
        VolumeSurfaceReport {
            best_method: Method::Mesh,
            bounds_volume: 12.0,
            bounds_surface: 32.0,
            collider_volume: 0.1 + 0.2,
            collider_surface: 1.0 / 3.0,
            mesh_volume: 7.123_456_789_012_345,
            mesh_surface: 10.0,
            attach_nodes_surface: 8.0,
        }
    }

    #[test]
    fn test_default_report_is_not_computed() {
        let report = VolumeSurfaceReport::default();
        assert!(!report.is_computed());
        assert_eq!(report.get_using_best_method(true), Err(VolumeError::NotComputed));
        assert_eq!(report.volume_and_surface(), Err(VolumeError::NotComputed));
        assert_eq!(
            report.get_using_method(Method::Best, false),
            Err(VolumeError::NotComputed)
        );
    }

    #[test]
    fn raw_numbers_stay_available() {
        let report = computed();
        let bounds = report.get_using_method(Method::Bounds, false);
        assert_eq!(
            bounds,
            Ok(VolumeSurface {
                volume: 12.0,
                surface: 32.0
            })
        );
        let best = report.get_using_method(Method::Best, false);
        assert_eq!(best, report.get_using_method(Method::Mesh, false));
    }

    #[test]
    fn subtraction_touches_surface_only() {
        let report = computed();
        let adjusted = report.volume_and_surface().unwrap_or_default();
        assert!((adjusted.volume - report.mesh_volume).abs() < f64::EPSILON);
        // max(10 * 0.5, 10 - 8)
        assert!((adjusted.surface - 5.0).abs() < f64::EPSILON);

        let bounds = report.get_using_method(Method::Bounds, true).unwrap_or_default();
        assert!((bounds.surface - 24.0).abs() < f64::EPSILON);
    }

    #[test]
    fn explicit_method_subtracts_by_default() {
        let report = computed();
        assert_eq!(
            report.volume_and_surface_using(Method::Bounds),
            report.get_using_method(Method::Bounds, true)
        );
        let collider = report.volume_and_surface_using(Method::Collider).unwrap_or_default();
        // max(1/3 * 0.5, 1/3 - 8)
        assert!((collider.surface - 1.0 / 6.0).abs() < f64::EPSILON);
        assert_eq!(
            report.volume_and_surface_using(Method::Best),
            report.volume_and_surface()
        );
        assert_eq!(
            VolumeSurfaceReport::default().volume_and_surface_using(Method::Best),
            Err(VolumeError::NotComputed)
        );
    }

    #[test]
    fn record_round_trip_is_bit_exact() {
        let report = computed();
        let text = report.to_record();
        assert!(text.starts_with("bestMethod = Mesh\n"));
        let loaded = VolumeSurfaceReport::from_record(&text);
        assert_eq!(loaded, Ok(report));
        let loaded = loaded.unwrap_or_default();
        assert_eq!(loaded.collider_volume.to_bits(), report.collider_volume.to_bits());
        assert_eq!(loaded.collider_surface.to_bits(), report.collider_surface.to_bits());
    }

    #[test]
    fn missing_keys_use_defaults() {
        let loaded = VolumeSurfaceReport::from_record("// partial\n\nmeshVolume = 2.5\nfuture = 1\n");
        let loaded = loaded.unwrap_or_default();
        assert_eq!(loaded.best_method, Method::Best);
        assert!((loaded.mesh_volume - 2.5).abs() < f64::EPSILON);
        assert!(loaded.bounds_volume.abs() < f64::EPSILON);
    }

    #[test]
    fn malformed_records_are_rejected() {
        assert_eq!(
            VolumeSurfaceReport::from_record("meshVolume 2.5"),
            Err(VolumeError::malformed_record("meshVolume 2.5"))
        );
        assert_eq!(
            VolumeSurfaceReport::from_record("boundsSurface = lots"),
            Err(VolumeError::invalid_value("boundsSurface", "lots"))
        );
        assert_eq!(
            VolumeSurfaceReport::from_record("bestMethod = Guess"),
            Err(VolumeError::invalid_value("bestMethod", "Guess"))
        );
    }
}
