//! Choice of the authoritative estimation method.
//!
//! The policy is an ordered table of named rules; the first rule whose
//! predicate holds decides. Keeping it as data makes the order auditable and
//! lets callers log which rule fired.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{VolumeError, VolumeResult};
use crate::params::SelectParams;
use crate::reconcile::FamilyTotals;

/// Source of a volume/surface estimate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Method {
    /// Let the selector decide. Never the outcome of a selection.
    #[default]
    Best,
    /// Axis-aligned box of the whole subtree.
    Bounds,
    /// Reconciled mesh colliders.
    Collider,
    /// Reconciled render meshes.
    Mesh,
}

impl Method {
    /// Name used in stored records.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Best => "Best",
            Self::Bounds => "Bounds",
            Self::Collider => "Collider",
            Self::Mesh => "Mesh",
        }
    }

    /// Whether this is a concrete method rather than [`Method::Best`].
    #[must_use]
    pub const fn is_concrete(self) -> bool {
        !matches!(self, Self::Best)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = VolumeError;

    fn from_str(s: &str) -> VolumeResult<Self> {
        match s.trim() {
            "Best" => Ok(Self::Best),
            "Bounds" => Ok(Self::Bounds),
            "Collider" => Ok(Self::Collider),
            "Mesh" => Ok(Self::Mesh),
            other => Err(VolumeError::invalid_value("bestMethod", other)),
        }
    }
}

/// Figures the selector compares.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SelectionInput {
    /// Volume of the subtree's bounding box.
    pub bounds_volume: f64,
    /// Reconciled collider family.
    pub collider: FamilyTotals,
    /// Reconciled render-mesh family.
    pub mesh: FamilyTotals,
}

impl SelectionInput {
    /// Relative volume difference between the two families.
    ///
    /// Zero when both volumes are zero.
    #[must_use]
    pub fn volume_difference(&self) -> f64 {
        let larger = self.collider.volume.max(self.mesh.volume);
        if larger > 0.0 {
            (self.collider.volume - self.mesh.volume).abs() / larger
        } else {
            0.0
        }
    }

    fn collider_valid(&self, params: &SelectParams) -> bool {
        is_valid(self.collider.volume, self.bounds_volume, params)
    }

    fn mesh_valid(&self, params: &SelectParams) -> bool {
        is_valid(self.mesh.volume, self.bounds_volume, params)
    }

    fn both_valid(&self, params: &SelectParams) -> bool {
        self.collider_valid(params) && self.mesh_valid(params)
    }

    fn counts(&self) -> (usize, usize) {
        (self.collider.used_count, self.mesh.used_count)
    }
}

/// One entry of the decision table.
#[derive(Clone, Copy)]
pub struct Rule {
    /// Short identifier, used in logs.
    pub name: &'static str,
    /// Whether the rule applies.
    pub applies: fn(&SelectionInput, &SelectParams) -> bool,
    /// The method chosen when it does.
    pub outcome: fn(&SelectionInput) -> Method,
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish_non_exhaustive()
    }
}

/// The decision table, evaluated top to bottom.
pub const RULES: &[Rule] = &[
    Rule {
        name: "neither-valid",
        applies: |i, p| !i.collider_valid(p) && !i.mesh_valid(p),
        outcome: |_| Method::Bounds,
    },
    Rule {
        name: "only-mesh-valid",
        applies: |i, p| i.mesh_valid(p) && !i.collider_valid(p),
        outcome: |_| Method::Mesh,
    },
    Rule {
        name: "only-collider-valid",
        applies: |i, p| i.collider_valid(p) && !i.mesh_valid(p),
        outcome: |_| Method::Collider,
    },
    Rule {
        name: "agree-fewer-shapes",
        applies: |i, p| {
            let (colliders, meshes) = i.counts();
            i.both_valid(p) && i.volume_difference() < p.agreement_tolerance && colliders != meshes
        },
        outcome: |i| {
            let (colliders, meshes) = i.counts();
            if colliders < meshes {
                Method::Collider
            } else {
                Method::Mesh
            }
        },
    },
    Rule {
        name: "single-collider",
        applies: |i, p| {
            let (colliders, meshes) = i.counts();
            i.both_valid(p)
                && i.volume_difference() < p.single_shape_tolerance
                && colliders == 1
                && meshes != 1
        },
        outcome: |_| Method::Collider,
    },
    Rule {
        name: "single-mesh",
        applies: |i, p| {
            let (colliders, meshes) = i.counts();
            i.both_valid(p)
                && i.volume_difference() < p.single_shape_tolerance
                && meshes == 1
                && colliders != 1
        },
        outcome: |_| Method::Mesh,
    },
    Rule {
        name: "larger-volume",
        applies: |_, _| true,
        outcome: |i| {
            if i.collider.volume > i.mesh.volume {
                Method::Collider
            } else {
                Method::Mesh
            }
        },
    },
];

/// Whether a family volume is plausible against the bounding box.
///
/// Near-zero volumes are wrong, and volumes filling almost the whole box
/// mean the geometry degenerated to the box itself.
#[must_use]
pub fn is_valid(volume: f64, bounds_volume: f64, params: &SelectParams) -> bool {
    volume > params.min_valid_volume && volume < bounds_volume * params.max_bounds_fill
}

/// The first rule of [`RULES`] that applies to `input`.
#[must_use]
pub fn matching_rule(input: &SelectionInput, params: &SelectParams) -> &'static Rule {
    RULES
        .iter()
        .find(|rule| (rule.applies)(input, params))
        .unwrap_or(&RULES[RULES.len() - 1])
}

/// Pick one of [`Method::Bounds`], [`Method::Collider`] or [`Method::Mesh`].
///
/// Never fails and never returns [`Method::Best`].
///
/// # Example
///
/// ```
/// use mesh_volume::{select_method, FamilyTotals, Method, SelectParams, SelectionInput};
///
/// let input = SelectionInput {
///     bounds_volume: 10.0,
///     collider: FamilyTotals { volume: 9.5, surface: 28.0, used_count: 1 },
///     mesh: FamilyTotals::default(),
/// };
/// assert_eq!(select_method(&input, &SelectParams::default()), Method::Bounds);
/// ```
#[must_use]
pub fn select_method(input: &SelectionInput, params: &SelectParams) -> Method {
    (matching_rule(input, params).outcome)(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn family(volume: f64, used_count: usize) -> FamilyTotals {
        FamilyTotals {
            volume,
            surface: volume * 3.0,
            used_count,
        }
    }

    fn select(bounds_volume: f64, collider: FamilyTotals, mesh: FamilyTotals) -> Method {
        let input = SelectionInput {
            bounds_volume,
            collider,
            mesh,
        };
        select_method(&input, &SelectParams::default())
    }

    #[test]
    fn validity_window() {
        let p = SelectParams::default();
        assert!(!is_valid(0.25, 100.0, &p));
        assert!(is_valid(0.26, 100.0, &p));
        assert!(is_valid(89.9, 100.0, &p));
        assert!(!is_valid(90.0, 100.0, &p));
        assert!(!is_valid(1.0, 0.0, &p));
    }

    #[test]
    fn falls_back_to_bounds() {
        assert_eq!(select(10.0, family(9.5, 1), family(0.0, 0)), Method::Bounds);
        assert_eq!(select(0.0, FamilyTotals::default(), FamilyTotals::default()), Method::Bounds);
    }

    #[test]
    fn single_valid_family_wins() {
        assert_eq!(select(100.0, family(0.0, 0), family(40.0, 2)), Method::Mesh);
        assert_eq!(select(100.0, family(40.0, 2), family(95.0, 1)), Method::Collider);
    }

    #[test]
    fn agreement_prefers_fewer_shapes() {
        let input = SelectionInput {
            bounds_volume: 100.0,
            collider: family(50.0, 1),
            mesh: family(52.0, 3),
        };
        assert!((input.volume_difference() - 2.0 / 52.0).abs() < 1e-12);
        assert_eq!(select_method(&input, &SelectParams::default()), Method::Collider);
        assert_eq!(matching_rule(&input, &SelectParams::default()).name, "agree-fewer-shapes");

        assert_eq!(select(100.0, family(50.0, 4), family(52.0, 2)), Method::Mesh);
    }

    #[test]
    fn single_shape_within_wider_tolerance() {
        // 50% apart: too far to agree, close enough for the single-shape rules.
        assert_eq!(select(100.0, family(30.0, 1), family(60.0, 4)), Method::Collider);
        assert_eq!(select(100.0, family(60.0, 4), family(30.0, 1)), Method::Mesh);
    }

    #[test]
    fn otherwise_larger_volume() {
        // Same counts: the agreement rule does not apply.
        assert_eq!(select(100.0, family(50.0, 2), family(52.0, 2)), Method::Mesh);
        assert_eq!(select(100.0, family(52.0, 1), family(50.0, 1)), Method::Collider);
        // Far apart.
        assert_eq!(select(100.0, family(80.0, 1), family(10.0, 5)), Method::Collider);
        // Ties go to the meshes.
        assert_eq!(select(100.0, family(50.0, 1), family(50.0, 1)), Method::Mesh);
    }

    #[test]
    fn table_always_matches() {
        let input = SelectionInput::default();
        let rule = matching_rule(&input, &SelectParams::default());
        assert_eq!(rule.name, "neither-valid");
        assert_eq!(RULES.last().map(|r| r.name), Some("larger-volume"));
    }

    #[test]
    fn method_names_round_trip() {
        for method in [Method::Best, Method::Bounds, Method::Collider, Method::Mesh] {
            assert_eq!(method.to_string().parse::<Method>(), Ok(method));
        }
        assert!("Cylinder".parse::<Method>().is_err());
        assert_eq!(Method::default(), Method::Best);
        assert!(!Method::Best.is_concrete());
        assert!(Method::Mesh.is_concrete());
    }
}
