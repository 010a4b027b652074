//! Formed head shape factors (ASME VIII-1 UG-32 and Appendix 1-4)
//!
//! Every head formula in this crate has the form
//!
//! ```text
//! t = P·L·factor / (2·S·E − 0.2·P)
//! ```
//!
//! so a head type only has to say what its characteristic length L is and
//! what multiplies it:
//!
//! | Head | L | factor |
//! |------|---|--------|
//! | Hemispherical | inside radius | 1.0 |
//! | 2:1 Ellipsoidal | inside diameter | 1.0 |
//! | Torispherical | crown radius | M = ¼(3 + √(L/r)) |
//!
//! A flanged-and-dished head with crown radius equal to the inside diameter
//! and a 6% knuckle gives M ≈ 1.77, which reproduces the UG-32(e) form
//! t = 0.885·P·L / (S·E − 0.1·P).

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Formed head geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "head_type", rename_all = "snake_case")]
pub enum HeadType {
    /// Hemispherical head
    Hemispherical,
    /// 2:1 semi-ellipsoidal head
    Ellipsoidal,
    /// Flanged-and-dished (torispherical) head
    Torispherical {
        /// Inside crown radius L (in); defaults to the inside diameter
        #[serde(default)]
        crown_radius_in: Option<f64>,
        /// Inside knuckle radius r (in); defaults to 6% of the inside diameter
        #[serde(default)]
        knuckle_radius_in: Option<f64>,
    },
}

impl HeadType {
    /// Standard flanged-and-dished head with default proportions
    pub fn torispherical_standard() -> Self {
        HeadType::Torispherical {
            crown_radius_in: None,
            knuckle_radius_in: None,
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            HeadType::Hemispherical => "Hemispherical",
            HeadType::Ellipsoidal => "2:1 Ellipsoidal",
            HeadType::Torispherical { .. } => "Torispherical",
        }
    }
}

impl std::fmt::Display for HeadType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Resolved L and factor for a head.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeadFactors {
    /// Characteristic length L (in)
    pub characteristic_length_in: f64,
    /// Shape multiplier (1.0, or M for torispherical)
    pub factor: f64,
    /// Knuckle radius actually used (torispherical only)
    pub knuckle_radius_in: Option<f64>,
}

impl HeadFactors {
    /// L × factor, the effective length in the thickness and MAWP formulas
    pub fn effective_length_in(&self) -> f64 {
        self.characteristic_length_in * self.factor
    }
}

/// Torispherical stress intensification factor M = ¼(3 + √(L/r)).
///
/// # Example
/// ```rust
/// use vessel_core::geometry::torispherical_m_factor;
///
/// // Crown = D, knuckle = 6% of D
/// let m = torispherical_m_factor(70.75, 0.06 * 70.75);
/// assert!((m - 1.77).abs() < 0.01);
/// ```
#[inline]
pub fn torispherical_m_factor(crown_radius_in: f64, knuckle_radius_in: f64) -> f64 {
    0.25 * (3.0 + (crown_radius_in / knuckle_radius_in).sqrt())
}

/// Resolve L and factor for a head of the given inside diameter.
///
/// Caller-supplied crown and knuckle radii always take precedence over the
/// standard proportions.
pub fn resolve_head_factors(
    head: &HeadType,
    inside_diameter_in: f64,
    default_knuckle_ratio: f64,
) -> CalcResult<HeadFactors> {
    match *head {
        HeadType::Hemispherical => Ok(HeadFactors {
            characteristic_length_in: inside_diameter_in / 2.0,
            factor: 1.0,
            knuckle_radius_in: None,
        }),
        HeadType::Ellipsoidal => Ok(HeadFactors {
            characteristic_length_in: inside_diameter_in,
            factor: 1.0,
            knuckle_radius_in: None,
        }),
        HeadType::Torispherical {
            crown_radius_in,
            knuckle_radius_in,
        } => {
            let crown = crown_radius_in.unwrap_or(inside_diameter_in);
            let knuckle = knuckle_radius_in.unwrap_or(default_knuckle_ratio * inside_diameter_in);
            if !(crown > 0.0) {
                return Err(CalcError::invalid_input(
                    "crown_radius_in",
                    crown.to_string(),
                    "Crown radius must be positive",
                ));
            }
            if !(knuckle > 0.0) || knuckle >= crown {
                return Err(CalcError::invalid_input(
                    "knuckle_radius_in",
                    knuckle.to_string(),
                    "Knuckle radius must be positive and smaller than the crown radius",
                ));
            }
            Ok(HeadFactors {
                characteristic_length_in: crown,
                factor: torispherical_m_factor(crown, knuckle),
                knuckle_radius_in: Some(knuckle),
            })
        }
    }
}
