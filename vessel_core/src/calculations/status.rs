//! # Component Status Classification
//!
//! Rules are checked in order and the first match wins:
//!
//! 1. actual < t_min → critical
//! 2. actual < t_min + band × CA → monitoring (band = 0.5 by default)
//! 3. otherwise → acceptable
//!
//! A wall exactly at t_min is acceptable. The monitoring band only exists
//! when the component has a corrosion allowance.

use serde::{Deserialize, Serialize};

/// Integrity status of a vessel component.
///
/// Ordered from best to worst, so `max()` over a set of results gives the
/// governing status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentStatus {
    /// Wall comfortably above the required thickness
    Acceptable,
    /// Wall inside the monitoring band above the required thickness
    Monitoring,
    /// Wall below the required thickness
    Critical,
}

impl ComponentStatus {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ComponentStatus::Acceptable => "Acceptable",
            ComponentStatus::Monitoring => "Monitoring",
            ComponentStatus::Critical => "Critical",
        }
    }
}

impl std::fmt::Display for ComponentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Status plus the sentence explaining it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusAssessment {
    pub status: ComponentStatus,
    /// States the two compared values
    pub reason: String,
}

/// Classify a measured thickness against its required thickness.
///
/// # Example
/// ```rust
/// use vessel_core::calculations::status::{classify, ComponentStatus};
///
/// let a = classify(0.52, 0.50, 0.125, 0.5);
/// assert_eq!(a.status, ComponentStatus::Monitoring);
/// ```
pub fn classify(
    actual_thickness_in: f64,
    minimum_required_in: f64,
    corrosion_allowance_in: f64,
    monitoring_band_fraction: f64,
) -> StatusAssessment {
    if actual_thickness_in < minimum_required_in {
        return StatusAssessment {
            status: ComponentStatus::Critical,
            reason: format!(
                "Actual thickness {:.4}\" is below minimum required {:.4}\"",
                actual_thickness_in, minimum_required_in
            ),
        };
    }

    let band_limit = minimum_required_in + monitoring_band_fraction * corrosion_allowance_in;
    if actual_thickness_in < band_limit {
        return StatusAssessment {
            status: ComponentStatus::Monitoring,
            reason: format!(
                "Actual thickness {:.4}\" is within the monitoring band below {:.4}\" (minimum required {:.4}\")",
                actual_thickness_in, band_limit, minimum_required_in
            ),
        };
    }

    StatusAssessment {
        status: ComponentStatus::Acceptable,
        reason: format!(
            "Actual thickness {:.4}\" meets minimum required {:.4}\"",
            actual_thickness_in, minimum_required_in
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exactly_at_minimum_is_acceptable_without_allowance() {
        let a = classify(0.5, 0.5, 0.0, 0.5);
        assert_eq!(a.status, ComponentStatus::Acceptable);
    }

    #[test]
    fn test_just_below_minimum_is_critical() {
        let a = classify(0.4999, 0.5, 0.125, 0.5);
        assert_eq!(a.status, ComponentStatus::Critical);
        assert!(a.reason.contains("0.4999"));
        assert!(a.reason.contains("0.5000"));
    }

    #[test]
    fn test_monitoring_band() {
        // Band: 0.5 + 0.5 * 0.125 = 0.5625
        assert_eq!(classify(0.56, 0.5, 0.125, 0.5).status, ComponentStatus::Monitoring);
        assert_eq!(classify(0.5625, 0.5, 0.125, 0.5).status, ComponentStatus::Acceptable);
        // At t_min with an allowance the band applies
        assert_eq!(classify(0.5, 0.5, 0.125, 0.5).status, ComponentStatus::Monitoring);
    }

    #[test]
    fn test_status_ordering() {
        let worst = [ComponentStatus::Acceptable, ComponentStatus::Critical, ComponentStatus::Monitoring]
            .into_iter()
            .max();
        assert_eq!(worst, Some(ComponentStatus::Critical));
    }

    #[test]
    fn test_status_json() {
        let json = serde_json::to_string(&ComponentStatus::Monitoring).unwrap();
        assert_eq!(json, "\"monitoring\"");
    }
}
