//! # On-Stream Inspection in Lieu of Internal Inspection (API 510)
//!
//! A vessel may substitute on-stream (external NDE) inspection for an
//! internal inspection only when every criterion holds. The assessment
//! evaluates all of them and returns each failure with its reason, so a
//! report can list what blocks eligibility rather than only the first miss.

use serde::{Deserialize, Serialize};

use crate::calculations::{ensure_finite, ensure_non_negative};
use crate::equations::RemainingLife;
use crate::errors::CalcResult;
use crate::settings::CalcSettings;

/// Input for the in-lieu-of assessment.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "V-101",
///   "corrosion_rate_mpy": 2.0,
///   "remaining_life": { "type": "finite", "years": 25.0 },
///   "service_history_years": 12.0,
///   "environmental_cracking_susceptible": false,
///   "strip_lined": false,
///   "operating_temperature_f": 350.0,
///   "questionable_conditions": false
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InLieuOfInput {
    pub label: String,
    /// Governing corrosion rate (mpy)
    pub corrosion_rate_mpy: f64,
    /// Governing remaining life
    pub remaining_life: RemainingLife,
    /// Years of documented service with the same contents
    pub service_history_years: f64,
    /// Susceptible to environmental cracking (caustic, amine, wet H2S ...)
    #[serde(default)]
    pub environmental_cracking_susceptible: bool,
    /// Vessel has a non-integrally bonded strip lining
    #[serde(default)]
    pub strip_lined: bool,
    /// Normal operating temperature (°F)
    pub operating_temperature_f: f64,
    /// Any questionable condition found by the external inspection
    #[serde(default)]
    pub questionable_conditions: bool,
}

impl InLieuOfInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        ensure_non_negative("corrosion_rate_mpy", self.corrosion_rate_mpy)?;
        ensure_non_negative("service_history_years", self.service_history_years)?;
        ensure_finite("operating_temperature_f", self.operating_temperature_f)?;
        if let RemainingLife::Finite { years } = self.remaining_life {
            ensure_non_negative("remaining_life", years)?;
        }
        Ok(())
    }
}

/// One eligibility criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InLieuOfCriterion {
    CorrosionRate,
    RemainingLife,
    ServiceHistory,
    EnvironmentalCracking,
    StripLining,
    CreepTemperature,
    QuestionableConditions,
}

/// A criterion that was not met.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedCriterion {
    pub criterion: InLieuOfCriterion,
    pub reason: String,
}

/// Result of the in-lieu-of assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InLieuOfResult {
    pub label: String,
    /// True when no criterion failed
    pub eligible: bool,
    /// Every failed criterion, in evaluation order
    pub failed: Vec<FailedCriterion>,
}

/// Assess eligibility for on-stream inspection in lieu of internal inspection.
///
/// # Example
/// ```rust
/// use vessel_core::calculations::in_lieu_of::{assess, InLieuOfInput};
/// use vessel_core::equations::RemainingLife;
/// use vessel_core::settings::CalcSettings;
///
/// let input = InLieuOfInput {
///     label: "V-101".to_string(),
///     corrosion_rate_mpy: 2.0,
///     remaining_life: RemainingLife::Finite { years: 25.0 },
///     service_history_years: 12.0,
///     environmental_cracking_susceptible: false,
///     strip_lined: false,
///     operating_temperature_f: 350.0,
///     questionable_conditions: false,
/// };
///
/// let result = assess(&input, &CalcSettings::default()).unwrap();
/// assert!(result.eligible);
/// ```
pub fn assess(input: &InLieuOfInput, settings: &CalcSettings) -> CalcResult<InLieuOfResult> {
    input.validate()?;
    let limits = &settings.in_lieu_of;
    let mut failed = Vec::new();
    let mut fail = |criterion: InLieuOfCriterion, reason: String| {
        failed.push(FailedCriterion { criterion, reason });
    };

    if input.corrosion_rate_mpy >= limits.max_corrosion_rate_mpy {
        fail(
            InLieuOfCriterion::CorrosionRate,
            format!(
                "Corrosion rate {:.2} mpy is not below {:.1} mpy",
                input.corrosion_rate_mpy, limits.max_corrosion_rate_mpy
            ),
        );
    }
    if input.remaining_life.is_less_than(limits.min_remaining_life_years) {
        fail(
            InLieuOfCriterion::RemainingLife,
            format!(
                "Remaining life {} is less than {:.0} years",
                input.remaining_life, limits.min_remaining_life_years
            ),
        );
    }
    if input.service_history_years < limits.min_service_history_years {
        fail(
            InLieuOfCriterion::ServiceHistory,
            format!(
                "{:.1} years of service history with the same contents; {:.0} required",
                input.service_history_years, limits.min_service_history_years
            ),
        );
    }
    if input.environmental_cracking_susceptible {
        fail(
            InLieuOfCriterion::EnvironmentalCracking,
            "Service is susceptible to environmental cracking".to_string(),
        );
    }
    if input.strip_lined {
        fail(
            InLieuOfCriterion::StripLining,
            "Vessel has a non-integrally bonded strip lining".to_string(),
        );
    }
    if input.operating_temperature_f >= limits.max_operating_temperature_f {
        fail(
            InLieuOfCriterion::CreepTemperature,
            format!(
                "Operating temperature {:.0}°F is not below the {:.0}°F creep threshold",
                input.operating_temperature_f, limits.max_operating_temperature_f
            ),
        );
    }
    if input.questionable_conditions {
        fail(
            InLieuOfCriterion::QuestionableConditions,
            "External inspection found questionable conditions".to_string(),
        );
    }

    log::debug!("'{}': in-lieu-of {} criteria failed", input.label, failed.len());
    Ok(InLieuOfResult {
        label: input.label.clone(),
        eligible: failed.is_empty(),
        failed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eligible_vessel() -> InLieuOfInput {
        InLieuOfInput {
            label: "V-101".to_string(),
            corrosion_rate_mpy: 2.0,
            remaining_life: RemainingLife::Finite { years: 25.0 },
            service_history_years: 12.0,
            environmental_cracking_susceptible: false,
            strip_lined: false,
            operating_temperature_f: 350.0,
            questionable_conditions: false,
        }
    }

    #[test]
    fn test_eligible() {
        let result = assess(&eligible_vessel(), &CalcSettings::default()).unwrap();
        assert!(result.eligible);
        assert!(result.failed.is_empty());
    }

    #[test]
    fn test_unlimited_life_passes_life_criterion() {
        let mut input = eligible_vessel();
        input.corrosion_rate_mpy = 0.0;
        input.remaining_life = RemainingLife::Unlimited;
        assert!(assess(&input, &CalcSettings::default()).unwrap().eligible);
    }

    #[test]
    fn test_rate_at_limit_fails() {
        let mut input = eligible_vessel();
        input.corrosion_rate_mpy = 5.0;
        let result = assess(&input, &CalcSettings::default()).unwrap();
        assert!(!result.eligible);
        assert_eq!(result.failed[0].criterion, InLieuOfCriterion::CorrosionRate);
    }

    #[test]
    fn test_all_failures_reported() {
        let input = InLieuOfInput {
            label: "V-102".to_string(),
            corrosion_rate_mpy: 8.0,
            remaining_life: RemainingLife::Finite { years: 4.0 },
            service_history_years: 2.0,
            environmental_cracking_susceptible: true,
            strip_lined: true,
            operating_temperature_f: 700.0,
            questionable_conditions: true,
        };
        let result = assess(&input, &CalcSettings::default()).unwrap();
        let criteria: Vec<_> = result.failed.iter().map(|f| f.criterion).collect();
        assert_eq!(
            criteria,
            vec![
                InLieuOfCriterion::CorrosionRate,
                InLieuOfCriterion::RemainingLife,
                InLieuOfCriterion::ServiceHistory,
                InLieuOfCriterion::EnvironmentalCracking,
                InLieuOfCriterion::StripLining,
                InLieuOfCriterion::CreepTemperature,
                InLieuOfCriterion::QuestionableConditions,
            ]
        );
        assert!(result.failed[1].reason.contains("4.0 years"));
    }

    #[test]
    fn test_thresholds_from_settings() {
        let mut input = eligible_vessel();
        input.operating_temperature_f = 500.0;
        let mut settings = CalcSettings::default();
        settings.in_lieu_of.max_operating_temperature_f = 450.0;
        let result = assess(&input, &settings).unwrap();
        assert_eq!(result.failed.len(), 1);
        assert_eq!(result.failed[0].criterion, InLieuOfCriterion::CreepTemperature);
    }
}
