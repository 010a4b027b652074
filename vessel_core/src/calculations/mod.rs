//! # Inspection Calculations
//!
//! This module contains all inspection calculation types. Each calculation
//! follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable) with `validate()`
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input, ...) -> Result<*Result, CalcError>` - Pure calculation function
//!
//! Reference tables and settings are passed in by reference; no calculation
//! reads global state or the clock.
//!
//! ## Available Calculations
//!
//! - [`component`] - Shell course or formed head evaluation
//! - [`nozzle`] - Nozzle neck minimum thickness
//! - [`ffs`] - API 579 Level 1 general metal loss and local thin area
//! - [`in_lieu_of`] - On-stream inspection eligibility
//! - [`summary`] - Vessel-level roll-up of component results
//! - [`status`] - Acceptable / monitoring / critical classification

pub mod component;
pub mod ffs;
pub mod in_lieu_of;
pub mod nozzle;
pub mod status;
pub mod summary;

use serde::{Deserialize, Serialize};

use crate::equations::registry::{Equation, EquationTracker};
use crate::errors::{CalcError, CalcResult};
use crate::reference::ReferenceData;
use crate::settings::CalcSettings;

// Re-export commonly used types
pub use component::{ComponentInput, ComponentKind, ComponentResult, CorrosionBasis, ServiceCondition};
pub use ffs::{
    FfsVerdict, GeneralMetalLossInput, GeneralMetalLossResult, LocalThinAreaInput, LocalThinAreaResult,
};
pub use in_lieu_of::{InLieuOfInput, InLieuOfResult};
pub use nozzle::{GoverningCriterion, NozzleEvaluation, NozzleInput};
pub use status::ComponentStatus;
pub use summary::{summarize, VesselSummary};

/// Enum wrapper for all calculation types.
///
/// This allows storing heterogeneous calculations in a single collection
/// while maintaining type safety and clean serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    /// Shell or head evaluation
    Component(ComponentInput),
    /// Nozzle neck check
    Nozzle(NozzleInput),
    /// FFS Level 1 general metal loss
    GeneralMetalLoss(GeneralMetalLossInput),
    /// FFS Level 1 local thin area
    LocalThinArea(LocalThinAreaInput),
    /// On-stream inspection eligibility
    InLieuOf(InLieuOfInput),
}

impl CalculationItem {
    /// Get the user-provided label for this calculation
    pub fn label(&self) -> &str {
        match self {
            CalculationItem::Component(c) => &c.label,
            CalculationItem::Nozzle(n) => &n.label,
            CalculationItem::GeneralMetalLoss(g) => &g.label,
            CalculationItem::LocalThinArea(l) => &l.label,
            CalculationItem::InLieuOf(i) => &i.label,
        }
    }

    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::Component(_) => "Component",
            CalculationItem::Nozzle(_) => "Nozzle",
            CalculationItem::GeneralMetalLoss(_) => "GeneralMetalLoss",
            CalculationItem::LocalThinArea(_) => "LocalThinArea",
            CalculationItem::InLieuOf(_) => "InLieuOf",
        }
    }

    /// Run the calculation this item describes.
    pub fn evaluate(&self, reference: &ReferenceData, settings: &CalcSettings) -> CalcResult<CalculationOutput> {
        match self {
            CalculationItem::Component(input) => {
                component::calculate(input, reference, settings).map(CalculationOutput::Component)
            }
            CalculationItem::Nozzle(input) => {
                nozzle::calculate(input, reference, settings).map(CalculationOutput::Nozzle)
            }
            CalculationItem::GeneralMetalLoss(input) => {
                ffs::assess_general_metal_loss(input, settings).map(CalculationOutput::GeneralMetalLoss)
            }
            CalculationItem::LocalThinArea(input) => {
                ffs::assess_local_thin_area(input, settings).map(CalculationOutput::LocalThinArea)
            }
            CalculationItem::InLieuOf(input) => {
                in_lieu_of::assess(input, settings).map(CalculationOutput::InLieuOf)
            }
        }
    }
}

/// Result of evaluating a [`CalculationItem`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationOutput {
    Component(ComponentResult),
    Nozzle(NozzleEvaluation),
    GeneralMetalLoss(GeneralMetalLossResult),
    LocalThinArea(LocalThinAreaResult),
    InLieuOf(InLieuOfResult),
}

impl CalculationOutput {
    /// Pass/fail view of the output. Components pass unless critical.
    pub fn passes(&self) -> bool {
        match self {
            CalculationOutput::Component(r) => r.passes(),
            CalculationOutput::Nozzle(r) => r.acceptable,
            CalculationOutput::GeneralMetalLoss(r) => r.verdict == FfsVerdict::FitForService,
            CalculationOutput::LocalThinArea(r) => r.verdict == FfsVerdict::FitForService,
            CalculationOutput::InLieuOf(r) => r.eligible,
        }
    }

    /// Equations the evaluation applied, in first-use order.
    pub fn equations(&self) -> &[Equation] {
        match self {
            CalculationOutput::Component(r) => &r.equations,
            CalculationOutput::Nozzle(r) => &r.equations,
            CalculationOutput::GeneralMetalLoss(r) => &r.equations,
            CalculationOutput::LocalThinArea(r) => &r.equations,
            CalculationOutput::InLieuOf(_) => &[],
        }
    }

    /// Tracker attributing each applied equation to the item's label.
    pub fn equation_tracker(&self, label: &str, calc_type: &str) -> EquationTracker {
        let mut tracker = EquationTracker::new();
        for &equation in self.equations() {
            tracker.record_for_component(equation, calc_type, label);
        }
        tracker
    }
}

// =============================================================================
// INPUT VALIDATION HELPERS
// =============================================================================

pub(crate) fn ensure_finite(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() {
        return Err(CalcError::invalid_input(field, value.to_string(), "Value must be a finite number"));
    }
    Ok(())
}

pub(crate) fn ensure_positive(field: &str, value: f64) -> CalcResult<()> {
    ensure_finite(field, value)?;
    if value <= 0.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), "Value must be positive"));
    }
    Ok(())
}

pub(crate) fn ensure_non_negative(field: &str, value: f64) -> CalcResult<()> {
    ensure_finite(field, value)?;
    if value < 0.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), "Value cannot be negative"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equations::RemainingLife;

    #[test]
    fn test_calculation_item_json() {
        let json = r#"{
            "type": "Nozzle",
            "label": "N2",
            "nominal_size": "4",
            "schedule": "80",
            "actual_thickness_in": 0.30,
            "design_pressure_psi": 300.0,
            "design_temperature_f": 400.0,
            "material_spec": "SA-106-B"
        }"#;
        let item: CalculationItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.label(), "N2");
        assert_eq!(item.calc_type(), "Nozzle");

        let reference = ReferenceData::builtin().unwrap();
        let output = item.evaluate(&reference, &CalcSettings::default()).unwrap();
        assert!(matches!(output, CalculationOutput::Nozzle(_)));
        assert!(output.passes());

        let tracker = output.equation_tracker(item.label(), item.calc_type());
        assert_eq!(tracker.usages().len(), output.equations().len());
        assert!(tracker
            .usages()
            .iter()
            .all(|u| u.component_label.as_deref() == Some("N2")));
    }

    #[test]
    fn test_evaluate_propagates_errors() {
        let item = CalculationItem::InLieuOf(InLieuOfInput {
            label: "V-1".to_string(),
            corrosion_rate_mpy: -1.0,
            remaining_life: RemainingLife::Unlimited,
            service_history_years: 10.0,
            environmental_cracking_susceptible: false,
            strip_lined: false,
            operating_temperature_f: 200.0,
            questionable_conditions: false,
        });
        let reference = ReferenceData::builtin().unwrap();
        let err = item.evaluate(&reference, &CalcSettings::default()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_validation_helpers() {
        assert!(ensure_positive("x", 1.0).is_ok());
        assert!(ensure_positive("x", 0.0).is_err());
        assert!(ensure_positive("x", f64::NAN).is_err());
        assert!(ensure_non_negative("x", 0.0).is_ok());
        assert!(ensure_non_negative("x", f64::INFINITY).is_err());
    }
}
