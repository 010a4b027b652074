//! # Nozzle Neck Evaluation
//!
//! Checks a nozzle neck made from schedule pipe (ASME VIII-1 UG-45). The
//! required wall is the larger of:
//!
//! - the shell formula thickness for the pipe bore, with E = 1.0
//! - the schedule wall less the 12.5% mill under-tolerance
//!
//! At low pressure the pipe schedule almost always governs.
//!
//! ## Example
//!
//! ```rust
//! use vessel_core::calculations::nozzle::{calculate, GoverningCriterion, NozzleInput};
//! use vessel_core::reference::ReferenceData;
//! use vessel_core::settings::CalcSettings;
//!
//! let input = NozzleInput {
//!     label: "N1".to_string(),
//!     nominal_size: "2".to_string(),
//!     schedule: "40".to_string(),
//!     actual_thickness_in: 0.150,
//!     design_pressure_psi: 150.0,
//!     design_temperature_f: 300.0,
//!     material_spec: "SA-106-B".to_string(),
//!     corrosion_allowance_in: 0.0,
//! };
//!
//! let reference = ReferenceData::builtin().unwrap();
//! let result = calculate(&input, &reference, &CalcSettings::default()).unwrap();
//! assert_eq!(result.governing, GoverningCriterion::PipeSchedule);
//! assert!(result.acceptable);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::{ensure_finite, ensure_non_negative, ensure_positive};
use crate::equations::registry::{Equation, EquationTracker};
use crate::equations::thickness;
use crate::errors::{CalcError, CalcResult};
use crate::materials::PipeDimensions;
use crate::reference::ReferenceData;
use crate::settings::CalcSettings;

/// Seamless pipe: no longitudinal weld
const SEAMLESS_JOINT_EFFICIENCY: f64 = 1.0;

/// Input for a nozzle neck.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "N1",
///   "nominal_size": "2",
///   "schedule": "40",
///   "actual_thickness_in": 0.150,
///   "design_pressure_psi": 150.0,
///   "design_temperature_f": 300.0,
///   "material_spec": "SA-106-B"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NozzleInput {
    /// User label (e.g., "N1", "Manway")
    pub label: String,
    /// Nominal pipe size, e.g. "2", "1-1/2", "NPS 6"
    pub nominal_size: String,
    /// Schedule class, e.g. "40", "STD", "XS"
    pub schedule: String,
    /// Minimum measured neck thickness (in)
    pub actual_thickness_in: f64,
    /// Design pressure (psi)
    pub design_pressure_psi: f64,
    /// Design temperature (°F)
    pub design_temperature_f: f64,
    /// Neck material specification
    pub material_spec: String,
    /// Corrosion allowance added to the pressure thickness (in)
    #[serde(default)]
    pub corrosion_allowance_in: f64,
}

impl NozzleInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if self.nominal_size.trim().is_empty() {
            return Err(CalcError::invalid_input("nominal_size", "", "Nominal size cannot be empty"));
        }
        if self.schedule.trim().is_empty() {
            return Err(CalcError::invalid_input("schedule", "", "Schedule cannot be empty"));
        }
        ensure_positive("actual_thickness_in", self.actual_thickness_in)?;
        ensure_positive("design_pressure_psi", self.design_pressure_psi)?;
        ensure_finite("design_temperature_f", self.design_temperature_f)?;
        ensure_non_negative("corrosion_allowance_in", self.corrosion_allowance_in)?;
        Ok(())
    }
}

/// Which criterion set the required nozzle wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoverningCriterion {
    /// Pressure design thickness
    PressureDesign,
    /// Schedule wall less mill tolerance
    PipeSchedule,
}

/// Results for a nozzle neck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NozzleEvaluation {
    /// Echo of the input label
    pub label: String,
    /// Pipe dimensions from the schedule table
    pub pipe: PipeDimensions,
    /// Bore diameter, OD − 2·wall (in)
    pub inside_diameter_in: f64,
    /// Allowable stress at design temperature (psi)
    pub allowable_stress_psi: f64,
    /// Shell formula thickness with E = 1.0, including CA (in)
    pub pressure_design_thickness_in: f64,
    /// Schedule wall × (1 − mill tolerance) (in)
    pub pipe_minus_tolerance_in: f64,
    /// Larger of the two (in)
    pub minimum_required_thickness_in: f64,
    /// Which criterion governs
    pub governing: GoverningCriterion,
    /// Echo of the measured thickness (in)
    pub actual_thickness_in: f64,
    /// actual ≥ minimum required
    pub acceptable: bool,
    /// Equations applied, in order
    pub equations: Vec<Equation>,
}

/// Evaluate a nozzle neck.
///
/// # Returns
///
/// * `Ok(NozzleEvaluation)` - Calculation results
/// * `Err(CalcError)` - Unknown pipe size/schedule or material, invalid input
pub fn calculate(
    input: &NozzleInput,
    reference: &ReferenceData,
    settings: &CalcSettings,
) -> CalcResult<NozzleEvaluation> {
    input.validate()?;
    log::debug!(
        "evaluating nozzle '{}' (NPS {} Sch {})",
        input.label,
        input.nominal_size,
        input.schedule
    );

    let pipe = reference.pipes.lookup(&input.nominal_size, &input.schedule)?;
    let lookup = reference
        .stress_at(&input.material_spec, input.design_temperature_f)
        .ok_or_else(|| CalcError::material_not_found(&input.material_spec))?;

    let mut tracker = EquationTracker::new();

    tracker.record_for_component(Equation::ShellMinThickness, "pressure design", &input.label);
    let pressure_thickness = thickness::shell_min_thickness(
        input.design_pressure_psi,
        pipe.inside_radius_in(),
        lookup.allowable_stress_psi,
        SEAMLESS_JOINT_EFFICIENCY,
        input.corrosion_allowance_in,
    )?;

    tracker.record_for_component(Equation::PipeWallLessTolerance, "pipe schedule", &input.label);
    let pipe_thickness =
        thickness::pipe_wall_less_tolerance(pipe.wall_thickness_in, settings.physical.mill_tolerance);

    tracker.record_for_component(Equation::NozzleGoverningThickness, "governing", &input.label);
    let (minimum_required, governing) = if pressure_thickness > pipe_thickness {
        (pressure_thickness, GoverningCriterion::PressureDesign)
    } else {
        (pipe_thickness, GoverningCriterion::PipeSchedule)
    };

    let acceptable = input.actual_thickness_in >= minimum_required;
    if !acceptable {
        log::warn!(
            "nozzle '{}': {:.4}\" below required {:.4}\"",
            input.label,
            input.actual_thickness_in,
            minimum_required
        );
    }

    Ok(NozzleEvaluation {
        label: input.label.clone(),
        inside_diameter_in: pipe.inside_diameter_in(),
        pipe,
        allowable_stress_psi: lookup.allowable_stress_psi,
        pressure_design_thickness_in: pressure_thickness,
        pipe_minus_tolerance_in: pipe_thickness,
        minimum_required_thickness_in: minimum_required,
        governing,
        actual_thickness_in: input.actual_thickness_in,
        acceptable,
        equations: tracker.unique_equations(),
    })
}
