//! # Fitness-for-Service Level 1 Screening
//!
//! API 579-1 Level 1 screens for a vessel that has lost wall:
//!
//! - **General metal loss** (Part 4): the measured wall must stay above
//!   tmin + FCA until the next inspection.
//! - **Local thin area** (Part 5): a thin patch is first gated on its
//!   circumferential extent, then assessed with the remaining strength
//!   factor, then screened as general metal loss at its thinnest reading.
//!
//! A wall below tmin is a terminal `NotFitForService` verdict, not an error.
//!
//! ## Example
//!
//! ```rust
//! use vessel_core::calculations::ffs::{assess_general_metal_loss, FfsVerdict, GeneralMetalLossInput};
//! use vessel_core::settings::CalcSettings;
//!
//! let input = GeneralMetalLossInput {
//!     label: "Shell 1".to_string(),
//!     minimum_required_thickness_in: 0.40,
//!     measured_thickness_in: 0.52,
//!     future_corrosion_allowance_in: 0.05,
//!     corrosion_rate_mpy: 5.0,
//!     operating_pressure_psi: 150.0,
//!     mawp_psi: 250.0,
//! };
//!
//! let result = assess_general_metal_loss(&input, &CalcSettings::default()).unwrap();
//! assert_eq!(result.verdict, FfsVerdict::FitForService);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::{ensure_non_negative, ensure_positive};
use crate::equations::registry::{Equation, EquationTracker};
use crate::equations::{ffs, life, RemainingLife};
use crate::errors::{CalcError, CalcResult};
use crate::settings::CalcSettings;

/// Level 1 outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FfsVerdict {
    /// Passes Level 1 at the current MAWP
    FitForService,
    /// Passes Level 1 only at a reduced MAWP
    FitAtReducedPressure,
    /// Level 1 criteria not met; a Level 2 or 3 assessment is required
    RequiresHigherLevel,
    /// Wall below tmin
    NotFitForService,
}

impl FfsVerdict {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            FfsVerdict::FitForService => "Fit for service",
            FfsVerdict::FitAtReducedPressure => "Fit for service at reduced MAWP",
            FfsVerdict::RequiresHigherLevel => "Requires Level 2/3 assessment",
            FfsVerdict::NotFitForService => "Not fit for service",
        }
    }
}

/// Advisory raised alongside a verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FfsWarning {
    /// Remaining life below the urgent threshold (2 years by default)
    UrgentReplacement { remaining_life_years: f64 },
    /// Remaining life below the monitoring threshold (5 years by default)
    Monitor { remaining_life_years: f64 },
    /// Operating pressure above the margin fraction of MAWP (0.9 by default)
    PressureMargin { operating_pressure_psi: f64, limit_psi: f64 },
}

// =============================================================================
// GENERAL METAL LOSS
// =============================================================================

/// Input for a general metal loss screen.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Shell 1",
///   "minimum_required_thickness_in": 0.40,
///   "measured_thickness_in": 0.52,
///   "future_corrosion_allowance_in": 0.05,
///   "corrosion_rate_mpy": 5.0,
///   "operating_pressure_psi": 150.0,
///   "mawp_psi": 250.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralMetalLossInput {
    pub label: String,
    /// tmin from the component evaluation (in)
    pub minimum_required_thickness_in: f64,
    /// Minimum measured thickness (in)
    pub measured_thickness_in: f64,
    /// Future corrosion allowance to the next inspection (in)
    #[serde(default)]
    pub future_corrosion_allowance_in: f64,
    /// Corrosion rate (mpy)
    pub corrosion_rate_mpy: f64,
    /// Normal operating pressure (psi)
    pub operating_pressure_psi: f64,
    /// MAWP at the measured thickness (psi)
    pub mawp_psi: f64,
}

impl GeneralMetalLossInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        ensure_positive("minimum_required_thickness_in", self.minimum_required_thickness_in)?;
        ensure_positive("measured_thickness_in", self.measured_thickness_in)?;
        ensure_non_negative("future_corrosion_allowance_in", self.future_corrosion_allowance_in)?;
        ensure_non_negative("corrosion_rate_mpy", self.corrosion_rate_mpy)?;
        ensure_non_negative("operating_pressure_psi", self.operating_pressure_psi)?;
        ensure_non_negative("mawp_psi", self.mawp_psi)?;
        Ok(())
    }
}

/// Results of a general metal loss screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralMetalLossResult {
    pub label: String,
    pub verdict: FfsVerdict,
    /// Why the verdict was assigned
    pub reason: String,
    /// tmin (in)
    pub minimum_required_thickness_in: f64,
    /// tmin + FCA (in)
    pub required_measured_thickness_in: f64,
    /// Echo of the measured thickness (in)
    pub measured_thickness_in: f64,
    /// Life to tmin + FCA; zero when not fit for service
    pub remaining_life: RemainingLife,
    /// Years to the next inspection; absent when not fit for service
    pub next_inspection_interval_years: Option<f64>,
    pub warnings: Vec<FfsWarning>,
    pub equations: Vec<Equation>,
}

/// Level 1 general metal loss screen (API 579-1 Part 4).
pub fn assess_general_metal_loss(
    input: &GeneralMetalLossInput,
    settings: &CalcSettings,
) -> CalcResult<GeneralMetalLossResult> {
    input.validate()?;
    let thresholds = &settings.ffs;
    let mut tracker = EquationTracker::new();

    let tmin = input.minimum_required_thickness_in;
    let measured = input.measured_thickness_in;
    tracker.record(Equation::FfsRequiredThickness, "general metal loss");
    let tmm = ffs::required_measured_thickness(tmin, input.future_corrosion_allowance_in);

    if measured < tmin {
        log::warn!(
            "'{}': measured {:.4}\" below tmin {:.4}\"; not fit for service",
            input.label,
            measured,
            tmin
        );
        return Ok(GeneralMetalLossResult {
            label: input.label.clone(),
            verdict: FfsVerdict::NotFitForService,
            reason: format!(
                "Measured thickness {:.4}\" is below minimum required {:.4}\"",
                measured, tmin
            ),
            minimum_required_thickness_in: tmin,
            required_measured_thickness_in: tmm,
            measured_thickness_in: measured,
            remaining_life: RemainingLife::Finite { years: 0.0 },
            next_inspection_interval_years: None,
            warnings: Vec::new(),
            equations: tracker.unique_equations(),
        });
    }

    tracker.record(Equation::RemainingLife, "general metal loss");
    let remaining = life::remaining_life(measured, tmm, input.corrosion_rate_mpy);
    tracker.record(Equation::HalfLifeInterval, "general metal loss");
    let interval = life::half_life_interval(
        remaining,
        thresholds.max_interval_years,
        thresholds.max_interval_years,
    );

    let (verdict, reason) = if measured >= tmm {
        (
            FfsVerdict::FitForService,
            format!(
                "Measured thickness {:.4}\" meets tmin + FCA = {:.4}\"",
                measured, tmm
            ),
        )
    } else {
        (
            FfsVerdict::RequiresHigherLevel,
            format!(
                "Measured thickness {:.4}\" is above tmin {:.4}\" but below tmin + FCA = {:.4}\"",
                measured, tmin, tmm
            ),
        )
    };

    let warnings = screen_warnings(remaining, input.operating_pressure_psi, input.mawp_psi, settings);

    Ok(GeneralMetalLossResult {
        label: input.label.clone(),
        verdict,
        reason,
        minimum_required_thickness_in: tmin,
        required_measured_thickness_in: tmm,
        measured_thickness_in: measured,
        remaining_life: remaining,
        next_inspection_interval_years: Some(interval.value()),
        warnings,
        equations: tracker.unique_equations(),
    })
}

fn screen_warnings(
    remaining: RemainingLife,
    operating_pressure_psi: f64,
    mawp_psi: f64,
    settings: &CalcSettings,
) -> Vec<FfsWarning> {
    let thresholds = &settings.ffs;
    let mut warnings = Vec::new();

    if let Some(years) = remaining.years() {
        if years < thresholds.urgent_life_years {
            warnings.push(FfsWarning::UrgentReplacement {
                remaining_life_years: years,
            });
        } else if years < thresholds.monitor_life_years {
            warnings.push(FfsWarning::Monitor {
                remaining_life_years: years,
            });
        }
    }

    let limit = thresholds.pressure_margin_ratio * mawp_psi;
    if operating_pressure_psi > limit {
        warnings.push(FfsWarning::PressureMargin {
            operating_pressure_psi,
            limit_psi: limit,
        });
    }
    warnings
}

// =============================================================================
// LOCAL THIN AREA
// =============================================================================

/// Input for a local thin area screen on a cylindrical shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalThinAreaInput {
    pub label: String,
    /// Shell inside diameter D (in)
    pub inside_diameter_in: f64,
    /// Longitudinal length s (in)
    pub longitudinal_length_in: f64,
    /// Circumferential width c (in)
    pub circumferential_width_in: f64,
    /// Uniform measured thickness away from the thin area, trd (in)
    pub uniform_thickness_in: f64,
    /// Minimum measured thickness inside the thin area, tmm (in)
    pub measured_thickness_in: f64,
    /// tmin from the component evaluation (in)
    pub minimum_required_thickness_in: f64,
    #[serde(default)]
    pub future_corrosion_allowance_in: f64,
    pub corrosion_rate_mpy: f64,
    pub operating_pressure_psi: f64,
    /// MAWP of the undamaged shell (psi)
    pub mawp_psi: f64,
}

impl LocalThinAreaInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        ensure_positive("inside_diameter_in", self.inside_diameter_in)?;
        ensure_positive("longitudinal_length_in", self.longitudinal_length_in)?;
        ensure_positive("circumferential_width_in", self.circumferential_width_in)?;
        ensure_positive("uniform_thickness_in", self.uniform_thickness_in)?;
        ensure_positive("measured_thickness_in", self.measured_thickness_in)?;
        if self.measured_thickness_in > self.uniform_thickness_in {
            return Err(CalcError::invalid_input(
                "measured_thickness_in",
                self.measured_thickness_in.to_string(),
                "Thin area reading cannot exceed the uniform thickness",
            ));
        }
        if self.uniform_thickness_in <= self.future_corrosion_allowance_in {
            return Err(CalcError::invalid_input(
                "future_corrosion_allowance_in",
                self.future_corrosion_allowance_in.to_string(),
                "Future corrosion allowance consumes the whole uniform wall",
            ));
        }
        self.general_screen_input(self.mawp_psi).validate()
    }

    fn general_screen_input(&self, mawp_psi: f64) -> GeneralMetalLossInput {
        GeneralMetalLossInput {
            label: self.label.clone(),
            minimum_required_thickness_in: self.minimum_required_thickness_in,
            measured_thickness_in: self.measured_thickness_in,
            future_corrosion_allowance_in: self.future_corrosion_allowance_in,
            corrosion_rate_mpy: self.corrosion_rate_mpy,
            operating_pressure_psi: self.operating_pressure_psi,
            mawp_psi,
        }
    }
}

/// Remaining strength detail for a thin area that passed the extent gate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LtaStrength {
    /// tc = trd − FCA (in)
    pub corroded_thickness_in: f64,
    /// Rt
    pub remaining_thickness_ratio: f64,
    /// λ
    pub shell_parameter: f64,
    /// Mt
    pub folias_factor: f64,
    /// RSF
    pub remaining_strength_factor: f64,
    /// Rt ≥ minimum ratio
    pub meets_ratio_limit: bool,
    /// tmm − FCA ≥ minimum absolute thickness
    pub meets_thickness_limit: bool,
    /// MAWP, reduced when RSF < RSFa (psi)
    pub permitted_mawp_psi: f64,
}

/// Results of a local thin area screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalThinAreaResult {
    pub label: String,
    pub verdict: FfsVerdict,
    pub reason: String,
    /// Circumferential extent (degrees)
    pub angular_extent_deg: f64,
    /// Absent when the extent gate sends the flaw to a higher level
    pub strength: Option<LtaStrength>,
    /// General metal loss screen at the thinnest reading
    pub general: Option<GeneralMetalLossResult>,
    pub equations: Vec<Equation>,
}

/// Level 1 local thin area screen (API 579-1 Part 5).
pub fn assess_local_thin_area(
    input: &LocalThinAreaInput,
    settings: &CalcSettings,
) -> CalcResult<LocalThinAreaResult> {
    input.validate()?;
    let thresholds = &settings.ffs;
    let mut tracker = EquationTracker::new();

    tracker.record(Equation::LtaAngularExtent, "local thin area");
    let extent = ffs::angular_extent_deg(input.circumferential_width_in, input.inside_diameter_in);
    if extent > thresholds.max_circumferential_extent_deg {
        log::debug!("'{}': thin area spans {:.1} deg; Level 1 not applicable", input.label, extent);
        return Ok(LocalThinAreaResult {
            label: input.label.clone(),
            verdict: FfsVerdict::RequiresHigherLevel,
            reason: format!(
                "Thin area spans {:.1}° of the circumference, more than the {:.0}° Level 1 limit",
                extent, thresholds.max_circumferential_extent_deg
            ),
            angular_extent_deg: extent,
            strength: None,
            general: None,
            equations: tracker.unique_equations(),
        });
    }

    let fca = input.future_corrosion_allowance_in;
    let tc = input.uniform_thickness_in - fca;
    tracker.record(Equation::LtaRemainingStrength, "local thin area");
    let rt = ffs::remaining_thickness_ratio(input.measured_thickness_in, fca, tc);
    let lambda = ffs::shell_parameter(input.longitudinal_length_in, input.inside_diameter_in, tc);
    let mt = ffs::folias_factor(lambda);
    let rsf = ffs::remaining_strength_factor(rt, mt);
    if rsf < thresholds.rsf_allowable {
        tracker.record(Equation::LtaReducedMawp, "local thin area");
    }
    let permitted_mawp = ffs::reduced_mawp(input.mawp_psi, rsf, thresholds.rsf_allowable);

    let strength = LtaStrength {
        corroded_thickness_in: tc,
        remaining_thickness_ratio: rt,
        shell_parameter: lambda,
        folias_factor: mt,
        remaining_strength_factor: rsf,
        meets_ratio_limit: rt >= thresholds.min_remaining_ratio,
        meets_thickness_limit: input.measured_thickness_in - fca >= thresholds.min_remaining_thickness_in,
        permitted_mawp_psi: permitted_mawp,
    };

    let general = assess_general_metal_loss(&input.general_screen_input(permitted_mawp), settings)?;
    for eq in &general.equations {
        tracker.record(*eq, "local thin area");
    }

    let (verdict, reason) = if general.verdict == FfsVerdict::NotFitForService {
        (FfsVerdict::NotFitForService, general.reason.clone())
    } else if !strength.meets_ratio_limit {
        (
            FfsVerdict::RequiresHigherLevel,
            format!(
                "Remaining thickness ratio {:.3} is below the {:.2} limit",
                rt, thresholds.min_remaining_ratio
            ),
        )
    } else if !strength.meets_thickness_limit {
        (
            FfsVerdict::RequiresHigherLevel,
            format!(
                "tmm - FCA = {:.4}\" is below the {:.2}\" limit",
                input.measured_thickness_in - fca,
                thresholds.min_remaining_thickness_in
            ),
        )
    } else if general.verdict == FfsVerdict::RequiresHigherLevel {
        (FfsVerdict::RequiresHigherLevel, general.reason.clone())
    } else if rsf < thresholds.rsf_allowable {
        (
            FfsVerdict::FitAtReducedPressure,
            format!(
                "RSF {:.3} is below RSFa {:.2}; MAWP reduced to {:.1} psi",
                rsf, thresholds.rsf_allowable, permitted_mawp
            ),
        )
    } else {
        (
            FfsVerdict::FitForService,
            format!("RSF {:.3} meets RSFa {:.2}", rsf, thresholds.rsf_allowable),
        )
    };

    Ok(LocalThinAreaResult {
        label: input.label.clone(),
        verdict,
        reason,
        angular_extent_deg: extent,
        strength: Some(strength),
        general: Some(general),
        equations: tracker.unique_equations(),
    })
}
