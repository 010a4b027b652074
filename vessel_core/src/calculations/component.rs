//! # Vessel Component Evaluation
//!
//! Evaluates one shell course or formed head from its design data and
//! thickness readings: allowable stress, required thickness, MAWP, corrosion
//! rate, remaining life, next inspection date and integrity status.
//!
//! ## Calculation Order
//!
//! ```text
//! stress lookup -> static head -> geometry factor -> t_min / MAWP
//!     -> external pressure (shells, optional) -> corrosion / life -> status
//! ```
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use vessel_core::calculations::component::{calculate, ComponentInput, ComponentKind};
//! use vessel_core::geometry::HeadType;
//! use vessel_core::reference::ReferenceData;
//! use vessel_core::settings::CalcSettings;
//!
//! let input = ComponentInput {
//!     label: "East Head".to_string(),
//!     design_pressure_psi: 250.0,
//!     design_temperature_f: 200.0,
//!     inside_diameter_in: 70.75,
//!     material_spec: "SA-516-70".to_string(),
//!     nominal_thickness_in: 0.625,
//!     actual_thickness_in: 0.536,
//!     corrosion_allowance_in: 0.0,
//!     joint_efficiency: 0.85,
//!     component: ComponentKind::Head { head: HeadType::Ellipsoidal },
//!     service: Default::default(),
//!     corrosion: None,
//!     evaluation_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
//! };
//!
//! let reference = ReferenceData::builtin().unwrap();
//! let result = calculate(&input, &reference, &CalcSettings::default()).unwrap();
//! assert!(result.minimum_required_thickness_in > 0.5);
//! ```

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calculations::status::{classify, ComponentStatus};
use crate::calculations::{ensure_finite, ensure_non_negative, ensure_positive};
use crate::equations::registry::{Equation, EquationTracker};
use crate::equations::{life, thickness, ExternalPressureCapacity, RemainingLife};
use crate::errors::{CalcError, CalcResult};
use crate::geometry::{resolve_head_factors, HeadFactors, HeadType};
use crate::materials::StressLookup;
use crate::reference::ReferenceData;
use crate::settings::CalcSettings;
use crate::units::{Feet, Years};

/// External pressure request for a shell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExternalPressureInput {
    /// External design pressure (psi), e.g. 15 for full vacuum
    pub external_pressure_psi: f64,
    /// Length between stiffening rings or head tangent lines (in)
    pub unsupported_length_in: f64,
}

/// Which kind of component is being evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ComponentKind {
    /// Cylindrical shell course
    Shell {
        /// Optional external pressure check
        #[serde(default)]
        external: Option<ExternalPressureInput>,
    },
    /// Formed head
    Head { head: HeadType },
}

impl ComponentKind {
    /// Plain shell with no external pressure check
    pub fn shell() -> Self {
        ComponentKind::Shell { external: None }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ComponentKind::Shell { .. } => "Shell",
            ComponentKind::Head { head } => head.display_name(),
        }
    }
}

/// Process service. Only liquid service adds static head.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "service", rename_all = "snake_case")]
pub enum ServiceCondition {
    /// Gas or vapor service (no static head)
    #[default]
    Vapor,
    /// Liquid column above the component
    Liquid {
        /// Specific gravity of the contents
        specific_gravity: f64,
        /// Liquid height above the component
        liquid_height_ft: Feet,
    },
}

/// How the corrosion rate is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "basis", rename_all = "snake_case")]
pub enum CorrosionBasis {
    /// Rate supplied directly (e.g. long-term rate from the TML history)
    Rate { rate_mpy: f64 },
    /// Rate derived from the previous reading and the current actual thickness
    History {
        previous_thickness_in: f64,
        previous_inspection_date: NaiveDate,
        current_inspection_date: NaiveDate,
    },
}

/// Input for one vessel component.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Shell 1",
///   "design_pressure_psi": 150.0,
///   "design_temperature_f": 300.0,
///   "inside_diameter_in": 60.0,
///   "material_spec": "SA-516-70",
///   "nominal_thickness_in": 0.5,
///   "actual_thickness_in": 0.47,
///   "corrosion_allowance_in": 0.125,
///   "joint_efficiency": 0.85,
///   "component": { "type": "shell" },
///   "service": { "service": "liquid", "specific_gravity": 0.9, "liquid_height_ft": 12.0 },
///   "corrosion": { "basis": "rate", "rate_mpy": 3.0 },
///   "evaluation_date": "2025-06-01"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentInput {
    /// User label (e.g., "Shell 1", "East Head")
    pub label: String,

    /// Internal design pressure (psi), before static head
    pub design_pressure_psi: f64,

    /// Design metal temperature (°F)
    pub design_temperature_f: f64,

    /// Inside diameter (in)
    pub inside_diameter_in: f64,

    /// Material specification, e.g. "SA-516-70"
    pub material_spec: String,

    /// Nominal (as-built) wall thickness (in)
    pub nominal_thickness_in: f64,

    /// Minimum measured thickness (in)
    pub actual_thickness_in: f64,

    /// Corrosion allowance (in)
    #[serde(default)]
    pub corrosion_allowance_in: f64,

    /// Weld joint efficiency E (0 < E <= 1)
    pub joint_efficiency: f64,

    /// Shell or head
    pub component: ComponentKind,

    /// Vapor or liquid service
    #[serde(default)]
    pub service: ServiceCondition,

    /// Corrosion rate basis; without it no life is projected
    #[serde(default)]
    pub corrosion: Option<CorrosionBasis>,

    /// Date the evaluation is made; the next inspection date counts from here
    pub evaluation_date: NaiveDate,
}

impl ComponentInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if self.label.trim().is_empty() {
            return Err(CalcError::invalid_input("label", "", "Label cannot be empty"));
        }
        ensure_positive("design_pressure_psi", self.design_pressure_psi)?;
        ensure_finite("design_temperature_f", self.design_temperature_f)?;
        ensure_positive("inside_diameter_in", self.inside_diameter_in)?;
        if self.material_spec.trim().is_empty() {
            return Err(CalcError::invalid_input(
                "material_spec",
                "",
                "Material specification cannot be empty",
            ));
        }
        ensure_positive("nominal_thickness_in", self.nominal_thickness_in)?;
        ensure_positive("actual_thickness_in", self.actual_thickness_in)?;
        ensure_non_negative("corrosion_allowance_in", self.corrosion_allowance_in)?;
        if !(self.joint_efficiency > 0.0 && self.joint_efficiency <= 1.0) {
            return Err(CalcError::invalid_input(
                "joint_efficiency",
                self.joint_efficiency.to_string(),
                "Joint efficiency must be greater than 0 and at most 1.0",
            ));
        }

        match self.component {
            ComponentKind::Shell { external: Some(ext) } => {
                ensure_positive("external_pressure_psi", ext.external_pressure_psi)?;
                ensure_positive("unsupported_length_in", ext.unsupported_length_in)?;
            }
            ComponentKind::Shell { external: None } => {}
            ComponentKind::Head { head } => {
                if let HeadType::Torispherical {
                    crown_radius_in,
                    knuckle_radius_in,
                } = head
                {
                    if let Some(crown) = crown_radius_in {
                        ensure_positive("crown_radius_in", crown)?;
                    }
                    if let Some(knuckle) = knuckle_radius_in {
                        ensure_positive("knuckle_radius_in", knuckle)?;
                    }
                }
            }
        }

        if let ServiceCondition::Liquid {
            specific_gravity,
            liquid_height_ft,
        } = self.service
        {
            ensure_positive("specific_gravity", specific_gravity)?;
            ensure_non_negative("liquid_height_ft", liquid_height_ft.value())?;
        }

        match self.corrosion {
            Some(CorrosionBasis::Rate { rate_mpy }) => {
                ensure_non_negative("rate_mpy", rate_mpy)?;
            }
            Some(CorrosionBasis::History {
                previous_thickness_in,
                previous_inspection_date,
                current_inspection_date,
            }) => {
                ensure_positive("previous_thickness_in", previous_thickness_in)?;
                if current_inspection_date <= previous_inspection_date {
                    return Err(CalcError::invalid_input(
                        "current_inspection_date",
                        current_inspection_date.to_string(),
                        format!(
                            "Current inspection must be after the previous inspection ({})",
                            previous_inspection_date
                        ),
                    ));
                }
            }
            None => {}
        }
        Ok(())
    }

    /// Inside radius R = D/2
    pub fn inside_radius_in(&self) -> f64 {
        self.inside_diameter_in / 2.0
    }

    /// Outside diameter from the nominal wall, Do = D + 2·t_nom
    pub fn outside_diameter_in(&self) -> f64 {
        self.inside_diameter_in + 2.0 * self.nominal_thickness_in
    }
}

/// External pressure sub-result for a shell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExternalPressureResult {
    /// Requested external pressure (psi)
    pub external_pressure_psi: f64,
    /// Chart ratios, factors and allowable pressure
    #[serde(flatten)]
    pub capacity: ExternalPressureCapacity,
    /// True when the allowable external pressure covers the request
    pub acceptable: bool,
}

/// Remaining-life projection, present when a corrosion basis was given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifeProjection {
    /// Corrosion rate (mpy); negative rates are reported as measured
    pub corrosion_rate_mpy: f64,
    /// Remaining life at that rate
    pub remaining_life: RemainingLife,
    /// Years until the next inspection
    pub inspection_interval_years: f64,
    /// Next inspection date
    pub next_inspection_date: NaiveDate,
    /// Thickness expected at the next inspection
    pub projected_thickness_in: f64,
}

/// Results for one vessel component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentResult {
    /// Echo of the input label
    pub label: String,
    /// Echo of the component kind
    pub component: ComponentKind,
    /// Echo of the minimum measured thickness (in)
    pub actual_thickness_in: f64,
    /// Echo of the nominal thickness (in)
    pub nominal_thickness_in: f64,
    /// Echo of the corrosion allowance (in)
    pub corrosion_allowance_in: f64,

    /// Allowable stress S (psi) at the design temperature
    pub allowable_stress_psi: f64,
    /// Full stress lookup, including interpolation bounds and any clamp note
    pub stress_lookup: StressLookup,

    /// Static head (psi), liquid service only
    pub static_head_pressure_psi: Option<f64>,
    /// Design pressure plus static head (psi); P in every formula
    pub total_design_pressure_psi: f64,

    /// Head L and factor (heads only)
    pub head_factors: Option<HeadFactors>,

    /// Minimum required thickness including corrosion allowance (in)
    pub minimum_required_thickness_in: f64,
    /// Internal MAWP at the measured thickness (psi)
    pub mawp_psi: f64,
    /// External pressure check (shells that requested it)
    pub external: Option<ExternalPressureResult>,

    /// Corrosion rate, remaining life and next inspection
    pub life: Option<LifeProjection>,

    /// Integrity status
    pub status: ComponentStatus,
    /// Why the status was assigned
    pub status_reason: String,

    /// Equations applied, in order
    pub equations: Vec<Equation>,
}

impl ComponentResult {
    /// Remaining life, if a corrosion basis was given
    pub fn remaining_life(&self) -> Option<RemainingLife> {
        self.life.as_ref().map(|l| l.remaining_life)
    }

    /// Next inspection date, if a corrosion basis was given
    pub fn next_inspection_date(&self) -> Option<NaiveDate> {
        self.life.as_ref().map(|l| l.next_inspection_date)
    }

    /// Check if the component passes (not critical)
    pub fn passes(&self) -> bool {
        self.status != ComponentStatus::Critical
    }
}

/// Evaluate one vessel component.
///
/// # Arguments
///
/// * `input` - Component design data and readings
/// * `reference` - Stress, pipe and chart tables
/// * `settings` - Inspection policy and physical constants
///
/// # Returns
///
/// * `Ok(ComponentResult)` - Calculation results; a wall below t_min is a
///   `Critical` result, not an error
/// * `Err(CalcError)` - Invalid input, unknown material or invalid geometry
pub fn calculate(
    input: &ComponentInput,
    reference: &ReferenceData,
    settings: &CalcSettings,
) -> CalcResult<ComponentResult> {
    input.validate()?;
    log::debug!("evaluating {} '{}'", input.component.display_name(), input.label);

    let mut tracker = EquationTracker::new();

    let lookup = reference
        .stress_at(&input.material_spec, input.design_temperature_f)
        .ok_or_else(|| CalcError::material_not_found(&input.material_spec))?;
    let s = lookup.allowable_stress_psi;
    let e = input.joint_efficiency;
    let ca = input.corrosion_allowance_in;
    let t = input.actual_thickness_in;

    // Design pressure
    let static_head = match input.service {
        ServiceCondition::Vapor => None,
        ServiceCondition::Liquid {
            specific_gravity,
            liquid_height_ft,
        } => {
            tracker.record(Equation::StaticHead, "liquid service");
            Some(thickness::static_head_pressure(
                specific_gravity,
                liquid_height_ft,
                settings.physical.static_head_psi_per_ft,
            ))
        }
    };
    let p = input.design_pressure_psi + static_head.unwrap_or(0.0);

    // Thickness and MAWP
    let (t_min, mawp, head_factors, external) = match input.component {
        ComponentKind::Shell { external } => {
            let r = input.inside_radius_in();
            tracker.record(Equation::ShellMinThickness, "internal pressure");
            let t_min = thickness::shell_min_thickness(p, r, s, e, ca)?;
            tracker.record(Equation::ShellMawp, "internal pressure");
            let mawp = thickness::shell_mawp(t, r, s, e, ca)?;

            let external = match external {
                Some(ext) => {
                    tracker.record(Equation::ExternalPressureAllowable, "external pressure");
                    let capacity = thickness::external_pressure_mawp(
                        ext.unsupported_length_in,
                        input.outside_diameter_in(),
                        t - ca,
                        &reference.charts,
                        settings.physical.elastic_modulus_psi,
                    )?;
                    Some(ExternalPressureResult {
                        external_pressure_psi: ext.external_pressure_psi,
                        acceptable: capacity.mawp_psi >= ext.external_pressure_psi,
                        capacity,
                    })
                }
                None => None,
            };
            (t_min, mawp, None, external)
        }
        ComponentKind::Head { head } => {
            let factors = resolve_head_factors(
                &head,
                input.inside_diameter_in,
                settings.physical.default_knuckle_ratio,
            )?;
            if matches!(head, HeadType::Torispherical { .. }) {
                tracker.record(Equation::TorisphericalM, "head factor");
            }
            let length = factors.effective_length_in();
            tracker.record(Equation::HeadMinThickness, "internal pressure");
            let t_min = thickness::head_min_thickness(p, length, s, e, ca)?;
            tracker.record(Equation::HeadMawp, "internal pressure");
            let mawp = thickness::head_mawp(t, length, s, e, ca)?;
            (t_min, mawp, Some(factors), None)
        }
    };

    let life = match input.corrosion {
        Some(basis) => Some(project_life(input, basis, t_min, settings, &mut tracker)?),
        None => None,
    };

    let assessment = classify(t, t_min, ca, settings.inspection.monitoring_band_fraction);
    if assessment.status == ComponentStatus::Critical {
        log::warn!("'{}': {}", input.label, assessment.reason);
    }

    Ok(ComponentResult {
        label: input.label.clone(),
        component: input.component,
        actual_thickness_in: t,
        nominal_thickness_in: input.nominal_thickness_in,
        corrosion_allowance_in: ca,
        allowable_stress_psi: s,
        stress_lookup: lookup,
        static_head_pressure_psi: static_head,
        total_design_pressure_psi: p,
        head_factors,
        minimum_required_thickness_in: t_min,
        mawp_psi: mawp,
        external,
        life,
        status: assessment.status,
        status_reason: assessment.reason,
        equations: tracker.unique_equations(),
    })
}

/// Corrosion rate, remaining life, interval and next inspection date.
fn project_life(
    input: &ComponentInput,
    basis: CorrosionBasis,
    t_min: f64,
    settings: &CalcSettings,
    tracker: &mut EquationTracker,
) -> CalcResult<LifeProjection> {
    let rate = match basis {
        CorrosionBasis::Rate { rate_mpy } => rate_mpy,
        CorrosionBasis::History {
            previous_thickness_in,
            previous_inspection_date,
            current_inspection_date,
        } => {
            tracker.record(Equation::CorrosionRate, "thickness history");
            let span = Years::from_days((current_inspection_date - previous_inspection_date).num_days());
            life::corrosion_rate_mpy(previous_thickness_in, input.actual_thickness_in, span.value())?
        }
    };

    tracker.record(Equation::RemainingLife, "corrosion");
    let remaining = life::remaining_life(input.actual_thickness_in, t_min, rate);

    tracker.record(Equation::HalfLifeInterval, "inspection planning");
    let interval = life::half_life_interval(
        remaining,
        settings.inspection.max_interval_years,
        settings.inspection.unlimited_life_interval_years,
    );
    let next_inspection_date = Duration::try_days(interval.to_days())
        .and_then(|span| input.evaluation_date.checked_add_signed(span))
        .ok_or_else(|| {
            CalcError::invalid_input(
                "inspection_interval_years",
                interval.value().to_string(),
                "Next inspection date is outside the supported calendar range",
            )
        })?;

    tracker.record(Equation::ProjectedThickness, "inspection planning");
    let projected = life::projected_thickness(input.actual_thickness_in, rate, interval);

    log::debug!(
        "'{}': rate {:.2} mpy, remaining life {}, next inspection {}",
        input.label,
        rate,
        remaining,
        next_inspection_date
    );

    Ok(LifeProjection {
        corrosion_rate_mpy: rate,
        remaining_life: remaining,
        inspection_interval_years: interval.value(),
        next_inspection_date,
        projected_thickness_in: projected,
    })
}
