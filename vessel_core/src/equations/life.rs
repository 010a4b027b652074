//! # Corrosion Rate and Remaining Life Formulas (API 510)
//!
//! ## Notation
//!
//! - `t_prev`, `t_curr` = thickness readings at two inspections (in)
//! - `Δy` = time between readings in 365.25-day years
//! - `CR` = corrosion rate (mils per year)
//! - `t_act` = current minimum measured thickness (in)
//! - `t_req` = minimum required thickness (in)
//!
//! A non-positive corrosion rate means no measurable metal loss. Remaining
//! life is then unbounded and reported as [`RemainingLife::Unlimited`], never
//! as a large finite number or a division by zero.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::{Inches, InchesPerYear, Mils, MilsPerYear, Years};

/// Remaining service life at the current corrosion rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RemainingLife {
    /// Finite life in years (never negative)
    Finite { years: f64 },
    /// No measurable metal loss
    Unlimited,
}

impl RemainingLife {
    /// Years of life, `None` when unlimited
    pub fn years(&self) -> Option<f64> {
        match self {
            RemainingLife::Finite { years } => Some(*years),
            RemainingLife::Unlimited => None,
        }
    }

    /// True when no metal loss was measured
    pub fn is_unlimited(&self) -> bool {
        matches!(self, RemainingLife::Unlimited)
    }

    /// True when life is finite and shorter than `years`
    pub fn is_less_than(&self, years: f64) -> bool {
        self.years().is_some_and(|y| y < years)
    }
}

impl std::fmt::Display for RemainingLife {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RemainingLife::Finite { years } => write!(f, "{:.1} years", years),
            RemainingLife::Unlimited => write!(f, "unlimited (no measured metal loss)"),
        }
    }
}

/// Corrosion rate from two thickness readings
///
/// # Formula
/// CR = (t_prev − t_curr) / Δy × 1000 (mpy)
///
/// A negative result (thickness "grew") is returned as-is; it is a
/// measurement artifact and [`remaining_life`] treats it as no loss.
///
/// # Errors
/// `InvalidInput` when the span is not positive.
///
/// # Example
/// ```rust
/// use vessel_core::equations::life::corrosion_rate_mpy;
///
/// // 0.030" lost over 3 years
/// let cr = corrosion_rate_mpy(0.566, 0.536, 3.0).unwrap();
/// assert!((cr - 10.0).abs() < 1e-9);
/// ```
pub fn corrosion_rate_mpy(previous_thickness: f64, current_thickness: f64, span_years: f64) -> CalcResult<f64> {
    if !(span_years > 0.0) {
        return Err(CalcError::invalid_input(
            "inspection dates",
            format!("{:.3} years", span_years),
            "Current inspection must be after the previous inspection",
        ));
    }
    let loss = Inches(previous_thickness - current_thickness);
    let rate = InchesPerYear(loss.0 / span_years);
    Ok(MilsPerYear::from(rate).value())
}

/// Remaining life at a constant corrosion rate
///
/// # Formula
/// RL = (t_act − t_req) / (CR / 1000)
///
/// Clamped at zero when the wall is already below t_req.
pub fn remaining_life(actual_thickness: f64, required_thickness: f64, rate_mpy: f64) -> RemainingLife {
    if rate_mpy <= 0.0 {
        return RemainingLife::Unlimited;
    }
    let margin = Mils::from(Inches(actual_thickness - required_thickness));
    let years = margin.0 / rate_mpy;
    RemainingLife::Finite {
        years: years.max(0.0),
    }
}

/// Half-life inspection interval
///
/// # Formula
/// interval = min(RL / 2, max_interval); `unlimited_interval` when RL is unlimited
pub fn half_life_interval(life: RemainingLife, max_interval_years: f64, unlimited_interval_years: f64) -> Years {
    match life {
        RemainingLife::Finite { years } => Years((years / 2.0).min(max_interval_years)),
        RemainingLife::Unlimited => Years(unlimited_interval_years),
    }
}

/// Thickness expected after `interval` at a constant rate (never below zero)
pub fn projected_thickness(actual_thickness: f64, rate_mpy: f64, interval: Years) -> f64 {
    let loss = InchesPerYear::from(MilsPerYear(rate_mpy.max(0.0))) * interval;
    (actual_thickness - loss.0).max(0.0)
}
