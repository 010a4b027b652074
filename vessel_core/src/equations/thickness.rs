//! # Wall Thickness and MAWP Formulas (ASME VIII-1)
//!
//! Internal pressure formulas for cylindrical shells (UG-27(c)(1),
//! circumferential stress) and formed heads (UG-32 / Appendix 1-4), the
//! hydrostatic head adjustment, and the external pressure check (UG-28).
//!
//! ## Notation
//!
//! - `P` = internal design pressure, including static head (psi)
//! - `R` = inside radius (in)
//! - `L` = head characteristic length (in), see [`crate::geometry::heads`]
//! - `S` = allowable stress (psi)
//! - `E` = joint efficiency
//! - `CA` = corrosion allowance (in)
//! - `t` = thickness (in)
//!
//! Every thickness formula is the algebraic inverse of its MAWP formula: the
//! minimum thickness fed back into MAWP (with CA = 0) returns P.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::geometry::ExternalPressureCharts;
use crate::units::Feet;

// =============================================================================
// INTERNAL PRESSURE: CYLINDRICAL SHELL
// =============================================================================

/// Minimum required shell thickness, UG-27(c)(1)
///
/// # Formula
/// t = P·R / (S·E − 0.6·P) + CA
///
/// # Errors
/// `InvalidGeometry` when S·E ≤ 0.6·P: the material cannot carry the
/// pressure at this joint efficiency.
///
/// # Example
/// ```rust
/// use vessel_core::equations::thickness::shell_min_thickness;
///
/// // 250 psi, 36" radius, SA-516-70 (20 ksi), full RT
/// let t = shell_min_thickness(250.0, 36.0, 20000.0, 1.0, 0.125).unwrap();
/// assert!((t - 0.5784).abs() < 1e-4);
/// ```
pub fn shell_min_thickness(p: f64, r: f64, s: f64, e: f64, ca: f64) -> CalcResult<f64> {
    let denominator = s * e - 0.6 * p;
    if denominator <= 0.0 {
        log::warn!("shell thickness denominator S*E - 0.6P = {:.1} <= 0", denominator);
        return Err(CalcError::invalid_geometry(
            "shell minimum thickness",
            denominator,
            format!(
                "S*E ({:.0} psi) must exceed 0.6*P ({:.1} psi)",
                s * e,
                0.6 * p
            ),
        ));
    }
    Ok(p * r / denominator + ca)
}

/// Shell MAWP at a measured thickness, UG-27(c)(1) rearranged
///
/// # Formula
/// MAWP = S·E·(t − CA) / (R + 0.6·(t − CA))
///
/// Returns 0.0 when the corrosion allowance has consumed the measured wall
/// (t ≤ CA): no pressure capacity remains.
pub fn shell_mawp(t: f64, r: f64, s: f64, e: f64, ca: f64) -> CalcResult<f64> {
    let tc = t - ca;
    if tc <= 0.0 {
        return Ok(0.0);
    }
    let denominator = r + 0.6 * tc;
    if denominator <= 0.0 {
        return Err(CalcError::invalid_geometry(
            "shell MAWP",
            denominator,
            "R + 0.6(t - CA) must be positive",
        ));
    }
    Ok(s * e * tc / denominator)
}

// =============================================================================
// INTERNAL PRESSURE: FORMED HEADS
// =============================================================================

/// Minimum required head thickness, UG-32 / Appendix 1-4(d)
///
/// # Formula
/// t = P·L·factor / (2·S·E − 0.2·P) + CA
///
/// `effective_length` is L × factor from
/// [`HeadFactors::effective_length_in`](crate::geometry::HeadFactors::effective_length_in).
///
/// # Errors
/// `InvalidGeometry` when 2·S·E ≤ 0.2·P.
pub fn head_min_thickness(p: f64, effective_length: f64, s: f64, e: f64, ca: f64) -> CalcResult<f64> {
    let denominator = 2.0 * s * e - 0.2 * p;
    if denominator <= 0.0 {
        log::warn!("head thickness denominator 2SE - 0.2P = {:.1} <= 0", denominator);
        return Err(CalcError::invalid_geometry(
            "head minimum thickness",
            denominator,
            format!(
                "2*S*E ({:.0} psi) must exceed 0.2*P ({:.1} psi)",
                2.0 * s * e,
                0.2 * p
            ),
        ));
    }
    Ok(p * effective_length / denominator + ca)
}

/// Head MAWP at a measured thickness
///
/// # Formula
/// MAWP = 2·S·E·(t − CA) / (L·factor + 0.2·(t − CA))
///
/// Returns 0.0 when t ≤ CA.
pub fn head_mawp(t: f64, effective_length: f64, s: f64, e: f64, ca: f64) -> CalcResult<f64> {
    let tc = t - ca;
    if tc <= 0.0 {
        return Ok(0.0);
    }
    let denominator = effective_length + 0.2 * tc;
    if denominator <= 0.0 {
        return Err(CalcError::invalid_geometry(
            "head MAWP",
            denominator,
            "L*factor + 0.2(t - CA) must be positive",
        ));
    }
    Ok(2.0 * s * e * tc / denominator)
}

// =============================================================================
// STATIC HEAD
// =============================================================================

/// Hydrostatic pressure of a liquid column
///
/// # Formula
/// P_static = SG × h × 0.433 (psi per ft of water)
#[inline]
pub fn static_head_pressure(specific_gravity: f64, liquid_height: Feet, psi_per_ft: f64) -> f64 {
    specific_gravity * liquid_height.value() * psi_per_ft
}

// =============================================================================
// PIPE WALL
// =============================================================================

/// Nominal pipe wall less the manufacturing under-tolerance (ASME B36.10M)
///
/// # Formula
/// t_pipe = t_nom × (1 − tolerance), tolerance = 0.125 for seamless pipe
#[inline]
pub fn pipe_wall_less_tolerance(nominal_wall: f64, mill_tolerance: f64) -> f64 {
    nominal_wall * (1.0 - mill_tolerance)
}

// =============================================================================
// EXTERNAL PRESSURE: CYLINDRICAL SHELL
// =============================================================================

/// Intermediate values and result of the UG-28 external pressure check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExternalPressureCapacity {
    /// L / Do
    pub l_over_do: f64,
    /// Do / t
    pub do_over_t: f64,
    /// Factor A (from L/Do)
    pub factor_a: f64,
    /// Factor B (from Do/t), psi
    pub factor_b_psi: f64,
    /// Pa1 = 4B / (3·Do/t)
    pub pa1_psi: f64,
    /// Pa2 = 2·A·E / (3·(Do/t − 1))
    pub pa2_psi: f64,
    /// Allowable external pressure: min(Pa1, Pa2)
    pub mawp_psi: f64,
    /// True when either ratio fell outside its chart and was clamped
    pub chart_clamped: bool,
}

/// Allowable external pressure for a cylindrical shell, UG-28
///
/// # Formula
/// Pa1 = 4B / (3·(Do/t)), Pa2 = 2·A·E / (3·(Do/t − 1)), Pa = min(Pa1, Pa2)
///
/// # Arguments
/// * `unsupported_length` - L between stiffening rings or head tangent lines (in)
/// * `outside_diameter` - Do (in)
/// * `t` - corroded wall thickness (in)
/// * `elastic_modulus` - E (psi)
pub fn external_pressure_mawp(
    unsupported_length: f64,
    outside_diameter: f64,
    t: f64,
    charts: &ExternalPressureCharts,
    elastic_modulus: f64,
) -> CalcResult<ExternalPressureCapacity> {
    if !(t > 0.0) {
        return Err(CalcError::invalid_input(
            "thickness",
            t.to_string(),
            "Corroded thickness must be positive for the external pressure check",
        ));
    }
    let l_over_do = unsupported_length / outside_diameter;
    let do_over_t = outside_diameter / t;
    if do_over_t <= 1.0 {
        return Err(CalcError::invalid_geometry(
            "external pressure Pa2",
            do_over_t - 1.0,
            "Do/t must exceed 1",
        ));
    }

    let factor_a = charts.factor_a.factor_at(l_over_do);
    let factor_b = charts.factor_b.factor_at(do_over_t);
    let chart_clamped =
        charts.factor_a.is_outside_range(l_over_do) || charts.factor_b.is_outside_range(do_over_t);
    if chart_clamped {
        log::warn!(
            "external pressure ratios outside chart range (L/Do = {:.3}, Do/t = {:.1}); endpoint used",
            l_over_do,
            do_over_t
        );
    }

    let pa1 = 4.0 * factor_b / (3.0 * do_over_t);
    let pa2 = 2.0 * factor_a * elastic_modulus / (3.0 * (do_over_t - 1.0));

    Ok(ExternalPressureCapacity {
        l_over_do,
        do_over_t,
        factor_a,
        factor_b_psi: factor_b,
        pa1_psi: pa1,
        pa2_psi: pa2,
        mawp_psi: pa1.min(pa2),
        chart_clamped,
    })
}
