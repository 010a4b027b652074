//! # Fitness-for-Service Level 1 Formulas (API 579-1 Parts 4 and 5)
//!
//! ## Notation
//!
//! - `tmin` = minimum required thickness (in)
//! - `FCA` = future corrosion allowance (in)
//! - `tmm` = minimum measured thickness (in)
//! - `trd` = uniform measured thickness away from a local thin area (in)
//! - `tc` = corroded wall thickness, trd − FCA (in)
//! - `s` = longitudinal length of the thin area (in)
//! - `c` = circumferential width of the thin area (in)
//! - `D` = inside diameter (in)

use std::f64::consts::PI;

/// Minimum thickness the wall must keep to last until the next inspection
///
/// # Formula
/// t_req = tmin + FCA
#[inline]
pub fn required_measured_thickness(tmin: f64, future_corrosion_allowance: f64) -> f64 {
    tmin + future_corrosion_allowance
}

/// Circumferential extent of a thin area in degrees
///
/// # Formula
/// θ = c / (π·D) × 360
///
/// # Example
/// ```rust
/// use vessel_core::equations::ffs::angular_extent_deg;
///
/// // Half the circumference
/// let theta = angular_extent_deg(std::f64::consts::PI * 30.0, 60.0);
/// assert!((theta - 180.0).abs() < 1e-9);
/// ```
#[inline]
pub fn angular_extent_deg(flaw_width_in: f64, diameter_in: f64) -> f64 {
    flaw_width_in / (PI * diameter_in) * 360.0
}

/// Remaining thickness ratio, Part 5 Eq. 5.5
///
/// # Formula
/// Rt = (tmm − FCA) / tc
#[inline]
pub fn remaining_thickness_ratio(tmm: f64, future_corrosion_allowance: f64, tc: f64) -> f64 {
    (tmm - future_corrosion_allowance) / tc
}

/// Longitudinal flaw length parameter, Part 5 Eq. 5.6
///
/// # Formula
/// λ = 1.285·s / √(D·tc)
#[inline]
pub fn shell_parameter(flaw_length_in: f64, diameter_in: f64, tc: f64) -> f64 {
    1.285 * flaw_length_in / (diameter_in * tc).sqrt()
}

/// Folias bulging factor for a cylindrical shell
///
/// # Formula
/// Mt = √(1 + 0.48·λ²)
#[inline]
pub fn folias_factor(lambda: f64) -> f64 {
    (1.0 + 0.48 * lambda * lambda).sqrt()
}

/// Remaining strength factor, Part 5 Eq. 5.11
///
/// # Formula
/// RSF = Rt / (1 − (1/Mt)(1 − Rt))
///
/// Bounded to [0, 1]. Rt ≤ 0 (no wall left once FCA is removed) gives 0.
pub fn remaining_strength_factor(rt: f64, mt: f64) -> f64 {
    if rt <= 0.0 {
        return 0.0;
    }
    (rt / (1.0 - (1.0 - rt) / mt)).min(1.0)
}

/// Reduced MAWP when the RSF falls short of the allowable
///
/// # Formula
/// MAWPr = MAWP × RSF / RSFa (never above MAWP)
pub fn reduced_mawp(mawp: f64, rsf: f64, rsf_allowable: f64) -> f64 {
    if rsf >= rsf_allowable {
        mawp
    } else {
        mawp * rsf / rsf_allowable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_measured_thickness() {
        assert!((required_measured_thickness(0.40, 0.0625) - 0.4625).abs() < 1e-12);
    }

    #[test]
    fn test_angular_extent() {
        let d = 48.0;
        let full = angular_extent_deg(PI * d, d);
        assert!((full - 360.0).abs() < 1e-9);
        assert!(angular_extent_deg(10.0, d) < 30.0);
    }

    #[test]
    fn test_short_flaw_has_folias_near_one() {
        let lambda = shell_parameter(0.5, 96.0, 0.5);
        assert!(folias_factor(lambda) < 1.01);
    }

    #[test]
    fn test_rsf_bounds() {
        // No thinning: RSF = 1
        assert!((remaining_strength_factor(1.0, 1.5) - 1.0).abs() < 1e-12);
        // Very long flaw (Mt -> large): RSF -> Rt
        let rsf = remaining_strength_factor(0.6, 1e9);
        assert!((rsf - 0.6).abs() < 1e-6);
        // In between, RSF sits between Rt and 1
        let rsf = remaining_strength_factor(0.6, 2.0);
        assert!(rsf > 0.6 && rsf < 1.0);
    }

    #[test]
    fn test_rsf_without_remaining_wall() {
        assert_eq!(remaining_strength_factor(0.0, 1.5), 0.0);
        assert_eq!(remaining_strength_factor(-0.02, 4.0), 0.0);
        // 1 - (1 - Rt)/Mt goes negative here without the bound
        assert_eq!(remaining_strength_factor(-0.5, 1.0), 0.0);
        assert!(remaining_strength_factor(1.2, 1.5) <= 1.0);
    }

    #[test]
    fn test_rsf_worked_value() {
        // D = 60, tc = 0.5, s = 6 -> λ = 1.285*6/sqrt(30) = 1.40766
        let lambda = shell_parameter(6.0, 60.0, 0.5);
        assert!((lambda - 1.40766).abs() < 1e-4);
        // Mt = sqrt(1 + 0.48 * 1.98147) = 1.39682
        let mt = folias_factor(lambda);
        assert!((mt - 1.39682).abs() < 1e-4);
        // Rt = 0.6 -> RSF = 0.6 / (1 - 0.4 / 1.39682) = 0.84077
        let rsf = remaining_strength_factor(0.6, mt);
        assert!((rsf - 0.84077).abs() < 1e-4);
    }

    #[test]
    fn test_reduced_mawp() {
        assert_eq!(reduced_mawp(300.0, 0.95, 0.9), 300.0);
        assert!((reduced_mawp(300.0, 0.81, 0.9) - 270.0).abs() < 1e-9);
    }
}
