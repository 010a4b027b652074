//! Property-based tests for the thickness formulas and the stress table.
//!
//! Covers: monotonicity of shell minimum thickness, the t_min → MAWP round
//! trip for shells and heads, stress interpolation bounds, and remaining life.

use proptest::prelude::*;

use vessel_core::equations::{head_mawp, head_min_thickness, remaining_life, shell_mawp, shell_min_thickness};
use vessel_core::materials::MaterialStressTable;

// ── Shell Minimum Thickness ─────────────────────────────────────────

proptest! {
    /// Raising P never reduces the required wall.
    #[test]
    fn shell_thickness_increases_with_pressure(
        p in 10.0f64..1500.0,
        dp in 1.0f64..500.0,
        r in 6.0f64..120.0,
        s in 12_000.0f64..30_000.0,
        e in 0.6f64..=1.0,
    ) {
        let t1 = shell_min_thickness(p, r, s, e, 0.0).unwrap();
        let t2 = shell_min_thickness(p + dp, r, s, e, 0.0).unwrap();
        prop_assert!(t2 > t1, "t({}) = {}, t({}) = {}", p, t1, p + dp, t2);
    }

    /// Raising S·E never increases the required wall.
    #[test]
    fn shell_thickness_decreases_with_strength(
        p in 10.0f64..1500.0,
        r in 6.0f64..120.0,
        s in 12_000.0f64..30_000.0,
        ds in 100.0f64..5_000.0,
        e in 0.6f64..=1.0,
    ) {
        let t1 = shell_min_thickness(p, r, s, e, 0.0).unwrap();
        let t2 = shell_min_thickness(p, r, s + ds, e, 0.0).unwrap();
        prop_assert!(t2 < t1);
    }

    /// Corrosion allowance adds one-for-one.
    #[test]
    fn shell_thickness_adds_allowance(
        p in 10.0f64..1500.0,
        r in 6.0f64..120.0,
        ca in 0.0f64..0.25,
    ) {
        let bare = shell_min_thickness(p, r, 20_000.0, 0.85, 0.0).unwrap();
        let with_ca = shell_min_thickness(p, r, 20_000.0, 0.85, ca).unwrap();
        prop_assert!((with_ca - bare - ca).abs() < 1e-12);
    }
}

// ── Round Trip ─────────────────────────────────────────────────────

proptest! {
    /// t_min fed back into the shell MAWP formula reproduces P.
    #[test]
    fn shell_round_trip(
        p in 10.0f64..1500.0,
        r in 6.0f64..120.0,
        s in 12_000.0f64..30_000.0,
        e in 0.6f64..=1.0,
    ) {
        let t = shell_min_thickness(p, r, s, e, 0.0).unwrap();
        let mawp = shell_mawp(t, r, s, e, 0.0).unwrap();
        prop_assert!((mawp - p).abs() < 1e-6, "P = {}, MAWP = {}", p, mawp);
    }

    /// t_min fed back into the head MAWP formula reproduces P.
    #[test]
    fn head_round_trip(
        p in 10.0f64..1500.0,
        l in 12.0f64..240.0,
        factor in 1.0f64..2.0,
        s in 12_000.0f64..30_000.0,
        e in 0.6f64..=1.0,
    ) {
        let effective = l * factor;
        let t = head_min_thickness(p, effective, s, e, 0.0).unwrap();
        let mawp = head_mawp(t, effective, s, e, 0.0).unwrap();
        prop_assert!((mawp - p).abs() < 1e-6, "P = {}, MAWP = {}", p, mawp);
    }
}

// ── Stress Table ───────────────────────────────────────────────────

proptest! {
    /// Between two tabulated temperatures the stress lies between the
    /// bracketing values and is flagged as interpolated.
    #[test]
    fn stress_interpolation_stays_in_bracket(temperature in 500.0f64..900.0) {
        let table = MaterialStressTable::builtin().unwrap();
        let lookup = table.stress_at("SA-516-70", temperature).unwrap();

        match (lookup.lower_bound, lookup.upper_bound) {
            (Some(lower), Some(upper)) => {
                prop_assert!(lookup.interpolated);
                let (lo, hi) = if lower.stress_psi <= upper.stress_psi {
                    (lower.stress_psi, upper.stress_psi)
                } else {
                    (upper.stress_psi, lower.stress_psi)
                };
                prop_assert!(lookup.allowable_stress_psi >= lo && lookup.allowable_stress_psi <= hi);
                prop_assert!(lower.temperature_f < temperature && temperature < upper.temperature_f);
            }
            _ => prop_assert!(!lookup.interpolated),
        }
    }

    /// Temperatures beyond the table clamp to the last value and carry a note.
    #[test]
    fn stress_clamps_above_table(temperature in 901.0f64..1500.0) {
        let table = MaterialStressTable::builtin().unwrap();
        let lookup = table.stress_at("SA-516-70", temperature).unwrap();
        prop_assert_eq!(lookup.allowable_stress_psi, 6_700.0);
        prop_assert!(lookup.is_clamped());
    }
}

// ── Remaining Life ─────────────────────────────────────────────────

proptest! {
    /// Remaining life is never NaN and never negative.
    #[test]
    fn remaining_life_is_well_formed(
        actual in 0.05f64..2.0,
        required in 0.05f64..2.0,
        rate in -10.0f64..50.0,
    ) {
        let life = remaining_life(actual, required, rate);
        if let Some(years) = life.years() {
            prop_assert!(years.is_finite());
            prop_assert!(years >= 0.0);
        } else {
            prop_assert!(rate <= 0.0);
        }
    }
}
