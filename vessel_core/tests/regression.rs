//! Regression fixtures for the end-to-end component and nozzle evaluations.
//!
//! These pin hand-checked results so that refactors of the formulas, the
//! reference tables or the status rules cannot drift silently.

use chrono::NaiveDate;

use vessel_core::calculations::component::{
    calculate, ComponentInput, ComponentKind, CorrosionBasis, ServiceCondition,
};
use vessel_core::calculations::nozzle::{self, GoverningCriterion, NozzleInput};
use vessel_core::equations::RemainingLife;
use vessel_core::geometry::{ExternalPressureCharts, HeadType};
use vessel_core::materials::{MaterialStressEntry, MaterialStressTable, PipeScheduleTable};
use vessel_core::{CalcSettings, ComponentStatus, ReferenceData};

fn evaluation_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

/// Reference data with a single flat-stress material, for fixtures whose
/// stress value is fixed by hand rather than by the published tables.
fn synthetic_reference(spec: &str, stress_psi: f64) -> ReferenceData {
    let materials = MaterialStressTable::from_entries(vec![MaterialStressEntry {
        spec: spec.to_string(),
        description: "fixture material".to_string(),
        aliases: Vec::new(),
        temperatures_f: vec![-20.0, 650.0],
        stress_psi: vec![stress_psi, stress_psi],
    }])
    .unwrap();
    ReferenceData::new(
        materials,
        PipeScheduleTable::builtin().unwrap(),
        ExternalPressureCharts::builtin().unwrap(),
    )
}

fn east_head() -> ComponentInput {
    ComponentInput {
        label: "East Head".to_string(),
        design_pressure_psi: 250.0,
        design_temperature_f: 200.0,
        inside_diameter_in: 70.75,
        material_spec: "FIXTURE-1".to_string(),
        nominal_thickness_in: 0.625,
        actual_thickness_in: 0.536,
        corrosion_allowance_in: 0.0,
        joint_efficiency: 0.85,
        component: ComponentKind::Head {
            head: HeadType::Ellipsoidal,
        },
        service: ServiceCondition::Vapor,
        corrosion: None,
        evaluation_date: evaluation_date(),
    }
}

#[test]
fn east_head_thickness_and_mawp() {
    let reference = synthetic_reference("FIXTURE-1", 20_500.0);
    let result = calculate(&east_head(), &reference, &CalcSettings::default()).unwrap();

    // t = 250 * 70.75 / (2 * 20500 * 0.85 - 0.2 * 250)
    assert!((result.minimum_required_thickness_in - 0.500).abs() < 0.01);
    assert!((result.minimum_required_thickness_in - 0.50826).abs() < 1e-4);
    assert!((result.mawp_psi - 263.9).abs() < 0.5);
    assert_eq!(result.status, ComponentStatus::Acceptable);
}

#[test]
fn east_head_with_published_stress() {
    let reference = ReferenceData::builtin().unwrap();
    let mut input = east_head();
    input.material_spec = "SA-516-70".to_string();
    let result = calculate(&input, &reference, &CalcSettings::default()).unwrap();

    assert_eq!(result.allowable_stress_psi, 20_000.0);
    assert!(!result.stress_lookup.interpolated);
    // Lower stress than the fixture: more wall, less MAWP
    assert!(result.minimum_required_thickness_in > 0.50826);
    assert!(result.mawp_psi < 263.62);
}

#[test]
fn torispherical_default_proportions() {
    let reference = ReferenceData::builtin().unwrap();
    let mut input = east_head();
    input.material_spec = "SA-516-70".to_string();
    input.component = ComponentKind::Head {
        head: HeadType::torispherical_standard(),
    };
    let result = calculate(&input, &reference, &CalcSettings::default()).unwrap();

    let factors = result.head_factors.unwrap();
    assert_eq!(factors.characteristic_length_in, 70.75);
    assert!((factors.factor - 1.77).abs() < 0.01);
    assert!((factors.knuckle_radius_in.unwrap() - 4.245).abs() < 1e-9);
}

#[test]
fn status_boundary_at_minimum_thickness() {
    let reference = synthetic_reference("FIXTURE-1", 20_500.0);
    let settings = CalcSettings::default();
    let t_min = calculate(&east_head(), &reference, &settings)
        .unwrap()
        .minimum_required_thickness_in;

    let mut at_minimum = east_head();
    at_minimum.actual_thickness_in = t_min;
    let result = calculate(&at_minimum, &reference, &settings).unwrap();
    assert_eq!(result.status, ComponentStatus::Acceptable);

    let mut below = east_head();
    below.actual_thickness_in = t_min - 0.001;
    let result = calculate(&below, &reference, &settings).unwrap();
    assert_eq!(result.status, ComponentStatus::Critical);
    assert!(result.status_reason.contains("below"));
}

#[test]
fn monitoring_band_is_half_the_corrosion_allowance() {
    let reference = ReferenceData::builtin().unwrap();
    let mut input = east_head();
    input.material_spec = "SA-516-70".to_string();
    input.corrosion_allowance_in = 0.125;
    let t_min = calculate(&input, &reference, &CalcSettings::default())
        .unwrap()
        .minimum_required_thickness_in;

    input.actual_thickness_in = t_min + 0.05;
    let result = calculate(&input, &reference, &CalcSettings::default()).unwrap();
    assert_eq!(result.status, ComponentStatus::Monitoring);

    input.actual_thickness_in = t_min + 0.07;
    let result = calculate(&input, &reference, &CalcSettings::default()).unwrap();
    assert_eq!(result.status, ComponentStatus::Acceptable);
}

#[test]
fn zero_rate_is_unlimited_never_nan() {
    let reference = synthetic_reference("FIXTURE-1", 20_500.0);
    let mut input = east_head();
    input.corrosion = Some(CorrosionBasis::Rate { rate_mpy: 0.0 });
    let result = calculate(&input, &reference, &CalcSettings::default()).unwrap();

    let life = result.life.unwrap();
    assert_eq!(life.remaining_life, RemainingLife::Unlimited);
    assert!(life.inspection_interval_years.is_finite());
    assert_eq!(life.inspection_interval_years, 10.0);
    assert_eq!(life.next_inspection_date, NaiveDate::from_ymd_opt(2035, 6, 2).unwrap());

    let json = serde_json::to_string(&life).unwrap();
    assert!(!json.contains("NaN"));
    assert!(json.contains("\"unlimited\""));
}

#[test]
fn identical_readings_are_unlimited() {
    let reference = synthetic_reference("FIXTURE-1", 20_500.0);
    let mut input = east_head();
    input.corrosion = Some(CorrosionBasis::History {
        previous_thickness_in: 0.536,
        previous_inspection_date: NaiveDate::from_ymd_opt(2015, 6, 1).unwrap(),
        current_inspection_date: evaluation_date(),
    });
    let result = calculate(&input, &reference, &CalcSettings::default()).unwrap();
    assert_eq!(result.remaining_life(), Some(RemainingLife::Unlimited));
}

fn two_inch_sch_40(pressure_psi: f64) -> NozzleInput {
    NozzleInput {
        label: "N1".to_string(),
        nominal_size: "2".to_string(),
        schedule: "40".to_string(),
        actual_thickness_in: 0.150,
        design_pressure_psi: pressure_psi,
        design_temperature_f: 200.0,
        material_spec: "SA-106-B".to_string(),
        corrosion_allowance_in: 0.0,
    }
}

#[test]
fn nozzle_low_pressure_schedule_governs() {
    let reference = ReferenceData::builtin().unwrap();
    let result = nozzle::calculate(&two_inch_sch_40(150.0), &reference, &CalcSettings::default()).unwrap();

    assert_eq!(result.governing, GoverningCriterion::PipeSchedule);
    assert!((result.minimum_required_thickness_in - 0.154 * 0.875).abs() < 1e-9);
    assert!(result.acceptable);
}

#[test]
fn nozzle_high_pressure_design_governs() {
    let reference = ReferenceData::builtin().unwrap();
    let result = nozzle::calculate(&two_inch_sch_40(4000.0), &reference, &CalcSettings::default()).unwrap();

    assert_eq!(result.governing, GoverningCriterion::PressureDesign);
    // R = 1.0335; t = 4000 * 1.0335 / (17100 - 2400)
    assert!((result.pressure_design_thickness_in - 0.28122).abs() < 1e-4);
    assert!(!result.acceptable);
}

#[test]
fn component_result_json_shape() {
    let reference = synthetic_reference("FIXTURE-1", 20_500.0);
    let result = calculate(&east_head(), &reference, &CalcSettings::default()).unwrap();
    let value = serde_json::to_value(&result).unwrap();

    assert_eq!(value["status"], "acceptable");
    assert_eq!(value["component"]["type"], "head");
    assert_eq!(value["component"]["head"]["head_type"], "ellipsoidal");
    assert!(value["life"].is_null());
}
