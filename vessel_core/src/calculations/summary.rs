//! # Vessel Summary
//!
//! Rolls component results up to the governing values for the whole vessel:
//! the lowest MAWP, the shortest remaining life, the earliest next
//! inspection and the worst status.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculations::component::ComponentResult;
use crate::calculations::status::ComponentStatus;
use crate::equations::RemainingLife;
use crate::errors::{CalcError, CalcResult};

/// A governing value and the component it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Governing<T> {
    pub component: String,
    pub value: T,
}

/// Vessel-level roll-up of component results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VesselSummary {
    pub component_count: usize,
    /// Lowest internal MAWP (psi)
    pub governing_mawp: Governing<f64>,
    /// Shortest finite remaining life; unlimited only when every component is
    pub shortest_remaining_life: Option<Governing<RemainingLife>>,
    /// Earliest next inspection date
    pub earliest_next_inspection: Option<Governing<NaiveDate>>,
    /// Worst status across all components
    pub worst_status: ComponentStatus,
    /// Labels of components below their required thickness
    pub critical_components: Vec<String>,
}

/// Summarize a set of component results.
///
/// # Errors
/// `InvalidInput` when `results` is empty.
pub fn summarize(results: &[ComponentResult]) -> CalcResult<VesselSummary> {
    let first = results.first().ok_or_else(|| {
        CalcError::invalid_input("results", "[]", "At least one component result is required")
    })?;

    let mut governing_mawp = Governing {
        component: first.label.clone(),
        value: first.mawp_psi,
    };
    let mut shortest: Option<Governing<RemainingLife>> = None;
    let mut earliest: Option<Governing<NaiveDate>> = None;

    for result in results {
        if result.mawp_psi < governing_mawp.value {
            governing_mawp = Governing {
                component: result.label.clone(),
                value: result.mawp_psi,
            };
        }

        if let Some(life) = result.remaining_life() {
            let shorter = match &shortest {
                None => true,
                Some(current) => match (life.years(), current.value.years()) {
                    (Some(candidate), Some(best)) => candidate < best,
                    (Some(_), None) => true,
                    (None, _) => false,
                },
            };
            if shorter {
                shortest = Some(Governing {
                    component: result.label.clone(),
                    value: life,
                });
            }
        }

        if let Some(date) = result.next_inspection_date() {
            if earliest.as_ref().map_or(true, |current| date < current.value) {
                earliest = Some(Governing {
                    component: result.label.clone(),
                    value: date,
                });
            }
        }
    }

    let worst_status = results
        .iter()
        .map(|r| r.status)
        .max()
        .unwrap_or(ComponentStatus::Acceptable);
    let critical_components = results
        .iter()
        .filter(|r| r.status == ComponentStatus::Critical)
        .map(|r| r.label.clone())
        .collect();

    Ok(VesselSummary {
        component_count: results.len(),
        governing_mawp,
        shortest_remaining_life: shortest,
        earliest_next_inspection: earliest,
        worst_status,
        critical_components,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::component::{calculate, ComponentInput, ComponentKind, CorrosionBasis};
    use crate::calculations::component::ServiceCondition;
    use crate::geometry::HeadType;
    use crate::reference::ReferenceData;
    use crate::settings::CalcSettings;

    fn component(label: &str, kind: ComponentKind, actual: f64, rate: Option<f64>) -> ComponentResult {
        let input = ComponentInput {
            label: label.to_string(),
            design_pressure_psi: 150.0,
            design_temperature_f: 300.0,
            inside_diameter_in: 60.0,
            material_spec: "SA-516-70".to_string(),
            nominal_thickness_in: 0.5,
            actual_thickness_in: actual,
            corrosion_allowance_in: 0.125,
            joint_efficiency: 0.85,
            component: kind,
            service: ServiceCondition::Vapor,
            corrosion: rate.map(|rate_mpy| CorrosionBasis::Rate { rate_mpy }),
            evaluation_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        };
        calculate(&input, &ReferenceData::builtin().unwrap(), &CalcSettings::default()).unwrap()
    }

    #[test]
    fn test_summary_picks_governing_values() {
        let results = vec![
            component("Shell", ComponentKind::shell(), 0.47, Some(5.0)),
            component(
                "East Head",
                ComponentKind::Head {
                    head: HeadType::Ellipsoidal,
                },
                0.40,
                Some(2.0),
            ),
            component("West Head", ComponentKind::Head { head: HeadType::Hemispherical }, 0.45, Some(0.0)),
        ];
        let summary = summarize(&results).unwrap();

        assert_eq!(summary.component_count, 3);
        let min_mawp = results.iter().map(|r| r.mawp_psi).fold(f64::INFINITY, f64::min);
        assert_eq!(summary.governing_mawp.value, min_mawp);

        let shortest = summary.shortest_remaining_life.unwrap();
        assert!(shortest.value.years().is_some());
        for r in &results {
            if let Some(years) = r.remaining_life().and_then(|l| l.years()) {
                assert!(shortest.value.years().unwrap() <= years);
            }
        }
        assert_eq!(summary.earliest_next_inspection.unwrap().component, shortest.component);
    }

    #[test]
    fn test_summary_worst_status() {
        let results = vec![
            component("Shell A", ComponentKind::shell(), 0.47, None),
            component("Shell B", ComponentKind::shell(), 0.30, None),
        ];
        let summary = summarize(&results).unwrap();
        assert_eq!(summary.worst_status, ComponentStatus::Critical);
        assert_eq!(summary.critical_components, vec!["Shell B".to_string()]);
        assert!(summary.shortest_remaining_life.is_none());
        assert!(summary.earliest_next_inspection.is_none());
    }

    #[test]
    fn test_summary_all_unlimited() {
        let results = vec![
            component("Shell A", ComponentKind::shell(), 0.47, Some(0.0)),
            component("Shell B", ComponentKind::shell(), 0.48, Some(0.0)),
        ];
        let summary = summarize(&results).unwrap();
        assert_eq!(summary.shortest_remaining_life.unwrap().value, RemainingLife::Unlimited);
    }

    #[test]
    fn test_summary_empty_is_error() {
        assert!(summarize(&[]).is_err());
    }
}
