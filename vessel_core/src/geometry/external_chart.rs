//! External pressure chart factors (ASME VIII-1 UG-28, Section II Part D
//! Subpart 3)
//!
//! Factor A is read from the geometric chart against L/Do; Factor B from the
//! material chart against Do/t. Both are stored as ascending point sequences
//! and read by linear interpolation.
//!
//! Unlike the allowable stress table, these charts never extrapolate: outside
//! the tabulated range the nearest endpoint is returned. The curves are not
//! continuous past their printed limits, so any value beyond them would be
//! invented.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::interpolation::{interpolate_clamped, is_strictly_ascending};

/// Factor A against L/Do, carbon steel shells (CS-1 geometric chart)
const CS1_FACTOR_A: &[(f64, f64)] = &[
    (0.05, 0.0100),
    (0.10, 0.0050),
    (0.20, 0.0025),
    (0.50, 0.0010),
    (1.00, 0.00050),
    (2.00, 0.00025),
    (5.00, 0.00012),
    (10.0, 0.00008),
    (20.0, 0.00006),
    (50.0, 0.00005),
];

/// Factor B (psi) against Do/t
const FACTOR_B: &[(f64, f64)] = &[
    (5.0, 15000.0),
    (10.0, 14000.0),
    (20.0, 12500.0),
    (50.0, 9000.0),
    (100.0, 6000.0),
    (200.0, 3500.0),
    (500.0, 1500.0),
    (1000.0, 800.0),
];

/// An ordered (ratio, factor) chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalPressureChart {
    /// Chart name for error messages and reports
    pub name: String,
    points: Vec<(f64, f64)>,
}

impl ExternalPressureChart {
    /// Build a chart, requiring strictly ascending ratios and positive factors.
    pub fn new(name: impl Into<String>, points: Vec<(f64, f64)>) -> CalcResult<Self> {
        let name = name.into();
        if points.is_empty() {
            return Err(CalcError::reference_data(name, "chart has no points"));
        }
        let ratios: Vec<f64> = points.iter().map(|p| p.0).collect();
        if !is_strictly_ascending(&ratios) {
            return Err(CalcError::reference_data(name, "ratios must be strictly ascending"));
        }
        if points.iter().any(|p| !(p.1 > 0.0)) {
            return Err(CalcError::reference_data(name, "factors must be positive"));
        }
        Ok(ExternalPressureChart { name, points })
    }

    /// Read the chart at `ratio`, clamped to the tabulated range.
    pub fn factor_at(&self, ratio: f64) -> f64 {
        interpolate_clamped(&self.points, ratio)
    }

    /// True when `ratio` lies outside the printed chart
    pub fn is_outside_range(&self, ratio: f64) -> bool {
        ratio < self.points[0].0 || ratio > self.points[self.points.len() - 1].0
    }

    /// Chart points
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }
}

/// Factor A and Factor B charts used together by the external pressure check.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalPressureCharts {
    /// Factor A against L/Do
    pub factor_a: ExternalPressureChart,
    /// Factor B against Do/t
    pub factor_b: ExternalPressureChart,
}

impl ExternalPressureCharts {
    /// Built-in CS-1 Factor A and Factor B curves
    pub fn builtin() -> CalcResult<Self> {
        Ok(ExternalPressureCharts {
            factor_a: ExternalPressureChart::new("CS-1 Factor A", CS1_FACTOR_A.to_vec())?,
            factor_b: ExternalPressureChart::new("Factor B", FACTOR_B.to_vec())?,
        })
    }
}
