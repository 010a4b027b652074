//! Reference data bundle.
//!
//! All static tables the calculations read, built once at startup and passed
//! by reference. Nothing here is global: a test can construct a
//! `ReferenceData` from synthetic tables and the calculations cannot tell the
//! difference.

use crate::errors::CalcResult;
use crate::geometry::ExternalPressureCharts;
use crate::materials::{MaterialStressTable, PipeScheduleTable, StressLookup};

/// Immutable reference tables.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    /// Allowable stress by material and temperature
    pub materials: MaterialStressTable,
    /// Pipe OD and wall by NPS and schedule
    pub pipes: PipeScheduleTable,
    /// External pressure Factor A / Factor B charts
    pub charts: ExternalPressureCharts,
}

impl ReferenceData {
    /// Assemble from individually built tables
    pub fn new(
        materials: MaterialStressTable,
        pipes: PipeScheduleTable,
        charts: ExternalPressureCharts,
    ) -> Self {
        ReferenceData {
            materials,
            pipes,
            charts,
        }
    }

    /// Parse every embedded dataset.
    pub fn builtin() -> CalcResult<Self> {
        let data = ReferenceData {
            materials: MaterialStressTable::builtin()?,
            pipes: PipeScheduleTable::builtin()?,
            charts: ExternalPressureCharts::builtin()?,
        };
        log::debug!(
            "loaded reference data: {} materials, {} pipe sizes",
            data.materials.specs().count(),
            data.pipes.sizes().count()
        );
        Ok(data)
    }

    /// Shortcut for `self.materials.stress_at(..)`
    pub fn stress_at(&self, material_spec: &str, temperature_f: f64) -> Option<StressLookup> {
        self.materials.stress_at(material_spec, temperature_f)
    }
}
