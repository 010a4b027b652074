//! Allowable Stress Table (ASME Section II Part D)
//!
//! Maximum allowable stress by material specification and design temperature.
//! Values between tabulated temperatures are linearly interpolated. Values
//! outside the tabulated range are clamped to the nearest endpoint and carry a
//! note, so the report always shows that the table was exceeded.
//!
//! The built-in dataset is embedded from `data/materials.toml` and parsed once
//! by the caller at startup. Tests and callers with their own data build a
//! table from [`MaterialStressEntry`] values instead.
//!
//! ## Example
//!
//! ```rust
//! use vessel_core::materials::MaterialStressTable;
//!
//! let table = MaterialStressTable::builtin().unwrap();
//! let lookup = table.stress_at("SA-516-70", 650.0).unwrap();
//! assert_eq!(lookup.allowable_stress_psi, 18800.0);
//! assert!(!lookup.interpolated);
//!
//! // Unknown materials are absent, never substituted
//! assert!(table.stress_at("SA-999-X", 100.0).is_none());
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::interpolation::{bracket, is_strictly_ascending, linear, Bracket};

const BUILTIN_MATERIALS: &str = include_str!("../../data/materials.toml");

/// One material's stress-vs-temperature curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialStressEntry {
    /// Canonical specification (e.g., "SA-516-70")
    pub spec: String,

    /// Human-readable description
    #[serde(default)]
    pub description: String,

    /// Alternate spellings accepted on lookup
    #[serde(default)]
    pub aliases: Vec<String>,

    /// Tabulated temperatures (°F), strictly ascending
    pub temperatures_f: Vec<f64>,

    /// Allowable stress (psi) at each temperature
    pub stress_psi: Vec<f64>,
}

impl MaterialStressEntry {
    fn validate(&self) -> CalcResult<()> {
        let table = format!("material '{}'", self.spec);
        if self.temperatures_f.is_empty() {
            return Err(CalcError::reference_data(table, "no temperature points"));
        }
        if self.temperatures_f.len() != self.stress_psi.len() {
            return Err(CalcError::reference_data(
                table,
                format!(
                    "{} temperatures but {} stresses",
                    self.temperatures_f.len(),
                    self.stress_psi.len()
                ),
            ));
        }
        if !is_strictly_ascending(&self.temperatures_f) {
            return Err(CalcError::reference_data(table, "temperatures must be strictly ascending"));
        }
        if self.stress_psi.iter().any(|s| !(*s > 0.0) || !s.is_finite()) {
            return Err(CalcError::reference_data(table, "stresses must be positive"));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct MaterialFile {
    material: Vec<MaterialStressEntry>,
}

/// Tabulated point used to bracket an interpolated value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StressPoint {
    pub temperature_f: f64,
    pub stress_psi: f64,
}

/// Result of an allowable stress lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressLookup {
    /// Canonical material specification the lookup resolved to
    pub material_spec: String,

    /// Temperature that was requested (°F)
    pub temperature_f: f64,

    /// Allowable stress S (psi)
    pub allowable_stress_psi: f64,

    /// True when the value lies strictly between two tabulated temperatures
    pub interpolated: bool,

    /// Lower bracketing point (interpolated lookups only)
    pub lower_bound: Option<StressPoint>,

    /// Upper bracketing point (interpolated lookups only)
    pub upper_bound: Option<StressPoint>,

    /// Advisory note (set when the temperature was outside the table)
    pub note: Option<String>,
}

impl StressLookup {
    /// True when the temperature fell outside the tabulated range
    pub fn is_clamped(&self) -> bool {
        self.note.is_some()
    }
}

/// Immutable allowable stress table, keyed by normalized material spec.
#[derive(Debug, Clone)]
pub struct MaterialStressTable {
    entries: Vec<MaterialStressEntry>,
    index: HashMap<String, usize>,
}

impl MaterialStressTable {
    /// Build a table from entries, validating every curve.
    pub fn from_entries(entries: Vec<MaterialStressEntry>) -> CalcResult<Self> {
        let mut index = HashMap::new();
        for (i, entry) in entries.iter().enumerate() {
            entry.validate()?;
            for key in std::iter::once(&entry.spec).chain(entry.aliases.iter()) {
                if let Some(prev) = index.insert(normalize_spec(key), i) {
                    if prev != i {
                        return Err(CalcError::reference_data(
                            "materials",
                            format!("'{}' maps to more than one material", key),
                        ));
                    }
                }
            }
        }
        Ok(MaterialStressTable { entries, index })
    }

    /// Parse a table from TOML text (`[[material]]` array).
    pub fn from_toml_str(text: &str) -> CalcResult<Self> {
        let file: MaterialFile =
            toml::from_str(text).map_err(|e| CalcError::reference_data("materials", e.to_string()))?;
        Self::from_entries(file.material)
    }

    /// The embedded ASME II-D dataset.
    pub fn builtin() -> CalcResult<Self> {
        Self::from_toml_str(BUILTIN_MATERIALS)
    }

    /// Find a material's curve by spec or alias.
    pub fn get(&self, material_spec: &str) -> Option<&MaterialStressEntry> {
        self.index
            .get(&normalize_spec(material_spec))
            .map(|&i| &self.entries[i])
    }

    /// All canonical specs, in table order
    pub fn specs(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.spec.as_str())
    }

    /// Allowable stress at a design temperature.
    ///
    /// Returns `None` for an unknown material or a NaN temperature; callers
    /// must branch on absence.
    pub fn stress_at(&self, material_spec: &str, temperature_f: f64) -> Option<StressLookup> {
        let entry = self.get(material_spec)?;
        let temps = &entry.temperatures_f;
        let stresses = &entry.stress_psi;
        let point = |i: usize| StressPoint {
            temperature_f: temps[i],
            stress_psi: stresses[i],
        };

        let mut lookup = StressLookup {
            material_spec: entry.spec.clone(),
            temperature_f,
            allowable_stress_psi: 0.0,
            interpolated: false,
            lower_bound: None,
            upper_bound: None,
            note: None,
        };

        match bracket(temps, temperature_f) {
            Bracket::Exact(i) => {
                lookup.allowable_stress_psi = stresses[i];
            }
            Bracket::Between(i) => {
                lookup.allowable_stress_psi =
                    linear(temps[i], stresses[i], temps[i + 1], stresses[i + 1], temperature_f);
                lookup.interpolated = true;
                lookup.lower_bound = Some(point(i));
                lookup.upper_bound = Some(point(i + 1));
            }
            Bracket::BelowRange => {
                lookup.allowable_stress_psi = stresses[0];
                lookup.note = Some(format!(
                    "{:.0}°F is below the tabulated range for {} ({:.0}°F to {:.0}°F); \
                     stress extrapolated beyond table range, taken at {:.0}°F",
                    temperature_f,
                    entry.spec,
                    temps[0],
                    temps[temps.len() - 1],
                    temps[0]
                ));
            }
            Bracket::AboveRange => {
                let last = temps.len() - 1;
                lookup.allowable_stress_psi = stresses[last];
                lookup.note = Some(format!(
                    "{:.0}°F is above the tabulated range for {} ({:.0}°F to {:.0}°F); \
                     stress extrapolated beyond table range, taken at {:.0}°F",
                    temperature_f, entry.spec, temps[0], temps[last], temps[last]
                ));
            }
            Bracket::Undefined => {
                log::warn!("no allowable stress for {} at a NaN temperature", entry.spec);
                return None;
            }
        }

        if let Some(note) = &lookup.note {
            log::warn!("{}", note);
        }
        Some(lookup)
    }
}

/// Normalize a material designation for lookup: case-insensitive, ignoring
/// punctuation and the words "Gr", "Grade", "Type" and "Tp".
pub fn normalize_spec(spec: &str) -> String {
    spec.to_uppercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|tok| !tok.is_empty() && !matches!(*tok, "GR" | "GRADE" | "TYPE" | "TP"))
        .collect::<Vec<_>>()
        .concat()
}
