//! Standard Pipe Dimensions (ASME B36.10M)
//!
//! Outside diameter and nominal wall thickness by nominal pipe size (NPS) and
//! schedule. Nozzle necks are evaluated against these dimensions.
//!
//! ## Accepted Designations
//!
//! - NPS: `"2"`, `"2.0"`, `"NPS 2"`, `"1-1/2"`, `"1.5"`, `"1 1/2"`
//! - Schedule: `"40"`, `"Sch 40"`, `"SCH. 80"`, `"STD"`, `"XS"`, `"XXS"`

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

const BUILTIN_PIPES: &str = include_str!("../../data/pipe_schedules.toml");

/// One nominal pipe size and its wall thickness per schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipeSizeEntry {
    /// Nominal pipe size designation (e.g., "2", "1-1/2")
    pub nps: String,

    /// Alternate spellings accepted on lookup
    #[serde(default)]
    pub aliases: Vec<String>,

    /// Outside diameter (in)
    pub outside_diameter_in: f64,

    /// Nominal wall thickness (in) keyed by schedule
    pub wall_in: BTreeMap<String, f64>,
}

#[derive(Debug, Deserialize)]
struct PipeFile {
    pipe: Vec<PipeSizeEntry>,
}

/// Resolved pipe dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipeDimensions {
    /// Canonical NPS designation
    pub nominal_size: String,
    /// Canonical schedule designation
    pub schedule: String,
    /// Outside diameter (in)
    pub outside_diameter_in: f64,
    /// Nominal wall thickness (in)
    pub wall_thickness_in: f64,
}

impl PipeDimensions {
    /// Inside diameter at nominal wall: OD - 2t
    pub fn inside_diameter_in(&self) -> f64 {
        self.outside_diameter_in - 2.0 * self.wall_thickness_in
    }

    /// Inside radius at nominal wall
    pub fn inside_radius_in(&self) -> f64 {
        self.inside_diameter_in() / 2.0
    }
}

/// Immutable pipe schedule table.
#[derive(Debug, Clone)]
pub struct PipeScheduleTable {
    entries: Vec<PipeSizeEntry>,
    index: HashMap<String, usize>,
}

impl PipeScheduleTable {
    /// Build a table from entries, validating dimensions.
    pub fn from_entries(entries: Vec<PipeSizeEntry>) -> CalcResult<Self> {
        let mut index = HashMap::new();
        for (i, entry) in entries.iter().enumerate() {
            if !(entry.outside_diameter_in > 0.0) {
                return Err(CalcError::reference_data(
                    "pipe schedules",
                    format!("NPS {} has non-positive outside diameter", entry.nps),
                ));
            }
            for (schedule, wall) in &entry.wall_in {
                if !(*wall > 0.0) || 2.0 * wall >= entry.outside_diameter_in {
                    return Err(CalcError::reference_data(
                        "pipe schedules",
                        format!("NPS {} Sch {} wall {} is not physical", entry.nps, schedule, wall),
                    ));
                }
            }
            for key in std::iter::once(&entry.nps).chain(entry.aliases.iter()) {
                let normalized = normalize_nps(key);
                if let Some(previous) = index.insert(normalized.clone(), i) {
                    if previous != i {
                        return Err(CalcError::reference_data(
                            "pipe schedules",
                            format!(
                                "designation '{}' of NPS {} already names NPS {}",
                                normalized, entry.nps, entries[previous].nps
                            ),
                        ));
                    }
                }
            }
        }
        Ok(PipeScheduleTable { entries, index })
    }

    /// Parse a table from TOML text (`[[pipe]]` array).
    pub fn from_toml_str(text: &str) -> CalcResult<Self> {
        let file: PipeFile = toml::from_str(text)
            .map_err(|e| CalcError::reference_data("pipe schedules", e.to_string()))?;
        Self::from_entries(file.pipe)
    }

    /// The embedded B36.10M dataset.
    pub fn builtin() -> CalcResult<Self> {
        Self::from_toml_str(BUILTIN_PIPES)
    }

    /// Nominal sizes in table order
    pub fn sizes(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.nps.as_str())
    }

    /// Resolve OD and wall for an NPS/schedule pair.
    pub fn lookup(&self, nominal_size: &str, schedule: &str) -> CalcResult<PipeDimensions> {
        let not_found = || CalcError::pipe_size_not_found(nominal_size, schedule);
        let entry = self
            .index
            .get(&normalize_nps(nominal_size))
            .map(|&i| &self.entries[i])
            .ok_or_else(not_found)?;
        let sched = normalize_schedule(schedule);
        let wall = entry.wall_in.get(&sched).copied().ok_or_else(not_found)?;
        Ok(PipeDimensions {
            nominal_size: entry.nps.clone(),
            schedule: sched,
            outside_diameter_in: entry.outside_diameter_in,
            wall_thickness_in: wall,
        })
    }
}

/// Normalize an NPS designation: drops "NPS", inch marks and redundant
/// decimals so "NPS 2", "2\"" and "2.0" all resolve to "2".
pub fn normalize_nps(nps: &str) -> String {
    let upper = nps.to_uppercase().replace("NPS", "").replace(['"', '\''], "");
    let trimmed = upper.trim();
    if let Ok(value) = trimmed.parse::<f64>() {
        return format!("{}", value);
    }
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize a schedule designation: "Sch. 40" -> "40", "std" -> "STD".
pub fn normalize_schedule(schedule: &str) -> String {
    let upper = schedule.to_uppercase();
    let stripped = upper
        .trim()
        .trim_start_matches("SCHEDULE")
        .trim_start_matches("SCH")
        .trim_start_matches('.');
    stripped.split_whitespace().collect::<Vec<_>>().concat()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_two_inch_sch40() {
        let table = PipeScheduleTable::builtin().unwrap();
        let pipe = table.lookup("2", "40").unwrap();
        assert_eq!(pipe.outside_diameter_in, 2.375);
        assert_eq!(pipe.wall_thickness_in, 0.154);
        assert!((pipe.inside_diameter_in() - 2.067).abs() < 1e-9);
        assert!((pipe.inside_radius_in() - 1.0335).abs() < 1e-9);
    }

    #[test]
    fn test_designation_spellings() {
        let table = PipeScheduleTable::builtin().unwrap();
        let a = table.lookup("NPS 1-1/2", "Sch. 80").unwrap();
        let b = table.lookup("1.5", "80").unwrap();
        let c = table.lookup("1 1/2", "XS").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.wall_thickness_in, c.wall_thickness_in);
        assert_eq!(table.lookup("2.0", "std").unwrap().wall_thickness_in, 0.154);
    }

    #[test]
    fn test_unknown_size_or_schedule() {
        let table = PipeScheduleTable::builtin().unwrap();
        assert_eq!(table.lookup("5", "40").unwrap_err().error_code(), "PIPE_SIZE_NOT_FOUND");
        assert!(table.lookup("2", "10").is_err());
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize_nps("NPS 2\""), "2");
        assert_eq!(normalize_nps("0.50"), "0.5");
        assert_eq!(normalize_schedule("Schedule 160"), "160");
        assert_eq!(normalize_schedule(" xxs "), "XXS");
    }

    #[test]
    fn test_rejects_wall_thicker_than_radius() {
        let mut wall = BTreeMap::new();
        wall.insert("40".to_string(), 1.5);
        let result = PipeScheduleTable::from_entries(vec![PipeSizeEntry {
            nps: "2".to_string(),
            aliases: vec![],
            outside_diameter_in: 2.375,
            wall_in: wall,
        }]);
        assert!(result.is_err());
    }

    fn entry(nps: &str, aliases: &[&str]) -> PipeSizeEntry {
        let mut wall = BTreeMap::new();
        wall.insert("40".to_string(), 0.154);
        PipeSizeEntry {
            nps: nps.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            outside_diameter_in: 2.375,
            wall_in: wall,
        }
    }

    #[test]
    fn test_rejects_duplicate_size() {
        let err = PipeScheduleTable::from_entries(vec![entry("2", &[]), entry("2.0", &[])]).unwrap_err();
        assert_eq!(err.error_code(), "REFERENCE_DATA");
        assert!(err.to_string().contains("already names NPS 2"));
    }

    #[test]
    fn test_rejects_alias_naming_another_size() {
        let result = PipeScheduleTable::from_entries(vec![entry("2", &[]), entry("3", &["NPS 2"])]);
        assert_eq!(result.unwrap_err().error_code(), "REFERENCE_DATA");
    }

    #[test]
    fn test_alias_repeating_own_size_is_allowed() {
        let table = PipeScheduleTable::from_entries(vec![entry("2", &["2\"", "2.00"])]).unwrap();
        assert_eq!(table.lookup("2.0", "40").unwrap().nominal_size, "2");
    }
}
