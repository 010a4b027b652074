//! # Calculation Settings
//!
//! Every policy constant the formulas consult lives here rather than inside
//! the formulas: inspection interval caps, the monitoring band, physical
//! constants and FFS screening thresholds. `CalcSettings::default()`
//! reproduces the reference inspection policy; a TOML file may override any
//! subset of it.
//!
//! ## Structure
//!
//! ```text
//! CalcSettings
//! ├── inspection: InspectionPolicy   (interval caps, monitoring band)
//! ├── physical: PhysicalConstants    (static head gradient, E modulus, ...)
//! ├── ffs: FfsThresholds             (API 579 Level 1 limits)
//! └── in_lieu_of: InLieuOfThresholds (API 510 on-stream criteria)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use vessel_core::settings::CalcSettings;
//!
//! let settings = CalcSettings::from_toml_str(r#"
//!     [inspection]
//!     max_interval_years = 5.0
//! "#).unwrap();
//!
//! assert_eq!(settings.inspection.max_interval_years, 5.0);
//! // Untouched sections keep their defaults
//! assert_eq!(settings.physical.static_head_psi_per_ft, 0.433);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Ceiling on any configured inspection interval (years)
pub const MAX_INTERVAL_SETTING_YEARS: f64 = 100.0;

/// Root settings container passed by reference into every calculation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CalcSettings {
    /// Inspection interval policy (API 510)
    pub inspection: InspectionPolicy,

    /// Physical constants used by the thickness formulas
    pub physical: PhysicalConstants,

    /// Fitness-for-service screening thresholds (API 579 Level 1)
    pub ffs: FfsThresholds,

    /// On-stream inspection in lieu of internal inspection criteria
    pub in_lieu_of: InLieuOfThresholds,
}

impl CalcSettings {
    /// Parse settings from a TOML string. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> CalcResult<Self> {
        let settings: CalcSettings =
            toml::from_str(text).map_err(|e| CalcError::config_error("<string>", e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> CalcResult<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| CalcError::config_error(path.display().to_string(), e.to_string()))?;
        let settings: CalcSettings = toml::from_str(&text)
            .map_err(|e| CalcError::config_error(path.display().to_string(), e.to_string()))?;
        settings.validate()?;
        log::debug!("loaded calculation settings from {}", path.display());
        Ok(settings)
    }

    /// Serialize to TOML (used to write a starter settings file)
    pub fn to_toml_string(&self) -> CalcResult<String> {
        toml::to_string_pretty(self).map_err(|e| CalcError::SerializationError {
            reason: e.to_string(),
        })
    }

    /// Reject settings that would make the formulas meaningless.
    pub fn validate(&self) -> CalcResult<()> {
        let positive = [
            ("inspection.max_interval_years", self.inspection.max_interval_years),
            ("inspection.unlimited_life_interval_years", self.inspection.unlimited_life_interval_years),
            ("physical.static_head_psi_per_ft", self.physical.static_head_psi_per_ft),
            ("physical.elastic_modulus_psi", self.physical.elastic_modulus_psi),
            ("physical.default_knuckle_ratio", self.physical.default_knuckle_ratio),
            ("ffs.max_interval_years", self.ffs.max_interval_years),
            ("ffs.rsf_allowable", self.ffs.rsf_allowable),
        ];
        for (field, value) in positive {
            if !(value > 0.0) || !value.is_finite() {
                return Err(CalcError::config_error(
                    field,
                    format!("must be positive, got {}", value),
                ));
            }
        }
        let intervals = [
            ("inspection.max_interval_years", self.inspection.max_interval_years),
            ("inspection.unlimited_life_interval_years", self.inspection.unlimited_life_interval_years),
            ("ffs.max_interval_years", self.ffs.max_interval_years),
        ];
        for (field, value) in intervals {
            if value > MAX_INTERVAL_SETTING_YEARS {
                return Err(CalcError::config_error(
                    field,
                    format!("must not exceed {} years, got {}", MAX_INTERVAL_SETTING_YEARS, value),
                ));
            }
        }
        if !(0.0..1.0).contains(&self.physical.mill_tolerance) {
            return Err(CalcError::config_error(
                "physical.mill_tolerance",
                format!("must be in [0, 1), got {}", self.physical.mill_tolerance),
            ));
        }
        if !(0.0..=1.0).contains(&self.inspection.monitoring_band_fraction) {
            return Err(CalcError::config_error(
                "inspection.monitoring_band_fraction",
                format!("must be in [0, 1], got {}", self.inspection.monitoring_band_fraction),
            ));
        }
        Ok(())
    }
}

/// Inspection interval policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectionPolicy {
    /// Upper bound on the half-life inspection interval (years)
    pub max_interval_years: f64,

    /// Interval used when no metal loss is measured (years)
    pub unlimited_life_interval_years: f64,

    /// Fraction of the corrosion allowance above t_min that triggers "monitoring"
    pub monitoring_band_fraction: f64,
}

impl Default for InspectionPolicy {
    fn default() -> Self {
        InspectionPolicy {
            max_interval_years: 10.0,
            unlimited_life_interval_years: 10.0,
            monitoring_band_fraction: 0.5,
        }
    }
}

/// Physical constants and code proportions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicalConstants {
    /// Hydrostatic gradient of water (psi per ft of liquid height)
    pub static_head_psi_per_ft: f64,

    /// Elastic modulus for external pressure checks (psi)
    pub elastic_modulus_psi: f64,

    /// Knuckle radius as a fraction of inside diameter when not supplied
    pub default_knuckle_ratio: f64,

    /// Pipe mill under-tolerance (fraction of nominal wall)
    pub mill_tolerance: f64,
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        PhysicalConstants {
            static_head_psi_per_ft: 0.433,
            elastic_modulus_psi: 29_000_000.0,
            default_knuckle_ratio: 0.06,
            mill_tolerance: 0.125,
        }
    }
}

/// API 579 Level 1 screening thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FfsThresholds {
    /// Cap on the next inspection interval (years)
    pub max_interval_years: f64,

    /// Remaining life below which replacement is urgent (years)
    pub urgent_life_years: f64,

    /// Remaining life below which the component is put on monitoring (years)
    pub monitor_life_years: f64,

    /// Operating/MAWP ratio above which the pressure margin is flagged
    pub pressure_margin_ratio: f64,

    /// Circumferential extent beyond which Level 1 does not apply (degrees)
    pub max_circumferential_extent_deg: f64,

    /// Allowable remaining strength factor RSFa
    pub rsf_allowable: f64,

    /// Minimum remaining thickness ratio Rt
    pub min_remaining_ratio: f64,

    /// Minimum remaining thickness after FCA (in)
    pub min_remaining_thickness_in: f64,
}

impl Default for FfsThresholds {
    fn default() -> Self {
        FfsThresholds {
            max_interval_years: 10.0,
            urgent_life_years: 2.0,
            monitor_life_years: 5.0,
            pressure_margin_ratio: 0.9,
            max_circumferential_extent_deg: 180.0,
            rsf_allowable: 0.9,
            min_remaining_ratio: 0.20,
            min_remaining_thickness_in: 0.10,
        }
    }
}

/// API 510 criteria for substituting on-stream for internal inspection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InLieuOfThresholds {
    /// General corrosion rate must be below this (mpy)
    pub max_corrosion_rate_mpy: f64,

    /// Remaining life must be at least this (years)
    pub min_remaining_life_years: f64,

    /// Years of documented service with the same contents
    pub min_service_history_years: f64,

    /// Operating temperature must stay below this (°F)
    pub max_operating_temperature_f: f64,
}

impl Default for InLieuOfThresholds {
    fn default() -> Self {
        InLieuOfThresholds {
            max_corrosion_rate_mpy: 5.0,
            min_remaining_life_years: 10.0,
            min_service_history_years: 5.0,
            max_operating_temperature_f: 650.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_policy() {
        let s = CalcSettings::default();
        assert_eq!(s.inspection.max_interval_years, 10.0);
        assert_eq!(s.inspection.unlimited_life_interval_years, 10.0);
        assert_eq!(s.inspection.monitoring_band_fraction, 0.5);
        assert_eq!(s.physical.elastic_modulus_psi, 29_000_000.0);
        assert_eq!(s.ffs.pressure_margin_ratio, 0.9);
    }

    #[test]
    fn test_partial_override() {
        let s = CalcSettings::from_toml_str(
            r#"
            [ffs]
            urgent_life_years = 3.0
            "#,
        )
        .unwrap();
        assert_eq!(s.ffs.urgent_life_years, 3.0);
        assert_eq!(s.ffs.monitor_life_years, 5.0);
        assert_eq!(s.inspection, InspectionPolicy::default());
    }

    #[test]
    fn test_rejects_non_positive_interval() {
        let err = CalcSettings::from_toml_str(
            r#"
            [inspection]
            max_interval_years = 0.0
            "#,
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_rejects_malformed_toml() {
        assert!(CalcSettings::from_toml_str("[inspection\nmax = ").is_err());
    }

    #[test]
    fn test_toml_roundtrip() {
        let s = CalcSettings::default();
        let text = s.to_toml_string().unwrap();
        let back = CalcSettings::from_toml_str(&text).unwrap();
        assert_eq!(s, back);
    }

    #[test]
    fn test_rejects_unbounded_interval() {
        let err = CalcSettings::from_toml_str(
            r#"
            [inspection]
            unlimited_life_interval_years = 1e15
            "#,
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
        assert!(err.to_string().contains("unlimited_life_interval_years"));

        let mut settings = CalcSettings::default();
        settings.ffs.max_interval_years = 250.0;
        assert!(settings.validate().is_err());
        settings.ffs.max_interval_years = MAX_INTERVAL_SETTING_YEARS;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_load_partial_file() {
        let path = std::env::temp_dir().join(format!("vessel_settings_{}.toml", std::process::id()));
        fs::write(
            &path,
            "[inspection]\nmax_interval_years = 5.0\n\n[in_lieu_of]\nmax_operating_temperature_f = 600.0\n",
        )
        .unwrap();
        let loaded = CalcSettings::load(&path);
        fs::remove_file(&path).unwrap();

        let settings = loaded.unwrap();
        assert_eq!(settings.inspection.max_interval_years, 5.0);
        assert_eq!(settings.inspection.unlimited_life_interval_years, 10.0);
        assert_eq!(settings.in_lieu_of.max_operating_temperature_f, 600.0);
        assert_eq!(settings.physical, PhysicalConstants::default());
    }

    #[test]
    fn test_missing_file() {
        let err = CalcSettings::load(Path::new("/nonexistent/settings.toml")).unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }
}
