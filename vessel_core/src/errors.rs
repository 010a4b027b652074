//! # Error Types
//!
//! Structured error types for vessel_core. Every failure that can leave a
//! calculation is one of these variants, returned as a value. Nothing in the
//! calculation path panics or silently substitutes a default.
//!
//! ## Example
//!
//! ```rust
//! use vessel_core::errors::{CalcError, CalcResult};
//!
//! fn validate_diameter(inside_diameter_in: f64) -> CalcResult<()> {
//!     if inside_diameter_in <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "inside_diameter_in",
//!             inside_diameter_in.to_string(),
//!             "Inside diameter must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for vessel_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
///
/// Serializes with a `type` discriminator so the persistence and report
/// layers can store or display failures without string matching.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, inconsistent, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Material specification not present in the stress table
    #[error("Material not found: {material_spec}")]
    MaterialNotFound { material_spec: String },

    /// Nominal pipe size / schedule combination not in the pipe table
    #[error("Pipe size not found: NPS {nominal_size} Sch {schedule}")]
    PipeSizeNotFound {
        nominal_size: String,
        schedule: String,
    },

    /// Formula denominator is zero or negative: the pressure exceeds what the
    /// material and joint efficiency can carry.
    #[error("Invalid geometry in {formula}: denominator {denominator:.3} - {reason}")]
    InvalidGeometry {
        formula: String,
        denominator: f64,
        reason: String,
    },

    /// Reference dataset is malformed (unsorted temperatures, length mismatch...)
    #[error("Invalid reference data in {table}: {reason}")]
    ReferenceData { table: String, reason: String },

    /// Settings file could not be read or parsed
    #[error("Configuration error in '{path}': {reason}")]
    ConfigError { path: String, reason: String },

    /// JSON/TOML serialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MaterialNotFound error
    pub fn material_not_found(material_spec: impl Into<String>) -> Self {
        CalcError::MaterialNotFound {
            material_spec: material_spec.into(),
        }
    }

    /// Create a PipeSizeNotFound error
    pub fn pipe_size_not_found(nominal_size: impl Into<String>, schedule: impl Into<String>) -> Self {
        CalcError::PipeSizeNotFound {
            nominal_size: nominal_size.into(),
            schedule: schedule.into(),
        }
    }

    /// Create an InvalidGeometry error
    pub fn invalid_geometry(formula: impl Into<String>, denominator: f64, reason: impl Into<String>) -> Self {
        CalcError::InvalidGeometry {
            formula: formula.into(),
            denominator,
            reason: reason.into(),
        }
    }

    /// Create a ReferenceData error
    pub fn reference_data(table: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::ReferenceData {
            table: table.into(),
            reason: reason.into(),
        }
    }

    /// Create a ConfigError
    pub fn config_error(path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::ConfigError {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True when the failure comes from the inputs rather than the reference
    /// data or configuration, i.e. the caller can fix it by editing the record.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            CalcError::InvalidInput { .. }
                | CalcError::MaterialNotFound { .. }
                | CalcError::PipeSizeNotFound { .. }
                | CalcError::InvalidGeometry { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            CalcError::PipeSizeNotFound { .. } => "PIPE_SIZE_NOT_FOUND",
            CalcError::InvalidGeometry { .. } => "INVALID_GEOMETRY",
            CalcError::ReferenceData { .. } => "REFERENCE_DATA",
            CalcError::ConfigError { .. } => "CONFIG_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_geometry("shell minimum thickness", -150.0, "S*E <= 0.6*P");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidGeometry\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::material_not_found("SA-999").error_code(), "MATERIAL_NOT_FOUND");
        assert_eq!(CalcError::pipe_size_not_found("2", "40").error_code(), "PIPE_SIZE_NOT_FOUND");
        assert_eq!(CalcError::config_error("x.toml", "bad").error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_input_error_classification() {
        assert!(CalcError::invalid_input("p", "-1", "negative").is_input_error());
        assert!(!CalcError::reference_data("materials", "unsorted").is_input_error());
    }

    #[test]
    fn test_display_message() {
        let error = CalcError::pipe_size_not_found("2", "40");
        assert_eq!(error.to_string(), "Pipe size not found: NPS 2 Sch 40");
    }
}
