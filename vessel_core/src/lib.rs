//! # vessel_core - Pressure Vessel Inspection Calculation Engine
//!
//! `vessel_core` evaluates in-service pressure vessels against ASME Section
//! VIII Division 1 and API 510/579. Given measured thicknesses it produces
//! minimum required thickness, MAWP, corrosion rate, remaining life, next
//! inspection date and an acceptance status for every shell course, head
//! and nozzle. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **Explicit reference data**: Stress and pipe tables are passed in, never global
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use vessel_core::calculations::component::{calculate, ComponentInput, ComponentKind, CorrosionBasis, ServiceCondition};
//! use vessel_core::{CalcSettings, ReferenceData};
//!
//! let reference = ReferenceData::builtin().unwrap();
//! let input = ComponentInput {
//!     label: "Shell".to_string(),
//!     design_pressure_psi: 150.0,
//!     design_temperature_f: 300.0,
//!     inside_diameter_in: 60.0,
//!     material_spec: "SA-516-70".to_string(),
//!     nominal_thickness_in: 0.5,
//!     actual_thickness_in: 0.47,
//!     corrosion_allowance_in: 0.125,
//!     joint_efficiency: 0.85,
//!     component: ComponentKind::shell(),
//!     service: ServiceCondition::Vapor,
//!     corrosion: Some(CorrosionBasis::Rate { rate_mpy: 5.0 }),
//!     evaluation_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
//! };
//!
//! let result = calculate(&input, &reference, &CalcSettings::default()).unwrap();
//! assert!(result.mawp_psi > 150.0);
//!
//! // Serialize to JSON for storage or transmission
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Component, nozzle, FFS and in-lieu-of evaluations
//! - [`equations`] - Code formulas and the equation registry
//! - [`geometry`] - Head factors and external pressure charts
//! - [`materials`] - Allowable stress and pipe schedule tables
//! - [`reference`] - Bundle of all reference tables
//! - [`settings`] - Tunable policy thresholds (TOML)
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod geometry;
pub mod interpolation;
pub mod materials;
pub mod reference;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{CalculationItem, CalculationOutput, ComponentStatus};
pub use errors::{CalcError, CalcResult};
pub use reference::ReferenceData;
pub use settings::CalcSettings;
