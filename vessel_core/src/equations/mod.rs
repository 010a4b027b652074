//! # Pressure Vessel Equations
//!
//! This module contains every formula the calculations apply. Having the
//! equations in one place enables:
//! - Easy verification against the code paragraphs they implement
//! - Documentation of assumptions and units
//! - Consistent implementation across calculation types
//!
//! ## Modules
//!
//! - [`thickness`] - Minimum thickness, MAWP, static head, external pressure
//! - [`life`] - Corrosion rate, remaining life, inspection interval
//! - [`ffs`] - Fitness-for-service Level 1 screening formulas
//! - [`registry`] - Equation metadata and usage tracking for report appendices
//!
//! ## Units
//!
//! Pressures in psi, lengths and thicknesses in inches, corrosion rates in
//! mils per year, time in 365.25-day years.
//!
//! ## References
//!
//! - ASME BPVC Section VIII Division 1 (UG-27, UG-28, UG-32, Appendix 1-4, UG-45)
//! - API 510 Pressure Vessel Inspection Code
//! - API 579-1/ASME FFS-1 Fitness-For-Service (Parts 4 and 5)
//! - ASME B36.10M Welded and Seamless Wrought Steel Pipe

pub mod ffs;
pub mod life;
pub mod registry;
pub mod thickness;

pub use thickness::{
    external_pressure_mawp,
    head_mawp,
    head_min_thickness,
    pipe_wall_less_tolerance,
    shell_mawp,
    shell_min_thickness,
    static_head_pressure,
    ExternalPressureCapacity,
};

pub use life::{
    corrosion_rate_mpy,
    half_life_interval,
    projected_thickness,
    remaining_life,
    RemainingLife,
};

pub use ffs::{
    angular_extent_deg,
    folias_factor,
    reduced_mawp,
    remaining_strength_factor,
    remaining_thickness_ratio,
    required_measured_thickness,
    shell_parameter,
};

pub use registry::{
    CodeReference,
    Equation,
    EquationCategory,
    EquationMetadata,
    EquationTracker,
    EquationUsage,
    Variable,
    ALL_EQUATIONS,
    generate_equations_markdown,
};
