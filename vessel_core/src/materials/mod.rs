//! # Materials Database
//!
//! Reference data for vessel materials and standard pipe.
//!
//! ## Tables
//!
//! - **Allowable stress**: ASME Section II Part D, by material spec and temperature
//! - **Pipe schedules**: ASME B36.10M outside diameter and wall by NPS and schedule
//!
//! Both tables are immutable once built. They are constructed once at startup
//! (usually through [`crate::reference::ReferenceData::builtin`]) and passed by
//! reference into the calculations.
//!
//! ## Example
//!
//! ```rust
//! use vessel_core::materials::{MaterialStressTable, PipeScheduleTable};
//!
//! let stresses = MaterialStressTable::builtin().unwrap();
//! let s = stresses.stress_at("SA-106-B", 400.0).unwrap();
//! assert_eq!(s.allowable_stress_psi, 17100.0);
//!
//! let pipes = PipeScheduleTable::builtin().unwrap();
//! let pipe = pipes.lookup("4", "80").unwrap();
//! assert_eq!(pipe.wall_thickness_in, 0.337);
//! ```

pub mod pipe_schedule;
pub mod stress_table;

pub use pipe_schedule::{PipeDimensions, PipeScheduleTable, PipeSizeEntry};
pub use stress_table::{MaterialStressEntry, MaterialStressTable, StressLookup, StressPoint};
