//! # Unit Types
//!
//! Type-safe wrappers for the units inspection data arrives in. These stay
//! lightweight (just f64 wrappers) and serialize as bare numbers, so a JSON
//! record from the persistence layer reads the same with or without them.
//!
//! ## US Customary Units
//!
//! Pressure vessel code calculations in ASME VIII-1 and API 510 are carried
//! out in US customary units:
//! - Length: inches (in), feet (ft), mils (0.001 in)
//! - Pressure/stress: pounds per square inch (psi), carried as bare f64
//! - Corrosion rate: mils per year (mpy), inches per year (ipy)
//! - Time: years of 365.25 days
//!
//! ## Example
//!
//! ```rust
//! use vessel_core::units::{InchesPerYear, MilsPerYear};
//!
//! let rate = MilsPerYear(5.0);
//! let ipy: InchesPerYear = rate.into();
//! assert!((ipy.0 - 0.005).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Days per year used for every calendar-span conversion (captures leap years)
pub const DAYS_PER_YEAR: f64 = 365.25;

// ============================================================================
// Length Units
// ============================================================================

/// Length in feet (liquid column heights)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feet(pub f64);

/// Length in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

/// Length in mils (thousandths of an inch)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mils(pub f64);

impl From<Inches> for Mils {
    fn from(inches: Inches) -> Self {
        Mils(inches.0 * 1000.0)
    }
}

impl From<Mils> for Inches {
    fn from(mils: Mils) -> Self {
        Inches(mils.0 / 1000.0)
    }
}

// ============================================================================
// Corrosion Rate Units
// ============================================================================

/// Metal loss rate in mils per year (mpy)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MilsPerYear(pub f64);

/// Metal loss rate in inches per year (ipy)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InchesPerYear(pub f64);

impl From<MilsPerYear> for InchesPerYear {
    fn from(mpy: MilsPerYear) -> Self {
        InchesPerYear(mpy.0 / 1000.0)
    }
}

impl From<InchesPerYear> for MilsPerYear {
    fn from(ipy: InchesPerYear) -> Self {
        MilsPerYear(ipy.0 * 1000.0)
    }
}

// ============================================================================
// Time Units
// ============================================================================

/// Duration in years of 365.25 days
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Years(pub f64);

impl Years {
    /// Convert a whole-day calendar span to years
    pub fn from_days(days: i64) -> Self {
        Years(days as f64 / DAYS_PER_YEAR)
    }

    /// Nearest whole number of days in this span
    pub fn to_days(self) -> i64 {
        (self.0 * DAYS_PER_YEAR).round() as i64
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Feet);
impl_arithmetic!(Inches);
impl_arithmetic!(Mils);
impl_arithmetic!(MilsPerYear);
impl_arithmetic!(InchesPerYear);
impl_arithmetic!(Years);

// Thickness lost over a span: rate × time
impl Mul<Years> for InchesPerYear {
    type Output = Inches;
    fn mul(self, rhs: Years) -> Inches {
        Inches(self.0 * rhs.0)
    }
}
