//! # Geometry Factor Resolvers
//!
//! Shape-dependent inputs to the thickness formulas:
//!
//! - [`heads`] - L and factor for hemispherical, ellipsoidal and torispherical heads
//! - [`external_chart`] - Factor A / Factor B charts for external pressure

pub mod external_chart;
pub mod heads;

pub use external_chart::{ExternalPressureChart, ExternalPressureCharts};
pub use heads::{resolve_head_factors, torispherical_m_factor, HeadFactors, HeadType};
