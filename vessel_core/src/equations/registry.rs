//! # Equation Registry
//!
//! Central registry of every pressure vessel formula used in calculations.
//! Each equation has metadata including its code reference, formula and
//! variable definitions.
//!
//! ## Architecture
//!
//! The registry provides:
//! - Type-safe equation identification via the `Equation` enum
//! - Full metadata for report appendices and audit trails
//! - Serialization support for JSON export
//!
//! ## Usage
//!
//! ```rust
//! use vessel_core::equations::registry::{Equation, EquationTracker};
//!
//! // Track equation usage during a calculation
//! let mut tracker = EquationTracker::new();
//! tracker.record(Equation::ShellMinThickness, "Shell 1");
//!
//! // Get metadata for the report appendix
//! let meta = Equation::ShellMinThickness.metadata();
//! println!("Formula: {}", meta.formula_plain);
//! ```

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};

// ============================================================================
// Code References
// ============================================================================

/// Reference to a pressure equipment code or standard.
///
/// All equations should cite their source for auditability.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum CodeReference {
    /// ASME Boiler and Pressure Vessel Code, Section VIII Division 1
    AsmeVIII1 { paragraph: &'static str },
    /// API 510 Pressure Vessel Inspection Code
    Api510 { section: &'static str },
    /// API 579-1/ASME FFS-1 Fitness-For-Service
    Api579 { part: u8, paragraph: &'static str },
    /// ASME B36.10M Welded and Seamless Wrought Steel Pipe
    AsmeB36_10M,
    /// Fundamental hydrostatics (no specific code reference needed)
    Hydrostatics,
}

impl CodeReference {
    /// Format the reference for display in reports
    pub fn citation(&self) -> String {
        match self {
            CodeReference::AsmeVIII1 { paragraph } => format!("ASME VIII-1 {}", paragraph),
            CodeReference::Api510 { section } => format!("API 510 Section {}", section),
            CodeReference::Api579 { part, paragraph } => {
                format!("API 579-1 Part {}, {}", part, paragraph)
            }
            CodeReference::AsmeB36_10M => "ASME B36.10M".to_string(),
            CodeReference::Hydrostatics => "Fundamental Hydrostatics".to_string(),
        }
    }

    /// Short form for inline references
    pub fn short_form(&self) -> &'static str {
        match self {
            CodeReference::AsmeVIII1 { .. } => "ASME VIII-1",
            CodeReference::Api510 { .. } => "API 510",
            CodeReference::Api579 { .. } => "API 579",
            CodeReference::AsmeB36_10M => "B36.10M",
            CodeReference::Hydrostatics => "Hydrostatics",
        }
    }
}

// ============================================================================
// Equation Categories
// ============================================================================

/// Categories for organizing equations in the appendix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquationCategory {
    /// Pressure adjustments before any thickness formula
    DesignPressure,
    /// Head shape factors
    GeometryFactors,
    /// Minimum required thickness
    RequiredThickness,
    /// Maximum allowable working pressure
    AllowablePressure,
    /// External pressure (collapse) check
    ExternalPressure,
    /// Corrosion rate, remaining life, inspection interval
    CorrosionLife,
    /// Fitness-for-service screening
    FitnessForService,
}

impl EquationCategory {
    /// Display name for the category
    pub fn display_name(&self) -> &'static str {
        match self {
            EquationCategory::DesignPressure => "Design Pressure",
            EquationCategory::GeometryFactors => "Geometry Factors",
            EquationCategory::RequiredThickness => "Required Thickness",
            EquationCategory::AllowablePressure => "Allowable Pressure",
            EquationCategory::ExternalPressure => "External Pressure",
            EquationCategory::CorrosionLife => "Corrosion and Remaining Life",
            EquationCategory::FitnessForService => "Fitness-for-Service",
        }
    }

    /// Sort order for the appendix (lower = earlier)
    pub fn sort_order(&self) -> u8 {
        match self {
            EquationCategory::DesignPressure => 1,
            EquationCategory::GeometryFactors => 2,
            EquationCategory::RequiredThickness => 3,
            EquationCategory::AllowablePressure => 4,
            EquationCategory::ExternalPressure => 5,
            EquationCategory::CorrosionLife => 6,
            EquationCategory::FitnessForService => 7,
        }
    }
}

// ============================================================================
// Variable Definition
// ============================================================================

/// Definition of a variable used in an equation.
#[derive(Debug, Clone)]
pub struct Variable {
    /// Symbol (e.g., "P", "R", "S")
    pub symbol: &'static str,
    /// Description
    pub description: &'static str,
    /// Units (e.g., "psi", "in", "mpy")
    pub units: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str) -> Self {
        Self { symbol, description, units }
    }
}

// ============================================================================
// Equation Metadata
// ============================================================================

/// Complete metadata for a pressure vessel equation.
#[derive(Debug, Clone)]
pub struct EquationMetadata {
    /// Human-readable name (e.g., "Shell Minimum Thickness")
    pub name: &'static str,
    /// Brief description of what this equation calculates
    pub description: &'static str,
    /// The formula in plain text
    pub formula_plain: &'static str,
    /// Code/standard reference
    pub reference: CodeReference,
    /// Variable definitions
    pub variables: Vec<Variable>,
    /// Assumptions or limitations
    pub assumptions: Vec<&'static str>,
    /// Category for grouping in appendix
    pub category: EquationCategory,
    /// Source module where the equation implementation lives
    pub source_module: &'static str,
    /// Function name implementing the equation (for linking)
    pub source_function: &'static str,
}

// ============================================================================
// Equation Enum
// ============================================================================

/// All pressure vessel equations used by the calculation engine.
///
/// Each variant maps to a specific formula with full metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Equation {
    // -------------------------------------------------------------------------
    // Design pressure and geometry
    // -------------------------------------------------------------------------
    /// P_static = SG × h × 0.433
    StaticHead,
    /// M = ¼(3 + √(L/r))
    TorisphericalM,

    // -------------------------------------------------------------------------
    // Required thickness
    // -------------------------------------------------------------------------
    /// t = PR/(SE − 0.6P) + CA
    ShellMinThickness,
    /// t = PL·factor/(2SE − 0.2P) + CA
    HeadMinThickness,
    /// t_pipe = t_nom × (1 − 0.125)
    PipeWallLessTolerance,
    /// t_req = max(t_pressure, t_pipe)
    NozzleGoverningThickness,

    // -------------------------------------------------------------------------
    // MAWP
    // -------------------------------------------------------------------------
    /// MAWP = SE(t−CA)/(R + 0.6(t−CA))
    ShellMawp,
    /// MAWP = 2SE(t−CA)/(L·factor + 0.2(t−CA))
    HeadMawp,
    /// Pa = min(4B/(3 Do/t), 2AE/(3(Do/t − 1)))
    ExternalPressureAllowable,

    // -------------------------------------------------------------------------
    // Corrosion and life
    // -------------------------------------------------------------------------
    /// CR = (t_prev − t_curr)/Δy × 1000
    CorrosionRate,
    /// RL = (t_act − t_req)/(CR/1000)
    RemainingLife,
    /// interval = min(RL/2, max)
    HalfLifeInterval,
    /// t_next = t_act − CR/1000 × interval
    ProjectedThickness,

    // -------------------------------------------------------------------------
    // Fitness-for-service
    // -------------------------------------------------------------------------
    /// tmm = tmin + FCA
    FfsRequiredThickness,
    /// θ = c/(πD) × 360
    LtaAngularExtent,
    /// RSF = Rt/(1 − (1/Mt)(1 − Rt))
    LtaRemainingStrength,
    /// MAWPr = MAWP × RSF/RSFa
    LtaReducedMawp,
}

impl Equation {
    /// Get the full metadata for this equation
    pub fn metadata(&self) -> EquationMetadata {
        match self {
            Equation::StaticHead => EquationMetadata {
                name: "Liquid Static Head",
                description: "Hydrostatic pressure added to the design pressure for liquid service",
                formula_plain: "P_static = SG * h * 0.433",
                reference: CodeReference::Hydrostatics,
                variables: vec![
                    Variable::new("SG", "Specific gravity of contents", "-"),
                    Variable::new("h", "Liquid height above the component", "ft"),
                    Variable::new("0.433", "Water pressure gradient", "psi/ft"),
                ],
                assumptions: vec!["Liquid at rest", "Gradient configurable for other reference liquids"],
                category: EquationCategory::DesignPressure,
                source_module: "equations/thickness.rs",
                source_function: "static_head_pressure",
            },

            Equation::TorisphericalM => EquationMetadata {
                name: "Torispherical Head Factor M",
                description: "Stress intensification factor for a flanged-and-dished head knuckle",
                formula_plain: "M = 0.25 * (3 + sqrt(L / r))",
                reference: CodeReference::AsmeVIII1 { paragraph: "Appendix 1-4(d)" },
                variables: vec![
                    Variable::new("L", "Inside crown radius", "in"),
                    Variable::new("r", "Inside knuckle radius", "in"),
                ],
                assumptions: vec![
                    "Crown radius defaults to the inside diameter",
                    "Knuckle radius defaults to 6% of the inside diameter",
                ],
                category: EquationCategory::GeometryFactors,
                source_module: "geometry/heads.rs",
                source_function: "torispherical_m_factor",
            },

            Equation::ShellMinThickness => EquationMetadata {
                name: "Shell Minimum Thickness",
                description: "Required cylindrical shell thickness for circumferential stress",
                formula_plain: "t = P*R / (S*E - 0.6*P) + CA",
                reference: CodeReference::AsmeVIII1 { paragraph: "UG-27(c)(1)" },
                variables: vec![
                    Variable::new("P", "Design pressure including static head", "psi"),
                    Variable::new("R", "Inside radius", "in"),
                    Variable::new("S", "Allowable stress at design temperature", "psi"),
                    Variable::new("E", "Joint efficiency", "-"),
                    Variable::new("CA", "Corrosion allowance", "in"),
                ],
                assumptions: vec!["Thin-wall limit t <= R/2 and P <= 0.385SE", "Denominator must be positive"],
                category: EquationCategory::RequiredThickness,
                source_module: "equations/thickness.rs",
                source_function: "shell_min_thickness",
            },

            Equation::HeadMinThickness => EquationMetadata {
                name: "Formed Head Minimum Thickness",
                description: "Required thickness for hemispherical, ellipsoidal and torispherical heads",
                formula_plain: "t = P*L*factor / (2*S*E - 0.2*P) + CA",
                reference: CodeReference::AsmeVIII1 { paragraph: "UG-32 / Appendix 1-4" },
                variables: vec![
                    Variable::new("P", "Design pressure including static head", "psi"),
                    Variable::new("L", "Head characteristic length", "in"),
                    Variable::new("factor", "1.0, or M for torispherical heads", "-"),
                    Variable::new("S", "Allowable stress at design temperature", "psi"),
                    Variable::new("E", "Joint efficiency", "-"),
                    Variable::new("CA", "Corrosion allowance", "in"),
                ],
                assumptions: vec!["Pressure on the concave side", "Denominator must be positive"],
                category: EquationCategory::RequiredThickness,
                source_module: "equations/thickness.rs",
                source_function: "head_min_thickness",
            },

            Equation::PipeWallLessTolerance => EquationMetadata {
                name: "Pipe Wall Less Mill Tolerance",
                description: "Guaranteed minimum wall of schedule pipe",
                formula_plain: "t_pipe = t_nom * (1 - 0.125)",
                reference: CodeReference::AsmeB36_10M,
                variables: vec![
                    Variable::new("t_nom", "Nominal schedule wall thickness", "in"),
                    Variable::new("0.125", "Mill under-tolerance", "-"),
                ],
                assumptions: vec!["Seamless pipe purchased to the standard 12.5% under-tolerance"],
                category: EquationCategory::RequiredThickness,
                source_module: "equations/thickness.rs",
                source_function: "pipe_wall_less_tolerance",
            },

            Equation::NozzleGoverningThickness => EquationMetadata {
                name: "Nozzle Governing Thickness",
                description: "Larger of the pressure design thickness and the pipe wall less tolerance",
                formula_plain: "t_req = max(t_pressure, t_pipe)",
                reference: CodeReference::AsmeVIII1 { paragraph: "UG-45" },
                variables: vec![
                    Variable::new("t_pressure", "Shell formula thickness with E = 1.0", "in"),
                    Variable::new("t_pipe", "Schedule wall less mill tolerance", "in"),
                ],
                assumptions: vec!["Nozzle neck treated as a seamless cylinder"],
                category: EquationCategory::RequiredThickness,
                source_module: "calculations/nozzle.rs",
                source_function: "calculate",
            },

            Equation::ShellMawp => EquationMetadata {
                name: "Shell MAWP",
                description: "Maximum allowable working pressure of a cylindrical shell at measured thickness",
                formula_plain: "MAWP = S*E*(t - CA) / (R + 0.6*(t - CA))",
                reference: CodeReference::AsmeVIII1 { paragraph: "UG-27(c)(1)" },
                variables: vec![
                    Variable::new("t", "Minimum measured thickness", "in"),
                    Variable::new("R", "Inside radius", "in"),
                    Variable::new("S", "Allowable stress", "psi"),
                    Variable::new("E", "Joint efficiency", "-"),
                    Variable::new("CA", "Corrosion allowance", "in"),
                ],
                assumptions: vec!["Zero when t <= CA"],
                category: EquationCategory::AllowablePressure,
                source_module: "equations/thickness.rs",
                source_function: "shell_mawp",
            },

            Equation::HeadMawp => EquationMetadata {
                name: "Formed Head MAWP",
                description: "Maximum allowable working pressure of a formed head at measured thickness",
                formula_plain: "MAWP = 2*S*E*(t - CA) / (L*factor + 0.2*(t - CA))",
                reference: CodeReference::AsmeVIII1 { paragraph: "UG-32 / Appendix 1-4" },
                variables: vec![
                    Variable::new("t", "Minimum measured thickness", "in"),
                    Variable::new("L", "Head characteristic length", "in"),
                    Variable::new("factor", "1.0, or M for torispherical heads", "-"),
                    Variable::new("S", "Allowable stress", "psi"),
                    Variable::new("E", "Joint efficiency", "-"),
                ],
                assumptions: vec!["Zero when t <= CA"],
                category: EquationCategory::AllowablePressure,
                source_module: "equations/thickness.rs",
                source_function: "head_mawp",
            },

            Equation::ExternalPressureAllowable => EquationMetadata {
                name: "Allowable External Pressure",
                description: "Collapse capacity of a cylindrical shell from the Factor A / Factor B charts",
                formula_plain: "Pa = min(4B / (3*Do/t), 2*A*E / (3*(Do/t - 1)))",
                reference: CodeReference::AsmeVIII1 { paragraph: "UG-28(c)" },
                variables: vec![
                    Variable::new("A", "Factor A from L/Do", "-"),
                    Variable::new("B", "Factor B from Do/t", "psi"),
                    Variable::new("Do", "Outside diameter", "in"),
                    Variable::new("t", "Corroded thickness", "in"),
                    Variable::new("E", "Elastic modulus", "psi"),
                ],
                assumptions: vec!["Chart values clamped to the printed range"],
                category: EquationCategory::ExternalPressure,
                source_module: "equations/thickness.rs",
                source_function: "external_pressure_mawp",
            },

            Equation::CorrosionRate => EquationMetadata {
                name: "Corrosion Rate",
                description: "Metal loss rate between two thickness readings",
                formula_plain: "CR = (t_prev - t_curr) / years * 1000",
                reference: CodeReference::Api510 { section: "7.1.1" },
                variables: vec![
                    Variable::new("t_prev", "Previous reading", "in"),
                    Variable::new("t_curr", "Current reading", "in"),
                    Variable::new("years", "Time between readings (365.25-day years)", "yr"),
                ],
                assumptions: vec!["Short-term rate from two readings"],
                category: EquationCategory::CorrosionLife,
                source_module: "equations/life.rs",
                source_function: "corrosion_rate_mpy",
            },

            Equation::RemainingLife => EquationMetadata {
                name: "Remaining Life",
                description: "Years until the wall reaches its required thickness",
                formula_plain: "RL = (t_act - t_req) / (CR / 1000)",
                reference: CodeReference::Api510 { section: "7.1.1" },
                variables: vec![
                    Variable::new("t_act", "Minimum measured thickness", "in"),
                    Variable::new("t_req", "Required thickness", "in"),
                    Variable::new("CR", "Corrosion rate", "mpy"),
                ],
                assumptions: vec!["Constant rate", "Unlimited when CR <= 0"],
                category: EquationCategory::CorrosionLife,
                source_module: "equations/life.rs",
                source_function: "remaining_life",
            },

            Equation::HalfLifeInterval => EquationMetadata {
                name: "Inspection Interval",
                description: "Next internal inspection at half the remaining life, capped",
                formula_plain: "interval = min(RL / 2, 10 years)",
                reference: CodeReference::Api510 { section: "6.5.1.1" },
                variables: vec![
                    Variable::new("RL", "Remaining life", "yr"),
                ],
                assumptions: vec!["Cap is configurable"],
                category: EquationCategory::CorrosionLife,
                source_module: "equations/life.rs",
                source_function: "half_life_interval",
            },

            Equation::ProjectedThickness => EquationMetadata {
                name: "Projected Thickness",
                description: "Expected wall at the next inspection",
                formula_plain: "t_next = t_act - CR / 1000 * interval",
                reference: CodeReference::Api510 { section: "7.1.1" },
                variables: vec![
                    Variable::new("t_act", "Minimum measured thickness", "in"),
                    Variable::new("CR", "Corrosion rate", "mpy"),
                    Variable::new("interval", "Years to the next inspection", "yr"),
                ],
                assumptions: vec!["Constant rate"],
                category: EquationCategory::CorrosionLife,
                source_module: "equations/life.rs",
                source_function: "projected_thickness",
            },

            Equation::FfsRequiredThickness => EquationMetadata {
                name: "Level 1 Required Measured Thickness",
                description: "Thickness the wall must retain through the next inspection period",
                formula_plain: "tmm_req = tmin + FCA",
                reference: CodeReference::Api579 { part: 4, paragraph: "4.4.2" },
                variables: vec![
                    Variable::new("tmin", "Minimum required thickness", "in"),
                    Variable::new("FCA", "Future corrosion allowance", "in"),
                ],
                assumptions: vec!["General metal loss", "Level 1 screening only"],
                category: EquationCategory::FitnessForService,
                source_module: "equations/ffs.rs",
                source_function: "required_measured_thickness",
            },

            Equation::LtaAngularExtent => EquationMetadata {
                name: "Thin Area Circumferential Extent",
                description: "Angle subtended by a local thin area",
                formula_plain: "theta = c / (pi * D) * 360",
                reference: CodeReference::Api579 { part: 5, paragraph: "5.2.1" },
                variables: vec![
                    Variable::new("c", "Circumferential flaw width", "in"),
                    Variable::new("D", "Inside diameter", "in"),
                ],
                assumptions: vec!["Above 180 degrees requires Level 2 or 3"],
                category: EquationCategory::FitnessForService,
                source_module: "equations/ffs.rs",
                source_function: "angular_extent_deg",
            },

            Equation::LtaRemainingStrength => EquationMetadata {
                name: "Remaining Strength Factor",
                description: "Ratio of damaged to undamaged collapse load for a local thin area",
                formula_plain: "Rt = (tmm - FCA)/tc, lambda = 1.285*s/sqrt(D*tc), Mt = sqrt(1 + 0.48*lambda^2), RSF = Rt / (1 - (1/Mt)*(1 - Rt))",
                reference: CodeReference::Api579 { part: 5, paragraph: "5.4.2.2" },
                variables: vec![
                    Variable::new("tmm", "Minimum measured thickness in the thin area", "in"),
                    Variable::new("tc", "Corroded wall away from the thin area", "in"),
                    Variable::new("s", "Longitudinal flaw length", "in"),
                    Variable::new("D", "Inside diameter", "in"),
                    Variable::new("Mt", "Folias factor", "-"),
                ],
                assumptions: vec!["Cylindrical shell, longitudinal stress not governing"],
                category: EquationCategory::FitnessForService,
                source_module: "equations/ffs.rs",
                source_function: "remaining_strength_factor",
            },

            Equation::LtaReducedMawp => EquationMetadata {
                name: "Reduced MAWP",
                description: "Permissible pressure when the remaining strength factor is below the allowable",
                formula_plain: "MAWPr = MAWP * RSF / RSFa",
                reference: CodeReference::Api579 { part: 2, paragraph: "2.4.2.2" },
                variables: vec![
                    Variable::new("RSF", "Remaining strength factor", "-"),
                    Variable::new("RSFa", "Allowable remaining strength factor (0.9)", "-"),
                ],
                assumptions: vec!["Applied only when RSF < RSFa"],
                category: EquationCategory::FitnessForService,
                source_module: "equations/ffs.rs",
                source_function: "reduced_mawp",
            },
        }
    }

    /// Get all equations in a given category
    pub fn in_category(category: EquationCategory) -> Vec<Equation> {
        ALL_EQUATIONS
            .iter()
            .filter(|eq| eq.metadata().category == category)
            .copied()
            .collect()
    }

    /// Get all categories that contain at least one equation
    pub fn all_categories() -> Vec<EquationCategory> {
        use EquationCategory::*;
        let mut cats = vec![
            DesignPressure,
            GeometryFactors,
            RequiredThickness,
            AllowablePressure,
            ExternalPressure,
            CorrosionLife,
            FitnessForService,
        ];
        cats.sort_by_key(|c| c.sort_order());
        cats
    }
}

/// All equations in the registry (for iteration)
pub static ALL_EQUATIONS: &[Equation] = &[
    Equation::StaticHead,
    Equation::TorisphericalM,
    Equation::ShellMinThickness,
    Equation::HeadMinThickness,
    Equation::PipeWallLessTolerance,
    Equation::NozzleGoverningThickness,
    Equation::ShellMawp,
    Equation::HeadMawp,
    Equation::ExternalPressureAllowable,
    Equation::CorrosionRate,
    Equation::RemainingLife,
    Equation::HalfLifeInterval,
    Equation::ProjectedThickness,
    Equation::FfsRequiredThickness,
    Equation::LtaAngularExtent,
    Equation::LtaRemainingStrength,
    Equation::LtaReducedMawp,
];

// ============================================================================
// Equation Usage Tracking
// ============================================================================

/// Record of an equation being used in a calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquationUsage {
    /// The equation that was used
    pub equation: Equation,
    /// Context describing where/why it was used (e.g., "internal pressure")
    pub context: String,
    /// Optional: the component label this equation was applied to
    pub component_label: Option<String>,
}

impl EquationUsage {
    /// Create a new equation usage record
    pub fn new(equation: Equation, context: impl Into<String>) -> Self {
        Self {
            equation,
            context: context.into(),
            component_label: None,
        }
    }

    /// Create usage record with component label
    pub fn for_component(equation: Equation, context: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            equation,
            context: context.into(),
            component_label: Some(label.into()),
        }
    }
}

/// Collector for equation usage during a calculation.
///
/// Pass this to calculation functions to track which equations are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EquationTracker {
    usages: Vec<EquationUsage>,
}

impl EquationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that an equation was used
    pub fn record(&mut self, equation: Equation, context: impl Into<String>) {
        self.usages.push(EquationUsage::new(equation, context));
    }

    /// Record equation usage for a specific component
    pub fn record_for_component(&mut self, equation: Equation, context: impl Into<String>, label: impl Into<String>) {
        self.usages.push(EquationUsage::for_component(equation, context, label));
    }

    /// Get all recorded usages
    pub fn usages(&self) -> &[EquationUsage] {
        &self.usages
    }

    /// Get unique equations used (deduplicated, first-use order)
    pub fn unique_equations(&self) -> Vec<Equation> {
        let mut seen = HashSet::new();
        self.usages
            .iter()
            .filter(|u| seen.insert(u.equation))
            .map(|u| u.equation)
            .collect()
    }

    /// Group unique equations by category for the appendix
    pub fn by_category(&self) -> Vec<(EquationCategory, Vec<Equation>)> {
        let mut by_cat: HashMap<EquationCategory, Vec<Equation>> = HashMap::new();
        for eq in self.unique_equations() {
            by_cat.entry(eq.metadata().category).or_default().push(eq);
        }

        let mut result: Vec<_> = by_cat.into_iter().collect();
        result.sort_by_key(|(cat, _)| cat.sort_order());
        result
    }

    /// Merge another tracker into this one
    pub fn merge(&mut self, other: EquationTracker) {
        self.usages.extend(other.usages);
    }

    /// Render a "List of Equations" appendix for the recorded usages.
    pub fn generate_appendix_markdown(&self) -> String {
        let mut output = String::from("## Appendix: List of Equations\n\n");
        let grouped = self.by_category();
        if grouped.is_empty() {
            output.push_str("No equations recorded.\n");
            return output;
        }

        for (category, equations) in grouped {
            output.push_str(&format!("### {}\n\n", category.display_name()));
            for eq in equations {
                let meta = eq.metadata();
                output.push_str(&format!(
                    "- **{}**: `{}` ({})\n",
                    meta.name,
                    meta.formula_plain,
                    meta.reference.citation()
                ));
                let labels: BTreeSet<&str> = self
                    .usages
                    .iter()
                    .filter(|u| u.equation == eq)
                    .filter_map(|u| u.component_label.as_deref())
                    .collect();
                if !labels.is_empty() {
                    let labels: Vec<&str> = labels.into_iter().collect();
                    output.push_str(&format!("  - Applied to: {}\n", labels.join(", ")));
                }
            }
            output.push('\n');
        }
        output
    }
}

// ============================================================================
// Markdown Generation for EQUATIONS.md
// ============================================================================

/// Generate a complete EQUATIONS.md file for documentation.
///
/// Lists every equation in the registry, organized by category, with
/// formulas, references, and source code links.
///
/// # Example
///
/// ```rust
/// use vessel_core::equations::registry::generate_equations_markdown;
///
/// let markdown = generate_equations_markdown();
/// assert!(markdown.contains("Vessel Inspection Equations Reference"));
/// assert!(markdown.contains("Required Thickness"));
/// ```
pub fn generate_equations_markdown() -> String {
    let mut output = String::with_capacity(16_000);

    output.push_str(r#"# Vessel Inspection Equations Reference

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `cargo run --bin gen-equations`

This document lists all formulas used by the inspection calculation engine.
Each equation includes its formula, code reference, source location, and assumptions.

## Units

| Quantity | Unit |
|----------|------|
| Pressure | psi |
| Length, thickness | in |
| Liquid height | ft |
| Corrosion rate | mils per year (mpy) |
| Time | years of 365.25 days |

---

"#);

    let categories = Equation::all_categories();

    for category in &categories {
        let equations = Equation::in_category(*category);
        if equations.is_empty() {
            continue;
        }

        output.push_str(&format!("## {}\n\n", category.display_name()));

        for equation in equations {
            let meta = equation.metadata();

            output.push_str(&format!("### {}\n\n", meta.name));
            output.push_str(&format!("{}\n\n", meta.description));
            output.push_str(&format!("**Formula:** `{}`\n\n", meta.formula_plain));

            if !meta.variables.is_empty() {
                output.push_str("**Variables:**\n\n");
                output.push_str("| Symbol | Description | Units |\n");
                output.push_str("|--------|-------------|-------|\n");
                for var in &meta.variables {
                    output.push_str(&format!(
                        "| {} | {} | {} |\n",
                        var.symbol, var.description, var.units
                    ));
                }
                output.push('\n');
            }

            output.push_str(&format!("**Reference:** {}\n\n", meta.reference.citation()));
            output.push_str(&format!(
                "**Source:** [`{}`]({})\n\n",
                meta.source_function, meta.source_module
            ));

            if !meta.assumptions.is_empty() {
                output.push_str("**Assumptions:**\n");
                for assumption in &meta.assumptions {
                    output.push_str(&format!("- {}\n", assumption));
                }
                output.push('\n');
            }

            output.push_str("---\n\n");
        }
    }

    output.push_str(&format!(
        "## Statistics\n\n- **Total Equations:** {}\n- **Categories:** {}\n",
        ALL_EQUATIONS.len(),
        categories.len()
    ));

    output
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_equations_have_metadata() {
        assert_eq!(ALL_EQUATIONS.len(), 17);

        for eq in ALL_EQUATIONS {
            let meta = eq.metadata();
            assert!(!meta.name.is_empty(), "Equation {:?} has no name", eq);
            assert!(!meta.formula_plain.is_empty(), "Equation {:?} has no formula", eq);
            assert!(!meta.variables.is_empty(), "Equation {:?} has no variables", eq);
            assert!(!meta.source_module.is_empty(), "Equation {:?} missing source_module", eq);
            assert!(!meta.source_function.is_empty(), "Equation {:?} missing source_function", eq);
        }

        let shell = Equation::ShellMinThickness.metadata();
        assert!(shell.formula_plain.contains("S*E - 0.6*P"), "Shell thickness formula wrong");
    }

    #[test]
    fn test_code_reference_citation() {
        let ug27 = CodeReference::AsmeVIII1 { paragraph: "UG-27(c)(1)" };
        assert_eq!(ug27.citation(), "ASME VIII-1 UG-27(c)(1)");

        let part5 = CodeReference::Api579 { part: 5, paragraph: "5.4.2.2" };
        assert_eq!(part5.citation(), "API 579-1 Part 5, 5.4.2.2");
        assert_eq!(part5.short_form(), "API 579");
    }

    #[test]
    fn test_equation_tracker() {
        let mut tracker = EquationTracker::new();
        tracker.record(Equation::ShellMinThickness, "Shell 1");
        tracker.record(Equation::ShellMawp, "Shell 1");
        tracker.record(Equation::ShellMinThickness, "Shell 2");

        assert_eq!(tracker.usages().len(), 3);
        assert_eq!(
            tracker.unique_equations(),
            vec![Equation::ShellMinThickness, Equation::ShellMawp]
        );
    }

    #[test]
    fn test_by_category() {
        let mut tracker = EquationTracker::new();
        tracker.record(Equation::RemainingLife, "test");
        tracker.record(Equation::ShellMinThickness, "test");
        tracker.record(Equation::ShellMawp, "test");

        let by_cat = tracker.by_category();
        let categories: Vec<_> = by_cat.iter().map(|(cat, _)| *cat).collect();
        assert_eq!(
            categories,
            vec![
                EquationCategory::RequiredThickness,
                EquationCategory::AllowablePressure,
                EquationCategory::CorrosionLife,
            ]
        );
    }

    #[test]
    fn test_every_category_has_equations() {
        for category in Equation::all_categories() {
            assert!(!Equation::in_category(category).is_empty(), "{:?} is empty", category);
        }
    }

    #[test]
    fn test_appendix_markdown() {
        let mut tracker = EquationTracker::new();
        tracker.record_for_component(Equation::HeadMinThickness, "internal pressure", "East Head");
        tracker.record_for_component(Equation::HeadMinThickness, "internal pressure", "West Head");
        let md = tracker.generate_appendix_markdown();
        assert!(md.contains("Formed Head Minimum Thickness"));
        assert!(md.contains("Applied to: East Head, West Head"));

        let empty = EquationTracker::new().generate_appendix_markdown();
        assert!(empty.contains("No equations recorded"));
    }

    #[test]
    fn test_generate_equations_markdown() {
        let markdown = generate_equations_markdown();

        assert!(markdown.contains("# Vessel Inspection Equations Reference"));
        assert!(markdown.contains("Auto-generated from source code"));
        assert!(markdown.contains("## Required Thickness"));
        assert!(markdown.contains("## Fitness-for-Service"));
        assert!(markdown.contains("`t = P*R / (S*E - 0.6*P) + CA`"));
        assert!(markdown.contains("ASME VIII-1 UG-28(c)"));
        assert!(markdown.contains("equations/life.rs"));
        assert!(markdown.contains("**Total Equations:** 17"));
        assert!(markdown.contains("**Categories:** 7"));
    }

    #[test]
    fn test_equation_serializes_by_name() {
        let json = serde_json::to_string(&Equation::HalfLifeInterval).unwrap();
        assert_eq!(json, "\"HalfLifeInterval\"");
    }
}
