//! # Decourt-Quaresma Coefficients
//!
//! Empirical parameters of the Decourt-Quaresma method for pile bearing
//! capacity from SPT blow counts.
//!
//! ```text
//! Qp = α · K · N_tip · Ap                    tip resistance
//! Qs = β · Ac · (N_mean / 3 + 1) · U · L     shaft resistance
//! ```
//!
//! α and β depend on the installation method and the soil class; K depends on
//! the soil class only. The default values are held in a shared read-only
//! [`DEFAULT_TABLE`]; callers may pass any other [`CoefficientTable`].

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::soil::{SoilClass, SptAveraging};

/// Default shaft friction reference Ac (Pa)
pub const DEFAULT_SHAFT_FRICTION: f64 = 10_000.0;

/// Pile installation methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InstallationMethod {
    /// Driven (displacement) pile
    Driven,
    /// Excavated, general (Strauss type)
    Strauss,
    /// Excavated with bentonite slurry
    Bentonite,
    /// Continuous flight auger
    ContinuousFlightAuger,
    /// Root pile
    Root,
    /// Injected under high pressure
    HighPressureInjected,
}

impl InstallationMethod {
    /// All methods in table order
    pub const ALL: [InstallationMethod; 6] = [
        InstallationMethod::Driven,
        InstallationMethod::Strauss,
        InstallationMethod::Bentonite,
        InstallationMethod::ContinuousFlightAuger,
        InstallationMethod::Root,
        InstallationMethod::HighPressureInjected,
    ];

    /// Display name
    pub fn display_name(&self) -> &'static str {
        match self {
            InstallationMethod::Driven => "Driven",
            InstallationMethod::Strauss => "Excavated (Strauss)",
            InstallationMethod::Bentonite => "Excavated with bentonite",
            InstallationMethod::ContinuousFlightAuger => "Continuous flight auger",
            InstallationMethod::Root => "Root",
            InstallationMethod::HighPressureInjected => "High-pressure injected",
        }
    }

    /// Whether the bore is excavated (subject to the NBR 6122 tip limit)
    pub fn is_excavated(&self) -> bool {
        matches!(self, InstallationMethod::Strauss | InstallationMethod::Bentonite)
    }
}

impl fmt::Display for InstallationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for InstallationMethod {
    type Err = CalcError;

    /// Parse English or Spanish names, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace(['_', '-'], " ");
        match key.as_str() {
            "driven" | "clavada" => Ok(InstallationMethod::Driven),
            "strauss" | "excavated" | "excavada" => Ok(InstallationMethod::Strauss),
            "bentonite" | "excavada con bentonita" => Ok(InstallationMethod::Bentonite),
            "continuous flight auger" | "cfa" | "hélice continua" | "helice continua" => {
                Ok(InstallationMethod::ContinuousFlightAuger)
            }
            "root" | "raiz" | "raíz" => Ok(InstallationMethod::Root),
            "high pressure injected" | "inyectada bajo altas presiones" => {
                Ok(InstallationMethod::HighPressureInjected)
            }
            _ => Err(CalcError::unknown_method(s)),
        }
    }
}

// ============================================================================
// Coefficient Table
// ============================================================================

/// α, β and K values indexed by method and soil.
///
/// Entries may be omitted; looking up a missing one fails with
/// `UnknownMethod` or `UnknownSoilType`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoefficientTable {
    /// Tip coefficient α[method][soil]
    pub alpha: BTreeMap<InstallationMethod, BTreeMap<SoilClass, f64>>,

    /// Shaft coefficient β[method][soil]
    pub beta: BTreeMap<InstallationMethod, BTreeMap<SoilClass, f64>>,

    /// Tip coefficient K[soil] (Pa)
    pub k: BTreeMap<SoilClass, f64>,

    /// Shaft friction reference Ac (Pa)
    #[serde(default = "default_shaft_friction")]
    pub shaft_friction: f64,
}

fn default_shaft_friction() -> f64 {
    DEFAULT_SHAFT_FRICTION
}

/// Method rows of a table, in [`SoilClass::ALL`] column order
fn rows(values: [[f64; 4]; 6]) -> BTreeMap<InstallationMethod, BTreeMap<SoilClass, f64>> {
    InstallationMethod::ALL
        .iter()
        .zip(values.iter())
        .map(|(&method, row)| (method, SoilClass::ALL.iter().copied().zip(row.iter().copied()).collect()))
        .collect()
}

impl Default for CoefficientTable {
    fn default() -> Self {
        CoefficientTable {
            alpha: rows([
                [1.00, 1.00, 1.00, 1.00],
                [0.85, 0.60, 0.60, 0.50],
                [0.85, 0.60, 0.60, 0.50],
                [0.30, 0.30, 0.30, 0.30],
                [0.85, 0.60, 0.60, 0.50],
                [1.00, 1.00, 1.00, 1.00],
            ]),
            beta: rows([
                [1.00, 1.00, 1.00, 1.00],
                [0.85, 0.65, 0.65, 0.50],
                [0.90, 0.75, 0.75, 0.60],
                [1.00, 1.00, 1.00, 1.00],
                [1.50, 1.50, 1.50, 1.50],
                [3.00, 3.00, 3.00, 3.00],
            ]),
            k: SoilClass::ALL
                .iter()
                .copied()
                .zip([120_000.0, 200_000.0, 250_000.0, 400_000.0])
                .collect(),
            shaft_friction: DEFAULT_SHAFT_FRICTION,
        }
    }
}

/// Shared default table
pub static DEFAULT_TABLE: Lazy<CoefficientTable> = Lazy::new(CoefficientTable::default);

fn lookup(
    table: &BTreeMap<InstallationMethod, BTreeMap<SoilClass, f64>>,
    method: InstallationMethod,
    soil: SoilClass,
) -> CalcResult<f64> {
    table
        .get(&method)
        .ok_or_else(|| CalcError::unknown_method(method.display_name()))?
        .get(&soil)
        .copied()
        .ok_or_else(|| CalcError::unknown_soil(soil.display_name()))
}

impl CoefficientTable {
    /// Tip coefficient α
    pub fn alpha(&self, method: InstallationMethod, soil: SoilClass) -> CalcResult<f64> {
        lookup(&self.alpha, method, soil)
    }

    /// Shaft coefficient β
    pub fn beta(&self, method: InstallationMethod, soil: SoilClass) -> CalcResult<f64> {
        lookup(&self.beta, method, soil)
    }

    /// Tip coefficient K (Pa)
    pub fn k(&self, soil: SoilClass) -> CalcResult<f64> {
        self.k
            .get(&soil)
            .copied()
            .ok_or_else(|| CalcError::unknown_soil(soil.display_name()))
    }

    /// Validate that every value present is finite and non-negative.
    pub fn validate(&self) -> CalcResult<()> {
        for (name, table) in [("alpha", &self.alpha), ("beta", &self.beta)] {
            for (method, row) in table {
                for (soil, &value) in row {
                    CalcError::require_non_negative(&format!("coefficients.{}[{:?}][{:?}]", name, method, soil), value)?;
                }
            }
        }
        for (soil, &value) in &self.k {
            CalcError::require_non_negative(&format!("coefficients.k[{:?}]", soil), value)?;
        }
        CalcError::require_positive("coefficients.shaft_friction", self.shaft_friction)?;
        Ok(())
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Safety factors and SPT rules for the method.
///
/// ## JSON Example
///
/// ```json
/// {
///   "tip_safety_factor": 4.0,
///   "shaft_safety_factor": 1.3,
///   "averaging": { "n_min": 3.0, "n_max": 50.0 },
///   "excavated_tip_limit": 0.25
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecourtQuaresmaConfig {
    /// F1, safety factor on the tip resistance
    pub tip_safety_factor: f64,

    /// F2, safety factor on the shaft resistance
    pub shaft_safety_factor: f64,

    /// SPT clipping and averaging windows
    pub averaging: SptAveraging,

    /// NBR 6122 ratio r limiting `Qp/F1 ≤ r · Qs/F2` for excavated piles
    pub excavated_tip_limit: Option<f64>,
}

impl Default for DecourtQuaresmaConfig {
    fn default() -> Self {
        DecourtQuaresmaConfig {
            tip_safety_factor: 4.0,
            shaft_safety_factor: 1.3,
            averaging: SptAveraging::default(),
            excavated_tip_limit: None,
        }
    }
}

impl DecourtQuaresmaConfig {
    /// Validate configuration.
    pub fn validate(&self) -> CalcResult<()> {
        CalcError::require_positive("tip_safety_factor", self.tip_safety_factor)?;
        CalcError::require_positive("shaft_safety_factor", self.shaft_safety_factor)?;
        self.averaging.validate()?;
        if let Some(r) = self.excavated_tip_limit {
            CalcError::require_non_negative("excavated_tip_limit", r)?;
        }
        Ok(())
    }
}

/// Unit tip resistance K · N_tip (Pa)
pub fn unit_tip_resistance(k: f64, n_tip: f64) -> f64 {
    k * n_tip
}

/// Unit shaft friction Ac · (N_mean / 3 + 1) (Pa)
pub fn unit_shaft_friction(shaft_friction: f64, n_mean: f64) -> f64 {
    shaft_friction * (n_mean / 3.0 + 1.0)
}
