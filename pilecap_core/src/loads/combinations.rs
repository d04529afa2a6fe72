//! Factored Design Loads
//!
//! Turns characteristic tank actions into the design loads used by the cap
//! checks. The factors are supplied by the caller; nothing here is tied to a
//! particular design code.
//!
//! ```text
//! N  = γG · G + γQ · Q
//! H  = γW · H_wind
//! M  = γW · M_wind
//! ```
//!
//! The stabilizing vertical load for overturning is the *unfactored* empty
//! tank weight: a full tank would help against overturning, so it is left out.

use serde::{Deserialize, Serialize};

use super::load_types::LoadType;
use crate::errors::{CalcError, CalcResult};

/// Partial factors per load type.
///
/// # Example
/// ```
/// use pilecap_core::loads::{LoadFactors, LoadType};
///
/// let factors = LoadFactors::default();
/// assert_eq!(factors.factor(LoadType::Permanent), 1.35);
/// assert_eq!(LoadFactors::unity().factor(LoadType::Wind), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadFactors {
    /// γG on the tank self-weight
    pub permanent: f64,

    /// γQ on the water weight
    pub water: f64,

    /// γW on wind force and moment
    pub wind: f64,
}

impl Default for LoadFactors {
    fn default() -> Self {
        LoadFactors {
            permanent: 1.35,
            water: 1.50,
            wind: 1.50,
        }
    }
}

impl LoadFactors {
    /// All factors equal to one (characteristic loads)
    pub fn unity() -> Self {
        LoadFactors {
            permanent: 1.0,
            water: 1.0,
            wind: 1.0,
        }
    }

    /// Factor for a load type
    pub fn factor(&self, load_type: LoadType) -> f64 {
        match load_type {
            LoadType::Permanent => self.permanent,
            LoadType::Water => self.water,
            LoadType::Wind => self.wind,
        }
    }

    /// Validate that every factor is finite and non-negative
    pub fn validate(&self) -> CalcResult<()> {
        for load_type in LoadType::ALL {
            CalcError::require_non_negative(
                &format!("load_factors.{}", load_type.code()),
                self.factor(load_type),
            )?;
        }
        Ok(())
    }

    /// Human-readable equation for display (e.g. "1.35G + 1.50Q")
    pub fn gravity_equation(&self) -> String {
        format!("{:.2}G + {:.2}Q", self.permanent, self.water)
    }
}

/// Loads at the top face of the pile cap (N, N·m).
///
/// ## JSON Example
///
/// ```json
/// {
///   "vertical": 502049.25,
///   "horizontal": 43561.38,
///   "moment": 544569.31,
///   "stabilizing_vertical": 45000.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesignLoads {
    /// Downward vertical load N (N)
    pub vertical: f64,

    /// Horizontal force H (N)
    pub horizontal: f64,

    /// Overturning moment M at the cap top (N·m)
    pub moment: f64,

    /// Vertical load counted as stabilizing in the overturning check (N)
    pub stabilizing_vertical: f64,
}

impl DesignLoads {
    /// Combine characteristic actions with the given factors.
    pub fn combine(
        self_weight: f64,
        water_weight: f64,
        horizontal: f64,
        moment: f64,
        factors: &LoadFactors,
    ) -> CalcResult<Self> {
        factors.validate()?;
        let loads = DesignLoads {
            vertical: factors.permanent * self_weight + factors.water * water_weight,
            horizontal: factors.wind * horizontal,
            moment: factors.wind * moment,
            stabilizing_vertical: self_weight,
        };
        loads.validate()?;
        Ok(loads)
    }

    /// Validate that all components are finite and non-negative
    pub fn validate(&self) -> CalcResult<()> {
        CalcError::require_non_negative("loads.vertical", self.vertical)?;
        CalcError::require_non_negative("loads.horizontal", self.horizontal)?;
        CalcError::require_non_negative("loads.moment", self.moment)?;
        CalcError::require_non_negative("loads.stabilizing_vertical", self.stabilizing_vertical)?;
        Ok(())
    }

    /// Moment at the cap base, M + H·h, for a cap of height `h` (N·m)
    pub fn moment_at_depth(&self, h: f64) -> f64 {
        self.moment + self.horizontal * h
    }
}
