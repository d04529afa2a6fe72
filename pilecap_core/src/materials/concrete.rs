//! Reinforced Concrete
//!
//! Properties of the reinforced concrete used for piles and caps. Only the
//! values the foundation checks need are modeled: unit weight for self-weight
//! and the characteristic strength from which the elastic modulus follows.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Default unit weight of reinforced concrete (N/m³)
pub const DEFAULT_UNIT_WEIGHT: f64 = 24_000.0;

/// Default characteristic compressive strength fck (Pa)
pub const DEFAULT_FCK: f64 = 20.0e6;

/// Default partial safety factor for concrete
pub const DEFAULT_GAMMA_C: f64 = 1.5;

/// Reinforced concrete properties (SI units).
///
/// ## JSON Example
///
/// ```json
/// { "unit_weight": 24000.0, "fck": 20000000.0, "gamma_c": 1.5 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Concrete {
    /// Unit weight (N/m³)
    pub unit_weight: f64,

    /// Characteristic compressive strength fck (Pa)
    pub fck: f64,

    /// Partial safety factor γc
    pub gamma_c: f64,
}

impl Default for Concrete {
    fn default() -> Self {
        Concrete {
            unit_weight: DEFAULT_UNIT_WEIGHT,
            fck: DEFAULT_FCK,
            gamma_c: DEFAULT_GAMMA_C,
        }
    }
}

impl Concrete {
    /// Validate material parameters.
    pub fn validate(&self) -> CalcResult<()> {
        CalcError::require_positive("concrete.unit_weight", self.unit_weight)?;
        CalcError::require_positive("concrete.fck", self.fck)?;
        CalcError::require_positive("concrete.gamma_c", self.gamma_c)?;
        Ok(())
    }

    /// Design compressive strength fcd = fck / γc (Pa)
    pub fn design_strength(&self) -> f64 {
        self.fck / self.gamma_c
    }

    /// Secant modulus of elasticity (Pa)
    ///
    /// E = 1.2 · 22 · (fck[MPa] / 10 / γc)^0.3 GPa
    pub fn elastic_modulus(&self) -> f64 {
        let fck_mpa = self.fck * 1e-6;
        1.2 * 22.0 * (fck_mpa / 10.0 / self.gamma_c).powf(0.3) * 1e9
    }

    /// Weight of a given volume of concrete (N)
    pub fn weight_of(&self, volume_m3: f64) -> f64 {
        volume_m3 * self.unit_weight
    }
}
