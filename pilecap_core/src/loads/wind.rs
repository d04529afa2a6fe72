//! NP 196 Wind Profile
//!
//! Velocity pressure on a structure as a power law of height above ground.
//!
//! ## Equations
//!
//! ```text
//! Vk   = S1 · S2 · S3 · V0            characteristic speed
//! V(z) = Vk · (z / h0)^γ              speed at height z
//! q(z) = ρ · V(z)² / 2                velocity pressure (Pa)
//! ```
//!
//! Two height floors apply:
//!
//! - `min_height` shapes the profile that is integrated over the structure.
//!   With the default of 0 m the integrals follow the pure power law.
//! - Point queries ([`WindLoad::pressure_at`], [`WindLoad::speed_at`]) are
//!   floored at `pressure_floor_height`, the reference height h0 unless set,
//!   so q(0) is the pressure at h0 and never zero.
//!
//! The force and moment integrals over a height band are evaluated in closed
//! form, so the tank loads need no numerical quadrature.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Wind parameters.
///
/// ## JSON Example
///
/// ```json
/// {
///   "basic_speed": 50.0,
///   "reference_height": 10.0,
///   "profile_exponent": 0.2857142857142857,
///   "s1": 1.0,
///   "s2": 1.0,
///   "s3": 1.0,
///   "air_density": 1.29,
///   "min_height": 0.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindInput {
    /// Basic wind speed V0 (m/s)
    pub basic_speed: f64,

    /// Reference height h0 (m)
    pub reference_height: f64,

    /// Profile exponent γ
    pub profile_exponent: f64,

    /// Topographic factor S1
    pub s1: f64,

    /// Combined roughness/size factor S2
    pub s2: f64,

    /// Statistical factor S3
    pub s3: f64,

    /// Air density ρ (kg/m³)
    pub air_density: f64,

    /// Height below which the integrated profile is held constant (m)
    pub min_height: f64,

    /// Floor height for point pressure queries (m); `None` uses h0
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressure_floor_height: Option<f64>,
}

impl Default for WindInput {
    fn default() -> Self {
        WindInput {
            basic_speed: 50.0,
            reference_height: 10.0,
            profile_exponent: 2.0 / 7.0,
            s1: 1.0,
            s2: 1.0,
            s3: 1.0,
            air_density: 1.29,
            min_height: 0.0,
            pressure_floor_height: None,
        }
    }
}

impl WindInput {
    /// Default parameters with the given basic speed.
    pub fn with_speed(basic_speed: f64) -> Self {
        WindInput {
            basic_speed,
            ..WindInput::default()
        }
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        CalcError::require_positive("wind.basic_speed", self.basic_speed)?;
        CalcError::require_positive("wind.reference_height", self.reference_height)?;
        CalcError::require_non_negative("wind.profile_exponent", self.profile_exponent)?;
        CalcError::require_positive("wind.s1", self.s1)?;
        CalcError::require_positive("wind.s2", self.s2)?;
        CalcError::require_positive("wind.s3", self.s3)?;
        CalcError::require_positive("wind.air_density", self.air_density)?;
        CalcError::require_non_negative("wind.min_height", self.min_height)?;
        if let Some(h) = self.pressure_floor_height {
            CalcError::require_non_negative("wind.pressure_floor_height", h)?;
        }
        Ok(())
    }
}

/// A validated wind profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindLoad {
    input: WindInput,
}

impl WindLoad {
    /// Validate the parameters and build the profile.
    pub fn new(input: WindInput) -> CalcResult<Self> {
        input.validate()?;
        let wind = WindLoad { input };
        debug!(
            "Wind profile: V0 = {} m/s, Vk = {:.3} m/s, q(h0) = {:.1} Pa",
            input.basic_speed,
            wind.characteristic_speed(),
            wind.reference_pressure()
        );
        Ok(wind)
    }

    /// Parameters this profile was built from
    pub fn input(&self) -> &WindInput {
        &self.input
    }

    /// Characteristic speed Vk = S1·S2·S3·V0 (m/s)
    pub fn characteristic_speed(&self) -> f64 {
        self.input.s1 * self.input.s2 * self.input.s3 * self.input.basic_speed
    }

    /// Velocity pressure at the reference height, ρ·Vk²/2 (Pa)
    pub fn reference_pressure(&self) -> f64 {
        let vk = self.characteristic_speed();
        self.input.air_density * vk * vk / 2.0
    }

    /// Height below which point queries return the floor pressure (m)
    pub fn point_floor_height(&self) -> f64 {
        self.input
            .pressure_floor_height
            .unwrap_or(self.input.reference_height)
            .max(self.input.min_height)
    }

    /// Wind speed at height `z` (m/s)
    pub fn speed_at(&self, z: f64) -> CalcResult<f64> {
        let z = self.effective_height(z)?.max(self.point_floor_height());
        Ok(self.speed_on_profile(z))
    }

    /// Velocity pressure at height `z` (Pa)
    pub fn pressure_at(&self, z: f64) -> CalcResult<f64> {
        let v = self.speed_at(z)?;
        Ok(self.input.air_density * v * v / 2.0)
    }

    /// ∫ q(z) dz over `[z0, z1]` (N/m, force per unit width)
    pub fn force_per_width(&self, z0: f64, z1: f64) -> CalcResult<f64> {
        self.check_band(z0, z1)?;
        Ok(self.integrate(z0, z1, 0))
    }

    /// ∫ q(z)·z dz over `[z0, z1]`, about ground level (N, moment per unit width)
    pub fn moment_per_width(&self, z0: f64, z1: f64) -> CalcResult<f64> {
        self.check_band(z0, z1)?;
        Ok(self.integrate(z0, z1, 1))
    }

    fn effective_height(&self, z: f64) -> CalcResult<f64> {
        if !z.is_finite() || z < 0.0 {
            return Err(CalcError::invalid_input(
                "height",
                z.to_string(),
                "Height above ground cannot be negative",
            ));
        }
        Ok(z.max(self.input.min_height))
    }

    /// Speed on the integrated profile, `z` already floored at `min_height`
    fn speed_on_profile(&self, z: f64) -> f64 {
        self.characteristic_speed() * (z / self.input.reference_height).powf(self.input.profile_exponent)
    }

    fn check_band(&self, z0: f64, z1: f64) -> CalcResult<()> {
        self.effective_height(z0)?;
        self.effective_height(z1)?;
        if z1 < z0 {
            return Err(CalcError::invalid_input(
                "height",
                format!("[{}, {}]", z0, z1),
                "Upper bound of the height band is below the lower bound",
            ));
        }
        Ok(())
    }

    /// ∫ q(z)·z^k dz, split at the floor height
    fn integrate(&self, z0: f64, z1: f64, k: i32) -> f64 {
        let z_min = self.input.min_height;
        let k1 = (k + 1) as f64;
        let mut total = 0.0;

        // Constant-pressure band under the floor
        if z0 < z_min {
            let top = z1.min(z_min);
            let q_floor = self.pressure_floor();
            total += q_floor * (top.powi(k + 1) - z0.powi(k + 1)) / k1;
        }

        // Power-law band
        let bottom = z0.max(z_min);
        if z1 > bottom {
            let e = 2.0 * self.input.profile_exponent;
            let scale = self.reference_pressure() * self.input.reference_height.powf(-e);
            let p = e + k1;
            total += scale * (z1.powf(p) - bottom.powf(p)) / p;
        }

        total
    }

    fn pressure_floor(&self) -> f64 {
        let ratio = self.input.min_height / self.input.reference_height;
        self.reference_pressure() * ratio.powf(2.0 * self.input.profile_exponent)
    }
}
