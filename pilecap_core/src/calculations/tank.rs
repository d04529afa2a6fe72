//! # Cup-Type Elevated Tank
//!
//! Gravity and wind actions of a cup-type water tank (a cylindrical shaft
//! carrying a cylindrical bowl) at the top of its foundation.
//!
//! ## Wind Model
//!
//! Shaft and bowl are treated as separate cylinders. Each receives the drag
//! coefficient of a finite cylinder for its own diameter/height ratio and the
//! wind pressure integrated over its own height band:
//!
//! ```text
//! F_shaft = CD_s · D_s · ∫[0, h_s] q(z) dz
//! F_bowl  = CD_b · D_b · ∫[h_s, h_s + h_b] q(z) dz
//! M_base  = CD_s · D_s · ∫ q z dz + CD_b · D_b · ∫ q z dz
//! ```
//!
//! Loads returned here are characteristic. Factoring is a separate step, see
//! [`TankLoads::factored`].
//!
//! ## Example
//!
//! ```rust
//! use pilecap_core::calculations::tank::{calculate, TankInput};
//! use pilecap_core::loads::{WindInput, WindLoad};
//!
//! let wind = WindLoad::new(WindInput::with_speed(50.0)).unwrap();
//! let tank = TankInput::standard(30.0).unwrap();
//! let loads = calculate(&tank, &wind).unwrap();
//!
//! println!("H = {:.2} kN, M = {:.2} kN·m", loads.horizontal_force / 1e3, loads.base_moment / 1e3);
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::loads::{DesignLoads, LoadFactors, WindLoad};

/// Capacities with a catalog geometry (m³)
pub const STANDARD_CAPACITIES: [f64; 4] = [15.0, 20.0, 30.0, 60.0];

/// Default self-weight per m³ of capacity (N/m³)
pub const DEFAULT_SELF_WEIGHT_FACTOR: f64 = 1_500.0;

/// Unit weight of water (N/m³)
pub const WATER_UNIT_WEIGHT: f64 = 9_806.65;

/// Diameter/height ratios of the cylinder drag table
const DRAG_RATIOS: [f64; 8] = [0.0, 0.025, 0.05, 0.1, 0.2, 1.0 / 3.0, 0.5, 1.0];

/// Drag coefficients of a finite cylinder for [`DRAG_RATIOS`]
const DRAG_COEFFICIENTS: [f64; 8] = [1.2, 0.98, 0.91, 0.82, 0.74, 0.72, 0.68, 0.74];

// ============================================================================
// Geometry
// ============================================================================

/// Tank dimensions (m, m³).
///
/// ## JSON Example
///
/// ```json
/// {
///   "capacity": 30.0,
///   "shaft_diameter": 0.8,
///   "shaft_height": 12.0,
///   "bowl_diameter": 2.3,
///   "bowl_height": 5.9
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TankGeometry {
    /// Water capacity (m³)
    pub capacity: f64,

    /// Outer diameter of the supporting shaft (m)
    pub shaft_diameter: f64,

    /// Height of the shaft from the cap top to the bowl (m)
    pub shaft_height: f64,

    /// Outer diameter of the bowl (m)
    pub bowl_diameter: f64,

    /// Height of the bowl (m)
    pub bowl_height: f64,
}

impl TankGeometry {
    /// Catalog geometry for a standard capacity.
    pub fn standard(capacity: f64) -> CalcResult<Self> {
        let (shaft_diameter, shaft_height, bowl_diameter, bowl_height) = match capacity {
            c if c == 15.0 => (0.80, 12.0, 2.0, 5.60),
            c if c == 20.0 => (0.80, 12.0, 2.0, 5.90),
            c if c == 30.0 => (0.80, 12.0, 2.3, 5.90),
            c if c == 60.0 => (1.50, 14.0, 3.2, 5.40),
            _ => {
                return Err(CalcError::invalid_input(
                    "tank.capacity",
                    capacity.to_string(),
                    format!("No standard geometry; catalog capacities are {:?} m³", STANDARD_CAPACITIES),
                ))
            }
        };
        Ok(TankGeometry {
            capacity,
            shaft_diameter,
            shaft_height,
            bowl_diameter,
            bowl_height,
        })
    }

    /// Validate dimensions.
    pub fn validate(&self) -> CalcResult<()> {
        CalcError::require_positive("tank.capacity", self.capacity)?;
        CalcError::require_positive("tank.shaft_diameter", self.shaft_diameter)?;
        CalcError::require_positive("tank.shaft_height", self.shaft_height)?;
        CalcError::require_positive("tank.bowl_diameter", self.bowl_diameter)?;
        CalcError::require_positive("tank.bowl_height", self.bowl_height)?;
        Ok(())
    }

    /// Overall height above the cap (m)
    pub fn total_height(&self) -> f64 {
        self.shaft_height + self.bowl_height
    }
}

/// Drag coefficient of a finite cylinder from its diameter/height ratio.
///
/// Linear interpolation in the tabulated values; ratios past the last entry
/// take the last coefficient.
pub fn drag_coefficient(ratio: f64) -> CalcResult<f64> {
    if !ratio.is_finite() || ratio < 0.0 {
        return Err(CalcError::invalid_input(
            "diameter/height",
            ratio.to_string(),
            "Ratio must be a non-negative number",
        ));
    }

    let last = DRAG_RATIOS.len() - 1;
    if ratio >= DRAG_RATIOS[last] {
        return Ok(DRAG_COEFFICIENTS[last]);
    }

    let i = DRAG_RATIOS
        .windows(2)
        .position(|w| ratio >= w[0] && ratio <= w[1])
        .unwrap_or(0);
    let (x0, x1) = (DRAG_RATIOS[i], DRAG_RATIOS[i + 1]);
    let (y0, y1) = (DRAG_COEFFICIENTS[i], DRAG_COEFFICIENTS[i + 1]);
    Ok(y0 + (y1 - y0) * (ratio - x0) / (x1 - x0))
}

// ============================================================================
// Input / Result
// ============================================================================

/// Tank calculation input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TankInput {
    /// Tank dimensions
    pub geometry: TankGeometry,

    /// Self-weight per m³ of capacity (N/m³), used when `self_weight` is absent
    #[serde(default = "default_self_weight_factor")]
    pub self_weight_factor: f64,

    /// Unit weight of the stored water (N/m³)
    #[serde(default = "default_water_unit_weight")]
    pub water_unit_weight: f64,

    /// Explicit empty-tank weight (N), overrides the factor estimate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_weight: Option<f64>,
}

fn default_self_weight_factor() -> f64 {
    DEFAULT_SELF_WEIGHT_FACTOR
}

fn default_water_unit_weight() -> f64 {
    WATER_UNIT_WEIGHT
}

impl TankInput {
    /// Input for a tank with custom geometry and default weights.
    pub fn new(geometry: TankGeometry) -> Self {
        TankInput {
            geometry,
            self_weight_factor: DEFAULT_SELF_WEIGHT_FACTOR,
            water_unit_weight: WATER_UNIT_WEIGHT,
            self_weight: None,
        }
    }

    /// Input for a catalog tank.
    pub fn standard(capacity: f64) -> CalcResult<Self> {
        Ok(TankInput::new(TankGeometry::standard(capacity)?))
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        self.geometry.validate()?;
        CalcError::require_non_negative("tank.self_weight_factor", self.self_weight_factor)?;
        CalcError::require_non_negative("tank.water_unit_weight", self.water_unit_weight)?;
        if let Some(w) = self.self_weight {
            CalcError::require_non_negative("tank.self_weight", w)?;
        }
        Ok(())
    }

    /// Empty-tank weight (N)
    pub fn self_weight(&self) -> f64 {
        self.self_weight
            .unwrap_or(self.geometry.capacity * self.self_weight_factor)
    }

    /// Weight of the water in a full tank (N)
    pub fn water_weight(&self) -> f64 {
        self.geometry.capacity * self.water_unit_weight
    }
}

/// Characteristic actions of the tank at the top of the cap.
///
/// ## JSON Example
///
/// ```json
/// {
///   "self_weight": 45000.0,
///   "water_weight": 294199.5,
///   "vertical_full": 339199.5,
///   "horizontal_force": 29040.92,
///   "base_moment": 363046.21,
///   "lever_arm": 12.501
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TankLoads {
    /// Empty-tank weight (N)
    pub self_weight: f64,

    /// Water weight, full tank (N)
    pub water_weight: f64,

    /// Vertical load with a full tank (N)
    pub vertical_full: f64,

    /// Drag coefficient of the shaft
    pub shaft_drag_coefficient: f64,

    /// Drag coefficient of the bowl
    pub bowl_drag_coefficient: f64,

    /// Wind force on the shaft (N)
    pub shaft_force: f64,

    /// Wind force on the bowl (N)
    pub bowl_force: f64,

    /// Total horizontal wind force (N)
    pub horizontal_force: f64,

    /// Wind moment at the tank base (N·m)
    pub base_moment: f64,

    /// Height of the wind resultant above the base (m)
    pub lever_arm: f64,
}

impl TankLoads {
    /// Vertical load for a full or empty tank (N)
    pub fn vertical_load(&self, full: bool) -> f64 {
        if full {
            self.vertical_full
        } else {
            self.self_weight
        }
    }

    /// Design loads with the given partial factors.
    pub fn factored(&self, factors: &LoadFactors) -> CalcResult<DesignLoads> {
        DesignLoads::combine(
            self.self_weight,
            self.water_weight,
            self.horizontal_force,
            self.base_moment,
            factors,
        )
    }

    /// Characteristic loads passed through unchanged.
    pub fn unfactored(&self) -> CalcResult<DesignLoads> {
        self.factored(&LoadFactors::unity())
    }
}

/// Calculate the characteristic tank loads.
///
/// # Errors
///
/// `InvalidInput` for non-positive dimensions or negative unit weights.
pub fn calculate(input: &TankInput, wind: &WindLoad) -> CalcResult<TankLoads> {
    input.validate()?;
    let g = &input.geometry;

    let shaft_cd = drag_coefficient(g.shaft_diameter / g.shaft_height)?;
    let bowl_cd = drag_coefficient(g.bowl_diameter / g.bowl_height)?;
    let top = g.total_height();

    let shaft_width = shaft_cd * g.shaft_diameter;
    let bowl_width = bowl_cd * g.bowl_diameter;

    let shaft_force = shaft_width * wind.force_per_width(0.0, g.shaft_height)?;
    let bowl_force = bowl_width * wind.force_per_width(g.shaft_height, top)?;
    let shaft_moment = shaft_width * wind.moment_per_width(0.0, g.shaft_height)?;
    let bowl_moment = bowl_width * wind.moment_per_width(g.shaft_height, top)?;

    let horizontal_force = shaft_force + bowl_force;
    let base_moment = shaft_moment + bowl_moment;
    let lever_arm = if horizontal_force > 0.0 {
        base_moment / horizontal_force
    } else {
        0.0
    };

    let self_weight = input.self_weight();
    let water_weight = input.water_weight();

    debug!(
        "Tank {} m³: CD shaft = {:.4}, CD bowl = {:.4}, H = {:.1} N, M = {:.1} N·m",
        g.capacity, shaft_cd, bowl_cd, horizontal_force, base_moment
    );

    Ok(TankLoads {
        self_weight,
        water_weight,
        vertical_full: self_weight + water_weight,
        shaft_drag_coefficient: shaft_cd,
        bowl_drag_coefficient: bowl_cd,
        shaft_force,
        bowl_force,
        horizontal_force,
        base_moment,
        lever_arm,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loads::WindInput;

    fn wind_50() -> WindLoad {
        WindLoad::new(WindInput::with_speed(50.0)).unwrap()
    }

    #[test]
    fn test_drag_table_nodes() {
        for (r, cd) in DRAG_RATIOS.iter().zip(DRAG_COEFFICIENTS.iter()) {
            assert!((drag_coefficient(*r).unwrap() - cd).abs() < 1e-12);
        }
    }

    #[test]
    fn test_drag_interpolation() {
        // 0.8 / 12 between 0.05 and 0.1
        assert!((drag_coefficient(0.8 / 12.0).unwrap() - 0.88).abs() < 1e-12);
        // 2.3 / 5.9 between 1/3 and 0.5
        assert!((drag_coefficient(2.3 / 5.9).unwrap() - 0.706_440_678).abs() < 1e-8);
    }

    #[test]
    fn test_drag_clamped() {
        assert_eq!(drag_coefficient(3.0).unwrap(), 0.74);
        assert!(drag_coefficient(-0.1).is_err());
    }

    #[test]
    fn test_tank_30_m3() {
        let loads = calculate(&TankInput::standard(30.0).unwrap(), &wind_50()).unwrap();
        assert_eq!(loads.self_weight, 45_000.0);
        assert!((loads.water_weight - 294_199.5).abs() < 1e-6);
        assert!((loads.vertical_full - 339_199.5).abs() < 1e-6);
        assert!((loads.horizontal_force - 29_040.92).abs() < 0.01);
        assert!((loads.base_moment - 363_046.21).abs() < 0.01);
        assert!((loads.lever_arm - 12.5012).abs() < 1e-4);
    }

    #[test]
    fn test_catalog_tanks_satisfy_lever_arm_identity() {
        for capacity in STANDARD_CAPACITIES {
            let loads = calculate(&TankInput::standard(capacity).unwrap(), &wind_50()).unwrap();
            assert!(loads.vertical_full >= 0.0);
            assert!(loads.horizontal_force >= 0.0);
            let m = loads.horizontal_force * loads.lever_arm;
            assert!((m - loads.base_moment).abs() < 1e-6 * loads.base_moment);
            assert!(loads.lever_arm > 0.0 && loads.lever_arm < TankGeometry::standard(capacity).unwrap().total_height());
        }
    }

    #[test]
    fn test_tank_60_m3() {
        let loads = calculate(&TankInput::standard(60.0).unwrap(), &wind_50()).unwrap();
        assert!((loads.horizontal_force - 47_053.32).abs() < 0.01);
    }

    #[test]
    fn test_unknown_capacity() {
        assert!(matches!(
            TankGeometry::standard(25.0),
            Err(CalcError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_explicit_self_weight() {
        let mut input = TankInput::standard(20.0).unwrap();
        input.self_weight = Some(52_000.0);
        let loads = calculate(&input, &wind_50()).unwrap();
        assert_eq!(loads.self_weight, 52_000.0);
        assert_eq!(loads.vertical_load(false), 52_000.0);
    }

    #[test]
    fn test_invalid_geometry() {
        let mut input = TankInput::standard(30.0).unwrap();
        input.geometry.bowl_height = 0.0;
        assert!(calculate(&input, &wind_50()).is_err());
    }

    #[test]
    fn test_factored_loads() {
        let loads = calculate(&TankInput::standard(30.0).unwrap(), &wind_50()).unwrap();
        let design = loads.factored(&LoadFactors::default()).unwrap();
        assert!((design.vertical - 502_049.25).abs() < 1e-6);
        assert!((design.horizontal - 1.5 * loads.horizontal_force).abs() < 1e-9);

        let plain = loads.unfactored().unwrap();
        assert_eq!(plain.vertical, loads.vertical_full);
        assert_eq!(plain.moment, loads.base_moment);
    }

    #[test]
    fn test_input_json_defaults() {
        let json = r#"{ "geometry": { "capacity": 30.0, "shaft_diameter": 0.8,
            "shaft_height": 12.0, "bowl_diameter": 2.3, "bowl_height": 5.9 } }"#;
        let input: TankInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.self_weight_factor, DEFAULT_SELF_WEIGHT_FACTOR);
        assert_eq!(input.self_weight, None);
    }
}
