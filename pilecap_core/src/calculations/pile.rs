//! # Pile Bearing Capacity
//!
//! Axial capacity of a single bored or driven pile by the Decourt-Quaresma
//! method (see [`super::decourt_quaresma`]).
//!
//! ## Procedure
//!
//! 1. Check that the SPT soundings reach the pile tip.
//! 2. Average the clipped blow counts around the tip (N_tip) and along the
//!    shaft above the tip zone (N_mean).
//! 3. Resolve the tip and shaft soil classes, either from the input override
//!    or from the profile.
//! 4. `Qp = α K N_tip Ap`, `Qs = β Ac (N_mean/3 + 1) U L`.
//! 5. `Qadm = Qp/F1 + Qs/F2`, optionally with the excavated-pile tip limit.
//!
//! ## Example
//!
//! ```rust
//! use pilecap_core::calculations::decourt_quaresma::{DecourtQuaresmaConfig, InstallationMethod, DEFAULT_TABLE};
//! use pilecap_core::calculations::pile::{calculate, PileInput};
//! use pilecap_core::soil::{SoilClass, SoilProfile};
//!
//! let profile = SoilProfile::from_blow_counts(&[5.0; 15], 1.0, SoilClass::Sand).unwrap();
//! let pile = PileInput::new(12.0, 0.40, InstallationMethod::Driven);
//! let capacity = calculate(&pile, &profile, &DecourtQuaresmaConfig::default(), &DEFAULT_TABLE).unwrap();
//!
//! assert!((capacity.ultimate - (capacity.tip + capacity.shaft)).abs() < 1e-9);
//! ```

use std::f64::consts::PI;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::decourt_quaresma::{
    unit_shaft_friction, unit_tip_resistance, CoefficientTable, DecourtQuaresmaConfig, InstallationMethod,
};
use crate::errors::{CalcError, CalcResult};
use crate::materials::Concrete;
use crate::soil::{SoilClass, SoilProfile};

/// Pile definition.
///
/// ## JSON Example
///
/// ```json
/// {
///   "length": 15.0,
///   "diameter": 0.4,
///   "method": "Strauss",
///   "tip_soil": "ClayeySilt",
///   "tension_capacity": 0.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PileInput {
    /// Embedded length L (m)
    pub length: f64,

    /// Shaft diameter D (m)
    pub diameter: f64,

    /// Installation method
    pub method: InstallationMethod,

    /// Soil class at the tip; taken from the profile when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tip_soil: Option<SoilClass>,

    /// Soil class along the shaft; dominant profile class when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shaft_soil: Option<SoilClass>,

    /// Allowable uplift (tension) capacity T (N)
    #[serde(default)]
    pub tension_capacity: f64,

    /// Pile concrete
    #[serde(default)]
    pub concrete: Concrete,
}

impl PileInput {
    /// Pile with soils taken from the profile and no tension capacity.
    pub fn new(length: f64, diameter: f64, method: InstallationMethod) -> Self {
        PileInput {
            length,
            diameter,
            method,
            tip_soil: None,
            shaft_soil: None,
            tension_capacity: 0.0,
            concrete: Concrete::default(),
        }
    }

    /// Override both soil classes (builder pattern)
    pub fn with_soils(mut self, tip: SoilClass, shaft: SoilClass) -> Self {
        self.tip_soil = Some(tip);
        self.shaft_soil = Some(shaft);
        self
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        CalcError::require_positive("pile.length", self.length)?;
        CalcError::require_positive("pile.diameter", self.diameter)?;
        CalcError::require_non_negative("pile.tension_capacity", self.tension_capacity)?;
        self.concrete.validate()?;
        Ok(())
    }

    /// Tip area Ap = πD²/4 (m²)
    pub fn area(&self) -> f64 {
        PI * self.diameter * self.diameter / 4.0
    }

    /// Perimeter U = πD (m)
    pub fn perimeter(&self) -> f64 {
        PI * self.diameter
    }

    /// Shaft surface U·L (m²)
    pub fn shaft_area(&self) -> f64 {
        self.perimeter() * self.length
    }

    /// Volume (m³)
    pub fn volume(&self) -> f64 {
        self.area() * self.length
    }

    /// Self-weight (N)
    pub fn weight(&self) -> f64 {
        self.concrete.weight_of(self.volume())
    }

    /// Second moment of area πD⁴/64 (m⁴)
    pub fn inertia(&self) -> f64 {
        PI * self.diameter.powi(4) / 64.0
    }

    /// Axial stiffness EA/L (N/m)
    pub fn axial_stiffness(&self) -> f64 {
        self.concrete.elastic_modulus() * self.area() / self.length
    }
}

/// Capacity of a single pile (N).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PileCapacity {
    /// Ultimate tip resistance Qp
    pub tip: f64,

    /// Ultimate shaft resistance Qs
    pub shaft: f64,

    /// Ultimate capacity Qu = Qp + Qs
    pub ultimate: f64,

    /// Allowable tip share (Qp/F1, possibly limited)
    pub tip_allowable: f64,

    /// Allowable shaft share Qs/F2
    pub shaft_allowable: f64,

    /// Allowable compression capacity Qadm
    pub allowable: f64,

    /// Allowable tension capacity T, passed through from the input
    pub tension: f64,

    /// Mean clipped N around the tip
    pub n_tip: f64,

    /// Mean clipped N along the shaft
    pub n_mean: f64,

    /// Tip coefficient α used
    pub alpha: f64,

    /// Shaft coefficient β used
    pub beta: f64,

    /// Tip coefficient K used (Pa)
    pub k: f64,

    /// Soil class used for the tip
    pub tip_soil: SoilClass,

    /// Soil class used for the shaft
    pub shaft_soil: SoilClass,

    /// True when the excavated-pile tip limit reduced the tip share
    pub tip_limited: bool,
}

/// Calculate the capacity of a pile in a given soil profile.
///
/// # Errors
///
/// - `InvalidInput` for non-positive geometry, negative tension capacity or a
///   pile too short to have shaft samples
/// - `InsufficientProfileDepth` when the soundings stop above the tip
/// - `UnknownMethod` / `UnknownSoilType` when the table lacks an entry
pub fn calculate(
    input: &PileInput,
    profile: &SoilProfile,
    config: &DecourtQuaresmaConfig,
    table: &CoefficientTable,
) -> CalcResult<PileCapacity> {
    input.validate()?;
    config.validate()?;
    table.validate()?;
    profile.validate()?;
    profile.ensure_covers(input.length)?;

    let rules = &config.averaging;
    let n_tip = rules.tip_average(profile, input.length)?;
    let n_mean = rules.shaft_average(profile, input.length)?;

    let tip_soil = match input.tip_soil {
        Some(soil) => soil,
        None => profile.soil_at(input.length)?,
    };
    let shaft_soil = match input.shaft_soil {
        Some(soil) => soil,
        None => rules.dominant_shaft_soil(profile, input.length)?,
    };

    let alpha = table.alpha(input.method, tip_soil)?;
    let beta = table.beta(input.method, shaft_soil)?;
    let k = table.k(tip_soil)?;

    let tip = alpha * unit_tip_resistance(k, n_tip) * input.area();
    let shaft = beta * unit_shaft_friction(table.shaft_friction, n_mean) * input.shaft_area();

    let mut tip_allowable = tip / config.tip_safety_factor;
    let shaft_allowable = shaft / config.shaft_safety_factor;
    let mut tip_limited = false;

    if let Some(ratio) = config.excavated_tip_limit {
        let limit = ratio * shaft_allowable;
        if input.method.is_excavated() && tip_allowable > limit {
            debug!("Tip share {:.1} N limited to {:.1} N", tip_allowable, limit);
            tip_allowable = limit;
            tip_limited = true;
        }
    }

    debug!(
        "Pile L = {} m, D = {} m: N_tip = {:.3}, N_mean = {:.3}, α = {}, β = {}, K = {} Pa",
        input.length, input.diameter, n_tip, n_mean, alpha, beta, k
    );

    let capacity = PileCapacity {
        tip,
        shaft,
        ultimate: tip + shaft,
        tip_allowable,
        shaft_allowable,
        allowable: tip_allowable + shaft_allowable,
        tension: input.tension_capacity,
        n_tip,
        n_mean,
        alpha,
        beta,
        k,
        tip_soil,
        shaft_soil,
        tip_limited,
    };

    info!(
        "Pile capacity ({}): Qu = {:.1} N, Qadm = {:.1} N",
        input.method, capacity.ultimate, capacity.allowable
    );

    Ok(capacity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::decourt_quaresma::DEFAULT_TABLE;

    fn site_profile() -> SoilProfile {
        let spt1 = vec![2., 2., 2., 2., 2., 2., 4., 4., 6., 4., 5., 4., 5., 4., 6., 7., 8., 8., 8., 8., 11., 15.];
        let spt2 = vec![2., 2., 2., 2., 2., 2., 2., 3., 6., 5., 6., 6., 6., 6., 8., 8., 8., 8., 9., 10., 13., 16.];
        SoilProfile::from_soundings(&[spt1, spt2], 1.0, SoilClass::ClayeySilt).unwrap()
    }

    fn strauss_pile() -> PileInput {
        PileInput::new(15.0, 0.40, InstallationMethod::Strauss)
    }

    #[test]
    fn test_reference_pile() {
        let cap = calculate(&strauss_pile(), &site_profile(), &DecourtQuaresmaConfig::default(), &DEFAULT_TABLE).unwrap();
        assert!((cap.n_tip - 6.5).abs() < 1e-12);
        assert!((cap.n_mean - 51.0 / 13.0).abs() < 1e-12);
        assert_eq!(cap.tip_soil, SoilClass::ClayeySilt);
        assert_eq!(cap.shaft_soil, SoilClass::ClayeySilt);
        assert!((cap.tip - 98_017.69).abs() < 0.01);
        assert!((cap.shaft - 282_743.34).abs() < 0.01);
        assert!((cap.allowable - 241_999.3).abs() < 0.1);
        assert!(!cap.tip_limited);
    }

    #[test]
    fn test_capacity_identities() {
        let config = DecourtQuaresmaConfig::default();
        for method in InstallationMethod::ALL {
            let pile = PileInput::new(12.0, 0.5, method);
            let cap = calculate(&pile, &site_profile(), &config, &DEFAULT_TABLE).unwrap();
            assert_eq!(cap.ultimate, cap.tip + cap.shaft);
            let expected = cap.tip / config.tip_safety_factor + cap.shaft / config.shaft_safety_factor;
            assert!((cap.allowable - expected).abs() < 1e-9 * expected);
        }
    }

    #[test]
    fn test_exact_profile_coverage() {
        let profile = SoilProfile::from_blow_counts(&[8.0; 15], 1.0, SoilClass::Sand).unwrap();
        let config = DecourtQuaresmaConfig::default();
        assert!(calculate(&strauss_pile(), &profile, &config, &DEFAULT_TABLE).is_ok());

        let short = SoilProfile::from_blow_counts(&[8.0; 14], 1.0, SoilClass::Sand).unwrap();
        let result = calculate(&strauss_pile(), &short, &config, &DEFAULT_TABLE);
        assert!(matches!(
            result,
            Err(CalcError::InsufficientProfileDepth { profile_depth, pile_length })
                if profile_depth == 14.0 && pile_length == 15.0
        ));
    }

    #[test]
    fn test_invalid_geometry() {
        let config = DecourtQuaresmaConfig::default();
        let mut pile = strauss_pile();
        pile.diameter = 0.0;
        assert!(matches!(
            calculate(&pile, &site_profile(), &config, &DEFAULT_TABLE),
            Err(CalcError::InvalidInput { .. })
        ));

        let mut pile = strauss_pile();
        pile.tension_capacity = -10.0;
        assert!(calculate(&pile, &site_profile(), &config, &DEFAULT_TABLE).is_err());
    }

    #[test]
    fn test_missing_table_entry() {
        let mut table = CoefficientTable::default();
        table.alpha.remove(&InstallationMethod::Strauss);
        let result = calculate(&strauss_pile(), &site_profile(), &DecourtQuaresmaConfig::default(), &table);
        assert!(matches!(result, Err(CalcError::UnknownMethod { .. })));
    }

    #[test]
    fn test_soil_override() {
        let pile = strauss_pile().with_soils(SoilClass::Sand, SoilClass::Clay);
        let cap = calculate(&pile, &site_profile(), &DecourtQuaresmaConfig::default(), &DEFAULT_TABLE).unwrap();
        assert_eq!(cap.alpha, 0.50);
        assert_eq!(cap.beta, 0.85);
        assert_eq!(cap.k, 400_000.0);
    }

    #[test]
    fn test_excavated_tip_limit() {
        // Stiff tip layer under a soft shaft
        let mut blows = vec![3.0; 10];
        blows.extend([50.0; 3]);
        let profile = SoilProfile::from_blow_counts(&blows, 1.0, SoilClass::Sand).unwrap();
        let pile = PileInput::new(12.0, 0.6, InstallationMethod::Strauss);
        let config = DecourtQuaresmaConfig {
            excavated_tip_limit: Some(0.25),
            ..DecourtQuaresmaConfig::default()
        };

        let cap = calculate(&pile, &profile, &config, &DEFAULT_TABLE).unwrap();
        assert!(cap.tip_limited);
        assert!((cap.tip_allowable - 0.25 * cap.shaft_allowable).abs() < 1e-9);
        assert_eq!(cap.ultimate, cap.tip + cap.shaft);

        // Driven piles are not subject to the limit
        let driven = PileInput::new(12.0, 0.6, InstallationMethod::Driven);
        let cap = calculate(&driven, &profile, &config, &DEFAULT_TABLE).unwrap();
        assert!(!cap.tip_limited);
    }

    #[test]
    fn test_determinism() {
        let config = DecourtQuaresmaConfig::default();
        let a = calculate(&strauss_pile(), &site_profile(), &config, &DEFAULT_TABLE).unwrap();
        let b = calculate(&strauss_pile(), &site_profile(), &config, &DEFAULT_TABLE).unwrap();
        assert_eq!(a.allowable.to_bits(), b.allowable.to_bits());
    }

    #[test]
    fn test_geometry() {
        let pile = strauss_pile();
        assert!((pile.area() - 0.125_663_706).abs() < 1e-8);
        assert!((pile.perimeter() - 1.256_637_06).abs() < 1e-8);
        assert!((pile.volume() - 1.884_955_59).abs() < 1e-8);
        assert!((pile.weight() - 45_238.93).abs() < 0.01);
        assert!((pile.inertia() - 0.001_256_637).abs() < 1e-9);
        assert!(pile.axial_stiffness() > 0.0);
    }
}
