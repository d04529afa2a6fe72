//! # Unit Types
//!
//! Lightweight f64 newtypes for the SI units used in foundation reports.
//!
//! ## Unit Discipline
//!
//! The calculation engine itself works on plain `f64` values expressed in SI
//! base units (m, N, Pa, N·m) and performs **no** unit conversion. Feeding mixed
//! units (e.g. kN loads with Pa coefficients) produces silently wrong results;
//! keeping inputs consistent is the caller's responsibility.
//!
//! These wrappers are used at the presentation boundary, where results are shown
//! in the customary multiples (kN, kN/m², kN·m, cm).
//!
//! ## Example
//!
//! ```rust
//! use pilecap_core::units::{Kilonewtons, Newtons};
//!
//! let reaction = Newtons(211_092.3);
//! let kn: Kilonewtons = reaction.into();
//! assert!((kn.0 - 211.0923).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Length Units
// ============================================================================

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Length in centimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Centimeters(pub f64);

impl From<Meters> for Centimeters {
    fn from(m: Meters) -> Self {
        Centimeters(m.0 * 100.0)
    }
}

// ============================================================================
// Force Units
// ============================================================================

/// Force in newtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Newtons(pub f64);

/// Force in kilonewtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilonewtons(pub f64);

impl From<Newtons> for Kilonewtons {
    fn from(n: Newtons) -> Self {
        Kilonewtons(n.0 / 1000.0)
    }
}

// ============================================================================
// Pressure Units
// ============================================================================

/// Pressure in pascals (N/m²)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pascals(pub f64);

/// Pressure in kilopascals (kN/m²)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilopascals(pub f64);

impl From<Pascals> for Kilopascals {
    fn from(pa: Pascals) -> Self {
        Kilopascals(pa.0 / 1000.0)
    }
}

// ============================================================================
// Moment Units
// ============================================================================

/// Moment in newton-meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewtonMeters(pub f64);

/// Moment in kilonewton-meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KilonewtonMeters(pub f64);

impl From<NewtonMeters> for KilonewtonMeters {
    fn from(nm: NewtonMeters) -> Self {
        KilonewtonMeters(nm.0 / 1000.0)
    }
}

// ============================================================================
// Raw Value Access
// ============================================================================

macro_rules! impl_value {
    ($type:ty) => {
        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }
        }
    };
}

impl_value!(Centimeters);
impl_value!(Kilonewtons);
impl_value!(Kilopascals);
impl_value!(KilonewtonMeters);

/// Convert a force in N to kN
pub fn kn(force_n: f64) -> f64 {
    Kilonewtons::from(Newtons(force_n)).value()
}

/// Convert a moment in N·m to kN·m
pub fn knm(moment_nm: f64) -> f64 {
    KilonewtonMeters::from(NewtonMeters(moment_nm)).value()
}

/// Convert a pressure in Pa to kN/m²
pub fn kpa(pressure_pa: f64) -> f64 {
    Kilopascals::from(Pascals(pressure_pa)).value()
}
