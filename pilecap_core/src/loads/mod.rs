//! Loads on the tank foundation
//!
//! # Overview
//!
//! - [`WindLoad`] - NP 196 power-law wind profile with closed-form integrals
//! - [`LoadType`] - Actions on the tank (self-weight, water, wind)
//! - [`LoadFactors`] - Caller-supplied partial factors per action
//! - [`DesignLoads`] - Factored loads at the top of the pile cap
//!
//! # Example
//!
//! ```
//! use pilecap_core::loads::{WindInput, WindLoad};
//!
//! let wind = WindLoad::new(WindInput::with_speed(50.0)).unwrap();
//! let q10 = wind.pressure_at(10.0).unwrap();
//! assert!((q10 - 1612.5).abs() < 1e-9);
//! ```

pub mod combinations;
pub mod load_types;
pub mod wind;

pub use combinations::{DesignLoads, LoadFactors};
pub use load_types::LoadType;
pub use wind::{WindInput, WindLoad};
