//! # Foundation Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` / `*Loads` / `*Capacity` - Results (JSON-serializable)
//! - a pure function returning `CalcResult<...>`
//!
//! ## Available Calculations
//!
//! - [`tank`] - Gravity and wind actions of a cup-type elevated tank
//! - [`decourt_quaresma`] - Empirical coefficients for pile capacity from SPT
//! - [`pile`] - Axial capacity of a single pile
//! - [`pile_cap`] - Sizing and verification of a square pile cap

pub mod decourt_quaresma;
pub mod pile;
pub mod pile_cap;
pub mod tank;

// Re-export commonly used types
pub use decourt_quaresma::{CoefficientTable, DecourtQuaresmaConfig, InstallationMethod, DEFAULT_TABLE};
pub use pile::{PileCapacity, PileInput};
pub use pile_cap::{
    CapAlternative, CapTypology, MinimumDimensions, PileCapInput, PileCapResult, PileCapSettings, PileReaction,
    ReactionModel,
};
pub use tank::{TankGeometry, TankInput, TankLoads};
