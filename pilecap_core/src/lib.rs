//! # pilecap_core - Pile Foundation Calculation Engine
//!
//! `pilecap_core` checks the pile-cap foundation of a cup-type elevated water
//! tank: wind on the tank, pile capacity from SPT soundings, distribution of
//! the loads over the piles and the overturning of the cap. All inputs and
//! outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **SI Units**: m, N, Pa and N·m throughout; conversion only for display
//!
//! ## Quick Start
//!
//! ```rust
//! use pilecap_core::project::FoundationProject;
//!
//! let project = FoundationProject::worked_example();
//! let report = project.analyze().unwrap();
//! println!("{}", report);
//! ```
//!
//! ## Modules
//!
//! - [`project`] - Project container, settings and the analysis pipeline
//! - [`calculations`] - Tank, pile and pile cap calculations
//! - [`loads`] - Wind profile and factored design loads
//! - [`soil`] - SPT profile and averaging rules
//! - [`materials`] - Reinforced concrete
//! - [`units`] - Unit wrappers for presentation
//! - [`errors`] - Structured error types
//! - [`file_io`] - Atomic project saves and versioned loads
//! - [`report`] - Plain-text report

pub mod calculations;
pub mod errors;
pub mod file_io;
pub mod loads;
pub mod materials;
pub mod project;
pub mod report;
pub mod soil;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_project, save_project};
pub use project::{DesignSettings, FoundationProject, FoundationReport, ProjectMetadata};
