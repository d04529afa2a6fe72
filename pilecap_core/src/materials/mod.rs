//! # Materials
//!
//! Material definitions for the foundation elements. Piles and caps are cast
//! in reinforced concrete; the soil itself is described by the SPT profile in
//! [`crate::soil`] rather than by a material record.
//!
//! ## Example
//!
//! ```rust
//! use pilecap_core::materials::Concrete;
//!
//! let concrete = Concrete::default();
//! println!("γ = {} N/m³, E = {:.1} GPa", concrete.unit_weight, concrete.elastic_modulus() / 1e9);
//! ```

pub mod concrete;

pub use concrete::Concrete;
