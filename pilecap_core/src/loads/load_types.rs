//! Load types acting on an elevated tank foundation
//!
//! The tank carries three independent actions. Each has its own partial
//! factor in [`super::LoadFactors`].

use serde::{Deserialize, Serialize};

/// Actions considered in the foundation checks
///
/// # Example
/// ```
/// use pilecap_core::loads::LoadType;
///
/// assert_eq!(LoadType::Water.code(), "Q");
/// assert!(LoadType::Water.is_gravity());
/// assert!(!LoadType::Wind.is_gravity());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoadType {
    /// G - Self-weight of the tank structure
    Permanent,
    /// Q - Weight of the stored water
    Water,
    /// W - Wind on shaft and bowl
    Wind,
}

impl LoadType {
    /// All load types in standard order
    pub const ALL: [LoadType; 3] = [LoadType::Permanent, LoadType::Water, LoadType::Wind];

    /// Standard abbreviation code (G, Q, W)
    pub fn code(&self) -> &'static str {
        match self {
            LoadType::Permanent => "G",
            LoadType::Water => "Q",
            LoadType::Wind => "W",
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            LoadType::Permanent => "Tank self-weight",
            LoadType::Water => "Stored water",
            LoadType::Wind => "Wind load",
        }
    }

    /// Whether the action is a vertical (gravity) load
    pub fn is_gravity(&self) -> bool {
        !matches!(self, LoadType::Wind)
    }
}

impl std::fmt::Display for LoadType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
