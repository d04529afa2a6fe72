//! # Soil Profile
//!
//! SPT (Standard Penetration Test) soundings as an ordered list of samples,
//! plus the averaging policy the Decourt-Quaresma pile model reads from them.
//!
//! ## Layer Convention
//!
//! Each [`SptSample`] carries the depth of the *bottom* of the interval it
//! represents. Sample `i` therefore describes the layer
//! `(depth[i-1], depth[i]]`, the first one starting at the surface. With the
//! usual one blow count per meter, sample `i` sits at depth `i + 1` m.
//!
//! ## Averaging Rules ([`SptAveraging`])
//!
//! - Blow counts are clipped to `[n_min, n_max]` (3 and 50) before averaging.
//! - **Tip**: the tip sample is the layer containing the pile tip. `N_tip` is
//!   the mean over one sample above, the tip sample and one sample below. When
//!   the soundings end at the tip the window slides up and keeps its size.
//! - **Shaft**: every sample with `depth ≤ length − shaft_exclusion` (2 m),
//!   i.e. everything above the tip window.
//!
//! ## Example
//!
//! ```rust
//! use pilecap_core::soil::{SoilClass, SoilProfile, SptAveraging};
//!
//! let profile = SoilProfile::from_blow_counts(
//!     &[4.0, 5.0, 6.0, 8.0, 10.0, 12.0, 15.0, 18.0],
//!     1.0,
//!     SoilClass::ClayeySilt,
//! ).unwrap();
//!
//! let rules = SptAveraging::default();
//! let n_tip = rules.tip_average(&profile, 6.0).unwrap();
//! assert!((n_tip - 37.0 / 3.0).abs() < 1e-12); // (10 + 12 + 15) / 3
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Depth comparison tolerance (m)
const DEPTH_EPS: f64 = 1e-9;

/// Soil classes used by the Decourt-Quaresma coefficient tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SoilClass {
    /// Clay
    Clay,
    /// Clayey silt
    ClayeySilt,
    /// Sandy silt
    SandySilt,
    /// Sand
    Sand,
}

impl SoilClass {
    /// All soil classes, finest to coarsest
    pub const ALL: [SoilClass; 4] = [
        SoilClass::Clay,
        SoilClass::ClayeySilt,
        SoilClass::SandySilt,
        SoilClass::Sand,
    ];

    /// Display name
    pub fn display_name(&self) -> &'static str {
        match self {
            SoilClass::Clay => "Clay",
            SoilClass::ClayeySilt => "Clayey silt",
            SoilClass::SandySilt => "Sandy silt",
            SoilClass::Sand => "Sand",
        }
    }
}

impl fmt::Display for SoilClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for SoilClass {
    type Err = CalcError;

    /// Parse English or Spanish field-log names, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace(['_', '-'], " ");
        match key.as_str() {
            "clay" | "arcilla" => Ok(SoilClass::Clay),
            "clayey silt" | "clayeysilt" | "limo arcilloso" => Ok(SoilClass::ClayeySilt),
            "sandy silt" | "sandysilt" | "limo arenoso" => Ok(SoilClass::SandySilt),
            "sand" | "arena" => Ok(SoilClass::Sand),
            _ => Err(CalcError::unknown_soil(s)),
        }
    }
}

/// One SPT blow count with the soil classification of its layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SptSample {
    /// Depth of the bottom of the layer (m)
    pub depth: f64,

    /// SPT blow count N (raw, not clipped)
    pub n: f64,

    /// Soil class of the layer
    pub soil: SoilClass,
}

impl SptSample {
    pub fn new(depth: f64, n: f64, soil: SoilClass) -> Self {
        SptSample { depth, n, soil }
    }
}

/// Ordered SPT soundings from the surface downwards.
///
/// ## JSON Example
///
/// ```json
/// {
///   "samples": [
///     { "depth": 1.0, "n": 3.0, "soil": "ClayeySilt" },
///     { "depth": 2.0, "n": 5.0, "soil": "ClayeySilt" }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilProfile {
    /// Samples ordered by strictly increasing depth
    pub samples: Vec<SptSample>,
}

impl SoilProfile {
    /// Build a validated profile from samples.
    pub fn new(samples: Vec<SptSample>) -> CalcResult<Self> {
        let profile = SoilProfile { samples };
        profile.validate()?;
        Ok(profile)
    }

    /// Build a profile of uniform soil from blow counts taken every `spacing` meters.
    pub fn from_blow_counts(blow_counts: &[f64], spacing: f64, soil: SoilClass) -> CalcResult<Self> {
        CalcError::require_positive("spacing", spacing)?;
        let samples = blow_counts
            .iter()
            .enumerate()
            .map(|(i, &n)| SptSample::new((i + 1) as f64 * spacing, n, soil))
            .collect();
        SoilProfile::new(samples)
    }

    /// Average several soundings of the same site, sample by sample.
    ///
    /// All soundings must have the same number of samples.
    pub fn from_soundings(soundings: &[Vec<f64>], spacing: f64, soil: SoilClass) -> CalcResult<Self> {
        let first = soundings
            .first()
            .ok_or_else(|| CalcError::invalid_input("soundings", "[]", "At least one sounding is required"))?;

        if let Some(bad) = soundings.iter().find(|s| s.len() != first.len()) {
            return Err(CalcError::invalid_input(
                "soundings",
                format!("{} samples", bad.len()),
                format!("All soundings must have {} samples", first.len()),
            ));
        }

        let count = soundings.len() as f64;
        let averaged: Vec<f64> = (0..first.len())
            .map(|i| soundings.iter().map(|s| s[i]).sum::<f64>() / count)
            .collect();

        SoilProfile::from_blow_counts(&averaged, spacing, soil)
    }

    /// Check ordering and value invariants.
    pub fn validate(&self) -> CalcResult<()> {
        if self.samples.is_empty() {
            return Err(CalcError::invalid_input(
                "soil.samples",
                "[]",
                "Profile must contain at least one SPT sample",
            ));
        }

        let mut previous = 0.0;
        for (i, sample) in self.samples.iter().enumerate() {
            if !sample.depth.is_finite() || sample.depth <= previous {
                return Err(CalcError::invalid_input(
                    format!("soil.samples[{}].depth", i),
                    sample.depth.to_string(),
                    "Depths must be positive and strictly increasing",
                ));
            }
            if !sample.n.is_finite() || sample.n < 0.0 {
                return Err(CalcError::invalid_input(
                    format!("soil.samples[{}].n", i),
                    sample.n.to_string(),
                    "SPT blow count cannot be negative",
                ));
            }
            previous = sample.depth;
        }
        Ok(())
    }

    /// Deepest sounded depth (m)
    pub fn depth(&self) -> f64 {
        self.samples.last().map(|s| s.depth).unwrap_or(0.0)
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True if the profile has no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Fail with `InsufficientProfileDepth` unless the soundings reach `length`.
    pub fn ensure_covers(&self, length: f64) -> CalcResult<()> {
        if self.depth() + DEPTH_EPS < length {
            return Err(CalcError::insufficient_depth(self.depth(), length));
        }
        Ok(())
    }

    /// Index of the layer containing depth `z` (the first sample at or below it).
    pub fn layer_index_at(&self, z: f64) -> CalcResult<usize> {
        self.ensure_covers(z)?;
        self.samples
            .iter()
            .position(|s| s.depth + DEPTH_EPS >= z)
            .ok_or_else(|| CalcError::insufficient_depth(self.depth(), z))
    }

    /// Soil class of the layer containing depth `z`.
    pub fn soil_at(&self, z: f64) -> CalcResult<SoilClass> {
        Ok(self.samples[self.layer_index_at(z)?].soil)
    }
}

/// Largest tip window on either side of the tip sample
pub const MAX_TIP_WINDOW: usize = 10;

/// Averaging and clipping rules for SPT values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SptAveraging {
    /// Lower clip bound for N
    pub n_min: f64,

    /// Upper clip bound for N
    pub n_max: f64,

    /// Samples above the tip sample included in N_tip
    pub tip_window_above: usize,

    /// Samples below the tip sample included in N_tip
    pub tip_window_below: usize,

    /// Length above the tip excluded from the shaft average (m)
    pub shaft_exclusion: f64,
}

impl Default for SptAveraging {
    fn default() -> Self {
        SptAveraging {
            n_min: 3.0,
            n_max: 50.0,
            tip_window_above: 1,
            tip_window_below: 1,
            shaft_exclusion: 2.0,
        }
    }
}

impl SptAveraging {
    /// Validate the rule set.
    pub fn validate(&self) -> CalcResult<()> {
        CalcError::require_non_negative("averaging.n_min", self.n_min)?;
        if !self.n_max.is_finite() || self.n_max < self.n_min {
            return Err(CalcError::invalid_input(
                "averaging.n_max",
                self.n_max.to_string(),
                "Upper clip bound must not be below the lower bound",
            ));
        }
        CalcError::require_non_negative("averaging.shaft_exclusion", self.shaft_exclusion)?;
        for (field, window) in [
            ("averaging.tip_window_above", self.tip_window_above),
            ("averaging.tip_window_below", self.tip_window_below),
        ] {
            if window > MAX_TIP_WINDOW {
                return Err(CalcError::invalid_input(
                    field,
                    window.to_string(),
                    format!("Tip window cannot exceed {} samples", MAX_TIP_WINDOW),
                ));
            }
        }
        Ok(())
    }

    /// Clip a blow count to the configured range.
    pub fn clip(&self, n: f64) -> f64 {
        n.clamp(self.n_min, self.n_max)
    }

    /// Sample index range averaged for the tip of a pile of `length`.
    pub fn tip_window(&self, profile: &SoilProfile, length: f64) -> CalcResult<std::ops::Range<usize>> {
        let tip = profile.layer_index_at(length)?;
        let size = self
            .tip_window_above
            .saturating_add(1)
            .saturating_add(self.tip_window_below);
        let start = tip.saturating_sub(self.tip_window_above);
        let end = start.saturating_add(size).min(profile.len());
        let start = end.saturating_sub(size);
        Ok(start..end)
    }

    /// Mean clipped N around the pile tip.
    pub fn tip_average(&self, profile: &SoilProfile, length: f64) -> CalcResult<f64> {
        let window = self.tip_window(profile, length)?;
        let count = window.len() as f64;
        let sum: f64 = profile.samples[window].iter().map(|s| self.clip(s.n)).sum();
        Ok(sum / count)
    }

    /// Samples counted along the shaft of a pile of `length`.
    pub fn shaft_samples<'a>(&self, profile: &'a SoilProfile, length: f64) -> CalcResult<&'a [SptSample]> {
        profile.ensure_covers(length)?;
        let limit = length - self.shaft_exclusion;
        let count = profile
            .samples
            .iter()
            .take_while(|s| s.depth <= limit + DEPTH_EPS)
            .count();
        if count == 0 {
            return Err(CalcError::invalid_input(
                "length",
                length.to_string(),
                format!(
                    "No SPT sample lies above the tip exclusion zone ({} m); pile too short for the shaft average",
                    self.shaft_exclusion
                ),
            ));
        }
        Ok(&profile.samples[..count])
    }

    /// Mean clipped N along the shaft.
    pub fn shaft_average(&self, profile: &SoilProfile, length: f64) -> CalcResult<f64> {
        let samples = self.shaft_samples(profile, length)?;
        let sum: f64 = samples.iter().map(|s| self.clip(s.n)).sum();
        Ok(sum / samples.len() as f64)
    }

    /// Most frequent soil class along the shaft; ties go to the class met deepest.
    pub fn dominant_shaft_soil(&self, profile: &SoilProfile, length: f64) -> CalcResult<SoilClass> {
        let samples = self.shaft_samples(profile, length)?;
        let mut counts: Vec<(SoilClass, usize, usize)> = Vec::new();
        for (i, sample) in samples.iter().enumerate() {
            match counts.iter_mut().find(|(soil, _, _)| *soil == sample.soil) {
                Some(entry) => {
                    entry.1 += 1;
                    entry.2 = i;
                }
                None => counts.push((sample.soil, 1, i)),
            }
        }
        counts
            .into_iter()
            .max_by_key(|&(_, count, last)| (count, last))
            .map(|(soil, _, _)| soil)
            .ok_or_else(|| CalcError::invalid_input("soil.samples", "[]", "Empty shaft"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mean of the two soundings of the reference site
    fn site_profile() -> SoilProfile {
        let spt1 = vec![2., 2., 2., 2., 2., 2., 4., 4., 6., 4., 5., 4., 5., 4., 6., 7., 8., 8., 8., 8., 11., 15.];
        let spt2 = vec![2., 2., 2., 2., 2., 2., 2., 3., 6., 5., 6., 6., 6., 6., 8., 8., 8., 8., 9., 10., 13., 16.];
        SoilProfile::from_soundings(&[spt1, spt2], 1.0, SoilClass::ClayeySilt).unwrap()
    }

    #[test]
    fn test_soundings_are_averaged() {
        let profile = site_profile();
        assert_eq!(profile.len(), 22);
        assert_eq!(profile.depth(), 22.0);
        assert_eq!(profile.samples[6].n, 3.0);
        assert_eq!(profile.samples[21].n, 15.5);
    }

    #[test]
    fn test_mismatched_soundings_rejected() {
        let result = SoilProfile::from_soundings(&[vec![1.0, 2.0], vec![1.0]], 1.0, SoilClass::Clay);
        assert!(matches!(result, Err(CalcError::InvalidInput { .. })));
    }

    #[test]
    fn test_clip_range() {
        let rules = SptAveraging::default();
        assert_eq!(rules.clip(0.0), 3.0);
        assert_eq!(rules.clip(2.0), 3.0);
        assert_eq!(rules.clip(17.0), 17.0);
        assert_eq!(rules.clip(65.0), 50.0);
    }

    #[test]
    fn test_tip_average_reference_site() {
        // Samples at 14, 15 and 16 m: (5 + 7 + 7.5) / 3
        let n_tip = SptAveraging::default().tip_average(&site_profile(), 15.0).unwrap();
        assert!((n_tip - 6.5).abs() < 1e-12);
    }

    #[test]
    fn test_shaft_average_reference_site() {
        // First 13 samples (down to 13 m), clipped: 51 / 13
        let n_shaft = SptAveraging::default().shaft_average(&site_profile(), 15.0).unwrap();
        assert!((n_shaft - 51.0 / 13.0).abs() < 1e-12);
    }

    #[test]
    fn test_tip_window_slides_up_at_profile_end() {
        let profile = SoilProfile::from_blow_counts(&[5.0; 10], 1.0, SoilClass::Sand).unwrap();
        let window = SptAveraging::default().tip_window(&profile, 10.0).unwrap();
        assert_eq!(window, 7..10);
    }

    #[test]
    fn test_tip_window_near_surface() {
        let profile = SoilProfile::from_blow_counts(&[5.0; 10], 1.0, SoilClass::Sand).unwrap();
        let window = SptAveraging::default().tip_window(&profile, 1.0).unwrap();
        assert_eq!(window, 0..3);
    }

    #[test]
    fn test_oversized_tip_window() {
        let rules = SptAveraging {
            tip_window_above: usize::MAX,
            tip_window_below: usize::MAX,
            ..SptAveraging::default()
        };
        assert!(matches!(rules.validate(), Err(CalcError::InvalidInput { .. })));

        // Clamped to the profile without overflowing
        let profile = SoilProfile::from_blow_counts(&[5.0; 10], 1.0, SoilClass::Sand).unwrap();
        assert_eq!(rules.tip_window(&profile, 5.0).unwrap(), 0..10);

        let widest = SptAveraging {
            tip_window_above: MAX_TIP_WINDOW,
            tip_window_below: MAX_TIP_WINDOW,
            ..SptAveraging::default()
        };
        assert!(widest.validate().is_ok());
    }

    #[test]
    fn test_exact_coverage_accepted() {
        let profile = SoilProfile::from_blow_counts(&[5.0; 15], 1.0, SoilClass::Sand).unwrap();
        assert!(profile.ensure_covers(15.0).is_ok());
        assert!(matches!(
            profile.ensure_covers(16.0),
            Err(CalcError::InsufficientProfileDepth { .. })
        ));
    }

    #[test]
    fn test_short_pile_has_no_shaft() {
        let profile = SoilProfile::from_blow_counts(&[5.0; 10], 1.0, SoilClass::Sand).unwrap();
        assert!(SptAveraging::default().shaft_average(&profile, 2.5).is_err());
        assert!(SptAveraging::default().shaft_average(&profile, 3.0).is_ok());
    }

    #[test]
    fn test_validation_rejects_unordered_depths() {
        let samples = vec![
            SptSample::new(1.0, 4.0, SoilClass::Clay),
            SptSample::new(1.0, 5.0, SoilClass::Clay),
        ];
        assert!(SoilProfile::new(samples).is_err());
    }

    #[test]
    fn test_validation_rejects_negative_n() {
        let samples = vec![SptSample::new(1.0, -1.0, SoilClass::Clay)];
        assert!(SoilProfile::new(samples).is_err());
    }

    #[test]
    fn test_dominant_shaft_soil() {
        let samples = vec![
            SptSample::new(1.0, 4.0, SoilClass::Clay),
            SptSample::new(2.0, 4.0, SoilClass::Sand),
            SptSample::new(3.0, 4.0, SoilClass::Sand),
            SptSample::new(4.0, 4.0, SoilClass::Clay),
            SptSample::new(5.0, 9.0, SoilClass::SandySilt),
            SptSample::new(6.0, 9.0, SoilClass::SandySilt),
            SptSample::new(7.0, 9.0, SoilClass::SandySilt),
        ];
        let profile = SoilProfile::new(samples).unwrap();
        // Shaft of a 6 m pile: 1..4 m, Clay and Sand tie, Clay is deeper
        let soil = SptAveraging::default().dominant_shaft_soil(&profile, 6.0).unwrap();
        assert_eq!(soil, SoilClass::Clay);
        assert_eq!(profile.soil_at(6.0).unwrap(), SoilClass::SandySilt);
    }

    #[test]
    fn test_soil_class_parsing() {
        assert_eq!("Limo arcilloso".parse::<SoilClass>().unwrap(), SoilClass::ClayeySilt);
        assert_eq!("sandy-silt".parse::<SoilClass>().unwrap(), SoilClass::SandySilt);
        assert_eq!("ARENA".parse::<SoilClass>().unwrap(), SoilClass::Sand);
        assert!(matches!(
            "Peat".parse::<SoilClass>(),
            Err(CalcError::UnknownSoilType { .. })
        ));
    }

    #[test]
    fn test_profile_serialization() {
        let profile = site_profile();
        let json = serde_json::to_string(&profile).unwrap();
        assert!(json.contains("ClayeySilt"));
        let roundtrip: SoilProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(profile, roundtrip);
    }
}
