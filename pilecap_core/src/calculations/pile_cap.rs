//! # Square Pile Cap
//!
//! Sizing and verification of a square reinforced-concrete cap on 4, 5 or 9
//! piles under a tank shaft.
//!
//! ## Geometry
//!
//! ```text
//!   Square4        Square5        Square9
//!  ---------      ---------      ---------
//!  | O   O |      | O   O |      | O O O |
//!  |       |      |   O   |      | O O O |
//!  | O   O |      | O   O |      | O O O |
//!  ---------      ---------      ---------
//! ```
//!
//! `v` is the clear distance from the outer pile face to the cap edge, so the
//! distance between the axes of the outer piles is `b = B − 2v − D`. The cap
//! origin is its centre; wind acts along +x.
//!
//! ## Checks
//!
//! - Minimum width: `B_min = 2v + D + max(packing · s_min, 2(Hh + M) / (n_row (P + T)))`
//! - Minimum height (rigid cap): `h_min = (B − column) / 3`
//! - Pile capacity: maximum pile reaction ≤ allowable pile capacity
//! - Overturning about the leeward edge: `M_r / M_o ≥ FS`
//!
//! Punching shear and flexure of the cap slab are **not** checked here.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::pile::{PileCapacity, PileInput};
use crate::errors::{CalcError, CalcResult};
use crate::loads::DesignLoads;
use crate::materials::Concrete;

/// Reminder attached to every cap result
pub const SLAB_CHECK_NOTE: &str = "Punching shear and flexure of the cap slab must be checked separately.";

/// Default clear distance from pile face to cap edge (m)
pub const DEFAULT_EDGE_DISTANCE: f64 = 0.30;

/// Default unit weight of backfill over the cap (N/m³)
pub const DEFAULT_BACKFILL_UNIT_WEIGHT: f64 = 18_000.0;

// ============================================================================
// Typology
// ============================================================================

/// Pile arrangement under a square cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CapTypology {
    /// Four corner piles
    Square4,
    /// Four corner piles plus one at the centre
    Square5,
    /// Three-by-three grid
    Square9,
}

impl CapTypology {
    /// All typologies
    pub const ALL: [CapTypology; 3] = [CapTypology::Square4, CapTypology::Square5, CapTypology::Square9];

    /// Typology for a pile count.
    pub fn from_pile_count(count: usize) -> CalcResult<Self> {
        match count {
            4 => Ok(CapTypology::Square4),
            5 => Ok(CapTypology::Square5),
            9 => Ok(CapTypology::Square9),
            _ => Err(CalcError::invalid_input(
                "cap.pile_count",
                count.to_string(),
                "Supported pile counts are 4, 5 and 9",
            )),
        }
    }

    /// Number of piles
    pub fn pile_count(&self) -> usize {
        match self {
            CapTypology::Square4 => 4,
            CapTypology::Square5 => 5,
            CapTypology::Square9 => 9,
        }
    }

    /// Piles in the outer row resisting the overturning couple
    pub fn row_count(&self) -> usize {
        match self {
            CapTypology::Square4 | CapTypology::Square5 => 2,
            CapTypology::Square9 => 3,
        }
    }

    /// Ratio between the outer-pile axis distance and the minimum pile spacing
    pub fn packing(&self) -> f64 {
        match self {
            CapTypology::Square4 => 1.0,
            CapTypology::Square5 => std::f64::consts::SQRT_2,
            CapTypology::Square9 => 2.0,
        }
    }

    /// Pile coordinates (x, y) for an outer-pile axis distance `b` (m)
    pub fn coordinates(&self, b: f64) -> Vec<(f64, f64)> {
        let half = b / 2.0;
        let corners = [(-half, -half), (half, -half), (-half, half), (half, half)];
        match self {
            CapTypology::Square4 => corners.to_vec(),
            CapTypology::Square5 => {
                let mut coords = corners.to_vec();
                coords.push((0.0, 0.0));
                coords
            }
            CapTypology::Square9 => {
                let axis = [-half, 0.0, half];
                axis.iter()
                    .flat_map(|&y| axis.iter().map(move |&x| (x, y)))
                    .collect()
            }
        }
    }

    /// Display name
    pub fn display_name(&self) -> &'static str {
        match self {
            CapTypology::Square4 => "4 piles",
            CapTypology::Square5 => "5 piles",
            CapTypology::Square9 => "9 piles",
        }
    }
}

impl std::fmt::Display for CapTypology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// How the cap loads are shared among the piles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReactionModel {
    /// Rigid cap statics: `P_i = V/n + M_t x_i / Σx²`
    #[default]
    RigidCap,
    /// Hand formula by outer-row factor:
    /// `(V/2 + M_t/b) / 2` for 4 piles, `(2/3 (V/2 + M_t/b)) / n_row` otherwise,
    /// floored at the mean reaction `V/n`
    RowFactor,
}

// ============================================================================
// Input / Settings
// ============================================================================

/// Pile cap definition.
///
/// ## JSON Example
///
/// ```json
/// {
///   "typology": "Square5",
///   "width": 3.5,
///   "height": 1.0,
///   "edge_distance": 0.3,
///   "column_width": 0.8
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PileCapInput {
    /// Pile arrangement
    pub typology: CapTypology,

    /// Adopted side B of the square cap (m)
    pub width: f64,

    /// Adopted height h (m)
    pub height: f64,

    /// Clear distance v from outer pile face to cap edge (m)
    #[serde(default = "default_edge_distance")]
    pub edge_distance: f64,

    /// Width of the column (tank shaft) bearing on the cap (m)
    pub column_width: f64,

    /// Depth of backfill over the cap (m)
    #[serde(default)]
    pub backfill_depth: f64,

    /// Unit weight of the backfill (N/m³)
    #[serde(default = "default_backfill_unit_weight")]
    pub backfill_unit_weight: f64,

    /// Cap concrete
    #[serde(default)]
    pub concrete: Concrete,
}

fn default_edge_distance() -> f64 {
    DEFAULT_EDGE_DISTANCE
}

fn default_backfill_unit_weight() -> f64 {
    DEFAULT_BACKFILL_UNIT_WEIGHT
}

impl PileCapInput {
    /// Cap with default edge distance, no backfill and default concrete.
    pub fn new(typology: CapTypology, width: f64, height: f64, column_width: f64) -> Self {
        PileCapInput {
            typology,
            width,
            height,
            edge_distance: DEFAULT_EDGE_DISTANCE,
            column_width,
            backfill_depth: 0.0,
            backfill_unit_weight: DEFAULT_BACKFILL_UNIT_WEIGHT,
            concrete: Concrete::default(),
        }
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        CalcError::require_positive("cap.width", self.width)?;
        CalcError::require_positive("cap.height", self.height)?;
        CalcError::require_non_negative("cap.edge_distance", self.edge_distance)?;
        CalcError::require_non_negative("cap.column_width", self.column_width)?;
        CalcError::require_non_negative("cap.backfill_depth", self.backfill_depth)?;
        CalcError::require_non_negative("cap.backfill_unit_weight", self.backfill_unit_weight)?;
        self.concrete.validate()?;
        Ok(())
    }

    /// Distance b between the axes of the outer piles (m)
    pub fn pile_axis_distance(&self, pile_diameter: f64) -> f64 {
        self.width - 2.0 * self.edge_distance - pile_diameter
    }

    /// Plan area B² (m²)
    pub fn plan_area(&self) -> f64 {
        self.width * self.width
    }

    /// Self-weight of the cap (N)
    pub fn weight(&self) -> f64 {
        self.concrete.weight_of(self.plan_area() * self.height)
    }

    /// Weight of the backfill resting on the cap (N)
    pub fn backfill_weight(&self) -> f64 {
        self.plan_area() * self.backfill_depth * self.backfill_unit_weight
    }
}

/// Code-dependent factors for the cap checks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PileCapSettings {
    /// Minimum pile spacing as a multiple of the diameter
    pub spacing_factor: f64,

    /// Required safety factor against overturning
    pub overturning_safety_factor: f64,

    /// Pile reaction model
    pub reaction_model: ReactionModel,
}

impl Default for PileCapSettings {
    fn default() -> Self {
        PileCapSettings {
            spacing_factor: 2.5,
            overturning_safety_factor: 1.5,
            reaction_model: ReactionModel::default(),
        }
    }
}

impl PileCapSettings {
    /// Validate settings.
    pub fn validate(&self) -> CalcResult<()> {
        CalcError::require_positive("cap_settings.spacing_factor", self.spacing_factor)?;
        CalcError::require_positive("cap_settings.overturning_safety_factor", self.overturning_safety_factor)?;
        Ok(())
    }
}

// ============================================================================
// Results
// ============================================================================

/// Minimum cap dimensions for a load case (m).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinimumDimensions {
    /// Minimum side B_min
    pub width: f64,

    /// Minimum height h_min
    pub height: f64,

    /// Minimum pile spacing s_min
    pub pile_spacing: f64,

    /// Outer-pile axis distance required by spacing
    pub spacing_axis_distance: f64,

    /// Outer-pile axis distance required by equilibrium
    pub equilibrium_axis_distance: f64,
}

impl MinimumDimensions {
    /// Minimum width rounded up to a construction step (m)
    pub fn rounded_width(&self, step: f64) -> f64 {
        if step > 0.0 {
            (self.width / step - 1e-9).ceil() * step
        } else {
            self.width
        }
    }
}

/// Reaction of one pile (N).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PileReaction {
    /// Pile x coordinate (m)
    pub x: f64,

    /// Pile y coordinate (m)
    pub y: f64,

    /// Axial reaction, compression positive (N)
    pub reaction: f64,
}

/// Pile cap verification results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PileCapResult {
    /// Pile arrangement
    pub typology: CapTypology,

    /// Number of piles
    pub pile_count: usize,

    /// Minimum dimensions
    pub minimum: MinimumDimensions,

    /// Outer-pile axis distance b (m)
    pub pile_axis_distance: f64,

    /// Cap self-weight (N)
    pub cap_weight: f64,

    /// Backfill weight (N)
    pub backfill_weight: f64,

    /// Total vertical load at the pile heads (N)
    pub total_vertical: f64,

    /// Moment at the pile heads, M + H·h (N·m)
    pub base_moment: f64,

    /// Per-pile reactions by rigid-cap statics
    pub reactions: Vec<PileReaction>,

    /// Model used for the governing reaction
    pub reaction_model: ReactionModel,

    /// Governing pile reaction (N)
    pub max_reaction: f64,

    /// Smallest rigid-cap reaction; negative means tension (N)
    pub min_reaction: f64,

    /// Allowable pile capacity (N)
    pub pile_allowable: f64,

    /// max_reaction / pile_allowable
    pub capacity_utilization: f64,

    /// True when the governing reaction does not exceed the pile capacity
    pub pile_capacity_ok: bool,

    /// Overturning moment about the leeward edge (N·m)
    pub overturning_moment: f64,

    /// Resisting moment about the leeward edge (N·m)
    pub resisting_moment: f64,

    /// M_r / M_o; `None` when there is no overturning moment
    pub overturning_ratio: Option<f64>,

    /// True when the overturning ratio meets the required factor
    pub overturning_ok: bool,

    /// Checks left to the designer
    pub note: String,
}

impl PileCapResult {
    /// Both verifications pass
    pub fn passes(&self) -> bool {
        self.pile_capacity_ok && self.overturning_ok
    }
}

// ============================================================================
// Calculations
// ============================================================================

/// Minimum width and height of the cap.
///
/// Useful for sizing before choosing the adopted dimensions. The height
/// criterion uses the adopted width.
pub fn minimum_dimensions(
    input: &PileCapInput,
    loads: &DesignLoads,
    pile: &PileInput,
    capacity: &PileCapacity,
    settings: &PileCapSettings,
) -> CalcResult<MinimumDimensions> {
    input.validate()?;
    loads.validate()?;
    pile.validate()?;
    settings.validate()?;

    let d = pile.diameter;
    let pile_spacing = settings.spacing_factor * d;
    let spacing_axis_distance = input.typology.packing() * pile_spacing;

    let resistance = input.typology.row_count() as f64 * (capacity.allowable + capacity.tension);
    if !(resistance > 0.0) {
        return Err(CalcError::invalid_input(
            "pile.allowable",
            capacity.allowable.to_string(),
            "Pile capacity must be positive to size the cap",
        ));
    }
    let equilibrium_axis_distance = 2.0 * loads.moment_at_depth(input.height) / resistance;

    let width = 2.0 * input.edge_distance + d + spacing_axis_distance.max(equilibrium_axis_distance);
    let height = ((input.width - input.column_width) / 3.0).max(0.0);

    debug!(
        "Cap {}: s_min = {:.3} m, b_spacing = {:.4} m, b_equilibrium = {:.4} m, B_min = {:.4} m, h_min = {:.4} m",
        input.typology, pile_spacing, spacing_axis_distance, equilibrium_axis_distance, width, height
    );

    Ok(MinimumDimensions {
        width,
        height,
        pile_spacing,
        spacing_axis_distance,
        equilibrium_axis_distance,
    })
}

/// Verify an adopted pile cap.
///
/// # Errors
///
/// - `InvalidInput` for invalid geometry, loads or settings
/// - `ConfigurationBelowMinimum` when the adopted width or height is below
///   the computed minimum
pub fn design(
    input: &PileCapInput,
    loads: &DesignLoads,
    pile: &PileInput,
    capacity: &PileCapacity,
    settings: &PileCapSettings,
) -> CalcResult<PileCapResult> {
    const TOLERANCE: f64 = 1e-9;

    let minimum = minimum_dimensions(input, loads, pile, capacity, settings)?;
    if input.width + TOLERANCE < minimum.width {
        return Err(CalcError::below_minimum("width", input.width, minimum.width));
    }
    if input.height + TOLERANCE < minimum.height {
        return Err(CalcError::below_minimum("height", input.height, minimum.height));
    }

    let typology = input.typology;
    let n = typology.pile_count() as f64;
    let b = input.pile_axis_distance(pile.diameter);

    let cap_weight = input.weight();
    let backfill_weight = input.backfill_weight();
    let total_vertical = loads.vertical + cap_weight + backfill_weight;
    let base_moment = loads.moment_at_depth(input.height);

    // Rigid-cap statics, wind along +x
    let coords = typology.coordinates(b);
    let sum_x2: f64 = coords.iter().map(|(x, _)| x * x).sum();
    let reactions: Vec<PileReaction> = coords
        .iter()
        .map(|&(x, y)| PileReaction {
            x,
            y,
            reaction: total_vertical / n + base_moment * x / sum_x2,
        })
        .collect();

    let rigid_max = reactions.iter().map(|r| r.reaction).fold(f64::NEG_INFINITY, f64::max);
    let min_reaction = reactions.iter().map(|r| r.reaction).fold(f64::INFINITY, f64::min);

    let max_reaction = match settings.reaction_model {
        ReactionModel::RigidCap => rigid_max,
        ReactionModel::RowFactor => {
            let row_load = total_vertical / 2.0 + base_moment / b;
            let per_pile = match typology {
                CapTypology::Square4 => row_load / 2.0,
                CapTypology::Square5 | CapTypology::Square9 => (2.0 / 3.0 * row_load) / typology.row_count() as f64,
            };
            // Never below the mean reaction
            per_pile.max(total_vertical / n)
        }
    };

    let pile_allowable = capacity.allowable;
    let pile_capacity_ok = max_reaction <= pile_allowable;

    // Overturning about the leeward edge x = +B/2
    let half = input.width / 2.0;
    let overturning_moment = base_moment;
    let mut resisting_moment = (loads.stabilizing_vertical + cap_weight + backfill_weight) * half;
    if capacity.tension > 0.0 {
        resisting_moment += coords
            .iter()
            .filter(|(x, _)| *x < 0.0)
            .map(|(x, _)| capacity.tension * (half - x))
            .sum::<f64>();
    }
    let overturning_ratio = if overturning_moment > 0.0 {
        Some(resisting_moment / overturning_moment)
    } else {
        None
    };
    let overturning_ok = overturning_ratio.map_or(true, |r| r >= settings.overturning_safety_factor);

    info!(
        "Cap {} B = {} m, h = {} m: max reaction {:.1} N ({:?}) vs Qadm {:.1} N",
        typology, input.width, input.height, max_reaction, settings.reaction_model, pile_allowable
    );
    if !pile_capacity_ok {
        warn!(
            "Pile capacity check fails: reaction {:.1} N exceeds allowable {:.1} N",
            max_reaction, pile_allowable
        );
    }
    if !overturning_ok {
        warn!(
            "Overturning check fails: M_r / M_o = {:.3} below required {:.2}",
            overturning_ratio.unwrap_or(0.0),
            settings.overturning_safety_factor
        );
    }
    if min_reaction < 0.0 && capacity.tension < -min_reaction {
        warn!(
            "Windward piles in tension ({:.1} N) beyond tension capacity {:.1} N",
            min_reaction, capacity.tension
        );
    }

    Ok(PileCapResult {
        typology,
        pile_count: typology.pile_count(),
        minimum,
        pile_axis_distance: b,
        cap_weight,
        backfill_weight,
        total_vertical,
        base_moment,
        reactions,
        reaction_model: settings.reaction_model,
        max_reaction,
        min_reaction,
        pile_allowable,
        capacity_utilization: max_reaction / pile_allowable,
        pile_capacity_ok,
        overturning_moment,
        resisting_moment,
        overturning_ratio,
        overturning_ok,
        note: SLAB_CHECK_NOTE.to_string(),
    })
}

/// Outcome of one typology in an exploration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapAlternative {
    /// Pile arrangement evaluated
    pub typology: CapTypology,

    /// Minimum dimensions for this arrangement
    pub minimum: MinimumDimensions,

    /// Verification with the adopted dimensions, or why it was rejected
    pub result: Result<PileCapResult, CalcError>,
}

/// Evaluate every typology with the adopted dimensions.
///
/// Each alternative is independent; a cap below its minimum is reported in
/// its `result` rather than aborting the exploration.
pub fn explore(
    input: &PileCapInput,
    loads: &DesignLoads,
    pile: &PileInput,
    capacity: &PileCapacity,
    settings: &PileCapSettings,
) -> CalcResult<Vec<CapAlternative>> {
    CapTypology::ALL
        .iter()
        .map(|&typology| {
            let candidate = PileCapInput { typology, ..*input };
            let minimum = minimum_dimensions(&candidate, loads, pile, capacity, settings)?;
            Ok(CapAlternative {
                typology,
                minimum,
                result: design(&candidate, loads, pile, capacity, settings),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::decourt_quaresma::InstallationMethod;
    use crate::soil::SoilClass;

    fn pile() -> PileInput {
        PileInput::new(15.0, 0.40, InstallationMethod::Strauss)
    }

    fn capacity(allowable: f64, tension: f64) -> PileCapacity {
        PileCapacity {
            tip: 0.0,
            shaft: 0.0,
            ultimate: 0.0,
            tip_allowable: 0.0,
            shaft_allowable: allowable,
            allowable,
            tension,
            n_tip: 0.0,
            n_mean: 0.0,
            alpha: 0.0,
            beta: 0.0,
            k: 0.0,
            tip_soil: SoilClass::ClayeySilt,
            shaft_soil: SoilClass::ClayeySilt,
            tip_limited: false,
        }
    }

    fn tank_loads() -> DesignLoads {
        DesignLoads {
            vertical: 502_049.25,
            horizontal: 43_561.38,
            moment: 544_569.31,
            stabilizing_vertical: 45_000.0,
        }
    }

    fn reference_cap() -> PileCapInput {
        PileCapInput::new(CapTypology::Square5, 3.5, 1.0, 0.8)
    }

    #[test]
    fn test_typology_properties() {
        assert_eq!(CapTypology::from_pile_count(5).unwrap(), CapTypology::Square5);
        assert!(CapTypology::from_pile_count(6).is_err());
        for t in CapTypology::ALL {
            let coords = t.coordinates(2.0);
            assert_eq!(coords.len(), t.pile_count());
            let sx: f64 = coords.iter().map(|c| c.0).sum();
            let sy: f64 = coords.iter().map(|c| c.1).sum();
            assert!(sx.abs() < 1e-12 && sy.abs() < 1e-12);
        }
    }

    #[test]
    fn test_minimum_dimensions_reference() {
        let min = minimum_dimensions(
            &reference_cap(),
            &tank_loads(),
            &pile(),
            &capacity(241_999.3, 0.0),
            &PileCapSettings::default(),
        )
        .unwrap();
        // Equilibrium governs: 2 * 588130.69 / (2 * 241999.3)
        assert!((min.equilibrium_axis_distance - 2.430_299).abs() < 1e-5);
        assert!((min.spacing_axis_distance - 1.414_214).abs() < 1e-5);
        assert!((min.width - 3.430_299).abs() < 1e-5);
        assert!((min.height - 0.9).abs() < 1e-12);
        assert!((min.rounded_width(0.05) - 3.45).abs() < 1e-9);
    }

    #[test]
    fn test_row_factor_reference() {
        let settings = PileCapSettings {
            reaction_model: ReactionModel::RowFactor,
            ..PileCapSettings::default()
        };
        let result = design(&reference_cap(), &tank_loads(), &pile(), &capacity(241_999.3, 0.0), &settings).unwrap();
        assert!((result.cap_weight - 294_000.0).abs() < 1e-6);
        assert!((result.max_reaction - 211_092.3).abs() < 0.1);
        assert!(result.pile_capacity_ok);
        assert_eq!(result.note, SLAB_CHECK_NOTE);
    }

    #[test]
    fn test_rigid_cap_reference() {
        let result = design(
            &reference_cap(),
            &tank_loads(),
            &pile(),
            &capacity(241_999.3, 0.0),
            &PileCapSettings::default(),
        )
        .unwrap();
        // 796049.25 / 5 + 588130.69 * 1.25 / 6.25
        assert!((result.max_reaction - 276_836.0).abs() < 0.1);
        assert!(!result.pile_capacity_ok);
        let total: f64 = result.reactions.iter().map(|r| r.reaction).sum();
        assert!((total - result.total_vertical).abs() < 1e-6);
    }

    #[test]
    fn test_overturning_reference() {
        let result = design(
            &reference_cap(),
            &tank_loads(),
            &pile(),
            &capacity(241_999.3, 0.0),
            &PileCapSettings::default(),
        )
        .unwrap();
        assert!((result.resisting_moment - 593_250.0).abs() < 1e-6);
        let ratio = result.overturning_ratio.unwrap();
        assert!((ratio - 1.008_704).abs() < 1e-5);
        assert!(!result.overturning_ok);
    }

    #[test]
    fn test_tension_adds_resisting_moment() {
        let with_t = design(
            &reference_cap(),
            &tank_loads(),
            &pile(),
            &capacity(241_999.3, 100_000.0),
            &PileCapSettings::default(),
        )
        .unwrap();
        // Two windward piles at x = -1.25, lever 1.75 + 1.25
        assert!((with_t.resisting_moment - (593_250.0 + 2.0 * 100_000.0 * 3.0)).abs() < 1e-6);
        assert!(with_t.overturning_ok);
    }

    #[test]
    fn test_zero_moment_symmetric_distribution() {
        let loads = DesignLoads {
            vertical: 800_000.0,
            horizontal: 0.0,
            moment: 0.0,
            stabilizing_vertical: 100_000.0,
        };
        for reaction_model in [ReactionModel::RigidCap, ReactionModel::RowFactor] {
            let settings = PileCapSettings {
                reaction_model,
                ..PileCapSettings::default()
            };
            for typology in CapTypology::ALL {
                let cap = PileCapInput::new(typology, 4.0, 1.2, 0.8);
                let result = design(&cap, &loads, &pile(), &capacity(500_000.0, 0.0), &settings).unwrap();
                let expected = result.total_vertical / typology.pile_count() as f64;
                assert!(
                    (result.max_reaction - expected).abs() < 1e-6,
                    "{:?} {:?}: {} != {}",
                    reaction_model,
                    typology,
                    result.max_reaction,
                    expected
                );
                assert!(result.overturning_ratio.is_none());
                assert!(result.overturning_ok);
            }
        }
    }

    #[test]
    fn test_row_factor_not_below_mean_reaction() {
        let loads = DesignLoads {
            vertical: 800_000.0,
            horizontal: 0.0,
            moment: 0.0,
            stabilizing_vertical: 100_000.0,
        };
        let settings = PileCapSettings {
            reaction_model: ReactionModel::RowFactor,
            ..PileCapSettings::default()
        };
        let cap = PileCapInput::new(CapTypology::Square5, 4.0, 1.2, 0.8);
        let result = design(&cap, &loads, &pile(), &capacity(500_000.0, 0.0), &settings).unwrap();
        assert_eq!(result.max_reaction, result.total_vertical / 5.0);
    }

    #[test]
    fn test_width_below_minimum() {
        let cap = PileCapInput::new(CapTypology::Square5, 3.0, 1.0, 0.8);
        let result = design(&cap, &tank_loads(), &pile(), &capacity(241_999.3, 0.0), &PileCapSettings::default());
        match result {
            Err(CalcError::ConfigurationBelowMinimum { dimension, adopted, minimum }) => {
                assert_eq!(dimension, "width");
                assert_eq!(adopted, 3.0);
                assert!((minimum - 3.4303).abs() < 1e-4);
            }
            other => panic!("expected ConfigurationBelowMinimum, got {:?}", other),
        }
    }

    #[test]
    fn test_height_below_minimum() {
        let cap = PileCapInput::new(CapTypology::Square5, 3.5, 0.8, 0.8);
        let result = design(&cap, &tank_loads(), &pile(), &capacity(241_999.3, 0.0), &PileCapSettings::default());
        assert!(matches!(
            result,
            Err(CalcError::ConfigurationBelowMinimum { ref dimension, .. }) if dimension == "height"
        ));
    }

    #[test]
    fn test_backfill_weight() {
        let mut cap = reference_cap();
        cap.backfill_depth = 0.5;
        assert!((cap.backfill_weight() - 3.5 * 3.5 * 0.5 * 18_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_explore_all_typologies() {
        let alternatives = explore(
            &reference_cap(),
            &tank_loads(),
            &pile(),
            &capacity(241_999.3, 0.0),
            &PileCapSettings::default(),
        )
        .unwrap();
        assert_eq!(alternatives.len(), 3);
        // 9 piles need b >= 2 * 2.5 * 0.4 = 2.0 and equilibrium 2*588130.69/(3*241999.3)
        let nine = &alternatives[2];
        assert_eq!(nine.typology, CapTypology::Square9);
        assert!(nine.result.is_ok());
        assert!(alternatives.iter().all(|a| a.minimum.width > 0.0));
    }

    #[test]
    fn test_settings_json_defaults() {
        let s: PileCapSettings = serde_json::from_str(r#"{ "reaction_model": "RowFactor" }"#).unwrap();
        assert_eq!(s.reaction_model, ReactionModel::RowFactor);
        assert_eq!(s.spacing_factor, 2.5);
    }
}
