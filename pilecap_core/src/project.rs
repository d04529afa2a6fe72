//! # Foundation Project
//!
//! The `FoundationProject` struct is the root container for one tank
//! foundation. Projects serialize to human-readable JSON files.
//!
//! ## Structure
//!
//! ```text
//! FoundationProject
//! ├── meta: ProjectMetadata (version, engineer, job info, timestamps)
//! ├── settings: DesignSettings (load factors, pile method, cap checks)
//! ├── wind: WindInput
//! ├── tank: TankInput
//! ├── soil: SoilProfile
//! ├── pile: PileInput
//! └── cap: PileCapInput
//! ```
//!
//! [`FoundationProject::analyze`] runs the whole pipeline:
//! wind → tank loads → factored loads → pile capacity → cap verification.
//!
//! ## Example
//!
//! ```rust
//! use pilecap_core::project::FoundationProject;
//!
//! let project = FoundationProject::worked_example();
//! let report = project.analyze().unwrap();
//! assert!(report.cap.pile_capacity_ok);
//! ```

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

use crate::calculations::decourt_quaresma::{CoefficientTable, DecourtQuaresmaConfig, InstallationMethod};
use crate::calculations::pile::{self, PileCapacity, PileInput};
use crate::calculations::pile_cap::{self, CapAlternative, CapTypology, PileCapInput, PileCapResult, PileCapSettings, ReactionModel};
use crate::calculations::tank::{self, TankInput, TankLoads};
use crate::errors::CalcResult;
use crate::loads::{DesignLoads, LoadFactors, WindInput, WindLoad};
use crate::soil::{SoilClass, SoilProfile, SptSample};

/// Current schema version for project files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Project metadata stored in the file header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Name of the responsible engineer
    pub engineer: String,

    /// Job/project number
    pub job_id: String,

    /// Client name
    pub client: String,

    /// When the project was created
    pub created: DateTime<Utc>,

    /// When the project was last modified
    pub modified: DateTime<Utc>,
}

impl ProjectMetadata {
    /// Metadata stamped with the current time and schema version.
    pub fn new(engineer: impl Into<String>, job_id: impl Into<String>, client: impl Into<String>) -> Self {
        let now = Utc::now();
        ProjectMetadata {
            version: SCHEMA_VERSION.to_string(),
            engineer: engineer.into(),
            job_id: job_id.into(),
            client: client.into(),
            created: now,
            modified: now,
        }
    }
}

/// Code-dependent factors applied across the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DesignSettings {
    /// Partial factors on tank actions
    pub load_factors: LoadFactors,

    /// Decourt-Quaresma safety factors and SPT rules
    pub pile: DecourtQuaresmaConfig,

    /// Decourt-Quaresma α, β, K table
    pub coefficients: CoefficientTable,

    /// Cap spacing, overturning factor and reaction model
    pub cap: PileCapSettings,
}

/// Root project container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoundationProject {
    /// Project metadata
    pub meta: ProjectMetadata,

    /// Design settings
    #[serde(default)]
    pub settings: DesignSettings,

    /// Wind parameters
    pub wind: WindInput,

    /// Tank supported by the foundation
    pub tank: TankInput,

    /// SPT soundings
    pub soil: SoilProfile,

    /// Pile definition
    pub pile: PileInput,

    /// Adopted pile cap
    pub cap: PileCapInput,
}

/// Everything computed for a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoundationReport {
    /// Project metadata
    pub meta: ProjectMetadata,

    /// Wind parameters used
    pub wind: WindInput,

    /// Velocity pressure at the reference height (Pa)
    pub reference_pressure: f64,

    /// Tank input used
    pub tank_input: TankInput,

    /// Characteristic tank actions
    pub tank: TankLoads,

    /// Load factors applied
    pub load_factors: LoadFactors,

    /// Factored loads at the cap top
    pub design_loads: DesignLoads,

    /// Pile input used
    pub pile_input: PileInput,

    /// Single-pile capacity
    pub pile: PileCapacity,

    /// Cap input used
    pub cap_input: PileCapInput,

    /// Cap verification
    pub cap: PileCapResult,
}

impl FoundationReport {
    /// Both verifications pass
    pub fn passes(&self) -> bool {
        self.cap.passes()
    }
}

impl FoundationProject {
    /// Characteristic tank loads and the factored loads derived from them.
    pub fn loads(&self) -> CalcResult<(TankLoads, DesignLoads)> {
        let wind = WindLoad::new(self.wind)?;
        let tank_loads = tank::calculate(&self.tank, &wind)?;
        let design_loads = tank_loads.factored(&self.settings.load_factors)?;
        Ok((tank_loads, design_loads))
    }

    /// Capacity of the project pile.
    pub fn pile_capacity(&self) -> CalcResult<PileCapacity> {
        pile::calculate(&self.pile, &self.soil, &self.settings.pile, &self.settings.coefficients)
    }

    /// Run the complete foundation check.
    ///
    /// # Errors
    ///
    /// The first error of any stage, e.g. `InsufficientProfileDepth` from the
    /// pile or `ConfigurationBelowMinimum` from the cap.
    pub fn analyze(&self) -> CalcResult<FoundationReport> {
        info!("Analyzing foundation for job '{}'", self.meta.job_id);

        let wind = WindLoad::new(self.wind)?;
        let (tank_loads, design_loads) = self.loads()?;
        let capacity = self.pile_capacity()?;
        let cap = pile_cap::design(&self.cap, &design_loads, &self.pile, &capacity, &self.settings.cap)?;

        info!(
            "Foundation check for job '{}': pile capacity {}, overturning {}",
            self.meta.job_id,
            if cap.pile_capacity_ok { "OK" } else { "FAILS" },
            if cap.overturning_ok { "OK" } else { "FAILS" }
        );

        Ok(FoundationReport {
            meta: self.meta.clone(),
            wind: self.wind,
            reference_pressure: wind.reference_pressure(),
            tank_input: self.tank,
            tank: tank_loads,
            load_factors: self.settings.load_factors,
            design_loads,
            pile_input: self.pile,
            pile: capacity,
            cap_input: self.cap,
            cap,
        })
    }

    /// Evaluate every cap typology with the adopted cap dimensions.
    pub fn explore(&self) -> CalcResult<Vec<CapAlternative>> {
        let (_, design_loads) = self.loads()?;
        let capacity = self.pile_capacity()?;
        pile_cap::explore(&self.cap, &design_loads, &self.pile, &capacity, &self.settings.cap)
    }

    /// Reference project: a 30 m³ tank on five Strauss piles.
    ///
    /// Two SPT soundings are averaged sample by sample. The cap uses the
    /// row-factor reaction model.
    pub fn worked_example() -> Self {
        const SPT1: [f64; 22] = [
            2., 2., 2., 2., 2., 2., 4., 4., 6., 4., 5., 4., 5., 4., 6., 7., 8., 8., 8., 8., 11., 15.,
        ];
        const SPT2: [f64; 22] = [
            2., 2., 2., 2., 2., 2., 2., 3., 6., 5., 6., 6., 6., 6., 8., 8., 8., 8., 9., 10., 13., 16.,
        ];

        let samples = SPT1
            .iter()
            .zip(SPT2.iter())
            .enumerate()
            .map(|(i, (a, b))| SptSample::new((i + 1) as f64, (a + b) / 2.0, SoilClass::ClayeySilt))
            .collect();

        let mut settings = DesignSettings::default();
        settings.cap.reaction_model = ReactionModel::RowFactor;

        FoundationProject {
            meta: ProjectMetadata::new("", "EXAMPLE-30", ""),
            settings,
            wind: WindInput::with_speed(50.0),
            tank: TankInput::new(tank::TankGeometry {
                capacity: 30.0,
                shaft_diameter: 0.80,
                shaft_height: 12.0,
                bowl_diameter: 2.3,
                bowl_height: 5.9,
            }),
            soil: SoilProfile { samples },
            pile: PileInput::new(15.0, 0.40, InstallationMethod::Strauss)
                .with_soils(SoilClass::ClayeySilt, SoilClass::ClayeySilt),
            cap: PileCapInput::new(CapTypology::Square5, 3.5, 1.0, 0.80),
        }
    }
}
