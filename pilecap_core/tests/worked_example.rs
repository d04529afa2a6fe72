//! End-to-end check of the 30 m³ reference tank on five Strauss piles.

use approx::assert_relative_eq;

use pilecap_core::calculations::decourt_quaresma::{DecourtQuaresmaConfig, InstallationMethod, DEFAULT_TABLE};
use pilecap_core::calculations::pile::{self, PileInput};
use pilecap_core::calculations::pile_cap::{self, CapTypology, PileCapInput, PileCapSettings, ReactionModel};
use pilecap_core::calculations::tank::{self, TankInput};
use pilecap_core::loads::{LoadFactors, WindInput, WindLoad};
use pilecap_core::soil::{SoilClass, SoilProfile};
use pilecap_core::{CalcError, FoundationProject};

fn site_profile() -> SoilProfile {
    let spt1 = vec![2., 2., 2., 2., 2., 2., 4., 4., 6., 4., 5., 4., 5., 4., 6., 7., 8., 8., 8., 8., 11., 15.];
    let spt2 = vec![2., 2., 2., 2., 2., 2., 2., 3., 6., 5., 6., 6., 6., 6., 8., 8., 8., 8., 9., 10., 13., 16.];
    SoilProfile::from_soundings(&[spt1, spt2], 1.0, SoilClass::ClayeySilt).unwrap()
}

#[test]
fn test_step_by_step_pipeline() {
    let wind = WindLoad::new(WindInput::with_speed(50.0)).unwrap();
    assert_relative_eq!(wind.pressure_at(10.0).unwrap(), 1612.5, epsilon = 1e-9);

    let tank_loads = tank::calculate(&TankInput::standard(30.0).unwrap(), &wind).unwrap();
    assert_relative_eq!(tank_loads.vertical_full, 339_199.5, epsilon = 1e-6);
    assert_relative_eq!(tank_loads.horizontal_force, 29_040.92, epsilon = 0.01);
    assert_relative_eq!(tank_loads.base_moment, 363_046.21, epsilon = 0.01);

    let loads = tank_loads.factored(&LoadFactors::default()).unwrap();

    let pile_input = PileInput::new(15.0, 0.40, InstallationMethod::Strauss);
    let capacity = pile::calculate(&pile_input, &site_profile(), &DecourtQuaresmaConfig::default(), &DEFAULT_TABLE).unwrap();
    assert_relative_eq!(capacity.allowable, 241_999.3, epsilon = 0.1);

    let cap = PileCapInput::new(CapTypology::Square5, 3.5, 1.0, 0.8);
    let settings = PileCapSettings {
        reaction_model: ReactionModel::RowFactor,
        ..PileCapSettings::default()
    };
    let result = pile_cap::design(&cap, &loads, &pile_input, &capacity, &settings).unwrap();
    assert_relative_eq!(result.minimum.width, 3.4303, epsilon = 1e-4);
    assert_relative_eq!(result.max_reaction, 211_092.3, epsilon = 0.1);
    assert!(result.pile_capacity_ok);
}

#[test]
fn test_project_matches_step_by_step() {
    let report = FoundationProject::worked_example().analyze().unwrap();
    assert_relative_eq!(report.reference_pressure, 1612.5, epsilon = 1e-9);
    assert_relative_eq!(report.design_loads.vertical, 502_049.25, epsilon = 1e-6);
    assert_relative_eq!(report.cap.max_reaction, 211_092.3, epsilon = 0.1);
    assert!(report.cap.pile_capacity_ok);
    // Empty tank plus cap weight against the factored wind moment
    assert!(!report.cap.overturning_ok);
}

#[test]
fn test_repeated_analysis_is_bit_identical() {
    let project = FoundationProject::worked_example();
    let a = project.analyze().unwrap();
    let b = project.analyze().unwrap();
    assert_eq!(a.cap.max_reaction.to_bits(), b.cap.max_reaction.to_bits());
    assert_eq!(a.pile.allowable.to_bits(), b.pile.allowable.to_bits());
    assert_eq!(a.tank.base_moment.to_bits(), b.tank.base_moment.to_bits());
}

#[test]
fn test_undersized_cap_is_flagged() {
    let mut project = FoundationProject::worked_example();
    project.cap.width = 3.2;
    match project.analyze() {
        Err(CalcError::ConfigurationBelowMinimum { dimension, minimum, .. }) => {
            assert_eq!(dimension, "width");
            assert_relative_eq!(minimum, 3.4303, epsilon = 1e-4);
        }
        other => panic!("expected ConfigurationBelowMinimum, got {:?}", other),
    }
}

#[test]
fn test_project_json_roundtrip_gives_same_report() {
    let project = FoundationProject::worked_example();
    let json = serde_json::to_string(&project).unwrap();
    let parsed = pilecap_core::file_io::parse_project(&json).unwrap();
    assert_eq!(parsed.analyze().unwrap(), project.analyze().unwrap());
}
