//! # Text Report
//!
//! Plain-text rendering of a [`FoundationReport`] in customary multiples
//! (kN, kN/m², kN·m, cm). The engine works in SI base units; conversion
//! happens only here, through [`crate::units`].

use std::fmt;

use crate::calculations::pile_cap::ReactionModel;
use crate::loads::LoadType;
use crate::project::FoundationReport;
use crate::units::{kn, knm, kpa, Centimeters, Meters};

fn verdict(ok: bool) -> &'static str {
    if ok {
        "OK"
    } else {
        "FAILS"
    }
}

impl fmt::Display for FoundationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let meta = &self.meta;
        writeln!(f, "FOUNDATION CHECK - job {}", meta.job_id)?;
        if !meta.client.is_empty() {
            writeln!(f, "Client: {}", meta.client)?;
        }
        if !meta.engineer.is_empty() {
            writeln!(f, "Engineer: {}", meta.engineer)?;
        }

        writeln!(f)?;
        writeln!(f, "WIND")?;
        writeln!(f, "  Basic speed: {} m/s", self.wind.basic_speed)?;
        writeln!(f, "  Pressure at {} m: {:.2} kN/m²", self.wind.reference_height, kpa(self.reference_pressure))?;

        let tank = &self.tank;
        writeln!(f)?;
        writeln!(f, "TANK")?;
        writeln!(f, "  Capacity: {} m³", self.tank_input.geometry.capacity)?;
        writeln!(f, "  Vertical load (full): {:.2} kN", kn(tank.vertical_full))?;
        writeln!(
            f,
            "  Drag coefficients: shaft {:.3}, bowl {:.3}",
            tank.shaft_drag_coefficient, tank.bowl_drag_coefficient
        )?;
        writeln!(f, "  Horizontal force: {:.2} kN", kn(tank.horizontal_force))?;
        writeln!(f, "  Base moment: {:.2} kN·m (lever arm {:.2} m)", knm(tank.base_moment), tank.lever_arm)?;

        let loads = &self.design_loads;
        writeln!(f)?;
        writeln!(f, "DESIGN LOADS ({}, wind x{:.2})", self.load_factors.gravity_equation(), self.load_factors.wind)?;
        for load_type in LoadType::ALL {
            writeln!(
                f,
                "  {} x{:.2}  {}",
                load_type,
                self.load_factors.factor(load_type),
                load_type.description()
            )?;
        }
        writeln!(f, "  N = {:.2} kN", kn(loads.vertical))?;
        writeln!(f, "  H = {:.2} kN", kn(loads.horizontal))?;
        writeln!(f, "  M = {:.2} kN·m", knm(loads.moment))?;

        let pile = &self.pile;
        let diameter: Centimeters = Meters(self.pile_input.diameter).into();
        writeln!(f)?;
        writeln!(f, "PILE")?;
        writeln!(f, "  Length: {} m", self.pile_input.length)?;
        writeln!(f, "  Diameter: {:.0} cm", diameter.value())?;
        writeln!(f, "  Installation: {}", self.pile_input.method)?;
        let concrete = &self.pile_input.concrete;
        writeln!(
            f,
            "  Concrete: fck = {:.1} MPa, fcd = {:.2} MPa",
            concrete.fck * 1e-6,
            concrete.design_strength() * 1e-6
        )?;
        writeln!(f, "  Soil: tip {}, shaft {}", pile.tip_soil, pile.shaft_soil)?;
        writeln!(f, "  N_tip = {:.2}, N_mean = {:.2}", pile.n_tip, pile.n_mean)?;
        writeln!(f, "  Tip: {:.2} kN, shaft: {:.2} kN", kn(pile.tip), kn(pile.shaft))?;
        writeln!(f, "  Capacity: {:.2} kN", kn(pile.allowable))?;
        if pile.tip_limited {
            writeln!(f, "  (tip share limited for excavated pile)")?;
        }

        let cap = &self.cap;
        writeln!(f)?;
        writeln!(f, "SQUARE PILE CAP")?;
        writeln!(f, "  Typology: {}", cap.typology)?;
        writeln!(f, "  Minimum width: {:.2} m", cap.minimum.width)?;
        writeln!(f, "  Adopted width: {:.2} m", self.cap_input.width)?;
        writeln!(f, "  Minimum height: {:.2} m", cap.minimum.height)?;
        writeln!(f, "  Adopted height: {:.2} m", self.cap_input.height)?;
        let model = match cap.reaction_model {
            ReactionModel::RigidCap => "rigid cap",
            ReactionModel::RowFactor => "row factor",
        };
        writeln!(f, "  Max pile reaction: {:.2} kN ({})", kn(cap.max_reaction), model)?;

        writeln!(f)?;
        writeln!(f, "VERIFICATION")?;
        writeln!(f, "  Pile capacity: {}", verdict(cap.pile_capacity_ok))?;
        match cap.overturning_ratio {
            Some(ratio) => writeln!(f, "  Overturning: {} (M_r / M_o = {:.2})", verdict(cap.overturning_ok), ratio)?,
            None => writeln!(f, "  Overturning: {} (no overturning moment)", verdict(cap.overturning_ok))?,
        }
        write!(f, "  {}", cap.note)
    }
}
