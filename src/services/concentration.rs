//! Solution concentration calculations.
//!
//! A [`ConcentrationRequest`] is a bag of optional quantities. Before any
//! arithmetic happens it is turned into a [`ConcentrationInput`], which names
//! exactly one way of solving the selected mode. Picking that variant is the
//! only place where "which fields are present" matters; the solvers below
//! work on the typed input and only check that divisors are positive.

use log::debug;

use crate::chemistry::*;
use crate::error::ConcentrationError;
use crate::models::{CalculationType, ConcentrationRequest, ConcentrationResult, TypeOption};

const MOLARITY_FORMULA: &str = "M = moles / volume(L)";
const MOLALITY_FORMULA: &str = "m = moles / kg_solvent";
const DILUTION_FORMULA: &str = "C₁ × V₁ = C₂ × V₂";
const MASS_VOLUME_FORMULA: &str = "Concentration = mass / volume";
const PPM_FORMULA: &str = "ppm = (mass_solute / mass_solution) × 10⁶";
const PERCENTAGE_FORMULA: &str = "% = (mass_solute / mass_solution) × 100";
const DENSITY_NOTE: &str = "mg/mL values assume a solution density of about 1 g/mL.";

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MolarityInput {
    FromMolesVolume {
        moles: f64,
        volume_l: f64,
        molecular_weight: Option<f64>,
    },
    FromMolarityVolume {
        molarity: f64,
        volume_l: f64,
        molecular_weight: Option<f64>,
    },
    FromMolarityMoles {
        molarity: f64,
        moles: f64,
        molecular_weight: Option<f64>,
    },
    FromMassMwVolume {
        mass_g: f64,
        molecular_weight: f64,
        volume_l: f64,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MolalityInput {
    FromMolesSolvent { moles: f64, kg_solvent: f64 },
    FromMolalitySolvent { molality: f64, kg_solvent: f64 },
}

/// C1·V1 = C2·V2 with one unknown; each variant names the unknown.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DilutionInput {
    SolveC1 { v1: f64, c2: f64, v2: f64 },
    SolveV1 { c1: f64, c2: f64, v2: f64 },
    SolveC2 { c1: f64, v1: f64, v2: f64 },
    SolveV2 { c1: f64, v1: f64, c2: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MassVolumeInput {
    FromMassVolume { mass_g: f64, volume_ml: f64 },
    FromConcentrationVolume { concentration_mg_ml: f64, volume_ml: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PpmInput {
    FromPpm(f64),
    FromPercentage(f64),
    FromMgMl(f64),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PercentageInput {
    FromPercentage(f64),
    FromPpm(f64),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConcentrationInput {
    Molarity(MolarityInput),
    Molality(MolalityInput),
    Dilution(DilutionInput),
    MassVolume(MassVolumeInput),
    Ppm(PpmInput),
    Percentage(PercentageInput),
}

impl ConcentrationInput {
    /// Pick the solving strategy for `calculation_type` from the fields that
    /// are present, trying the accepted combinations in priority order.
    pub fn from_request(
        calculation_type: CalculationType,
        req: &ConcentrationRequest,
    ) -> Result<Self, ConcentrationError> {
        let input = match calculation_type {
            CalculationType::Molarity => Self::Molarity(molarity_input(req)?),
            CalculationType::Molality => Self::Molality(molality_input(req)?),
            CalculationType::Dilution => Self::Dilution(dilution_input(req)?),
            CalculationType::MassVolume => Self::MassVolume(mass_volume_input(req)?),
            CalculationType::Ppm => Self::Ppm(ppm_input(req)?),
            CalculationType::Percentage => Self::Percentage(percentage_input(req)?),
        };
        Ok(input)
    }

    pub fn calculation_type(&self) -> CalculationType {
        match self {
            Self::Molarity(_) => CalculationType::Molarity,
            Self::Molality(_) => CalculationType::Molality,
            Self::Dilution(_) => CalculationType::Dilution,
            Self::MassVolume(_) => CalculationType::MassVolume,
            Self::Ppm(_) => CalculationType::Ppm,
            Self::Percentage(_) => CalculationType::Percentage,
        }
    }
}

fn molarity_input(r: &ConcentrationRequest) -> Result<MolarityInput, ConcentrationError> {
    let molecular_weight = r.molecular_weight;
    match (r.moles, r.volume_l, r.molarity, r.mass_g, molecular_weight) {
        (Some(moles), Some(volume_l), ..) => Ok(MolarityInput::FromMolesVolume {
            moles,
            volume_l,
            molecular_weight,
        }),
        (_, Some(volume_l), Some(molarity), ..) => Ok(MolarityInput::FromMolarityVolume {
            molarity,
            volume_l,
            molecular_weight,
        }),
        (Some(moles), _, Some(molarity), ..) => Ok(MolarityInput::FromMolarityMoles {
            molarity,
            moles,
            molecular_weight,
        }),
        (_, Some(volume_l), _, Some(mass_g), Some(molecular_weight)) => {
            Ok(MolarityInput::FromMassMwVolume {
                mass_g,
                molecular_weight,
                volume_l,
            })
        }
        _ => Err(ConcentrationError::InsufficientParameters {
            mode: "molarity",
            accepted: "(moles + volume) or (molarity + volume) or (molarity + moles) \
                       or (mass + molecular weight + volume)",
        }),
    }
}

fn molality_input(r: &ConcentrationRequest) -> Result<MolalityInput, ConcentrationError> {
    match (r.moles, r.molality, r.kg_solvent) {
        (Some(moles), _, Some(kg_solvent)) => {
            Ok(MolalityInput::FromMolesSolvent { moles, kg_solvent })
        }
        (_, Some(molality), Some(kg_solvent)) => Ok(MolalityInput::FromMolalitySolvent {
            molality,
            kg_solvent,
        }),
        _ => Err(ConcentrationError::InsufficientParameters {
            mode: "molality",
            accepted: "(moles + kg solvent) or (molality + kg solvent)",
        }),
    }
}

fn dilution_input(r: &ConcentrationRequest) -> Result<DilutionInput, ConcentrationError> {
    match (r.c1, r.v1, r.c2, r.v2) {
        (None, Some(v1), Some(c2), Some(v2)) => Ok(DilutionInput::SolveC1 { v1, c2, v2 }),
        (Some(c1), None, Some(c2), Some(v2)) => Ok(DilutionInput::SolveV1 { c1, c2, v2 }),
        (Some(c1), Some(v1), None, Some(v2)) => Ok(DilutionInput::SolveC2 { c1, v1, v2 }),
        (Some(c1), Some(v1), Some(c2), None) => Ok(DilutionInput::SolveV2 { c1, v1, c2 }),
        (c1, v1, c2, v2) => Err(ConcentrationError::DilutionArity {
            provided: [c1, v1, c2, v2].iter().filter(|v| v.is_some()).count(),
        }),
    }
}

fn mass_volume_input(r: &ConcentrationRequest) -> Result<MassVolumeInput, ConcentrationError> {
    match (r.mass_g, r.concentration_mg_ml, r.volume_ml) {
        (Some(mass_g), _, Some(volume_ml)) => {
            Ok(MassVolumeInput::FromMassVolume { mass_g, volume_ml })
        }
        (_, Some(concentration_mg_ml), Some(volume_ml)) => {
            Ok(MassVolumeInput::FromConcentrationVolume {
                concentration_mg_ml,
                volume_ml,
            })
        }
        _ => Err(ConcentrationError::InsufficientParameters {
            mode: "mass/volume concentration",
            accepted: "(mass + volume) or (concentration + volume)",
        }),
    }
}

fn ppm_input(r: &ConcentrationRequest) -> Result<PpmInput, ConcentrationError> {
    r.ppm
        .map(PpmInput::FromPpm)
        .or(r.percentage.map(PpmInput::FromPercentage))
        .or(r.concentration_mg_ml.map(PpmInput::FromMgMl))
        .ok_or(ConcentrationError::InsufficientParameters {
            mode: "ppm",
            accepted: "ppm, percentage or concentration in mg/mL",
        })
}

fn percentage_input(r: &ConcentrationRequest) -> Result<PercentageInput, ConcentrationError> {
    r.percentage
        .map(PercentageInput::FromPercentage)
        .or(r.ppm.map(PercentageInput::FromPpm))
        .ok_or(ConcentrationError::InsufficientParameters {
            mode: "percentage",
            accepted: "percentage or ppm",
        })
}

fn require_positive(value: f64, quantity: &'static str) -> Result<f64, ConcentrationError> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ConcentrationError::NonPositive { quantity })
    }
}

/// Run the concentration calculation selected by `req.calculation_type`.
///
/// Fails with [`ConcentrationError::InsufficientParameters`] (or
/// `DilutionArity`) when the provided fields match none of the accepted
/// combinations for the mode, and with a `NonPositive*` error when a value
/// used as a divisor is not strictly positive.
pub fn calculate(req: &ConcentrationRequest) -> Result<ConcentrationResult, ConcentrationError> {
    let input = ConcentrationInput::from_request(req.calculation_type, req)?;
    calculate_input(&input)
}

/// Solve an already-typed concentration input.
pub fn calculate_input(
    input: &ConcentrationInput,
) -> Result<ConcentrationResult, ConcentrationError> {
    debug!("{} input: {input:?}", input.calculation_type());
    match *input {
        ConcentrationInput::Molarity(m) => molarity(m),
        ConcentrationInput::Molality(m) => molality(m),
        ConcentrationInput::Dilution(d) => dilution(d),
        ConcentrationInput::MassVolume(m) => mass_volume(m),
        ConcentrationInput::Ppm(p) => ppm(p),
        ConcentrationInput::Percentage(p) => percentage(p),
    }
}

fn molarity(input: MolarityInput) -> Result<ConcentrationResult, ConcentrationError> {
    let mut out = ConcentrationResult::empty(CalculationType::Molarity, MOLARITY_FORMULA);

    let (molarity, molecular_weight) = match input {
        MolarityInput::FromMolesVolume {
            moles,
            volume_l,
            molecular_weight,
        } => {
            let volume_l = require_positive(volume_l, "The volume")?;
            out.moles = Some(moles);
            out.volume_l = Some(volume_l);
            (moles / volume_l, molecular_weight)
        }
        MolarityInput::FromMolarityVolume {
            molarity,
            volume_l,
            molecular_weight,
        } => {
            let volume_l = require_positive(volume_l, "The volume")?;
            out.moles = Some(molarity * volume_l);
            out.volume_l = Some(volume_l);
            (molarity, molecular_weight)
        }
        MolarityInput::FromMolarityMoles {
            molarity,
            moles,
            molecular_weight,
        } => {
            let molarity = require_positive(molarity, "The molarity")?;
            out.moles = Some(moles);
            out.volume_l = Some(moles / molarity);
            (molarity, molecular_weight)
        }
        MolarityInput::FromMassMwVolume {
            mass_g,
            molecular_weight,
            volume_l,
        } => {
            let molecular_weight = require_positive(molecular_weight, "The molecular weight")?;
            let volume_l = require_positive(volume_l, "The volume")?;
            let moles = moles_from_mass(mass_g, molecular_weight);
            out.moles = Some(moles);
            out.mass_g = Some(mass_g);
            out.volume_l = Some(volume_l);
            (moles / volume_l, Some(molecular_weight))
        }
    };
    out.molarity = Some(molarity);

    // mg/mL and g/L share a numeric value.
    if let Some(mw) = molecular_weight {
        let g_l = molarity * mw;
        out.concentration_g_l = Some(g_l);
        out.concentration_mg_ml = Some(g_l);
    }
    Ok(out)
}

fn molality(input: MolalityInput) -> Result<ConcentrationResult, ConcentrationError> {
    let mut out = ConcentrationResult::empty(CalculationType::Molality, MOLALITY_FORMULA);
    match input {
        MolalityInput::FromMolesSolvent { moles, kg_solvent } => {
            let kg = require_positive(kg_solvent, "The solvent mass")?;
            out.molality = Some(moles / kg);
            out.moles = Some(moles);
            out.kg_solvent = Some(kg);
        }
        MolalityInput::FromMolalitySolvent {
            molality,
            kg_solvent,
        } => {
            let kg = require_positive(kg_solvent, "The solvent mass")?;
            out.moles = Some(molality * kg);
            out.molality = Some(molality);
            out.kg_solvent = Some(kg);
        }
    }
    Ok(out)
}

fn dilution(input: DilutionInput) -> Result<ConcentrationResult, ConcentrationError> {
    let all_positive = |vals: [f64; 3]| {
        if vals.iter().all(|&v| v > 0.0) {
            Ok(())
        } else {
            Err(ConcentrationError::NonPositiveDilution)
        }
    };

    let (c1, v1, c2, v2) = match input {
        DilutionInput::SolveC1 { v1, c2, v2 } => {
            all_positive([v1, c2, v2])?;
            (c2 * v2 / v1, v1, c2, v2)
        }
        DilutionInput::SolveV1 { c1, c2, v2 } => {
            all_positive([c1, c2, v2])?;
            (c1, c2 * v2 / c1, c2, v2)
        }
        DilutionInput::SolveC2 { c1, v1, v2 } => {
            all_positive([c1, v1, v2])?;
            (c1, v1, c1 * v1 / v2, v2)
        }
        DilutionInput::SolveV2 { c1, v1, c2 } => {
            all_positive([c1, v1, c2])?;
            (c1, v1, c2, c1 * v1 / c2)
        }
    };

    let mut out = ConcentrationResult::empty(CalculationType::Dilution, DILUTION_FORMULA);
    out.c1 = Some(c1);
    out.v1 = Some(v1);
    out.c2 = Some(c2);
    out.v2 = Some(v2);
    Ok(out)
}

fn mass_volume(input: MassVolumeInput) -> Result<ConcentrationResult, ConcentrationError> {
    let mut out = ConcentrationResult::empty(CalculationType::MassVolume, MASS_VOLUME_FORMULA);
    match input {
        MassVolumeInput::FromMassVolume { mass_g, volume_ml } => {
            let volume_ml = require_positive(volume_ml, "The volume")?;
            out.concentration_mg_ml = Some(mass_g * MILLI_PER_UNIT / volume_ml);
            out.concentration_g_l = Some(mass_g / (volume_ml / MILLI_PER_UNIT));
            out.mass_g = Some(mass_g);
            out.volume_ml = Some(volume_ml);
        }
        MassVolumeInput::FromConcentrationVolume {
            concentration_mg_ml,
            volume_ml,
        } => {
            let volume_ml = require_positive(volume_ml, "The volume")?;
            out.mass_g = Some(concentration_mg_ml * volume_ml / MILLI_PER_UNIT);
            out.concentration_mg_ml = Some(concentration_mg_ml);
            out.concentration_g_l = Some(concentration_mg_ml);
            out.volume_ml = Some(volume_ml);
        }
    }
    Ok(out)
}

fn ppm(input: PpmInput) -> Result<ConcentrationResult, ConcentrationError> {
    let ppm = match input {
        PpmInput::FromPpm(ppm) => ppm,
        PpmInput::FromPercentage(pct) => ppm_from_percentage(pct),
        PpmInput::FromMgMl(mg_ml) => ppm_from_mg_ml(mg_ml),
    };

    let mut out = ConcentrationResult::empty(CalculationType::Ppm, PPM_FORMULA);
    out.ppm = Some(ppm);
    out.percentage = Some(match input {
        PpmInput::FromPercentage(pct) => pct,
        _ => percentage_from_ppm(ppm),
    });
    out.concentration_mg_ml = Some(match input {
        PpmInput::FromMgMl(mg_ml) => mg_ml,
        _ => mg_ml_from_ppm(ppm),
    });
    out.notes = Some(DENSITY_NOTE);
    Ok(out)
}

fn percentage(input: PercentageInput) -> Result<ConcentrationResult, ConcentrationError> {
    let (pct, ppm) = match input {
        PercentageInput::FromPercentage(pct) => (pct, ppm_from_percentage(pct)),
        PercentageInput::FromPpm(ppm) => (percentage_from_ppm(ppm), ppm),
    };

    let mut out = ConcentrationResult::empty(CalculationType::Percentage, PERCENTAGE_FORMULA);
    out.percentage = Some(pct);
    out.ppm = Some(ppm);
    out.concentration_g_l = Some(pct * G_L_PER_PERCENT);
    Ok(out)
}

/// Concentration modes with their menu labels.
pub fn calculation_types() -> Vec<TypeOption> {
    CalculationType::ALL
        .iter()
        .map(|t| TypeOption {
            value: t.as_str(),
            label: t.label(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn request(ct: CalculationType) -> ConcentrationRequest {
        ConcentrationRequest::new(ct)
    }

    #[test]
    fn molarity_from_moles_and_volume() {
        let mut r = request(CalculationType::Molarity);
        r.moles = Some(0.5);
        r.volume_l = Some(2.0);
        let out = calculate(&r).unwrap();
        assert_relative_eq!(out.molarity.unwrap(), 0.25);
        assert_eq!(out.moles, Some(0.5));
        assert_eq!(out.volume_l, Some(2.0));
        assert_eq!(out.concentration_g_l, None);
        assert_eq!(out.formula_used, MOLARITY_FORMULA);
    }

    #[test]
    fn molarity_prefers_moles_and_volume_over_other_sets() {
        let mut r = request(CalculationType::Molarity);
        r.moles = Some(1.0);
        r.volume_l = Some(4.0);
        r.molarity = Some(99.0);
        let input = ConcentrationInput::from_request(CalculationType::Molarity, &r).unwrap();
        assert!(matches!(
            input,
            ConcentrationInput::Molarity(MolarityInput::FromMolesVolume { .. })
        ));
        assert_relative_eq!(calculate(&r).unwrap().molarity.unwrap(), 0.25);
    }

    #[test]
    fn molarity_solves_volume_from_molarity_and_moles() {
        let mut r = request(CalculationType::Molarity);
        r.molarity = Some(0.5);
        r.moles = Some(0.25);
        let out = calculate(&r).unwrap();
        assert_relative_eq!(out.volume_l.unwrap(), 0.5);

        r.molarity = Some(0.0);
        assert_eq!(
            calculate(&r),
            Err(ConcentrationError::NonPositive {
                quantity: "The molarity"
            })
        );
    }

    #[test]
    fn molarity_from_mass_derives_mass_concentration() {
        let mut r = request(CalculationType::Molarity);
        r.mass_g = Some(58.5);
        r.molecular_weight = Some(58.5);
        r.volume_l = Some(1.0);
        let out = calculate(&r).unwrap();
        assert_relative_eq!(out.molarity.unwrap(), 1.0);
        assert_relative_eq!(out.moles.unwrap(), 1.0);
        assert_relative_eq!(out.concentration_g_l.unwrap(), 58.5);
        assert_eq!(out.concentration_mg_ml, out.concentration_g_l);
    }

    #[test]
    fn molarity_and_volume_give_moles() {
        let mut r = request(CalculationType::Molarity);
        r.molarity = Some(0.2);
        r.volume_l = Some(0.5);
        let input = ConcentrationInput::from_request(CalculationType::Molarity, &r).unwrap();
        assert!(matches!(
            input,
            ConcentrationInput::Molarity(MolarityInput::FromMolarityVolume { .. })
        ));
        let out = calculate(&r).unwrap();
        assert_relative_eq!(out.moles.unwrap(), 0.1);
        assert_eq!(out.molarity, Some(0.2));
        assert_eq!(out.volume_l, Some(0.5));
        assert_eq!(out.concentration_g_l, None);

        r.molecular_weight = Some(40.0);
        let out = calculate(&r).unwrap();
        assert_relative_eq!(out.concentration_g_l.unwrap(), 8.0);
        assert_relative_eq!(out.concentration_mg_ml.unwrap(), 8.0);
    }

    #[test]
    fn molecular_weight_adds_mass_concentration_to_moles_branch() {
        let mut r = request(CalculationType::Molarity);
        r.moles = Some(0.5);
        r.volume_l = Some(2.0);
        r.molecular_weight = Some(58.44);
        let out = calculate(&r).unwrap();
        assert_relative_eq!(out.molarity.unwrap(), 0.25);
        assert_relative_eq!(out.concentration_g_l.unwrap(), 14.61, max_relative = 1e-12);
        assert_eq!(out.concentration_mg_ml, out.concentration_g_l);
        assert_eq!(out.mass_g, None);
    }

    #[test]
    fn molarity_rejects_zero_volume_and_missing_sets() {
        let mut r = request(CalculationType::Molarity);
        r.molarity = Some(1.0);
        r.volume_l = Some(0.0);
        assert!(matches!(
            calculate(&r),
            Err(ConcentrationError::NonPositive { .. })
        ));

        let mut r = request(CalculationType::Molarity);
        r.mass_g = Some(10.0);
        r.volume_l = Some(1.0);
        let err = calculate(&r).unwrap_err();
        assert!(matches!(
            err,
            ConcentrationError::InsufficientParameters { .. }
        ));
        assert!(err.to_string().contains("molecular weight"));
    }

    #[test]
    fn molality_both_directions() {
        let mut r = request(CalculationType::Molality);
        r.moles = Some(2.0);
        r.kg_solvent = Some(0.5);
        assert_relative_eq!(calculate(&r).unwrap().molality.unwrap(), 4.0);

        let mut r = request(CalculationType::Molality);
        r.molality = Some(1.5);
        r.kg_solvent = Some(2.0);
        assert_relative_eq!(calculate(&r).unwrap().moles.unwrap(), 3.0);

        r.kg_solvent = Some(0.0);
        assert!(calculate(&r).is_err());
    }

    #[test]
    fn dilution_solves_missing_c1() {
        let mut r = request(CalculationType::Dilution);
        r.v1 = Some(10.0);
        r.c2 = Some(0.1);
        r.v2 = Some(100.0);
        let out = calculate(&r).unwrap();
        assert_relative_eq!(out.c1.unwrap(), 1.0);
        assert_eq!(out.v2, Some(100.0));
    }

    #[test]
    fn dilution_solves_missing_v2() {
        let mut r = request(CalculationType::Dilution);
        r.c1 = Some(2.0);
        r.v1 = Some(5.0);
        r.c2 = Some(0.5);
        assert_relative_eq!(calculate(&r).unwrap().v2.unwrap(), 20.0);
    }

    #[test]
    fn dilution_needs_exactly_three_values() {
        let mut r = request(CalculationType::Dilution);
        r.c1 = Some(1.0);
        r.v1 = Some(1.0);
        assert_eq!(
            calculate(&r),
            Err(ConcentrationError::DilutionArity { provided: 2 })
        );
        r.c2 = Some(1.0);
        r.v2 = Some(1.0);
        assert_eq!(
            calculate(&r),
            Err(ConcentrationError::DilutionArity { provided: 4 })
        );
    }

    #[test]
    fn dilution_rejects_zero_inputs() {
        let mut r = request(CalculationType::Dilution);
        r.c1 = Some(0.0);
        r.v1 = Some(1.0);
        r.c2 = Some(1.0);
        assert_eq!(calculate(&r), Err(ConcentrationError::NonPositiveDilution));
    }

    #[test]
    fn dilution_solves_missing_v1_and_c2() {
        let mut r = request(CalculationType::Dilution);
        r.c1 = Some(1.0);
        r.c2 = Some(0.25);
        r.v2 = Some(100.0);
        assert_relative_eq!(calculate(&r).unwrap().v1.unwrap(), 25.0);

        let mut r = request(CalculationType::Dilution);
        r.c1 = Some(1.0);
        r.v1 = Some(10.0);
        r.v2 = Some(50.0);
        assert_relative_eq!(calculate(&r).unwrap().c2.unwrap(), 0.2);
    }

    #[test]
    fn dilution_rejects_zero_inputs_when_solving_v1_or_c2() {
        let mut r = request(CalculationType::Dilution);
        r.c1 = Some(0.0);
        r.c2 = Some(1.0);
        r.v2 = Some(10.0);
        assert_eq!(calculate(&r), Err(ConcentrationError::NonPositiveDilution));

        let mut r = request(CalculationType::Dilution);
        r.c1 = Some(1.0);
        r.v1 = Some(10.0);
        r.v2 = Some(0.0);
        assert_eq!(calculate(&r), Err(ConcentrationError::NonPositiveDilution));
    }

    #[test]
    fn mass_volume_from_mass() {
        let mut r = request(CalculationType::MassVolume);
        r.mass_g = Some(5.0);
        r.volume_ml = Some(100.0);
        let out = calculate(&r).unwrap();
        assert_relative_eq!(out.concentration_mg_ml.unwrap(), 50.0);
        assert_relative_eq!(out.concentration_g_l.unwrap(), 50.0);
    }

    #[test]
    fn mass_volume_from_concentration() {
        let mut r = request(CalculationType::MassVolume);
        r.concentration_mg_ml = Some(2.0);
        r.volume_ml = Some(250.0);
        let out = calculate(&r).unwrap();
        assert_relative_eq!(out.mass_g.unwrap(), 0.5);
        assert_eq!(out.concentration_g_l, Some(2.0));
    }

    #[test]
    fn mass_volume_rejects_zero_volume() {
        let mut r = request(CalculationType::MassVolume);
        r.mass_g = Some(5.0);
        r.volume_ml = Some(0.0);
        assert_eq!(
            calculate(&r),
            Err(ConcentrationError::NonPositive {
                quantity: "The volume"
            })
        );

        let mut r = request(CalculationType::MassVolume);
        r.concentration_mg_ml = Some(2.0);
        r.volume_ml = Some(0.0);
        assert!(matches!(
            calculate(&r),
            Err(ConcentrationError::NonPositive { .. })
        ));
    }

    #[test]
    fn ppm_from_percentage_seed() {
        let mut r = request(CalculationType::Ppm);
        r.percentage = Some(0.25);
        r.concentration_mg_ml = Some(99.0);
        let input = ConcentrationInput::from_request(CalculationType::Ppm, &r).unwrap();
        assert_eq!(input, ConcentrationInput::Ppm(PpmInput::FromPercentage(0.25)));

        let out = calculate(&r).unwrap();
        assert_relative_eq!(out.ppm.unwrap(), 2500.0);
        assert_eq!(out.percentage, Some(0.25));
        assert_relative_eq!(out.concentration_mg_ml.unwrap(), 2.5);
        assert_eq!(out.notes, Some(DENSITY_NOTE));
    }

    #[test]
    fn ppm_seed_priority() {
        let mut r = request(CalculationType::Ppm);
        r.ppm = Some(1000.0);
        r.percentage = Some(50.0);
        let out = calculate(&r).unwrap();
        assert_relative_eq!(out.percentage.unwrap(), 0.1);
        assert_relative_eq!(out.concentration_mg_ml.unwrap(), 1.0);
        assert!(out.notes.is_some());

        let mut r = request(CalculationType::Ppm);
        r.concentration_mg_ml = Some(2.0);
        let out = calculate(&r).unwrap();
        assert_relative_eq!(out.ppm.unwrap(), 2000.0);
        assert_relative_eq!(out.percentage.unwrap(), 0.2);

        assert!(calculate(&request(CalculationType::Ppm)).is_err());
    }

    #[test]
    fn percentage_from_either_seed() {
        let mut r = request(CalculationType::Percentage);
        r.percentage = Some(0.9);
        let out = calculate(&r).unwrap();
        assert_relative_eq!(out.ppm.unwrap(), 9000.0);
        assert_relative_eq!(out.concentration_g_l.unwrap(), 9.0);

        let mut r = request(CalculationType::Percentage);
        r.ppm = Some(500.0);
        let out = calculate(&r).unwrap();
        assert_relative_eq!(out.percentage.unwrap(), 0.05);
        assert_relative_eq!(out.concentration_g_l.unwrap(), 0.5);

        assert!(calculate(&request(CalculationType::Percentage)).is_err());
    }

    #[test]
    fn lists_every_mode() {
        let types = calculation_types();
        assert_eq!(types.len(), 6);
        assert_eq!(types[3].value, "mass_volume");
    }
}
