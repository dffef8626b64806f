//! pH of strong acid and strong base solutions.
//!
//! Strong electrolytes dissociate completely, so the ion concentration is the
//! molar concentration times the number of equivalents. The counter-ion
//! follows from the ion product of water, `Kw = [H3O+][OH-]`.
//!
//! Design notes:
//! - Concentrations below `MIN_CONCENTRATION` are clamped and flagged with a
//!   note instead of failing
//! - pH is clamped into [0, 14] and rounded to 4 decimals; pOH is then taken
//!   as `14 - pH` from the rounded value, so `ph + poh == 14.0` holds exactly
//! - The returned `hydronium`/`hydroxide` are the unclamped ion concentrations

use log::{debug, info};

use crate::chemistry::*;
use crate::error::PhError;
use crate::models::{PhCalculationType, PhRequest, PhResult, TypeOption};

const ACID_FORMULA: &str = "pH = -log10([H3O+])";
const BASE_FORMULA: &str = "pOH = -log10([OH-])";

struct Species {
    hydronium: f64,
    hydroxide: f64,
    formula: &'static str,
}

/// pH, pOH and ion concentrations of a strong acid or strong base solution.
///
/// `concentration_m` must be present and positive, `equivalents` positive.
/// A missing or non-positive `kw` falls back to [`DEFAULT_KW`]. An effective
/// concentration (`concentration_m * equivalents`) above `MAX_CONCENTRATION`
/// is rejected; one below `MIN_CONCENTRATION` is raised to it and the result
/// carries a note.
///
/// # Errors
/// - [`PhError::MissingConcentration`], [`PhError::NonPositiveConcentration`]
///   and [`PhError::NonPositiveEquivalents`] for invalid inputs
/// - [`PhError::ConcentrationTooHigh`] past the supported range
/// - [`PhError::IonicEquilibrium`] if either ion concentration is not positive
pub fn calculate(req: &PhRequest) -> Result<PhResult, PhError> {
    let (concentration, equivalents) = validate(req)?;
    let kw = normalize_kw(req.kw);
    let (effective, notes) = effective_concentration(concentration, equivalents)?;

    let species = match req.calculation_type {
        PhCalculationType::StrongAcid => strong_acid(effective, kw),
        PhCalculationType::StrongBase => strong_base(effective, kw),
    };
    if !(species.hydronium > 0.0 && species.hydroxide > 0.0) {
        return Err(PhError::IonicEquilibrium);
    }

    // Round first: 14 - x with x on the 4-decimal grid sums back to 14 exactly.
    let ph = round_to((-species.hydronium.log10()).clamp(0.0, PH_SCALE_MAX), 4);
    let poh = PH_SCALE_MAX - ph;

    debug!(
        "{}: [H3O+]={} [OH-]={} pH={ph}",
        req.calculation_type, species.hydronium, species.hydroxide
    );

    Ok(PhResult {
        calculation_type: req.calculation_type,
        ph,
        poh,
        hydronium: species.hydronium,
        hydroxide: species.hydroxide,
        formula_used: species.formula,
        notes,
    })
}

fn validate(req: &PhRequest) -> Result<(f64, f64), PhError> {
    let concentration = req.concentration_m.ok_or(PhError::MissingConcentration)?;
    if !(concentration > 0.0) {
        return Err(PhError::NonPositiveConcentration);
    }
    match req.equivalents {
        Some(eq) if eq > 0.0 => Ok((concentration, eq)),
        _ => Err(PhError::NonPositiveEquivalents),
    }
}

fn normalize_kw(kw: Option<f64>) -> f64 {
    match kw {
        Some(kw) if kw > 0.0 => kw,
        _ => {
            info!("using default Kw {DEFAULT_KW}");
            DEFAULT_KW
        }
    }
}

fn effective_concentration(
    concentration: f64,
    equivalents: f64,
) -> Result<(f64, Option<&'static str>), PhError> {
    let effective = concentration * equivalents;
    if effective > MAX_CONCENTRATION {
        return Err(PhError::ConcentrationTooHigh);
    }
    if effective < MIN_CONCENTRATION {
        info!("effective concentration {effective} clamped to {MIN_CONCENTRATION}");
        return Ok((MIN_CONCENTRATION, Some(VERY_DILUTE_NOTE)));
    }
    Ok((effective, None))
}

fn strong_acid(effective: f64, kw: f64) -> Species {
    Species {
        hydronium: effective,
        hydroxide: kw / effective,
        formula: ACID_FORMULA,
    }
}

fn strong_base(effective: f64, kw: f64) -> Species {
    Species {
        hydronium: kw / effective,
        hydroxide: effective,
        formula: BASE_FORMULA,
    }
}

/// Ion product of water at 25 °C, used when a request gives no usable Kw.
pub fn default_kw() -> f64 {
    DEFAULT_KW
}

/// pH solution types with their menu labels.
pub fn calculation_types() -> Vec<TypeOption> {
    PhCalculationType::ALL
        .iter()
        .map(|t| TypeOption {
            value: t.as_str(),
            label: t.label(),
        })
        .collect()
}
