//! Chemistry module: constants and small numeric helpers shared by the engines.
//!
//! Units conventions:
//! - Volumes are litres (`_l`) or millilitres (`_ml`) as the field name says
//! - Mass concentrations are mg/mL or g/L; both share the same numeric value
//! - ppm and percentage are mass ratios; ppm ↔ mg/mL assumes a solution
//!   density of about 1 g/mL
//! - Neubauer quadrant volumes are in mm³
//!
//! # Panics
//! None of the functions panic.

/// Grams in a kilogram, millilitres in a litre.
pub const MILLI_PER_UNIT: f64 = 1000.0;
/// mm³ in one mL; scales a Neubauer count from mm³ to mL.
pub const MM3_PER_ML: f64 = 1000.0;

/// ppm in one percent.
pub const PPM_PER_PERCENT: f64 = 10_000.0;
/// ppm corresponding to 1 mg/mL (density ≈ 1).
pub const PPM_PER_MG_ML: f64 = 1000.0;
/// g/L corresponding to 1 % (w/v).
pub const G_L_PER_PERCENT: f64 = 10.0;

/// Lowest effective concentration (mol/L) the pH engine works with.
pub const MIN_CONCENTRATION: f64 = 1e-12;
/// Highest effective concentration (mol/L) accepted by the pH engine.
pub const MAX_CONCENTRATION: f64 = 1e2;
/// Ion product of water at 25 °C.
pub const DEFAULT_KW: f64 = 1e-14;
pub const DEFAULT_EQUIVALENTS: f64 = 1.0;
/// pH + pOH for the default Kw.
pub const PH_SCALE_MAX: f64 = 14.0;
pub const VERY_DILUTE_NOTE: &str =
    "The solution is very dilute; the contribution of pure water is taken into account.";

/// Round `x` to `digits` decimal places.
pub fn round_to(x: f64, digits: i32) -> f64 {
    let f = 10f64.powi(digits);
    (x * f).round() / f
}

/// Moles from a mass (g) and a molar mass (g/mol).
pub fn moles_from_mass(mass_g: f64, molecular_weight: f64) -> f64 {
    mass_g / molecular_weight
}

pub fn ppm_from_percentage(percentage: f64) -> f64 {
    percentage * PPM_PER_PERCENT
}

pub fn percentage_from_ppm(ppm: f64) -> f64 {
    ppm / PPM_PER_PERCENT
}

pub fn mg_ml_from_ppm(ppm: f64) -> f64 {
    ppm / PPM_PER_MG_ML
}

pub fn ppm_from_mg_ml(mg_ml: f64) -> f64 {
    mg_ml * PPM_PER_MG_ML
}
