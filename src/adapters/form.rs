//! Form adapter: turns submitted field values (name → raw text) into typed
//! requests for the engines.
//!
//! Field names per tool:
//! - conversion: `value`, `from_unit`, `to_unit`, `unit_type`
//! - concentration: `calculation_type` plus the quantity fields of the mode
//! - neubauer: `num_quadrants`, `quadrant_volume`, `dilution_factor`,
//!   `cell_count_1` … `cell_count_N`
//! - ph: `calculation_type`, `concentration_m`, `equivalents`, `kw`
//!
//! Fields that do not belong to the selected mode are never read.

use std::collections::BTreeMap;

use log::error;

use crate::error::AppError;
use crate::models::{
    CalculationType, ConcentrationRequest, ConcentrationResult, ConversionRequest,
    ConversionResult, NeubauerRequest, NeubauerResult, PhCalculationType, PhRequest, PhResult,
    Settings, UnitType,
};
use crate::services::{concentration, conversion, neubauer, ph};
use crate::validators::{
    parse_cell_count, parse_optional_number, parse_required_integer, parse_required_number,
    parse_required_text,
};

/// Submitted form data. Missing fields read as empty text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Form {
    fields: BTreeMap<String, String>,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    fn optional(&self, name: &str) -> Result<Option<f64>, AppError> {
        Ok(parse_optional_number(self.get(name), name)?)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Form {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

pub fn conversion_request(form: &Form) -> Result<ConversionRequest, AppError> {
    let raw_value = parse_required_text(form.get("value"), "value")?;
    let from_unit = parse_required_text(form.get("from_unit"), "from unit")?;
    let to_unit = parse_required_text(form.get("to_unit"), "to unit")?;
    let unit_type: UnitType = parse_required_text(form.get("unit_type"), "unit type")?.parse()?;
    let value = parse_required_number(&raw_value, "value")?;

    Ok(ConversionRequest {
        value,
        from_unit,
        to_unit,
        unit_type,
    })
}

pub fn concentration_request(form: &Form) -> Result<ConcentrationRequest, AppError> {
    let calculation_type: CalculationType =
        parse_required_text(form.get("calculation_type"), "calculation type")?.parse()?;
    let mut req = ConcentrationRequest::new(calculation_type);

    match calculation_type {
        CalculationType::Molarity => {
            req.moles = form.optional("moles")?;
            req.volume_l = form.optional("volume_l")?;
            req.molarity = form.optional("molarity")?;
            req.mass_g = form.optional("mass_g")?;
            req.molecular_weight = form.optional("molecular_weight")?;
        }
        CalculationType::Molality => {
            req.moles = form.optional("moles")?;
            req.kg_solvent = form.optional("kg_solvent")?;
            req.molality = form.optional("molality")?;
        }
        CalculationType::Dilution => {
            req.c1 = form.optional("c1")?;
            req.v1 = form.optional("v1")?;
            req.c2 = form.optional("c2")?;
            req.v2 = form.optional("v2")?;
        }
        CalculationType::MassVolume => {
            req.mass_g = form.optional("mass_g")?;
            req.volume_ml = form.optional("volume_ml")?;
            req.concentration_mg_ml = form.optional("concentration_mg_ml")?;
        }
        CalculationType::Ppm => {
            req.ppm = form.optional("ppm")?;
            req.percentage = form.optional("percentage")?;
            req.concentration_mg_ml = form.optional("concentration_mg_ml")?;
        }
        CalculationType::Percentage => {
            req.percentage = form.optional("percentage")?;
            req.ppm = form.optional("ppm")?;
        }
    }
    Ok(req)
}

/// Reads one `cell_count_<i>` field per quadrant, `i` starting at 1.
pub fn neubauer_request(form: &Form) -> Result<NeubauerRequest, AppError> {
    let num_quadrants = parse_required_integer(form.get("num_quadrants"), "number of quadrants")?;
    let quadrant_volume = parse_required_number(form.get("quadrant_volume"), "quadrant volume")?;
    let dilution_factor = parse_required_number(form.get("dilution_factor"), "dilution factor")?;

    let cell_counts = (1..=num_quadrants)
        .map(|i| {
            parse_cell_count(
                form.get(&format!("cell_count_{i}")),
                &format!("cell count of quadrant {i}"),
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(NeubauerRequest {
        num_quadrants,
        quadrant_volume,
        dilution_factor,
        cell_counts,
    })
}

/// Empty `equivalents` and `kw` fields fall back to `settings`.
pub fn ph_request(form: &Form, settings: &Settings) -> Result<PhRequest, AppError> {
    let calculation_type: PhCalculationType =
        parse_required_text(form.get("calculation_type"), "calculation type")?.parse()?;
    let concentration_m = parse_required_number(form.get("concentration_m"), "concentration")?;
    let equivalents = parse_optional_number(form.get("equivalents"), "equivalents")?
        .unwrap_or(settings.default_equivalents);
    let kw = parse_optional_number(form.get("kw"), "ion product of water")?
        .unwrap_or(settings.default_kw);

    Ok(PhRequest {
        calculation_type,
        concentration_m: Some(concentration_m),
        equivalents: Some(equivalents),
        kw: Some(kw),
    })
}

/// An engine handing back `inf` or `NaN` from finite inputs is not a user
/// mistake; report it as an unexpected failure.
fn ensure_finite(tool: &str, values: &[Option<f64>]) -> Result<(), AppError> {
    if values.iter().flatten().all(|v| v.is_finite()) {
        Ok(())
    } else {
        error!("{tool} produced a non-finite value: {values:?}");
        Err(AppError::Other(format!("non-finite {tool} result")))
    }
}

pub fn run_conversion(form: &Form) -> Result<ConversionResult, AppError> {
    let out = conversion::convert(&conversion_request(form)?)?;
    ensure_finite("conversion", &[Some(out.converted_value)])?;
    Ok(out)
}

pub fn run_concentration(form: &Form) -> Result<ConcentrationResult, AppError> {
    let out = concentration::calculate(&concentration_request(form)?)?;
    ensure_finite(
        "concentration",
        &[
            out.molarity,
            out.molality,
            out.moles,
            out.volume_l,
            out.volume_ml,
            out.kg_solvent,
            out.mass_g,
            out.c1,
            out.v1,
            out.c2,
            out.v2,
            out.concentration_mg_ml,
            out.concentration_g_l,
            out.ppm,
            out.percentage,
        ],
    )?;
    Ok(out)
}

pub fn run_neubauer(form: &Form) -> Result<NeubauerResult, AppError> {
    Ok(neubauer::calculate_concentration(&neubauer_request(form)?)?)
}

pub fn run_ph(form: &Form, settings: &Settings) -> Result<PhResult, AppError> {
    let out = ph::calculate(&ph_request(form, settings)?)?;
    ensure_finite("pH", &[Some(out.hydronium), Some(out.hydroxide)])?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CalcError, GENERIC_FAILURE_MESSAGE, ValidationError};

    fn form(pairs: &[(&str, &str)]) -> Form {
        pairs.iter().copied().collect()
    }

    #[test]
    fn conversion_form_is_parsed_and_converted() {
        let f = form(&[
            ("value", " 1500 "),
            ("from_unit", "grams"),
            ("to_unit", "kilograms"),
            ("unit_type", "mass"),
        ]);
        let out = run_conversion(&f).unwrap();
        assert_eq!(out.converted_value, 1.5);
    }

    #[test]
    fn overflowing_conversion_is_an_unexpected_failure() {
        let f = form(&[
            ("value", "1e308"),
            ("from_unit", "kilograms"),
            ("to_unit", "grams"),
            ("unit_type", "mass"),
        ]);
        let err = run_conversion(&f).unwrap_err();
        assert!(matches!(err, AppError::Other(_)));
        assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn overflowing_concentration_is_an_unexpected_failure() {
        let f = form(&[
            ("calculation_type", "mass_volume"),
            ("mass_g", "1e308"),
            ("volume_ml", "1e-10"),
        ]);
        assert!(matches!(run_concentration(&f), Err(AppError::Other(_))));
    }

    #[test]
    fn unknown_unit_type_is_a_shell_error() {
        let f = form(&[
            ("value", "1"),
            ("from_unit", "grams"),
            ("to_unit", "kilograms"),
            ("unit_type", "weight"),
        ]);
        assert!(matches!(run_conversion(&f), Err(AppError::UnknownToken(_))));
    }

    #[test]
    fn missing_conversion_field_is_named() {
        let f = form(&[("value", "1"), ("to_unit", "grams"), ("unit_type", "mass")]);
        let err = run_conversion(&f).unwrap_err();
        assert!(matches!(
            err,
            AppError::Calc(CalcError::Validation(ValidationError::Required { .. }))
        ));
        assert!(err.user_message().contains("from unit"));
    }

    #[test]
    fn concentration_ignores_fields_of_other_modes() {
        let f = form(&[
            ("calculation_type", "molality"),
            ("moles", "1"),
            ("kg_solvent", "2"),
            ("c1", "not a number"),
        ]);
        let req = concentration_request(&f).unwrap();
        assert_eq!(req.c1, None);
        assert_eq!(run_concentration(&f).unwrap().molality, Some(0.5));
    }

    #[test]
    fn concentration_rejects_negative_fields() {
        let f = form(&[("calculation_type", "ppm"), ("ppm", "-5")]);
        assert!(matches!(
            run_concentration(&f),
            Err(AppError::Calc(CalcError::Validation(
                ValidationError::Negative { .. }
            )))
        ));
    }

    #[test]
    fn neubauer_reads_one_count_per_quadrant() {
        let f = form(&[
            ("num_quadrants", "2"),
            ("quadrant_volume", "0.1"),
            ("dilution_factor", "2"),
            ("cell_count_1", "10"),
            ("cell_count_2", "30"),
            ("cell_count_3", "999"),
        ]);
        let req = neubauer_request(&f).unwrap();
        assert_eq!(req.cell_counts, vec![10, 30]);
        assert_eq!(run_neubauer(&f).unwrap().total_cells, 40);
    }

    #[test]
    fn neubauer_names_the_bad_quadrant() {
        let f = form(&[
            ("num_quadrants", "2"),
            ("quadrant_volume", "0.1"),
            ("dilution_factor", "1"),
            ("cell_count_1", "10"),
        ]);
        let err = neubauer_request(&f).unwrap_err();
        assert!(err.user_message().contains("quadrant 2"), "{err}");
    }

    #[test]
    fn ph_uses_settings_for_blank_fields() {
        let f = form(&[
            ("calculation_type", "strong_acid"),
            ("concentration_m", "0.001"),
            ("equivalents", ""),
        ]);
        let settings = Settings {
            default_kw: 1e-14,
            default_equivalents: 2.0,
        };
        let req = ph_request(&f, &settings).unwrap();
        assert_eq!(req.equivalents, Some(2.0));
        assert_eq!(req.kw, Some(1e-14));
        assert!((run_ph(&f, &settings).unwrap().hydronium - 0.002).abs() < 1e-15);
    }

    #[test]
    fn ph_domain_errors_pass_through() {
        let f = form(&[("calculation_type", "strong_base"), ("concentration_m", "0")]);
        let err = run_ph(&f, &Settings::default()).unwrap_err();
        assert_eq!(
            err.user_message(),
            "The concentration must be greater than zero"
        );
    }
}
