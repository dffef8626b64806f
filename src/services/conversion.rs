use log::debug;

use crate::chemistry::MILLI_PER_UNIT;
use crate::error::ConversionError;
use crate::models::{ConversionRequest, ConversionResult, UnitType};

/// One directed conversion between two units of the same kind.
struct Rule {
    unit_type: UnitType,
    from: &'static str,
    to: &'static str,
    apply: fn(f64) -> f64,
}

// Each direction is its own entry; nothing is inverted automatically.
const RULES: &[Rule] = &[
    Rule {
        unit_type: UnitType::Mass,
        from: "grams",
        to: "kilograms",
        apply: |x| x / MILLI_PER_UNIT,
    },
    Rule {
        unit_type: UnitType::Mass,
        from: "kilograms",
        to: "grams",
        apply: |x| x * MILLI_PER_UNIT,
    },
    Rule {
        unit_type: UnitType::Temperature,
        from: "celsius",
        to: "fahrenheit",
        apply: |x| x * 9.0 / 5.0 + 32.0,
    },
    Rule {
        unit_type: UnitType::Temperature,
        from: "fahrenheit",
        to: "celsius",
        apply: |x| (x - 32.0) * 5.0 / 9.0,
    },
    Rule {
        unit_type: UnitType::Volume,
        from: "liters",
        to: "milliliters",
        apply: |x| x * MILLI_PER_UNIT,
    },
    Rule {
        unit_type: UnitType::Volume,
        from: "milliliters",
        to: "liters",
        apply: |x| x / MILLI_PER_UNIT,
    },
];

/// Convert `request.value` between two units of `request.unit_type`.
///
/// Equal units short-circuit to the input value without consulting the
/// table, so any unit name converts to itself.
pub fn convert(request: &ConversionRequest) -> Result<ConversionResult, ConversionError> {
    let converted_value = if request.from_unit == request.to_unit {
        request.value
    } else {
        let rule = RULES
            .iter()
            .find(|r| {
                r.unit_type == request.unit_type
                    && r.from == request.from_unit
                    && r.to == request.to_unit
            })
            .ok_or_else(|| ConversionError::UnsupportedPair {
                from_unit: request.from_unit.clone(),
                to_unit: request.to_unit.clone(),
                unit_type: request.unit_type.as_str().to_string(),
            })?;
        (rule.apply)(request.value)
    };

    debug!(
        "converted {} {} -> {} {} ({})",
        request.value, request.from_unit, converted_value, request.to_unit, request.unit_type
    );

    Ok(ConversionResult {
        original_value: request.value,
        converted_value,
        from_unit: request.from_unit.clone(),
        to_unit: request.to_unit.clone(),
        unit_type: request.unit_type,
    })
}

/// Sorted unit names known for `unit_type`.
pub fn available_units(unit_type: UnitType) -> Vec<&'static str> {
    let mut units: Vec<&'static str> = RULES
        .iter()
        .filter(|r| r.unit_type == unit_type)
        .flat_map(|r| [r.from, r.to])
        .collect();
    units.sort_unstable();
    units.dedup();
    units
}

/// Unit types that have at least one registered conversion.
pub fn unit_types() -> Vec<UnitType> {
    let mut types: Vec<UnitType> = RULES.iter().map(|r| r.unit_type).collect();
    types.sort_unstable();
    types.dedup();
    types
}
