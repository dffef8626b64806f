//! Parsing of raw form text into checked values.
//!
//! Every function trims surrounding whitespace first and reports failures as
//! [`ValidationError`] carrying the field name, so the shell can show the
//! message as is.

use crate::error::ValidationError;

/// Parse a required, finite, non-negative number.
pub fn parse_required_number(raw: &str, field: &str) -> Result<f64, ValidationError> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(ValidationError::Empty {
            field: field.to_string(),
        });
    }
    let value: f64 = s
        .parse()
        .ok()
        .filter(|v: &f64| v.is_finite())
        .ok_or_else(|| ValidationError::NotANumber {
            field: field.to_string(),
        })?;
    if value < 0.0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }
    Ok(value)
}

/// Like [`parse_required_number`], but an empty field yields `None`.
pub fn parse_optional_number(raw: &str, field: &str) -> Result<Option<f64>, ValidationError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_required_number(raw, field).map(Some)
}

/// Parse a required, strictly positive whole number.
pub fn parse_required_integer(raw: &str, field: &str) -> Result<i64, ValidationError> {
    let value = parse_integer(raw, field)?;
    if value <= 0 {
        return Err(ValidationError::NotPositive {
            field: field.to_string(),
        });
    }
    Ok(value)
}

/// Parse a cell count: a required whole number that may be zero.
pub fn parse_cell_count(raw: &str, field: &str) -> Result<i64, ValidationError> {
    let value = parse_integer(raw, field)?;
    if value < 0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }
    Ok(value)
}

pub fn parse_required_text(raw: &str, field: &str) -> Result<String, ValidationError> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(s.to_string())
}

fn parse_integer(raw: &str, field: &str) -> Result<i64, ValidationError> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(ValidationError::Empty {
            field: field.to_string(),
        });
    }
    s.parse().map_err(|_| ValidationError::NotAnInteger {
        field: field.to_string(),
    })
}
