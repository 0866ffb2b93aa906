use crate::domain::errors::ValidationError;
use crate::domain::prediction::types::PredictionRequest;
use chrono::{Datelike, Local};
use serde_json::{Map, Value};
use std::num::IntErrorKind;

/// Every key a prediction request must carry, in the order they are checked.
pub const REQUIRED_FIELDS: [&str; 8] = [
    "u10", "v10", "u100", "v100", "hour", "day", "month", "year",
];

pub const MIN_YEAR: i64 = 1900;

/// Validator for raw prediction payloads.
///
/// Rejects the request as a unit: the first failing check wins and nothing is
/// derived from a partially valid payload. The only input besides the payload
/// is the current year, which bounds `year` from above.
#[derive(Debug, Clone, Copy)]
pub struct InputValidator {
    current_year: i32,
}

impl InputValidator {
    pub fn new(current_year: i32) -> Self {
        Self { current_year }
    }

    /// Validator bounded by the local calendar year.
    pub fn for_today() -> Self {
        Self::new(Local::now().year())
    }

    pub fn current_year(&self) -> i32 {
        self.current_year
    }

    pub fn validate(&self, payload: &Value) -> Result<PredictionRequest, ValidationError> {
        let fields = payload
            .as_object()
            .ok_or_else(|| ValidationError::FormatError {
                detail: format!("expected a JSON object, got {}", json_kind(payload)),
            })?;

        for field in REQUIRED_FIELDS {
            if !fields.contains_key(field) {
                return Err(ValidationError::MissingField { field });
            }
        }

        let u10 = numeric(fields, "u10")?;
        let v10 = numeric(fields, "v10")?;
        let u100 = numeric(fields, "u100")?;
        let v100 = numeric(fields, "v100")?;

        let hour = ranged(fields, "hour", "Hour", 0, 23)?;
        let day = ranged(fields, "day", "Day", 1, 31)?;
        let month = ranged(fields, "month", "Month", 1, 12)?;
        let year = ranged(fields, "year", "Year", MIN_YEAR, i64::from(self.current_year))?;

        // In-range values fit the narrower types
        Ok(PredictionRequest {
            u10,
            v10,
            u100,
            v100,
            hour: hour as u32,
            day: day as u32,
            month: month as u32,
            year: year as i32,
        })
    }
}

/// Validate against today's date.
pub fn validate(payload: &Value) -> Result<PredictionRequest, ValidationError> {
    InputValidator::for_today().validate(payload)
}

fn numeric(fields: &Map<String, Value>, field: &'static str) -> Result<f64, ValidationError> {
    match fields.get(field) {
        Some(Value::Number(n)) => n.as_f64().ok_or(ValidationError::TypeError { field }),
        _ => Err(ValidationError::TypeError { field }),
    }
}

fn ranged(
    fields: &Map<String, Value>,
    field: &'static str,
    label: &'static str,
    min: i64,
    max: i64,
) -> Result<i64, ValidationError> {
    let value = match fields.get(field) {
        Some(raw) => coerce_integer(field, raw)?,
        None => return Err(ValidationError::MissingField { field }),
    };
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::RangeError {
            field,
            label,
            min,
            max,
        })
    }
}

/// Integer coercion for calendar fields.
///
/// Integers pass through, reals truncate toward zero, strings must hold a
/// base-10 integer. Integral values beyond `i64` saturate so they fail the
/// range check rather than the format check. Anything else is a format error.
fn coerce_integer(field: &str, value: &Value) -> Result<i64, ValidationError> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            match n.as_f64() {
                // `as` saturates at the i64 bounds
                Some(f) if f.is_finite() => Ok(f.trunc() as i64),
                _ => Err(ValidationError::FormatError {
                    detail: format!("{field} value {n} cannot be converted to an integer"),
                }),
            }
        }
        Value::String(s) => match s.trim().parse::<i64>() {
            Ok(i) => Ok(i),
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow => Ok(i64::MAX),
                IntErrorKind::NegOverflow => Ok(i64::MIN),
                _ => Err(ValidationError::FormatError {
                    detail: format!("invalid integer literal for {field}: {s:?} ({e})"),
                }),
            },
        },
        other => Err(ValidationError::FormatError {
            detail: format!("{field} must be an integer, got {}", json_kind(other)),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
