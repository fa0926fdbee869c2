//! Common validation utilities.

use chrono::NaiveDate;
use validator::ValidationError;

use crate::month::MonthKey;

/// Reserved id of the synthetic Day-Use planner column.
pub const DAY_USE_COLUMN_ID: &str = "day-use";

/// Maximum length accepted for opaque record identifiers.
const MAX_ID_LENGTH: usize = 64;

lazy_static::lazy_static! {
    static ref HEX_COLOR_REGEX: regex::Regex =
        regex::Regex::new(r"^#[0-9A-Fa-f]{6}$").unwrap();
}

/// Validates an identification color in `#RRGGBB` form.
pub fn validate_hex_color(color: &str) -> Result<(), ValidationError> {
    if HEX_COLOR_REGEX.is_match(color) {
        Ok(())
    } else {
        let mut err = ValidationError::new("hex_color");
        err.message = Some("Color must be in #RRGGBB format".into());
        Err(err)
    }
}

/// Validates an identifier that may be written back to storage as a suite
/// reference. The synthetic Day-Use id is never a valid target.
pub fn validate_suite_id(id: &str) -> Result<(), ValidationError> {
    if id.trim().is_empty() || id.len() > MAX_ID_LENGTH {
        let mut err = ValidationError::new("suite_id_length");
        err.message = Some("Suite id must be 1-64 characters".into());
        return Err(err);
    }
    if id == DAY_USE_COLUMN_ID {
        let mut err = ValidationError::new("suite_id_reserved");
        err.message = Some("The Day-Use column cannot be used as a suite".into());
        return Err(err);
    }
    Ok(())
}

/// Validates a `yyyy-MM` month string.
pub fn validate_month(value: &str) -> Result<(), ValidationError> {
    value.parse::<MonthKey>().map(|_| ()).map_err(|e| {
        let mut err = ValidationError::new("month_format");
        err.message = Some(e.to_string().into());
        err
    })
}

/// Validates that a stay does not end before it starts.
pub fn validate_date_range(check_in: NaiveDate, check_out: NaiveDate) -> Result<(), ValidationError> {
    if check_out >= check_in {
        Ok(())
    } else {
        let mut err = ValidationError::new("date_range");
        err.message = Some("Check-out cannot be before check-in".into());
        Err(err)
    }
}
