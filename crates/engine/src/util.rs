//! Internal helpers for model validation and conversion.
//!
//! These utilities are **not** part of the public API. They centralize
//! validation and mapping logic so the engine enforces consistent invariants.

use chrono::{DateTime, NaiveDate};
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

/// Trim a required text field, rejecting empty and over-long values.
pub(crate) fn normalize_required_text(
    value: &str,
    field: &'static str,
    max_chars: usize,
) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidField {
            field,
            reason: "must not be empty".to_string(),
        });
    }
    ensure_max_chars(trimmed, field, max_chars)?;
    Ok(trimmed.to_string())
}

/// Trim an optional text field. Whitespace-only input collapses to `None`.
pub(crate) fn normalize_bounded_text(
    value: &str,
    field: &'static str,
    max_chars: usize,
) -> ResultEngine<Option<String>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    ensure_max_chars(trimmed, field, max_chars)?;
    Ok(Some(trimmed.to_string()))
}

fn ensure_max_chars(value: &str, field: &'static str, max_chars: usize) -> ResultEngine<()> {
    if value.chars().count() > max_chars {
        return Err(EngineError::InvalidField {
            field,
            reason: format!("must be at most {max_chars} characters"),
        });
    }
    Ok(())
}

/// Parse an entry date. Accepts a plain `YYYY-MM-DD` date or an RFC 3339
/// timestamp, which is reduced to its UTC calendar date.
pub(crate) fn parse_entry_date(raw: &str) -> ResultEngine<NaiveDate> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(stamp.to_utc().date_naive());
    }
    Err(EngineError::InvalidField {
        field: "entryDate",
        reason: "expected a YYYY-MM-DD date".to_string(),
    })
}

/// Parse a UUID from storage and return a labeled error on failure.
pub(crate) fn parse_uuid(value: &str, label: &'static str) -> ResultEngine<Uuid> {
    Uuid::parse_str(value).map_err(|_| EngineError::NotFound(label))
}
