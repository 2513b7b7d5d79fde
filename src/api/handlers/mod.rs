pub mod health;
pub mod profile;
pub mod conference;
pub mod registration;
pub mod session;
pub mod speaker;
pub mod wishlist;
pub mod notice;

use chrono::{NaiveDate, NaiveTime};
use crate::error::AppError;

/// Reads the leading `YYYY-MM-DD`, so full timestamps are accepted too.
pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed.get(..10).unwrap_or(trimmed), "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("Invalid date format (YYYY-MM-DD): {}", raw)))
}

pub(crate) fn parse_optional_date(raw: Option<&str>) -> Result<Option<NaiveDate>, AppError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => parse_date(s).map(Some),
        None => Ok(None),
    }
}

/// Accepts `HH:MM` and the compact `HHMM`.
pub(crate) fn parse_time(raw: &str) -> Result<NaiveTime, AppError> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H%M"))
        .map_err(|_| AppError::Validation(format!("Invalid time format (HH:MM): {}", raw)))
}
