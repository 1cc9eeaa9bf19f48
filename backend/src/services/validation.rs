//! Boundary validation for queue and date path parameters.
//!
//! Messages are user-facing and stay in Ukrainian, matching the rest of
//! the public API.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::QueueId;

static DATE_FORMAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("DATE_FORMAT should compile - this is a bug")
});

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Невірний формат черги. Використовуйте: 1.1 - 6.2")]
    InvalidQueue(String),
    #[error("Невірний формат дати. Використовуйте: YYYY-MM-DD")]
    InvalidDate(String),
}

impl ValidationError {
    /// The rejected input.
    pub fn input(&self) -> &str {
        match self {
            Self::InvalidQueue(raw) | Self::InvalidDate(raw) => raw,
        }
    }
}

/// Accept `1.1` through `6.2`.
pub fn parse_queue(raw: &str) -> Result<QueueId, ValidationError> {
    raw.parse()
        .map_err(|_| ValidationError::InvalidQueue(raw.to_string()))
}

/// Accept `YYYY-MM-DD` naming a real calendar date.
///
/// Single-digit months or days (`2026-1-5`) are rejected even though
/// they would parse.
pub fn parse_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    if !DATE_FORMAT.is_match(raw) {
        return Err(ValidationError::InvalidDate(raw.to_string()));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(raw.to_string()))
}
