//! Calendar-date parsing for observation tables.

use chrono::NaiveDate;

/// Parse an observation date cell.
///
/// Tries ISO `YYYY-MM-DD` first, then the slash-separated forms that show
/// up in spreadsheet exports: `YYYY/MM/DD` and `DD/MM/YYYY`.
pub fn parse_observation_date(s: &str) -> Result<NaiveDate, DateParseError> {
    let s = s.trim();

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d);
    }

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y/%m/%d") {
        return Ok(d);
    }

    if let Ok(d) = NaiveDate::parse_from_str(s, "%d/%m/%Y") {
        return Ok(d);
    }

    Err(DateParseError::InvalidFormat(s.to_string()))
}

#[derive(Debug, thiserror::Error)]
pub enum DateParseError {
    #[error("Invalid date format: {0}. Expected 'YYYY-MM-DD'")]
    InvalidFormat(String),
}
