use chrono::{Datelike, NaiveDate};
use crate::error::ParseError;

/// Parses an "M/D/YY" string into a calendar date (YY is read as 20YY)
pub fn parse_date(text: &str) -> Result<NaiveDate, ParseError> {
    let trimmed = text.trim();
    let parts: Vec<&str> = trimmed.split('/').collect();
    if parts.len() != 3 {
        return Err(ParseError::WrongPartCount {
            input: trimmed.to_string(),
            found: parts.len(),
        });
    }

    let mut numbers = [0u32; 3];
    for (slot, part) in numbers.iter_mut().zip(&parts) {
        let part = part.trim();
        // `parse` would accept a leading '+', the sheet never produces one
        if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
            return Err(ParseError::NotNumeric {
                input: trimmed.to_string(),
                part: part.to_string(),
            });
        }
        *slot = part.parse().map_err(|_| ParseError::NotNumeric {
            input: trimmed.to_string(),
            part: part.to_string(),
        })?;
    }

    if parts[2].trim().len() > 2 {
        return Err(ParseError::YearOutOfRange {
            input: trimmed.to_string(),
        });
    }

    let [month, day, year] = numbers;
    NaiveDate::from_ymd_opt(2000 + year as i32, month, day).ok_or_else(|| ParseError::Impossible {
        input: trimmed.to_string(),
    })
}

/// Parses a comma-separated availability field ("6/1/16, 6/2/16")
/// Empty tokens are skipped; duplicates and listing order are kept
pub fn parse_date_list(field: &str) -> Result<Vec<NaiveDate>, ParseError> {
    field
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(parse_date)
        .collect()
}

/// Formats a date as "M/D" (no year), used for waitlist availability
pub fn format_date(date: NaiveDate) -> String {
    format!("{}/{}", date.month(), date.day())
}

/// Formats a date as "M/D/YY", the same shape `parse_date` accepts
pub fn format_full_date(date: NaiveDate) -> String {
    format!("{}/{}/{:02}", date.month(), date.day(), date.year() % 100)
}

/// Calendar-date equality
pub fn same_date(a: NaiveDate, b: NaiveDate) -> bool {
    a == b
}
