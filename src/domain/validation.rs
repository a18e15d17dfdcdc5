//! Parsing and validation of user-entered fields.
//!
//! Each parser takes the raw line the user typed and either returns a clean
//! value or a [`LedgerError`] whose message is shown before re-prompting.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use crate::domain::error::LedgerError;
use crate::domain::transaction::Category;

pub const NON_POSITIVE_AMOUNT: &str = "Amount must be a non-negative non-zero value.";

/// Human-readable form of a chrono date format, e.g. `%d-%m-%Y` → `dd-mm-yyyy`.
pub fn describe_format(format: &str) -> String {
    format
        .replace("%d", "dd")
        .replace("%m", "mm")
        .replace("%Y", "yyyy")
        .replace("%y", "yy")
}

/// Parse a date typed by the user.
///
/// Empty input resolves to `default_today` when supplied; otherwise it is
/// rejected like any other malformed date.
pub fn parse_date(
    input: &str,
    format: &str,
    default_today: Option<NaiveDate>,
) -> Result<NaiveDate, LedgerError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        if let Some(today) = default_today {
            return Ok(today);
        }
    }
    NaiveDate::parse_from_str(trimmed, format).map_err(|_| LedgerError::InvalidDate {
        input: trimmed.to_string(),
        expected: describe_format(format),
    })
}

/// Parse a strictly positive amount, rounded to cents.
pub fn parse_amount(input: &str) -> Result<Decimal, LedgerError> {
    let trimmed = input.trim();
    let value = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| LedgerError::InvalidAmount {
            reason: format!("'{trimmed}' is not a number"),
        })?;
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded <= Decimal::ZERO {
        return Err(LedgerError::InvalidAmount {
            reason: NON_POSITIVE_AMOUNT.into(),
        });
    }
    Ok(rounded)
}

pub fn parse_category(input: &str) -> Result<Category, LedgerError> {
    Category::from_code(input).ok_or_else(|| LedgerError::InvalidCategory {
        input: input.trim().to_string(),
    })
}

pub fn parse_description(input: &str) -> String {
    input.trim().to_string()
}

/// Reject ranges whose end precedes their start.
pub fn check_range(start: NaiveDate, end: NaiveDate) -> Result<(), LedgerError> {
    if start > end {
        return Err(LedgerError::InvalidRange { start, end });
    }
    Ok(())
}
