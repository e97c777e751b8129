//! Turning what the user types in a grid cell into a duration.
//!
//! Single-cell bounds are enforced here, before the ledger sees the value.
use super::time_entry::FULL_DAY;
use crate::error::InputError;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parses the text of a timesheet cell.
///
/// - empty (or blank) text clears the cell and yields `0`;
/// - a decimal between 0 and 1 is accepted as is, with `.` or `,` as separator;
/// - anything else is rejected and the cell must keep its previous value.
pub fn parse_cell_input(text: &str) -> Result<Decimal, InputError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Decimal::ZERO);
    }
    let value = parse_decimal(trimmed)?;
    if value < Decimal::ZERO || value > FULL_DAY {
        return Err(InputError::OutOfRange(trimmed.to_string()));
    }
    Ok(value)
}

/// Parses a decimal number, accepting a comma as the decimal separator.
pub fn parse_decimal(text: &str) -> Result<Decimal, InputError> {
    let trimmed = text.trim();
    Decimal::from_str(&trimmed.replace(',', "."))
        .map_err(|_| InputError::NotANumber(trimmed.to_string()))
}

/// Shortcut keys of the grid: `0` clears, `1` is a full day, `.` is half a day.
pub fn quick_key(key: char) -> Option<Decimal> {
    match key {
        '0' => Some(Decimal::ZERO),
        '1' => Some(FULL_DAY),
        '.' => Some(Decimal::new(5, 1)),
        _ => None,
    }
}
