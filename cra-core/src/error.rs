use crate::{clients::ClientId, expenses::ExpenseId, missions::MissionId};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// A request rejected by one of the registries or by the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name cannot be empty")]
    EmptyName,
    #[error("unknown client #{0}")]
    UnknownClient(ClientId),
    #[error("unknown mission #{0}")]
    UnknownMission(MissionId),
    #[error("unknown expense #{0}")]
    UnknownExpense(ExpenseId),
    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },
    #[error("{field} cannot exceed {max}")]
    TooLarge { field: &'static str, max: Decimal },
    #[error("deadline {deadline} is before start date {start}")]
    DeadlineBeforeStart { start: NaiveDate, deadline: NaiveDate },
    #[error("duration {0} is outside [0, 1]")]
    DurationOutOfRange(Decimal),
}

/// Largest amount or daily rate accepted, in currency units. Every total a
/// session computes stays far below `Decimal::MAX` with inputs in this range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

impl ValidationError {
    /// Checks that a money `value` lies in `(0, MAX_AMOUNT]`.
    pub(crate) fn check_amount(field: &'static str, value: Decimal) -> Result<(), Self> {
        if value <= Decimal::ZERO {
            Err(ValidationError::NotPositive { field })
        } else if value > MAX_AMOUNT {
            Err(ValidationError::TooLarge {
                field,
                max: MAX_AMOUNT,
            })
        } else {
            Ok(())
        }
    }
}

/// Text typed by the user that could not be turned into a number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("`{0}` is not a number")]
    NotANumber(String),
    #[error("`{0}` must be between 0 and 1")]
    OutOfRange(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DayTokenError {
    #[error("could not understand `{0}` as a day")]
    Unrecognized(String),
}

/// Everything a session operation can be refused for.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CraError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    DayToken(#[from] DayTokenError),
}
