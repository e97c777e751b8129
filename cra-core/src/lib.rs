pub mod clients;
pub mod config;
pub mod cra;
pub mod dates;
pub mod day_token;
pub mod error;
pub mod expenses;
pub mod format_utils;
pub mod keywords;
pub mod logging;
pub mod missions;
pub mod report;
pub mod timesheet;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use cra::Cra;
pub use error::{CraError, DayTokenError, InputError, ValidationError};
pub use logging::init_logging;
