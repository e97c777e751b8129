use crate::{Config, day_token::DEFAULT_FORMATS};
use chrono::{Local, NaiveDate};

/// Test helper to create a default `Config` for testing purposes.
///
/// This is the single source of truth for test configuration.
/// If you add a field to `Config`, you only need to update it here.
pub fn mk_config(reference_date: Option<NaiveDate>) -> Config {
    Config {
        input_date_formats: DEFAULT_FORMATS.iter().map(|f| f.to_string()).collect(),
        display_date_format: "%d/%m/%Y".to_string(),
        month_format: "%B %Y".to_string(),
        currency_symbol: "€".to_string(),
        reference_date: reference_date.unwrap_or(Local::now().date_naive()),
        log_level: "warn".to_string(),
        log_dir: None,
    }
}
