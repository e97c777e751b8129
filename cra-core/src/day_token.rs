use crate::keywords::{Keyword, Keywords};
use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;

/// Default accepted input date formats (parsing only).
pub const DEFAULT_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];

static DAY_OF_MONTH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,2}$").expect("valid day-of-month pattern"));

/// Configuration options for [`parse_day_token`].
#[derive(Copy, Clone, Debug, Default)]
pub struct ParseOptions<'a> {
    /// The date to use as "today" for relative keywords and day numbers.
    pub reference_date: Option<NaiveDate>,
    /// A slice of `chrono` format strings to try for parsing dates.
    pub formats: Option<&'a [&'a str]>,
}

/// Parses a string token into a calendar day.
///
/// Tried in order:
/// 1. **Keywords**: `today`, `yesterday`, `tomorrow` and their synonyms.
/// 2. **Weekdays**: `monday`…`sunday`, the most recent one on or before the
///    reference date.
/// 3. **Day of month**: `1`…`31`, within the reference month.
/// 4. **Formatted dates**: every format of `options.formats`.
///
/// # Examples
///
/// ```
/// # use chrono::NaiveDate;
/// # use cra_core::day_token::{parse_day_token, ParseOptions};
/// let anchor = NaiveDate::from_ymd_opt(2025, 8, 20).unwrap();
/// let opts = Some(ParseOptions { reference_date: Some(anchor), ..Default::default() });
///
/// assert_eq!(parse_day_token("yesterday", opts), NaiveDate::from_ymd_opt(2025, 8, 19));
/// assert_eq!(parse_day_token("3", opts), NaiveDate::from_ymd_opt(2025, 8, 3));
/// assert_eq!(parse_day_token("2025-01-20", opts), NaiveDate::from_ymd_opt(2025, 1, 20));
/// ```
pub fn parse_day_token(s: &str, options: Option<ParseOptions>) -> Option<NaiveDate> {
    let options = options.unwrap_or_default();
    let reference_date = options
        .reference_date
        .unwrap_or_else(|| Local::now().date_naive());
    let formats = options.formats.unwrap_or(DEFAULT_FORMATS);
    let s = s.trim();

    match Keywords::lookup(s) {
        Some(Keyword::Today) => return Some(reference_date),
        Some(Keyword::Yesterday) => return Some(reference_date - Duration::days(1)),
        Some(Keyword::Tomorrow) => return Some(reference_date + Duration::days(1)),
        Some(keyword) => {
            if let Some(weekday) = weekday_of(keyword) {
                let today_wd = reference_date.weekday();
                let days_ago =
                    (today_wd.num_days_from_monday() + 7 - weekday.num_days_from_monday()) % 7;
                return Some(reference_date - Duration::days(days_ago as i64));
            }
        }
        None => {}
    }

    if DAY_OF_MONTH.is_match(s) {
        return s
            .parse::<u32>()
            .ok()
            .and_then(|day| reference_date.with_day(day));
    }

    // Fallback to formatted dates
    formats
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

fn weekday_of(keyword: Keyword) -> Option<Weekday> {
    match keyword {
        Keyword::Monday => Some(Weekday::Mon),
        Keyword::Tuesday => Some(Weekday::Tue),
        Keyword::Wednesday => Some(Weekday::Wed),
        Keyword::Thursday => Some(Weekday::Thu),
        Keyword::Friday => Some(Weekday::Fri),
        Keyword::Saturday => Some(Weekday::Sat),
        Keyword::Sunday => Some(Weekday::Sun),
        Keyword::Today | Keyword::Yesterday | Keyword::Tomorrow => None,
    }
}
