use rust_decimal::{Decimal, RoundingStrategy};

const THOUSANDS_SEPARATOR: char = '\u{202f}';
const SYMBOL_SEPARATOR: char = '\u{a0}';

/// Formats an amount the French way: `1 234,56 €`.
///
/// Rounded to cents (half away from zero), digits grouped by three with a
/// narrow no-break space, a no-break space before the symbol.
pub fn format_currency(amount: Decimal, symbol: &str) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded < Decimal::ZERO;
    let digits = format!("{:.2}", rounded.abs());
    let (units, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let sign = if negative { "-" } else { "" };
    format!(
        "{sign}{},{cents}{SYMBOL_SEPARATOR}{symbol}",
        group_thousands(units)
    )
}

/// Shortest decimal form of a duration: `1`, `0.5`, `0.25`.
pub fn format_duration(duration: Decimal) -> String {
    duration.normalize().to_string()
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 * THOUSANDS_SEPARATOR.len_utf8());
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(THOUSANDS_SEPARATOR);
        }
        out.push(c);
    }
    out
}
