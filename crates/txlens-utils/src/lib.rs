//! Formatting and HTML helpers

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use txlens_config::{CurrencyConfig, SymbolPosition};

/// Format an integer string with thousands separators
pub fn format_number<T: ToString>(n: T, separator: &str) -> String {
    let s = n.to_string();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.as_str()),
    };

    let mut groups: Vec<String> = Vec::new();
    let chars: Vec<char> = digits.chars().collect();
    for chunk in chars.rchunks(3) {
        groups.push(chunk.iter().collect());
    }
    groups.reverse();

    format!("{}{}", sign, groups.join(separator))
}

/// Format a signed amount using the configured currency settings
///
/// Rounds half away from zero, e.g. `-37.45` becomes `-37,45 EUR` with the
/// default settings.
pub fn format_amount(amount: Decimal, currency: &CurrencyConfig) -> String {
    let places = currency.decimal_places;
    let rounded = amount.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();

    let plain = format!("{:.*}", places as usize, rounded.abs());
    let (int_part, frac_part) = match plain.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (plain.as_str(), None),
    };

    let mut number = format_number(int_part, &currency.thousands_separator);
    if let Some(frac) = frac_part {
        number.push_str(&currency.decimal_separator);
        number.push_str(frac);
    }

    let sign = if negative { "-" } else { "" };
    match currency.symbol_position {
        SymbolPosition::Before => format!("{}{} {}", sign, currency.code, number),
        SymbolPosition::After => format!("{}{} {}", sign, number, currency.code),
    }
}

/// Reformat a `YYYY-MM-DD` date; unparseable input is returned unchanged
pub fn format_date(date: &str, format: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(d) => d.format(format).to_string(),
        Err(_) => date.to_string(),
    }
}

/// Escape text for safe inclusion in HTML content and attributes
pub fn escape_html(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
