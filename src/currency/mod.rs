//! Currency, date, and month formatting for presentation.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("USD")
    }
}

/// Separators used when rendering numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleConfig {
    pub language_tag: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
}

impl LocaleConfig {
    /// Maps a language tag to its separators; unknown tags use `en-US` rules.
    pub fn from_tag(tag: &str) -> Self {
        let (decimal_separator, grouping_separator) = match tag {
            "de-DE" | "es-ES" | "it-IT" | "pt-BR" | "nl-NL" => (',', '.'),
            "fr-FR" => (',', ' '),
            _ => ('.', ','),
        };
        Self {
            language_tag: tag.to_string(),
            decimal_separator,
            grouping_separator,
        }
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self::from_tag("en-US")
    }
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "JPY" => "¥".into(),
        "AUD" => "A$".into(),
        _ => code.into(),
    }
}

pub fn minor_units_for(code: &str) -> u8 {
    match code {
        "JPY" => 0,
        "KWD" | "BHD" => 3,
        _ => 2,
    }
}

pub fn format_number(locale: &LocaleConfig, value: f64, precision: u8) -> String {
    let rendered = format!("{:.*}", precision as usize, value.abs());
    let (int_part, fraction) = match rendered.split_once('.') {
        Some((int_part, fraction)) => (int_part, Some(fraction)),
        None => (rendered.as_str(), None),
    };
    let mut body = group_digits(int_part, locale.grouping_separator);
    if let Some(fraction) = fraction {
        body.push(locale.decimal_separator);
        body.push_str(fraction);
    }
    if value < 0.0 && rendered.chars().any(|c| c != '0' && c != '.') {
        body.insert(0, '-');
    }
    body
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index != 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

/// Renders `amount` as `$1,234.56` or `-$12.50`.
pub fn format_currency_value(amount: f64, code: &CurrencyCode, locale: &LocaleConfig) -> String {
    let precision = minor_units_for(code.as_str());
    let body = format_number(locale, amount.abs(), precision);
    let symbol = symbol_for(code.as_str());
    let sign = if amount < 0.0 && body.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };
    if symbol.chars().all(|c| c.is_ascii_alphabetic()) {
        format!("{sign}{symbol} {body}")
    } else {
        format!("{sign}{symbol}{body}")
    }
}

/// Renders a date as `Dec 5, 2023`.
pub fn format_date(date: NaiveDate) -> String {
    format!("{} {}, {}", month_label(date.month()), date.day(), date.year())
}

/// Renders a percentage with one decimal place, as the dashboard does.
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

fn month_label(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        12 => "Dec",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd(amount: f64) -> String {
        format_currency_value(amount, &CurrencyCode::default(), &LocaleConfig::default())
    }

    #[test]
    fn formats_usd_with_grouping() {
        assert_eq!(usd(2750.0), "$2,750.00");
        assert_eq!(usd(-12.5), "-$12.50");
        assert_eq!(usd(1234567.891), "$1,234,567.89");
        assert_eq!(usd(0.0), "$0.00");
        assert_eq!(usd(-0.001), "$0.00");
    }

    #[test]
    fn respects_locale_separators_and_minor_units() {
        let de = LocaleConfig::from_tag("de-DE");
        assert_eq!(
            format_currency_value(1234.5, &CurrencyCode::new("eur"), &de),
            "€1.234,50"
        );
        assert_eq!(
            format_currency_value(1500.0, &CurrencyCode::new("JPY"), &LocaleConfig::default()),
            "¥1,500"
        );
        assert_eq!(
            format_currency_value(3.0, &CurrencyCode::new("CHF"), &LocaleConfig::default()),
            "CHF 3.00"
        );
    }

    #[test]
    fn formats_dates_like_the_dashboard() {
        let date = NaiveDate::from_ymd_opt(2023, 12, 5).unwrap();
        assert_eq!(format_date(date), "Dec 5, 2023");
        assert_eq!(format_percent(46.1272), "46.1%");
    }
}
