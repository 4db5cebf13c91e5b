use std::sync::LazyLock;

use chrono::{Datelike, Local, NaiveDate};
use regex::Regex;
use serde_json::Value;

use crate::errors::{RatingError, Result};

/// `nn/nn/nnnn` with any single non-digit separator.
static NUMERIC_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})\D(\d{1,2})\D(\d{4})$").expect("numeric date pattern")
});

static ORDINAL_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d)(?i:st|nd|rd|th)\b").expect("ordinal pattern"));

/// Formats tried, in order, once the numeric day/month form has been ruled out.
/// `%B` also accepts abbreviated month names.
const GENERIC_FORMATS: [&str; 7] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%d %B %Y",
    "%B %d %Y",
    "%d-%B-%Y",
    "%Y %B %d",
];

/// Anything that can stand in for a calendar date.
pub trait DateInput {
    fn to_date(&self) -> Result<NaiveDate>;
}

impl DateInput for NaiveDate {
    fn to_date(&self) -> Result<NaiveDate> {
        Ok(*self)
    }
}

impl DateInput for str {
    fn to_date(&self) -> Result<NaiveDate> {
        parse_date_str(self)
    }
}

impl DateInput for String {
    fn to_date(&self) -> Result<NaiveDate> {
        parse_date_str(self)
    }
}

impl DateInput for Value {
    fn to_date(&self) -> Result<NaiveDate> {
        match self {
            Value::String(s) => parse_date_str(s),
            other => parse_date_str(&other.to_string()),
        }
    }
}

impl<T: DateInput + ?Sized> DateInput for &T {
    fn to_date(&self) -> Result<NaiveDate> {
        (**self).to_date()
    }
}

/// Parse a date, reading `nn/nn/nnnn` as day/month/year unless only the
/// month/day/year reading is valid.
///
/// ```
/// use tournament_ratings::util::dates::parse_date;
///
/// assert_eq!(parse_date("02/03/2009").unwrap().to_string(), "2009-03-02");
/// assert_eq!(parse_date("02/23/2009").unwrap().to_string(), "2009-02-23");
/// assert_eq!(parse_date("16th June 1986").unwrap().to_string(), "1986-06-16");
/// assert!(parse_date("not a date").is_err());
/// ```
pub fn parse_date<D: DateInput + ?Sized>(input: &D) -> Result<NaiveDate> {
    input.to_date()
}

fn parse_date_str(input: &str) -> Result<NaiveDate> {
    let invalid = || RatingError::InvalidDate(input.to_string());
    let string = input.trim();

    if !string.chars().any(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }

    if let Some(caps) = NUMERIC_DATE.captures(string) {
        let group = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());
        let (first, middle, year) = match (group(1), group(2), group(3)) {
            (Some(f), Some(m), Some(y)) => (f, m, y as i32),
            _ => return Err(invalid()),
        };
        let (month, day) = if middle > 12 { (first, middle) } else { (middle, first) };
        return NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid);
    }

    parse_generic(string).ok_or_else(invalid)
}

fn parse_generic(string: &str) -> Option<NaiveDate> {
    let without_ordinals = ORDINAL_SUFFIX.replace_all(string, "$1");
    let normalized = without_ordinals
        .replace(',', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    GENERIC_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(&normalized, format).ok())
}

/// Fractional years from `start` to `reference`.
///
/// The day-of-year difference is always divided by 366, leap year or not,
/// so results match the historical rating database.
pub fn age_in_years(start: NaiveDate, reference: NaiveDate) -> f64 {
    let years = reference.year() - start.year();
    let days = reference.ordinal() as i64 - start.ordinal() as i64;
    years as f64 + days as f64 / 366.0
}

pub fn age_today(start: NaiveDate) -> f64 {
    age_in_years(start, Local::now().date_naive())
}
