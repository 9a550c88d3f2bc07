//! Year/date inference helpers
//!
//! Pure conversions from encoded fields (month numbers, Julian day-of-year,
//! ISO production weeks, Japanese era years) to calendar values.
//!
//! Two-digit century resolution is not here: thresholds differ
//! per brand, so each brand module owns its own `resolve_year`.

use chrono::{Datelike, NaiveDate};

use crate::error::DecodeError;

/// Month names, 1-indexed through [`month_name`]
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Average ISO weeks per calendar month (52 / 12).
///
/// Week-to-month conversion is approximate by nature: a week can straddle
/// two months, and the mapping drifts by up to a few days across the year.
pub const WEEKS_PER_MONTH: f64 = 52.0 / 12.0;

/// Name of a 1-based month; `None` when out of range (display fields never fail)
pub fn month_name(month: u32) -> Option<&'static str> {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i as usize))
        .copied()
}

/// Parse a strictly-encoded numeric month field
pub fn parse_month(raw: &str) -> Result<(u32, &'static str), DecodeError> {
    let value: u32 = raw
        .parse()
        .map_err(|_| DecodeError::invalid_field("month", raw, "01-12"))?;
    month_name(value)
        .map(|name| (value, name))
        .ok_or_else(|| DecodeError::invalid_field("month", raw, "01-12"))
}

/// Validate a day-of-month against a known year and month
pub fn parse_day_of_month(year: i32, month: u32, raw: &str) -> Result<u32, DecodeError> {
    let day: u32 = raw
        .parse()
        .map_err(|_| DecodeError::invalid_field("day", raw, "01-31"))?;
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(_) => Ok(day),
        None => Err(DecodeError::invalid_field(
            "day",
            raw,
            format!("01-{:02} for {} {}", days_in_month(year, month), month_name(month).unwrap_or("?"), year),
        )),
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month >= 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(31)
}

/// A calendar day derived from a Julian day-of-year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    pub month: u32,
    pub day: u32,
}

impl CalendarDay {
    pub fn month_name(&self) -> &'static str {
        month_name(self.month).unwrap_or("Unknown")
    }
}

/// Convert a day-of-year (001-366) to month and day.
///
/// Day 366 is only valid in leap years.
pub fn day_of_year(year: i32, raw: &str) -> Result<CalendarDay, DecodeError> {
    let ordinal: u32 = raw
        .parse()
        .map_err(|_| DecodeError::invalid_field("day of year", raw, "001-366"))?;
    if !(1..=366).contains(&ordinal) {
        return Err(DecodeError::invalid_field("day of year", raw, "001-366"));
    }
    NaiveDate::from_yo_opt(year, ordinal)
        .map(|date| CalendarDay {
            month: date.month(),
            day: date.day(),
        })
        .ok_or_else(|| {
            DecodeError::invalid_field("day of year", raw, format!("001-365 ({year} is not a leap year)"))
        })
}

/// Approximate calendar month (1-12) for an ISO production week (01-52)
pub fn week_to_month(raw: &str) -> Result<u32, DecodeError> {
    let week = parse_week(raw)?;
    Ok(month_offset(week) + 1)
}

fn parse_week(raw: &str) -> Result<u32, DecodeError> {
    raw.parse::<u32>()
        .ok()
        .filter(|w| (1..=52).contains(w))
        .ok_or_else(|| DecodeError::invalid_field("week", raw, "01-52"))
}

fn month_offset(week: u32) -> u32 {
    ((f64::from(week - 1) / WEEKS_PER_MONTH).floor() as u32).min(11)
}

/// First calendar month of a fiscal production year
pub const FISCAL_YEAR_START_MONTH: u32 = 8;

/// A fiscal-year week/day code resolved to an approximate calendar date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiscalDate {
    /// e.g. `FY2019 (August 2018 to July 2019)`
    pub fiscal_label: String,
    pub calendar_year: i32,
    pub month: u32,
    pub week: u32,
    pub weekday: u32,
}

/// Resolve fiscal year + ISO week + ISO weekday (1=Monday … 7=Sunday).
///
/// Fiscal year N runs from August of N-1 through July of N; week 01 starts in August.
pub fn fiscal_week_date(fiscal_year: i32, raw_week: &str, raw_day: &str) -> Result<FiscalDate, DecodeError> {
    let week = parse_week(raw_week)?;
    let weekday = raw_day
        .parse::<u32>()
        .ok()
        .filter(|d| (1..=7).contains(d))
        .ok_or_else(|| DecodeError::invalid_field("day of week", raw_day, "1-7"))?;

    let month = (FISCAL_YEAR_START_MONTH - 1 + month_offset(week)) % 12 + 1;
    let calendar_year = if month >= FISCAL_YEAR_START_MONTH {
        fiscal_year - 1
    } else {
        fiscal_year
    };

    Ok(FiscalDate {
        fiscal_label: format!("FY{fiscal_year} (August {} to July {fiscal_year})", fiscal_year - 1),
        calendar_year,
        month,
        week,
        weekday,
    })
}

/// ISO weekday name (1=Monday)
pub fn weekday_name(weekday: u32) -> Option<&'static str> {
    const NAMES: [&str; 7] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"];
    weekday.checked_sub(1).and_then(|i| NAMES.get(i as usize)).copied()
}

/// A Japanese era year converted to the Western calendar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EraYear {
    pub year: String,
    pub note: String,
    pub ambiguous: bool,
}

/// Showa starts in 1926 (Showa 1), so Showa N = 1925 + N
pub const SHOWA_BASE: i32 = 1925;
/// Heisei starts in 1989 (Heisei 1), so Heisei N = 1988 + N
pub const HEISEI_BASE: i32 = 1988;

/// Convert a two-digit era year.
///
/// - 45..=64: Showa, unambiguous (1970-1989)
/// - 1..=12: Heisei or a plain post-2000 year; both candidates are returned
/// - anything else: unknown
pub fn japanese_era_year(n: u32) -> EraYear {
    let n_i = n as i32;
    match n {
        45..=64 => EraYear {
            year: (SHOWA_BASE + n_i).to_string(),
            note: format!("Showa {n} = {}.", SHOWA_BASE + n_i),
            ambiguous: false,
        },
        1..=12 => EraYear {
            year: format!("{} or {}", HEISEI_BASE + n_i, 2000 + n_i),
            note: format!(
                "Era year {n:02} is ambiguous: Heisei {n} = {}, or a post-2000 two-digit year = {}.",
                HEISEI_BASE + n_i,
                2000 + n_i
            ),
            ambiguous: true,
        },
        _ => EraYear {
            year: format!("Unknown ({n:02})"),
            note: format!("Era year {n:02} does not fall in a documented Showa or Heisei range."),
            ambiguous: true,
        },
    }
}

/// Join candidate years: `1988 or 1998`, `1981, 1991 or 2001`
pub fn join_years(years: &[i32]) -> String {
    match years {
        [] => String::new(),
        [only] => only.to_string(),
        [init @ .., last] => format!(
            "{} or {last}",
            init.iter().map(i32::to_string).collect::<Vec<_>>().join(", ")
        ),
    }
}

/// Candidate years for a single year digit across the given decade starts
pub fn decade_candidates(digit: u32, decades: &[i32]) -> Vec<i32> {
    decades.iter().map(|d| d + digit as i32).collect()
}
