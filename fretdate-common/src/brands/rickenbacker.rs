//! Rickenbacker serial numbers
//!
//! 1961-1986: year letter (A = 1961) then month letter (A = January).
//! 1987-1996: month letter then year digit (0 = 1987).
//! 1999 onward: two-digit year then sequence.

use once_cell::sync::Lazy;
use regex::Captures;

use crate::cascade::{cap, Cascade, FormatRule};
use crate::dating::month_name;
use crate::error::DecodeResult;
use crate::models::{Brand, GuitarInfo};
use crate::serial::digits;
use crate::tables::{month_from_letter, year_from_letter};

const SANTA_ANA: &str = "Santa Ana, California";

/// Year of digit 0 in the 1987-1996 format
const DIGIT_CODE_BASE: i32 = 1987;

static CASCADE: Lazy<Cascade> = Lazy::new(|| {
    Cascade::new(
        Brand::Rickenbacker,
        vec![
            FormatRule::new(
                "year letter + month letter + 2-4 digits (1961-1986)",
                r"([A-Z])([A-L])(\d{2,4})",
                decode_letter_letter,
            ),
            FormatRule::new(
                "month letter + year digit + 2-4 digits (1987-1996)",
                r"([A-L])(\d)(\d{2,4})",
                decode_letter_digit,
            ),
            FormatRule::new("YY + 4-6 digits (1999+)", r"(99|[0-2]\d|30)(\d{4,6})", decode_modern),
        ],
    )
});

pub fn cascade() -> &'static Cascade {
    &CASCADE
}

/// Decode a Rickenbacker serial
pub fn decode(serial: &str) -> DecodeResult {
    CASCADE.decode(serial)
}

fn first_char(s: &str) -> char {
    s.chars().next().unwrap_or('?')
}

fn with_month(info: GuitarInfo, letter: char) -> GuitarInfo {
    match month_from_letter(letter).and_then(month_name) {
        Some(name) => info.month(name),
        None => info,
    }
}

fn decode_letter_letter(caps: &Captures<'_>) -> DecodeResult {
    let year_letter = first_char(cap(caps, 1));
    let month_letter = first_char(cap(caps, 2));
    let year = year_from_letter(year_letter, 1961).map_or_else(|| format!("Unknown ({year_letter})"), |y| y.to_string());
    let info = GuitarInfo::new(Brand::Rickenbacker, cap(caps, 0), year)
        .factory_name(SANTA_ANA)
        .country("USA")
        .note(format!(
            "1961-1986 format: {year_letter} is the year (A = 1961), {month_letter} the month (A = January), \
             production number {}.",
            cap(caps, 3)
        ));
    Ok(with_month(info, month_letter))
}

fn decode_letter_digit(caps: &Captures<'_>) -> DecodeResult {
    let month_letter = first_char(cap(caps, 1));
    let d = digits(cap(caps, 2));
    let year = DIGIT_CODE_BASE + d as i32;
    let info = GuitarInfo::new(Brand::Rickenbacker, cap(caps, 0), year.to_string())
        .factory_name(SANTA_ANA)
        .country("USA")
        .note(format!(
            "1987-1996 format: {month_letter} is the month, digit {d} the year (0 = 1987), production number {}.",
            cap(caps, 3)
        ));
    Ok(with_month(info, month_letter))
}

fn decode_modern(caps: &Captures<'_>) -> DecodeResult {
    let yy = digits(cap(caps, 1));
    let year = if yy == 99 { 1999 } else { 2000 + yy };
    Ok(GuitarInfo::new(Brand::Rickenbacker, cap(caps, 0), year.to_string())
        .factory_name(SANTA_ANA)
        .country("USA")
        .note(format!(
            "From 1999 the first two digits are the year ({yy:02}), followed by production number {}.",
            cap(caps, 2)
        )))
}
