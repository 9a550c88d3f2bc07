//! Yamaha serial numbers
//!
//! Yamaha's letter code substitutes letters for digits:
//! `H I J K L M N O P X` = `1 2 3 4 5 6 7 8 9 0`. The first code letter is the
//! last digit of the year; the second is the month, with `X Y Z` standing for
//! October, November and December. The decade is never encoded.

use once_cell::sync::Lazy;
use regex::Captures;

use crate::cascade::{cap, Cascade, FormatRule};
use crate::dating::{decade_candidates, join_years, month_name};
use crate::error::DecodeResult;
use crate::models::{Brand, GuitarInfo};
use crate::tables::FactoryTable;

/// Decades the letter code was in use
const DECADES: [i32; 4] = [1970, 1980, 1990, 2000];

static FACTORIES: Lazy<FactoryTable> = Lazy::new(|| {
    FactoryTable::new(&[
        ("C", "Hangzhou", "China"),
        ("Q", "Kaohsiung", "Taiwan"),
        ("T", "Taiwan Yamaha", "Taiwan"),
    ])
});

static CASCADE: Lazy<Cascade> = Lazy::new(|| {
    Cascade::new(
        Brand::Yamaha,
        vec![FormatRule::new(
            "optional factory letter + year code letter + month code letter + 4-6 digits",
            r"([CQT])?([H-PX])([H-PX-Z])(\d{4,6})",
            decode_letter_code,
        )],
    )
});

pub fn cascade() -> &'static Cascade {
    &CASCADE
}

/// Decode a Yamaha serial
pub fn decode(serial: &str) -> DecodeResult {
    CASCADE.decode(serial)
}

/// Digit value of a code letter (`H` = 1 … `P` = 9, `X` = 0)
fn code_digit(letter: char) -> Option<u32> {
    match letter {
        'X' => Some(0),
        c @ 'H'..='P' => Some(u32::from(c) - u32::from('H') + 1),
        _ => None,
    }
}

fn code_month(letter: char) -> Option<u32> {
    match letter {
        'X' => Some(10),
        'Y' => Some(11),
        'Z' => Some(12),
        c => code_digit(c).filter(|&m| m > 0),
    }
}

fn decode_letter_code(caps: &Captures<'_>) -> DecodeResult {
    let year_letter = cap(caps, 2).chars().next().unwrap_or('?');
    let month_letter = cap(caps, 3).chars().next().unwrap_or('?');
    let digit = code_digit(year_letter).unwrap_or(0);
    let years = decade_candidates(digit, &DECADES);

    let mut info = GuitarInfo::new(Brand::Yamaha, cap(caps, 0), join_years(&years)).note(format!(
        "Letter code: {year_letter} = year digit {digit}, {month_letter} = month, sequence {}. \
         The decade is not encoded, so all decades in which the code was used are listed.",
        cap(caps, 4)
    ));
    if let Some(name) = code_month(month_letter).and_then(month_name) {
        info = info.month(name);
    }
    match caps.get(1).map(|m| m.as_str()) {
        Some(code) => {
            let factory = FACTORIES.lookup(code);
            info.push_note(format!("Prefix {code} indicates the {} plant.", factory.name));
            info = info.factory(&factory);
        }
        None => {
            info = info.country("Japan");
            info.push_note("No plant prefix: Japanese production.");
        }
    }
    Ok(info)
}
