//! Takamine serial numbers
//!
//! Eight-digit serials are a plain `YYMMDDNN` date. Seven-digit serials carry
//! a Japanese era year, a month and a sequence; the era year is converted
//! with [`japanese_era_year`].

use once_cell::sync::Lazy;
use regex::Captures;

use crate::cascade::{cap, Cascade, FormatRule};
use crate::dating::{japanese_era_year, parse_day_of_month, parse_month};
use crate::error::DecodeResult;
use crate::models::{Brand, GuitarInfo};
use crate::serial::digits;

const SAKASHITA: &str = "Sakashita, Japan";

static CASCADE: Lazy<Cascade> = Lazy::new(|| {
    Cascade::new(
        Brand::Takamine,
        vec![
            FormatRule::new("YYMMDDNN (8 digits)", r"(\d{2})(\d{2})(\d{2})(\d{2})", decode_date),
            FormatRule::new("era year + MM + 3 digits (7 digits)", r"(\d{2})(\d{2})(\d{3})", decode_era),
        ],
    )
});

pub fn cascade() -> &'static Cascade {
    &CASCADE
}

/// Decode a Takamine serial
pub fn decode(serial: &str) -> DecodeResult {
    CASCADE.decode(serial)
}

fn resolve_year(yy: u32) -> Option<i32> {
    match yy {
        0..=30 => Some(2000 + yy as i32),
        62..=99 => Some(1900 + yy as i32),
        _ => None,
    }
}

fn decode_date(caps: &Captures<'_>) -> DecodeResult {
    let yy = digits(cap(caps, 1));
    let (month, month_name) = parse_month(cap(caps, 2))?;
    let note = format!(
        "Date-coded serial: year {yy:02}, month {}, day {}, production number {}.",
        cap(caps, 2),
        cap(caps, 3),
        cap(caps, 4)
    );

    let Some(year) = resolve_year(yy) else {
        return Ok(GuitarInfo::new(Brand::Takamine, cap(caps, 0), format!("Unknown ({yy:02})"))
            .month(month_name)
            .factory_name(SAKASHITA)
            .country("Japan")
            .note(note));
    };
    let day = parse_day_of_month(year, month, cap(caps, 3))?;
    Ok(GuitarInfo::new(Brand::Takamine, cap(caps, 0), year.to_string())
        .month(month_name)
        .day(day)
        .factory_name(SAKASHITA)
        .country("Japan")
        .note(note))
}

fn decode_era(caps: &Captures<'_>) -> DecodeResult {
    let era = japanese_era_year(digits(cap(caps, 1)));
    let (_, month) = parse_month(cap(caps, 2))?;
    let mut info = GuitarInfo::new(Brand::Takamine, cap(caps, 0), era.year)
        .month(month)
        .factory_name(SAKASHITA)
        .country("Japan")
        .note(format!(
            "Era-coded serial: era year {}, month {}, sequence {}.",
            cap(caps, 1),
            cap(caps, 2),
            cap(caps, 3)
        ))
        .note(era.note);
    if era.ambiguous {
        info.push_note("Check the label or hardware to decide between the candidate years.");
    }
    Ok(info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_coded() {
        let info = decode("05061812").unwrap();
        assert_eq!(info.year, "2005");
        assert_eq!(info.month.as_deref(), Some("June"));
        assert_eq!(info.day.as_deref(), Some("18"));
    }

    #[test]
    fn test_showa_era() {
        let info = decode("5503123").unwrap();
        assert_eq!(info.year, "1980");
        assert_eq!(info.month.as_deref(), Some("March"));
        assert!(info.notes.contains("Showa 55 = 1980."));
    }

    #[test]
    fn test_heisei_ambiguous() {
        let info = decode("0305123").unwrap();
        assert_eq!(info.year, "1991 or 2003");
    }

    #[test]
    fn test_month_strict() {
        assert!(decode("05131812").unwrap_err().to_string().contains("Expected 01-12"));
    }
}
