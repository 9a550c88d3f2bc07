//! Taylor serial numbers
//!
//! Taylor has changed formats three times. Every dated format is strictly
//! validated: a month outside 01-12 or a day that does not exist in that
//! month is an error.

use once_cell::sync::Lazy;
use regex::Captures;

use crate::cascade::{cap, Cascade, FormatRule};
use crate::dating::{parse_day_of_month, parse_month};
use crate::error::DecodeResult;
use crate::models::{Brand, GuitarInfo};
use crate::serial::digits;

const EL_CAJON: &str = "El Cajon, California";
const TECATE: &str = "Tecate";

static CASCADE: Lazy<Cascade> = Lazy::new(|| {
    Cascade::new(
        Brand::Taylor,
        vec![
            FormatRule::new(
                "YYMMDD + plant + 3 digits (10 digits starting with 0, 2000-2009)",
                r"(0\d)(\d{2})(\d{2})(\d)(\d{3})",
                decode_2000s,
            ),
            FormatRule::new(
                "factory + interleaved year/month + DD + 3-4 digits (10-11 digits, 2009+)",
                r"([12])(\d)(\d)(\d)(\d)(\d{2})(\d{3,4})",
                decode_interleaved,
            ),
            FormatRule::new("YYMMDD + 3 digits (9 digits, 1993-1999)", r"(9[3-9])(\d{2})(\d{2})(\d{3})", decode_1990s),
            FormatRule::new("3-5 digits (1974-1993)", r"(\d{3,5})", decode_early),
        ],
    )
});

pub fn cascade() -> &'static Cascade {
    &CASCADE
}

/// Decode a Taylor serial
pub fn decode(serial: &str) -> DecodeResult {
    CASCADE.decode(serial)
}

fn dated(serial: &str, year: i32, raw_month: &str, raw_day: &str) -> DecodeResult {
    let (month, month_name) = parse_month(raw_month)?;
    let day = parse_day_of_month(year, month, raw_day)?;
    Ok(GuitarInfo::new(Brand::Taylor, serial, year.to_string())
        .month(month_name)
        .day(day))
}

fn decode_2000s(caps: &Captures<'_>) -> DecodeResult {
    let year = 2000 + digits(cap(caps, 1)) as i32;
    let plant = digits(cap(caps, 4));
    let (factory, country) = if plant == 2 { (TECATE, "Mexico") } else { (EL_CAJON, "USA") };
    Ok(dated(cap(caps, 0), year, cap(caps, 2), cap(caps, 3))?
        .factory_name(factory)
        .country(country)
        .note(format!(
            "2000-2009 format: date {}-{}-{}, plant digit {plant}, sequence {}.",
            year,
            cap(caps, 2),
            cap(caps, 3),
            cap(caps, 5)
        )))
}

fn decode_interleaved(caps: &Captures<'_>) -> DecodeResult {
    let plant = digits(cap(caps, 1));
    let yy = format!("{}{}", cap(caps, 2), cap(caps, 4));
    let mm = format!("{}{}", cap(caps, 3), cap(caps, 5));
    let year = 2000 + digits(&yy) as i32;
    let (factory, country) = if plant == 2 { (TECATE, "Mexico") } else { (EL_CAJON, "USA") };
    let mut info = dated(cap(caps, 0), year, &mm, cap(caps, 6))?
        .factory_name(factory)
        .country(country)
        .note(format!(
            "2009+ format: factory digit {plant}, year digits {yy} (positions 2 and 4), month digits {mm} \
             (positions 3 and 5), day {}, sequence {}.",
            cap(caps, 6),
            cap(caps, 7)
        ));
    if year < 2009 {
        info.push_note("This interleaved format was introduced in late 2009; an earlier year suggests a misread serial.");
    }
    Ok(info)
}

fn decode_1990s(caps: &Captures<'_>) -> DecodeResult {
    let year = 1900 + digits(cap(caps, 1)) as i32;
    Ok(dated(cap(caps, 0), year, cap(caps, 2), cap(caps, 3))?
        .factory_name(EL_CAJON)
        .country("USA")
        .note(format!("1993-1999 format: YYMMDD date followed by sequence {}.", cap(caps, 4))))
}

fn decode_early(caps: &Captures<'_>) -> DecodeResult {
    Ok(GuitarInfo::new(Brand::Taylor, cap(caps, 1), "1974-1993")
        .factory_name("Lemon Grove / Santee, California")
        .country("USA")
        .note(
            "Short sequential serial from before 1993. Taylor did not encode the date in these numbers; \
             check the label inside the soundhole for a date.",
        ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_2000s_format() {
        let info = decode("0503150123").unwrap();
        assert_eq!(info.year, "2005");
        assert_eq!(info.month.as_deref(), Some("March"));
        assert_eq!(info.day.as_deref(), Some("15"));
        assert_eq!(info.country.as_deref(), Some("USA"));
    }

    #[test]
    fn test_2000s_tecate() {
        let info = decode("0503152123").unwrap();
        assert_eq!(info.country.as_deref(), Some("Mexico"));
    }

    #[test]
    fn test_interleaved_format() {
        // 1 | 1 0 0 5 | 21 | 123: year digits 1,0 and month digits 0,5
        let info = decode("1100521123").unwrap();
        assert_eq!(info.year, "2010");
        assert_eq!(info.month.as_deref(), Some("May"));
        assert_eq!(info.day.as_deref(), Some("21"));
    }

    #[test]
    fn test_1990s_format() {
        let info = decode("951231045").unwrap();
        assert_eq!(info.year, "1995");
        assert_eq!(info.month.as_deref(), Some("December"));
        assert_eq!(info.day.as_deref(), Some("31"));
    }

    #[test]
    fn test_invalid_day_rejected() {
        let err = decode("950231045").unwrap_err();
        assert!(err.to_string().contains("Invalid day"));
    }

    #[test]
    fn test_early_sequential() {
        assert_eq!(decode("12345").unwrap().year, "1974-1993");
    }
}
