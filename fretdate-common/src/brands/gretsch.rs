//! Gretsch serial numbers

use once_cell::sync::Lazy;
use regex::Captures;

use crate::cascade::{cap, Cascade, FormatRule};
use crate::dating::{month_name, parse_month};
use crate::error::DecodeResult;
use crate::models::{Brand, GuitarInfo};
use crate::range::{entry, RangeEntry, RangeTable};
use crate::serial::{digits, digits_u64};
use crate::tables::FactoryTable;

const BROOKLYN: &str = "Brooklyn, New York";

/// Approximate pre-1966 sequential ranges (Brooklyn)
static SEQUENTIAL: [RangeEntry; 17] = [
    entry(3000, 1949),
    entry(5000, 1950),
    entry(6000, 1951),
    entry(8000, 1952),
    entry(12000, 1953),
    entry(16000, 1954),
    entry(19000, 1955),
    entry(21000, 1956),
    entry(26000, 1957),
    entry(30000, 1958),
    entry(34000, 1959),
    entry(39000, 1960),
    entry(45000, 1961),
    entry(52000, 1962),
    entry(60000, 1963),
    entry(68000, 1964),
    entry(85000, 1965),
];

pub static SEQUENTIAL_TABLE: RangeTable = RangeTable::new(&SEQUENTIAL);

static JAPAN_FACTORIES: Lazy<FactoryTable> = Lazy::new(|| {
    FactoryTable::new(&[
        ("JT", "Terada", "Japan"),
        ("JF", "FujiGen", "Japan"),
        ("JD", "Dyna Gakki", "Japan"),
    ])
});

static ELECTROMATIC_FACTORIES: Lazy<FactoryTable> = Lazy::new(|| {
    FactoryTable::new(&[
        ("KS", "Samick", "Korea"),
        ("KP", "Peerless", "Korea"),
        ("KC", "Cort", "Korea"),
        ("KT", "Korea plant (unspecified)", "Korea"),
        ("CS", "Samick", "China"),
        ("CY", "Yako", "China"),
        ("IS", "Samick", "Indonesia"),
        ("IC", "Cort", "Indonesia"),
    ])
});

static CASCADE: Lazy<Cascade> = Lazy::new(|| {
    Cascade::new(
        Brand::Gretsch,
        vec![
            FormatRule::new(
                "JT/JF/JD + YYMM + 3-4 digits (Japan, 1989+)",
                r"(JT|JF|JD)(\d{2})(\d{2})(\d{3,4})",
                decode_japan,
            ),
            FormatRule::new(
                "2-letter factory code + YYMM + 4-5 digits (Electromatic)",
                r"([A-Z]{2})(\d{2})(\d{2})(\d{4,5})",
                decode_electromatic,
            ),
            FormatRule::new(
                "month + year digit + 3 digits (5-6 digits, 1966-1972)",
                r"(1[0-2]|[1-9])(\d)(\d{3})",
                decode_date_coded,
            ),
            FormatRule::new("3-5 digits (sequential, before 1966)", r"(\d{3,5})", decode_sequential),
        ],
    )
});

pub fn cascade() -> &'static Cascade {
    &CASCADE
}

/// Decode a Gretsch serial
pub fn decode(serial: &str) -> DecodeResult {
    CASCADE.decode(serial)
}

fn resolve_year(yy: u32) -> String {
    match yy {
        0..=30 => (2000 + yy).to_string(),
        89..=99 => (1900 + yy).to_string(),
        _ => format!("Unknown ({yy:02})"),
    }
}

fn decode_japan(caps: &Captures<'_>) -> DecodeResult {
    let code = cap(caps, 1);
    let yy = digits(cap(caps, 2));
    let (_, month) = parse_month(cap(caps, 3))?;
    let factory = JAPAN_FACTORIES.lookup(code);
    Ok(GuitarInfo::new(Brand::Gretsch, cap(caps, 0), resolve_year(yy))
        .month(month)
        .factory(&factory)
        .note(format!(
            "Japanese production: {code} = {}, year {yy:02}, month {}, sequence {}.",
            factory.name,
            cap(caps, 3),
            cap(caps, 4)
        )))
}

fn decode_electromatic(caps: &Captures<'_>) -> DecodeResult {
    let code = cap(caps, 1);
    let yy = digits(cap(caps, 2));
    let (_, month) = parse_month(cap(caps, 3))?;
    let factory = ELECTROMATIC_FACTORIES.lookup(code);
    let mut info = GuitarInfo::new(Brand::Gretsch, cap(caps, 0), resolve_year(yy))
        .month(month)
        .factory(&factory)
        .model("Electromatic")
        .note(format!(
            "Electromatic: factory code {code}, year {yy:02}, month {}, sequence {}.",
            cap(caps, 3),
            cap(caps, 4)
        ));
    if !factory.known {
        info.push_note(format!("Factory code {code} is not in the known Electromatic factory list."));
    }
    Ok(info)
}

fn decode_date_coded(caps: &Captures<'_>) -> DecodeResult {
    let raw = cap(caps, 0);
    let month = digits(cap(caps, 1));
    let d = digits(cap(caps, 2));
    let year = if d >= 6 { 1960 + d } else { 1970 + d };

    let mut info = GuitarInfo::new(Brand::Gretsch, raw, year.to_string())
        .factory_name(BROOKLYN)
        .country("USA")
        .note(format!(
            "1966-1972 date code: month {month}, year digit {d}, production number {}.",
            cap(caps, 3)
        ));
    if let Some(name) = month_name(month) {
        info = info.month(name);
    }
    if !(1966..=1972).contains(&year) {
        info.push_note(format!(
            "Year digit {d} falls outside the 1966-1972 date-code era; the reading is uncertain."
        ));
    }
    if raw.len() == 5 {
        let sequential = SEQUENTIAL_TABLE.lookup(digits_u64(raw));
        info.push_note(format!(
            "A five-digit number may also be a pre-1966 sequential serial, which would place it around {}.",
            sequential.describe()
        ));
    }
    Ok(info)
}

fn decode_sequential(caps: &Captures<'_>) -> DecodeResult {
    let raw = cap(caps, 1);
    let lookup = SEQUENTIAL_TABLE.lookup(digits_u64(raw));
    Ok(GuitarInfo::new(Brand::Gretsch, raw, lookup.describe())
        .factory_name(BROOKLYN)
        .country("USA")
        .note(
            "Pre-1966 sequential serial. Gretsch numbering before the date code is only approximately \
             tied to years; ranges overlap by up to a year.",
        ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_japan() {
        let info = decode("JT04051234").unwrap();
        assert_eq!(info.year, "2004");
        assert_eq!(info.month.as_deref(), Some("May"));
        assert_eq!(info.factory.as_deref(), Some("Terada"));
    }

    #[test]
    fn test_electromatic_strict_month() {
        let info = decode("KS09031234").unwrap();
        assert_eq!(info.year, "2009");
        assert_eq!(info.country.as_deref(), Some("Korea"));
        assert!(decode("KS09141234").unwrap_err().to_string().contains("Expected 01-12"));
    }

    #[test]
    fn test_date_coded() {
        let info = decode("128123").unwrap();
        assert_eq!(info.year, "1968");
        assert_eq!(info.month.as_deref(), Some("December"));

        let info = decode("39456").unwrap();
        assert_eq!(info.year, "1969");
        assert_eq!(info.month.as_deref(), Some("March"));
        assert!(info.notes.contains("pre-1966 sequential"));
    }

    #[test]
    fn test_sequential() {
        assert_eq!(decode("4500").unwrap().year, "1950");
        assert_eq!(decode("09999").unwrap().year, "1953");
        assert!(SEQUENTIAL_TABLE.is_strictly_increasing());
    }
}
