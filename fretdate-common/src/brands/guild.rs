//! Guild serial numbers
//!
//! Sequential numbers from 1952 to 1966, then model-letter prefixes through
//! the 1970s, then a New Hartford format with a two-digit year.

use once_cell::sync::Lazy;
use regex::Captures;

use crate::cascade::{cap, Cascade, FormatRule};
use crate::error::DecodeResult;
use crate::models::{Brand, GuitarInfo};
use crate::range::{entry, RangeEntry, RangeLookup, RangeTable};
use crate::serial::{digits, digits_u64};

static SEQUENTIAL: [RangeEntry; 15] = [
    entry(1500, 1952),
    entry(2200, 1953),
    entry(3000, 1954),
    entry(4000, 1955),
    entry(5700, 1956),
    entry(7000, 1957),
    entry(8300, 1958),
    entry(9100, 1959),
    entry(12035, 1960),
    entry(14713, 1961),
    entry(18419, 1962),
    entry(22722, 1963),
    entry(28943, 1964),
    entry(38636, 1965),
    entry(46606, 1966),
];

pub static SEQUENTIAL_TABLE: RangeTable = RangeTable::new(&SEQUENTIAL);

/// Last number issued before model-prefix numbering took over
const TRANSITION_END: u64 = 46695;

static CASCADE: Lazy<Cascade> = Lazy::new(|| {
    Cascade::new(
        Brand::Guild,
        vec![
            FormatRule::new("GH + YY + 3-6 digits (New Hartford, 2008+)", r"GH(\d{2})(\d{3,6})", decode_new_hartford),
            FormatRule::new(
                "model letter prefix + 3-6 digits (1970-1979)",
                r"([A-Z]{1,3})(\d{3,6})",
                decode_model_prefix,
            ),
            FormatRule::new("3-5 digits (sequential, 1952-1966)", r"(\d{3,5})", decode_sequential),
        ],
    )
});

pub fn cascade() -> &'static Cascade {
    &CASCADE
}

/// Decode a Guild serial
pub fn decode(serial: &str) -> DecodeResult {
    CASCADE.decode(serial)
}

fn decode_new_hartford(caps: &Captures<'_>) -> DecodeResult {
    let yy = digits(cap(caps, 1));
    let year = if (8..=30).contains(&yy) { (2000 + yy).to_string() } else { format!("Unknown ({yy:02})") };
    Ok(GuitarInfo::new(Brand::Guild, cap(caps, 0), year)
        .factory_name("New Hartford, Connecticut")
        .country("USA")
        .note(format!("GH prefix: New Hartford production, year {yy:02}, sequence {}.", cap(caps, 2))))
}

fn decode_model_prefix(caps: &Captures<'_>) -> DecodeResult {
    let prefix = cap(caps, 1);
    Ok(GuitarInfo::new(Brand::Guild, cap(caps, 0), "1970-1979")
        .factory_name("Westerly, Rhode Island")
        .country("USA")
        .note(format!(
            "Model-prefix serial: {prefix} identifies the model family, {} is the number within that model. \
             Each model had its own sequence, so the exact year needs the per-model charts.",
            cap(caps, 2)
        )))
}

fn decode_sequential(caps: &Captures<'_>) -> DecodeResult {
    let raw = cap(caps, 1);
    let n = digits_u64(raw);
    let last_max = SEQUENTIAL_TABLE.last().map_or(0, |e| e.max_serial);

    if n > last_max && n <= TRANSITION_END {
        return Ok(GuitarInfo::new(Brand::Guild, raw, "1966-1969 (transition to model-prefix numbering)")
            .country("USA")
            .note(format!(
                "Serial {n} falls between {} and {TRANSITION_END}, the numbers used while Guild moved \
                 from one shared sequence to model-prefix serials.",
                last_max + 1
            )));
    }

    let lookup = SEQUENTIAL_TABLE.lookup(n);
    let mut info = GuitarInfo::new(Brand::Guild, raw, lookup.describe())
        .country("USA")
        .factory_name(if lookup.sort_year() < 1967 { "Hoboken, New Jersey" } else { "Westerly, Rhode Island" });
    match lookup {
        RangeLookup::Year(year) => info.push_note(format!("Sequential serial {n} falls in Guild's {year} range.")),
        RangeLookup::Later { last_year } => info.push_note(format!(
            "Serial {n} is beyond the sequential ranges, which ended in {last_year}."
        )),
    }
    Ok(info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential() {
        assert_eq!(decode("12035").unwrap().year, "1960");
        assert_eq!(decode("12036").unwrap().year, "1961");
        assert!(SEQUENTIAL_TABLE.is_strictly_increasing());
    }

    #[test]
    fn test_transition_gap() {
        let info = decode("46650").unwrap();
        assert_eq!(info.year, "1966-1969 (transition to model-prefix numbering)");
    }

    #[test]
    fn test_beyond_transition() {
        assert_eq!(decode("50000").unwrap().year, "1966 or later");
    }

    #[test]
    fn test_specific_prefix_before_general() {
        assert_eq!(decode("GH12123456").unwrap().year, "2012");
        assert_eq!(decode("AB1234").unwrap().year, "1970-1979");
    }
}
