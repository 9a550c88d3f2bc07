//! Ovation serial numbers
//!
//! Sequential numbers stamped inside the bowl. The year table below is
//! approximate; Ovation ran separate number blocks for some models.

use once_cell::sync::Lazy;
use regex::Captures;

use crate::cascade::{cap, Cascade, FormatRule};
use crate::error::DecodeResult;
use crate::models::{Brand, GuitarInfo};
use crate::range::{entry, RangeEntry, RangeLookup, RangeTable};
use crate::serial::digits_u64;

static SEQUENTIAL: [RangeEntry; 34] = [
    entry(319, 1966),
    entry(1500, 1967),
    entry(6500, 1968),
    entry(13000, 1969),
    entry(21000, 1970),
    entry(33000, 1971),
    entry(46000, 1972),
    entry(85000, 1973),
    entry(110000, 1974),
    entry(165000, 1975),
    entry(200000, 1976),
    entry(250000, 1977),
    entry(290000, 1978),
    entry(330000, 1979),
    entry(370000, 1980),
    entry(403000, 1981),
    entry(421000, 1982),
    entry(439000, 1983),
    entry(445000, 1984),
    entry(455000, 1985),
    entry(480000, 1986),
    entry(500000, 1987),
    entry(510000, 1988),
    entry(525000, 1989),
    entry(540000, 1990),
    entry(560000, 1991),
    entry(580000, 1992),
    entry(600000, 1993),
    entry(630000, 1994),
    entry(660000, 1995),
    entry(690000, 1996),
    entry(720000, 1997),
    entry(750000, 1998),
    entry(800000, 1999),
];

pub static TABLE: RangeTable = RangeTable::new(&SEQUENTIAL);

static CASCADE: Lazy<Cascade> = Lazy::new(|| {
    Cascade::new(
        Brand::Ovation,
        vec![FormatRule::new("3-7 digits (sequential, 1966+)", r"(\d{3,7})", decode_sequential)],
    )
});

pub fn cascade() -> &'static Cascade {
    &CASCADE
}

/// Decode an Ovation serial
pub fn decode(serial: &str) -> DecodeResult {
    CASCADE.decode(serial)
}

fn decode_sequential(caps: &Captures<'_>) -> DecodeResult {
    let raw = cap(caps, 1);
    let n = digits_u64(raw);
    let lookup = TABLE.lookup(n);
    let mut info = GuitarInfo::new(Brand::Ovation, raw, lookup.describe())
        .factory_name("New Hartford, Connecticut")
        .country("USA");
    match lookup {
        RangeLookup::Year(year) => {
            info.push_note(format!("Sequential serial {n}: approximately {year}."));
            if let Some(third) = TABLE.production_third(n, 1) {
                info.push_note(format!("Within the {year} block it sits in {third} production."));
            }
        }
        RangeLookup::Later { last_year } => info.push_note(format!(
            "Serial {n} is beyond the published ranges, which end in {last_year}."
        )),
    }
    info.push_note("Ovation ranges are approximate; the label date inside the bowl is more reliable.");
    Ok(info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_strictly_increasing() {
        assert!(TABLE.is_strictly_increasing());
    }

    #[test]
    fn test_lookup() {
        assert_eq!(decode("250").unwrap().year, "1966");
        assert_eq!(decode("100000").unwrap().year, "1974");
        assert_eq!(decode("1234567").unwrap().year, "1999 or later");
    }
}
