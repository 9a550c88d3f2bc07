//! PRS (Paul Reed Smith) serial numbers
//!
//! - USA core (2008+): two-digit year + six-digit sequence
//! - SE imports: optional factory prefix, a year letter (A = 2000) and digits
//! - Set-neck USA (1985-2007): a leading year digit followed by a sequence
//!   that is cross-checked against the published per-year ranges
//! - Bolt-on (1985-2007): four digits, undated

use once_cell::sync::Lazy;
use regex::Captures;

use crate::cascade::{cap, Cascade, FormatRule};
use crate::error::DecodeResult;
use crate::models::{Brand, GuitarInfo};
use crate::range::{entry, RangeEntry, RangeLookup, RangeTable};
use crate::serial::{digits, digits_u64};
use crate::tables::{year_from_letter, FactoryTable};

const STEVENSVILLE: &str = "Stevensville, Maryland";

/// Approximate last set-neck sequence number per year
static SET_NECK: [RangeEntry; 23] = [
    entry(400, 1985),
    entry(1700, 1986),
    entry(3500, 1987),
    entry(5400, 1988),
    entry(7600, 1989),
    entry(10100, 1990),
    entry(12600, 1991),
    entry(15000, 1992),
    entry(18100, 1993),
    entry(21300, 1994),
    entry(24900, 1995),
    entry(28700, 1996),
    entry(33500, 1997),
    entry(38000, 1998),
    entry(43000, 1999),
    entry(48500, 2000),
    entry(53000, 2001),
    entry(58000, 2002),
    entry(63000, 2003),
    entry(70000, 2004),
    entry(80000, 2005),
    entry(90000, 2006),
    entry(99999, 2007),
];

pub static SET_NECK_TABLE: RangeTable = RangeTable::new(&SET_NECK);

static SE_FACTORIES: Lazy<FactoryTable> = Lazy::new(|| {
    FactoryTable::new(&[
        ("CTI", "Cort", "Indonesia"),
        ("KW", "World Musical Instruments", "Korea"),
        ("IW", "World Musical Instruments", "Indonesia"),
    ])
});

static CASCADE: Lazy<Cascade> = Lazy::new(|| {
    Cascade::new(
        Brand::Prs,
        vec![
            FormatRule::new("YY + 6 digits (USA, 2008+)", r"(\d{2})(\d{6})", decode_modern),
            FormatRule::new(
                "SE: optional CTI/KW/IW prefix + year letter + 4-6 digits",
                r"(CTI|KW|IW)?([A-Z])(\d{4,6})",
                decode_se,
            ),
            FormatRule::new("year digit + 4-5 digits (set-neck, 1985-2007)", r"(\d)(\d{4,5})", decode_set_neck),
            FormatRule::new("4 digits (bolt-on, 1985-2007)", r"(\d{4})", decode_bolt_on),
        ],
    )
});

pub fn cascade() -> &'static Cascade {
    &CASCADE
}

/// Decode a PRS serial
pub fn decode(serial: &str) -> DecodeResult {
    CASCADE.decode(serial)
}

fn decode_modern(caps: &Captures<'_>) -> DecodeResult {
    let yy = digits(cap(caps, 1));
    let year = if (8..=30).contains(&yy) { (2000 + yy).to_string() } else { format!("Unknown ({yy:02})") };
    Ok(GuitarInfo::new(Brand::Prs, cap(caps, 0), year)
        .factory_name(STEVENSVILLE)
        .country("USA")
        .note(format!(
            "From 2008 the first two digits are the year ({yy:02}) followed by sequence {}.",
            cap(caps, 2)
        )))
}

fn decode_se(caps: &Captures<'_>) -> DecodeResult {
    let letter = cap(caps, 2).chars().next().unwrap_or('?');
    let year = year_from_letter(letter, 2000).map_or_else(|| format!("Unknown ({letter})"), |y| y.to_string());
    let mut info = GuitarInfo::new(Brand::Prs, cap(caps, 0), year)
        .model("SE")
        .note(format!("SE series: year letter {letter} (A = 2000), sequence {}.", cap(caps, 3)));
    match caps.get(1).map(|m| m.as_str()) {
        Some(code) => {
            let factory = SE_FACTORIES.lookup(code);
            info = info.factory(&factory);
            info.push_note(format!("Prefix {code} identifies the {} factory.", factory.name));
        }
        None => {
            info = info.country("Korea");
            info.push_note("No factory prefix: Korean production (World Musical Instruments).");
        }
    }
    Ok(info)
}

fn decode_set_neck(caps: &Captures<'_>) -> DecodeResult {
    let lead = digits(cap(caps, 1));
    let sequence = digits_u64(cap(caps, 2));
    let lookup = SET_NECK_TABLE.lookup(sequence);
    let mut info = GuitarInfo::new(Brand::Prs, cap(caps, 0), lookup.describe())
        .factory_name(STEVENSVILLE)
        .country("USA")
        .note(format!(
            "Set-neck serial: year digit {lead}, sequence {sequence}. The sequence places it in {}.",
            lookup.describe()
        ));
    match lookup {
        RangeLookup::Year(year) if year.rem_euclid(10) as u32 != lead => info.push_note(format!(
            "The leading digit {lead} does not match the last digit of {year}; the year digit was \
             stamped when the body was completed, so it can run a year behind the sequence."
        )),
        RangeLookup::Year(_) => {}
        RangeLookup::Later { .. } => info.push_note("The sequence is beyond the published set-neck ranges."),
    }
    Ok(info)
}

fn decode_bolt_on(caps: &Captures<'_>) -> DecodeResult {
    Ok(GuitarInfo::new(Brand::Prs, cap(caps, 1), "1985-2007")
        .factory_name(STEVENSVILLE)
        .country("USA")
        .note(
            "Four-digit serial: bolt-on models (CE, EG) were numbered without a year digit, \
             so the year cannot be determined from the serial alone.",
        ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modern_usa() {
        let info = decode("12123456").unwrap();
        assert_eq!(info.year, "2012");
    }

    #[test]
    fn test_se_with_prefix() {
        let info = decode("CTIF12345").unwrap();
        assert_eq!(info.year, "2005");
        assert_eq!(info.country.as_deref(), Some("Indonesia"));
        assert_eq!(info.model.as_deref(), Some("SE"));
    }

    #[test]
    fn test_se_without_prefix() {
        let info = decode("A12345").unwrap();
        assert_eq!(info.year, "2000");
        assert_eq!(info.country.as_deref(), Some("Korea"));
    }

    #[test]
    fn test_set_neck_sequence() {
        // 9 + 25000 → 1996 table band, leading 9 disagrees
        let info = decode("925000").unwrap();
        assert_eq!(info.year, "1996");
        assert!(info.notes.contains("does not match"));
        assert!(!decode("625000").unwrap().notes.contains("does not match"));
    }

    #[test]
    fn test_table_is_strictly_increasing() {
        assert!(SET_NECK_TABLE.is_strictly_increasing());
    }
}
