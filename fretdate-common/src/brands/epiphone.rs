//! Epiphone serial numbers
//!
//! Imported Epiphones carry a factory code (one or two letters) followed by
//! year, month and a production sequence. Month digits are strictly validated.
//!
//! Serials that start with the digit `1` are usually a misread `I` (Saein);
//! that correction is applied by the orchestration layer, not here.

use once_cell::sync::Lazy;
use regex::Captures;

use crate::cascade::{cap, Cascade, FormatRule};
use crate::dating::parse_month;
use crate::error::DecodeResult;
use crate::models::{Brand, GuitarInfo};
use crate::serial::digits;
use crate::tables::FactoryTable;

static FACTORIES: Lazy<FactoryTable> = Lazy::new(|| {
    FactoryTable::new(&[
        ("I", "Saein", "Korea"),
        ("U", "Unsung", "Korea"),
        ("S", "Samick", "Korea"),
        ("R", "Peerless", "Korea"),
        ("P", "Peerless", "Korea"),
        ("K", "Korean plant (unspecified)", "Korea"),
        ("F", "FujiGen", "Japan"),
        ("T", "Terada", "Japan"),
        ("Z", "Zaozhuang Saehan", "China"),
        ("SI", "Samick", "Indonesia"),
        ("CI", "Cort", "Indonesia"),
        ("EA", "Gibson Qingdao", "China"),
        ("EE", "Gibson Qingdao", "China"),
        ("DW", "DaeWon", "China"),
        ("MC", "Muse", "China"),
        ("SJ", "SaeJung", "China"),
        ("QU", "Qingdao", "China"),
        ("MR", "Muse", "Indonesia"),
    ])
});

static CASCADE: Lazy<Cascade> = Lazy::new(|| {
    Cascade::new(
        Brand::Epiphone,
        vec![
            FormatRule::new(
                "FF + YY + MM + 4-5 digits (two-letter factory code)",
                r"([A-Z]{2})(\d{2})(\d{2})(\d{4,5})",
                decode_factory_yymm,
            ),
            FormatRule::new(
                "F + YY + MM + 4-5 digits (one-letter factory code)",
                r"([A-Z])(\d{2})(\d{2})(\d{4,5})",
                decode_factory_yymm,
            ),
            FormatRule::new(
                "F + Y + MM + 4 digits (1990s, single year digit)",
                r"([A-Z])(\d)(\d{2})(\d{4})",
                decode_factory_ymm,
            ),
        ],
    )
});

pub fn cascade() -> &'static Cascade {
    &CASCADE
}

/// Decode an Epiphone serial
pub fn decode(serial: &str) -> DecodeResult {
    CASCADE.decode(serial)
}

/// True when `code` is a known Epiphone factory code
pub fn is_factory_code(code: &str) -> bool {
    FACTORIES.contains(code)
}

fn resolve_year(yy: u32) -> String {
    match yy {
        0..=30 => (2000 + yy).to_string(),
        86..=99 => (1900 + yy).to_string(),
        _ => format!("Unknown ({yy:02})"),
    }
}

fn factory_notes(info: &mut GuitarInfo, code: &str, known: bool) {
    if !known {
        info.push_note(format!("Factory code {code} is not in the known Epiphone factory list."));
    }
    if code == "U" {
        info.push_note("Do not confuse the U prefix with USA-made: U is the Unsung factory in Korea.");
    }
}

fn decode_factory_yymm(caps: &Captures<'_>) -> DecodeResult {
    let code = cap(caps, 1);
    let yy = digits(cap(caps, 2));
    let (_, month) = parse_month(cap(caps, 3))?;
    let sequence = cap(caps, 4);
    let factory = FACTORIES.lookup(code);

    let mut info = GuitarInfo::new(Brand::Epiphone, cap(caps, 0), resolve_year(yy))
        .month(month)
        .factory(&factory)
        .note(format!(
            "Factory code {code} ({}), year {yy:02}, month {}, sequence {sequence}.",
            factory.name,
            cap(caps, 3)
        ));
    factory_notes(&mut info, code, factory.known);
    Ok(info)
}

fn decode_factory_ymm(caps: &Captures<'_>) -> DecodeResult {
    let code = cap(caps, 1);
    let d = digits(cap(caps, 2));
    let (_, month) = parse_month(cap(caps, 3))?;
    let factory = FACTORIES.lookup(code);

    let mut info = GuitarInfo::new(Brand::Epiphone, cap(caps, 0), format!("Possibly 199{d}"))
        .month(month)
        .factory(&factory)
        .note(format!(
            "Factory code {code} ({}), single year digit {d}, month {}, sequence {}.",
            factory.name,
            cap(caps, 3),
            cap(caps, 4)
        ))
        .note(format!(
            "Single-digit years were used in the 1990s, so 199{d} is most likely, but 200{d} cannot be ruled out."
        ));
    factory_notes(&mut info, code, factory.known);
    Ok(info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_letter_factory() {
        let info = decode("I99021234").unwrap();
        assert_eq!(info.year, "1999");
        assert_eq!(info.month.as_deref(), Some("February"));
        assert_eq!(info.factory.as_deref(), Some("Saein"));
        assert_eq!(info.country.as_deref(), Some("Korea"));
    }

    #[test]
    fn test_two_letter_factory() {
        let info = decode("EA12051234").unwrap();
        assert_eq!(info.year, "2012");
        assert_eq!(info.month.as_deref(), Some("May"));
        assert_eq!(info.country.as_deref(), Some("China"));
    }

    #[test]
    fn test_invalid_month_rejected() {
        let err = decode("I99131234").unwrap_err();
        assert!(err.to_string().contains("Expected 01-12"));
    }

    #[test]
    fn test_single_digit_year_is_qualified() {
        let info = decode("S3051234").unwrap();
        assert_eq!(info.year, "Possibly 1993");
        assert_eq!(info.month.as_deref(), Some("May"));
    }

    #[test]
    fn test_u_prefix_caveat() {
        let info = decode("U03071234").unwrap();
        assert!(info.notes.contains("USA-made"));
    }

    #[test]
    fn test_leading_digit_one_is_not_handled_here() {
        assert!(decode("199021234").is_err());
    }
}
