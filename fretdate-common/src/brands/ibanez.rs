//! Ibanez serial numbers
//!
//! FujiGen (Japan) used a month letter until 1987, then an `F` prefix with
//! a single year digit, then two year digits from 1997. Korean, Indonesian
//! and Chinese plants use a factory code followed by two year digits.

use once_cell::sync::Lazy;
use regex::Captures;

use crate::cascade::{cap, Cascade, FormatRule};
use crate::dating::{decade_candidates, join_years, month_name};
use crate::error::DecodeResult;
use crate::models::{Brand, GuitarInfo};
use crate::serial::digits;
use crate::tables::{month_from_letter, FactoryTable};

const FUJIGEN: &str = "FujiGen Gakki";

static FACTORIES: Lazy<FactoryTable> = Lazy::new(|| {
    FactoryTable::new(&[
        ("PW", "Peerless", "Korea"),
        ("PR", "Peerless", "Korea"),
        ("GS", "Sung-Eum", "Korea"),
        ("C", "Cort", "Korea"),
        ("S", "Saein", "Korea"),
        ("W", "World Musical Instruments", "Korea"),
        ("K", "Korean plant (unspecified)", "Korea"),
        ("I", "Cort", "Indonesia"),
        ("Z", "Zaozhuang", "China"),
    ])
});

static CASCADE: Lazy<Cascade> = Lazy::new(|| {
    Cascade::new(
        Brand::Ibanez,
        vec![
            FormatRule::new(
                "month letter A-L + YY + 4 digits (FujiGen, 1975-1987)",
                r"([A-L])(7[5-9]|8[0-7])(\d{4})",
                decode_month_letter,
            ),
            FormatRule::new("F + YY + 5 digits (FujiGen, 1997+)", r"F(9[7-9]|[0-2]\d)(\d{5})", decode_fujigen_yy),
            FormatRule::new("F + Y + 5-6 digits (FujiGen, 1987-1996)", r"F(\d)(\d{5,6})", decode_fujigen_y),
            FormatRule::new(
                "factory code (PW, PR, GS, C, S, W, I, Z, K) + YY + 5-7 digits",
                r"(PW|PR|GS|C|S|W|I|Z|K)(\d{2})(\d{5,7})",
                decode_factory,
            ),
        ],
    )
});

pub fn cascade() -> &'static Cascade {
    &CASCADE
}

/// Decode an Ibanez serial
pub fn decode(serial: &str) -> DecodeResult {
    CASCADE.decode(serial)
}

fn resolve_year(yy: u32) -> String {
    match yy {
        0..=30 => (2000 + yy).to_string(),
        87..=99 => (1900 + yy).to_string(),
        _ => format!("Unknown ({yy:02})"),
    }
}

fn decode_month_letter(caps: &Captures<'_>) -> DecodeResult {
    let letter = cap(caps, 1).chars().next().unwrap_or('?');
    let yy = digits(cap(caps, 2));
    let mut info = GuitarInfo::new(Brand::Ibanez, cap(caps, 0), (1900 + yy).to_string())
        .factory_name(FUJIGEN)
        .country("Japan")
        .note(format!(
            "FujiGen month-letter format: {letter} is the month (A = January), {yy} the year, sequence {}.",
            cap(caps, 3)
        ));
    if let Some(name) = month_from_letter(letter).and_then(month_name) {
        info = info.month(name);
    }
    Ok(info)
}

fn decode_fujigen_yy(caps: &Captures<'_>) -> DecodeResult {
    let yy = digits(cap(caps, 1));
    Ok(GuitarInfo::new(Brand::Ibanez, cap(caps, 0), resolve_year(yy))
        .factory_name(FUJIGEN)
        .country("Japan")
        .note(format!(
            "F prefix (FujiGen) with two year digits {yy:02}, sequence {}.",
            cap(caps, 2)
        )))
}

fn decode_fujigen_y(caps: &Captures<'_>) -> DecodeResult {
    let d = digits(cap(caps, 1));
    let years = decade_candidates(d, &[1980, 1990]);
    Ok(GuitarInfo::new(Brand::Ibanez, cap(caps, 0), join_years(&years))
        .factory_name(FUJIGEN)
        .country("Japan")
        .note(format!(
            "F prefix (FujiGen) with a single year digit {d}, sequence {}. The decade is not encoded; \
             check hardware and catalogue features to choose between {}.",
            cap(caps, 2),
            join_years(&years)
        )))
}

fn decode_factory(caps: &Captures<'_>) -> DecodeResult {
    let code = cap(caps, 1);
    let yy = digits(cap(caps, 2));
    let factory = FACTORIES.lookup(code);
    Ok(GuitarInfo::new(Brand::Ibanez, cap(caps, 0), resolve_year(yy))
        .factory(&factory)
        .note(format!(
            "Factory code {code} ({}, {}), year digits {yy:02}, sequence {}.",
            factory.name,
            factory.country,
            cap(caps, 3)
        )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_letter() {
        let info = decode("C781234").unwrap();
        assert_eq!(info.year, "1978");
        assert_eq!(info.month.as_deref(), Some("March"));
        assert_eq!(info.country.as_deref(), Some("Japan"));
    }

    #[test]
    fn test_fujigen_two_digit_year_wins() {
        assert_eq!(
            cascade().matching_rule("F9812345"),
            Some("F + YY + 5 digits (FujiGen, 1997+)")
        );
        assert_eq!(decode("F9812345").unwrap().year, "1998");
    }

    #[test]
    fn test_fujigen_single_digit_compound() {
        assert_eq!(decode("F891234").unwrap().year, "1988 or 1998");
        assert_eq!(decode("F8123456").unwrap().year, "1988 or 1998");
    }

    #[test]
    fn test_factory_code() {
        let info = decode("PW05123456").unwrap();
        assert_eq!(info.year, "2005");
        assert_eq!(info.factory.as_deref(), Some("Peerless"));
        let info = decode("I10123456").unwrap();
        assert_eq!(info.country.as_deref(), Some("Indonesia"));
    }
}
