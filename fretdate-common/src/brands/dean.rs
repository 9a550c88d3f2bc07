//! Dean serial numbers

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
        ("US", "Dean USA (Tampa, Florida)", "USA"),
        ("KS", "Samick", "Korea"),
        ("KC", "Cort", "Korea"),
        ("IS", "Samick", "Indonesia"),
        ("IC", "Cort", "Indonesia"),
        ("CS", "Samick", "China"),
        ("K", "Korean plant (unspecified)", "Korea"),
        ("I", "Indonesian plant (unspecified)", "Indonesia"),
        ("C", "Chinese plant (unspecified)", "China"),
    ])
});

static CASCADE: Lazy<Cascade> = Lazy::new(|| {
    Cascade::new(
        Brand::Dean,
        vec![
            FormatRule::new(
                "2-letter factory code + YYMM + 4 digits",
                r"([A-Z]{2})(\d{2})(\d{2})(\d{4})",
                decode_two_letter,
            ),
            FormatRule::new("K/I/C + YY + 5 digits", r"([KIC])(\d{2})(\d{5})", decode_one_letter),
            FormatRule::new("YY + 4 digits (USA, 1977-1986)", r"(7[7-9]|8[0-6])(\d{4})", decode_usa_early),
        ],
    )
});

pub fn cascade() -> &'static Cascade {
    &CASCADE
}

/// Decode a Dean serial
pub fn decode(serial: &str) -> DecodeResult {
    CASCADE.decode(serial)
}

fn resolve_year(yy: u32) -> String {
    match yy {
        0..=30 => (2000 + yy).to_string(),
        97..=99 => (1900 + yy).to_string(),
        _ => format!("Unknown ({yy:02})"),
    }
}

fn decode_two_letter(caps: &Captures<'_>) -> DecodeResult {
    let code = cap(caps, 1);
    let yy = digits(cap(caps, 2));
    let (_, month) = parse_month(cap(caps, 3))?;
    let factory = FACTORIES.lookup(code);
    let mut info = GuitarInfo::new(Brand::Dean, cap(caps, 0), resolve_year(yy))
        .month(month)
        .factory(&factory)
        .note(format!(
            "Factory code {code}, year {yy:02}, month {}, sequence {}.",
            cap(caps, 3),
            cap(caps, 4)
        ));
    if !factory.known {
        info.push_note(format!("Factory code {code} is not in the known Dean factory list."));
    }
    Ok(info)
}

fn decode_one_letter(caps: &Captures<'_>) -> DecodeResult {
    let code = cap(caps, 1);
    let yy = digits(cap(caps, 2));
    Ok(GuitarInfo::new(Brand::Dean, cap(caps, 0), resolve_year(yy))
        .factory(&FACTORIES.lookup(code))
        .note(format!("Country letter {code}, year {yy:02}, sequence {}.", cap(caps, 3))))
}

fn decode_usa_early(caps: &Captures<'_>) -> DecodeResult {
    let yy = digits(cap(caps, 1));
    Ok(GuitarInfo::new(Brand::Dean, cap(caps, 0), (1900 + yy).to_string())
        .factory_name("Evanston / Chicago, Illinois")
        .country("USA")
        .note(format!(
            "Early USA serial: the first two digits ({yy}) are the year, followed by sequence {}.",
            cap(caps, 2)
        )))
}
