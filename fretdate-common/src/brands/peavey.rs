//! Peavey serial numbers
//!
//! Imports: factory code + YY + MM + sequence. USA instruments built in
//! Meridian carry an eight-digit sequential number that is not date-coded.

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
        ("KSP", "Samick", "Korea"),
        ("CSP", "Samick", "China"),
        ("ISP", "Samick", "Indonesia"),
        ("KC", "Cort", "Korea"),
        ("IC", "Cort", "Indonesia"),
        ("CY", "Yako", "China"),
        ("KW", "World Musical Instruments", "Korea"),
        ("IW", "World Musical Instruments", "Indonesia"),
    ])
});

static CASCADE: Lazy<Cascade> = Lazy::new(|| {
    Cascade::new(
        Brand::Peavey,
        vec![
            FormatRule::new(
                "2-3 letter factory code + YY + MM + 4-5 digits",
                r"([A-Z]{2,3})(\d{2})(\d{2})(\d{4,5})",
                decode_import,
            ),
            FormatRule::new("8 digits (USA sequential)", r"(\d{8})", decode_usa),
        ],
    )
});

pub fn cascade() -> &'static Cascade {
    &CASCADE
}

/// Decode a Peavey serial
pub fn decode(serial: &str) -> DecodeResult {
    CASCADE.decode(serial)
}

fn resolve_year(yy: u32) -> String {
    match yy {
        0..=30 => (2000 + yy).to_string(),
        90..=99 => (1900 + yy).to_string(),
        _ => format!("Unknown ({yy:02})"),
    }
}

fn decode_import(caps: &Captures<'_>) -> DecodeResult {
    let code = cap(caps, 1);
    let yy = digits(cap(caps, 2));
    let (_, month) = parse_month(cap(caps, 3))?;
    let factory = FACTORIES.lookup(code);
    let mut info = GuitarInfo::new(Brand::Peavey, cap(caps, 0), resolve_year(yy))
        .month(month)
        .factory(&factory)
        .note(format!(
            "Import: factory code {code}, year {yy:02}, month {}, sequence {}.",
            cap(caps, 3),
            cap(caps, 4)
        ));
    if !factory.known {
        info.push_note(format!("Factory code {code} is not in the known Peavey factory list."));
    }
    Ok(info)
}

fn decode_usa(caps: &Captures<'_>) -> DecodeResult {
    Ok(GuitarInfo::new(Brand::Peavey, cap(caps, 1), "Unknown")
        .factory_name("Meridian, Mississippi")
        .country("USA")
        .note(
            "Eight-digit USA serial. Peavey numbered USA instruments sequentially without a date code, \
             so the year cannot be read from the serial; the neck and body are often date-stamped.",
        ))
}
