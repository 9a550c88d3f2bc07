//! Washburn serial numbers
//!
//! Imports carry a factory code, a two-digit year and a two-digit production
//! week, then a four-digit sequence. Weeks are converted to an approximate
//! calendar month.

use once_cell::sync::Lazy;
use regex::Captures;

use crate::cascade::{cap, Cascade, FormatRule};
use crate::dating::{month_name, week_to_month};
use crate::error::DecodeResult;
use crate::models::{Brand, GuitarInfo};
use crate::serial::digits;
use crate::tables::FactoryTable;

static FACTORIES: Lazy<FactoryTable> = Lazy::new(|| {
    FactoryTable::new(&[
        ("SI", "Samick", "Indonesia"),
        ("S", "Samick", "Korea"),
        ("CI", "Cort", "Indonesia"),
        ("C", "Cort", "Korea"),
        ("Y", "Young Chang", "Korea"),
        ("P", "Peerless", "Korea"),
        ("W", "World Musical Instruments", "Korea"),
        ("I", "Indonesian plant (unspecified)", "Indonesia"),
    ])
});

static CASCADE: Lazy<Cascade> = Lazy::new(|| {
    Cascade::new(
        Brand::Washburn,
        vec![
            FormatRule::new(
                "factory code (1-2 letters) + YY + week + 4 digits",
                r"([A-Z]{1,2})(\d{2})(\d{2})(\d{4})",
                decode_week_coded,
            ),
            FormatRule::new("YY + 4-5 digits (6-7 digits, 1985-1999)", r"(8[5-9]|9\d)(\d{4,5})", decode_numeric),
        ],
    )
});

pub fn cascade() -> &'static Cascade {
    &CASCADE
}

/// Decode a Washburn serial
pub fn decode(serial: &str) -> DecodeResult {
    CASCADE.decode(serial)
}

fn resolve_year(yy: u32) -> String {
    match yy {
        0..=30 => (2000 + yy).to_string(),
        85..=99 => (1900 + yy).to_string(),
        _ => format!("Unknown ({yy:02})"),
    }
}

fn decode_week_coded(caps: &Captures<'_>) -> DecodeResult {
    let code = cap(caps, 1);
    let yy = digits(cap(caps, 2));
    let raw_week = cap(caps, 3);
    let month = week_to_month(raw_week)?;
    let sequence = cap(caps, 4);
    let factory = FACTORIES.lookup(code);

    let mut info = GuitarInfo::new(Brand::Washburn, cap(caps, 0), resolve_year(yy))
        .factory(&factory)
        .note(format!(
            "Factory code {code} ({}, {}), year {yy:02}, production week {raw_week}, sequence {sequence}.",
            factory.name, factory.country
        ))
        .note("The month is estimated from the production week and may be off by one.");
    if let Some(name) = month_name(month) {
        info = info.month(name);
    }
    if !factory.known {
        info.push_note(format!("Factory code {code} is not in the known Washburn factory list."));
    }
    Ok(info)
}

fn decode_numeric(caps: &Captures<'_>) -> DecodeResult {
    let yy = digits(cap(caps, 1));
    Ok(GuitarInfo::new(Brand::Washburn, cap(caps, 0), resolve_year(yy))
        .note(format!(
            "Numeric serial: the first two digits ({yy:02}) are the year, followed by sequence {}. \
             The factory is not encoded.",
            cap(caps, 2)
        )))
}
