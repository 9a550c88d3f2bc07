//! Cort serial numbers
//!
//! `YYMMNNNN`, optionally behind a factory prefix. The month is strictly
//! validated with no fallback layout.

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
        ("IC", "Cor-Tek Cileungsi", "Indonesia"),
        ("I", "Cor-Tek Surabaya", "Indonesia"),
        ("C", "Cort Dalian", "China"),
        ("K", "Cort Incheon", "Korea"),
        ("KC", "Cort Incheon", "Korea"),
    ])
});

static CASCADE: Lazy<Cascade> = Lazy::new(|| {
    Cascade::new(
        Brand::Cort,
        vec![FormatRule::new(
            "optional factory letters + YYMMNNNN",
            r"([A-Z]{1,2})?(\d{2})(\d{2})(\d{4})",
            decode_yymm,
        )],
    )
});

pub fn cascade() -> &'static Cascade {
    &CASCADE
}

/// Decode a Cort serial
pub fn decode(serial: &str) -> DecodeResult {
    CASCADE.decode(serial)
}

fn resolve_year(yy: u32) -> String {
    match yy {
        0..=30 => (2000 + yy).to_string(),
        73..=99 => (1900 + yy).to_string(),
        _ => format!("Unknown ({yy:02})"),
    }
}

fn decode_yymm(caps: &Captures<'_>) -> DecodeResult {
    let code = cap(caps, 1);
    let yy = digits(cap(caps, 2));
    let (_, month) = parse_month(cap(caps, 3))?;
    let mut info = GuitarInfo::new(Brand::Cort, cap(caps, 0), resolve_year(yy))
        .month(month)
        .note(format!("Year {yy:02}, month {}, sequence {}.", cap(caps, 3), cap(caps, 4)));
    if !code.is_empty() {
        let factory = FACTORIES.lookup(code);
        info.push_note(format!("Factory prefix {code}: {} ({}).", factory.name, factory.country));
        info = info.factory(&factory);
    }
    Ok(info)
}
