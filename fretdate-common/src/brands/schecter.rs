//! Schecter serial numbers (Diamond Series imports)
//!
//! `YYMMNNNN`, optionally behind a factory prefix. The month is strictly
//! validated and there is no alternate layout.

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
        ("W", "World Musical Instruments", "Korea"),
        ("IW", "World Musical Instruments", "Indonesia"),
        ("S", "Samick", "Korea"),
        ("C", "Cort", "Korea"),
        ("N", "Korean plant (unspecified)", "Korea"),
    ])
});

static CASCADE: Lazy<Cascade> = Lazy::new(|| {
    Cascade::new(
        Brand::Schecter,
        vec![
            FormatRule::new(
                "factory prefix (W, IW, S, C, N) + YYMMNNNN",
                r"(IW|W|S|C|N)(\d{2})(\d{2})(\d{4})",
                decode_yymm,
            ),
            FormatRule::new("YYMMNNNN (8 digits)", r"()(\d{2})(\d{2})(\d{4})", decode_yymm),
        ],
    )
});

pub fn cascade() -> &'static Cascade {
    &CASCADE
}

/// Decode a Schecter serial
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

fn decode_yymm(caps: &Captures<'_>) -> DecodeResult {
    let code = cap(caps, 1);
    let yy = digits(cap(caps, 2));
    let (_, month) = parse_month(cap(caps, 3))?;
    let mut info = GuitarInfo::new(Brand::Schecter, cap(caps, 0), resolve_year(yy))
        .month(month)
        .note(format!("Year {yy:02}, month {}, sequence {}.", cap(caps, 3), cap(caps, 4)));

    if code.is_empty() {
        info.push_note("No factory prefix; Diamond Series instruments of this era were built in Korea or Indonesia.");
    } else {
        let factory = FACTORIES.lookup(code);
        info.push_note(format!("Prefix {code}: {} ({}).", factory.name, factory.country));
        info = info.factory(&factory);
    }
    Ok(info)
}
