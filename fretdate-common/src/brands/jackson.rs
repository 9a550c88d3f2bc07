//! Jackson serial numbers

use once_cell::sync::Lazy;
use regex::Captures;

use crate::cascade::{cap, Cascade, FormatRule};
use crate::error::DecodeResult;
use crate::models::{Brand, GuitarInfo};
use crate::range::{entry, RangeEntry, RangeLookup, RangeTable};
use crate::serial::{digits, digits_u64};
use crate::tables::FactoryTable;

/// Approximate last USA `J` number per year
static USA: [RangeEntry; 15] = [
    entry(1200, 1986),
    entry(2300, 1987),
    entry(3700, 1988),
    entry(5400, 1989),
    entry(7300, 1990),
    entry(9300, 1991),
    entry(11300, 1992),
    entry(13000, 1993),
    entry(14800, 1994),
    entry(16500, 1995),
    entry(18200, 1996),
    entry(20000, 1997),
    entry(22000, 1998),
    entry(24000, 1999),
    entry(26000, 2000),
];

pub static USA_TABLE: RangeTable = RangeTable::new(&USA);

static FACTORIES: Lazy<FactoryTable> = Lazy::new(|| {
    FactoryTable::new(&[
        ("ICJ", "Cor-Tek (Cort)", "Indonesia"),
        ("ISJ", "Samick", "Indonesia"),
        ("CWJ", "Chinese plant", "China"),
        ("XJ", "Chinese plant", "China"),
    ])
});

static CASCADE: Lazy<Cascade> = Lazy::new(|| {
    Cascade::new(
        Brand::Jackson,
        vec![
            FormatRule::new(
                "ICJ/CWJ/ISJ/XJ + YY + 4-6 digits (imports)",
                r"(ICJ|CWJ|ISJ|XJ)(\d{2})(\d{4,6})",
                decode_import,
            ),
            FormatRule::new("MX + YY + 4-6 digits (Mexico)", r"MX(\d{2})(\d{4,6})", decode_mexico),
            FormatRule::new("J + 4-5 digits (USA, 1986+)", r"J(\d{4,5})", decode_usa),
            FormatRule::new("6-7 digits (Japan, 1986-1997)", r"(\d{6,7})", decode_japan),
        ],
    )
});

pub fn cascade() -> &'static Cascade {
    &CASCADE
}

/// Decode a Jackson serial
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
    let factory = FACTORIES.lookup(code);
    Ok(GuitarInfo::new(Brand::Jackson, cap(caps, 0), resolve_year(yy))
        .factory(&factory)
        .note(format!("Factory code {code}, year {yy:02}, sequence {}.", cap(caps, 3))))
}

fn decode_mexico(caps: &Captures<'_>) -> DecodeResult {
    let yy = digits(cap(caps, 1));
    Ok(GuitarInfo::new(Brand::Jackson, cap(caps, 0), resolve_year(yy))
        .factory_name("Ensenada")
        .country("Mexico")
        .note(format!("MX prefix: Ensenada production, year {yy:02}, sequence {}.", cap(caps, 2))))
}

fn decode_usa(caps: &Captures<'_>) -> DecodeResult {
    let n = digits_u64(cap(caps, 1));
    let lookup = USA_TABLE.lookup(n);
    let mut info = GuitarInfo::new(Brand::Jackson, cap(caps, 0), lookup.describe())
        .factory_name("Ontario, California")
        .country("USA")
        .model("USA Select");
    match lookup {
        RangeLookup::Year(year) => info.push_note(format!(
            "J-series neck-through serial {n}: approximately {year}. Ranges are approximate and overlap at year boundaries."
        )),
        RangeLookup::Later { last_year } => info.push_note(format!(
            "J-series serial {n} is beyond the approximate ranges, which end in {last_year}."
        )),
    }
    Ok(info)
}

fn decode_japan(caps: &Captures<'_>) -> DecodeResult {
    Ok(GuitarInfo::new(Brand::Jackson, cap(caps, 1), "1986-1997")
        .factory_name("Chushin Gakki")
        .country("Japan")
        .note(
            "Plain six- or seven-digit serial: Japanese Jackson Professional production. \
             These numbers are not date-coded; the year range is approximate.",
        ))
}
