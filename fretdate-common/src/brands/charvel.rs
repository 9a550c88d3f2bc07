//! Charvel serial numbers

use once_cell::sync::Lazy;
use regex::Captures;

use crate::cascade::{cap, Cascade, FormatRule};
use crate::error::DecodeResult;
use crate::models::{Brand, GuitarInfo};
use crate::range::{entry, RangeEntry, RangeTable};
use crate::serial::{digits, digits_u64};
use crate::tables::FactoryTable;

/// First number of the San Dimas neck-plate run
const SAN_DIMAS_FIRST: u64 = 1001;

/// San Dimas neck-plate serials, 1981-1986
static SAN_DIMAS: [RangeEntry; 6] = [
    entry(1100, 1981),
    entry(1725, 1982),
    entry(2500, 1983),
    entry(3600, 1984),
    entry(4736, 1985),
    entry(5482, 1986),
];

pub static SAN_DIMAS_TABLE: RangeTable = RangeTable::new(&SAN_DIMAS);

static FACTORIES: Lazy<FactoryTable> = Lazy::new(|| {
    FactoryTable::new(&[
        ("ICC", "Cor-Tek (Cort)", "Indonesia"),
        ("CJC", "Chinese plant", "China"),
    ])
});

static CASCADE: Lazy<Cascade> = Lazy::new(|| {
    Cascade::new(
        Brand::Charvel,
        vec![
            FormatRule::new("ICC/CJC + YY + 4-6 digits (imports)", r"(ICC|CJC)(\d{2})(\d{4,6})", decode_import),
            FormatRule::new("MC + YY + 4-6 digits (Mexico)", r"MC(\d{2})(\d{4,6})", decode_mexico),
            FormatRule::new("C + YY + 5-6 digits (USA)", r"C(\d{2})(\d{5,6})", decode_usa),
            FormatRule::new("4 digits 1001-5482 (San Dimas, 1981-1986)", r"(\d{4})", decode_san_dimas),
        ],
    )
});

pub fn cascade() -> &'static Cascade {
    &CASCADE
}

/// Decode a Charvel serial
pub fn decode(serial: &str) -> DecodeResult {
    CASCADE.decode(serial)
}

fn resolve_year(yy: u32) -> String {
    match yy {
        0..=30 => (2000 + yy).to_string(),
        95..=99 => (1900 + yy).to_string(),
        _ => format!("Unknown ({yy:02})"),
    }
}

fn decode_import(caps: &Captures<'_>) -> DecodeResult {
    let code = cap(caps, 1);
    let yy = digits(cap(caps, 2));
    Ok(GuitarInfo::new(Brand::Charvel, cap(caps, 0), resolve_year(yy))
        .factory(&FACTORIES.lookup(code))
        .note(format!("Factory code {code}, year {yy:02}, sequence {}.", cap(caps, 3))))
}

fn decode_mexico(caps: &Captures<'_>) -> DecodeResult {
    let yy = digits(cap(caps, 1));
    Ok(GuitarInfo::new(Brand::Charvel, cap(caps, 0), resolve_year(yy))
        .factory_name("Ensenada")
        .country("Mexico")
        .note(format!("MC prefix: Mexican production, year {yy:02}, sequence {}.", cap(caps, 2))))
}

fn decode_usa(caps: &Captures<'_>) -> DecodeResult {
    let yy = digits(cap(caps, 1));
    Ok(GuitarInfo::new(Brand::Charvel, cap(caps, 0), resolve_year(yy))
        .factory_name("Corona, California")
        .country("USA")
        .note(format!("C prefix: USA production, year {yy:02}, sequence {}.", cap(caps, 2))))
}

fn decode_san_dimas(caps: &Captures<'_>) -> DecodeResult {
    let raw = cap(caps, 1);
    let n = digits_u64(raw);
    if n < SAN_DIMAS_FIRST {
        return Ok(GuitarInfo::new(Brand::Charvel, raw, "Unknown")
            .country("USA")
            .note(format!(
                "Four-digit serial {n} is below {SAN_DIMAS_FIRST}, where the San Dimas neck-plate run starts."
            )));
    }
    let lookup = SAN_DIMAS_TABLE.lookup(n);
    Ok(GuitarInfo::new(Brand::Charvel, raw, lookup.describe())
        .factory_name("San Dimas, California")
        .country("USA")
        .note(format!(
            "San Dimas neck-plate serial {n} ({SAN_DIMAS_FIRST}-5482 ran from 1981 to 1986). \
             Neck plates were not always used in order, so the year is approximate."
        )))
}
