//! Kramer serial numbers
//!
//! Neptune-era (1981-1987) neck plates carry a letter prefix that roughly
//! tracks the year. Modern imports use `KI`/`KC` + two-digit year.

use once_cell::sync::Lazy;
use regex::Captures;

use crate::cascade::{cap, Cascade, FormatRule};
use crate::error::DecodeResult;
use crate::models::{Brand, GuitarInfo};
use crate::serial::digits;
use crate::tables::{year_from_letter, FactoryTable};

static IMPORT_FACTORIES: Lazy<FactoryTable> = Lazy::new(|| {
    FactoryTable::new(&[
        ("KI", "Indonesian plant", "Indonesia"),
        ("KC", "Chinese plant", "China"),
    ])
});

static CASCADE: Lazy<Cascade> = Lazy::new(|| {
    Cascade::new(
        Brand::Kramer,
        vec![
            FormatRule::new("KI/KC + YY + 4-7 digits (modern import)", r"(KI|KC)(\d{2})(\d{4,7})", decode_import),
            FormatRule::new("letter A-G + 4-5 digits (neck plate, 1981-1987)", r"([A-G])(\d{4,5})", decode_neck_plate),
        ],
    )
});

pub fn cascade() -> &'static Cascade {
    &CASCADE
}

/// Decode a Kramer serial
pub fn decode(serial: &str) -> DecodeResult {
    CASCADE.decode(serial)
}

fn decode_import(caps: &Captures<'_>) -> DecodeResult {
    let code = cap(caps, 1);
    let yy = digits(cap(caps, 2));
    let year = if yy <= 30 { (2000 + yy).to_string() } else { format!("Unknown ({yy:02})") };
    Ok(GuitarInfo::new(Brand::Kramer, cap(caps, 0), year)
        .factory(&IMPORT_FACTORIES.lookup(code))
        .note(format!("Modern import: factory code {code}, year {yy:02}, sequence {}.", cap(caps, 3))))
}

fn decode_neck_plate(caps: &Captures<'_>) -> DecodeResult {
    let letter = cap(caps, 1).chars().next().unwrap_or('?');
    let year = year_from_letter(letter, 1981).map_or_else(|| "1981-1987".to_string(), |y| y.to_string());
    Ok(GuitarInfo::new(Brand::Kramer, cap(caps, 0), year)
        .factory_name("Neptune, New Jersey")
        .country("USA")
        .note(format!(
            "Neck-plate serial with letter {letter}, number {}. Letters advanced roughly once a year from A (1981), \
             but plates were used out of order, so the year is approximate.",
            cap(caps, 2)
        )))
}
