//! ESP and LTD serial numbers
//!
//! LTD imports: factory code + YY + MM + 4 digits, month strictly validated.
//!
//! ESP Japan: eight digits read as `DDMMYYNN`. When those digits do not form a
//! valid date, the same digits are re-read as `MMDDYYNN` (both layouts are
//! found on Japanese instruments). Only when neither layout gives a valid date
//! is the serial rejected.

use once_cell::sync::Lazy;
use regex::Captures;

use crate::cascade::{cap, Cascade, FormatRule};
use crate::dating::{parse_day_of_month, parse_month};
use crate::error::{DecodeError, DecodeResult};
use crate::models::{Brand, GuitarInfo};
use crate::serial::digits;
use crate::tables::FactoryTable;

static LTD_FACTORIES: Lazy<FactoryTable> = Lazy::new(|| {
    FactoryTable::new(&[
        ("W", "World Musical Instruments", "Korea"),
        ("IW", "World Musical Instruments", "Indonesia"),
        ("RS", "Sungeum", "Korea"),
        ("IS", "Samick", "Indonesia"),
        ("K", "Korean plant (unspecified)", "Korea"),
        ("U", "Unsung", "Korea"),
        ("C", "Chinese plant", "China"),
        ("E", "ESP", "Japan"),
    ])
});

static CASCADE: Lazy<Cascade> = Lazy::new(|| {
    Cascade::new(
        Brand::Esp,
        vec![
            FormatRule::new(
                "LTD factory code (W, IW, RS, IS, K, U, C, E) + YY + MM + 4 digits",
                r"(IW|RS|IS|W|K|U|C|E)(\d{2})(\d{2})(\d{4})",
                decode_ltd,
            ),
            FormatRule::new(
                "8 digits DDMMYYNN (ESP Japan, MMDDYYNN accepted)",
                r"(\d{2})(\d{2})(\d{2})(\d{2})",
                decode_japan,
            ),
        ],
    )
});

pub fn cascade() -> &'static Cascade {
    &CASCADE
}

/// Decode an ESP or LTD serial
pub fn decode(serial: &str) -> DecodeResult {
    CASCADE.decode(serial)
}

fn resolve_year(yy: u32) -> i32 {
    if yy <= 30 {
        2000 + yy as i32
    } else {
        1900 + yy as i32
    }
}

fn decode_ltd(caps: &Captures<'_>) -> DecodeResult {
    let code = cap(caps, 1);
    let yy = digits(cap(caps, 2));
    let (_, month) = parse_month(cap(caps, 3))?;
    let factory = LTD_FACTORIES.lookup(code);
    Ok(GuitarInfo::new(Brand::Esp, cap(caps, 0), resolve_year(yy).to_string())
        .month(month)
        .factory(&factory)
        .model("LTD")
        .note(format!(
            "LTD import: factory code {code} ({}), year {yy:02}, month {}, sequence {}.",
            factory.name,
            cap(caps, 3),
            cap(caps, 4)
        )))
}

/// Validate `raw_day`/`raw_month` as a date in `year`
fn read_date(year: i32, raw_day: &str, raw_month: &str) -> Result<(u32, &'static str), DecodeError> {
    let (month, name) = parse_month(raw_month)?;
    let day = parse_day_of_month(year, month, raw_day)?;
    Ok((day, name))
}

fn decode_japan(caps: &Captures<'_>) -> DecodeResult {
    let (first, second) = (cap(caps, 1), cap(caps, 2));
    let yy = digits(cap(caps, 3));
    let year = resolve_year(yy);

    let (day, month, layout) = match read_date(year, first, second) {
        Ok((day, month)) => (day, month, "DDMMYYNN"),
        Err(primary) => match read_date(year, second, first) {
            Ok((day, month)) => (day, month, "MMDDYYNN"),
            Err(_) => return Err(primary),
        },
    };

    let mut info = GuitarInfo::new(Brand::Esp, cap(caps, 0), year.to_string())
        .month(month)
        .day(day)
        .factory_name("ESP (Tokyo)")
        .country("Japan")
        .note(format!(
            "ESP Japan {layout} serial: {day} {month} {year}, production number {}.",
            cap(caps, 4)
        ));
    if layout == "MMDDYYNN" {
        info.push_note(format!(
            "The digits {first}{second} are not a valid day and month, so they were re-read as month then day."
        ));
    }
    Ok(info)
}
