//! Gibson serial numbers
//!
//! Formats, in cascade order:
//! - `YDDDYRRR` (1977-2005): year = digits 1 and 5, day-of-year = digits 2-4,
//!   plant/rank = digits 6-8
//! - `YDDDYBRRR` (2005-2014): as above plus a batch digit
//! - `YY` + 7 digits (2014 onward)
//! - `CS` + year digit (Custom Shop)
//! - 6 digits (1961-1969 impressed numbers, duplicated across years)
//! - 1-5 digits (1903-1947 factory order sequence)

use once_cell::sync::Lazy;
use regex::Captures;

use crate::cascade::{cap, Cascade, FormatRule};
use crate::dating::{day_of_year, decade_candidates, join_years};
use crate::error::DecodeResult;
use crate::models::{Brand, GuitarInfo};
use crate::range::{entry, RangeEntry, RangeLookup, RangeTable};
use crate::serial::{digits, digits_u64};

const KALAMAZOO: &str = "Kalamazoo, Michigan";
const NASHVILLE: &str = "Nashville, Tennessee";

/// Approximate last serial per year, 1903-1947
static PREWAR: [RangeEntry; 45] = [
    entry(1150, 1903),
    entry(1850, 1904),
    entry(2550, 1905),
    entry(3350, 1906),
    entry(4250, 1907),
    entry(5450, 1908),
    entry(6950, 1909),
    entry(8750, 1910),
    entry(10850, 1911),
    entry(13350, 1912),
    entry(16100, 1913),
    entry(20150, 1914),
    entry(25150, 1915),
    entry(32000, 1916),
    entry(39500, 1917),
    entry(47900, 1918),
    entry(53800, 1919),
    entry(62200, 1920),
    entry(69300, 1921),
    entry(71400, 1922),
    entry(74900, 1923),
    entry(80300, 1924),
    entry(82700, 1925),
    entry(83600, 1926),
    entry(85400, 1927),
    entry(87300, 1928),
    entry(89750, 1929),
    entry(90200, 1930),
    entry(90450, 1931),
    entry(90700, 1932),
    entry(91400, 1933),
    entry(92300, 1934),
    entry(92800, 1935),
    entry(94100, 1936),
    entry(95200, 1937),
    entry(95750, 1938),
    entry(96600, 1939),
    entry(97400, 1940),
    entry(97700, 1941),
    entry(97850, 1942),
    entry(97950, 1943),
    entry(98250, 1944),
    entry(98650, 1945),
    entry(99300, 1946),
    entry(99999, 1947),
];

/// Pre-war sequence table
pub static PREWAR_TABLE: RangeTable = RangeTable::new(&PREWAR);

static CASCADE: Lazy<Cascade> = Lazy::new(|| {
    Cascade::new(
        Brand::Gibson,
        vec![
            FormatRule::new("YDDDYRRR (8 digits, 1977-2005)", r"(\d)(\d{3})(\d)(\d{3})", decode_ydddyrrr),
            FormatRule::new("YDDDYBRRR (9 digits, 2005-2014)", r"([01])(\d{3})(\d)(\d)(\d{3})", decode_ydddybrrr)
                .when(is_batch_format),
            FormatRule::new("YY + 7 digits (9 digits, 2014+)", r"(\d{2})(\d{7})", decode_yy_sequence),
            FormatRule::new("CS + Y + 4-5 digits (Custom Shop)", r"CS(\d)(\d{4,5})", decode_custom_shop),
            FormatRule::new("6 digits (1961-1969)", r"(\d{6})", decode_sixties),
            FormatRule::new("1-5 digits (1903-1947)", r"(\d{1,5})", decode_prewar),
        ],
    )
});

pub fn cascade() -> &'static Cascade {
    &CASCADE
}

/// Decode a Gibson serial
pub fn decode(serial: &str) -> DecodeResult {
    CASCADE.decode(serial)
}

/// 8-digit era: 77-99 → 1900s, 00-05 → 2000s
fn resolve_ink_year(yy: u32) -> Option<i32> {
    match yy {
        77..=99 => Some(1900 + yy as i32),
        0..=5 => Some(2000 + yy as i32),
        _ => None,
    }
}

/// Nine-digit `YDDDYBRRR` only covers 2005-2014 and needs a plausible day
fn is_batch_format(caps: &Captures<'_>) -> bool {
    let yy = digits(cap(caps, 1)) * 10 + digits(cap(caps, 3));
    let day = digits(cap(caps, 2));
    (5..=14).contains(&yy) && (1..=366).contains(&day)
}

fn decode_ydddyrrr(caps: &Captures<'_>) -> DecodeResult {
    let serial = cap(caps, 0);
    let yy = digits(cap(caps, 1)) * 10 + digits(cap(caps, 3));
    let day_raw = cap(caps, 2);
    let rank_raw = cap(caps, 4);
    let rank = digits(rank_raw);

    let Some(year) = resolve_ink_year(yy) else {
        return Ok(GuitarInfo::new(Brand::Gibson, serial, format!("Unknown ({yy:02})"))
            .country("USA")
            .note(format!(
                "Digits 1 and 5 give year {yy:02}, which is outside the 1977-2005 range of this format. \
                 Day {day_raw}, rank {rank_raw}."
            )));
    };

    let date = day_of_year(year, day_raw)?;
    let (plant, plant_note) = plant_for(year, rank);
    Ok(GuitarInfo::new(Brand::Gibson, serial, year.to_string())
        .month(date.month_name())
        .day(date.day)
        .factory_name(plant)
        .country("USA")
        .note(format!(
            "YDDDYRRR format: year {year} (digits 1 and 5), day {day_raw} of the year, production rank {rank_raw}."
        ))
        .note(plant_note)
        .note("The date is when the serial was stamped, usually shortly before final assembly."))
}

fn plant_for(year: i32, rank: u32) -> (&'static str, String) {
    if year < 1984 {
        if rank <= 499 {
            (KALAMAZOO, format!("Rank {rank:03} (001-499) indicates Kalamazoo before 1984."))
        } else {
            (NASHVILLE, format!("Rank {rank:03} (500-999) indicates Nashville before 1984."))
        }
    } else if year >= 1989 {
        (
            NASHVILLE,
            "From 1984 all electrics were built in Nashville; acoustics with this format were built in Bozeman, Montana from 1989."
                .to_string(),
        )
    } else {
        (NASHVILLE, "From 1984 all production moved to Nashville.".to_string())
    }
}

fn decode_ydddybrrr(caps: &Captures<'_>) -> DecodeResult {
    let serial = cap(caps, 0);
    let yy = digits(cap(caps, 1)) * 10 + digits(cap(caps, 3));
    let year = 2000 + yy as i32;
    let day_raw = cap(caps, 2);
    let date = day_of_year(year, day_raw)?;
    Ok(GuitarInfo::new(Brand::Gibson, serial, year.to_string())
        .month(date.month_name())
        .day(date.day)
        .factory_name(NASHVILLE)
        .country("USA")
        .note(format!(
            "YDDDYBRRR format: year {year} (digits 1 and 5), day {day_raw}, batch {}, rank {}.",
            cap(caps, 4),
            cap(caps, 5)
        )))
}

fn decode_yy_sequence(caps: &Captures<'_>) -> DecodeResult {
    let yy = digits(cap(caps, 1));
    let year = if (14..=30).contains(&yy) { (2000 + yy).to_string() } else { format!("Unknown ({yy:02})") };
    Ok(GuitarInfo::new(Brand::Gibson, cap(caps, 0), year)
        .factory_name(NASHVILLE)
        .country("USA")
        .note(format!(
            "Nine-digit format used from 2014: the first two digits ({yy:02}) are the year, followed by sequence {}.",
            cap(caps, 2)
        )))
}

fn decode_custom_shop(caps: &Captures<'_>) -> DecodeResult {
    let d = digits(cap(caps, 1));
    let years = decade_candidates(d, &[1990, 2000, 2010]);
    Ok(GuitarInfo::new(Brand::Gibson, cap(caps, 0), join_years(&years))
        .factory_name("Gibson Custom Shop, Nashville")
        .country("USA")
        .model("Custom Shop")
        .note(format!(
            "CS prefix: Gibson Custom Shop. Year digit {d} gives only the last digit of the year; sequence {}.",
            cap(caps, 2)
        )))
}

fn decode_sixties(caps: &Captures<'_>) -> DecodeResult {
    Ok(GuitarInfo::new(Brand::Gibson, cap(caps, 0), "1961-1969")
        .factory_name(KALAMAZOO)
        .country("USA")
        .note(
            "Six-digit impressed serial. Gibson reused the same six-digit numbers across several years in the 1960s \
             (and again 1970-1975), so guitars from this era cannot be reliably dated by serial alone; \
             check hardware, logo and potentiometer date codes.",
        ))
}

fn decode_prewar(caps: &Captures<'_>) -> DecodeResult {
    let raw = cap(caps, 1);
    let n = digits_u64(raw);
    let lookup = PREWAR_TABLE.lookup(n);
    let mut info = GuitarInfo::new(Brand::Gibson, raw, lookup.describe())
        .factory_name(KALAMAZOO)
        .country("USA");
    match lookup {
        RangeLookup::Year(year) => info.push_note(format!(
            "Sequential serial {n}: Gibson's pre-1947 numbering places it around {year}. Pre-war ranges are approximate."
        )),
        RangeLookup::Later { last_year } => info.push_note(format!(
            "Serial {n} is beyond the pre-war sequence, which ended in {last_year}."
        )),
    }
    if raw.len() == 5 {
        let d = raw.chars().next().and_then(|c| c.to_digit(10)).unwrap_or(0);
        info.push_note(format!(
            "If this is an ink-stamped serial on the back of the headstock (1952-1961), the first digit {d} \
             is the last digit of the year ({}).",
            join_years(&decade_candidates(d, &[1950, 1960]))
        ));
    }
    Ok(info)
}
