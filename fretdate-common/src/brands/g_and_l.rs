//! G&L serial numbers
//!
//! USA instruments are numbered sequentially since 1980, guitars (`G`) and
//! basses (`B`) in separate runs. Tribute imports carry a factory prefix and
//! a two-digit year.

use once_cell::sync::Lazy;
use regex::Captures;

use crate::cascade::{cap, Cascade, FormatRule};
use crate::error::DecodeResult;
use crate::models::{Brand, GuitarInfo};
use crate::range::{entry, RangeEntry, RangeLookup, RangeTable};
use crate::serial::{digits, digits_u64};
use crate::tables::FactoryTable;

const FULLERTON: &str = "Fullerton, California";

/// Approximate last guitar number per year
static GUITARS: [RangeEntry; 31] = [
    entry(600, 1980),
    entry(2700, 1981),
    entry(5000, 1982),
    entry(6900, 1983),
    entry(8200, 1984),
    entry(9500, 1985),
    entry(11000, 1986),
    entry(13500, 1987),
    entry(16500, 1988),
    entry(19500, 1989),
    entry(23000, 1990),
    entry(26500, 1991),
    entry(29000, 1992),
    entry(32000, 1993),
    entry(35000, 1994),
    entry(39000, 1995),
    entry(43000, 1996),
    entry(48000, 1997),
    entry(53000, 1998),
    entry(58000, 1999),
    entry(63000, 2000),
    entry(68000, 2001),
    entry(73000, 2002),
    entry(78000, 2003),
    entry(83000, 2004),
    entry(88000, 2005),
    entry(93000, 2006),
    entry(99000, 2007),
    entry(105000, 2008),
    entry(110000, 2009),
    entry(115000, 2010),
];

/// Approximate last bass number per year
static BASSES: [RangeEntry; 21] = [
    entry(1000, 1980),
    entry(3500, 1981),
    entry(6000, 1982),
    entry(8000, 1983),
    entry(9500, 1984),
    entry(11000, 1985),
    entry(12500, 1986),
    entry(14500, 1987),
    entry(17000, 1988),
    entry(19500, 1989),
    entry(22000, 1990),
    entry(24500, 1991),
    entry(27000, 1992),
    entry(29500, 1993),
    entry(32000, 1994),
    entry(35000, 1995),
    entry(38000, 1996),
    entry(41500, 1997),
    entry(45000, 1998),
    entry(48500, 1999),
    entry(52000, 2000),
];

pub static GUITAR_TABLE: RangeTable = RangeTable::new(&GUITARS);
pub static BASS_TABLE: RangeTable = RangeTable::new(&BASSES);

static TRIBUTE_FACTORIES: Lazy<FactoryTable> = Lazy::new(|| {
    FactoryTable::new(&[
        ("TI", "Cor-Tek (Cort)", "Indonesia"),
        ("TK", "Korean plant", "Korea"),
        ("TC", "Chinese plant", "China"),
    ])
});

static CASCADE: Lazy<Cascade> = Lazy::new(|| {
    Cascade::new(
        Brand::GAndL,
        vec![
            FormatRule::new("TI/TK/TC + YY + 4-7 digits (Tribute)", r"(TI|TK|TC)(\d{2})(\d{4,7})", decode_tribute),
            FormatRule::new("CLF + 5-6 digits (USA)", r"CLF(\d{5,6})", decode_clf),
            FormatRule::new("G/B + 6 digits (USA, 1980+)", r"([GB])(\d{6})", decode_usa),
        ],
    )
});

pub fn cascade() -> &'static Cascade {
    &CASCADE
}

/// Decode a G&L serial
pub fn decode(serial: &str) -> DecodeResult {
    CASCADE.decode(serial)
}

fn decode_tribute(caps: &Captures<'_>) -> DecodeResult {
    let code = cap(caps, 1);
    let yy = digits(cap(caps, 2));
    let year = if yy <= 30 { (2000 + yy).to_string() } else { format!("Unknown ({yy:02})") };
    Ok(GuitarInfo::new(Brand::GAndL, cap(caps, 0), year)
        .factory(&TRIBUTE_FACTORIES.lookup(code))
        .model("Tribute")
        .note(format!("Tribute series: factory code {code}, year {yy:02}, sequence {}.", cap(caps, 3))))
}

fn decode_clf(caps: &Captures<'_>) -> DecodeResult {
    Ok(GuitarInfo::new(Brand::GAndL, cap(caps, 0), "1998 or later")
        .factory_name(FULLERTON)
        .country("USA")
        .note(format!(
            "CLF prefix, sequence {}: a USA instrument from the CLF-numbered run. \
             The neck pocket date is the reliable way to date these.",
            cap(caps, 1)
        )))
}

fn decode_usa(caps: &Captures<'_>) -> DecodeResult {
    let kind = cap(caps, 1);
    let n = digits_u64(cap(caps, 2));
    let (table, family) = if kind == "B" { (&BASS_TABLE, "bass") } else { (&GUITAR_TABLE, "guitar") };
    let lookup = table.lookup(n);
    let mut info = GuitarInfo::new(Brand::GAndL, cap(caps, 0), lookup.describe())
        .factory_name(FULLERTON)
        .country("USA");
    match lookup {
        RangeLookup::Year(year) => info.push_note(format!(
            "USA {family} serial {n}: approximately {year}. Guitars and basses are numbered separately."
        )),
        RangeLookup::Later { last_year } => info.push_note(format!(
            "USA {family} serial {n} is beyond the approximate ranges, which end in {last_year}."
        )),
    }
    Ok(info)
}
