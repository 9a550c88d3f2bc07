//! Fender serial numbers
//!
//! Fender prefixes encode plant and decade; the digit after a single-letter
//! prefix (or two digits after `US`, `MX`, `JD`) is the year. Overlapping
//! prefixes are ordered most-specific first: `DZ` before `Z`, `MZ`/`MN`
//! before anything starting with `M`.
//!
//! Fender routinely stamped necks months before assembly, so every result
//! carries a caveat that the serial dates the neck/decal, not the build.

use once_cell::sync::Lazy;
use regex::Captures;

use crate::cascade::{cap, Cascade, FormatRule};
use crate::error::DecodeResult;
use crate::models::{Brand, GuitarInfo};
use crate::serial::{digits, digits_u64};

const CORONA: &str = "Corona, California";
const FULLERTON: &str = "Fullerton, California";
const ENSENADA: &str = "Ensenada";
const OVERLAP_CAVEAT: &str =
    "Fender serial ranges overlap by a year or more; check neck and body date stamps for a precise date.";

static CASCADE: Lazy<Cascade> = Lazy::new(|| {
    Cascade::new(
        Brand::Fender,
        vec![
            FormatRule::new("US + YY + 6-7 digits (USA, 2010+)", r"US(\d{2})(\d{6,7})", decode_us),
            FormatRule::new("DZ + Y + 5-6 digits (American Deluxe, 2000s)", r"DZ(\d)(\d{5,6})", decode_deluxe),
            FormatRule::new("DN + Y + 5-6 digits (American Deluxe, 1990s)", r"DN(\d)(\d{5,6})", decode_deluxe),
            FormatRule::new("MX + YY + 6-7 digits (Mexico, 2000+)", r"MX(\d{2})(\d{6,7})", decode_mx),
            FormatRule::new("MZ + Y + 6 digits (Mexico, 2000s)", r"MZ(\d)(\d{6})", decode_mexico_decade),
            FormatRule::new("MN + Y + 6 digits (Mexico, 1990s)", r"MN(\d)(\d{6})", decode_mexico_decade),
            FormatRule::new("CZ + 5-6 digits (Custom Shop, 2000s)", r"CZ(\d{5,6})", decode_custom_shop),
            FormatRule::new("CN + 5-6 digits (Custom Shop, 1990s)", r"CN(\d{5,6})", decode_custom_shop),
            FormatRule::new("JD + YY + 6 digits (Japan, Dyna Gakki 2008+)", r"JD(\d{2})(\d{6})", decode_jd),
            FormatRule::new("JV + 5-6 digits (Japan, 1982-1984)", r"JV(\d{5,6})", decode_japan_early),
            FormatRule::new("SQ + 5-6 digits (Japan, 1983-1984)", r"SQ(\d{5,6})", decode_japan_early),
            FormatRule::new("Z + Y + 5-6 digits (USA, 2000s)", r"Z(\d)(\d{5,6})", decode_usa_decade),
            FormatRule::new("N + Y + 5-6 digits (USA, 1990s)", r"N(\d)(\d{5,6})", decode_usa_decade),
            FormatRule::new("E + Y + 5-6 digits (USA, 1980s)", r"E(\d)(\d{5,6})", decode_usa_decade),
            FormatRule::new("S + Y + 5 digits (USA, 1970s)", r"S([6-9])(\d{5})", decode_usa_decade),
            FormatRule::new("V + 4-6 digits (Vintage reissue)", r"V(\d{4,6})", decode_vintage_reissue),
            FormatRule::new("L + 5 digits (1963-1965)", r"L(\d{5})", decode_l_series),
            FormatRule::new("4-6 digits (neck plate, 1950s-1976)", r"(\d{4,6})", decode_neck_plate),
        ],
    )
});

pub fn cascade() -> &'static Cascade {
    &CASCADE
}

/// Decode a Fender serial
pub fn decode(serial: &str) -> DecodeResult {
    CASCADE.decode(serial)
}

fn decode_us(caps: &Captures<'_>) -> DecodeResult {
    let yy = digits(cap(caps, 1));
    let year = if yy <= 30 { (2000 + yy).to_string() } else { format!("Unknown ({yy:02})") };
    Ok(GuitarInfo::new(Brand::Fender, cap(caps, 0), year)
        .factory_name(CORONA)
        .country("USA")
        .note(format!(
            "US prefix: American-made, 2010 onward. Year digits {yy:02}, sequence {}.",
            cap(caps, 2)
        ))
        .note(OVERLAP_CAVEAT))
}

fn decode_deluxe(caps: &Captures<'_>) -> DecodeResult {
    let serial = cap(caps, 0);
    let d = digits(cap(caps, 1));
    let (year, decade) = if serial.starts_with("DZ") { (2000 + d, "2000s") } else { (1990 + d, "1990s") };
    Ok(GuitarInfo::new(Brand::Fender, serial, year.to_string())
        .factory_name(CORONA)
        .country("USA")
        .model("American Deluxe series")
        .note(format!(
            "{} prefix: American Deluxe series, {decade}. Year digit {d}, sequence {}.",
            &serial[..2],
            cap(caps, 2)
        ))
        .note(OVERLAP_CAVEAT))
}

fn decode_mx(caps: &Captures<'_>) -> DecodeResult {
    let yy = digits(cap(caps, 1));
    let year = if yy <= 30 { (2000 + yy).to_string() } else { format!("Unknown ({yy:02})") };
    Ok(GuitarInfo::new(Brand::Fender, cap(caps, 0), year)
        .factory_name(ENSENADA)
        .country("Mexico")
        .note(format!("MX prefix: made in Mexico. Year digits {yy:02}, sequence {}.", cap(caps, 2)))
        .note(OVERLAP_CAVEAT))
}

fn decode_mexico_decade(caps: &Captures<'_>) -> DecodeResult {
    let serial = cap(caps, 0);
    let d = digits(cap(caps, 1));
    let (year, decade) = if serial.starts_with("MZ") { (2000 + d, "2000s") } else { (1990 + d, "1990s") };
    Ok(GuitarInfo::new(Brand::Fender, serial, year.to_string())
        .factory_name(ENSENADA)
        .country("Mexico")
        .note(format!(
            "{} prefix: made in Mexico in the {decade}. Year digit {d}, sequence {}.",
            &serial[..2],
            cap(caps, 2)
        ))
        .note(OVERLAP_CAVEAT))
}

fn decode_custom_shop(caps: &Captures<'_>) -> DecodeResult {
    let serial = cap(caps, 0);
    let (year, decade) = if serial.starts_with("CZ") { ("2000-2009", "2000s") } else { ("1990-1999", "1990s") };
    Ok(GuitarInfo::new(Brand::Fender, serial, year)
        .factory_name("Fender Custom Shop, Corona, California")
        .country("USA")
        .model("Custom Shop")
        .note(format!(
            "{} prefix: Fender Custom Shop, {decade}. The prefix gives only the decade; sequence {}. \
             The certificate of authenticity carries the exact build date.",
            &serial[..2],
            cap(caps, 1)
        )))
}

fn decode_jd(caps: &Captures<'_>) -> DecodeResult {
    let yy = digits(cap(caps, 1));
    let year = if yy <= 30 { (2000 + yy).to_string() } else { format!("Unknown ({yy:02})") };
    Ok(GuitarInfo::new(Brand::Fender, cap(caps, 0), year)
        .factory_name("Dyna Gakki")
        .country("Japan")
        .note(format!(
            "JD prefix: made in Japan by Dyna Gakki (2008 onward). Year digits {yy:02}, sequence {}.",
            cap(caps, 2)
        )))
}

fn decode_japan_early(caps: &Captures<'_>) -> DecodeResult {
    let serial = cap(caps, 0);
    let (year, note) = if serial.starts_with("JV") {
        ("1982-1984", "JV prefix: Japanese Vintage series built by FujiGen, 1982-1984.")
    } else {
        ("1983-1984", "SQ prefix: Squier-era Japanese Vintage reissue built by FujiGen, 1983-1984.")
    };
    Ok(GuitarInfo::new(Brand::Fender, serial, year)
        .factory_name("FujiGen Gakki")
        .country("Japan")
        .note(note)
        .note(format!("Sequence {}.", cap(caps, 1))))
}

fn decode_usa_decade(caps: &Captures<'_>) -> DecodeResult {
    let serial = cap(caps, 0);
    let d = digits(cap(caps, 1));
    let prefix = &serial[..1];
    let (base, decade, plant) = match prefix {
        "Z" => (2000, "2000s", CORONA),
        "N" => (1990, "1990s", CORONA),
        "E" => (1980, "1980s", CORONA),
        _ => (1970, "1970s", FULLERTON),
    };
    let year = base + d as i32;
    let mut info = GuitarInfo::new(Brand::Fender, serial, year.to_string())
        .factory_name(plant)
        .country("USA")
        .note(format!(
            "{prefix} prefix: American-made, {decade}. Year digit {d}, sequence {}.",
            cap(caps, 2)
        ));
    if prefix == "E" {
        info.push_note(
            "Japanese-made Fenders from 1984-1987 also use an E prefix; a Made in Japan decal means the guitar is Japanese, not American.",
        );
    }
    if prefix == "N" && d == 0 {
        info.push_note("N0 serials were used for 2000 production as well as 1990.");
        info.year = "1990 or 2000".to_string();
    }
    Ok(info.note(OVERLAP_CAVEAT))
}

fn decode_vintage_reissue(caps: &Captures<'_>) -> DecodeResult {
    Ok(GuitarInfo::new(Brand::Fender, cap(caps, 0), "1982-2012")
        .factory_name(FULLERTON)
        .country("USA")
        .model("American Vintage reissue")
        .note(format!(
            "V prefix: American Vintage reissue series, used from 1982 to 2012. The V serial (sequence {}) \
             does not encode a year; check the neck date stamp.",
            cap(caps, 1)
        )))
}

fn decode_l_series(caps: &Captures<'_>) -> DecodeResult {
    Ok(GuitarInfo::new(Brand::Fender, cap(caps, 0), "1963-1965")
        .factory_name(FULLERTON)
        .country("USA")
        .note(format!("L series neck plate (sequence {}), used from late 1962 to 1965.", cap(caps, 1))))
}

/// Neck-plate bands; they overlap, so this is not a range table
const NECK_PLATE_BANDS: &[(u64, u64, &str)] = &[
    (0, 9_999, "1954-1956"),
    (10_000, 99_999, "1955-1965"),
    (100_000, 199_999, "1965-1968"),
    (200_000, 299_999, "1968-1970"),
    (300_000, 399_999, "1970-1972"),
    (400_000, 499_999, "1972-1974"),
    (500_000, 699_999, "1974-1976"),
    (700_000, 999_999, "1976"),
];

fn decode_neck_plate(caps: &Captures<'_>) -> DecodeResult {
    let raw = cap(caps, 1);
    let n = digits_u64(raw);
    let year = NECK_PLATE_BANDS
        .iter()
        .find(|(lo, hi, _)| (*lo..=*hi).contains(&n))
        .map(|(_, _, y)| *y)
        .unwrap_or("Unknown");
    Ok(GuitarInfo::new(Brand::Fender, raw, year)
        .factory_name(FULLERTON)
        .country("USA")
        .note(format!(
            "Plain neck-plate serial {n}. Fender neck plates were used out of order, so guitars from this era \
             cannot be reliably dated from the serial alone; the neck heel and body cavity dates are authoritative."
        )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_us_prefix() {
        let info = decode("US12345678").unwrap();
        assert_eq!(info.year, "2012");
        assert_eq!(info.country.as_deref(), Some("USA"));
    }

    #[test]
    fn test_dz_before_z() {
        assert_eq!(cascade().matching_rule("DZ1234567"), Some("DZ + Y + 5-6 digits (American Deluxe, 2000s)"));
        let info = decode("DZ1234567").unwrap();
        assert_eq!(info.year, "2001");
        assert_eq!(info.model.as_deref(), Some("American Deluxe series"));
    }

    #[test]
    fn test_mexico_prefixes() {
        assert_eq!(decode("MX15123456").unwrap().year, "2015");
        assert_eq!(decode("MN5123456").unwrap().year, "1995");
        assert_eq!(decode("MZ2123456").unwrap().country.as_deref(), Some("Mexico"));
    }

    #[test]
    fn test_decade_prefixes() {
        assert_eq!(decode("Z5123456").unwrap().year, "2005");
        assert_eq!(decode("N9123456").unwrap().year, "1999");
        assert_eq!(decode("S812345").unwrap().year, "1978");
    }

    #[test]
    fn test_e_prefix_warns_about_japan() {
        let info = decode("E412345").unwrap();
        assert_eq!(info.year, "1984");
        assert!(info.notes.contains("Made in Japan"));
    }

    #[test]
    fn test_n0_is_ambiguous() {
        assert_eq!(decode("N0123456").unwrap().year, "1990 or 2000");
    }

    #[test]
    fn test_neck_plate_caveat() {
        let info = decode("123456").unwrap();
        assert_eq!(info.year, "1965-1968");
        assert!(info.notes.contains("cannot be reliably dated"));
    }

    #[test]
    fn test_unknown_prefix_fails() {
        let err = decode("QQ123").unwrap_err();
        assert!(err.to_string().contains("US + YY"));
    }
}
