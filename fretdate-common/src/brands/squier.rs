//! Squier serial numbers
//!
//! Squier serials lead with a factory code followed by a two-digit year.
//! Three-letter codes are tried before two-letter codes so that e.g. `ICS`
//! is not read as `IC` + `S`.

use once_cell::sync::Lazy;
use regex::Captures;

use crate::cascade::{cap, Cascade, FormatRule};
use crate::error::DecodeResult;
use crate::models::{Brand, GuitarInfo};
use crate::serial::digits;
use crate::tables::FactoryTable;

static FACTORIES: Lazy<FactoryTable> = Lazy::new(|| {
    FactoryTable::new(&[
        ("ICS", "Cor-Tek (Cort)", "Indonesia"),
        ("ICF", "Cor-Tek (Cort)", "Indonesia"),
        ("ISS", "Samick", "Indonesia"),
        ("CGS", "Grand Reward", "China"),
        ("CXS", "Axl", "China"),
        ("COB", "Yako", "China"),
        ("CY", "Yako", "China"),
        ("CA", "Axl", "China"),
        ("CD", "Dong-Shin", "China"),
        ("IC", "Cor-Tek (Cort)", "Indonesia"),
        ("IS", "Samick", "Indonesia"),
        ("VN", "Vietnam plant", "Vietnam"),
        ("KC", "Cort", "Korea"),
        ("KV", "Samick", "Korea"),
        ("MN", "Ensenada", "Mexico"),
        ("MZ", "Ensenada", "Mexico"),
    ])
});

static CASCADE: Lazy<Cascade> = Lazy::new(|| {
    Cascade::new(
        Brand::Squier,
        vec![
            FormatRule::new(
                "3-letter factory code + YY + 5-7 digits",
                r"(ICS|ICF|ISS|CGS|CXS|COB)(\d{2})(\d{5,7})",
                decode_factory_year,
            ),
            FormatRule::new(
                "2-letter factory code + YY + 5-7 digits",
                r"(CY|CA|CD|IC|IS|VN|KC|KV)(\d{2})(\d{5,7})",
                decode_factory_year,
            ),
            FormatRule::new("MN/MZ + Y + 6 digits (Mexico)", r"(MN|MZ)(\d)(\d{6})", decode_mexico),
            FormatRule::new("S + Y + 5 digits (Korea/Japan, 1980s-1990s)", r"S(\d)(\d{5})", decode_s_series),
            FormatRule::new(
                "unknown 2-3 letter code + YY + 5-7 digits",
                r"([A-Z]{2,3})(\d{2})(\d{5,7})",
                decode_factory_year,
            ),
        ],
    )
});

pub fn cascade() -> &'static Cascade {
    &CASCADE
}

/// Decode a Squier serial
pub fn decode(serial: &str) -> DecodeResult {
    CASCADE.decode(serial)
}

/// Squier imports started in 1982; 85-99 are 1900s, 00-30 are 2000s
fn resolve_year(yy: u32) -> String {
    match yy {
        0..=30 => (2000 + yy).to_string(),
        82..=99 => (1900 + yy).to_string(),
        _ => format!("Unknown ({yy:02})"),
    }
}

fn decode_factory_year(caps: &Captures<'_>) -> DecodeResult {
    let code = cap(caps, 1);
    let yy = digits(cap(caps, 2));
    let factory = FACTORIES.lookup(code);
    let mut info = GuitarInfo::new(Brand::Squier, cap(caps, 0), resolve_year(yy))
        .factory(&factory)
        .note(format!(
            "Factory code {code}, year digits {yy:02}, sequence {}.",
            cap(caps, 3)
        ));
    if !factory.known {
        info.push_note(format!("Factory code {code} is not in the known Squier factory list."));
    }
    Ok(info)
}

fn decode_mexico(caps: &Captures<'_>) -> DecodeResult {
    let code = cap(caps, 1);
    let d = digits(cap(caps, 2));
    let year = if code == "MZ" { 2000 + d } else { 1990 + d };
    Ok(GuitarInfo::new(Brand::Squier, cap(caps, 0), year.to_string())
        .factory(&FACTORIES.lookup(code))
        .note(format!("{code} prefix: Mexican production, year digit {d}, sequence {}.", cap(caps, 3))))
}

fn decode_s_series(caps: &Captures<'_>) -> DecodeResult {
    let d = digits(cap(caps, 1));
    let year = if d >= 5 { format!("198{d}") } else { format!("199{d}") };
    Ok(GuitarInfo::new(Brand::Squier, cap(caps, 0), year)
        .factory_name("Samick or Young Chang")
        .country("Korea")
        .note(format!(
            "S + year digit {d}: Korean production of the late 1980s to mid 1990s (sequence {}). \
             Japanese Squiers with a Made in Japan decal use the same prefix.",
            cap(caps, 2)
        )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_letter_code_wins_over_two() {
        let info = decode("ICS10123456").unwrap();
        assert_eq!(info.year, "2010");
        assert_eq!(info.country.as_deref(), Some("Indonesia"));
        assert!(info.notes.contains("Factory code ICS"));
    }

    #[test]
    fn test_two_letter_code() {
        let info = decode("CY 05 12345").unwrap();
        assert_eq!(info.year, "2005");
        assert_eq!(info.factory.as_deref(), Some("Yako"));
    }

    #[test]
    fn test_unknown_code_degrades() {
        let info = decode("QX0712345").unwrap();
        assert_eq!(info.year, "2007");
        assert_eq!(info.country.as_deref(), Some("Unknown"));
    }

    #[test]
    fn test_s_series() {
        assert_eq!(decode("S912345").unwrap().year, "1989");
        assert_eq!(decode("S212345").unwrap().year, "1992");
    }
}
