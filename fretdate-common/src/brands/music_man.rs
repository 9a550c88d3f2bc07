//! Music Man serial numbers
//!
//! Current instruments use a fiscal-year week code: `F` + fiscal year +
//! ISO week + weekday + sequence. The fiscal year runs August to July, so
//! early fiscal weeks fall in the previous calendar year.

use once_cell::sync::Lazy;
use regex::Captures;

use crate::cascade::{cap, Cascade, FormatRule};
use crate::dating::{fiscal_week_date, month_name, weekday_name};
use crate::error::DecodeResult;
use crate::models::{Brand, GuitarInfo};
use crate::serial::digits;

const SAN_LUIS_OBISPO: &str = "San Luis Obispo, California";

static CASCADE: Lazy<Cascade> = Lazy::new(|| {
    Cascade::new(
        Brand::MusicMan,
        vec![
            FormatRule::new(
                "F + fiscal YY + week + weekday + 4 digits",
                r"F(\d{2})(\d{2})(\d)(\d{4})",
                decode_fiscal,
            ),
            FormatRule::new(
                "model prefix (B, G, E, H, D) + 5-6 digits (Ernie Ball, 1984+)",
                r"([BGEHD])(\d{5,6})",
                decode_model_prefix,
            ),
            FormatRule::new("5-6 digits (pre-Ernie Ball, 1976-1984)", r"(\d{5,6})", decode_pre_ernie_ball),
        ],
    )
});

pub fn cascade() -> &'static Cascade {
    &CASCADE
}

/// Decode a Music Man serial
pub fn decode(serial: &str) -> DecodeResult {
    CASCADE.decode(serial)
}

fn decode_fiscal(caps: &Captures<'_>) -> DecodeResult {
    let yy = digits(cap(caps, 1));
    let fiscal_year = if yy <= 30 { 2000 + yy as i32 } else { 1900 + yy as i32 };
    let date = fiscal_week_date(fiscal_year, cap(caps, 2), cap(caps, 3))?;

    let mut info = GuitarInfo::new(Brand::MusicMan, cap(caps, 0), date.calendar_year.to_string())
        .factory_name(SAN_LUIS_OBISPO)
        .country("USA")
        .note(format!(
            "Fiscal-year code: {}, week {:02}, {}, sequence {}.",
            date.fiscal_label,
            date.week,
            weekday_name(date.weekday).unwrap_or("unknown day"),
            cap(caps, 4)
        ))
        .note("Weeks map to months only approximately (about 4.33 weeks per month).");
    if let Some(name) = month_name(date.month) {
        info = info.month(name);
    }
    Ok(info)
}

fn model_family(prefix: &str) -> &'static str {
    match prefix {
        "B" => "StingRay/Sterling bass",
        "G" => "guitar",
        "E" => "EVH/Axis guitar",
        "H" => "Silhouette guitar",
        "D" => "Bongo bass",
        _ => "unknown",
    }
}

fn decode_model_prefix(caps: &Captures<'_>) -> DecodeResult {
    let prefix = cap(caps, 1);
    let family = model_family(prefix);
    Ok(GuitarInfo::new(Brand::MusicMan, cap(caps, 0), "1984 or later")
        .factory_name(SAN_LUIS_OBISPO)
        .country("USA")
        .model(family)
        .note(format!(
            "Ernie Ball era: prefix {prefix} identifies the {family} family, sequence {}. \
             The date is written on the neck heel and body cavity, not in the serial.",
            cap(caps, 2)
        )))
}

fn decode_pre_ernie_ball(caps: &Captures<'_>) -> DecodeResult {
    Ok(GuitarInfo::new(Brand::MusicMan, cap(caps, 1), "1976-1984")
        .factory_name("Fullerton, California (CLF Research)")
        .country("USA")
        .note(
            "Plain numeric serial from the pre-Ernie Ball era. These serials are not date-coded; \
             check the neck and body dates.",
        ))
}
