//! Orchestration: brand decoder plus result post-processing
//!
//! - Epiphone serials that fail with a leading `1` are retried with `I`
//!   (the digit is a common misreading of the Saein factory letter).
//! - A result whose year field names only future years is rejected.

use chrono::{Datelike, Local};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info};

use crate::cascade::ascii_regex;
use crate::error::{DecodeError, DecodeResult};
use crate::models::{Brand, GuitarInfo};
use crate::serial::normalize;

static YEAR_DIGITS: Lazy<Regex> = Lazy::new(|| ascii_regex(r"\d+").expect("year digit pattern must be valid"));

/// Decode `serial` for `brand`, filtering against the current calendar year
pub fn decode(brand: Brand, serial: &str) -> DecodeResult {
    decode_at(brand, serial, Local::now().year())
}

/// Decode `serial` for `brand` as if the current year were `current_year`
pub fn decode_at(brand: Brand, serial: &str, current_year: i32) -> DecodeResult {
    let serial = normalize(serial);
    let decoded = match brand.decoder()(&serial) {
        Ok(info) => info,
        Err(err) => match retry_leading_one(brand, &serial) {
            Some(info) => info,
            None => return Err(err),
        },
    };
    reject_future(decoded, current_year)
}

/// Epiphone only: re-read a leading `1` as the letter `I`
fn retry_leading_one(brand: Brand, serial: &str) -> Option<GuitarInfo> {
    if brand != Brand::Epiphone {
        return None;
    }
    let rest = serial.strip_prefix('1')?;
    let corrected = format!("I{rest}");
    let mut decoded = brand.decoder()(&corrected).ok()?;
    info!(brand = brand.id(), original = %serial, corrected = %corrected, "serial corrected: leading 1 read as I");
    decoded.serial_number = corrected.clone();
    decoded.push_note(format!(
        "Corrected serial: the leading digit 1 in {serial} was read as the letter I ({corrected}), \
         a common misreading of the Saein factory code."
    ));
    Some(decoded)
}

/// Every four-digit number in a year field
pub fn years_in(year: &str) -> Vec<i32> {
    YEAR_DIGITS
        .find_iter(year)
        .map(|m| m.as_str())
        .filter(|digits| digits.len() == 4)
        .filter_map(|digits| digits.parse().ok())
        .collect()
}

/// True when the field names at least one year and all of them are after `current_year`
pub fn is_future_only(year: &str, current_year: i32) -> bool {
    let years = years_in(year);
    !years.is_empty() && years.iter().all(|&y| y > current_year)
}

fn reject_future(decoded: GuitarInfo, current_year: i32) -> DecodeResult {
    if is_future_only(&decoded.year, current_year) {
        debug!(year = %decoded.year, current_year, "rejecting decode with future year");
        return Err(DecodeError::Undecodable { year: decoded.year });
    }
    Ok(decoded)
}
