//! Brand detector
//!
//! A shape-only classifier over a small set of brands, used when the caller
//! has not chosen a brand. The predicates here are written independently of
//! the brand cascades and can disagree with them; the detector never decodes.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::debug;

use crate::brands::epiphone;
use crate::cascade::{ascii_regex, cap};
use crate::models::{Brand, BrandDetection};
use crate::serial::normalize;

/// Brands the detector can recognize, in reporting order
pub const DETECTABLE_BRANDS: [Brand; 5] = [
    Brand::Fender,
    Brand::Gibson,
    Brand::Epiphone,
    Brand::Martin,
    Brand::Ibanez,
];

struct ShapePredicate {
    brand: Brand,
    pattern: Regex,
    check: Option<fn(&Captures<'_>) -> bool>,
}

impl ShapePredicate {
    fn new(brand: Brand, pattern: &str) -> Self {
        Self {
            brand,
            pattern: ascii_regex(pattern).expect("detector pattern must be a valid regex"),
            check: None,
        }
    }

    fn with_check(mut self, check: fn(&Captures<'_>) -> bool) -> Self {
        self.check = Some(check);
        self
    }

    fn matches(&self, serial: &str) -> bool {
        match self.pattern.captures(serial) {
            Some(caps) => self.check.map_or(true, |check| check(&caps)),
            None => false,
        }
    }
}

static PREDICATES: Lazy<Vec<ShapePredicate>> = Lazy::new(|| {
    vec![
        ShapePredicate::new(Brand::Fender, r"^(?:US|MX|MZ|MN|DZ|CZ|JD|Z\d|N\d|E\d)\d{5,8}$"),
        ShapePredicate::new(Brand::Gibson, r"^\d{8,9}$"),
        ShapePredicate::new(Brand::Epiphone, r"^([A-Z]{1,2})\d{8,9}$")
            .with_check(|caps| epiphone::is_factory_code(cap(caps, 1))),
        ShapePredicate::new(Brand::Martin, r"^\d{4,7}$"),
        ShapePredicate::new(Brand::Ibanez, r"^(?:[A-L]\d{6}|F\d{6,7}|(?:PW|PR|GS)\d+)$"),
    ]
});

/// Guess the brand from the serial's shape alone.
///
/// Confident only when exactly one brand matches; otherwise the message asks
/// for a manual choice and, for several matches, names every candidate.
pub fn detect_brand(raw: &str) -> BrandDetection {
    let serial = normalize(raw);
    let candidates: Vec<Brand> = if serial.is_empty() {
        Vec::new()
    } else {
        PREDICATES
            .iter()
            .filter(|p| p.matches(&serial))
            .map(|p| p.brand)
            .collect()
    };
    debug!(serial = %serial, candidates = candidates.len(), "brand detection");

    let message = match candidates.as_slice() {
        [] => Some(
            "Could not detect the brand from this serial number. Please select the brand manually.".to_string(),
        ),
        [_] => None,
        many => Some(format!(
            "This serial number matches the formats of several brands: {}. Please select the brand manually.",
            many.iter().map(Brand::name).collect::<Vec<_>>().join(", ")
        )),
    };

    BrandDetection {
        confident: candidates.len() == 1,
        candidates,
        message,
    }
}
