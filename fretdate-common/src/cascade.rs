//! First-match format cascade
//!
//! Each brand owns an ordered list of [`FormatRule`]s. Rules are tried in
//! order against the normalized serial and the first match decodes it.
//! Order is part of the behavior: a specific rule (a particular two-letter
//! prefix) must sit before a general one (any letter + digits) that would
//! otherwise shadow it.

use regex::{Captures, Regex, RegexBuilder};
use tracing::debug;

use crate::error::{DecodeError, DecodeResult};
use crate::models::Brand;
use crate::serial::normalize;

/// Decode function invoked with the captures of the matching rule.
/// Capture 0 is always the whole normalized serial (patterns are anchored).
pub type DecodeFn = fn(&Captures<'_>) -> DecodeResult;

/// Extra predicate for shapes a regex alone cannot express
pub type Guard = fn(&Captures<'_>) -> bool;

/// One shape test + its decoder
pub struct FormatRule {
    name: &'static str,
    pattern: Regex,
    guard: Option<Guard>,
    decode: DecodeFn,
}

impl FormatRule {
    /// `pattern` is anchored automatically and matched ASCII-only, so `\d`
    /// never accepts non-ASCII digits.
    ///
    /// Panics on an invalid pattern; patterns are compile-time constants
    /// built once inside a lazy static.
    pub fn new(name: &'static str, pattern: &str, decode: DecodeFn) -> Self {
        let anchored = format!("^(?:{pattern})$");
        let pattern = ascii_regex(&anchored).expect("cascade pattern must be a valid regex");
        Self {
            name,
            pattern,
            guard: None,
            decode,
        }
    }

    /// Require an additional predicate over the captures
    pub fn when(mut self, guard: Guard) -> Self {
        self.guard = Some(guard);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    fn captures<'s>(&self, serial: &'s str) -> Option<Captures<'s>> {
        let caps = self.pattern.captures(serial)?;
        match self.guard {
            Some(guard) if !guard(&caps) => None,
            _ => Some(caps),
        }
    }
}

/// Ordered rule list for one brand
pub struct Cascade {
    brand: Brand,
    rules: Vec<FormatRule>,
}

impl Cascade {
    pub fn new(brand: Brand, rules: Vec<FormatRule>) -> Self {
        Self { brand, rules }
    }

    pub fn brand(&self) -> Brand {
        self.brand
    }

    /// Format names in cascade order (used in failure messages)
    pub fn formats(&self) -> Vec<&'static str> {
        self.rules.iter().map(FormatRule::name).collect()
    }

    /// Name of the rule that would decode `serial`, if any
    pub fn matching_rule(&self, serial: &str) -> Option<&'static str> {
        let serial = normalize(serial);
        self.rules
            .iter()
            .find(|rule| rule.captures(&serial).is_some())
            .map(FormatRule::name)
    }

    /// Normalize, then decode with the first matching rule
    pub fn decode(&self, raw: &str) -> DecodeResult {
        let serial = normalize(raw);
        if serial.is_empty() {
            return Err(DecodeError::empty(self.brand.name(), self.formats()));
        }

        for rule in &self.rules {
            if let Some(caps) = rule.captures(&serial) {
                debug!(brand = self.brand.id(), rule = rule.name, serial = %serial, "cascade rule matched");
                return (rule.decode)(&caps);
            }
        }

        debug!(brand = self.brand.id(), serial = %serial, "no cascade rule matched");
        Err(DecodeError::unrecognized(self.brand.name(), self.formats()))
    }
}

/// Compile `pattern` with Unicode classes off (`\d` = `[0-9]`, `[A-Z]` = ASCII)
pub fn ascii_regex(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).unicode(false).build()
}

/// Capture group `i` as `&str` ("" when the group did not participate)
pub fn cap<'s>(caps: &Captures<'s>, i: usize) -> &'s str {
    caps.get(i).map(|m| m.as_str()).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GuitarInfo;

    fn specific(caps: &Captures<'_>) -> DecodeResult {
        Ok(GuitarInfo::new(Brand::Cort, cap(caps, 0), "specific"))
    }

    fn general(caps: &Captures<'_>) -> DecodeResult {
        Ok(GuitarInfo::new(Brand::Cort, cap(caps, 0), "general"))
    }

    fn cascade() -> Cascade {
        Cascade::new(
            Brand::Cort,
            vec![
                FormatRule::new("AB + digits", r"AB\d+", specific),
                FormatRule::new("letter + digits", r"[A-Z]+\d+", general),
            ],
        )
    }

    #[test]
    fn test_first_match_wins() {
        let c = cascade();
        assert_eq!(c.decode("ab-123").unwrap().year, "specific");
        assert_eq!(c.decode("A123").unwrap().year, "general");
        assert_eq!(c.matching_rule("AB1"), Some("AB + digits"));
    }

    #[test]
    fn test_digit_class_is_ascii_only() {
        let c = Cascade::new(Brand::Cort, vec![FormatRule::new("digits", r"\d{3}", general)]);
        assert!(c.decode("123").is_ok());
        assert!(c.decode("١٢٣").unwrap_err().is_unrecognized());
        assert!(c.decode("１２３").unwrap_err().is_unrecognized());
    }

    #[test]
    fn test_patterns_are_anchored() {
        assert!(cascade().decode("XAB123X").is_err());
    }

    #[test]
    fn test_miss_lists_formats() {
        let err = cascade().decode("123").unwrap_err();
        assert_eq!(
            err,
            DecodeError::unrecognized("Cort", vec!["AB + digits", "letter + digits"])
        );
    }

    #[test]
    fn test_empty_serial() {
        assert_eq!(
            cascade().decode(" - "),
            Err(DecodeError::empty("Cort", vec!["AB + digits", "letter + digits"]))
        );
    }

    #[test]
    fn test_guard_rejects() {
        fn never(_: &Captures<'_>) -> bool {
            false
        }
        let c = Cascade::new(
            Brand::Cort,
            vec![
                FormatRule::new("guarded", r"\d+", specific).when(never),
                FormatRule::new("fallback", r"\d+", general),
            ],
        );
        assert_eq!(c.decode("42").unwrap().year, "general");
    }
}
