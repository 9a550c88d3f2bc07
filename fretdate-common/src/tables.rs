//! Static lookup tables shared by brand decoders
//!
//! Brand-specific data (factory codes, range tables, century thresholds)
//! lives next to the decoder that uses it; only the table *types* and the
//! few genuinely shared letter codes live here.

use std::collections::HashMap;

/// Label used when a code is not present in its table
pub const UNKNOWN: &str = "Unknown";

/// A resolved factory entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Factory {
    pub code: String,
    pub name: String,
    pub country: String,
    /// False when the code was absent from the table
    pub known: bool,
}

/// Immutable map from a short alphabetic code to factory name and country
#[derive(Debug)]
pub struct FactoryTable {
    entries: HashMap<&'static str, (&'static str, &'static str)>,
}

impl FactoryTable {
    /// Build a table from `(code, name, country)` rows; codes are given upper-case
    pub fn new(rows: &[(&'static str, &'static str, &'static str)]) -> Self {
        let entries = rows
            .iter()
            .map(|&(code, name, country)| (code, (name, country)))
            .collect();
        Self { entries }
    }

    /// Resolve a code; unknown codes degrade to a labeled "Unknown" entry
    pub fn lookup(&self, code: &str) -> Factory {
        let code = code.trim().to_ascii_uppercase();
        match self.entries.get(code.as_str()) {
            Some(&(name, country)) => Factory {
                code,
                name: name.to_string(),
                country: country.to_string(),
                known: true,
            },
            None => Factory {
                name: format!("Unknown factory ({code})"),
                code,
                country: UNKNOWN.to_string(),
                known: false,
            },
        }
    }

    /// True if the code is present
    pub fn contains(&self, code: &str) -> bool {
        self.entries.contains_key(code.to_ascii_uppercase().as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Month letter code A=January … L=December (FujiGen, Rickenbacker)
pub fn month_from_letter(letter: char) -> Option<u32> {
    match letter.to_ascii_uppercase() {
        c @ 'A'..='L' => Some(u32::from(c) - u32::from('A') + 1),
        _ => None,
    }
}

/// Year letter code where A is `base_year`, B is `base_year + 1`, …
pub fn year_from_letter(letter: char, base_year: i32) -> Option<i32> {
    match letter.to_ascii_uppercase() {
        c @ 'A'..='Z' => Some(base_year + (u32::from(c) - u32::from('A')) as i32),
        _ => None,
    }
}
