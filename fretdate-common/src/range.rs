//! Ordered serial-number range tables
//!
//! Used by brands with sequential (non-encoded) numbering. A table is an
//! ascending list of `(max_serial_inclusive, year)` pairs; a serial maps to
//! the first entry whose maximum is at least the serial.
//!
//! Brand-specific quirks (numbering gaps, pre-table serials) are handled by
//! the brand decoder, not here.

use std::fmt;

/// One band of a range table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeEntry {
    pub max_serial: u64,
    pub year: i32,
}

/// Outcome of a range lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeLookup {
    /// Serial falls inside a known band
    Year(i32),
    /// Serial is larger than every known band
    Later { last_year: i32 },
}

impl RangeLookup {
    /// Display form: `1985` or `2019 or later`
    pub fn describe(&self) -> String {
        match self {
            RangeLookup::Year(year) => year.to_string(),
            RangeLookup::Later { last_year } => format!("{last_year} or later"),
        }
    }

    /// Year used for ordering comparisons
    pub fn sort_year(&self) -> i32 {
        match self {
            RangeLookup::Year(year) => *year,
            RangeLookup::Later { last_year } => *last_year,
        }
    }
}

/// Position of a serial within its production year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductionThird {
    Early,
    Mid,
    Late,
}

impl fmt::Display for ProductionThird {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductionThird::Early => write!(f, "early"),
            ProductionThird::Mid => write!(f, "mid"),
            ProductionThird::Late => write!(f, "late"),
        }
    }
}

/// Immutable ascending range table
#[derive(Debug, Clone, Copy)]
pub struct RangeTable {
    entries: &'static [RangeEntry],
}

impl RangeTable {
    /// Wrap a static table. Entries must be strictly increasing by `max_serial`.
    pub const fn new(entries: &'static [RangeEntry]) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &'static [RangeEntry] {
        self.entries
    }

    pub fn last(&self) -> Option<RangeEntry> {
        self.entries.last().copied()
    }

    /// True iff `max_serial` is strictly increasing
    pub fn is_strictly_increasing(&self) -> bool {
        self.entries.windows(2).all(|w| w[0].max_serial < w[1].max_serial)
    }

    /// Map a serial to its production year (binary search, first band with `max >= serial`)
    pub fn lookup(&self, serial: u64) -> RangeLookup {
        let idx = self.entries.partition_point(|e| e.max_serial < serial);
        match self.entries.get(idx) {
            Some(entry) => RangeLookup::Year(entry.year),
            None => RangeLookup::Later {
                last_year: self.entries.last().map(|e| e.year).unwrap_or_default(),
            },
        }
    }

    /// Inclusive serial bounds of the band containing `serial`.
    ///
    /// The first band starts at `floor`.
    pub fn band(&self, serial: u64, floor: u64) -> Option<(u64, u64)> {
        let idx = self.entries.partition_point(|e| e.max_serial < serial);
        let entry = self.entries.get(idx)?;
        let start = match idx.checked_sub(1).and_then(|i| self.entries.get(i)) {
            Some(prev) => prev.max_serial + 1,
            None => floor,
        };
        Some((start, entry.max_serial))
    }

    /// Early/mid/late third of the production year, from the band boundaries
    pub fn production_third(&self, serial: u64, floor: u64) -> Option<ProductionThird> {
        let (start, end) = self.band(serial, floor)?;
        if serial < start || end <= start {
            return None;
        }
        let span = end - start + 1;
        let offset = serial - start;
        Some(match offset * 3 / span {
            0 => ProductionThird::Early,
            1 => ProductionThird::Mid,
            _ => ProductionThird::Late,
        })
    }
}

/// Shorthand for building static tables
pub const fn entry(max_serial: u64, year: i32) -> RangeEntry {
    RangeEntry { max_serial, year }
}
