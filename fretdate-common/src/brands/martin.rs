//! Martin serial numbers
//!
//! Martin has numbered its guitars sequentially since 1898 (starting at 8000,
//! the first 7999 being retroactively estimated). The serial alone gives the
//! year through the published year-end table below.

use once_cell::sync::Lazy;
use regex::Captures;

use crate::cascade::{cap, Cascade, FormatRule};
use crate::error::DecodeResult;
use crate::models::{Brand, GuitarInfo};
use crate::range::{entry, RangeEntry, RangeLookup, RangeTable};
use crate::serial::digits_u64;

/// First serial of the numbered era
const FIRST_SERIAL: u64 = 8000;

const FACTORY: &str = "Nazareth, Pennsylvania";

/// Last serial shipped in each year
static YEAR_END: [RangeEntry; 122] = [
    entry(8348, 1898),
    entry(8716, 1899),
    entry(9128, 1900),
    entry(9310, 1901),
    entry(9528, 1902),
    entry(9810, 1903),
    entry(9988, 1904),
    entry(10120, 1905),
    entry(10329, 1906),
    entry(10727, 1907),
    entry(10883, 1908),
    entry(11018, 1909),
    entry(11203, 1910),
    entry(11413, 1911),
    entry(11565, 1912),
    entry(11821, 1913),
    entry(12047, 1914),
    entry(12209, 1915),
    entry(12390, 1916),
    entry(12988, 1917),
    entry(13450, 1918),
    entry(14512, 1919),
    entry(15848, 1920),
    entry(16758, 1921),
    entry(17839, 1922),
    entry(19891, 1923),
    entry(22008, 1924),
    entry(24116, 1925),
    entry(28689, 1926),
    entry(34435, 1927),
    entry(37568, 1928),
    entry(40843, 1929),
    entry(45317, 1930),
    entry(49589, 1931),
    entry(52590, 1932),
    entry(55084, 1933),
    entry(58679, 1934),
    entry(61947, 1935),
    entry(65176, 1936),
    entry(68865, 1937),
    entry(71866, 1938),
    entry(74061, 1939),
    entry(76734, 1940),
    entry(80013, 1941),
    entry(83107, 1942),
    entry(86724, 1943),
    entry(90149, 1944),
    entry(93623, 1945),
    entry(98158, 1946),
    entry(103468, 1947),
    entry(108269, 1948),
    entry(112961, 1949),
    entry(117961, 1950),
    entry(122799, 1951),
    entry(128436, 1952),
    entry(134501, 1953),
    entry(141345, 1954),
    entry(147328, 1955),
    entry(152775, 1956),
    entry(159061, 1957),
    entry(165576, 1958),
    entry(171047, 1959),
    entry(175689, 1960),
    entry(181297, 1961),
    entry(187384, 1962),
    entry(193327, 1963),
    entry(199626, 1964),
    entry(207030, 1965),
    entry(217215, 1966),
    entry(230095, 1967),
    entry(241925, 1968),
    entry(256003, 1969),
    entry(271633, 1970),
    entry(294270, 1971),
    entry(313302, 1972),
    entry(333873, 1973),
    entry(353387, 1974),
    entry(371828, 1975),
    entry(388800, 1976),
    entry(399625, 1977),
    entry(407800, 1978),
    entry(419900, 1979),
    entry(430300, 1980),
    entry(436474, 1981),
    entry(439627, 1982),
    entry(446101, 1983),
    entry(453300, 1984),
    entry(460575, 1985),
    entry(468175, 1986),
    entry(476216, 1987),
    entry(483952, 1988),
    entry(493279, 1989),
    entry(503309, 1990),
    entry(512487, 1991),
    entry(522655, 1992),
    entry(535223, 1993),
    entry(551696, 1994),
    entry(570087, 1995),
    entry(592930, 1996),
    entry(624799, 1997),
    entry(668796, 1998),
    entry(724077, 1999),
    entry(780500, 2000),
    entry(845644, 2001),
    entry(916759, 2002),
    entry(978706, 2003),
    entry(1042558, 2004),
    entry(1115862, 2005),
    entry(1197799, 2006),
    entry(1268091, 2007),
    entry(1337042, 2008),
    entry(1406715, 2009),
    entry(1473461, 2010),
    entry(1555706, 2011),
    entry(1656225, 2012),
    entry(1755167, 2013),
    entry(1857750, 2014),
    entry(1972690, 2015),
    entry(2084783, 2016),
    entry(2198466, 2017),
    entry(2317200, 2018),
    entry(2434563, 2019),
];

/// Year-end table as a [`RangeTable`]
pub static TABLE: RangeTable = RangeTable::new(&YEAR_END);

static CASCADE: Lazy<Cascade> = Lazy::new(|| {
    Cascade::new(
        Brand::Martin,
        vec![FormatRule::new("sequential number (1-7 digits)", r"(\d{1,7})", decode_sequential)],
    )
});

pub fn cascade() -> &'static Cascade {
    &CASCADE
}

/// Decode a Martin serial
pub fn decode(serial: &str) -> DecodeResult {
    CASCADE.decode(serial)
}

fn decode_sequential(caps: &Captures<'_>) -> DecodeResult {
    let raw = cap(caps, 1);
    let serial = digits_u64(raw);

    if serial < FIRST_SERIAL {
        return Ok(GuitarInfo::new(Brand::Martin, raw, "Before 1898")
            .factory_name(FACTORY)
            .country("USA")
            .note(format!(
                "Serial {serial} is below {FIRST_SERIAL}, where Martin's numbered sequence begins in 1898. \
                 Numbers 1-7999 were assigned retroactively to estimated earlier production, so the guitar predates 1898."
            )));
    }

    let lookup = TABLE.lookup(serial);
    let mut info = GuitarInfo::new(Brand::Martin, raw, lookup.describe())
        .factory_name(FACTORY)
        .country("USA");

    match lookup {
        RangeLookup::Year(year) => {
            info.push_note(format!("Sequential serial {serial} falls in Martin's {year} production range."));
            if let Some((start, end)) = TABLE.band(serial, FIRST_SERIAL) {
                info.push_note(format!("The {year} range runs from {start} to {end}."));
            }
            if let Some(third) = TABLE.production_third(serial, FIRST_SERIAL) {
                info.push_note(format!("This places it in {third} {year} production."));
            }
        }
        RangeLookup::Later { last_year } => {
            info.push_note(format!(
                "Serial {serial} is beyond the last published range ({last_year}), so the guitar was made in {last_year} or later."
            ));
        }
    }

    if serial >= 1_000_000 {
        info.push_note("Martin passed serial 1,000,000 in 2004.");
    }
    Ok(info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_strictly_increasing() {
        assert!(TABLE.is_strictly_increasing());
    }

    #[test]
    fn test_boundary_band_1985() {
        let info = decode("455000").unwrap();
        assert_eq!(info.year, "1985");
        assert!(info.notes.contains("453301 to 460575"));
        assert!(info.notes.contains("early 1985"));
    }

    #[test]
    fn test_exact_year_end() {
        assert_eq!(decode("453300").unwrap().year, "1984");
        assert_eq!(decode("453301").unwrap().year, "1985");
    }

    #[test]
    fn test_beyond_last_range() {
        let info = decode("2500000").unwrap();
        assert_eq!(info.year, "2019 or later");
        assert!(info.notes.contains("beyond the last published range"));
    }

    #[test]
    fn test_pre_1898() {
        let info = decode("1234").unwrap();
        assert_eq!(info.year, "Before 1898");
    }

    #[test]
    fn test_rejects_letters() {
        assert!(decode("D18-1234X").is_err());
    }
}
