//! Behavioral properties of the decoding core
//!
//! - Purity and normalization invariance across every brand
//! - Range-table monotonicity
//! - Cascade specificity (specific prefixes win over general shapes)
//! - Strict month validation
//! - Future-year filter
//! - End-to-end scenarios through the orchestration layer

use fretdate_common::brands::{self, g_and_l, gibson, gretsch, guild, jackson, martin, ovation, prs};
use fretdate_common::range::RangeTable;
use fretdate_common::{decode_at, normalize, Brand, DecodeError};
use pretty_assertions::assert_eq;

const NOW: i32 = 2026;

/// One plausible serial per brand
const SAMPLES: [(Brand, &str); 25] = [
    (Brand::Fender, "US12345678"),
    (Brand::Squier, "ICS10123456"),
    (Brand::Gibson, "70328123"),
    (Brand::Epiphone, "I99021234"),
    (Brand::Martin, "455000"),
    (Brand::Taylor, "0503150123"),
    (Brand::Prs, "12123456"),
    (Brand::Ibanez, "C781234"),
    (Brand::Yamaha, "LZ12345"),
    (Brand::Gretsch, "JT04051234"),
    (Brand::Rickenbacker, "HD1234"),
    (Brand::Guild, "12035"),
    (Brand::Jackson, "J1500"),
    (Brand::Charvel, "1050"),
    (Brand::Esp, "25120512"),
    (Brand::Schecter, "05081234"),
    (Brand::Washburn, "SI02060234"),
    (Brand::Ovation, "100000"),
    (Brand::MusicMan, "F190531234"),
    (Brand::GAndL, "G010000"),
    (Brand::Takamine, "5503123"),
    (Brand::Dean, "KS10071234"),
    (Brand::Peavey, "KSP09051234"),
    (Brand::Cort, "08111234"),
    (Brand::Kramer, "A1234"),
];

#[test]
fn test_every_sample_decodes_with_notes() {
    for (brand, serial) in SAMPLES {
        let info = decode_at(brand, serial, NOW).unwrap_or_else(|e| panic!("{brand} {serial}: {e}"));
        assert_eq!(info.brand, brand.name());
        assert!(!info.notes.is_empty(), "{brand} {serial} has no notes");
    }
}

#[test]
fn test_decode_is_idempotent() {
    for (brand, serial) in SAMPLES {
        assert_eq!(decode_at(brand, serial, NOW), decode_at(brand, serial, NOW));
    }
}

#[test]
fn test_normalization_invariance() {
    for (brand, serial) in SAMPLES {
        let messy = format!(" {}-{} ", serial[..2].to_lowercase(), &serial[2..]);
        assert_eq!(decode_at(brand, &messy, NOW), decode_at(brand, &normalize(&messy), NOW), "{brand}");
        assert_eq!(decode_at(brand, &messy, NOW), decode_at(brand, serial, NOW), "{brand}");
    }
}

#[test]
fn test_normalize_is_idempotent() {
    for raw in ["  si-0206 0234 ", "abc", "", "1-2-3"] {
        let once = normalize(raw);
        assert_eq!(normalize(&once), once);
    }
}

#[test]
fn test_empty_serial_is_an_error() {
    for brand in Brand::ALL {
        let err = decode_at(brand, "  - ", NOW).unwrap_err();
        assert!(matches!(err, DecodeError::EmptySerial { .. }), "{brand}");
        let message = err.to_string();
        assert!(message.starts_with("Please enter a serial number."));
        for format in brands::cascade(brand).formats() {
            assert!(message.contains(format), "{brand}: missing {format}");
        }
    }
}

/// Arabic-Indic, full-width and mixed digit strings
const NON_ASCII_DIGITS: [&str; 4] = ["٤٥٥٠٠٠", "４５５０００", "١١1", "I٩٩٠٢١٢٣٤"];

#[test]
fn test_non_ascii_digits_are_unrecognized() {
    for brand in Brand::ALL {
        for serial in NON_ASCII_DIGITS {
            match decode_at(brand, serial, NOW) {
                Err(DecodeError::UnrecognizedFormat { .. }) => {}
                other => panic!("{brand} {serial}: expected UnrecognizedFormat, got {other:?}"),
            }
        }
    }
}

#[test]
fn test_unrecognized_error_lists_formats() {
    let err = decode_at(Brand::Taylor, "HELLO", NOW).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("Recognized Taylor formats"));
    for format in brands::cascade(Brand::Taylor).formats() {
        assert!(message.contains(format), "missing {format}");
    }
}

fn assert_monotonic(name: &str, table: &RangeTable) {
    assert!(table.is_strictly_increasing(), "{name} table is not strictly increasing");
    let max = table.last().map(|e| e.max_serial).unwrap_or(0) + 10;
    let step = (max / 500).max(1);
    let mut previous = i32::MIN;
    let mut serial = 0;
    while serial <= max {
        let year = table.lookup(serial).sort_year();
        assert!(year >= previous, "{name}: {serial} resolved to {year} after {previous}");
        previous = year;
        serial += step;
    }
}

#[test]
fn test_range_tables_are_monotonic() {
    assert_monotonic("martin", &martin::TABLE);
    assert_monotonic("gibson", &gibson::PREWAR_TABLE);
    assert_monotonic("prs", &prs::SET_NECK_TABLE);
    assert_monotonic("guild", &guild::SEQUENTIAL_TABLE);
    assert_monotonic("jackson", &jackson::USA_TABLE);
    assert_monotonic("ovation", &ovation::TABLE);
    assert_monotonic("gretsch", &gretsch::SEQUENTIAL_TABLE);
    assert_monotonic("g&l guitars", &g_and_l::GUITAR_TABLE);
    assert_monotonic("g&l basses", &g_and_l::BASS_TABLE);
}

#[test]
fn test_martin_serial_order_matches_year_order() {
    let serials = ["9000", "100000", "455000", "460576", "1500000", "2434563", "2500000"];
    let years: Vec<i32> = serials
        .iter()
        .map(|s| martin::TABLE.lookup(s.parse().unwrap()).sort_year())
        .collect();
    let mut sorted = years.clone();
    sorted.sort_unstable();
    assert_eq!(years, sorted);
}

#[test]
fn test_cascade_specificity() {
    let cases = [
        (Brand::Squier, "ICS10123456", "3-letter factory code + YY + 5-7 digits"),
        (Brand::Epiphone, "EA12051234", "FF + YY + MM + 4-5 digits (two-letter factory code)"),
        (Brand::Guild, "GH12123456", "GH + YY + 3-6 digits (New Hartford, 2008+)"),
        (Brand::Ibanez, "F9812345", "F + YY + 5 digits (FujiGen, 1997+)"),
        (Brand::Charvel, "MC16123456", "MC + YY + 4-6 digits (Mexico)"),
        (Brand::Kramer, "KI14123456", "KI/KC + YY + 4-7 digits (modern import)"),
    ];
    for (brand, serial, expected) in cases {
        assert_eq!(brands::cascade(brand).matching_rule(serial), Some(expected), "{brand} {serial}");
    }
}

#[test]
fn test_strict_month_formats_reject_out_of_range() {
    let cases = [
        (Brand::Schecter, "05131234"),
        (Brand::Cort, "08001234"),
        (Brand::Epiphone, "I99131234"),
        (Brand::Gretsch, "JT04131234"),
        (Brand::Dean, "KS10131234"),
        (Brand::Peavey, "KSP09131234"),
        (Brand::Esp, "W07131234"),
        (Brand::Takamine, "05131812"),
    ];
    for (brand, serial) in cases {
        match decode_at(brand, serial, NOW) {
            Err(DecodeError::InvalidField { field, expected, .. }) => {
                assert_eq!(field, "month", "{brand} {serial}");
                assert_eq!(expected, "01-12");
            }
            other => panic!("{brand} {serial}: expected InvalidField, got {other:?}"),
        }
    }
}

#[test]
fn test_fallback_layout_is_not_a_failure() {
    let info = decode_at(Brand::Esp, "12250512", NOW).unwrap();
    assert_eq!(info.month.as_deref(), Some("December"));
}

#[test]
fn test_martin_boundary_band() {
    let info = decode_at(Brand::Martin, "455000", NOW).unwrap();
    assert_eq!(info.year, "1985");
    assert!(info.notes.contains("453301 to 460575"));
}

#[test]
fn test_week_coded_factory_serial() {
    let info = decode_at(Brand::Washburn, "SI02060234", NOW).unwrap();
    assert_eq!(info.year, "2002");
    assert_eq!(info.month.as_deref(), Some("February"));
    assert_eq!(info.factory.as_deref(), Some("Samick"));
    assert_eq!(info.country.as_deref(), Some("Indonesia"));
    assert!(info.notes.contains("0234"));
}

#[test]
fn test_yymm_month_thirteen() {
    let err = decode_at(Brand::Schecter, "05131234", NOW).unwrap_err();
    assert!(err.to_string().contains("Expected 01-12"));
}

#[test]
fn test_beyond_range_table_is_later_not_error() {
    let last = martin::TABLE.last().unwrap();
    let serial = (last.max_serial + 1).to_string();
    let info = decode_at(Brand::Martin, &serial, NOW).unwrap();
    assert_eq!(info.year, format!("{} or later", last.year));
}

#[test]
fn test_leading_one_read_as_i() {
    assert!(brands::epiphone::decode("199021234").is_err());
    let info = decode_at(Brand::Epiphone, "199021234", NOW).unwrap();
    assert_eq!(info.serial_number, "I99021234");
    assert!(info.notes.contains("read as the letter I"));
}

#[test]
fn test_future_year_filter() {
    // Gibson YY + 7 digits gives a single year
    let err = decode_at(Brand::Gibson, "280012345", 2027).unwrap_err();
    assert!(matches!(err, DecodeError::Undecodable { .. }));

    // compound "1988 or 1998" is never filtered
    let info = decode_at(Brand::Ibanez, "F891234", 1990).unwrap();
    assert_eq!(info.year, "1988 or 1998");
}

#[test]
fn test_future_filter_uses_given_year() {
    assert!(decode_at(Brand::Gibson, "250012345", 2024).is_err());
    assert!(decode_at(Brand::Gibson, "250012345", 2025).is_ok());
}
