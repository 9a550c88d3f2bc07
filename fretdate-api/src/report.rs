//! Plain-text rendering for the command-line subcommands

use fretdate_common::{BrandDetection, GuitarInfo};
use std::fmt::Write;

/// Render decoded metadata as aligned `Label: value` lines
pub fn format_info(info: &GuitarInfo) -> String {
    let fields = [
        ("Brand", Some(info.brand.as_str())),
        ("Serial", Some(info.serial_number.as_str())),
        ("Year", Some(info.year.as_str())),
        ("Month", info.month.as_deref()),
        ("Day", info.day.as_deref()),
        ("Factory", info.factory.as_deref()),
        ("Country", info.country.as_deref()),
        ("Model", info.model.as_deref()),
        ("Notes", Some(info.notes.as_str()).filter(|n| !n.is_empty())),
    ];

    let mut out = String::new();
    for (label, value) in fields {
        if let Some(value) = value {
            let _ = writeln!(out, "{:<9}{}", format!("{label}:"), value);
        }
    }
    out
}

/// Render a detection result
pub fn format_detection(detection: &BrandDetection) -> String {
    let mut out = String::new();
    match detection.brand() {
        Some(brand) => {
            let _ = writeln!(out, "Detected brand: {} ({})", brand.name(), brand.id());
        }
        None => {
            if !detection.candidates.is_empty() {
                let names: Vec<_> = detection.candidates.iter().map(|b| b.id()).collect();
                let _ = writeln!(out, "Candidates: {}", names.join(", "));
            }
            if let Some(message) = &detection.message {
                let _ = writeln!(out, "{message}");
            }
        }
    }
    out
}
