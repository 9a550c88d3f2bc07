//! Decode error types
//!
//! A failed decode is a normal outcome and carries a user-facing message.
//! Unknown factory codes and ambiguous years are *not* errors: they are
//! reported as successful results with "Unknown" labels or compound years.

use thiserror::Error;

use crate::models::GuitarInfo;

/// Result of decoding one serial number
pub type DecodeResult = std::result::Result<GuitarInfo, DecodeError>;

/// Decode failure taxonomy
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Nothing left after normalization; still lists the brand's shapes
    #[error(
        "Please enter a serial number. Recognized {brand} formats: {}.",
        formats.join("; ")
    )]
    EmptySerial {
        brand: String,
        formats: Vec<&'static str>,
    },

    /// No cascade rule matched; lists the shapes the brand supports
    #[error(
        "Unrecognized {brand} serial number format. Recognized {brand} formats: {}.",
        formats.join("; ")
    )]
    UnrecognizedFormat {
        brand: String,
        formats: Vec<&'static str>,
    },

    /// A strictly-encoded field is out of range
    #[error("Invalid {field} '{value}'. Expected {expected}.")]
    InvalidField {
        field: &'static str,
        value: String,
        expected: String,
    },

    /// Post-processor rejection (implied manufacture date lies in the future)
    #[error(
        "Unable to decode this serial number: it would imply manufacture in {year}, which is in the future. \
         Check the serial number and the selected brand."
    )]
    Undecodable { year: String },
}

impl DecodeError {
    /// Build an `InvalidField` error
    pub fn invalid_field(field: &'static str, value: impl Into<String>, expected: impl Into<String>) -> Self {
        DecodeError::InvalidField {
            field,
            value: value.into(),
            expected: expected.into(),
        }
    }

    /// Build an `EmptySerial` error
    pub fn empty(brand: impl Into<String>, formats: Vec<&'static str>) -> Self {
        DecodeError::EmptySerial {
            brand: brand.into(),
            formats,
        }
    }

    /// Build an `UnrecognizedFormat` error
    pub fn unrecognized(brand: impl Into<String>, formats: Vec<&'static str>) -> Self {
        DecodeError::UnrecognizedFormat {
            brand: brand.into(),
            formats,
        }
    }

    /// True when the failure came from a cascade miss rather than a bad field
    pub fn is_unrecognized(&self) -> bool {
        matches!(self, DecodeError::UnrecognizedFormat { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_field_message_names_value_and_range() {
        let err = DecodeError::invalid_field("month", "13", "01-12");
        assert_eq!(err.to_string(), "Invalid month '13'. Expected 01-12.");
    }

    #[test]
    fn test_unrecognized_lists_formats() {
        let err = DecodeError::unrecognized("Schecter", vec!["YYMMNNNN", "W + YYMMNNNN"]);
        let msg = err.to_string();
        assert!(msg.contains("Unrecognized Schecter"));
        assert!(msg.contains("YYMMNNNN; W + YYMMNNNN"));
        assert!(err.is_unrecognized());
    }

    #[test]
    fn test_empty_serial_lists_formats() {
        let err = DecodeError::empty("Cort", vec!["YYMMNNNN", "F + YYMMNNNN"]);
        assert_eq!(
            err.to_string(),
            "Please enter a serial number. Recognized Cort formats: YYMMNNNN; F + YYMMNNNN."
        );
        assert!(!err.is_unrecognized());
    }

    #[test]
    fn test_undecodable_is_generic() {
        let err = DecodeError::Undecodable { year: "2031".to_string() };
        assert!(err.to_string().starts_with("Unable to decode"));
        assert!(!err.is_unrecognized());
    }
}
