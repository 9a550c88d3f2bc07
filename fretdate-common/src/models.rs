//! Core data model: brand identifiers, decoded info, detection results

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::brands;
use crate::error::DecodeResult;
use crate::tables::Factory;

/// Supported instrument brands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Brand {
    Fender,
    Squier,
    Gibson,
    Epiphone,
    Martin,
    Taylor,
    Prs,
    Ibanez,
    Yamaha,
    Gretsch,
    Rickenbacker,
    Guild,
    Jackson,
    Charvel,
    Esp,
    Schecter,
    Washburn,
    Ovation,
    MusicMan,
    GAndL,
    Takamine,
    Dean,
    Peavey,
    Cort,
    Kramer,
}

impl Brand {
    /// Every supported brand, in display order
    pub const ALL: [Brand; 25] = [
        Brand::Fender,
        Brand::Squier,
        Brand::Gibson,
        Brand::Epiphone,
        Brand::Martin,
        Brand::Taylor,
        Brand::Prs,
        Brand::Ibanez,
        Brand::Yamaha,
        Brand::Gretsch,
        Brand::Rickenbacker,
        Brand::Guild,
        Brand::Jackson,
        Brand::Charvel,
        Brand::Esp,
        Brand::Schecter,
        Brand::Washburn,
        Brand::Ovation,
        Brand::MusicMan,
        Brand::GAndL,
        Brand::Takamine,
        Brand::Dean,
        Brand::Peavey,
        Brand::Cort,
        Brand::Kramer,
    ];

    /// Stable lowercase identifier (matches the serde representation)
    pub fn id(&self) -> &'static str {
        match self {
            Brand::Fender => "fender",
            Brand::Squier => "squier",
            Brand::Gibson => "gibson",
            Brand::Epiphone => "epiphone",
            Brand::Martin => "martin",
            Brand::Taylor => "taylor",
            Brand::Prs => "prs",
            Brand::Ibanez => "ibanez",
            Brand::Yamaha => "yamaha",
            Brand::Gretsch => "gretsch",
            Brand::Rickenbacker => "rickenbacker",
            Brand::Guild => "guild",
            Brand::Jackson => "jackson",
            Brand::Charvel => "charvel",
            Brand::Esp => "esp",
            Brand::Schecter => "schecter",
            Brand::Washburn => "washburn",
            Brand::Ovation => "ovation",
            Brand::MusicMan => "music-man",
            Brand::GAndL => "g-and-l",
            Brand::Takamine => "takamine",
            Brand::Dean => "dean",
            Brand::Peavey => "peavey",
            Brand::Cort => "cort",
            Brand::Kramer => "kramer",
        }
    }

    /// Human-readable brand name
    pub fn name(&self) -> &'static str {
        match self {
            Brand::Fender => "Fender",
            Brand::Squier => "Squier",
            Brand::Gibson => "Gibson",
            Brand::Epiphone => "Epiphone",
            Brand::Martin => "Martin",
            Brand::Taylor => "Taylor",
            Brand::Prs => "PRS",
            Brand::Ibanez => "Ibanez",
            Brand::Yamaha => "Yamaha",
            Brand::Gretsch => "Gretsch",
            Brand::Rickenbacker => "Rickenbacker",
            Brand::Guild => "Guild",
            Brand::Jackson => "Jackson",
            Brand::Charvel => "Charvel",
            Brand::Esp => "ESP/LTD",
            Brand::Schecter => "Schecter",
            Brand::Washburn => "Washburn",
            Brand::Ovation => "Ovation",
            Brand::MusicMan => "Music Man",
            Brand::GAndL => "G&L",
            Brand::Takamine => "Takamine",
            Brand::Dean => "Dean",
            Brand::Peavey => "Peavey",
            Brand::Cort => "Cort",
            Brand::Kramer => "Kramer",
        }
    }

    /// Brand-specific decoder (normalizes its input)
    pub fn decoder(&self) -> fn(&str) -> DecodeResult {
        match self {
            Brand::Fender => brands::fender::decode,
            Brand::Squier => brands::squier::decode,
            Brand::Gibson => brands::gibson::decode,
            Brand::Epiphone => brands::epiphone::decode,
            Brand::Martin => brands::martin::decode,
            Brand::Taylor => brands::taylor::decode,
            Brand::Prs => brands::prs::decode,
            Brand::Ibanez => brands::ibanez::decode,
            Brand::Yamaha => brands::yamaha::decode,
            Brand::Gretsch => brands::gretsch::decode,
            Brand::Rickenbacker => brands::rickenbacker::decode,
            Brand::Guild => brands::guild::decode,
            Brand::Jackson => brands::jackson::decode,
            Brand::Charvel => brands::charvel::decode,
            Brand::Esp => brands::esp::decode,
            Brand::Schecter => brands::schecter::decode,
            Brand::Washburn => brands::washburn::decode,
            Brand::Ovation => brands::ovation::decode,
            Brand::MusicMan => brands::music_man::decode,
            Brand::GAndL => brands::g_and_l::decode,
            Brand::Takamine => brands::takamine::decode,
            Brand::Dean => brands::dean::decode,
            Brand::Peavey => brands::peavey::decode,
            Brand::Cort => brands::cort::decode,
            Brand::Kramer => brands::kramer::decode,
        }
    }

    /// True for brands covered by the brand detector
    pub fn is_detectable(&self) -> bool {
        crate::detect::DETECTABLE_BRANDS.contains(self)
    }
}

impl fmt::Display for Brand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Error returned when parsing an unknown brand identifier
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown brand '{0}'. Accepted brands: {}", Brand::ALL.iter().map(|b| b.id()).collect::<Vec<_>>().join(", "))]
pub struct UnknownBrand(pub String);

impl FromStr for Brand {
    type Err = UnknownBrand;

    /// Accepts the id (`music-man`), the display name (`Music Man`) or a
    /// squashed form (`musicman`, `gandl`, `ltd`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let squash = |v: &str| -> String {
            v.chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .map(|c| c.to_ascii_lowercase())
                .collect()
        };
        let wanted = squash(s.replace('&', "and").as_str());
        if wanted == "ltd" || wanted == "espltd" {
            return Ok(Brand::Esp);
        }
        Brand::ALL
            .iter()
            .copied()
            .find(|b| squash(b.id()) == wanted || squash(&b.name().replace('&', "and")) == wanted)
            .ok_or_else(|| UnknownBrand(s.to_string()))
    }
}

/// Decoded manufacture metadata.
///
/// Optional fields are absent when the format does not encode them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuitarInfo {
    pub brand: String,
    pub serial_number: String,
    pub year: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub notes: String,
}

impl GuitarInfo {
    /// Start a result for `brand` with the resolved year
    pub fn new(brand: Brand, serial: &str, year: impl Into<String>) -> Self {
        Self {
            brand: brand.name().to_string(),
            serial_number: serial.to_string(),
            year: year.into(),
            month: None,
            day: None,
            factory: None,
            country: None,
            model: None,
            notes: String::new(),
        }
    }

    pub fn month(mut self, month: impl Into<String>) -> Self {
        self.month = Some(month.into());
        self
    }

    pub fn day(mut self, day: u32) -> Self {
        self.day = Some(day.to_string());
        self
    }

    /// Set factory name and country from a table entry
    pub fn factory(mut self, factory: &Factory) -> Self {
        self.factory = Some(factory.name.clone());
        self.country = Some(factory.country.clone());
        self
    }

    pub fn factory_name(mut self, name: impl Into<String>) -> Self {
        self.factory = Some(name.into());
        self
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Append a sentence to `notes`
    pub fn note(mut self, text: impl AsRef<str>) -> Self {
        self.push_note(text);
        self
    }

    /// Append a sentence to `notes` in place
    pub fn push_note(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref().trim();
        if text.is_empty() {
            return;
        }
        if !self.notes.is_empty() {
            self.notes.push(' ');
        }
        self.notes.push_str(text);
    }
}

/// Output of the brand detector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandDetection {
    pub candidates: Vec<Brand>,
    /// True iff exactly one candidate
    pub confident: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl BrandDetection {
    /// The single detected brand, if detection was confident
    pub fn brand(&self) -> Option<Brand> {
        if self.confident {
            self.candidates.first().copied()
        } else {
            None
        }
    }
}
