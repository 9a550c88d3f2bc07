//! Per-brand format decoders
//!
//! Every module exposes `decode(serial) -> DecodeResult` and `cascade()`
//! (its ordered rule list, for introspection and tests). Century thresholds,
//! factory codes and range tables are local to each module.

pub mod charvel;
pub mod cort;
pub mod dean;
pub mod epiphone;
pub mod esp;
pub mod fender;
pub mod g_and_l;
pub mod gibson;
pub mod gretsch;
pub mod guild;
pub mod ibanez;
pub mod jackson;
pub mod kramer;
pub mod martin;
pub mod music_man;
pub mod ovation;
pub mod peavey;
pub mod prs;
pub mod rickenbacker;
pub mod schecter;
pub mod squier;
pub mod takamine;
pub mod taylor;
pub mod washburn;
pub mod yamaha;

use crate::cascade::Cascade;
use crate::models::Brand;

/// Cascade for a brand
pub fn cascade(brand: Brand) -> &'static Cascade {
    match brand {
        Brand::Fender => fender::cascade(),
        Brand::Squier => squier::cascade(),
        Brand::Gibson => gibson::cascade(),
        Brand::Epiphone => epiphone::cascade(),
        Brand::Martin => martin::cascade(),
        Brand::Taylor => taylor::cascade(),
        Brand::Prs => prs::cascade(),
        Brand::Ibanez => ibanez::cascade(),
        Brand::Yamaha => yamaha::cascade(),
        Brand::Gretsch => gretsch::cascade(),
        Brand::Rickenbacker => rickenbacker::cascade(),
        Brand::Guild => guild::cascade(),
        Brand::Jackson => jackson::cascade(),
        Brand::Charvel => charvel::cascade(),
        Brand::Esp => esp::cascade(),
        Brand::Schecter => schecter::cascade(),
        Brand::Washburn => washburn::cascade(),
        Brand::Ovation => ovation::cascade(),
        Brand::MusicMan => music_man::cascade(),
        Brand::GAndL => g_and_l::cascade(),
        Brand::Takamine => takamine::cascade(),
        Brand::Dean => dean::cascade(),
        Brand::Peavey => peavey::cascade(),
        Brand::Cort => cort::cascade(),
        Brand::Kramer => kramer::cascade(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_brand_has_rules() {
        for brand in Brand::ALL {
            let c = cascade(brand);
            assert_eq!(c.brand(), brand);
            assert!(!c.formats().is_empty(), "{brand} has no rules");
        }
    }

    #[test]
    fn test_every_brand_rejects_garbage_with_format_list() {
        for brand in Brand::ALL {
            let err = brand.decoder()("?!").unwrap_err();
            assert!(err.is_unrecognized(), "{brand}: {err}");
            assert!(err.to_string().contains(brand.name()));
        }
    }
}
