//! Strict text decoding for catalog files.
//!
//! Catalog exports come either as UTF-8 or as the legacy Korean code page
//! (CP949). A wrong declaration must surface as an error rather than as
//! replacement characters in SSIDs and place names.

use std::borrow::Cow;

use encoding_rs::Encoding;
use wifi_map_catalog_models::TextEncoding;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Maps a declared [`TextEncoding`] onto its `encoding_rs` codec.
///
/// `EUC_KR` in `encoding_rs` follows the WHATWG definition, which is
/// Windows code page 949.
#[must_use]
pub fn codec(encoding: TextEncoding) -> &'static Encoding {
    match encoding {
        TextEncoding::Utf8 => encoding_rs::UTF_8,
        TextEncoding::Cp949 => encoding_rs::EUC_KR,
    }
}

/// Decodes `bytes` in the declared encoding without replacement.
///
/// Returns `None` if any byte sequence is malformed for that encoding.
#[must_use]
pub fn decode_strict(bytes: &[u8], encoding: TextEncoding) -> Option<Cow<'_, str>> {
    let bytes = match encoding {
        TextEncoding::Utf8 => bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes),
        TextEncoding::Cp949 => bytes,
    };
    codec(encoding).decode_without_bom_handling_and_without_replacement(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_utf8_and_strips_bom() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice("설치장소명".as_bytes());
        assert_eq!(decode_strict(&bytes, TextEncoding::Utf8).unwrap(), "설치장소명");
    }

    #[test]
    fn decodes_cp949() {
        let (encoded, _, had_errors) = encoding_rs::EUC_KR.encode("서울특별시");
        assert!(!had_errors);
        assert_eq!(
            decode_strict(&encoded, TextEncoding::Cp949).unwrap(),
            "서울특별시"
        );
    }

    #[test]
    fn rejects_cp949_bytes_declared_as_utf8() {
        let (encoded, _, _) = encoding_rs::EUC_KR.encode("서울특별시");
        assert!(decode_strict(&encoded, TextEncoding::Utf8).is_none());
    }

    #[test]
    fn ascii_is_valid_in_both() {
        assert_eq!(decode_strict(b"ssid,lat", TextEncoding::Utf8).unwrap(), "ssid,lat");
        assert_eq!(decode_strict(b"ssid,lat", TextEncoding::Cp949).unwrap(), "ssid,lat");
    }
}
