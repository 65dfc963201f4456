//! Byte decoding with a Korean legacy fallback.

use encoding_rs::EUC_KR;
use tracing::warn;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Encoding a dataset was decoded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceEncoding {
    Utf8,
    /// EUC-KR as extended by Windows code page 949.
    EucKr,
}

impl SourceEncoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceEncoding::Utf8 => "UTF-8",
            SourceEncoding::EucKr => "EUC-KR",
        }
    }
}

impl std::fmt::Display for SourceEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name of the UTF-16 variant announced by a leading byte order mark.
pub fn utf16_bom(bytes: &[u8]) -> Option<&'static str> {
    match bytes {
        [0xFF, 0xFE, ..] => Some("UTF-16 LE"),
        [0xFE, 0xFF, ..] => Some("UTF-16 BE"),
        _ => None,
    }
}

/// Decode file contents as UTF-8 (leading BOM removed), falling back to
/// EUC-KR/CP949 when the bytes are not valid UTF-8.
pub fn decode_bytes(bytes: &[u8]) -> (String, SourceEncoding) {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    if let Ok(text) = std::str::from_utf8(bytes) {
        return (text.to_string(), SourceEncoding::Utf8);
    }
    let (text, had_errors) = EUC_KR.decode_without_bom_handling(bytes);
    if had_errors {
        warn!("dataset is neither valid UTF-8 nor EUC-KR; undecodable bytes were replaced");
    }
    (text.into_owned(), SourceEncoding::EucKr)
}
