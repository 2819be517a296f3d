//! # JcodeDetect - Structural Charset Detection
//!
//! A small, self-contained library for guessing the character encoding of
//! a raw byte buffer with no external metadata, aimed at the encodings that
//! show up in legacy Japanese text: ISO-2022-JP, Shift-JIS and EUC-JP next
//! to ASCII and the Unicode transformation formats.
//!
//! Detection is purely structural: each supported encoding has a byte
//! grammar, and a buffer is scored by whether it parses without
//! contradiction under that grammar. There is no statistical language
//! model and no decoding; the winning [`Encoding`] is intended to be fed
//! to a real transcoder afterwards.
//!
//! ## Quick Start
//!
//! ```rust
//! use jcode_detect::{detect, is_shift_jis, Encoding};
//!
//! let bytes = &[0x93, 0xFA, 0x96, 0x7B, 0x8C, 0xEA]; // "日本語" in Shift-JIS
//! assert_eq!(is_shift_jis(bytes), 1.0);
//! assert_eq!(detect(bytes), Encoding::SHIFT_JIS);
//! ```
//!
//! Scores live on a fixed ladder (see [`Confidence`]): `0.0` rules an
//! encoding out, `0.5` means plausible but ambiguous, `1.0` means the
//! grammar or a unique marker pins it down, and `1.5` is a definite match
//! that additionally carries a byte-order signature.

#![deny(missing_docs)]

pub mod detection;
mod grammar;

pub use detection::{DetectionResult, EncodingDetector};

/// Numeric confidence score in the closed range `[0.0, 1.5]`.
///
/// Higher never means less confident; equal scores are genuine ties and
/// are resolved only by the dispatcher's fixed priority order.
pub type Score = f64;

/// Confidence tier assigned by a scorer.
///
/// The numeric values form a fixed ladder rather than a continuum: every
/// scorer lands exactly on one rung, so downstream comparisons are
/// comparisons between tiers, never between nearby floats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Confidence {
    /// The buffer contradicts the encoding's grammar.
    Impossible,
    /// The buffer parses, but the same bytes fit other encodings too.
    Ambiguous,
    /// A unique marker or a fully self-consistent grammar.
    Definite,
    /// Definite, plus an explicit byte-order signature on top.
    DefiniteWithBom,
}

impl Confidence {
    /// Numeric value of this tier.
    pub fn score(self) -> Score {
        match self {
            Confidence::Impossible => 0.0,
            Confidence::Ambiguous => 0.5,
            Confidence::Definite => 1.0,
            Confidence::DefiniteWithBom => 1.5,
        }
    }
}

/// Supported character encodings, plus the explicit failure value
///
/// This is the closed result set of [`detect`]; the detector never guesses
/// outside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum Encoding {
    /// ASCII (7-bit, 0-127)
    ASCII,
    /// ISO-2022-JP with escape-sequence shift markers ("JIS")
    JIS,
    /// UTF-16 little endian
    UTF16LE,
    /// UTF-16 big endian
    UTF16BE,
    /// UTF-32 little endian
    UTF32LE,
    /// UTF-32 big endian
    UTF32BE,
    /// UTF-8 without a signature (variable length, 1-4 bytes)
    UTF8,
    /// UTF-8 opening with the EF BB BF signature
    UTF8_BOM,
    /// Shift-JIS (Japanese)
    SHIFT_JIS,
    /// EUC-JP (Japanese)
    EUC_JP,
    /// No detector produced a positive score
    UNDETERMINED,
}

impl Encoding {
    /// Get the canonical name of this encoding
    pub fn name(self) -> &'static str {
        match self {
            Encoding::ASCII => "US-ASCII",
            Encoding::JIS => "ISO-2022-JP",
            Encoding::UTF16LE => "UTF-16LE",
            Encoding::UTF16BE => "UTF-16BE",
            Encoding::UTF32LE => "UTF-32LE",
            Encoding::UTF32BE => "UTF-32BE",
            Encoding::UTF8 => "UTF-8",
            Encoding::UTF8_BOM => "UTF-8-BOM",
            Encoding::SHIFT_JIS => "Shift_JIS",
            Encoding::EUC_JP => "EUC-JP",
            Encoding::UNDETERMINED => "undetermined",
        }
    }

    /// Check if this encoding is ASCII-compatible (ASCII bytes 0-127 have
    /// same meaning)
    pub fn is_ascii_compatible(self) -> bool {
        matches!(
            self,
            Encoding::ASCII
                | Encoding::UTF8
                | Encoding::UTF8_BOM
                | Encoding::SHIFT_JIS
                | Encoding::EUC_JP
        )
    }

    /// Check if this encoding uses variable-length or multi-byte character
    /// representation
    pub fn is_multibyte(self) -> bool {
        matches!(
            self,
            Encoding::JIS
                | Encoding::UTF16LE
                | Encoding::UTF16BE
                | Encoding::UTF32LE
                | Encoding::UTF32BE
                | Encoding::UTF8
                | Encoding::UTF8_BOM
                | Encoding::SHIFT_JIS
                | Encoding::EUC_JP
        )
    }

    /// Get the byte order mark (BOM) for this encoding if it has one
    pub fn bom(self) -> Option<&'static [u8]> {
        match self {
            Encoding::UTF8_BOM => Some(&[0xEF, 0xBB, 0xBF]),
            Encoding::UTF16LE => Some(&[0xFF, 0xFE]),
            Encoding::UTF16BE => Some(&[0xFE, 0xFF]),
            Encoding::UTF32LE => Some(&[0xFF, 0xFE, 0x00, 0x00]),
            Encoding::UTF32BE => Some(&[0x00, 0x00, 0xFE, 0xFF]),
            _ => None,
        }
    }
}

/// Score the buffer as ASCII: 1.0 when every byte is 7-bit, else 0.0.
///
/// The empty buffer satisfies the rule vacuously and scores 1.0.
pub fn is_ascii(buffer: &[u8]) -> Score {
    detection::score_ascii(buffer).score()
}

/// Score the buffer as ISO-2022-JP: 1.0 when at least one recognized shift
/// marker is present and the whole buffer parses under the mode rules,
/// else 0.0.
pub fn is_jis(buffer: &[u8]) -> Score {
    detection::score_jis(buffer).score()
}

/// Score the buffer as signature-carrying UTF-8: 1.0 when the first three
/// bytes are exactly EF BB BF, else 0.0. Content past the signature is not
/// inspected.
pub fn is_utf8_signed(buffer: &[u8]) -> Score {
    detection::score_utf8_signed(buffer).score()
}

/// Score the buffer as UTF-8: 0.5 when the whole buffer follows the strict
/// UTF-8 grammar, 1.5 when it additionally opens with the signature, 0.0
/// on any grammar violation.
pub fn is_utf8(buffer: &[u8]) -> Score {
    detection::score_utf8(buffer).1.score()
}

/// Score the buffer as UTF-16: 0.5 when the length is even and every unit
/// is a non-surrogate or a well-formed surrogate pair under at least one
/// byte order, else 0.0. Never rises above 0.5; byte order cannot be
/// proven from content alone.
pub fn is_utf16(buffer: &[u8]) -> Score {
    detection::score_utf16(buffer).1.score()
}

/// Score the buffer as UTF-32: 0.5 when the length is a multiple of four
/// and every unit is a valid scalar value under at least one byte order,
/// else 0.0. Capped at 0.5 like [`is_utf16`].
pub fn is_utf32(buffer: &[u8]) -> Score {
    detection::score_utf32(buffer).1.score()
}

/// Score the buffer as Shift-JIS: 1.0 when every byte is a valid single or
/// starts a complete lead/trail pair, else 0.0.
pub fn is_shift_jis(buffer: &[u8]) -> Score {
    detection::score_shift_jis(buffer).score()
}

/// Score the buffer as EUC-JP: 1.0 when every byte starts a complete
/// recognized form (ASCII single, JIS X 0208 pair, SS2 kana, SS3 pair),
/// else 0.0.
pub fn is_euc_jp(buffer: &[u8]) -> Score {
    detection::score_euc_jp(buffer).score()
}

/// Run every scorer and return the single best-guess encoding.
///
/// Total and deterministic for any input, including the empty buffer
/// (which resolves to [`Encoding::ASCII`]). Returns
/// [`Encoding::UNDETERMINED`] when no scorer produces a positive score.
pub fn detect(buffer: &[u8]) -> Encoding {
    EncodingDetector::new().detect(buffer).encoding
}
