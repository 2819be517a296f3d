//! Encoding detection built on the structural validators
//!
//! This module wraps each byte-grammar check in a scorer that produces a
//! [`Confidence`] tier, then runs all scorers over the same buffer and
//! reduces the field to a single best guess.

use crate::grammar::{self, ByteOrder};
use crate::{Confidence, Encoding, Score};

/// Scores at or below this value never produce a positive identification;
/// if no scorer clears it the detector reports [`Encoding::UNDETERMINED`].
const ACCEPT_THRESHOLD: Score = 0.0;

/// Result of encoding detection with confidence score
#[derive(Debug, Clone)]
pub struct DetectionResult {
    /// Most likely encoding
    pub encoding: Encoding,
    /// Confidence score of the winning encoding (0.0 to 1.5)
    pub confidence: Score,
    /// Whether a byte-order signature was found at the buffer start
    pub bom_detected: bool,
    /// All candidate encodings with their scores, best first
    pub candidates: Vec<(Encoding, Score)>,
}

/// Detector that runs every structural scorer over one buffer
#[derive(Debug, Clone, Copy, Default)]
pub struct EncodingDetector;

impl EncodingDetector {
    /// Create a new encoding detector
    pub fn new() -> Self {
        Self
    }

    /// Detect the encoding of the given data.
    ///
    /// Every scorer runs exactly once over the full buffer. The winner is
    /// the candidate with the strictly greatest score; equal scores fall
    /// back to a fixed priority order that places marker-based detectors
    /// before the ambiguous multi-byte grammars. If nothing scores above
    /// zero the result is [`Encoding::UNDETERMINED`].
    pub fn detect(&self, data: &[u8]) -> DetectionResult {
        let (utf8_code, utf8_conf) = score_utf8(data);
        let (utf32_code, utf32_conf) = score_utf32(data);
        let (utf16_code, utf16_conf) = score_utf16(data);

        // Priority order: on equal scores the earlier entry wins.
        let mut candidates: Vec<(Encoding, Score)> = vec![
            (Encoding::JIS, score_jis(data).score()),
            (Encoding::UTF8_BOM, score_utf8_signed(data).score()),
            (utf8_code, utf8_conf.score()),
            (utf32_code, utf32_conf.score()),
            (utf16_code, utf16_conf.score()),
            (Encoding::ASCII, score_ascii(data).score()),
            (Encoding::EUC_JP, score_euc_jp(data).score()),
            (Encoding::SHIFT_JIS, score_shift_jis(data).score()),
        ];

        let mut best = (Encoding::UNDETERMINED, ACCEPT_THRESHOLD);
        for &(encoding, score) in &candidates {
            if score > best.1 {
                best = (encoding, score);
            }
        }

        // Stable sort: ties keep the priority order from above.
        candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap());

        let confidence = if best.0 == Encoding::UNDETERMINED {
            0.0
        } else {
            best.1
        };

        DetectionResult {
            encoding: best.0,
            confidence,
            bom_detected: self.detect_bom(data).is_some(),
            candidates,
        }
    }

    /// Identify a leading byte-order signature, longest match first so the
    /// UTF-32 little-endian signature wins over its UTF-16 prefix.
    pub fn detect_bom(&self, data: &[u8]) -> Option<Encoding> {
        const SIGNED: [Encoding; 5] = [
            Encoding::UTF32LE,
            Encoding::UTF32BE,
            Encoding::UTF8_BOM,
            Encoding::UTF16LE,
            Encoding::UTF16BE,
        ];
        SIGNED
            .into_iter()
            .find(|encoding| has_signature(data, *encoding))
    }
}

fn has_signature(data: &[u8], encoding: Encoding) -> bool {
    encoding
        .bom()
        .is_some_and(|signature| data.starts_with(signature))
}

pub(crate) fn score_ascii(data: &[u8]) -> Confidence {
    if grammar::ascii_structure(data) {
        Confidence::Definite
    } else {
        Confidence::Impossible
    }
}

pub(crate) fn score_jis(data: &[u8]) -> Confidence {
    if grammar::jis_structure(data) {
        Confidence::Definite
    } else {
        Confidence::Impossible
    }
}

/// Signature-only check; content past the three signature bytes is not
/// inspected.
pub(crate) fn score_utf8_signed(data: &[u8]) -> Confidence {
    if has_signature(data, Encoding::UTF8_BOM) {
        Confidence::Definite
    } else {
        Confidence::Impossible
    }
}

/// Full-grammar UTF-8 check. A valid buffer alone is ambiguous; a valid
/// buffer that also opens with the signature is definite and reported as
/// the signed variant.
pub(crate) fn score_utf8(data: &[u8]) -> (Encoding, Confidence) {
    if !grammar::utf8_structure(data) {
        return (Encoding::UTF8, Confidence::Impossible);
    }
    if has_signature(data, Encoding::UTF8_BOM) {
        (Encoding::UTF8_BOM, Confidence::DefiniteWithBom)
    } else {
        (Encoding::UTF8, Confidence::Ambiguous)
    }
}

/// UTF-16 is never more than ambiguous: the unit grammar holds under at
/// least one byte order, but content alone cannot pin the order down. A
/// signature selects the reported variant; without one the little-endian
/// variant is the fixed default.
pub(crate) fn score_utf16(data: &[u8]) -> (Encoding, Confidence) {
    let variant = if has_signature(data, Encoding::UTF16BE) {
        Encoding::UTF16BE
    } else {
        Encoding::UTF16LE
    };
    let valid = grammar::utf16_structure(data, ByteOrder::Little)
        || grammar::utf16_structure(data, ByteOrder::Big);
    if valid {
        (variant, Confidence::Ambiguous)
    } else {
        (variant, Confidence::Impossible)
    }
}

/// Same policy as [`score_utf16`] at 4-byte granularity.
pub(crate) fn score_utf32(data: &[u8]) -> (Encoding, Confidence) {
    let variant = if has_signature(data, Encoding::UTF32BE) {
        Encoding::UTF32BE
    } else {
        Encoding::UTF32LE
    };
    let valid = grammar::utf32_structure(data, ByteOrder::Little)
        || grammar::utf32_structure(data, ByteOrder::Big);
    if valid {
        (variant, Confidence::Ambiguous)
    } else {
        (variant, Confidence::Impossible)
    }
}

pub(crate) fn score_shift_jis(data: &[u8]) -> Confidence {
    if grammar::shift_jis_structure(data) {
        Confidence::Definite
    } else {
        Confidence::Impossible
    }
}

pub(crate) fn score_euc_jp(data: &[u8]) -> Confidence {
    if grammar::euc_jp_structure(data) {
        Confidence::Definite
    } else {
        Confidence::Impossible
    }
}
