//! Byte-grammar validators for the supported encodings
//!
//! Each function answers one question: is this buffer structurally
//! consistent with the encoding's grammar? No scoring happens here; the
//! scorers in [`crate::detection`] map these verdicts onto confidence
//! tiers. All checks are single left-to-right passes over the borrowed
//! buffer and total over arbitrary input, including the empty buffer.

use std::ops::RangeInclusive;

/// Byte order assumed when grouping a buffer into 16- or 32-bit units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ByteOrder {
    Little,
    Big,
}

const ESC: u8 = 0x1B;

// ISO-2022-JP shift markers. Each escape sequence is exactly three bytes;
// the first set switches into JIS X 0208 double-byte mode, the second back
// to one of the single-byte modes (ASCII, JIS Roman, half-width kana).
const JIS_SHIFT_DOUBLE: &[&[u8]] = &[b"\x1B$@", b"\x1B$B"];
const JIS_SHIFT_SINGLE: &[&[u8]] = &[b"\x1B(B", b"\x1B(J", b"\x1B(I"];

/// JIS X 0208 row/column bytes inside ISO-2022-JP double-byte mode.
const JIS_X0208_BYTE: RangeInclusive<u8> = 0x21..=0x7E;

/// Half-width katakana block, shared by Shift-JIS single bytes and the
/// EUC-JP SS2 plane.
const HALFWIDTH_KANA: RangeInclusive<u8> = 0xA1..=0xDF;

const SJIS_LEAD: &[RangeInclusive<u8>] = &[0x81..=0x9F, 0xE0..=0xFC];
const SJIS_TRAIL: &[RangeInclusive<u8>] = &[0x40..=0x7E, 0x80..=0xFC];

/// EUC-JP code-set bytes (JIS X 0208 pairs and JIS X 0212 trail pairs).
const EUC_BODY: RangeInclusive<u8> = 0xA1..=0xFE;
const EUC_SS2: u8 = 0x8E;
const EUC_SS3: u8 = 0x8F;

const HIGH_SURROGATES: RangeInclusive<u16> = 0xD800..=0xDBFF;
const LOW_SURROGATES: RangeInclusive<u16> = 0xDC00..=0xDFFF;
const SURROGATE_CODE_POINTS: RangeInclusive<u32> = 0xD800..=0xDFFF;
const MAX_CODE_POINT: u32 = 0x10_FFFF;

fn in_any(byte: u8, ranges: &[RangeInclusive<u8>]) -> bool {
    ranges.iter().any(|range| range.contains(&byte))
}

/// Every byte is 7-bit. Vacuously true for the empty buffer.
pub(crate) fn ascii_structure(buf: &[u8]) -> bool {
    buf.iter().all(|&b| b < 0x80)
}

/// ISO-2022-JP: all escapes drawn from the known marker set, double-byte
/// runs form complete JIS X 0208 pairs, and the buffer returns to a
/// single-byte mode before it ends. Requires at least one marker, since
/// without one the buffer is indistinguishable from plain ASCII.
pub(crate) fn jis_structure(buf: &[u8]) -> bool {
    let mut double_byte = false;
    let mut saw_shift = false;
    let mut i = 0;

    while i < buf.len() {
        let b = buf[i];
        if b == ESC {
            let Some(marker) = buf.get(i..i + 3) else {
                return false;
            };
            if JIS_SHIFT_DOUBLE.contains(&marker) {
                double_byte = true;
            } else if JIS_SHIFT_SINGLE.contains(&marker) {
                double_byte = false;
            } else {
                return false;
            }
            saw_shift = true;
            i += 3;
        } else if b >= 0x80 {
            // 7-bit encoding, high bytes never appear
            return false;
        } else if double_byte {
            let Some(&trail) = buf.get(i + 1) else {
                return false;
            };
            if !JIS_X0208_BYTE.contains(&b) || !JIS_X0208_BYTE.contains(&trail) {
                return false;
            }
            i += 2;
        } else {
            i += 1;
        }
    }

    saw_shift && !double_byte
}

/// Strict UTF-8 walk: valid lead-byte ranges, the exact continuation count,
/// and first-trail windows that rule out overlong forms and encoded
/// surrogates.
pub(crate) fn utf8_structure(buf: &[u8]) -> bool {
    let mut i = 0;
    while i < buf.len() {
        let (len, first_trail) = match buf[i] {
            0x00..=0x7F => {
                i += 1;
                continue;
            }
            0xC2..=0xDF => (2, 0x80..=0xBF),
            0xE0 => (3, 0xA0..=0xBF),
            0xE1..=0xEC | 0xEE..=0xEF => (3, 0x80..=0xBF),
            0xED => (3, 0x80..=0x9F),
            0xF0 => (4, 0x90..=0xBF),
            0xF1..=0xF3 => (4, 0x80..=0xBF),
            0xF4 => (4, 0x80..=0x8F),
            _ => return false,
        };
        let Some(seq) = buf.get(i..i + len) else {
            return false;
        };
        if !first_trail.contains(&seq[1]) {
            return false;
        }
        if !seq[2..].iter().all(|b| (0x80..=0xBF).contains(b)) {
            return false;
        }
        i += len;
    }
    true
}

/// UTF-16 under the given byte order: even length, every unit either
/// outside the surrogate range or a high surrogate immediately followed by
/// a low one.
pub(crate) fn utf16_structure(buf: &[u8], order: ByteOrder) -> bool {
    if buf.len() % 2 != 0 {
        return false;
    }

    let mut units = buf.chunks_exact(2).map(|pair| match order {
        ByteOrder::Little => u16::from_le_bytes([pair[0], pair[1]]),
        ByteOrder::Big => u16::from_be_bytes([pair[0], pair[1]]),
    });

    while let Some(unit) = units.next() {
        if HIGH_SURROGATES.contains(&unit) {
            match units.next() {
                Some(low) if LOW_SURROGATES.contains(&low) => {}
                _ => return false,
            }
        } else if LOW_SURROGATES.contains(&unit) {
            // low surrogate with no preceding high surrogate
            return false;
        }
    }
    true
}

/// UTF-32 under the given byte order: length divisible by four, every unit
/// a valid scalar value (at most U+10FFFF, never a surrogate).
pub(crate) fn utf32_structure(buf: &[u8], order: ByteOrder) -> bool {
    if buf.len() % 4 != 0 {
        return false;
    }

    buf.chunks_exact(4).all(|quad| {
        let unit = match order {
            ByteOrder::Little => u32::from_le_bytes([quad[0], quad[1], quad[2], quad[3]]),
            ByteOrder::Big => u32::from_be_bytes([quad[0], quad[1], quad[2], quad[3]]),
        };
        unit <= MAX_CODE_POINT && !SURROGATE_CODE_POINTS.contains(&unit)
    })
}

/// Shift-JIS: single bytes are 7-bit or half-width kana; lead bytes take
/// exactly one trail byte (0x7F excluded). No truncated pair at the end.
pub(crate) fn shift_jis_structure(buf: &[u8]) -> bool {
    let mut i = 0;
    while i < buf.len() {
        let b = buf[i];
        if b < 0x80 || HALFWIDTH_KANA.contains(&b) {
            i += 1;
        } else if in_any(b, SJIS_LEAD) {
            match buf.get(i + 1) {
                Some(&trail) if in_any(trail, SJIS_TRAIL) => i += 2,
                _ => return false,
            }
        } else {
            return false;
        }
    }
    true
}

/// EUC-JP: ASCII singles, JIS X 0208 pairs, SS2 + half-width kana, or
/// SS3 + JIS X 0212 pair. No truncated form at the end.
pub(crate) fn euc_jp_structure(buf: &[u8]) -> bool {
    let mut i = 0;
    while i < buf.len() {
        let b = buf[i];
        if b < 0x80 {
            i += 1;
        } else if b == EUC_SS2 {
            match buf.get(i + 1) {
                Some(kana) if HALFWIDTH_KANA.contains(kana) => i += 2,
                _ => return false,
            }
        } else if b == EUC_SS3 {
            let Some(pair) = buf.get(i + 1..i + 3) else {
                return false;
            };
            if !EUC_BODY.contains(&pair[0]) || !EUC_BODY.contains(&pair[1]) {
                return false;
            }
            i += 3;
        } else if EUC_BODY.contains(&b) {
            match buf.get(i + 1) {
                Some(trail) if EUC_BODY.contains(trail) => i += 2,
                _ => return false,
            }
        } else {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_accepts_seven_bit_and_empty() {
        assert!(ascii_structure(b""));
        assert!(ascii_structure(b"abcde"));
        assert!(ascii_structure(&[0x00, 0x1B, 0x7F]));
        assert!(!ascii_structure(&[0x41, 0x80]));
    }

    #[test]
    fn jis_requires_a_recognized_marker() {
        // plain ASCII has no shift marker
        assert!(!jis_structure(b"hello"));
        // one round trip into double-byte mode and back
        assert!(jis_structure(b"\x1B$B\x46\x7C\x1B(Bend"));
        // 1978 designation and JIS Roman are part of the marker set
        assert!(jis_structure(b"\x1B$@\x30\x21\x1B(J"));
    }

    #[test]
    fn jis_rejects_malformed_shifts() {
        // unknown escape sequence
        assert!(!jis_structure(b"\x1B$C\x30\x21\x1B(B"));
        // escape truncated at buffer end
        assert!(!jis_structure(b"\x1B$B\x30\x21\x1B("));
        // odd number of bytes in double-byte mode
        assert!(!jis_structure(b"\x1B$B\x30\x1B(B"));
        // never shifts back to single-byte mode
        assert!(!jis_structure(b"\x1B$B\x30\x21"));
        // pair bytes outside the JIS X 0208 range
        assert!(!jis_structure(b"\x1B$B\x30\x1F\x1B(B"));
        // high bytes never appear in a 7-bit stream
        assert!(!jis_structure(b"\x1B$B\x30\x21\x1B(B\x80"));
    }

    #[test]
    fn utf8_accepts_each_sequence_length() {
        assert!(utf8_structure(b""));
        assert!(utf8_structure(b"abc"));
        assert!(utf8_structure("é".as_bytes()));
        assert!(utf8_structure("大".as_bytes()));
        assert!(utf8_structure("🌍".as_bytes()));
    }

    #[test]
    fn utf8_rejects_bad_sequences() {
        // bare continuation byte
        assert!(!utf8_structure(&[0x80]));
        // overlong two-byte form of '/'
        assert!(!utf8_structure(&[0xC0, 0xAF]));
        // overlong three-byte form
        assert!(!utf8_structure(&[0xE0, 0x80, 0xA0]));
        // encoded surrogate U+D800
        assert!(!utf8_structure(&[0xED, 0xA0, 0x80]));
        // lead byte above the U+10FFFF window
        assert!(!utf8_structure(&[0xF5, 0x80, 0x80, 0x80]));
        // truncated tail
        assert!(!utf8_structure(&[0xE3, 0x81]));
    }

    #[test]
    fn utf16_checks_length_and_surrogate_pairing() {
        assert!(!utf16_structure(&[0x41], ByteOrder::Little));
        assert!(utf16_structure(&[0x41, 0x00, 0x42, 0x00], ByteOrder::Little));
        assert!(utf16_structure(&[0x00, 0x41], ByteOrder::Big));
        // well-formed pair: U+1F600 as D83D DE00
        assert!(utf16_structure(&[0x3D, 0xD8, 0x00, 0xDE], ByteOrder::Little));
        // high surrogate at end of buffer
        assert!(!utf16_structure(&[0x3D, 0xD8], ByteOrder::Little));
        // high surrogate followed by a non-surrogate
        assert!(!utf16_structure(&[0x3D, 0xD8, 0x41, 0x00], ByteOrder::Little));
        // lone low surrogate
        assert!(!utf16_structure(&[0x00, 0xDC], ByteOrder::Little));
    }

    #[test]
    fn utf32_checks_length_and_code_point_range() {
        assert!(!utf32_structure(&[0x41, 0x00], ByteOrder::Little));
        assert!(utf32_structure(&[0x41, 0x00, 0x00, 0x00], ByteOrder::Little));
        assert!(utf32_structure(&[0x00, 0x01, 0xF6, 0x00], ByteOrder::Big));
        // above U+10FFFF
        assert!(!utf32_structure(&[0x00, 0x00, 0x11, 0x00], ByteOrder::Big));
        // surrogate code point
        assert!(!utf32_structure(&[0x00, 0xD8, 0x00, 0x00], ByteOrder::Little));
    }

    #[test]
    fn shift_jis_pairs_and_kana() {
        // "日本語"
        assert!(shift_jis_structure(&[0x93, 0xFA, 0x96, 0x7B, 0x8C, 0xEA]));
        // half-width kana singles
        assert!(shift_jis_structure(&[0xB1, 0xB2, 0xB3]));
        // 0x7F is excluded from the trail range
        assert!(!shift_jis_structure(&[0x81, 0x7F]));
        // lead byte with no trail
        assert!(!shift_jis_structure(&[0x93, 0xFA, 0x96]));
        // 0xFD-0xFF are not leads
        assert!(!shift_jis_structure(&[0xFD, 0x40]));
    }

    #[test]
    fn euc_jp_forms() {
        // "日本語"
        assert!(euc_jp_structure(&[0xC6, 0xFC, 0xCB, 0xDC, 0xB8, 0xEC]));
        // SS2 + half-width kana
        assert!(euc_jp_structure(&[0x8E, 0xB1, 0x8E, 0xB2]));
        // SS3 + JIS X 0212 pair
        assert!(euc_jp_structure(&[0x8F, 0xA1, 0xA1]));
        // truncated pair
        assert!(!euc_jp_structure(&[0xC6, 0xFC, 0xCB]));
        // SS2 must be followed by the kana block
        assert!(!euc_jp_structure(&[0x8E, 0x41]));
        // 0x80-0xA0 bytes are never valid starts
        assert!(!euc_jp_structure(&[0x85, 0xA1]));
    }
}
