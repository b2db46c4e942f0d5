//! Strict-then-lossy decoding cascade.
//!
//! [`decode_with_fallback`] is total: whatever the bytes and however wrong
//! the guessed label, it returns a string. Candidates are tried with
//! strict decoding first; only when every candidate rejects the bytes does
//! the cascade fall back to lossy decoding with the original guess.

use encoding_rs::{Encoding, UTF_8};
use tracing::{debug, warn};

/// Fixed fallback labels tried after the guessed encoding: the wide
/// Chinese superset first, then the common Western single-byte encoding.
const FALLBACK_LABELS: [&str; 3] = ["gbk", "gb18030", "windows-1252"];

/// Decodes resource bytes to text, trying alternates before going lossy.
///
/// The candidate list is the guessed label followed by [`FALLBACK_LABELS`],
/// de-duplicated case-insensitively with order preserved. Labels unknown
/// to the WHATWG encoding registry are skipped. The first candidate that
/// decodes strictly (no invalid sequences) wins; if none does, the bytes
/// are decoded lossily with the guessed encoding (UTF-8 when the guess
/// itself is unknown), replacing invalid sequences.
///
/// A leading BOM is stripped only when it matches the candidate being
/// tried; a BOM for a different encoding never overrides the candidate.
/// The lossy last resort leaves any BOM in place.
#[must_use]
pub fn decode_with_fallback(bytes: &[u8], guessed: &str) -> String {
    let mut candidates: Vec<&str> = vec![guessed];
    for label in FALLBACK_LABELS {
        if !candidates.iter().any(|c| c.eq_ignore_ascii_case(label)) {
            candidates.push(label);
        }
    }

    for label in &candidates {
        let Some(encoding) = Encoding::for_label(label.as_bytes()) else {
            debug!(label, "unknown encoding label, skipping candidate");
            continue;
        };
        let (text, had_errors) = encoding.decode_with_bom_removal(bytes);
        if !had_errors {
            return text.into_owned();
        }
        debug!(label, "strict decode failed, trying next candidate");
    }

    // Last resort: replace invalid sequences instead of rejecting them.
    let encoding = Encoding::for_label(guessed.as_bytes()).unwrap_or(UTF_8);
    warn!(
        guessed,
        fallback = encoding.name(),
        "all strict decodes failed, decoding lossily"
    );
    encoding.decode_without_bom_handling(bytes).0.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_valid_utf8() {
        assert_eq!(decode_with_fallback(b"key=value", "utf-8"), "key=value");
    }

    #[test]
    fn test_decode_strips_utf8_bom() {
        let bytes = [0xEF, 0xBB, 0xBF, b'h', b'i'];
        assert_eq!(decode_with_fallback(&bytes, "utf-8"), "hi");
    }

    #[test]
    fn test_decode_gbk_bytes() {
        // "中文" in GBK.
        let bytes = [0xD6, 0xD0, 0xCE, 0xC4];
        assert_eq!(decode_with_fallback(&bytes, "gbk"), "中文");
    }

    #[test]
    fn test_decode_utf16le_with_bom() {
        let bytes = [0xFF, 0xFE, b'h', 0x00, b'i', 0x00];
        assert_eq!(decode_with_fallback(&bytes, "utf-16le"), "hi");
    }

    #[test]
    fn test_decode_utf16be_with_bom() {
        let bytes = [0xFE, 0xFF, 0x00, b'h', 0x00, b'i'];
        assert_eq!(decode_with_fallback(&bytes, "utf-16be"), "hi");
    }

    #[test]
    fn test_decode_wrong_guess_falls_through_to_gbk() {
        // GBK bytes guessed as UTF-8: strict UTF-8 rejects them, the gbk
        // fallback decodes them correctly.
        let bytes = [0xD6, 0xD0, 0xCE, 0xC4];
        assert_eq!(decode_with_fallback(&bytes, "utf-8"), "中文");
    }

    #[test]
    fn test_decode_foreign_bom_does_not_override_candidate() {
        // A UTF-16LE BOM under a gbk guess must not flip the decode to
        // UTF-16: 0xFF is no valid GBK lead, so the cascade walks on to
        // windows-1252, which reads every byte literally.
        let bytes = [0xFF, 0xFE, b'h', 0x00];
        assert_eq!(decode_with_fallback(&bytes, "gbk"), "ÿþh\u{0}");
    }

    #[test]
    fn test_decode_unknown_guess_still_returns_text() {
        let text = decode_with_fallback(b"plain ascii", "not-a-real-charset");
        assert_eq!(text, "plain ascii");
    }

    #[test]
    fn test_decode_is_total_on_arbitrary_bytes() {
        // Exhaustive single-byte sweep: decode must never panic or error.
        for b in 0u8..=255 {
            let _ = decode_with_fallback(&[b], "utf-8");
            let _ = decode_with_fallback(&[b], "utf-16be");
            let _ = decode_with_fallback(&[b], "bogus-label");
        }
    }

    #[test]
    fn test_decode_empty_input() {
        assert_eq!(decode_with_fallback(&[], "utf-8"), "");
    }

    #[test]
    fn test_decode_candidate_order_prefers_guess() {
        // These bytes are valid GBK and valid windows-1252; the guessed
        // encoding must win over later fallbacks.
        let bytes = [0xD6, 0xD0];
        assert_eq!(decode_with_fallback(&bytes, "windows-1252"), "ÖÐ");
    }
}
