//! Source-encoding detection from response metadata and a byte sample.
//!
//! Detection is a heuristic, not a certified sniffer: a wrong guess here
//! is acceptable because the decoding cascade tries alternates and falls
//! back to lossy decoding. Priority order:
//!
//! 1. `charset=` parameter in the Content-Type header, taken verbatim
//! 2. Byte-order mark (UTF-8 / UTF-16BE / UTF-16LE)
//! 3. Double-byte heuristic over the first 512 bytes (GBK-family)
//! 4. UTF-8 default

use std::sync::LazyLock;

use regex::Regex;

/// Number of leading bytes inspected by the double-byte heuristic.
const DETECTION_SAMPLE_BYTES: usize = 512;

/// Matches the charset parameter of a Content-Type header,
/// e.g. `text/plain; charset=GBK`.
#[allow(clippy::expect_used)]
static CHARSET_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)charset=([\w-]+)").expect("charset regex is valid") // Static pattern, safe to panic
});

/// Guesses the encoding of a fetched resource.
///
/// A `charset=` parameter in the header wins unconditionally, even when
/// the label is bogus; the decoding cascade rejects it there if it cannot
/// decode. The returned label is lowercased.
#[must_use]
pub fn detect_encoding(content_type: Option<&str>, bytes: &[u8]) -> String {
    if let Some(header) = content_type
        && let Some(captures) = CHARSET_PATTERN.captures(header)
    {
        return captures[1].to_ascii_lowercase();
    }

    if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
        return "utf-8".to_string();
    }
    if bytes.starts_with(&[0xFE, 0xFF]) {
        return "utf-16be".to_string();
    }
    if bytes.starts_with(&[0xFF, 0xFE]) {
        return "utf-16le".to_string();
    }

    match detect_double_byte(bytes) {
        Some(label) => label.to_string(),
        None => "utf-8".to_string(),
    }
}

/// Crude GBK-family sniff: any byte above 0x7F immediately followed by a
/// byte at or above 0x40 classifies the sample as double-byte Chinese.
///
/// This intentionally reproduces the shipped heuristic, false positives
/// included; the decode cascade is what restores correctness.
fn detect_double_byte(bytes: &[u8]) -> Option<&'static str> {
    let sample = &bytes[..bytes.len().min(DETECTION_SAMPLE_BYTES)];
    for pair in sample.windows(2) {
        if pair[0] > 0x7F && pair[1] >= 0x40 {
            return Some("gbk");
        }
    }
    None
}
