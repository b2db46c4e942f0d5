//! Parser for INI-style `key=value` configuration resources.

use indexmap::IndexMap;

/// Parsed configuration: key to value, later duplicates overwriting
/// earlier ones.
pub type ParsedConfig = IndexMap<String, String>;

/// Parses `key=value` lines into a configuration map.
///
/// Each line is split on the first `=` and both sides are trimmed. Lines
/// without `=`, or with an empty key or value after trimming, are skipped.
/// A duplicate key overwrites the earlier value (last write wins).
#[must_use]
pub fn parse_config(raw: &str) -> ParsedConfig {
    let mut entries = ParsedConfig::new();
    for line in raw.lines() {
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim();
        if key.is_empty() || value.is_empty() {
            continue;
        }
        entries.insert(key.to_string(), value.to_string());
    }
    entries
}
