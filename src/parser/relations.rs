//! Parser for the designated model-relations text resource.
//!
//! The source lists one model per line with its related models,
//! terminated by an `end` sentinel:
//!
//! ```text
//! FS-i6: FS-iA6, FS-iA6B, end
//! FS-i6: FS-iA10B, end
//! ```
//!
//! Repeated identifiers union their token lists; first-seen order is kept
//! and duplicates are dropped, which is why the entry values are
//! insertion-ordered sets rather than plain vectors.

use indexmap::{IndexMap, IndexSet};

/// Token closing a relation list; never part of the data.
const END_SENTINEL: &str = "end";

/// Parsed relations: model identifier to its ordered set of related
/// identifiers.
pub type ParsedRelations = IndexMap<String, IndexSet<String>>;

/// Parses model-relation lines.
///
/// Blank lines are dropped. Each line splits on the first `:`; lines
/// missing either side are skipped. The right side splits on `,` into
/// tokens, trimmed, with empty tokens and the `end` sentinel discarded.
/// A line repeating an earlier identifier unions its tokens into the
/// existing entry.
#[must_use]
pub fn parse_relations(raw: &str) -> ParsedRelations {
    let mut relations = ParsedRelations::new();
    for line in raw.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let Some((identifier, tokens)) = line.split_once(':') else {
            continue;
        };
        let identifier = identifier.trim();
        if identifier.is_empty() || tokens.is_empty() {
            continue;
        }

        let entry = relations.entry(identifier.to_string()).or_default();
        for token in tokens.split(',') {
            let token = token.trim();
            if token.is_empty() || token == END_SENTINEL {
                continue;
            }
            entry.insert(token.to_string());
        }
    }
    relations
}
