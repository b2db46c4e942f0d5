//! Format-specific parsers and their dispatch.
//!
//! Each catalog resource declares one of three formats; dispatch is an
//! exhaustive `match` over [`ResourceFormat`], so there is no
//! unknown-format runtime path. Parsing itself is infallible: every parser
//! maps arbitrary text to its result shape, skipping lines it cannot use.
//!
//! # Formats
//!
//! - Config: `key=value` lines, last write wins
//! - Tabular: header row plus comma-separated rows
//! - Text: the decoded string itself, except for the designated
//!   model-relations resource, which gets [`parse_relations`]

mod config;
mod relations;
mod table;

pub use config::{ParsedConfig, parse_config};
pub use relations::{ParsedRelations, parse_relations};
pub use table::{ParsedTable, TableRow, parse_table};

use serde::Serialize;

use crate::catalog::{ResourceDescriptor, ResourceFormat};

/// Parsed value of one resource, tagged by the shape its format produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParsedValue {
    /// INI-style configuration map.
    Config(ParsedConfig),
    /// Tabular rows in source order.
    Table(ParsedTable),
    /// Plain decoded text.
    Text(String),
    /// Model-relations map from the designated text resource.
    Relations(ParsedRelations),
}

/// Parses decoded text according to the descriptor's declared format.
///
/// The `Text` format returns the input unchanged, unless the descriptor is
/// flagged as the model-relations resource.
#[must_use]
pub fn parse_resource(raw: &str, descriptor: &ResourceDescriptor) -> ParsedValue {
    match descriptor.format {
        ResourceFormat::Config => ParsedValue::Config(parse_config(raw)),
        ResourceFormat::Tabular => ParsedValue::Table(parse_table(raw)),
        ResourceFormat::Text if descriptor.relations => {
            ParsedValue::Relations(parse_relations(raw))
        }
        ResourceFormat::Text => ParsedValue::Text(raw.to_string()),
    }
}
