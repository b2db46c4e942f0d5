//! Resource ingestion and normalization engine.
//!
//! Given a static catalog of remote text resources (INI-style configs,
//! CSV tables, free-text relation files) of unknown and inconsistent byte
//! encoding, this crate fetches them all concurrently, sniffs each one's
//! encoding, decodes it to text despite malformed sequences, parses it per
//! its declared format, and assembles a single categorized result. Failed
//! resources are logged and reported on the result, never allowed to abort
//! the batch.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`catalog`] - Static resource table: names, URLs, formats, checksums
//! - [`fetch`] - HTTP byte fetcher with a bounded per-request timeout
//! - [`encoding`] - Encoding detection and strict-then-lossy decoding
//! - [`parser`] - Format-specific parsers selected by declared format
//! - [`loader`] - Concurrent aggregator producing a [`CategorizedOutput`]

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod encoding;
pub mod fetch;
pub mod loader;
pub mod parser;

// Re-export commonly used types
pub use catalog::{Catalog, CatalogError, ResourceDescriptor, ResourceFormat};
pub use encoding::{decode_with_fallback, detect_encoding};
pub use fetch::{DEFAULT_TIMEOUT_SECS, FetchClient, FetchError, RawResponse};
pub use loader::{
    CategorizedOutput, LoadFailure, LoadOutcome, LoadReport, ResourceLoader, TextValue,
};
pub use parser::{
    ParsedConfig, ParsedRelations, ParsedTable, ParsedValue, TableRow, parse_resource,
};
