//! Encoding detection and decoding for fetched resource bytes.
//!
//! The catalog's resources carry no reliable encoding metadata: some are
//! UTF-8, some GBK, some arrive with stale or missing charset headers.
//! This module first guesses an encoding from the response metadata and a
//! byte sample ([`detect_encoding`]), then decodes through a cascade of
//! candidates ([`decode_with_fallback`]) that is guaranteed to produce a
//! string. Detection may misfire; the cascade is what keeps the pipeline
//! from aborting on a single ambiguous resource.

mod decode;
mod detect;

pub use decode::decode_with_fallback;
pub use detect::detect_encoding;
