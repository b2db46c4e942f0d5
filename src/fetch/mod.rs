//! HTTP byte fetcher for catalog resources.
//!
//! This module fetches each resource as raw bytes with a bounded
//! per-request timeout. Responses are deliberately not decoded here:
//! charset handling belongs to the [`crate::encoding`] stage, which needs
//! the untouched bytes and the transport-reported content type.

mod client;
mod error;

pub use client::{ACCEPT_HEADER, DEFAULT_TIMEOUT_SECS, FetchClient, RawResponse};
pub use error::FetchError;
