//! Concurrent resource loader and result aggregator.
//!
//! This module drives the full pipeline for every catalog entry in
//! parallel: fetch bytes, detect encoding, decode, parse, then group the
//! successes by declared format into a [`CategorizedOutput`]. Per-resource
//! failures are isolated at the task boundary, logged, and reported on the
//! [`LoadReport`]; they never abort sibling tasks or the overall call.
//!
//! # Concurrency Model
//!
//! - One Tokio task per catalog entry; no task depends on another
//! - The network fetch is the only suspend point; detection, decoding,
//!   and parsing run synchronously inside the task
//! - All tasks settle before aggregation; completion order is irrelevant
//!   because results are keyed by unique resource name
//! - The result pool is local to one `load_all` invocation, so repeated
//!   or concurrent invocations never interfere
//!
//! # Example
//!
//! ```no_run
//! use resource_loader::{Catalog, ResourceLoader};
//!
//! # async fn example() {
//! let loader = ResourceLoader::new(Catalog::builtin());
//! let report = loader.load_all().await;
//! println!(
//!     "configs: {}, datasets: {}, texts: {}, failures: {}",
//!     report.output.configs.len(),
//!     report.output.datasets.len(),
//!     report.output.texts.len(),
//!     report.failures.len(),
//! );
//! # }
//! ```

use futures_util::future::join_all;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::catalog::{Catalog, ResourceDescriptor};
use crate::encoding::{decode_with_fallback, detect_encoding};
use crate::fetch::{FetchClient, FetchError};
use crate::parser::{ParsedConfig, ParsedRelations, ParsedTable, ParsedValue, parse_resource};

/// Outcome of processing one catalog resource, produced exactly once per
/// descriptor and never mutated afterward.
#[derive(Debug)]
pub struct LoadOutcome {
    /// The resource's catalog name.
    pub name: String,
    /// The parsed value, or the error that stopped the pipeline.
    pub result: Result<ParsedValue, FetchError>,
}

/// One failed resource, with its error rendered for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadFailure {
    /// The resource's catalog name.
    pub name: String,
    /// Human-readable cause.
    pub error: String,
}

/// Text-format result: either the decoded string or, for the designated
/// relations resource, the parsed relation map.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TextValue {
    /// Plain decoded text.
    Plain(String),
    /// Parsed model relations.
    Relations(ParsedRelations),
}

/// Successful resources grouped by declared format, keyed by name.
///
/// A resource absent from all three maps failed and was reported, not
/// silently dropped: see [`LoadReport::failures`].
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct CategorizedOutput {
    /// Config-format resources.
    pub configs: IndexMap<String, ParsedConfig>,
    /// Tabular-format resources.
    pub datasets: IndexMap<String, ParsedTable>,
    /// Text-format resources.
    pub texts: IndexMap<String, TextValue>,
}

impl CategorizedOutput {
    /// Total number of successfully loaded resources across all groupings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.configs.len() + self.datasets.len() + self.texts.len()
    }

    /// Returns `true` if no resource loaded successfully.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Result of one `load_all` invocation: the categorized successes plus a
/// structured list of failures, so callers and tests can assert on
/// failures without scraping log output.
#[derive(Debug, Serialize)]
pub struct LoadReport {
    /// Successful resources grouped by declared format.
    pub output: CategorizedOutput,
    /// Failed resources, in catalog order.
    pub failures: Vec<LoadFailure>,
}

impl LoadReport {
    /// Returns `true` if every catalog resource loaded successfully.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Concurrent loader for a resource catalog.
///
/// Holds no state across invocations: each [`load_all`](Self::load_all)
/// call accumulates into its own pool and returns it.
#[derive(Debug, Clone)]
pub struct ResourceLoader {
    catalog: Catalog,
    client: FetchClient,
}

impl ResourceLoader {
    /// Creates a loader over the given catalog with a default fetch
    /// client (10 second per-fetch timeout).
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self::with_client(catalog, FetchClient::new())
    }

    /// Creates a loader with an explicit fetch client, e.g. one with a
    /// shorter timeout.
    #[must_use]
    pub fn with_client(catalog: Catalog, client: FetchClient) -> Self {
        Self { catalog, client }
    }

    /// Loads every catalog resource concurrently and groups the results.
    ///
    /// This method always resolves: per-resource failures (network errors,
    /// timeouts, error statuses, task panics) are logged with the resource
    /// name and collected on the report instead of being raised. In the
    /// degenerate case where every resource fails, all three groupings are
    /// empty and `failures` carries one entry per catalog resource.
    #[instrument(skip(self), fields(resources = self.catalog.len()))]
    pub async fn load_all(&self) -> LoadReport {
        info!("starting resource load");

        let handles: Vec<_> = self
            .catalog
            .iter()
            .map(|descriptor| {
                let client = self.client.clone();
                let descriptor = descriptor.clone();
                tokio::spawn(async move { load_one(&client, &descriptor).await })
            })
            .collect();

        // Settle-all: every task finishes before any aggregation happens.
        let settled = join_all(handles).await;

        let mut output = CategorizedOutput::default();
        let mut failures = Vec::new();

        for (descriptor, joined) in self.catalog.iter().zip(settled) {
            match joined {
                Ok(outcome) => match outcome.result {
                    Ok(value) => {
                        debug!(resource = %outcome.name, "resource loaded");
                        insert_categorized(&mut output, outcome.name, value);
                    }
                    Err(e) => {
                        warn!(resource = %outcome.name, error = %e, "resource load failed");
                        failures.push(LoadFailure {
                            name: outcome.name,
                            error: e.to_string(),
                        });
                    }
                },
                Err(e) => {
                    // A panic inside one task is that resource's failure,
                    // never the batch's.
                    warn!(resource = %descriptor.name, error = %e, "resource task panicked");
                    failures.push(LoadFailure {
                        name: descriptor.name.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        info!(
            loaded = output.len(),
            failed = failures.len(),
            total = self.catalog.len(),
            "resource load complete"
        );

        LoadReport { output, failures }
    }
}

/// Runs the per-resource pipeline: fetch, detect, decode, parse.
///
/// Detection and decoding cannot fail by construction, so the only error
/// source is the fetch.
async fn load_one(client: &FetchClient, descriptor: &ResourceDescriptor) -> LoadOutcome {
    let result = async {
        let response = client.fetch_bytes(&descriptor.url).await?;
        let label = detect_encoding(response.content_type.as_deref(), &response.bytes);
        debug!(resource = %descriptor.name, encoding = %label, "detected encoding");
        let text = decode_with_fallback(&response.bytes, &label);
        Ok(parse_resource(&text, descriptor))
    }
    .await;

    LoadOutcome {
        name: descriptor.name.clone(),
        result,
    }
}

/// Inserts one success into its format grouping. Names are unique by
/// catalog invariant, so each key is written at most once per invocation.
fn insert_categorized(output: &mut CategorizedOutput, name: String, value: ParsedValue) {
    match value {
        ParsedValue::Config(config) => {
            output.configs.insert(name, config);
        }
        ParsedValue::Table(table) => {
            output.datasets.insert(name, table);
        }
        ParsedValue::Text(text) => {
            output.texts.insert(name, TextValue::Plain(text));
        }
        ParsedValue::Relations(relations) => {
            output.texts.insert(name, TextValue::Relations(relations));
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::ResourceFormat;
    use crate::parser::{ParsedConfig, ParsedTable};

    #[test]
    fn test_categorized_output_len_spans_groupings() {
        let mut output = CategorizedOutput::default();
        assert!(output.is_empty());

        output.configs.insert("a.ini".to_string(), ParsedConfig::new());
        output.datasets.insert("b.csv".to_string(), ParsedTable::new());
        output
            .texts
            .insert("c.txt".to_string(), TextValue::Plain(String::new()));

        assert_eq!(output.len(), 3);
        assert!(!output.is_empty());
    }

    #[test]
    fn test_insert_categorized_routes_by_value_shape() {
        let mut output = CategorizedOutput::default();

        insert_categorized(
            &mut output,
            "a.ini".to_string(),
            ParsedValue::Config(ParsedConfig::new()),
        );
        insert_categorized(
            &mut output,
            "b.csv".to_string(),
            ParsedValue::Table(ParsedTable::new()),
        );
        insert_categorized(
            &mut output,
            "c.txt".to_string(),
            ParsedValue::Text("hello".to_string()),
        );
        insert_categorized(
            &mut output,
            "d.txt".to_string(),
            ParsedValue::Relations(ParsedRelations::new()),
        );

        assert_eq!(output.configs.len(), 1);
        assert_eq!(output.datasets.len(), 1);
        assert_eq!(output.texts.len(), 2);
        assert_eq!(
            output.texts["c.txt"],
            TextValue::Plain("hello".to_string())
        );
        assert!(matches!(output.texts["d.txt"], TextValue::Relations(_)));
    }

    #[test]
    fn test_load_report_is_complete() {
        let complete = LoadReport {
            output: CategorizedOutput::default(),
            failures: Vec::new(),
        };
        assert!(complete.is_complete());

        let partial = LoadReport {
            output: CategorizedOutput::default(),
            failures: vec![LoadFailure {
                name: "a.ini".to_string(),
                error: "timeout".to_string(),
            }],
        };
        assert!(!partial.is_complete());
    }

    #[tokio::test]
    async fn test_load_all_empty_catalog_resolves_empty() {
        let loader = ResourceLoader::new(Catalog::new(Vec::new()).unwrap());
        let report = loader.load_all().await;

        assert!(report.output.is_empty());
        assert!(report.is_complete());
    }

    #[tokio::test]
    async fn test_load_all_unreachable_resources_all_fail() {
        // Invalid URLs fail before any network I/O, so this stays hermetic.
        let catalog = Catalog::new(vec![
            ResourceDescriptor::new("a.ini", "not a url", ResourceFormat::Config, ""),
            ResourceDescriptor::new("b.csv", "also bad", ResourceFormat::Tabular, ""),
        ])
        .unwrap();

        let report = ResourceLoader::new(catalog).load_all().await;

        assert!(report.output.is_empty());
        assert_eq!(report.failures.len(), 2);
        let names: Vec<_> = report.failures.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["a.ini", "b.csv"]);
    }
}
