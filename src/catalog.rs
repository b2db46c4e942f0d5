//! Static catalog of remote resources to ingest.
//!
//! The catalog is a fixed table mapping a unique resource name to its URL,
//! declared format, and published checksum. It is defined once at process
//! start and never mutated; the loader iterates it to drive one fetch task
//! per entry.

use serde::Serialize;
use thiserror::Error;

/// Declared format of a catalog resource, driving parser dispatch.
///
/// The set is closed on purpose: dispatch is an exhaustive `match`, so a
/// fourth format is a compile-time extension rather than a runtime lookup
/// that can miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceFormat {
    /// INI-style `key=value` configuration file.
    Config,
    /// Comma-separated table with a header row.
    Tabular,
    /// Free text, optionally carrying model-relation lines.
    Text,
}

/// One entry of the resource catalog.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceDescriptor {
    /// Unique name identifying the resource within the catalog.
    pub name: String,
    /// Absolute URL the resource is fetched from.
    pub url: String,
    /// Declared format selecting the parser.
    pub format: ResourceFormat,
    /// Content digest published alongside the resource. Informational
    /// only: fetched bytes are never verified against it.
    pub checksum: String,
    /// Marks the designated model-relations text resource, whose lines
    /// (`MODEL: related, related, end`) get the specialized relation
    /// parser instead of being returned as plain text.
    pub relations: bool,
}

impl ResourceDescriptor {
    /// Creates a descriptor with the relations flag cleared.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        format: ResourceFormat,
        checksum: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            format,
            checksum: checksum.into(),
            relations: false,
        }
    }

    /// Marks this descriptor as the designated model-relations resource.
    #[must_use]
    pub fn with_relations(mut self) -> Self {
        self.relations = true;
        self
    }
}

/// Error raised when a catalog violates its construction invariants.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Two descriptors share the same name.
    #[error("duplicate resource name in catalog: {name}")]
    DuplicateName {
        /// The name that appeared more than once.
        name: String,
    },
}

/// Fixed, ordered table of resource descriptors with unique names.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<ResourceDescriptor>,
}

impl Catalog {
    /// Builds a catalog from a list of descriptors.
    ///
    /// Iteration order follows the input order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateName`] if two descriptors share a
    /// name. Duplicate names are a construction defect, not a runtime
    /// condition, so they are rejected here rather than tolerated later.
    pub fn new(entries: Vec<ResourceDescriptor>) -> Result<Self, CatalogError> {
        let mut seen = std::collections::HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.name.as_str()) {
                return Err(CatalogError::DuplicateName {
                    name: entry.name.clone(),
                });
            }
        }
        Ok(Self { entries })
    }

    /// Returns the built-in product resource catalog.
    ///
    /// This reproduces the shipped table of device-assistant resources:
    /// online-device and system configs, product ID tables, and the
    /// model-relations text file.
    ///
    /// # Panics
    ///
    /// Panics if the static table contains a duplicate name. This should
    /// never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn builtin() -> Self {
        Self::new(builtin_entries()).expect("builtin catalog names are unique")
    }

    /// Iterates the descriptors in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &ResourceDescriptor> {
        self.entries.iter()
    }

    /// Returns the number of catalog entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Base URL the built-in resources are served from.
const BUILTIN_BASE_URL: &str = "http://yaokongguanjia.maxhom.cn/NewFlysky AssistantV3.2";

fn builtin_entries() -> Vec<ResourceDescriptor> {
    let entry = |name: &str, path: &str, format, checksum: &str| {
        ResourceDescriptor::new(
            name,
            format!("{BUILTIN_BASE_URL}/{path}"),
            format,
            checksum,
        )
    };

    vec![
        entry(
            "OnlineDevice.ini",
            "1Online device/OnlineDevice.ini",
            ResourceFormat::Config,
            "64fec2374b7ee2d5f8077fbf68401597",
        ),
        entry(
            "ModelInPut.txt",
            "1Online device/ModelInPut.txt",
            ResourceFormat::Text,
            "54e80ea6b12385f016ff1a2fec45274e",
        )
        .with_relations(),
        entry(
            "Product_ID_List.csv",
            "1Online device/indirect/Product_ID_List.csv",
            ResourceFormat::Tabular,
            "e19b9f0dd83315b11b6fa73a856d0f2d",
        ),
        entry(
            "Product_ID_List._Sendor.csv",
            "1Online device/Direct/Product_ID_List._Sendor.csv",
            ResourceFormat::Tabular,
            "9f0d8a5b1d75d0af720967da6e3cd8f8",
        ),
        entry(
            "FAQ-EN.ini",
            "5FAQ-EN/FAQ-EN.ini",
            ResourceFormat::Config,
            "23d8c7cd0d74d2e699e7cdb8ede39638",
        ),
        entry(
            "Login-CN.ini",
            "Login-CN.ini",
            ResourceFormat::Config,
            "89ad337556c59373a0570131d97e36e5",
        ),
        entry(
            "Maintenance.ini",
            "4Maintenance Center/Maintenance.ini",
            ResourceFormat::Config,
            "af85be66d2f7da252460de57929e0eea",
        ),
        entry(
            "Promotion-EN.ini",
            "2Promotion-EN/Promotion-EN.ini",
            ResourceFormat::Config,
            "bd1cabb73c2f635c38acba633bdcf8c0",
        ),
        entry(
            "SystemFile.ini",
            "7System/SystemFile.ini",
            ResourceFormat::Config,
            "97526f8eb2af6c1b581a17df1cd65043",
        ),
        entry(
            "Login-EN.ini",
            "Login-EN.ini",
            ResourceFormat::Config,
            "fd989e062c948c78f14943b5f0e06d6f",
        ),
        entry(
            "FAQ-CN.ini",
            "5FAQ-CN/FAQ-CN.ini",
            ResourceFormat::Config,
            "a514a55710d8f0cc0a253c59548026c7",
        ),
        entry(
            "Promotion-CN.ini",
            "2Promotion-CN/Promotion-CN.ini",
            ResourceFormat::Config,
            "80e58d7f7250ad07d5d37d73335cedd9",
        ),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_new_accepts_unique_names() {
        let catalog = Catalog::new(vec![
            ResourceDescriptor::new("a.ini", "http://example.com/a.ini", ResourceFormat::Config, ""),
            ResourceDescriptor::new("b.csv", "http://example.com/b.csv", ResourceFormat::Tabular, ""),
        ])
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_catalog_new_rejects_duplicate_names() {
        let result = Catalog::new(vec![
            ResourceDescriptor::new("a.ini", "http://example.com/a.ini", ResourceFormat::Config, ""),
            ResourceDescriptor::new("a.ini", "http://example.com/other.ini", ResourceFormat::Config, ""),
        ]);

        match result {
            Err(CatalogError::DuplicateName { name }) => assert_eq!(name, "a.ini"),
            other => panic!("Expected DuplicateName, got: {other:?}"),
        }
    }

    #[test]
    fn test_catalog_iter_preserves_insertion_order() {
        let catalog = Catalog::new(vec![
            ResourceDescriptor::new("first", "http://example.com/1", ResourceFormat::Text, ""),
            ResourceDescriptor::new("second", "http://example.com/2", ResourceFormat::Text, ""),
            ResourceDescriptor::new("third", "http://example.com/3", ResourceFormat::Text, ""),
        ])
        .unwrap();

        let names: Vec<_> = catalog.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["first", "second", "third"]);
    }

    #[test]
    fn test_builtin_catalog_shape() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 12);

        let relations: Vec<_> = catalog.iter().filter(|d| d.relations).collect();
        assert_eq!(relations.len(), 1);
        assert_eq!(relations[0].name, "ModelInPut.txt");
        assert_eq!(relations[0].format, ResourceFormat::Text);

        let tabular = catalog
            .iter()
            .filter(|d| d.format == ResourceFormat::Tabular)
            .count();
        assert_eq!(tabular, 2);
    }

    #[test]
    fn test_builtin_catalog_carries_checksums() {
        // Checksums are metadata only, but every entry must carry one.
        let catalog = Catalog::builtin();
        assert!(catalog.iter().all(|d| !d.checksum.is_empty()));
    }

    #[test]
    fn test_descriptor_with_relations() {
        let descriptor = ResourceDescriptor::new(
            "ModelInPut.txt",
            "http://example.com/ModelInPut.txt",
            ResourceFormat::Text,
            "abc",
        )
        .with_relations();

        assert!(descriptor.relations);
    }
}
