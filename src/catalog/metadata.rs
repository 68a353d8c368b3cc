//! Metadata-catalog fetching (append-only merge).

use crate::catalog::compat::is_template_compatible;
use crate::catalog::http::CatalogHttp;
use crate::catalog::{CatalogSource, FetchedUpdates};
use crate::error::Result;
use crate::model::{contains_identity, Catalog, CatalogEntry, Template};

/// Fetches a metadata catalog: one JSON document mapping template ids to
/// their published versions, each with a ref to the body.
///
/// An unreachable catalog degrades to a single warning with the store
/// unchanged — this source never fails a sync outright.
pub struct MetadataCatalog {
    name: String,
    url: String,
    http: CatalogHttp,
}

impl MetadataCatalog {
    /// Create a fetcher for the catalog at `url`. `name` is the catalog
    /// namespace used in warnings (e.g. "execution-platform templates").
    pub fn new(name: impl Into<String>, url: impl Into<String>, http: CatalogHttp) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            http,
        }
    }

    /// Fetch and parse one entry's body.
    ///
    /// Any failure is returned as the warning message to record; the
    /// caller continues with the next entry either way.
    fn fetch_entry(&self, id: &str, entry: &CatalogEntry) -> std::result::Result<Template, String> {
        let body = self.http.get_text(&entry.ref_url).map_err(|e| {
            format!(
                "Failed to fetch template {} version {} from {}: {:#}",
                id, entry.version, entry.ref_url, e
            )
        })?;

        serde_json::from_str(&body).map_err(|e| {
            format!(
                "Failed to parse template {} version {} from {}: {}",
                id, entry.version, entry.ref_url, e
            )
        })
    }
}

impl CatalogSource for MetadataCatalog {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch_updates(
        &mut self,
        current: &[Template],
        platform_version: &str,
    ) -> Result<FetchedUpdates> {
        let mut templates = current.to_vec();
        let mut warnings = Vec::new();

        let catalog: Catalog = match self.http.get_json(&self.url) {
            Ok(catalog) => catalog,
            Err(e) => {
                warnings.push(format!(
                    "Failed to fetch catalog {} from {}: {:#}",
                    self.name, self.url, e
                ));
                return Ok(FetchedUpdates {
                    templates,
                    warnings,
                });
            }
        };

        let mut skipped = 0usize;

        for (id, entries) in &catalog {
            for entry in entries {
                if contains_identity(&templates, id, Some(entry.version)) {
                    skipped += 1;
                    continue;
                }

                if !is_template_compatible(entry, platform_version) {
                    skipped += 1;
                    continue;
                }

                match self.fetch_entry(id, entry) {
                    Ok(template) => templates.push(template),
                    Err(warning) => warnings.push(warning),
                }
            }
        }

        tracing::debug!(
            "catalog {}: {} entries skipped, {} warnings",
            self.name,
            skipped,
            warnings.len()
        );

        Ok(FetchedUpdates {
            templates,
            warnings,
        })
    }
}
