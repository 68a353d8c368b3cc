//! Marketplace-listing fetching (replace merge).

use crate::catalog::compat::is_template_compatible;
use crate::catalog::http::CatalogHttp;
use crate::catalog::refcache::RefCache;
use crate::catalog::{CatalogSource, FetchedUpdates};
use crate::error::{Result, TemplateError};
use crate::model::{CatalogEntry, Template};
use serde::Deserialize;

/// One item in the marketplace listing.
#[derive(Debug, Deserialize)]
struct ListingItem {
    id: String,
}

/// Per-item detail: the template refs published for that item.
#[derive(Debug, Deserialize)]
struct ItemTemplates {
    #[serde(default)]
    templates: Vec<CatalogEntry>,
}

/// Fetches a marketplace listing in three steps: item ids, per-item
/// template refs, per-ref body.
///
/// This catalog always reflects the latest published body for a version,
/// so an existing `(id, version)` store entry is replaced with fresh
/// content rather than skipped. The ref cache avoids refetching refs
/// that cannot have changed since the last sync of this process.
///
/// An unreachable listing is fatal — there is nothing meaningful to
/// merge — while any per-item failure degrades to a warning.
pub struct MarketplaceCatalog {
    name: String,
    listing_url: String,
    item_base_url: String,
    http: CatalogHttp,
    ref_cache: RefCache,
}

impl MarketplaceCatalog {
    /// Create a fetcher for the listing at `listing_url`; item details
    /// are fetched from `<item_base_url>/<item-id>`.
    pub fn new(
        name: impl Into<String>,
        listing_url: impl Into<String>,
        item_base_url: impl Into<String>,
        http: CatalogHttp,
    ) -> Self {
        Self {
            name: name.into(),
            listing_url: listing_url.into(),
            item_base_url: item_base_url.into(),
            http,
            ref_cache: RefCache::new(),
        }
    }

    fn item_url(&self, item_id: &str) -> String {
        format!("{}/{}", self.item_base_url.trim_end_matches('/'), item_id)
    }

    /// Fetch and parse one entry's body.
    fn fetch_entry(&self, entry: &CatalogEntry) -> std::result::Result<Template, String> {
        let body = self.http.get_text(&entry.ref_url).map_err(|e| {
            format!(
                "Failed to fetch template {} version {} from {}: {:#}",
                entry.id, entry.version, entry.ref_url, e
            )
        })?;

        serde_json::from_str(&body).map_err(|e| {
            format!(
                "Failed to parse template {} version {} from {}: {}",
                entry.id, entry.version, entry.ref_url, e
            )
        })
    }
}

/// Replace the template with the same identity, or append.
fn merge_replace(templates: &mut Vec<Template>, template: Template) {
    match templates
        .iter_mut()
        .find(|t| t.has_identity(&template.id, template.version))
    {
        Some(existing) => *existing = template,
        None => templates.push(template),
    }
}

impl CatalogSource for MarketplaceCatalog {
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

        let mut listing: Vec<ListingItem> = self.http.get_json(&self.listing_url).map_err(|e| {
            TemplateError::CatalogUnavailable {
                url: self.listing_url.clone(),
                message: format!("{:#}", e),
            }
        })?;

        // Listing order is not guaranteed by the service.
        listing.sort_by(|a, b| a.id.cmp(&b.id));

        for item in &listing {
            let item_url = self.item_url(&item.id);
            let detail: ItemTemplates = match self.http.get_json(&item_url) {
                Ok(detail) => detail,
                Err(e) => {
                    warnings.push(format!(
                        "Failed to fetch item {} from {}: {:#}",
                        item.id, item_url, e
                    ));
                    continue;
                }
            };

            for entry in &detail.templates {
                if !is_template_compatible(entry, platform_version) {
                    tracing::debug!("skipping incompatible template {}", entry.id);
                    continue;
                }

                if self.ref_cache.is_cached_ref(&entry.id, entry) {
                    tracing::debug!(
                        "skipping already-fetched ref for {} version {}",
                        entry.id,
                        entry.version
                    );
                    continue;
                }

                match self.fetch_entry(entry) {
                    Ok(template) => {
                        merge_replace(&mut templates, template);
                        self.ref_cache.cache_ref(&entry.id, entry);
                    }
                    Err(warning) => warnings.push(warning),
                }
            }
        }

        Ok(FetchedUpdates {
            templates,
            warnings,
        })
    }
}
