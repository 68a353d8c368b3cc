//! Remote catalog fetching and merging.
//!
//! Two catalog shapes are supported:
//! - [`MetadataCatalog`]: a single JSON document mapping template ids to
//!   published versions with refs. Merge policy: append-only — an
//!   already-present `(id, version)` is never touched.
//! - [`MarketplaceCatalog`]: a multi-step listing (item ids → per-item
//!   template refs → per-ref body). Merge policy: replace — the catalog
//!   always reflects the latest published body for a version, so an
//!   existing `(id, version)` entry is overwritten with fresh content.
//!
//! Both fetch entries strictly sequentially in deterministic id-then-
//! version order, so warning ordering is reproducible and load on the
//! remote service stays bounded.

pub mod compat;
pub mod http;
pub mod marketplace;
pub mod metadata;
pub mod refcache;

// Re-exports
pub use compat::is_template_compatible;
pub use http::CatalogHttp;
pub use marketplace::MarketplaceCatalog;
pub use metadata::MetadataCatalog;
pub use refcache::RefCache;

use crate::error::Result;
use crate::model::Template;

/// Result of one catalog fetch pass: the merged template sequence and
/// the per-item warnings accumulated along the way.
#[derive(Debug)]
pub struct FetchedUpdates {
    /// The working copy of the store after merging.
    pub templates: Vec<Template>,
    /// One message per recovered item-level failure.
    pub warnings: Vec<String>,
}

/// A remote source of template updates.
///
/// `fetch_updates` merges remote content into a working copy of the
/// current store and never partially fails: item-level trouble becomes a
/// warning, and only an unreachable top-level listing is a hard error.
pub trait CatalogSource {
    /// Human-readable catalog namespace, used in warnings and log lines.
    fn name(&self) -> &str;

    /// Fetch updates against the current store contents.
    fn fetch_updates(
        &mut self,
        current: &[Template],
        platform_version: &str,
    ) -> Result<FetchedUpdates>;
}
