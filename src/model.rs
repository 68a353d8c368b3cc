//! Data model for element templates and remote catalogs.
//!
//! A [`Template`] is the JSON preset consumed by the property panel. Its
//! identity is the `(id, version)` pair; everything else is opaque
//! panel-consumed content carried through unchanged. A [`CatalogEntry`]
//! is the remote *metadata* for one published template version — where
//! to fetch the body (`ref`) and which execution platforms it supports
//! (`engine`) — distinct from the body itself.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single element template body.
///
/// Only `id` and `version` are interpreted here; all other fields are
/// preserved verbatim for the property panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    /// Template identifier, unique per catalog namespace.
    pub id: String,

    /// Published version. Absent for legacy/local templates, which are
    /// treated as unversioned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,

    /// Remaining panel-consumed fields, carried through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Template {
    /// Whether this template has the given identity.
    pub fn has_identity(&self, id: &str, version: Option<u64>) -> bool {
        self.id == id && self.version == version
    }
}

/// Remote metadata describing one published template version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Template identifier.
    pub id: String,

    /// Published version of the body behind `ref`.
    pub version: u64,

    /// URL of the template body.
    #[serde(rename = "ref")]
    pub ref_url: String,

    /// Supported execution platforms, keyed by platform name, mapping to
    /// a semver range string. Absent means "compatible with everything".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<BTreeMap<String, String>>,
}

/// A remote catalog: template id to the ordered list of published
/// versions. `BTreeMap` keeps iteration deterministic by id, which makes
/// fetch order and warning order reproducible.
pub type Catalog = BTreeMap<String, Vec<CatalogEntry>>;

/// Whether a template sequence already contains the given identity.
pub fn contains_identity(templates: &[Template], id: &str, version: Option<u64>) -> bool {
    templates.iter().any(|t| t.has_identity(id, version))
}
