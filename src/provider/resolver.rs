//! Template resolution for diagram files.
//!
//! Resolution order (earlier entries take precedence downstream):
//! 1. Local templates from `.camunda/element-templates` in each ancestor
//!    directory of the diagram, nearest directory first
//! 2. Bundled defaults from the configured default search paths
//!
//! No deduplication happens here; ordering alone encodes precedence for
//! the property panel.

use crate::error::Result;
use crate::model::Template;
use crate::provider::paths::ancestor_dirs;
use crate::provider::scanner::scan;
use std::path::{Path, PathBuf};

/// Suffix appended to each ancestor directory of a diagram.
const LOCAL_SUFFIX: &str = ".camunda/element-templates";

/// Suffix appended to each bundled default search path.
const DEFAULT_SUFFIX: &str = "element-templates";

/// Resolves the ordered set of templates available to a diagram.
///
/// Stateless per call and read-only on the filesystem, so it is safe to
/// invoke repeatedly and concurrently.
#[derive(Debug, Clone)]
pub struct TemplateProvider {
    default_paths: Vec<PathBuf>,
}

impl TemplateProvider {
    /// Create a provider with the given bundled default search paths.
    pub fn new(default_paths: Vec<PathBuf>) -> Self {
        Self { default_paths }
    }

    /// Resolve all templates for a diagram file.
    ///
    /// `diagram_path` is `None` for an unsaved diagram, which resolves
    /// bundled defaults only. A malformed local template file fails the
    /// whole resolution; there is no partial output.
    pub fn templates_for(&self, diagram_path: Option<&Path>) -> Result<Vec<Template>> {
        let local_roots = ancestor_dirs(diagram_path);

        let mut templates = scan(&local_roots, LOCAL_SUFFIX)?;
        templates.extend(scan(&self.default_paths, DEFAULT_SUFFIX)?);

        Ok(templates)
    }
}
