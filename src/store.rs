//! Persistent on-disk template store.
//!
//! One JSON file per catalog namespace holding the full array of
//! synchronized template bodies. The file is machine-managed and
//! regenerable from the remote source, so reads are lenient: missing,
//! unparsable, or wrongly-shaped content is an empty store, never an
//! error. Writes overwrite the whole file in one shot.

use crate::error::{Result, TemplateError};
use crate::model::Template;
use std::fs;
use std::path::{Path, PathBuf};

/// Read/write access to one persisted template array.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    path: PathBuf,
}

impl TemplateStore {
    /// Create a store backed by the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default store file for a catalog namespace:
    /// `<user data root>/resources/element-templates/<file_name>`.
    pub fn default_path(file_name: &str) -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("element-templates")
            .join("resources")
            .join("element-templates")
            .join(file_name)
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted template sequence.
    ///
    /// Missing or corrupt content yields an empty sequence.
    pub fn load(&self) -> Vec<Template> {
        let Ok(content) = fs::read_to_string(&self.path) else {
            return Vec::new();
        };

        match serde_json::from_str(&content) {
            Ok(templates) => templates,
            Err(e) => {
                tracing::warn!(
                    "treating unreadable template store {} as empty: {}",
                    self.path.display(),
                    e
                );
                Vec::new()
            }
        }
    }

    /// Persist the full template sequence, creating the parent directory
    /// if needed.
    pub fn save(&self, templates: &[Template]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(templates).map_err(|e| {
            TemplateError::StoreSerialization {
                message: e.to_string(),
            }
        })?;

        fs::write(&self.path, content)?;
        Ok(())
    }
}
