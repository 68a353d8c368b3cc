//! Error types for template catalog operations.
//!
//! This module defines [`TemplateError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - `TemplateParse` is an authoring error: a human wrote a broken local
//!   template and must fix it, so resolution fails fast and loudly.
//! - `CatalogUnavailable` is the single fatal outcome of a sync run; all
//!   per-item remote failures degrade to warnings instead.
//! - A corrupt on-disk store is never an error at all — it is
//!   regenerable and read leniently as empty.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for template catalog operations.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// A local template file contains malformed JSON.
    #[error("template {} parse error: {message}", path.display())]
    TemplateParse { path: PathBuf, message: String },

    /// The top-level catalog or listing endpoint is unreachable.
    #[error("catalog unavailable at {url}: {message}")]
    CatalogUnavailable { url: String, message: String },

    /// Failed to serialize the template store.
    #[error("failed to serialize template store: {message}")]
    StoreSerialization { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for template catalog operations.
pub type Result<T> = std::result::Result<T, TemplateError>;
