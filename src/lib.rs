//! Element template catalog resolution and synchronization.
//!
//! Two independent concerns live here:
//!
//! - **Resolution**: given a diagram file, produce the complete ordered
//!   set of element templates its property panel may offer. Local
//!   templates found under `.camunda/element-templates` in the diagram's
//!   ancestor directories precede bundled defaults; ordering alone
//!   encodes precedence. Synchronous, filesystem-only.
//! - **Synchronization**: keep the on-disk copies of remotely published
//!   templates current. A throttled orchestrator fetches a catalog,
//!   gates entries by execution-platform compatibility, merges new
//!   bodies into the persisted store, and reports one outcome per run.
//!
//! # Modules
//!
//! - [`catalog`] - Remote catalog fetching, compatibility gating, ref
//!   caching
//! - [`error`] - Error types and result aliases
//! - [`model`] - Template and catalog data model
//! - [`provider`] - Local template resolution for diagram files
//! - [`store`] - Persisted template store
//! - [`sync`] - Sync orchestration and outcome notification
//!
//! # Example
//!
//! ```no_run
//! use element_templates::provider::TemplateProvider;
//! use std::path::{Path, PathBuf};
//!
//! let provider = TemplateProvider::new(vec![PathBuf::from("/opt/app/resources")]);
//! let templates = provider
//!     .templates_for(Some(Path::new("/work/project/invoice.bpmn")))
//!     .unwrap();
//! for template in &templates {
//!     println!("{}", template.id);
//! }
//! ```

pub mod catalog;
pub mod error;
pub mod model;
pub mod provider;
pub mod store;
pub mod sync;

pub use error::{Result, TemplateError};
