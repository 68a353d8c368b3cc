//! Local template resolution.
//!
//! Determines, for a diagram file, the ordered set of element templates
//! available to its property panel. Fully synchronous, read-only on the
//! local filesystem, no network.
//!
//! # Resolution Order
//!
//! 1. `.camunda/element-templates` under each ancestor directory of the
//!    diagram, nearest first
//! 2. `element-templates` under each bundled default search path
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
//! ```

pub mod paths;
pub mod resolver;
pub mod scanner;

// Re-exports
pub use paths::ancestor_dirs;
pub use resolver::TemplateProvider;
pub use scanner::scan;
