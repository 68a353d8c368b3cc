//! Local template scanning.
//!
//! Walks `<root>/<suffix>/**/*.json` for a set of root directories and
//! parses every match. An unreadable root costs that root its matches
//! and nothing more; a malformed file fails the whole scan, because a
//! local template is something a human authored and must fix.

use crate::error::{Result, TemplateError};
use crate::model::Template;
use std::fs;
use std::path::{Path, PathBuf};

/// Scan the given roots for template JSON files.
///
/// Output preserves root order, then sorted path order within each root,
/// so results are deterministic across runs.
pub fn scan(roots: &[PathBuf], suffix: &str) -> Result<Vec<Template>> {
    let mut templates = Vec::new();

    for root in roots {
        let dir = root.join(suffix);
        collect_dir(&dir, &mut templates)?;
    }

    Ok(templates)
}

fn collect_dir(dir: &Path, templates: &mut Vec<Template>) -> Result<()> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("skipping template directory {}: {}", dir.display(), e);
            return Ok(());
        }
    };

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .collect();
    paths.sort();

    for path in paths {
        if path.is_dir() {
            collect_dir(&path, templates)?;
        } else if path.extension().map(|e| e == "json").unwrap_or(false) {
            let content = fs::read_to_string(&path)?;
            templates.extend(parse_template_file(&path, &content)?);
        }
    }

    Ok(())
}

/// Parse one template file.
///
/// A file may hold either a list of templates or a single bare template
/// object, which is normalized into a one-element list.
fn parse_template_file(path: &Path, content: &str) -> Result<Vec<Template>> {
    let parse_error = |message: String| TemplateError::TemplateParse {
        path: path.to_path_buf(),
        message,
    };

    let value: serde_json::Value =
        serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))?;

    if value.is_array() {
        serde_json::from_value(value).map_err(|e| parse_error(e.to_string()))
    } else {
        let template: Template =
            serde_json::from_value(value).map_err(|e| parse_error(e.to_string()))?;
        Ok(vec![template])
    }
}
