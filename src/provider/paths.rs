//! Ancestor directory walking for diagram files.

use std::path::{Path, PathBuf};

/// Produce the ordered ancestor directories of a file path, starting at
/// the file's own directory and ending at the filesystem root.
///
/// An unsaved diagram has no path; `None` (or an empty path) yields an
/// empty list. Directories are never repeated and the walk never goes
/// above the root.
pub fn ancestor_dirs(file_path: Option<&Path>) -> Vec<PathBuf> {
    let Some(path) = file_path else {
        return Vec::new();
    };

    if path.as_os_str().is_empty() {
        return Vec::new();
    }

    match path.parent() {
        Some(dir) => dir
            .ancestors()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .collect(),
        None => Vec::new(),
    }
}
