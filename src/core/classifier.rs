// src/core/classifier.rs

//! Pure predicates over filesystem paths and entry names.
//!
//! Nothing here fails: a path that cannot be inspected is simply classified as
//! "not a leaf", and the caller finds out about the problem when it tries to
//! read it.

use crate::core::commons::strip_extension;
use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

lazy_static! {
    static ref INPUT_SEGMENT_RE: Regex =
        Regex::new(r"^\[[^\[\]]+\]$").expect("input segment pattern is valid");
    static ref SELECT_SEGMENT_RE: Regex =
        Regex::new(r"^\{[^{}]+\}$").expect("select segment pattern is valid");
}

/// True if the entry exists and is not a directory. Entries that cannot be
/// stat'ed are never leaves.
pub fn is_leaf(path: &Path) -> bool {
    match fs::metadata(path) {
        Ok(metadata) => !metadata.is_dir(),
        Err(e) => {
            log::debug!("Cannot stat '{}': {}", path.display(), e);
            false
        }
    }
}

/// Anything that is not a leaf is browsed as a module.
pub fn is_module(path: &Path) -> bool {
    !is_leaf(path)
}

/// `[name]`, ignoring any extension.
pub fn is_input_segment(entry_name: &str) -> bool {
    INPUT_SEGMENT_RE.is_match(strip_extension(entry_name))
}

/// `{name}`, ignoring any extension.
pub fn is_select_segment(entry_name: &str) -> bool {
    SELECT_SEGMENT_RE.is_match(strip_extension(entry_name))
}

/// True if the entry name uses either parameter syntax.
pub fn is_parameter_segment(entry_name: &str) -> bool {
    is_input_segment(entry_name) || is_select_segment(entry_name)
}

/// Convenience wrapper over [`is_parameter_segment`] for a full path.
pub fn is_parameter(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(is_parameter_segment)
}

/// True if `dir` contains the project marker directory.
pub fn is_project_root(dir: &Path, marker: &str) -> bool {
    dir.join(marker).is_dir()
}

/// Walks upward from `start` looking for the project marker.
///
/// The search stops at the first ancestor holding a `boundary` directory
/// (usually `.git`), whether or not that ancestor also holds the marker.
/// Returns the path of the marker directory itself.
pub fn find_project_root(start: &Path, marker: &str, boundary: &str) -> Option<PathBuf> {
    for ancestor in start.ancestors() {
        if ancestor.join(boundary).exists() {
            if is_project_root(ancestor, marker) {
                let root = ancestor.join(marker);
                log::debug!("Project root found at '{}'", root.display());
                return Some(root);
            }
            log::debug!(
                "Reached '{}' boundary at '{}' without a '{}' directory",
                boundary,
                ancestor.display(),
                marker
            );
            return None;
        }
    }
    log::debug!("No '{}' boundary above '{}'", boundary, start.display());
    None
}

/// Locates the helper executable for parameter `name` next to `leaf`.
pub fn find_sibling(leaf: &Path, name: &str) -> Option<PathBuf> {
    let sibling = leaf.parent()?.join(name);
    if is_leaf(&sibling) { Some(sibling) } else { None }
}
