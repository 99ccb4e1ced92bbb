//! Discovery of form definition files under a template root.

use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

use super::FORM_DATA_FILENAME;

/// Recursively find every `form-data.json` under `root`.
///
/// Respects `.gitignore` rules (also outside git repositories), skips
/// hidden entries, and does not follow symlinks. A root that does not
/// exist yields no files.
pub fn discover_form_files(root: &Path) -> impl Iterator<Item = PathBuf> {
    let mut builder = WalkBuilder::new(root);
    builder
        .git_ignore(true)
        .git_exclude(true)
        .require_git(false)
        .follow_links(false)
        .max_depth(None);

    builder
        .build()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .filter(|entry| {
            entry
                .path()
                .file_name()
                .is_some_and(|name| name == FORM_DATA_FILENAME)
        })
        .map(|entry| entry.into_path())
}

/// Count form files under `root` without loading them.
pub fn count_form_files(root: &Path) -> usize {
    discover_form_files(root).count()
}
