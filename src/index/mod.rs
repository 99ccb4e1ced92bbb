//! Form metadata index.
//!
//! Walks a template root once, recording for every form path which JSON
//! file defines it, which template renders it, and whether it is a child
//! alias of another path. The index is built by [`FormIndex::load`] and
//! read-only afterwards; rebuilding means loading a fresh index and
//! swapping it wholesale.

mod walker;

pub use walker::{count_form_files, discover_form_files};

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::FormResult;
use crate::schema::{FormDefinition, FormDocument};

/// File name that marks a form definition file.
pub const FORM_DATA_FILENAME: &str = "form-data.json";

/// Index entry for a single form path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormMetadata {
    /// JSON file the form was discovered in.
    pub file_path: PathBuf,
    /// Template name with the final extension stripped.
    pub template: String,
    /// True when this path was discovered via a `childrenPaths` reference.
    pub is_child: bool,
    /// Owning path; present only for child entries.
    pub parent_path: Option<String>,
}

/// In-memory mapping from form path to [`FormMetadata`].
#[derive(Debug, Default)]
pub struct FormIndex {
    forms: HashMap<String, FormMetadata>,
}

impl FormIndex {
    /// Scan `root` for `form-data.json` files and index every form path.
    ///
    /// Fails on the first unreadable or malformed file with an error
    /// naming it; a partial index is never returned.
    pub fn load(root: &Path) -> FormResult<Self> {
        let mut index = Self::default();
        let mut file_count = 0usize;

        for file in discover_form_files(root) {
            tracing::debug!("loading form definitions from {}", file.display());
            let doc = FormDocument::load(&file)?;
            index.store_metadata(&file, &doc.form);
            file_count += 1;
        }

        tracing::info!(
            "indexed {} form paths from {} files under {}",
            index.len(),
            file_count,
            root.display()
        );
        Ok(index)
    }

    /// Record metadata for every `(path, form)` pair of one file.
    ///
    /// A child reference is only a lookup alias: a path that also has its
    /// own record in the same file keeps the record.
    fn store_metadata(&mut self, file_path: &Path, forms: &HashMap<String, FormDefinition>) {
        for (path, form) in forms {
            self.forms.insert(
                path.clone(),
                FormMetadata {
                    file_path: file_path.to_path_buf(),
                    template: remove_file_extension(&form.template_path),
                    is_child: false,
                    parent_path: None,
                },
            );
        }

        for (path, form) in forms {
            let Some(children) = &form.children_paths else {
                continue;
            };
            for child_path in children {
                let processed = process_child_path(child_path);
                if forms.contains_key(&processed) {
                    continue;
                }
                self.forms.insert(
                    processed,
                    FormMetadata {
                        file_path: file_path.to_path_buf(),
                        template: remove_file_extension(&form.template_path),
                        is_child: true,
                        parent_path: Some(path.clone()),
                    },
                );
            }
        }
    }

    /// Look up the metadata for a form path.
    pub fn get(&self, path: &str) -> Option<&FormMetadata> {
        self.forms.get(path)
    }

    /// All registered form paths, sorted.
    pub fn paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.forms.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }

    /// Iterate over `(path, metadata)` entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FormMetadata)> {
        self.forms.iter().map(|(path, meta)| (path.as_str(), meta))
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}

/// Drop a trailing literal `index` segment from a child path:
/// `/parent/child/index` becomes `/parent/child`. Anything else is
/// returned unchanged.
fn process_child_path(child_path: &str) -> String {
    let segments: Vec<&str> = child_path.trim_matches('/').split('/').collect();
    match segments.split_last() {
        Some((&"index", rest)) => format!("/{}", rest.join("/")),
        _ => child_path.to_string(),
    }
}

/// Strip the final extension from a template path. Idempotent: a name
/// without an extension is returned unchanged.
fn remove_file_extension(template_path: &str) -> String {
    Path::new(template_path)
        .with_extension("")
        .to_string_lossy()
        .into_owned()
}
