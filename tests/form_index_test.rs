//! Discovery and indexing behavior on real directory trees.

use std::fs;
use std::path::Path;

use formgen::{FormError, FormIndex};
use tempfile::TempDir;

fn write_file(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

#[test]
fn indexes_forms_across_nested_directories() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    write_file(
        root,
        "form-data.json",
        r#"{"form": {"/contact": {"templatePath": "contact.html"}}}"#,
    );
    write_file(
        root,
        "aws/pro/form-data.json",
        r#"{"form": {"/aws/pro": {"templatePath": "aws-pro.html"}}}"#,
    );

    let index = FormIndex::load(root).unwrap();
    assert_eq!(index.len(), 2);
    assert_eq!(index.get("/contact").unwrap().template, "contact");

    let aws = index.get("/aws/pro").unwrap();
    assert_eq!(aws.template, "aws-pro");
    assert_eq!(aws.file_path, root.join("aws/pro/form-data.json"));
}

#[test]
fn aws_scenario_produces_expected_entry() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    write_file(
        root,
        "form-data.json",
        r#"{"form": {"/aws": {"templatePath": "aws.html", "fieldsets": [], "formData": {}}}}"#,
    );

    let index = FormIndex::load(root).unwrap();
    let meta = index.get("/aws").unwrap();
    assert_eq!(meta.template, "aws");
    assert!(!meta.is_child);
    assert_eq!(meta.parent_path, None);
}

#[test]
fn child_paths_are_normalized_and_linked_to_their_parent() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    write_file(
        root,
        "form-data.json",
        r#"{
            "form": {
                "/parent": {
                    "templatePath": "p.html",
                    "childrenPaths": ["/child/index", "/other-child"],
                    "fieldsets": [{"fields": [{"name": "x"}]}],
                    "formData": {"title": "P"}
                }
            }
        }"#,
    );

    let index = FormIndex::load(root).unwrap();
    assert_eq!(index.len(), 3);

    let parent = index.get("/parent").unwrap();
    assert!(!parent.is_child);

    // trailing "index" segment dropped before registration
    let child = index.get("/child").unwrap();
    assert!(child.is_child);
    assert_eq!(child.parent_path.as_deref(), Some("/parent"));
    assert_eq!(child.template, "p");
    assert_eq!(child.file_path, parent.file_path);
    assert!(index.get("/child/index").is_none());

    let other = index.get("/other-child").unwrap();
    assert!(other.is_child);
    assert_eq!(other.parent_path.as_deref(), Some("/parent"));
}

#[test]
fn template_extension_is_stripped_once() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    write_file(
        root,
        "form-data.json",
        r#"{
            "form": {
                "/notes": {"templatePath": "release.notes.html"},
                "/plain": {"templatePath": "plain"}
            }
        }"#,
    );

    let index = FormIndex::load(root).unwrap();
    assert_eq!(index.get("/notes").unwrap().template, "release.notes");
    assert_eq!(index.get("/plain").unwrap().template, "plain");
}

#[test]
fn missing_form_key_fails_the_load() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    write_file(root, "good/form-data.json", r#"{"form": {}}"#);
    write_file(root, "bad/form-data.json", r#"{"forms": {}}"#);

    let err = FormIndex::load(root).unwrap_err();
    assert!(matches!(err, FormError::MissingFormKey { .. }));
    assert_eq!(err.status_code(), 400);
    assert!(err.to_string().contains("bad"));
}

#[test]
fn invalid_json_fails_the_load() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    write_file(root, "form-data.json", "{ not json");

    let err = FormIndex::load(root).unwrap_err();
    assert!(matches!(err, FormError::InvalidJson { .. }));
    assert_eq!(err.status_code(), 400);
}

#[test]
fn empty_root_yields_an_empty_index() {
    let temp_dir = TempDir::new().unwrap();
    let index = FormIndex::load(temp_dir.path()).unwrap();
    assert!(index.is_empty());
    assert!(index.paths().is_empty());
}

#[test]
fn paths_are_sorted() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    write_file(
        root,
        "form-data.json",
        r#"{
            "form": {
                "/b": {"templatePath": "b.html"},
                "/a": {"templatePath": "a.html"},
                "/c": {"templatePath": "c.html"}
            }
        }"#,
    );

    let index = FormIndex::load(root).unwrap();
    assert_eq!(index.paths(), vec!["/a", "/b", "/c"]);
}
