//! Tests for source discovery and document reading.

use std::fs;
use std::path::Path;

use onix_ingest::{DocumentNode, IngestError, discover_documents, read_products};
use tempfile::TempDir;

fn write(dir: &Path, name: &str, contents: &str) {
    fs::create_dir_all(dir).expect("create dir");
    fs::write(dir.join(name), contents).expect("write file");
}

#[test]
fn discovers_documents_in_name_order() {
    let root = TempDir::new().expect("tempdir");
    write(&root.path().join("Zeta"), "b.xml", "<ONIXMessage/>");
    write(&root.path().join("Alpha"), "b.XML", "<ONIXMessage/>");
    write(&root.path().join("Alpha"), "a.xml", "<ONIXMessage/>");
    write(&root.path().join("Alpha"), "notes.txt", "ignored");
    write(root.path(), "stray.xml", "<ONIXMessage/>");

    let documents = discover_documents(root.path()).expect("discover");
    let found: Vec<(&str, &str)> = documents
        .iter()
        .map(|doc| (doc.publisher.as_str(), doc.file_name.as_str()))
        .collect();
    assert_eq!(
        found,
        vec![("Alpha", "a.xml"), ("Alpha", "b.XML"), ("Zeta", "b.xml")]
    );
}

#[test]
fn missing_root_is_reported() {
    let root = TempDir::new().expect("tempdir");
    let err = discover_documents(&root.path().join("absent")).expect_err("missing root");
    assert!(matches!(err, IngestError::DirectoryNotFound { .. }));
}

#[test]
fn reads_products_from_disk() {
    let root = TempDir::new().expect("tempdir");
    write(
        &root.path().join("Pub"),
        "feed.xml",
        r#"<?xml version="1.0" encoding="UTF-8"?>
<ONIXMessage release="3.0">
  <Product><RecordReference>one</RecordReference></Product>
  <Product><RecordReference>two</RecordReference></Product>
</ONIXMessage>"#,
    );

    let documents = discover_documents(root.path()).expect("discover");
    let records = read_products(&documents[0]).expect("read products");
    let references: Vec<&str> = records
        .iter()
        .filter_map(|record| record.product.find_text("RecordReference"))
        .collect();
    assert_eq!(references, vec!["one", "two"]);
}

#[test]
fn malformed_document_is_a_parse_error() {
    let root = TempDir::new().expect("tempdir");
    write(&root.path().join("Pub"), "broken.xml", "<ONIXMessage><Product></ONIXMessage>");

    let documents = discover_documents(root.path()).expect("discover");
    let err = read_products(&documents[0]).expect_err("malformed");
    assert!(matches!(err, IngestError::XmlParse { .. }));
}
