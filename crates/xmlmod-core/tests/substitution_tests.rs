mod common;

use common::{read_back, write_fixture};
use proptest::prelude::*;
use tempfile::TempDir;
use xmlmod_core::{substitute_file, Substitution, XmlModError};

// ===== LITERAL TEXT MODE =====

#[test]
fn test_literal_apply_rewrites_file_once() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "prices.xml", "<catalog><price>10</price></catalog>");
    let substitution = Substitution::literal("price", "10", "20");

    let first = substitute_file(&path, &substitution, false).unwrap();
    assert_eq!(first.count(), 1);
    assert!(read_back(&path).contains("<price>20</price>"));

    // Idempotence after one application: the old value is gone
    let second = substitute_file(&path, &substitution, false).unwrap();
    assert_eq!(second.count(), 0);
}

#[test]
fn test_literal_counts_every_matching_element() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(
        &dir,
        "multi.xml",
        "<catalog><price>10</price><item><price>10</price></item><price>11</price></catalog>",
    );

    let result = substitute_file(&path, &Substitution::literal("price", "10", "20"), false).unwrap();

    assert_eq!(result.count(), 2);
    let content = read_back(&path);
    assert!(content.contains("<price>11</price>"));
    assert!(!content.contains(">10<"));
}

#[test]
fn test_zero_change_run_never_rewrites_the_file() {
    let dir = TempDir::new().unwrap();
    // No declaration in the fixture: a rewrite would add one
    let original = "<catalog><price>10</price></catalog>";
    let path = write_fixture(&dir, "untouched.xml", original);

    let result = substitute_file(&path, &Substitution::literal("price", "99", "1"), false).unwrap();

    assert_eq!(result.count(), 0);
    assert_eq!(read_back(&path), original);
}

#[test]
fn test_untouched_nodes_are_not_reformatted() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(
        &dir,
        "formatted.xml",
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<catalog>\n  <!-- keep me -->\n  <price>10</price>\n  <item code=\"A\"/>\n</catalog>\n",
    );

    substitute_file(&path, &Substitution::literal("price", "10", "20"), false).unwrap();

    assert_eq!(
        read_back(&path),
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<catalog>\n  <!-- keep me -->\n  <price>20</price>\n  <item code=\"A\"/>\n</catalog>\n"
    );
}

// ===== PREVIEW MODE =====

#[test]
fn test_preview_reports_changes_without_writing() {
    let dir = TempDir::new().unwrap();
    let original = "<catalog><price>10</price></catalog>";
    let path = write_fixture(&dir, "preview.xml", original);

    let result = substitute_file(&path, &Substitution::literal("price", "10", "20"), true).unwrap();

    assert_eq!(result.count(), 1);
    assert_eq!(result.changes[0].previous, "10");
    assert_eq!(result.changes[0].new, "20");
    assert_eq!(read_back(&path), original);
}

#[test]
fn test_preview_and_apply_report_identical_changes() {
    let dir = TempDir::new().unwrap();
    let source = "<catalog><price>10</price><price>10</price></catalog>";
    let path = write_fixture(&dir, "same.xml", source);
    let substitution = Substitution::literal("price", "10", "20");

    let previewed = substitute_file(&path, &substitution, true).unwrap();
    let applied = substitute_file(&path, &substitution, false).unwrap();

    assert_eq!(previewed, applied);
}

// ===== REGEX MODE =====

#[test]
fn test_regex_substitutes_across_the_whole_value() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "regex.xml", "<items><name>precio123</name></items>");

    let result = substitute_file(
        &path,
        &Substitution::pattern("name", r"precio\d+", "precioX"),
        false,
    )
    .unwrap();

    assert_eq!(result.count(), 1);
    assert_eq!(result.changes[0].previous, "precio123");
    assert_eq!(result.changes[0].new, "precioX");
    assert!(read_back(&path).contains("<name>precioX</name>"));
}

#[test]
fn test_regex_is_substring_search_and_replaces_all_occurrences() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "fruit.xml", "<items><name>banana</name></items>");

    let result =
        substitute_file(&path, &Substitution::pattern("name", "na", "X"), false).unwrap();

    assert_eq!(result.count(), 1);
    assert_eq!(result.changes[0].new, "baXX");
}

#[test]
fn test_regex_backreference_template() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "dates.xml", "<log><when>2024-01</when></log>");

    let result = substitute_file(
        &path,
        &Substitution::pattern("when", r"(\d{4})-(\d{2})", r"\2/\1"),
        false,
    )
    .unwrap();

    assert_eq!(result.changes[0].new, "01/2024");
}

#[test]
fn test_invalid_pattern_is_pattern_error_and_leaves_file_alone() {
    let dir = TempDir::new().unwrap();
    let original = "<items><name>x</name></items>";
    let path = write_fixture(&dir, "bad.xml", original);

    let err = substitute_file(&path, &Substitution::pattern("name", "[", "x"), false).unwrap_err();

    assert!(matches!(err, XmlModError::Pattern { .. }));
    assert_eq!(read_back(&path), original);
}

// ===== ATTRIBUTE MODE =====

#[test]
fn test_attribute_mode_rewrites_attribute_and_leaves_text_alone() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(
        &dir,
        "attr.xml",
        "<inventory><item code=\"X1\">stock</item><item code=\"X1\"/></inventory>",
    );

    let result = substitute_file(
        &path,
        &Substitution::literal("item", "X1", "X2").on_attribute("code"),
        false,
    )
    .unwrap();

    assert_eq!(result.count(), 2);
    let content = read_back(&path);
    assert!(content.contains("<item code=\"X2\">stock</item>"));
    assert!(content.contains("<item code=\"X2\"/>"));
}

#[test]
fn test_attribute_mode_skips_elements_without_the_attribute() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(
        &dir,
        "sparse.xml",
        "<inventory><item code=\"X1\"/><item/></inventory>",
    );

    let result = substitute_file(
        &path,
        &Substitution::literal("item", "X1", "X2").on_attribute("code"),
        false,
    )
    .unwrap();

    assert_eq!(result.count(), 1);
    assert!(read_back(&path).contains("<item/>"));
}

// ===== ERROR HANDLING =====

#[test]
fn test_malformed_document_is_document_error_and_no_output_is_written() {
    let dir = TempDir::new().unwrap();
    let original = "<catalog><price>10</price>";
    let path = write_fixture(&dir, "broken.xml", original);

    let err =
        substitute_file(&path, &Substitution::literal("price", "10", "20"), false).unwrap_err();

    assert!(matches!(err, XmlModError::Document { .. }));
    assert_eq!(read_back(&path), original);
}

#[test]
fn test_missing_file_is_document_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.xml");

    let err =
        substitute_file(&path, &Substitution::literal("price", "10", "20"), false).unwrap_err();

    assert!(matches!(err, XmlModError::Document { .. }));
}

// ===== PROPERTIES =====

proptest! {
    #[test]
    fn prop_preview_never_mutates_file_bytes(value in "[a-z0-9]{1,12}") {
        let dir = TempDir::new().unwrap();
        let source = format!("<catalog><price>{}</price></catalog>", value);
        let path = write_fixture(&dir, "prop.xml", &source);

        substitute_file(&path, &Substitution::literal("price", value.as_str(), "replaced"), true)
            .unwrap();

        prop_assert_eq!(read_back(&path), source);
    }

    #[test]
    fn prop_literal_apply_is_idempotent_after_one_pass(
        old in "[a-z0-9]{1,12}",
        new in "[A-Z]{1,12}",
    ) {
        prop_assume!(old != new);
        let dir = TempDir::new().unwrap();
        let source = format!("<catalog><price>{}</price></catalog>", old);
        let path = write_fixture(&dir, "prop.xml", &source);
        let substitution = Substitution::literal("price", old.as_str(), new.as_str());

        let first = substitute_file(&path, &substitution, false).unwrap();
        let second = substitute_file(&path, &substitution, false).unwrap();

        prop_assert_eq!(first.count(), 1);
        prop_assert_eq!(second.count(), 0);
    }
}
