mod common;

use common::{read_back, write_fixture};
use tempfile::TempDir;
use xmlmod_core::{validate, XmlModError};

#[test]
fn test_validate_accepts_well_formed_document() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(
        &dir,
        "ok.xml",
        "<?xml version=\"1.0\"?><catalog><item code=\"A\">x</item></catalog>",
    );

    assert!(validate(&path).is_ok());
}

#[test]
fn test_validate_rejects_truncated_document() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "truncated.xml", "<catalog><item>");

    let err = validate(&path).unwrap_err();

    assert!(matches!(err, XmlModError::Document { .. }));
    assert!(err.to_string().contains("truncated.xml"));
}

#[test]
fn test_validate_rejects_missing_file() {
    let dir = TempDir::new().unwrap();

    assert!(matches!(
        validate(dir.path().join("absent.xml")).unwrap_err(),
        XmlModError::Document { .. }
    ));
}

#[test]
fn test_validate_does_not_modify_the_file() {
    let dir = TempDir::new().unwrap();
    let original = "<catalog>\n  <item/>\n</catalog>";
    let path = write_fixture(&dir, "pure.xml", original);

    validate(&path).unwrap();

    assert_eq!(read_back(&path), original);
}
