//! Integration tests for locating configuration blocks in project files.

use pbx_blocks::{DuplicatePolicy, Error, find_field, locate, locate_all, locate_with_field};
use pbx_test_utils::{TARGET_DEBUG_ID, TARGET_RELEASE_ID, project_file, single_block};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn balanced(content: &str) -> bool {
    let opens = content.matches('{').count();
    let closes = content.matches('}').count();
    content.starts_with('{') && content.ends_with('}') && opens == closes
}

#[test]
fn test_single_block_fixture() {
    let text = single_block(41);
    let block = locate(&text, "Release", DuplicatePolicy::Reject).unwrap();

    assert_eq!(
        block.content(),
        "{ CURRENT_PROJECT_VERSION = 41; OTHER = 1; }"
    );
    assert!(balanced(block.content()));
}

#[test]
fn test_project_file_has_two_blocks_per_name() {
    let text = project_file(41, "2.4");

    assert_eq!(locate_all(&text, "Release").unwrap().len(), 2);
    assert_eq!(locate_all(&text, "Debug").unwrap().len(), 2);
    assert!(matches!(
        locate(&text, "Release", DuplicatePolicy::Reject),
        Err(Error::AmbiguousBlock { count: 2, .. })
    ));
}

#[rstest]
#[case("Release", TARGET_RELEASE_ID)]
#[case("Debug", TARGET_DEBUG_ID)]
fn test_locate_with_field_picks_target_block(#[case] name: &str, #[case] id: &str) {
    let text = project_file(41, "2.4");

    let block =
        locate_with_field(&text, name, "CURRENT_PROJECT_VERSION", DuplicatePolicy::Reject).unwrap();

    assert_eq!(block.id, id);
    assert!(balanced(block.content()));
    assert!(block.content().contains("CURRENT_PROJECT_VERSION"));
    assert!(block.content().trim_end_matches('}').trim_end().ends_with(&format!("name = {name};")));
}

#[test]
fn test_nested_build_settings_are_inside_span() {
    let text = project_file(7, "1.0");
    let block =
        locate_with_field(&text, "Debug", "MARKETING_VERSION", DuplicatePolicy::Reject).unwrap();

    // The quoted display name contains braces of its own.
    assert!(block.content().contains("\"Demo {dev}\""));
    assert_eq!(find_field(&block, "MARKETING_VERSION").unwrap().raw, "1.0");
    assert_eq!(find_field(&block, "CURRENT_PROJECT_VERSION").unwrap().raw, "7");
}

#[rstest]
#[case("Staging")]
#[case("release")]
#[case("Build configuration list")]
fn test_absent_names_are_not_found(#[case] name: &str) {
    let text = project_file(1, "1.0");
    assert!(matches!(
        locate(&text, name, DuplicatePolicy::FirstMatch),
        Err(Error::BlockNotFound { .. })
    ));
}

#[test]
fn test_unbalanced_block_is_reported() {
    let text = "A1B2C3D4E5F6A1B2C3D4E5F6 /* Release */ = { buildSettings = { X = 1; };";
    assert!(matches!(
        locate(text, "Release", DuplicatePolicy::Reject),
        Err(Error::UnbalancedBlock { .. })
    ));
}

#[rstest]
#[case("A1B2C3D4E5F6A1B2C3D4E5F /* Release */ = { X = 1; };")]
#[case("A1B2C3D4E5F6A1B2C3D4E5F6A /* Release */ = { X = 1; };")]
#[case("A1B2C3D4E5F6A1B2C3D4E5F6 /* Release */ { X = 1; };")]
fn test_malformed_headers_do_not_match(#[case] text: &str) {
    assert!(locate_all(text, "Release").unwrap().is_empty());
}
