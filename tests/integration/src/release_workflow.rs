//! Release workflow tests
//!
//! Drive a full release the way a CI pipeline does: read the approval
//! comment, set the marketing version, bump the build number and export the
//! results for later steps.

use pbx_blocks::{DuplicatePolicy, locate_with_field};
use pbx_core::{
    BuildNumberChange, Config, EditOptions, EditOutcome, EnvFile, ReleaseIntent, Severity,
    bump_build_number, set_marketing_version,
};
use pbx_test_utils::{ProjectFixture, TARGET_DEBUG_ID, TARGET_RELEASE_ID, project_file};
use pretty_assertions::assert_eq;
use std::fs;

const APPROVAL: &str = "\
Looks good, thanks!

**Release severity:** major
**Release version:** v2.5.0
";

fn options_from(config: &Config, key: &str) -> EditOptions {
    EditOptions {
        policy: config.duplicate_blocks,
        key: Some(key.to_string()),
        require_increase: config.build_number.require_increase,
        ..EditOptions::default()
    }
}

fn setting(content: &str, configuration: &str, key: &str) -> String {
    let block = locate_with_field(content, configuration, key, DuplicatePolicy::Reject).unwrap();
    pbx_blocks::find_field(&block, key).unwrap().raw
}

#[test]
fn test_full_release() {
    let fixture = ProjectFixture::new(&project_file(41, "2.4"));
    fs::write(
        fixture.dir().join("pbxbump.toml"),
        "configuration = \"Release\"\n\n[build_number]\nrequire_increase = true\n",
    )
    .unwrap();
    let config = Config::discover(fixture.dir()).unwrap();
    let configuration = config.configuration.clone().unwrap();
    let env = EnvFile::new(fixture.dir().join("github_env"));

    let intent = ReleaseIntent::parse(APPROVAL).unwrap();
    assert_eq!(intent.severity, Severity::Major);

    let version = set_marketing_version(
        fixture.path(),
        &configuration,
        &intent.version.to_string(),
        &options_from(&config, &config.marketing_version.key),
    )
    .unwrap();
    let build = bump_build_number(
        fixture.path(),
        &configuration,
        BuildNumberChange::Increment,
        &options_from(&config, &config.build_number.key),
    )
    .unwrap();

    assert_eq!(version.block_id, TARGET_RELEASE_ID);
    assert_eq!(build.block_id, TARGET_RELEASE_ID);
    assert_eq!(version.outcome, EditOutcome::Written);
    assert_eq!(build.outcome, EditOutcome::Written);

    env.export(&config.marketing_version.env_var, &version.new_value)
        .unwrap();
    env.export(&config.build_number.env_var, &build.new_value)
        .unwrap();

    let content = fixture.read();
    assert_eq!(setting(&content, "Release", "MARKETING_VERSION"), "2.5.0");
    assert_eq!(setting(&content, "Release", "CURRENT_PROJECT_VERSION"), "42");
    assert_eq!(setting(&content, "Debug", "MARKETING_VERSION"), "2.4");
    assert_eq!(setting(&content, "Debug", "CURRENT_PROJECT_VERSION"), "41");
    assert_eq!(
        fs::read_to_string(env.path()).unwrap(),
        "MARKETING_VERSION=2.5.0\nCURRENT_BUILD_NUMBER=42\n"
    );
}

#[test]
fn test_rerunning_release_only_bumps_build() {
    let fixture = ProjectFixture::new(&project_file(41, "2.4"));
    let options = EditOptions::default();

    for expected in ["42", "43"] {
        let version = set_marketing_version(fixture.path(), "Debug", "2.5", &options).unwrap();
        let build =
            bump_build_number(fixture.path(), "Debug", BuildNumberChange::Increment, &options)
                .unwrap();
        assert_eq!(build.block_id, TARGET_DEBUG_ID);
        assert_eq!(build.new_value, expected);
        assert_eq!(version.new_value, "2.5");
    }

    // Only the first run changed the marketing version.
    let again = set_marketing_version(fixture.path(), "Debug", "2.5", &options).unwrap();
    assert_eq!(again.outcome, EditOutcome::Unchanged);
}

#[test]
fn test_rejected_approval_changes_nothing() {
    let original = project_file(41, "2.4");
    let fixture = ProjectFixture::new(&original);

    let err = ReleaseIntent::parse("Release severity: low\n").unwrap_err();
    assert_eq!(err.kind(), pbx_core::ErrorKind::InvalidReleaseIntent);

    assert_eq!(fixture.read(), original);
}
