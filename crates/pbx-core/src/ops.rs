//! The two release edits: bumping the build number and setting the
//! marketing version.

use pbx_blocks::DuplicatePolicy;
use std::path::Path;

use crate::editor::{EditReport, FileEditor};
use crate::error::Result;
use crate::version::{BuildNumber, BuildNumberChange, MarketingVersion};

/// Setting that holds the build number.
pub const BUILD_NUMBER_KEY: &str = "CURRENT_PROJECT_VERSION";

/// Setting that holds the marketing version.
pub const MARKETING_VERSION_KEY: &str = "MARKETING_VERSION";

/// Options shared by both edits.
#[derive(Debug, Clone, Default)]
pub struct EditOptions {
    pub policy: DuplicatePolicy,
    pub dry_run: bool,
    /// Setting name to edit instead of the default key.
    pub key: Option<String>,
    /// Reject explicit build numbers that do not increase the current one.
    /// Ignored when setting the marketing version.
    pub require_increase: bool,
}

impl EditOptions {
    fn editor(&self, path: &Path) -> FileEditor {
        FileEditor::new(path)
            .with_policy(self.policy)
            .dry_run(self.dry_run)
    }

    fn key_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.key.as_deref().unwrap_or(default)
    }
}

/// Increment or set the build number of `configuration`.
///
/// # Errors
/// Fails without touching the file if the file, block or setting is missing,
/// the current value is not an unsigned integer, or the change is rejected.
pub fn bump_build_number(
    path: impl AsRef<Path>,
    configuration: &str,
    change: BuildNumberChange,
    options: &EditOptions,
) -> Result<EditReport> {
    let key = options.key_or(BUILD_NUMBER_KEY);

    options
        .editor(path.as_ref())
        .apply(configuration, key, |field| {
            let current: BuildNumber = field.raw.parse()?;
            let next = change.apply(current, options.require_increase)?;
            Ok(next.to_string())
        })
}

/// Set the marketing version of `configuration` to `version`.
///
/// `version` is validated before the file is read. Setting the version the
/// file already holds reports [`crate::EditOutcome::Unchanged`] and does not
/// rewrite the file.
///
/// # Errors
/// Returns [`crate::Error::InvalidVersionFormat`] for a malformed version, and
/// the same file, block and setting errors as [`bump_build_number`].
pub fn set_marketing_version(
    path: impl AsRef<Path>,
    configuration: &str,
    version: &str,
    options: &EditOptions,
) -> Result<EditReport> {
    let version: MarketingVersion = version.parse()?;
    let key = options.key_or(MARKETING_VERSION_KEY);

    options
        .editor(path.as_ref())
        .apply(configuration, key, |_| Ok(version.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use pbx_test_utils::{ProjectFixture, single_block};

    #[test]
    fn test_increment_example() {
        let fixture = ProjectFixture::new(&single_block(41));

        let report = bump_build_number(
            fixture.path(),
            "Release",
            BuildNumberChange::Increment,
            &EditOptions::default(),
        )
        .unwrap();

        assert_eq!(report.old_value, "41");
        assert_eq!(report.new_value, "42");
        let text = fixture.read();
        assert!(text.contains("CURRENT_PROJECT_VERSION = 42;"));
        assert!(text.contains("OTHER = 1;"));
    }

    #[test]
    fn test_custom_key() {
        let fixture = ProjectFixture::new(&single_block(41));
        let options = EditOptions {
            key: Some("OTHER".into()),
            ..EditOptions::default()
        };

        let report =
            bump_build_number(fixture.path(), "Release", BuildNumberChange::Increment, &options)
                .unwrap();

        assert_eq!(report.key, "OTHER");
        assert_eq!(report.new_value, "2");
        assert!(fixture.read().contains("CURRENT_PROJECT_VERSION = 41; OTHER = 2;"));
    }

    #[test]
    fn test_invalid_version_does_not_read_file() {
        let fixture = ProjectFixture::new("");
        let missing = fixture.dir().join("missing.pbxproj");

        // Validation runs first, so a bad version wins over a missing file.
        let result = set_marketing_version(&missing, "Release", "1.a", &EditOptions::default());

        assert!(matches!(result, Err(Error::InvalidVersionFormat { .. })));
    }

    #[test]
    fn test_non_numeric_current_build_number() {
        let fixture = ProjectFixture::new(
            "A1B2C3D4E5F6A1B2C3D4E5F6 /* Release */ = { CURRENT_PROJECT_VERSION = \"$(BUILD)\"; };",
        );

        let result = bump_build_number(
            fixture.path(),
            "Release",
            BuildNumberChange::Increment,
            &EditOptions::default(),
        );

        assert!(matches!(result, Err(Error::InvalidBuildNumber { .. })));
    }
}
