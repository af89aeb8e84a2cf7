//! Exporting results to a CI environment file.
//!
//! CI runners such as GitHub Actions read `NAME=value` lines from the file
//! named by `GITHUB_ENV` and expose them to later steps.

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::error::{Error, Result};

static NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("Invalid env name regex"));

/// Environment variable naming the env file on GitHub Actions.
pub const GITHUB_ENV: &str = "GITHUB_ENV";

/// An append-only `NAME=value` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvFile {
    path: PathBuf,
}

impl EnvFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `name=value`.
    ///
    /// # Errors
    /// Returns [`Error::EnvExport`] for an invalid name, a value spanning
    /// several lines, or a failed write.
    pub fn export(&self, name: &str, value: &str) -> Result<()> {
        let fail = |message: String| Error::EnvExport {
            name: name.to_string(),
            message,
        };

        if !NAME_REGEX.is_match(name) {
            return Err(fail("not a valid variable name".into()));
        }
        if value.contains(|c: char| c == '\n' || c == '\r') {
            return Err(fail("value spans several lines".into()));
        }

        pbx_fs::io::append_line(&self.path, &format!("{name}={value}"))
            .map_err(|e| fail(e.to_string()))?;
        tracing::debug!(path = %self.path.display(), name, value, "Exported variable");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::tempdir;

    #[test]
    fn test_export_appends() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("env");
        std::fs::write(&path, "EXISTING=1\n").unwrap();
        let env = EnvFile::new(&path);

        env.export("CURRENT_BUILD_NUMBER", "42").unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "EXISTING=1\nCURRENT_BUILD_NUMBER=42\n"
        );
    }

    #[rstest]
    #[case("1ABC", "1")]
    #[case("A-B", "1")]
    #[case("", "1")]
    #[case("OK", "multi\nline")]
    fn test_export_rejects(#[case] name: &str, #[case] value: &str) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("env");

        let result = EnvFile::new(&path).export(name, value);

        assert!(matches!(result, Err(Error::EnvExport { .. })));
        assert!(!path.exists());
    }
}
