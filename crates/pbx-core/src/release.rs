//! Release intent extraction from review-comment text.
//!
//! A release comment names a severity and a version on lines of their own:
//!
//! ```text
//! Release severity: major
//! **Release version:** 2.4.1
//! ```
//!
//! Keys are case-insensitive, the `release` prefix is optional and markdown
//! emphasis around keys and values is ignored. The first occurrence of each
//! key wins.

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::error::{Error, Result};

static FIELD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^[\s*_`]*(?:release\s+)?(severity|version)[\s*_`]*:[\s*_`]*(.*?)[\s*_`]*$",
    )
    .expect("Invalid release field regex")
});

/// Variable name used when exporting the severity.
pub const SEVERITY_ENV_VAR: &str = "RELEASE_SEVERITY";

/// Variable name used when exporting the version.
pub const VERSION_ENV_VAR: &str = "RELEASE_VERSION";

/// How urgently a release should roll out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Normal,
    Major,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Self::Normal, Self::Major, Self::Critical];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Major => "major",
            Self::Critical => "critical",
        }
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, String> {
        Self::ALL
            .into_iter()
            .find(|severity| severity.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let allowed: Vec<&str> = Self::ALL.iter().map(|s| s.as_str()).collect();
                format!("severity {s:?} is not one of {}", allowed.join(", "))
            })
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated release request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseIntent {
    pub severity: Severity,
    pub version: semver::Version,
}

impl ReleaseIntent {
    /// Extract the severity and version from `body`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidReleaseIntent`] listing every missing or
    /// invalid field.
    ///
    /// # Example
    /// ```
    /// use pbx_core::{ReleaseIntent, Severity};
    ///
    /// let intent = ReleaseIntent::parse("Release severity: Critical\nRelease version: v2.4.1").unwrap();
    /// assert_eq!(intent.severity, Severity::Critical);
    /// assert_eq!(intent.version.to_string(), "2.4.1");
    /// ```
    pub fn parse(body: &str) -> Result<Self> {
        let mut severity = None;
        let mut version = None;

        for line in body.lines() {
            let Some(caps) = FIELD_REGEX.captures(line) else {
                continue;
            };
            let value = caps.get(2).map_or("", |m| m.as_str());
            let slot = if caps[1].eq_ignore_ascii_case("severity") {
                &mut severity
            } else {
                &mut version
            };
            if slot.is_none() {
                *slot = Some(value.to_string());
            }
        }

        let mut problems = Vec::new();

        let severity = match severity.as_deref() {
            None | Some("") => {
                problems.push("missing release severity".to_string());
                None
            }
            Some(raw) => raw.parse::<Severity>().map_err(|e| problems.push(e)).ok(),
        };

        let version = match version.as_deref() {
            None | Some("") => {
                problems.push("missing release version".to_string());
                None
            }
            Some(raw) => {
                let bare = raw
                    .strip_prefix('v')
                    .or_else(|| raw.strip_prefix('V'))
                    .unwrap_or(raw);
                semver::Version::parse(bare)
                    .map_err(|e| problems.push(format!("version {raw:?} is not a semantic version: {e}")))
                    .ok()
            }
        };

        match (severity, version) {
            (Some(severity), Some(version)) => Ok(Self { severity, version }),
            _ => Err(Error::InvalidReleaseIntent { problems }),
        }
    }
}
