//! Typed build numbers and marketing versions.

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::error::{Error, Result};

static MARKETING_VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\.(\d+)(?:\.(\d+))?$").expect("Invalid marketing version regex")
});

/// A monotonically increasing build identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct BuildNumber(u64);

impl BuildNumber {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }

    /// The next build number.
    ///
    /// # Errors
    /// Returns [`Error::InvalidBuildNumber`] if the number would overflow.
    pub fn increment(self) -> Result<Self> {
        self.0
            .checked_add(1)
            .map(Self)
            .ok_or_else(|| Error::InvalidBuildNumber {
                value: self.0.to_string(),
                reason: "cannot be incremented without overflowing".into(),
            })
    }
}

impl FromStr for BuildNumber {
    type Err = Error;

    /// Parse unsigned decimal text. Signs, spaces inside the number and
    /// anything other than ASCII digits are rejected.
    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim();
        let invalid = |reason: &str| Error::InvalidBuildNumber {
            value: s.to_string(),
            reason: reason.to_string(),
        };

        if text.is_empty() {
            return Err(invalid("empty value"));
        }
        if !text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("expected an unsigned integer"));
        }
        text.parse::<u64>()
            .map(Self)
            .map_err(|_| invalid("too large"))
    }
}

impl fmt::Display for BuildNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How to derive the new build number from the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildNumberChange {
    /// Current value plus one.
    Increment,
    /// An explicit value.
    Set(BuildNumber),
}

impl BuildNumberChange {
    /// Compute the new build number.
    ///
    /// With `require_increase`, an explicit value that is not greater than
    /// `current` is rejected. Incrementing always increases.
    pub fn apply(self, current: BuildNumber, require_increase: bool) -> Result<BuildNumber> {
        match self {
            Self::Increment => current.increment(),
            Self::Set(requested) if require_increase && requested <= current => {
                Err(Error::BuildNumberNotIncreasing {
                    current: current.value(),
                    requested: requested.value(),
                })
            }
            Self::Set(requested) => Ok(requested),
        }
    }
}

/// A human-facing dotted version such as `2.4` or `2.4.1`.
///
/// Displays exactly as parsed, so `02.4` stays `02.4`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct MarketingVersion {
    text: String,
    major: u64,
    minor: u64,
    patch: Option<u64>,
}

impl MarketingVersion {
    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    pub fn patch(&self) -> Option<u64> {
        self.patch
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl FromStr for MarketingVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidVersionFormat {
            value: s.to_string(),
        };

        let caps = MARKETING_VERSION_REGEX.captures(s).ok_or_else(invalid)?;
        let component = |i: usize| -> Result<Option<u64>> {
            caps.get(i)
                .map(|m| m.as_str().parse::<u64>().map_err(|_| invalid()))
                .transpose()
        };

        Ok(Self {
            text: s.to_string(),
            major: component(1)?.ok_or_else(invalid)?,
            minor: component(2)?.ok_or_else(invalid)?,
            patch: component(3)?,
        })
    }
}

impl fmt::Display for MarketingVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<MarketingVersion> for String {
    fn from(version: MarketingVersion) -> Self {
        version.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("0", 0)]
    #[case("41", 41)]
    #[case(" 7 ", 7)]
    #[case("18446744073709551615", u64::MAX)]
    fn test_build_number_parses(#[case] input: &str, #[case] expected: u64) {
        assert_eq!(input.parse::<BuildNumber>().unwrap().value(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("-1")]
    #[case("+1")]
    #[case("4 2")]
    #[case("1.0")]
    #[case("$(BUILD)")]
    #[case("18446744073709551616")]
    fn test_build_number_rejects(#[case] input: &str) {
        assert!(matches!(
            input.parse::<BuildNumber>(),
            Err(Error::InvalidBuildNumber { .. })
        ));
    }

    #[test]
    fn test_increment_overflow() {
        assert_eq!(BuildNumber::new(41).increment().unwrap(), BuildNumber::new(42));
        assert!(BuildNumber::new(u64::MAX).increment().is_err());
    }

    #[test]
    fn test_change_apply() {
        let current = BuildNumber::new(10);
        assert_eq!(
            BuildNumberChange::Increment.apply(current, true).unwrap().value(),
            11
        );
        assert_eq!(
            BuildNumberChange::Set(BuildNumber::new(3)).apply(current, false).unwrap().value(),
            3
        );
        assert!(matches!(
            BuildNumberChange::Set(BuildNumber::new(10)).apply(current, true),
            Err(Error::BuildNumberNotIncreasing { current: 10, requested: 10 })
        ));
        assert_eq!(
            BuildNumberChange::Set(BuildNumber::new(0)).apply(current, false).unwrap().value(),
            0
        );
    }

    #[rstest]
    #[case("2.4", 2, 4, None)]
    #[case("2.4.1", 2, 4, Some(1))]
    #[case("10.0.0", 10, 0, Some(0))]
    fn test_marketing_version_parses(
        #[case] input: &str,
        #[case] major: u64,
        #[case] minor: u64,
        #[case] patch: Option<u64>,
    ) {
        let version: MarketingVersion = input.parse().unwrap();
        assert_eq!(version.major(), major);
        assert_eq!(version.minor(), minor);
        assert_eq!(version.patch(), patch);
        assert_eq!(version.to_string(), input);
    }

    #[rstest]
    #[case("1.a")]
    #[case("1")]
    #[case("1.2.3.4")]
    #[case("v1.2")]
    #[case(" 1.2")]
    #[case("1.2-beta")]
    #[case("1..2")]
    #[case("99999999999999999999.1")]
    fn test_marketing_version_rejects(#[case] input: &str) {
        assert!(matches!(
            input.parse::<MarketingVersion>(),
            Err(Error::InvalidVersionFormat { .. })
        ));
    }
}
