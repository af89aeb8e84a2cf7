//! Optional TOML configuration
//!
//! ```toml
//! project = "App.xcodeproj/project.pbxproj"
//! configuration = "Release"
//! duplicate_blocks = "reject"
//!
//! [build_number]
//! key = "CURRENT_PROJECT_VERSION"
//! require_increase = false
//! env_var = "CURRENT_BUILD_NUMBER"
//!
//! [marketing_version]
//! key = "MARKETING_VERSION"
//! env_var = "MARKETING_VERSION"
//! ```

use pbx_blocks::DuplicatePolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::ops::{BUILD_NUMBER_KEY, MARKETING_VERSION_KEY};

/// File name looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "pbxbump.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Project file to edit.
    pub project: Option<PathBuf>,
    /// Configuration block name.
    pub configuration: Option<String>,
    pub duplicate_blocks: DuplicatePolicy,
    pub build_number: BuildNumberConfig,
    pub marketing_version: MarketingVersionConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildNumberConfig {
    pub key: String,
    pub require_increase: bool,
    /// Variable name used when exporting the new build number.
    pub env_var: String,
}

impl Default for BuildNumberConfig {
    fn default() -> Self {
        Self {
            key: BUILD_NUMBER_KEY.to_string(),
            require_increase: false,
            env_var: "CURRENT_BUILD_NUMBER".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarketingVersionConfig {
    pub key: String,
    /// Variable name used when exporting the new marketing version.
    pub env_var: String,
}

impl Default for MarketingVersionConfig {
    fn default() -> Self {
        Self {
            key: MARKETING_VERSION_KEY.to_string(),
            env_var: "MARKETING_VERSION".to_string(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(e.to_string()))
    }

    /// Load configuration from `path`. The file must exist.
    ///
    /// A relative `project` path in the file is resolved against the file's
    /// directory.
    pub fn load(path: &Path) -> Result<Self> {
        let content = pbx_fs::io::read_text(path)
            .map_err(|e| Error::config(format!("cannot read {}: {e}", path.display())))?;
        let mut config = Self::from_toml(&content).map_err(|e| match e {
            Error::Config { message } => {
                Error::config(format!("invalid {}: {message}", path.display()))
            }
            other => other,
        })?;

        if let (Some(project), Some(dir)) = (config.project.as_mut(), path.parent()) {
            if project.is_relative() {
                *project = dir.join(&*project);
            }
        }

        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load `pbxbump.toml` from `dir` if present, defaults otherwise.
    pub fn discover(dir: &Path) -> Result<Self> {
        let path = dir.join(DEFAULT_CONFIG_FILE);
        if path.is_file() {
            Self::load(&path)
        } else {
            tracing::debug!(dir = %dir.display(), "No configuration file, using defaults");
            Ok(Self::default())
        }
    }
}
