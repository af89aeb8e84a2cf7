//! Invocation context
//!
//! Merges command-line arguments with the optional `pbxbump.toml` so each
//! command sees one resolved view. Arguments always win over the file.

use std::path::{Path, PathBuf};

use pbx_core::env::GITHUB_ENV;
use pbx_core::{Config, DuplicatePolicy, EditOptions, EnvFile};

use crate::cli::{ExportArgs, TargetArgs};
use crate::error::{CliError, Result};

/// Directory suffix of project bundles searched when no project is given.
const PROJECT_BUNDLE_EXT: &str = "xcodeproj";

/// Descriptor file inside a project bundle.
const PROJECT_FILE: &str = "project.pbxproj";

/// Configuration and working directory for one invocation.
#[derive(Debug, Clone)]
pub struct Context {
    pub cwd: PathBuf,
    pub config: Config,
}

impl Context {
    /// Load the configuration from `config_path`, or discover it in `cwd`.
    pub fn load(cwd: &Path, config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => Config::load(&cwd.join(path))?,
            None => Config::discover(cwd)?,
        };
        Ok(Self {
            cwd: cwd.to_path_buf(),
            config,
        })
    }

    /// The project file to edit.
    ///
    /// Order: `--project`, then the configuration file, then the single
    /// `*.xcodeproj/project.pbxproj` in the working directory.
    pub fn project(&self, target: &TargetArgs) -> Result<PathBuf> {
        if let Some(project) = target.project.as_ref().or(self.config.project.as_ref()) {
            return Ok(self.cwd.join(project));
        }
        discover_project(&self.cwd)
    }

    /// The configuration block name to edit.
    pub fn configuration(&self, target: &TargetArgs) -> Result<String> {
        target
            .configuration
            .clone()
            .or_else(|| self.config.configuration.clone())
            .ok_or_else(|| {
                CliError::user(
                    "no configuration given: pass --configuration or set `configuration` in pbxbump.toml",
                )
            })
    }

    /// Edit options for `key`.
    pub fn edit_options(&self, target: &TargetArgs, key: &str) -> EditOptions {
        let policy = if target.first_match {
            DuplicatePolicy::FirstMatch
        } else {
            self.config.duplicate_blocks
        };
        EditOptions {
            policy,
            dry_run: target.dry_run,
            key: Some(key.to_string()),
            require_increase: false,
        }
    }

    /// The env file to export to, if exporting was requested.
    pub fn env_file(&self, export: &ExportArgs) -> Result<Option<EnvFile>> {
        if !export.export {
            return Ok(None);
        }
        match &export.env_file {
            Some(path) => Ok(Some(EnvFile::new(self.cwd.join(path)))),
            None => Err(pbx_core::Error::EnvExport {
                name: GITHUB_ENV.to_string(),
                message: "no environment file: pass --env-file or set the variable".into(),
            }
            .into()),
        }
    }
}

/// Find the single project descriptor directly under `dir`.
fn discover_project(dir: &Path) -> Result<PathBuf> {
    let mut found: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == PROJECT_BUNDLE_EXT))
        .map(|bundle| bundle.join(PROJECT_FILE))
        .filter(|file| file.is_file())
        .collect();
    found.sort();

    match found.len() {
        0 => Err(CliError::user(format!(
            "no *.{PROJECT_BUNDLE_EXT}/{PROJECT_FILE} in {}: pass --project",
            dir.display()
        ))),
        1 => {
            let project = found.remove(0);
            tracing::debug!(project = %project.display(), "Discovered project file");
            Ok(project)
        }
        n => Err(CliError::user(format!(
            "{n} project files in {}: pass --project to pick one",
            dir.display()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn add_bundle(dir: &Path, name: &str) -> PathBuf {
        let bundle = dir.join(format!("{name}.xcodeproj"));
        fs::create_dir_all(&bundle).unwrap();
        let file = bundle.join("project.pbxproj");
        fs::write(&file, "// !$*UTF8*$!\n").unwrap();
        file
    }

    #[test]
    fn test_discovers_single_bundle() {
        let temp = TempDir::new().unwrap();
        let file = add_bundle(temp.path(), "Demo");
        let ctx = Context::load(temp.path(), None).unwrap();

        assert_eq!(ctx.project(&TargetArgs::default()).unwrap(), file);
    }

    #[test]
    fn test_several_bundles_need_explicit_project() {
        let temp = TempDir::new().unwrap();
        add_bundle(temp.path(), "Demo");
        add_bundle(temp.path(), "Other");
        let ctx = Context::load(temp.path(), None).unwrap();

        let err = ctx.project(&TargetArgs::default()).unwrap_err();
        assert!(err.to_string().starts_with("2 project files"));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_argument_overrides_config_file() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("pbxbump.toml"),
            "project = \"From/config.pbxproj\"\nconfiguration = \"Release\"\nduplicate_blocks = \"first\"\n",
        )
        .unwrap();
        let ctx = Context::load(temp.path(), None).unwrap();

        let from_file = TargetArgs::default();
        assert_eq!(
            ctx.project(&from_file).unwrap(),
            temp.path().join("From/config.pbxproj")
        );
        assert_eq!(ctx.configuration(&from_file).unwrap(), "Release");
        assert_eq!(
            ctx.edit_options(&from_file, "K").policy,
            DuplicatePolicy::FirstMatch
        );

        let explicit = TargetArgs {
            project: Some(PathBuf::from("Cli.pbxproj")),
            configuration: Some("Debug".into()),
            ..TargetArgs::default()
        };
        assert_eq!(ctx.project(&explicit).unwrap(), temp.path().join("Cli.pbxproj"));
        assert_eq!(ctx.configuration(&explicit).unwrap(), "Debug");
    }

    #[test]
    fn test_missing_configuration_is_user_error() {
        let temp = TempDir::new().unwrap();
        let ctx = Context::load(temp.path(), None).unwrap();

        let err = ctx.configuration(&TargetArgs::default()).unwrap_err();
        assert!(matches!(err, CliError::User { .. }));
    }

    #[test]
    fn test_export_without_env_file_fails() {
        let temp = TempDir::new().unwrap();
        let ctx = Context::load(temp.path(), None).unwrap();

        let none = ctx.env_file(&ExportArgs::default()).unwrap();
        assert!(none.is_none());

        let err = ctx
            .env_file(&ExportArgs {
                export: true,
                env_file: None,
            })
            .unwrap_err();
        assert!(err.to_string().contains("GITHUB_ENV"));
        assert_eq!(err.exit_code(), 15);
    }

    #[test]
    fn test_explicit_config_must_exist() {
        let temp = TempDir::new().unwrap();
        let err = Context::load(temp.path(), Some(Path::new("missing.toml"))).unwrap_err();
        assert_eq!(err.exit_code(), 13);
    }
}
