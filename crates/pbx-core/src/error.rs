//! Error types for pbx-core

use std::path::PathBuf;

/// Result type for pbx-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while editing a project file.
///
/// Every variant is terminal: the file on disk is never modified when one of
/// these is returned.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Project file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: pbx_fs::Error,
    },

    #[error("Configuration block not found: {name}")]
    BlockNotFound { name: String },

    #[error(
        "Configuration {name} is ambiguous: {count} blocks match (allow the first match to pick one)"
    )]
    AmbiguousBlock { name: String, count: usize },

    #[error("Configuration block {name} opened at byte {offset} is never closed")]
    MalformedBlock { name: String, offset: usize },

    #[error("Setting {key} not found in configuration {block}")]
    FieldNotFound { key: String, block: String },

    #[error("Invalid marketing version {value:?}: expected MAJOR.MINOR or MAJOR.MINOR.PATCH")]
    InvalidVersionFormat { value: String },

    #[error("Invalid build number {value:?}: {reason}")]
    InvalidBuildNumber { value: String, reason: String },

    #[error("Build number {requested} does not increase the current build number {current}")]
    BuildNumberNotIncreasing { current: u64, requested: u64 },

    #[error("Failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: pbx_fs::Error,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid release intent: {}", .problems.join("; "))]
    InvalidReleaseIntent { problems: Vec<String> },

    #[error("Cannot export {name}: {message}")]
    EnvExport { name: String, message: String },
}

/// Coarse classification of [`Error`], one per reported failure kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    FileNotFound,
    ReadFailed,
    BlockNotFound,
    AmbiguousBlock,
    MalformedBlock,
    FieldNotFound,
    InvalidVersionFormat,
    InvalidBuildNumber,
    BuildNumberNotIncreasing,
    WriteFailed,
    Config,
    InvalidReleaseIntent,
    EnvExport,
}

impl ErrorKind {
    /// Process exit code for this kind. `0` is success, `1` is reserved for
    /// unexpected failures and `2` for usage errors.
    pub fn exit_code(self) -> i32 {
        match self {
            Self::FileNotFound => 3,
            Self::BlockNotFound => 4,
            Self::AmbiguousBlock => 5,
            Self::MalformedBlock => 6,
            Self::FieldNotFound => 7,
            Self::InvalidVersionFormat => 8,
            Self::InvalidBuildNumber => 9,
            Self::BuildNumberNotIncreasing => 10,
            Self::ReadFailed => 11,
            Self::WriteFailed => 12,
            Self::Config => 13,
            Self::InvalidReleaseIntent => 14,
            Self::EnvExport => 15,
        }
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::FileNotFound { .. } => ErrorKind::FileNotFound,
            Self::ReadFailed { .. } => ErrorKind::ReadFailed,
            Self::BlockNotFound { .. } => ErrorKind::BlockNotFound,
            Self::AmbiguousBlock { .. } => ErrorKind::AmbiguousBlock,
            Self::MalformedBlock { .. } => ErrorKind::MalformedBlock,
            Self::FieldNotFound { .. } => ErrorKind::FieldNotFound,
            Self::InvalidVersionFormat { .. } => ErrorKind::InvalidVersionFormat,
            Self::InvalidBuildNumber { .. } => ErrorKind::InvalidBuildNumber,
            Self::BuildNumberNotIncreasing { .. } => ErrorKind::BuildNumberNotIncreasing,
            Self::WriteFailed { .. } => ErrorKind::WriteFailed,
            Self::Config { .. } => ErrorKind::Config,
            Self::InvalidReleaseIntent { .. } => ErrorKind::InvalidReleaseIntent,
            Self::EnvExport { .. } => ErrorKind::EnvExport,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Classify a failed read of the project file.
    pub(crate) fn read(source: pbx_fs::Error) -> Self {
        match source {
            pbx_fs::Error::NotFound { path } => Self::FileNotFound { path },
            other => Self::ReadFailed {
                path: other.path().to_path_buf(),
                source: other,
            },
        }
    }

    pub(crate) fn write(source: pbx_fs::Error) -> Self {
        Self::WriteFailed {
            path: source.path().to_path_buf(),
            source,
        }
    }
}

impl From<pbx_blocks::Error> for Error {
    fn from(err: pbx_blocks::Error) -> Self {
        match err {
            pbx_blocks::Error::BlockNotFound { name } => Self::BlockNotFound { name },
            pbx_blocks::Error::AmbiguousBlock { name, count } => Self::AmbiguousBlock { name, count },
            pbx_blocks::Error::UnbalancedBlock { name, offset } => {
                Self::MalformedBlock { name, offset }
            }
            pbx_blocks::Error::FieldNotFound { key, block } => Self::FieldNotFound { key, block },
            // Keys are escaped before compiling, so this only fires if the
            // pattern outgrows the regex size limit.
            pbx_blocks::Error::Pattern(e) => Self::config(format!("invalid setting key: {e}")),
        }
    }
}
