//! Error types for pbx-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from pbx-core
    #[error(transparent)]
    Core(#[from] pbx_core::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON rendering error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }

    /// Process exit code reported for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Core(e) => e.kind().exit_code(),
            Self::User { .. } => 2,
            Self::Io(_) | Self::Json(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_error_message() {
        let error = CliError::user("no project file found");
        assert_eq!(format!("{error}"), "no project file found");
        assert_eq!(error.exit_code(), 2);
    }

    #[test]
    fn test_core_error_keeps_kind_exit_code() {
        let error = CliError::from(pbx_core::Error::BlockNotFound {
            name: "Staging".into(),
        });
        assert_eq!(error.exit_code(), 4);
        assert_eq!(error.to_string(), "Configuration block not found: Staging");
    }

    #[test]
    fn test_io_error_is_unexpected() {
        let error = CliError::from(std::io::Error::other("boom"));
        assert_eq!(error.exit_code(), 1);
    }
}
