//! Error types for pbx-blocks

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration block not found: {name}")]
    BlockNotFound { name: String },

    #[error("Configuration name {name} matches {count} blocks")]
    AmbiguousBlock { name: String, count: usize },

    #[error("Configuration block {name} opened at byte {offset} is never closed")]
    UnbalancedBlock { name: String, offset: usize },

    #[error("Field {key} not found in configuration block {block}")]
    FieldNotFound { key: String, block: String },

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}
