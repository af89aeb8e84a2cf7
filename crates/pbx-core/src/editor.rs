//! Load, locate, mutate, splice, write.
//!
//! An edit moves through `Loaded -> BlockLocated -> FieldMutated` and ends
//! either `Written` or `Skipped`. The new file content is built completely in
//! memory before the file is opened for writing, so a failure at any stage
//! leaves the file as it was.

use pbx_blocks::{DuplicatePolicy, FieldValue};
use serde::Serialize;
use similar::TextDiff;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// How an edit ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EditOutcome {
    /// The new content was written to disk.
    Written,
    /// The value already had the requested content; nothing was written.
    Unchanged,
    /// The value would change, but this was a dry run.
    DryRun,
}

/// Report of a completed edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditReport {
    pub path: PathBuf,
    pub configuration: String,
    /// Identifier of the block that was edited.
    pub block_id: String,
    pub key: String,
    pub old_value: String,
    pub new_value: String,
    pub outcome: EditOutcome,
    /// Unified diff of the file change. Empty when nothing changed.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub diff: String,
}

impl EditReport {
    /// Whether the value differs from what was in the file.
    pub fn changed(&self) -> bool {
        self.outcome != EditOutcome::Unchanged
    }

    /// Whether the file on disk was rewritten.
    pub fn written(&self) -> bool {
        self.outcome == EditOutcome::Written
    }
}

/// Edits one setting of one configuration block in a project file.
#[derive(Debug, Clone)]
pub struct FileEditor {
    path: PathBuf,
    policy: DuplicatePolicy,
    dry_run: bool,
}

impl FileEditor {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            policy: DuplicatePolicy::default(),
            dry_run: false,
        }
    }

    /// How to treat several blocks that share the configuration name.
    pub fn with_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Compute the edit without writing it.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rewrite `key` in the block named `configuration`.
    ///
    /// `transform` maps the current value to the new value text. Returning an
    /// error aborts the edit before anything is written.
    pub fn apply<F>(&self, configuration: &str, key: &str, transform: F) -> Result<EditReport>
    where
        F: FnOnce(&FieldValue) -> Result<String>,
    {
        let text = pbx_fs::io::read_text(&self.path).map_err(Error::read)?;
        tracing::debug!(path = %self.path.display(), stage = "loaded");

        let block = pbx_blocks::locate_with_field(&text, configuration, key, self.policy)?;
        tracing::debug!(configuration, id = %block.id, stage = "block_located");

        let mutation = pbx_blocks::mutate(&block, key, transform)?;
        tracing::debug!(key, old = %mutation.old, new = %mutation.new, stage = "field_mutated");

        let mut report = EditReport {
            path: self.path.clone(),
            configuration: configuration.to_string(),
            block_id: block.id.clone(),
            key: key.to_string(),
            old_value: mutation.old,
            new_value: mutation.new,
            outcome: EditOutcome::Unchanged,
            diff: String::new(),
        };

        if !mutation.changed {
            tracing::info!(path = %self.path.display(), key, value = %report.new_value, stage = "skipped");
            return Ok(report);
        }

        let updated = block.splice(&text, &mutation.content);
        report.diff = unified_diff(&self.path, &text, &updated);

        if self.dry_run {
            report.outcome = EditOutcome::DryRun;
            tracing::info!(path = %self.path.display(), key, "Dry run, not writing");
            return Ok(report);
        }

        pbx_fs::io::write_atomic(&self.path, updated.as_bytes()).map_err(Error::write)?;
        report.outcome = EditOutcome::Written;
        tracing::info!(
            path = %self.path.display(),
            key,
            old = %report.old_value,
            new = %report.new_value,
            stage = "written"
        );

        Ok(report)
    }
}

fn unified_diff(path: &Path, old: &str, new: &str) -> String {
    let name = path.display().to_string();
    TextDiff::from_lines(old, new)
        .unified_diff()
        .context_radius(2)
        .header(&name, &name)
        .to_string()
}
