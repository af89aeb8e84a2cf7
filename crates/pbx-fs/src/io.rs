//! Whole-file I/O with advisory locking

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::{Error, Result};

/// Read a whole file as UTF-8 text.
///
/// A missing file is reported as [`Error::NotFound`] so callers can tell it
/// apart from other read failures.
pub fn read_text(path: &Path) -> Result<String> {
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "Read file");
    Ok(content)
}

/// Temp file used while replacing `path`. Lives in the same directory so the
/// final rename never crosses filesystems.
fn temp_path_for(path: &Path) -> PathBuf {
    let temp_name = format!(
        ".{}.{}.tmp",
        path.file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    path.with_file_name(temp_name)
}

/// Replace `path` with `content` atomically.
///
/// The bytes go to a locked temp file next to the target, are synced, and the
/// temp file is renamed over the target. Permissions of an existing target are
/// carried over. On any failure the temp file is removed and the target is
/// left untouched.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let temp_path = temp_path_for(path);

    let result = write_temp(path, &temp_path, content)
        .and_then(|()| fs::rename(&temp_path, path).map_err(|e| Error::io(path, e)));

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "Wrote file atomically");
    Ok(())
}

fn write_temp(target: &Path, temp_path: &Path, content: &[u8]) -> Result<()> {
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(temp_path)
        .map_err(|e| Error::io(temp_path, e))?;

    temp_file
        .lock_exclusive()
        .map_err(|_| Error::LockFailed {
            path: target.to_path_buf(),
        })?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(temp_path, e))?;
    temp_file.sync_all().map_err(|e| Error::io(temp_path, e))?;

    if let Ok(metadata) = fs::metadata(target) {
        temp_file
            .set_permissions(metadata.permissions())
            .map_err(|e| Error::io(temp_path, e))?;
    }

    FileExt::unlock(&temp_file).map_err(|_| Error::LockFailed {
        path: target.to_path_buf(),
    })?;

    Ok(())
}

/// Append `line` plus a trailing newline to `path`, creating it if needed.
///
/// Holds an exclusive lock for the duration of the write; env files are
/// shared by every step of a CI job.
pub fn append_line(path: &Path, line: &str) -> Result<()> {
    let mut file: File = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .map_err(|e| Error::io(path, e))?;

    file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: path.to_path_buf(),
    })?;

    let written = writeln!(file, "{line}").map_err(|e| Error::io(path, e));

    FileExt::unlock(&file).map_err(|_| Error::LockFailed {
        path: path.to_path_buf(),
    })?;

    written
}
