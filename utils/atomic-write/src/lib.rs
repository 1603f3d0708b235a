//! Crash-safe replacement of a single file.
//!
//! Uses the temp-file + fsync + rename pattern: the new contents are written
//! to a temporary file in the target's directory, flushed to disk, then
//! renamed over the target. Readers observe either the old file or the new
//! one, never a missing or half-written file.
//!
//! The temporary file is owned by a [`tempfile::NamedTempFile`], so every
//! early return removes it.

use std::io::Write;
use std::path::Path;

/// Replace `path` with `contents` atomically.
///
/// When `path` already exists its permissions are carried over to the
/// replacement. The parent directory must exist.
///
/// # Examples
///
/// ```
/// let dir = tempfile::tempdir()?;
/// let target = dir.path().join("plugin.json");
///
/// html_report_utils_atomic_write::write_atomic(&target, b"{}")?;
/// assert_eq!(std::fs::read_to_string(&target)?, "{}");
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn write_atomic(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let dir = parent_dir(path);
    let mut temp = tempfile::NamedTempFile::new_in(dir)?;

    match std::fs::metadata(path) {
        Ok(existing) => temp.as_file().set_permissions(existing.permissions())?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }

    temp.write_all(contents)?;
    temp.as_file().sync_all()?;

    tracing::trace!(
        "renaming {} over {}",
        temp.path().display(),
        path.display()
    );
    temp.persist(path)?;
    Ok(())
}

/// Directory the temp file must live in so the final rename stays on one
/// filesystem. A bare file name resolves to the working directory.
fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
