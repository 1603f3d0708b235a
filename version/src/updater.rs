use std::path::Path;
use std::path::PathBuf;

use serde::Serialize;

use crate::bump::bump_trailing_digit;
use crate::document::MetadataDocument;
use crate::error::Result;

/// Metadata file name, relative to the working directory.
pub const DEFAULT_METADATA_FILE: &str = "plugin.json";

/// Outcome of a version bump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionChange {
    pub previous: String,
    pub next: String,
}

impl VersionChange {
    /// False when the version did not end in a digit and was left as is.
    pub fn changed(&self) -> bool {
        self.previous != self.next
    }
}

/// Bumps the version stored in one metadata file.
#[derive(Debug, Clone)]
pub struct VersionUpdater {
    path: PathBuf,
}

impl Default for VersionUpdater {
    fn default() -> Self {
        Self::new(DEFAULT_METADATA_FILE)
    }
}

impl VersionUpdater {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Version currently on disk. Never writes.
    pub fn current_version(&self) -> Result<String> {
        let doc = MetadataDocument::load(&self.path)?;
        Ok(doc.version()?.to_string())
    }

    /// Compute the bump without touching the file.
    pub fn preview(&self) -> Result<VersionChange> {
        let doc = MetadataDocument::load(&self.path)?;
        let (change, _) = Self::apply(doc)?;
        Ok(change)
    }

    /// Bump the version and rewrite the file in canonical form.
    ///
    /// The file is rewritten even when the version does not end in a digit,
    /// so the result is always canonically formatted. The replacement is
    /// atomic: on error the original file is left untouched.
    pub fn update(&self) -> Result<VersionChange> {
        let doc = MetadataDocument::load(&self.path)?;
        let (change, doc) = Self::apply(doc)?;
        doc.save()?;
        Ok(change)
    }

    /// Bump the version, rewrite the file and return the new version.
    pub fn update_version(&self) -> Result<String> {
        Ok(self.update()?.next)
    }

    fn apply(mut doc: MetadataDocument) -> Result<(VersionChange, MetadataDocument)> {
        let previous = doc.version()?.to_string();
        let next = bump_trailing_digit(&previous).into_owned();
        let change = VersionChange { previous, next };

        if change.changed() {
            tracing::info!(
                "bumping version in {}: {} -> {}",
                doc.path().display(),
                change.previous,
                change.next
            );
        } else {
            tracing::warn!(
                "version {:?} in {} does not end in a digit; leaving it unchanged",
                change.previous,
                doc.path().display()
            );
        }

        doc.set_version(change.next.clone());
        Ok((change, doc))
    }
}
