//! Version bumping for the HTML report plugin descriptor.
//!
//! `plugin.json` carries a `"version"` string. [`VersionUpdater`] increments
//! its trailing digit (`1.0.3` -> `1.0.4`, `1.2.9` -> `1.2.10`) and rewrites
//! the file in canonical form: sorted keys, 4-space indentation, `\n` line
//! endings. The rewrite is atomic.

mod bump;
mod document;
mod error;
mod render;
mod updater;

pub use bump::bump_trailing_digit;
pub use bump::ends_with_digit;
pub use document::MetadataDocument;
pub use document::VERSION_KEY;
pub use error::Result;
pub use error::VersionFileError;
pub use render::normalize_line_endings;
pub use render::to_canonical_json;
pub use updater::DEFAULT_METADATA_FILE;
pub use updater::VersionChange;
pub use updater::VersionUpdater;
