//! The plugin metadata document (`plugin.json`).

use std::path::Path;
use std::path::PathBuf;

use serde_json::Map;
use serde_json::Value;

use crate::error::Result;
use crate::error::VersionFileError;
use crate::error::json_type_name;
use crate::render;

/// Key holding the plugin version.
pub const VERSION_KEY: &str = "version";

/// A metadata file held in memory between load and save.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataDocument {
    path: PathBuf,
    fields: Map<String, Value>,
}

impl MetadataDocument {
    /// Read and parse the document at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                VersionFileError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                VersionFileError::Io {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;
        tracing::debug!("read {} bytes from {}", content.len(), path.display());
        Self::parse(path, &content)
    }

    /// Parse `content` as the document that lives at `path`.
    pub fn parse(path: &Path, content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content).map_err(|e| VersionFileError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        match value {
            Value::Object(fields) => Ok(Self {
                path: path.to_path_buf(),
                fields,
            }),
            other => Err(VersionFileError::NotAnObject {
                path: path.to_path_buf(),
                found: json_type_name(&other),
            }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// The `"version"` string.
    pub fn version(&self) -> Result<&str> {
        match self.fields.get(VERSION_KEY) {
            Some(Value::String(version)) => Ok(version),
            Some(other) => Err(VersionFileError::VersionNotString {
                path: self.path.clone(),
                found: json_type_name(other),
            }),
            None => Err(VersionFileError::MissingVersion {
                path: self.path.clone(),
            }),
        }
    }

    pub fn set_version(&mut self, version: impl Into<String>) {
        self.fields
            .insert(VERSION_KEY.to_string(), Value::String(version.into()));
    }

    /// Canonical text of the document, as [`save`](Self::save) writes it.
    pub fn render(&self) -> Result<String> {
        render::object_to_canonical_json(&self.fields).map_err(|e| VersionFileError::Serialize {
            path: self.path.clone(),
            source: e,
        })
    }

    /// Atomically replace the file this document was loaded from.
    pub fn save(&self) -> Result<()> {
        let text = self.render()?;
        html_report_utils_atomic_write::write_atomic(&self.path, text.as_bytes()).map_err(|e| {
            VersionFileError::Write {
                path: self.path.clone(),
                source: e,
            }
        })?;
        tracing::debug!("wrote {} bytes to {}", text.len(), self.path.display());
        Ok(())
    }
}
