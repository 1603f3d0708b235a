use std::path::PathBuf;

/// Errors from reading, bumping or rewriting a metadata document.
#[derive(Debug, thiserror::Error)]
pub enum VersionFileError {
    /// Metadata file not found at the expected path.
    #[error("metadata file not found at {path}")]
    NotFound { path: PathBuf },

    /// Filesystem I/O error while reading.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// File exists but is not valid JSON.
    #[error("invalid JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Valid JSON whose root is not an object.
    #[error("expected a JSON object at the root of {path}, found {found}")]
    NotAnObject { path: PathBuf, found: &'static str },

    #[error("no \"version\" key in {path}")]
    MissingVersion { path: PathBuf },

    #[error("\"version\" in {path} must be a string, found {found}")]
    VersionNotString { path: PathBuf, found: &'static str },

    #[error("failed to serialize {path}: {source}")]
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The atomic replace failed; the original file is untouched.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, VersionFileError>;

/// Name of a JSON value's type, for error messages.
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
