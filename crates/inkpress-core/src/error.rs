//! Error types for the inkpress core library.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error types for inkpress.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Frontmatter delimiters missing or unbalanced, or the header is not a mapping.
    #[error("malformed document {}: {message}", path.display())]
    MalformedDocument { path: PathBuf, message: String },

    /// Required frontmatter key absent.
    #[error("missing field `{field}` in {}", path.display())]
    MissingField { path: PathBuf, field: &'static str },

    /// Date value not in `YYYY-MM-DD` form.
    #[error("invalid date {value:?} in {}, expected YYYY-MM-DD", path.display())]
    InvalidDate { path: PathBuf, value: String },

    /// Frontmatter value of the wrong YAML type.
    #[error("field `{field}` in {} must be a {expected}, found {found}", path.display())]
    TypeMismatch {
        path: PathBuf,
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// File system I/O error.
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Settings layering error.
    #[error("settings error: {0}")]
    Config(#[from] config::ConfigError),
}

impl CoreError {
    /// Create a new malformed document error.
    pub fn malformed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::MalformedDocument {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a new missing field error.
    pub fn missing_field(path: impl Into<PathBuf>, field: &'static str) -> Self {
        Self::MissingField {
            path: path.into(),
            field,
        }
    }

    /// Create a new IO error bound to the file it concerns.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
