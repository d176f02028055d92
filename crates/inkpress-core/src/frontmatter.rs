//! Frontmatter parsing for source documents.
//!
//! A document starts with a line that is exactly `---`, followed by a YAML
//! mapping, followed by another `---` line. Everything after the closing
//! delimiter is the body.

use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;
use serde_yaml::{Mapping, Value};

use crate::error::{CoreError, Result};

/// Frontmatter block delimiter.
pub const DELIMITER: &str = "---";

/// Date format accepted for the `date` key.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A document split into its parsed header and raw body.
#[derive(Debug, Clone)]
pub struct Document<'a> {
    /// Key/value mapping parsed from the header block.
    pub header: Mapping,

    /// Bytes following the closing delimiter line.
    pub body: &'a str,
}

/// Outcome of scanning a document for delimiter lines.
#[derive(Debug, PartialEq, Eq)]
enum Split<'a> {
    NoOpening,
    Unclosed,
    Found { header: &'a str, body: &'a str },
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end_matches(['\n', '\r']) == DELIMITER
}

fn scan(content: &str) -> Split<'_> {
    let mut offset = 0;
    let mut header_start = None;

    for line in content.split_inclusive('\n') {
        let next = offset + line.len();
        if is_delimiter(line) {
            match header_start {
                None => header_start = Some(next),
                Some(start) => {
                    return Split::Found {
                        header: &content[start..offset],
                        body: &content[next..],
                    };
                }
            }
        }
        offset = next;
    }

    if header_start.is_some() {
        Split::Unclosed
    } else {
        Split::NoOpening
    }
}

/// Parse a document into its header mapping and body.
///
/// Lines before the opening delimiter are skipped.
pub fn parse_document<'a>(content: &'a str, path: &Path) -> Result<Document<'a>> {
    let (header, body) = match scan(content) {
        Split::Found { header, body } => (header, body),
        Split::NoOpening => {
            return Err(CoreError::malformed(
                path,
                "missing opening `---` frontmatter delimiter",
            ));
        }
        Split::Unclosed => {
            return Err(CoreError::malformed(
                path,
                "frontmatter block is never closed by `---`",
            ));
        }
    };

    if header.trim().is_empty() {
        return Ok(Document {
            header: Mapping::new(),
            body,
        });
    }

    let value: Value = serde_yaml::from_str(header)
        .map_err(|e| CoreError::malformed(path, format!("invalid YAML header: {e}")))?;

    match value {
        Value::Mapping(header) => Ok(Document { header, body }),
        Value::Null => Ok(Document {
            header: Mapping::new(),
            body,
        }),
        other => Err(CoreError::malformed(
            path,
            format!(
                "header must be a key/value mapping, found {}",
                yaml_kind(&other)
            ),
        )),
    }
}

/// Frontmatter recognized on a post document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostFrontmatter {
    /// Post title (required).
    pub title: String,

    /// Publication date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,

    /// Whether this is a draft.
    pub draft: bool,
}

impl PostFrontmatter {
    /// Validate and extract the post keys from a header mapping.
    pub fn from_mapping(header: &Mapping, path: &Path) -> Result<Self> {
        let title = required_str(header, "title", path)?;
        let date = optional_str(header, "date", path)?
            .map(|value| parse_date(value, path))
            .transpose()?;
        let draft = optional_bool(header, "draft", path)?.unwrap_or(false);

        Ok(Self { title, date, draft })
    }
}

/// Frontmatter recognized on the site settings document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingsFrontmatter {
    /// Site title.
    pub title: String,

    /// Base URL of the published site.
    pub url: String,

    /// Absolute URL of the feed.
    pub xmlurl: String,
}

impl SettingsFrontmatter {
    /// Validate and extract the settings keys from a header mapping.
    pub fn from_mapping(header: &Mapping, path: &Path) -> Result<Self> {
        Ok(Self {
            title: required_str(header, "title", path)?,
            url: required_str(header, "url", path)?,
            xmlurl: required_str(header, "xmlurl", path)?,
        })
    }
}

/// Parse a `YYYY-MM-DD` date.
///
/// The shape is checked before chrono sees the value: chrono alone accepts
/// unpadded fields and signed years.
pub fn parse_date(value: &str, path: &Path) -> Result<NaiveDate> {
    let invalid = || CoreError::InvalidDate {
        path: path.to_path_buf(),
        value: value.to_string(),
    };

    if !has_date_shape(value) {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| invalid())
}

fn has_date_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

fn present<'a>(header: &'a Mapping, key: &str) -> Option<&'a Value> {
    header.get(key).filter(|value| !value.is_null())
}

fn required_str(header: &Mapping, field: &'static str, path: &Path) -> Result<String> {
    optional_str(header, field, path)?
        .map(str::to_string)
        .ok_or_else(|| CoreError::missing_field(path, field))
}

fn optional_str<'a>(
    header: &'a Mapping,
    field: &'static str,
    path: &Path,
) -> Result<Option<&'a str>> {
    match present(header, field) {
        None => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.as_str())),
        Some(other) => Err(mismatch(path, field, "string", other)),
    }
}

fn optional_bool(header: &Mapping, field: &'static str, path: &Path) -> Result<Option<bool>> {
    match present(header, field) {
        None => Ok(None),
        Some(Value::Bool(value)) => Ok(Some(*value)),
        Some(other) => Err(mismatch(path, field, "boolean", other)),
    }
}

fn mismatch(path: &Path, field: &'static str, expected: &'static str, found: &Value) -> CoreError {
    CoreError::TypeMismatch {
        path: path.to_path_buf(),
        field,
        expected,
        found: yaml_kind(found),
    }
}

fn yaml_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}
