use thiserror::Error;

/// `DecodeError` is returned when a tmsh style dump cannot be decoded. Decoding is all or nothing,
/// so no partial structure is ever returned alongside this error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed decoding line {line} ('{content}'): {details}")]
pub struct DecodeError {
    /// The 1-based line number of the offending line in the original input.
    pub line: usize,
    /// The offending line, with surrounding whitespace trimmed.
    pub content: String,
    /// A string holding details about the error.
    pub details: String,
}

impl DecodeError {
    pub(crate) fn new(
        line: usize,
        content: &str,
        details: &str,
    ) -> Self {
        Self {
            line,
            content: content.trim().to_owned(),
            details: details.to_owned(),
        }
    }
}

/// `EncodeError` is returned when a decoded structure has no tmsh text representation, for example
/// a list holding nested mappings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed encoding '{path}': {details}")]
pub struct EncodeError {
    /// Space separated path of keys leading to the offending node.
    pub path: String,
    /// A string holding details about the error.
    pub details: String,
}

/// `FormatError` is returned when a value handed to a transform (or time) helper is not in the
/// format the helper expects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed value '{value}': {details}")]
pub struct FormatError {
    /// The value that could not be handled.
    pub value: String,
    /// A string holding details about the error.
    pub details: String,
}

impl FormatError {
    pub(crate) fn new(
        value: &str,
        details: &str,
    ) -> Self {
        Self {
            value: value.to_owned(),
            details: details.to_owned(),
        }
    }
}

/// `MappingError` covers everything that can go wrong while loading a schema or transforming rows
/// with one.
#[derive(Debug, Error)]
pub enum MappingError {
    /// The requested table name has no entry in the schema.
    #[error("unknown table name '{0}'")]
    UnknownTable(String),
    /// A transform function rejected a row value.
    #[error(transparent)]
    Format(#[from] FormatError),
    /// The schema document could not be read or deserialized.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),
}
