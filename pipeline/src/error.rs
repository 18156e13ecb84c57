use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Cannot read input directory '{}': {source}", .dir.display())]
    DiscoveryError {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot read input file '{}': {source}", .file.display())]
    ReadError {
        file: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "CSV parsing error in '{}' (document {document}, rows from line {line}): {source}",
        .file.display()
    )]
    ParseError {
        file: PathBuf,
        document: usize,
        /// File line of the document's first row.
        line: u64,
        #[source]
        source: csv::Error,
    },

    #[error(
        "Invalid {field} '{value}' in '{}' (document {document}, line {line}): {reason}",
        .file.display()
    )]
    ConversionError {
        file: PathBuf,
        document: usize,
        line: u64,
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("CSV serialization error: {source}")]
    SerializeError {
        #[from]
        source: csv::Error,
    },

    #[error("Cannot write output file '{}': {source}", .file.display())]
    WriteError {
        file: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure converting a single field of a kept row. Carries no location; the
/// cleaning stage attaches file, document and line when it wraps it.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{reason}")]
pub struct FieldError {
    pub field: &'static str,
    pub value: String,
    pub reason: String,
}

impl FieldError {
    pub fn new(field: &'static str, value: &str, reason: impl ToString) -> Self {
        FieldError {
            field,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}
