//! Error types for source ingestion.

use std::path::PathBuf;

use mxmeta_model::ModelError;
use thiserror::Error;

/// Errors raised while reading a source file.
///
/// Only structural corruption is an error; missing categories, missing
/// values and unrecognized lines are not.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Structural Errors ===
    #[error("source is empty")]
    EmptySource,

    #[error("no data block found (line {line})")]
    NoDataBlock { line: usize },

    #[error("unterminated quoted string starting at line {line}")]
    UnterminatedQuote { line: usize },

    #[error("unterminated text field starting at line {line}")]
    UnterminatedTextField { line: usize },

    #[error("loop at line {line} has {values} values for {columns} columns")]
    LoopMismatch {
        line: usize,
        columns: usize,
        values: usize,
    },

    #[error("loop at line {line} declares no items")]
    EmptyLoop { line: usize },

    #[error("loop at line {line} mixes categories '{expected}' and '{found}'")]
    MixedLoop {
        line: usize,
        expected: String,
        found: String,
    },

    #[error("duplicate item {tag} at line {line}")]
    DuplicateItem { line: usize, tag: String },

    #[error("value '{value}' at line {line} has no item name")]
    ValueWithoutTag { line: usize, value: String },

    #[error("item {tag} at line {line} has no value")]
    MissingValue { line: usize, tag: String },

    #[error("unsupported construct '{construct}' at line {line}")]
    Unsupported { line: usize, construct: String },

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
