//! Import errors.

use std::path::PathBuf;

use mxmeta_ingest::IngestError;
use thiserror::Error;

/// Errors raised by [`import_file`](crate::import_file) and option loading.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("cannot read {source_name}: {source}")]
    Unreadable {
        source_name: String,
        #[source]
        source: IngestError,
    },

    #[error("{source_name} is corrupt: {source}")]
    Corrupt {
        source_name: String,
        #[source]
        source: IngestError,
    },

    #[error("cannot tell the format of {source_name}")]
    UnknownFormat { source_name: String },

    #[error("failed to read options file {path}: {source}")]
    OptionsRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid options file {path}: {source}")]
    OptionsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ImportError {
    /// Wraps a reader error, separating unreadable files from corrupt ones.
    pub fn from_ingest(source_name: impl Into<String>, source: IngestError) -> Self {
        let source_name = source_name.into();
        match source {
            IngestError::FileNotFound { .. } | IngestError::FileRead { .. } => {
                Self::Unreadable {
                    source_name,
                    source,
                }
            }
            _ => Self::Corrupt {
                source_name,
                source,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corruption_is_wrapped_once() {
        let err = ImportError::from_ingest("1abc.cif", IngestError::EmptyLoop { line: 4 });
        assert!(matches!(err, ImportError::Corrupt { .. }));
        assert_eq!(
            err.to_string(),
            "1abc.cif is corrupt: loop at line 4 declares no items"
        );
    }

    #[test]
    fn missing_file_is_unreadable() {
        let err = ImportError::from_ingest(
            "CORRECT.LP",
            IngestError::FileNotFound {
                path: PathBuf::from("CORRECT.LP"),
            },
        );
        assert!(matches!(err, ImportError::Unreadable { .. }));
    }
}
