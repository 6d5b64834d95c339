#![deny(unsafe_code)]

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum TerminologyError {
    #[error("failed to read mapping table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse mapping table: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
    },

    #[error("mapping entry '{category}' has no keywords")]
    EmptyKeywords { category: String },

    #[error("mapping entry '{category}' has a blank keyword")]
    BlankKeyword { category: String },

    #[error("mapping entry '{category}' has confidence {value} outside 0-100")]
    ConfidenceOutOfRange { category: String, value: u8 },

    #[error("duplicate category '{category}' in mapping table")]
    DuplicateCategory { category: String },
}

impl TerminologyError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
