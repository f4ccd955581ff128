//! Errors raised while loading the extractor output or writing site documents.
//!
//! Nothing inside the normalization walk produces these: malformed nodes are
//! filtered or serialized to empty strings instead.

use std::io;
use std::path::PathBuf;

/// Failure at the I/O boundary of the pipeline.
#[derive(Debug, thiserror::Error)]
pub enum DocsError {
    /// The input document could not be read from disk.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The input document is not valid JSON.
    #[error("Failed to parse documentation JSON: {0}")]
    Parse(#[source] serde_json::Error),

    /// The input document parsed but its root has no `children` array.
    #[error("Documentation JSON has no top-level `children` array")]
    MissingChildren,

    /// The output directory could not be created.
    #[error("Failed to create output directory {}: {source}", path.display())]
    CreateDir {
        /// Directory that was being created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A normalized record could not be rendered as JSON.
    #[error("Failed to serialize {}: {source}", path.display())]
    Serialize {
        /// Output file the record was destined for.
        path: PathBuf,
        /// Underlying serialization error.
        source: serde_json::Error,
    },

    /// An output document could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        /// File that was being written.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}
