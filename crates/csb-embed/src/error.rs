//! Error types for sandbox embedding.

use std::path::PathBuf;

/// Error raised while validating configuration or embedding a link.
///
/// Any error aborts the whole document transform.
#[derive(Debug, thiserror::Error)]
pub enum EmbedError {
    /// No root directory was configured.
    #[error("Required option \"directory\" not specified")]
    MissingDirectory,

    /// The configured root directory does not exist.
    #[error("Cannot find directory \"{}\"", .0.display())]
    DirectoryNotFound(PathBuf),

    /// Listing a directory or reading a file failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path being listed or read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A `package.json` could not be parsed as JSON.
    #[error("Invalid manifest {}: {source}", path.display())]
    Manifest {
        /// Location of the manifest.
        path: PathBuf,
        /// Parse error.
        #[source]
        source: serde_json::Error,
    },

    /// A sentinel link points above the configured root directory.
    #[error("Link \"{link}\" resolves outside the root directory")]
    OutsideRoot {
        /// The offending link or directory.
        link: String,
    },

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EmbedError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
