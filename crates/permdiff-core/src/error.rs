use std::path::PathBuf;

use thiserror::Error;

use crate::DocumentKind;

/// Errors that can occur while loading a metadata document into an [`Element`] tree.
///
/// [`Element`]: crate::Element
#[derive(Debug, Error)]
pub enum LoadError {
    /// The document could not be read from disk.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path of the unreadable document.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The document is not well-formed XML.
    #[error("malformed XML at byte {position}: {message}")]
    Malformed {
        /// Byte offset where the reader gave up.
        position: u64,
        /// Human-readable description of the problem.
        message: String,
    },
}

impl LoadError {
    pub(crate) fn malformed(position: u64, message: impl Into<String>) -> Self {
        Self::Malformed { position, message: message.into() }
    }
}

/// Errors emitted when serializing a report.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The report could not be encoded as JSON.
    #[error("failed to encode report as JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Terminal failures of a comparison run.
///
/// None of these are retried; the driver either writes a complete report or
/// nothing at all.
#[derive(Debug, Error)]
pub enum CompareError {
    /// The input set did not contain exactly two candidate documents.
    #[error(
        "expected exactly two XML files (Profiles or Permission Sets) in {}, found {found}",
        dir.display()
    )]
    InputCount {
        /// Directory that was scanned, or `.` for explicit inputs.
        dir: PathBuf,
        /// Number of candidates found.
        found: usize,
    },
    /// A document's root element is neither `Profile` nor `PermissionSet`.
    #[error("{} is not recognized as a Profile or PermissionSet (root element <{root}>)", path.display())]
    UnrecognizedType {
        /// Offending document.
        path: PathBuf,
        /// Namespace-stripped root tag that was found.
        root: String,
    },
    /// The two documents are of different kinds.
    #[error(
        "mismatched types: {} is {left_kind}, {} is {right_kind}; compare two documents of the same type",
        left.display(),
        right.display()
    )]
    TypeMismatch {
        /// First document.
        left: PathBuf,
        /// Kind of the first document.
        left_kind: DocumentKind,
        /// Second document.
        right: PathBuf,
        /// Kind of the second document.
        right_kind: DocumentKind,
    },
    /// A document could not be parsed.
    #[error("failed to load {}: {source}", path.display())]
    MalformedDocument {
        /// Offending document.
        path: PathBuf,
        /// Loader failure.
        #[source]
        source: LoadError,
    },
    /// The input directory could not be listed.
    #[error("failed to list {}: {source}", dir.display())]
    Discover {
        /// Directory that was scanned.
        dir: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The report could not be serialized.
    #[error(transparent)]
    Render(#[from] RenderError),
    /// The rendered report could not be written.
    #[error("failed to write report to {}: {source}", path.display())]
    Write {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}
