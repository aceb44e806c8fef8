//! Error taxonomy for artifact loading
//!
//! Every variant is fatal for the file it names: there is no retry at this
//! layer. The caller decides whether a failure aborts the process or is
//! reported upward as a data-availability problem. `TruncatedRead` and
//! `EndOfFile` are the same category to callers but carry distinct text so
//! an operator can tell a short file from an empty read.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    /// Path could not be opened for reading.
    #[error("error opening {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },

    /// The file was produced by an incompatible build.
    #[error("fingerprint mismatch in {}", path.display())]
    FingerprintMismatch { path: PathBuf },

    /// Fewer bytes were available than the requested record span.
    #[error("error reading from {}: unexpected end of file", path.display())]
    TruncatedRead { path: PathBuf },

    /// A read returned zero bytes against a non-zero request.
    #[error("error reading from {}: no bytes available", path.display())]
    EndOfFile { path: PathBuf },

    /// A structural invariant of the decoded content is violated.
    #[error("invalid content in {}: {reason}", path.display())]
    InvalidContent { path: PathBuf, reason: String },

    /// Stream failure outside the short-read cases (seek, metadata, line read).
    #[error("I/O error on {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
}

pub type Result<T> = std::result::Result<T, StorageError>;
