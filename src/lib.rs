//! Binary artifact storage layer for the Kestrel routing engine
//!
//! The preprocessing pipeline writes a set of binary files once; the
//! long-running query service loads them repeatedly. This crate is the
//! reader side of that contract: a typed bulk-I/O primitive
//! ([`FileReader`]), a build fingerprint embedded in every file
//! ([`Fingerprint`]), and one decoder per artifact kind under [`formats`].
//!
//! The layer validates sizes, counts, and build identity deterministically —
//! truncation, version skew, and malformed headers all surface as
//! [`StorageError`]. It never interprets the semantic meaning of decoded
//! values; that belongs to the graph, spatial-index, and query subsystems.

pub mod error;
pub mod file;
pub mod fingerprint;
pub mod formats;
pub mod record;

pub use error::{Result, StorageError};
pub use file::FileReader;
pub use fingerprint::{Dimension, Fingerprint};
pub use record::Record;
