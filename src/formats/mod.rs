//! Per-artifact decoders and their symmetric writers
//!
//! One module per file kind. Every decoder is built only from
//! [`crate::file::FileReader`] and [`crate::fingerprint::Fingerprint`];
//! all I/O failures propagate unchanged, and no decoder returns a
//! half-populated buffer as success.

pub mod crc;
pub mod datasource;
pub mod edges;
pub mod hsgr;
pub mod nodes;
pub mod properties;
pub mod ram_index;
pub mod timestamp;

pub use datasource::DatasourceNames;
pub use edges::{EdgeColumns, EdgeMetadataRecord};
pub use hsgr::{EdgeArrayEntry, GraphHeader, NodeArrayEntry};
pub use nodes::{Coordinate, NodeRecord};
pub use properties::{ScalarProperties, PROPERTIES_COUNT};
