//! .hsgr format - contracted routing graph (adjacency arrays)
//!
//! Format (little-endian):
//!
//! Fingerprint (20 bytes)
//!
//! Header (20 bytes):
//!   checksum:    u32  // connectivity checksum from graph preparation, opaque here
//!   node_count:  u64
//!   edge_count:  u64
//!
//! Body:
//!   node_count * NodeArrayEntry (4 bytes):
//!     first_edge:  u32
//!   edge_count * EdgeArrayEntry (13 bytes):
//!     target:  u32
//!     id:      u32  // middle node for shortcuts, original-edge id otherwise
//!     weight:  i32
//!     flags:   u8   // bit 0 forward, bit 1 backward, bit 2 shortcut

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::crc;
use crate::error::{Result, StorageError};
use crate::file::FileReader;
use crate::fingerprint::{Dimension, Fingerprint};
use crate::record::Record;

pub const FLAG_FORWARD: u8 = 1 << 0;
pub const FLAG_BACKWARD: u8 = 1 << 1;
pub const FLAG_SHORTCUT: u8 = 1 << 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphHeader {
    pub checksum: u32,
    pub node_count: u64,
    pub edge_count: u64,
}

impl Record for GraphHeader {
    const SIZE: usize = 20;

    fn decode(bytes: &[u8]) -> Self {
        Self {
            checksum: u32::decode(&bytes[0..4]),
            node_count: u64::decode(&bytes[4..12]),
            edge_count: u64::decode(&bytes[12..20]),
        }
    }

    fn encode(&self, out: &mut Vec<u8>) {
        self.checksum.encode(out);
        self.node_count.encode(out);
        self.edge_count.encode(out);
    }
}

const _: () = assert!(GraphHeader::SIZE == 4 + 8 + 8);

/// One entry of the node adjacency array: the index of the node's first
/// outgoing edge in the edge array.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeArrayEntry {
    pub first_edge: u32,
}

impl Record for NodeArrayEntry {
    const SIZE: usize = 4;

    fn decode(bytes: &[u8]) -> Self {
        Self {
            first_edge: u32::decode(&bytes[0..4]),
        }
    }

    fn encode(&self, out: &mut Vec<u8>) {
        self.first_edge.encode(out);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeArrayEntry {
    pub target: u32,
    pub id: u32,
    pub weight: i32,
    pub flags: u8,
}

impl EdgeArrayEntry {
    pub fn forward(&self) -> bool {
        self.flags & FLAG_FORWARD != 0
    }

    pub fn backward(&self) -> bool {
        self.flags & FLAG_BACKWARD != 0
    }

    pub fn is_shortcut(&self) -> bool {
        self.flags & FLAG_SHORTCUT != 0
    }
}

impl Record for EdgeArrayEntry {
    const SIZE: usize = 13;

    fn decode(bytes: &[u8]) -> Self {
        Self {
            target: u32::decode(&bytes[0..4]),
            id: u32::decode(&bytes[4..8]),
            weight: i32::decode(&bytes[8..12]),
            flags: bytes[12],
        }
    }

    fn encode(&self, out: &mut Vec<u8>) {
        self.target.encode(out);
        self.id.encode(out);
        self.weight.encode(out);
        out.push(self.flags);
    }
}

const _: () = assert!(EdgeArrayEntry::SIZE == 4 + 4 + 4 + 1);

/// Connectivity checksum over the encoded edge array, as stored in the
/// header by the writer.
pub fn graph_checksum(edges: &[EdgeArrayEntry]) -> u32 {
    let mut digest = crc::Digest::new();
    for edge in edges {
        digest.update(&edge.to_bytes());
    }
    digest.finalize()
}

/// Read the fingerprint and header of a `.hsgr` file.
///
/// A graph-builder version drift here is tolerated with a warning rather
/// than failing the load: the payload is self-describing by count, and
/// operators regenerate on their own schedule. This is deliberately looser
/// than the all-dimensions check [`FileReader::open`] applies to the other
/// artifacts.
///
/// A zero node count is a corrupt file, not a recoverable condition.
pub fn read_header(reader: &mut FileReader) -> Result<GraphHeader> {
    let loaded: Fingerprint = reader.read_one()?;
    if !loaded.matches(&Fingerprint::current(), &[Dimension::GraphBuilder]) {
        tracing::warn!(
            path = %reader.path().display(),
            ".hsgr was prepared with a different build; reprocess to get rid of this warning"
        );
    }

    let checksum: u32 = reader.read_one()?;
    let node_count: u64 = reader.read_one()?;
    let edge_count: u64 = reader.read_one()?;

    if node_count == 0 {
        return Err(StorageError::InvalidContent {
            path: reader.path().to_path_buf(),
            reason: "graph header reports zero nodes".to_string(),
        });
    }
    // edge_count == 0 is fine, degenerate graphs occur in test fixtures

    Ok(GraphHeader {
        checksum,
        node_count,
        edge_count,
    })
}

/// Read the adjacency arrays following the header, into buffers the caller
/// pre-sized from the header counts. Must be called right after
/// [`read_header`] so the cursor sits at the node array.
pub fn read_arrays(
    reader: &mut FileReader,
    header: &GraphHeader,
    node_buffer: &mut [NodeArrayEntry],
    edge_buffer: &mut [EdgeArrayEntry],
) -> Result<()> {
    debug_assert_eq!(node_buffer.len() as u64, header.node_count);
    debug_assert_eq!(edge_buffer.len() as u64, header.edge_count);
    reader.read_into(node_buffer)?;
    reader.read_into(edge_buffer)?;
    Ok(())
}

/// Write a `.hsgr` file: current-build fingerprint, header, arrays.
pub fn write<P: AsRef<Path>>(
    path: P,
    checksum: u32,
    nodes: &[NodeArrayEntry],
    edges: &[EdgeArrayEntry],
) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| StorageError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);

    let header = GraphHeader {
        checksum,
        node_count: nodes.len() as u64,
        edge_count: edges.len() as u64,
    };

    let io_err = |source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    };

    writer
        .write_all(&Fingerprint::current().to_bytes())
        .map_err(io_err)?;
    writer.write_all(&header.to_bytes()).map_err(io_err)?;
    for node in nodes {
        writer.write_all(&node.to_bytes()).map_err(io_err)?;
    }
    for edge in edges {
        writer.write_all(&edge.to_bytes()).map_err(io_err)?;
    }
    writer.flush().map_err(io_err)?;

    Ok(())
}
