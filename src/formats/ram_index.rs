//! .ramIndex format - serialized spatial-index tree buffer
//!
//! `tree_size` fixed-size node records, back to back. There is no count
//! prefix: the size comes from the spatial-index subsystem's own metadata.
//! The node layout is owned by that subsystem too, so the decoder is
//! generic over any [`Record`] type — it only needs the record's size and
//! an opaque byte copy, never the field structure.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{Result, StorageError};
use crate::file::FileReader;
use crate::record::Record;

/// Bulk-read `buffer.len()` tree nodes into the caller-provided buffer.
pub fn read_ram_index<T: Record>(reader: &mut FileReader, buffer: &mut [T]) -> Result<()> {
    reader.read_into(buffer)
}

/// Write a `.ramIndex` file: the records, nothing else.
pub fn write<P: AsRef<Path>, T: Record>(path: P, nodes: &[T]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| StorageError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);

    let io_err = |source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    };

    for node in nodes {
        writer.write_all(&node.to_bytes()).map_err(io_err)?;
    }
    writer.flush().map_err(io_err)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    // Stand-in for the spatial-index subsystem's node type: this module
    // only sees its size and bytes.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    struct TreeNode {
        min_lon: i32,
        min_lat: i32,
        max_lon: i32,
        max_lat: i32,
        child: u32,
    }

    impl Record for TreeNode {
        const SIZE: usize = 20;

        fn decode(bytes: &[u8]) -> Self {
            Self {
                min_lon: i32::decode(&bytes[0..4]),
                min_lat: i32::decode(&bytes[4..8]),
                max_lon: i32::decode(&bytes[8..12]),
                max_lat: i32::decode(&bytes[12..16]),
                child: u32::decode(&bytes[16..20]),
            }
        }

        fn encode(&self, out: &mut Vec<u8>) {
            self.min_lon.encode(out);
            self.min_lat.encode(out);
            self.max_lon.encode(out);
            self.max_lat.encode(out);
            self.child.encode(out);
        }
    }

    #[test]
    fn test_roundtrip_with_external_size() {
        let nodes: Vec<TreeNode> = (0..5)
            .map(|i| TreeNode {
                min_lon: -i,
                min_lat: -2 * i,
                max_lon: i,
                max_lat: 2 * i,
                child: i as u32,
            })
            .collect();
        let tmp = NamedTempFile::new().unwrap();
        write(tmp.path(), &nodes).unwrap();

        // tree_size arrives from elsewhere; here it is implied by file size.
        let mut reader = FileReader::open(tmp.path(), false).unwrap();
        let tree_size = reader.byte_size().unwrap() as usize / TreeNode::SIZE;
        assert_eq!(tree_size, 5);

        let mut buffer = vec![TreeNode::default(); tree_size];
        read_ram_index(&mut reader, &mut buffer).unwrap();
        assert_eq!(buffer, nodes);
    }

    #[test]
    fn test_oversized_request_fails() {
        let tmp = NamedTempFile::new().unwrap();
        write(tmp.path(), &[TreeNode::default(); 2]).unwrap();

        let mut reader = FileReader::open(tmp.path(), false).unwrap();
        let mut buffer = vec![TreeNode::default(); 3];
        assert!(read_ram_index(&mut reader, &mut buffer).is_err());
    }
}
