//! .edges format - per-edge metadata from the uncontracted source graph
//!
//! Format (little-endian):
//!
//!   count:  u64
//!   count * EdgeMetadataRecord (16 bytes):
//!     via_geometry:       u32
//!     name_id:            u32
//!     turn_instruction:   u8
//!     lane_data_id:       u16
//!     travel_mode:        u8
//!     entry_class_id:     u16
//!     pre_turn_bearing:   u8
//!     post_turn_bearing:  u8
//!
//! The file is row-major; decoding transposes into column-major parallel
//! vectors so the query engine gets dense per-field access. Index `i`
//! across every column comes from source record `i`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{Result, StorageError};
use crate::file::FileReader;
use crate::record::Record;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeMetadataRecord {
    pub via_geometry: u32,
    pub name_id: u32,
    pub turn_instruction: u8,
    pub lane_data_id: u16,
    pub travel_mode: u8,
    pub entry_class_id: u16,
    pub pre_turn_bearing: u8,
    pub post_turn_bearing: u8,
}

impl Record for EdgeMetadataRecord {
    const SIZE: usize = 16;

    fn decode(bytes: &[u8]) -> Self {
        Self {
            via_geometry: u32::decode(&bytes[0..4]),
            name_id: u32::decode(&bytes[4..8]),
            turn_instruction: bytes[8],
            lane_data_id: u16::decode(&bytes[9..11]),
            travel_mode: bytes[11],
            entry_class_id: u16::decode(&bytes[12..14]),
            pre_turn_bearing: bytes[14],
            post_turn_bearing: bytes[15],
        }
    }

    fn encode(&self, out: &mut Vec<u8>) {
        self.via_geometry.encode(out);
        self.name_id.encode(out);
        out.push(self.turn_instruction);
        self.lane_data_id.encode(out);
        out.push(self.travel_mode);
        self.entry_class_id.encode(out);
        out.push(self.pre_turn_bearing);
        out.push(self.post_turn_bearing);
    }
}

const _: () = assert!(EdgeMetadataRecord::SIZE == 4 + 4 + 1 + 2 + 1 + 2 + 1 + 1);

/// Column-major destination for the edge metadata table. All columns stay
/// index-aligned: position `i` everywhere describes edge `i`.
#[derive(Debug, Default)]
pub struct EdgeColumns {
    pub geometry_ids: Vec<u32>,
    pub name_ids: Vec<u32>,
    pub turn_instructions: Vec<u8>,
    pub lane_data_ids: Vec<u16>,
    pub travel_modes: Vec<u8>,
    pub entry_class_ids: Vec<u16>,
    pub pre_turn_bearings: Vec<u8>,
    pub post_turn_bearings: Vec<u8>,
}

impl EdgeColumns {
    /// Pre-sized columns, ready to be scattered into.
    pub fn preallocated(edge_count: usize) -> Self {
        Self {
            geometry_ids: vec![0; edge_count],
            name_ids: vec![0; edge_count],
            turn_instructions: vec![0; edge_count],
            lane_data_ids: vec![0; edge_count],
            travel_modes: vec![0; edge_count],
            entry_class_ids: vec![0; edge_count],
            pre_turn_bearings: vec![0; edge_count],
            post_turn_bearings: vec![0; edge_count],
        }
    }

    pub fn len(&self) -> usize {
        self.geometry_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.geometry_ids.is_empty()
    }
}

/// Read `edge_count` metadata records, scattering each record's fields into
/// the pre-sized columns at matching index. Must be called after the count
/// prefix has been consumed (the caller sizes `columns` from it).
pub fn read_edges(
    reader: &mut FileReader,
    columns: &mut EdgeColumns,
    edge_count: u64,
) -> Result<()> {
    debug_assert_eq!(columns.len() as u64, edge_count);

    for i in 0..edge_count as usize {
        let record: EdgeMetadataRecord = reader.read_one()?;
        columns.geometry_ids[i] = record.via_geometry;
        columns.name_ids[i] = record.name_id;
        columns.turn_instructions[i] = record.turn_instruction;
        columns.lane_data_ids[i] = record.lane_data_id;
        columns.travel_modes[i] = record.travel_mode;
        columns.entry_class_ids[i] = record.entry_class_id;
        columns.pre_turn_bearings[i] = record.pre_turn_bearing;
        columns.post_turn_bearings[i] = record.post_turn_bearing;
    }

    Ok(())
}

/// Write a `.edges` file: count prefix, then the records.
pub fn write<P: AsRef<Path>>(path: P, records: &[EdgeMetadataRecord]) -> Result<()> {
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

    writer
        .write_all(&(records.len() as u64).to_le_bytes())
        .map_err(io_err)?;
    for record in records {
        writer.write_all(&record.to_bytes()).map_err(io_err)?;
    }
    writer.flush().map_err(io_err)?;

    Ok(())
}
