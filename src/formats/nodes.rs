//! .nodes format - per-node coordinates and external identifiers
//!
//! Format (little-endian):
//!
//!   count:  u64
//!   count * NodeRecord (16 bytes):
//!     lon:  i32  // fixed-point 1e-7 degrees
//!     lat:  i32  // fixed-point 1e-7 degrees
//!     id:   u64  // node id in the source dataset
//!
//! Decoding splits each record into a coordinate and an external id; the
//! two output sequences grow in lock-step and are indexed identically.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{Result, StorageError};
use crate::file::FileReader;
use crate::record::Record;

/// Fixed-point scale: 1e-7 degrees per unit.
pub const COORDINATE_SCALE: f64 = 10_000_000.0;

const MAX_LON: i32 = 1_800_000_000;
const MAX_LAT: i32 = 900_000_000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Coordinate {
    pub lon: i32,
    pub lat: i32,
}

impl Coordinate {
    pub fn from_degrees(lon: f64, lat: f64) -> Self {
        Self {
            lon: (lon * COORDINATE_SCALE).round() as i32,
            lat: (lat * COORDINATE_SCALE).round() as i32,
        }
    }

    pub fn lon_degrees(&self) -> f64 {
        f64::from(self.lon) / COORDINATE_SCALE
    }

    pub fn lat_degrees(&self) -> f64 {
        f64::from(self.lat) / COORDINATE_SCALE
    }

    pub fn is_valid(&self) -> bool {
        self.lon >= -MAX_LON && self.lon <= MAX_LON && self.lat >= -MAX_LAT && self.lat <= MAX_LAT
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeRecord {
    pub lon: i32,
    pub lat: i32,
    pub id: u64,
}

impl NodeRecord {
    pub fn from_degrees(lon: f64, lat: f64, id: u64) -> Self {
        let coordinate = Coordinate::from_degrees(lon, lat);
        Self {
            lon: coordinate.lon,
            lat: coordinate.lat,
            id,
        }
    }
}

impl Record for NodeRecord {
    const SIZE: usize = 16;

    fn decode(bytes: &[u8]) -> Self {
        Self {
            lon: i32::decode(&bytes[0..4]),
            lat: i32::decode(&bytes[4..8]),
            id: u64::decode(&bytes[8..16]),
        }
    }

    fn encode(&self, out: &mut Vec<u8>) {
        self.lon.encode(out);
        self.lat.encode(out);
        self.id.encode(out);
    }
}

const _: () = assert!(NodeRecord::SIZE == 4 + 4 + 8);

/// Read `coordinate_count` node records, scattering coordinates into the
/// pre-sized `coordinates` buffer and appending external ids to `node_ids`.
/// Must be called after the count prefix has been consumed (the caller
/// sizes `coordinates` from it).
///
/// An out-of-range coordinate means the file is corrupt and fails the whole
/// decode; no partial result is left behind as success.
pub fn read_nodes(
    reader: &mut FileReader,
    coordinates: &mut [Coordinate],
    node_ids: &mut Vec<u64>,
    coordinate_count: u64,
) -> Result<()> {
    debug_assert_eq!(coordinates.len() as u64, coordinate_count);
    node_ids.reserve(coordinate_count as usize);

    for i in 0..coordinate_count as usize {
        let record: NodeRecord = reader.read_one()?;
        let coordinate = Coordinate {
            lon: record.lon,
            lat: record.lat,
        };
        if !coordinate.is_valid() {
            return Err(StorageError::InvalidContent {
                path: reader.path().to_path_buf(),
                reason: format!(
                    "node {i} has out-of-range coordinate (lon={}, lat={})",
                    record.lon, record.lat
                ),
            });
        }
        coordinates[i] = coordinate;
        node_ids.push(record.id);
    }

    Ok(())
}

/// Write a `.nodes` file: count prefix, then the records.
pub fn write<P: AsRef<Path>>(path: P, records: &[NodeRecord]) -> Result<()> {
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

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_roundtrip() {
        let records = vec![
            NodeRecord::from_degrees(1.0, 1.0, 10),
            NodeRecord::from_degrees(2.0, 2.0, 20),
            NodeRecord::from_degrees(3.0, 3.0, 30),
        ];
        let tmp = NamedTempFile::new().unwrap();
        write(tmp.path(), &records).unwrap();

        let mut reader = FileReader::open(tmp.path(), false).unwrap();
        let count = reader.read_element_count().unwrap();
        assert_eq!(count, 3);

        let mut coordinates = vec![Coordinate::default(); count as usize];
        let mut node_ids = Vec::new();
        read_nodes(&mut reader, &mut coordinates, &mut node_ids, count).unwrap();

        assert_eq!(
            coordinates,
            vec![
                Coordinate::from_degrees(1.0, 1.0),
                Coordinate::from_degrees(2.0, 2.0),
                Coordinate::from_degrees(3.0, 3.0),
            ]
        );
        assert_eq!(node_ids, vec![10, 20, 30]);
        assert!((coordinates[1].lon_degrees() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_out_of_range_coordinate_is_corrupt() {
        let records = vec![
            NodeRecord::from_degrees(4.5, 50.5, 1),
            NodeRecord {
                lon: MAX_LON + 1,
                lat: 0,
                id: 2,
            },
        ];
        let tmp = NamedTempFile::new().unwrap();
        write(tmp.path(), &records).unwrap();

        let mut reader = FileReader::open(tmp.path(), false).unwrap();
        let count = reader.read_element_count().unwrap();
        let mut coordinates = vec![Coordinate::default(); count as usize];
        let mut node_ids = Vec::new();
        let err = read_nodes(&mut reader, &mut coordinates, &mut node_ids, count).unwrap_err();
        assert!(matches!(err, StorageError::InvalidContent { .. }));
    }

    #[test]
    fn test_coordinate_range() {
        assert!(Coordinate::from_degrees(180.0, 90.0).is_valid());
        assert!(Coordinate::from_degrees(-180.0, -90.0).is_valid());
        assert!(!Coordinate {
            lon: 0,
            lat: MAX_LAT + 1
        }
        .is_valid());
    }
}
