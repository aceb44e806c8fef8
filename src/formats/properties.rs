//! .properties format - scalar profile properties
//!
//! Format (little-endian): exactly one 18-byte record, no count prefix.
//!
//!   traffic_signal_penalty_ds:      i32  // deciseconds
//!   u_turn_penalty_ds:              i32  // deciseconds
//!   max_speed_for_map_matching:     f64  // meters per second
//!   continue_straight_at_waypoint:  u8   // bool
//!   use_turn_restrictions:          u8   // bool

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{Result, StorageError};
use crate::file::FileReader;
use crate::record::Record;

/// The record count is a property of the format, not of any file's content.
pub const PROPERTIES_COUNT: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalarProperties {
    pub traffic_signal_penalty_ds: i32,
    pub u_turn_penalty_ds: i32,
    pub max_speed_for_map_matching: f64,
    pub continue_straight_at_waypoint: bool,
    pub use_turn_restrictions: bool,
}

impl Default for ScalarProperties {
    fn default() -> Self {
        Self {
            traffic_signal_penalty_ds: 0,
            u_turn_penalty_ds: 0,
            max_speed_for_map_matching: 0.0,
            continue_straight_at_waypoint: true,
            use_turn_restrictions: false,
        }
    }
}

impl Record for ScalarProperties {
    const SIZE: usize = 18;

    fn decode(bytes: &[u8]) -> Self {
        Self {
            traffic_signal_penalty_ds: i32::decode(&bytes[0..4]),
            u_turn_penalty_ds: i32::decode(&bytes[4..8]),
            max_speed_for_map_matching: f64::decode(&bytes[8..16]),
            continue_straight_at_waypoint: bytes[16] != 0,
            use_turn_restrictions: bytes[17] != 0,
        }
    }

    fn encode(&self, out: &mut Vec<u8>) {
        self.traffic_signal_penalty_ds.encode(out);
        self.u_turn_penalty_ds.encode(out);
        self.max_speed_for_map_matching.encode(out);
        out.push(u8::from(self.continue_straight_at_waypoint));
        out.push(u8::from(self.use_turn_restrictions));
    }
}

const _: () = assert!(ScalarProperties::SIZE == 4 + 4 + 8 + 1 + 1);

/// Read the fixed [`PROPERTIES_COUNT`] records into the caller's buffer.
pub fn read_properties(reader: &mut FileReader, properties: &mut ScalarProperties) -> Result<()> {
    let mut records = [ScalarProperties::default(); PROPERTIES_COUNT];
    reader.read_into(&mut records)?;
    *properties = records[0];
    Ok(())
}

/// Write a `.properties` file.
pub fn write<P: AsRef<Path>>(path: P, properties: &ScalarProperties) -> Result<()> {
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

    writer.write_all(&properties.to_bytes()).map_err(io_err)?;
    writer.flush().map_err(io_err)?;

    Ok(())
}
