//! .datasource_indexes / .datasource_names formats
//!
//! `.datasource_indexes` (little-endian): count u64, then count single-byte
//! indices mapping each geometry segment to the datasource it came from.
//!
//! `.datasource_names` is newline-delimited UTF-8, one datasource name per
//! line. Decoding flattens the lines into one character buffer with
//! parallel offset/length tables, one pair per line.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{Result, StorageError};
use crate::file::FileReader;

/// Flattened name table: `offsets[i]..offsets[i] + lengths[i]` is the byte
/// window of name `i` inside `names`. The windows are contiguous and
/// non-overlapping by construction.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DatasourceNames {
    pub names: Vec<u8>,
    pub offsets: Vec<usize>,
    pub lengths: Vec<usize>,
}

impl DatasourceNames {
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        let offset = *self.offsets.get(index)?;
        let length = *self.lengths.get(index)?;
        std::str::from_utf8(&self.names[offset..offset + length]).ok()
    }
}

/// Read the count-prefixed byte sequence of a `.datasource_indexes` file.
pub fn read_indexes(reader: &mut FileReader) -> Result<Vec<u8>> {
    reader.read_vector::<u8>()
}

/// Read a `.datasource_names` file into the flattened table.
pub fn read_names(reader: &mut FileReader) -> Result<DatasourceNames> {
    let mut table = DatasourceNames::default();
    for line in reader.read_lines()? {
        table.offsets.push(table.names.len());
        table.lengths.push(line.len());
        table.names.extend_from_slice(line.as_bytes());
    }
    Ok(table)
}

/// Write a `.datasource_indexes` file.
pub fn write_indexes<P: AsRef<Path>>(path: P, indexes: &[u8]) -> Result<()> {
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
        .write_all(&(indexes.len() as u64).to_le_bytes())
        .map_err(io_err)?;
    writer.write_all(indexes).map_err(io_err)?;
    writer.flush().map_err(io_err)?;

    Ok(())
}

/// Write a `.datasource_names` file, one name per line.
pub fn write_names<P: AsRef<Path>>(path: P, names: &[&str]) -> Result<()> {
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

    for name in names {
        writer.write_all(name.as_bytes()).map_err(io_err)?;
        writer.write_all(b"\n").map_err(io_err)?;
    }
    writer.flush().map_err(io_err)?;

    Ok(())
}
