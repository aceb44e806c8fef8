//! .timestamp format - opaque data-version blob
//!
//! Raw bytes, no structure; the length is the file size. Typically a short
//! UTF-8 string naming the source data snapshot, but this layer does not
//! interpret it.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{Result, StorageError};
use crate::file::FileReader;

/// Fill `timestamp` from the file. The caller sizes the buffer with
/// [`FileReader::byte_size`].
pub fn read_timestamp(reader: &mut FileReader, timestamp: &mut [u8]) -> Result<()> {
    reader.read_into(timestamp)
}

/// Read the whole file, sizing the buffer from the file length.
pub fn read_all(reader: &mut FileReader) -> Result<Vec<u8>> {
    let length = reader.byte_size()?;
    let mut timestamp = vec![0u8; length as usize];
    read_timestamp(reader, &mut timestamp)?;
    Ok(timestamp)
}

/// Write a `.timestamp` file.
pub fn write<P: AsRef<Path>>(path: P, timestamp: &[u8]) -> Result<()> {
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

    writer.write_all(timestamp).map_err(io_err)?;
    writer.flush().map_err(io_err)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_roundtrip() {
        let tmp = NamedTempFile::new().unwrap();
        write(tmp.path(), b"2026-08-01T00:00:00Z planet-v2").unwrap();

        let mut reader = FileReader::open(tmp.path(), false).unwrap();
        let loaded = read_all(&mut reader).unwrap();
        assert_eq!(loaded, b"2026-08-01T00:00:00Z planet-v2");
    }

    #[test]
    fn test_empty_file() {
        let tmp = NamedTempFile::new().unwrap();
        write(tmp.path(), b"").unwrap();

        let mut reader = FileReader::open(tmp.path(), false).unwrap();
        assert!(read_all(&mut reader).unwrap().is_empty());
    }
}
