//! Sequential typed access over one artifact file
//!
//! `FileReader` is the single point where short reads and stream failures
//! are detected. It owns its cursor exclusively: the cursor only moves
//! forward through reads and skips, except for the save/seek/restore inside
//! `byte_size`. One handle, one owner — parallel decoding of a dataset uses
//! independent handles over the same paths.
//!
//! All reads are blocking. There is no timeout or cancellation here; a slow
//! filesystem blocks the calling thread and callers wrap their own policy
//! around that. The descriptor is released when the reader drops, on every
//! exit path.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use crate::error::{Result, StorageError};
use crate::fingerprint::{Dimension, Fingerprint};
use crate::record::Record;

#[derive(Debug)]
pub struct FileReader {
    path: PathBuf,
    stream: BufReader<File>,
}

impl FileReader {
    /// Open `path` for binary reading. With `check_fingerprint`, one
    /// [`Fingerprint`] is read immediately and validated against the
    /// running build across all dimensions; a mismatch on any one of them
    /// fails the open.
    pub fn open<P: AsRef<Path>>(path: P, check_fingerprint: bool) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|source| StorageError::Open {
            path: path.clone(),
            source,
        })?;
        let mut reader = Self {
            path,
            stream: BufReader::new(file),
        };

        if check_fingerprint {
            let loaded: Fingerprint = reader.read_one()?;
            if !loaded.matches(&Fingerprint::current(), &Dimension::ALL) {
                return Err(StorageError::FingerprintMismatch { path: reader.path });
            }
        }

        Ok(reader)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }

    /// Read exactly `total` bytes. Zero bytes available is reported
    /// distinctly from a partial read; neither ever yields a short buffer.
    fn fill_exact(&mut self, total: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; total];
        let mut filled = 0usize;
        while filled < total {
            match self.stream.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(source) => return Err(self.io_error(source)),
            }
        }

        if filled == 0 {
            Err(StorageError::EndOfFile {
                path: self.path.clone(),
            })
        } else if filled < total {
            Err(StorageError::TruncatedRead {
                path: self.path.clone(),
            })
        } else {
            Ok(buf)
        }
    }

    /// Bulk-read `dest.len()` records, advancing the cursor. No-op for an
    /// empty destination.
    pub fn read_into<T: Record>(&mut self, dest: &mut [T]) -> Result<()> {
        if dest.is_empty() {
            return Ok(());
        }
        let buf = self.fill_exact(dest.len() * T::SIZE)?;
        for (slot, chunk) in dest.iter_mut().zip(buf.chunks_exact(T::SIZE)) {
            *slot = T::decode(chunk);
        }
        Ok(())
    }

    /// Read a single record by copy.
    pub fn read_one<T: Record>(&mut self) -> Result<T> {
        let buf = self.fill_exact(T::SIZE)?;
        Ok(T::decode(&buf))
    }

    /// Advance the cursor past `element_count` records without copying.
    /// Seeking past end-of-file is not itself an error; only a subsequent
    /// read fails.
    pub fn skip<T: Record>(&mut self, element_count: u64) -> Result<()> {
        let span = element_count
            .checked_mul(T::SIZE as u64)
            .and_then(|bytes| i64::try_from(bytes).ok())
            .ok_or_else(|| StorageError::InvalidContent {
                path: self.path.clone(),
                reason: format!("skip of {element_count} records overflows the byte offset"),
            })?;
        self.stream
            .seek(SeekFrom::Current(span))
            .map_err(|e| self.io_error(e))?;
        Ok(())
    }

    /// Read the 8-byte element count that prefixes a variable-length artifact.
    pub fn read_element_count(&mut self) -> Result<u64> {
        self.read_one::<u64>()
    }

    /// 4-byte count variant used by the older table formats.
    pub fn read_element_count_u32(&mut self) -> Result<u32> {
        self.read_one::<u32>()
    }

    fn remaining_bytes(&mut self) -> Result<u64> {
        let current = self.stream.stream_position().map_err(|e| self.io_error(e))?;
        let end = self
            .stream
            .seek(SeekFrom::End(0))
            .map_err(|e| self.io_error(e))?;
        self.stream
            .seek(SeekFrom::Start(current))
            .map_err(|e| self.io_error(e))?;
        Ok(end.saturating_sub(current))
    }

    /// The length-prefix idiom: one u64 count, allocate exactly that many
    /// records, one bulk read. Allocation size and byte span are always
    /// derived from the same authoritative count.
    ///
    /// A count the file cannot possibly hold is corruption and fails before
    /// any allocation happens, so a damaged prefix cannot drive the process
    /// out of memory.
    pub fn read_vector<T: Record>(&mut self) -> Result<Vec<T>> {
        let count = self.read_element_count()?;
        if count == 0 {
            return Ok(Vec::new());
        }

        let span = count
            .checked_mul(T::SIZE as u64)
            .ok_or_else(|| StorageError::TruncatedRead {
                path: self.path.clone(),
            })?;
        let remaining = self.remaining_bytes()?;
        if span > remaining {
            if remaining == 0 {
                return Err(StorageError::EndOfFile {
                    path: self.path.clone(),
                });
            }
            return Err(StorageError::TruncatedRead {
                path: self.path.clone(),
            });
        }

        let buf = self.fill_exact(span as usize)?;
        let mut data = Vec::with_capacity(count as usize);
        for chunk in buf.chunks_exact(T::SIZE) {
            data.push(T::decode(chunk));
        }
        Ok(data)
    }

    /// Total file length in bytes. The read cursor is saved and restored.
    pub fn byte_size(&mut self) -> Result<u64> {
        let current = self.stream.stream_position().map_err(|e| self.io_error(e))?;
        let end = self
            .stream
            .seek(SeekFrom::End(0))
            .map_err(|e| self.io_error(e))?;
        self.stream
            .seek(SeekFrom::Start(current))
            .map_err(|e| self.io_error(e))?;
        Ok(end)
    }

    /// Read newline-delimited text until end-of-file. EOF terminates the
    /// loop normally; any other stream failure propagates.
    pub fn read_lines(&mut self) -> Result<Vec<String>> {
        let mut lines = Vec::new();
        loop {
            let mut line = String::new();
            let bytes = self
                .stream
                .read_line(&mut line)
                .map_err(|e| self.io_error(e))?;
            if bytes == 0 {
                break;
            }
            while line.ends_with('\n') || line.ends_with('\r') {
                line.pop();
            }
            lines.push(line);
        }
        Ok(lines)
    }
}
