//! CRC-32 checksum utilities
//!
//! The contracted-graph header stores a connectivity checksum computed by
//! the writer over the encoded edge array. The loader carries it opaquely;
//! only the writer side computes it.

use crc::{Crc, CRC_32_ISO_HDLC};

/// CRC-32/ISO-HDLC algorithm
pub const CRC32: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

/// Compute a CRC-32 checksum for a byte slice
pub fn checksum(data: &[u8]) -> u32 {
    CRC32.checksum(data)
}

/// Incremental CRC-32 digest
pub struct Digest {
    digest: crc::Digest<'static, u32>,
}

impl Digest {
    pub fn new() -> Self {
        Self {
            digest: CRC32.digest(),
        }
    }

    pub fn update(&mut self, data: &[u8]) {
        self.digest.update(data);
    }

    pub fn finalize(self) -> u32 {
        self.digest.finalize()
    }
}

impl Default for Digest {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_check_value() {
        // CRC-32/ISO-HDLC check value for the standard test vector.
        assert_eq!(checksum(b"123456789"), 0xCBF4_3926);
        assert_eq!(checksum(b""), 0);
    }

    #[test]
    fn test_incremental_matches_one_shot() {
        let mut digest = Digest::new();
        for chunk in [&b"edge "[..], b"array ", b"bytes"] {
            digest.update(chunk);
        }
        assert_eq!(digest.finalize(), checksum(b"edge array bytes"));
    }
}
