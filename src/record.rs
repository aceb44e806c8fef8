//! Fixed-layout records
//!
//! Every on-disk structure in the artifact set is a sequence of fixed-size,
//! self-contained records: explicit little-endian fields, no padding, no
//! internal pointers. `Record` pins that layout down in code. Field-by-field
//! `to_le_bytes`/`from_le_bytes` means the in-memory representation never
//! leaks into the file; the declared `SIZE` is checked against the field
//! widths with const assertions at each impl site.

/// A fixed-size record with an explicit little-endian byte layout.
///
/// `decode` is only ever called with exactly `SIZE` bytes; `encode` must
/// append exactly `SIZE` bytes. The pair defines the on-disk contract a
/// writer must produce and a reader may rely on.
pub trait Record: Sized {
    const SIZE: usize;

    fn decode(bytes: &[u8]) -> Self;

    fn encode(&self, out: &mut Vec<u8>);

    fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::SIZE);
        self.encode(&mut out);
        out
    }
}

macro_rules! primitive_record {
    ($ty:ty) => {
        impl Record for $ty {
            const SIZE: usize = std::mem::size_of::<$ty>();

            fn decode(bytes: &[u8]) -> Self {
                let mut buf = [0u8; std::mem::size_of::<$ty>()];
                buf.copy_from_slice(&bytes[..Self::SIZE]);
                <$ty>::from_le_bytes(buf)
            }

            fn encode(&self, out: &mut Vec<u8>) {
                out.extend_from_slice(&self.to_le_bytes());
            }
        }
    };
}

primitive_record!(u8);
primitive_record!(u16);
primitive_record!(u32);
primitive_record!(u64);
primitive_record!(i32);
primitive_record!(i64);
primitive_record!(f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_roundtrip() {
        let bytes = 0xDEAD_BEEFu32.to_bytes();
        assert_eq!(bytes.len(), u32::SIZE);
        assert_eq!(u32::decode(&bytes), 0xDEAD_BEEF);

        let bytes = (-7i32).to_bytes();
        assert_eq!(i32::decode(&bytes), -7);

        let bytes = u64::MAX.to_bytes();
        assert_eq!(u64::decode(&bytes), u64::MAX);
    }

    #[test]
    fn test_little_endian_on_disk() {
        assert_eq!(0x0102_0304u32.to_bytes(), vec![0x04, 0x03, 0x02, 0x01]);
    }
}
