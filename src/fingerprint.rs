//! Build fingerprint embedded in persisted artifacts
//!
//! Layout (20 bytes, little-endian):
//!
//!   magic:          u32 = 0x4B455354  // "KEST"
//!   graph_builder:  u32
//!   contractor:     u32
//!   spatial_index:  u32
//!   query_objects:  u32
//!
//! Each marker is bumped when the corresponding subsystem changes its
//! on-disk layout. A preprocessing build and a query-serving build agree on
//! an artifact only if every dimension the reader cares about matches;
//! version skew is a correctness hazard, so it surfaces as a structured
//! check result rather than a misdecoded buffer.

use crate::record::Record;

const MAGIC: u32 = 0x4B45_5354; // "KEST"

/// On-disk layout versions, one per producing subsystem.
const GRAPH_BUILDER_VERSION: u32 = 4;
const CONTRACTOR_VERSION: u32 = 2;
const SPATIAL_INDEX_VERSION: u32 = 3;
const QUERY_OBJECTS_VERSION: u32 = 2;

/// A layout dimension a reader may require to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    GraphBuilder,
    Contractor,
    SpatialIndex,
    QueryObjects,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::GraphBuilder,
        Dimension::Contractor,
        Dimension::SpatialIndex,
        Dimension::QueryObjects,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fingerprint {
    magic: u32,
    graph_builder: u32,
    contractor: u32,
    spatial_index: u32,
    query_objects: u32,
}

impl Fingerprint {
    /// The fingerprint of the running build. Pure, no I/O.
    pub fn current() -> Self {
        Self {
            magic: MAGIC,
            graph_builder: GRAPH_BUILDER_VERSION,
            contractor: CONTRACTOR_VERSION,
            spatial_index: SPATIAL_INDEX_VERSION,
            query_objects: QUERY_OBJECTS_VERSION,
        }
    }

    pub fn magic_ok(&self) -> bool {
        self.magic == MAGIC
    }

    /// True iff the magic number matches and every requested dimension
    /// agrees with `reference`. Never errors; the caller decides whether a
    /// `false` is fatal.
    pub fn matches(&self, reference: &Fingerprint, dimensions: &[Dimension]) -> bool {
        if !self.magic_ok() || self.magic != reference.magic {
            return false;
        }
        dimensions.iter().all(|dim| match dim {
            Dimension::GraphBuilder => self.graph_builder == reference.graph_builder,
            Dimension::Contractor => self.contractor == reference.contractor,
            Dimension::SpatialIndex => self.spatial_index == reference.spatial_index,
            Dimension::QueryObjects => self.query_objects == reference.query_objects,
        })
    }

    #[cfg(test)]
    pub(crate) fn with_magic(mut self, magic: u32) -> Self {
        self.magic = magic;
        self
    }

    #[cfg(test)]
    pub(crate) fn with_graph_builder(mut self, version: u32) -> Self {
        self.graph_builder = version;
        self
    }

    #[cfg(test)]
    pub(crate) fn with_spatial_index(mut self, version: u32) -> Self {
        self.spatial_index = version;
        self
    }
}

impl Record for Fingerprint {
    const SIZE: usize = 20;

    fn decode(bytes: &[u8]) -> Self {
        Self {
            magic: u32::decode(&bytes[0..4]),
            graph_builder: u32::decode(&bytes[4..8]),
            contractor: u32::decode(&bytes[8..12]),
            spatial_index: u32::decode(&bytes[12..16]),
            query_objects: u32::decode(&bytes[16..20]),
        }
    }

    fn encode(&self, out: &mut Vec<u8>) {
        self.magic.encode(out);
        self.graph_builder.encode(out);
        self.contractor.encode(out);
        self.spatial_index.encode(out);
        self.query_objects.encode(out);
    }
}

// magic + four u32 markers
const _: () = assert!(Fingerprint::SIZE == 4 + 4 * 4);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_matches_itself() {
        let current = Fingerprint::current();
        assert!(current.matches(&current, &Dimension::ALL));
        assert!(current.matches(&current, &[]));
    }

    #[test]
    fn test_magic_mismatch_fails_every_subset() {
        let current = Fingerprint::current();
        let bad = current.with_magic(0x2121_2121);
        assert!(!bad.matches(&current, &Dimension::ALL));
        assert!(!bad.matches(&current, &[Dimension::GraphBuilder]));
        // Even the empty dimension set requires a valid magic.
        assert!(!bad.matches(&current, &[]));
    }

    #[test]
    fn test_dimension_subset() {
        let current = Fingerprint::current();
        let drifted = current.with_spatial_index(999);
        assert!(!drifted.matches(&current, &Dimension::ALL));
        assert!(!drifted.matches(&current, &[Dimension::SpatialIndex]));
        // A reader that only cares about the graph layout accepts it.
        assert!(drifted.matches(&current, &[Dimension::GraphBuilder]));
        assert!(drifted.matches(&current, &[Dimension::GraphBuilder, Dimension::Contractor]));
    }

    #[test]
    fn test_graph_builder_drift_ignorable() {
        let current = Fingerprint::current();
        let drifted = current.with_graph_builder(1);
        assert!(!drifted.matches(&current, &[Dimension::GraphBuilder]));
        assert!(drifted.matches(&current, &[Dimension::SpatialIndex, Dimension::QueryObjects]));
    }

    #[test]
    fn test_roundtrip() {
        let current = Fingerprint::current();
        let bytes = current.to_bytes();
        assert_eq!(bytes.len(), Fingerprint::SIZE);
        assert_eq!(Fingerprint::decode(&bytes), current);
    }
}
