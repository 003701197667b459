//! Volume assembly: the decoded, in-memory form of an Archive II file.
//!
//! A volume is a 24-byte header followed by LDM compressed records: one
//! metadata record (whose Message 2 carries the RDA build number), then
//! data records of Message 31 radials. Sequential decode reads the whole
//! stream in order; chunked ingest decodes records in parallel and merges
//! them through [`VolumeAssembler`].

mod assembler;
mod header;
mod record;

pub use assembler::VolumeAssembler;
pub use header::{VolumeHeader, VOLUME_HEADER_LENGTH};
pub use record::{load_ldm_record, LdmRecord, LoadedRecord};

use std::collections::BTreeMap;
use std::io::Read;

use crate::error::Result;
use crate::messages::{Message2, Message3, Message31};

/// Radials grouped by elevation number (1-based), in collection order.
pub type ElevationScans = BTreeMap<u8, Vec<Message31>>;

/// Mutable accumulator shared by sequential decode and chunked ingest.
#[derive(Debug, Default)]
pub(crate) struct VolumeState {
    build: Option<f32>,
    status: Option<Message2>,
    performance: Option<Message3>,
    records: Vec<LdmRecord>,
    offsets: Vec<u64>,
    scans: ElevationScans,
}

impl VolumeState {
    /// Merges a loaded record into the volume.
    ///
    /// `offset` is the record's byte offset in the outer stream, known only
    /// in sequential mode; chunk records have no position in a single
    /// stream and contribute radials and first-wins slots only.
    pub(crate) fn merge(&mut self, record: LoadedRecord, offset: Option<u64>) {
        if let Some(m2) = record.status {
            if self.build.is_none() {
                self.build = Some(m2.build_number());
            }
            if self.status.is_none() {
                self.status = Some(m2);
            }
        }
        if self.performance.is_none() {
            if let Some(ref m3) = record.performance {
                self.performance = Some(m3.clone());
            }
        }
        if let Some(offset) = offset {
            self.records.push(record.ldm());
            self.offsets.push(offset);
        }
        for radial in record.radials {
            self.scans
                .entry(radial.header.elevation_number)
                .or_default()
                .push(radial);
        }
    }

    pub(crate) fn build(&self) -> Option<f32> {
        self.build
    }
}

/// A decoded Archive II volume.
///
/// Produced by [`Volume::decode`] or [`VolumeAssembler::into_volume`] and
/// read-only afterwards.
#[derive(Debug)]
pub struct Volume {
    header: VolumeHeader,
    state: VolumeState,
}

impl Volume {
    /// Decodes a complete volume from `reader` in sequential mode.
    ///
    /// Reads the volume header, then LDM records until a clean EOF. Any
    /// decode error aborts; no partial volume is returned.
    pub fn decode<R: Read>(mut reader: R) -> Result<Self> {
        let header = VolumeHeader::decode(&mut reader)?;
        log::info!("{}", header.filename());

        let mut state = VolumeState::default();
        let mut offset = VOLUME_HEADER_LENGTH;
        while let Some(record) = load_ldm_record(&mut reader, state.build())? {
            let advance = 4 + record.size as u64;
            state.merge(record, Some(offset));
            offset += advance;
        }

        Ok(Self { header, state })
    }

    pub(crate) fn from_parts(header: VolumeHeader, state: VolumeState) -> Self {
        Self { header, state }
    }

    pub(crate) fn into_parts(self) -> (VolumeHeader, VolumeState) {
        (self.header, self.state)
    }

    /// The volume header record.
    pub fn header(&self) -> &VolumeHeader {
        &self.header
    }

    /// The radar status record: the first Message 2 encountered.
    pub fn status(&self) -> Option<&Message2> {
        self.state.status.as_ref()
    }

    /// The raw performance/maintenance record, if one was present.
    pub fn performance(&self) -> Option<&Message3> {
        self.state.performance.as_ref()
    }

    /// The RDA build number from the radar status record.
    pub fn build_number(&self) -> Option<f32> {
        self.state.build
    }

    /// All radials, grouped by elevation number.
    pub fn scans(&self) -> &ElevationScans {
        &self.state.scans
    }

    /// The radials of one elevation scan, in collection order.
    pub fn sweep(&self, elevation: u8) -> Option<&[Message31]> {
        self.state.scans.get(&elevation).map(Vec::as_slice)
    }

    /// LDM record framing, in outer-stream order (sequential mode only).
    pub fn records(&self) -> &[LdmRecord] {
        &self.state.records
    }

    /// Outer-stream byte offset of each LDM record, starting at 24.
    ///
    /// Indices align with [`Volume::records`].
    pub fn record_offsets(&self) -> &[u64] {
        &self.state.offsets
    }
}
