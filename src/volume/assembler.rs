//! Parallel chunk ingestion.
//!
//! Real-time feeds deliver a volume as chunked objects: the first chunk
//! holds the volume header and the metadata LDM record, and each later
//! chunk is a standalone LDM record. Chunks after the first may arrive and
//! decode in any order, on any thread; only the merge into the volume is
//! serialized.

use std::io::Read;
use std::sync::{Mutex, PoisonError};

use crate::error::Result;
use crate::volume::record::load_ldm_record;
use crate::volume::{Volume, VolumeHeader, VolumeState};

/// Accumulates a volume from concurrently decoded LDM records.
///
/// Parsing happens outside the lock; the lock is held only while a fully
/// decoded record is merged. A chunk that fails to decode returns its error
/// to the caller and leaves previously merged chunks intact.
#[derive(Debug)]
pub struct VolumeAssembler {
    header: VolumeHeader,
    state: Mutex<VolumeState>,
}

impl VolumeAssembler {
    /// Initializes the assembler from the header chunk.
    ///
    /// The chunk is decoded in sequential mode, so it may carry any number
    /// of LDM records; it must carry the Message 2 that sets the build
    /// number before any radial chunk can be framed.
    pub fn from_header_chunk<R: Read>(reader: R) -> Result<Self> {
        let (header, state) = Volume::decode(reader)?.into_parts();
        Ok(Self {
            header,
            state: Mutex::new(state),
        })
    }

    /// Loads one LDM record from `reader` and merges it into the volume.
    ///
    /// Safe to call concurrently from multiple threads. A stream with a
    /// clean EOF at the length word merges nothing. Radial ordering within
    /// the record is preserved; ordering across chunks is not.
    pub fn add_ldm_record<R: Read>(&self, mut reader: R) -> Result<()> {
        let build = self.lock().build();
        let Some(record) = load_ldm_record(&mut reader, build)? else {
            return Ok(());
        };
        self.lock().merge(record, None);
        Ok(())
    }

    /// The volume header from the header chunk.
    pub fn header(&self) -> &VolumeHeader {
        &self.header
    }

    /// The RDA build number, once the metadata record has been merged.
    pub fn build_number(&self) -> Option<f32> {
        self.lock().build()
    }

    /// Finishes ingestion and returns the read-only volume.
    pub fn into_volume(self) -> Volume {
        let state = self
            .state
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        Volume::from_parts(self.header, state)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VolumeState> {
        // Merges do not panic; recover the state if a holder ever did.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
