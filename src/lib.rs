//! Decoder for NEXRAD Level II (Archive II) weather radar volume files.
//!
//! Archive II is the raw output of WSR-88D radars: a volume header, then a
//! sequence of bzip2-compressed LDM records carrying radar messages. This
//! crate decodes volumes from whole files, partial streams, or real-time
//! chunk feeds into a structured in-memory representation:
//!
//! - [`Volume::decode`] for whole-file sequential decoding
//! - [`VolumeAssembler`] for parallel per-chunk ingestion
//! - [`ElevationScans`] mapping elevation numbers to decoded radials
//!
//! Documents referenced throughout:
//! - RDA/RPG ICD: <https://www.roc.noaa.gov/wsr88d/PublicDocs/ICDs/2620002T.pdf>
//! - User ICD: <https://www.roc.noaa.gov/wsr88d/PublicDocs/ICDs/2620010H.pdf>
//!
//! RDA builds 18.00 and newer are supported. Message types 2 (RDA status)
//! and 31 (digital radar data) are decoded; type 3 (performance data) is
//! captured raw; everything else is skipped. The crate performs no IO
//! beyond the caller-supplied reader and installs no logger: diagnostics go
//! through the `log` facade and errors are returned, never fatal.

mod error;
mod messages;
mod reader;
mod volume;

pub use error::{Error, Result};
pub use messages::{
    scale_value, DataMoment, ElevationData, GenericDataMoment, Message2, Message3, Message31,
    Message31Header, MessageHeader, RadialData, VolumeData, BELOW_THRESHOLD,
    DEFAULT_METADATA_RECORD_LENGTH, LEGACY_CTM_HEADER_LENGTH, MESSAGE_HEADER_LENGTH,
    RADIAL_STATUS_BEGINNING_OF_VOLUME, RADIAL_STATUS_END_OF_ELEVATION,
    RADIAL_STATUS_END_OF_VOLUME, RADIAL_STATUS_INTERMEDIATE, RADIAL_STATUS_START_NEW_ELEVATION,
    RADIAL_STATUS_START_OF_ELEVATION, RANGE_FOLDED,
};
pub use volume::{
    load_ldm_record, ElevationScans, LdmRecord, LoadedRecord, Volume, VolumeAssembler,
    VolumeHeader, VOLUME_HEADER_LENGTH,
};
