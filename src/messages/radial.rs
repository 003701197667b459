//! Message 31 — Digital Radar Data Generic Format (User 3.2.4.17).
//!
//! A Message 31 is one radial: a fixed header, a build-dependent table of
//! data block pointers (discarded), and a counted sequence of typed data
//! blocks carrying volume/elevation/radial metadata and the moment data.

use std::fmt;
use std::io::Read;

use byteorder::{BigEndian, ReadBytesExt};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::messages::moments::DataMoment;
use crate::reader::{ascii_field, discard};

/// Radial status: first radial of an elevation scan.
pub const RADIAL_STATUS_START_OF_ELEVATION: u8 = 0;
/// Radial status: intermediate radial data.
pub const RADIAL_STATUS_INTERMEDIATE: u8 = 1;
/// Radial status: last radial of an elevation scan.
pub const RADIAL_STATUS_END_OF_ELEVATION: u8 = 2;
/// Radial status: first radial of a volume scan.
pub const RADIAL_STATUS_BEGINNING_OF_VOLUME: u8 = 3;
/// Radial status: last radial of a volume scan.
pub const RADIAL_STATUS_END_OF_VOLUME: u8 = 4;
/// Radial status: first radial of a new elevation which is the last in the volume.
pub const RADIAL_STATUS_START_NEW_ELEVATION: u8 = 5;

/// Fixed (non-data) portion of Message 31.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Message31Header {
    /// ICAO radar identifier, e.g. "KMPX".
    pub radar_identifier: [u8; 4],
    /// Radial collection time in milliseconds past midnight GMT.
    pub collection_time: u32,
    /// Current Julian date minus 2440586.5.
    pub collection_date: u16,
    /// Radial number within the elevation scan (1-based).
    pub azimuth_number: u16,
    /// Azimuth angle at which the radial was collected, degrees clockwise
    /// from north in `[0, 360)`.
    pub azimuth_angle: f32,
    /// Whether the message body is compressed. The data header block never is.
    pub compression_indicator: u8,
    pub spare: u8,
    /// Uncompressed length of the radial in bytes, including the data
    /// header block. Present but not validated against the block sizes.
    pub radial_length: u16,
    /// Azimuthal spacing code: 1 = 0.5 degrees, 2 = 1 degree.
    pub azimuth_resolution_spacing_code: u8,
    pub radial_status: u8,
    /// Elevation number within the volume scan (1-based).
    pub elevation_number: u8,
    pub cut_sector_number: u8,
    /// Elevation angle at which the radial was collected, degrees.
    pub elevation_angle: f32,
    pub radial_spot_blanking_status: u8,
    pub azimuth_indexing_mode: u8,
    /// Number of data blocks that follow the pointer table.
    pub data_block_count: u16,
}

impl Message31Header {
    /// Decodes the 32-byte fixed header. The pointer table that follows is
    /// handled by [`Message31::decode`] since its size is build-dependent.
    pub fn decode<R: Read>(reader: &mut R) -> Result<Self> {
        let mut radar_identifier = [0u8; 4];
        reader.read_exact(&mut radar_identifier)?;
        Ok(Self {
            radar_identifier,
            collection_time: reader.read_u32::<BigEndian>()?,
            collection_date: reader.read_u16::<BigEndian>()?,
            azimuth_number: reader.read_u16::<BigEndian>()?,
            azimuth_angle: reader.read_f32::<BigEndian>()?,
            compression_indicator: reader.read_u8()?,
            spare: reader.read_u8()?,
            radial_length: reader.read_u16::<BigEndian>()?,
            azimuth_resolution_spacing_code: reader.read_u8()?,
            radial_status: reader.read_u8()?,
            elevation_number: reader.read_u8()?,
            cut_sector_number: reader.read_u8()?,
            elevation_angle: reader.read_f32::<BigEndian>()?,
            radial_spot_blanking_status: reader.read_u8()?,
            azimuth_indexing_mode: reader.read_u8()?,
            data_block_count: reader.read_u16::<BigEndian>()?,
        })
    }

    /// The radar site identifier as a string.
    pub fn radar_identifier(&self) -> String {
        ascii_field(&self.radar_identifier)
    }

    /// Date and time this radial was collected.
    pub fn date(&self) -> DateTime<Utc> {
        DateTime::UNIX_EPOCH
            + Duration::milliseconds(
                i64::from(self.collection_date) * 86_400_000 + i64::from(self.collection_time),
            )
    }
}

impl fmt::Display for Message31Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Message 31 - {} @ {} deg={:.2} tilt={:.2}",
            self.radar_identifier(),
            self.date(),
            self.azimuth_angle,
            self.elevation_angle,
        )
    }
}

/// Volume-level metadata block (User 3.2.4.17.3).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeData {
    /// Size of the data block in bytes.
    pub lrtup: u16,
    pub version_major: u8,
    pub version_minor: u8,
    pub lat: f32,
    pub long: f32,
    pub site_height: u16,
    pub feedhorn_height: u16,
    pub calibration_constant: f32,
    pub shv_tx_power_hor: f32,
    pub shv_tx_power_ver: f32,
    pub system_differential_reflectivity: f32,
    pub initial_system_differential_phase: f32,
    pub volume_coverage_pattern_number: u16,
    pub processing_status: u16,
}

impl VolumeData {
    fn decode<R: Read>(reader: &mut R) -> Result<Self> {
        Ok(Self {
            lrtup: reader.read_u16::<BigEndian>()?,
            version_major: reader.read_u8()?,
            version_minor: reader.read_u8()?,
            lat: reader.read_f32::<BigEndian>()?,
            long: reader.read_f32::<BigEndian>()?,
            site_height: reader.read_u16::<BigEndian>()?,
            feedhorn_height: reader.read_u16::<BigEndian>()?,
            calibration_constant: reader.read_f32::<BigEndian>()?,
            shv_tx_power_hor: reader.read_f32::<BigEndian>()?,
            shv_tx_power_ver: reader.read_f32::<BigEndian>()?,
            system_differential_reflectivity: reader.read_f32::<BigEndian>()?,
            initial_system_differential_phase: reader.read_f32::<BigEndian>()?,
            volume_coverage_pattern_number: reader.read_u16::<BigEndian>()?,
            processing_status: reader.read_u16::<BigEndian>()?,
        })
    }
}

/// Elevation-level metadata block (User 3.2.4.17.4).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElevationData {
    /// Size of the data block in bytes.
    pub lrtup: u16,
    /// Atmospheric attenuation factor.
    pub atmos: [u8; 2],
    /// Scaling constant used by the signal processor for this elevation.
    pub calib_const: f32,
}

impl ElevationData {
    fn decode<R: Read>(reader: &mut R) -> Result<Self> {
        let lrtup = reader.read_u16::<BigEndian>()?;
        let mut atmos = [0u8; 2];
        reader.read_exact(&mut atmos)?;
        Ok(Self {
            lrtup,
            atmos,
            calib_const: reader.read_f32::<BigEndian>()?,
        })
    }
}

/// Radial-level metadata block (User 3.2.4.17.5).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadialData {
    /// Size of the data block in bytes.
    pub lrtup: u16,
    pub unambiguous_range: u16,
    pub noise_level_horz: f32,
    pub noise_level_vert: f32,
    pub nyquist_velocity: u16,
    pub spares: [u8; 2],
    pub calib_const_horz_chan: f32,
    pub calib_const_vert_chan: f32,
}

impl RadialData {
    fn decode<R: Read>(reader: &mut R) -> Result<Self> {
        let lrtup = reader.read_u16::<BigEndian>()?;
        let unambiguous_range = reader.read_u16::<BigEndian>()?;
        let noise_level_horz = reader.read_f32::<BigEndian>()?;
        let noise_level_vert = reader.read_f32::<BigEndian>()?;
        let nyquist_velocity = reader.read_u16::<BigEndian>()?;
        let mut spares = [0u8; 2];
        reader.read_exact(&mut spares)?;
        Ok(Self {
            lrtup,
            unambiguous_range,
            noise_level_horz,
            noise_level_vert,
            nyquist_velocity,
            spares,
            calib_const_horz_chan: reader.read_f32::<BigEndian>()?,
            calib_const_vert_chan: reader.read_f32::<BigEndian>()?,
        })
    }
}

/// One decoded radial.
#[derive(Debug, Clone, PartialEq)]
pub struct Message31 {
    pub header: Message31Header,
    pub volume_data: Option<VolumeData>,
    pub elevation_data: Option<ElevationData>,
    pub radial_data: Option<RadialData>,
    pub reflectivity: Option<DataMoment>,
    pub velocity: Option<DataMoment>,
    pub spectrum_width: Option<DataMoment>,
    pub differential_reflectivity: Option<DataMoment>,
    pub differential_phase: Option<DataMoment>,
    pub correlation_coefficient: Option<DataMoment>,
    pub clutter_filter_power: Option<DataMoment>,
}

/// Number of data block pointers preceding the data blocks, by RDA build.
fn pointer_count(build: f32) -> u64 {
    if build >= 19.0 {
        10
    } else {
        9
    }
}

impl Message31 {
    /// Decodes one Message 31 from `reader`.
    ///
    /// `build` is the RDA build number from the volume's status record; it
    /// sizes the data block pointer table. The message self-describes its
    /// length through `data_block_count` and the per-block sizes, so no
    /// trailing padding is consumed.
    pub fn decode<R: Read>(reader: &mut R, build: f32) -> Result<Self> {
        let header = Message31Header::decode(reader)?;

        // Data block pointers are unused; the blocks are read in order.
        discard(reader, pointer_count(build) * 4)?;

        let mut m31 = Self {
            header,
            volume_data: None,
            elevation_data: None,
            radial_data: None,
            reflectivity: None,
            velocity: None,
            spectrum_width: None,
            differential_reflectivity: None,
            differential_phase: None,
            correlation_coefficient: None,
            clutter_filter_power: None,
        };

        for _ in 0..header.data_block_count {
            let mut block = [0u8; 4];
            reader.read_exact(&mut block)?;

            // block[0] is the data block type; the 3-byte name dispatches.
            match &block[1..4] {
                b"VOL" => m31.volume_data = Some(VolumeData::decode(reader)?),
                b"ELV" => m31.elevation_data = Some(ElevationData::decode(reader)?),
                b"RAD" => m31.radial_data = Some(RadialData::decode(reader)?),
                b"REF" => m31.reflectivity = Some(DataMoment::decode(reader)?),
                b"VEL" => m31.velocity = Some(DataMoment::decode(reader)?),
                b"SW " => m31.spectrum_width = Some(DataMoment::decode(reader)?),
                b"ZDR" => m31.differential_reflectivity = Some(DataMoment::decode(reader)?),
                b"PHI" => m31.differential_phase = Some(DataMoment::decode(reader)?),
                b"RHO" => m31.correlation_coefficient = Some(DataMoment::decode(reader)?),
                b"CFP" => m31.clutter_filter_power = Some(DataMoment::decode(reader)?),
                name => {
                    return Err(Error::UnknownDataBlock {
                        name: String::from_utf8_lossy(name).into_owned(),
                    })
                }
            }
        }

        log::trace!(
            "    deg={:7.3} elv={:2} tilt={:5} gates={}",
            m31.header.azimuth_angle,
            m31.header.elevation_number,
            m31.header.elevation_angle,
            m31.reflectivity
                .as_ref()
                .map(|m| m.generic.number_data_moment_gates)
                .unwrap_or(0),
        );

        Ok(m31)
    }

    /// Azimuthal spacing between adjacent radials, in degrees.
    pub fn azimuth_resolution_spacing(&self) -> f32 {
        if self.header.azimuth_resolution_spacing_code == 1 {
            0.5
        } else {
            1.0
        }
    }
}
