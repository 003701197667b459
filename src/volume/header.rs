//! Volume header record for Archive II data streams (RDA/RPG 7.3.3).

use std::fmt;
use std::io::Read;

use byteorder::{BigEndian, ReadBytesExt};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::reader::ascii_field;

/// Length of the volume header on the wire.
pub const VOLUME_HEADER_LENGTH: u64 = 24;

/// The 24-byte record at the start of every Archive II volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeHeader {
    /// Format name and version, e.g. "AR2V0006.".
    pub tape_filename: [u8; 9],
    /// Volume extension number, e.g. "001" (cycles through 0-999).
    pub extension_number: [u8; 3],
    /// The data's valid date as days since 1970-01-01 UTC.
    pub modified_date: i32,
    /// The data's valid time as milliseconds past midnight UTC.
    pub modified_time: i32,
    /// Radar site identifier, e.g. "KMPX".
    pub icao: [u8; 4],
}

impl VolumeHeader {
    /// Decodes the volume header from the start of the outer stream.
    pub fn decode<R: Read>(reader: &mut R) -> Result<Self> {
        let mut tape_filename = [0u8; 9];
        reader.read_exact(&mut tape_filename)?;
        let mut extension_number = [0u8; 3];
        reader.read_exact(&mut extension_number)?;
        let modified_date = reader.read_i32::<BigEndian>()?;
        let modified_time = reader.read_i32::<BigEndian>()?;
        let mut icao = [0u8; 4];
        reader.read_exact(&mut icao)?;

        Ok(Self {
            tape_filename,
            extension_number,
            modified_date,
            modified_time,
            icao,
        })
    }

    /// Archive filename for this volume, e.g. "AR2V0006.001".
    pub fn filename(&self) -> String {
        format!(
            "{}{}",
            String::from_utf8_lossy(&self.tape_filename),
            String::from_utf8_lossy(&self.extension_number)
        )
    }

    /// The radar site identifier as a string.
    pub fn icao(&self) -> String {
        ascii_field(&self.icao)
    }

    /// Date and time this volume's data is valid for.
    pub fn date(&self) -> DateTime<Utc> {
        DateTime::UNIX_EPOCH
            + Duration::milliseconds(
                i64::from(self.modified_date) * 86_400_000 + i64::from(self.modified_time),
            )
    }
}

impl fmt::Display for VolumeHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.filename())
    }
}
