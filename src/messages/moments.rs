//! Data moments: packed gate samples and their scaling (User 3.2.4.17.2/6).

use std::io::Read;

use byteorder::{BigEndian, ReadBytesExt};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::reader::read_payload;

/// Scaled value for a gate whose received signal is below threshold (raw 0).
pub const BELOW_THRESHOLD: f32 = 999.0;

/// Scaled value for a range-folded gate (raw 1).
pub const RANGE_FOLDED: f32 = 998.0;

/// Generic wrapper describing one moment's gate data (User 3.2.4.17.2).
///
/// The 4-byte block type/name prefix is consumed by the radial decoder
/// before this struct is read.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenericDataMoment {
    pub reserved: u32,
    /// Number of data moment gates for the current radial.
    pub number_data_moment_gates: u16,
    /// Range to the center of the first gate, in meters.
    pub data_moment_range: u16,
    /// Size of the data moment sample interval, in meters.
    pub data_moment_range_sample_interval: u16,
    /// Threshold below which adjacent gates are labeled "overlayed".
    pub tover: u16,
    pub snr_threshold: u16,
    pub control_flags: u8,
    /// Bits per gate sample. A multiple of 8; 8 or 16 in practice.
    pub data_word_size: u8,
    pub scale: f32,
    pub offset: f32,
}

impl GenericDataMoment {
    pub fn decode<R: Read>(reader: &mut R) -> Result<Self> {
        Ok(Self {
            reserved: reader.read_u32::<BigEndian>()?,
            number_data_moment_gates: reader.read_u16::<BigEndian>()?,
            data_moment_range: reader.read_u16::<BigEndian>()?,
            data_moment_range_sample_interval: reader.read_u16::<BigEndian>()?,
            tover: reader.read_u16::<BigEndian>()?,
            snr_threshold: reader.read_u16::<BigEndian>()?,
            control_flags: reader.read_u8()?,
            data_word_size: reader.read_u8()?,
            scale: reader.read_f32::<BigEndian>()?,
            offset: reader.read_f32::<BigEndian>()?,
        })
    }

    /// Packed payload length in bytes: gates × word size / 8.
    pub fn data_length(&self) -> usize {
        usize::from(self.number_data_moment_gates) * usize::from(self.data_word_size) / 8
    }
}

/// One moment's worth of gate data for a radial (REF, VEL, SW, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct DataMoment {
    pub generic: GenericDataMoment,
    /// Packed samples, exactly `generic.data_length()` bytes.
    pub data: Vec<u8>,
}

impl DataMoment {
    pub(crate) fn decode<R: Read>(reader: &mut R) -> Result<Self> {
        let generic = GenericDataMoment::decode(reader)?;
        let data = read_payload(reader, generic.data_length())?;
        Ok(Self { generic, data })
    }

    /// Scales the packed samples to physical values.
    ///
    /// For every gate, raw 0 means the signal was below threshold and raw 1
    /// means range-folded data; both map to out-of-band sentinel floats.
    /// Real data starts at raw 2 and scales as `(n - offset) / scale`,
    /// except that a scale of 0 marks samples already in physical units.
    pub fn scaled_data(&self) -> Vec<f32> {
        match self.generic.data_word_size {
            16 => self
                .data
                .chunks_exact(2)
                .map(|pair| {
                    let n = u16::from_be_bytes([pair[0], pair[1]]);
                    self.scale_sample(n)
                })
                .collect(),
            _ => self.data.iter().map(|&n| self.scale_sample(u16::from(n))).collect(),
        }
    }

    fn scale_sample(&self, n: u16) -> f32 {
        match n {
            0 => BELOW_THRESHOLD,
            1 => RANGE_FOLDED,
            _ => scale_value(n, self.generic.offset, self.generic.scale),
        }
    }

    /// Distance to the center of the first gate, in kilometers.
    pub fn first_gate_range_km(&self) -> f32 {
        f32::from(self.generic.data_moment_range) / 1000.0
    }

    /// Gate-to-gate spacing, in kilometers.
    pub fn gate_interval_km(&self) -> f32 {
        f32::from(self.generic.data_moment_range_sample_interval) / 1000.0
    }
}

/// Converts an integer sample to floating point: `F = (N - OFFSET) / SCALE`.
///
/// A scale value of 0 indicates the moment data is already floating point
/// per gate, so the sample passes through unchanged.
pub fn scale_value(n: u16, offset: f32, scale: f32) -> f32 {
    let val = f32::from(n);
    if scale == 0.0 {
        return val;
    }
    (val - offset) / scale
}
