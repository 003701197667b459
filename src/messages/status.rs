//! Message 2 — RDA Status Data (User 3.2.4.6).
//!
//! The status message is decoded for two reasons: it carries the RDA build
//! number that sizes the Message 31 pointer table, and it is the volume's
//! radar status record. The first Message 2 in a volume wins; later ones
//! are parsed and discarded.

use std::io::Read;

use byteorder::{BigEndian, ReadBytesExt};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Decoded body length. The message is padded out to the fixed metadata
/// record length by the router.
pub(crate) const MESSAGE2_BODY_LENGTH: u64 = 68;

/// RDA Status Data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message2 {
    pub rda_status: u16,
    pub operability_status: u16,
    pub control_status: u16,
    pub aux_power_generator_state: u16,
    pub avg_tx_power: u16,
    pub horiz_ref_calib_corr: u16,
    pub data_tx_enabled: u16,
    pub volume_coverage_pattern_num: u16,
    pub rda_control_auth: u16,
    pub rda_build: u16,
    pub operational_mode: u16,
    pub super_res_status: u16,
    pub clutter_mitigation_decision_status: u16,
    pub avset_status: u16,
    pub rda_alarm_summary: u16,
    pub command_ack: u16,
    pub channel_control_status: u16,
    pub spot_blanking_status: u16,
    pub bypass_map_gen_date: u16,
    pub bypass_map_gen_time: u16,
    pub clutter_filter_map_gen_date: u16,
    pub clutter_filter_map_gen_time: u16,
    pub vert_ref_calib_corr: u16,
    pub transition_pwr_source_status: u16,
    pub rms_control_status: u16,
    pub performance_check_status: u16,
    pub alarm_codes: u16,
    pub spares: [u8; 14],
}

impl Message2 {
    /// Decodes the 68-byte status body.
    pub fn decode<R: Read>(reader: &mut R) -> Result<Self> {
        let mut m2 = Self {
            rda_status: reader.read_u16::<BigEndian>()?,
            operability_status: reader.read_u16::<BigEndian>()?,
            control_status: reader.read_u16::<BigEndian>()?,
            aux_power_generator_state: reader.read_u16::<BigEndian>()?,
            avg_tx_power: reader.read_u16::<BigEndian>()?,
            horiz_ref_calib_corr: reader.read_u16::<BigEndian>()?,
            data_tx_enabled: reader.read_u16::<BigEndian>()?,
            volume_coverage_pattern_num: reader.read_u16::<BigEndian>()?,
            rda_control_auth: reader.read_u16::<BigEndian>()?,
            rda_build: reader.read_u16::<BigEndian>()?,
            operational_mode: reader.read_u16::<BigEndian>()?,
            super_res_status: reader.read_u16::<BigEndian>()?,
            clutter_mitigation_decision_status: reader.read_u16::<BigEndian>()?,
            avset_status: reader.read_u16::<BigEndian>()?,
            rda_alarm_summary: reader.read_u16::<BigEndian>()?,
            command_ack: reader.read_u16::<BigEndian>()?,
            channel_control_status: reader.read_u16::<BigEndian>()?,
            spot_blanking_status: reader.read_u16::<BigEndian>()?,
            bypass_map_gen_date: reader.read_u16::<BigEndian>()?,
            bypass_map_gen_time: reader.read_u16::<BigEndian>()?,
            clutter_filter_map_gen_date: reader.read_u16::<BigEndian>()?,
            clutter_filter_map_gen_time: reader.read_u16::<BigEndian>()?,
            vert_ref_calib_corr: reader.read_u16::<BigEndian>()?,
            transition_pwr_source_status: reader.read_u16::<BigEndian>()?,
            rms_control_status: reader.read_u16::<BigEndian>()?,
            performance_check_status: reader.read_u16::<BigEndian>()?,
            alarm_codes: reader.read_u16::<BigEndian>()?,
            spares: [0u8; 14],
        };
        reader.read_exact(&mut m2.spares)?;
        Ok(m2)
    }

    /// The RDA software build number, e.g. 18.00 for a raw value of 1800.
    pub fn build_number(&self) -> f32 {
        f32::from(self.rda_build) / 100.0
    }

    /// Human-readable RDA status.
    pub fn rda_status(&self) -> &'static str {
        match self.rda_status {
            2 => "Start-Up",
            4 => "Standby",
            8 => "Restart",
            16 => "Operate",
            32 => "Spare",
            64 => "Off-line Operate",
            _ => "Unknown",
        }
    }

    /// Human-readable operability status.
    pub fn operability_status(&self) -> &'static str {
        match self.operability_status {
            2 => "On-line",
            4 => "Maintenance Action Required",
            8 => "Maintenance Action Mandatory",
            16 => "Commanded Shut Down",
            32 => "Inoperable",
            _ => "Unknown",
        }
    }

    /// The active Volume Coverage Pattern number.
    pub fn vcp_num(&self) -> u16 {
        self.volume_coverage_pattern_num
    }
}
