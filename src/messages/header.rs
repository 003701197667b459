//! Message header framing (User 3.2.4.1).

use std::io::Read;

use byteorder::{BigEndian, ReadBytesExt};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::reader::read_exact_or_eof;

/// High-level description of a single message within an LDM record.
///
/// Every message is preceded by 12 bytes of legacy CTM padding (discarded
/// by the router) and this 16-byte header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageHeader {
    /// Message size in halfwords, including this header.
    pub message_size: u16,
    pub rda_redundant_channel: u8,
    /// Message type; 2 and 31 are decoded, everything else is skipped.
    pub message_type: u8,
    pub id_sequence_number: u16,
    pub julian_date: u16,
    pub millis_of_day: u32,
    pub num_message_segments: u16,
    pub message_segment_num: u16,
}

impl MessageHeader {
    /// Decodes one message header.
    ///
    /// Returns `Ok(None)` on a clean EOF before the first byte, which marks
    /// the end of the enclosing LDM record.
    pub fn decode<R: Read>(reader: &mut R) -> Result<Option<Self>> {
        let mut buf = [0u8; 16];
        if !read_exact_or_eof(reader, &mut buf)? {
            return Ok(None);
        }

        let mut cursor = &buf[..];
        Ok(Some(Self {
            message_size: cursor.read_u16::<BigEndian>()?,
            rda_redundant_channel: cursor.read_u8()?,
            message_type: cursor.read_u8()?,
            id_sequence_number: cursor.read_u16::<BigEndian>()?,
            julian_date: cursor.read_u16::<BigEndian>()?,
            millis_of_day: cursor.read_u32::<BigEndian>()?,
            num_message_segments: cursor.read_u16::<BigEndian>()?,
            message_segment_num: cursor.read_u16::<BigEndian>()?,
        }))
    }
}
