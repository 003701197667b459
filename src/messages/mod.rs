//! Message framing and dispatch within an LDM record.
//!
//! Each message is framed as 12 bytes of legacy CTM padding, a 16-byte
//! header, and a type-dependent body. Metadata messages are padded out to a
//! fixed record length; Message 31 is not and self-describes its length.
//! The router preserves that asymmetry so subsequent messages stay aligned.

mod header;
mod moments;
mod performance;
mod radial;
mod status;

pub use header::MessageHeader;
pub use moments::{scale_value, DataMoment, GenericDataMoment, BELOW_THRESHOLD, RANGE_FOLDED};
pub use performance::Message3;
pub use radial::{
    ElevationData, Message31, Message31Header, RadialData, VolumeData,
    RADIAL_STATUS_BEGINNING_OF_VOLUME, RADIAL_STATUS_END_OF_ELEVATION,
    RADIAL_STATUS_END_OF_VOLUME, RADIAL_STATUS_INTERMEDIATE,
    RADIAL_STATUS_START_NEW_ELEVATION, RADIAL_STATUS_START_OF_ELEVATION,
};
pub use status::Message2;

use std::io::Read;

use crate::error::{Error, Result};
use crate::reader::{discard, read_exact_or_eof};

/// Size of every metadata record regardless of its contents.
pub const DEFAULT_METADATA_RECORD_LENGTH: u64 = 2432;

/// Legacy CTM header length; sits in front of every message header.
pub const LEGACY_CTM_HEADER_LENGTH: u64 = 12;

/// Length of [`MessageHeader`] on the wire.
pub const MESSAGE_HEADER_LENGTH: u64 = 16;

/// Padding after a Message 2 body to reach the fixed record length.
const MESSAGE2_PADDING: u64 = DEFAULT_METADATA_RECORD_LENGTH
    - LEGACY_CTM_HEADER_LENGTH
    - MESSAGE_HEADER_LENGTH
    - status::MESSAGE2_BODY_LENGTH;

/// Full padded body length of a skipped metadata message.
const METADATA_BODY_LENGTH: u64 =
    DEFAULT_METADATA_RECORD_LENGTH - LEGACY_CTM_HEADER_LENGTH - MESSAGE_HEADER_LENGTH;

/// A routed message body.
#[derive(Debug)]
pub(crate) enum MessageBody {
    Status(Message2),
    Radial(Box<Message31>),
    Performance(Message3),
    Skipped,
}

/// Reads the next message from a decompressed LDM stream.
///
/// Returns `Ok(None)` on a clean EOF at the CTM padding or at the message
/// header, which marks the end of the record. `build` is required to frame
/// a Message 31; the metadata record's Message 2 always precedes one.
pub(crate) fn next_message<R: Read>(
    reader: &mut R,
    build: Option<f32>,
) -> Result<Option<MessageBody>> {
    let mut ctm = [0u8; LEGACY_CTM_HEADER_LENGTH as usize];
    if !read_exact_or_eof(reader, &mut ctm)? {
        return Ok(None);
    }

    let header = match MessageHeader::decode(reader)? {
        Some(header) => header,
        None => return Ok(None),
    };

    log::debug!(
        "  Message Type {} (segments: {} size: {})",
        header.message_type,
        header.num_message_segments,
        header.message_size
    );

    match header.message_type {
        2 => {
            let m2 = Message2::decode(reader)?;
            discard(reader, MESSAGE2_PADDING)?;
            Ok(Some(MessageBody::Status(m2)))
        }
        31 => {
            let build = build.ok_or(Error::MissingRadarStatus)?;
            let m31 = Message31::decode(reader, build)?;
            Ok(Some(MessageBody::Radial(Box::new(m31))))
        }
        3 => {
            let mut body = vec![0u8; METADATA_BODY_LENGTH as usize];
            reader.read_exact(&mut body)?;
            Ok(Some(MessageBody::Performance(Message3::new(body))))
        }
        _ => {
            discard(reader, METADATA_BODY_LENGTH)?;
            Ok(Some(MessageBody::Skipped))
        }
    }
}
