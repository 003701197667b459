//! LDM compressed record loading (RDA/RPG 7.3.4).
//!
//! Every record is a signed 4-byte length word followed by that many bytes
//! of bzip2 stream. The decompressor is fed through a length-capped view of
//! the outer reader so it can never consume into the next record, and any
//! slack it leaves is drained so the outer cursor lands exactly on the next
//! length word.

use std::io::{self, Read};

use bzip2::read::MultiBzDecoder;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::messages::{next_message, Message2, Message3, Message31, MessageBody};
use crate::reader::read_exact_or_eof;

/// Outer framing of one LDM record.
///
/// The size is normalized: a negative length word on the wire is stored as
/// its absolute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LdmRecord {
    /// Compressed body length in bytes, not counting the length word.
    pub size: i32,
}

/// Fully decoded contents of one LDM record.
///
/// This is the immutable hand-off value between the record loader and the
/// volume: parsing happens without any shared state, and the volume merges
/// the finished record under its own lock.
#[derive(Debug, Clone)]
pub struct LoadedRecord {
    /// Normalized compressed body length, for offset bookkeeping.
    pub size: i32,
    /// The record's RDA status message, if it carried one.
    pub status: Option<Message2>,
    /// The record's performance/maintenance message, if it carried one.
    pub performance: Option<Message3>,
    /// Radials in the order they appeared in the record.
    pub radials: Vec<Message31>,
}

impl LoadedRecord {
    /// The outer framing for this record.
    pub fn ldm(&self) -> LdmRecord {
        LdmRecord { size: self.size }
    }
}

/// Loads one LDM record from `reader`.
///
/// Returns `Ok(None)` on a clean EOF at the length word or on a zero
/// length, both of which terminate record iteration. `build` is the RDA
/// build from an earlier status message, if one is known; the first status
/// message decoded here is gated against the minimum supported build.
pub fn load_ldm_record<R: Read>(
    reader: &mut R,
    mut build: Option<f32>,
) -> Result<Option<LoadedRecord>> {
    let mut size_word = [0u8; 4];
    if !read_exact_or_eof(reader, &mut size_word)? {
        return Ok(None);
    }

    // The size can be negative, but is interpreted as positive (RDA/RPG 7.3.4).
    let size = i32::from_be_bytes(size_word);
    if size == 0 {
        return Ok(None);
    }
    let size = size.unsigned_abs();

    log::debug!("LDM Compressed Record ({} bytes)", size);

    let mut record = LoadedRecord {
        size: size as i32,
        status: None,
        performance: None,
        radials: Vec::new(),
    };

    let mut limited = reader.take(u64::from(size));
    {
        let mut inner = MultiBzDecoder::new(&mut limited);

        while let Some(body) = next_message(&mut inner, build)? {
            match body {
                MessageBody::Status(m2) => {
                    log::info!(
                        "status={} op-status={} vcp={} build={:.2}",
                        m2.rda_status(),
                        m2.operability_status(),
                        m2.vcp_num(),
                        m2.build_number(),
                    );

                    if build.is_none() {
                        if m2.build_number() < 18.0 {
                            return Err(Error::UnsupportedBuild {
                                build: m2.build_number(),
                            });
                        }
                        build = Some(m2.build_number());
                    }
                    if record.status.is_none() {
                        record.status = Some(m2);
                    }
                }
                MessageBody::Radial(m31) => record.radials.push(*m31),
                MessageBody::Performance(m3) => {
                    if record.performance.is_none() {
                        record.performance = Some(m3);
                    }
                }
                MessageBody::Skipped => {}
            }
        }
    }

    // The next record begins immediately after the compressed body.
    io::copy(&mut limited, &mut io::sink()).map_err(Error::Io)?;

    Ok(Some(record))
}
