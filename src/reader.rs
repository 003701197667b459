//! Low-level read helpers over an arbitrary byte source.
//!
//! Everything in the Archive II format is big-endian and packed; primitive
//! reads go through `byteorder`. The helpers here handle the two EOF
//! policies the format needs: a clean EOF at a record or message boundary
//! ends iteration, while an EOF inside a field is an error.

use std::io::{self, Read};

use crate::error::{Error, Result};

/// Reads exactly `buf.len()` bytes.
///
/// Returns `Ok(false)` if the source is already at EOF before the first
/// byte (a clean boundary), `Ok(true)` once the buffer is filled, and
/// `Error::UnexpectedEof` if the source ends partway through.
pub(crate) fn read_exact_or_eof<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<bool> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) if filled == 0 => return Ok(false),
            Ok(0) => return Err(Error::UnexpectedEof),
            Ok(n) => filled += n,
            Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(true)
}

/// Reads and drops exactly `count` bytes.
pub(crate) fn discard<R: Read>(reader: &mut R, count: u64) -> Result<()> {
    let copied = io::copy(&mut reader.take(count), &mut io::sink())?;
    if copied < count {
        return Err(Error::UnexpectedEof);
    }
    Ok(())
}

/// Reads a declared-length payload into a fresh buffer.
///
/// Short reads surface as `Error::Truncated` rather than `UnexpectedEof`:
/// the length came from a header inside the record, so running out of bytes
/// means the message lied about its size.
pub(crate) fn read_payload<R: Read>(reader: &mut R, len: usize) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; len];
    reader
        .read_exact(&mut buf)
        .map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => Error::Truncated { expected: len },
            _ => e.into(),
        })?;
    Ok(buf)
}

/// Decodes a fixed-size ASCII field, trimming trailing NULs and spaces.
pub(crate) fn ascii_field(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .trim_end_matches(['\0', ' '])
        .to_string()
}
