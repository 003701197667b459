//! Error types for Archive II decoding.

use std::io;

use thiserror::Error;

/// The error type for Archive II decode operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    /// The byte source ended in the middle of a field or block.
    ///
    /// A clean EOF at an LDM record boundary or at the start of a message
    /// header is normal termination and never surfaces as this error.
    #[error("unexpected end of stream")]
    UnexpectedEof,

    /// IO error from the underlying byte source.
    #[error("IO error: {0}")]
    Io(io::Error),

    /// The decompressor rejected an LDM record's compressed body.
    #[error("bzip2 stream error: {0}")]
    Bzip(io::Error),

    /// The volume reports an RDA build older than 18.00.
    #[error("unsupported RDA build {build:.2}: builds 18.00 and newer are supported")]
    UnsupportedBuild {
        /// The build number reported by the RDA status message.
        build: f32,
    },

    /// A Message 31 data block carried a name outside the recognized set.
    #[error("unknown data block type {name:?}")]
    UnknownDataBlock {
        /// The 3-character block name as found in the stream.
        name: String,
    },

    /// A data block declared more payload bytes than the record contains.
    #[error("data block truncated: {expected} bytes declared, stream ended early")]
    Truncated {
        /// Declared payload length in bytes.
        expected: usize,
    },

    /// A radial was encountered before any RDA status message.
    ///
    /// The Message 31 pointer table is sized by the RDA build number, so a
    /// radial cannot be framed until a Message 2 has been decoded.
    #[error("radial encountered before an RDA status message")]
    MissingRadarStatus,
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::UnexpectedEof => Error::UnexpectedEof,
            // The bzip2 crate reports decompression failures with these kinds.
            io::ErrorKind::InvalidInput | io::ErrorKind::InvalidData => Error::Bzip(err),
            _ => Error::Io(err),
        }
    }
}

/// A specialized Result type for Archive II decode operations.
pub type Result<T> = std::result::Result<T, Error>;
