//! Error kinds produced by the codec.
//!
//! Every decode error aborts the whole parse; there is no partial-message
//! recovery. Not represented here: an unrecognized record type is not a
//! failure, it decodes to `RData::Opaque`.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Structural decode/encode failures.
#[derive(Debug, Error)]
pub enum Error {
    /// Tried to read more bytes than remain in the buffer.
    #[error("short read: needed {needed} bytes, {available} available")]
    ShortRead { needed: usize, available: usize },

    /// A well-formed-looking field violates packet structure.
    #[error("malformed packet: {0}")]
    FormatError(&'static str),

    /// A `Label` violates RFC 1035 length limits.
    #[error("invalid label: {0}")]
    LabelError(&'static str),

    /// RR class isn't one this codec understands.
    #[error("unsupported class: {0}")]
    UnsupportedClass(u16),

    /// Overwrite in `Buffer::update` would run past the end of the buffer.
    #[error("update at {offset} with {len} bytes overruns buffer of length {buf_len}")]
    UpdateOutOfBounds {
        offset: usize,
        len: usize,
        buf_len: usize,
    },

    /// A compression pointer, or an explicit `Buffer::seek`, lands outside the packet.
    #[error("offset {0} is outside the packet")]
    OffsetOutOfBounds(usize),
}
