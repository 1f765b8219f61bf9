//! A byte sequence with a single read/write cursor.
//!
//! One offset serves both roles: a buffer built from wire bytes starts
//! reading at 0, while a buffer built empty for encoding starts writing at 0
//! and grows as `pack`/`append` extend it.

use std::collections::HashMap;

use byteorder::{BigEndian, ByteOrder};

use crate::errors::{Error, Result};

/// A byte sequence plus the cursor, and (used only by [`crate::compress`])
/// a per-buffer cache from a label suffix to the offset it was last written
/// at. The cache lives here rather than in a wrapper type so that name
/// encoding can interleave with the plain integer reads/writes the rest of
/// the codec does through the same buffer.
#[derive(Clone, Debug, Default)]
pub struct Buffer {
    data: Vec<u8>,
    offset: usize,
    pub(crate) name_cache: HashMap<Vec<Vec<u8>>, usize>,
}

impl Buffer {
    /// Wraps existing bytes for decoding, cursor at 0.
    pub fn new(data: Vec<u8>) -> Self {
        Buffer {
            data,
            offset: 0,
            name_cache: HashMap::new(),
        }
    }

    /// An empty buffer for encoding.
    pub fn empty() -> Self {
        Buffer {
            data: Vec::new(),
            offset: 0,
            name_cache: HashMap::new(),
        }
    }

    /// Current cursor position.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Bytes left to read after the current offset.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    /// Total length of the underlying bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Moves the cursor to an absolute offset, used to follow compression
    /// pointers. Rejects an offset past the end of the buffer; a read that
    /// would run off the end from a still-in-bounds offset instead fails
    /// with `ShortRead` once it's attempted.
    pub fn seek(&mut self, offset: usize) -> Result<()> {
        if offset > self.data.len() {
            return Err(Error::OffsetOutOfBounds(offset));
        }
        self.offset = offset;
        Ok(())
    }

    /// Returns the next `n` bytes and advances the cursor.
    pub fn get(&mut self, n: usize) -> Result<&[u8]> {
        if self.remaining() < n {
            return Err(Error::ShortRead {
                needed: n,
                available: self.remaining(),
            });
        }
        let start = self.offset;
        self.offset += n;
        Ok(&self.data[start..start + n])
    }

    /// Reads one big-endian `u8`.
    pub fn get_u8(&mut self) -> Result<u8> {
        Ok(self.get(1)?[0])
    }

    /// Reads one big-endian `u16`.
    pub fn get_u16(&mut self) -> Result<u16> {
        Ok(BigEndian::read_u16(self.get(2)?))
    }

    /// Reads one big-endian `u32`.
    pub fn get_u32(&mut self) -> Result<u32> {
        Ok(BigEndian::read_u32(self.get(4)?))
    }

    /// Appends raw bytes and advances the cursor, growing the buffer.
    pub fn append(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
        self.offset = self.data.len();
    }

    /// Appends one big-endian `u8`.
    pub fn put_u8(&mut self, v: u8) {
        self.append(&[v]);
    }

    /// Appends one big-endian `u16`.
    pub fn put_u16(&mut self, v: u16) {
        let mut buf = [0u8; 2];
        BigEndian::write_u16(&mut buf, v);
        self.append(&buf);
    }

    /// Appends one big-endian `u32`.
    pub fn put_u32(&mut self, v: u32) {
        let mut buf = [0u8; 4];
        BigEndian::write_u32(&mut buf, v);
        self.append(&buf);
    }

    /// Overwrites `bytes.len()` bytes at `pos` without moving the cursor.
    /// Used to back-patch an rdlength field once its RDATA has been
    /// written. Fails if the overwrite would run past the end of the buffer.
    pub fn update(&mut self, pos: usize, bytes: &[u8]) -> Result<()> {
        if pos + bytes.len() > self.data.len() {
            return Err(Error::UpdateOutOfBounds {
                offset: pos,
                len: bytes.len(),
                buf_len: self.data.len(),
            });
        }
        self.data[pos..pos + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }

    /// Back-patches a big-endian `u16` at `pos`.
    pub fn update_u16(&mut self, pos: usize, v: u16) -> Result<()> {
        let mut buf = [0u8; 2];
        BigEndian::write_u16(&mut buf, v);
        self.update(pos, &buf)
    }

    /// Consumes the buffer, returning the accumulated bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Borrows the accumulated bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_big_endian_integers() {
        let mut buf = Buffer::new(vec![0x01, 0x02, 0x00, 0x03]);
        assert_eq!(buf.get_u8().unwrap(), 0x01);
        assert_eq!(buf.get_u16().unwrap(), 0x0203);
    }

    #[test]
    fn short_read_reports_shortfall() {
        let mut buf = Buffer::new(vec![0x01]);
        match buf.get_u16() {
            Err(Error::ShortRead { needed, available }) => {
                assert_eq!(needed, 2);
                assert_eq!(available, 1);
            }
            other => panic!("expected ShortRead, got {:?}", other),
        }
    }

    #[test]
    fn update_back_patches_without_moving_cursor() {
        let mut buf = Buffer::empty();
        buf.put_u16(0); // placeholder
        buf.put_u8(0xff);
        let cursor_before = buf.offset();
        buf.update_u16(0, 1).unwrap();
        assert_eq!(buf.offset(), cursor_before);
        assert_eq!(buf.as_bytes(), &[0x00, 0x01, 0xff]);
    }

    #[test]
    fn update_past_end_fails() {
        let mut buf = Buffer::empty();
        buf.put_u8(1);
        assert!(buf.update_u16(0, 1).is_err());
    }
}
